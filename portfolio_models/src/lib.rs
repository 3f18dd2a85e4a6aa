pub mod audit;
pub mod contact;
pub mod email_address;
pub mod markup;
