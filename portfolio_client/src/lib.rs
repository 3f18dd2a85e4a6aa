//! Browser-side behavior of the portfolio page: the contact form controller,
//! the notification presenter and the page level UI state.
//!
//! Rendering is abstracted behind small capability traits
//! ([`form::FormSurface`], [`presenter::NotificationSurface`]) so everything
//! here runs without a real DOM.

pub mod controller;
pub mod form;
pub mod presenter;
pub mod transport;
pub mod ui;
