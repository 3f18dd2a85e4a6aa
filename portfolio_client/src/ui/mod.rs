//! Page level UI state. Each feature owns its state and changes it through a
//! single method, so event handlers only forward events.

pub mod navigation;
pub mod tabs;
pub mod theme;
