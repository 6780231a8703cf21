pub mod app;
pub mod contact;
pub mod icon;
pub mod panel;
pub mod theme;
