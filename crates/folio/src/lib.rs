pub mod config;
pub mod contact;
pub mod events;
pub mod gui;
pub mod report;
pub mod sys;
