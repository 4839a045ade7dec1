pub mod config;
pub mod message;
pub mod quick_action;

mod locale;
