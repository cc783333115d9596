pub mod app_settings;
pub mod app_state;
pub mod filters;
pub mod messages;
pub mod network;
