pub mod config;
pub mod derive;
pub mod events;
pub mod log;
pub mod services;
