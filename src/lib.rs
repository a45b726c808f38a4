pub mod artifact;
pub mod client;
pub mod commands;
pub mod config;
pub mod consts;
pub mod currency;
pub mod error;
pub mod form;
pub mod layout;
pub mod notify;
pub mod present;
pub mod screen;
pub mod spinner;
pub mod state;
