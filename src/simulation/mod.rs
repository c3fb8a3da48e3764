pub mod config;
pub mod engine;
pub mod observer;
pub mod state;
