//! Value types, configuration and viewport fitting.

pub mod config;
pub mod constants;
pub mod geo;
pub mod state;
pub mod viewport;
