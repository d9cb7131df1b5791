pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod profile;
pub mod prompt;
pub mod sanitize;
