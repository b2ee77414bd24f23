mod app_state;
mod config;
pub use app_state::*;
pub use config::*;
pub mod errors;
pub mod fetching;
pub mod output;
pub mod pipeline;
