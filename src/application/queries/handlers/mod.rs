//! Query Handlers 实现

mod audio_handlers;
mod history_handlers;

pub use audio_handlers::*;
pub use history_handlers::*;
