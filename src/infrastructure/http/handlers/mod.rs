//! HTTP Handlers

mod audio;
mod history;
mod ping;
mod translate;

pub use audio::*;
pub use history::*;
pub use ping::*;
pub use translate::*;
