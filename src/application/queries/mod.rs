//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：历史记录与音频文件

mod audio_queries;
mod history_queries;

pub mod handlers;

pub use audio_queries::*;
pub use history_queries::*;
