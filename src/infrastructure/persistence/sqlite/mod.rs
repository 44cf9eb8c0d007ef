//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod translation_repo;

pub use database::*;
pub use translation_repo::*;
