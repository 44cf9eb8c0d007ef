//! History Queries

/// 最近翻译历史查询
///
/// `limit` 为空时使用配置的默认条数
#[derive(Debug, Clone, Default)]
pub struct ListHistory {
    pub limit: Option<u32>,
}

/// 单条翻译历史查询
#[derive(Debug, Clone)]
pub struct GetHistoryEntry {
    pub id: i64,
}
