use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 参与者（从表格导入，导入后不再修改）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Entry {
    /// 参与者 ID（可重复）
    pub id: String,
    /// 姓名
    pub name: String,
}

/// 一次成功抽奖的结果快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WinnerRecord {
    pub id: String,
    pub name: String,
    /// 抽取时间
    pub drawn_at: DateTime<Utc>,
}
