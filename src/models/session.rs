use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{Entry, PaginatedResponse, WinnerRecord};

/// 会话概要
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub session_id: Uuid,
    /// 最近一次成功上传的文件名
    pub source_file_name: Option<String>,
    /// 已导入的参与者总数
    pub total_entries: usize,
    /// 当前搜索条件下的参与者数
    pub filtered_entries: usize,
    /// 已生效的搜索词
    pub search_query: String,
    /// 尚在防抖等待中的搜索词
    pub pending_search_query: Option<String>,
    pub history_size: usize,
    pub history_capacity: usize,
    pub history_full: bool,
    pub latest_winner: Option<WinnerRecord>,
    pub created_at: DateTime<Utc>,
}

/// 上传查询参数
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// 原始文件名（用于判断扩展名）
    pub file_name: Option<String>,
}

/// 上传成功响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadResponse {
    pub file_name: Option<String>,
    pub count: usize,
    pub entries: Vec<Entry>,
}

/// 参与者列表查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntryListQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 100)
    pub per_page: Option<u32>,
}

/// 参与者列表响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntryListResponse {
    pub total_entries: usize,
    pub search_query: String,
    #[serde(flatten)]
    pub page: PaginatedResponse<Entry>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    /// 输入的搜索词（防抖期满后生效）
    pub pending_query: String,
    /// 当前生效的搜索词
    pub search_query: String,
    pub debounce_ms: i64,
}

/// 中奖历史响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// 按抽取顺序（最旧在前）
    pub winners: Vec<WinnerRecord>,
    pub size: usize,
    pub capacity: usize,
    pub is_full: bool,
}

/// 抽奖响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub winner: WinnerRecord,
    /// 本次从多少名候选者中抽取
    pub pool_size: usize,
    pub history_size: usize,
    pub history_full: bool,
}
