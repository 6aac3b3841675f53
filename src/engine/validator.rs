use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::cell::{Cell, RawRow};
use crate::error::{AppError, AppResult};
use crate::models::Entry;

/// 表格列约定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IngestMode {
    /// A 列为 ID，B 列为姓名，两者都必须非空
    #[default]
    TwoColumn,
    /// 只有 A 列姓名，ID 按数据行序号生成
    SingleColumn,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    pub skip_header: bool,
    pub mode: IngestMode,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            skip_header: true,
            mode: IngestMode::TwoColumn,
        }
    }
}

fn cell_text(row: &[Cell], index: usize) -> Option<String> {
    row.get(index)
        .and_then(Cell::to_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 将原始行转换为有效的参与者列表。
///
/// 缺少 ID 或姓名的行被静默丢弃；没有任何有效行时返回 `ValidationError`。
/// 输出顺序与输入一致。
pub fn validate(rows: &[RawRow], options: ValidateOptions) -> AppResult<Vec<Entry>> {
    let data_rows = if options.skip_header {
        if rows.len() <= 1 {
            return Err(AppError::ValidationError(
                "no data rows after the header row".into(),
            ));
        }
        &rows[1..]
    } else {
        rows
    };

    let entries: Vec<Entry> = data_rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match options.mode {
            IngestMode::TwoColumn => {
                let id = cell_text(row, 0)?;
                let name = cell_text(row, 1)?;
                Some(Entry { id, name })
            }
            IngestMode::SingleColumn => cell_text(row, 0).map(|name| Entry {
                id: (index + 1).to_string(),
                name,
            }),
        })
        .collect();

    if entries.is_empty() {
        return Err(AppError::ValidationError("no valid entries".into()));
    }

    Ok(entries)
}
