use std::sync::Arc;

use crate::engine::{ValidateOptions, validate};
use crate::error::{AppError, AppResult};
use crate::external::TabularReader;
use crate::models::Entry;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 上传文件 -> 参与者列表（类型检查、解码、校验）
#[derive(Clone)]
pub struct IngestionService {
    reader: Arc<dyn TabularReader>,
    options: ValidateOptions,
}

impl IngestionService {
    pub fn new(reader: Arc<dyn TabularReader>, options: ValidateOptions) -> Self {
        Self { reader, options }
    }

    /// 媒体类型或扩展名任一符合即可
    pub fn check_file_type(file_name: Option<&str>, content_type: Option<&str>) -> AppResult<()> {
        let type_ok = content_type
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(XLSX_CONTENT_TYPE));
        let name_ok = file_name.is_some_and(|name| name.to_ascii_lowercase().ends_with(".xlsx"));

        if type_ok || name_ok {
            Ok(())
        } else {
            Err(AppError::InvalidFileType(format!(
                "file_name={}, content_type={}",
                file_name.unwrap_or("-"),
                content_type.unwrap_or("-")
            )))
        }
    }

    pub fn ingest(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> AppResult<Vec<Entry>> {
        if bytes.is_empty() {
            return Err(AppError::NoFile);
        }
        Self::check_file_type(file_name, content_type)?;

        let rows = self.reader.read_rows(bytes)?;
        let entries = validate(&rows, self.options)?;
        log::info!(
            "Ingested {} entries from {} rows ({})",
            entries.len(),
            rows.len(),
            file_name.unwrap_or("unnamed upload")
        );
        Ok(entries)
    }
}
