use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::engine::cell::is_blank_row;
use crate::engine::{Cell, RawRow};
use crate::error::{AppError, AppResult};

/// 表格解码器：字节 -> 第一个工作表的原始行（已去除全空行）
pub trait TabularReader: Send + Sync {
    fn read_rows(&self, bytes: &[u8]) -> AppResult<Vec<RawRow>>;
}

/// 基于 calamine 的 `.xlsx` 解码器
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Int(n) => Cell::Int(*n),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        // 日期按 Excel 序列号输出
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}

impl TabularReader for XlsxReader {
    fn read_rows(&self, bytes: &[u8]) -> AppResult<Vec<RawRow>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|e| {
            log::debug!("Failed to open workbook: {e}");
            AppError::DecodeError("corrupt or unsupported format".into())
        })?;

        let Some(first_sheet) = workbook.sheet_names().first().cloned() else {
            return Err(AppError::DecodeError("no sheets".into()));
        };

        let range = workbook.worksheet_range(&first_sheet).map_err(|e| {
            log::debug!("Failed to read sheet {first_sheet}: {e}");
            AppError::DecodeError("corrupt or unsupported format".into())
        })?;

        // Range 从第一个非空单元格开始，补齐左侧列使下标 0 始终对应 A 列
        let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let rows: Vec<RawRow> = range
            .rows()
            .map(|row| {
                let mut cells = vec![Cell::Empty; leading_cols];
                cells.extend(row.iter().map(to_cell));
                cells
            })
            .filter(|cells| !is_blank_row(cells))
            .collect();

        log::debug!("Sheet {first_sheet}: {} non-blank rows", rows.len());
        Ok(rows)
    }
}
