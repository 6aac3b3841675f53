/// 表格单元格的原始值（不做类型推断之外的转换）
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// 公式错误等，如 `#N/A`
    Error(String),
}

/// 一行原始单元格，下标 0 对应 A 列
pub type RawRow = Vec<Cell>;

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 转为文本；空单元格返回 `None`。
    /// 浮点数按表格显示习惯输出（`1.0` -> `"1"`）。
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Int(n) => Some(n.to_string()),
            Cell::Float(f) => Some(f.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Error(e) => Some(e.clone()),
        }
    }
}

pub fn is_blank_row(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_blank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        assert_eq!(Cell::Empty.to_text(), None);
        assert_eq!(Cell::Float(1.0).to_text().as_deref(), Some("1"));
        assert_eq!(Cell::Float(1.5).to_text().as_deref(), Some("1.5"));
        assert_eq!(Cell::Int(-7).to_text().as_deref(), Some("-7"));
        assert_eq!(Cell::Bool(true).to_text().as_deref(), Some("true"));
        assert_eq!(Cell::Text(" a ".into()).to_text().as_deref(), Some(" a "));
    }

    #[test]
    fn test_blank_row() {
        assert!(is_blank_row(&[]));
        assert!(is_blank_row(&[Cell::Empty, Cell::Text(String::new())]));
        assert!(!is_blank_row(&[Cell::Empty, Cell::Int(0)]));
        // 仅含空白字符的单元格在此阶段不算空，由校验器 trim 后处理
        assert!(!is_blank_row(&[Cell::Text("  ".into())]));
    }
}
