use crate::models::WinnerRecord;

pub const MAX_HISTORY: usize = 30;

/// 有容量上限的中奖历史，按抽取顺序保存（最旧在前）。
#[derive(Debug, Clone, PartialEq)]
pub struct WinnerHistory {
    records: Vec<WinnerRecord>,
    capacity: usize,
}

impl Default for WinnerHistory {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl WinnerHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// 返回追加后的新历史，超出容量时从头部淘汰最旧的记录。原历史不变。
    pub fn append(&self, record: WinnerRecord) -> Self {
        let mut records = Vec::with_capacity((self.records.len() + 1).min(self.capacity));
        let keep_from = (self.records.len() + 1).saturating_sub(self.capacity);
        records.extend(self.records.iter().skip(keep_from).cloned());
        records.push(record);
        Self {
            records,
            capacity: self.capacity,
        }
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn records(&self) -> &[WinnerRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&WinnerRecord> {
        self.records.last()
    }

    pub fn cleared(&self) -> Self {
        Self::new(self.capacity)
    }
}
