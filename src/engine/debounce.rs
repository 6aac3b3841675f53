use chrono::{DateTime, Duration, Utc};

/// 延迟提交：每次输入重新计时，静默期满后才提交最新值。
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, DateTime<Utc>)>,
    committed: String,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            committed: String::new(),
        }
    }

    pub fn input(&mut self, value: impl Into<String>, now: DateTime<Utc>) {
        self.pending = Some((value.into(), now));
    }

    /// 静默期已满则提交待定值，返回当前生效的值
    pub fn committed(&mut self, now: DateTime<Utc>) -> &str {
        let due = matches!(&self.pending, Some((_, at)) if now - *at >= self.delay);
        if due {
            self.flush();
        }
        &self.committed
    }

    pub fn flush(&mut self) {
        if let Some((value, _)) = self.pending.take() {
            self.committed = value;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_value(&self) -> Option<&str> {
        self.pending.as_ref().map(|(v, _)| v.as_str())
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.committed.clear();
    }
}
