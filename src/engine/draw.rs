use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::{Entry, WinnerRecord};

/// 随机源。任何 `rand::Rng` 都可直接使用，测试中传入固定种子的 `StdRng`。
pub trait RandomSource {
    /// 返回 `[0, len)` 内均匀分布的下标，调用方保证 `len > 0`
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 从候选池中均匀随机抽取一名中奖者。
///
/// 不修改任何状态，写入历史由调用方完成。同一条目在多次调用间可以重复中奖。
pub fn draw<R>(pool: &[Entry], rng: &mut R, clock: &dyn Clock) -> AppResult<WinnerRecord>
where
    R: RandomSource + ?Sized,
{
    if pool.is_empty() {
        return Err(AppError::EmptyPool);
    }
    let index = rng.pick_index(pool.len());
    let selected = &pool[index];
    Ok(WinnerRecord {
        id: selected.id.clone(),
        name: selected.name.clone(),
        drawn_at: clock.now(),
    })
}
