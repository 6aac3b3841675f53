//! 抽奖核心逻辑：表格行校验、搜索过滤、随机抽取、中奖历史。
//!
//! 本模块内的函数均为纯函数（随机源与时钟通过参数注入），
//! 状态的持有与写回由 `services::DrawSessionService` 负责。

pub mod cell;
pub mod debounce;
pub mod draw;
pub mod filter;
pub mod history;
pub mod validator;

pub use cell::{Cell, RawRow};
pub use debounce::Debouncer;
pub use draw::{Clock, RandomSource, SystemClock, draw};
pub use filter::{count_matches, filter_entries};
pub use history::{MAX_HISTORY, WinnerHistory};
pub use validator::{IngestMode, ValidateOptions, validate};
