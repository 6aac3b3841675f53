pub mod common;
pub mod entry;
pub mod pagination;
pub mod session;

pub use common::*;
pub use entry::*;
pub use pagination::*;
pub use session::*;
