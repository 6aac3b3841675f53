pub mod draw;
pub mod entries;
pub mod session;

pub use draw::draw_config;
pub use entries::entries_config;
pub use session::session_config;
