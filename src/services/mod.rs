pub mod draw_session_service;
pub mod ingestion_service;

pub use draw_session_service::*;
pub use ingestion_service::*;
