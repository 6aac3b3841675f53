use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file was uploaded")]
    NoFile,

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No entries loaded")]
    NoEntriesLoaded,

    #[error("No entries match the current search")]
    EmptyPool,

    #[error("Winner history is full ({0} records)")]
    HistoryFull(usize),

    #[error("Upload superseded by a newer upload")]
    UploadSuperseded,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upload exceeds the {0} byte limit")]
    PayloadTooLarge(usize),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 稳定的错误码，前端据此做本地化提示
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NoFile => "NO_FILE",
            AppError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AppError::DecodeError(_) => "DECODE_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NoEntriesLoaded => "NO_ENTRIES",
            AppError::EmptyPool => "EMPTY_POOL",
            AppError::HistoryFull(_) => "HISTORY_FULL",
            AppError::UploadSuperseded => "UPLOAD_SUPERSEDED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        use actix_web::http::StatusCode;

        let (status_code, message) = match self {
            AppError::NoFile => {
                log::warn!("Upload without file content");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::InvalidFileType(msg) => {
                log::warn!("Rejected upload: {msg}");
                (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "Invalid file type. Please upload an .xlsx file.".to_string(),
                )
            }
            AppError::DecodeError(msg) => {
                log::warn!("Spreadsheet decode error: {msg}");
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            AppError::NoEntriesLoaded
            | AppError::EmptyPool
            | AppError::HistoryFull(_)
            | AppError::UploadSuperseded => (StatusCode::CONFLICT, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::PayloadTooLarge(_) => {
                log::warn!("{self}");
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                log::error!("Internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(self.code(), message))
    }
}
