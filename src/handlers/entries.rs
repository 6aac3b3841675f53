use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::*;
use crate::services::DrawSessionService;

#[utoipa::path(
    post,
    path = "/sessions/{id}/upload",
    tag = "entries",
    params(
        ("id" = Uuid, Path, description = "Session id"),
        UploadQuery
    ),
    request_body(
        content = String,
        content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        description = "Raw .xlsx file bytes; column A = ID, column B = name, first row is the header"
    ),
    responses(
        (status = 200, description = "File processed", body = UploadResponse),
        (status = 400, description = "Empty body", body = ApiError),
        (status = 409, description = "Superseded by a newer upload", body = ApiError),
        (status = 413, description = "File larger than the upload limit", body = ApiError),
        (status = 415, description = "Not an .xlsx file", body = ApiError),
        (status = 422, description = "Unreadable file or no valid rows", body = ApiError)
    )
)]
/// 上传表格并替换当前参与者列表
pub async fn upload(
    service: web::Data<DrawSessionService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<UploadQuery>,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse> {
    // 请求体读取失败（如超过 PayloadConfig 限制）也返回统一的 JSON 结构
    let body = match body {
        Ok(body) => body,
        Err(e) if e.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE => {
            let limit = service.config().max_upload_bytes;
            return Ok(AppError::PayloadTooLarge(limit).error_response());
        }
        Err(e) => {
            log::warn!("Failed to read upload body: {e}");
            return Ok(AppError::NoFile.error_response());
        }
    };

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match service
        .upload(
            path.into_inner(),
            query.into_inner().file_name,
            content_type,
            body.to_vec(),
        )
        .await
    {
        Ok(data) => {
            let message = format!("{} entries loaded", data.count);
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(data, message)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/sessions/{id}/entries",
    tag = "entries",
    params(
        ("id" = Uuid, Path, description = "Session id"),
        EntryListQuery
    ),
    responses(
        (status = 200, description = "Entries matching the current search", body = EntryListResponse),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
/// 分页获取当前搜索条件下的参与者
pub async fn list_entries(
    service: web::Data<DrawSessionService>,
    path: web::Path<Uuid>,
    query: web::Query<EntryListQuery>,
) -> Result<HttpResponse> {
    match service.list_entries(path.into_inner(), &query.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/sessions/{id}/search",
    tag = "entries",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search text accepted; applied after the debounce delay", body = SearchResponse),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
/// 更新搜索词（防抖后生效）
pub async fn set_search(
    service: web::Data<DrawSessionService>,
    path: web::Path<Uuid>,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse> {
    match service
        .set_search(path.into_inner(), request.into_inner().query)
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn entries_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/sessions/{id}/upload", web::post().to(upload))
        .route("/sessions/{id}/entries", web::get().to(list_entries))
        .route("/sessions/{id}/search", web::put().to(set_search));
}
