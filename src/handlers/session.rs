use actix_web::{HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

use crate::models::*;
use crate::services::DrawSessionService;

#[utoipa::path(
    post,
    path = "/sessions",
    tag = "session",
    responses(
        (status = 200, description = "Session created", body = SessionResponse)
    )
)]
/// 创建新的抽奖会话
pub async fn create_session(service: web::Data<DrawSessionService>) -> Result<HttpResponse> {
    let session = service.create_session().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(session)))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "session",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Session summary", body = SessionResponse),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
/// 会话概要（参与者数量、当前搜索、历史容量、最新中奖者）
pub async fn get_session(
    service: web::Data<DrawSessionService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.get_session(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "session",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn delete_session(
    service: web::Data<DrawSessionService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.delete_session(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            (),
            "Session deleted".to_string(),
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn session_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/sessions", web::post().to(create_session))
        .service(
            web::resource("/sessions/{id}")
                .route(web::get().to(get_session))
                .route(web::delete().to(delete_session)),
        );
}
