use actix_web::{HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

use crate::models::*;
use crate::services::DrawSessionService;

#[utoipa::path(
    post,
    path = "/sessions/{id}/draw",
    tag = "draw",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Winner drawn", body = DrawResponse),
        (status = 404, description = "Session not found", body = ApiError),
        (status = 409, description = "No entries loaded, search matches nothing, or history full", body = ApiError)
    )
)]
/// 抽奖:
/// 1. 检查是否已导入参与者
/// 2. 在当前搜索结果中均匀随机抽取
/// 3. 写入中奖历史（超出容量淘汰最旧记录）
pub async fn draw(
    service: web::Data<DrawSessionService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.draw(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/sessions/{id}/history",
    tag = "draw",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "Winner history, oldest first", body = HistoryResponse),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn get_history(
    service: web::Data<DrawSessionService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.history(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}/history",
    tag = "draw",
    params(
        ("id" = Uuid, Path, description = "Session id")
    ),
    responses(
        (status = 200, description = "History cleared", body = HistoryResponse),
        (status = 404, description = "Session not found", body = ApiError)
    )
)]
pub async fn clear_history(
    service: web::Data<DrawSessionService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.clear_history(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/sessions/{id}/draw", web::post().to(draw))
        .service(
            web::resource("/sessions/{id}/history")
                .route(web::get().to(get_history))
                .route(web::delete().to(clear_history)),
        );
}
