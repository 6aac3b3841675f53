use actix_cors::Cors;

/// 前端与后端分开部署，放开来源限制；会话 ID 由前端自行保存，无需携带凭据
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
