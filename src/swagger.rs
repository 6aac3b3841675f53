use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::engine::IngestMode;
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::session::create_session,
        handlers::session::get_session,
        handlers::session::delete_session,
        handlers::entries::upload,
        handlers::entries::list_entries,
        handlers::entries::set_search,
        handlers::draw::draw,
        handlers::draw::get_history,
        handlers::draw::clear_history,
    ),
    components(
        schemas(
            Entry,
            WinnerRecord,
            SessionResponse,
            UploadQuery,
            UploadResponse,
            EntryListQuery,
            EntryListResponse,
            SearchRequest,
            SearchResponse,
            HistoryResponse,
            DrawResponse,
            IngestMode,
            ApiError,
        )
    ),
    tags(
        (name = "session", description = "Draw session API"),
        (name = "entries", description = "Participant upload and search API"),
        (name = "draw", description = "Random draw and winner history API"),
    ),
    info(
        title = "Lucky Chooser API",
        version = "0.1.0",
        description = "Upload a participant spreadsheet and draw random winners"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
