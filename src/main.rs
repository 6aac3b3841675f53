use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use lucky_chooser::{
    config::Config, external::XlsxReader, handlers, middlewares::create_cors,
    services::DrawSessionService, swagger::swagger_config, tasks,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration");

    let max_upload_bytes = config.draw.max_upload_bytes;
    let draw_session_service = DrawSessionService::new(config.draw.clone(), Arc::new(XlsxReader));

    // 后台清理闲置会话
    tasks::spawn_all(draw_session_service.clone());

    log::info!(
        "Starting HTTP server at {}:{} (history capacity {}, debounce {}ms)",
        config.server.host,
        config.server.port,
        config.draw.max_history,
        config.draw.search_debounce_ms
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(draw_session_service.clone()))
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::session_config)
                    .configure(handlers::entries_config)
                    .configure(handlers::draw_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
