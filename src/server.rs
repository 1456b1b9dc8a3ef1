use crate::{
    config::ServerConfig,
    handler::{HandlerResponse, ImageHandler},
};
use actix_web::{
    http::{header, StatusCode},
    middleware::Logger,
    web, App, HttpRequest, HttpResponse, HttpServer,
};

pub const GENERATE_IMAGE_PATH: &str = "/api/generate-image";

/// Every method reaches the handler so it can answer 405 itself.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(GENERATE_IMAGE_PATH).to(generate_image));
}

pub async fn generate_image(
    req: HttpRequest,
    body: web::Bytes,
    handler: web::Data<ImageHandler>,
) -> HttpResponse {
    let response = handler.handle(req.method().as_str(), &body).await;
    into_http_response(response)
}

fn into_http_response(response: HandlerResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    if status == StatusCode::METHOD_NOT_ALLOWED {
        builder.insert_header((header::ALLOW, "POST"));
    }
    builder.json(response.body)
}

pub async fn run(config: ServerConfig, handler: ImageHandler) -> std::io::Result<()> {
    let handler = web::Data::new(handler);

    log::info!(
        "🌐 Listening on http://{}:{}{}",
        config.host,
        config.port,
        GENERATE_IMAGE_PATH
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(handler.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
