//! Handlers not linked to a specific integration

use ntex::web;

/// Liveness probe
#[web::get("/health")]
pub async fn health() -> impl web::Responder {
    web::HttpResponse::Ok().content_type("text/plain").body("OK")
}

/// Plain 404 for urls not defined
pub async fn serve_not_found() -> web::HttpResponse {
    web::HttpResponse::NotFound().finish()
}
