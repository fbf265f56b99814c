use ntex::web;

/// Configures the LINE webhook route.
///
/// # Routes
/// - `POST /callback` - LINE webhook receiver
pub fn line(cfg: &mut web::ServiceConfig) {
    cfg.service(super::line::callback);
}
