//! Static file serving for the front end's CSS and JavaScript.

use tower_http::services::ServeDir;

/// Create a static file service rooted at `dir`.
///
/// Missing files fall through to a plain 404; the API's JSON 404 does not
/// apply under `/static`.
pub fn create_static_service(dir: &str) -> ServeDir {
    ServeDir::new(dir)
}

