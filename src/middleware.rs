use actix_cors::Cors;
use actix_web::http::Uri;

/// CORS for the browser client. An origin list containing `*` allows any
/// origin; entries that are not valid URIs are skipped.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .filter(|o| o.parse::<Uri>().is_ok())
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
