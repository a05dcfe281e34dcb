//! Serves the built Leptos frontend (`ui/dist`, produced by `trunk build`).

use axum::{
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "ui/dist/"]
#[allow_missing = true]
struct UiAssets;

const INDEX: &str = "index.html";

/// Fallback handler: static asset by path, otherwise the SPA entry point
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { INDEX } else { path };

    match UiAssets::get(path) {
        Some(asset) => asset_response(path, asset.data.into_owned()),
        None if !path.contains('.') => match UiAssets::get(INDEX) {
            Some(index) => asset_response(INDEX, index.data.into_owned()),
            None => not_found(),
        },
        None => not_found(),
    }
}

fn asset_response(path: &str, body: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.as_ref().to_string())], body).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
