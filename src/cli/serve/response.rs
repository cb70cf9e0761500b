//! HTTP response helpers.

use anyhow::Result;
use serde_json::Value;
use tiny_http::{Header, Request, Response, StatusCode};

use crate::embed::pages::{STATUS_HTML, StatusVars};
use crate::utils::mime::types::{HTML, JSON, PLAIN};

/// Respond with the editor shell or another full HTML page.
pub fn respond_html(request: Request, body: String) -> Result<()> {
    send_body(request, 200, HTML, body.into_bytes(), false)
}

/// Respond with a published preview document.
///
/// Preview responses carry `Cache-Control: no-store`: a released handle must
/// 404, and a cached copy would keep a revoked document alive.
pub fn respond_preview_html(request: Request, body: String) -> Result<()> {
    send_body(request, 200, HTML, body.into_bytes(), true)
}

/// Redirect to the current preview handle.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let response = Response::empty(StatusCode(302))
        .with_header(make_header("Location", location))
        .with_header(make_header("Cache-Control", "no-store"));
    request.respond(response)?;
    Ok(())
}

/// Respond with an embedded static asset.
pub fn respond_asset(request: Request, content_type: &'static str, body: &'static str) -> Result<()> {
    send_body(request, 200, content_type, body.as_bytes().to_vec(), false)
}

/// Respond with a JSON value.
pub fn respond_json(request: Request, status: u16, value: &Value) -> Result<()> {
    let body = serde_json::to_string(value)?;
    send_body(request, status, JSON, body.into_bytes(), false)
}

/// Respond with a bare status page (404s, revoked handles, pre-build wait).
pub fn respond_status_page(
    request: Request,
    status: u16,
    title: &str,
    message: &str,
) -> Result<()> {
    let body = STATUS_HTML.render(&StatusVars { title, message });
    send_body(request, status, HTML, body.into_bytes(), true)
}

/// Respond with 404 for unknown routes.
pub fn respond_not_found(request: Request) -> Result<()> {
    respond_status_page(request, 404, "Not Found", "nothing is served at this path")
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec(), false)
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    no_store: bool,
) -> Result<()> {
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    if no_store {
        response = response.with_header(make_header("Cache-Control", "no-store"));
    }
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
