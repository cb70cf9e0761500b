//! Development server: editor shell, JSON API, preview routes, live reload.
//!
//! ```text
//! browser editor --HTTP--> request loop --PreviewMsg--> actor system
//!       ^                                                    |
//!       +------------------- WebSocket <-----rebuilt---------+
//! ```
//!
//! The HTTP side is synchronous (tiny_http + a small rayon pool); the actor
//! system runs on its own tokio runtime thread. The two meet at the preview
//! message channel and the handle store.

mod api;
mod lifecycle;
mod response;

use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use anyhow::Result;
use crossbeam::channel;
use tiny_http::{Request, Server};

use crate::config::ProjectConfig;
use crate::embed::editor::{EDITOR_CSS, EDITOR_HTML, PLAYGROUND_JS, ShellVars};
use crate::preview::HandleStore;
use crate::workspace::{Session, SharedSession};
use crate::{debug, log};

/// Default WebSocket port for the reload channel.
pub const DEFAULT_WS_PORT: u16 = 35729;

/// Actual WebSocket port (may differ from DEFAULT_WS_PORT if the port was in
/// use). Updated by the coordinator after the WebSocket server binds.
static ACTUAL_WS_PORT: AtomicU16 = AtomicU16::new(DEFAULT_WS_PORT);

/// Update the actual WebSocket port (called by the coordinator after binding).
pub fn set_actual_ws_port(port: u16) {
    ACTUAL_WS_PORT.store(port, Ordering::Relaxed);
}

/// Get the actual WebSocket port.
fn get_actual_ws_port() -> u16 {
    ACTUAL_WS_PORT.load(Ordering::Relaxed)
}

/// Run the playground server until Ctrl+C.
pub fn serve_project(config: &ProjectConfig) -> Result<()> {
    let session = Session::load(config)?.into_shared();
    let store = Arc::new(HandleStore::new());

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    crate::core::register_server(Arc::clone(&server), shutdown_tx);

    let (actor_handle, preview_tx) = lifecycle::spawn_actors(
        Arc::clone(&session),
        Arc::clone(&store),
        DEFAULT_WS_PORT,
        shutdown_rx,
    );
    api::install_preview_sender(preview_tx);
    crate::core::set_serving();

    log!("serve"; "editor on http://{}", addr);
    log!("serve"; "{} playground '{}' - Ctrl+C to stop", config.project.kind, config.project.name);

    if config.serve.open {
        open_browser(&format!("http://{addr}"));
    }

    run_request_loop(&server, &session, &store);
    lifecycle::wait_for_shutdown(actor_handle);
    Ok(())
}

fn run_request_loop(server: &Server, session: &SharedSession, store: &Arc<HandleStore>) {
    // A small pool keeps slow handlers (sync over the network) from blocking
    // editor keystrokes
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let session = Arc::clone(session);
        let store = Arc::clone(store);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &session, &store) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, session: &SharedSession, store: &HandleStore) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = request.url().to_string();
    let path = strip_query(&url);
    debug!("serve"; "{} {}", request.method(), path);

    if path.starts_with("/api/") {
        return api::handle(request, path, session);
    }

    match path {
        "/" => {
            let shell = render_shell(session);
            response::respond_html(request, shell)
        }
        "/assets/playground.js" => {
            response::respond_asset(request, crate::utils::mime::types::JAVASCRIPT, PLAYGROUND_JS)
        }
        "/assets/editor.css" => {
            response::respond_asset(request, crate::utils::mime::types::CSS, EDITOR_CSS)
        }
        "/preview/current" => respond_preview_current(request, store),
        "/preview/plain.html" => respond_preview_plain(request, session),
        p if p.starts_with("/preview/") => respond_preview_handle(request, p, store),
        _ => response::respond_not_found(request),
    }
}

/// Drop the query string and fragment from a request URL.
fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

fn render_shell(session: &SharedSession) -> String {
    let session = session.read();
    EDITOR_HTML.render(&ShellVars {
        project_name: session.name(),
        kind_id: session.kind().id(),
        version: env!("CARGO_PKG_VERSION"),
        ws_port: get_actual_ws_port(),
    })
}

// =============================================================================
// Preview routes
// =============================================================================

/// `/preview/current`: redirect to the live handle.
///
/// The editor retargets its iframe from `rebuilt` messages, so the waiting
/// page only appears in the gap before the startup build lands.
fn respond_preview_current(request: Request, store: &HandleStore) -> Result<()> {
    match store.current() {
        Some(handle) => response::respond_redirect(request, &handle.url_path()),
        None => response::respond_status_page(
            request,
            200,
            "Preview",
            "waiting for the first build...",
        ),
    }
}

/// `/preview/{serial}-{fingerprint}.html`: serve a published document.
///
/// A stem that doesn't resolve was either never published or has been
/// released after being superseded; both get a 404.
fn respond_preview_handle(request: Request, path: &str, store: &HandleStore) -> Result<()> {
    match preview_stem(path).and_then(|stem| store.resolve(stem)) {
        Some(handle) => response::respond_preview_html(request, handle.html().to_string()),
        None => response::respond_status_page(
            request,
            404,
            "Preview gone",
            "this preview has been superseded; the editor always shows the newest one",
        ),
    }
}

/// `/preview/plain.html`: the current sources composed without the error
/// trap, for opening in a standalone tab.
fn respond_preview_plain(request: Request, session: &SharedSession) -> Result<()> {
    let snapshot = session.read().snapshot();
    let html = crate::preview::compose_plain(&snapshot);
    response::respond_preview_html(request, html)
}

/// Extract the handle stem from `/preview/{stem}.html`.
fn preview_stem(path: &str) -> Option<&str> {
    path.strip_prefix("/preview/")?.strip_suffix(".html")
}

/// Launch the platform's opener on the editor URL, best-effort.
fn open_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let program = "xdg-open";

    match std::process::Command::new(program).arg(url).spawn() {
        Ok(_) => debug!("serve"; "opened {} in browser", url),
        Err(e) => log!("serve"; "could not open browser: {}", e),
    }
}

// =============================================================================
// Tests
// =============================================================================
