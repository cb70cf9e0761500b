//! JSON API backing the editor shell.
//!
//! | Route                    | Purpose                                  |
//! |--------------------------|------------------------------------------|
//! | `GET  /api/project`      | Project metadata + all slot buffers      |
//! | `PUT  /api/buffers/{id}` | Replace a slot's text (debounced rebuild)|
//! | `POST /api/run`          | Rebuild immediately                      |
//! | `POST /api/format`       | Reformat a slot buffer in place          |
//! | `POST /api/expand`       | Snippet expansion at a cursor            |
//! | `POST /api/sync/push`    | Push slot files to the linked repository |
//! | `POST /api/sync/pull`    | Pull slot files from the repository      |
//!
//! Handlers run on HTTP worker threads. Buffer access takes short session
//! locks; sync network calls run outside any lock.

use std::io::Read;
use std::sync::OnceLock;

use anyhow::Result;
use serde::Deserialize;
use serde_json::{Value, json};
use tiny_http::{Method, Request};
use tokio::sync::mpsc;

use super::response;
use crate::actor::PreviewMsg;
use crate::lang;
use crate::sync::{self, Connection, SyncError};
use crate::workspace::{SharedSession, Slot};

// =============================================================================
// Preview pipeline hookup
// =============================================================================

/// Sender into the preview actor, installed before the request loop starts.
static PREVIEW_TX: OnceLock<mpsc::Sender<PreviewMsg>> = OnceLock::new();

pub fn install_preview_sender(tx: mpsc::Sender<PreviewMsg>) {
    let _ = PREVIEW_TX.set(tx);
}

/// Forward a message to the preview actor, dropping it if the channel is gone.
///
/// Called from rayon workers, never from the tokio runtime, so the blocking
/// send is safe.
fn notify_preview(msg: PreviewMsg) {
    if let Some(tx) = PREVIEW_TX.get()
        && tx.blocking_send(msg).is_err()
    {
        crate::debug!("api"; "preview actor gone, message dropped");
    }
}

// =============================================================================
// Error type
// =============================================================================

/// An API failure with the HTTP status it maps to.
#[derive(Debug)]
struct ApiError {
    status: u16,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: 404,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self {
            status: 500,
            message: format!("{e:#}"),
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(e: SyncError) -> Self {
        let status = match &e {
            SyncError::NotConnected => 400,
            SyncError::AuthRejected(_) => 401,
            SyncError::NotFound(_) => 404,
            // Upstream trouble: surface as bad gateway so the editor can tell
            // a forge problem from a local one
            _ => 502,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Handle one `/api/*` request end to end.
pub fn handle(mut request: Request, path: &str, session: &SharedSession) -> Result<()> {
    match route(&mut request, path, session) {
        Ok(value) => response::respond_json(request, 200, &value),
        Err(e) => {
            // Sync runs against the network; mirror its failures on the
            // server console, not just in the editor
            if path.starts_with("/api/sync/") {
                crate::logger::status_error("sync failed", &e.message);
            }
            response::respond_json(request, e.status, &json!({ "error": e.message }))
        }
    }
}

fn route(request: &mut Request, path: &str, session: &SharedSession) -> Result<Value, ApiError> {
    let method = request.method().clone();
    match (method, path) {
        (Method::Get, "/api/project") => Ok(project_payload(session)),
        (Method::Put, p) if p.starts_with("/api/buffers/") => {
            let slot = parse_slot(&p["/api/buffers/".len()..])?;
            let body: BufferBody = read_json(request)?;
            put_buffer(session, slot, body.text)
        }
        (Method::Post, "/api/run") => {
            notify_preview(PreviewMsg::RunNow);
            Ok(json!({ "ok": true }))
        }
        (Method::Post, "/api/format") => {
            let body: SlotBody = read_json(request)?;
            format_buffer(session, parse_slot(&body.slot)?)
        }
        (Method::Post, "/api/expand") => {
            let body: ExpandBody = read_json(request)?;
            Ok(expand_snippet(parse_slot(&body.slot)?, &body.text, body.cursor))
        }
        (Method::Post, "/api/sync/push") => sync_push(session),
        (Method::Post, "/api/sync/pull") => sync_pull(session),
        _ => Err(ApiError::not_found("no such endpoint")),
    }
}

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Deserialize)]
struct BufferBody {
    text: String,
}

#[derive(Deserialize)]
struct SlotBody {
    slot: String,
}

#[derive(Deserialize)]
struct ExpandBody {
    slot: String,
    text: String,
    /// Byte offset into `text`.
    cursor: usize,
}

fn read_json<T: serde::de::DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("unreadable body: {e}")))?;
    serde_json::from_str(&body).map_err(|e| ApiError::bad_request(format!("invalid body: {e}")))
}

fn parse_slot(id: &str) -> Result<Slot, ApiError> {
    Slot::from_id(id).ok_or_else(|| ApiError::bad_request(format!("unknown slot '{id}'")))
}

// =============================================================================
// Handlers
// =============================================================================

fn project_payload(session: &SharedSession) -> Value {
    let session = session.read();
    let slots: Vec<Value> = session
        .kind()
        .slots()
        .iter()
        .map(|&slot| {
            json!({
                "id": slot.id(),
                "label": slot.label(),
                "file": slot.file_name(),
                "language": slot.language().id(),
                "text": session.text(slot),
                "revision": session.buffer(slot).map_or(0, |b| b.revision()),
            })
        })
        .collect();

    json!({
        "name": session.name(),
        "kind": session.kind().id(),
        "description": session.description(),
        "version": env!("CARGO_PKG_VERSION"),
        "connected": Connection::path(session.root()).exists(),
        "feedback_ms": crate::config::cfg().preview.feedback_ms,
        "slots": slots,
    })
}

/// Replace a slot's text, writing through to disk on a real change.
fn put_buffer(session: &SharedSession, slot: Slot, text: String) -> Result<Value, ApiError> {
    let (changed, revision) = {
        let mut session = session.write();
        if !session.has_slot(slot) {
            return Err(ApiError::not_found(format!(
                "slot '{slot}' does not exist in this project"
            )));
        }
        let changed = session.set_text(slot, text);
        if changed {
            session.save_slot(slot).map_err(ApiError::from)?;
        }
        (changed, session.buffer(slot).map_or(0, |b| b.revision()))
    };

    if changed {
        notify_preview(PreviewMsg::Edited { slot });
    }
    Ok(json!({ "revision": revision }))
}

/// Reformat a slot buffer and return the new text.
fn format_buffer(session: &SharedSession, slot: Slot) -> Result<Value, ApiError> {
    let (changed, text) = {
        let mut session = session.write();
        if !session.has_slot(slot) {
            return Err(ApiError::not_found(format!(
                "slot '{slot}' does not exist in this project"
            )));
        }
        let formatted = lang::format(session.text(slot), slot.language());
        let changed = session.set_text(slot, formatted);
        if changed {
            session.save_slot(slot).map_err(ApiError::from)?;
        }
        (changed, session.text(slot).to_string())
    };

    if changed {
        notify_preview(PreviewMsg::Edited { slot });
    }
    Ok(json!({ "slot": slot.id(), "text": text }))
}

/// Try a snippet expansion at the cursor.
///
/// Works on the posted text rather than the stored buffer: the editor may
/// hold keystrokes it hasn't pushed yet, and the cursor refers to its copy.
fn expand_snippet(slot: Slot, text: &str, cursor: usize) -> Value {
    match lang::expand(text, cursor, slot.language()) {
        Some(hit) => json!({ "expanded": true, "text": hit.text, "cursor": hit.cursor }),
        None => json!({ "expanded": false }),
    }
}

fn sync_push(session: &SharedSession) -> Result<Value, ApiError> {
    let (snapshot, root) = {
        let session = session.read();
        (session.snapshot(), session.root().to_path_buf())
    };
    // Network I/O happens outside the session lock
    let connection = Connection::load(&root)?;
    let pushed = sync::push(&snapshot, &connection)?;
    Ok(json!({ "pushed": pushed }))
}

fn sync_pull(session: &SharedSession) -> Result<Value, ApiError> {
    let (kind, root) = {
        let session = session.read();
        (session.kind(), session.root().to_path_buf())
    };
    let connection = Connection::load(&root)?;
    let fetched = sync::fetch(kind, &connection)?;

    let changed = sync::apply(&mut session.write(), fetched).map_err(ApiError::from)?;
    if !changed.is_empty() {
        // Editors reload their panels and the preview rebuilds
        notify_preview(PreviewMsg::Synced);
    }
    Ok(json!({ "pulled": changed.len() }))
}

// =============================================================================
// Tests
// =============================================================================
