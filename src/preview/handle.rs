//! Revocable handles to published preview documents.
//!
//! Every rebuild publishes the composed document under a fresh handle instead
//! of mutating the one the browser is reading. The previous handle stays
//! resolvable until the actor releases it after the grace period, so an
//! iframe mid-navigation never hits a dead URL. A released handle is gone:
//! resolving it returns nothing and the serve layer answers 404.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;
use dashmap::DashMap;

/// One published preview document.
///
/// Identified by a monotonically increasing serial plus a content
/// fingerprint; the fingerprint makes handle URLs self-cache-busting.
#[derive(Debug)]
pub struct RenderHandle {
    serial: u64,
    fingerprint: String,
    html: String,
}

impl RenderHandle {
    pub const fn serial(&self) -> u64 {
        self.serial
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Path the display surface loads this document from.
    pub fn url_path(&self) -> String {
        format!("/preview/{}-{}.html", self.serial, self.fingerprint)
    }

    /// The `{serial}-{fingerprint}` stem of the URL path.
    pub fn stem(&self) -> String {
        format!("{}-{}", self.serial, self.fingerprint)
    }
}

/// Short hex fingerprint of the document content.
fn fingerprint(html: &str) -> String {
    hex::encode(&blake3::hash(html.as_bytes()).as_bytes()[..6])
}

/// Store of live handles plus the pointer to the currently assigned one.
///
/// The preview actor is the only writer; HTTP threads resolve handles
/// concurrently through the dashmap.
pub struct HandleStore {
    handles: DashMap<u64, Arc<RenderHandle>>,
    current: ArcSwapOption<RenderHandle>,
    next_serial: AtomicU64,
}

impl HandleStore {
    pub fn new() -> Self {
        Self {
            handles: DashMap::new(),
            current: ArcSwapOption::const_empty(),
            next_serial: AtomicU64::new(0),
        }
    }

    /// Publish a composed document under a fresh handle.
    ///
    /// The handle is resolvable immediately but not yet current; the display
    /// surface makes it current via [`assign`](Self::assign).
    pub fn publish(&self, html: String) -> Arc<RenderHandle> {
        let serial = self.next_serial.fetch_add(1, Ordering::Relaxed) + 1;
        let handle = Arc::new(RenderHandle {
            serial,
            fingerprint: fingerprint(&html),
            html,
        });
        self.handles.insert(serial, handle.clone());
        handle
    }

    /// Swap the current pointer to `handle`, returning the superseded handle.
    pub fn assign(&self, handle: &Arc<RenderHandle>) -> Option<Arc<RenderHandle>> {
        self.current.swap(Some(handle.clone()))
    }

    /// The currently assigned handle, if any rebuild has run yet.
    pub fn current(&self) -> Option<Arc<RenderHandle>> {
        self.current.load_full()
    }

    /// Resolve a URL stem (`{serial}-{fingerprint}`) to a live handle.
    pub fn resolve(&self, stem: &str) -> Option<Arc<RenderHandle>> {
        let (serial, fp) = stem.split_once('-')?;
        let serial: u64 = serial.parse().ok()?;
        let handle = self.handles.get(&serial)?.clone();
        (handle.fingerprint == fp).then_some(handle)
    }

    /// Release a superseded handle, making it unresolvable.
    ///
    /// The current handle is never released; a rebuild that lands exactly at
    /// grace-period expiry must not revoke the document on screen.
    pub fn release(&self, handle: &RenderHandle) -> bool {
        if self.current().is_some_and(|c| c.serial == handle.serial) {
            return false;
        }
        self.handles.remove(&handle.serial).is_some()
    }

    /// Number of handles still resolvable.
    pub fn live_count(&self) -> usize {
        self.handles.len()
    }
}

impl Default for HandleStore {
    fn default() -> Self {
        Self::new()
    }
}
