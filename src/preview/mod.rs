//! Preview pipeline: compose, publish, assign, release.
//!
//! | Module    | Purpose                                      |
//! |-----------|----------------------------------------------|
//! | `compose` | Build the preview HTML from a snapshot       |
//! | `handle`  | Revocable published documents + their store  |
//! | `surface` | Assignment seam to the visible preview       |
//!
//! The actor layer drives this module: snapshot the session, `compose`,
//! `publish`, `assign`, then `release` the superseded handle after the
//! configured grace period.

pub mod compose;
pub mod handle;
pub mod surface;

pub use compose::{compose, compose_plain};
pub use handle::{HandleStore, RenderHandle};
pub use surface::{DisplaySurface, RebuildReason};
