//! Utility modules shared across the playground.

pub mod date;
pub mod hash;
pub mod html;
pub mod mime;
pub mod path;
pub mod plural;
