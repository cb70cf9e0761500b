//! Configuration section definitions.

mod preview;
mod project;
mod serve;

pub use preview::PreviewConfig;
pub use project::ProjectSection;
pub use serve::ServeConfig;
