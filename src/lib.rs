//! # LayerPost
//!
//! Per-layer post-processing for sliced 3D-print G-code:
//! - Parse a slicer's output into an editable document model
//! - Segment programs into layers via `;LAYER:<n>` markers or detected
//!   vertical motion
//! - Nudge (`shift`) or scale (`multiply`) axis arguments per layer
//! - Reconstruct an equivalent program, always in marker form
//!
//! ## Architecture
//!
//! LayerPost is organized as a workspace:
//!
//! 1. **layerpost-core** - line codec, layer segmentation, document model
//! 2. **layerpost** - the CLI binary that drives the core with file I/O
//!
//! The core performs no I/O; this crate's binary is the collaborator that
//! reads a file, applies edits, and writes the reconstructed program.

pub use layerpost_core::{
    ArgValue, Document, Error, Extents, GeometryError, GeometryResult, Layer, Line, ParseError,
    ParseResult, SegmentMode,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output to stderr, keeping stdout free for emitted G-code
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
