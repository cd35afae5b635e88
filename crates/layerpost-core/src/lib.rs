//! # LayerPost Core
//!
//! Parsing, layer segmentation, and per-layer editing of sliced 3D-print
//! G-code. The crate turns a slicer's output into an editable in-memory
//! model and reconstructs an equivalent program from it.
//!
//! ## Core Components
//!
//! ### Line Codec
//! - **Line**: one instruction — command code, insertion-ordered letter
//!   arguments, optional unlabeled token, optional comment
//! - **ArgValue**: argument values that keep their integer/float spelling
//!
//! ### Segmentation
//! - Splits a program into layers at explicit `;LAYER:<n>` markers, or by
//!   detecting `G0`/`G1` moves with a Z coordinate when no markers exist
//!
//! ### Layer Model
//! - **Layer**: z-height and X/Y extent queries, per-axis shift/scale
//!   edits, injected preamble/postamble blocks
//!
//! ### Document Model
//! - **Document**: the whole program; edits from a given layer upward and
//!   reconstruction, always in marker form
//!
//! ## Usage
//!
//! ```
//! use layerpost_core::{ArgValue, Document};
//!
//! let mut document = Document::parse("M104 S200\nG1 Z0.2 F300\nG1 X10 Y10 E1\n").unwrap();
//! document.shift(0, &[('X', ArgValue::Int(5))]);
//! assert!(document.construct().contains("G1 X15 Y10 E1"));
//! ```
//!
//! The core performs no I/O: callers supply one string and receive one
//! string back.

pub mod document;
pub mod error;
pub mod layer;
pub mod line;
pub mod segment;

pub use document::Document;
pub use error::{Error, GeometryError, GeometryResult, ParseError, ParseResult};
pub use layer::{Extents, Layer};
pub use line::{ArgValue, Line};
pub use segment::{segment, SegmentMode, Segments};
