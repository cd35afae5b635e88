//! Layer segmentation: split a whole program into per-layer line groups.
//!
//! Two mutually exclusive strategies, chosen by probing the input:
//!
//! - **Marker mode**: some slicers (Cura) emit a `;LAYER:<n>` comment just
//!   before each layer. The text is split at every such line; the marker
//!   lines themselves are discarded.
//! - **Vertical-motion mode**: without markers (Slic3r-style output), a
//!   layer starts at each `G0`/`G1` command that carries a Z coordinate.
//!
//! The segmenter only groups raw text lines; per-line parsing happens in
//! [`Layer`](crate::layer::Layer) construction.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Segmentation strategy chosen by probing the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    /// Explicit `;LAYER:<n>` marker lines.
    Markers,
    /// Layer starts inferred from `G0`/`G1` moves with a Z coordinate.
    VerticalMotion,
}

/// Raw line groups for one program, before per-line parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments<'a> {
    /// The strategy that produced these groups.
    pub mode: SegmentMode,
    /// Everything before the first layer boundary, when one was found.
    pub preamble: Option<Vec<&'a str>>,
    /// One group of raw lines per layer, in source order.
    pub layers: Vec<Vec<&'a str>>,
}

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^;LAYER:\d+$").expect("invalid regex pattern"))
}

fn layer_start_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // G0 or G1, whitespace, then a Z token anywhere: optional sign,
    // optional leading dot, digits.
    PATTERN.get_or_init(|| Regex::new(r"^G[01]\s.*Z-?\.?\d+").expect("invalid regex pattern"))
}

/// Split a program into an optional preamble group plus per-layer groups.
///
/// Tolerates both `\n` and `\r\n` line terminators.
pub fn segment(text: &str) -> Segments<'_> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    let segments = if lines.iter().any(|line| marker_pattern().is_match(line)) {
        split_at_markers(&lines)
    } else {
        scan_vertical_motion(&lines)
    };

    debug!(
        mode = ?segments.mode,
        layers = segments.layers.len(),
        "segmented program"
    );
    segments
}

/// Marker mode: every `;LAYER:<n>` line closes the current group and opens
/// the next. The text before the first marker is the preamble.
fn split_at_markers<'a>(lines: &[&'a str]) -> Segments<'a> {
    let mut groups: Vec<Vec<&'a str>> = vec![Vec::new()];
    for &line in lines {
        if marker_pattern().is_match(line) {
            groups.push(Vec::new());
        } else if let Some(open) = groups.last_mut() {
            open.push(line);
        }
    }

    let mut groups = groups.into_iter();
    Segments {
        mode: SegmentMode::Markers,
        preamble: groups.next(),
        layers: groups.collect(),
    }
}

/// Vertical-motion mode: the first layer-start line closes the preamble and
/// begins layer 1 with itself as its first content line; each subsequent
/// layer-start closes the current layer and opens the next. Without any
/// layer-start line the entire input becomes a single layer with no
/// preamble distinguished.
fn scan_vertical_motion<'a>(lines: &[&'a str]) -> Segments<'a> {
    let mut preamble: Option<Vec<&'a str>> = None;
    let mut layers: Vec<Vec<&'a str>> = Vec::new();
    let mut open: Vec<&'a str> = Vec::new();

    for &line in lines {
        if layer_start_pattern().is_match(line) {
            match preamble {
                None => preamble = Some(std::mem::take(&mut open)),
                Some(_) => layers.push(std::mem::take(&mut open)),
            }
        }
        open.push(line);
    }
    layers.push(open);

    Segments {
        mode: SegmentMode::VerticalMotion,
        preamble,
        layers,
    }
}
