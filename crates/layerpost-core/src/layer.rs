//! Layer model: an ordered run of instructions for one vertical slice.
//!
//! A [`Layer`] owns its parsed lines plus optional injected
//! preamble/postamble blocks, and exposes the per-layer queries and edits:
//! z-height, X/Y extents, axis shift/scale, and reconstruction back to text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult, ParseResult};
use crate::line::{ArgValue, Line};

/// Axis-aligned bounding box of the X/Y coordinates a layer touches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    /// Smallest X coordinate any line carries.
    pub min_x: f64,
    /// Smallest Y coordinate any line carries.
    pub min_y: f64,
    /// Largest X coordinate any line carries.
    pub max_x: f64,
    /// Largest Y coordinate any line carries.
    pub max_y: f64,
}

/// An ordered run of G-code lines belonging to one vertical slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    index: Option<usize>,
    lines: Vec<Line>,
    preamble: Vec<Line>,
    postamble: Vec<Line>,
}

/// Parse a block of raw lines, dropping blank and full-line-comment lines.
///
/// Lines whose first character is `;` carry no structured content and are
/// not round-tripped.
fn parse_lines<'a>(raw: impl IntoIterator<Item = &'a str>) -> ParseResult<Vec<Line>> {
    let mut lines = Vec::new();
    for raw_line in raw {
        let candidate = raw_line.trim_end_matches('\r');
        if candidate.trim().is_empty() || candidate.starts_with(';') {
            continue;
        }
        lines.push(Line::parse(candidate)?);
    }
    Ok(lines)
}

impl Layer {
    /// Parse a layer of G-code line by line.
    ///
    /// Every Layer gets its own freshly allocated line containers.
    pub fn parse<'a, I>(raw: I, index: Option<usize>) -> ParseResult<Layer>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Ok(Layer {
            index,
            lines: parse_lines(raw)?,
            preamble: Vec::new(),
            postamble: Vec::new(),
        })
    }

    /// The stored ordinal of this layer (0 = preamble), if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The layer's content lines, in source order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Injected preamble lines, empty unless [`Layer::set_preamble`] ran.
    pub fn preamble_lines(&self) -> &[Line] {
        &self.preamble
    }

    /// Injected postamble lines, empty unless [`Layer::set_postamble`] ran.
    pub fn postamble_lines(&self) -> &[Line] {
        &self.postamble
    }

    /// Number of content lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the layer has no content lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The first Z height found in this layer.
    ///
    /// It should be the only Z unless the layer has been edited, so the
    /// first is representative.
    pub fn z(&self) -> Option<ArgValue> {
        self.lines.iter().find_map(|line| line.arg('Z'))
    }

    /// Min/max over the lines that carry the given axis, keeping the source
    /// values' numeric spelling. Lines lacking the axis are excluded, not
    /// treated as zero.
    fn axis_extent(&self, axis: char) -> GeometryResult<(ArgValue, ArgValue)> {
        let mut values = self.lines.iter().filter_map(|line| line.arg(axis));
        let first = values.next().ok_or(GeometryError::EmptyExtent { axis })?;
        let (mut min, mut max) = (first, first);
        for value in values {
            if value.as_f64() < min.as_f64() {
                min = value;
            }
            if value.as_f64() > max.as_f64() {
                max = value;
            }
        }
        Ok((min, max))
    }

    /// The bounding box of the X/Y coordinates this layer touches.
    pub fn extents(&self) -> GeometryResult<Extents> {
        let (min_x, max_x) = self.axis_extent('X')?;
        let (min_y, max_y) = self.axis_extent('Y')?;
        Ok(Extents {
            min_x: min_x.as_f64(),
            min_y: min_y.as_f64(),
            max_x: max_x.as_f64(),
            max_y: max_y.as_f64(),
        })
    }

    /// The extents as two synthetic `G0` corner moves, `(lower, upper)`.
    pub fn extents_as_lines(&self) -> GeometryResult<(Line, Line)> {
        let (min_x, max_x) = self.axis_extent('X')?;
        let (min_y, max_y) = self.axis_extent('Y')?;
        let lower = Line::with_args("G0", vec![('X', min_x), ('Y', min_y)]);
        let upper = Line::with_args("G0", vec![('X', max_x), ('Y', max_y)]);
        Ok((lower, upper))
    }

    /// Shift this layer by the given per-axis deltas.
    ///
    /// Goes through every content line and adds the delta to each given
    /// axis argument where it exists, ignoring lines that lack it. Injected
    /// preamble/postamble lines are not touched. An empty mapping is a
    /// no-op.
    pub fn shift(&mut self, deltas: &[(char, ArgValue)]) {
        for line in &mut self.lines {
            for &(letter, delta) in deltas {
                line.offset_arg(letter, delta);
            }
        }
    }

    /// Same as [`Layer::shift`] but multiplying instead of adding.
    pub fn multiply(&mut self, factors: &[(char, ArgValue)]) {
        for line in &mut self.lines {
            for &(letter, factor) in factors {
                line.scale_arg(letter, factor);
            }
        }
    }

    /// Replace the injected preamble with lines parsed from `gcode`.
    pub fn set_preamble(&mut self, gcode: &str) -> ParseResult<()> {
        self.preamble = parse_lines(gcode.lines())?;
        Ok(())
    }

    /// Replace the injected postamble with lines parsed from `gcode`.
    pub fn set_postamble(&mut self, gcode: &str) -> ParseResult<()> {
        self.postamble = parse_lines(gcode.lines())?;
        Ok(())
    }

    /// All content lines whose code equals `code`, in source order.
    pub fn find(&self, code: &str) -> Vec<&Line> {
        self.lines.iter().filter(|line| line.code() == code).collect()
    }

    /// Reconstruct this layer as G-code text: injected preamble, content,
    /// injected postamble, newline-joined.
    pub fn construct(&self) -> String {
        self.preamble
            .iter()
            .chain(&self.lines)
            .chain(&self.postamble)
            .map(Line::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = match self.index {
            Some(index) => index.to_string(),
            None => "?".to_string(),
        };
        let z = match self.z() {
            Some(z) => z.to_string(),
            None => "?".to_string(),
        };
        write!(f, "<Layer {} at Z={}, {} lines>", index, z, self.lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(raw: &[&str]) -> Layer {
        Layer::parse(raw.iter().copied(), Some(1)).unwrap()
    }

    #[test]
    fn test_blank_and_comment_lines_dropped() {
        let layer = layer(&["; a full-line comment", "", "   ", "G1 X1 Y1"]);
        assert_eq!(layer.line_count(), 1);
    }

    #[test]
    fn test_z_is_first_z_found() {
        let layer = layer(&["G1 F300", "G1 Z0.4 F300", "G1 Z9.9"]);
        assert_eq!(layer.z(), Some(ArgValue::Float(0.4)));
    }

    #[test]
    fn test_extent_corner_lines_keep_spelling() {
        let layer = layer(&["G1 X5 Y2.5", "G1 X-3 Y7.0"]);
        let (lower, upper) = layer.extents_as_lines().unwrap();
        assert_eq!(lower.to_string(), "G0 X-3 Y2.5");
        assert_eq!(upper.to_string(), "G0 X5 Y7.0");
    }

    #[test]
    fn test_empty_extent_names_axis() {
        let layer = layer(&["G1 X5"]);
        assert_eq!(
            layer.extents().unwrap_err(),
            GeometryError::EmptyExtent { axis: 'Y' }
        );
    }

    #[test]
    fn test_display_summary() {
        let layer = layer(&["G1 Z0.6", "G1 X1 Y1"]);
        assert_eq!(layer.to_string(), "<Layer 1 at Z=0.6, 2 lines>");
    }
}
