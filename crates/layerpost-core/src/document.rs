//! Whole-program model: an optional preamble plus ordered layers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseResult;
use crate::layer::Layer;
use crate::line::ArgValue;
use crate::segment::{self, SegmentMode};

/// A parsed G-code program.
///
/// Built once from input text by [`Document::parse`], then edited in place;
/// [`Document::construct`] reconstructs the program text. Ownership is a
/// strict tree: the document owns its layers, each layer owns its lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    preamble: Option<Layer>,
    layers: Vec<Layer>,
}

impl Document {
    /// Parse a program's worth of G-code passed as a string.
    ///
    /// Any parse error aborts the whole parse; no partial document is
    /// returned.
    pub fn parse(text: &str) -> ParseResult<Document> {
        let segments = segment::segment(text);

        let preamble = match segments.preamble {
            Some(group) => Some(Layer::parse(group, Some(0))?),
            None => None,
        };

        // Marker-mode layers store their 0-based split position; inferred
        // layers count up from 1 after the preamble.
        let first_index = match segments.mode {
            SegmentMode::Markers => 0,
            SegmentMode::VerticalMotion => 1,
        };

        let mut layers = Vec::with_capacity(segments.layers.len());
        for (offset, group) in segments.layers.into_iter().enumerate() {
            layers.push(Layer::parse(group, Some(first_index + offset))?);
        }

        Ok(Document { preamble, layers })
    }

    /// The preamble layer, when the input distinguished one.
    pub fn preamble(&self) -> Option<&Layer> {
        self.preamble.as_ref()
    }

    /// The print layers, in source order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The layer at the given position in the stored sequence.
    pub fn layer(&self, position: usize) -> Option<&Layer> {
        self.layers.get(position)
    }

    /// Mutable access to the layer at the given position.
    pub fn layer_mut(&mut self, position: usize) -> Option<&mut Layer> {
        self.layers.get_mut(position)
    }

    /// Number of print layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Whether the document has no print layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Shift the layer at `from_layer_index` and all following by the given
    /// per-axis deltas. The preamble is never shifted by this call.
    ///
    /// Example: `shift(17, &[('X', ArgValue::Int(-5))])` moves layer 17 and
    /// everything above it 5 to the left.
    pub fn shift(&mut self, from_layer_index: usize, deltas: &[(char, ArgValue)]) {
        for layer in self.layers.iter_mut().skip(from_layer_index) {
            layer.shift(deltas);
        }
    }

    /// Same as [`Document::shift`] but multiplying by per-axis factors.
    pub fn multiply(&mut self, from_layer_index: usize, factors: &[(char, ArgValue)]) {
        for layer in self.layers.iter_mut().skip(from_layer_index) {
            layer.multiply(factors);
        }
    }

    /// Reconstruct the whole program, always in marker form.
    ///
    /// Layers are renumbered by their position in the stored sequence,
    /// regardless of their stored index, so input parsed in vertical-motion
    /// mode round-trips into marker-mode output.
    pub fn construct(&self) -> String {
        let mut out = String::new();
        if let Some(preamble) = &self.preamble {
            out.push_str(&preamble.construct());
            out.push('\n');
        }
        for (position, layer) in self.layers.iter().enumerate() {
            out.push_str(&format!(";LAYER:{}\n", position));
            out.push_str(&layer.construct());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Gcode document with {} layers>", self.layers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_summary() {
        let document = Document::parse(";LAYER:0\nG1 X1\n;LAYER:1\nG1 X2\n").unwrap();
        assert_eq!(document.to_string(), "<Gcode document with 2 layers>");
    }

    #[test]
    fn test_marker_layers_store_split_position() {
        let document = Document::parse("G21\n;LAYER:0\nG1 X1\n;LAYER:1\nG1 X2\n").unwrap();
        assert_eq!(document.preamble().and_then(Layer::index), Some(0));
        let indices: Vec<_> = document.layers().iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_inferred_layers_count_from_one() {
        let document = Document::parse("G21\nG1 Z0.2\nG1 X1 Y1\nG1 Z0.4\nG1 X2 Y2\n").unwrap();
        let indices: Vec<_> = document.layers().iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![Some(1), Some(2)]);
    }
}
