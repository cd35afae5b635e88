//! LayerPost CLI - post-process sliced G-code from the command line.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use layerpost::{init_logging, ArgValue, Document};

/// Per-layer post-processing for sliced 3D-print G-code.
#[derive(Parser, Debug)]
#[command(name = "layerpost", version, about)]
struct Cli {
    /// Input G-code file produced by a slicer.
    input: PathBuf,

    /// Write the reconstructed program here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Add a delta to an axis argument on every line that carries it,
    /// e.g. `X=5` or `Y=-2.5`. May be given more than once.
    #[arg(long, value_name = "AXIS=DELTA", value_parser = parse_axis_value)]
    shift: Vec<(char, ArgValue)>,

    /// Multiply an axis argument on every line that carries it,
    /// e.g. `X=1.1`. May be given more than once.
    #[arg(long, value_name = "AXIS=FACTOR", value_parser = parse_axis_value)]
    scale: Vec<(char, ArgValue)>,

    /// First layer position the edits apply to; earlier layers and the
    /// preamble are left untouched.
    #[arg(long, default_value_t = 0)]
    from_layer: usize,

    /// Print a per-layer summary instead of emitting G-code.
    #[arg(long)]
    info: bool,
}

/// Parse an `AXIS=VALUE` pair; the value keeps its integer/float spelling,
/// so `--shift X=5` followed by `--shift X=-5` restores integer arguments
/// exactly.
fn parse_axis_value(raw: &str) -> Result<(char, ArgValue), String> {
    let (axis, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected AXIS=VALUE, got '{raw}'"))?;

    let mut letters = axis.chars();
    let letter = match (letters.next(), letters.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => letter,
        _ => return Err(format!("axis must be a single letter, got '{axis}'")),
    };

    let value = ArgValue::parse_token(value)
        .ok_or_else(|| format!("invalid numeric value '{value}'"))?;

    Ok((letter, value))
}

fn print_summary(document: &Document) {
    for layer in document.layers() {
        match layer.extents() {
            Ok(extents) => println!(
                "{} extents ({}, {}) .. ({}, {})",
                layer, extents.min_x, extents.min_y, extents.max_x, extents.max_y
            ),
            Err(_) => println!("{}", layer),
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let mut document = Document::parse(&source)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    info!(layers = document.layer_count(), input = %cli.input.display(), "parsed program");

    if cli.info {
        print_summary(&document);
        return Ok(());
    }

    if !cli.shift.is_empty() {
        document.shift(cli.from_layer, &cli.shift);
    }
    if !cli.scale.is_empty() {
        document.multiply(cli.from_layer, &cli.scale);
    }

    let output = document.construct();
    match &cli.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", output),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_axis_value() {
        assert_eq!(parse_axis_value("X=5"), Ok(('X', ArgValue::Int(5))));
        assert_eq!(
            parse_axis_value("Y=-2.5"),
            Ok(('Y', ArgValue::Float(-2.5)))
        );
        assert!(parse_axis_value("X").is_err());
        assert!(parse_axis_value("XY=5").is_err());
        assert!(parse_axis_value("X=abc").is_err());
    }
}
