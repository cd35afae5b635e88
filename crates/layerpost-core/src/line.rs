//! Line-level G-code codec.
//!
//! A [`Line`] is one instruction: a command code, its letter-keyed numeric
//! arguments, an optional unlabeled token, and an optional trailing comment.
//! Parsing records the integer/float spelling of every argument so that a
//! reconstructed program keeps the slicer's numeric style.

use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// A single argument value, integer or float per its source spelling.
///
/// A token is a float if and only if it contains a decimal point.
/// Arithmetic follows numeric promotion: combining two `Int`s stays `Int`,
/// anything involving a `Float` yields a `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// Spelled without a decimal point (e.g. `X10`).
    Int(i64),
    /// Spelled with a decimal point (e.g. `Z0.2`).
    Float(f64),
}

impl ArgValue {
    /// Parse the numeric part of an argument token.
    ///
    /// Returns `None` when the text is not a valid number under the codec
    /// rule (decimal point makes it a float, otherwise it must be an
    /// integer).
    pub fn parse_token(text: &str) -> Option<Self> {
        if text.contains('.') {
            text.parse::<f64>().ok().map(ArgValue::Float)
        } else {
            text.parse::<i64>().ok().map(ArgValue::Int)
        }
    }

    /// Numeric value as `f64`, regardless of spelling.
    pub fn as_f64(self) -> f64 {
        match self {
            ArgValue::Int(v) => v as f64,
            ArgValue::Float(v) => v,
        }
    }

    /// Whether this value was spelled as an integer.
    pub fn is_int(self) -> bool {
        matches!(self, ArgValue::Int(_))
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl Add for ArgValue {
    type Output = ArgValue;

    fn add(self, rhs: ArgValue) -> ArgValue {
        match (self, rhs) {
            (ArgValue::Int(a), ArgValue::Int(b)) => ArgValue::Int(a + b),
            (a, b) => ArgValue::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Mul for ArgValue {
    type Output = ArgValue;

    fn mul(self, rhs: ArgValue) -> ArgValue {
        match (self, rhs) {
            (ArgValue::Int(a), ArgValue::Int(b)) => ArgValue::Int(a * b),
            (a, b) => ArgValue::Float(a.as_f64() * b.as_f64()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(v) => write!(f, "{}", v),
            // A whole-valued float still renders with a decimal point so the
            // spelling survives a format/parse cycle.
            ArgValue::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.1}", v),
            ArgValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// One G-code instruction.
///
/// Built by [`Line::parse`]; rendered back to text by its `Display`
/// implementation. Rendering normalizes token separation to single spaces
/// and does not reproduce the original raw spacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    raw: String,
    code: String,
    args: Vec<(char, ArgValue)>,
    unlabeled: Option<String>,
    comment: Option<String>,
}

impl Line {
    /// Parse a single line of G-code into its code and named arguments.
    ///
    /// The text is split at the first `;` to separate the comment from the
    /// content. The first whitespace-delimited content token is the command
    /// code. For `M117` the rest of the content is kept verbatim as the
    /// unlabeled payload; for every other code, letter-prefixed tokens
    /// become letter arguments and a bare token lands in the unlabeled slot.
    pub fn parse(text: &str) -> ParseResult<Line> {
        let raw = text.to_string();

        let (content, comment) = match text.split_once(';') {
            Some((content, comment)) => (content, Some(comment.to_string())),
            None => (text, None),
        };

        let mut tokens = content.split_whitespace();
        let code = tokens
            .next()
            .ok_or_else(|| ParseError::MissingCode { line: raw.clone() })?
            .to_string();

        let mut line = Line {
            raw,
            code,
            args: Vec::new(),
            unlabeled: None,
            comment,
        };

        if line.code == "M117" {
            // The payload is a human-readable display message, not key/value
            // pairs; keep its internal spacing.
            let rest = content.trim_start();
            let rest = rest[line.code.len()..].trim_start();
            if !rest.is_empty() {
                line.unlabeled = Some(rest.to_string());
            }
            return Ok(line);
        }

        for token in tokens {
            let Some(first) = token.chars().next() else {
                continue;
            };
            if first.is_ascii_alphabetic() {
                let value = ArgValue::parse_token(&token[1..]).ok_or_else(|| {
                    ParseError::MalformedArgument {
                        token: token.to_string(),
                        line: line.raw.clone(),
                    }
                })?;
                line.insert_arg(first, value);
            } else {
                // Only one bare token is expected per line; a second one
                // overwrites the first (accepted ambiguity, not an error).
                line.unlabeled = Some(token.to_string());
            }
        }

        Ok(line)
    }

    /// Build a synthetic line from a code and letter arguments.
    pub fn with_args(code: impl Into<String>, args: Vec<(char, ArgValue)>) -> Line {
        let mut line = Line {
            raw: String::new(),
            code: code.into(),
            args,
            unlabeled: None,
            comment: None,
        };
        line.raw = line.to_string();
        line
    }

    /// The original source text of this line (diagnostics only).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The command code, e.g. `G1` or `M117`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The comment following the first `;`, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The unlabeled token (or `M117` payload), if any.
    pub fn unlabeled(&self) -> Option<&str> {
        self.unlabeled.as_deref()
    }

    /// The letter arguments in insertion order.
    pub fn args(&self) -> impl Iterator<Item = (char, ArgValue)> + '_ {
        self.args.iter().copied()
    }

    /// The value of a letter argument, if present.
    pub fn arg(&self, letter: char) -> Option<ArgValue> {
        self.args
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|(_, v)| *v)
    }

    /// Whether this line carries the given letter argument.
    pub fn has_arg(&self, letter: char) -> bool {
        self.args.iter().any(|(l, _)| *l == letter)
    }

    /// Insert or update a letter argument.
    ///
    /// A duplicated letter keeps its first position in iteration order but
    /// takes the new value.
    pub fn insert_arg(&mut self, letter: char, value: ArgValue) {
        match self.args.iter_mut().find(|(l, _)| *l == letter) {
            Some(slot) => slot.1 = value,
            None => self.args.push((letter, value)),
        }
    }

    /// Add `delta` to the given letter argument, if this line has it.
    ///
    /// Lines lacking the argument are left untouched; the edit never
    /// introduces a new argument.
    pub fn offset_arg(&mut self, letter: char, delta: ArgValue) {
        if let Some(slot) = self.args.iter_mut().find(|(l, _)| *l == letter) {
            slot.1 = slot.1 + delta;
        }
    }

    /// Multiply the given letter argument by `factor`, if this line has it.
    pub fn scale_arg(&mut self, letter: char, factor: ArgValue) {
        if let Some(slot) = self.args.iter_mut().find(|(l, _)| *l == letter) {
            slot.1 = slot.1 * factor;
        }
    }
}

// The raw source text is diagnostic only; equality is over the parsed
// content, so a reconstructed line compares equal to its source line.
impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.args == other.args
            && self.unlabeled == other.unlabeled
            && self.comment == other.comment
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        for (letter, value) in &self.args {
            write!(f, " {}{}", letter, value)?;
        }
        if let Some(unlabeled) = &self.unlabeled {
            write!(f, " {}", unlabeled)?;
        }
        match &self.comment {
            Some(comment) if !comment.is_empty() => write!(f, " ;{}", comment),
            _ => Ok(()),
        }
    }
}
