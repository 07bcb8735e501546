//! Parser for `/proc/buddyinfo`.
//!
//! Each line describes one zone of one NUMA node:
//!
//! ```text
//! Node 0, zone      DMA      3      1      3      2      1      3      2      2      3      1      2
//! ```
//!
//! Everything up to the first comma is the node, then the literal `zone`, the
//! zone name and exactly [`COLUMN_COUNT`] free-block counts. Newer kernels may
//! print more orders; anything after the 11th count is ignored.

use super::columns::{BLOCK_SIZES, COLUMN_COUNT};
use tracing::info;

/// Error type for lines that do not look like a buddyinfo zone line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// One parsed zone line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    /// Node token as printed, e.g. "Node 0".
    pub node: String,
    /// Zone name, e.g. "DMA32".
    pub zone: String,
    /// Free block counts in [`BLOCK_SIZES`] order. `None` marks a column whose
    /// value did not fit into `u64`; it contributes nothing to any sum.
    pub counts: [Option<u64>; COLUMN_COUNT],
}

impl ParsedLine {
    /// Node and zone with whitespace removed, joined by `_` ("Node0_Normal").
    pub fn zone_key(&self) -> String {
        let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        format!("{}_{}", strip(&self.node), strip(&self.zone))
    }
}

/// Parses a single buddyinfo line.
///
/// A count that consists of digits but overflows `u64` does not reject the
/// line; that column is left as `None` and logged.
pub fn parse_line(line: &str) -> Result<ParsedLine, ParseError> {
    let line = line.trim();

    let (node, rest) = line
        .split_once(',')
        .ok_or_else(|| ParseError::new("missing ',' after node"))?;
    if node.is_empty() {
        return Err(ParseError::new("missing node"));
    }

    let mut fields = rest.split_ascii_whitespace();
    if fields.next() != Some("zone") {
        return Err(ParseError::new("missing 'zone' keyword"));
    }
    let zone = fields
        .next()
        .ok_or_else(|| ParseError::new("missing zone name"))?;

    let mut counts = [None; COLUMN_COUNT];
    for (idx, column) in BLOCK_SIZES.iter().enumerate() {
        let token = fields.next().ok_or_else(|| {
            ParseError::new(format!(
                "not enough columns: expected {}, got {}",
                COLUMN_COUNT, idx
            ))
        })?;

        // Trailing garbage glued to the last count is ignored like extra columns.
        let digits = if idx + 1 == COLUMN_COUNT {
            leading_digits(token)
        } else {
            token
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::new(format!(
                "invalid {} column: {:?}",
                column.label, token
            )));
        }

        counts[idx] = match digits.parse::<u64>() {
            Ok(value) => Some(value),
            Err(e) => {
                info!(column = column.label, value = digits, error = %e, "failed to parse page count");
                None
            }
        };
    }

    Ok(ParsedLine {
        node: node.to_string(),
        zone: zone.to_string(),
        counts,
    })
}

/// Parses the whole file, skipping lines that are not zone lines.
pub fn parse_buddyinfo(content: &str) -> Vec<ParsedLine> {
    let mut lines = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(parsed) => lines.push(parsed),
            Err(e) => info!(line = line.trim(), error = %e, "skipping buddyinfo line"),
        }
    }

    lines
}

fn leading_digits(token: &str) -> &str {
    let end = token
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(token.len());
    &token[..end]
}
