//! Per-zone summary statistics.

use super::columns::{BLOCK_SIZES, COLUMN_COUNT, SizeCategory};
use super::parser::ParsedLine;
use std::collections::BTreeMap;

/// Statistics derived from one zone line.
///
/// A zone without any free block yields NaN for the average and every
/// percentage. These are plain IEEE-754 results and are kept as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneAggregate {
    pub zone_key: String,
    /// Raw counts in column order; `None` for columns that failed to parse.
    pub counts: [Option<u64>; COLUMN_COUNT],
    /// Weighted average free block size in bytes.
    pub average_size: f64,
    /// Share of free blocks per size category, in percent. Categories without
    /// any parsed column are absent.
    pub category_pct: BTreeMap<SizeCategory, f64>,
}

impl ZoneAggregate {
    pub fn from_line(line: &ParsedLine) -> Self {
        Self::new(line.zone_key(), line.counts)
    }

    pub fn new(zone_key: String, counts: [Option<u64>; COLUMN_COUNT]) -> Self {
        let mut total_bytes: u128 = 0;
        let mut total_pages: u128 = 0;
        let mut per_category: BTreeMap<SizeCategory, u128> = BTreeMap::new();

        for (column, count) in BLOCK_SIZES.iter().zip(counts.iter()) {
            let Some(count) = *count else {
                continue;
            };
            let count = u128::from(count);
            total_bytes += u128::from(column.bytes) * count;
            total_pages += count;
            *per_category.entry(column.category).or_insert(0) += count;
        }

        let average_size = total_bytes as f64 / total_pages as f64;
        let category_pct = per_category
            .into_iter()
            .map(|(category, pages)| (category, pages as f64 / total_pages as f64 * 100.0))
            .collect();

        Self {
            zone_key,
            counts,
            average_size,
            category_pct,
        }
    }
}
