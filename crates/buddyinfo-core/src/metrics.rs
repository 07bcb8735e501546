//! Flat metric namespace.
//!
//! Keys produced per zone:
//!
//! ```text
//! available_pages.<zone_key>.<column>              u64
//! average_size.<zone_key>                          f64
//! available_pages_summary_pct.<zone_key>.<category> f64
//! ```

use crate::collector::buddyinfo::{BLOCK_SIZES, SizeCategory, ZoneAggregate};
use serde::Serialize;
use std::collections::BTreeMap;

pub const AVAILABLE_PAGES: &str = "available_pages";
pub const AVERAGE_SIZE: &str = "average_size";
pub const AVAILABLE_PAGES_SUMMARY_PCT: &str = "available_pages_summary_pct";

/// A single metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Uint(u64),
    Float(f64),
}

impl MetricValue {
    /// Integers are always finite; floats are NaN for zones without free blocks.
    pub fn is_finite(self) -> bool {
        match self {
            MetricValue::Uint(_) => true,
            MetricValue::Float(v) => v.is_finite(),
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Uint(v) => write!(f, "{}", v),
            MetricValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Metric key to value. Ordered so that output is reproducible.
pub type MetricMap = BTreeMap<String, MetricValue>;

pub fn available_pages_key(zone_key: &str, column: &str) -> String {
    format!("{}.{}.{}", AVAILABLE_PAGES, zone_key, column)
}

pub fn average_size_key(zone_key: &str) -> String {
    format!("{}.{}", AVERAGE_SIZE, zone_key)
}

pub fn summary_pct_key(zone_key: &str, category: SizeCategory) -> String {
    format!(
        "{}.{}.{}",
        AVAILABLE_PAGES_SUMMARY_PCT,
        zone_key,
        category.as_str()
    )
}

/// Inserts all metrics of one zone. Existing keys are overwritten.
pub fn insert_zone_metrics(metrics: &mut MetricMap, agg: &ZoneAggregate) {
    for (column, count) in BLOCK_SIZES.iter().zip(agg.counts.iter()) {
        if let Some(count) = count {
            metrics.insert(
                available_pages_key(&agg.zone_key, column.label),
                MetricValue::Uint(*count),
            );
        }
    }

    metrics.insert(
        average_size_key(&agg.zone_key),
        MetricValue::Float(agg.average_size),
    );

    for (category, pct) in &agg.category_pct {
        metrics.insert(
            summary_pct_key(&agg.zone_key, *category),
            MetricValue::Float(*pct),
        );
    }
}

/// Zone keys that have an average size entry, in key order.
pub fn zone_keys(metrics: &MetricMap) -> Vec<String> {
    let prefix = format!("{}.", AVERAGE_SIZE);
    metrics
        .keys()
        .filter_map(|key| key.strip_prefix(&prefix))
        .map(str::to_string)
        .collect()
}
