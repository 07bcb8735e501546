//! Graph definitions the host agent registers on first run.
//!
//! Three groups are defined:
//!
//! - `available_pages_summary_pct.#` — stacked share of small/middle/large blocks
//! - `average_size` — one line per zone
//! - `available_pages.#` — raw counts per block size, only in verbose mode
//!
//! Zone names are not known statically, so building the catalog requires one
//! full collection pass.

use crate::collector::buddyinfo::{BLOCK_SIZES, SizeCategory};
use crate::collector::{BuddyinfoCollector, CollectError, FileSystem};
use crate::config::RunMode;
use crate::metrics::zone_keys;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const SUMMARY_PCT_GRAPH: &str = "available_pages_summary_pct.#";
pub const AVERAGE_SIZE_GRAPH: &str = "average_size";
pub const AVAILABLE_PAGES_GRAPH: &str = "available_pages.#";

/// Graph name to definition.
pub type GraphCatalog = BTreeMap<String, Graph>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Uint64,
    Float64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDescriptor {
    pub name: String,
    pub label: String,
    #[serde(skip)]
    pub value_type: ValueType,
    /// Whether the agent should report the per-second delta instead of the value.
    #[serde(skip)]
    pub diff: bool,
    pub stacked: bool,
}

impl MetricDescriptor {
    fn new(name: &str, value_type: ValueType, stacked: bool) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            value_type,
            diff: false,
            stacked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub label: String,
    pub unit: String,
    pub metrics: Vec<MetricDescriptor>,
}

/// Builds the catalog for an already known set of zone keys.
pub fn catalog_for_zones<S: AsRef<str>>(zones: &[S], mode: RunMode) -> GraphCatalog {
    let mut catalog = GraphCatalog::new();

    catalog.insert(
        SUMMARY_PCT_GRAPH.to_string(),
        Graph {
            label: "Buddyinfo Available Pages Summary (Percentage)".to_string(),
            unit: "percentage".to_string(),
            metrics: SizeCategory::ALL
                .iter()
                .map(|c| MetricDescriptor::new(c.as_str(), ValueType::Float64, true))
                .collect(),
        },
    );

    catalog.insert(
        AVERAGE_SIZE_GRAPH.to_string(),
        Graph {
            label: "Buddyinfo Average Size".to_string(),
            unit: "bytes".to_string(),
            metrics: zones
                .iter()
                .map(|z| MetricDescriptor::new(z.as_ref(), ValueType::Float64, false))
                .collect(),
        },
    );

    if mode.is_verbose() {
        catalog.insert(
            AVAILABLE_PAGES_GRAPH.to_string(),
            Graph {
                label: "Buddyinfo Available Pages".to_string(),
                unit: "integer".to_string(),
                metrics: BLOCK_SIZES
                    .iter()
                    .map(|c| MetricDescriptor::new(c.label, ValueType::Uint64, true))
                    .collect(),
            },
        );
    }

    catalog
}

/// Runs a discovery pass to learn the zone keys, then builds the catalog.
///
/// Unlike a regular collection, callers must not continue without a catalog:
/// an error here means graph definitions cannot be produced at all.
pub fn build_catalog<F: FileSystem>(
    collector: &BuddyinfoCollector<F>,
    mode: RunMode,
) -> Result<GraphCatalog, CollectError> {
    let metrics = collector.collect()?;
    let zones = zone_keys(&metrics);
    debug!(zones = ?zones, "discovered buddyinfo zones");

    Ok(catalog_for_zones(zones.as_slice(), mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;
    use crate::config::DEFAULT_BUDDYINFO_PATH;

    fn names(graph: &Graph) -> Vec<&str> {
        graph.metrics.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_compact_catalog() {
        let catalog = catalog_for_zones(&["Node0_DMA", "Node0_Normal"], RunMode::Compact);

        assert_eq!(catalog.len(), 2);
        let summary = &catalog[SUMMARY_PCT_GRAPH];
        assert_eq!(summary.label, "Buddyinfo Available Pages Summary (Percentage)");
        assert_eq!(summary.unit, "percentage");
        assert_eq!(names(summary), vec!["small", "middle", "large"]);
        assert!(summary
            .metrics
            .iter()
            .all(|m| m.stacked && !m.diff && m.value_type == ValueType::Float64));

        let average = &catalog[AVERAGE_SIZE_GRAPH];
        assert_eq!(average.label, "Buddyinfo Average Size");
        assert_eq!(average.unit, "bytes");
        assert_eq!(names(average), vec!["Node0_DMA", "Node0_Normal"]);
        assert!(average.metrics.iter().all(|m| !m.stacked));

        assert!(!catalog.contains_key(AVAILABLE_PAGES_GRAPH));
    }

    #[test]
    fn test_verbose_catalog() {
        let catalog = catalog_for_zones(&["Node0_DMA"], RunMode::Verbose);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[SUMMARY_PCT_GRAPH].metrics.len(), 3);

        let pages = &catalog[AVAILABLE_PAGES_GRAPH];
        assert_eq!(pages.label, "Buddyinfo Available Pages");
        assert_eq!(pages.unit, "integer");
        assert_eq!(pages.metrics.len(), 11);
        assert_eq!(pages.metrics[0].name, "4K");
        assert_eq!(pages.metrics[10].name, "4M");
        assert!(pages
            .metrics
            .iter()
            .all(|m| m.stacked && m.value_type == ValueType::Uint64));
    }

    #[test]
    fn test_build_catalog_discovers_zones() {
        let collector = BuddyinfoCollector::new(MockFs::typical_buddyinfo(), DEFAULT_BUDDYINFO_PATH);

        let compact = build_catalog(&collector, RunMode::Compact).unwrap();
        assert_eq!(compact[SUMMARY_PCT_GRAPH].metrics.len(), 3);
        assert_eq!(
            names(&compact[AVERAGE_SIZE_GRAPH]),
            vec!["Node0_DMA", "Node0_DMA32", "Node0_Normal", "Node1_Normal"]
        );
        assert!(!compact.contains_key(AVAILABLE_PAGES_GRAPH));

        let verbose = build_catalog(&collector, RunMode::Verbose).unwrap();
        assert_eq!(verbose[AVERAGE_SIZE_GRAPH].metrics.len(), 4);
        assert_eq!(verbose[AVAILABLE_PAGES_GRAPH].metrics.len(), 11);
    }

    #[test]
    fn test_build_catalog_fails_without_source() {
        let collector =
            BuddyinfoCollector::new(MockFs::without_buddyinfo(), DEFAULT_BUDDYINFO_PATH);
        assert!(build_catalog(&collector, RunMode::Compact).is_err());
    }

    #[test]
    fn test_serialized_fields() {
        let catalog = catalog_for_zones(&["Node0_DMA"], RunMode::Compact);
        let json = serde_json::to_value(&catalog[AVERAGE_SIZE_GRAPH]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "label": "Buddyinfo Average Size",
                "unit": "bytes",
                "metrics": [{"name": "Node0_DMA", "label": "Node0_DMA", "stacked": false}],
            })
        );
    }
}
