//! buddyinfo-core — free-page fragmentation statistics from `/proc/buddyinfo`.
//!
//! Provides:
//! - `collector` — line parser, zone aggregator and the collector that ties them together
//! - `metrics` — flat metric value map and key naming
//! - `catalog` — self-describing graph definitions for the host agent
//! - `config` — plugin configuration and defaults

pub mod catalog;
pub mod collector;
pub mod config;
pub mod metrics;

pub use catalog::{GraphCatalog, build_catalog, catalog_for_zones};
pub use collector::{BuddyinfoCollector, CollectError, FileSystem, MockFs, RealFs};
pub use config::{PluginConfig, RunMode};
pub use metrics::{MetricMap, MetricValue};
