//! Text formats understood by the host agent.
//!
//! Values are printed one per line as `name\tvalue\ttimestamp`. When the agent
//! asks for graph definitions it sets [`META_ENV`] to `1` and expects a header
//! line followed by a JSON document.

use buddyinfo_core::catalog::{Graph, GraphCatalog};
use buddyinfo_core::metrics::AVAILABLE_PAGES;
use buddyinfo_core::{MetricMap, MetricValue, PluginConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use tracing::debug;

/// Environment variable the agent sets when requesting graph definitions.
pub const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

pub const META_HEADER: &str = "# mackerel-agent-plugin";

#[derive(Serialize)]
struct GraphDefinitions<'a> {
    graphs: BTreeMap<String, &'a Graph>,
}

/// Writes all finite metric values with the configured prefix.
///
/// Raw `available_pages` counts only have a graph in verbose mode and are left
/// out otherwise. NaN and infinite values (zones without free blocks) cannot be
/// stored by the agent and are left out too.
pub fn write_values<W: Write>(
    out: &mut W,
    config: &PluginConfig,
    metrics: &MetricMap,
    timestamp: i64,
) -> io::Result<()> {
    let raw_prefix = format!("{}.", AVAILABLE_PAGES);

    for (key, value) in metrics {
        if !config.mode.is_verbose() && key.starts_with(&raw_prefix) {
            continue;
        }

        let name = config.prefixed(key);
        if !value.is_finite() {
            debug!(metric = %name, value = %value, "skipping non-finite value");
            continue;
        }
        match value {
            MetricValue::Uint(v) => writeln!(out, "{}\t{}\t{}", name, v, timestamp)?,
            MetricValue::Float(v) => writeln!(out, "{}\t{:.6}\t{}", name, v, timestamp)?,
        }
    }
    Ok(())
}

/// Writes the definitions header and the catalog as JSON, graph names prefixed.
pub fn write_definitions<W: Write>(
    out: &mut W,
    config: &PluginConfig,
    catalog: &GraphCatalog,
) -> io::Result<()> {
    let definitions = GraphDefinitions {
        graphs: catalog
            .iter()
            .map(|(name, graph)| (config.prefixed(name), graph))
            .collect(),
    };

    writeln!(out, "{}", META_HEADER)?;
    serde_json::to_writer(&mut *out, &definitions)?;
    writeln!(out)
}
