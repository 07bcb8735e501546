//! Collector for `/proc/buddyinfo`.

use super::aggregate::ZoneAggregate;
use super::parser::parse_buddyinfo;
use crate::collector::traits::FileSystem;
use crate::config::PluginConfig;
use crate::metrics::{MetricMap, insert_zone_metrics};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Error returned when a collection cycle cannot produce any value.
#[derive(Debug)]
pub enum CollectError {
    /// The buddyinfo file could not be opened or read.
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::SourceUnreadable { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::SourceUnreadable { source, .. } => Some(source),
        }
    }
}

/// Reads buddyinfo and produces the metric map.
///
/// Holds no state between calls; every `collect` reads the file again.
pub struct BuddyinfoCollector<F: FileSystem> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> BuddyinfoCollector<F> {
    /// Creates a new buddyinfo collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `path` - Path to the buddyinfo file (usually "/proc/buddyinfo")
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn from_config(fs: F, config: &PluginConfig) -> Self {
        Self::new(fs, config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs one collection cycle.
    ///
    /// Lines that are not zone lines are skipped. If two lines share a zone
    /// key, the later line's values replace the earlier ones key by key.
    pub fn collect(&self) -> Result<MetricMap, CollectError> {
        let content = self.fs.read_to_string(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to read buddyinfo");
            CollectError::SourceUnreadable {
                path: self.path.clone(),
                source: e,
            }
        })?;

        let mut metrics = MetricMap::new();
        let mut seen = HashSet::new();

        let lines = parse_buddyinfo(&content);
        for line in &lines {
            let agg = ZoneAggregate::from_line(line);
            if !seen.insert(agg.zone_key.clone()) {
                debug!(zone = %agg.zone_key, "duplicate zone key, overwriting previous values");
            }
            insert_zone_metrics(&mut metrics, &agg);
        }

        debug!(
            zones = seen.len(),
            lines = lines.len(),
            metrics = metrics.len(),
            "buddyinfo collected"
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::traits::RealFs;
    use crate::config::DEFAULT_BUDDYINFO_PATH;
    use crate::metrics::MetricValue;
    use std::io::Write;

    fn collector(fs: MockFs) -> BuddyinfoCollector<MockFs> {
        BuddyinfoCollector::new(fs, DEFAULT_BUDDYINFO_PATH)
    }

    fn float(metrics: &MetricMap, key: &str) -> f64 {
        match metrics.get(key) {
            Some(MetricValue::Float(v)) => *v,
            other => panic!("{} is not a float: {:?}", key, other),
        }
    }

    #[test]
    fn test_collect_typical_system() {
        let metrics = collector(MockFs::typical_buddyinfo()).collect().unwrap();

        assert_eq!(
            metrics["available_pages.Node0_Normal.256K"],
            MetricValue::Uint(58)
        );
        assert_eq!(
            metrics["available_pages.Node0_DMA.256K"],
            MetricValue::Uint(3)
        );
        assert_eq!(float(&metrics, "average_size.Node0_DMA"), 686881.3913043478);
        assert_eq!(
            float(&metrics, "available_pages_summary_pct.Node0_DMA32.middle"),
            9.310489363931678
        );

        // 4 zones x (11 columns + 1 average + 3 categories)
        assert_eq!(metrics.len(), 4 * 15);
    }

    #[test]
    fn test_collect_percentages_sum_to_100() {
        let metrics = collector(MockFs::typical_buddyinfo()).collect().unwrap();

        for zone in ["Node0_DMA", "Node0_DMA32", "Node0_Normal", "Node1_Normal"] {
            let sum: f64 = ["small", "middle", "large"]
                .iter()
                .map(|c| float(&metrics, &format!("available_pages_summary_pct.{}.{}", zone, c)))
                .sum();
            assert!((sum - 100.0).abs() < 1e-9, "{}: {}", zone, sum);
        }
    }

    #[test]
    fn test_collect_is_repeatable() {
        let collector = collector(MockFs::typical_buddyinfo());
        let first = collector.collect().unwrap();
        let second = collector.collect().unwrap();

        assert_eq!(first, second);
        assert_eq!(format!("{:?}", first), format!("{:?}", second));
    }

    #[test]
    fn test_collect_short_line_has_no_keys() {
        let fs = MockFs::with_buddyinfo(
            "\
Node 0, zone      DMA      1      0      4      2      3      4      3      3      0      0      3
Node 0, zone  Movable      1      2      3      4      5      6      7      8      9     10
",
        );
        let metrics = collector(fs).collect().unwrap();

        assert!(metrics.contains_key("average_size.Node0_DMA"));
        assert!(!metrics.keys().any(|k| k.contains("Node0_Movable")));
    }

    #[test]
    fn test_collect_zero_zone_passes_nan_through() {
        let fs = MockFs::with_buddyinfo("Node 0, zone DMA 0 0 0 0 0 0 0 0 0 0 0\n");
        let metrics = collector(fs).collect().unwrap();

        assert_eq!(
            metrics["available_pages.Node0_DMA.4K"],
            MetricValue::Uint(0)
        );
        assert!(float(&metrics, "average_size.Node0_DMA").is_nan());
        assert!(float(&metrics, "available_pages_summary_pct.Node0_DMA.small").is_nan());
    }

    #[test]
    fn test_collect_duplicate_zone_last_wins() {
        let fs = MockFs::with_buddyinfo(
            "\
Node 0, zone Normal 1 1 1 1 1 1 1 1 1 1 1
Node 0, zone Normal 2 2 2 2 2 2 2 2 2 2 2
",
        );
        let metrics = collector(fs).collect().unwrap();

        assert_eq!(
            metrics["available_pages.Node0_Normal.4K"],
            MetricValue::Uint(2)
        );
        assert_eq!(metrics.len(), 15);
    }

    #[test]
    fn test_collect_missing_file() {
        let err = collector(MockFs::without_buddyinfo()).collect().unwrap_err();

        let CollectError::SourceUnreadable { path, source } = &err;
        assert_eq!(path, Path::new(DEFAULT_BUDDYINFO_PATH));
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().starts_with("cannot read /proc/buddyinfo"));
    }

    #[test]
    fn test_collect_from_config_path() {
        let mut fs = MockFs::new();
        fs.add_file("/tmp/buddyinfo.sample", "Node 0, zone DMA 1 1 1 1 1 1 1 1 1 1 1\n");
        let config = PluginConfig::new("/tmp/buddyinfo.sample", "buddyinfo", Default::default());

        let collector = BuddyinfoCollector::from_config(fs, &config);
        assert_eq!(collector.path(), Path::new("/tmp/buddyinfo.sample"));
        assert_eq!(collector.collect().unwrap().len(), 15);
    }

    #[test]
    fn test_collect_real_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(crate::collector::mock::TYPICAL_BUDDYINFO.as_bytes())
            .unwrap();

        let collector = BuddyinfoCollector::new(RealFs::new(), file.path());
        let metrics = collector.collect().unwrap();
        assert_eq!(float(&metrics, "average_size.Node0_DMA"), 686881.3913043478);
    }
}
