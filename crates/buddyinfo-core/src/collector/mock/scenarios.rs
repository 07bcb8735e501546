//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc/buddyinfo` contents.

use super::filesystem::MockFs;
use crate::config::DEFAULT_BUDDYINFO_PATH;

/// Two NUMA nodes, four zones.
///
/// Known values: `Node0_Normal` has 58 free 256K blocks, the weighted average
/// block size of `Node0_DMA` is 686881.3913043478 bytes (3857 4K-units over
/// 23 blocks) and 1777 of the 19086 `Node0_DMA32` blocks are middle-sized.
pub const TYPICAL_BUDDYINFO: &str = "\
Node 0, zone      DMA      1      0      4      2      3      4      3      3      0      0      3
Node 0, zone    DMA32   8421   5102   2315   1101    912    503    247    115     57     31    282
Node 0, zone   Normal  20137   9654   3102   1248    412    130     58     21      9      2      0
Node 1, zone   Normal  15020   7812   2490    977    301     96     41     12      4      1      0
";

impl MockFs {
    /// Creates a system with [`TYPICAL_BUDDYINFO`] at the default path.
    pub fn typical_buddyinfo() -> Self {
        Self::with_buddyinfo(TYPICAL_BUDDYINFO)
    }

    /// Creates a system with the given content at the default path.
    pub fn with_buddyinfo(content: &str) -> Self {
        let mut fs = Self::new();
        fs.add_file(DEFAULT_BUDDYINFO_PATH, content);
        fs
    }

    /// Creates a system where `/proc/buddyinfo` is missing, as on kernels
    /// without procfs or in restricted containers.
    pub fn without_buddyinfo() -> Self {
        Self::new()
    }
}
