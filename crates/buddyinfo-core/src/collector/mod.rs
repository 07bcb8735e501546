//! Free-page fragmentation collector for Linux.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               BuddyinfoCollector              │
//! │  parse_line → ZoneAggregate → metric keys     │
//! │                      │                        │
//! │               ┌──────▼──────┐                 │
//! │               │  FileSystem │ (trait)         │
//! │               └──────┬──────┘                 │
//! └──────────────────────┼────────────────────────┘
//!              ┌─────────┴─────────┐
//!       ┌──────▼──────┐     ┌──────▼──────┐
//!       │   RealFs    │     │   MockFs    │
//!       │ (Linux)     │     │ (Testing)   │
//!       └─────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use buddyinfo_core::collector::{BuddyinfoCollector, MockFs};
//!
//! let collector = BuddyinfoCollector::new(MockFs::typical_buddyinfo(), "/proc/buddyinfo");
//! let metrics = collector.collect().unwrap();
//! assert!(metrics.contains_key("average_size.Node0_DMA"));
//! ```

pub mod buddyinfo;
pub mod mock;
pub mod traits;

pub use buddyinfo::{BuddyinfoCollector, CollectError};
pub use mock::MockFs;
pub use traits::{FileSystem, RealFs};
