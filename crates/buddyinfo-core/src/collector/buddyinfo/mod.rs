//! `/proc/buddyinfo` collection: parsing, per-zone aggregation and the
//! collector that turns the file into a flat metric map.

mod aggregate;
mod collector;
mod columns;
pub mod parser;

pub use aggregate::ZoneAggregate;
pub use collector::{BuddyinfoCollector, CollectError};
pub use columns::{BLOCK_SIZES, BlockSize, COLUMN_COUNT, SizeCategory};
pub use parser::{ParsedLine, parse_buddyinfo, parse_line};
