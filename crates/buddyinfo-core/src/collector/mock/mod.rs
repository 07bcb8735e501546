//! Mock filesystem and fixtures for testing without a real `/proc/buddyinfo`.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
pub use scenarios::TYPICAL_BUDDYINFO;
