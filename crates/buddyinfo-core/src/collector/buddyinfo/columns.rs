//! Block-size columns of `/proc/buddyinfo`.
//!
//! The kernel prints one free-block count per allocation order. Order 0 is a
//! single 4K page, order 10 is 1024 contiguous pages (4M).

/// Number of block-size columns the parser reads per line.
pub const COLUMN_COUNT: usize = 11;

/// Size bucket used for the summary percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeCategory {
    Small,
    Middle,
    Large,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 3] = [
        SizeCategory::Small,
        SizeCategory::Middle,
        SizeCategory::Large,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Middle => "middle",
            SizeCategory::Large => "large",
        }
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One block-size column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize {
    /// Label used as metric key segment, e.g. "4K".
    pub label: &'static str,
    /// Block size in bytes.
    pub bytes: u64,
    pub category: SizeCategory,
}

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Columns in file order.
#[rustfmt::skip]
pub const BLOCK_SIZES: [BlockSize; COLUMN_COUNT] = [
    BlockSize { label: "4K", bytes: 4 * KIB, category: SizeCategory::Small },
    BlockSize { label: "8K", bytes: 8 * KIB, category: SizeCategory::Small },
    BlockSize { label: "16K", bytes: 16 * KIB, category: SizeCategory::Small },
    BlockSize { label: "32K", bytes: 32 * KIB, category: SizeCategory::Small },
    BlockSize { label: "64K", bytes: 64 * KIB, category: SizeCategory::Middle },
    BlockSize { label: "128K", bytes: 128 * KIB, category: SizeCategory::Middle },
    BlockSize { label: "256K", bytes: 256 * KIB, category: SizeCategory::Middle },
    BlockSize { label: "512K", bytes: 512 * KIB, category: SizeCategory::Middle },
    BlockSize { label: "1M", bytes: MIB, category: SizeCategory::Large },
    BlockSize { label: "2M", bytes: 2 * MIB, category: SizeCategory::Large },
    BlockSize { label: "4M", bytes: 4 * MIB, category: SizeCategory::Large },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_double_per_order() {
        for (order, column) in BLOCK_SIZES.iter().enumerate() {
            assert_eq!(column.bytes, 4096 << order, "column {}", column.label);
        }
    }

    #[test]
    fn test_category_membership() {
        let count = |c: SizeCategory| BLOCK_SIZES.iter().filter(|b| b.category == c).count();
        assert_eq!(count(SizeCategory::Small), 4);
        assert_eq!(count(SizeCategory::Middle), 4);
        assert_eq!(count(SizeCategory::Large), 3);
        assert_eq!(BLOCK_SIZES[3].label, "32K");
        assert_eq!(BLOCK_SIZES[3].category, SizeCategory::Small);
        assert_eq!(BLOCK_SIZES[8].label, "1M");
        assert_eq!(BLOCK_SIZES[8].category, SizeCategory::Large);
    }
}
