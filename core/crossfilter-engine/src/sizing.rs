//! FILENAME: core/crossfilter-engine/src/sizing.rs
//! Presentation Sizing Policy: list/chart height from the number of rows.

use serde::{Deserialize, Serialize};

/// Breakpoints for the height cascade. The stages run in order and each one
/// that fires recomputes from the row count, not from the previous height:
///
/// 1. `h = rows * per_row`
/// 2. `h == 0` -> `h = empty_height`
/// 3. `h <= medium_threshold` -> `h = rows * medium_per_row`
/// 4. `h <= small_threshold` -> `h = rows * small_per_row`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizingPolicy {
    pub per_row: u32,
    pub empty_height: u32,
    pub medium_threshold: u32,
    pub medium_per_row: u32,
    pub small_threshold: u32,
    pub small_per_row: u32,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        SizingPolicy {
            per_row: 30,
            empty_height: 800,
            medium_threshold: 300,
            medium_per_row: 100,
            small_threshold: 100,
            small_per_row: 175,
        }
    }
}

impl SizingPolicy {
    /// Height in pixels for a list of `row_count` rows.
    pub fn height_for(&self, row_count: usize) -> u32 {
        let rows = u32::try_from(row_count).unwrap_or(u32::MAX);

        let mut height = rows.saturating_mul(self.per_row);
        if height == 0 {
            height = self.empty_height;
        }
        if height <= self.medium_threshold {
            height = rows.saturating_mul(self.medium_per_row);
        }
        if height <= self.small_threshold {
            height = rows.saturating_mul(self.small_per_row);
        }
        height
    }
}

/// `SizingPolicy::default().height_for(row_count)`.
pub fn height_for(row_count: usize) -> u32 {
    SizingPolicy::default().height_for(row_count)
}
