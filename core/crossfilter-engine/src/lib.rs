//! FILENAME: core/crossfilter-engine/src/lib.rs
//! Cross-filter subsystem for the wind-farm dashboard.
//!
//! This crate turns a `Dataset` and a `FilterState` into everything the
//! dashboard renders. It depends on `dataset` only for the record table and
//! the column roles. Every operation is a pure function of its inputs.
//!
//! Layers:
//! - `filter`: Filter State and events (what the user selected)
//! - `options`: Cascading Option Resolver (what the user may select)
//! - `view`: Filter Engine (which rows pass)
//! - `aggregate`: Aggregation Engine (what the rows add up to)
//! - `sizing`: Presentation Sizing Policy (how tall the list is)
//! - `dashboard`: one complete recomputation pass

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod options;
pub mod sizing;
pub mod view;

pub use aggregate::{
    bucket_by_year, group_by, summarize, Accumulator, AggregateEntry, AggregateResult,
    Aggregation, Summary, YearBucket, MW_PER_GW,
};
pub use dashboard::{
    default_breakdowns, recompute, Breakdown, BreakdownSpec, DashboardSettings, DashboardSnapshot,
};
pub use filter::{FilterEvent, FilterState, Selection, YearRange};
pub use options::{default_value, options_for, reset_selection, revalidate};
pub use sizing::{height_for, SizingPolicy};
pub use view::{apply, CapacityBar, FilteredView, MapPoint};
