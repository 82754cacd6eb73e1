//! Buckeye - point-in-region lookup over static boundary datasets
//!
//! This library provides the containment core shared by the server and
//! inspect binaries: geometry predicates, the dataset loader, and the
//! region index.

pub mod dataset;
pub mod geometry;
pub mod region;

pub use dataset::{load_records, read_records, DataError, RegionRecord};
pub use region::{Region, RegionIndex};
