//! Data ingestion for the ndscatter engine.
//!
//! Hosts hand over named numeric columns (one per data dimension), an
//! optional per-point label column, and an optional label-to-color mapping.
//! This crate validates the shape, packs the columns into a row-major
//! [`DataMatrix`](ndscatter_core::DataMatrix), and resolves categorical
//! labels into indices plus display colors.

pub mod color;
pub mod columns;

pub use color::Color;
pub use columns::{ColumnSet, DataError, Dataset};
