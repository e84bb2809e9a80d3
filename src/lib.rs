//! Convert a JSON list of incidents to CSV, optionally ordered by discovery date or status and
//! restricted to a subset of columns.

pub mod config;
pub mod error;
pub mod order;
pub mod process;
pub mod project;
pub mod types;
