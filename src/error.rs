//! Configuration error kinds.

use thiserror::Error;

use crate::config::Axis;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
	#[error("{0} was configured more than once")]
	Conflict(Axis),

	#[error("column selection must include at least one column")]
	EmptyColumns,

	#[error("unknown column '{0}' (expected one of id, name, discovered, description, status)")]
	UnknownColumn(String),
}
