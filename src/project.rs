//! Column projection.

use crate::config::ColumnConfig;
use crate::types::Incident;

pub type Row = Vec<String>;

/// Labels of the included columns, in canonical order.
pub fn header(config: &ColumnConfig) -> Row {
	config.columns().map(|c| c.label().to_string()).collect()
}

/// Values of the included columns for one incident. Always the same length as `header(config)`.
pub fn project(incident: &Incident, config: &ColumnConfig) -> Row {
	config.columns().map(|c| incident.field(c)).collect()
}

/// Emit
///
/// Build the header and one projected row per incident, preserving the order of `incidents`.
pub fn emit(incidents: &[Incident], config: &ColumnConfig) -> (Row, Vec<Row>) {
	let rows = incidents.iter().map(|x| project(x, config)).collect();
	(header(config), rows)
}
