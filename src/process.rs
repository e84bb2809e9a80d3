//! Main incident processing: decode, order, project, encode.

use std::io::{BufReader, BufWriter, Read, Write};

use anyhow::{Context, Result};

use crate::config::RunConfig;
use crate::order::order;
use crate::project::{emit, Row};
use crate::types::Incident;

/// Run
///
/// Read all incidents from `input` (a JSON array), order and project them per `config` and write
/// the result to `output` as CSV.
pub fn run<R: Read, W: Write>(input: &mut R, output: &mut W, config: &RunConfig) -> Result<()> {
	let incidents = read_incidents(input)?;
	let (header, rows) = transform(incidents, config);
	write_table(output, &header, &rows)
}

/// Read Incidents
///
/// Decode the full incident list. Anything other than a JSON array of incident objects is an
/// error.
pub fn read_incidents<R: Read>(input: &mut R) -> Result<Vec<Incident>> {
	let buffered = BufReader::new(input);
	let incidents: Vec<Incident> =
		serde_json::from_reader(buffered).context("Input does not match the expected JSON format")?;
	log::info!("Read {} incidents", incidents.len());
	for incident in &incidents {
		log::debug!("{:?}", incident);
	}
	Ok(incidents)
}

/// Transform
///
/// Order first, then project. Projection never influences ordering.
pub fn transform(incidents: Vec<Incident>, config: &RunConfig) -> (Row, Vec<Row>) {
	log::debug!("Ordering with {:?}", config.sort);
	let ordered = order(incidents, &config.sort);
	emit(&ordered, &config.columns)
}

/// Write Table
///
/// Write the header and rows as CSV to `wtr` (required trait bound `std::io::Write`).
pub fn write_table<W: Write>(wtr: &mut W, header: &[String], rows: &[Row]) -> Result<()> {
	let buffered = BufWriter::new(wtr);
	let mut writer = csv::Writer::from_writer(buffered);
	writer.write_record(header)?;
	for row in rows {
		writer.write_record(row)?;
	}
	writer.flush()?;
	log::info!("Wrote {} rows", rows.len());
	Ok(())
}
