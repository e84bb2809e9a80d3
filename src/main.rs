//! Program entrypoint and argument parsing.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use incident_csv::config::{ConfigBuilder, RunConfig, TieMode};
use incident_csv::error::Error;
use incident_csv::process;
use incident_csv::types::{Direction, SortKey};

/// Convert a JSON list of incidents into CSV.
///
/// Each configuration axis (sort field, sort direction, columns) may be given once, through any
/// one of its spellings.
#[derive(Debug, Parser)]
#[command(name = "incident-csv")]
struct Cli {
	/// JSON file holding an array of incidents.
	#[arg(long, default_value = "input/data.json")]
	input: PathBuf,

	/// CSV file to create, or `-` for stdout.
	#[arg(long, default_value = "output/data.csv")]
	output: PathBuf,

	/// Field to order incidents by.
	#[arg(long, value_enum, action = ArgAction::Append)]
	sort_field: Vec<SortKey>,

	/// Shorthand for `--sort-field discovered`.
	#[arg(long, action = ArgAction::Count)]
	sort_discovered: u8,

	/// Shorthand for `--sort-field status`.
	#[arg(long, action = ArgAction::Count)]
	sort_status: u8,

	/// Direction to order in (default ascending).
	#[arg(long, value_enum, action = ArgAction::Append)]
	sort_direction: Vec<Direction>,

	/// Shorthand for `--sort-direction ascending`.
	#[arg(long, action = ArgAction::Count)]
	ascending: u8,

	/// Shorthand for `--sort-direction descending`.
	#[arg(long, action = ArgAction::Count)]
	descending: u8,

	/// Comma separated columns to output, e.g. `id,status` (default all).
	#[arg(long, action = ArgAction::Append)]
	columns: Vec<String>,

	/// Let descending sorts swap incidents with equal keys.
	#[arg(long)]
	reference_ties: bool,
}

/// Configure
///
/// Feed every occurrence of every option into the builder so repeated axes are reported as
/// conflicts, whichever spellings were used.
fn configure(cli: &Cli) -> Result<RunConfig, Error> {
	let mut builder = ConfigBuilder::new();

	let shorthand_keys = [
		(cli.sort_discovered, SortKey::Discovered),
		(cli.sort_status, SortKey::Status),
	];
	for key in &cli.sort_field {
		builder.sort_key(*key)?;
	}
	for (count, key) in shorthand_keys {
		for _ in 0..count {
			builder.sort_key(key)?;
		}
	}

	let shorthand_directions = [
		(cli.ascending, Direction::Ascending),
		(cli.descending, Direction::Descending),
	];
	for direction in &cli.sort_direction {
		builder.direction(*direction)?;
	}
	for (count, direction) in shorthand_directions {
		for _ in 0..count {
			builder.direction(direction)?;
		}
	}

	for list in &cli.columns {
		builder.columns_from_list(list)?;
	}

	if cli.reference_ties {
		builder.ties(TieMode::Reference);
	}
	Ok(builder.build())
}

fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();
	let config = configure(&cli)?;
	log::debug!("{:?}", config);

	let mut input =
		File::open(&cli.input).with_context(|| format!("Error accessing {}", cli.input.display()))?;
	log::info!("Input file {} accessed", cli.input.display());
	let incidents = process::read_incidents(&mut input)
		.with_context(|| format!("Error reading {}", cli.input.display()))?;
	let (header, rows) = process::transform(incidents, &config);

	if cli.output == Path::new("-") {
		return process::write_table(&mut io::stdout(), &header, &rows);
	}
	if let Some(parent) = cli.output.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent)
				.with_context(|| format!("Error creating {}", parent.display()))?;
		}
	}
	let mut output = File::create(&cli.output)
		.with_context(|| format!("Error creating {}", cli.output.display()))?;
	process::write_table(&mut output, &header, &rows)?;
	log::info!("Output file {} created", cli.output.display());
	Ok(())
}
