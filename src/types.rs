//! Global type definitions.

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer};

use crate::error::Error;

pub type IncidentId = i64;

/// A single incident as decoded from the input file.
///
/// `status` is kept as the raw string so unrecognised values survive into the output unchanged.
/// Missing keys and `null` values decode to empty values rather than failing the whole file, and
/// keys are also accepted capitalised (`ID`, `Status`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Incident {
	#[serde(alias = "ID", alias = "Id", deserialize_with = "null_as_default")]
	pub id: IncidentId,
	#[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(alias = "Discovered", alias = "DISCOVERED", deserialize_with = "null_as_default")]
	pub discovered: String,
	#[serde(alias = "Description", alias = "DESCRIPTION", deserialize_with = "null_as_default")]
	pub description: String,
	#[serde(alias = "Status", alias = "STATUS", deserialize_with = "null_as_default")]
	pub status: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Closed status vocabulary. Anything outside it classifies as `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
	New,
	InProgress,
	Done,
}

/// The field a run is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
	None,
	#[default]
	Discovered,
	Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Direction {
	#[default]
	Ascending,
	Descending,
}

/// Output columns, declared in canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
	Id,
	Name,
	Discovered,
	Description,
	Status,
}

impl Incident {
	pub fn new(id: IncidentId, name: &str, discovered: &str, description: &str, status: &str) -> Self {
		Self {
			id,
			name: name.to_string(),
			discovered: discovered.to_string(),
			description: description.to_string(),
			status: status.to_string(),
		}
	}

	/// Value of a single column as it appears in the output.
	pub fn field(&self, column: Column) -> String {
		match column {
			Column::Id => self.id.to_string(),
			Column::Name => self.name.clone(),
			Column::Discovered => self.discovered.clone(),
			Column::Description => self.description.clone(),
			Column::Status => self.status.clone(),
		}
	}
}

impl Status {
	/// Classify a raw status string. Unknown and empty strings silently fall back to `Done`.
	pub fn classify(raw: &str) -> Self {
		match raw {
			"New" => Status::New,
			"In Progress" => Status::InProgress,
			_ => Status::Done,
		}
	}

	pub fn rank(self) -> u8 {
		match self {
			Status::New => 3,
			Status::InProgress => 2,
			Status::Done => 1,
		}
	}
}

/// Rank of a raw status string: New = 3, In Progress = 2, everything else = 1.
pub fn rank(raw: &str) -> u8 {
	Status::classify(raw).rank()
}

impl Column {
	pub const ALL: [Column; 5] = [
		Column::Id,
		Column::Name,
		Column::Discovered,
		Column::Description,
		Column::Status,
	];

	/// Header label written in the first output row.
	pub fn label(self) -> &'static str {
		match self {
			Column::Id => "ID",
			Column::Name => "Name",
			Column::Discovered => "Discovered",
			Column::Description => "Description",
			Column::Status => "Status",
		}
	}
}

impl FromStr for Column {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"id" => Ok(Column::Id),
			"name" => Ok(Column::Name),
			"discovered" => Ok(Column::Discovered),
			"description" => Ok(Column::Description),
			"status" => Ok(Column::Status),
			_ => Err(Error::UnknownColumn(s.trim().to_string())),
		}
	}
}
