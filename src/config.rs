//! Run configuration.
//!
//! A run is configured along three independent axes (sort field, sort direction, column
//! selection). Each axis may be set at most once per invocation, however many option spellings
//! map onto it. `ConfigBuilder` enforces that and hands out an immutable `RunConfig`.

use std::collections::HashSet;
use std::fmt;

use crate::error::Error;
use crate::types::{Column, Direction, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
	SortField,
	SortDirection,
	Columns,
}

/// How the comparators treat equal keys.
///
/// `Reference` uses asymmetric predicates (strict when ascending, non-strict when descending), so
/// equal keys may be swapped on a descending pass. `Strict` is strict in both directions, which
/// makes sorted input a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieMode {
	#[default]
	Strict,
	Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
	pub key: SortKey,
	pub direction: Direction,
	pub ties: TieMode,
}

/// Per-column inclusion mask. Never all false once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnConfig {
	id: bool,
	name: bool,
	discovered: bool,
	description: bool,
	status: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
	pub sort: SortConfig,
	pub columns: ColumnConfig,
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
	configured: HashSet<Axis>,
	config: RunConfig,
}

impl fmt::Display for Axis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Axis::SortField => "sort field",
			Axis::SortDirection => "sort direction",
			Axis::Columns => "column selection",
		};
		f.write_str(name)
	}
}

impl SortConfig {
	pub fn new(key: SortKey, direction: Direction) -> Self {
		Self {
			key,
			direction,
			ties: TieMode::default(),
		}
	}

	pub fn with_ties(self, ties: TieMode) -> Self {
		Self { ties, ..self }
	}
}

impl Default for ColumnConfig {
	fn default() -> Self {
		Self {
			id: true,
			name: true,
			discovered: true,
			description: true,
			status: true,
		}
	}
}

impl ColumnConfig {
	/// Select Columns
	///
	/// Replace the whole mask: every column is cleared, then exactly the requested ones are
	/// included. Repeats within `columns` are harmless; an empty selection is an error.
	pub fn select(columns: &[Column]) -> Result<Self, Error> {
		let mut mask = Self {
			id: false,
			name: false,
			discovered: false,
			description: false,
			status: false,
		};
		for column in columns {
			*mask.flag_mut(*column) = true;
		}
		if mask.columns().next().is_none() {
			return Err(Error::EmptyColumns);
		}
		Ok(mask)
	}

	pub fn includes(&self, column: Column) -> bool {
		match column {
			Column::Id => self.id,
			Column::Name => self.name,
			Column::Discovered => self.discovered,
			Column::Description => self.description,
			Column::Status => self.status,
		}
	}

	/// Included columns in canonical order.
	pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
		Column::ALL.into_iter().filter(|c| self.includes(*c))
	}

	fn flag_mut(&mut self, column: Column) -> &mut bool {
		match column {
			Column::Id => &mut self.id,
			Column::Name => &mut self.name,
			Column::Discovered => &mut self.discovered,
			Column::Description => &mut self.description,
			Column::Status => &mut self.status,
		}
	}
}

impl ConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sort_key(&mut self, key: SortKey) -> Result<&mut Self, Error> {
		self.claim(Axis::SortField)?;
		self.config.sort.key = key;
		Ok(self)
	}

	pub fn direction(&mut self, direction: Direction) -> Result<&mut Self, Error> {
		self.claim(Axis::SortDirection)?;
		self.config.sort.direction = direction;
		Ok(self)
	}

	pub fn columns(&mut self, columns: &[Column]) -> Result<&mut Self, Error> {
		self.claim(Axis::Columns)?;
		self.config.columns = ColumnConfig::select(columns)?;
		Ok(self)
	}

	/// Parse a comma separated column list (e.g. `id,status`) and select it.
	pub fn columns_from_list(&mut self, list: &str) -> Result<&mut Self, Error> {
		let columns = list
			.split(',')
			.filter(|s| !s.trim().is_empty())
			.map(str::parse)
			.collect::<Result<Vec<Column>, Error>>()?;
		self.columns(&columns)
	}

	pub fn ties(&mut self, ties: TieMode) -> &mut Self {
		self.config.sort.ties = ties;
		self
	}

	pub fn build(&self) -> RunConfig {
		self.config
	}

	fn claim(&mut self, axis: Axis) -> Result<(), Error> {
		if !self.configured.insert(axis) {
			log::debug!("Rejecting second {} setting", axis);
			return Err(Error::Conflict(axis));
		}
		Ok(())
	}
}
