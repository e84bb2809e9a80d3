//! Ordering of incidents.
//!
//! Comparators here are "candidate" predicates: `cmp(best, candidate)` answers whether
//! `candidate` should replace `best` as the next element to place. The selection sort drives
//! them directly.

use chrono::NaiveDate;

use crate::config::{SortConfig, TieMode};
use crate::types::{rank, Direction, Incident, SortKey};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Substituted for any `discovered` value that doesn't parse. Sorts before every real date.
pub const SENTINEL_DATE: NaiveDate = NaiveDate::MIN;

/// Try Parse Discovered
///
/// Parse a date in exactly `YYYY-MM-DD` form. chrono alone also accepts signs, padding and short
/// fields, so the shape is checked first.
pub fn try_parse_discovered(raw: &str) -> Option<NaiveDate> {
	let bytes = raw.as_bytes();
	if bytes.len() != 10 {
		return None;
	}
	let shaped = bytes.iter().enumerate().all(|(i, b)| match i {
		4 | 7 => *b == b'-',
		_ => b.is_ascii_digit(),
	});
	if !shaped {
		return None;
	}
	NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Parse Discovered
///
/// Parse a `YYYY-MM-DD` date, silently falling back to `SENTINEL_DATE`.
pub fn parse_discovered(raw: &str) -> NaiveDate {
	try_parse_discovered(raw).unwrap_or(SENTINEL_DATE)
}

/// Compare Dates
///
/// Ascending picks the candidate only if it is strictly earlier. Descending picks it if it is
/// later, or (in `Reference` tie mode) equal.
pub fn compare_dates(best: &Incident, candidate: &Incident, config: &SortConfig) -> bool {
	let best = parse_discovered(&best.discovered);
	let candidate = parse_discovered(&candidate.discovered);
	let delta = best.signed_duration_since(candidate).num_days();
	match (config.direction, config.ties) {
		(Direction::Ascending, _) => delta > 0,
		(Direction::Descending, TieMode::Reference) => delta <= 0,
		(Direction::Descending, TieMode::Strict) => delta < 0,
	}
}

/// Compare Status
///
/// Ascending places low ranks (Done) first, descending places New first. Same tie handling as
/// `compare_dates`.
pub fn compare_status(best: &Incident, candidate: &Incident, config: &SortConfig) -> bool {
	let best = rank(&best.status);
	let candidate = rank(&candidate.status);
	match (config.direction, config.ties) {
		(Direction::Ascending, _) => best > candidate,
		(Direction::Descending, TieMode::Reference) => best <= candidate,
		(Direction::Descending, TieMode::Strict) => best < candidate,
	}
}

/// Selection Sort
///
/// In-place selection sort. For every position, scan the remainder for the element `cmp` judges
/// better than the current best and swap it in. Sequences of 0 or 1 elements are left alone.
pub fn selection_sort<F>(incidents: &mut [Incident], mut cmp: F)
where
	F: FnMut(&Incident, &Incident) -> bool,
{
	if incidents.len() <= 1 {
		return;
	}
	for i in 0..incidents.len() {
		let mut best = i;
		for j in i + 1..incidents.len() {
			if cmp(&incidents[best], &incidents[j]) {
				best = j;
			}
		}
		incidents.swap(i, best);
	}
}

/// Order
///
/// Take ownership of `incidents` and return them ordered per `config`. `SortKey::None` returns the
/// input untouched.
pub fn order(mut incidents: Vec<Incident>, config: &SortConfig) -> Vec<Incident> {
	match config.key {
		SortKey::None => log::debug!("No sort key, keeping input order"),
		SortKey::Discovered => {
			warn_unparseable(&incidents);
			selection_sort(&mut incidents, |a, b| compare_dates(a, b, config));
		}
		SortKey::Status => selection_sort(&mut incidents, |a, b| compare_status(a, b, config)),
	}
	incidents
}

fn warn_unparseable(incidents: &[Incident]) {
	for incident in incidents {
		if try_parse_discovered(&incident.discovered).is_none() {
			log::warn!(
				"Incident {}: unparseable discovered date '{}', sorting it as earliest",
				incident.id,
				incident.discovered
			);
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use rstest::*;

	fn incident(id: i64, discovered: &str, status: &str) -> Incident {
		Incident::new(id, "name", discovered, "description", status)
	}

	fn ids(incidents: &[Incident]) -> Vec<i64> {
		incidents.iter().map(|x| x.id).collect()
	}

	#[fixture]
	fn two() -> Vec<Incident> {
		vec![
			incident(1, "2023-05-01", "Done"),
			incident(2, "2023-01-01", "New"),
		]
	}

	#[fixture]
	fn mixed() -> Vec<Incident> {
		vec![
			incident(1, "2023-03-10", "In Progress"),
			incident(2, "2022-12-31", "Done"),
			incident(3, "2023-03-10", "New"),
			incident(4, "not a date", "Unknown"),
			incident(5, "2024-01-01", "New"),
			incident(6, "2023-01-15", "In Progress"),
			incident(7, "2023-01-15", "Done"),
		]
	}

	fn all_configs() -> Vec<SortConfig> {
		let mut configs = Vec::new();
		for key in [SortKey::Discovered, SortKey::Status] {
			for direction in [Direction::Ascending, Direction::Descending] {
				for ties in [TieMode::Strict, TieMode::Reference] {
					configs.push(SortConfig::new(key, direction).with_ties(ties));
				}
			}
		}
		configs
	}

	#[rstest]
	fn status_ascending_puts_done_first(two: Vec<Incident>) {
		let config = SortConfig::new(SortKey::Status, Direction::Ascending);
		assert_eq!(ids(&order(two, &config)), vec![1, 2]);
	}

	#[rstest]
	fn status_descending_puts_new_first(two: Vec<Incident>) {
		let config = SortConfig::new(SortKey::Status, Direction::Descending);
		assert_eq!(ids(&order(two, &config)), vec![2, 1]);
	}

	#[rstest]
	fn discovered_ascending_puts_earliest_first(two: Vec<Incident>) {
		let config = SortConfig::new(SortKey::Discovered, Direction::Ascending);
		assert_eq!(ids(&order(two, &config)), vec![2, 1]);
	}

	#[rstest]
	fn discovered_descending_puts_latest_first(two: Vec<Incident>) {
		let config = SortConfig::new(SortKey::Discovered, Direction::Descending);
		assert_eq!(ids(&order(two, &config)), vec![1, 2]);
	}

	#[rstest]
	fn no_key_keeps_input_order(mixed: Vec<Incident>) {
		let config = SortConfig::new(SortKey::None, Direction::Descending);
		assert_eq!(order(mixed.clone(), &config), mixed);
	}

	#[rstest]
	fn short_inputs_are_untouched() {
		for config in all_configs() {
			assert!(order(Vec::new(), &config).is_empty());
			let one = vec![incident(9, "garbage", "???")];
			assert_eq!(order(one.clone(), &config), one);
		}
	}

	#[rstest]
	fn status_adjacent_pairs_follow_direction(mixed: Vec<Incident>) {
		for ties in [TieMode::Strict, TieMode::Reference] {
			let asc = SortConfig::new(SortKey::Status, Direction::Ascending).with_ties(ties);
			let sorted = order(mixed.clone(), &asc);
			assert!(sorted.windows(2).all(|w| rank(&w[0].status) <= rank(&w[1].status)));

			let desc = SortConfig::new(SortKey::Status, Direction::Descending).with_ties(ties);
			let sorted = order(mixed.clone(), &desc);
			assert!(sorted.windows(2).all(|w| rank(&w[0].status) >= rank(&w[1].status)));
		}
	}

	#[rstest]
	fn discovered_adjacent_pairs_follow_direction(mixed: Vec<Incident>) {
		for ties in [TieMode::Strict, TieMode::Reference] {
			let asc = SortConfig::new(SortKey::Discovered, Direction::Ascending).with_ties(ties);
			let sorted = order(mixed.clone(), &asc);
			assert!(sorted
				.windows(2)
				.all(|w| parse_discovered(&w[0].discovered) <= parse_discovered(&w[1].discovered)));

			let desc = SortConfig::new(SortKey::Discovered, Direction::Descending).with_ties(ties);
			let sorted = order(mixed.clone(), &desc);
			assert!(sorted
				.windows(2)
				.all(|w| parse_discovered(&w[0].discovered) >= parse_discovered(&w[1].discovered)));
		}
	}

	#[rstest]
	fn unparseable_date_sorts_as_earliest(mixed: Vec<Incident>) {
		let config = SortConfig::new(SortKey::Discovered, Direction::Ascending);
		let sorted = order(mixed, &config);
		assert_eq!(sorted[0].id, 4);
		assert_eq!(parse_discovered("2023-02-30"), SENTINEL_DATE);
		assert_eq!(parse_discovered("2023-01-01T10:00:00"), SENTINEL_DATE);
	}

	#[rstest]
	#[case("2023-1-5")]
	#[case("23-01-05")]
	#[case(" 2023-01-05")]
	#[case("+2023-01-05")]
	#[case("2023/01/05")]
	#[case("2023-01-05 ")]
	fn loose_date_shapes_use_sentinel(#[case] raw: &str) {
		assert_eq!(try_parse_discovered(raw), None);
		assert_eq!(parse_discovered(raw), SENTINEL_DATE);
	}

	#[rstest]
	fn fixed_shape_date_parses() {
		assert_eq!(try_parse_discovered("2023-01-05"), NaiveDate::from_ymd_opt(2023, 1, 5));
	}

	#[rstest]
	fn loose_date_sorts_before_real_dates() {
		let incidents = vec![incident(1, "2023-1-5", "New"), incident(2, "2022-12-31", "New")];
		let config = SortConfig::new(SortKey::Discovered, Direction::Ascending);
		assert_eq!(ids(&order(incidents, &config)), vec![1, 2]);
	}

	#[rstest]
	fn strict_ordering_is_idempotent(mixed: Vec<Incident>) {
		for config in all_configs().into_iter().filter(|c| c.ties == TieMode::Strict) {
			let once = order(mixed.clone(), &config);
			let twice = order(once.clone(), &config);
			assert_eq!(once, twice, "{:?}", config);
		}
	}

	#[rstest]
	fn reference_descending_swaps_equal_keys() {
		let equal = vec![incident(1, "2023-01-01", "New"), incident(2, "2023-01-01", "New")];
		let reference =
			SortConfig::new(SortKey::Status, Direction::Descending).with_ties(TieMode::Reference);
		assert_eq!(ids(&order(equal.clone(), &reference)), vec![2, 1]);

		let reference =
			SortConfig::new(SortKey::Discovered, Direction::Descending).with_ties(TieMode::Reference);
		assert_eq!(ids(&order(equal.clone(), &reference)), vec![2, 1]);

		let strict = SortConfig::new(SortKey::Status, Direction::Descending);
		assert_eq!(ids(&order(equal, &strict)), vec![1, 2]);
	}

	#[rstest]
	fn ascending_keeps_equal_keys_in_place() {
		let equal = vec![incident(1, "2023-01-01", "Done"), incident(2, "2023-01-01", "Bogus")];
		for ties in [TieMode::Strict, TieMode::Reference] {
			let config = SortConfig::new(SortKey::Status, Direction::Ascending).with_ties(ties);
			assert_eq!(ids(&order(equal.clone(), &config)), vec![1, 2]);
		}
	}

	#[rstest]
	fn duplicate_ids_are_kept() {
		let dupes = vec![incident(1, "2023-02-01", "New"), incident(1, "2023-01-01", "Done")];
		let config = SortConfig::new(SortKey::Discovered, Direction::Ascending);
		let sorted = order(dupes, &config);
		assert_eq!(sorted.len(), 2);
		assert_eq!(sorted[0].discovered, "2023-01-01");
	}
}
