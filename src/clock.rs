//! Wall-clock helpers expressed in Unix milliseconds.

// std
use std::sync::atomic::{AtomicI64, Ordering};
// self
use crate::_prelude::*;

static HIGH_WATER: AtomicI64 = AtomicI64::new(i64::MIN);

/// Returns the current wall-clock time in milliseconds, rounded to the nearest millisecond.
///
/// Values never decrease within a process: if the system clock steps backwards the last
/// observed value is returned until the clock catches up.
pub fn current_millis() -> i64 {
	let now = wall_clock_millis();
	let previous = HIGH_WATER.fetch_max(now, Ordering::Relaxed);

	previous.max(now)
}

/// Reads the system clock without the monotonic guard.
pub fn wall_clock_millis() -> i64 {
	let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
	let millis = (nanos + 500_000).div_euclid(1_000_000);

	i64::try_from(millis).unwrap_or(i64::MAX)
}

/// Parses a caller-supplied millisecond timestamp.
///
/// Accepts integer, decimal, and exponent notation with surrounding whitespace; fractional
/// values are rounded to the nearest millisecond. Numbers beyond the `i64` range, including
/// exponent forms that overflow `f64`, saturate to `i64::MIN`/`i64::MAX`. Returns `None` for
/// blank, non-numeric, `inf`, or `NaN` input.
pub fn parse_millis(raw: &str) -> Option<i64> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}
	if let Ok(value) = trimmed.parse::<i64>() {
		return Some(value);
	}
	// `f64::from_str` also accepts "inf" and "NaN" spellings.
	if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
		return None;
	}

	let value = trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())?.round();

	if value >= i64::MAX as f64 {
		Some(i64::MAX)
	} else if value <= i64::MIN as f64 {
		Some(i64::MIN)
	} else {
		Some(value as i64)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn current_millis_tracks_wall_clock() {
		let before = wall_clock_millis();
		let observed = current_millis();
		let after = wall_clock_millis();

		assert!(observed >= before - 50, "{observed} drifted below {before}.");
		assert!(observed <= after + 50, "{observed} drifted above {after}.");
	}

	#[test]
	fn current_millis_never_decreases() {
		let mut last = current_millis();

		for _ in 0..1_000 {
			let next = current_millis();

			assert!(next >= last, "{next} < {last}.");

			last = next;
		}
	}

	#[test]
	fn parse_millis_accepts_numeric_forms() {
		assert_eq!(parse_millis("1700000000000"), Some(1_700_000_000_000));
		assert_eq!(parse_millis(" 42 "), Some(42));
		assert_eq!(parse_millis("-5"), Some(-5));
		assert_eq!(parse_millis("1.5e3"), Some(1_500));
		assert_eq!(parse_millis("10.6"), Some(11));
	}

	#[test]
	fn parse_millis_rejects_non_numeric() {
		assert_eq!(parse_millis(""), None);
		assert_eq!(parse_millis("   "), None);
		assert_eq!(parse_millis("yesterday"), None);
		assert_eq!(parse_millis("12abc"), None);
		assert_eq!(parse_millis("inf"), None);
		assert_eq!(parse_millis("NaN"), None);
		assert_eq!(parse_millis("-infinity"), None);
	}

	#[test]
	fn parse_millis_saturates_out_of_range_numbers() {
		assert_eq!(parse_millis("99999999999999999999"), Some(i64::MAX));
		assert_eq!(parse_millis("-99999999999999999999"), Some(i64::MIN));
		assert_eq!(parse_millis("9223372036854775807"), Some(i64::MAX));
		assert_eq!(parse_millis("1e400"), Some(i64::MAX));
		assert_eq!(parse_millis("-1e400"), Some(i64::MIN));
		assert_eq!(parse_millis("1e-400"), Some(0));
	}
}
