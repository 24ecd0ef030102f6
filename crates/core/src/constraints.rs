//! Semver range constraints and conflict detection.
//!
//! Every range expression is normalized into a union of version intervals.
//! Two or more expressions conflict when the intersection of their unions is
//! empty. Versions are ordered by SemVer 2.0 precedence; exclusive upper
//! bounds produced by caret, tilde and X-ranges sit at `X.Y.Z-0` so that
//! prereleases of the excluded release fall outside the range.
//!
//! Supported grammar:
//! - caret `^1.2.3`, tilde `~1.2.3`
//! - exact `1.2.3`, `=1.2.3`, `v1.2.3`
//! - comparators `>1.2.3`, `>=1.2`, `<2`, `<=1.2.x`
//! - X-ranges `1.x`, `1.2.*`, `*`, `latest`
//! - hyphen ranges `1.2.3 - 2.3`
//! - whitespace conjunction `>=1.2.0 <1.5.0` and `||` disjunction

use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Result type for range parsing.
pub type RangeResult<T> = Result<T, RangeError>;

/// Errors raised while parsing a range expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Empty version range")]
    Empty,

    #[error("Invalid version '{version}' in range '{range}'")]
    InvalidVersion { range: String, version: String },

    #[error("Invalid range expression '{0}'")]
    InvalidExpression(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Bound {
    Unbounded,
    Inclusive(Version),
    Exclusive(Version),
}

impl Bound {
    /// Rewrite an exclusive lower bound as the inclusive bound on the next
    /// version in precedence order: `>1.2.3` is `>=1.2.4-0` and `>1.2.3-rc`
    /// is `>=1.2.3-rc.0`.
    fn successor(&self) -> Bound {
        let Bound::Exclusive(version) = self else {
            return self.clone();
        };
        let next = if version.pre.is_empty() {
            version
                .patch
                .checked_add(1)
                .and_then(|patch| release_floor(version.major, version.minor, patch).ok())
        } else {
            Prerelease::new(&format!("{}.0", version.pre))
                .ok()
                .map(|pre| Version {
                    pre,
                    build: BuildMetadata::EMPTY,
                    ..version.clone()
                })
        };
        next.map_or_else(|| self.clone(), Bound::Inclusive)
    }
}

/// A contiguous set of versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    lower: Bound,
    upper: Bound,
}

impl Interval {
    fn any() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    fn none() -> Self {
        let zero = Version::new(0, 0, 0);
        Self {
            lower: Bound::Exclusive(zero.clone()),
            upper: Bound::Exclusive(zero),
        }
    }

    fn exact(version: Version) -> Self {
        Self {
            lower: Bound::Inclusive(version.clone()),
            upper: Bound::Inclusive(version),
        }
    }

    fn at_least(lower: Bound) -> Self {
        Self {
            lower,
            upper: Bound::Unbounded,
        }
    }

    fn below(upper: Bound) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper,
        }
    }

    fn between(lower: Version, upper: Version) -> Self {
        Self {
            lower: Bound::Inclusive(lower),
            upper: Bound::Exclusive(upper),
        }
    }

    /// True when no version lies inside the interval.
    pub fn is_empty(&self) -> bool {
        match (&self.lower.successor(), &self.upper) {
            (Bound::Unbounded, _) | (_, Bound::Unbounded) => false,
            (Bound::Inclusive(lo), Bound::Inclusive(hi)) => lo > hi,
            (Bound::Inclusive(lo), Bound::Exclusive(hi))
            | (Bound::Exclusive(lo), Bound::Inclusive(hi))
            | (Bound::Exclusive(lo), Bound::Exclusive(hi)) => lo >= hi,
        }
    }

    /// True when `version` lies inside the interval.
    pub fn contains(&self, version: &Version) -> bool {
        let above = match &self.lower {
            Bound::Unbounded => true,
            Bound::Inclusive(lo) => version >= lo,
            Bound::Exclusive(lo) => version > lo,
        };
        let below = match &self.upper {
            Bound::Unbounded => true,
            Bound::Inclusive(hi) => version <= hi,
            Bound::Exclusive(hi) => version < hi,
        };
        above && below
    }

    /// The overlap of two intervals (possibly empty).
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval {
            lower: tighter_lower(&self.lower, &other.lower),
            upper: tighter_upper(&self.upper, &other.upper),
        }
    }
}

fn tighter_lower(a: &Bound, b: &Bound) -> Bound {
    match (a, b) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other.clone(),
        (Bound::Inclusive(x) | Bound::Exclusive(x), Bound::Inclusive(y) | Bound::Exclusive(y)) => {
            match x.cmp(y) {
                Ordering::Greater => a.clone(),
                Ordering::Less => b.clone(),
                Ordering::Equal if matches!(a, Bound::Exclusive(_)) => a.clone(),
                Ordering::Equal => b.clone(),
            }
        }
    }
}

fn tighter_upper(a: &Bound, b: &Bound) -> Bound {
    match (a, b) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other.clone(),
        (Bound::Inclusive(x) | Bound::Exclusive(x), Bound::Inclusive(y) | Bound::Exclusive(y)) => {
            match x.cmp(y) {
                Ordering::Less => a.clone(),
                Ordering::Greater => b.clone(),
                Ordering::Equal if matches!(a, Bound::Exclusive(_)) => a.clone(),
                Ordering::Equal => b.clone(),
            }
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<0.0.0-0");
        }
        match (&self.lower, &self.upper) {
            (Bound::Unbounded, Bound::Unbounded) => f.write_str("*"),
            (Bound::Inclusive(lo), Bound::Inclusive(hi)) if lo == hi => write!(f, "={lo}"),
            (lower, upper) => {
                let lower = match lower {
                    Bound::Unbounded => None,
                    Bound::Inclusive(v) => Some(format!(">={v}")),
                    Bound::Exclusive(v) => Some(format!(">{v}")),
                };
                let upper = match upper {
                    Bound::Unbounded => None,
                    Bound::Inclusive(v) => Some(format!("<={v}")),
                    Bound::Exclusive(v) => Some(format!("<{v}")),
                };
                let parts: Vec<String> = lower.into_iter().chain(upper).collect();
                f.write_str(&parts.join(" "))
            }
        }
    }
}

/// A parsed range expression: a union of intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    intervals: Vec<Interval>,
}

impl VersionRange {
    /// Parse a range expression.
    ///
    /// # Errors
    ///
    /// Returns `RangeError` when the expression is empty, uses an unknown
    /// operator, or contains a version that cannot be parsed.
    pub fn parse(expression: &str) -> RangeResult<Self> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(RangeError::Empty);
        }

        let mut intervals = Vec::new();
        for alternative in expression.split("||") {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                return Err(RangeError::InvalidExpression(expression.to_string()));
            }
            let interval = parse_conjunction(alternative, expression)?;
            if !interval.is_empty() {
                intervals.push(interval);
            }
        }

        Ok(Self { intervals })
    }

    /// The range matching every version.
    pub fn any() -> Self {
        Self {
            intervals: vec![Interval::any()],
        }
    }

    /// True when no version satisfies the range.
    pub fn is_empty(&self) -> bool {
        self.intervals.iter().all(Interval::is_empty)
    }

    /// True when `version` satisfies the range.
    pub fn matches(&self, version: &Version) -> bool {
        self.intervals.iter().any(|interval| interval.contains(version))
    }

    /// Versions satisfying both ranges.
    pub fn intersect(&self, other: &VersionRange) -> VersionRange {
        let intervals = self
            .intervals
            .iter()
            .flat_map(|a| other.intervals.iter().map(move |b| a.intersect(b)))
            .filter(|interval| !interval.is_empty())
            .collect();
        VersionRange { intervals }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<0.0.0-0");
        }
        let parts: Vec<String> = self.intervals.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" || "))
    }
}

/// Intersect every range in `ranges`.
///
/// # Errors
///
/// Returns the first parse error encountered.
pub fn intersect_all<S: AsRef<str>>(ranges: &[S]) -> RangeResult<VersionRange> {
    ranges.iter().try_fold(VersionRange::any(), |acc, range| {
        Ok(acc.intersect(&VersionRange::parse(range.as_ref())?))
    })
}

/// True when no version satisfies every range in `ranges`.
///
/// A range that fails to parse counts as a conflict.
pub fn has_conflict<S: AsRef<str>>(ranges: &[S]) -> bool {
    match intersect_all(ranges) {
        Ok(range) => range.is_empty(),
        Err(_) => true,
    }
}

/// True when `version` satisfies `range`. Unparseable input never satisfies.
pub fn satisfies(version: &str, range: &str) -> bool {
    let Ok(version) = Version::parse(version.trim().trim_start_matches(['v', 'V'])) else {
        return false;
    };
    VersionRange::parse(range)
        .map(|range| range.matches(&version))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Caret,
    Tilde,
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A version with optional wildcard components, e.g. `1.2`, `1.x`, `*`.
#[derive(Debug, Clone)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn is_full(&self) -> bool {
        self.patch.is_some()
    }

    /// Lowest version matched, wildcards filled with zero.
    fn floor(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: BuildMetadata::EMPTY,
        }
    }
}

fn parse_conjunction(alternative: &str, expression: &str) -> RangeResult<Interval> {
    if let Some((from, to)) = alternative.split_once(" - ") {
        return hyphen_interval(from.trim(), to.trim(), expression);
    }

    let mut tokens: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;
    for token in alternative.split_whitespace() {
        if matches!(token, ">" | ">=" | "<" | "<=" | "=" | "^" | "~") {
            if pending_op.is_some() {
                return Err(RangeError::InvalidExpression(expression.to_string()));
            }
            pending_op = Some(token);
            continue;
        }
        match pending_op.take() {
            Some(op) => tokens.push(format!("{op}{token}")),
            None => tokens.push(token.to_string()),
        }
    }
    if pending_op.is_some() || tokens.is_empty() {
        return Err(RangeError::InvalidExpression(expression.to_string()));
    }

    let mut interval = Interval::any();
    for token in &tokens {
        interval = interval.intersect(&comparator_interval(token, expression)?);
    }
    Ok(interval)
}

fn split_operator(token: &str) -> (Option<Op>, &str) {
    // Two-character operators first.
    for (prefix, op) in [(">=", Op::Gte), ("<=", Op::Lte), ("~>", Op::Tilde)] {
        if let Some(rest) = token.strip_prefix(prefix) {
            return (Some(op), rest);
        }
    }
    for (prefix, op) in [
        ("^", Op::Caret),
        ("~", Op::Tilde),
        ("=", Op::Eq),
        (">", Op::Gt),
        ("<", Op::Lt),
    ] {
        if let Some(rest) = token.strip_prefix(prefix) {
            return (Some(op), rest);
        }
    }
    (None, token)
}

fn comparator_interval(token: &str, expression: &str) -> RangeResult<Interval> {
    if token.eq_ignore_ascii_case("latest") {
        return Ok(Interval::any());
    }

    let (op, raw) = split_operator(token);
    let partial = parse_partial(raw, expression)?;

    let Some(major) = partial.major else {
        // `*`, `>=*`, `^*` ... match everything; `>*` and `<*` match nothing.
        return Ok(match op {
            Some(Op::Gt | Op::Lt) => Interval::none(),
            _ => Interval::any(),
        });
    };

    let next = |value: u64| bump(value, raw, expression);
    let interval = match op.unwrap_or(Op::Eq) {
        Op::Eq if partial.is_full() => Interval::exact(partial.floor()),
        Op::Eq => x_range(&partial, major, raw, expression)?,
        Op::Caret => {
            let upper = match (major, partial.minor, partial.patch) {
                (0, Some(0), Some(patch)) => release_floor(0, 0, next(patch)?)?,
                (0, Some(minor), _) => release_floor(0, next(minor)?, 0)?,
                (major, _, _) => release_floor(next(major)?, 0, 0)?,
            };
            Interval::between(partial.floor(), upper)
        }
        Op::Tilde => x_range(&partial, major, raw, expression)?,
        Op::Gte => Interval::at_least(Bound::Inclusive(partial.floor())),
        Op::Gt => match (partial.minor, partial.patch) {
            (Some(_), Some(_)) => Interval::at_least(Bound::Exclusive(partial.floor())),
            (Some(minor), None) => {
                Interval::at_least(Bound::Inclusive(Version::new(major, next(minor)?, 0)))
            }
            (None, _) => Interval::at_least(Bound::Inclusive(Version::new(next(major)?, 0, 0))),
        },
        Op::Lt if partial.is_full() => Interval::below(Bound::Exclusive(partial.floor())),
        Op::Lt => Interval::below(Bound::Exclusive(release_floor(
            major,
            partial.minor.unwrap_or(0),
            0,
        )?)),
        Op::Lte => match (partial.minor, partial.patch) {
            (Some(_), Some(_)) => Interval::below(Bound::Inclusive(partial.floor())),
            (Some(minor), None) => {
                Interval::below(Bound::Exclusive(release_floor(major, next(minor)?, 0)?))
            }
            (None, _) => Interval::below(Bound::Exclusive(release_floor(next(major)?, 0, 0)?)),
        },
    };
    Ok(interval)
}

/// `X.Y.*` style span, also used for tilde: `[floor, next minor)` or
/// `[floor, next major)` when the minor is a wildcard.
fn x_range(partial: &Partial, major: u64, raw: &str, expression: &str) -> RangeResult<Interval> {
    let upper = match partial.minor {
        Some(minor) => release_floor(major, bump(minor, raw, expression)?, 0)?,
        None => release_floor(bump(major, raw, expression)?, 0, 0)?,
    };
    Ok(Interval::between(partial.floor(), upper))
}

fn hyphen_interval(from: &str, to_raw: &str, expression: &str) -> RangeResult<Interval> {
    let from = parse_partial(from, expression)?;
    let to = parse_partial(to_raw, expression)?;
    let next = |value: u64| bump(value, to_raw, expression);

    let lower = match from.major {
        Some(_) => Bound::Inclusive(from.floor()),
        None => Bound::Unbounded,
    };
    let upper = match (to.major, to.minor, to.patch) {
        (None, _, _) => Bound::Unbounded,
        (Some(_), Some(_), Some(_)) => Bound::Inclusive(to.floor()),
        (Some(major), Some(minor), None) => Bound::Exclusive(release_floor(major, next(minor)?, 0)?),
        (Some(major), None, _) => Bound::Exclusive(release_floor(next(major)?, 0, 0)?),
    };
    Ok(Interval { lower, upper })
}

/// The next value of a version component. A component already at `u64::MAX`
/// has no successor, so the range cannot be bounded and is rejected.
fn bump(value: u64, raw: &str, expression: &str) -> RangeResult<u64> {
    value.checked_add(1).ok_or_else(|| RangeError::InvalidVersion {
        range: expression.to_string(),
        version: raw.to_string(),
    })
}

/// The lowest possible version with the given release triple (`X.Y.Z-0`).
fn release_floor(major: u64, minor: u64, patch: u64) -> RangeResult<Version> {
    let pre = Prerelease::new("0").map_err(|_| RangeError::InvalidVersion {
        range: String::new(),
        version: format!("{major}.{minor}.{patch}-0"),
    })?;
    Ok(Version {
        major,
        minor,
        patch,
        pre,
        build: BuildMetadata::EMPTY,
    })
}

fn parse_partial(raw: &str, expression: &str) -> RangeResult<Partial> {
    let invalid = || RangeError::InvalidVersion {
        range: expression.to_string(),
        version: raw.to_string(),
    };

    let raw = raw.trim().trim_start_matches(['v', 'V']);
    if raw.is_empty() {
        return Err(invalid());
    }

    let core_end = raw.find(['-', '+']).unwrap_or(raw.len());
    let core = &raw[..core_end];
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }

    let mut numbers: [Option<u64>; 3] = [None; 3];
    let mut wildcard_seen = false;
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if matches!(*part, "x" | "X" | "*") {
            wildcard_seen = true;
            continue;
        }
        let value: u64 = part.parse().map_err(|_| invalid())?;
        if !wildcard_seen {
            *slot = Some(value);
        }
    }

    let pre = if core_end < raw.len() {
        if numbers.iter().any(Option::is_none) {
            return Err(invalid());
        }
        Version::parse(raw).map_err(|_| invalid())?.pre
    } else {
        Prerelease::EMPTY
    };

    let [major, minor, patch] = numbers;
    Ok(Partial {
        major,
        minor,
        patch,
        pre,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn range(s: &str) -> VersionRange {
        VersionRange::parse(s).unwrap()
    }

    #[test]
    fn test_tilde_ranges_on_different_minors_conflict() {
        assert!(has_conflict(&["~1.2.0", "~1.3.0"]));
    }

    #[test]
    fn test_caret_and_tilde_overlap() {
        assert!(!has_conflict(&["^1.2.0", "~1.2.5"]));
        let both = intersect_all(&["^1.2.0", "~1.2.5"]).unwrap();
        assert!(both.matches(&v("1.2.9")));
        assert!(!both.matches(&v("1.3.0")));
        assert!(!both.matches(&v("1.2.4")));
    }

    #[test]
    fn test_overlap_outside_common_sample_points() {
        // The only shared versions are 1.4.7..1.4.9, which a fixed
        // candidate list would likely miss.
        assert!(!has_conflict(&[">=1.4.7", "<1.4.10", "^1.0.0"]));
        assert!(has_conflict(&[">=1.4.7", "<1.4.7"]));
    }

    #[test]
    fn test_single_range_never_conflicts() {
        assert!(!has_conflict(&["^2.0.0"]));
        let empty: [&str; 0] = [];
        assert!(!has_conflict(&empty));
    }

    #[test]
    fn test_malformed_range_fails_closed() {
        assert!(has_conflict(&["^1.2.0", "not-a-version"]));
        assert!(has_conflict(&[""]));
        assert!(has_conflict(&["^1.2.0", ">= "]));
        assert!(matches!(
            VersionRange::parse("1.2.3.4"),
            Err(RangeError::InvalidVersion { .. })
        ));
        assert_eq!(VersionRange::parse("  "), Err(RangeError::Empty));
    }

    #[test]
    fn test_caret_semantics() {
        let r = range("^1.2.3");
        assert!(r.matches(&v("1.2.3")));
        assert!(r.matches(&v("1.99.0")));
        assert!(!r.matches(&v("2.0.0")));
        assert!(!r.matches(&v("2.0.0-alpha")));
        assert!(!r.matches(&v("1.2.2")));

        let zero_minor = range("^0.2.3");
        assert!(zero_minor.matches(&v("0.2.9")));
        assert!(!zero_minor.matches(&v("0.3.0")));

        let zero_patch = range("^0.0.3");
        assert!(zero_patch.matches(&v("0.0.3")));
        assert!(!zero_patch.matches(&v("0.0.4")));

        let partial = range("^1.2");
        assert!(partial.matches(&v("1.2.0")));
        assert!(partial.matches(&v("1.9.0")));
        assert!(!partial.matches(&v("2.0.0")));
    }

    #[test]
    fn test_tilde_semantics() {
        let r = range("~1.2.3");
        assert!(r.matches(&v("1.2.3")));
        assert!(r.matches(&v("1.2.99")));
        assert!(!r.matches(&v("1.3.0")));

        let major_only = range("~1");
        assert!(major_only.matches(&v("1.9.9")));
        assert!(!major_only.matches(&v("2.0.0")));
    }

    #[test]
    fn test_exact_pins() {
        assert!(has_conflict(&["1.2.3", "1.2.4"]));
        assert!(!has_conflict(&["1.2.3", "=1.2.3", "v1.2.3"]));
        assert!(!has_conflict(&["1.2.3", "^1.0.0"]));
        assert!(has_conflict(&["2.0.0", "^1.0.0"]));
    }

    #[test]
    fn test_comparators_and_conjunction() {
        let r = range(">=1.2.0 <1.5.0");
        assert!(r.matches(&v("1.4.9")));
        assert!(!r.matches(&v("1.5.0")));

        let spaced = range(">= 1.2.0 < 1.5.0");
        assert_eq!(spaced, r);

        assert!(range(">1.2").matches(&v("1.3.0")));
        assert!(!range(">1.2").matches(&v("1.2.9")));
        assert!(range("<=1.2").matches(&v("1.2.9")));
        assert!(!range("<=1.2").matches(&v("1.3.0")));
        assert!(!range("<1.2").matches(&v("1.2.0")));
        assert!(range(">1.2.3").matches(&v("1.2.4")));
        assert!(!range(">1.2.3").matches(&v("1.2.3")));
    }

    #[test]
    fn test_x_ranges_and_wildcards() {
        assert!(range("*").matches(&v("0.0.1")));
        assert!(range("latest").matches(&v("9.9.9")));
        assert!(range("1.x").matches(&v("1.7.0")));
        assert!(!range("1.x").matches(&v("2.0.0")));
        assert!(range("1.2.*").matches(&v("1.2.7")));
        assert!(!range("1.2.*").matches(&v("1.3.0")));
        assert!(has_conflict(&["1.x", "2.x"]));
        assert!(has_conflict(&[">*"]));
    }

    #[test]
    fn test_hyphen_ranges() {
        let r = range("1.2.3 - 2.3.4");
        assert!(r.matches(&v("1.2.3")));
        assert!(r.matches(&v("2.3.4")));
        assert!(!r.matches(&v("2.3.5")));

        let partial_upper = range("1.2.3 - 2.3");
        assert!(partial_upper.matches(&v("2.3.9")));
        assert!(!partial_upper.matches(&v("2.4.0")));
    }

    #[test]
    fn test_disjunction() {
        let r = range("^1.0.0 || ^3.0.0");
        assert!(r.matches(&v("1.5.0")));
        assert!(r.matches(&v("3.1.0")));
        assert!(!r.matches(&v("2.0.0")));

        assert!(!has_conflict(&["^1.0.0 || ^3.0.0", "~3.2.0"]));
        assert!(has_conflict(&["^1.0.0 || ^3.0.0", "^2.0.0"]));
        assert!(VersionRange::parse("^1.0.0 ||").is_err());
    }

    #[test]
    fn test_prerelease_ordering() {
        let r = range(">=1.0.0-beta.2 <1.0.0");
        assert!(r.matches(&v("1.0.0-beta.10")));
        assert!(!r.matches(&v("1.0.0-beta.1")));
        assert!(!r.matches(&v("1.0.0")));

        assert!(range("^1.2.3-rc.1").matches(&v("1.2.3")));
    }

    #[test]
    fn test_satisfies_helper() {
        assert!(satisfies("1.4.0", "^1.2.0"));
        assert!(satisfies("v1.4.0", "^1.2.0"));
        assert!(!satisfies("2.0.0", "^1.2.0"));
        assert!(!satisfies("garbage", "^1.2.0"));
        assert!(!satisfies("1.4.0", "garbage"));
    }

    #[test]
    fn test_exclusive_lower_bound_has_no_gap_below_next_patch() {
        assert!(has_conflict(&["^0.0.3", ">0.0.3"]));
        assert!(has_conflict(&[">1.2.3", "<1.2.4-0"]));
        assert!(!has_conflict(&[">1.2.3", "<1.2.4"]), "1.2.4-0 lies between");
        assert!(!has_conflict(&[">1.2.3", "<=1.2.4-0"]));
        assert!(!has_conflict(&["^0.0.3", ">=0.0.3"]));

        assert!(has_conflict(&[">1.0.0-rc", "<1.0.0-rc.0"]));
        assert!(!has_conflict(&[">1.0.0-rc", "<=1.0.0-rc.0"]));
    }

    #[test]
    fn test_component_at_u64_max_fails_closed() {
        assert!(has_conflict(&["^18446744073709551615.0.0"]));
        assert!(has_conflict(&["~1.18446744073709551615"]));
        assert!(has_conflict(&["<=1.18446744073709551615"]));
        assert!(has_conflict(&["1.0.0 - 18446744073709551615"]));
        assert!(matches!(
            VersionRange::parse("^18446744073709551615.0.0"),
            Err(RangeError::InvalidVersion { .. })
        ));

        // Exact and lower-bound forms never need a successor.
        assert!(!has_conflict(&["18446744073709551615.0.0"]));
        assert!(!has_conflict(&[">=1.18446744073709551615.0"]));
        assert!(!has_conflict(&[">1.2.18446744073709551615"]));
    }

    #[test]
    fn test_display_normalized_form() {
        assert_eq!(range("^1.2.0").to_string(), ">=1.2.0 <2.0.0-0");
        assert_eq!(range("1.2.3").to_string(), "=1.2.3");
        assert_eq!(range("*").to_string(), "*");
        assert_eq!(
            intersect_all(&["~1.2.0", "~1.3.0"]).unwrap().to_string(),
            "<0.0.0-0"
        );
    }
}
