use crate::{
    comparable::ComparableVersion,
    error::VersionError,
    grammar,
    snapshot::{self, ANNOTATION_SEPARATOR, DIGIT_SEPARATOR, SNAPSHOT_VERSION},
};
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};
use tracing::{debug, trace};

/// A version decomposed into a release name, an alpha annotation, a digit group and a build
/// specifier, any of which may be absent.
///
/// A `VersionInfo` is created once, either by [parsing](VersionInfo::parse) a version string or
/// by [composing](VersionInfo::from_parts) it from parts, and is never modified afterwards.
/// Derived versions, such as the [next version](VersionInfo::next_version), are new values.
///
/// # Examples
///
/// ```
/// use relver::prelude::*;
///
/// let version = VersionInfo::parse("releaseNAME-RC-1.0.1-SNAPSHOT").unwrap();
/// assert_eq!(version.release_name(), Some("releaseNAME"));
/// assert_eq!(version.alpha_annotation(), Some("RC"));
/// assert_eq!(version.build_specifier(), Some("SNAPSHOT"));
/// assert_eq!(version.release_version_string(), "releaseNAME-RC-1.0.1");
///
/// let next = version.next_version().unwrap();
/// assert_eq!(next.snapshot_version_string(), "releaseNAME-RC-1.0.2-SNAPSHOT");
/// assert!(version < next);
/// ```
///
/// # Ordering
///
/// Versions are ordered by their version strings, not by their parts. There are two orderings:
///
/// - [VersionInfo::compare] is the release tooling comparison. If one version string extends the
///   other and the first extra character is not `-`, the longer one is greater, which keeps
///   `1.01.01` above `1.01`. Otherwise both strings are case-folded and compared segment by
///   segment: numbers numerically, qualifiers by rank (`alpha < beta < milestone < rc < snapshot
///   < release < sp`, then any other text), so `1.0-rc1 < 1.0` and `1.0-RC1` is equivalent to
///   `1.0-rc1`. `1.0` and `1.0-ga` are [equivalent](VersionInfo::equivalent) too. This
///   comparison is not transitive for every input: `1.0-ga` is equivalent to both `1.0` and
///   `1.00`, but `1.00` is greater than `1.0`.
/// - [Ord] is a total order for sorting and ordered collections. It agrees with
///   [VersionInfo::compare] on everyday versions and breaks ties by the case-folded version
///   string, so `==` holds exactly when the case-folded strings match (`1.0-RC1 == 1.0-rc1`, but
///   `1.0 != 1.0-ga`). [Hash] is consistent with it.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    version: String,
    release_name: Option<String>,
    alpha_annotation: Option<String>,
    digits: Option<Vec<String>>,
    build_specifier: Option<String>,
    comparable: ComparableVersion,
}

fn non_empty(part: &str) -> Option<String> {
    (!part.is_empty()).then(|| part.to_owned())
}

/// Joins the present, non-empty parts with `-`.
fn render(
    release_name: Option<&str>,
    alpha_annotation: Option<&str>,
    digits: Option<&[String]>,
    build_specifier: Option<&str>,
) -> String {
    let digits = digits.map(|digits| digits.join(DIGIT_SEPARATOR));
    [release_name, alpha_annotation, digits.as_deref(), build_specifier]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(ANNOTATION_SEPARATOR)
}

/// Adds one to a decimal digit string, keeping its width (`007` -> `008`) unless every digit is
/// a nine (`99` -> `100`). There is no upper bound.
fn increment_segment(segment: &str) -> Result<String, VersionError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::InvalidDigitSegment {
            segment: segment.to_owned(),
        });
    }

    let mut digits: Vec<char> = segment.chars().collect();
    for digit in digits.iter_mut().rev() {
        if *digit == '9' {
            *digit = '0';
        } else {
            *digit = char::from(*digit as u8 + 1);
            return Ok(digits.into_iter().collect());
        }
    }

    // carried out of the leftmost digit
    digits.insert(0, '1');
    Ok(digits.into_iter().collect())
}

/// Returns true if `longer` starts with `prefix` and continues with something other than `-`.
fn extends_without_separator(longer: &str, prefix: &str) -> bool {
    longer.len() > prefix.len()
        && longer.starts_with(prefix)
        && longer.as_bytes()[prefix.len()] != b'-'
}

impl VersionInfo {
    /// Parses a version string. Any string that is not blank is accepted; see the
    /// [crate documentation](crate#layout) for how it is split into parts.
    ///
    /// The version string is kept as given (including any surrounding whitespace) and is what
    /// [Display] writes back out.
    ///
    /// # Errors
    ///
    /// - If `version_str` is empty or only whitespace, returns [VersionError::Blank].
    pub fn parse(version_str: &str) -> Result<Self, VersionError> {
        if version_str.trim().is_empty() {
            return Err(VersionError::Blank);
        }

        let components = grammar::decompose(version_str);
        let version = Self {
            version: version_str.to_owned(),
            release_name: non_empty(components.release_name),
            alpha_annotation: non_empty(components.alpha_annotation),
            digits: grammar::split_digits(components.digits),
            build_specifier: non_empty(components.build_specifier),
            comparable: ComparableVersion::parse(version_str),
        };

        debug!(
            version = version_str,
            release_name = ?version.release_name,
            alpha_annotation = ?version.alpha_annotation,
            digits = ?version.digits,
            build_specifier = ?version.build_specifier,
            "parsed version"
        );

        Ok(version)
    }

    /// Composes a version from its parts. Empty strings and an empty digit list are treated as
    /// absent. The version string is the present parts joined with `-`, with the digits joined
    /// with `.`.
    ///
    /// ```
    /// use relver::VersionInfo;
    ///
    /// let version = VersionInfo::from_parts(
    ///     Some("apollo".into()),
    ///     None,
    ///     Some(vec!["2".into(), "07".into()]),
    ///     Some("SNAPSHOT".into()),
    /// );
    /// assert_eq!(version.to_string(), "apollo-2.07-SNAPSHOT");
    /// ```
    pub fn from_parts(
        release_name: Option<String>,
        alpha_annotation: Option<String>,
        digits: Option<Vec<String>>,
        build_specifier: Option<String>,
    ) -> Self {
        let release_name = release_name.filter(|part| !part.is_empty());
        let alpha_annotation = alpha_annotation.filter(|part| !part.is_empty());
        let digits = digits.filter(|digits| !digits.is_empty());
        let build_specifier = build_specifier.filter(|part| !part.is_empty());

        let version = render(
            release_name.as_deref(),
            alpha_annotation.as_deref(),
            digits.as_deref(),
            build_specifier.as_deref(),
        );

        Self {
            comparable: ComparableVersion::parse(&version),
            version,
            release_name,
            alpha_annotation,
            digits,
            build_specifier,
        }
    }

    /// Renders this version's release name, alpha annotation and digits followed by the given
    /// build specifier instead of its own.
    ///
    /// ```
    /// use relver::VersionInfo;
    ///
    /// let version = VersionInfo::parse("beta-4.1-nightly").unwrap();
    /// assert_eq!(version.render_with(Some("SNAPSHOT")), "beta-4.1-SNAPSHOT");
    /// assert_eq!(version.render_with(None), "beta-4.1");
    /// ```
    pub fn render_with(&self, build_specifier: Option<&str>) -> String {
        render(
            self.release_name.as_deref(),
            self.alpha_annotation.as_deref(),
            self.digits.as_deref(),
            build_specifier,
        )
    }

    /// The version string: the parsed input, or the rendering of the parts it was composed from.
    pub fn as_str(&self) -> &str {
        &self.version
    }

    /// The leading alphabetic token, such as a product or code name.
    pub fn release_name(&self) -> Option<&str> {
        self.release_name.as_deref()
    }

    /// The second alphabetic token, such as `RC` or `beta`.
    pub fn alpha_annotation(&self) -> Option<&str> {
        self.alpha_annotation.as_deref()
    }

    /// The segments of the digit group, as written (leading zeros included).
    pub fn digits(&self) -> Option<&[String]> {
        self.digits.as_deref()
    }

    /// Whatever follows the digit group, such as `SNAPSHOT`.
    pub fn build_specifier(&self) -> Option<&str> {
        self.build_specifier.as_deref()
    }

    /// Returns true if this is a development version: the version string ends with exactly
    /// `SNAPSHOT` (case-sensitive), or it is a timestamped snapshot build such as
    /// `1.0-20240102.030405-7`.
    ///
    /// This check is case-sensitive while [VersionInfo::release_version_string] strips
    /// `-snapshot` in any case, so `1.0-snapshot` is not a snapshot but its release version is
    /// still `1.0`.
    pub fn is_snapshot(&self) -> bool {
        snapshot::is_snapshot(&self.version)
    }

    /// Returns the version string without its development marker. The first of these that
    /// applies is used:
    ///
    /// 1. A timestamped snapshot (`<base>-<yyyyMMdd.HHmmss>-<n>`) becomes `<base>`.
    /// 2. A trailing `-SNAPSHOT`, in any case, is removed.
    /// 3. A bare `SNAPSHOT` becomes `1.0`.
    /// 4. Otherwise, the version string is returned unchanged.
    ///
    /// ```
    /// use relver::VersionInfo;
    ///
    /// let version = VersionInfo::parse("releaseCandidateOrName-1.0.1-SNAPSHOT").unwrap();
    /// assert_eq!(version.release_version_string(), "releaseCandidateOrName-1.0.1");
    /// ```
    pub fn release_version_string(&self) -> &str {
        snapshot::release_form(&self.version)
    }

    /// Returns the [release version](VersionInfo::release_version_string) with `-SNAPSHOT`
    /// appended. A bare `SNAPSHOT` is returned as is.
    pub fn snapshot_version_string(&self) -> String {
        if self.version == SNAPSHOT_VERSION {
            return self.version.clone();
        }

        let release = self.release_version_string();
        let mut snapshot = String::with_capacity(
            release.len() + ANNOTATION_SEPARATOR.len() + SNAPSHOT_VERSION.len(),
        );
        if !release.is_empty() {
            snapshot.push_str(release);
            snapshot.push_str(ANNOTATION_SEPARATOR);
        }
        snapshot.push_str(SNAPSHOT_VERSION);
        snapshot
    }

    /// Returns a new version whose last digit segment is incremented by one. Zero-padding is kept
    /// (`007` becomes `008`) and every other part is carried over unchanged.
    ///
    /// The returned version's string is rendered from its parts, so separators are normalized to
    /// `-`.
    ///
    /// ```
    /// use relver::VersionInfo;
    ///
    /// let version = VersionInfo::parse("1.0.1").unwrap();
    /// let next = version.next_version().unwrap();
    /// assert_eq!(next.to_string(), "1.0.2");
    /// assert_eq!(next.snapshot_version_string(), "1.0.2-SNAPSHOT");
    /// ```
    ///
    /// # Errors
    ///
    /// - If this version has no digit group, returns [VersionError::NoDigitsToIncrement].
    /// - If the last digit segment is not made of ASCII digits (only possible for versions made
    ///   with [VersionInfo::from_parts]), returns [VersionError::InvalidDigitSegment].
    pub fn next_version(&self) -> Result<Self, VersionError> {
        let Some((last, leading)) = self.digits.as_deref().and_then(<[String]>::split_last) else {
            return Err(VersionError::NoDigitsToIncrement {
                version: self.version.clone(),
            });
        };

        let mut digits = leading.to_vec();
        digits.push(increment_segment(last)?);

        let next = Self::from_parts(
            self.release_name.clone(),
            self.alpha_annotation.clone(),
            Some(digits),
            self.build_specifier.clone(),
        );

        debug!(version = %self, next = %next, "incremented version");

        Ok(next)
    }

    /// The case-folded, normalized form used for ordering, e.g. `1.0.0-RC1` is `1-rc-1`.
    pub fn comparable_form(&self) -> String {
        self.comparable.canonical()
    }

    /// Compares two versions the way release tooling does; see [Ordering](VersionInfo#ordering).
    ///
    /// Unlike [Ord::cmp], this is not a total order, so do not sort with it.
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use relver::VersionInfo;
    ///
    /// let longer = VersionInfo::parse("1.01.01").unwrap();
    /// let shorter = VersionInfo::parse("1.01").unwrap();
    /// assert_eq!(longer.compare(&shorter), Ordering::Greater);
    /// ```
    pub fn compare(&self, other: &Self) -> Ordering {
        // plain segment comparison would put e.g. `1.01.01` below `1.01`
        if extends_without_separator(&self.version, &other.version) {
            trace!(a = %self, b = %other, "ordered by string prefix");
            return Ordering::Greater;
        }
        if extends_without_separator(&other.version, &self.version) {
            trace!(a = %self, b = %other, "ordered by string prefix");
            return Ordering::Less;
        }

        self.comparable.compare(&other.comparable)
    }

    /// Returns true if neither version is greater by [VersionInfo::compare], e.g. `1.0` and
    /// `1.0-ga`.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl FromStr for VersionInfo {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for VersionInfo {
    /// Writes the version string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

impl PartialOrd for VersionInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparable.cmp(&other.comparable)
    }
}

impl PartialEq for VersionInfo {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionInfo {}

impl Hash for VersionInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparable.hash(state);
    }
}
