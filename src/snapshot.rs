//! Build-qualifier conventions: the `SNAPSHOT` marker and timestamped snapshot builds.
use regex::Regex;
use std::sync::LazyLock;

/// The build qualifier marking a development (unreleased) version.
pub const SNAPSHOT_VERSION: &str = "SNAPSHOT";

/// Joins the release name, alpha annotation, digit group and build specifier.
pub const ANNOTATION_SEPARATOR: &str = "-";

/// Joins the segments of the digit group.
pub const DIGIT_SEPARATOR: &str = ".";

/// The release form of a version consisting of nothing but the snapshot marker.
pub(crate) const BARE_SNAPSHOT_RELEASE: &str = "1.0";

/// A snapshot that was resolved to a concrete build: `<base>-<yyyyMMdd.HHmmss>-<build number>`.
/// Only ASCII digits count; `\d` would also match other scripts' digits.
static TIMESTAMPED_SNAPSHOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)-([0-9]{8}\.[0-9]{6})-([0-9]+)$")
        .expect("timestamped snapshot pattern is valid")
});

/// If `version_str` is a timestamped snapshot, returns its base version.
pub(crate) fn timestamped_base(version_str: &str) -> Option<&str> {
    TIMESTAMPED_SNAPSHOT
        .captures(version_str)
        .and_then(|caps| caps.get(1))
        .map(|base| base.as_str())
}

/// Returns `version_str` without its trailing `-SNAPSHOT`, compared ignoring ASCII case.
pub(crate) fn strip_snapshot_suffix(version_str: &str) -> Option<&str> {
    let suffix_len = ANNOTATION_SEPARATOR.len() + SNAPSHOT_VERSION.len();
    let split_at = version_str.len().checked_sub(suffix_len)?;
    let tail = version_str.as_bytes().get(split_at..)?;

    let is_snapshot_suffix = tail[..ANNOTATION_SEPARATOR.len()] == *ANNOTATION_SEPARATOR.as_bytes()
        && tail[ANNOTATION_SEPARATOR.len()..].eq_ignore_ascii_case(SNAPSHOT_VERSION.as_bytes());

    // a matching tail is pure ASCII, so `split_at` is a char boundary
    is_snapshot_suffix.then(|| &version_str[..split_at])
}

/// Returns true if `version_str` names a snapshot: it ends with the exact (case-sensitive)
/// [SNAPSHOT_VERSION] marker, or it is a timestamped snapshot build.
///
/// Note that stripping the marker in [release_form] ignores case, while this check does not.
pub(crate) fn is_snapshot(version_str: &str) -> bool {
    version_str.ends_with(SNAPSHOT_VERSION) || TIMESTAMPED_SNAPSHOT.is_match(version_str)
}

/// Computes the release form of a version string. The first rule that applies wins:
///
/// 1. a timestamped snapshot becomes its base version;
/// 2. a trailing `-SNAPSHOT` (any case) is removed;
/// 3. a bare `SNAPSHOT` becomes `1.0`;
/// 4. anything else is already a release.
pub(crate) fn release_form(version_str: &str) -> &str {
    if let Some(base) = timestamped_base(version_str) {
        base
    } else if let Some(base) = strip_snapshot_suffix(version_str) {
        base
    } else if version_str == SNAPSHOT_VERSION {
        BARE_SNAPSHOT_RELEASE
    } else {
        version_str
    }
}
