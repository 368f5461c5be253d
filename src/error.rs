/// Errors that can occur when parsing or deriving versions.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum VersionError {
    /// The version string was empty or consisted only of whitespace.
    #[error("Unable to parse the version string: it is empty or blank")]
    Blank,

    /// [`VersionInfo::next_version`](crate::VersionInfo::next_version) was called on a version
    /// without a digit group.
    #[error("Version `{version}` has no digits to increment")]
    NoDigitsToIncrement {
        /// The version that could not be incremented.
        version: String,
    },

    /// The digit segment to increment was not made entirely of ASCII digits. Parsed versions never
    /// produce this; it can only come from versions composed with
    /// [`VersionInfo::from_parts`](crate::VersionInfo::from_parts).
    #[error("Digit segment `{segment}` should only contain ASCII digits")]
    InvalidDigitSegment {
        /// The offending segment.
        segment: String,
    },
}
