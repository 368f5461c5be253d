//! # relver
//!
//! A library for parsing, ordering and bumping free-form release versions.
//!
//! Instead of validating versions against a scheme such as SemVer, relver splits whatever version
//! string a project happens to use into a few loosely defined parts, and derives release,
//! snapshot and next versions from them. It is meant for release tooling that needs to move a
//! project from `1.0.1-SNAPSHOT` to `1.0.1` and on to `1.0.2-SNAPSHOT`, whatever the project's
//! naming habits.
//!
//! ## Examples
//!
//! Get the release and next development versions:
//!
//! ```
//! use relver::prelude::*;
//!
//! let current = VersionInfo::parse("releaseNAME-releaseCandidate-1.0.1-SNAPSHOT").unwrap();
//! assert_eq!(current.release_version_string(), "releaseNAME-releaseCandidate-1.0.1");
//!
//! let next = current.next_version().unwrap();
//! assert_eq!(next.snapshot_version_string(), "releaseNAME-releaseCandidate-1.0.2-SNAPSHOT");
//! ```
//!
//! Compare versions:
//!
//! ```
//! use relver::prelude::*;
//!
//! let rc: VersionInfo = "1.0-RC1".parse().unwrap();
//! assert_eq!(rc, "1.0-rc1".parse::<VersionInfo>().unwrap());
//! assert!(rc < "1.0".parse::<VersionInfo>().unwrap());
//!
//! let longer: VersionInfo = "1.01.01".parse().unwrap();
//! assert!(longer > "1.01".parse::<VersionInfo>().unwrap());
//!
//! // the same release, spelled differently
//! let ga: VersionInfo = "1.0-ga".parse().unwrap();
//! let plain: VersionInfo = "1.0".parse().unwrap();
//! assert!(ga.equivalent(&plain));
//! assert_ne!(ga, plain);
//! ```
//!
//! [VersionInfo::compare] and [VersionInfo::equivalent] follow release tooling conventions but
//! are not transitive for every input. [Ord] is a total order that agrees with them on everyday
//! versions, so sorting and ordered collections are safe.
//!
//! ## Layout
//!
//! A version string is read as four optional parts, in this order:
//!
//! | Part | Example | Description |
//! |---|---|---|
//! | Release name | `apollo` | A leading run of ASCII letters, such as a product or code name. |
//! | Alpha annotation | `RC` | A second run of ASCII letters, such as `RC` or `beta`. |
//! | Digits | `1.0.07` | Dot-separated numbers. Segments keep their zero-padding. |
//! | Build specifier | `SNAPSHOT` | Everything else, such as the `SNAPSHOT` development marker. |
//!
//! Each part may be preceded by a `-` or `_`. Letter runs and the digits are matched greedily, and
//! the build specifier takes whatever remains, so every non-blank string is a valid version. For
//! example, `apollo_RC-1.0.07-SNAPSHOT` has all four parts, while `1.0` only has digits.
//!
//! Some strings are ambiguous: `beta-1.0` has a release name of `beta`, not an alpha annotation,
//! because the release name comes first.
//!
//! ## Snapshots
//!
//! A version is a snapshot (a development version) if it ends with `SNAPSHOT`, matched
//! case-sensitively, or if it is a timestamped snapshot build like `1.0-20240102.030405-7`.
//! Computing the release version removes a trailing `-SNAPSHOT` in any case, though, so
//! `1.0-snapshot` is not a snapshot but releases as `1.0`.
//!
//! ## Prelude
//!
//! relver provides a prelude module for convenience. It contains everything needed to interact
//! with the library.
//!
//! Use it with:
//!
//! ```
//! use relver::prelude::*;
//! ```
#![warn(missing_docs)]

mod comparable;
mod error;
mod grammar;
mod snapshot;
mod version;

pub use crate::error::VersionError;
pub use crate::snapshot::{ANNOTATION_SEPARATOR, DIGIT_SEPARATOR, SNAPSHOT_VERSION};
pub use crate::version::VersionInfo;

/// A convenience module appropriate for glob imports (`use relver::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::VersionError;
    #[doc(no_inline)]
    pub use crate::VersionInfo;
    #[doc(no_inline)]
    pub use crate::SNAPSHOT_VERSION;
}
