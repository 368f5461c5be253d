//! Generic ordering of version strings, in the style of artifact repository comparators.
//!
//! A version string is case-folded and broken into a tree of items:
//!
//! - `.` ends an item in the current list.
//! - `-` ends an item and opens a nested list, as does a switch between letters and digits.
//! - An empty item (e.g. `1..2` or `1-`) is read as `0`.
//!
//! Items compare as follows:
//!
//! - integers numerically, at any width;
//! - qualifiers by rank: `alpha < beta < milestone < rc < snapshot < "" < sp`, with unknown
//!   qualifiers after all of those, lexicographically;
//! - integer > list > qualifier when the kinds differ;
//! - a missing item compares like an empty qualifier, so `1-alpha < 1 < 1-sp`, and a nested list
//!   against a missing item compares each of its items in turn.
//!
//! Trailing "null" items (`0`, `""` and empty lists) are dropped so that `1`, `1.0` and `1-ga`
//! are all equal.
//!
//! These rules are not transitive for every input (`1.sp > 1 > 1-alpha`, yet a nested list beats
//! a qualifier, so `1-alpha > 1.sp`), so [ComparableVersion::compare] cannot back [Ord]. The [Ord]
//! impl instead flattens the tree into a sort key of [SortToken]s, which agrees with
//! [ComparableVersion::compare] on everyday versions and is total for all of them.
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

/// Known qualifiers, lowest first. The empty string is a plain release.
const QUALIFIERS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

/// Position of the release qualifier (`""`) in [QUALIFIERS].
const RELEASE_INDEX: usize = 5;

const RELEASE_RANK: QualifierRank<'static> = QualifierRank::Known(RELEASE_INDEX);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum QualifierRank<'q> {
    Known(usize),
    Unknown(&'q str),
}

impl<'q> QualifierRank<'q> {
    fn of(qualifier: &'q str) -> Self {
        QUALIFIERS
            .iter()
            .position(|known| *known == qualifier)
            .map_or(QualifierRank::Unknown(qualifier), QualifierRank::Known)
    }
}

/// Case-folds a version string. Upper-casing first catches characters whose lower-case mapping
/// alone would miss an equivalence. Rust's case mappings use fixed Unicode tables and do not
/// depend on a locale.
pub(crate) fn fold_case(version_str: &str) -> String {
    version_str.to_uppercase().to_lowercase()
}

/// A non-negative integer of any width, kept as its decimal digits without leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Int(String);

impl Int {
    fn new(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Self(if trimmed.is_empty() { "0" } else { trimmed }.to_owned())
    }

    fn zero() -> Self {
        Self("0".to_owned())
    }

    fn is_zero(&self) -> bool {
        self.0 == "0"
    }
}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Self) -> Ordering {
        // no leading zeros, so a longer number is a larger one
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Int(Int),
    Qualifier(String),
    List(Vec<Item>),
}

impl Item {
    fn parse(is_digit: bool, text: &str) -> Self {
        if is_digit {
            Item::Int(Int::new(text))
        } else {
            Item::qualifier(text, false)
        }
    }

    /// Builds a qualifier, resolving aliases. A single `a`, `b` or `m` directly followed by a
    /// digit is shorthand for `alpha`, `beta` or `milestone`.
    fn qualifier(text: &str, followed_by_digit: bool) -> Self {
        let text = match (followed_by_digit, text) {
            (true, "a") => "alpha",
            (true, "b") => "beta",
            (true, "m") => "milestone",
            (_, "ga" | "final" | "release") => "",
            (_, "cr") => "rc",
            (_, other) => other,
        };
        Item::Qualifier(text.to_owned())
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Int(value) => value.is_zero(),
            Item::Qualifier(value) => value.is_empty(),
            Item::List(items) => items.is_empty(),
        }
    }

    /// Compares this item against another, or against nothing at all.
    fn compare(&self, other: Option<&Item>) -> Ordering {
        use Item::*;
        match (self, other) {
            (Int(value), None) => {
                if value.is_zero() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Int(a), Some(Int(b))) => a.cmp(b),
            (Int(_), Some(Qualifier(_) | List(_))) => Ordering::Greater,

            (Qualifier(value), None) => QualifierRank::of(value).cmp(&RELEASE_RANK),
            (Qualifier(_), Some(Int(_) | List(_))) => Ordering::Less,
            (Qualifier(a), Some(Qualifier(b))) => QualifierRank::of(a).cmp(&QualifierRank::of(b)),

            // every item counts, not just the first, so `1-0.5 > 1`
            (List(items), None) => compare_lists(items, &[]),
            (List(_), Some(Int(_))) => Ordering::Less,
            (List(_), Some(Qualifier(_))) => Ordering::Greater,
            (List(a), Some(List(b))) => compare_lists(a, b),
        }
    }
}

fn compare_lists(a: &[Item], b: &[Item]) -> Ordering {
    for idx in 0..a.len().max(b.len()) {
        let result = match (a.get(idx), b.get(idx)) {
            (Some(left), right) => left.compare(right),
            (None, Some(right)) => right.compare(None).reverse(),
            (None, None) => Ordering::Equal,
        };
        if result != Ordering::Equal {
            return result;
        }
    }
    Ordering::Equal
}

/// Drops trailing null items, stepping over (non-null) nested lists.
fn normalize(items: &mut Vec<Item>) {
    let mut idx = items.len();
    while idx > 0 {
        idx -= 1;
        if items[idx].is_null() {
            items.remove(idx);
        } else if !matches!(items[idx], Item::List(_)) {
            break;
        }
    }
}

/// How an item was reached: by a `.`, or as the first item of a nested list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Separator {
    Dot,
    Nested,
}

/// One item of a flattened sort key. Variants are ordered lowest first, and a key that runs out
/// is padded with [SortToken::Release].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortToken {
    /// `alpha` through `snapshot`, by rank.
    PreRelease(usize, Separator),
    /// A plain release: `0`, `""` or the end of the version.
    Release,
    ServicePack(Separator),
    Unknown(String, Separator),
    NestedInt(Int),
    Int(Int),
}

impl SortToken {
    fn of(item: &Item, separator: Separator) -> Option<Self> {
        let token = match item {
            Item::Int(value) if value.is_zero() => SortToken::Release,
            Item::Int(value) => match separator {
                Separator::Dot => SortToken::Int(value.clone()),
                Separator::Nested => SortToken::NestedInt(value.clone()),
            },
            Item::Qualifier(value) => match QualifierRank::of(value) {
                QualifierRank::Known(rank) => match rank.cmp(&RELEASE_INDEX) {
                    Ordering::Less => SortToken::PreRelease(rank, separator),
                    Ordering::Equal => SortToken::Release,
                    Ordering::Greater => SortToken::ServicePack(separator),
                },
                QualifierRank::Unknown(other) => SortToken::Unknown(other.to_owned(), separator),
            },
            Item::List(_) => return None,
        };
        Some(token)
    }
}

fn push_sort_key(items: &[Item], nested: bool, key: &mut Vec<SortToken>) {
    for (idx, item) in items.iter().enumerate() {
        let separator = if nested && idx == 0 {
            Separator::Nested
        } else {
            Separator::Dot
        };
        match item {
            Item::List(inner) => push_sort_key(inner, true, key),
            item => key.extend(SortToken::of(item, separator)),
        }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Int(value) => f.write_str(&value.0),
            Item::Qualifier(value) => f.write_str(value),
            Item::List(items) => write_items(f, items),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Item]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(if matches!(item, Item::List(_)) { "-" } else { "." })?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// The comparable form of a version string.
///
/// [Ord] orders by the sort key and then by the case-folded string, so two values are equal
/// exactly when their case-folded strings are. [ComparableVersion::compare] gives the looser
/// artifact repository ordering.
#[derive(Debug, Clone)]
pub(crate) struct ComparableVersion {
    folded: String,
    items: Vec<Item>,
    key: Vec<SortToken>,
}

impl ComparableVersion {
    pub(crate) fn parse(version_str: &str) -> Self {
        let version = fold_case(version_str);

        // every nested list is the last item of its parent, so the tree is a chain of levels
        let mut levels: Vec<Vec<Item>> = vec![Vec::new()];
        let mut is_digit = false;
        let mut start = 0;

        for (idx, c) in version.char_indices() {
            match c {
                '.' | '-' => {
                    let item = if idx == start {
                        Item::Int(Int::zero())
                    } else {
                        Item::parse(is_digit, &version[start..idx])
                    };
                    current(&mut levels).push(item);
                    start = idx + 1;
                    if c == '-' {
                        levels.push(Vec::new());
                    }
                }
                c if c.is_ascii_digit() => {
                    if !is_digit && idx > start {
                        current(&mut levels).push(Item::qualifier(&version[start..idx], true));
                        start = idx;
                        levels.push(Vec::new());
                    }
                    is_digit = true;
                }
                _ => {
                    if is_digit && idx > start {
                        current(&mut levels).push(Item::parse(true, &version[start..idx]));
                        start = idx;
                        levels.push(Vec::new());
                    }
                    is_digit = false;
                }
            }
        }

        if version.len() > start {
            current(&mut levels).push(Item::parse(is_digit, &version[start..]));
        }

        let mut items = levels.pop().unwrap_or_default();
        normalize(&mut items);
        while let Some(mut parent) = levels.pop() {
            parent.push(Item::List(items));
            normalize(&mut parent);
            items = parent;
        }

        let mut key = Vec::new();
        push_sort_key(&items, false, &mut key);

        Self {
            folded: version,
            items,
            key,
        }
    }

    /// The normalized form, e.g. `1-RC-1` and `1.0.0-rc1` are both `1-rc-1`.
    pub(crate) fn canonical(&self) -> String {
        self.to_string()
    }

    /// Compares item by item, the way artifact repositories order versions. `Equal` here does
    /// not imply `==`: `1`, `1.0` and `1-ga` are all equal by this comparison.
    pub(crate) fn compare(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }

    fn compare_keys(&self, other: &Self) -> Ordering {
        let len = self.key.len().max(other.key.len());
        fn token(key: &[SortToken], idx: usize) -> &SortToken {
            key.get(idx).unwrap_or(&SortToken::Release)
        }
        (0..len)
            .map(|idx| token(&self.key, idx).cmp(token(&other.key, idx)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn current(levels: &mut [Vec<Item>]) -> &mut Vec<Item> {
    levels
        .last_mut()
        .expect("the root level is never popped while parsing")
}

impl Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, &self.items)
    }
}

impl PartialEq for ComparableVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableVersion {}

impl Hash for ComparableVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl PartialOrd for ComparableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComparableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_keys(other)
            .then_with(|| self.folded.cmp(&other.folded))
    }
}
