//! Version precedence for dependency coordinates.
//!
//! Versions are split into numeric and qualifier items on `.`, `-`, `_` and
//! digit/letter transitions, so `1.10` sorts above `1.9` and `3.0-rc1` sorts
//! below `3.0`.

use crate::error::{DiscoveryError, Result};
use servicescope_api::DependencyCoordinate;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Number(u64),
    Qualifier(String),
}

/// Rank of well-known qualifiers relative to a plain release.
fn qualifier_rank(q: &str) -> Option<u8> {
    match q {
        "alpha" | "a" => Some(0),
        "beta" | "b" => Some(1),
        "milestone" | "m" => Some(2),
        "rc" | "cr" => Some(3),
        "snapshot" => Some(4),
        "" | "ga" | "final" | "release" => Some(5),
        "sp" => Some(6),
        _ => None,
    }
}

const RELEASE_RANK: u8 = 5;

fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    match (qualifier_rank(a), qualifier_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        // unknown qualifiers sort after every known one, then lexically
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Ordering of `item` against a missing item on the other side.
fn compare_to_absent(item: &Item) -> Ordering {
    match item {
        Item::Number(0) => Ordering::Equal,
        Item::Number(_) => Ordering::Greater,
        Item::Qualifier(q) => match qualifier_rank(q) {
            Some(rank) => rank.cmp(&RELEASE_RANK),
            None => Ordering::Greater,
        },
    }
}

/// A parsed version string that orders by precedence, not lexically.
#[derive(Debug, Clone)]
pub struct ArtifactVersion {
    raw: String,
    items: Vec<Item>,
}

impl ArtifactVersion {
    pub fn parse(raw: &str) -> Self {
        let mut items = Vec::new();
        let mut current = String::new();
        let mut digits = false;

        let flush = |current: &mut String, digits: bool, items: &mut Vec<Item>| {
            if current.is_empty() {
                return;
            }
            let item = if digits {
                // numbers beyond u64 only appear in broken metadata; keep them comparable
                current
                    .parse()
                    .map(Item::Number)
                    .unwrap_or_else(|_| Item::Qualifier(current.clone()))
            } else {
                Item::Qualifier(current.clone())
            };
            items.push(item);
            current.clear();
        };

        for c in raw.trim().to_lowercase().chars() {
            if matches!(c, '.' | '-' | '_' | '+') {
                flush(&mut current, digits, &mut items);
                continue;
            }
            let is_digit = c.is_ascii_digit();
            if !current.is_empty() && is_digit != digits {
                flush(&mut current, digits, &mut items);
            }
            digits = is_digit;
            current.push(c);
        }
        flush(&mut current, digits, &mut items);

        // 1.0.0 == 1.0 == 1, 1.0-final == 1.0
        while items
            .last()
            .is_some_and(|item| compare_to_absent(item) == Ordering::Equal)
        {
            items.pop();
        }

        Self {
            raw: raw.to_string(),
            items,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Ord for ArtifactVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        for i in 0..len {
            let ord = match (self.items.get(i), other.items.get(i)) {
                (Some(Item::Number(a)), Some(Item::Number(b))) => a.cmp(b),
                (Some(Item::Qualifier(a)), Some(Item::Qualifier(b))) => compare_qualifiers(a, b),
                (Some(Item::Number(_)), Some(Item::Qualifier(_))) => Ordering::Greater,
                (Some(Item::Qualifier(_)), Some(Item::Number(_))) => Ordering::Less,
                (Some(a), None) => compare_to_absent(a),
                (None, Some(b)) => compare_to_absent(b).reverse(),
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for ArtifactVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ArtifactVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ArtifactVersion {}

/// Picks the newest declared version of a module.
pub struct VersionResolver;

impl VersionResolver {
    /// Highest version among `candidates` with exactly this group and name.
    pub fn resolve(candidates: &[DependencyCoordinate], group: &str, name: &str) -> Result<String> {
        Self::newest(candidates, group, &[name])
            .map(|coordinate| coordinate.version.clone())
    }

    /// Newest coordinate whose group matches and whose name is any of `names`.
    ///
    /// Equal-precedence versions keep the one declared first.
    pub fn newest<'a, S: AsRef<str>>(
        candidates: &'a [DependencyCoordinate],
        group: &str,
        names: &[S],
    ) -> Result<&'a DependencyCoordinate> {
        let mut best: Option<(&DependencyCoordinate, ArtifactVersion)> = None;
        for coordinate in candidates
            .iter()
            .filter(|c| c.group == group && names.iter().any(|n| n.as_ref() == c.name))
        {
            let version = ArtifactVersion::parse(&coordinate.version);
            if best.as_ref().is_none_or(|(_, current)| version > *current) {
                best = Some((coordinate, version));
            }
        }

        best.map(|(coordinate, _)| coordinate).ok_or_else(|| {
            let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
            DiscoveryError::NotFound(format!(
                "no matching dependency declared for {}:{}",
                group,
                names.join("|")
            ))
        })
    }
}
