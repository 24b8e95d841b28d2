// ── Object identifiers ──
//
// Dotted numeric paths naming nodes in an agent's management tree.
// Containment is decided over parsed integer segments, never over text,
// so `.1.3.6.1.2` does not contain `.1.3.6.1.22`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::Error;

/// Textual alias some agents and tools print for the leading global-root arc.
const ISO_ALIAS: &str = "iso";
const ISO_ARC: u64 = 1;

/// A dotted numeric path such as `.1.3.6.1.4.1.22425.10.4.5.0`.
///
/// Ordering is lexicographic over segments, which matches the order an
/// SNMP walk returns entries in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Vec<u64>);

impl Identifier {
    pub fn new(segments: impl Into<Vec<u64>>) -> Self {
        Self(segments.into())
    }

    pub fn segments(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Final segment (the row index for table columns).
    pub fn last(&self) -> Option<u64> {
        self.0.last().copied()
    }

    /// `true` if `other` lies in the subtree rooted here (equal counts).
    pub fn contains(&self, other: &Identifier) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Identifier of the direct child with the given final segment.
    pub fn child(&self, segment: u64) -> Identifier {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }
}

impl From<&[u64]> for Identifier {
    fn from(segments: &[u64]) -> Self {
        Self(segments.to_vec())
    }
}

impl From<Vec<u64>> for Identifier {
    fn from(segments: Vec<u64>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Identifier {
    type Err = Error;

    /// Parses `.1.3.6`, `1.3.6`, or `iso.3.6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| Error::InvalidIdentifier {
            input: s.to_owned(),
            reason,
        };

        let trimmed = s.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(invalid("identifier is empty".into()));
        }

        body.split('.')
            .enumerate()
            .map(|(position, part)| match part {
                "" => Err(invalid(format!("empty segment at position {position}"))),
                ISO_ALIAS if position == 0 => Ok(ISO_ARC),
                digits => digits
                    .parse::<u64>()
                    .map_err(|e| invalid(format!("segment '{digits}': {e}"))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    #[test]
    fn parses_with_and_without_leading_dot() {
        assert_eq!(id(".1.3.6.1"), id("1.3.6.1"));
        assert_eq!(id(".1.3.6.1").segments(), &[1, 3, 6, 1]);
    }

    #[test]
    fn iso_alias_maps_to_global_root() {
        assert_eq!(id("iso.3.6.1.4.1.22425"), id(".1.3.6.1.4.1.22425"));
    }

    #[test]
    fn iso_alias_only_valid_in_first_position() {
        assert!("1.iso.3".parse::<Identifier>().is_err());
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        assert!("".parse::<Identifier>().is_err());
        assert!(".".parse::<Identifier>().is_err());
        assert!("1..3".parse::<Identifier>().is_err());
        assert!("1.3.x".parse::<Identifier>().is_err());
        assert!("1.3.-6".parse::<Identifier>().is_err());
    }

    #[test]
    fn display_uses_leading_dot() {
        assert_eq!(id("1.3.6.1.4.1.22425.10.4.5.0").to_string(), ".1.3.6.1.4.1.22425.10.4.5.0");
    }

    #[test]
    fn containment_is_segment_wise() {
        let root = id(".1.3.6.1.4.1.22425.10.5.3.5.1.2");
        assert!(root.contains(&id(".1.3.6.1.4.1.22425.10.5.3.5.1.2.0")));
        assert!(root.contains(&root));
        // Textual prefix, different segment.
        assert!(!root.contains(&id(".1.3.6.1.4.1.22425.10.5.3.5.1.22.0")));
        assert!(!root.contains(&id(".1.3.6.1.4.1.22425.10.5.3.5.1.3.0")));
        assert!(!root.contains(&id(".1.3.6.1.4.1.22425.10.5.3.5.1")));
    }

    #[test]
    fn ordering_follows_walk_order() {
        let mut ids = vec![id(".1.3.10"), id(".1.3.2.5"), id(".1.3.2")];
        ids.sort();
        assert_eq!(ids, vec![id(".1.3.2"), id(".1.3.2.5"), id(".1.3.10")]);
    }

    #[test]
    fn child_extends_by_one_segment() {
        let root = id(".1.3.6");
        let child = root.child(7);
        assert_eq!(child, id(".1.3.6.7"));
        assert!(root.contains(&child));
        assert_eq!(child.last(), Some(7));
    }

    #[test]
    fn serializes_as_dotted_string() {
        let json = serde_json::to_string(&id("1.3.6")).unwrap();
        assert_eq!(json, "\".1.3.6\"");
    }
}
