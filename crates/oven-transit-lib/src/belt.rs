//! Belt identifiers for the three conveyor stages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of conveyor belts in the oven.
pub const BELT_COUNT: usize = 3;

/// One of the three conveyor belts, upstream first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeltId {
    Belt1,
    Belt2,
    Belt3,
}

impl BeltId {
    /// All belts in upstream-to-downstream order.
    pub const ALL: [BeltId; BELT_COUNT] = [BeltId::Belt1, BeltId::Belt2, BeltId::Belt3];

    /// Zero-based position of the belt, suitable for indexing per-belt arrays.
    pub const fn index(self) -> usize {
        match self {
            BeltId::Belt1 => 0,
            BeltId::Belt2 => 1,
            BeltId::Belt3 => 2,
        }
    }

    /// One-based belt number as printed on the oven.
    pub const fn number(self) -> usize {
        self.index() + 1
    }

    /// Resolve a zero-based index back into a belt.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| Error::UnknownBelt {
                name: index.to_string(),
            })
    }

    /// Stable key used by the anchor override store.
    pub const fn key(self) -> &'static str {
        match self {
            BeltId::Belt1 => "belt1",
            BeltId::Belt2 => "belt2",
            BeltId::Belt3 => "belt3",
        }
    }
}

impl fmt::Display for BeltId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "belt {}", self.number())
    }
}

impl FromStr for BeltId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let digits = normalized
            .strip_prefix("belt")
            .or_else(|| normalized.strip_prefix("tapis"))
            .unwrap_or(&normalized)
            .trim_start_matches(['-', '_', ' ']);
        match digits {
            "1" => Ok(BeltId::Belt1),
            "2" => Ok(BeltId::Belt2),
            "3" => Ok(BeltId::Belt3),
            _ => Err(Error::UnknownBelt {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_keys() {
        assert_eq!("1".parse::<BeltId>().unwrap(), BeltId::Belt1);
        assert_eq!("belt2".parse::<BeltId>().unwrap(), BeltId::Belt2);
        assert_eq!(" Belt-3 ".parse::<BeltId>().unwrap(), BeltId::Belt3);
        assert_eq!("tapis 2".parse::<BeltId>().unwrap(), BeltId::Belt2);
    }

    #[test]
    fn rejects_unknown_belts() {
        assert!(matches!(
            "4".parse::<BeltId>(),
            Err(Error::UnknownBelt { .. })
        ));
        assert!("".parse::<BeltId>().is_err());
        assert!(BeltId::from_index(3).is_err());
    }

    #[test]
    fn keys_and_indices_are_consistent() {
        for (i, belt) in BeltId::ALL.iter().enumerate() {
            assert_eq!(belt.index(), i);
            assert_eq!(BeltId::from_index(i).unwrap(), *belt);
            assert_eq!(belt.key().parse::<BeltId>().unwrap(), *belt);
        }
    }
}
