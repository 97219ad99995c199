use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of an item in the questionnaire forest, one child index per level.
///
/// Definition and response trees are paired by position, so the same path
/// addresses both. Displayed as dot-separated indices, e.g. `0.1`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub struct ItemPath(Vec<usize>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid item path '{0}': expected dot-separated indices such as 0.1")]
pub struct PathParseError(String);

impl ItemPath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Nesting depth; top-level items are at depth 0.
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// True when `self` equals `ancestor` or lies underneath it.
    pub fn starts_with(&self, ancestor: &ItemPath) -> bool {
        self.0.starts_with(&ancestor.0)
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for ItemPath {
    type Err = PathParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PathParseError(raw.to_string()));
        }
        trimmed
            .split('.')
            .map(|segment| segment.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| PathParseError(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let path = ItemPath::new(vec![0, 2, 1]);
        assert_eq!(path.to_string(), "0.2.1");
        assert_eq!("0.2.1".parse::<ItemPath>(), Ok(path));
    }

    #[test]
    fn rejects_malformed_paths() {
        assert!("".parse::<ItemPath>().is_err());
        assert!("0..1".parse::<ItemPath>().is_err());
        assert!("a".parse::<ItemPath>().is_err());
    }

    #[test]
    fn prefix_matching() {
        let parent = ItemPath::new(vec![1]);
        assert!(parent.child(0).starts_with(&parent));
        assert!(parent.starts_with(&parent));
        assert!(!ItemPath::new(vec![2, 0]).starts_with(&parent));
        assert_eq!(parent.child(3).depth(), 1);
    }
}
