//! Class map loading and reverse lookup.
//!
//! The class map is the source of truth for decoding classifier output: a
//! JSON object mapping species names to dense integer indices, written at
//! training time. It is loaded once at startup and never reloaded.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Bijective mapping between species names and classifier output indices.
#[derive(Debug, Clone)]
pub struct ClassMap {
    forward: HashMap<String, usize>,
    // Reverse lookup table, index -> name. Dense by construction: loading
    // fails unless indices cover [0, n) exactly once.
    reverse: Vec<String>,
}

impl ClassMap {
    /// Load a class map from a JSON file of the form `{"lion": 0, ...}`.
    ///
    /// Fails if any index is duplicated, out of range, or missing; the
    /// classifier's output vector is addressed by these indices and a gap
    /// would silently shift every decoded label.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ClassMapRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let forward: HashMap<String, usize> =
            serde_json::from_str(&contents).map_err(|e| Error::ClassMapParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::from_forward(forward)
    }

    /// Build a class map from an already-parsed name-to-index mapping.
    pub fn from_forward(forward: HashMap<String, usize>) -> Result<Self> {
        if forward.is_empty() {
            return Err(Error::ClassMapInvalid {
                message: "class map is empty".to_string(),
            });
        }

        let n = forward.len();
        let mut reverse: Vec<Option<String>> = vec![None; n];

        for (name, &index) in &forward {
            let Some(slot) = reverse.get_mut(index) else {
                return Err(Error::ClassMapInvalid {
                    message: format!(
                        "index {index} for class '{name}' is out of range for {n} classes"
                    ),
                });
            };
            if let Some(existing) = slot {
                return Err(Error::ClassMapInvalid {
                    message: format!("index {index} is assigned to both '{existing}' and '{name}'"),
                });
            }
            *slot = Some(name.clone());
        }

        // Every slot is filled: len(forward) == n and no duplicates, so a
        // None here is unreachable, but the collect keeps that explicit.
        let reverse: Vec<String> = reverse
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| Error::ClassMapInvalid {
                    message: format!("no class assigned to index {i}"),
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self { forward, reverse })
    }

    /// Look up the name for a classifier output index.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.reverse.get(index).map(String::as_str)
    }

    /// Look up the output index for a class name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.forward.get(name).copied()
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// Whether the map is empty. Always false for a loaded map.
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Iterate over class names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.reverse.iter().map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_map() -> HashMap<String, usize> {
        HashMap::from([
            ("lion".to_string(), 0),
            ("tiger".to_string(), 1),
            ("elephant".to_string(), 2),
        ])
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"lion": 0, "tiger": 1, "elephant": 2}}"#).unwrap();

        let map = ClassMap::load(file.path()).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.name_of(1), Some("tiger"));
    }

    #[test]
    fn test_bijection_round_trip() {
        let map = ClassMap::from_forward(sample_map()).unwrap();
        for name in ["lion", "tiger", "elephant"] {
            let index = map.index_of(name).unwrap();
            assert_eq!(map.name_of(index), Some(name));
        }
        // Every index is covered exactly once, in index order.
        let covered: Vec<_> = map.names().collect();
        assert_eq!(covered.len(), 3);
        assert_eq!(covered[map.index_of("tiger").unwrap()], "tiger");
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let forward = HashMap::from([("lion".to_string(), 0), ("tiger".to_string(), 0)]);
        let result = ClassMap::from_forward(forward);
        assert!(matches!(result, Err(Error::ClassMapInvalid { .. })));
    }

    #[test]
    fn test_non_contiguous_index_rejected() {
        let forward = HashMap::from([("lion".to_string(), 0), ("tiger".to_string(), 2)]);
        let result = ClassMap::from_forward(forward);
        assert!(matches!(result, Err(Error::ClassMapInvalid { .. })));
    }

    #[test]
    fn test_empty_map_rejected() {
        let result = ClassMap::from_forward(HashMap::new());
        assert!(matches!(result, Err(Error::ClassMapInvalid { .. })));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = ClassMap::load(Path::new("/nonexistent/class_to_idx.json"));
        assert!(matches!(result, Err(Error::ClassMapRead { .. })));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = ClassMap::load(file.path());
        assert!(matches!(result, Err(Error::ClassMapParse { .. })));
    }
}
