//! registry/types.rs
//! Generic append-only registry table.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Same name registered twice in one category (startup-time failure).
    Duplicate { category: &'static str, name: String },
    /// No entry under this name.
    Unknown { category: &'static str, name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RegistryError::*;
        match self {
            Duplicate { category, name } =>
                write!(f, "{} registry already contains an entry named '{}'", category, name),
            Unknown { category, name } =>
                write!(f, "unknown source type '{}' (no entry in {} registry)", name, category),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Name -> entry table. Lookup is by exact name.
#[derive(Clone)]
pub struct Registry<F> {
    category: &'static str,
    entries: BTreeMap<String, F>,
}

impl<F: Copy> Registry<F> {
    pub fn new(category: &'static str) -> Self {
        Self { category, entries: BTreeMap::new() }
    }

    /// Insert `entry` under `name`. Existing entries are never overwritten.
    pub fn register(&mut self, name: &str, entry: F) -> Result<(), RegistryError> {
        if self.entries.contains_key(name) {
            return Err(RegistryError::Duplicate { category: self.category, name: name.to_string() });
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<F, RegistryError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::Unknown { category: self.category, name: name.to_string() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F> fmt::Debug for Registry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("category", &self.category)
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> u8 { 1 }
    fn two() -> u8 { 2 }

    #[test]
    fn duplicate_does_not_overwrite() {
        let mut r: Registry<fn() -> u8> = Registry::new("test");
        r.register("a", one).unwrap();
        let err = r.register("a", two).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate { category: "test", name: "a".into() });
        assert_eq!((r.get("a").unwrap())(), 1);
    }

    #[test]
    fn lookup_is_exact() {
        let mut r: Registry<fn() -> u8> = Registry::new("test");
        r.register("File", one).unwrap();
        assert!(r.get("file").is_err());
        assert!(r.get("File").is_ok());
    }
}
