use serde::Serialize;

/// Canonical form of a tag name: trimmed and lowercased.
pub fn normalize_tag(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Shared set of tag labels, kept in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagRegistry {
    names: Vec<String>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.add(name.as_ref());
        }
        registry
    }

    /// Registers a tag. Returns false for blank names and duplicates.
    pub fn add(&mut self, name: &str) -> bool {
        let name = normalize_tag(name);
        if name.is_empty() || self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let name = normalize_tag(name);
        let before = self.names.len();
        self.names.retain(|n| *n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_tag(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_normalizes_and_dedupes() {
        let mut registry = TagRegistry::new();
        assert!(registry.add("  Work "));
        assert!(!registry.add("work"));
        assert!(!registry.add("   "));
        assert_eq!(registry.as_slice(), ["work".to_string()]);
    }

    #[test]
    fn test_remove() {
        let mut registry = TagRegistry::from_names(["work", "important"]);
        assert!(registry.remove("WORK"));
        assert!(!registry.remove("work"));
        assert!(registry.contains("important"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let registry = TagRegistry::from_names(["zeta", "alpha", "mid"]);
        let names: Vec<&str> = registry.iter().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }
}
