use std::collections::HashMap;

use super::TypedValue;

/// All settings of one namespace, keyed by setting key.
#[derive(Debug, Clone)]
pub struct NamespaceTable {
    namespace: String,
    entries: HashMap<String, TypedValue>,
}

impl NamespaceTable {
    fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            entries: HashMap::new(),
        }
    }

    /// The namespace every entry belongs to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Looks up one entry.
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.entries.get(key)
    }

    /// Iterates all entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &TypedValue> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two-level namespace/key store of settings.
///
/// Replacement is keyed purely on presence: setting a key that already
/// exists reports a replacement even when the value is identical.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    namespaces: HashMap<String, NamespaceTable>,
}

impl SettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a setting.
    ///
    /// Returns `true` if an entry already existed at that namespace and key.
    pub fn set(&mut self, value: TypedValue) -> bool {
        let table = self
            .namespaces
            .entry(value.namespace().to_string())
            .or_insert_with(|| NamespaceTable::new(value.namespace()));

        table
            .entries
            .insert(value.key().to_string(), value)
            .is_some()
    }

    /// Looks up a setting by namespace and key.
    pub fn get(&self, namespace: &str, key: &str) -> Option<&TypedValue> {
        self.namespaces.get(namespace)?.get(key)
    }

    /// Iterates every namespace table in no particular order.
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceTable> {
        self.namespaces.values()
    }

    /// Iterates the namespace tables matching any of `patterns`.
    ///
    /// See [`namespace_matches`] for the pattern rules.
    pub fn matching<'a, S: AsRef<str>>(
        &'a self,
        patterns: &'a [S],
    ) -> impl Iterator<Item = &'a NamespaceTable> {
        self.namespaces()
            .filter(move |table| namespace_matches(table.namespace(), patterns))
    }
}

/// Checks a namespace against a list of glob patterns.
///
/// An empty pattern list matches everything. Otherwise the namespace matches
/// if any pattern is empty, equals it exactly, or ends in `*` and the rest
/// of the pattern is a prefix of the namespace.
///
/// # Examples
/// * `"org.freedesktop.appearance"` matches `["org.freedesktop.*"]`
/// * `"org.freedesktop.appearance"` matches `[""]`
/// * `"org.freedesktop.appearance.extra"` does not match `["org.freedesktop.appearance"]`
pub fn namespace_matches<S: AsRef<str>>(namespace: &str, patterns: &[S]) -> bool {
    if patterns.is_empty() {
        return true;
    }

    patterns.iter().map(AsRef::as_ref).any(|pattern| {
        if pattern.is_empty() || pattern == namespace {
            return true;
        }

        pattern
            .strip_suffix('*')
            .is_some_and(|prefix| namespace.starts_with(prefix))
    })
}
