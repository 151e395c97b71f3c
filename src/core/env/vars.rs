use super::EnvError;
use crate::core::store::OrderedStore;
use std::borrow::Cow;
use std::env;

/// The session's environment. Children receive exactly [`EnvStore::snapshot`];
/// the interpreter's own process environment is never modified.
#[derive(Clone, Debug, Default)]
pub struct EnvStore {
    vars: OrderedStore,
}

impl EnvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store from the process environment.
    pub fn from_process() -> Self {
        let mut store = Self::new();
        for (key, value) in env::vars_os() {
            store
                .vars
                .insert(&key.to_string_lossy(), &value.to_string_lossy());
        }
        store
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.vars.get(name)
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::EmptyName);
        }
        if name.contains('=') {
            return Err(EnvError::InvalidName(name.to_string()));
        }

        self.vars.insert(name, value);
        Ok(())
    }

    pub fn unset(&mut self, name: &str) -> bool {
        self.vars.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter()
    }

    /// `name=value` strings in insertion order.
    pub fn snapshot(&self) -> Vec<String> {
        self.vars
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect()
    }

    /// Expands `$HOME` and `$PATH` against this store. Used for rc-file values.
    pub fn expand_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(value);

        for name in ["HOME", "PATH"] {
            let pattern = format!("${}", name);
            if result.contains(&pattern) {
                let replacement = self.lookup(name).unwrap_or_default();
                result = Cow::Owned(result.replace(&pattern, replacement));
            }
        }

        result
    }
}
