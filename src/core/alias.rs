use super::store::OrderedStore;

#[derive(Clone, Debug, Default)]
pub struct AliasStore {
    aliases: OrderedStore,
}

impl AliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.aliases.get(name)
    }

    pub fn set(&mut self, name: &str, replacement: &str) {
        self.aliases.insert(name, replacement);
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.aliases.remove(name)
    }

    /// Entries in definition order, for `alias` listing.
    pub fn enumerate(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
