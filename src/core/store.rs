/// Insertion-ordered string map backing the environment and alias stores.
///
/// Names are unique. Re-assigning a name updates its value in place, so the
/// entry keeps its original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderedStore {
    entries: Vec<(Box<str>, Box<str>)>,
}

impl OrderedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| &**key == name)
            .map(|(_, value)| &**value)
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(key, _)| &**key == name) {
            Some((_, existing)) => *existing = value.into(),
            None => self.entries.push((name.into(), value.into())),
        }
    }

    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(key, _)| &**key != name);
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (&**k, &**v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
