mod file_ops;

use std::{collections::VecDeque, io, path::PathBuf};

use self::file_ops::FileOps;

pub const HISTORY_MAX: usize = 4096;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub number: usize,
    pub command: String,
}

/// Entered lines, numbered from 1, capped at `max_entries` (oldest dropped).
pub struct History {
    entries: VecDeque<HistoryEntry>,
    file_ops: Option<FileOps>,
    max_entries: usize,
    next_number: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::in_memory(HISTORY_MAX)
    }
}

impl History {
    pub fn in_memory(max_entries: usize) -> Self {
        History {
            entries: VecDeque::new(),
            file_ops: None,
            max_entries,
            next_number: 1,
        }
    }

    /// Loads `history_file` if it exists; later [`History::save`] calls write back to it.
    pub fn load(history_file: PathBuf, max_entries: usize) -> io::Result<Self> {
        let file_ops = FileOps::new(history_file);
        let lines = file_ops.load_lines()?;

        let mut history = Self::in_memory(max_entries);
        for line in lines {
            history.push(&line);
        }
        history.file_ops = Some(file_ops);
        Ok(history)
    }

    /// Records `line` and returns its number.
    pub fn push(&mut self, line: &str) -> usize {
        let number = self.next_number;
        self.next_number += 1;
        self.entries.push_back(HistoryEntry {
            number,
            command: line.to_owned(),
        });
        self.trim_entries();
        number
    }

    /// The last `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries
            .iter()
            .skip(self.entries.len().saturating_sub(count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save(&self) -> io::Result<()> {
        let Some(file_ops) = &self.file_ops else {
            return Ok(());
        };

        file_ops.write_lines(self.entries.iter().map(|entry| entry.command.as_str()))?;
        tracing::debug!(path = %file_ops.path().display(), entries = self.entries.len(), "saved history");
        Ok(())
    }

    fn trim_entries(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(history: &History) -> Vec<(usize, &str)> {
        history
            .recent(history.len())
            .map(|e| (e.number, e.command.as_str()))
            .collect()
    }

    #[test]
    fn test_push_numbers_entries() {
        let mut history = History::default();
        assert_eq!(history.push("ls"), 1);
        assert_eq!(history.push("cd /"), 2);
        assert_eq!(commands(&history), vec![(1, "ls"), (2, "cd /")]);
    }

    #[test]
    fn test_trims_oldest() {
        let mut history = History::in_memory(2);
        for line in ["a", "b", "c"] {
            history.push(line);
        }
        assert_eq!(commands(&history), vec![(2, "b"), (3, "c")]);
    }

    #[test]
    fn test_recent_more_than_available() {
        let mut history = History::default();
        history.push("only");
        assert_eq!(history.recent(10).count(), 1);
        assert_eq!(history.recent(0).count(), 0);
    }

    #[test]
    fn test_save_and_load() -> Result<(), std::io::Error> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("history");

        let mut history = History::load(file.clone(), 3)?;
        assert!(history.is_empty());
        for line in ["one", "two", "three", "four"] {
            history.push(line);
        }
        history.save()?;

        let reloaded = History::load(file, 3)?;
        assert_eq!(
            commands(&reloaded),
            vec![(1, "two"), (2, "three"), (3, "four")]
        );
        Ok(())
    }
}
