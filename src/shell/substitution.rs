//! Alias and variable substitution.
//!
//! Aliases rewrite the leading word of a raw segment before it is tokenized.
//! Variables are replaced afterwards, one whole token at a time: `$?`, `$$`,
//! `$0` and `$NAME`. A token that merely contains one of them (`x$?y`) is
//! left alone, as is any `$NAME` the environment does not define.

use std::borrow::Cow;

use crate::core::alias::AliasStore;
use crate::core::env::EnvStore;

/// Values the variable pass draws from.
pub struct VarScope<'a> {
    pub status: i32,
    pub pid: u32,
    pub program_name: &'a str,
    pub env: &'a EnvStore,
}

/// Replaces the first word of `segment` with its alias, once.
pub fn expand_alias<'a>(segment: &'a str, aliases: &AliasStore, delimiters: &[char]) -> Cow<'a, str> {
    let trimmed = segment.trim_start_matches(|c: char| delimiters.contains(&c));
    let split_at = trimmed
        .find(|c: char| delimiters.contains(&c))
        .unwrap_or(trimmed.len());
    let (first, rest) = trimmed.split_at(split_at);

    match aliases.lookup(first) {
        Some(replacement) => {
            tracing::debug!(alias = first, replacement, "expanding alias");
            Cow::Owned(format!("{}{}", replacement, rest))
        }
        None => Cow::Borrowed(segment),
    }
}

pub fn expand_vars(words: &mut [String], scope: &VarScope<'_>) {
    for word in words.iter_mut() {
        if let Some(value) = lookup_var(word, scope) {
            *word = value;
        }
    }
}

fn lookup_var(word: &str, scope: &VarScope<'_>) -> Option<String> {
    match word {
        "$?" => Some(scope.status.to_string()),
        "$$" => Some(scope.pid.to_string()),
        "$0" => Some(scope.program_name.to_string()),
        _ => {
            let name = word.strip_prefix('$')?;
            if !is_var_name(name) {
                return None;
            }
            scope.env.lookup(name).map(str::to_string)
        }
    }
}

fn is_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
