pub const DEFAULT_DELIMITERS: &[char] = &[' ', '\t'];

/// Splits `input` on any of `delimiters`, dropping empty pieces.
pub fn tokenize<'a>(input: &'a str, delimiters: &[char]) -> Vec<&'a str> {
    input
        .split(|c: char| delimiters.contains(&c))
        .filter(|word| !word.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delimiters() {
        assert_eq!(
            tokenize("  ls\t-l   /tmp ", DEFAULT_DELIMITERS),
            vec!["ls", "-l", "/tmp"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("", DEFAULT_DELIMITERS).is_empty());
        assert!(tokenize(" \t \t", DEFAULT_DELIMITERS).is_empty());
    }

    #[test]
    fn test_custom_delimiters() {
        assert_eq!(tokenize("/bin::/usr/bin:", &[':']), vec!["/bin", "/usr/bin"]);
    }

    #[test]
    fn test_no_quoting() {
        assert_eq!(
            tokenize("echo 'a b'", DEFAULT_DELIMITERS),
            vec!["echo", "'a", "b'"]
        );
    }
}
