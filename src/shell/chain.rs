//! Splitting of a raw line into chained command segments.

/// Operator joining a segment to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainOp {
    /// First segment of a line.
    #[default]
    Normal,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `;`
    Sequence,
}

impl ChainOp {
    /// Whether a segment joined by this operator runs after a segment that
    /// finished with `status`.
    pub fn should_run(self, status: i32) -> bool {
        match self {
            ChainOp::Normal | ChainOp::Sequence => true,
            ChainOp::And => status == 0,
            ChainOp::Or => status != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub op: ChainOp,
    pub text: &'a str,
}

impl Segment<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Drops a comment: a `#` at the start of the line or after whitespace, up to
/// the end of the line.
pub fn strip_comment(line: &str) -> &str {
    let mut prev: Option<char> = None;
    for (index, c) in line.char_indices() {
        if c == '#' && prev.map_or(true, char::is_whitespace) {
            return &line[..index];
        }
        prev = Some(c);
    }
    line
}

/// Lazy left-to-right scan producing segments. Empty segments are yielded as
/// well; callers skip them.
pub struct ChainParser<'a> {
    rest: &'a str,
    pending: ChainOp,
    done: bool,
}

impl<'a> ChainParser<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            rest: line,
            pending: ChainOp::Normal,
            done: false,
        }
    }
}

impl<'a> Iterator for ChainParser<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let op = self.pending;
        let mut chars = self.rest.char_indices().peekable();

        while let Some((index, c)) = chars.next() {
            let next_op = match c {
                '|' if matches!(chars.peek(), Some((_, '|'))) => Some((ChainOp::Or, 2)),
                '&' if matches!(chars.peek(), Some((_, '&'))) => Some((ChainOp::And, 2)),
                ';' => Some((ChainOp::Sequence, 1)),
                _ => None,
            };

            if let Some((next_op, width)) = next_op {
                let text = &self.rest[..index];
                self.rest = &self.rest[index + width..];
                self.pending = next_op;
                return Some(Segment { op, text });
            }
        }

        self.done = true;
        Some(Segment {
            op,
            text: self.rest,
        })
    }
}
