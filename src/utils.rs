use rustpython_ast::TextSize;

/// A utility struct to convert byte offsets to line numbers.
///
/// The parser reports positions as byte offsets, widgets and issues are
/// reported with 1-based line numbers.
pub struct LineIndex {
    /// Byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a `TextSize` (byte offset) to a 1-indexed line number.
    pub fn line_index(&self, offset: TextSize) -> usize {
        self.line_of(offset.to_usize())
    }

    /// Same as [`LineIndex::line_index`] for a plain byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Number of `\n`-separated segments, so a trailing newline counts as a line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_lookup() {
        let source = "import sys\n\nclass A:\n    pass\n";
        let index = LineIndex::new(source);

        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(5), 1);
        // start of "class A:"
        assert_eq!(index.line_of(12), 3);
        assert_eq!(index.line_of(source.len() - 1), 4);
    }

    #[test]
    fn test_line_count_matches_split() {
        for source in ["", "a", "a\n", "a\nb\n\n"] {
            let index = LineIndex::new(source);
            assert_eq!(index.line_count(), source.split('\n').count());
        }
    }
}
