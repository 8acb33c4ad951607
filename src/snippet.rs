//! Turns an offset range into a displayable [`CodeSnippet`].
//!
//! Offsets are UTF-8 byte offsets into the source, the unit swc spans are
//! measured in. Columns and lengths reported back are counted in characters.

use serde::Serialize;

/// Lines of context shown on each side of a match by default.
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// One place a feature was seen, with the lines around it.
///
/// Field order drives the derived ordering, so snippets of a feature sort by
/// position in the source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    /// 1-based.
    pub match_line: usize,
    /// 0-based, in characters.
    pub match_column: usize,
    pub match_length: usize,
    pub match_text: String,
    /// 1-based line number of the first line of `context_text`.
    pub context_start_line: usize,
    pub context_text: String,
}

/// Line index over a source text, built once per analysis.
pub struct SourceLines<'a> {
    text: &'a str,
    /// Byte offset each line starts at. Never empty.
    starts: Vec<usize>,
}
impl<'a> SourceLines<'a> {
    pub fn new(text: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, starts }
    }
    pub fn text(&self) -> &'a str {
        self.text
    }
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
    /// 0-based index of the line containing `offset`. Offsets past the end
    /// land on the last line.
    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset) - 1
    }
    /// End of line `line`, excluding its newline.
    fn line_end(&self, line: usize) -> usize {
        match self.starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        }
    }
    fn clamp(&self, mut offset: usize) -> usize {
        offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
    /// 1-based line and 0-based character column of `offset`.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let offset = self.clamp(offset);
        let line = self.line_of(offset);
        let column = self.text[self.starts[line]..offset].chars().count();
        (line + 1, column)
    }
    /// Moves `end` back over trailing whitespace, never before `start`.
    pub fn trim_end(&self, start: usize, end: usize) -> usize {
        let start = self.clamp(start);
        let end = self.clamp(end);
        match self.text.get(start..end) {
            Some(s) => start + s.trim_end().len(),
            None => end,
        }
    }
    /// Builds the snippet for `[start, end)` with `context` lines around it.
    pub fn snippet(&self, start: usize, end: usize, context: usize) -> CodeSnippet {
        let start = self.clamp(start);
        let end = self.clamp(end).max(start);
        let first = self.line_of(start);
        let last = self.line_of(end);
        let context_first = first.saturating_sub(context);
        let context_last = (last + context).min(self.starts.len() - 1);
        let match_text = &self.text[start..end];
        CodeSnippet {
            match_line: first + 1,
            match_column: self.text[self.starts[first]..start].chars().count(),
            match_length: match_text.chars().count(),
            match_text: match_text.to_owned(),
            context_start_line: context_first + 1,
            context_text: self.text[self.starts[context_first]..self.line_end(context_last)]
                .to_owned(),
        }
    }
}

/// Extracts the snippet for `[start, end)` of `text` with the default context.
pub fn extract(text: &str, start: usize, end: usize) -> CodeSnippet {
    SourceLines::new(text).snippet(start, end, DEFAULT_CONTEXT_LINES)
}
