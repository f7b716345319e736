/// Label that opens every file's section in `stat` output.
pub const ENTITY_MARKER: &str = "File:";

/// Lazy iterator over the per-file blocks of a `stat` dump.
///
/// A block starts at the beginning of the text or at any line whose first
/// non-blank token is [`ENTITY_MARKER`]. Yielded blocks are trimmed and never
/// empty.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    rest: &'a str,
}

pub fn segment(text: &str) -> Blocks<'_> {
    Blocks { rest: text }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            let (block, rest) = self.rest.split_at(next_marker(self.rest));
            self.rest = rest;
            let block = block.trim();
            if !block.is_empty() {
                return Some(block);
            }
        }
        None
    }
}

/// Byte offset of the next marker line after the first line of `text`,
/// or `text.len()` if there is none.
fn next_marker(text: &str) -> usize {
    text.match_indices('\n')
        .map(|(i, _)| i + 1)
        .find(|&start| is_marker_line(&text[start..]))
        .unwrap_or(text.len())
}

fn is_marker_line(line: &str) -> bool {
    line.trim_start_matches(|c: char| c.is_whitespace() && c != '\n')
        .starts_with(ENTITY_MARKER)
}
