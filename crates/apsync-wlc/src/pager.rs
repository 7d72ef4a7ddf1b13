//! Pagination-aware output accumulator.
//!
//! The controller intersperses a literal `--More--` marker in the stream
//! whenever a full screen has been produced, then waits for a keystroke.
//! Because reads are arbitrary byte chunks, the marker can arrive split
//! across two chunks; the buffer therefore rescans a tail window of
//! `MORE_MARKER.len() - 1` characters from the previous feed.

/// The pagination sentinel the controller embeds in command output.
pub const MORE_MARKER: &str = "--More--";

/// The keystroke that resumes a paused page: a single space.
pub const CONTINUE_KEYSTROKE: &[u8] = b" ";

/// Accumulates raw command output and strips pagination markers.
#[derive(Debug, Default)]
pub struct PageBuffer {
    buf: String,
    /// Index up to which `buf` has already been scanned for markers.
    scanned: usize,
}

impl PageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk of raw output.
    ///
    /// Returns the number of pagination markers consumed from the stream,
    /// i.e. how many continuation keystrokes the caller owes the channel.
    /// Non-UTF-8 bytes are replaced lossily; the CLI banner and records are
    /// plain ASCII in practice.
    pub fn feed(&mut self, chunk: &[u8]) -> usize {
        self.buf.push_str(&String::from_utf8_lossy(chunk));

        // Back up far enough to catch a marker split across the chunk seam.
        let overlap = MORE_MARKER.len() - 1;
        let mut from = self.scanned.saturating_sub(overlap);
        while !self.buf.is_char_boundary(from) {
            from -= 1;
        }

        let mut stripped = 0;
        while let Some(pos) = self.buf[from..].find(MORE_MARKER) {
            let at = from + pos;
            self.buf.replace_range(at..at + MORE_MARKER.len(), "");
            from = at;
            stripped += 1;
        }

        self.scanned = self.buf.len();
        stripped
    }

    /// Total characters accumulated so far (markers already removed).
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the buffer, yielding the de-paginated output.
    pub fn into_output(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn passes_plain_output_through() {
        let mut pager = PageBuffer::new();
        assert_eq!(pager.feed(b"line one\nline two\n"), 0);
        assert_eq!(pager.into_output(), "line one\nline two\n");
    }

    #[test]
    fn strips_marker_within_a_single_chunk() {
        let mut pager = PageBuffer::new();
        assert_eq!(pager.feed(b"page one\n--More--page two\n"), 1);
        assert_eq!(pager.into_output(), "page one\npage two\n");
    }

    #[test]
    fn strips_marker_split_across_chunks() {
        let mut pager = PageBuffer::new();
        assert_eq!(pager.feed(b"page one\n--Mo"), 0);
        assert_eq!(pager.feed(b"re--page two\n"), 1);
        assert_eq!(pager.into_output(), "page one\npage two\n");
    }

    #[test]
    fn counts_multiple_markers_in_one_feed() {
        let mut pager = PageBuffer::new();
        assert_eq!(pager.feed(b"a--More--b--More--c"), 2);
        assert_eq!(pager.into_output(), "abc");
    }

    #[test]
    fn single_byte_feeds_still_catch_the_marker() {
        let mut pager = PageBuffer::new();
        let total: usize = b"x--More--y".iter().map(|b| pager.feed(&[*b])).sum();
        assert_eq!(total, 1);
        assert_eq!(pager.into_output(), "xy");
    }
}
