use serde::Serialize;

/// Characters kept on each side of the anchor by default; enough for a
/// multi-day itinerary.
pub const DEFAULT_CONTEXT_RADIUS: usize = 3000;

/// A borrowed slice of a corpus.
///
/// `start` and `end` are character offsets into the corpus, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextWindow<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,

    /// Whether the window is anchored on a query occurrence (false means prefix fallback)
    pub found: bool,
}

impl<'a> ContextWindow<'a> {
    /// The window text.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Window length in characters.
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Windowing with a fixed radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindower {
    radius: usize,
}

impl ContextWindower {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// See [`window`].
    pub fn window<'a>(&self, corpus: &'a str, query: &str) -> ContextWindow<'a> {
        window(corpus, query, self.radius)
    }
}

impl Default for ContextWindower {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_RADIUS)
    }
}

/// Slice `corpus` around the first case-insensitive occurrence of `query`.
///
/// Found at character offset `i`: characters `[i - radius, i + radius)`,
/// clipped to the corpus. Not found, or an empty query: the first `radius`
/// characters.
pub fn window<'a>(corpus: &'a str, query: &str, radius: usize) -> ContextWindow<'a> {
    let total = corpus.chars().count();

    match find_ignore_case(corpus, query) {
        Some(anchor) => {
            let start = anchor.saturating_sub(radius);
            let end = anchor.saturating_add(radius).min(total);
            ContextWindow {
                text: slice_chars(corpus, start, end),
                start,
                end,
                found: true,
            }
        }
        None => {
            let end = radius.min(total);
            ContextWindow {
                text: slice_chars(corpus, 0, end),
                start: 0,
                end,
                found: false,
            }
        }
    }
}

/// Character offset (in `haystack`) of the first case-insensitive match.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return None;
    }

    // Lowercasing can change the number of chars, so keep the originating
    // char index of every folded char.
    let mut folded = String::with_capacity(haystack.len());
    let mut origin = Vec::with_capacity(haystack.len());
    for (index, c) in haystack.chars().enumerate() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.push(index);
        }
    }

    let byte_offset = folded.find(&needle)?;
    let folded_index = folded[..byte_offset].chars().count();
    origin.get(folded_index).copied()
}

fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |char_index: usize| {
        text.char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(text.len())
    };

    let start_byte = byte_at(start);
    let end_byte = byte_at(end);
    &text[start_byte..end_byte]
}
