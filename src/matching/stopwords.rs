//! Query tokenization with a Vietnamese travel-sales stop-word list.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

/// Maximal runs of Unicode word characters (letters, marks, digits, connectors).
pub(crate) static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("Failed to compile word regex"));

/// Tokens shorter than this many characters are dropped.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Words that carry no signal about which tour a customer wants.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    // request fillers
    "tư", "vấn", "giúp", "tour", "muốn", "đi", "cần", "xin", "hỏi", "hãy", "tìm", "kiếm",
    "đặt", "book", "booking", "chuyến", "thông", "tin", "được", "không", "nhé", "nha", "với",
    "cho", "của", "những", "các", "này", "đó", "thì", "mà", "vậy", "rồi", "nào", "như",
    "thế", "về", "đến", "tới", "đang", "sẽ", "cũng", "hay", "hoặc", "khoảng", "tầm", "dưới",
    "trên", "từ", "vào", "dịp", "đợt", "lúc", "và", "là", "có", "gì", "giá", "bao", "nhiêu",
    "thích", "định", "sắp", "nữa", "thêm", "ạ", "ơi", "dạ", "vâng",
    // pronouns
    "tôi", "mình", "chúng", "bạn", "anh", "chị", "em", "họ", "ông", "bà", "quý", "khách",
    "người",
    // currency
    "đồng", "triệu", "nghìn", "ngàn", "trăm", "tỷ", "vnd", "vnđ", "usd", "tiền",
    // time
    "tháng", "ngày", "năm", "tuần", "đêm", "hôm", "nay", "mai", "sau", "trước",
];

/// An unordered, duplicate-free set of lowercase query tokens.
///
/// Backed by a `BTreeSet` so iteration order is the same for the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no token survived filtering.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership test.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Normalizes free text into a [`TokenSet`].
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl StopwordFilter {
    /// Create a filter with the built-in stop-word list.
    pub fn new() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS.iter().copied())
    }

    /// Create a filter with a custom stop-word list (entries are lowercased).
    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether a (lowercase) word is a stop word.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Lowercase `text`, split it into word runs and keep the meaningful ones.
    ///
    /// Dropped: stop words, tokens under [`MIN_TOKEN_CHARS`] characters, and
    /// tokens made only of digits (budgets and dates written as numbers).
    pub fn tokenize(&self, text: &str) -> TokenSet {
        let lowered = text.to_lowercase();

        WORD_REGEX
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|token| !token.chars().all(char::is_numeric))
            .filter(|token| !self.is_stopword(token))
            .map(str::to_string)
            .collect()
    }
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new()
    }
}
