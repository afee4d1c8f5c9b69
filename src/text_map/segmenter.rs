use crate::text_map::geometry::{PageRect, bounding_box};
use crate::text_map::word_info::PageWord;

const TERMINATORS: [char; 3] = ['.', '?', '!'];
const CLOSING_QUOTES: [char; 2] = ['"', '\''];

/// A run of words ending in terminal punctuation (or at the end of the page)
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// One rectangle per word, in reading order. Never empty.
    pub rects: Vec<PageRect>,
    /// Words joined by single spaces
    pub text: String,
}

impl Sentence {
    pub fn bounding_box(&self) -> Option<PageRect> {
        bounding_box(&self.rects)
    }

    pub fn word_count(&self) -> usize {
        self.rects.len()
    }
}

/// Accumulates words until a terminator closes the sentence
#[derive(Default)]
struct PendingSentence {
    rects: Vec<PageRect>,
    words: Vec<String>,
}

impl PendingSentence {
    fn push(&mut self, word: PageWord) {
        self.rects.push(word.bounds);
        self.words.push(word.text);
    }

    fn take(&mut self) -> Option<Sentence> {
        if self.rects.is_empty() {
            return None;
        }
        let rects = std::mem::take(&mut self.rects);
        let text = std::mem::take(&mut self.words).join(" ");
        Some(Sentence { rects, text })
    }
}

/// True when `text` ends in `.`, `?` or `!`, optionally followed by one closing quote
pub fn ends_sentence(text: &str) -> bool {
    let mut chars = text.chars().rev();
    match chars.next() {
        Some(c) if TERMINATORS.contains(&c) => true,
        Some(c) if CLOSING_QUOTES.contains(&c) => {
            chars.next().is_some_and(|c| TERMINATORS.contains(&c))
        }
        _ => false,
    }
}

/// Group a page's words into sentences
///
/// Words are sorted by reading order first. Every word lands in exactly one
/// sentence and the output preserves order.
pub fn segment(mut words: Vec<PageWord>) -> Vec<Sentence> {
    words.sort_by_key(|w| w.order);

    let mut sentences = Vec::new();
    let mut pending = PendingSentence::default();

    for word in words {
        let closes = ends_sentence(&word.text);
        pending.push(word);
        if closes {
            sentences.extend(pending.take());
        }
    }

    // Pages rarely end exactly on a terminator
    sentences.extend(pending.take());
    sentences
}
