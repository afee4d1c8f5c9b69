use crate::text_map::geometry::PageRect;

/// Position of a word in reading order: block, then line, then word
///
/// Field order matters, the derived `Ord` compares block first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ReadingOrder {
    pub block: usize,
    pub line: usize,
    pub word: usize,
}

impl ReadingOrder {
    pub fn new(block: usize, line: usize, word: usize) -> Self {
        Self { block, line, word }
    }
}

/// A single word extracted from a PDF page
#[derive(Debug, Clone, PartialEq)]
pub struct PageWord {
    /// The word text, punctuation included
    pub text: String,
    /// Bounding box in page coordinate space
    pub bounds: PageRect,
    pub order: ReadingOrder,
}

impl PageWord {
    pub fn new(text: impl Into<String>, bounds: PageRect, order: ReadingOrder) -> Self {
        Self {
            text: text.into(),
            bounds,
            order,
        }
    }
}

/// Anything that can hand out the words of a page
pub trait WordSource {
    type Error;

    fn words(&self, page_index: usize) -> Result<Vec<PageWord>, Self::Error>;
}
