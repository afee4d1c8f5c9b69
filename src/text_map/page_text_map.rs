use pdfium_render::prelude::*;

use crate::text_map::geometry::PageRect;
use crate::text_map::segmenter::{Sentence, segment};
use crate::text_map::word_info::{PageWord, ReadingOrder, WordSource};

/// Threshold for considering words on the same line (as fraction of avg word height)
const LINE_GROUPING_THRESHOLD: f64 = 0.5;

/// Vertical gap between lines, in avg word heights, that starts a new block
const BLOCK_GAP_FACTOR: f64 = 1.0;

/// Sentences of a single PDF page, in page coordinate space
#[derive(Debug, Clone, Default)]
pub struct PageTextMap {
    /// Page index in the document
    pub page_index: usize,
    /// Page dimensions in PDF points
    pub page_width: f64,
    pub page_height: f64,
    pub sentences: Vec<Sentence>,
}

impl PageTextMap {
    pub fn from_words(
        page_index: usize,
        page_width: f64,
        page_height: f64,
        words: Vec<PageWord>,
    ) -> Self {
        Self {
            page_index,
            page_width,
            page_height,
            sentences: segment(words),
        }
    }

    /// Build the sentence map for one page from any word source
    pub fn build<S: WordSource>(
        source: &S,
        page_index: usize,
        page_width: f64,
        page_height: f64,
    ) -> Result<Self, S::Error> {
        let words = source.words(page_index)?;
        Ok(Self::from_words(page_index, page_width, page_height, words))
    }

    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Word source backed by an open pdfium document
pub struct PdfiumWordSource<'a, 'b> {
    document: &'a PdfDocument<'b>,
}

impl<'a, 'b> PdfiumWordSource<'a, 'b> {
    pub fn new(document: &'a PdfDocument<'b>) -> Self {
        Self { document }
    }
}

impl WordSource for PdfiumWordSource<'_, '_> {
    type Error = PdfiumError;

    fn words(&self, page_index: usize) -> Result<Vec<PageWord>, PdfiumError> {
        let page = self.document.pages().get(page_index as u16)?;
        page_words(&page)
    }
}

/// Extract whitespace-delimited words from a page, punctuation kept
pub fn page_words(page: &PdfPage) -> Result<Vec<PageWord>, PdfiumError> {
    let page_height = page.height().value as f64;
    let text_page = page.text()?;

    let mut char_data: Vec<CharData> = Vec::new();
    for char_obj in text_page.chars().iter() {
        let Some(unicode) = char_obj.unicode_char() else {
            continue;
        };
        // Generated spaces and line breaks often have no usable bounds
        let bounds = match char_obj.tight_bounds() {
            Ok(b) => to_page_rect(&b, page_height),
            Err(_) if unicode.is_whitespace() => PageRect::new(0.0, 0.0, 0.0, 0.0),
            Err(_) => continue,
        };
        char_data.push(CharData {
            char: unicode,
            bounds,
        });
    }

    Ok(assign_reading_order(extract_words(&char_data)))
}

/// PDF coordinates have the origin at bottom-left; flip to top-left
fn to_page_rect(bounds: &PdfRect, page_height: f64) -> PageRect {
    PageRect::new(
        bounds.left().value as f64,
        page_height - bounds.top().value as f64,
        bounds.right().value as f64,
        page_height - bounds.bottom().value as f64,
    )
}

/// Internal struct for character extraction
struct CharData {
    char: char,
    bounds: PageRect,
}

/// Word text and box before reading order is known
#[derive(Debug, Clone, PartialEq)]
struct RawWord {
    text: String,
    bounds: PageRect,
}

/// Split characters into words on whitespace, or where the text jumps to another line
fn extract_words(char_data: &[CharData]) -> Vec<RawWord> {
    let mut words: Vec<RawWord> = Vec::new();
    let mut current: Option<RawWord> = None;

    for char_info in char_data {
        if char_info.char.is_whitespace() || char_info.char.is_control() {
            words.extend(current.take());
            continue;
        }

        if let Some(word) = current.as_ref()
            && !on_same_line(&word.bounds, &char_info.bounds)
        {
            words.extend(current.take());
        }

        match current.as_mut() {
            Some(word) => {
                word.text.push(char_info.char);
                word.bounds = word.bounds.union(&char_info.bounds);
            }
            None => {
                current = Some(RawWord {
                    text: char_info.char.to_string(),
                    bounds: char_info.bounds,
                });
            }
        }
    }

    words.extend(current.take());
    words
}

fn on_same_line(a: &PageRect, b: &PageRect) -> bool {
    let height = a.height().max(b.height());
    (a.center_y() - b.center_y()).abs() <= height * LINE_GROUPING_THRESHOLD
}

/// Assign block/line/word indices
///
/// Blocks follow the content stream: a new block starts when the text jumps
/// upward (the next column) or leaves a vertical gap wider than
/// `BLOCK_GAP_FACTOR` average heights. Inside a block, words are grouped into
/// lines by center-y and numbered left to right, whatever order the PDF drew
/// them in.
fn assign_reading_order(raw: Vec<RawWord>) -> Vec<PageWord> {
    if raw.is_empty() {
        return Vec::new();
    }

    let avg_height = raw.iter().map(|w| w.bounds.height()).sum::<f64>() / raw.len() as f64;
    let line_threshold = avg_height * LINE_GROUPING_THRESHOLD;
    let block_gap = avg_height * BLOCK_GAP_FACTOR;

    let mut words = Vec::with_capacity(raw.len());
    for (block, block_words) in split_into_blocks(raw, line_threshold, block_gap)
        .into_iter()
        .enumerate()
    {
        for (line, mut line_words) in group_into_lines(block_words, line_threshold)
            .into_iter()
            .enumerate()
        {
            line_words.sort_by(|a, b| a.bounds.x0.total_cmp(&b.bounds.x0));
            for (index, word) in line_words.into_iter().enumerate() {
                let order = ReadingOrder::new(block, line, index);
                words.push(PageWord::new(word.text, word.bounds, order));
            }
        }
    }

    words
}

/// Cut the word stream into blocks, keeping stream order inside each block
fn split_into_blocks(raw: Vec<RawWord>, line_threshold: f64, block_gap: f64) -> Vec<Vec<RawWord>> {
    let mut blocks: Vec<Vec<RawWord>> = Vec::new();
    // Band of the line currently being read
    let mut band: Option<PageRect> = None;

    for word in raw {
        let center_y = word.bounds.center_y();
        let same_line =
            band.is_some_and(|line| (line.center_y() - center_y).abs() <= line_threshold);
        let new_block = match band {
            None => true,
            Some(line) => {
                !same_line && (center_y < line.y0 || word.bounds.y0 - line.y1 > block_gap)
            }
        };

        band = match band {
            Some(line) if same_line => Some(line.union(&word.bounds)),
            _ => Some(word.bounds),
        };

        match blocks.last_mut() {
            Some(block) if !new_block => block.push(word),
            _ => blocks.push(vec![word]),
        }
    }

    blocks
}

/// Group a block's words into lines by center-y proximity, top to bottom
fn group_into_lines(mut block: Vec<RawWord>, threshold: f64) -> Vec<Vec<RawWord>> {
    block.sort_by(|a, b| a.bounds.center_y().total_cmp(&b.bounds.center_y()));

    let mut lines: Vec<Vec<RawWord>> = Vec::new();
    let mut line_y: Option<f64> = None;

    for word in block {
        let center_y = word.bounds.center_y();
        let same_line = line_y.is_some_and(|y| (center_y - y).abs() <= threshold);
        match lines.last_mut() {
            Some(line) if same_line => line.push(word),
            _ => {
                line_y = Some(center_y);
                lines.push(vec![word]);
            }
        }
    }

    lines
}
