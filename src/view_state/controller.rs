use log::debug;

use crate::services::settings::Settings;
use crate::text_map::{PagePoint, PageRect, PageTextMap, Sentence, merge_into_bands, sentence_at};
use crate::view_state::highlight::{HighlightState, SentenceStep};
use crate::view_state::page_cursor::{NavDirection, PageCursor};
use crate::view_state::zoom::Zoom;

/// Bands to paint, already padded, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightBands {
    pub locked: Vec<PageRect>,
    pub hovered: Vec<PageRect>,
}

impl HighlightBands {
    pub fn is_empty(&self) -> bool {
        self.locked.is_empty() && self.hovered.is_empty()
    }
}

/// All view state of the reader: page, zoom, sentences and highlights
///
/// Input events map one-to-one onto methods here. The widget owns one of these
/// and only talks to GTK; everything testable lives on this side.
#[derive(Debug, Clone)]
pub struct ReaderController {
    cursor: PageCursor,
    zoom: Zoom,
    page: PageTextMap,
    highlight: HighlightState,
    line_merge_tolerance: f64,
    highlight_padding: f64,
}

impl Default for ReaderController {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl ReaderController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            cursor: PageCursor::default(),
            zoom: Zoom::from_settings(settings),
            page: PageTextMap::default(),
            highlight: HighlightState::default(),
            line_merge_tolerance: settings.line_merge_tolerance,
            highlight_padding: settings.highlight_padding,
        }
    }

    /// A document with `page_count` pages was opened; start at its first page
    pub fn document_opened(&mut self, page_count: usize) {
        self.cursor = PageCursor::new(page_count);
        self.clear_page();
    }

    pub fn document_closed(&mut self) {
        self.cursor = PageCursor::default();
        self.clear_page();
    }

    /// Drop the displayed page: no sentences, no highlight, zero size
    pub fn clear_page(&mut self) {
        self.page = PageTextMap::default();
        self.highlight.reset();
    }

    /// Move one page. On success the old sentences and highlights are gone
    /// and the caller must install the new page with [`Self::show_page`].
    pub fn turn_page(&mut self, direction: NavDirection) -> Option<usize> {
        let index = self.cursor.step(direction)?;
        self.clear_page();
        Some(index)
    }

    /// Install the sentences of the displayed page, resetting highlights
    pub fn show_page(&mut self, page: PageTextMap) {
        debug!(
            "Page {} has {} sentences, {} words",
            page.page_index,
            page.sentence_count(),
            page.sentences.iter().map(Sentence::word_count).sum::<usize>()
        );
        self.page = page;
        self.highlight.reset();
    }

    pub fn page_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn page_count(&self) -> usize {
        self.cursor.count()
    }

    pub fn page_label(&self) -> String {
        self.cursor.label()
    }

    /// Size of the displayed page in points, `(0.0, 0.0)` when none is shown
    pub fn page_size(&self) -> (f64, f64) {
        (self.page.page_width, self.page.page_height)
    }

    /// On-screen page size in widget pixels at the current zoom
    pub fn display_size(&self) -> (i32, i32) {
        let zoom = self.zoom.factor();
        let (width, height) = self.page_size();
        ((width * zoom).round() as i32, (height * zoom).round() as i32)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.page.sentences
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut Zoom {
        &mut self.zoom
    }

    /// Returns true when the highlight changed
    pub fn pointer_moved(&mut self, point: PagePoint) -> bool {
        if self.page.is_empty() {
            return false;
        }
        let hit = sentence_at(self.sentences(), point);
        self.highlight.hover(hit)
    }

    /// Returns true when the highlight changed
    pub fn pointer_pressed(&mut self, point: PagePoint) -> bool {
        let hit = sentence_at(self.sentences(), point);
        self.highlight.press(hit)
    }

    /// Move the locked sentence by keyboard
    ///
    /// Returns the bounding box of the newly locked sentence so the view can
    /// scroll to it, or `None` when the page has no sentences.
    pub fn step_sentence(&mut self, step: SentenceStep) -> Option<PageRect> {
        let index = self
            .highlight
            .step_lock(step, self.page.sentence_count())?;
        self.page.sentence(index)?.bounding_box()
    }

    pub fn locked_sentence(&self) -> Option<&Sentence> {
        self.page.sentence(self.highlight.locked()?)
    }

    pub fn hovered_sentence(&self) -> Option<&Sentence> {
        self.page.sentence(self.highlight.hovered()?)
    }

    /// Merged, padded bands for the current highlight state
    pub fn highlight_bands(&self) -> HighlightBands {
        let (locked, hovered) = self.highlight.layers();
        HighlightBands {
            locked: self.bands_for(locked),
            hovered: self.bands_for(hovered),
        }
    }

    fn bands_for(&self, index: Option<usize>) -> Vec<PageRect> {
        let Some(sentence) = index.and_then(|i| self.page.sentence(i)) else {
            return Vec::new();
        };
        merge_into_bands(&sentence.rects, self.line_merge_tolerance)
            .iter()
            .map(|band| band.padded(self.highlight_padding))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_map::{PageWord, ReadingOrder};

    /// Two lines: "The quick fox." on the first, "It ran away." wrapping onto the second
    fn sample_page(index: usize) -> PageTextMap {
        let words = [
            ("The", 10.0, 100.0),
            ("quick", 40.0, 100.0),
            ("fox.", 90.0, 100.0),
            ("It", 130.0, 100.0),
            ("ran", 10.0, 120.0),
            ("away.", 40.0, 120.0),
        ];
        let words = words
            .iter()
            .enumerate()
            .map(|(i, (text, x, y))| {
                let line = if *y > 100.0 { 1 } else { 0 };
                PageWord::new(
                    *text,
                    PageRect::new(*x, *y, x + 25.0, y + 12.0),
                    ReadingOrder::new(0, line, i),
                )
            })
            .collect();
        PageTextMap::from_words(index, 612.0, 792.0, words)
    }

    fn opened(pages: usize) -> ReaderController {
        let mut controller = ReaderController::default();
        controller.document_opened(pages);
        controller.show_page(sample_page(0));
        controller
    }

    #[test]
    fn test_quick_fox_highlights_as_one_band() {
        let mut controller = opened(1);
        assert!(controller.pointer_moved(PagePoint::new(50.0, 105.0)));
        assert_eq!(
            controller.hovered_sentence().map(|s| s.text.as_str()),
            Some("The quick fox.")
        );

        let bands = controller.highlight_bands();
        assert!(bands.locked.is_empty());
        assert_eq!(bands.hovered, vec![PageRect::new(8.0, 98.0, 117.0, 114.0)]);
    }

    #[test]
    fn test_wrapped_sentence_has_two_bands() {
        let mut controller = opened(1);
        assert!(controller.pointer_pressed(PagePoint::new(20.0, 125.0)));
        let bands = controller.highlight_bands();
        assert_eq!(bands.locked.len(), 2);
        assert!(bands.hovered.is_empty());
    }

    #[test]
    fn test_hover_same_sentence_is_not_a_change() {
        let mut controller = opened(1);
        assert!(controller.pointer_moved(PagePoint::new(20.0, 105.0)));
        assert!(!controller.pointer_moved(PagePoint::new(95.0, 105.0)));
        assert!(controller.pointer_moved(PagePoint::new(500.0, 500.0)));
        assert!(controller.hovered_sentence().is_none());
    }

    #[test]
    fn test_locked_dominates_hovered() {
        let mut controller = opened(1);
        controller.pointer_pressed(PagePoint::new(20.0, 105.0));
        controller.pointer_moved(PagePoint::new(20.0, 105.0));
        let bands = controller.highlight_bands();
        assert_eq!(bands.locked.len(), 1);
        assert!(bands.hovered.is_empty());
    }

    #[test]
    fn test_keyboard_navigation_returns_scroll_target() {
        let mut controller = opened(1);
        let target = controller.step_sentence(SentenceStep::Forward);
        assert_eq!(target, Some(PageRect::new(10.0, 100.0, 115.0, 112.0)));
        let target = controller.step_sentence(SentenceStep::Forward);
        assert_eq!(target, Some(PageRect::new(10.0, 100.0, 155.0, 132.0)));
        // clamped at the last sentence
        controller.step_sentence(SentenceStep::Forward);
        assert_eq!(controller.highlight.locked(), Some(1));
    }

    #[test]
    fn test_keyboard_navigation_without_sentences() {
        let mut controller = ReaderController::default();
        controller.document_opened(1);
        assert_eq!(controller.step_sentence(SentenceStep::Backward), None);
        assert!(controller.highlight.is_idle());
    }

    #[test]
    fn test_previous_on_first_page_keeps_sentences() {
        let mut controller = opened(5);
        controller.pointer_pressed(PagePoint::new(20.0, 105.0));
        assert_eq!(controller.turn_page(NavDirection::Previous), None);
        assert_eq!(controller.page_index(), 0);
        assert_eq!(controller.sentences().len(), 2);
        assert_eq!(controller.highlight.locked(), Some(0));
    }

    #[test]
    fn test_page_change_resets_state() {
        let mut controller = opened(5);
        controller.pointer_moved(PagePoint::new(20.0, 105.0));
        controller.pointer_pressed(PagePoint::new(20.0, 125.0));

        assert_eq!(controller.turn_page(NavDirection::Next), Some(1));
        assert!(controller.sentences().is_empty());
        assert!(controller.highlight.is_idle());

        controller.show_page(sample_page(1));
        assert_eq!(controller.page_size(), (612.0, 792.0));
        assert!(controller.highlight_bands().is_empty());
        assert_eq!(controller.page_label(), "Page 2 / 5");
    }

    #[test]
    fn test_display_size_follows_zoom() {
        let mut controller = opened(3);
        assert_eq!(controller.display_size(), (612, 792));
        controller.zoom_mut().set_factor(0.5);
        assert_eq!(controller.display_size(), (306, 396));
    }

    #[test]
    fn test_empty_document_shows_nothing() {
        let mut controller = opened(3);
        controller.document_opened(0);
        assert_eq!(controller.page_size(), (0.0, 0.0));
        assert_eq!(controller.display_size(), (0, 0));
        assert_eq!(controller.page_label(), "- / -");

        // fit-to-width has nothing to fit against
        let before = controller.zoom().factor();
        let (width, _) = controller.page_size();
        controller.zoom_mut().fit_to_width(1000.0, width);
        assert_eq!(controller.zoom().factor(), before);
    }

    #[test]
    fn test_clear_page_forgets_stale_page() {
        let mut controller = opened(3);
        controller.pointer_pressed(PagePoint::new(20.0, 105.0));
        controller.clear_page();
        assert_eq!(controller.display_size(), (0, 0));
        assert!(controller.sentences().is_empty());
        assert!(controller.highlight.is_idle());
        assert_eq!(controller.page_index(), 0);
    }

    #[test]
    fn test_close_document() {
        let mut controller = opened(3);
        controller.pointer_pressed(PagePoint::new(20.0, 105.0));
        controller.document_closed();
        assert_eq!(controller.page_count(), 0);
        assert_eq!(controller.page_label(), "- / -");
        assert!(controller.sentences().is_empty());
        assert!(controller.locked_sentence().is_none());
    }

    #[test]
    fn test_zoom_is_owned_by_controller() {
        let mut controller = opened(1);
        controller.zoom_mut().apply_wheel(120.0);
        assert!((controller.zoom().factor() - 1.1).abs() < 1e-9);
    }
}
