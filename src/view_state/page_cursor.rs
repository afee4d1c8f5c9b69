/// Direction for page navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

/// Current page of the open document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageCursor {
    index: usize,
    count: usize,
}

impl PageCursor {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Move one page, clamped at the document bounds
    ///
    /// Returns the new index, or `None` when the page did not change.
    pub fn step(&mut self, direction: NavDirection) -> Option<usize> {
        let target = match direction {
            NavDirection::Previous => self.index.checked_sub(1)?,
            NavDirection::Next => self.index + 1,
        };
        if target >= self.count {
            return None;
        }
        self.index = target;
        Some(target)
    }

    /// Text for the page indicator, 1-indexed
    pub fn label(&self) -> String {
        page_label(self.index, self.count)
    }
}

pub fn page_label(index: usize, total: usize) -> String {
    if total > 0 {
        format!("Page {} / {}", index + 1, total)
    } else {
        "- / -".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_on_first_page_stays() {
        let mut cursor = PageCursor::new(5);
        assert_eq!(cursor.step(NavDirection::Previous), None);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_next_clamps_at_last_page() {
        let mut cursor = PageCursor::new(3);
        assert_eq!(cursor.step(NavDirection::Next), Some(1));
        assert_eq!(cursor.step(NavDirection::Next), Some(2));
        assert_eq!(cursor.step(NavDirection::Next), None);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.step(NavDirection::Previous), Some(1));
    }

    #[test]
    fn test_empty_document() {
        let mut cursor = PageCursor::default();
        assert_eq!(cursor.count(), 0);
        assert_eq!(cursor.step(NavDirection::Next), None);
        assert_eq!(cursor.step(NavDirection::Previous), None);
        assert_eq!(cursor.label(), "- / -");
    }

    #[test]
    fn test_label_is_one_indexed() {
        let mut cursor = PageCursor::new(12);
        assert_eq!(cursor.label(), "Page 1 / 12");
        cursor.step(NavDirection::Next);
        assert_eq!(cursor.label(), "Page 2 / 12");
    }
}
