pub mod controller;
pub mod highlight;
pub mod page_cursor;
pub mod scroll;
pub mod zoom;

pub use controller::{HighlightBands, ReaderController};
pub use highlight::{HighlightState, SentenceStep};
pub use page_cursor::{NavDirection, PageCursor, page_label};
pub use scroll::{ENSURE_VISIBLE_MARGIN, anchored_scroll, ensure_visible, pan_scroll};
pub use zoom::{WHEEL_NOTCH_DELTA, Zoom};
