pub mod bands;
pub mod geometry;
pub mod page_text_map;
pub mod segmenter;
pub mod word_info;

pub use bands::{DEFAULT_LINE_MERGE_TOLERANCE, merge_into_bands};
pub use geometry::{PagePoint, PageRect};
pub use hit_test::sentence_at;
pub use page_text_map::{PageTextMap, PdfiumWordSource};
pub use segmenter::{Sentence, segment};
pub use word_info::{PageWord, ReadingOrder, WordSource};
