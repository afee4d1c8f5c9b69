use crate::text_map::geometry::PageRect;

/// Default vertical tolerance, in points, for two rects to share a band
pub const DEFAULT_LINE_MERGE_TOLERANCE: f64 = 5.0;

/// Collapse a sentence's word rectangles into one band per visual line
///
/// Consecutive rectangles whose top and bottom edges both agree within
/// `tolerance` are unioned. A rectangle that does not line up with the
/// current band starts a new one, which is what happens when a sentence wraps.
pub fn merge_into_bands(rects: &[PageRect], tolerance: f64) -> Vec<PageRect> {
    rects.iter().fold(Vec::new(), |mut bands: Vec<PageRect>, rect| {
        match bands.last_mut() {
            Some(band) if band.vertically_aligned(rect, tolerance) => *band = band.union(rect),
            _ => bands.push(*rect),
        }
        bands
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = DEFAULT_LINE_MERGE_TOLERANCE;

    #[test]
    fn test_empty_input() {
        assert!(merge_into_bands(&[], TOL).is_empty());
    }

    #[test]
    fn test_single_rect_copied() {
        let r = PageRect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(merge_into_bands(&[r], TOL), vec![r]);
    }

    #[test]
    fn test_same_line_becomes_one_band() {
        let rects = [
            PageRect::new(10.0, 100.0, 35.0, 112.0),
            PageRect::new(40.0, 101.0, 75.0, 113.0),
            PageRect::new(80.0, 99.5, 100.0, 112.0),
        ];
        assert_eq!(
            merge_into_bands(&rects, TOL),
            vec![PageRect::new(10.0, 99.5, 100.0, 113.0)]
        );
    }

    #[test]
    fn test_wrapped_sentence_starts_new_band() {
        let rects = [
            PageRect::new(300.0, 100.0, 340.0, 112.0),
            PageRect::new(345.0, 100.0, 380.0, 112.0),
            PageRect::new(10.0, 116.0, 50.0, 128.0),
            PageRect::new(55.0, 116.0, 70.0, 128.0),
        ];
        assert_eq!(
            merge_into_bands(&rects, TOL),
            vec![
                PageRect::new(300.0, 100.0, 380.0, 112.0),
                PageRect::new(10.0, 116.0, 70.0, 128.0),
            ]
        );
    }

    #[test]
    fn test_compares_against_grown_band() {
        // The third rect is 8pt off the first but only 4pt off the grown band
        let rects = [
            PageRect::new(0.0, 100.0, 10.0, 110.0),
            PageRect::new(10.0, 96.0, 20.0, 110.0),
            PageRect::new(20.0, 92.0, 30.0, 110.0),
        ];
        assert_eq!(
            merge_into_bands(&rects, TOL),
            vec![PageRect::new(0.0, 92.0, 30.0, 110.0)]
        );
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let rects = [
            PageRect::new(0.0, 100.0, 10.0, 110.0),
            PageRect::new(10.0, 107.0, 20.0, 117.0),
        ];
        assert_eq!(merge_into_bands(&rects, TOL).len(), 2);
        assert_eq!(merge_into_bands(&rects, 10.0).len(), 1);
    }

    #[test]
    fn test_idempotent_and_never_grows() {
        let rects = [
            PageRect::new(300.0, 100.0, 340.0, 112.0),
            PageRect::new(345.0, 102.0, 380.0, 114.0),
            PageRect::new(10.0, 116.0, 50.0, 128.0),
            PageRect::new(55.0, 140.0, 70.0, 152.0),
            PageRect::new(75.0, 141.0, 90.0, 152.0),
        ];
        let once = merge_into_bands(&rects, TOL);
        let twice = merge_into_bands(&once, TOL);
        assert!(once.len() <= rects.len());
        assert_eq!(once, twice);
    }
}
