/// Margin kept around a sentence scrolled into view, in widget pixels
pub const ENSURE_VISIBLE_MARGIN: f64 = 50.0;

/// New scroll offset along one axis so `[start, end]` is visible with `margin` around it
///
/// `value` is the current offset, `page_size` the visible length, `upper` the
/// content length. The offset only moves if the span is not already visible;
/// a span longer than the viewport is aligned to its start.
pub fn ensure_visible(
    value: f64,
    page_size: f64,
    upper: f64,
    start: f64,
    end: f64,
    margin: f64,
) -> f64 {
    let low = start - margin;
    let high = end + margin;

    let target = if low < value || high - low > page_size {
        low
    } else if high > value + page_size {
        high - page_size
    } else {
        value
    };

    let max_value = (upper - page_size).max(0.0);
    target.clamp(0.0, max_value)
}

/// Scroll offset for a hand-drag, along one axis
///
/// `offset` is the drag offset reported in content coordinates. Those already
/// include the scrolling done so far in this drag, so the new offset is the
/// current one minus `offset`, not the value at drag start minus it.
pub fn pan_scroll(value: f64, offset: f64) -> f64 {
    value - offset
}

/// Scroll offset that keeps the content under the pointer fixed across a zoom change
///
/// `pointer` is the pointer position inside the viewport. The page and its
/// margin both scale with zoom, so the content under the pointer moves by
/// `ratio` (new zoom / old zoom).
pub fn anchored_scroll(value: f64, pointer: f64, ratio: f64) -> f64 {
    ((value + pointer) * ratio - pointer).max(0.0)
}
