use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn grapheme_display_width(g: &str) -> usize {
    UnicodeWidthStr::width(g)
}

/// Cut a string to at most `max_cells` terminal cells, never splitting a
/// grapheme. A wide character that would straddle the limit is dropped.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if width + gw > max_cells {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result
}

/// Truncate or pad with spaces on the right to exactly `cells` cells.
pub fn fit_left(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    out.extend(std::iter::repeat_n(' ', cells - w));
    out
}

/// Pad with spaces on the left to at least `cells` cells. Longer strings
/// are returned unchanged.
pub fn pad_left(s: &str, cells: usize) -> String {
    let w = display_width(s);
    if w >= cells {
        return s.to_string();
    }
    let mut out = " ".repeat(cells - w);
    out.push_str(s);
    out
}

/// Replace the last `tail` cells of a string that is exactly `cells` wide
/// with `tail`. If the tail is wider than the field the tail wins and is
/// itself cut to the field.
pub fn overwrite_tail(s: &str, tail: &str, cells: usize) -> String {
    let tail_w = display_width(tail);
    if tail_w >= cells {
        return fit_left(tail, cells);
    }
    let mut head = fit_left(s, cells - tail_w);
    head.push_str(tail);
    head
}

/// Split a string at a display column, snapping to grapheme boundaries.
/// Returns (left, right) where left is at most `col` cells wide.
pub fn split_at_width(s: &str, col: usize) -> (&str, &str) {
    let mut width = 0;
    for (i, g) in s.grapheme_indices(true) {
        let gw = grapheme_display_width(g);
        if width + gw > col {
            return s.split_at(i);
        }
        width += gw;
    }
    (s, "")
}
