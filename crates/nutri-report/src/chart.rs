//! Horizontal bars drawn with block characters.

const FULL: char = '█';
const EMPTY: char = '·';

/// A bar of `width` cells, filled in proportion to `value / limit`.
///
/// Values at or above the limit fill the bar; a non-positive limit draws an
/// empty bar.
pub fn bar(value: f64, limit: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let filled = if limit > 0.0 && value > 0.0 {
        let ratio = (value / limit).min(1.0);
        // Anything with data gets at least one cell.
        ((ratio * width as f64).round() as usize).clamp(1, width)
    } else {
        0
    };
    let mut out = String::with_capacity(width * FULL.len_utf8());
    out.extend(std::iter::repeat_n(FULL, filled));
    out.extend(std::iter::repeat_n(EMPTY, width - filled));
    out
}

/// A labelled bar line: `label  bar  value`.
pub fn bar_line(label: &str, label_width: usize, bar: &str, value: &str) -> String {
    format!("{label:<label_width$}  {bar}  {value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_limit() {
        insta::assert_snapshot!(bar(5.0, 10.0, 10), @"█████·····");
        insta::assert_snapshot!(bar(20.0, 10.0, 4), @"████");
        insta::assert_snapshot!(bar(0.01, 10.0, 4), @"█···");
        insta::assert_snapshot!(bar(3.0, 0.0, 3), @"···");
        assert_eq!(bar(1.0, 1.0, 0), "");
    }

    #[test]
    fn bar_line_pads_label() {
        insta::assert_snapshot!(bar_line("Iron", 6, "██··", "2.1 mg"), @"Iron    ██··  2.1 mg");
    }
}
