use pdf_writer::{Content, Name, Str};

use crate::fonts::{Face, FontEntry, Fonts, to_winansi_bytes};

/// Baseline sits this fraction of the font size below the top of a line box.
pub(crate) const ASCENT_RATIO: f32 = 0.75;

pub(crate) const DEFAULT_LINE_SPACING: f32 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TextStyle {
    pub(crate) face: Face,
    pub(crate) size: f32,
    pub(crate) align: Align,
    pub(crate) line_spacing: f32,
}

impl TextStyle {
    pub(crate) fn regular(size: f32) -> Self {
        TextStyle {
            face: Face::Regular,
            size,
            align: Align::Left,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }

    pub(crate) fn bold(size: f32) -> Self {
        TextStyle {
            face: Face::Bold,
            ..TextStyle::regular(size)
        }
    }

    pub(crate) fn oblique(size: f32) -> Self {
        TextStyle {
            face: Face::Oblique,
            ..TextStyle::regular(size)
        }
    }

    pub(crate) fn align(self, align: Align) -> Self {
        TextStyle { align, ..self }
    }

    pub(crate) fn line_height(&self) -> f32 {
        self.size * self.line_spacing
    }
}

/// One wrapped line with its measured width (alignment offsets are computed
/// per line, since wrapped lines differ in width).
#[derive(Clone, Debug)]
pub(crate) struct Line {
    pub(crate) text: String,
    pub(crate) width: f32,
}

/// Greedy word-wrap. Never breaks inside a word; a single word wider than
/// `max_width` is placed alone on its line and allowed to overflow.
/// Explicit newlines in `text` force line breaks.
pub(crate) fn wrap(text: &str, font: &FontEntry, size: f32, max_width: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let space_w = font.space_width(size);

    for para in text.split('\n') {
        let mut current = String::new();
        let mut current_w: f32 = 0.0;

        for word in para.split_whitespace() {
            let word_w = font.text_width(word, size);
            if current.is_empty() {
                current.push_str(word);
                current_w = word_w;
                continue;
            }
            if current_w + space_w + word_w > max_width {
                lines.push(Line {
                    text: std::mem::take(&mut current),
                    width: current_w,
                });
                current.push_str(word);
                current_w = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
            }
        }

        lines.push(Line {
            text: current,
            width: current_w,
        });
    }

    lines
}

/// Total height of `n` wrapped lines at the given style.
pub(crate) fn lines_height(n: usize, style: &TextStyle) -> f32 {
    n as f32 * style.line_height()
}

/// Measured height a text block will occupy when wrapped to `max_width`.
pub(crate) fn text_height(text: &str, fonts: &Fonts, style: &TextStyle, max_width: f32) -> f32 {
    let lines = wrap(text, fonts.get(style.face), style.size, max_width);
    lines_height(lines.len(), style)
}

/// Per-line X offset for the block alignment.
fn line_x(align: Align, x: f32, block_width: f32, line_width: f32) -> f32 {
    match align {
        Align::Left => x,
        Align::Center => x + (block_width - line_width) / 2.0,
        Align::Right => x + block_width - line_width,
    }
}

/// Draw pre-wrapped lines top-down from `top_y`; returns the height used.
pub(crate) fn draw_lines(
    content: &mut Content,
    fonts: &Fonts,
    style: &TextStyle,
    lines: &[Line],
    x: f32,
    block_width: f32,
    top_y: f32,
) -> f32 {
    let entry = fonts.get(style.face);
    let line_h = style.line_height();

    content.begin_text();
    content.set_font(Name(entry.pdf_name.as_bytes()), style.size);
    let mut td_x = 0.0f32;
    let mut td_y = 0.0f32;
    for (i, line) in lines.iter().enumerate() {
        if line.text.is_empty() {
            continue;
        }
        let lx = line_x(style.align, x, block_width, line.width);
        let baseline = top_y - i as f32 * line_h - style.size * ASCENT_RATIO;
        content.next_line(lx - td_x, baseline - td_y);
        td_x = lx;
        td_y = baseline;
        content.show(Str(&to_winansi_bytes(&line.text)));
    }
    content.end_text();

    lines_height(lines.len(), style)
}

/// Wrap and draw in one go; returns the height used.
pub(crate) fn draw_text(
    content: &mut Content,
    fonts: &Fonts,
    style: &TextStyle,
    text: &str,
    x: f32,
    block_width: f32,
    top_y: f32,
) -> f32 {
    let lines = wrap(text, fonts.get(style.face), style.size, block_width);
    draw_lines(content, fonts, style, &lines, x, block_width, top_y)
}

/// Horizontal rule.
pub(crate) fn draw_hline(content: &mut Content, x1: f32, x2: f32, y: f32, width: f32) {
    content.save_state();
    content.set_line_width(width);
    content.move_to(x1, y);
    content.line_to(x2, y);
    content.stroke();
    content.restore_state();
}

/// Vertical rule between two Y positions.
pub(crate) fn draw_vline(content: &mut Content, x: f32, y_top: f32, y_bottom: f32, width: f32) {
    content.save_state();
    content.set_line_width(width);
    content.move_to(x, y_top);
    content.line_to(x, y_bottom);
    content.stroke();
    content.restore_state();
}

/// Stroked rectangle from its top-left corner.
pub(crate) fn draw_rect(content: &mut Content, x: f32, top_y: f32, w: f32, h: f32, line_w: f32) {
    content.save_state();
    content.set_line_width(line_w);
    content.rect(x, top_y - h, w, h);
    content.stroke();
    content.restore_state();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_writer::{Pdf, Ref};

    fn test_fonts() -> Fonts {
        let mut pdf = Pdf::new();
        let mut next = 1i32;
        let mut alloc = || {
            let r = Ref::new(next);
            next += 1;
            r
        };
        Fonts::register(&mut pdf, &mut alloc)
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let fonts = test_fonts();
        let font = fonts.get(Face::Regular);
        let lines = wrap("alpha beta gamma delta", font, 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(!line.text.contains("alpha beta gamma"));
            assert!(line.width <= 60.0 + 0.01, "line {:?} overflows", line.text);
        }
        let joined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(joined.join(" "), "alpha beta gamma delta");
    }

    #[test]
    fn overlong_word_goes_alone_and_overflows() {
        let fonts = test_fonts();
        let font = fonts.get(Face::Regular);
        let lines = wrap("a incomprehensibilities b", font, 10.0, 30.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "incomprehensibilities");
        assert!(lines[1].width > 30.0);
    }

    #[test]
    fn explicit_newlines_force_breaks() {
        let fonts = test_fonts();
        let font = fonts.get(Face::Regular);
        let lines = wrap("one\ntwo", font, 10.0, 500.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "one");
        assert_eq!(lines[1].text, "two");
    }

    #[test]
    fn empty_text_measures_one_line() {
        let fonts = test_fonts();
        let style = TextStyle::regular(10.0);
        assert_eq!(
            text_height("", &fonts, &style, 100.0),
            style.line_height()
        );
    }

    #[test]
    fn height_scales_with_line_count() {
        let style = TextStyle::regular(10.0);
        assert_eq!(lines_height(3, &style), 3.0 * 12.0);
    }
}
