//! Labeled boxes: a caption line over a bordered rectangle of wrapped value
//! text. Header blocks (exporter, consignee, invoice metadata) arrange these
//! in rows of fixed fractions of the content width — halves or quarters —
//! never data-dependent widths.

use pdf_writer::Content;

use crate::fonts::Fonts;

use super::layout::{self, TextStyle};

const LABEL_SIZE: f32 = 7.0;
const VALUE_SIZE: f32 = 8.5;
const PAD: f32 = 4.0;
const BORDER_WIDTH: f32 = 0.6;

#[derive(Clone, Debug)]
pub(crate) struct LabeledBox {
    pub(crate) label: String,
    pub(crate) value: String,
}

impl LabeledBox {
    pub(crate) fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        LabeledBox {
            label: label.into(),
            value: value.into(),
        }
    }

    fn label_style() -> TextStyle {
        TextStyle::bold(LABEL_SIZE)
    }

    fn value_style() -> TextStyle {
        TextStyle::regular(VALUE_SIZE)
    }

    /// Caption height plus the bordered rectangle sized from the wrapped
    /// value line count.
    pub(crate) fn measure(&self, fonts: &Fonts, width: f32) -> f32 {
        let caption_h = Self::label_style().line_height();
        let text_w = (width - 2.0 * PAD).max(1.0);
        let value_h = layout::text_height(&self.value, fonts, &Self::value_style(), text_w);
        caption_h + value_h + 2.0 * PAD
    }

    /// Draw at the given width with the box's natural height.
    pub(crate) fn render(
        &self,
        content: &mut Content,
        fonts: &Fonts,
        x: f32,
        width: f32,
        top_y: f32,
    ) -> f32 {
        let h = self.measure(fonts, width);
        self.render_fixed(content, fonts, x, width, top_y, h);
        h
    }

    /// Draw with an imposed height so grid neighbors share a bottom edge.
    pub(crate) fn render_fixed(
        &self,
        content: &mut Content,
        fonts: &Fonts,
        x: f32,
        width: f32,
        top_y: f32,
        height: f32,
    ) {
        let caption_h = layout::draw_text(
            content,
            fonts,
            &Self::label_style(),
            &self.label,
            x,
            width,
            top_y,
        );
        let rect_top = top_y - caption_h;
        let rect_h = height - caption_h;
        layout::draw_rect(content, x, rect_top, width, rect_h, BORDER_WIDTH);
        let text_w = (width - 2.0 * PAD).max(1.0);
        layout::draw_text(
            content,
            fonts,
            &Self::value_style(),
            &self.value,
            x + PAD,
            text_w,
            rect_top - PAD,
        );
    }
}

/// Row height: the tallest box at an equal share of `total_width`.
pub(crate) fn row_height(boxes: &[LabeledBox], fonts: &Fonts, total_width: f32) -> f32 {
    if boxes.is_empty() {
        return 0.0;
    }
    let cell_w = total_width / boxes.len() as f32;
    boxes
        .iter()
        .map(|b| b.measure(fonts, cell_w))
        .fold(0.0, f32::max)
}

/// Render side by side at equal widths, all stretched to the row height.
/// Rendered atomically: the caller breaks the page first if needed.
pub(crate) fn render_row(
    content: &mut Content,
    fonts: &Fonts,
    boxes: &[LabeledBox],
    x: f32,
    total_width: f32,
    top_y: f32,
) -> f32 {
    if boxes.is_empty() {
        return 0.0;
    }
    let cell_w = total_width / boxes.len() as f32;
    let h = row_height(boxes, fonts, total_width);
    for (i, b) in boxes.iter().enumerate() {
        b.render_fixed(content, fonts, x + i as f32 * cell_w, cell_w, top_y, h);
    }
    h
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
    fn height_grows_with_wrapped_lines() {
        let fonts = test_fonts();
        let short = LabeledBox::new("EXPORTER", "Acme");
        let long = LabeledBox::new(
            "EXPORTER",
            "Acme Exports Private Limited, Plot 14, Industrial Estate, Ahmedabad, Gujarat, India",
        );
        assert!(long.measure(&fonts, 120.0) > short.measure(&fonts, 120.0));
    }

    #[test]
    fn row_height_is_max_of_members() {
        let fonts = test_fonts();
        let a = LabeledBox::new("A", "x");
        let b = LabeledBox::new("B", "a considerably longer value that wraps to several lines");
        let row = vec![a.clone(), b.clone()];
        let h = row_height(&row, &fonts, 200.0);
        assert_eq!(h, b.measure(&fonts, 100.0));
        assert!(h >= a.measure(&fonts, 100.0));
    }

    #[test]
    fn narrower_cells_make_taller_rows() {
        let fonts = test_fonts();
        let bx = LabeledBox::new("NOTIFY", "Some notify party with a fairly long address line");
        let halves = row_height(&[bx.clone(), bx.clone()], &fonts, 400.0);
        let quarters = row_height(&vec![bx.clone(); 4], &fonts, 400.0);
        assert!(quarters >= halves);
    }
}
