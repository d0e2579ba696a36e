use pdf_writer::Content;

use crate::error::Error;
use crate::fonts::Fonts;

use super::cursor::FlowCursor;
use super::layout::{self, Align, TextStyle};

const BORDER_WIDTH: f32 = 0.7;

#[derive(Clone, Debug)]
pub(crate) struct Column {
    pub(crate) header: String,
    /// Explicit width in points, or `None` to share the leftover width
    /// equally with the other auto columns.
    pub(crate) width: Option<f32>,
    pub(crate) align: Align,
}

impl Column {
    pub(crate) fn fixed(header: impl Into<String>, width: f32, align: Align) -> Self {
        Column {
            header: header.into(),
            width: Some(width),
            align,
        }
    }

    pub(crate) fn auto(header: impl Into<String>, align: Align) -> Self {
        Column {
            header: header.into(),
            width: None,
            align,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CellPadding {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Default for CellPadding {
    fn default() -> Self {
        CellPadding { x: 4.0, y: 3.0 }
    }
}

/// Column layout plus row data. Width bookkeeping is settled at
/// construction: after auto columns are resolved, the widths must sum to the
/// declared table width — a mismatch is a caller error, never corrected.
#[derive(Clone, Debug)]
pub(crate) struct TableSpec {
    width: f32,
    headers: Vec<String>,
    widths: Vec<f32>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
    pub(crate) font_size: f32,
    pub(crate) padding: CellPadding,
}

impl TableSpec {
    pub(crate) fn new(width: f32, columns: Vec<Column>) -> Result<Self, Error> {
        if columns.is_empty() {
            return Err(Error::BadTableSpec("table needs at least one column".into()));
        }
        let fixed_sum: f32 = columns.iter().filter_map(|c| c.width).sum();
        let auto_count = columns.iter().filter(|c| c.width.is_none()).count();

        if fixed_sum > width + 0.5 {
            return Err(Error::BadTableSpec(format!(
                "fixed column widths sum to {fixed_sum:.1}pt, table is {width:.1}pt"
            )));
        }
        if auto_count == 0 && (fixed_sum - width).abs() > 0.5 {
            return Err(Error::BadTableSpec(format!(
                "column widths sum to {fixed_sum:.1}pt, declared width is {width:.1}pt"
            )));
        }

        let share = if auto_count > 0 {
            (width - fixed_sum) / auto_count as f32
        } else {
            0.0
        };

        let mut headers = Vec::with_capacity(columns.len());
        let mut widths = Vec::with_capacity(columns.len());
        let mut aligns = Vec::with_capacity(columns.len());
        for col in columns {
            widths.push(col.width.unwrap_or(share));
            aligns.push(col.align);
            headers.push(col.header);
        }

        Ok(TableSpec {
            width,
            headers,
            widths,
            aligns,
            rows: Vec::new(),
            font_size: 8.5,
            padding: CellPadding::default(),
        })
    }

    pub(crate) fn push_row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.widths.len());
        self.rows.push(cells);
    }

    fn cell_style(&self, col: usize, bold: bool) -> TextStyle {
        let base = if bold {
            TextStyle::bold(self.font_size)
        } else {
            TextStyle::regular(self.font_size)
        };
        base.align(self.aligns[col])
    }

    /// Row height: tallest wrapped cell plus vertical padding.
    fn row_height(&self, fonts: &Fonts, cells: &[String], bold: bool) -> f32 {
        let mut max_h: f32 = 0.0;
        for (col, cell) in cells.iter().enumerate() {
            let style = self.cell_style(col, bold);
            let text_w = (self.widths[col] - 2.0 * self.padding.x).max(1.0);
            max_h = max_h.max(layout::text_height(cell, fonts, &style, text_w));
        }
        max_h + 2.0 * self.padding.y
    }

    fn header_height(&self, fonts: &Fonts) -> f32 {
        self.row_height(fonts, &self.headers, true)
    }

    fn draw_row(
        &self,
        content: &mut Content,
        fonts: &Fonts,
        cells: &[String],
        bold: bool,
        x: f32,
        top_y: f32,
        row_h: f32,
    ) {
        let mut cell_x = x;
        for (col, cell) in cells.iter().enumerate() {
            let style = self.cell_style(col, bold);
            let text_w = (self.widths[col] - 2.0 * self.padding.x).max(1.0);
            layout::draw_text(
                content,
                fonts,
                &style,
                cell,
                cell_x + self.padding.x,
                text_w,
                top_y - self.padding.y,
            );
            cell_x += self.widths[col];
        }

        // Each row carries its own grid segment, so the border is closed
        // wherever the table stops on a page.
        let bottom = top_y - row_h;
        let mut vx = x;
        for w in &self.widths {
            layout::draw_vline(content, vx, top_y, bottom, BORDER_WIDTH);
            vx += w;
        }
        layout::draw_vline(content, vx, top_y, bottom, BORDER_WIDTH);
        layout::draw_hline(content, x, x + self.width, bottom, BORDER_WIDTH);
    }
}

/// Render row by row through the cursor; when a row does not fit, break the
/// page and re-emit the header row verbatim. Rows never split.
pub(crate) fn render_table(cursor: &mut FlowCursor, spec: &TableSpec) -> Result<(), Error> {
    let fonts = cursor.fonts();
    let x = cursor.geometry().margin_left;
    let header_h = spec.header_height(fonts);

    let emit_header = |cursor: &mut FlowCursor| {
        let top = cursor.y();
        layout::draw_hline(cursor.content(), x, x + spec.width, top, BORDER_WIDTH);
        spec.draw_row(
            cursor.content(),
            fonts,
            &spec.headers,
            true,
            x,
            top,
            header_h,
        );
        cursor.advance(header_h);
    };

    // Header plus at least one row must fit before the table starts.
    let first_row_h = spec
        .rows
        .first()
        .map(|r| spec.row_height(fonts, r, false))
        .unwrap_or(0.0);
    cursor.ensure_room(header_h + first_row_h, "table header")?;
    emit_header(cursor);

    for row in &spec.rows {
        let row_h = spec.row_height(fonts, row, false);
        if row_h > cursor.remaining() {
            cursor.ensure_room(header_h + row_h, "table row")?;
            emit_header(cursor);
        }
        log::debug!(
            "table row h={:.1} y={:.1} page={}",
            row_h,
            cursor.y(),
            cursor.page_count()
        );
        let top = cursor.y();
        spec.draw_row(
            cursor.content(),
            fonts,
            row,
            false,
            x,
            top,
            row_h,
        );
        cursor.advance(row_h);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Fonts;
    use crate::pdf::cursor::{PageDecor, PageGeometry};
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

    fn cols() -> Vec<Column> {
        vec![
            Column::fixed("Sr", 30.0, Align::Right),
            Column::auto("Description", Align::Left),
            Column::fixed("Amount", 70.0, Align::Right),
        ]
    }

    #[test]
    fn auto_columns_fill_declared_width() {
        let spec = TableSpec::new(500.0, cols()).unwrap();
        let total: f32 = spec.widths.iter().sum();
        assert!((total - 500.0).abs() < 0.01);
        assert_eq!(spec.widths[1], 400.0);
    }

    #[test]
    fn explicit_widths_must_sum_to_table_width() {
        let bad = TableSpec::new(
            200.0,
            vec![
                Column::fixed("A", 100.0, Align::Left),
                Column::fixed("B", 50.0, Align::Left),
            ],
        );
        assert!(matches!(bad, Err(Error::BadTableSpec(_))));

        let good = TableSpec::new(
            150.0,
            vec![
                Column::fixed("A", 100.0, Align::Left),
                Column::fixed("B", 50.0, Align::Left),
            ],
        );
        assert!(good.is_ok());
    }

    #[test]
    fn overcommitted_fixed_widths_rejected() {
        let bad = TableSpec::new(
            100.0,
            vec![
                Column::fixed("A", 90.0, Align::Left),
                Column::fixed("B", 90.0, Align::Left),
                Column::auto("C", Align::Left),
            ],
        );
        assert!(matches!(bad, Err(Error::BadTableSpec(_))));
    }

    #[test]
    fn header_repeats_on_every_continuation_page() {
        let fonts = test_fonts();
        let mut spec = TableSpec::new(500.0, cols()).unwrap();
        for i in 0..150 {
            spec.push_row(vec![
                (i + 1).to_string(),
                "machined flange, zinc plated".into(),
                "42.50".into(),
            ]);
        }
        let mut cursor = FlowCursor::new(PageGeometry::a4(), &fonts, PageDecor::default());
        render_table(&mut cursor, &spec).unwrap();
        let pages = cursor.finish();
        assert!(pages.len() >= 2, "150 rows must span pages");
        for page in pages {
            let bytes = page.finish();
            let header_present = bytes
                .windows(b"Description".len())
                .any(|w| w == b"Description");
            assert!(header_present, "continuation page is missing the header row");
        }
    }

    #[test]
    fn empty_column_list_rejected() {
        assert!(matches!(
            TableSpec::new(100.0, vec![]),
            Err(Error::BadTableSpec(_))
        ));
    }
}
