use pdf_writer::{Content, Name};

use crate::error::Error;
use crate::fonts::Fonts;

use super::boxed::LabeledBox;
use super::layout::{self, TextStyle};
use super::table::TableSpec;

/// A4 portrait in points.
pub(crate) const A4_WIDTH: f32 = 595.0;
pub(crate) const A4_HEIGHT: f32 = 842.0;

#[derive(Clone, Copy, Debug)]
pub(crate) struct PageGeometry {
    pub(crate) page_width: f32,
    pub(crate) page_height: f32,
    pub(crate) margin_top: f32,
    pub(crate) margin_bottom: f32,
    pub(crate) margin_left: f32,
    pub(crate) margin_right: f32,
}

impl PageGeometry {
    pub(crate) fn a4() -> Self {
        PageGeometry {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin_top: 40.0,
            margin_bottom: 40.0,
            margin_left: 40.0,
            margin_right: 40.0,
        }
    }

    pub(crate) fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub(crate) fn content_top(&self) -> f32 {
        self.page_height - self.margin_top
    }

    pub(crate) fn content_bottom(&self) -> f32 {
        self.margin_bottom
    }
}

/// An image XObject already registered with the writer, scaled for display.
#[derive(Clone, Debug)]
pub(crate) struct PlacedImage {
    pub(crate) pdf_name: String,
    pub(crate) display_width: f32,
    pub(crate) display_height: f32,
}

/// Persistent page decorations, re-drawn at the top of every page the
/// document spans: letterhead image first, running title under it.
#[derive(Clone, Debug, Default)]
pub(crate) struct PageDecor {
    pub(crate) letterhead: Option<PlacedImage>,
    pub(crate) title: Option<String>,
}

const TITLE_SIZE: f32 = 13.0;
const DECOR_GAP: f32 = 8.0;

/// A renderable unit. Everything an assembler emits goes through here, so
/// page-break decisions live in exactly one place.
pub(crate) enum Block {
    Text { text: String, style: TextStyle },
    LabeledBox(LabeledBox),
    /// Side-by-side boxes sharing one row; rendered atomically.
    BoxRow(Vec<LabeledBox>),
    Table(TableSpec),
    Spacer(f32),
    Rule,
}

impl Block {
    pub(crate) fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Block::Text {
            text: text.into(),
            style,
        }
    }
}

/// Tracks the vertical position on the current page and performs page
/// breaks. One cursor per render invocation; nothing is shared, so
/// concurrent renders cannot interfere.
pub(crate) struct FlowCursor<'f> {
    geom: PageGeometry,
    fonts: &'f Fonts,
    decor: PageDecor,
    done_pages: Vec<Content>,
    current: Content,
    y: f32,
}

impl<'f> FlowCursor<'f> {
    pub(crate) fn new(geom: PageGeometry, fonts: &'f Fonts, decor: PageDecor) -> Self {
        let mut cursor = FlowCursor {
            geom,
            fonts,
            decor,
            done_pages: Vec::new(),
            current: Content::new(),
            y: geom.content_top(),
        };
        cursor.draw_decorations();
        cursor
    }

    pub(crate) fn geometry(&self) -> PageGeometry {
        self.geom
    }

    pub(crate) fn fonts(&self) -> &'f Fonts {
        self.fonts
    }

    pub(crate) fn decor(&self) -> &PageDecor {
        &self.decor
    }

    pub(crate) fn content(&mut self) -> &mut Content {
        &mut self.current
    }

    pub(crate) fn y(&self) -> f32 {
        self.y
    }

    pub(crate) fn page_count(&self) -> usize {
        self.done_pages.len() + 1
    }

    pub(crate) fn remaining(&self) -> f32 {
        self.y - self.geom.content_bottom()
    }

    /// Usable height of a fresh page below the decorations; the upper bound
    /// for any unsplittable block.
    fn fresh_page_room(&self) -> f32 {
        self.geom.content_top() - self.decorations_height() - self.geom.content_bottom()
    }

    fn decorations_height(&self) -> f32 {
        let mut h = 0.0;
        if let Some(img) = &self.decor.letterhead {
            h += img.display_height + DECOR_GAP;
        }
        if self.decor.title.is_some() {
            h += TextStyle::bold(TITLE_SIZE).line_height() + DECOR_GAP;
        }
        h
    }

    fn draw_decorations(&mut self) {
        let left = self.geom.margin_left;
        let width = self.geom.content_width();
        if let Some(img) = self.decor.letterhead.clone() {
            let y_bottom = self.y - img.display_height;
            let x = left + (width - img.display_width).max(0.0) / 2.0;
            self.current.save_state();
            self.current.transform([
                img.display_width,
                0.0,
                0.0,
                img.display_height,
                x,
                y_bottom,
            ]);
            self.current.x_object(Name(img.pdf_name.as_bytes()));
            self.current.restore_state();
            self.y -= img.display_height + DECOR_GAP;
        }
        if let Some(title) = self.decor.title.clone() {
            let style = TextStyle::bold(TITLE_SIZE).align(super::layout::Align::Center);
            let used = layout::draw_text(
                &mut self.current,
                self.fonts,
                &style,
                &title,
                left,
                width,
                self.y,
            );
            self.y -= used + DECOR_GAP;
        }
    }

    /// Finalize the current page and start the next one, re-drawing the
    /// persistent decorations.
    pub(crate) fn break_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Content::new());
        self.done_pages.push(finished);
        self.y = self.geom.content_top();
        self.draw_decorations();
    }

    /// Make room for an unsplittable block of `height`; breaks the page when
    /// the remaining space is short. Purely a function of remaining space —
    /// no look-ahead past this block.
    pub(crate) fn ensure_room(&mut self, height: f32, what: &str) -> Result<(), Error> {
        if height <= self.remaining() {
            return Ok(());
        }
        if height > self.fresh_page_room() {
            return Err(Error::LayoutOverflow(format!(
                "{what}: {height:.1}pt needed, {:.1}pt per page",
                self.fresh_page_room()
            )));
        }
        self.break_page();
        Ok(())
    }

    pub(crate) fn advance(&mut self, height: f32) {
        self.y -= height;
    }

    /// Render a block, breaking pages as its kind allows: text splits at
    /// line boundaries, tables split at row boundaries with repeated
    /// headers, boxes and box rows never split.
    pub(crate) fn push(&mut self, block: Block) -> Result<(), Error> {
        match block {
            Block::Text { text, style } => self.push_text(&text, &style),
            Block::LabeledBox(b) => {
                let width = self.geom.content_width();
                let h = b.measure(self.fonts, width);
                self.ensure_room(h, &format!("box '{}'", b.label))?;
                let fonts = self.fonts;
                let used = b.render(
                    &mut self.current,
                    fonts,
                    self.geom.margin_left,
                    width,
                    self.y,
                );
                self.y -= used;
                Ok(())
            }
            Block::BoxRow(row) => {
                let width = self.geom.content_width();
                let h = super::boxed::row_height(&row, self.fonts, width);
                self.ensure_room(h, "box row")?;
                let fonts = self.fonts;
                let used = super::boxed::render_row(
                    &mut self.current,
                    fonts,
                    &row,
                    self.geom.margin_left,
                    width,
                    self.y,
                );
                self.y -= used;
                Ok(())
            }
            Block::Table(spec) => super::table::render_table(self, &spec),
            Block::Spacer(h) => {
                // A spacer never carries over: breaking is enough whitespace.
                if h <= self.remaining() {
                    self.y -= h;
                } else {
                    self.break_page();
                }
                Ok(())
            }
            Block::Rule => {
                self.ensure_room(4.0, "rule")?;
                layout::draw_hline(
                    &mut self.current,
                    self.geom.margin_left,
                    self.geom.margin_left + self.geom.content_width(),
                    self.y - 2.0,
                    0.7,
                );
                self.y -= 4.0;
                Ok(())
            }
        }
    }

    /// Text splits across pages at wrapped-line boundaries; a single line is
    /// never split.
    fn push_text(&mut self, text: &str, style: &TextStyle) -> Result<(), Error> {
        let width = self.geom.content_width();
        let lines = layout::wrap(text, self.fonts.get(style.face), style.size, width);
        let line_h = style.line_height();

        let mut start = 0usize;
        while start < lines.len() {
            self.ensure_room(line_h, "text line")?;
            let fit = ((self.remaining() / line_h).floor() as usize).max(1);
            let end = (start + fit).min(lines.len());
            let fonts = self.fonts;
            let used = layout::draw_lines(
                &mut self.current,
                fonts,
                style,
                &lines[start..end],
                self.geom.margin_left,
                width,
                self.y,
            );
            self.y -= used;
            start = end;
        }
        Ok(())
    }

    /// All finished pages, current last.
    pub(crate) fn finish(mut self) -> Vec<Content> {
        self.done_pages.push(self.current);
        self.done_pages
    }
}
