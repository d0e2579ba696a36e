//! Built-in Helvetica faces (Type1, WinAnsi-encoded). The templates use one
//! family in regular/bold/oblique; nothing is embedded or subsetted.

use pdf_writer::{Name, Pdf, Ref};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Face {
    Regular,
    Bold,
    Oblique,
}

pub(crate) struct FontEntry {
    pub(crate) pdf_name: &'static str,
    pub(crate) font_ref: Ref,
    widths_1000: [f32; 224],
}

impl FontEntry {
    fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    pub(crate) fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }
}

/// The three registered faces for one render. Built per invocation so
/// concurrent renders never share writer references.
pub(crate) struct Fonts {
    regular: FontEntry,
    bold: FontEntry,
    oblique: FontEntry,
}

impl Fonts {
    pub(crate) fn register(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Fonts {
        Fonts {
            regular: register_face(pdf, alloc, "F1", "Helvetica", helvetica_widths()),
            bold: register_face(pdf, alloc, "F2", "Helvetica-Bold", helvetica_bold_widths()),
            oblique: register_face(pdf, alloc, "F3", "Helvetica-Oblique", helvetica_widths()),
        }
    }

    pub(crate) fn get(&self, face: Face) -> &FontEntry {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Oblique => &self.oblique,
        }
    }

    pub(crate) fn pairs(&self) -> [(&'static str, Ref); 3] {
        [
            (self.regular.pdf_name, self.regular.font_ref),
            (self.bold.pdf_name, self.bold.font_ref),
            (self.oblique.pdf_name, self.oblique.font_ref),
        ]
    }
}

fn register_face(
    pdf: &mut Pdf,
    alloc: &mut impl FnMut() -> Ref,
    pdf_name: &'static str,
    base_font: &str,
    widths_1000: [f32; 224],
) -> FontEntry {
    let font_ref = alloc();
    pdf.type1_font(font_ref)
        .base_font(Name(base_font.as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    FontEntry {
        pdf_name,
        font_ref,
        widths_1000,
    }
}

/// Helvetica widths at 1000 units/em for WinAnsi 32..=255 (AFM values for the
/// ASCII range, average fill for the rest).
fn helvetica_widths() -> [f32; 224] {
    let mut w = [556.0f32; 224];
    for b in 32u8..=126 {
        w[(b - 32) as usize] = match b {
            b' ' => 278.0,
            b'!' | b',' | b'.' | b'/' | b':' | b';' | b'i' | b'j' | b'l' => 278.0,
            b'\'' | b'`' => 222.0,
            b'"' => 355.0,
            b'(' | b')' | b'[' | b']' | b'{' | b'}' | b'f' | b't' => 333.0,
            b'*' => 389.0,
            b'-' => 333.0,
            b'0'..=b'9' | b'#' | b'$' => 556.0,
            b'%' => 889.0,
            b'&' => 667.0,
            b'+' | b'<' | b'=' | b'>' | b'~' => 584.0,
            b'?' => 556.0,
            b'@' => 1015.0,
            b'I' => 278.0,
            b'J' => 500.0,
            b'M' => 833.0,
            b'W' => 944.0,
            b'A' | b'V' | b'X' | b'Y' => 667.0,
            b'B' | b'E' | b'F' | b'L' | b'P' | b'S' | b'Z' => 611.0,
            b'C' | b'D' | b'G' | b'H' | b'K' | b'N' | b'O' | b'Q' | b'R' | b'U' => 722.0,
            b'T' => 611.0,
            b'm' | b'w' => 833.0,
            b'r' => 333.0,
            b's' | b'z' => 500.0,
            b'a'..=b'z' => 556.0,
            _ => 556.0,
        };
    }
    w
}

/// Helvetica-Bold widths (ASCII AFM values; bold glyphs run wider).
fn helvetica_bold_widths() -> [f32; 224] {
    let mut w = [611.0f32; 224];
    for b in 32u8..=126 {
        w[(b - 32) as usize] = match b {
            b' ' => 278.0,
            b'!' | b',' | b'.' | b'/' | b':' | b';' | b'i' | b'j' | b'l' => 278.0,
            b'\'' | b'`' => 278.0,
            b'"' => 474.0,
            b'(' | b')' | b'[' | b']' | b'{' | b'}' | b'f' | b't' => 333.0,
            b'-' => 333.0,
            b'0'..=b'9' | b'#' | b'$' => 556.0,
            b'%' => 889.0,
            b'&' => 722.0,
            b'+' | b'<' | b'=' | b'>' | b'~' => 584.0,
            b'?' => 611.0,
            b'@' => 975.0,
            b'I' => 278.0,
            b'J' => 556.0,
            b'M' => 833.0,
            b'W' => 944.0,
            b'A' | b'V' | b'X' | b'Y' => 722.0,
            b'T' | b'Z' => 611.0,
            b'B' | b'E' | b'F' | b'L' | b'P' | b'S' => 611.0,
            b'C' | b'D' | b'G' | b'H' | b'K' | b'N' | b'O' | b'Q' | b'R' | b'U' => 722.0,
            b'm' | b'w' => 889.0,
            b'r' => 389.0,
            b's' | b'z' => 556.0,
            b'a'..=b'z' => 611.0,
            _ => 611.0,
        };
    }
    w
}

/// Map a Unicode char to its WinAnsi (Windows-1252) byte, 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        _ => 0,
    }
}

/// Encode text as WinAnsi bytes for PDF `Str` payloads. Unmappable chars are
/// dropped rather than rendered as tofu.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_and_wide_glyphs_measure_differently() {
        let widths = helvetica_widths();
        let i = widths[(b'i' - 32) as usize];
        let m = widths[(b'm' - 32) as usize];
        assert!(i < m);
    }

    #[test]
    fn winansi_maps_ascii_and_latin1() {
        assert_eq!(to_winansi_bytes("Ab1"), vec![b'A', b'b', b'1']);
        assert_eq!(to_winansi_bytes("é"), vec![0xE9]);
        // Unmappable chars disappear instead of shifting layout.
        assert_eq!(to_winansi_bytes("漢"), Vec::<u8>::new());
    }
}
