//! Glyph widths for the standard Helvetica faces and word-wrap built on them.

use crate::layout::TextMeasure;

/// Advance widths (1/1000 em) for printable ASCII, starting at `' '`.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' to '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' to '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' to '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' to 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' to 'Z'
    278, 278, 278, 469, 556, 333, // '[' to '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' to 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' to 'z'
    334, 260, 334, 584, // '{' to '~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Width used for characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

/// Cap height of Helvetica, used to place the first baseline inside a cell.
pub const HELVETICA_ASCENT: f32 = 0.718;

/// Which standard face to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

impl Face {
    /// Resource name of the face in the page resources.
    #[must_use]
    pub fn resource_name(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
        }
    }

    #[must_use]
    pub fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
        }
    }

    fn glyph_width(self, ch: char) -> u16 {
        let table = match self {
            Face::Regular => &HELVETICA_WIDTHS,
            Face::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        let code = ch as u32;
        if (32..127).contains(&code) {
            table[(code - 32) as usize]
        } else {
            FALLBACK_WIDTH
        }
    }
}

/// A face at a given size and line spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub face: Face,
    pub size: f32,
    pub line_height: f32,
}

impl FontSpec {
    /// A face at `size` points with 1.2 line spacing.
    #[must_use]
    pub fn new(face: Face, size: f32) -> Self {
        Self {
            face,
            size,
            line_height: size * 1.2,
        }
    }

    /// Width of `text` in points.
    #[must_use]
    pub fn text_width(&self, text: &str) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.face.glyph_width(ch))).sum();
        units as f32 * self.size / 1000.0
    }

    /// Break `text` into lines no wider than `width`.
    ///
    /// Words are kept whole where possible; a word wider than `width` is split
    /// between characters. Explicit newlines start a new line. Empty text
    /// still occupies one (empty) line.
    #[must_use]
    pub fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{current} {word}")
                };
                if self.text_width(&candidate) <= width {
                    current = candidate;
                    continue;
                }
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                if self.text_width(word) <= width {
                    current = word.to_string();
                } else {
                    let mut pieces = self.split_word(word, width);
                    current = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                }
            }
            lines.push(current);
        }
        lines
    }

    fn split_word(&self, word: &str, width: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        for ch in word.chars() {
            piece.push(ch);
            if self.text_width(&piece) > width && piece.chars().count() > 1 {
                piece.pop();
                pieces.push(std::mem::take(&mut piece));
                piece.push(ch);
            }
        }
        pieces.push(piece);
        pieces
    }
}

impl TextMeasure for FontSpec {
    fn text_height(&self, text: &str, width: f32) -> f32 {
        self.wrap(text, width).len() as f32 * self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        let font = FontSpec::new(Face::Regular, 10.0);
        assert!((font.text_width("0") - 5.56).abs() < 1e-4);
        assert!((font.text_width("No") - 12.78).abs() < 1e-4);
        assert_eq!(font.text_width(""), 0.0);

        let bold = FontSpec::new(Face::Bold, 10.0);
        assert!(bold.text_width("Nama") > font.text_width("Nama"));
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let font = FontSpec::new(Face::Regular, 9.0);
        assert_eq!(font.wrap("Ana", 100.0), vec!["Ana".to_string()]);
        assert_eq!(font.wrap("", 100.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let font = FontSpec::new(Face::Regular, 10.0);
        // "aaaa" is 22.24pt wide; two words do not fit in 30pt
        let lines = font.wrap("aaaa bbbb cccc", 30.0);
        assert_eq!(lines, vec!["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let font = FontSpec::new(Face::Regular, 10.0);
        let lines = font.wrap("0123456789", 12.0);
        assert_eq!(lines, vec!["01", "23", "45", "67", "89"]);
    }

    #[test]
    fn test_wrap_honours_newlines() {
        let font = FontSpec::new(Face::Regular, 10.0);
        assert_eq!(font.wrap("a\nb", 100.0), vec!["a", "b"]);
    }

    #[test]
    fn test_text_height_counts_lines() {
        let font = FontSpec::new(Face::Regular, 10.0);
        assert!((font.text_height("aaaa bbbb cccc", 30.0) - 36.0).abs() < 1e-4);
    }
}
