use crate::shared::frame::Frame;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Printable ASCII (0x20..=0x7E), five column bytes per glyph, bit 0 is the top row.
#[rustfmt::skip]
const GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x08, 0x14, 0x54, 0x54, 0x3C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x02, 0x01, 0x02, 0x04, 0x02], // ~
];

/// Fixed-width 5x7 raster font, scaled by an integer factor.
///
/// Covers printable ASCII. Accented Latin letters are drawn as their base
/// letter; anything else is drawn as `?`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Pixel size `(width, height)` of `text` as drawn by [`draw`](Self::draw).
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let n = text.chars().count() as u32;
        if n == 0 {
            return (0, 0);
        }
        let width = n * GLYPH_ADVANCE - 1;
        (width * self.scale, GLYPH_HEIGHT * self.scale)
    }

    /// Draws `text` with its top-left corner at `(x, y)`. Pixels outside the
    /// frame are skipped.
    pub fn draw(&self, frame: &mut Frame, x: i32, y: i32, text: &str, color: [u8; 3]) {
        let s = self.scale as i32;
        let mut pen_x = x;
        for ch in text.chars() {
            let columns = glyph(ch);
            for (col, bits) in columns.iter().enumerate() {
                for row in 0..GLYPH_HEIGHT as i32 {
                    if bits & (1 << row) == 0 {
                        continue;
                    }
                    let px = pen_x + col as i32 * s;
                    let py = y + row * s;
                    for dy in 0..s {
                        for dx in 0..s {
                            frame.put_pixel(px + dx, py + dy, color);
                        }
                    }
                }
            }
            pen_x += GLYPH_ADVANCE as i32 * s;
        }
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new(1)
    }
}

fn glyph(ch: char) -> &'static [u8; 5] {
    let ch = fold_accent(ch);
    let index = match ch {
        ' '..='~' => ch as usize - ' ' as usize,
        _ => '?' as usize - ' ' as usize,
    };
    &GLYPHS[index]
}

fn fold_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lit_pixels(frame: &Frame, color: [u8; 3]) -> usize {
        frame
            .data()
            .chunks_exact(3)
            .filter(|px| *px == &color[..])
            .count()
    }

    #[rstest]
    #[case("", 1, (0, 0))]
    #[case("A", 1, (5, 7))]
    #[case("AB", 1, (11, 7))]
    #[case("AB", 2, (22, 14))]
    #[case("João", 1, (23, 7))]
    fn test_measure(#[case] text: &str, #[case] scale: u32, #[case] expected: (u32, u32)) {
        assert_eq!(BitmapFont::new(scale).measure(text), expected);
    }

    #[test]
    fn test_zero_scale_is_promoted_to_one() {
        assert_eq!(BitmapFont::new(0).scale(), 1);
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut frame = Frame::filled(10, 10, [0, 0, 0]);
        BitmapFont::default().draw(&mut frame, 0, 0, "   ", [255, 255, 255]);
        assert_eq!(lit_pixels(&frame, [255, 255, 255]), 0);
    }

    #[test]
    fn test_draw_stays_inside_measured_box() {
        let font = BitmapFont::new(2);
        let text = "Desconhecido";
        let (w, h) = font.measure(text);
        let mut frame = Frame::filled(w + 20, h + 20, [0, 0, 0]);
        font.draw(&mut frame, 10, 10, text, [255, 255, 255]);

        assert!(lit_pixels(&frame, [255, 255, 255]) > 0);
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let inside = (10..10 + w).contains(&x) && (10..10 + h).contains(&y);
                if !inside {
                    assert_eq!(frame.pixel(x, y), Some(&[0u8, 0, 0][..]), "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn test_scale_multiplies_lit_area() {
        let mut small = Frame::filled(40, 40, [0, 0, 0]);
        let mut large = Frame::filled(40, 40, [0, 0, 0]);
        BitmapFont::new(1).draw(&mut small, 0, 0, "H", [255, 0, 0]);
        BitmapFont::new(3).draw(&mut large, 0, 0, "H", [255, 0, 0]);
        assert_eq!(
            lit_pixels(&large, [255, 0, 0]),
            9 * lit_pixels(&small, [255, 0, 0])
        );
    }

    #[test]
    fn test_accented_letter_matches_base_letter() {
        let mut plain = Frame::filled(8, 8, [0, 0, 0]);
        let mut accented = Frame::filled(8, 8, [0, 0, 0]);
        BitmapFont::default().draw(&mut plain, 0, 0, "a", [255, 255, 255]);
        BitmapFont::default().draw(&mut accented, 0, 0, "ã", [255, 255, 255]);
        assert_eq!(plain, accented);
    }

    #[test]
    fn test_unsupported_char_falls_back_to_question_mark() {
        let mut question = Frame::filled(8, 8, [0, 0, 0]);
        let mut unknown = Frame::filled(8, 8, [0, 0, 0]);
        BitmapFont::default().draw(&mut question, 0, 0, "?", [255, 255, 255]);
        BitmapFont::default().draw(&mut unknown, 0, 0, "字", [255, 255, 255]);
        assert_eq!(question, unknown);
    }

    #[test]
    fn test_draw_clips_at_frame_edges() {
        let mut frame = Frame::filled(4, 4, [0, 0, 0]);
        BitmapFont::new(2).draw(&mut frame, -3, -3, "W", [255, 255, 255]);
        assert_eq!(frame.data().len(), 48);
    }
}
