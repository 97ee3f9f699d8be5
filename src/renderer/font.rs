//! Tiny 5x7 bitmap font for the HUD

/// Glyph cell size in font pixels
pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Screen pixels per font pixel
pub const GLYPH_SCALE: u32 = 2;

type Glyph = [u8; GLYPH_HEIGHT as usize];

const DIGITS: [Glyph; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// Bitmap rows (top first, bit 4 is the leftmost column) for `c`
pub fn glyph(c: char) -> Option<&'static Glyph> {
    let glyph = match c.to_ascii_uppercase() {
        '0'..='9' => &DIGITS[c as usize - '0' as usize],
        'C' => &[0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'E' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'L' => &[0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'O' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'R' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => &[0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'V' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        ':' => &[0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        ' ' => &[0; 7],
        _ => return None,
    };
    Some(glyph)
}

/// Lit font pixels of `text` laid out from `(0, 0)`, as glyph-space `(column, row)`
pub fn lit_pixels(text: &str) -> impl Iterator<Item = (u32, u32)> + '_ {
    text.chars().enumerate().flat_map(|(i, c)| {
        let base = i as u32 * (GLYPH_WIDTH + 1);
        glyph(c).into_iter().flat_map(move |rows| {
            rows.iter().enumerate().flat_map(move |(row, bits)| {
                (0..GLYPH_WIDTH)
                    .filter(move |col| bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0)
                    .map(move |col| (base + col, row as u32))
            })
        })
    })
}
