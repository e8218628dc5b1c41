//! Fixed 5x7 bitmap font.
//!
//! Each glyph is five column bytes; bit 0 is the top row, bit 6 the bottom.
//! The table covers ASCII `0x20..=0x7F` indexed by code point, but only
//! space, `.`, `:`, digits and letters carry pixels. Every other entry, and
//! every character outside the table, renders as [`BLANK`].

/// Glyph width in columns.
pub const GLYPH_WIDTH: usize = 5;

/// Glyph height in rows.
pub const GLYPH_HEIGHT: usize = 7;

/// Horizontal advance per character: glyph plus one spacing column.
pub const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

/// One glyph: five column bitmaps.
pub type Glyph = [u8; GLYPH_WIDTH];

/// Fallback for unmapped characters.
pub const BLANK: Glyph = [0x00; GLYPH_WIDTH];

const FIRST: u8 = b' ';

#[rustfmt::skip]
static GLYPHS: [Glyph; 96] = {
    let mut t = [BLANK; 96];
    t[(b'.' - FIRST) as usize] = [0x00, 0x40, 0x60, 0x00, 0x00];
    t[(b':' - FIRST) as usize] = [0x00, 0x36, 0x36, 0x00, 0x00];

    t[(b'0' - FIRST) as usize] = [0x3E, 0x51, 0x49, 0x45, 0x3E];
    t[(b'1' - FIRST) as usize] = [0x00, 0x42, 0x7F, 0x40, 0x00];
    t[(b'2' - FIRST) as usize] = [0x42, 0x61, 0x51, 0x49, 0x46];
    t[(b'3' - FIRST) as usize] = [0x21, 0x41, 0x45, 0x4B, 0x31];
    t[(b'4' - FIRST) as usize] = [0x18, 0x14, 0x12, 0x7F, 0x10];
    t[(b'5' - FIRST) as usize] = [0x27, 0x45, 0x45, 0x45, 0x39];
    t[(b'6' - FIRST) as usize] = [0x3C, 0x4A, 0x49, 0x49, 0x30];
    t[(b'7' - FIRST) as usize] = [0x01, 0x71, 0x09, 0x05, 0x03];
    t[(b'8' - FIRST) as usize] = [0x36, 0x49, 0x49, 0x49, 0x36];
    t[(b'9' - FIRST) as usize] = [0x06, 0x49, 0x49, 0x29, 0x1E];

    t[(b'A' - FIRST) as usize] = [0x7E, 0x11, 0x11, 0x11, 0x7E];
    t[(b'B' - FIRST) as usize] = [0x7F, 0x49, 0x49, 0x49, 0x36];
    t[(b'C' - FIRST) as usize] = [0x3E, 0x41, 0x41, 0x41, 0x22];
    t[(b'D' - FIRST) as usize] = [0x7F, 0x41, 0x41, 0x22, 0x1C];
    t[(b'E' - FIRST) as usize] = [0x7F, 0x49, 0x49, 0x49, 0x41];
    t[(b'F' - FIRST) as usize] = [0x7F, 0x09, 0x09, 0x09, 0x01];
    t[(b'G' - FIRST) as usize] = [0x3E, 0x41, 0x49, 0x49, 0x7A];
    t[(b'H' - FIRST) as usize] = [0x7F, 0x08, 0x08, 0x08, 0x7F];
    t[(b'I' - FIRST) as usize] = [0x00, 0x41, 0x7F, 0x41, 0x00];
    t[(b'J' - FIRST) as usize] = [0x20, 0x40, 0x41, 0x3F, 0x01];
    t[(b'K' - FIRST) as usize] = [0x7F, 0x08, 0x14, 0x22, 0x41];
    t[(b'L' - FIRST) as usize] = [0x7F, 0x40, 0x40, 0x40, 0x40];
    t[(b'M' - FIRST) as usize] = [0x7F, 0x02, 0x0C, 0x02, 0x7F];
    t[(b'N' - FIRST) as usize] = [0x7F, 0x04, 0x08, 0x10, 0x7F];
    t[(b'O' - FIRST) as usize] = [0x3E, 0x41, 0x41, 0x41, 0x3E];
    t[(b'P' - FIRST) as usize] = [0x7F, 0x09, 0x09, 0x09, 0x06];
    t[(b'Q' - FIRST) as usize] = [0x3E, 0x41, 0x51, 0x21, 0x5E];
    t[(b'R' - FIRST) as usize] = [0x7F, 0x09, 0x19, 0x29, 0x46];
    t[(b'S' - FIRST) as usize] = [0x46, 0x49, 0x49, 0x49, 0x31];
    t[(b'T' - FIRST) as usize] = [0x01, 0x01, 0x7F, 0x01, 0x01];
    t[(b'U' - FIRST) as usize] = [0x3F, 0x40, 0x40, 0x40, 0x3F];
    t[(b'V' - FIRST) as usize] = [0x1F, 0x20, 0x40, 0x20, 0x1F];
    t[(b'W' - FIRST) as usize] = [0x7F, 0x20, 0x18, 0x20, 0x7F];
    t[(b'X' - FIRST) as usize] = [0x63, 0x14, 0x08, 0x14, 0x63];
    t[(b'Y' - FIRST) as usize] = [0x03, 0x04, 0x78, 0x04, 0x03];
    t[(b'Z' - FIRST) as usize] = [0x61, 0x51, 0x49, 0x45, 0x43];

    t[(b'a' - FIRST) as usize] = [0x20, 0x54, 0x54, 0x54, 0x78];
    t[(b'b' - FIRST) as usize] = [0x7F, 0x48, 0x44, 0x44, 0x38];
    t[(b'c' - FIRST) as usize] = [0x38, 0x44, 0x44, 0x44, 0x20];
    t[(b'd' - FIRST) as usize] = [0x38, 0x44, 0x44, 0x48, 0x7F];
    t[(b'e' - FIRST) as usize] = [0x38, 0x54, 0x54, 0x54, 0x18];
    t[(b'f' - FIRST) as usize] = [0x08, 0x7E, 0x09, 0x01, 0x02];
    t[(b'g' - FIRST) as usize] = [0x0C, 0x52, 0x52, 0x52, 0x3E];
    t[(b'h' - FIRST) as usize] = [0x7F, 0x08, 0x04, 0x04, 0x78];
    t[(b'i' - FIRST) as usize] = [0x00, 0x44, 0x7D, 0x40, 0x00];
    t[(b'j' - FIRST) as usize] = [0x20, 0x40, 0x44, 0x3D, 0x00];
    t[(b'k' - FIRST) as usize] = [0x7F, 0x10, 0x28, 0x44, 0x00];
    t[(b'l' - FIRST) as usize] = [0x00, 0x41, 0x7F, 0x40, 0x00];
    t[(b'm' - FIRST) as usize] = [0x7C, 0x04, 0x18, 0x04, 0x78];
    t[(b'n' - FIRST) as usize] = [0x7C, 0x08, 0x04, 0x04, 0x78];
    t[(b'o' - FIRST) as usize] = [0x38, 0x44, 0x44, 0x44, 0x38];
    t[(b'p' - FIRST) as usize] = [0x7C, 0x14, 0x14, 0x14, 0x08];
    t[(b'q' - FIRST) as usize] = [0x08, 0x14, 0x14, 0x18, 0x7C];
    t[(b'r' - FIRST) as usize] = [0x7C, 0x08, 0x04, 0x04, 0x08];
    t[(b's' - FIRST) as usize] = [0x48, 0x54, 0x54, 0x54, 0x20];
    t[(b't' - FIRST) as usize] = [0x04, 0x3F, 0x44, 0x40, 0x20];
    t[(b'u' - FIRST) as usize] = [0x3C, 0x40, 0x40, 0x20, 0x7C];
    t[(b'v' - FIRST) as usize] = [0x1C, 0x20, 0x40, 0x20, 0x1C];
    t[(b'w' - FIRST) as usize] = [0x3C, 0x40, 0x30, 0x40, 0x3C];
    t[(b'x' - FIRST) as usize] = [0x44, 0x28, 0x10, 0x28, 0x44];
    t[(b'y' - FIRST) as usize] = [0x0C, 0x50, 0x50, 0x50, 0x3C];
    t[(b'z' - FIRST) as usize] = [0x44, 0x64, 0x54, 0x4C, 0x44];
    t
};

/// Looks up the bitmap for `c`, falling back to [`BLANK`].
///
/// ```
/// use joydrive::display::font::{glyph, BLANK};
///
/// assert_ne!(glyph('A'), BLANK);
/// assert_eq!(glyph('-'), BLANK);
/// assert_eq!(glyph('é'), BLANK);
/// ```
pub fn glyph(c: char) -> Glyph {
    u8::try_from(c)
        .ok()
        .and_then(|b| b.checked_sub(FIRST))
        .and_then(|i| GLYPHS.get(usize::from(i)))
        .copied()
        .unwrap_or(BLANK)
}
