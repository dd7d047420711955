//! Text measurement for the auto-sizing class-box sections.
//!
//! The editor's section sizes follow the rendered bounding box of the text
//! at a fixed 12 px sans-serif font. Rather than asking a toolkit to lay the
//! text out, we measure with a proportional advance-width table (hundredths
//! of an em per printable ASCII character, one em for anything else) and a
//! fixed line height. This keeps the resize cascade a pure function of the
//! text, which is all the layout invariants need.

/// Fixed section font size in pixels.
pub const FONT_SIZE: f64 = 12.0;

/// Line height of the section font in pixels.
pub const LINE_HEIGHT: f64 = 14.6;

/// Advance widths for ASCII 0x20..=0x7E in hundredths of an em.
#[rustfmt::skip]
const ADVANCE: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Advance of a single line in hundredths of an em.
fn line_advance(line: &str) -> u32 {
    let mut total = 0u32;
    for c in line.chars() {
        if (' '..='~').contains(&c) {
            total += ADVANCE[(c as usize) - 0x20] as u32;
        } else {
            total += 100;
        }
    }
    total
}

/// Width in pixels of the widest line of `text`.
pub fn text_width(text: &str) -> f64 {
    let widest = text.split('\n').map(line_advance).max().unwrap_or(0);
    widest as f64 * FONT_SIZE * 0.01
}

/// Height in pixels of `text`.
///
/// Every `\n`-separated segment counts as a line, so a trailing newline
/// contributes an empty final line and empty text is one line high.
pub fn text_height(text: &str) -> f64 {
    let lines = text.split('\n').count();
    lines as f64 * LINE_HEIGHT
}

/// Measured bounding box of `text`, `(width, height)` in pixels.
pub fn text_extent(text: &str) -> (f64, f64) {
    (text_width(text), text_height(text))
}
