//! Static font metrics and page geometry for PDF export.
//!
//! Widths come from the standard Helvetica AFM table in 1/1000 em units and are
//! scaled by the font size, so `measure` returns PDF points. The ASCII table
//! covers 0x20..=0x7E (95 printable characters); index = (char as usize) - 32.
//! The WinAnsi 0x80..=0x9F block (curly quotes, dashes, euro, bullet) has its
//! own table, shared with the PDF encoder.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Measuring trait
// ────────────────────────────────────────────────────────────────────────────

/// Anything that can report the rendered width of a string.
///
/// Implemented for plain closures so callers can pass `|s: &str| ...` directly.
pub trait FontMetrics {
    fn measure(&self, text: &str) -> f32;
}

impl<F> FontMetrics for F
where
    F: Fn(&str) -> f32,
{
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Page layout parameters, all in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    /// Applied to left, right, top and bottom.
    pub margin: f32,
    pub line_height: f32,
    pub font_size: f32,
}

impl PageGeometry {
    /// Usable horizontal space for text.
    pub fn printable_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Baseline of the first line on a fresh page.
    pub fn top_y(&self) -> f32 {
        self.page_height - self.margin
    }
}

/// US Letter, 50pt margins, 20pt leading, 12pt Helvetica.
impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            line_height: 20.0,
            font_size: 12.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helvetica
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica advance widths at a given point size.
#[derive(Debug, Clone, Copy)]
pub struct Helvetica {
    pub font_size: f32,
}

impl Helvetica {
    pub fn new(font_size: f32) -> Self {
        Self { font_size }
    }
}

impl FontMetrics for Helvetica {
    fn measure(&self, text: &str) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    HELVETICA_WIDTHS[code - 32] as u32
                } else if let Some(&(_, _, width)) = win_ansi_high(c) {
                    width as u32
                } else {
                    HELVETICA_FALLBACK_WIDTH as u32
                }
            })
            .sum();
        units as f32 * self.font_size / 1000.0
    }
}

/// Single-byte WinAnsiEncoding code for `c`, or `None` if the encoding has no
/// glyph for it. Control characters and DEL have no glyph.
pub fn win_ansi_code(c: char) -> Option<u8> {
    match u32::from(c) {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => u8::try_from(code).ok(),
        _ => win_ansi_high(c).map(|&(_, code, _)| code),
    }
}

fn win_ansi_high(c: char) -> Option<&'static (char, u8, u16)> {
    WIN_ANSI_HIGH.iter().find(|(ch, _, _)| *ch == c)
}

/// Width used for characters outside the ASCII table.
const HELVETICA_FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

/// WinAnsi 0x80..=0x9F: (character, code, Helvetica width). 0x81, 0x8D, 0x8F,
/// 0x90 and 0x9D are undefined.
#[rustfmt::skip]
static WIN_ANSI_HIGH: [(char, u8, u16); 27] = [
    ('\u{20AC}', 0x80, 556),  // Euro
    ('\u{201A}', 0x82, 222),  // quotesinglbase
    ('\u{0192}', 0x83, 556),  // florin
    ('\u{201E}', 0x84, 333),  // quotedblbase
    ('\u{2026}', 0x85, 1000), // ellipsis
    ('\u{2020}', 0x86, 556),  // dagger
    ('\u{2021}', 0x87, 556),  // daggerdbl
    ('\u{02C6}', 0x88, 333),  // circumflex
    ('\u{2030}', 0x89, 1000), // perthousand
    ('\u{0160}', 0x8A, 667),  // Scaron
    ('\u{2039}', 0x8B, 333),  // guilsinglleft
    ('\u{0152}', 0x8C, 1000), // OE
    ('\u{017D}', 0x8E, 611),  // Zcaron
    ('\u{2018}', 0x91, 222),  // quoteleft
    ('\u{2019}', 0x92, 222),  // quoteright
    ('\u{201C}', 0x93, 333),  // quotedblleft
    ('\u{201D}', 0x94, 333),  // quotedblright
    ('\u{2022}', 0x95, 350),  // bullet
    ('\u{2013}', 0x96, 556),  // endash
    ('\u{2014}', 0x97, 1000), // emdash
    ('\u{02DC}', 0x98, 333),  // tilde
    ('\u{2122}', 0x99, 1000), // trademark
    ('\u{0161}', 0x9A, 500),  // scaron
    ('\u{203A}', 0x9B, 333),  // guilsinglright
    ('\u{0153}', 0x9C, 944),  // oe
    ('\u{017E}', 0x9E, 500),  // zcaron
    ('\u{0178}', 0x9F, 667),  // Ydieresis
];
