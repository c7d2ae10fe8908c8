//! Pure layout math for Open Graph images.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! ```text
//! 0 ┌──────────────────────────────── 1920 ────────────────────────────────┐
//!   │                              [logo 60×60 @ 940,100]                   │
//! 180├─ title layer 1920×600, lines centred on its vertical middle ────────┤
//!   │                        A Practical Guide to the                       │
//!   │                         Web Cryptography API                          │
//! 780├──────────────────────────────────────────────────────────────────────┤
//! 790│                     site label layer 1920×80                          │
//! 960└──────────────────────────────────────────────────────────────────────┘
//! ```

pub const CANVAS_WIDTH: u32 = 1920;
pub const CANVAS_HEIGHT: u32 = 960;

pub const TITLE_HEIGHT: u32 = 600;
pub const TITLE_FONT_SIZE: f32 = 80.0;
pub const TITLE_FONT_WEIGHT: u16 = 700;
/// Row height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.25;

pub const LABEL_HEIGHT: u32 = 80;
pub const LABEL_FONT_SIZE: f32 = 60.0;
pub const LABEL_BASELINE: f32 = 50.0;
pub const LABEL_TOP: u32 = 790;

pub const LOGO_LEFT: u32 = 940;
pub const LOGO_TOP: u32 = 100;

/// Top edge of the title layer: centred vertically on the canvas.
pub const fn title_top() -> u32 {
    (CANVAS_HEIGHT - TITLE_HEIGHT) / 2
}

/// Split a title into two lines at the first whitespace character at or after
/// the middle.
///
/// The scan starts at character index `floor(len / 2)` and only moves
/// forward. The whitespace character itself is dropped. With none at or after
/// the middle the whole title is the first line and the second is empty.
///
/// ```text
/// "Hello big world" → ("Hello big", "world")
/// "Hello big\tworld" → ("Hello big", "world")   tab breaks like a space
/// "AB CDEFG"        → ("AB CDEFG", "")      space is before the middle
/// "ABCDEFG"         → ("ABCDEFG", "")
/// ```
pub fn split_title(title: &str) -> (String, String) {
    let chars: Vec<char> = title.chars().collect();
    let middle = chars.len() / 2;
    match chars[middle..].iter().position(|c| c.is_whitespace()) {
        Some(pos) => {
            let at = middle + pos;
            (
                chars[..at].iter().collect(),
                chars[at + 1..].iter().collect(),
            )
        }
        None => (title.to_string(), String::new()),
    }
}

/// Lines drawn on a post's title image. Always two, the second may be empty.
pub fn title_lines(title: &str) -> Vec<String> {
    let (first, second) = split_title(title);
    vec![first, second]
}

/// The single line drawn on a series image.
pub fn series_lines(series_name: &str) -> Vec<String> {
    vec![format!("{series_name} (Series)")]
}

/// Baseline `y` of line `index` when `line_count` lines are centred in a
/// layer of `canvas_height`.
///
/// `row * index + row / 2 + canvas_height / 2 - row * line_count / 2`
/// with `row = font_size * 1.25`.
pub fn line_offset(line_count: usize, index: usize, font_size: f32, canvas_height: f32) -> f32 {
    let row_height = font_size * LINE_HEIGHT;
    let total_height = row_height * line_count as f32;
    row_height * index as f32 + row_height / 2.0 + canvas_height / 2.0 - total_height / 2.0
}
