//! Text Paginator: greedy word wrap with page overflow.
//!
//! # Algorithm
//! - Source text is split on `\n`; every source line is wrapped independently.
//! - Words are appended to the current line until the measured width of the
//!   space-joined line exceeds the printable width. The overflowing word is
//!   taken back out, the line is emitted, and the word starts the next line.
//! - A word wider than the printable width is emitted alone and overflows the
//!   right margin. Words are never split. When such a word starts a source
//!   line, the flush before it draws an empty line, so it lands one slot lower.
//! - A blank source line consumes one line slot without drawing anything.
//! - Before a line is drawn, if the cursor has dropped below the bottom margin
//!   a new page is opened and the cursor resets to the top.
//!
//! Output is a plain value: rendering to bytes lives in `pdf.rs`.

use serde::Serialize;

use crate::layout::font_metrics::{FontMetrics, PageGeometry};

/// One line of text positioned on a page. `y` is the baseline, measured from
/// the bottom edge as PDF does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub lines: Vec<DrawnLine>,
}

/// Immutable result of pagination. Always holds at least one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawnLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }
}

/// Lays `content` out onto pages of the given geometry.
pub fn paginate<M>(content: &str, geometry: &PageGeometry, metrics: &M) -> PaginatedDocument
where
    M: FontMetrics + ?Sized,
{
    let mut cursor = Cursor::new(*geometry);
    let max_width = geometry.printable_width();

    for source_line in content.split('\n') {
        let mut current_line: Vec<&str> = Vec::new();

        for word in source_line.split_whitespace() {
            current_line.push(word);
            if metrics.measure(&current_line.join(" ")) > max_width {
                current_line.pop();
                cursor.emit(current_line.join(" "));
                current_line = vec![word];
            }
        }

        if !current_line.is_empty() {
            cursor.emit(current_line.join(" "));
        } else {
            cursor.skip_line();
        }
    }

    cursor.finish()
}

/// Page-building state: finished pages, the open page, and the baseline cursor.
struct Cursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl Cursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            y: geometry.top_y(),
        }
    }

    fn emit(&mut self, text: String) {
        if self.y < self.geometry.margin {
            let full = std::mem::take(&mut self.current);
            self.pages.push(full);
            self.y = self.geometry.top_y();
        }
        self.current.lines.push(DrawnLine {
            x: self.geometry.margin,
            y: self.y,
            text,
        });
        self.y -= self.geometry.line_height;
    }

    fn skip_line(&mut self) {
        self.y -= self.geometry.line_height;
    }

    fn finish(mut self) -> PaginatedDocument {
        self.pages.push(self.current);
        PaginatedDocument {
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::Helvetica;
    use proptest::prelude::*;

    fn six_units(s: &str) -> f32 {
        s.chars().count() as f32 * 6.0
    }

    fn letter() -> PageGeometry {
        PageGeometry::default()
    }

    /// 40 distinct ten-character words.
    fn forty_words() -> Vec<String> {
        (0..40).map(|i| format!("word{i:06}")).collect()
    }

    #[test]
    fn test_empty_content_is_one_empty_page() {
        let doc = paginate("", &letter(), &six_units);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.lines().count(), 0);
    }

    #[test]
    fn test_single_short_word() {
        let doc = paginate("Agreement", &letter(), &six_units);
        assert_eq!(doc.page_count(), 1);
        let lines: Vec<_> = doc.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Agreement");
        assert_eq!(lines[0].x, 50.0);
        assert_eq!(lines[0].y, 742.0);
    }

    #[test]
    fn test_three_words_fit_on_one_line() {
        let doc = paginate(
            "AAAAAAAAAA BBBBBBBBBB CCCCCCCCCC",
            &letter(),
            &six_units,
        );
        let lines: Vec<_> = doc.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "AAAAAAAAAA BBBBBBBBBB CCCCCCCCCC");
    }

    #[test]
    fn test_forty_words_wrap_seven_per_line() {
        // 7 words = 7*60 + 6*6 = 456 <= 512; 8 words = 522 > 512.
        let words = forty_words();
        let doc = paginate(&words.join(" "), &letter(), &six_units);
        let lines: Vec<_> = doc.lines().collect();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(lines.len(), 6);
        for (i, line) in lines.iter().enumerate() {
            let expected = if i < 5 { 7 } else { 5 };
            assert_eq!(line.text.split(' ').count(), expected, "line {i}");
            assert_eq!(line.y, 742.0 - 20.0 * i as f32);
            assert!(six_units(&line.text) <= 512.0);
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.text.split(' ')).collect();
        assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_blank_source_line_consumes_a_slot() {
        let doc = paginate("first\n\nthird", &letter(), &six_units);
        let ys: Vec<f32> = doc.lines().map(|l| l.y).collect();
        assert_eq!(ys, vec![742.0, 702.0]);
    }

    #[test]
    fn test_overwide_word_is_emitted_alone() {
        let giant = "X".repeat(100); // 600 units > 512
        let content = format!("a {giant} b");
        let doc = paginate(&content, &letter(), &six_units);
        let texts: Vec<&str> = doc.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a", giant.as_str(), "b"]);
    }

    #[test]
    fn test_overwide_first_word_leaves_an_empty_slot() {
        let giant = "X".repeat(100);
        let doc = paginate(&giant, &letter(), &six_units);
        let placed: Vec<(f32, &str)> = doc.lines().map(|l| (l.y, l.text.as_str())).collect();
        assert_eq!(placed, vec![(742.0, ""), (722.0, giant.as_str())]);

        let content = format!("{giant} tail\nnext");
        let doc = paginate(&content, &letter(), &six_units);
        let placed: Vec<(f32, &str)> = doc.lines().map(|l| (l.y, l.text.as_str())).collect();
        assert_eq!(
            placed,
            vec![
                (742.0, ""),
                (722.0, giant.as_str()),
                (702.0, "tail"),
                (682.0, "next"),
            ]
        );
    }

    #[test]
    fn test_overwide_first_word_shifts_page_break() {
        // 34 short lines fill baselines 742..=82; the empty flush takes 62,
        // so the over-wide word opens the second page.
        let giant = "X".repeat(100);
        let mut content = vec!["line"; 34].join("\n");
        content.push('\n');
        content.push_str(&giant);
        let doc = paginate(&content, &letter(), &six_units);

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].lines.len(), 35);
        assert_eq!(doc.pages[0].lines[34].text, "");
        assert_eq!(doc.pages[0].lines[34].y, 62.0);
        assert_eq!(doc.pages[1].lines[0].text, giant);
        assert_eq!(doc.pages[1].lines[0].y, 742.0);
    }

    #[test]
    fn test_page_breaks_after_35_lines() {
        // Baselines 742, 722, ... 62 fit; the 36th line would sit at 42 < 50.
        let content = vec!["line"; 36].join("\n");
        let doc = paginate(&content, &letter(), &six_units);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].lines.len(), 35);
        assert_eq!(doc.pages[0].lines.last().unwrap().y, 62.0);
        assert_eq!(doc.pages[1].lines[0].y, 742.0);
    }

    #[test]
    fn test_trailing_newlines_do_not_add_pages() {
        let mut content = vec!["line"; 35].join("\n");
        content.push_str("\n\n\n");
        let doc = paginate(&content, &letter(), &six_units);
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_helvetica_contract_text_wraps() {
        let paragraph = "This Service Agreement is entered into by and between the parties \
                         named below and sets out the terms under which services are provided.";
        let metrics = Helvetica::new(12.0);
        let doc = paginate(paragraph, &letter(), &metrics);
        assert!(doc.lines().count() >= 2);
        for line in doc.lines() {
            assert!(metrics.measure(&line.text) <= 512.0);
        }
    }

    #[test]
    fn test_windows_line_endings_are_trimmed() {
        let doc = paginate("one\r\ntwo\r\n", &letter(), &six_units);
        let texts: Vec<&str> = doc.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    fn word_strategy() -> impl Strategy<Value = String> {
        "[a-z]{1,12}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_paginate_is_pure(words in prop::collection::vec(word_strategy(), 0..300)) {
            let content = words.join(" ");
            let a = paginate(&content, &letter(), &six_units);
            let b = paginate(&content, &letter(), &six_units);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_words_are_never_split(
            lines in prop::collection::vec(prop::collection::vec(word_strategy(), 0..40), 0..60)
        ) {
            let content = lines
                .iter()
                .map(|l| l.join(" "))
                .collect::<Vec<_>>()
                .join("\n");
            let doc = paginate(&content, &letter(), &six_units);
            let drawn: Vec<String> = doc
                .lines()
                .flat_map(|l| l.text.split(' ').map(str::to_string).collect::<Vec<_>>())
                .collect();
            let source: Vec<String> = lines.into_iter().flatten().collect();
            prop_assert_eq!(drawn, source);
        }

        #[test]
        fn prop_more_words_never_fewer_pages(
            words in prop::collection::vec(word_strategy(), 1..800),
            cut in 0usize..800,
        ) {
            let cut = cut.min(words.len());
            let shorter = paginate(&words[..cut].join(" "), &letter(), &six_units);
            let longer = paginate(&words.join(" "), &letter(), &six_units);
            prop_assert!(longer.page_count() >= shorter.page_count());
        }

        #[test]
        fn prop_lines_stay_inside_vertical_margins(
            lines in prop::collection::vec(prop::collection::vec(word_strategy(), 0..20), 0..200)
        ) {
            let content = lines
                .iter()
                .map(|l| l.join(" "))
                .collect::<Vec<_>>()
                .join("\n");
            let doc = paginate(&content, &letter(), &six_units);
            for line in doc.lines() {
                prop_assert!(line.y >= 50.0);
                prop_assert!(line.y <= 742.0);
            }
        }
    }
}
