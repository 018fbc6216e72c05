//! Response Parser: turns free-form model output into ordered `QaEntry` values.
//!
//! Items follow the `OutputConvention`: `<n>. Question: <body> Answer: <body>`. An item
//! runs until the next line that starts with a numeral and a dot, or the end of the
//! text, so multi-line answers survive. The model's own numbering is discarded and
//! `question_no` is assigned by position.

use regex::Regex;

use crate::interview::convention::OutputConvention;
use crate::models::artifact::QaEntry;

pub struct ResponseParser {
    header: Regex,
    boundary: Regex,
    answer_label: &'static str,
}

impl ResponseParser {
    pub fn new(convention: &OutputConvention) -> Self {
        let header = format!(r"\d+\.\s*{}\s*", regex::escape(convention.question_label));
        Self {
            header: Regex::new(&header).expect("header pattern is valid"),
            boundary: Regex::new(r"\n[ \t]*\d+\.").expect("boundary pattern is valid"),
            answer_label: convention.answer_label,
        }
    }

    /// Returns every well-formed item in order of appearance. No matches is an empty `Vec`.
    pub fn parse(&self, raw_text: &str) -> Vec<QaEntry> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while let Some(header) = self.header.find_at(raw_text, pos) {
            let body_start = header.end();
            let body_end = self
                .boundary
                .find_at(raw_text, body_start)
                .map(|m| m.start())
                .unwrap_or(raw_text.len());
            pos = body_end.max(body_start);

            let body = &raw_text[body_start..body_end];
            let Some(split) = body.find(self.answer_label) else {
                continue;
            };
            let question = body[..split].trim();
            let answer = body[split + self.answer_label.len()..].trim();
            if question.is_empty() || answer.is_empty() {
                continue;
            }

            entries.push(QaEntry {
                question_no: entries.len() as u32 + 1,
                question: question.to_string(),
                ideal_answer: answer.to_string(),
            });
        }

        entries
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(&OutputConvention::current())
    }
}
