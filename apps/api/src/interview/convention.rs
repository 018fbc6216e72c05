//! Output convention: the textual contract between the generation prompt and the
//! response parser.
//!
//! The prompt asks the model for `N. Question: ... Answer: ...` items and the parser
//! matches exactly that shape. Both sides read their labels from the same
//! `OutputConvention`, so a change to one is a change to the other. Bump `version`
//! whenever the shape changes.

/// Prompt template. `{question_count}`, `{question_label}`, `{answer_label}` and
/// `{resume_text}` are substituted by `OutputConvention::build_prompt`.
const PROMPT_TEMPLATE: &str = r#"
You are a technical interviewer. Based on the following resume content, generate {question_count} interview questions. For each question, also provide the ideal answer.

Format every item exactly like this, where N is the item number counting from 1, and start each item on a new line:
N. {question_label} <the question> {answer_label} <the ideal answer>

Resume:
"""{resume_text}"""
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConvention {
    pub version: u32,
    pub question_count: u32,
    pub question_label: &'static str,
    pub answer_label: &'static str,
}

impl OutputConvention {
    pub const V1: OutputConvention = OutputConvention {
        version: 1,
        question_count: 20,
        question_label: "Question:",
        answer_label: "Answer:",
    };

    pub fn current() -> Self {
        Self::V1
    }

    /// Builds the single instruction prompt, embedding the résumé text verbatim.
    pub fn build_prompt(&self, resume_text: &str) -> String {
        PROMPT_TEMPLATE
            .replace("{question_count}", &self.question_count.to_string())
            .replace("{question_label}", self.question_label)
            .replace("{answer_label}", self.answer_label)
            // substituted last so résumé content is never scanned for placeholders
            .replace("{resume_text}", resume_text)
    }
}

impl Default for OutputConvention {
    fn default() -> Self {
        Self::current()
    }
}
