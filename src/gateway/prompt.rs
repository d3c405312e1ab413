//! Prompt construction for the three gateway operations.

use crate::model::{QUIZ_LENGTH, QUIZ_OPTION_COUNT};

/// Reply the model is told to use when the report lacks the answer.
pub const NOT_FOUND_REPLY: &str =
    "I'm sorry, but the answer to that question could not be found in the report.";

/// Prompt asking for a one-paragraph summary of a section.
pub fn summary_prompt(title: &str, content: &str) -> String {
    format!(
        "Summarize the following section of a research report, titled \"{title}\", \
         in a single concise paragraph. Do not use headers or bullet points, and do \
         not open with framing such as \"This section is about\"; state the key \
         points directly.\n\n\
         SECTION CONTENT:\n{content}"
    )
}

/// Prompt asking a question against the full report.
pub fn answer_prompt(document: &str, question: &str) -> String {
    format!(
        "You are an assistant that answers questions about the report below. \
         Use only information contained in the report. If the answer is not \
         contained in the report, reply exactly: \"{NOT_FOUND_REPLY}\"\n\n\
         REPORT:\n---\n{document}\n---\n\n\
         QUESTION: {question}"
    )
}

/// Prompt asking for a multiple-choice quiz over the report.
pub fn quiz_prompt(document: &str) -> String {
    format!(
        "Create a multiple-choice quiz about the report below. Write exactly \
         {QUIZ_LENGTH} questions. Each question must have exactly \
         {QUIZ_OPTION_COUNT} options and exactly one correct answer, and the \
         correctAnswer value must be copied verbatim from one of the options. \
         Respond with JSON only.\n\n\
         REPORT:\n---\n{document}\n---"
    )
}
