pub const DEFAULT_FALLBACK_STATEMENT: &str = "The document is your resume highlighting your academic background in AI & ML, technical skills, and project experience.";

/// Builds the single instruction sent to the model for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptComposer {
    fallback_statement: String,
}

impl PromptComposer {
    pub fn new(fallback_statement: impl Into<String>) -> Self {
        Self {
            fallback_statement: fallback_statement.into(),
        }
    }

    pub fn fallback_statement(&self) -> &str {
        &self.fallback_statement
    }

    pub fn compose(&self, question: &str, document_text: &str) -> String {
        compose_prompt(question, document_text, &self.fallback_statement)
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_STATEMENT)
    }
}

pub fn compose_prompt(question: &str, document_text: &str, fallback_statement: &str) -> String {
    format!(
        "Answer the question '{question}' based on the following text extracted from the provided document: {document_text}. \
         If you cannot find the data related to the question, respond with '{fallback_statement}'. \
         If the question concerns summarization, produce a summary of the text."
    )
}
