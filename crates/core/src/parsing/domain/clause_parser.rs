/// Grammatical role assigned to a parsed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenRole {
    CoordinatingConjunction,
    Punctuation,
    Other,
}

/// A token of transcript text with its surface form and role annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedToken {
    pub text: String,
    pub role: TokenRole,
}

impl ParsedToken {
    pub fn new(text: impl Into<String>, role: TokenRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

/// Domain interface for shallow grammatical analysis of transcript text.
///
/// Implementations tokenize a sentence and annotate each token with the
/// role relevant to clause-boundary detection.
pub trait ClauseParser: Send {
    fn parse(&self, text: &str) -> Result<Vec<ParsedToken>, Box<dyn std::error::Error>>;
}
