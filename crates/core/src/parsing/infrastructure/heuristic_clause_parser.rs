use crate::parsing::domain::clause_parser::{ClauseParser, ParsedToken, TokenRole};

/// English coordinating conjunctions recognized by the tagger.
const COORDINATING_CONJUNCTIONS: &[&str] = &["and", "but", "or", "so"];

/// Rule-based clause parser.
///
/// Splits text on whitespace, peels leading and trailing punctuation into
/// their own tokens, and tags each token by lexicon lookup. Internal
/// punctuation (apostrophes, hyphens) stays inside the word token.
pub struct HeuristicClauseParser;

impl HeuristicClauseParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicClauseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseParser for HeuristicClauseParser {
    fn parse(&self, text: &str) -> Result<Vec<ParsedToken>, Box<dyn std::error::Error>> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            tokenize_chunk(chunk, &mut tokens);
        }
        Ok(tokens)
    }
}

/// Split one whitespace-delimited chunk into punctuation and word tokens.
fn tokenize_chunk(chunk: &str, out: &mut Vec<ParsedToken>) {
    let leading: Vec<char> = chunk
        .chars()
        .take_while(|c| c.is_ascii_punctuation())
        .collect();
    let rest = &chunk[leading.iter().map(|c| c.len_utf8()).sum::<usize>()..];

    let trailing_count = rest
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_punctuation())
        .count();
    let core_len = rest
        .chars()
        .count()
        .saturating_sub(trailing_count);
    let core: String = rest.chars().take(core_len).collect();
    let trailing: Vec<char> = rest.chars().skip(core_len).collect();

    for c in leading {
        out.push(ParsedToken::new(c.to_string(), TokenRole::Punctuation));
    }
    if !core.is_empty() {
        out.push(ParsedToken::new(core.clone(), tag_word(&core)));
    }
    for c in trailing {
        out.push(ParsedToken::new(c.to_string(), TokenRole::Punctuation));
    }
}

fn tag_word(word: &str) -> TokenRole {
    let lower = word.to_lowercase();
    if COORDINATING_CONJUNCTIONS.contains(&lower.as_str()) {
        TokenRole::CoordinatingConjunction
    } else {
        TokenRole::Other
    }
}
