//! Token scanning for chain references and prompts.
//!
//! Two fixed grammars are recognised inside template bodies:
//!
//! - `[Chain:<name>]` references another chain by name
//! - `[?:<label>]` asks the user for a value
//!
//! `<name>`/`<label>` consist of ASCII letters, digits, `_`, `-` and
//! whitespace. Anything else (including unterminated brackets) is plain text.
//! The scanner never rewrites text; callers substitute spans themselves.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

static CHAIN_REF_RE: OnceLock<Regex> = OnceLock::new();
static PROMPT_RE: OnceLock<Regex> = OnceLock::new();

fn chain_ref_re() -> &'static Regex {
    CHAIN_REF_RE.get_or_init(|| {
        Regex::new(r"\[Chain:([A-Za-z0-9_\-\s]+?)\]").expect("chain reference pattern is valid")
    })
}

fn prompt_re() -> &'static Regex {
    PROMPT_RE.get_or_init(|| {
        Regex::new(r"\[\?:([A-Za-z0-9_\-\s]+?)\]").expect("prompt pattern is valid")
    })
}

/// Which grammar a token matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    ChainReference,
    Prompt,
}

impl TokenKind {
    fn regex(self) -> &'static Regex {
        match self {
            TokenKind::ChainReference => chain_ref_re(),
            TokenKind::Prompt => prompt_re(),
        }
    }
}

/// A single token occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range of the whole token, brackets included.
    pub span: Range<usize>,
    /// Captured name or label with surrounding whitespace trimmed.
    pub name: String,
}

/// Returns true for characters allowed inside a token name or label.
pub fn is_token_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace()
}

/// All tokens of `kind` in `text`, left to right.
pub fn tokens(text: &str, kind: TokenKind) -> Vec<Token> {
    kind.regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(Token {
                kind,
                span: whole.range(),
                name: inner.as_str().trim().to_string(),
            })
        })
        .collect()
}

/// All `[Chain:Name]` tokens in `text`.
pub fn chain_references(text: &str) -> Vec<Token> {
    tokens(text, TokenKind::ChainReference)
}

/// All `[?:Label]` tokens in `text`.
pub fn prompts(text: &str) -> Vec<Token> {
    tokens(text, TokenKind::Prompt)
}

/// Returns true if `text` contains at least one token of either kind.
pub fn has_tokens(text: &str) -> bool {
    chain_ref_re().is_match(text) || prompt_re().is_match(text)
}

/// Distinct names referenced by a text, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSummary {
    pub chains: Vec<String>,
    pub prompts: Vec<String>,
}

/// Collects the distinct chain names and prompt labels used in `text`.
pub fn scan_references(text: &str) -> ReferenceSummary {
    let mut summary = ReferenceSummary::default();
    for token in chain_references(text) {
        if !summary.chains.contains(&token.name) {
            summary.chains.push(token.name);
        }
    }
    for token in prompts(text) {
        if !summary.prompts.contains(&token.name) {
            summary.prompts.push(token.name);
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_reference_spans_and_trimmed_names() {
        let text = "A [Chain: Greeting ] B [Chain:Sig-2]";
        let found = chain_references(text);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Greeting");
        assert_eq!(&text[found[0].span.clone()], "[Chain: Greeting ]");
        assert_eq!(found[1].name, "Sig-2");
        assert_eq!(found[1].kind, TokenKind::ChainReference);
    }

    #[test]
    fn test_prompt_tokens() {
        let found = prompts("Hi [?:First Name], you owe [?:amount_due]");
        let names: Vec<_> = found.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["First Name", "amount_due"]);
    }

    #[test]
    fn test_malformed_tokens_do_not_match() {
        assert!(prompts("unterminated [?:Name and more").is_empty());
        assert!(chain_references("[Chain:]").is_empty());
        assert!(chain_references("[Chain:bad.name]").is_empty());
        assert!(chain_references("[chain:lowercase]").is_empty());
        assert!(!has_tokens("plain [text] here"));
    }

    #[test]
    fn test_scan_references_deduplicates() {
        let summary = scan_references("[Chain:A] [?:x] [Chain:B] [Chain:A] [?:x] [?:y]");
        assert_eq!(summary.chains, vec!["A", "B"]);
        assert_eq!(summary.prompts, vec!["x", "y"]);
    }

    #[test]
    fn test_token_name_chars() {
        assert!(is_token_name_char('a'));
        assert!(is_token_name_char('-'));
        assert!(is_token_name_char(' '));
        assert!(!is_token_name_char(':'));
        assert!(!is_token_name_char(']'));
        assert!(!is_token_name_char('é'));
    }
}
