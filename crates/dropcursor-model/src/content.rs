//! Content expressions describing which children a node type accepts.
//!
//! The grammar is a small subset of the usual schema content language:
//!
//! ```text
//! expr   := term*
//! term   := atom ("*" | "+" | "?")?
//! atom   := NAME | "(" NAME ("|" NAME)* ")"
//! ```
//!
//! `NAME` is either a node type name or a group name. Groups are expanded to
//! the concrete type names when the schema is built, so matching only ever
//! compares type names.

use crate::ModelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Term {
    pub(crate) names: Vec<String>,
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
}

impl Term {
    fn allows(&self, type_name: &str) -> bool {
        self.names.iter().any(|n| n == type_name)
    }
}

/// Parsed content expression of a node type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentExpr {
    pub(crate) terms: Vec<Term>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Name(&'a str),
    Open,
    Close,
    Pipe,
    Star,
    Plus,
    Question,
}

fn tokenize(expr: &str) -> Result<Vec<Token<'_>>, ModelError> {
    let mut tokens = Vec::new();
    let bytes = expr.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let single = match b {
            b'(' => Some(Token::Open),
            b')' => Some(Token::Close),
            b'|' => Some(Token::Pipe),
            b'*' => Some(Token::Star),
            b'+' => Some(Token::Plus),
            b'?' => Some(Token::Question),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push(token);
            i += 1;
        } else if b.is_ascii_whitespace() {
            i += 1;
        } else if b.is_ascii_alphanumeric() || b == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push(Token::Name(&expr[start..i]));
        } else {
            return Err(invalid(expr, format!("unexpected character {:?}", b as char)));
        }
    }
    Ok(tokens)
}

fn invalid(expr: &str, reason: impl Into<String>) -> ModelError {
    ModelError::InvalidContentExpr {
        expr: expr.to_string(),
        reason: reason.into(),
    }
}

impl ContentExpr {
    /// Parse an expression. Names are kept as written; the schema expands
    /// groups afterwards.
    pub fn parse(expr: &str) -> Result<Self, ModelError> {
        let tokens = tokenize(expr)?;
        let mut terms = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let names = match tokens[i] {
                Token::Name(name) => {
                    i += 1;
                    vec![name.to_string()]
                }
                Token::Open => {
                    i += 1;
                    let mut names = Vec::new();
                    loop {
                        match tokens.get(i) {
                            Some(Token::Name(name)) => names.push(name.to_string()),
                            _ => return Err(invalid(expr, "expected a name inside parentheses")),
                        }
                        i += 1;
                        match tokens.get(i) {
                            Some(Token::Pipe) => i += 1,
                            Some(Token::Close) => {
                                i += 1;
                                break;
                            }
                            _ => return Err(invalid(expr, "unclosed parenthesis")),
                        }
                    }
                    names
                }
                other => return Err(invalid(expr, format!("unexpected {other:?}"))),
            };

            let (min, max) = match tokens.get(i) {
                Some(Token::Star) => (0, None),
                Some(Token::Plus) => (1, None),
                Some(Token::Question) => (0, Some(1)),
                Some(Token::Close | Token::Pipe) => {
                    return Err(invalid(expr, "choices must be wrapped in parentheses"));
                }
                _ => (1, Some(1)),
            };
            if matches!(
                tokens.get(i),
                Some(Token::Star | Token::Plus | Token::Question)
            ) {
                i += 1;
            }
            terms.push(Term { names, min, max });
        }

        Ok(Self { terms })
    }

    /// Whether no children are allowed at all.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether the sequence of child type names is complete and valid.
    pub fn matches(&self, seq: &[&str]) -> bool {
        self.match_from(0, seq, false)
    }

    /// Whether the sequence is a valid start of some complete content.
    pub fn matches_prefix(&self, seq: &[&str]) -> bool {
        self.match_from(0, seq, true)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().flat_map(|t| t.names.iter().map(String::as_str))
    }

    fn match_from(&self, ti: usize, seq: &[&str], partial: bool) -> bool {
        if partial && seq.is_empty() {
            return true;
        }
        let Some(term) = self.terms.get(ti) else {
            return seq.is_empty();
        };

        let mut taken = 0;
        loop {
            if taken >= term.min && self.match_from(ti + 1, &seq[taken..], partial) {
                return true;
            }
            if term.max.is_some_and(|max| taken >= max) {
                return false;
            }
            match seq.get(taken) {
                Some(name) if term.allows(name) => taken += 1,
                _ => return false,
            }
            if partial && taken == seq.len() {
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn expr(s: &str) -> ContentExpr {
        ContentExpr::parse(s).unwrap()
    }

    #[rstest]
    #[case("paragraph+", &["paragraph"], true)]
    #[case("paragraph+", &["paragraph", "paragraph"], true)]
    #[case("paragraph+", &[], false)]
    #[case("text*", &[], true)]
    #[case("heading paragraph*", &["heading"], true)]
    #[case("heading paragraph*", &["paragraph"], false)]
    #[case("heading? paragraph", &["paragraph"], true)]
    #[case("heading? paragraph", &["heading", "heading", "paragraph"], false)]
    #[case("(text | image)*", &["image", "text", "text"], true)]
    #[case("(text | image)*", &["paragraph"], false)]
    #[case("paragraph list*", &["paragraph", "list", "list"], true)]
    fn matches_sequences(#[case] source: &str, #[case] seq: &[&str], #[case] expected: bool) {
        assert_eq!(expr(source).matches(seq), expected);
    }

    #[test]
    fn prefix_allows_missing_required_tail() {
        let e = expr("heading paragraph+");
        assert!(e.matches_prefix(&["heading"]));
        assert!(!e.matches(&["heading"]));
        assert!(!e.matches_prefix(&["paragraph"]));
    }

    #[test]
    fn empty_expression_only_matches_nothing() {
        let e = expr("");
        assert!(e.is_empty());
        assert!(e.matches(&[]));
        assert!(!e.matches(&["text"]));
    }

    #[rstest]
    #[case("(a | b")]
    #[case("a | b")]
    #[case("a$")]
    #[case("()")]
    fn rejects_malformed(#[case] source: &str) {
        assert!(matches!(
            ContentExpr::parse(source),
            Err(ModelError::InvalidContentExpr { .. })
        ));
    }
}
