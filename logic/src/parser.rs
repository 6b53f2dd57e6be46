//! Textual literal notation.
//!
//! The problem-construction layer accepts the corpus notation
//! `Predicate(arg1, arg2)`, conjunctions joined with `&`, negation marked
//! with a leading `~`, and zero-argument predicates written bare
//! (`RightShoeOn`). Identifiers starting with a lowercase letter are
//! variables; everything else (including numbers) is a constant.
//!
//! The search engine itself never sees this notation; it only consumes
//! the structured [`Literal`] model.

use crate::literal::Literal;
use crate::term::Term;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character '{found}' at position {pos}")]
    UnexpectedChar { found: char, pos: usize },

    #[error("unexpected end of input (expected {expected})")]
    UnexpectedEnd { expected: &'static str },

    #[error("trailing input starting at position {pos}")]
    TrailingInput { pos: usize },
}

/// Parse a single literal, e.g. `~On(A, b)` or `RightShoeOn`.
pub fn parse_literal(input: &str) -> Result<Literal, ParseError> {
    let mut scanner = Scanner::new(input);
    let literal = scanner.literal()?;
    scanner.expect_end()?;
    Ok(literal)
}

/// Parse a `&`-joined conjunction of literals. The empty (or blank)
/// string parses as the empty conjunction.
pub fn parse_conjunction(input: &str) -> Result<Vec<Literal>, ParseError> {
    let mut scanner = Scanner::new(input);
    scanner.skip_whitespace();
    if scanner.at_end() {
        return Ok(Vec::new());
    }

    let mut literals = vec![scanner.literal()?];
    loop {
        scanner.skip_whitespace();
        if scanner.at_end() {
            return Ok(literals);
        }
        scanner.expect('&')?;
        literals.push(scanner.literal()?);
    }
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(ParseError::UnexpectedChar {
                found: c,
                pos: self.pos,
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: "punctuation",
            }),
        }
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.at_end() {
            Ok(())
        } else {
            Err(ParseError::TrailingInput { pos: self.pos })
        }
    }

    fn identifier(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(ParseError::UnexpectedChar {
                    found: c,
                    pos: self.pos,
                }),
                None => Err(ParseError::UnexpectedEnd {
                    expected: "identifier",
                }),
            };
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn term(&mut self) -> Result<Term, ParseError> {
        let name = self.identifier()?;
        let first = name.chars().next().unwrap_or('_');
        if first.is_lowercase() && first.is_alphabetic() {
            Ok(Term::Variable(name))
        } else {
            Ok(Term::Constant(name))
        }
    }

    fn literal(&mut self) -> Result<Literal, ParseError> {
        self.skip_whitespace();
        let negated = if self.peek() == Some('~') {
            self.pos += 1;
            true
        } else {
            false
        };

        let predicate = self.identifier()?;
        let mut args = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some('(') {
            self.pos += 1;
            self.skip_whitespace();
            if self.peek() == Some(')') {
                self.pos += 1;
            } else {
                args.push(self.term()?);
                loop {
                    self.skip_whitespace();
                    match self.peek() {
                        Some(',') => {
                            self.pos += 1;
                            args.push(self.term()?);
                        }
                        Some(')') => {
                            self.pos += 1;
                            break;
                        }
                        Some(c) => {
                            return Err(ParseError::UnexpectedChar {
                                found: c,
                                pos: self.pos,
                            })
                        }
                        None => {
                            return Err(ParseError::UnexpectedEnd {
                                expected: "',' or ')'",
                            })
                        }
                    }
                }
            }
        }

        Ok(Literal::new(predicate, args, negated))
    }
}
