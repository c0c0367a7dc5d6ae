use miette::LabeledSpan;

use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'source> {
    source: &'source [u8],
    rest: &'source [u8],
    position: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source [u8]) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
        }
    }

    pub fn with_source_code(&self, report: miette::Report) -> miette::Report {
        report.with_source_code(self.source.to_vec())
    }
}

macro_rules! token {
    ($kind:ident, $start:ident, $self:ident) => {
        return Some(Ok(Token {
            kind: TokenKind::$kind,
            span: Span {
                start: $start,
                end: $self.position,
            },
        }))
    };
}

impl Iterator for Lexer<'_> {
    type Item = crate::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.iter();
            let c = *chars.next()?;
            let c_start = self.position;

            self.rest = chars.as_slice();
            self.position += 1;

            match c {
                // Punctuation
                b'+' => token!(Plus, c_start, self),
                b'-' => token!(Minus, c_start, self),
                b'*' => token!(Star, c_start, self),
                b'/' => token!(Slash, c_start, self),
                b'(' => token!(OpenParen, c_start, self),
                b')' => token!(CloseParen, c_start, self),

                // Literals
                b'0'..=b'9' => return Some(Ok(self.lex_number(c_start))),

                // Spaces separate tokens; the line terminator carries no meaning
                b' ' | b'\n' => continue,

                _ => {
                    // Lexical errors are not fatal: the caller is expected to
                    // report this and keep consuming tokens.
                    return Some(Err(self.with_source_code(miette::miette!(
                        labels = vec![LabeledSpan::at(
                            c_start..self.position,
                            "unrecognized character"
                        )],
                        "unrecognized character '{}' (byte {}) at position {}",
                        c as char,
                        c,
                        c_start,
                    ))));
                }
            }
        }
    }
}

impl Lexer<'_> {
    fn lex_number(&mut self, start: usize) -> Token {
        // next() already consumed the first digit; keep going while the run
        // lasts.
        while let Some(c) = self.rest.first() {
            if !c.is_ascii_digit() {
                break;
            }

            self.rest = &self.rest[1..];
            self.position += 1;
        }

        let literal = &self.source[start..self.position];

        Token {
            kind: TokenKind::Number(parse_decimal_number(literal.iter().copied())),
            span: Span {
                start,
                end: self.position,
            },
        }
    }
}

fn parse_decimal_number(literal: impl Iterator<Item = u8>) -> i64 {
    literal.fold(0i64, |acc, c| {
        debug_assert!(c.is_ascii_digit());
        acc.wrapping_mul(10).wrapping_add((c - b'0') as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_handles_empty_input() {
        let mut lexer = Lexer::new(b"");
        assert!(lexer.next().is_none());
    }

    #[test]
    fn it_handles_single_char_tokens() {
        const EXPECTED: [TokenKind; 6] = [
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
        ];

        let tokens: Vec<Token> = Lexer::new(b"()+-*/").map(|t| t.unwrap()).collect();
        assert_eq!(tokens.len(), EXPECTED.len());
        for (i, (token, kind)) in tokens.iter().zip(EXPECTED).enumerate() {
            assert_eq!(token.kind, kind);
            assert_eq!(
                token.span,
                Span {
                    start: i,
                    end: i + 1
                }
            );
        }
    }

    #[test]
    fn it_lexes_a_digit_run_as_one_number() {
        let tokens: Vec<Token> = Lexer::new(b"42").map(|t| t.unwrap()).collect();
        assert_eq!(
            tokens,
            vec![Token {
                kind: TokenKind::Number(42),
                span: Span { start: 0, end: 2 }
            }]
        );

        let kinds: Vec<TokenKind> = Lexer::new(b"123+45").map(|t| t.unwrap().kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Number(123),
                TokenKind::Plus,
                TokenKind::Number(45)
            ]
        );
    }

    #[test]
    fn it_ignores_spaces_and_the_line_terminator() {
        let tokens: Vec<Token> = Lexer::new(b" 1 + 2 \n").map(|t| t.unwrap()).collect();
        assert_eq!(
            tokens,
            vec![
                Token {
                    kind: TokenKind::Number(1),
                    span: Span { start: 1, end: 2 }
                },
                Token {
                    kind: TokenKind::Plus,
                    span: Span { start: 3, end: 4 }
                },
                Token {
                    kind: TokenKind::Number(2),
                    span: Span { start: 5, end: 6 }
                },
            ]
        );
    }

    #[test]
    fn a_leading_minus_is_its_own_token() {
        let kinds: Vec<TokenKind> = Lexer::new(b"-123").map(|t| t.unwrap().kind).collect();
        assert_eq!(kinds, vec![TokenKind::Minus, TokenKind::Number(123)]);
    }

    #[test]
    fn it_reports_unrecognized_characters_and_continues() {
        let mut lexer = Lexer::new(b"4 @ 2");
        assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::Number(4));
        assert!(lexer.next().unwrap().is_err());
        assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::Number(2));
        assert!(lexer.next().is_none());
    }
}
