use crate::error::EvalError;
use crate::token::{Span, Token, TokenKind};

/// Upper bound on engine rounds. Every collapse removes two tokens, so a
/// well-formed run terminates long before this; the cap is a backstop
/// against an engine bug looping without progress.
pub const MAX_ROUNDS: usize = 100;

/// How a reduction run ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// No pass produced a change; the sequence is final.
    FixedPoint,
    /// The round cap was exhausted while the sequence was still changing.
    DepthLimit,
}

/// Reduce until no pass changes the sequence, or the round cap trips.
///
/// A sequence that stops changing while still holding operators or
/// parentheses is a valid terminal state, not an error; malformed input
/// (unbalanced parens, trailing operators) surfaces that way.
pub fn reduce(tokens: &mut Vec<Token>) -> Result<Reduction, EvalError> {
    for _ in 0..MAX_ROUNDS {
        if !reduce_once(tokens)? {
            return Ok(Reduction::FixedPoint);
        }
    }

    Ok(Reduction::DepthLimit)
}

/// One engine round: divide, multiply, add/subtract, parentheses, in that
/// order, each pass a full left-to-right scan. Returns whether any pass
/// collapsed a window.
pub fn reduce_once(tokens: &mut Vec<Token>) -> Result<bool, EvalError> {
    if tokens.len() < 3 {
        return Ok(false);
    }

    let mut changed = divide_pass(tokens)?;
    changed |= multiply_pass(tokens);
    changed |= add_sub_pass(tokens);
    changed |= paren_pass(tokens);

    Ok(changed)
}

/// Replace the 3-token window starting at `i` with a single token of the
/// given kind, spanning the whole window.
fn collapse(tokens: &mut Vec<Token>, i: usize, kind: TokenKind) {
    let span = Span {
        start: tokens[i].span.start,
        end: tokens[i + 2].span.end,
    };

    tokens[i] = Token { kind, span };
    tokens.drain(i + 1..=i + 2);
}

fn divide_pass(tokens: &mut Vec<Token>) -> Result<bool, EvalError> {
    let mut changed = false;
    let mut i = 0;

    while i + 2 < tokens.len() {
        if let (TokenKind::Number(a), TokenKind::Slash, TokenKind::Number(b)) =
            (tokens[i].kind, tokens[i + 1].kind, tokens[i + 2].kind)
        {
            if b == 0 {
                return Err(EvalError::DivisionByZero {
                    at: tokens[i + 2].span.into(),
                });
            }

            collapse(tokens, i, TokenKind::Number(a.wrapping_div(b)));
            changed = true;
            // Step back so the neighborhood of the result is re-examined
            // before the scan moves on.
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }

    Ok(changed)
}

fn multiply_pass(tokens: &mut Vec<Token>) -> bool {
    let mut changed = false;
    let mut i = 0;

    while i + 2 < tokens.len() {
        match (tokens[i].kind, tokens[i + 1].kind, tokens[i + 2].kind) {
            (TokenKind::Number(a), TokenKind::Star, TokenKind::Number(b)) => {
                collapse(tokens, i, TokenKind::Number(a.wrapping_mul(b)));
                changed = true;
                i = i.saturating_sub(1);
            }
            _ => i += 1,
        }
    }

    changed
}

fn add_sub_pass(tokens: &mut Vec<Token>) -> bool {
    let mut changed = false;
    let mut i = 0;

    while i + 2 < tokens.len() {
        let value = match (tokens[i].kind, tokens[i + 1].kind, tokens[i + 2].kind) {
            (TokenKind::Number(a), TokenKind::Plus, TokenKind::Number(b)) => {
                Some(a.wrapping_add(b))
            }
            (TokenKind::Number(a), TokenKind::Minus, TokenKind::Number(b)) => {
                Some(a.wrapping_sub(b))
            }
            _ => None,
        };

        // An add/subtract next to an unreduced multiply/divide must wait for
        // that neighbor to collapse first.
        let deferred = i
            .checked_sub(1)
            .map_or(false, |p| tokens[p].kind.is_mul_div())
            || tokens.get(i + 3).map_or(false, |t| t.kind.is_mul_div());

        match value {
            Some(value) if !deferred => {
                collapse(tokens, i, TokenKind::Number(value));
                changed = true;
                i = i.saturating_sub(1);
            }
            _ => i += 1,
        }
    }

    changed
}

fn paren_pass(tokens: &mut Vec<Token>) -> bool {
    let mut changed = false;
    let mut i = 0;

    while i + 2 < tokens.len() {
        match (tokens[i].kind, tokens[i + 1].kind, tokens[i + 2].kind) {
            (TokenKind::OpenParen, TokenKind::Number(value), TokenKind::CloseParen) => {
                collapse(tokens, i, TokenKind::Number(value));
                changed = true;
                i = i.saturating_sub(1);
            }
            _ => i += 1,
        }
    }

    changed
}
