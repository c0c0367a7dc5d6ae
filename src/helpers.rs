use crate::token::TokenKind;

impl TokenKind {
    // For easier matching
    pub(crate) fn is_mul_div(&self) -> bool {
        matches!(self, TokenKind::Star | TokenKind::Slash)
    }
}
