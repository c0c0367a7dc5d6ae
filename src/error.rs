use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum EvalError {
    #[error("division by zero")]
    #[diagnostic(code = "eval_division_by_zero")]
    DivisionByZero {
        #[label("this divisor is zero")]
        at: miette::SourceSpan,
    },
}
