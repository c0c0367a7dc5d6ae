pub mod error;
mod helpers;
pub mod lexer;
pub mod reducer;
pub mod token;

pub type Result<T, E = miette::Report> = std::result::Result<T, E>;
