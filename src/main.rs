use std::io::{self, Write};

use calc_interpreter::lexer::Lexer;
use calc_interpreter::reducer::{self, Reduction};
use calc_interpreter::token;
use clap::Parser;
use miette::LabeledSpan;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Input {
    /// The expression to evaluate; read from standard input when omitted
    expression: Option<String>,

    /// Debug the lexer, printing out each token. Does not reduce the expression.
    #[clap(long, default_value = "false")]
    debug_lexer: bool,
}

fn main() {
    let Input {
        expression,
        debug_lexer,
    } = Input::parse();

    let source = expression.unwrap_or_else(read_expression);

    if debug_lexer {
        run_debug_lexer(&source);
        return;
    }

    let mut tokens = Vec::new();
    for token in Lexer::new(source.as_bytes()) {
        match token {
            Ok(t) => tokens.push(t),
            // Unrecognized characters are reported and skipped; whatever else
            // the line holds still gets tokenized.
            Err(e) => eprintln!("{:?}", e),
        }
    }

    match reducer::reduce(&mut tokens) {
        Ok(Reduction::FixedPoint) => {}
        Ok(Reduction::DepthLimit) => {
            eprintln!("Maximum depth reached!");
        }
        Err(e) => {
            let report = miette::Report::new(e).with_source_code(source);
            eprintln!("{:?}", report);
            std::process::exit(1);
        }
    }

    println!("The result: {}", token::render(&tokens));
}

fn read_expression() -> String {
    print!("Enter an expression: ");
    io::stdout().flush().expect("failed to flush the prompt");

    let mut buffer = String::new();
    io::stdin()
        .read_line(&mut buffer)
        .expect("failed to read an expression from stdin");

    buffer
}

fn run_debug_lexer(source: &str) {
    for token in Lexer::new(source.as_bytes()) {
        match token {
            Ok(t) => {
                let diag = miette::miette!(
                    labels = vec![LabeledSpan::at(
                        t.span.start..t.span.end,
                        format!("{:?}", t.kind)
                    )],
                    severity = miette::Severity::Advice,
                    "found a token",
                )
                .with_source_code(source.to_string());
                eprintln!("{:?}", diag);
            }
            Err(e) => eprintln!("{:?}", e),
        }
    }
}
