use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("unexpected-token")]
#[diagnostic(
	code(notation::unexpected_token),
	help("[{}] Expected {}, got {} instead", self.dbg_line, self.expected, self.actual),
)]
pub struct UnexpectedToken {
    pub dbg_line: String,
    pub expected: String,
    pub actual: String,
    #[source_code]
    pub src: String,
    #[label("Unexpected token: {}", self.actual)]
    pub position: SourceSpan,
}

#[derive(Error, Debug, Diagnostic)]
#[error("unexpected-end-of-input")]
#[diagnostic(
	code(notation::unexpected_end_of_input),
	help("[{}] Expected {} before the end of input", self.dbg_line, self.expected),
)]
pub struct UnexpectedEndOfInput {
    pub dbg_line: String,
    pub expected: String,
    #[source_code]
    pub src: String,
    #[label("Input ends here")]
    pub position: SourceSpan,
}

#[derive(Error, Debug, Diagnostic)]
#[error("invalid-notation")]
#[diagnostic(
	code(notation::invalid_notation),
	help("[{}] {}", self.dbg_line, self.reason),
)]
pub struct InvalidNotation {
    pub dbg_line: String,
    pub reason: String,
    #[source_code]
    pub src: String,
    #[label("Rejected here")]
    pub position: SourceSpan,
}
