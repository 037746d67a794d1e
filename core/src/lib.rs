pub mod ast;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;
pub mod utils;

pub mod analyzer;

pub mod driver;
pub use analyzer::{CompileError, CompileErrorKind, Verifier};
pub use driver::{Driver, DriverError, Outcome, Report, VerifierOptions};
