//! Syntax gate for generated units.
//!
//! Every unit is parsed as a JSX module before it leaves the generator. A unit that does not
//! parse is a defect of the generator itself, so it is fatal.

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::GenerateError;

/// Parses `source` as an ES module with JSX. Reports the first parser error.
pub fn check(name: &str, source: &str) -> Result<(), GenerateError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true).with_jsx(true);
    let ret = Parser::new(&allocator, source, source_type).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(GenerateError::MalformedOutput {
            name: name.to_string(),
            message,
        });
    }
    Ok(())
}
