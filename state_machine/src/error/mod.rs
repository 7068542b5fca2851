//! Failure taxonomy of the instruction language.

use thiserror::Error;

/// Errors surfaced by instruction parsing, dispatch and evaluation.
///
/// Nothing is recovered internally: the first failure aborts the current
/// `process` call and reaches the caller unchanged. The orchestration
/// layer is expected to treat every variant as a scripting-content bug and
/// halt narrative advancement instead of skipping instructions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Malformed statement or expression: wrong arity, missing `THEN`,
    /// unparseable numeric parameter or a broken connective chain.
    /// Carries the offending raw text.
    #[error("invalid instruction format: {0}")]
    InvalidInstructionFormat(String),

    /// Instruction type tag outside the known set. Carries the tag.
    #[error("invalid instruction type: {0}")]
    InvalidInstructionType(String),

    /// An arithmetic operand resolved to a falsy, absent or non-numeric
    /// value. Carries the unresolved operand token.
    #[error("undefined value: {0}")]
    UndefinedValue(String),

    /// `IF` nesting went past the configured depth bound.
    #[error("instruction recursion exceeded {0} levels")]
    RecursionLimitExceeded(usize),
}
