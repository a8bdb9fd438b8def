use thiserror::Error;

/// The compressor gave up on this input.
///
/// This is a normal outcome, not a defect: the strategy rejected the input
/// outright, the output grew past the strategy's size budget, or no match was
/// found within the `first_success_by` window. Callers react by storing the
/// input uncompressed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("input did not compress within the strategy's limits")]
pub struct Incompressible;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressionError {
    #[error("unexpected end of compressed input")]
    UnexpectedEof,

    #[error("back-reference offset outside the produced output")]
    InvalidOffset,

    #[error("stream did not produce exactly the declared raw size")]
    Incomplete,
}
