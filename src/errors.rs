use thiserror::Error;

/// All engine failures are caller errors - either a bad profile or
/// mis-wired frame buffers. Nothing here is retryable.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
  #[error("Invalid profile: {field} = {value} ({reason})")]
  InvalidProfile {
    field: &'static str,
    value: f32,
    reason: &'static str,
  },

  #[error("Input buffers are empty ({width}x{height})")]
  EmptyFrame { width: usize, height: usize },

  #[error("Buffer '{name}' is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
  BufferSizeMismatch {
    name: &'static str,
    actual_width: usize,
    actual_height: usize,
    expected_width: usize,
    expected_height: usize,
  },
}
