//! Error types for syncsplit-av.

use crate::command::ToolOutput;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running external media tools.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool ran but exited unsuccessfully.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed {
        tool: String,
        message: String,
        output: Option<Box<ToolOutput>>,
    },

    /// Failed to parse tool output.
    #[error("failed to parse {tool} output: {message}")]
    ParseError {
        tool: String,
        message: String,
        output: Option<Box<ToolOutput>>,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error carrying the captured output.
    pub fn tool_failed(
        tool: impl Into<String>,
        message: impl Into<String>,
        output: Option<ToolOutput>,
    ) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
            output: output.map(Box::new),
        }
    }

    /// Create a parse error carrying the captured output.
    pub fn parse_error(
        tool: impl Into<String>,
        message: impl Into<String>,
        output: Option<ToolOutput>,
    ) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
            output: output.map(Box::new),
        }
    }

    /// Captured stdout/stderr of the failing invocation, when there was one.
    pub fn captured_output(&self) -> Option<&ToolOutput> {
        match self {
            Self::ToolFailed { output, .. } | Self::ParseError { output, .. } => output.as_deref(),
            _ => None,
        }
    }
}
