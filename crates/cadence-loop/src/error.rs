//! Error types for the frame loop.

use thiserror::Error;

/// Result type for frame loop operations.
pub type Result<T> = std::result::Result<T, LoopError>;

/// Errors that end a frame loop run.
///
/// Callback failures are never swallowed: the first one stops the loop and
/// is returned here together with the frame it happened on.
#[derive(Error, Debug)]
pub enum LoopError {
    /// Target frame rate was zero, negative or not finite.
    #[error("target frame rate must be a positive number, got {0}")]
    InvalidFrameRate(f64),

    /// Polling the input source failed.
    #[error("input polling failed on frame {frame}")]
    Input {
        frame: u64,
        #[source]
        source: anyhow::Error,
    },

    /// The update callback failed.
    #[error("update failed on frame {frame}")]
    Update {
        frame: u64,
        #[source]
        source: anyhow::Error,
    },

    /// The render callback failed.
    #[error("render failed on frame {frame}")]
    Render {
        frame: u64,
        #[source]
        source: anyhow::Error,
    },

    /// Handing the finished frame to the presenter failed.
    #[error("presenting frame {frame} failed")]
    Present {
        frame: u64,
        #[source]
        source: anyhow::Error,
    },

    /// Releasing resources after the loop ended failed.
    #[error("teardown failed")]
    Teardown(#[source] anyhow::Error),
}

impl LoopError {
    /// Frame number the failure happened on, if it happened inside the loop.
    pub fn frame(&self) -> Option<u64> {
        match self {
            Self::Input { frame, .. }
            | Self::Update { frame, .. }
            | Self::Render { frame, .. }
            | Self::Present { frame, .. } => Some(*frame),
            Self::InvalidFrameRate(_) | Self::Teardown(_) => None,
        }
    }
}
