//! cadence-loop: single-threaded fixed-cadence frame loop.
//!
//! Responsibilities:
//! - Pace iterations to a target frame rate ([`FrameLoop`], [`Clock`]).
//! - Poll input once per frame with edge detection ([`InputState`]).
//! - Run update then render exactly once per iteration, stopping on an
//!   injectable close predicate.
//! - Hand each rendered [`DisplayList`] to a [`Presenter`].

pub mod clock;
pub mod display_list;
pub mod driver;
pub mod error;
pub mod input;
pub mod presenter;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use display_list::{Color, DisplayList, DrawCommand, Rect, colors, fade};
pub use driver::{FrameHandler, FrameLoop, RunStats, run};
pub use error::{LoopError, Result};
pub use input::{InputEvent, InputSource, InputState, Key, MouseButton, ScriptedInput};
pub use presenter::{LogPresenter, Presenter, RecordingPresenter};
pub use state::LoopState;
