//! cadence-window: minimal winit window for the Cadence frame loop.
//!
//! Responsibilities:
//! - Create the window.
//! - Pump pending platform events once per frame and translate keyboard,
//!   mouse and close events into the loop's `InputState`.
//! - Present frames by showing their status line in the window title.
//!
//! The event loop is pumped rather than run, so the frame loop keeps control
//! of pacing. Pumping is available on desktop platforms and Android.

use std::time::Duration;

use cadence_loop::{DisplayList, InputSource, InputState, Presenter};
use thiserror::Error;
use winit::dpi::LogicalSize;
use winit::event::Event;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder, WindowId};

pub mod events;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Os(#[from] winit::error::OsError),
}

/// Window plus the event loop that feeds it.
///
/// The frame loop needs its input source and presenter as separate mutable
/// borrows, so the window is used through [`into_parts`](Self::into_parts).
pub struct CadenceWindow {
    event_loop: EventLoop<()>,
    window: Window,
    title: String,
}

impl CadenceWindow {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(f64::from(width), f64::from(height)))
            .with_resizable(false)
            .build(&event_loop)?;
        log::info!("created {width}x{height} window \"{title}\"");

        Ok(Self {
            event_loop,
            window,
            title: title.to_string(),
        })
    }

    pub fn into_parts(self) -> (WindowInput, TitlePresenter) {
        let input = WindowInput {
            event_loop: self.event_loop,
            window_id: self.window.id(),
            exited: false,
        };
        let presenter = TitlePresenter {
            window: self.window,
            title: self.title,
            shown_status: String::new(),
        };
        (input, presenter)
    }
}

/// Pumps the event loop once per frame.
pub struct WindowInput {
    event_loop: EventLoop<()>,
    window_id: WindowId,
    exited: bool,
}

impl InputSource for WindowInput {
    fn poll(&mut self, input: &mut InputState) -> anyhow::Result<()> {
        if self.exited {
            input.request_close();
            return Ok(());
        }

        let window_id = self.window_id;
        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _target| {
                if let Event::WindowEvent { window_id: id, event } = event {
                    if id == window_id {
                        if let Some(translated) = events::translate_window_event(&event) {
                            events::apply(translated, input);
                        }
                    }
                }
            });

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {code}");
            self.exited = true;
            input.request_close();
        }
        Ok(())
    }
}

/// Shows each frame's status line in the window title.
pub struct TitlePresenter {
    window: Window,
    title: String,
    shown_status: String,
}

impl Presenter for TitlePresenter {
    fn present(&mut self, frame: &DisplayList) -> anyhow::Result<()> {
        let status = frame.status_line();
        if status != self.shown_status {
            if status.is_empty() {
                self.window.set_title(&self.title);
            } else {
                self.window.set_title(&format!("{} | {}", self.title, status));
            }
            self.shown_status = status;
        }
        Ok(())
    }
}
