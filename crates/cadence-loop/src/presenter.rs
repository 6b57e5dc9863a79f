use crate::display_list::{DisplayList, DrawCommand};

/// Consumer of finished frames.
pub trait Presenter {
    fn present(&mut self, frame: &DisplayList) -> anyhow::Result<()>;
}

/// Headless presenter writing each frame to the log.
///
/// Commands are logged at `trace`; every `summary_interval` frames the status
/// line is logged at `debug`.
#[derive(Debug, Clone)]
pub struct LogPresenter {
    frames: u64,
    summary_interval: u64,
}

impl LogPresenter {
    pub fn new(summary_interval: u64) -> Self {
        Self {
            frames: 0,
            summary_interval: summary_interval.max(1),
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Default for LogPresenter {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &DisplayList) -> anyhow::Result<()> {
        for command in &frame.commands {
            if !matches!(command, DrawCommand::Clear(_)) {
                log::trace!("frame {}: {:?}", self.frames, command);
            }
        }
        if self.frames % self.summary_interval == 0 {
            log::debug!(
                "frame {} ({} commands): {}",
                self.frames,
                frame.len(),
                frame.status_line()
            );
        }
        self.frames += 1;
        Ok(())
    }
}

/// Presenter that keeps every frame, for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub frames: Vec<DisplayList>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&DisplayList> {
        self.frames.last()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &DisplayList) -> anyhow::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
