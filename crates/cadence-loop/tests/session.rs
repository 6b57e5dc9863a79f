use anyhow::Result;
use cadence_loop::{
    DisplayList, FrameHandler, FrameLoop, InputState, Key, LoopError, LoopState, ManualClock,
    RecordingPresenter, ScriptedInput, colors,
};

#[derive(Default)]
struct Slider {
    x: f32,
    paused: bool,
    updates: u32,
    torn_down: bool,
}

impl FrameHandler for Slider {
    fn update(&mut self, _state: &mut LoopState, input: &InputState) -> Result<()> {
        self.updates += 1;
        if input.is_key_pressed(Key::Space) {
            self.paused = !self.paused;
        }
        if !self.paused {
            self.x += 2.0;
        }
        Ok(())
    }

    fn render(&self, _state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        frame.clear(colors::RAYWHITE);
        frame.fill_circle([self.x, 10.0], 4.0, colors::MAROON);
        if self.paused {
            frame.text("PAUSED", [0.0, 0.0], 20.0, colors::GRAY);
        }
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        self.torn_down = true;
        Ok(())
    }
}

fn manual_loop() -> FrameLoop<ManualClock> {
    FrameLoop::with_clock(60.0, ManualClock::new()).unwrap()
}

#[test]
fn paused_frames_still_render() -> Result<()> {
    let mut input = ScriptedInput::new()
        .tap(2, Key::Space)
        .tap(6, Key::Space)
        .close_at(10);
    let mut presenter = RecordingPresenter::new();
    let mut slider = Slider::default();

    let stats = manual_loop().run_session(&mut input, &mut presenter, &mut slider)?;

    assert_eq!(stats.iterations, 10);
    assert_eq!(slider.updates, 10);
    assert_eq!(presenter.frames.len(), 10);
    // Frames 2..=5 are paused, so only six frames moved the ball.
    assert_eq!(slider.x, 12.0);
    let paused: Vec<bool> = presenter
        .frames
        .iter()
        .map(|frame| frame.texts().any(|text| text == "PAUSED"))
        .collect();
    assert_eq!(
        paused,
        [false, false, true, true, true, true, false, false, false, false]
    );
    assert!(slider.torn_down);
    Ok(())
}

#[test]
fn escape_closes_by_default() -> Result<()> {
    let mut input = ScriptedInput::new().tap(3, Key::Escape);
    let mut presenter = RecordingPresenter::new();
    let mut slider = Slider::default();

    let stats = manual_loop().run_session(&mut input, &mut presenter, &mut slider)?;

    assert_eq!(stats.iterations, 3);
    assert_eq!(presenter.frames.len(), 3);
    Ok(())
}

struct FailingRender;

impl FrameHandler for FailingRender {
    fn update(&mut self, _state: &mut LoopState, _input: &InputState) -> Result<()> {
        Ok(())
    }

    fn render(&self, state: &LoopState, _frame: &mut DisplayList) -> Result<()> {
        if state.total_frames() == 1 {
            anyhow::bail!("texture lost");
        }
        Ok(())
    }
}

#[test]
fn render_errors_propagate_to_the_caller() {
    let mut input = ScriptedInput::new();
    let mut presenter = RecordingPresenter::new();

    let err = manual_loop()
        .run_session(&mut input, &mut presenter, &mut FailingRender)
        .unwrap_err();

    assert!(matches!(err, LoopError::Render { frame: 1, .. }));
    assert_eq!(presenter.frames.len(), 1);
}

#[test]
fn dynamic_handlers_are_supported() -> Result<()> {
    let mut input = ScriptedInput::new().close_at(4);
    let mut presenter = RecordingPresenter::new();
    let mut handler: Box<dyn FrameHandler> = Box::new(Slider::default());

    let stats = manual_loop().run_session(&mut input, &mut presenter, handler.as_mut())?;

    assert_eq!(stats.iterations, 4);
    Ok(())
}
