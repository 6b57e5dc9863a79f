//! Fixed-cadence frame loop.
//!
//! Each iteration runs, in order:
//! 1. input poll
//! 2. close check (check-then-act: a close on the first check means no
//!    callbacks run at all)
//! 3. update, exactly once
//! 4. render, exactly once
//! 5. wait until `1 / target_frame_rate` has passed since the iteration began
//!
//! Everything happens on the calling thread. Shutdown is cooperative: the
//! close predicate is only consulted between iterations.

use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::display_list::DisplayList;
use crate::error::{LoopError, Result};
use crate::input::{InputSource, InputState, Key};
use crate::presenter::Presenter;
use crate::state::LoopState;

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Iterations that ran update and render.
    pub iterations: u64,
    /// Clock time between loop start and the final close check.
    pub elapsed: Duration,
}

/// Application logic driven by [`FrameLoop::run_session`].
///
/// `render` takes `&self`: it can read everything `update` produced but
/// cannot change it.
pub trait FrameHandler {
    /// Whether to stop before this iteration's update.
    ///
    /// Defaults to the platform close signal or Escape.
    fn should_close(&self, _state: &LoopState, input: &InputState) -> bool {
        input.close_requested() || input.is_key_pressed(Key::Escape)
    }

    fn update(&mut self, state: &mut LoopState, input: &InputState) -> anyhow::Result<()>;

    fn render(&self, state: &LoopState, frame: &mut DisplayList) -> anyhow::Result<()>;

    /// Release resources. Runs once after the loop ends, whether or not it
    /// ended with an error.
    fn teardown(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<H: FrameHandler + ?Sized> FrameHandler for Box<H> {
    fn should_close(&self, state: &LoopState, input: &InputState) -> bool {
        (**self).should_close(state, input)
    }

    fn update(&mut self, state: &mut LoopState, input: &InputState) -> anyhow::Result<()> {
        (**self).update(state, input)
    }

    fn render(&self, state: &LoopState, frame: &mut DisplayList) -> anyhow::Result<()> {
        (**self).render(state, frame)
    }

    fn teardown(&mut self) -> anyhow::Result<()> {
        (**self).teardown()
    }
}

/// One iteration's worth of phases, shared by the closure and handler entry
/// points.
trait LoopBody {
    fn poll(&mut self, _input: &mut InputState) -> anyhow::Result<()> {
        Ok(())
    }
    fn should_close(&mut self, state: &LoopState, input: &InputState) -> bool;
    fn update(&mut self, state: &mut LoopState, input: &InputState) -> anyhow::Result<()>;
    fn render(&mut self, state: &LoopState) -> anyhow::Result<()>;
    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

struct Callbacks<U, R, S> {
    on_update: U,
    on_render: R,
    should_close: S,
}

impl<U, R, S> LoopBody for Callbacks<U, R, S>
where
    U: FnMut(&mut LoopState) -> anyhow::Result<()>,
    R: FnMut(&LoopState) -> anyhow::Result<()>,
    S: FnMut(&LoopState) -> bool,
{
    fn should_close(&mut self, state: &LoopState, _input: &InputState) -> bool {
        (self.should_close)(state)
    }

    fn update(&mut self, state: &mut LoopState, _input: &InputState) -> anyhow::Result<()> {
        (self.on_update)(state)
    }

    fn render(&mut self, state: &LoopState) -> anyhow::Result<()> {
        (self.on_render)(state)
    }
}

struct Session<'a, I: ?Sized, P: ?Sized, H: ?Sized> {
    input: &'a mut I,
    presenter: &'a mut P,
    handler: &'a mut H,
    frame: DisplayList,
}

impl<I, P, H> LoopBody for Session<'_, I, P, H>
where
    I: InputSource + ?Sized,
    P: Presenter + ?Sized,
    H: FrameHandler + ?Sized,
{
    fn poll(&mut self, input: &mut InputState) -> anyhow::Result<()> {
        self.input.poll(input)
    }

    fn should_close(&mut self, state: &LoopState, input: &InputState) -> bool {
        self.handler.should_close(state, input)
    }

    fn update(&mut self, state: &mut LoopState, input: &InputState) -> anyhow::Result<()> {
        self.handler.update(state, input)
    }

    fn render(&mut self, state: &LoopState) -> anyhow::Result<()> {
        self.frame.reset();
        self.handler.render(state, &mut self.frame)
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.presenter.present(&self.frame)
    }
}

/// Frame loop driver.
///
/// Once a run has terminated the loop stays terminated: further `run*` calls
/// return immediately with zero iterations.
pub struct FrameLoop<C: Clock = SystemClock> {
    state: LoopState,
    input: InputState,
    clock: C,
}

impl FrameLoop<SystemClock> {
    pub fn new(target_frame_rate: f64) -> Result<Self> {
        Self::with_clock(target_frame_rate, SystemClock::new())
    }
}

impl<C: Clock> FrameLoop<C> {
    pub fn with_clock(target_frame_rate: f64, clock: C) -> Result<Self> {
        Ok(Self {
            state: LoopState::new(target_frame_rate)?,
            input: InputState::new(),
            clock,
        })
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_terminated(&self) -> bool {
        self.state.close_requested()
    }

    /// Run with plain callbacks until `should_close` returns true or update
    /// calls [`LoopState::request_close`].
    pub fn run<U, R, S>(&mut self, on_update: U, on_render: R, should_close: S) -> Result<RunStats>
    where
        U: FnMut(&mut LoopState) -> anyhow::Result<()>,
        R: FnMut(&LoopState) -> anyhow::Result<()>,
        S: FnMut(&LoopState) -> bool,
    {
        let mut body = Callbacks {
            on_update,
            on_render,
            should_close,
        };
        self.drive(&mut body)
    }

    /// Run `handler` against an input source and a presenter, then tear it
    /// down.
    pub fn run_session<I, P, H>(
        &mut self,
        input: &mut I,
        presenter: &mut P,
        handler: &mut H,
    ) -> Result<RunStats>
    where
        I: InputSource + ?Sized,
        P: Presenter + ?Sized,
        H: FrameHandler + ?Sized,
    {
        let outcome = {
            let mut body = Session {
                input,
                presenter,
                handler: &mut *handler,
                frame: DisplayList::new(),
            };
            self.drive(&mut body)
        };
        let teardown = handler.teardown();
        match (outcome, teardown) {
            (Ok(stats), Ok(())) => Ok(stats),
            (Ok(_), Err(err)) => Err(LoopError::Teardown(err)),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(teardown_err)) => {
                log::warn!("teardown after failed run also failed: {teardown_err:#}");
                Err(err)
            }
        }
    }

    fn drive<B: LoopBody>(&mut self, body: &mut B) -> Result<RunStats> {
        let started = self.clock.now();
        let mut iterations = 0;
        if self.state.close_requested() {
            return Ok(RunStats {
                iterations,
                elapsed: Duration::ZERO,
            });
        }
        log::info!(
            "frame loop starting at {} fps",
            self.state.target_frame_rate()
        );

        loop {
            let frame_start = self.clock.now();
            let frame = self.state.total_frames();

            self.input.begin_frame();
            body.poll(&mut self.input)
                .map_err(|source| LoopError::Input { frame, source })?;

            if self.state.close_requested() || body.should_close(&self.state, &self.input) {
                self.state.request_close();
                break;
            }

            body.update(&mut self.state, &self.input)
                .map_err(|source| LoopError::Update { frame, source })?;
            body.render(&self.state)
                .map_err(|source| LoopError::Render { frame, source })?;
            body.present()
                .map_err(|source| LoopError::Present { frame, source })?;

            let deadline = frame_start + self.state.frame_budget();
            let now = self.clock.now();
            if now < deadline {
                self.clock.sleep(deadline - now);
            } else {
                log::trace!("frame {frame} overran its budget by {:?}", now - deadline);
            }

            let frame_time = self.clock.now().saturating_sub(frame_start);
            self.state.finish_frame(frame_time);
            iterations += 1;
        }

        let elapsed = self.clock.now().saturating_sub(started);
        log::info!("frame loop stopped after {iterations} frames ({elapsed:?})");
        Ok(RunStats {
            iterations,
            elapsed,
        })
    }
}

/// Run callbacks on the wall clock at `target_frame_rate`.
///
/// Convenience wrapper over [`FrameLoop::run`].
pub fn run<U, R, S>(
    target_frame_rate: f64,
    on_update: U,
    on_render: R,
    should_close: S,
) -> Result<RunStats>
where
    U: FnMut(&mut LoopState) -> anyhow::Result<()>,
    R: FnMut(&LoopState) -> anyhow::Result<()>,
    S: FnMut(&LoopState) -> bool,
{
    FrameLoop::new(target_frame_rate)?.run(on_update, on_render, should_close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::{Cell, RefCell};

    fn manual_loop(fps: f64) -> (FrameLoop<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let frame_loop = FrameLoop::with_clock(fps, clock.clone()).unwrap();
        (frame_loop, clock)
    }

    #[test]
    fn close_on_first_check_runs_nothing() {
        let (mut frame_loop, clock) = manual_loop(60.0);
        let updates = Cell::new(0);
        let renders = Cell::new(0);
        let stats = frame_loop
            .run(
                |_| {
                    updates.set(updates.get() + 1);
                    Ok(())
                },
                |_| {
                    renders.set(renders.get() + 1);
                    Ok(())
                },
                |_| true,
            )
            .unwrap();
        assert_eq!(stats.iterations, 0);
        assert_eq!((updates.get(), renders.get()), (0, 0));
        assert!(clock.sleeps().is_empty());
        assert!(frame_loop.is_terminated());
    }

    #[test]
    fn update_and_render_alternate_until_close() {
        let (mut frame_loop, _clock) = manual_loop(60.0);
        let counter = Cell::new(0u32);
        let calls = RefCell::new(Vec::new());
        let stats = frame_loop
            .run(
                |_| {
                    counter.set(counter.get() + 1);
                    calls.borrow_mut().push("update");
                    Ok(())
                },
                |_| {
                    calls.borrow_mut().push("render");
                    Ok(())
                },
                |_| counter.get() >= 5,
            )
            .unwrap();
        assert_eq!(stats.iterations, 5);
        let calls = calls.into_inner();
        assert_eq!(calls.len(), 10);
        for pair in calls.chunks(2) {
            assert_eq!(pair, ["update", "render"]);
        }
    }

    #[test]
    fn paces_each_iteration_to_the_frame_budget() {
        let (mut frame_loop, clock) = manual_loop(50.0);
        let work = clock.clone();
        frame_loop
            .run(
                |_| {
                    work.advance(Duration::from_millis(5));
                    Ok(())
                },
                |_| Ok(()),
                |state| state.total_frames() == 3,
            )
            .unwrap();
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(15); 3]);
        assert_eq!(frame_loop.state().frame_time(), Duration::from_millis(20));
        assert_eq!(clock.now(), Duration::from_millis(60));
        assert_eq!(frame_loop.clock().now(), clock.now());
    }

    #[test]
    fn slow_frames_are_not_delayed_further() {
        let (mut frame_loop, clock) = manual_loop(100.0);
        let work = clock.clone();
        frame_loop
            .run(
                |_| {
                    work.advance(Duration::from_millis(25));
                    Ok(())
                },
                |_| Ok(()),
                |state| state.total_frames() == 2,
            )
            .unwrap();
        assert!(clock.sleeps().is_empty());
        assert_eq!(frame_loop.state().frame_time(), Duration::from_millis(25));
    }

    #[test]
    fn update_error_stops_the_loop() {
        let (mut frame_loop, _clock) = manual_loop(60.0);
        let renders = Cell::new(0);
        let err = frame_loop
            .run(
                |state| {
                    if state.total_frames() == 2 {
                        anyhow::bail!("physics exploded");
                    }
                    Ok(())
                },
                |_| {
                    renders.set(renders.get() + 1);
                    Ok(())
                },
                |_| false,
            )
            .unwrap_err();
        assert!(matches!(err, LoopError::Update { frame: 2, .. }));
        assert_eq!(err.frame(), Some(2));
        assert_eq!(renders.get(), 2);
        assert!(format!("{:#}", anyhow::Error::from(err)).contains("physics exploded"));
    }

    #[test]
    fn request_close_from_update_finishes_the_frame() {
        let (mut frame_loop, _clock) = manual_loop(60.0);
        let renders = Cell::new(0);
        let stats = frame_loop
            .run(
                |state| {
                    state.request_close();
                    Ok(())
                },
                |_| {
                    renders.set(renders.get() + 1);
                    Ok(())
                },
                |_| false,
            )
            .unwrap();
        assert_eq!(stats.iterations, 1);
        assert_eq!(renders.get(), 1);
    }

    #[test]
    fn terminated_loop_stays_terminated() {
        let (mut frame_loop, _clock) = manual_loop(60.0);
        frame_loop.run(|_| Ok(()), |_| Ok(()), |_| true).unwrap();
        let updates = Cell::new(0);
        let stats = frame_loop
            .run(
                |_| {
                    updates.set(updates.get() + 1);
                    Ok(())
                },
                |_| Ok(()),
                |_| false,
            )
            .unwrap();
        assert_eq!(stats.iterations, 0);
        assert_eq!(updates.get(), 0);
    }

    #[test]
    fn invalid_frame_rate_is_rejected() {
        let result = run(0.0, |_| Ok(()), |_| Ok(()), |_| true);
        assert!(matches!(result, Err(LoopError::InvalidFrameRate(_))));
        // Budget of 1e20 seconds does not fit in a Duration.
        assert!(matches!(
            FrameLoop::with_clock(1e-20, ManualClock::new()),
            Err(LoopError::InvalidFrameRate(_))
        ));
    }
}
