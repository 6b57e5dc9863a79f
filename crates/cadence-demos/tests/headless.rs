use anyhow::Result;
use cadence_config::CadenceConfig;
use cadence_demos::{DemoKind, FrameLimit, build, headless_script};
use cadence_loop::{FrameLoop, ManualClock, RecordingPresenter, RunStats};

fn run_headless(kind: DemoKind, max_frames: u64) -> Result<(RunStats, RecordingPresenter)> {
    let config = CadenceConfig::default();
    let mut handler = FrameLimit::new(build(kind, &config)?, max_frames);
    let mut input = headless_script(kind);
    let mut presenter = RecordingPresenter::new();
    let mut frame_loop = FrameLoop::with_clock(config.timing.target_fps, ManualClock::new())?;
    let stats = frame_loop.run_session(&mut input, &mut presenter, &mut handler)?;
    Ok((stats, presenter))
}

#[test]
fn every_demo_runs_to_its_frame_limit() -> Result<()> {
    for kind in DemoKind::ALL
        .into_iter()
        .filter(|kind| *kind != DemoKind::WindowShouldClose)
    {
        let (stats, presenter) = run_headless(kind, 400)?;
        assert_eq!(stats.iterations, 400, "{kind}");
        assert_eq!(presenter.frames.len(), 400, "{kind}");
        assert!(
            presenter.frames.iter().all(|frame| !frame.is_empty()),
            "{kind} presented an empty frame"
        );
    }
    Ok(())
}

#[test]
fn confirmation_demo_exits_after_yes() -> Result<()> {
    let (stats, presenter) = run_headless(DemoKind::WindowShouldClose, 1_000)?;
    // Y arrives on frame 180; the next close check stops the loop.
    assert_eq!(stats.iterations, 181);
    let asked = presenter
        .frames
        .iter()
        .filter(|frame| frame.status_line().contains("[Y/N]"))
        .count();
    // Asked on 60..=89 after the close signal and 150..=180 after Escape.
    assert_eq!(asked, 30 + 31);
    Ok(())
}

#[test]
fn virtual_time_matches_frame_budget() -> Result<()> {
    let (stats, _) = run_headless(DemoKind::BouncingBall, 60)?;
    let elapsed = stats.elapsed.as_secs_f64();
    assert!((elapsed - 1.0).abs() < 1e-3, "elapsed {elapsed}");
    Ok(())
}
