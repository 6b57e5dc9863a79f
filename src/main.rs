use anyhow::{Context, Result};
use cadence_config::CadenceConfig;
use cadence_demos::{DemoKind, FrameLimit};
use cadence_loop::{FrameLoop, LogPresenter};
use cadence_window::CadenceWindow;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--list") {
        for kind in DemoKind::ALL {
            println!("{:<20} {}", kind.name(), kind.description());
        }
        return Ok(());
    }

    let mut config = CadenceConfig::load().context("loading configuration")?;
    if let Some(name) = args.iter().find_map(|a| a.strip_prefix("--demo=")) {
        config.demo.name = Some(name.to_string());
    }
    if args.iter().any(|a| a == "--headless") {
        config.window.headless = true;
    }

    let kind = match config.demo.name.as_deref() {
        Some(name) => name.parse::<DemoKind>()?,
        None => DemoKind::default(),
    };
    let handler = cadence_demos::build(kind, &config)
        .with_context(|| format!("building demo {kind}"))?;
    let mut frame_loop = FrameLoop::new(config.timing.target_fps)?;

    let stats = if config.window.headless {
        log::info!(
            "running {kind} headless for {} frames",
            config.window.max_frames
        );
        let mut input = cadence_demos::headless_script(kind);
        let mut presenter = LogPresenter::default();
        let mut handler = FrameLimit::new(handler, config.window.max_frames);
        frame_loop.run_session(&mut input, &mut presenter, &mut handler)?
    } else {
        let title = format!("{} - {kind}", config.window.title);
        let window = CadenceWindow::new(&title, config.window.width, config.window.height)
            .context("opening window")?;
        let (mut input, mut presenter) = window.into_parts();
        let mut handler = handler;
        frame_loop.run_session(&mut input, &mut presenter, &mut handler)?
    };

    log::info!(
        "{kind} finished after {} frames in {:.2?}",
        stats.iterations,
        stats.elapsed
    );
    Ok(())
}
