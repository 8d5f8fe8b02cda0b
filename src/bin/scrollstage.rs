use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollstage::{
    FrameClock, ManualClock, Shutter, ShutterDriver, Stage, StageConfig, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "scrollstage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stage frame for one scroll position as JSON.
    Sample(SampleArgs),
    /// Simulate one shutter cycle and print a JSON line per frame.
    Shutter(ShutterArgs),
    /// Validate a stage configuration file.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Stage configuration JSON (defaults to the built-in landing page).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Scroll offset in pixels.
    #[arg(long)]
    offset: f64,

    /// Milliseconds to let smoothing and reveals run before sampling.
    #[arg(long, default_value_t = 0)]
    settle_ms: u64,
}

#[derive(Parser, Debug)]
struct ShutterArgs {
    /// Stage configuration JSON; only its shutter block is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// Section to navigate to, reported in the closed event.
    #[arg(long, default_value_t = 1)]
    section: usize,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Stage configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Shutter(args) => cmd_shutter(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<StageConfig> {
    match path {
        Some(p) => StageConfig::from_path(p)
            .with_context(|| format!("load stage config '{}'", p.display())),
        None => Ok(StageConfig::default()),
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    let viewport = Viewport::new(args.width, args.height)?;
    let mut stage = Stage::new(cfg, viewport)?;
    stage.on_scroll(args.offset);

    let step = Duration::from_millis(16);
    let end = Duration::from_millis(args.settle_ms);
    let mut now = Duration::ZERO;
    let mut frame = stage.frame(now);
    while now < end {
        now += step;
        frame = stage.frame(now);
    }

    let frame = frame.context("stage produced no frame")?;
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &frame).context("write frame JSON")?;
    println!();
    Ok(())
}

#[derive(serde::Serialize)]
struct ShutterLine {
    t_ms: u128,
    #[serde(flatten)]
    frame: scrollstage::ShutterFrame,
    closed: Option<usize>,
}

fn cmd_shutter(args: ShutterArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step_ms > 0, "--step-ms must be > 0");
    let cfg = load_config(args.config.as_ref())?;
    let clock = ManualClock::default();
    let shutter = Shutter::new(cfg.shutter)?;
    let mut driver = ShutterDriver::new(&clock, shutter);

    anyhow::ensure!(
        driver.navigate(args.section),
        "shutter refused navigation"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    loop {
        let tick = driver.pump();
        let line = ShutterLine {
            t_ms: clock.now().as_millis(),
            frame: tick.frame,
            closed: tick.closed,
        };
        serde_json::to_writer(&mut out, &line).context("write shutter line")?;
        std::io::Write::write_all(&mut out, b"\n").context("write newline")?;
        if !driver.shutter().is_busy() {
            break;
        }
        clock.advance(Duration::from_millis(args.step_ms));
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = load_config(Some(&args.config))?;
    cfg.validate()
        .with_context(|| format!("invalid stage config '{}'", args.config.display()))?;
    eprintln!(
        "ok: {} sections, {}vh",
        cfg.sections.len(),
        cfg.total_vh()
    );
    Ok(())
}
