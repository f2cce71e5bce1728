use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "itzfizz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll through the hero at a constant speed, printing per-frame snapshots as JSON lines.
    Simulate(SimulateArgs),
    /// Print the settled page snapshot at one scroll progress.
    Frame(FrameArgs),
    /// Print the declared and compiled timelines as JSON.
    Timelines(PageArgs),
    /// Scroll through the hero and write the vehicle trail as a PNG.
    Trail(TrailArgs),
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Hero configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured variant.
    #[arg(long, value_enum)]
    variant: Option<VariantChoice>,

    /// Override the viewport width in px.
    #[arg(long)]
    width: Option<f64>,

    /// Override the viewport height in px.
    #[arg(long)]
    height: Option<f64>,
}

#[derive(Parser, Debug)]
struct DriveArgs {
    /// Scroll speed in px per second.
    #[arg(long, default_value_t = 1500.0)]
    speed: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seconds to keep rendering after the scroll stops.
    #[arg(long)]
    settle: Option<f64>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    page: PageArgs,

    #[command(flatten)]
    drive: DriveArgs,

    /// Emit every Nth frame.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Seconds rendered before the snapshot is taken.
    #[arg(long, default_value_t = 4.0)]
    settle: f64,
}

#[derive(Parser, Debug)]
struct TrailArgs {
    #[command(flatten)]
    page: PageArgs,

    #[command(flatten)]
    drive: DriveArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    Sweep,
    Deck,
}

impl From<VariantChoice> for itzfizz_hero::Variant {
    fn from(v: VariantChoice) -> Self {
        match v {
            VariantChoice::Sweep => Self::Sweep,
            VariantChoice::Deck => Self::Deck,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Timelines(args) => cmd_timelines(args),
        Command::Trail(args) => cmd_trail(args),
    }
}

fn load_config(args: &PageArgs) -> anyhow::Result<itzfizz_hero::HeroConfig> {
    let mut cfg = match &args.config {
        Some(path) => itzfizz_hero::HeroConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => itzfizz_hero::HeroConfig::default(),
    };
    if let Some(v) = args.variant {
        cfg.variant = v.into();
    }
    if let Some(w) = args.width {
        cfg.viewport.width = w;
    }
    if let Some(h) = args.height {
        cfg.viewport.height = h;
    }
    cfg.validate().with_context(|| "validate config")?;
    Ok(cfg)
}

/// Mount at t=0, scroll from the top to the end of the page at `speed`, then
/// keep rendering for `settle` seconds. `each` sees every frame.
fn drive(
    page: &mut itzfizz_hero::HeroPage,
    args: &DriveArgs,
    default_settle: f64,
    mut each: impl FnMut(&itzfizz_hero::HeroPage, u64) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    if !args.speed.is_finite() || args.speed <= 0.0 {
        anyhow::bail!("--speed must be finite and > 0");
    }
    let settle = args.settle.unwrap_or(default_settle);
    if !settle.is_finite() || settle < 0.0 {
        anyhow::bail!("--settle must be finite and >= 0");
    }

    let dt = 1.0 / f64::from(args.fps);
    let end = page.scroll().max_offset();
    let scroll_secs = end / args.speed;
    let total = scroll_secs + settle;

    page.mount(0.0)?;
    let mut index = 0u64;
    loop {
        let t = index as f64 * dt;
        if t <= scroll_secs + dt {
            page.on_scroll((t * args.speed).min(end), t)?;
        }
        page.frame(t)?;
        each(&*page, index)?;
        if t >= total {
            break;
        }
        index += 1;
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.page)?;
    let mut page = itzfizz_hero::HeroPage::new(cfg)?;
    let every = args.every.max(1);

    let mut out: Box<dyn std::io::Write> = match &args.out {
        Some(path) => {
            create_parent(path)?;
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let mut last = None;
    drive(&mut page, &args.drive, 2.0, |page, index| {
        if index % every == 0 {
            serde_json::to_writer(&mut out, &page.snapshot()).with_context(|| "write snapshot")?;
            out.write_all(b"\n")?;
        }
        last = Some(index);
        Ok(())
    })?;
    out.flush()?;

    let fingerprint = page.snapshot().fingerprint()?;
    eprintln!(
        "simulated {} frames, final fingerprint {fingerprint:016x}",
        last.map_or(0, |i| i + 1)
    );
    if let Some(path) = &args.out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.progress) {
        anyhow::bail!("--progress must be in [0, 1]");
    }
    if !args.settle.is_finite() || args.settle < 0.0 {
        anyhow::bail!("--settle must be finite and >= 0");
    }
    let cfg = load_config(&args.page)?;
    let mut page = itzfizz_hero::HeroPage::new(cfg)?;

    let region = page.scroll().region();
    page.mount(0.0)?;
    page.on_scroll(region.start + args.progress * region.length, 0.0)?;

    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    while t < args.settle {
        t += dt;
        page.frame(t)?;
    }

    let stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &page.snapshot()).with_context(|| "write snapshot")?;
    println!();
    Ok(())
}

#[derive(serde::Serialize)]
struct TimelineDump {
    declared: itzfizz_hero::hero::HeroTimelines,
    load: itzfizz_hero::CompiledTimeline,
    scroll: itzfizz_hero::CompiledTimeline,
}

fn cmd_timelines(args: PageArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let vp = cfg.viewport;
    let mut scene = itzfizz_hero::hero::build_scene(&cfg)?;
    let declared = itzfizz_hero::hero::build_timelines(&cfg)?;

    declared
        .initial
        .compile(&scene, vp)?
        .apply(&mut scene, None, 0.0);
    let load = declared.load.compile(&scene, vp)?;
    let scroll = declared.scroll.compile(&scene, vp)?;

    let dump = TimelineDump {
        declared,
        load,
        scroll,
    };
    let stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &dump).with_context(|| "write timelines")?;
    println!();
    Ok(())
}

fn cmd_trail(args: TrailArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.page)?;
    let mut page = itzfizz_hero::HeroPage::new(cfg)?;
    // trail stamps fade after the scroll stops, so no settling by default
    drive(&mut page, &args.drive, 0.0, |_, _| Ok(()))?;

    create_parent(&args.out)?;
    page.trail()
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
