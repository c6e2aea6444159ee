use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ternplot::{
    Axis, Catalog, ChartConfig, ChartSession, EnergyMode, Playback, Smoothing, ViewState, Year,
};

#[derive(Parser, Debug)]
#[command(name = "ternplot", version, about = "Ternary energy-mix charts")]
struct Cli {
    /// Chart config JSON (canvas size, margins, point radius, background).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Entity catalog JSON replacing the built-in regions and countries.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Extra directory scanned for .ttf/.otf/.ttc fonts.
    #[arg(long, global = true)]
    font_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one year as SVG or PNG (chosen by the output extension).
    Frame(FrameArgs),
    /// Render a year range as a numbered PNG sequence.
    Play(PlayArgs),
    /// Print the selected frame as JSON.
    Dump(DumpArgs),
    /// List catalog entities in display order with their data coverage.
    List(ListArgs),
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Energy mode: final, useful or power.
    #[arg(long, default_value = "final")]
    mode: EnergyMode,

    /// Show trailing 5-year means instead of annual values.
    #[arg(long)]
    smooth: bool,

    /// Entities to show (repeat or comma separate). Defaults to the catalog selection.
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Select every catalog entity.
    #[arg(long, conflicts_with = "select")]
    all: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Input dataset JSON.
    #[arg(long)]
    data: PathBuf,

    /// Display year.
    #[arg(long)]
    year: i32,

    #[command(flatten)]
    view: ViewArgs,

    /// Axis to highlight: bio, elec or foss.
    #[arg(long)]
    highlight: Option<Axis>,

    /// Entity shown as hovered (enlarged marker and tooltip).
    #[arg(long)]
    hover: Option<String>,

    /// Output path ending in .svg or .png.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Input dataset JSON.
    #[arg(long)]
    data: PathBuf,

    /// First year rendered.
    #[arg(long)]
    from: i32,

    /// Last year rendered; an earlier year plays through the wrap-around.
    #[arg(long)]
    to: i32,

    #[command(flatten)]
    view: ViewArgs,

    /// Playback speed multiplier (10 years per second at 1).
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Pace frame output at the playback rate instead of rendering as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Directory receiving frame_NNNN_YYYY.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Input dataset JSON.
    #[arg(long)]
    data: PathBuf,

    /// Display year.
    #[arg(long)]
    year: i32,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Input dataset JSON.
    #[arg(long)]
    data: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = match &cli.catalog {
        Some(p) => Catalog::from_json_path(p)?,
        None => Catalog::builtin(),
    };
    let config = match &cli.config {
        Some(p) => ChartConfig::from_json_path(p)?,
        None => ChartConfig::default(),
    };
    let font_dir = cli.font_dir.as_deref();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args, catalog, config, font_dir),
        Command::Play(args) => cmd_play(args, catalog, config, font_dir),
        Command::Dump(args) => cmd_dump(args, catalog, config),
        Command::List(args) => cmd_list(args, catalog),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_session(
    data: &Path,
    catalog: Catalog,
    config: ChartConfig,
    font_dir: Option<&Path>,
) -> anyhow::Result<ChartSession> {
    let dataset = ternplot::load_dataset(data)?;
    Ok(ChartSession::new(dataset, catalog, config, font_dir)?)
}

fn build_view(args: &ViewArgs, catalog: &Catalog, year: i32) -> ViewState {
    let mut view = ViewState::initial(catalog)
        .with_mode(args.mode)
        .with_smoothing(Smoothing::from_flag(args.smooth));
    if args.all {
        view = view.with_selection(catalog.names());
    } else if !args.select.is_empty() {
        view = view.with_selection(args.select.iter().map(|s| s.trim().to_string()));
    }
    let clamped = view.clone().with_year(Year(year));
    if clamped.year.0 != year {
        tracing::warn!(
            requested = year,
            shown = clamped.year.0,
            mode = args.mode.as_str(),
            "year outside mode range, clamped"
        );
    }
    clamped
}

fn cmd_frame(
    args: FrameArgs,
    catalog: Catalog,
    config: ChartConfig,
    font_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let ext = args
        .out
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);
    let as_png = match ext.as_deref() {
        Some("png") => true,
        Some("svg") => false,
        _ => anyhow::bail!("output '{}' must end in .svg or .png", args.out.display()),
    };

    let view = build_view(&args.view, &catalog, args.year)
        .with_highlight(args.highlight)
        .with_hovered(args.hover.clone());
    let session = open_session(&args.data, catalog, config, font_dir)?;

    if as_png {
        session.render(&view)?.save_png(&args.out)?;
    } else {
        if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&args.out, session.svg(&view)?)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(
    args: PlayArgs,
    catalog: Catalog,
    config: ChartConfig,
    font_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let mut clock = Playback::new(args.speed)?;
    let view = build_view(&args.view, &catalog, args.from);
    let session = open_session(&args.data, catalog, config, font_dir)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    if args.realtime {
        clock.start(Instant::now());
    }
    let mut index = 0u64;
    let stats = session.play(view, Year(args.to), |v, px| {
        if clock.is_playing() {
            while !clock.poll(Instant::now()) {
                std::thread::sleep(clock.interval() / 8);
            }
        }
        let path = args
            .out_dir
            .join(format!("frame_{index:04}_{}.png", v.year));
        px.save_png(&path)?;
        index += 1;
        Ok(())
    })?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_dump(args: DumpArgs, catalog: Catalog, config: ChartConfig) -> anyhow::Result<()> {
    let view = build_view(&args.view, &catalog, args.year);
    let dataset = ternplot::load_dataset(&args.data)?;
    let scene = ternplot::Scene::new(&config, &catalog)?;
    let frame = ternplot::select_frame(&dataset, &view, scene.triangle())
        .into_display_order(&catalog);

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &frame).context("serialize frame")?;
    writeln!(out).context("write stdout")?;
    Ok(())
}

fn cmd_list(args: ListArgs, catalog: Catalog) -> anyhow::Result<()> {
    let dataset = ternplot::load_dataset(&args.data)?;
    let mut out = std::io::stdout().lock();

    let mut names = catalog.names();
    names.extend(dataset.entity_names().filter(|n| catalog.get(n).is_none()));
    for name in catalog.display_order(names) {
        let kind = match catalog.kind(name) {
            Some(ternplot::EntityKind::Region) => "region",
            Some(ternplot::EntityKind::Country) => "country",
            None => "uncatalogued",
        };
        let coverage = match dataset.entity(name) {
            Some(series) => {
                let years: Vec<Year> = series.years().collect();
                match (years.first(), years.last()) {
                    (Some(a), Some(b)) => format!("{a}-{b} ({} years)", years.len()),
                    _ => "no data".to_string(),
                }
            }
            None => "no data".to_string(),
        };
        let marker = if catalog.default_selection().iter().any(|d| d == name) {
            "*"
        } else {
            " "
        };
        writeln!(
            out,
            "{marker} {name:<24} {kind:<13} {} {coverage}",
            catalog.color(name).to_hex()
        )
        .context("write stdout")?;
    }
    Ok(())
}
