use std::{collections::BTreeMap, io::Write as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one scroll offset and print the frame as JSON.
    Eval(OffsetArgs),
    /// Evaluate offsets across the pinned range, one JSON line each.
    Sweep(SweepArgs),
    /// Print the inline style operations for one scroll offset.
    Plan(PlanArgs),
    /// Validate a reel configuration.
    Check(CheckArgs),
    /// Print the track markup for the configured panels.
    Markup(CheckArgs),
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Input reel configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport size as WIDTHxHEIGHT (CSS pixels).
    #[arg(long, default_value = "1000x800", value_parser = parse_viewport)]
    viewport: scrollreel::Viewport,

    /// Page offset where the pinned range starts.
    #[arg(long, default_value_t = 0.0)]
    pin_start: f64,
}

#[derive(Parser, Debug)]
struct OffsetArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Vertical page scroll offset in pixels.
    #[arg(long, allow_negative_numbers = true)]
    offset: f64,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Distance between sampled offsets in pixels.
    #[arg(long, default_value_t = 250.0)]
    step: f64,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    at: OffsetArgs,

    /// Run a headless session and print the resulting inline styles per element.
    #[arg(long, default_value_t = false)]
    applied: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input reel configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn parse_viewport(s: &str) -> Result<scrollreel::Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width '{w}': {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height '{h}': {e}"))?;
    scrollreel::Viewport::new(w, h).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Eval(args) => cmd_eval(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Check(args) => cmd_check(args),
        Command::Markup(args) => cmd_markup(args),
    }
}

fn evaluator(page: &PageArgs) -> anyhow::Result<scrollreel::Evaluator> {
    let config = scrollreel::ReelConfig::from_path(&page.in_path)?;
    scrollreel::Evaluator::new(&config, page.viewport, page.pin_start)
        .with_context(|| format!("invalid reel config '{}'", page.in_path.display()))
}

fn cmd_eval(args: OffsetArgs) -> anyhow::Result<()> {
    let frame = evaluator(&args.page)?.eval(args.offset)?;
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let frames = evaluator(&args.page)?.sweep(args.step)?;
    let mut out = std::io::stdout().lock();
    for frame in &frames {
        serde_json::to_writer(&mut out, frame)?;
        writeln!(out)?;
    }
    eprintln!("sampled {} offsets", frames.len());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let OffsetArgs { page, offset } = args.at;
    if !args.applied {
        let frame = evaluator(&page)?.eval(offset)?;
        let plan = scrollreel::compile_frame(&frame);
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let config = scrollreel::ReelConfig::from_path(&page.in_path)?;
    let mut host = scrollreel::MemoryHost::new(page.viewport);
    let elements = host.reel_elements(config.panel_count());
    if let Some(spacer) = elements.spacer {
        host.set_page_top(spacer, page.pin_start);
    }

    let mut session = scrollreel::AnimationSession::new(config, elements.clone(), host)
        .with_context(|| format!("invalid reel config '{}'", page.in_path.display()))?;
    session.start()?;
    session.host_mut().scroll_to(offset);
    session.handle(scrollreel::HostEvent::Scroll)?;

    let mut named = vec![("track".to_string(), elements.track)];
    named.extend(elements.spacer.map(|el| ("spacer".to_string(), el)));
    for (i, p) in elements.panels.iter().enumerate() {
        named.extend(p.image.map(|el| (format!("panel[{i}].image"), el)));
        named.extend(p.text.map(|el| (format!("panel[{i}].text"), el)));
    }
    let styles: BTreeMap<_, _> = named
        .into_iter()
        .filter_map(|(name, el)| Some((name, session.host().styles_of(el)?.clone())))
        .collect();
    println!("{}", serde_json::to_string_pretty(&styles)?);
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = scrollreel::ReelConfig::from_path(&args.in_path)?;
    config
        .validate()
        .with_context(|| format!("invalid reel config '{}'", args.in_path.display()))?;
    println!(
        "ok: {} panels, scroll distance {:?} x {}",
        config.panel_count(),
        config.track.scroll_distance,
        config.track.scroll_scale
    );
    Ok(())
}

fn cmd_markup(args: CheckArgs) -> anyhow::Result<()> {
    let config = scrollreel::ReelConfig::from_path(&args.in_path)?;
    config
        .validate()
        .with_context(|| format!("invalid reel config '{}'", args.in_path.display()))?;
    print!("{}", scrollreel::reel_markup(&config));
    Ok(())
}
