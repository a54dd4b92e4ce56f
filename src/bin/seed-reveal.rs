use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use seed_reveal::{
    CpuTarget, EffectConfig, EffectController, Manifest, ShapeKind, load_image, mount_all,
    scan_containers,
};

#[derive(Parser, Debug)]
#[command(name = "seed-reveal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single reveal frame as a PNG.
    Frame(FrameArgs),
    /// Render a hover-in / hover-out sequence as numbered PNGs.
    Hover(HoverArgs),
    /// Mount every container of a page manifest and write one PNG per effect.
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
struct EffectArgs {
    /// Effect config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overlay shape (`rect` or `circle`).
    #[arg(long)]
    kind: Option<String>,

    /// Tile size in pixels.
    #[arg(long)]
    seed: Option<u32>,

    /// Fixed shuffle seed for a reproducible reveal order.
    #[arg(long)]
    shuffle_seed: Option<u64>,

    /// Target width (defaults to the image width).
    #[arg(long)]
    width: Option<u32>,

    /// Target height (defaults to the image height).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Reveal progress; 0 draws the plain image, 1 paints every tile at full size.
    #[arg(long, default_value_t = 1.0)]
    progress: f64,

    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Parser, Debug)]
struct HoverArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frames per second of timeline time.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Page manifest JSON. Image sources resolve relative to its directory.
    #[arg(long)]
    manifest: PathBuf,

    /// Output directory for `<id>.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Base effect config JSON for attributes a container does not set.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Hover(args) => cmd_hover(args),
        Command::Scan(args) => cmd_scan(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut effect = build_effect(&args.image, &args.effect)?;
    effect.render(args.progress);
    write_png(effect.target(), &args.out)
}

fn cmd_hover(args: HoverArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");
    let mut effect = build_effect(&args.image, &args.effect)?;
    let dt = Duration::from_secs_f64(1.0 / f64::from(args.fps));

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut idx = 0u32;
    write_png(effect.target(), &frame_path(&args.out_dir, idx))?;
    idx += 1;

    for leave in [false, true] {
        if leave {
            effect.pointer_leave();
        } else {
            effect.pointer_enter();
        }
        while effect.advance(dt).is_some() {
            write_png(effect.target(), &frame_path(&args.out_dir, idx))?;
            idx += 1;
            if !effect.timeline().is_running() {
                break;
            }
        }
    }
    Ok(())
}

fn cmd_scan(args: ScanArgs) -> anyhow::Result<()> {
    let manifest = Manifest::from_path(&args.manifest)?;
    let base = match &args.config {
        Some(path) => EffectConfig::from_path(path)?,
        None => EffectConfig::default(),
    };
    let assets_root = args
        .manifest
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));

    let requests = scan_containers(&manifest, &base);
    let mounted = mount_all(&requests, assets_root);
    if mounted.len() < requests.len() {
        eprintln!(
            "skipped {} of {} containers",
            requests.len() - mounted.len(),
            requests.len()
        );
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let mut written = HashSet::new();
    for m in &mounted {
        if !is_plain_file_stem(&m.id) {
            eprintln!("skipped container '{}': id is not a plain file name", m.id);
            continue;
        }
        if !written.insert(m.id.as_str()) {
            eprintln!("skipped container '{}': duplicate id", m.id);
            continue;
        }
        write_png(m.effect.target(), &args.out_dir.join(format!("{}.png", m.id)))?;
    }
    Ok(())
}

/// `true` when `id` names a file directly inside the output directory.
fn is_plain_file_stem(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.chars().any(|c| matches!(c, '/' | '\\' | ':' | '\0'))
}

fn build_effect(image: &Path, args: &EffectArgs) -> anyhow::Result<EffectController<CpuTarget>> {
    let mut config = match &args.config {
        Some(path) => EffectConfig::from_path(path)?,
        None => EffectConfig::default(),
    };
    if let Some(kind) = &args.kind {
        config.kind = ShapeKind::parse(kind);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.shuffle_seed.is_some() {
        config.shuffle_seed = args.shuffle_seed;
    }

    let img = load_image(image)?;
    let width = args.width.unwrap_or(img.width());
    let height = args.height.unwrap_or(img.height());
    let effect = EffectController::new(img, CpuTarget::new(width, height), config)?;
    Ok(effect)
}

fn frame_path(dir: &Path, idx: u32) -> PathBuf {
    dir.join(format!("frame_{idx:04}.png"))
}

fn write_png(target: &CpuTarget, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    target
        .to_rgba_image()
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
