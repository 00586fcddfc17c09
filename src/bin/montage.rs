use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use montage::{
    CollageConfig, DayOfYear, DaySource, EntityId, ImageEnhancer, ImageKind, ImageSize,
    LibrarySnapshot, PlaylistCollageEnhancer,
};

#[derive(Parser, Debug)]
#[command(name = "montage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a playlist collage to an image file.
    Render(RenderArgs),
    /// Print the cache key for a playlist collage.
    Key(TargetArgs),
    /// Print the size a collage would have, without rendering it.
    Size(SizeArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Primary,
    Thumb,
}

impl From<KindArg> for ImageKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Primary => ImageKind::Primary,
            KindArg::Thumb => ImageKind::Thumb,
        }
    }
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Library manifest JSON (items + playlists).
    #[arg(long)]
    library: PathBuf,

    /// Playlist id (UUID, dashed or simple form).
    #[arg(long)]
    playlist: EntityId,

    #[arg(long, value_enum, default_value_t = KindArg::Primary)]
    kind: KindArg,

    /// Override the rotation day-of-year (1-366).
    #[arg(long)]
    day: Option<u16>,

    /// Collage config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Image written unchanged when the playlist has no usable artwork.
    #[arg(long)]
    original: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SizeArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Width reported when there is nothing to draw.
    #[arg(long, default_value_t = 0)]
    original_width: u32,

    /// Height reported when there is nothing to draw.
    #[arg(long, default_value_t = 0)]
    original_height: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Key(args) => cmd_key(args),
        Command::Size(args) => cmd_size(args),
    }
}

fn load(
    target: &TargetArgs,
) -> anyhow::Result<(PlaylistCollageEnhancer<LibrarySnapshot>, CollageConfig)> {
    let library = LibrarySnapshot::from_path(&target.library)?;
    let config = match &target.config {
        Some(path) => CollageConfig::from_path(path)?,
        None => CollageConfig::default(),
    };
    let mut enhancer = PlaylistCollageEnhancer::with_config(Arc::new(library), &config)?;
    if let Some(day) = target.day {
        enhancer = enhancer.with_day_source(DaySource::Fixed(DayOfYear::new(day)?));
    }
    Ok((enhancer, config))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (enhancer, config) = load(&args.target)?;
    let kind = ImageKind::from(args.target.kind);
    let collage = enhancer.render_collage(args.target.playlist, kind)?;

    let Some(collage) = collage else {
        let Some(original) = args.original else {
            eprintln!("playlist has no usable artwork; nothing written");
            return Ok(());
        };
        create_parent_dir(&args.out)?;
        std::fs::copy(&original, &args.out)
            .with_context(|| format!("copy original '{}'", original.display()))?;
        eprintln!("no usable artwork; wrote original to {}", args.out.display());
        return Ok(());
    };

    let bytes = collage.encode(config.output_format)?;
    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, bytes)
        .with_context(|| format!("write collage '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        collage.width(),
        collage.height()
    );
    Ok(())
}

fn create_parent_dir(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_key(args: TargetArgs) -> anyhow::Result<()> {
    let (enhancer, _) = load(&args)?;
    let key = enhancer.cache_key(args.playlist, args.kind.into())?;
    println!("{key}");
    Ok(())
}

fn cmd_size(args: SizeArgs) -> anyhow::Result<()> {
    let (enhancer, _) = load(&args.target)?;
    let original = ImageSize::new(args.original_width, args.original_height);
    let size = enhancer.enhanced_size(args.target.playlist, args.target.kind.into(), original)?;
    println!("{}x{}", size.width, size.height);
    Ok(())
}
