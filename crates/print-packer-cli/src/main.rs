use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use print_packer_core::{
    LayoutModel, PageConfig, PagePreset, UnitScale, document_html, page_svg, to_json_array,
};
use serde::Deserialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "print-packer",
    about = "Arrange images onto printable pages",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute placements and export layout JSON
    Layout(LayoutArgs),
    /// Render one preview SVG per page
    Svg(SvgArgs),
    /// Render a print-ready HTML document (one page break per page)
    Html(LayoutArgs),
    /// Print a packing statistics summary
    Stats(LayoutArgs),
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    // Input/Output
    /// Image directory, single image file, or YAML manifest (.yaml/.yml)
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Output base name (files will be name.json/name.html/name-page-N.svg)
    #[arg(short, long, default_value = "layout", help_heading = "Input/Output")]
    name: String,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Page geometry
    /// Page preset: a3|a4|a5|letter|legal|tabloid
    #[arg(long, default_value = "a4", help_heading = "Page")]
    preset: String,
    /// Page width in mm (overrides preset together with --page-height)
    #[arg(long, help_heading = "Page")]
    page_width: Option<f64>,
    /// Page height in mm (overrides preset together with --page-width)
    #[arg(long, help_heading = "Page")]
    page_height: Option<f64>,
    /// Margin around the page border (mm)
    #[arg(long, default_value_t = 10.0, help_heading = "Page")]
    page_margin: f64,
    /// Minimum gap between images (mm)
    #[arg(long, default_value_t = 5.0, help_heading = "Page")]
    image_margin: f64,

    // Images
    /// Physical width assigned to scanned images (mm); height follows the
    /// source aspect ratio
    #[arg(long, default_value_t = 100.0, help_heading = "Images")]
    default_width: f64,
}

#[derive(Parser, Debug, Clone)]
struct SvgArgs {
    #[command(flatten)]
    layout: LayoutArgs,
    /// Preview resolution in dots per inch
    #[arg(long, default_value_t = 96.0, help_heading = "Output")]
    dpi: f64,
}

/// One entry of a YAML manifest.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    source: String,
    natural_width: u32,
    natural_height: u32,
    #[serde(default)]
    width_mm: Option<f64>,
    #[serde(default)]
    height_mm: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Layout(args) => cmd_layout(&args),
        Commands::Svg(args) => cmd_svg(&args),
        Commands::Html(args) => cmd_html(&args),
        Commands::Stats(args) => cmd_stats(&args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn cmd_layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let model = build_model(args)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let json = to_json_array(model.layout());
    let path = args.out_dir.join(format!("{}.json", args.name));
    fs::write(&path, serde_json::to_string_pretty(&json)?)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {} ({} pages)", path.display(), model.pages().len());
    Ok(())
}

fn cmd_svg(args: &SvgArgs) -> anyhow::Result<()> {
    let model = build_model(&args.layout)?;
    fs::create_dir_all(&args.layout.out_dir)
        .with_context(|| format!("creating {}", args.layout.out_dir.display()))?;
    let scale = UnitScale::dpi(args.dpi);
    for page in model.pages() {
        let svg = page_svg(page, model.config(), scale);
        let path = args
            .layout
            .out_dir
            .join(format!("{}-page-{}.svg", args.layout.name, page.index + 1));
        fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_html(args: &LayoutArgs) -> anyhow::Result<()> {
    let model = build_model(args)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let html = document_html(model.layout());
    let path = args.out_dir.join(format!("{}.html", args.name));
    fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {} ({} pages)", path.display(), model.pages().len());
    Ok(())
}

fn cmd_stats(args: &LayoutArgs) -> anyhow::Result<()> {
    let model = build_model(args)?;
    println!("{}", model.layout().stats().summary());
    Ok(())
}

fn page_config(args: &LayoutArgs) -> anyhow::Result<PageConfig> {
    let (width, height) = match (args.page_width, args.page_height) {
        (Some(w), Some(h)) => (w, h),
        (None, None) => {
            let preset = args
                .preset
                .parse::<PagePreset>()
                .ok()
                .with_context(|| format!("unknown page preset: {}", args.preset))?;
            preset.dimensions_mm()
        }
        _ => bail!("--page-width and --page-height must be given together"),
    };
    let cfg = PageConfig {
        width_mm: width,
        height_mm: height,
        page_margin_mm: args.page_margin,
        image_margin_mm: args.image_margin,
    };
    cfg.validate()?;
    Ok(cfg)
}

fn build_model(args: &LayoutArgs) -> anyhow::Result<LayoutModel> {
    let cfg = page_config(args)?;
    let mut model = LayoutModel::new(cfg)?;

    let is_manifest = args
        .input
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_manifest {
        add_from_manifest(&mut model, &args.input)?;
    } else {
        add_from_files(&mut model, args)?;
    }

    if model.images().is_empty() {
        bail!("no images found in {}", args.input.display());
    }
    Ok(model)
}

fn add_from_manifest(model: &mut LayoutModel, path: &Path) -> anyhow::Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let entries: Vec<ManifestEntry> =
        serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    for entry in entries {
        let id = model.add_image(entry.source, entry.natural_width, entry.natural_height)?;
        if entry.width_mm.is_some() || entry.height_mm.is_some() {
            let aspect_locked = entry.width_mm.is_none() || entry.height_mm.is_none();
            model.resize_image(id, entry.width_mm, entry.height_mm, aspect_locked)?;
        }
    }
    Ok(())
}

fn add_from_files(model: &mut LayoutModel, args: &LayoutArgs) -> anyhow::Result<()> {
    let include = build_globset(&args.include)?;
    let exclude = build_globset(&args.exclude)?;

    let mut files: Vec<PathBuf> = Vec::new();
    if args.input.is_file() {
        files.push(args.input.clone());
    } else {
        for entry in WalkDir::new(&args.input).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        // deterministic input order regardless of directory walk order
        files.sort();
    }

    for path in files {
        let rel = path.to_string_lossy().to_string();
        if let Some(inc) = &include {
            if !inc.is_match(&path) {
                continue;
            }
        }
        if let Some(exc) = &exclude {
            if exc.is_match(&path) {
                continue;
            }
        }
        let (w, h) = match image::image_dimensions(&path) {
            Ok(dims) => dims,
            Err(err) => {
                warn!("skipping {}: {}", rel, err);
                continue;
            }
        };
        debug!("adding {} ({}x{} px)", rel, w, h);
        let id = model.add_image(rel, w, h)?;
        model.resize_image(id, Some(args.default_width), None, true)?;
    }
    Ok(())
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for p in patterns {
        builder.add(Glob::new(p).with_context(|| format!("invalid glob: {p}"))?);
    }
    Ok(Some(builder.build()?))
}
