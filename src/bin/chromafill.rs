use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chromafill::{
    Background, Canvas, Compositor, CompositorOpts, GradientSpec, ImageSource, LoaderOpts,
    RenderReport, RenderRequest, Rgba8, SourceLoader, sample_subject_png,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chromafill", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a request JSON file to a PNG.
    Render(RenderArgs),
    /// Render one of the built-in backgrounds and write a numbered export.
    Preset(PresetArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Render request JSON. Relative image paths resolve against its directory.
    #[arg(long)]
    request: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Placeholder accent color.
    #[arg(long)]
    accent: Option<Rgba8>,

    /// Print the render report as JSON on stdout.
    #[arg(long, default_value_t = false)]
    report: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Color,
    Gradient,
    Stripes,
    Dots,
    Grid,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Background to render.
    #[arg(long, value_enum, default_value_t = Preset::Color)]
    background: Preset,

    /// Color for `color` and pattern backgrounds.
    #[arg(long, default_value_t = Rgba8::ACCENT)]
    color: Rgba8,

    /// Subject image file.
    #[arg(long, conflicts_with = "demo_subject")]
    subject: Option<PathBuf>,

    /// Use the bundled sample subject.
    #[arg(long, default_value_t = false)]
    demo_subject: bool,

    #[arg(long, default_value_t = Canvas::DEFAULT.width)]
    width: u32,

    #[arg(long, default_value_t = Canvas::DEFAULT.height)]
    height: u32,

    /// Directory the export is written to.
    #[arg(long)]
    out_dir: PathBuf,
}

/// Names exports `chromafill-<stem>-v<n>.png` with one counter shared by every stem.
#[derive(Debug, Default)]
struct ExportNamer {
    count: u32,
}

impl ExportNamer {
    /// Continue after the highest version already exported into `dir`.
    fn continuing_in(dir: &Path) -> anyhow::Result<Self> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("read output dir '{}'", dir.display()));
            }
        };
        let mut count = 0;
        for entry in entries {
            let entry = entry.with_context(|| format!("read output dir '{}'", dir.display()))?;
            if let Some(n) = entry.file_name().to_str().and_then(export_version) {
                count = count.max(n);
            }
        }
        Ok(Self { count })
    }

    fn next_name(&mut self, stem: Option<&str>) -> String {
        self.count += 1;
        match stem.filter(|s| !s.is_empty()) {
            Some(stem) => format!("chromafill-{stem}-v{}.png", self.count),
            None => format!("chromafill-export-v{}.png", self.count),
        }
    }
}

fn export_version(name: &str) -> Option<u32> {
    let rest = name.strip_prefix("chromafill-")?.strip_suffix(".png")?;
    let (_, n) = rest.rsplit_once("-v")?;
    n.parse().ok()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.request)
        .with_context(|| format!("read request '{}'", args.request.display()))?;
    let request = RenderRequest::from_json_str(&json)?;
    let assets_root = args
        .request
        .parent()
        .unwrap_or_else(|| Path::new("."));

    let mut opts = CompositorOpts::default();
    if let Some(accent) = args.accent {
        opts = opts.with_accent(accent);
    }
    let (report, png) = render_png(&request, assets_root, opts)?;
    write_png(&args.out, &png)?;

    if args.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let background = match args.background {
        Preset::Color => Background::Color {
            color: args.color,
            opacity: 1.0,
        },
        Preset::Gradient => Background::Gradient(GradientSpec::default()),
        Preset::Stripes => pattern("stripes", args.color),
        Preset::Dots => pattern("dots", args.color),
        Preset::Grid => pattern("grid", args.color),
    };
    let mut request = RenderRequest::new(background).with_canvas(args.width, args.height);

    let mut stem = None;
    if let Some(path) = &args.subject {
        stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
        request = request.with_subject(ImageSource::uri(path.to_string_lossy()));
    } else if args.demo_subject {
        stem = Some("demo-subject".to_owned());
        request = request.with_subject(ImageSource::bytes(sample_subject_png()?));
    }

    let (_, png) = render_png(&request, Path::new("."), CompositorOpts::default())?;
    let name = ExportNamer::continuing_in(&args.out_dir)?.next_name(stem.as_deref());
    let out = args.out_dir.join(name);
    write_png(&out, &png)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn pattern(style: &str, color: Rgba8) -> Background {
    Background::Pattern {
        style: style.to_owned(),
        color,
    }
}

fn render_png(
    request: &RenderRequest,
    assets_root: &Path,
    opts: CompositorOpts,
) -> anyhow::Result<(RenderReport, Vec<u8>)> {
    let loader = SourceLoader::new(LoaderOpts::from_env().with_assets_root(assets_root));
    let mut compositor = Compositor::with_opts(loader, opts);
    let report = compositor.render_blocking(request)?;
    let surface = compositor
        .surface()
        .context("render finished without a surface")?;
    Ok((report, surface.encode_png()?))
}

fn write_png(path: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))
}
