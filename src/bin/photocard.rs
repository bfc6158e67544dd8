use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};

use photocard::{
    Alignment, Canvas, Color, EditorEvent, EditorOpts, EditorSession, EventOutcome, ExportFormat,
    ExportedImage, FontBook, StyleChange, TemplateHandoff, TemplateModel, TextMetrics,
};

#[derive(Parser, Debug)]
#[command(name = "photocard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one card from flags.
    Compose(ComposeArgs),
    /// Replay a JSON script of editor events.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Template handoff JSON (`{name, image, frame}`).
    #[arg(long)]
    template: PathBuf,

    /// Directory the template's `image` path is relative to. Defaults to the handoff's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Extra font file. The first registered family is the default.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Directory of `.ttf`/`.otf`/`.ttc` fonts.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    template: TemplateArgs,

    /// Photo to place in the frame.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Text block, repeat up to three times.
    #[arg(long = "text")]
    texts: Vec<String>,

    /// Font family name.
    #[arg(long)]
    family: Option<String>,

    /// Text alignment: left, center or right.
    #[arg(long, default_value = "center")]
    align: Alignment,

    /// Text color, `#RRGGBB`.
    #[arg(long)]
    color: Option<Color>,

    /// Draw the banner behind the text.
    #[arg(long, default_value_t = false)]
    banner: bool,

    /// Banner color, `#RRGGBB`.
    #[arg(long = "banner-color")]
    banner_color: Option<Color>,

    /// Baseline of the first text line.
    #[arg(long = "text-y")]
    text_y: Option<f64>,

    /// Photo zoom factor applied after the cover fit.
    #[arg(long)]
    zoom: Option<f64>,

    /// Photo rotation in degrees.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotate: f64,

    /// Output format: png or jpg.
    #[arg(long, default_value = "png")]
    format: ExportFormat,

    /// JPEG quality in (0, 1].
    #[arg(long, default_value_t = photocard::DEFAULT_JPEG_QUALITY)]
    quality: f32,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    template: TemplateArgs,

    /// JSON array of editor events. `{"load_photo": "path"}` steps read a photo from disk,
    /// relative to the script.
    #[arg(long)]
    events: PathBuf,

    /// Output path for the last export.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Deserialize, Debug)]
#[serde(untagged)]
enum ScriptStep {
    LoadPhoto { load_photo: PathBuf },
    Event(EditorEvent),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn open_session(args: &TemplateArgs, jpeg_quality: f32) -> anyhow::Result<EditorSession> {
    let handoff = TemplateHandoff::from_path(&args.template)?;
    let assets_root = match &args.assets {
        Some(dir) => dir.clone(),
        None => args
            .template
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let template = TemplateModel::load(&handoff, &assets_root, Canvas::CARD)?;

    let mut fonts = FontBook::from_env();
    for dir in &args.font_dirs {
        if fonts.add_dir(dir) == 0 {
            tracing::warn!(dir = %dir.display(), "no fonts found");
        }
    }
    for f in &args.fonts {
        fonts.add_file(f)?;
    }

    let opts = EditorOpts {
        text: TextMetrics::default(),
        fonts,
        clear_rgba: None,
        jpeg_quality,
    };
    Ok(EditorSession::new(template, opts)?)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    if args.texts.len() > photocard::TEXT_SLOTS {
        bail!("at most {} --text blocks", photocard::TEXT_SLOTS);
    }
    let mut sess = open_session(&args.template, args.quality)?;

    if let Some(photo) = &args.photo {
        let bytes =
            std::fs::read(photo).with_context(|| format!("read photo '{}'", photo.display()))?;
        sess.load_image_bytes(&bytes)
            .with_context(|| format!("decode photo '{}'", photo.display()))?;
    }
    if let Some(zoom) = args.zoom
        && !sess.set_scale(zoom)
    {
        bail!("--zoom must be finite and > 0");
    }
    if !sess.set_rotation(args.rotate) {
        bail!("--rotate must be finite");
    }
    for (slot, text) in args.texts.into_iter().enumerate() {
        sess.set_text(slot, text);
    }

    let mut changes = vec![
        StyleChange::Align(args.align),
        StyleChange::Banner(args.banner),
    ];
    changes.extend(args.family.map(StyleChange::FontFamily));
    changes.extend(args.color.map(StyleChange::TextColor));
    changes.extend(args.banner_color.map(StyleChange::BannerColor));
    changes.extend(args.text_y.map(StyleChange::AnchorY));
    for change in changes {
        if !sess.apply_style(change.clone()) {
            bail!("invalid style value {change:?}");
        }
    }

    let out = sess.export(args.format)?;
    write_export(&args.out, &out)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.template, photocard::DEFAULT_JPEG_QUALITY)?;

    let script = std::fs::read(&args.events)
        .with_context(|| format!("read events '{}'", args.events.display()))?;
    let steps: Vec<ScriptStep> = serde_json::from_slice(&script)
        .with_context(|| format!("parse events '{}'", args.events.display()))?;
    let script_dir = args
        .events
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let mut last_export = None;
    let mut ignored = 0usize;
    for (i, step) in steps.into_iter().enumerate() {
        let event = match step {
            ScriptStep::LoadPhoto { load_photo } => {
                let path = script_dir.join(load_photo);
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read photo '{}'", path.display()))?;
                EditorEvent::ImageLoaded(bytes)
            }
            ScriptStep::Event(e) => e,
        };
        match sess.dispatch(event) {
            EventOutcome::Rendered => {}
            EventOutcome::Ignored => ignored += 1,
            EventOutcome::Exported(out) => last_export = Some(out),
            EventOutcome::Failed(msg) => bail!("step {i} failed: {msg}"),
        }
    }
    if ignored > 0 {
        tracing::info!(ignored, "some steps changed nothing");
    }

    let out = match last_export {
        Some(out) => out,
        None => sess.export(ExportFormat::Png)?,
    };
    write_export(&args.out, &out)
}

fn write_export(path: &Path, out: &ExportedImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, &out.bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {} ({}, suggested name {})", path.display(), out.mime, out.file_name);
    Ok(())
}
