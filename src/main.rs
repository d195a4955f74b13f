//! xedit entrypoint.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use xedit::font::{convert_atlas_file, BitFont};
use xedit::{CanvasPresenter, Config, Engine, EngineConfig, Presenter, Session, Theme};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "xedit", version, about = "Syntax-highlighting text view")]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    /// Configuration file (overrides discovery of `xedit.toml`).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    /// File to edit when no subcommand is given.
    path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Edit a file in the terminal (a missing file starts empty).
    Edit {
        /// File to open.
        path: Option<PathBuf>,
    },
    /// Convert a 128x256 32-bit TGA glyph atlas into a font asset.
    ConvertFont {
        /// Atlas image.
        #[arg(value_name = "TGA")]
        atlas: PathBuf,
        /// Font asset to write.
        #[arg(value_name = "OUT")]
        out: PathBuf,
    },
    /// Render a file headlessly and write the frame as a PPM image.
    Snapshot {
        /// File to render.
        path: PathBuf,
        /// Font asset (defaults to `font` from the configuration).
        #[arg(long, value_name = "FONT")]
        font: Option<PathBuf>,
        /// Image to write.
        #[arg(long, value_name = "PPM")]
        out: PathBuf,
        /// Viewport width in pixels.
        #[arg(long, default_value_t = 800)]
        width: u32,
        /// Viewport height in pixels.
        #[arg(long, default_value_t = 600)]
        height: u32,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to a file: the terminal is in raw mode while editing.
fn init_file_logging(path: &Path) -> Option<WorkerGuard> {
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let name = path.file_name()?;
    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|()| guard)
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "session", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_config(path: Option<&Path>) -> Result<(Config, Arc<Theme>)> {
    let config = Config::load_from(path).context("failed to load configuration")?;
    let theme = Theme::from_config(&config.theme).context("invalid [theme] section")?;
    Ok((config, Arc::new(theme)))
}

fn edit(config_path: Option<&Path>, path: Option<&Path>) -> Result<()> {
    let (config, theme) = load_config(config_path)?;
    let _guard = init_file_logging(&config.log.file);
    install_panic_hook();

    // The terminal shows characters, not glyphs; the font is only checked.
    if let Some(font) = &config.font {
        if let Err(err) = BitFont::load(font) {
            warn!(target: "font", path = %font.display(), error = %err, "font_unavailable");
        }
    }

    let session = match path {
        Some(path) => Session::open(path, theme)
            .with_context(|| format!("failed to open {}", path.display()))?,
        None => Session::load_text(Vec::new(), theme),
    };

    let mut engine = Engine::new(session, EngineConfig::from(&config.input))
        .context("failed to set up the terminal")?;
    engine.run().context("terminal session failed")?;
    info!(target: "session", frames = engine.frame_count(), "shutdown");
    Ok(())
}

fn snapshot(
    config_path: Option<&Path>,
    path: &Path,
    font: Option<PathBuf>,
    out: &Path,
    (width, height): (u32, u32),
) -> Result<()> {
    let (config, theme) = load_config(config_path)?;
    let font_path = font
        .or(config.font)
        .context("no font asset: pass --font or set `font` in the configuration")?;
    let font = BitFont::load(&font_path)
        .with_context(|| format!("failed to load font {}", font_path.display()))?;

    let mut session = Session::open(path, theme)
        .with_context(|| format!("failed to open {}", path.display()))?;
    session.on_resize(width, height);

    let mut presenter = CanvasPresenter::new(font, width, height);
    presenter.present(&session.render())?;

    let file = File::create(out).with_context(|| format!("failed to create {}", out.display()))?;
    presenter
        .canvas()
        .write_ppm(&mut BufWriter::new(file))
        .with_context(|| format!("failed to write {}", out.display()))?;
    info!(target: "session", out = %out.display(), width, height, "snapshot_written");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.as_deref();

    match args.command {
        None => edit(config_path, args.path.as_deref()),
        Some(Command::Edit { path }) => edit(config_path, path.as_deref()),
        Some(Command::ConvertFont { atlas, out }) => {
            init_stderr_logging();
            convert_atlas_file(&atlas, &out)
                .with_context(|| format!("failed to convert {}", atlas.display()))
        }
        Some(Command::Snapshot {
            path,
            font,
            out,
            width,
            height,
        }) => {
            init_stderr_logging();
            snapshot(config_path, &path, font, &out, (width, height))
        }
    }
}
