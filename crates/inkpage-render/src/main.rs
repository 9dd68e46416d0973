//! Export a saved drawing block to PNG.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use inkpage_core::{ConfigError, Engine, EngineConfig, PersistedAttrs, StorageError, ViewTransform};
use inkpage_render::{RenderContext, Renderer, RendererError, SkiaRenderer};
use kurbo::{Size, Vec2};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "inkpage-export", about = "Render a saved drawing block to a PNG image")]
struct Args {
    /// Persisted block attributes (JSON)
    input: PathBuf,

    /// Output PNG path
    output: PathBuf,

    #[arg(long, default_value_t = 1024)]
    width: u32,

    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Zoom level, clamped to the supported range
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Pan offset in screen pixels
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,

    /// Engine configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum ExportError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid block attributes: {0}")]
    Attrs(#[from] StorageError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

fn read(path: &Path) -> Result<String, ExportError> {
    std::fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn export(args: &Args) -> Result<(), ExportError> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_json(&read(path)?)?,
        None => EngineConfig::default(),
    };
    let attrs = PersistedAttrs::from_json(&read(&args.input)?)?;

    let mut engine = Engine::from_attrs(&attrs, config);
    engine.set_view(ViewTransform {
        zoom: args.zoom,
        pan: Vec2::new(args.pan_x, args.pan_y),
    });

    let mut renderer = SkiaRenderer::new(args.width, args.height);
    let size = Size::new(args.width as f64, args.height as f64);
    renderer.build_scene(&RenderContext::from_engine(&engine, size));
    let png = renderer.export_png()?;

    std::fs::write(&args.output, png).map_err(|source| ExportError::Write {
        path: args.output.clone(),
        source,
    })?;
    log::info!(
        "Wrote {} strokes to {}",
        engine.document().len(),
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match export(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Export failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
