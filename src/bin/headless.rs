//! Renders a scene offscreen and writes the last frame to a PNG.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::RgbaImage;
use log::info;

use softrender::colors;
use softrender::prelude::*;

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Wireframe,
    Dots,
    Filled,
    FilledWireframe,
    Textured,
    TexturedWireframe,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Wireframe => RenderMode::WireframeLine,
            Mode::Dots => RenderMode::WireframeDot,
            Mode::Filled => RenderMode::Filled,
            Mode::FilledWireframe => RenderMode::FilledWireframe,
            Mode::Textured => RenderMode::Textured,
            Mode::TexturedWireframe => RenderMode::TexturedWireframe,
        }
    }
}

#[derive(Parser)]
struct Args {
    /// Mesh to render (OBJ); the built-in cube if omitted
    obj: Option<PathBuf>,

    /// Write the final frame to this PNG
    #[arg(long, short, default_value = "frame.png")]
    output: PathBuf,

    /// JSON render config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the config's render mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Texture image applied to every mesh
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Number of frames to render, spinning the meshes between frames
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Distance from the camera the meshes are placed at
    #[arg(long, default_value_t = 5.0)]
    distance: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.render_mode = mode.into();
    }

    let mut scene = match &args.obj {
        Some(path) => Scene::from_obj(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            let mut scene = Scene::new();
            scene.add_mesh(Mesh::cube());
            scene
        }
    };
    let texture = match &args.texture {
        Some(path) => Some(Rc::new(Texture::from_file(path)?)),
        None => None,
    };
    for mesh in scene.meshes_mut() {
        mesh.transform_mut().set_position_xyz(0.0, 0.0, args.distance);
        if let Some(texture) = &texture {
            mesh.set_texture(Rc::clone(texture));
        }
    }

    let mut engine = Engine::new(&config)?;
    let mut total = FrameStats::default();
    for frame in 0..args.frames.max(1) {
        if frame > 0 {
            for mesh in scene.meshes_mut() {
                mesh.transform_mut().rotate(Vec3::new(0.01, 0.01, 0.01));
            }
        }
        total += *engine.update(&scene);
        engine.render();
    }
    info!("Last frame: {}", engine.stats());
    if args.frames > 1 {
        info!("All {} frames: {}", args.frames, total);
    }

    let bytes: Vec<u8> = engine
        .color_buffer()
        .iter()
        .flat_map(|&pixel| colors::to_rgba_bytes(pixel))
        .collect();
    let image = RgbaImage::from_raw(engine.width(), engine.height(), bytes)
        .context("frame buffer does not match its dimensions")?;
    image
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());
    Ok(())
}
