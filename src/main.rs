use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;

use softrender::prelude::*;

/// World units per movement key press.
const MOVE_STEP: f32 = 0.1;
/// Radians per turn or look key press.
const TURN_STEP: f32 = 0.03;

#[derive(Parser)]
struct Args {
    /// Mesh to display (OBJ); the built-in cube if omitted
    obj: Option<PathBuf>,

    /// Texture image applied to every mesh
    #[arg(long)]
    texture: Option<PathBuf>,

    /// JSON render config
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_scene(args: &Args) -> Result<Scene> {
    let mut scene = match &args.obj {
        Some(path) => Scene::from_obj(path)?,
        None => {
            let mut scene = Scene::new();
            scene.add_mesh(Mesh::cube());
            scene
        }
    };

    let texture = match &args.texture {
        Some(path) => Rc::new(Texture::from_file(path)?),
        None => Rc::new(Texture::checkerboard(64, 64, 8, 0xFFFFFFFF, 0xFF3060C0)?),
    };
    for mesh in scene.meshes_mut() {
        mesh.transform_mut().set_position_xyz(0.0, 0.0, 5.0);
        mesh.set_texture(Rc::clone(&texture));
    }
    Ok(scene)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };
    let mut scene = load_scene(&args)?;
    info!("Loaded {} meshes, {} faces", scene.len(), scene.face_count());

    let mut window = Window::new("softrender", config.width, config.height).map_err(|e| anyhow!(e))?;
    let mut engine = Engine::new(&config)?;
    let mut limiter = FrameLimiter::new(&window);

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(width, height) => {
                    engine.resize(width, height)?;
                    window.resize(width, height).map_err(|e| anyhow!(e))?;
                }
                WindowEvent::SetRenderMode(mode) => {
                    info!("Render mode: {}", mode);
                    engine.set_render_mode(mode);
                }
                WindowEvent::SetBackfaceCulling(enabled) => {
                    info!("Back-face culling: {}", enabled);
                    engine.set_backface_culling(enabled);
                }
                WindowEvent::ToggleGrid => {
                    let enabled = !engine.draw_grid();
                    engine.set_draw_grid(enabled);
                }
                WindowEvent::MoveCamera(movement) => {
                    engine.camera_mut().apply(movement, MOVE_STEP, TURN_STEP);
                }
            }
        }

        for mesh in scene.meshes_mut() {
            mesh.transform_mut().rotate(Vec3::new(0.01, 0.01, 0.01));
        }

        engine.update(&scene);
        engine.render();
        window.present(engine.frame_bytes()).map_err(|e| anyhow!(e))?;
        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
