/// WF3D Terminal Viewer
///
/// Wireframe polyhedra with back-face removal, drawn in the terminal.
/// Controls:
///   - 1-7: Pyramid, cube, octahedron, icosahedron, dodecahedron, spheres
///   - WASD / Arrow Keys / mouse drag: Rotate
///   - Q/E: Twist
///   - +/- / mouse wheel: Zoom
///   - I/J/K/L: Move
///   - X/Y/Z: Mirror
///   - P: Toggle perspective, C: Toggle culling, F: Save nodes
///   - ESC: Quit
use std::fs::File;
use std::io;

use env_logger::{Env, Target};
use log::{info, warn};
use wf3d_core::Scene;
use wf3d_terminal::{AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let mut logger = env_logger::Builder::from_env(
        Env::default().default_filter_or(config.debug.filter()),
    );
    if let Some(path) = &config.debug.log_file {
        logger.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    logger.init();

    if let Some(e) = config_error {
        warn!("{}; using defaults", e);
    }

    let scene = Scene::new(&config.scene)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        .with_gestures(config.input.gestures());

    info!("starting terminal viewer with {}", scene.label());
    let mut app = TerminalApp::new(scene, config)?;
    app.run()
}
