/// Example: Load a saved node file and view it in the terminal
///
/// Usage: cargo run --example load_mesh -- saved_nodes/cube.txt

use std::env;
use std::io;
use wf3d_core::{mesh_file, Scene};
use wf3d_terminal::{AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    env_logger::init();

    let config = AppConfig::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut scene = Scene::new(&config.scene)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        .with_gestures(config.input.gestures());

    let args: Vec<String> = env::args().collect();
    match args.get(1) {
        Some(path) => {
            println!("Loading node file: {}", path);
            let (name, mesh) = mesh_file::load_file(path)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            println!("Loaded {}: {} triangles", name, mesh.triangle_count());
            scene
                .load(&name, mesh)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        }
        None => {
            eprintln!("Usage: {} <node-file>", args[0]);
            eprintln!("\nNo node file provided, showing {}...", scene.label());
        }
    }

    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene, config)?;
    app.run()
}
