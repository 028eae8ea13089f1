/// Key and mouse bindings for the viewer
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use std::path::Path;

use log::debug;
use wf3d_core::{mesh_file, Axis, Result, Scene, Solid};

use crate::config::InputConfig;

/// One viewer action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Select(Solid),
    Drag { dx: f64, dy: f64 },
    Twist(f64),
    Zoom(f64),
    Scroll { dx: f64, dy: f64 },
    Mirror(Axis),
    ToggleProjection,
    ToggleCulling,
    Save,
    Quit,
}

impl Command {
    pub fn from_key(event: KeyEvent, input: &InputConfig) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let step = input.key_drag_pixels;
        let scroll = input.scroll_pixels;
        let command = match event.code {
            KeyCode::Char(c @ '1'..='7') => {
                Command::Select(Solid::ALL[c as usize - '1' as usize])
            }
            KeyCode::Up | KeyCode::Char('w') => Command::Drag { dx: 0.0, dy: -step },
            KeyCode::Down | KeyCode::Char('s') => Command::Drag { dx: 0.0, dy: step },
            KeyCode::Left | KeyCode::Char('a') => Command::Drag { dx: -step, dy: 0.0 },
            KeyCode::Right | KeyCode::Char('d') => Command::Drag { dx: step, dy: 0.0 },
            KeyCode::Char('q') => Command::Twist(-input.twist_angle),
            KeyCode::Char('e') => Command::Twist(input.twist_angle),
            KeyCode::Char('+') | KeyCode::Char('=') => Command::Zoom(input.zoom_step),
            KeyCode::Char('-') => Command::Zoom(1.0 / input.zoom_step),
            KeyCode::Char('i') => Command::Scroll { dx: 0.0, dy: -scroll },
            KeyCode::Char('k') => Command::Scroll { dx: 0.0, dy: scroll },
            KeyCode::Char('j') => Command::Scroll { dx: -scroll, dy: 0.0 },
            KeyCode::Char('l') => Command::Scroll { dx: scroll, dy: 0.0 },
            KeyCode::Char('x') => Command::Mirror(Axis::X),
            KeyCode::Char('y') => Command::Mirror(Axis::Y),
            KeyCode::Char('z') => Command::Mirror(Axis::Z),
            KeyCode::Char('p') => Command::ToggleProjection,
            KeyCode::Char('c') => Command::ToggleCulling,
            KeyCode::Char('f') => Command::Save,
            KeyCode::Esc => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    /// Wheel notches zoom; left-button drags rotate by the distance moved in model units
    pub fn from_mouse(
        event: MouseEvent,
        last: &mut Option<(u16, u16)>,
        input: &InputConfig,
        cell_units: (f64, f64),
    ) -> Option<Self> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                *last = Some((event.column, event.row));
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (column, row) = last.replace((event.column, event.row))?;
                let dx = (event.column as f64 - column as f64) * cell_units.0;
                let dy = (event.row as f64 - row as f64) * cell_units.1;
                Some(Command::Drag { dx, dy })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                *last = None;
                None
            }
            MouseEventKind::ScrollUp => Some(Command::Zoom(input.zoom_step)),
            MouseEventKind::ScrollDown => Some(Command::Zoom(1.0 / input.zoom_step)),
            _ => None,
        }
    }

    /// Run against `scene`; returns a status message for the user, if any
    pub fn execute(self, scene: &mut Scene, save_dir: &Path) -> Result<Option<String>> {
        debug!("{:?}", self);
        match self {
            Command::Select(solid) => {
                scene.select(solid)?;
                Ok(Some(solid.name().to_string()))
            }
            Command::Drag { dx, dy } => scene.drag(dx, dy).map(|_| None),
            Command::Twist(angle) => scene.twist(angle).map(|_| None),
            Command::Zoom(factor) => scene.zoom(factor).map(|_| None),
            Command::Scroll { dx, dy } => scene.scroll(dx, dy).map(|_| None),
            Command::Mirror(axis) => scene.mirror(axis).map(|_| None),
            Command::ToggleProjection => {
                let mode = scene.projection().toggled();
                scene.set_projection(mode);
                Ok(Some(format!("{:?} projection", mode)))
            }
            Command::ToggleCulling => {
                let enabled = !scene.culling();
                scene.set_culling(enabled);
                Ok(Some(format!("culling {}", if enabled { "on" } else { "off" })))
            }
            Command::Save => {
                let path = mesh_file::save_to_dir(save_dir, scene.label(), scene.mesh())?;
                Ok(Some(format!("saved {}", path.display())))
            }
            Command::Quit => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use wf3d_core::{ProjectionMode, SceneOptions};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_number_keys_select_solids_in_catalogue_order() {
        let input = InputConfig::default();
        assert_eq!(
            Command::from_key(key(KeyCode::Char('1')), &input),
            Some(Command::Select(Solid::Pyramid))
        );
        assert_eq!(
            Command::from_key(key(KeyCode::Char('7')), &input),
            Some(Command::Select(Solid::SphereWithoutPoles))
        );
        assert_eq!(Command::from_key(key(KeyCode::Char('8')), &input), None);
    }

    #[test]
    fn test_key_bindings() {
        let input = InputConfig::default();
        let command = |code| Command::from_key(key(code), &input);
        assert_eq!(command(KeyCode::Up), Some(Command::Drag { dx: 0.0, dy: -10.0 }));
        assert_eq!(command(KeyCode::Char('d')), Some(Command::Drag { dx: 10.0, dy: 0.0 }));
        assert_eq!(command(KeyCode::Char('q')), Some(Command::Twist(-2.0)));
        assert_eq!(command(KeyCode::Char('+')), Some(Command::Zoom(1.1)));
        assert_eq!(command(KeyCode::Char('l')), Some(Command::Scroll { dx: 10.0, dy: 0.0 }));
        assert_eq!(command(KeyCode::Char('y')), Some(Command::Mirror(Axis::Y)));
        assert_eq!(command(KeyCode::Char('p')), Some(Command::ToggleProjection));
        assert_eq!(command(KeyCode::Char('f')), Some(Command::Save));
        assert_eq!(command(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(command(KeyCode::Tab), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Command::from_key(release, &InputConfig::default()), None);
    }

    #[test]
    fn test_mouse_drag_reports_motion_in_units() {
        let input = InputConfig::default();
        let mut last = None;
        let units = (4.0, 8.0);

        assert_eq!(
            Command::from_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), &mut last, &input, units),
            None
        );
        assert_eq!(
            Command::from_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 13, 9), &mut last, &input, units),
            Some(Command::Drag { dx: 12.0, dy: -8.0 })
        );
        Command::from_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 13, 9), &mut last, &input, units);
        assert_eq!(last, None);
        assert_eq!(
            Command::from_mouse(mouse(MouseEventKind::ScrollDown, 0, 0), &mut last, &input, units),
            Some(Command::Zoom(1.0 / 1.1))
        );
    }

    #[test]
    fn test_execute_updates_scene() {
        let mut scene = Scene::new(&SceneOptions::default()).unwrap();
        let dir = Path::new("unused");

        let status = Command::Select(Solid::Cube).execute(&mut scene, dir).unwrap();
        assert_eq!(status.as_deref(), Some("CUBE"));
        assert_eq!(scene.solid(), Some(Solid::Cube));

        Command::ToggleProjection.execute(&mut scene, dir).unwrap();
        assert_eq!(scene.projection(), ProjectionMode::Perspective);

        let status = Command::ToggleCulling.execute(&mut scene, dir).unwrap();
        assert_eq!(status.as_deref(), Some("culling off"));
        assert!(!scene.culling());

        let before = scene.mesh().clone();
        Command::Mirror(Axis::X).execute(&mut scene, dir).unwrap();
        assert_ne!(scene.mesh(), &before);
    }

    #[test]
    fn test_failed_command_leaves_scene_alone() {
        let mut scene = Scene::new(&SceneOptions::default()).unwrap();
        let before = scene.mesh().clone();
        assert!(Command::Zoom(f64::INFINITY).execute(&mut scene, Path::new("unused")).is_err());
        assert_eq!(scene.mesh(), &before);
    }

    #[test]
    fn test_save_keeps_loaded_label_inside_save_dir() {
        let base = std::env::temp_dir().join(format!("wf3d-input-escape-{}", std::process::id()));
        let dir = base.join("saved_nodes");
        let mut scene = Scene::new(&SceneOptions::default()).unwrap();
        scene.load("../escaped", Solid::Cube.mesh()).unwrap();

        assert!(Command::Save.execute(&mut scene, &dir).is_err());
        assert!(!base.join("escaped.txt").exists());
    }

    #[test]
    fn test_save_writes_lowercase_file() {
        let dir = std::env::temp_dir().join(format!("wf3d-input-save-{}", std::process::id()));
        let mut scene = Scene::new(&SceneOptions::default()).unwrap();

        let status = Command::Save.execute(&mut scene, &dir).unwrap().unwrap();
        assert!(status.ends_with("pyramid.txt"));
        let (name, mesh) = mesh_file::load_file(dir.join("pyramid.txt")).unwrap();
        assert_eq!(name, "PYRAMID");
        assert_eq!(&mesh, scene.mesh());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
