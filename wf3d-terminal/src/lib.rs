/// Terminal wireframe viewer for the WF3D kernel
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{info, warn};
use wf3d_core::Scene;

pub mod config;
pub mod input;
pub mod renderer;

pub use config::{AppConfig, ConfigError};
pub use input::Command;
pub use renderer::WireframeRenderer;

/// Rows reserved for the title and status lines
const HEADER_ROWS: u16 = 2;

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    scene: Scene,
    config: AppConfig,
    renderer: WireframeRenderer,
    save_dir: PathBuf,
    drag_origin: Option<(u16, u16)>,
    status: String,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: AppConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            status: format!("{} | 1-7 select, Esc quit", scene.label()),
            scene,
            renderer: WireframeRenderer::new(
                width as usize,
                height.saturating_sub(HEADER_ROWS) as usize,
                config.terminal.units_per_column,
                config.terminal.units_per_row,
            ),
            save_dir: config.terminal.save_dir.clone(),
            config,
            drag_origin: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let fps = self.config.terminal.target_fps.max(1);
        let target_frame_time = Duration::from_millis(1000 / fps as u64);

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let command = match event {
            Event::Key(key) => Command::from_key(key, &self.config.input),
            Event::Mouse(mouse) => Command::from_mouse(
                mouse,
                &mut self.drag_origin,
                &self.config.input,
                (
                    self.config.terminal.units_per_column,
                    self.config.terminal.units_per_row,
                ),
            ),
            Event::Resize(width, height) => {
                self.renderer
                    .resize(width as usize, height.saturating_sub(HEADER_ROWS) as usize);
                None
            }
            _ => None,
        };

        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    fn dispatch(&mut self, command: Command) {
        if command == Command::Quit {
            info!("quit requested");
            self.running = false;
            return;
        }

        match command.execute(&mut self.scene, &self.save_dir) {
            Ok(Some(message)) => self.status = message,
            Ok(None) => {}
            Err(e) => {
                warn!("{:?} failed: {}", command, e);
                self.status = format!("error: {}", e);
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        match self.scene.frame() {
            Ok(frame) => self.renderer.render_frame(&frame),
            Err(e) => self.status = format!("error: {}", e),
        }

        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WF3D | {} | {:?} | culling {} | FPS: {:.1}",
                self.scene.label(),
                self.scene.projection(),
                if self.scene.culling() { "on" } else { "off" },
                self.fps
            )),
            cursor::MoveTo(0, 1),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Grey),
            Print(&self.status),
            ResetColor,
            cursor::MoveTo(0, HEADER_ROWS)
        )?;

        self.renderer.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}
