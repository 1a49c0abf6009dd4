/// Terminal front-end: drives the render loop and streams frames to stdout
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self},
};
use log::{debug, warn};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tcube_core::{Configuration, Renderer};

pub mod compositor;

pub use compositor::HalfBlockCompositor;

/// Main application struct for terminal rendering
pub struct TerminalApp {
    renderer: Renderer,
    compositor: HalfBlockCompositor,
    last_report: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: Configuration) -> tcube_core::Result<Self> {
        let compositor = HalfBlockCompositor::new(config.color_model);
        Ok(Self {
            renderer: Renderer::new(config)?,
            compositor,
            last_report: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Render a single frame, or animate until a quit key is pressed
    pub fn run(&mut self) -> io::Result<()> {
        if !self.renderer.config().animate {
            let mut stdout = stdout().lock();
            self.draw_single(&mut stdout)?;
            return stdout.flush();
        }

        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        let restored = terminal::disable_raw_mode()
            .and_then(|_| execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show));
        if let Err(e) = &restored {
            warn!("could not restore terminal state: {e}");
        }

        result.and(restored)
    }

    /// Draw the first frame of the configured sequence into `writer`
    pub fn draw_single<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if let Some(image) = self.renderer.frames().next() {
            self.compositor.draw(&image, writer)?;
        }
        Ok(())
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let frame_delay = self.renderer.config().frame_delay;
        let mut stdout = stdout();
        let mut frames = self.renderer.frames();

        loop {
            let frame_start = Instant::now();
            let Some(image) = frames.next() else {
                break;
            };
            self.compositor.draw(&image, &mut stdout)?;
            stdout.flush()?;

            // Frame timing
            self.frame_count += 1;
            let now = Instant::now();
            debug!("frame drawn in {:?}", now - frame_start);
            if (now - self.last_report).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_report).as_secs_f32();
                debug!("{:.1} fps", self.fps);
                self.frame_count = 0;
                self.last_report = now;
            }

            if !wait_for_next_frame(frame_delay)? {
                break;
            }
        }

        Ok(())
    }
}

/// Sleep for `delay` while watching the keyboard.
///
/// Returns `false` once a quit key was pressed.
fn wait_for_next_frame(delay: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + delay;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(true);
        }
        if let Event::Key(key) = event::read()? {
            if is_quit(&key) {
                return Ok(false);
            }
        }
        if Instant::now() >= deadline {
            return Ok(true);
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
