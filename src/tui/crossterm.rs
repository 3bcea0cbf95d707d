use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style, terminal, ExecutableCommand, QueueableCommand,
};

use crate::engine::direction::Direction;
use crate::error::Result;
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::frame::Frame;
use crate::tui::renderer::Renderer;

const TOO_SMALL: &str = "terminal too small, please resize";

pub(crate) struct Crossterm<T: Write> {
    w: Box<T>,
    active: bool,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w, active: true })
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.w.execute(cursor::Show)?;
        self.w.execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("unable to restore terminal: {}", e);
        }
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        let (width, height) = self.size_hint()?;
        let (frame_width, frame_height) = frame.dimensions();

        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        if frame_width > width as usize || frame_height > height as usize {
            log::debug!(
                "frame {}x{} does not fit terminal {}x{}",
                frame_width,
                frame_height,
                width,
                height
            );
            self.w.queue(cursor::MoveTo(0, 0))?;
            self.w.queue(style::Print(TOO_SMALL))?;
        } else {
            for (y, line) in frame.lines().iter().enumerate() {
                self.w.queue(cursor::MoveTo(0, y as u16))?;
                for span in line.spans() {
                    match span.color {
                        Some(color) => {
                            self.w.queue(style::SetForegroundColor(color.into()))?;
                            self.w.queue(style::Print(&span.text))?;
                            self.w.queue(style::ResetColor)?;
                        }
                        None => {
                            self.w.queue(style::Print(&span.text))?;
                        }
                    }
                }
            }
        }
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.w.execute(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn recover(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("unable to restore terminal: {}", e);
        }
    }
}

#[derive(Default)]
pub(crate) struct CrosstermEvents {}

impl EventSource for CrosstermEvents {
    /// Block until the next Crossterm event that the game cares about.
    fn next_event(&mut self) -> Result<Event> {
        loop {
            match event::read()? {
                CrossTermEvent::Key(ke) => match handle_key_event(ke) {
                    Some(input) => return Ok(Event::UserInput(input)),
                    None => continue,
                },
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            };
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    if ke.kind == KeyEventKind::Release {
        return None;
    }
    match (ke.code, ke.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(UserInput::Quit),
        (KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a'), _) => {
            Some(UserInput::Direction(Direction::Left))
        }
        (KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d'), _) => {
            Some(UserInput::Direction(Direction::Right))
        }
        (KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w'), _) => {
            Some(UserInput::Direction(Direction::Up))
        }
        (KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s'), _) => {
            Some(UserInput::Direction(Direction::Down))
        }
        (KeyCode::Char('q') | KeyCode::Esc, _) => Some(UserInput::Quit),
        _ => None,
    }
}
