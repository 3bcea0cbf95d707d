use crate::error::Result;
use crate::tui::frame::Frame;

pub(crate) trait Renderer {
    fn size_hint(&self) -> Result<(u16, u16)>;
    fn render(&mut self, frame: &Frame) -> Result<()>;
    fn clear(&mut self) -> Result<()>;

    /// Give the terminal back to the user after a failure; must be safe to call more than once.
    fn recover(&mut self);
}
