use textwrap::wrap;

use crate::engine::board::Board;
use crate::engine::grid::{Card, Score};
use crate::error::Result;
use crate::tui::colors::{Rgb, Theme};

/// Narrowest cell; wider cards widen every cell of the board.
const CELL_WIDTH: usize = 3;

const UNITS: [(Card, &str); 3] = [(1 << 30, "G"), (1 << 20, "M"), (1 << 10, "k")];

const HELP: &str = "Move the tiles with the arrow keys, hjkl or wasd. Press q or Esc to quit.";

/// A run of text drawn with a single foreground color.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Span {
    pub(crate) text: String,
    pub(crate) color: Option<Rgb>,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    fn colored(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Line(pub(crate) Vec<Span>);

impl Line {
    pub(crate) fn spans(&self) -> &[Span] {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn text(&self) -> String {
        self.0.iter().map(|s| s.text.as_str()).collect()
    }

    pub(crate) fn width(&self) -> usize {
        self.0.iter().map(|s| s.text.chars().count()).sum()
    }
}

/// Frame is everything drawn on screen for one state of the game, top to bottom.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    pub(crate) fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (
            self.lines.iter().map(|l| l.width()).max().unwrap_or(0),
            self.lines.len(),
        )
    }
}

/// View is the part of the game state that gets drawn.
pub(crate) struct View<'a> {
    pub(crate) board: &'a Board,
    pub(crate) score: Score,
    pub(crate) best_score: Score,
    pub(crate) message: Option<&'a str>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Margins {
    pub(crate) left: usize,
    pub(crate) top: usize,
    pub(crate) bottom: usize,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 4,
            top: 2,
            bottom: 1,
        }
    }
}

/// Layout turns a `View` into a `Frame` using the configured margins and colors.
#[derive(Clone, Debug, Default)]
pub(crate) struct Layout {
    margins: Margins,
    theme: Theme,
}

impl Layout {
    pub(crate) fn new(margins: Margins, theme: Theme) -> Self {
        Self { margins, theme }
    }

    pub(crate) fn frame(&self, view: &View, width: usize) -> Result<Frame> {
        let mut lines = Vec::new();
        for _ in 0..self.margins.top {
            lines.push(Line::default());
        }

        let left = " ".repeat(self.margins.left);
        let box_corner = boxy::Char::upper_left(boxy::Weight::Doubled);
        let top_left: char = box_corner.clone().into();
        let top_right: char = box_corner.clone().rotate_cw(1).into();
        let bottom_right: char = box_corner.clone().rotate_cw(2).into();
        let bottom_left: char = box_corner.clone().rotate_ccw(1).into();
        let horizontal: char = boxy::Char::horizontal(boxy::Weight::Doubled).into();
        let vertical: char = boxy::Char::vertical(boxy::Weight::Doubled).into();

        let size = view.board.size();
        let mut cards = Vec::with_capacity(size);
        for y in 0..size {
            let mut row = Vec::with_capacity(size);
            for x in 0..size {
                row.push(view.board.get_cell(x, y)?);
            }
            cards.push(row);
        }
        let cell_width = cards
            .iter()
            .flatten()
            .map(|card| cell_text(*card).chars().count())
            .fold(CELL_WIDTH, usize::max);

        // one space of padding on each side and a space between cells
        let inner_width = (cell_width + 1) * size + 1;
        let rule = horizontal.to_string().repeat(inner_width);
        lines.push(Line(vec![Span::plain(format!(
            "{}{}{}{}",
            left, top_left, rule, top_right
        ))]));

        for (y, row) in cards.iter().enumerate() {
            let mut spans = vec![Span::plain(format!("{}{} ", left, vertical))];
            for (x, card) in row.iter().enumerate() {
                if x > 0 {
                    spans.push(Span::plain(" "));
                }
                spans.push(self.cell(*card, cell_width));
            }
            spans.push(Span::plain(format!(" {}", vertical)));
            match y {
                0 => spans.push(Span::plain(format!(
                    "  Score: {:>5}  Best: {:>5}",
                    view.score, view.best_score
                ))),
                1 => spans.push(Span::plain(format!("  Goal:  {:>5}", view.board.goal()))),
                _ => (),
            }
            lines.push(Line(spans));
        }

        lines.push(Line(vec![Span::plain(format!(
            "{}{}{}{}",
            left, bottom_left, rule, bottom_right
        ))]));
        lines.push(Line::default());

        let wrap_width = width.saturating_sub(self.margins.left).max(20);
        for help_line in wrap(HELP, wrap_width) {
            lines.push(Line(vec![Span::plain(format!("{}{}", left, help_line))]));
        }

        if let Some(message) = view.message {
            lines.push(Line::default());
            for message_line in wrap(message, wrap_width) {
                lines.push(Line(vec![Span::plain(format!("{}{}", left, message_line))]));
            }
        }

        for _ in 0..self.margins.bottom {
            lines.push(Line::default());
        }
        Ok(Frame { lines })
    }

    fn cell(&self, card: Card, width: usize) -> Span {
        let text = format!("{:>width$}", cell_text(card), width = width);
        if card == 0 {
            return Span::plain(text);
        }
        Span::colored(text, self.theme.card_color(card))
    }
}

/// The unpadded text of a cell. Multiples of 1024 take a binary unit suffix, `2048` is `2k`.
pub(crate) fn cell_text(card: Card) -> String {
    if card == 0 {
        return ".".to_string();
    }
    UNITS
        .iter()
        .find(|(unit, _)| card % unit == 0)
        .map(|(unit, suffix)| format!("{}{}", card / unit, suffix))
        .unwrap_or_else(|| card.to_string())
}
