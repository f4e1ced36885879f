use dotfall_engine::{BreakableTile, Cell, PieceColor, SpecialKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::{color, style};

#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    /// Replaces the symbol with a cursor/selection marker, keeping the
    /// cell's background.
    pub fn marker(self, symbol: &'static str) -> Self {
        let fg = if self.style.bg == Some(color::BLACK) {
            color::WHITE
        } else {
            color::BLACK
        };
        Self::new(self.style.fg(fg), symbol)
    }

    pub fn from_cell(cell: &Cell, breakable: Option<&BreakableTile>) -> Self {
        match cell {
            Cell::Blank => Self::new(style::BLANK, ""),
            Cell::Empty => {
                if breakable.is_some() {
                    Self::new(style::EMPTY_DOT, "::")
                } else {
                    Self::new(style::EMPTY_DOT, ".")
                }
            }
            Cell::Occupied(piece) => {
                let base = piece_style(piece.color());
                let symbol = match piece.special() {
                    Some(SpecialKind::RowBomb) => "--",
                    Some(SpecialKind::ColumnBomb) => "||",
                    Some(SpecialKind::AdjacentBomb) => "<>",
                    Some(SpecialKind::ColorBomb) => "**",
                    None if breakable.is_some() => "::",
                    None => "",
                };
                if symbol.is_empty() {
                    Self::new(base, "")
                } else {
                    Self::new(base.fg(color::BLACK), symbol)
                }
            }
        }
    }
}

fn piece_style(piece_color: PieceColor) -> Style {
    match piece_color {
        PieceColor::Blue => style::BLUE_PIECE,
        PieceColor::Green => style::GREEN_PIECE,
        PieceColor::Orange => style::ORANGE_PIECE,
        PieceColor::Pink => style::PINK_PIECE,
        PieceColor::Purple => style::PURPLE_PIECE,
        PieceColor::Red => style::RED_PIECE,
        PieceColor::Yellow => style::YELLOW_PIECE,
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
