use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, cell_display::*, stats_display::*};

mod board_display;
mod cell_display;
mod stats_display;

pub mod color {
    use ratatui::style::Color;

    pub const BLUE: Color = Color::Rgb(0, 100, 255);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const PINK: Color = Color::Rgb(255, 105, 180);
    pub const PURPLE: Color = Color::Rgb(160, 32, 240);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const BLANK: Style = bg_only(color::GRAY);

    pub const BLUE_PIECE: Style = bg_only(color::BLUE);
    pub const GREEN_PIECE: Style = bg_only(color::GREEN);
    pub const ORANGE_PIECE: Style = bg_only(color::ORANGE);
    pub const PINK_PIECE: Style = bg_only(color::PINK);
    pub const PURPLE_PIECE: Style = bg_only(color::PURPLE);
    pub const RED_PIECE: Style = bg_only(color::RED);
    pub const YELLOW_PIECE: Style = bg_only(color::YELLOW);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
