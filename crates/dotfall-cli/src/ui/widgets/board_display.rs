use dotfall_engine::Grid;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    cursor: Option<(usize, usize)>,
    selected: Option<(usize, usize)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            cursor: None,
            selected: None,
            block: None,
        }
    }

    pub fn cursor(self, cursor: (usize, usize)) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    pub fn selected(self, selected: Option<(usize, usize)>) -> Self {
        Self { selected, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let columns = u16::try_from(self.grid.width()).unwrap_or(u16::MAX);
        columns * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.grid.height()).unwrap_or(u16::MAX);
        rows * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.width()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..self.grid.height()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        // Row 0 is the bottom of the board, so the topmost screen row shows
        // the highest board row
        for (y, grid_row) in grid_rows.enumerate() {
            let row = self.grid.height() - 1 - y;
            for (column, cell_area) in grid_row.into_iter().enumerate() {
                let mut cell_display = CellDisplay::from_cell(
                    self.grid.cell(column, row),
                    self.grid.breakable_at(column, row),
                );
                if self.cursor == Some((column, row)) {
                    cell_display = cell_display.marker("[]");
                } else if self.selected == Some((column, row)) {
                    cell_display = cell_display.marker("()");
                }
                Widget::render(&cell_display, cell_area, buf);
            }
        }
    }
}
