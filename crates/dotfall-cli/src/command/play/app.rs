use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode};
use dotfall_engine::{BoardEngine, BoardEvent, BoardSeed};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Flex, Layout},
    style::Style,
    text::Text,
    widgets::Block,
};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, color, style};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub struct PlayApp {
    engine: BoardEngine,
    seed: BoardSeed,
    cursor: (usize, usize),
    selected: Option<(usize, usize)>,
    notice: Option<&'static str>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(engine: BoardEngine, seed: BoardSeed) -> Self {
        Self {
            engine,
            seed,
            cursor: (0, 0),
            selected: None,
            notice: None,
            is_exiting: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        let mut last_tick = Instant::now();
        while !self.is_exiting {
            let now = Instant::now();
            self.engine.tick(now.duration_since(last_tick));
            last_tick = now;
            self.process_events();

            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(FRAME_INTERVAL)? {
                self.handle_event(&event::read()?);
            }
        }
        Ok(())
    }

    fn process_events(&mut self) {
        let mut settled = false;
        for event in self.engine.drain_events() {
            match event {
                BoardEvent::SwapReverted => self.notice = Some("No match - swap reverted"),
                BoardEvent::BoardSettled => settled = true,
                _ => {}
            }
        }
        if settled && self.engine.is_deadlocked() {
            self.notice = Some("No moves left on this board");
        }
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Left => self.move_cursor(-1, 0),
                KeyCode::Right => self.move_cursor(1, 0),
                // Row 0 is the bottom of the board
                KeyCode::Up => self.move_cursor(0, 1),
                KeyCode::Down => self.move_cursor(0, -1),
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle_select(),
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let grid = self.engine.grid();
        self.cursor = (
            self.cursor.0.saturating_add_signed(dx).min(grid.width() - 1),
            self.cursor.1.saturating_add_signed(dy).min(grid.height() - 1),
        );
    }

    /// Space on an unselected cell selects it; on an adjacent cell attempts
    /// the swap; anywhere else moves the selection.
    fn toggle_select(&mut self) {
        if !self.engine.phase().is_move() {
            return;
        }
        match self.selected {
            None => self.selected = Some(self.cursor),
            Some(selected) if selected == self.cursor => self.selected = None,
            Some(selected) => {
                let adjacent = selected.0.abs_diff(self.cursor.0)
                    + selected.1.abs_diff(self.cursor.1)
                    == 1;
                if adjacent {
                    self.notice = None;
                    _ = self.engine.request_swap(selected, self.cursor);
                    self.selected = None;
                } else {
                    self.selected = Some(self.cursor);
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let border_style = if self.engine.phase().is_move() {
            Style::new().fg(color::WHITE)
        } else {
            Style::new().fg(color::YELLOW)
        };

        let board = BoardDisplay::new(self.engine.grid())
            .cursor(self.cursor)
            .selected(self.selected)
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let stats =
            StatsDisplay::new(self.engine.stats(), self.engine.phase(), self.seed).block(
                Block::bordered()
                    .title("STATS")
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );

        let notice = Text::from(self.notice.unwrap_or(""))
            .style(Style::default().fg(color::YELLOW))
            .centered();
        let help_text = Text::from(
            "Controls: ← → ↑ ↓ (Move Cursor) | Space (Select / Swap) | Q (Quit)",
        )
        .style(Style::default().fg(color::GRAY))
        .centered();

        let [main_area, notice_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<3>(frame.area());

        let [board_area, stats_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas::<2>(main_area);

        frame.render_widget(board, board_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(notice, notice_area);
        frame.render_widget(help_text, help_area);
    }
}
