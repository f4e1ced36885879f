use dotfall_engine::{BoardSeed, BoardStats, Phase};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt, Paragraph, Widget},
};

#[derive(Debug)]
pub struct StatsDisplay<'a> {
    stats: &'a BoardStats,
    phase: Phase,
    seed: BoardSeed,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(stats: &'a BoardStats, phase: Phase, seed: BoardSeed) -> Self {
        Self {
            stats,
            phase,
            seed,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        // Wide enough for "seed " plus 32 hex characters
        38 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        8 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let stats = self.stats;
        let lines = vec![
            Line::from(format!("phase       {:?}", self.phase)),
            Line::from(format!("swaps       {}", stats.swaps_accepted())),
            Line::from(format!("destroyed   {}", stats.pieces_destroyed())),
            Line::from(format!("specials    {}", stats.specials_created())),
            Line::from(format!("breakables  {}", stats.breakables_destroyed())),
            Line::from(format!("cascades    {}", stats.cascades())),
            Line::from(format!("resolutions {}", stats.resolutions_completed())),
            Line::from(format!("seed {}", self.seed)),
        ];
        Paragraph::new(Text::from(lines)).render(area, buf);
    }
}
