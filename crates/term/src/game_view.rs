//! BoardView: draws a `core::GameState` onto the canvas.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::canvas::Canvas;
use crate::core::{lerp, tile_value, GameState, Phase, Pos, Rank};
use crate::types::{Color, Layout, Theme, BOARD_EXTENT};

pub const TITLE: &str = "Terminal Threes";
pub const KEY_HINTS: &str = "Restart (F5) | Quit (q)";
const GAME_OVER_TEXT: &str = "Game Over!";
const GAME_WON_TEXT: &str = "GAME WON!";
const RESTART_TEXT: &str = "Press space to start again";

/// Board cell the "Next:" preview is drawn at, right of the board.
const NEXT_TILE_POS: Pos = Pos::new(5, 0);
const PANEL_HEIGHT: i32 = 4;

/// Screen position of a board cell's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

/// Renders the puzzle with a given layout and theme.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    layout: Layout,
    theme: Theme,
}

impl BoardView {
    pub fn new(layout: Layout, theme: Theme) -> Self {
        Self { layout, theme }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Swap in a reloaded style.
    pub fn set_style(&mut self, layout: Layout, theme: Theme) {
        self.layout = layout;
        self.theme = theme;
    }

    pub fn tile_position(&self, pos: Pos) -> ScreenPos {
        let l = &self.layout;
        ScreenPos {
            x: l.pos_x + i32::from(pos.x) * (l.tile_width + l.tile_spacing),
            y: l.pos_y + i32::from(pos.y) * (l.tile_height + l.tile_spacing),
        }
    }

    pub fn tile_color(&self, rank: Rank) -> Color {
        match rank {
            1 => self.theme.tile_one,
            2 => self.theme.tile_two,
            _ => self.theme.tile,
        }
    }

    /// Draw the whole frame: board, tiles, header and the end-of-game panel.
    pub fn render(&self, canvas: &mut Canvas, game: &GameState) {
        canvas.clear();
        self.draw_board(canvas);
        self.draw_tiles(canvas, game);
        self.draw_next(canvas, game.next());
        self.draw_header(canvas);
        match game.phase() {
            Phase::GameOver => self.draw_panel(canvas, GAME_OVER_TEXT),
            Phase::GameWon => self.draw_panel(canvas, GAME_WON_TEXT),
            Phase::Active | Phase::Animating => {}
        }
    }

    fn draw_board(&self, canvas: &mut Canvas) {
        let l = &self.layout;
        let extent = BOARD_EXTENT as i32;
        let step_x = l.tile_width + l.tile_spacing;
        let step_y = l.tile_height + l.tile_spacing;

        canvas.draw_rect_with(
            self.theme.board_lines,
            l.pos_x,
            l.pos_y,
            extent * step_x,
            extent * step_y,
            ' ',
        );

        let mut grid = canvas.color_scope(self.theme.board_background);
        let left = l.pos_x - l.tile_spacing;
        let top = l.pos_y - l.tile_spacing;
        let right = l.pos_x + extent * step_x - l.tile_spacing;
        let bottom = top + extent * step_y;
        for i in 0..=extent {
            grid.draw_line(left, top + i * step_y, right, top + i * step_y, ' ');
            grid.draw_line(left + i * step_x, top, left + i * step_x, bottom, ' ');
        }
    }

    fn draw_tiles(&self, canvas: &mut Canvas, game: &GameState) {
        for (i, &rank) in game.board().tiles().iter().enumerate() {
            if rank != 0 {
                self.draw_tile(canvas, rank, self.tile_position(Pos::from_index(i)), true);
            }
        }

        let anim = game.animation();
        let t = anim.eased_alpha();
        for tile in anim.moving() {
            let from = self.tile_position(tile.from);
            let to = self.tile_position(tile.to);
            let at = ScreenPos {
                x: lerp(from.x, to.x, t),
                y: lerp(from.y, to.y, t),
            };
            self.draw_tile(canvas, tile.rank, at, true);
        }
    }

    fn draw_tile(&self, canvas: &mut Canvas, rank: Rank, at: ScreenPos, label: bool) {
        let l = &self.layout;
        let mut tile = canvas.color_scope(self.tile_color(rank));
        tile.draw_rect(at.x, at.y, l.tile_width, l.tile_height, ' ');
        if label && rank != 0 {
            let width = l.tile_width.max(0) as usize;
            tile.draw_fmt(
                at.x,
                at.y + l.tile_height / 2,
                format_args!("{:^width$}", tile_value(rank)),
            );
        }
    }

    fn draw_next(&self, canvas: &mut Canvas, next: Rank) {
        let at = self.tile_position(NEXT_TILE_POS);
        canvas.draw_text_with(self.theme.header, at.x, at.y - 1, "Next:");
        self.draw_tile(canvas, next, at, false);
    }

    fn draw_header(&self, canvas: &mut Canvas) {
        let w = i32::from(canvas.width());
        let mut bar = canvas.color_scope(self.theme.status_bar);
        bar.draw_line(0, 0, w, 0, ' ');
        bar.draw_text(1, 0, TITLE);
        bar.draw_text(w - KEY_HINTS.len() as i32, 0, KEY_HINTS);
    }

    fn draw_panel(&self, canvas: &mut Canvas, message: &str) {
        let l = &self.layout;
        let extent = BOARD_EXTENT as i32;
        let x = l.pos_x - l.tile_spacing;
        let y = l.pos_y + (extent / 2) * (l.tile_height + l.tile_spacing) - 2;
        let w = extent * (l.tile_width + l.tile_spacing) + l.tile_spacing;

        let mut panel = canvas.color_scope(self.theme.panel);
        panel.draw_rect(x, y, w, PANEL_HEIGHT, ' ');
        {
            let mut header = panel.color_scope(self.theme.panel_header);
            header.draw_line(x, y, x + w - l.tile_spacing, y, ' ');
            header.draw_text(x + 2, y, message);
        }
        panel.draw_text(x + 2, y + 2, RESTART_TEXT);
    }
}
