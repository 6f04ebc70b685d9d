use engine::graphics::{Color, Renderer2d, fit_text_scale, measure_text};
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::board::{Board, Cell, EMPTY};
use crate::state::GameState;

pub const COLOR_BACKGROUND: Color = [0, 0, 0, 255];
pub const COLOR_CELL_BORDER: Color = [255, 0, 0, 255];
pub const COLOR_TEXT: Color = [255, 255, 255, 255];
const COLOR_OVERLAY_DIM: Color = [0, 0, 0, 255];
pub const OVERLAY_DIM_ALPHA: u8 = 160;

/// Border width of a cell outline, proportional to the cell's short side.
pub fn border_thickness(cell: Rect) -> u32 {
    (cell.w.min(cell.h) / 16).max(1)
}

/// Renders the whole frame: background, grid, tile values and the game-over overlay.
pub fn draw_game(gfx: &mut dyn Renderer2d, state: &GameState) {
    let size = gfx.size();
    let area = Rect::from_size(size.width, size.height);

    gfx.clear(COLOR_BACKGROUND);
    draw_board(gfx, area, state.board());
    if state.is_game_over() {
        draw_game_over(gfx, area, state.score());
    }
}

pub fn draw_board(gfx: &mut dyn Renderer2d, area: Rect, board: &Board) {
    for (row, cells) in board.cells().iter().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            let cell = area.grid_cell(board.height(), board.width(), row, col);
            gfx.rect_outline(cell, COLOR_CELL_BORDER, border_thickness(cell));
            if value != EMPTY {
                draw_tile_value(gfx, cell, value);
            }
        }
    }
}

fn draw_tile_value(gfx: &mut dyn Renderer2d, cell: Rect, value: Cell) {
    let text = value.to_string();
    let inner = cell.inset(Insets::all(border_thickness(cell).saturating_mul(2)));
    if inner.w == 0 || inner.h == 0 {
        return;
    }
    let scale = fit_text_scale(&text, inner.w, inner.h / 2);
    let (w, h) = measure_text(&text, scale);
    let at = inner.place(Size::new(w, h), Anchor::Center);
    gfx.draw_text_scaled(at.x, at.y, &text, COLOR_TEXT, scale);
}

pub fn draw_game_over(gfx: &mut dyn Renderer2d, area: Rect, score: u64) {
    gfx.blend_rect(area, COLOR_OVERLAY_DIM, OVERLAY_DIM_ALPHA);

    let title = "GAME OVER";
    let score_line = format!("SCORE: {score}");
    let content = area.inset(Insets::all(area.w.min(area.h) / 10));

    // Both lines share one scale so the score never outgrows the title.
    let scale = fit_text_scale(title, content.w, content.h / 6)
        .min(fit_text_scale(&score_line, content.w, content.h / 6));
    let (title_w, line_h) = measure_text(title, scale);
    let (score_w, _) = measure_text(&score_line, scale);
    let gap = line_h / 2;

    let block = content.place(
        Size::new(title_w.max(score_w), line_h * 2 + gap),
        Anchor::Center,
    );
    let title_at = block.place(Size::new(title_w, line_h), Anchor::TopCenter);
    let score_at = block.inset(Insets {
        top: line_h + gap,
        ..Insets::ZERO
    });
    let score_at = score_at.place(Size::new(score_w, line_h), Anchor::TopCenter);

    gfx.draw_text_scaled(title_at.x, title_at.y, title, COLOR_TEXT, scale);
    gfx.draw_text_scaled(score_at.x, score_at.y, &score_line, COLOR_TEXT, scale);
}
