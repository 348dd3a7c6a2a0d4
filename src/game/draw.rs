//! Per-frame drawing of the play field
//!
//! Reads game data only; calling it twice on unchanged data records the same
//! primitives.

use glam::Vec2;

use super::GameData;
use crate::consts::*;
use crate::engine::Engine;
use crate::renderer::{Color, Primitive};

/// Background clear color
pub const CLEAR_COLOR: Color = Color::new(20, 20, 20, 255);

/// Center divider dash size and the gap between dashes
pub const DIVIDER_DASH: Vec2 = Vec2::new(5.0, 10.0);
pub const DIVIDER_GAP: f32 = 5.0;

pub const TITLE: &str = "PONG";
pub const TITLE_OFFSET: Vec2 = Vec2::new(-101.0, 100.0);
pub const SCORE_OFFSET: Vec2 = Vec2::new(-75.0, 150.0);
/// Horizontal distance between the two score strings
pub const SCORE_SPACING: f32 = 107.0;

/// Number of divider dashes minus one for a window of height `height`
pub fn divider_steps(height: f32) -> u32 {
    ((height - GAME_FIELD_Y * 2.0) / (DIVIDER_DASH.y + DIVIDER_GAP)).max(0.0) as u32
}

/// Record the frame and submit it to the engine
pub fn draw_game(gd: &GameData, engine: &mut Engine) {
    let ws = engine.window_size();
    let gsi = &mut engine.gsi;

    // 2D camera (screen coordinates)
    gsi.camera_2d(ws);

    // Game field
    gsi.rect(
        GAME_FIELD_X,
        GAME_FIELD_Y,
        ws.x - GAME_FIELD_X,
        ws.y - GAME_FIELD_Y,
        Color::WHITE,
        Primitive::Lines,
    );

    // Dividing line
    for i in 0..=divider_steps(ws.y) {
        let a = Vec2::new(
            (ws.x - DIVIDER_DASH.x) * 0.5,
            GAME_FIELD_Y + i as f32 * (DIVIDER_DASH.y + DIVIDER_GAP),
        );
        gsi.rectv(
            a,
            a + DIVIDER_DASH,
            Color::WHITE.with_alpha(100),
            Primitive::Triangles,
        );
    }

    for paddle in &gd.state.paddles {
        let a = paddle.position;
        gsi.rectv(a, a + PADDLE_SIZE, Color::WHITE, Primitive::Triangles);
    }

    let a = gd.state.ball.position;
    gsi.rectv(a, a + BALL_SIZE, Color::WHITE, Primitive::Triangles);

    match engine.assets.font(gd.assets.font) {
        Some(font) => {
            let title = Vec2::new(ws.x * 0.5, 0.0) + TITLE_OFFSET;
            gsi.text(title.x, title.y, TITLE, font, Color::WHITE);

            for (i, score) in gd.state.score.iter().enumerate() {
                let pos = Vec2::new(ws.x * 0.5 + SCORE_SPACING * i as f32, 0.0) + SCORE_OFFSET;
                gsi.text(pos.x, pos.y, &score.to_string(), font, Color::WHITE);
            }
        }
        None => log::warn!("Font {:?} not loaded; skipping text", gd.assets.font),
    }

    let pass = gsi.render_pass_submit(CLEAR_COLOR);
    engine.submit_command_buffer(pass);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divider_steps() {
        // (600 - 20) / 15 = 38.67
        assert_eq!(divider_steps(600.0), 38);
        assert_eq!(divider_steps(35.0), 1);
        assert_eq!(divider_steps(10.0), 0);
    }
}
