//! Per-frame simulation step
//!
//! One call to [`tick`] per rendered frame; there is no fixed-timestep
//! accumulator, so game speed follows the frame rate.

use glam::Vec2;

use super::state::{GameEvent, GameState, PaddleSide};
use crate::consts::*;

/// Movement keys held for one paddle this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Indexed by `PaddleSide::index`
    pub paddles: [PaddleInput; 2],
}

impl TickInput {
    pub fn paddle(&self, side: PaddleSide) -> PaddleInput {
        self.paddles[side.index()]
    }
}

/// Advance paddles then ball by one frame
pub fn tick(state: &mut GameState, input: &TickInput, window: Vec2) {
    update_paddles(state, input, window);
    update_ball(state, window);
}

/// Move each paddle one step per held key, clamped to the play field
pub fn update_paddles(state: &mut GameState, input: &TickInput, window: Vec2) {
    let min = GAME_FIELD_Y;
    let max = (window.y - PADDLE_HEIGHT - min).max(min);

    for side in PaddleSide::ALL {
        let keys = input.paddle(side);
        let y = &mut state.paddle_mut(side).position.y;
        if keys.up {
            *y = (*y - PADDLE_SPEED).clamp(min, max);
        }
        if keys.down {
            *y = (*y + PADDLE_SPEED).clamp(min, max);
        }
    }
}

/// Move the ball, bounce it off walls and paddles, and score misses.
///
/// A bounce flips the velocity and then re-applies one step with the new
/// velocity, so the ball never renders inside a wall or paddle. Raises
/// `BallHit` before `Scored` when both happen in one frame.
pub fn update_ball(state: &mut GameState, window: Vec2) {
    state.ball.advance();

    let mut need_pos_reset = false;
    let mut need_ball_reset = None;

    // Bottom and top walls
    let y = state.ball.position.y;
    if y > window.y - GAME_FIELD_Y - BALL_HEIGHT || y < GAME_FIELD_Y {
        state.ball.velocity.y *= -1.0;
        need_pos_reset = true;
    }

    // Right wall: left player scores
    if state.ball.position.x > window.x - GAME_FIELD_X - BALL_WIDTH {
        need_ball_reset = Some(PaddleSide::Left);
    }

    // Left wall: right player scores
    if state.ball.position.x < GAME_FIELD_X {
        need_ball_reset = Some(PaddleSide::Right);
    }

    // Both paddles are checked regardless of which way the ball is heading
    let ball_box = state.ball.aabb();
    if state.paddles.iter().any(|p| p.aabb().overlaps(&ball_box)) {
        state.ball.velocity.x *= -1.0;
        need_pos_reset = true;
    }

    if need_pos_reset {
        state.ball.advance();
        state.events.push(GameEvent::BallHit);
    }

    if let Some(side) = need_ball_reset {
        state.score[side.index()] += 1;
        state.events.push(GameEvent::Scored(side));
        state.reset_ball(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Ball;
    use proptest::prelude::*;

    const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

    fn state_with_ball(position: Vec2, velocity: Vec2) -> GameState {
        let mut state = GameState::new(WINDOW);
        state.ball = Ball { position, velocity };
        state
    }

    #[test]
    fn test_free_flight() {
        let mut state = GameState::new(WINDOW);
        update_ball(&mut state, WINDOW);
        assert_eq!(state.ball.position, Vec2::new(390.0, 290.0));
        assert_eq!(state.ball.velocity, Vec2::new(-1.0, -1.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_top_wall_bounce_readvances() {
        let mut state = state_with_ball(Vec2::new(100.0, 12.0), Vec2::new(1.0, -1.0));
        update_ball(&mut state, WINDOW);
        assert_eq!(state.ball.velocity, Vec2::new(1.0, 1.0));
        // Advanced to y=7, flipped, then pushed back down one step
        assert_eq!(state.ball.position, Vec2::new(110.0, 12.0));
        assert_eq!(state.events, vec![GameEvent::BallHit]);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut state = state_with_ball(Vec2::new(300.0, 578.0), Vec2::new(-1.0, 1.0));
        update_ball(&mut state, WINDOW);
        assert_eq!(state.ball.velocity, Vec2::new(-1.0, -1.0));
        assert_eq!(state.ball.position, Vec2::new(290.0, 578.0));
    }

    #[test]
    fn test_right_exit_scores_left() {
        let mut state = state_with_ball(Vec2::new(777.0, 200.0), Vec2::new(1.0, 1.0));
        update_ball(&mut state, WINDOW);
        assert_eq!(state.score, [1, 0]);
        assert_eq!(state.ball.position, Vec2::new(395.0, 295.0));
        assert_eq!(state.ball.velocity, Vec2::new(-1.0, -1.0));
        assert_eq!(state.events, vec![GameEvent::Scored(PaddleSide::Left)]);
    }

    #[test]
    fn test_left_exit_scores_right() {
        let mut state = state_with_ball(Vec2::new(12.0, 200.0), Vec2::new(-1.0, 1.0));
        update_ball(&mut state, WINDOW);
        assert_eq!(state.score, [0, 1]);
        assert_eq!(state.ball, Ball::centered(WINDOW));
        assert_eq!(state.events, vec![GameEvent::Scored(PaddleSide::Right)]);
    }

    #[test]
    fn test_corner_exit_bounces_then_scores() {
        // Leaves through the top-right corner in one step
        let mut state = state_with_ball(Vec2::new(778.0, 12.0), Vec2::new(1.0, -1.0));
        update_ball(&mut state, WINDOW);
        assert_eq!(state.score, [1, 0]);
        assert_eq!(
            state.events,
            vec![GameEvent::BallHit, GameEvent::Scored(PaddleSide::Left)]
        );
        assert_eq!(state.ball, Ball::centered(WINDOW));
    }

    #[test]
    fn test_paddle_bounce() {
        // Left paddle spans x 40..60, y 300..380
        let mut state = state_with_ball(Vec2::new(63.0, 330.0), Vec2::new(-1.0, -1.0));
        update_ball(&mut state, WINDOW);
        assert_eq!(state.ball.velocity, Vec2::new(1.0, -1.0));
        assert_eq!(state.ball.position, Vec2::new(63.0, 320.0));
        assert_eq!(state.events, vec![GameEvent::BallHit]);
    }

    #[test]
    fn test_rear_paddle_bounce_is_kept() {
        // Ball inside the left paddle while heading right still flips
        let mut state = state_with_ball(Vec2::new(52.0, 330.0), Vec2::new(1.0, 1.0));
        update_ball(&mut state, WINDOW);
        assert_eq!(state.ball.velocity.x, -1.0);
    }

    #[test]
    fn test_overlapping_both_paddles_flips_once() {
        let mut state = state_with_ball(Vec2::new(405.0, 305.0), Vec2::new(-1.0, -1.0));
        state.paddles[0].position = Vec2::new(390.0, 280.0);
        state.paddles[1].position = Vec2::new(395.0, 290.0);
        update_ball(&mut state, WINDOW);
        assert_eq!(state.ball.velocity, Vec2::new(1.0, -1.0));
        assert_eq!(state.events, vec![GameEvent::BallHit]);
    }

    #[test]
    fn test_paddle_moves_and_clamps() {
        let mut state = GameState::new(WINDOW);
        let mut input = TickInput::default();
        input.paddles[PaddleSide::Left.index()].up = true;
        input.paddles[PaddleSide::Right.index()].down = true;

        update_paddles(&mut state, &input, WINDOW);
        assert_eq!(state.paddle(PaddleSide::Left).position.y, 290.0);
        assert_eq!(state.paddle(PaddleSide::Right).position.y, 310.0);

        for _ in 0..100 {
            update_paddles(&mut state, &input, WINDOW);
        }
        assert_eq!(state.paddle(PaddleSide::Left).position.y, 10.0);
        assert_eq!(state.paddle(PaddleSide::Right).position.y, 510.0);
        // No horizontal drift
        assert_eq!(state.paddle(PaddleSide::Left).position.x, 40.0);
    }

    #[test]
    fn test_both_keys_cancel_away_from_edges() {
        let mut state = GameState::new(WINDOW);
        let mut input = TickInput::default();
        input.paddles[0] = PaddleInput { up: true, down: true };
        update_paddles(&mut state, &input, WINDOW);
        assert_eq!(state.paddle(PaddleSide::Left).position.y, 300.0);
    }

    #[test]
    fn test_both_keys_at_top_edge_clamp_first() {
        let mut state = GameState::new(WINDOW);
        state.paddles[0].position.y = 12.0;
        let mut input = TickInput::default();
        input.paddles[0] = PaddleInput { up: true, down: true };
        update_paddles(&mut state, &input, WINDOW);
        // Up clamps to 10, then down adds a full step
        assert_eq!(state.paddle(PaddleSide::Left).position.y, 20.0);
    }

    fn paddle_input() -> impl Strategy<Value = PaddleInput> {
        (any::<bool>(), any::<bool>()).prop_map(|(up, down)| PaddleInput { up, down })
    }

    fn tick_input() -> impl Strategy<Value = TickInput> {
        (paddle_input(), paddle_input()).prop_map(|(l, r)| TickInput { paddles: [l, r] })
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_in_field(inputs in prop::collection::vec(tick_input(), 1..300)) {
            let mut state = GameState::new(WINDOW);
            for input in &inputs {
                update_paddles(&mut state, input, WINDOW);
                for paddle in &state.paddles {
                    prop_assert!(paddle.position.y >= GAME_FIELD_Y);
                    prop_assert!(paddle.position.y <= WINDOW.y - PADDLE_HEIGHT - GAME_FIELD_Y);
                }
            }
        }

        #[test]
        fn prop_ball_velocity_is_unit_per_axis(inputs in prop::collection::vec(tick_input(), 1..600)) {
            let mut state = GameState::new(WINDOW);
            let mut last_score = state.score;
            for input in &inputs {
                tick(&mut state, input, WINDOW);
                prop_assert_eq!(state.ball.velocity.x.abs(), 1.0);
                prop_assert_eq!(state.ball.velocity.y.abs(), 1.0);

                // Scores only grow, and by at most one point per frame in total
                let gained: u32 = (0..2).map(|i| state.score[i] - last_score[i]).sum();
                prop_assert!(gained <= 1);
                last_score = state.score;
                state.events.clear();
            }
        }
    }
}
