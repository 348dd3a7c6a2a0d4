//! Game state and core simulation types

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;

/// Which side of the field a paddle (or score) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaddleSide {
    Left,
    Right,
}

impl PaddleSide {
    pub const ALL: [PaddleSide; 2] = [PaddleSide::Left, PaddleSide::Right];

    pub fn index(self) -> usize {
        match self {
            PaddleSide::Left => 0,
            PaddleSide::Right => 1,
        }
    }
}

/// A paddle. Size is fixed (`PADDLE_SIZE`); only the top-left corner moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub position: Vec2,
}

impl Paddle {
    /// Starting position for a side in a window of `window` size
    pub fn spawn(side: PaddleSide, window: Vec2) -> Self {
        let x = match side {
            PaddleSide::Left => PADDLE_WIDTH * 2.0,
            PaddleSide::Right => window.x - 3.0 * PADDLE_WIDTH,
        };
        Self {
            position: Vec2::new(x, window.y * 0.5),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.position, PADDLE_SIZE)
    }
}

/// The ball. Velocity components are always exactly +-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Ball {
    /// A ball at the center of the field heading up-left
    pub fn centered(window: Vec2) -> Self {
        Self {
            position: (window - BALL_SIZE) * 0.5,
            velocity: Vec2::new(-1.0, -1.0),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.position, BALL_SIZE)
    }

    /// Move one step along the current velocity
    pub fn advance(&mut self) {
        self.position += self.velocity * BALL_SPEED;
    }
}

/// Something that happened during a tick that the outer layers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off a wall or paddle
    BallHit,
    /// Ball left the field; the named side gets the point
    Scored(PaddleSide),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Indexed by `PaddleSide::index`
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    /// Points per side, indexed by `PaddleSide::index`
    pub score: [u32; 2],
    /// Events raised during the last tick (drained by the caller)
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(window: Vec2) -> Self {
        Self {
            paddles: [
                Paddle::spawn(PaddleSide::Left, window),
                Paddle::spawn(PaddleSide::Right, window),
            ],
            ball: Ball::centered(window),
            score: [0; 2],
            events: Vec::new(),
        }
    }

    pub fn paddle(&self, side: PaddleSide) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: PaddleSide) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    pub fn score_of(&self, side: PaddleSide) -> u32 {
        self.score[side.index()]
    }

    /// Put the ball back in the middle of the field
    pub fn reset_ball(&mut self, window: Vec2) {
        self.ball = Ball::centered(window);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_initial_layout() {
        let state = GameState::new(WINDOW);
        assert_eq!(state.paddle(PaddleSide::Left).position, Vec2::new(40.0, 300.0));
        assert_eq!(state.paddle(PaddleSide::Right).position, Vec2::new(740.0, 300.0));
        assert_eq!(state.ball.position, Vec2::new(395.0, 295.0));
        assert_eq!(state.ball.velocity, Vec2::new(-1.0, -1.0));
        assert_eq!(state.score, [0, 0]);
        assert_eq!(state.score_of(PaddleSide::Right), 0);
    }

    #[test]
    fn test_ball_advance() {
        let mut ball = Ball::centered(WINDOW);
        ball.advance();
        assert_eq!(ball.position, Vec2::new(390.0, 290.0));
    }

    #[test]
    fn test_aabbs_use_fixed_sizes() {
        let state = GameState::new(WINDOW);
        let paddle = state.paddle(PaddleSide::Left).aabb();
        assert_eq!(paddle.max - paddle.min, PADDLE_SIZE);
        let ball = state.ball.aabb();
        assert_eq!(ball.max - ball.min, BALL_SIZE);
    }
}
