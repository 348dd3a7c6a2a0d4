//! Game simulation module
//!
//! All gameplay logic lives here: paddle movement, ball physics, collision and
//! scoring. No rendering, audio or platform dependencies; effects the outer
//! layers care about are reported as [`GameEvent`]s.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{Ball, GameEvent, GameState, Paddle, PaddleSide};
pub use tick::{PaddleInput, TickInput, tick, update_ball, update_paddles};
