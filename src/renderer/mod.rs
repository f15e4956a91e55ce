//! Rendering
//!
//! The simulation never draws. Each frame the driver hands a read-only view of
//! the session to [`draw_session`], which issues primitive calls against a
//! [`RenderSurface`]. [`ShapeBatch`] turns those calls into vertices that the
//! WebGPU [`RenderState`] uploads and draws.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::ShapeBatch;
pub use vertex::{Vertex, colors};

use crate::sim::{Rect, RunMode, Session};

/// Corner radius of block rectangles
pub const BLOCK_CORNER_RADIUS: f32 = 5.0;

/// Vertical two-stop gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub top: [f32; 4],
    pub bottom: [f32; 4],
}

impl Gradient {
    /// Color at `t` in 0 (top) .. 1 (bottom)
    pub fn sample(&self, t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        std::array::from_fn(|i| self.top[i] + (self.bottom[i] - self.top[i]) * t)
    }
}

/// Drawing primitives the game needs from a screen
pub trait RenderSurface {
    fn clear(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]);
    fn fill_rounded_rect(&mut self, rect: Rect, corner_radius: f32, gradient: Gradient);
}

/// Draw the current state of the session
pub fn draw_session(session: &Session, surface: &mut impl RenderSurface) {
    surface.clear(session.board());

    // Start screen text and buttons belong to the host page
    if session.mode == RunMode::Idle {
        return;
    }

    surface.fill_rect(session.paddle.rect(), colors::PADDLE);
    surface.fill_rect(session.ball.rect(), colors::BALL);

    for block in session.blocks.blocks().iter().filter(|b| !b.destroyed) {
        surface.fill_rounded_rect(
            block.rect,
            BLOCK_CORNER_RADIUS,
            Gradient {
                top: colors::block(block.color),
                bottom: colors::WHITE,
            },
        );
    }
}
