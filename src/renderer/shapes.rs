//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use super::vertex::{Vertex, colors};
use super::{Gradient, RenderSurface};
use crate::sim::Rect;

/// Triangles per rounded corner
const CORNER_SEGMENTS: u32 = 4;

/// Generate vertices for an axis-aligned rectangle (two triangles)
pub fn quad(rect: Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Outline of a rounded rectangle, clockwise from the top-left corner
fn rounded_outline(rect: Rect, radius: f32) -> Vec<Vec2> {
    let radius = radius.min(rect.size.x / 2.0).min(rect.size.y / 2.0).max(0.0);
    let corners = [
        // (arc center, start angle)
        (Vec2::new(rect.left() + radius, rect.top() + radius), 2.0 * FRAC_PI_2),
        (Vec2::new(rect.right() - radius, rect.top() + radius), 3.0 * FRAC_PI_2),
        (Vec2::new(rect.right() - radius, rect.bottom() - radius), 0.0),
        (Vec2::new(rect.left() + radius, rect.bottom() - radius), FRAC_PI_2),
    ];

    let mut points = Vec::with_capacity((4 * (CORNER_SEGMENTS + 1)) as usize);
    for (center, start) in corners {
        for i in 0..=CORNER_SEGMENTS {
            let theta = start + FRAC_PI_2 * i as f32 / CORNER_SEGMENTS as f32;
            points.push(center + Vec2::new(theta.cos(), theta.sin()) * radius);
        }
    }
    points
}

/// Generate vertices for a rounded rectangle filled with a vertical gradient
pub fn rounded_rect(rect: Rect, radius: f32, gradient: Gradient) -> Vec<Vertex> {
    let outline = rounded_outline(rect, radius);
    let center = rect.center();
    let color_at = |p: Vec2| gradient.sample((p.y - rect.top()) / rect.size.y);

    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for i in 0..outline.len() {
        let p1 = outline[i];
        let p2 = outline[(i + 1) % outline.len()];

        // Triangle fan from the center
        vertices.push(Vertex::new(center.x, center.y, color_at(center)));
        vertices.push(Vertex::new(p1.x, p1.y, color_at(p1)));
        vertices.push(Vertex::new(p2.x, p2.y, color_at(p2)));
    }

    vertices
}

/// Render surface that records triangles in board coordinates
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl RenderSurface for ShapeBatch {
    fn clear(&mut self, rect: Rect) {
        // Everything drawn so far is covered; start the frame over
        self.vertices.clear();
        self.vertices.extend_from_slice(&quad(rect, colors::BACKGROUND));
    }

    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]) {
        self.vertices.extend_from_slice(&quad(rect, color));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, corner_radius: f32, gradient: Gradient) {
        self.vertices.extend(rounded_rect(rect, corner_radius, gradient));
    }
}
