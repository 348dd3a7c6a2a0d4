//! Immediate-mode draw recording
//!
//! Draw calls are recorded as [`DrawCommand`]s during a frame, then
//! `render_pass_submit` tessellates them into ordered vertex batches that the
//! GPU backend consumes. Nothing persists between frames.

use glam::Vec2;

use super::glyphs::{self, GLYPH_ADVANCE, GLYPH_EM, GLYPH_ROWS};
use super::vertex::Vertex;
use crate::engine::FontAsset;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Normalized components for the GPU
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// How a rectangle is rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Outline
    Lines,
    /// Filled
    Triangles,
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Screen-space orthographic camera over `viewport` (origin top-left, y down)
    Camera2D { viewport: Vec2 },
    Rect {
        min: Vec2,
        max: Vec2,
        color: Color,
        primitive: Primitive,
    },
    /// Text with its baseline-left corner at `origin`
    Text {
        origin: Vec2,
        text: String,
        point_size: u32,
        color: Color,
    },
}

/// A run of vertices sharing one primitive topology
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub primitive: Primitive,
    pub vertices: Vec<Vertex>,
}

/// A finalized frame, ready for the graphics backend
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub clear: Color,
    /// Viewport of the last 2D camera, if one was set
    pub camera: Option<Vec2>,
    pub batches: Vec<Batch>,
}

impl RenderPass {
    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|b| b.vertices.len()).sum()
    }
}

#[derive(Debug, Default)]
pub struct ImmediateDraw {
    commands: Vec<DrawCommand>,
}

impl ImmediateDraw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera_2d(&mut self, viewport: Vec2) {
        self.commands.push(DrawCommand::Camera2D { viewport });
    }

    /// Rectangle from corner `(x0, y0)` to corner `(x1, y1)`
    pub fn rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, primitive: Primitive) {
        self.rectv(Vec2::new(x0, y0), Vec2::new(x1, y1), color, primitive);
    }

    pub fn rectv(&mut self, min: Vec2, max: Vec2, color: Color, primitive: Primitive) {
        self.commands.push(DrawCommand::Rect {
            min,
            max,
            color,
            primitive,
        });
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, font: &FontAsset, color: Color) {
        self.commands.push(DrawCommand::Text {
            origin: Vec2::new(x, y),
            text: text.to_string(),
            point_size: font.point_size,
            color,
        });
    }

    /// Tessellate everything recorded into a render pass and start a new frame
    pub fn render_pass_submit(&mut self, clear: Color) -> RenderPass {
        let mut pass = RenderPass {
            clear,
            camera: None,
            batches: Vec::new(),
        };

        for command in self.commands.drain(..) {
            match command {
                DrawCommand::Camera2D { viewport } => pass.camera = Some(viewport),
                DrawCommand::Rect {
                    min,
                    max,
                    color,
                    primitive,
                } => {
                    let vertices = match primitive {
                        Primitive::Lines => rect_outline(min, max, color.to_f32()),
                        Primitive::Triangles => rect_filled(min, max, color.to_f32()),
                    };
                    push_batch(&mut pass.batches, primitive, vertices);
                }
                DrawCommand::Text {
                    origin,
                    text,
                    point_size,
                    color,
                } => {
                    let vertices = text_quads(origin, &text, point_size, color.to_f32());
                    push_batch(&mut pass.batches, Primitive::Triangles, vertices);
                }
            }
        }

        pass
    }
}

/// Append to the last batch when the topology matches, so draw order holds
fn push_batch(batches: &mut Vec<Batch>, primitive: Primitive, vertices: Vec<Vertex>) {
    if vertices.is_empty() {
        return;
    }
    match batches.last_mut() {
        Some(last) if last.primitive == primitive => last.vertices.extend(vertices),
        _ => batches.push(Batch {
            primitive,
            vertices,
        }),
    }
}

fn rect_filled(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

fn rect_outline(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let corners = [
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, max.y),
    ];

    let mut vertices = Vec::with_capacity(8);
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

fn text_quads(origin: Vec2, text: &str, point_size: u32, color: [f32; 4]) -> Vec<Vertex> {
    let cell = point_size as f32 / GLYPH_EM;
    let top = origin.y - GLYPH_ROWS as f32 * cell;

    let mut vertices = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let Some(glyph) = glyphs::glyph(c) else {
            continue;
        };
        let left = origin.x + (i as u32 * GLYPH_ADVANCE) as f32 * cell;
        for (col, row) in glyphs::filled_cells(glyph) {
            let min = Vec2::new(left + col as f32 * cell, top + row as f32 * cell);
            vertices.extend(rect_filled(min, min + Vec2::splat(cell), color));
        }
    }
    vertices
}
