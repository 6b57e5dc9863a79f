//! Backend-neutral draw commands produced by a frame's render phase.
//!
//! Rendering itself belongs to whatever [`Presenter`](crate::Presenter)
//! consumes the list; this module only records what was asked for.

use palette::Srgba;

/// 8-bit sRGB color with alpha.
pub type Color = Srgba<u8>;

/// Named colors used throughout the demos.
pub mod colors {
    use super::Color;

    pub const RAYWHITE: Color = Color::new(245, 245, 245, 255);
    pub const LIGHTGRAY: Color = Color::new(200, 200, 200, 255);
    pub const GRAY: Color = Color::new(130, 130, 130, 255);
    pub const DARKGRAY: Color = Color::new(80, 80, 80, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const RED: Color = Color::new(230, 41, 55, 255);
    pub const MAROON: Color = Color::new(190, 33, 55, 255);
    pub const GREEN: Color = Color::new(0, 228, 48, 255);
    pub const BLUE: Color = Color::new(0, 121, 241, 255);
    pub const DARKBLUE: Color = Color::new(0, 82, 172, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
}

/// Copy of `color` with its alpha replaced by `alpha` in `[0, 1]`.
pub fn fade(color: Color, alpha: f32) -> Color {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::new(color.red, color.green, color.blue, alpha)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, point: [f32; 2]) -> bool {
        point[0] >= self.x
            && point[0] < self.x + self.w
            && point[1] >= self.y
            && point[1] < self.y + self.h
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// Rectangle rotated by `rotation` degrees around `origin`, which is
    /// relative to the rectangle's top-left corner.
    FillRectRotated {
        rect: Rect,
        origin: [f32; 2],
        rotation: f32,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        thickness: f32,
        color: Color,
    },
    FillCircle {
        center: [f32; 2],
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        position: [f32; 2],
        size: f32,
        color: Color,
    },
    /// Region `source` of a loaded texture, drawn at `position`.
    TextureRegion {
        texture: String,
        source: Rect,
        position: [f32; 2],
        tint: Color,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the list, keeping its allocation for the next frame.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn fill_rect_rotated(&mut self, rect: Rect, origin: [f32; 2], rotation: f32, color: Color) {
        self.commands.push(DrawCommand::FillRectRotated {
            rect,
            origin,
            rotation,
            color,
        });
    }

    pub fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            thickness,
            color,
        });
    }

    pub fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, position: [f32; 2], size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            position,
            size,
            color,
        });
    }

    pub fn texture_region(
        &mut self,
        texture: impl Into<String>,
        source: Rect,
        position: [f32; 2],
        tint: Color,
    ) {
        self.commands.push(DrawCommand::TextureRegion {
            texture: texture.into(),
            source,
            position,
            tint,
        });
    }

    /// Every text string in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Texts joined with `" | "`, used as a one-line frame summary.
    pub fn status_line(&self) -> String {
        self.texts().collect::<Vec<_>>().join(" | ")
    }
}
