//! Rendering seam
//!
//! The simulation only hands normalized coordinates to a [`Surface`]; the
//! affine transform to screen space happens here via [`crate::to_screen`].
//! Drawing backends (window, GPU) live outside this crate.

use glam::Vec2;

use crate::to_screen;

/// What a draw call represents, so backends can pick colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Block,
    CenterOfMass,
    Object,
    /// Debug marker at the normalized origin
    Origin,
}

/// Frame surface the game draws into
pub trait Surface {
    /// Reset the frame before anything is drawn
    fn clear(&mut self);
    /// Background layer. `None` means a plain fill
    fn draw_background(&mut self, background: Option<&str>);
    /// Filled circle in screen space (pixels)
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
    /// Show the finished frame
    fn present(&mut self);
}

/// Anything the game can paint
pub trait Renderable: std::fmt::Debug {
    fn render(&self, surface: &mut dyn Surface, origin: Vec2, unit_size: f32);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background(Option<String>),
    Circle { center: Vec2, radius: f32, paint: Paint },
}

/// Headless surface that records the current frame's draw calls
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    frames_presented: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls since the last `clear`
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Centers of all circles with the given paint, in draw order
    pub fn circles(&self, paint: Paint) -> Vec<Vec2> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Circle { center, paint: p, .. } if *p == paint => Some(*center),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.clear();
    }

    fn draw_background(&mut self, background: Option<&str>) {
        self.calls.push(DrawCall::Background(background.map(str::to_owned)));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            paint,
        });
    }

    fn present(&mut self) {
        self.frames_presented += 1;
        log::trace!(
            "Frame {} presented ({} draw calls)",
            self.frames_presented,
            self.calls.len()
        );
    }
}

/// Marker radius in pixels
pub const MARKER_RADIUS_PX: f32 = 3.0;

/// A static transient object, e.g. a spawn point or impact mark
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub pos: Vec2,
    pub radius: f32,
}

impl Marker {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }
}

impl Renderable for Marker {
    fn render(&self, surface: &mut dyn Surface, origin: Vec2, unit_size: f32) {
        surface.draw_circle(
            to_screen(origin, unit_size, self.pos),
            self.radius * unit_size,
            Paint::Object,
        );
    }
}
