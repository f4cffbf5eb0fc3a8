//! Scene viewport: zoom and pan state plus the fit/centre helpers.
//!
//! The viewport is a pure value; every operation returns the next state so
//! callers can drive it from any event loop.

use serde::Serialize;

use crate::geometry::bounds_of;
use crate::ir::{Point, Table};

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;
/// Step for the explicit zoom-in/zoom-out commands.
pub const SCALE_STEP: f32 = 1.2;
/// Finer step for wheel-driven zoom.
const WHEEL_STEP: f32 = 1.02;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::default(),
        }
    }
}

impl Viewport {
    pub fn reset() -> Self {
        Self::default()
    }

    pub fn zoom_in(self) -> Self {
        Self {
            scale: (self.scale * SCALE_STEP).min(MAX_SCALE),
            ..self
        }
    }

    pub fn zoom_out(self) -> Self {
        Self {
            scale: (self.scale / SCALE_STEP).max(MIN_SCALE),
            ..self
        }
    }

    /// Wheel zoom anchored at the pointer: the world point under the cursor
    /// stays under the cursor.
    pub fn wheel_zoom(self, pointer: Point, zoom_in: bool) -> Self {
        let world_x = (pointer.x - self.offset.x) / self.scale;
        let world_y = (pointer.y - self.offset.y) / self.scale;
        let scale = if zoom_in {
            self.scale * WHEEL_STEP
        } else {
            self.scale / WHEEL_STEP
        }
        .clamp(MIN_SCALE, MAX_SCALE);
        Self {
            scale,
            offset: Point::new(pointer.x - world_x * scale, pointer.y - world_y * scale),
        }
    }

    pub fn pan(self, dx: f32, dy: f32) -> Self {
        Self {
            offset: Point::new(self.offset.x + dx, self.offset.y + dy),
            ..self
        }
    }

    /// Scale and offset that fit the whole table set inside the scene,
    /// centred, never zooming past [`MAX_SCALE`].
    pub fn fit_to_screen(tables: &[Table], scene_width: f32, scene_height: f32) -> Self {
        let Some(bounds) = bounds_of(tables) else {
            return Self::default();
        };
        let content_width = bounds.width();
        let content_height = bounds.height();
        if content_width <= 0.0 || content_height <= 0.0 {
            return Self::default();
        }
        let scale = (scene_width / content_width)
            .min(scene_height / content_height)
            .min(MAX_SCALE);
        Self {
            scale,
            offset: Point::new(
                (scene_width - content_width * scale) / 2.0 - bounds.left * scale,
                (scene_height - content_height * scale) / 2.0 - bounds.top * scale,
            ),
        }
    }
}

/// Translate every table so the bounding box of the set is centred on
/// `target`. Relative positions are untouched.
pub fn center_tables(tables: &mut [Table], target: Point) {
    let Some(bounds) = bounds_of(tables) else {
        return;
    };
    let dx = target.x - bounds.center_x();
    let dy = target.y - bounds.center_y();
    for table in tables {
        table.position.x += dx;
        table.position.y += dy;
    }
}
