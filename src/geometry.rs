use crate::ir::{Point, Table};

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn from_table(table: &Table) -> Self {
        Self {
            left: table.position.x,
            top: table.position.y,
            right: table.position.x + table.width,
            bottom: table.position.y + table.height,
        }
    }

    pub fn expand(&self, by: f32) -> Self {
        Self {
            left: self.left - by,
            top: self.top - by,
            right: self.right + by,
            bottom: self.bottom + by,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Strict overlap; rectangles that merely touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right.min(other.right) > self.left.max(other.left)
            && self.bottom.min(other.bottom) > self.top.max(other.top)
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Bounding box of a table set; `None` for an empty diagram.
pub fn bounds_of(tables: &[Table]) -> Option<Rect> {
    let first = tables.first()?;
    let mut bounds = Rect::from_table(first);
    for table in &tables[1..] {
        let rect = Rect::from_table(table);
        bounds.left = bounds.left.min(rect.left);
        bounds.top = bounds.top.min(rect.top);
        bounds.right = bounds.right.max(rect.right);
        bounds.bottom = bounds.bottom.max(rect.bottom);
    }
    Some(bounds)
}

/// Intersection test for a purely horizontal or vertical segment against a
/// rectangle. Diagonal segments never occur on an orthogonal route and are
/// reported as non-intersecting.
pub fn segment_intersects_rect(a: Point, b: Point, rect: &Rect) -> bool {
    let left = a.x.min(b.x);
    let right = a.x.max(b.x);
    let top = a.y.min(b.y);
    let bottom = a.y.max(b.y);

    if a.y == b.y {
        return a.y >= rect.top && a.y <= rect.bottom && right >= rect.left && left <= rect.right;
    }
    if a.x == b.x {
        return a.x >= rect.left && a.x <= rect.right && bottom >= rect.top && top <= rect.bottom;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f32, top: f32, right: f32, bottom: f32) -> Rect {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 20.0, 10.0);
        assert!(!a.intersects(&b));
        let c = rect(9.0, 0.0, 20.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn horizontal_segment_hits_rect() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        assert!(segment_intersects_rect(
            Point::new(0.0, 15.0),
            Point::new(30.0, 15.0),
            &r
        ));
        assert!(!segment_intersects_rect(
            Point::new(0.0, 25.0),
            Point::new(30.0, 25.0),
            &r
        ));
    }

    #[test]
    fn vertical_segment_hits_rect() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        assert!(segment_intersects_rect(
            Point::new(15.0, 0.0),
            Point::new(15.0, 30.0),
            &r
        ));
        assert!(!segment_intersects_rect(
            Point::new(25.0, 0.0),
            Point::new(25.0, 30.0),
            &r
        ));
    }

    #[test]
    fn diagonal_segment_is_ignored() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        assert!(!segment_intersects_rect(
            Point::new(0.0, 0.0),
            Point::new(30.0, 30.0),
            &r
        ));
    }
}
