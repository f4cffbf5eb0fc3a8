use std::collections::VecDeque;

use crate::config::{LayoutConfig, RoutingConfig};
use crate::geometry::{Rect, segment_intersects_rect};
use crate::ir::{Point, Relationship, Table};

/// Fixed neighbour expansion order; load-bearing for deterministic BFS
/// tie-breaking.
const BFS_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Routed polyline plus the true connector points for endpoint markers.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEdge {
    pub points: Vec<Point>,
    pub source: Point,
    pub target: Point,
}

impl RoutedEdge {
    /// Number of right-angle bends; every interior vertex of a simplified
    /// orthogonal polyline is a direction change.
    pub fn bend_count(&self) -> usize {
        self.points.len().saturating_sub(2)
    }
}

/// Uniform routing grid over the diagram bounds plus margin; lattice points
/// inside any clearance-expanded table rectangle are blocked. Rebuilt from
/// scratch per route and discarded afterwards.
#[derive(Debug)]
struct RoutingGrid {
    cell: f32,
    origin_x: f32,
    origin_y: f32,
    cols: i32,
    rows: i32,
    blocked: Vec<u8>,
}

impl RoutingGrid {
    fn build(obstacles: &[Rect], connectors: &[Point], config: &RoutingConfig) -> Self {
        let cell = config.grid_size.max(1.0);
        let margin = config.grid_margin;

        let mut left = f32::MAX;
        let mut top = f32::MAX;
        let mut right = f32::MIN;
        let mut bottom = f32::MIN;
        for rect in obstacles {
            left = left.min(rect.left);
            top = top.min(rect.top);
            right = right.max(rect.right);
            bottom = bottom.max(rect.bottom);
        }
        for point in connectors {
            left = left.min(point.x);
            top = top.min(point.y);
            right = right.max(point.x);
            bottom = bottom.max(point.y);
        }

        let min_x = ((left - margin) / cell).floor() * cell;
        let min_y = ((top - margin) / cell).floor() * cell;
        let max_x = ((right + margin) / cell).ceil() * cell;
        let max_y = ((bottom + margin) / cell).ceil() * cell;

        let cols = (((max_x - min_x) / cell).round() as i32).max(1) + 1;
        let rows = (((max_y - min_y) / cell).round() as i32).max(1) + 1;

        let mut grid = Self {
            cell,
            origin_x: min_x,
            origin_y: min_y,
            cols,
            rows,
            blocked: vec![0; (cols as usize) * (rows as usize)],
        };
        for rect in obstacles {
            grid.mark_blocked(rect);
        }
        grid
    }

    fn index(&self, i: i32, j: i32) -> usize {
        (j * self.cols + i) as usize
    }

    fn in_bounds(&self, i: i32, j: i32) -> bool {
        i >= 0 && j >= 0 && i < self.cols && j < self.rows
    }

    fn passable(&self, i: i32, j: i32) -> bool {
        self.in_bounds(i, j) && self.blocked[self.index(i, j)] == 0
    }

    fn to_world(&self, i: i32, j: i32) -> Point {
        Point::new(
            self.origin_x + i as f32 * self.cell,
            self.origin_y + j as f32 * self.cell,
        )
    }

    /// Snap a world point to the nearest lattice point.
    fn snap(&self, x: f32, y: f32) -> (i32, i32, Point) {
        let i = ((x - self.origin_x) / self.cell).round() as i32;
        let j = ((y - self.origin_y) / self.cell).round() as i32;
        (i, j, self.to_world(i, j))
    }

    fn mark_blocked(&mut self, rect: &Rect) {
        let i_min = (((rect.left - self.origin_x) / self.cell).floor() as i32 - 1).max(0);
        let i_max = (((rect.right - self.origin_x) / self.cell).ceil() as i32 + 1).min(self.cols - 1);
        let j_min = (((rect.top - self.origin_y) / self.cell).floor() as i32 - 1).max(0);
        let j_max = (((rect.bottom - self.origin_y) / self.cell).ceil() as i32 + 1).min(self.rows - 1);
        for j in j_min..=j_max {
            for i in i_min..=i_max {
                let point = self.to_world(i, j);
                if rect.contains_point(point.x, point.y) {
                    let idx = self.index(i, j);
                    self.blocked[idx] = 1;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Stub {
    i: i32,
    j: i32,
    x: f32,
    y: f32,
}

/// Exit cell near a connector: a fixed offset out from the table edge,
/// snapped to the lattice, then marched further outward while blocked.
fn exit_stub(grid: &RoutingGrid, edge: Point, outward: f32, config: &RoutingConfig) -> Stub {
    let (mut i, j, snapped) = grid.snap(edge.x + outward * config.exit_offset, edge.y);
    let mut x = snapped.x;
    let y = snapped.y;
    let step = if outward >= 0.0 { 1 } else { -1 };

    let mut guard = 0;
    while !grid.passable(i, j) && guard < config.stub_march_limit {
        i += step;
        x = grid.to_world(i, j).x;
        guard += 1;
        if !grid.in_bounds(i, j) {
            break;
        }
    }
    Stub { i, j, x, y }
}

/// Minimum-hop path between two lattice cells over free cells, or `None`
/// when the target is unreachable.
fn bfs_route(grid: &RoutingGrid, start: (i32, i32), goal: (i32, i32)) -> Option<Vec<(i32, i32)>> {
    if !grid.passable(start.0, start.1) || !grid.passable(goal.0, goal.1) {
        return None;
    }

    let size = (grid.cols as usize) * (grid.rows as usize);
    let mut visited = vec![false; size];
    let mut parent: Vec<i32> = vec![-1; size];
    let mut queue = VecDeque::new();

    visited[grid.index(start.0, start.1)] = true;
    queue.push_back(start);

    let mut found = false;
    while let Some((ci, cj)) = queue.pop_front() {
        if (ci, cj) == goal {
            found = true;
            break;
        }
        let current = grid.index(ci, cj);
        for (di, dj) in BFS_DIRS {
            let ni = ci + di;
            let nj = cj + dj;
            if !grid.passable(ni, nj) {
                continue;
            }
            let next = grid.index(ni, nj);
            if visited[next] {
                continue;
            }
            visited[next] = true;
            parent[next] = current as i32;
            queue.push_back((ni, nj));
        }
    }
    if !found {
        return None;
    }

    let mut cells = Vec::new();
    let mut cursor = grid.index(goal.0, goal.1) as i32;
    while cursor >= 0 {
        let i = cursor % grid.cols;
        let j = cursor / grid.cols;
        cells.push((i, j));
        cursor = parent[cursor as usize];
    }
    cells.reverse();
    Some(cells)
}

/// Merge colinear runs and drop duplicate points.
fn simplify(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    let mut prev_dx = 0i8;
    let mut prev_dy = 0i8;
    for (k, &point) in points.iter().enumerate() {
        let Some(&last) = out.last() else {
            out.push(point);
            continue;
        };
        let dx = sign(point.x - last.x);
        let dy = sign(point.y - last.y);
        let is_last = k == points.len() - 1;
        if dx != prev_dx || dy != prev_dy || is_last {
            out.push(point);
            prev_dx = dx;
            prev_dy = dy;
        } else {
            let n = out.len();
            out[n - 1] = point;
        }
    }
    out.dedup();
    out
}

fn sign(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Collapse three-point runs whose outer points align, re-validating the
/// straightened segment against the obstacle set. Splicing and the fallback
/// leave colinear triples and duplicate points behind; this pass cleans them
/// up over a bounded number of rounds.
fn optimize_corners(
    points: Vec<Point>,
    passes: usize,
    intersects_any: &impl Fn(Point, Point) -> bool,
) -> Vec<Point> {
    if points.len() < 3 {
        return points;
    }
    let mut out = points;
    for _ in 0..passes {
        let mut modified = false;
        let mut i = 1;
        while i + 1 < out.len() {
            let a = out[i - 1];
            let c = out[i + 1];

            // collapse A-B-C when A and C align and the straight run is clear
            if (a.y == c.y || a.x == c.x) && !intersects_any(a, c) {
                out[i] = c;
                modified = true;
            }
            i += 1;
        }
        let simplified = simplify(&out);
        if simplified.len() != out.len() {
            modified = true;
        }
        out = simplified;
        if !modified {
            break;
        }
    }
    out
}

/// Pull the final point back by `inset` along its segment so a rendered
/// arrowhead does not overrun the target border.
fn shorten_tail(points: &mut [Point], inset: f32) {
    let n = points.len();
    if n < 2 {
        return;
    }
    let prev = points[n - 2];
    let last = points[n - 1];
    if prev.y == last.y {
        let seg = (last.x - prev.x).abs();
        let d = inset.min((seg - 1.0).max(0.0));
        if d > 0.0 {
            let dir = if last.x >= prev.x { 1.0 } else { -1.0 };
            points[n - 1].x = last.x - dir * d;
        }
    } else if prev.x == last.x {
        let seg = (last.y - prev.y).abs();
        let d = inset.min((seg - 1.0).max(0.0));
        if d > 0.0 {
            let dir = if last.y >= prev.y { 1.0 } else { -1.0 };
            points[n - 1].y = last.y - dir * d;
        }
    }
}

/// Compute the orthogonal polyline for one relationship against the current
/// table positions. Stateless; identical inputs yield an identical path.
///
/// Returns `None` only when an endpoint table or column cannot be resolved —
/// such an edge is dropped from rendering, never an error. A blocked grid
/// never fails: the route degrades to a direct L-shape instead.
pub fn route_edge(
    tables: &[Table],
    relationship: &Relationship,
    config: &LayoutConfig,
) -> Option<RoutedEdge> {
    let source_table = tables.iter().find(|t| t.id == relationship.source_table_id)?;
    let source_column = source_table.column(&relationship.source_column_id)?;
    let target_table = tables.iter().find(|t| t.id == relationship.target_table_id)?;
    let target_column = target_table.column(&relationship.target_column_id)?;
    let routing = &config.routing;

    let source_y = source_table.row_anchor_y(source_column, config);
    let target_y = target_table.row_anchor_y(target_column, config);

    // facing sides, chosen from the relative horizontal position of centres
    let source_cx = source_table.position.x + source_table.width / 2.0;
    let target_cx = target_table.position.x + target_table.width / 2.0;
    let source_is_left = source_cx < target_cx;

    let source_x = if source_is_left {
        source_table.position.x + source_table.width
    } else {
        source_table.position.x
    };
    let target_x = if source_is_left {
        target_table.position.x
    } else {
        target_table.position.x + target_table.width
    };
    let source = Point::new(source_x, source_y);
    let target = Point::new(target_x, target_y);

    // every table blocks the grid, the endpoints included: the route must
    // clear them once it has left the edge via its stub
    let obstacles: Vec<Rect> = tables
        .iter()
        .map(|t| Rect::from_table(t).expand(routing.clearance))
        .collect();
    let blocking: Vec<Rect> = tables
        .iter()
        .filter(|t| t.id != source_table.id && t.id != target_table.id)
        .map(|t| Rect::from_table(t).expand(routing.clearance))
        .collect();
    let intersects_any =
        |a: Point, b: Point| blocking.iter().any(|r| segment_intersects_rect(a, b, r));

    let grid = RoutingGrid::build(&obstacles, &[source, target], routing);

    let source_dir = if source_is_left { 1.0 } else { -1.0 };
    let source_stub = exit_stub(&grid, source, source_dir, routing);
    let target_stub = exit_stub(&grid, target, -source_dir, routing);

    let mut points = match bfs_route(
        &grid,
        (source_stub.i, source_stub.j),
        (target_stub.i, target_stub.j),
    ) {
        Some(cells) => {
            let mut pts = vec![source];
            let mut start_index = 0;

            // Grid snapping often introduces a small vertical jog right at the
            // source; when the path starts horizontally and the straight run at
            // the true source y is clear, skip the jog.
            if cells.len() >= 2 {
                let p0 = grid.to_world(cells[0].0, cells[0].1);
                let p1 = grid.to_world(cells[1].0, cells[1].1);
                if p1.y == p0.y
                    && p0.y != source_y
                    && !intersects_any(source, Point::new(p1.x, source_y))
                {
                    pts.push(Point::new(p1.x, source_y));
                    if p1.y != source_y {
                        pts.push(p1);
                    }
                    start_index = 2;
                }
            }
            if start_index == 0 && !(source_stub.x == source_x && source_stub.y == source_y) {
                pts.push(Point::new(source_stub.x, source_y));
                if source_stub.y != source_y {
                    pts.push(Point::new(source_stub.x, source_stub.y));
                }
            }

            for &(i, j) in &cells[start_index.min(cells.len())..] {
                pts.push(grid.to_world(i, j));
            }

            let last = *pts.last().unwrap_or(&source);
            if !(last.x == target_stub.x && last.y == target_stub.y) {
                pts.push(Point::new(target_stub.x, target_stub.y));
            }
            pts.push(Point::new(target_stub.x, target_y));
            pts.push(target);

            optimize_corners(simplify(&pts), routing.optimize_passes, &intersects_any)
        }
        // No free path: a crossing L-beats a missing edge.
        None => {
            let mid_x = source_x + source_dir * routing.exit_offset;
            let pts = vec![
                source,
                Point::new(mid_x, source_y),
                Point::new(mid_x, target_y),
                target,
            ];
            optimize_corners(pts, routing.optimize_passes, &intersects_any)
        }
    };

    shorten_tail(&mut points, routing.end_inset);

    #[cfg(debug_assertions)]
    debug_validate(&points, source, target, routing);

    Some(RoutedEdge {
        points,
        source,
        target,
    })
}

#[cfg(debug_assertions)]
fn debug_validate(points: &[Point], source: Point, target: Point, config: &RoutingConfig) {
    debug_assert!(points.len() >= 2, "route must have at least two points");
    let first = points[0];
    debug_assert!(
        first == source,
        "route must start at the source connector: {first:?} vs {source:?}"
    );
    let last = points[points.len() - 1];
    debug_assert!(
        (last.x - target.x).abs() <= config.end_inset && (last.y - target.y).abs() <= config.end_inset,
        "route must end within the inset of the target connector: {last:?} vs {target:?}"
    );
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        debug_assert!(
            a.x == b.x || a.y == b.y,
            "route segment is not axis-aligned: {a:?} -> {b:?}"
        );
        debug_assert!(
            (a.x - b.x).abs() + (a.y - b.y).abs() > 1e-3,
            "near-zero route segment at {a:?}"
        );
    }
}

/// Update the routes of every relationship after a layout change or a drag
/// move; edges with unresolved endpoints are silently dropped.
pub fn route_all(
    tables: &[Table],
    relationships: &[Relationship],
    config: &LayoutConfig,
) -> Vec<(usize, RoutedEdge)> {
    relationships
        .iter()
        .enumerate()
        .filter_map(|(idx, rel)| route_edge(tables, rel, config).map(|edge| (idx, edge)))
        .collect()
}
