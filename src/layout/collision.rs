use crate::config::CollisionConfig;
use crate::geometry::Rect;
use crate::ir::Table;

/// Live drag feedback: does `table`'s raw rectangle overlap any other table?
///
/// The answer is purely advisory (callers dim the dragged table); the move
/// itself is never blocked or corrected.
pub fn is_colliding(table: &Table, all_tables: &[Table]) -> bool {
    let rect = Rect::from_table(table);
    all_tables
        .iter()
        .filter(|other| other.id != table.id)
        .any(|other| rect.intersects(&Rect::from_table(other)))
}

/// One-shot overlap removal for externally supplied positions.
///
/// Each iteration pushes every overlapping pair apart along the axis of
/// least overlap, with rectangles expanded by half the configured gap on
/// each side so resolved tables end up `resolve_gap` apart. Stops when a
/// full sweep finds no overlap or after `max_iterations` sweeps; residual
/// overlap past the bound is accepted as best-effort.
///
/// Freshly auto-laid-out diagrams are overlap-free by construction and do
/// not need this pass.
pub fn resolve_overlaps(tables: &mut [Table], config: &CollisionConfig) {
    let pad = config.resolve_gap / 2.0;
    for _ in 0..config.max_iterations {
        let mut moved = false;
        for i in 0..tables.len() {
            for j in (i + 1)..tables.len() {
                let a = Rect::from_table(&tables[i]).expand(pad);
                let b = Rect::from_table(&tables[j]).expand(pad);
                if !a.intersects(&b) {
                    continue;
                }
                let overlap_x = a.right.min(b.right) - a.left.max(b.left);
                let overlap_y = a.bottom.min(b.bottom) - a.top.max(b.top);
                if overlap_x <= 0.0 || overlap_y <= 0.0 {
                    continue;
                }
                if overlap_x <= overlap_y {
                    let shift = overlap_x / 2.0;
                    if a.center_x() <= b.center_x() {
                        tables[i].position.x -= shift;
                        tables[j].position.x += shift;
                    } else {
                        tables[i].position.x += shift;
                        tables[j].position.x -= shift;
                    }
                } else {
                    let shift = overlap_y / 2.0;
                    if a.center_y() <= b.center_y() {
                        tables[i].position.y -= shift;
                        tables[j].position.y += shift;
                    } else {
                        tables[i].position.y += shift;
                        tables[j].position.y -= shift;
                    }
                }
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
}
