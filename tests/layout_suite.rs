//! End-to-end layout and routing checks over JSON fixtures.

use erd_layout::{
    Diagram, LayoutConfig, Point, Table, Theme, auto_layout, build_dump, is_colliding,
    measure_tables, resolve_overlaps, route_all, route_edge,
};

fn load_fixture(name: &str) -> Diagram {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("parsing {path}: {e}"))
}

fn laid_out(name: &str) -> (Diagram, LayoutConfig) {
    let config = LayoutConfig::default();
    let mut diagram = load_fixture(name);
    diagram.validate().unwrap();
    measure_tables(&mut diagram.tables, &config);
    diagram.tables = auto_layout(&diagram.tables, &diagram.relationships, &config);
    (diagram, config)
}

fn find<'a>(tables: &'a [Table], id: &str) -> &'a Table {
    tables.iter().find(|t| t.id == id).unwrap()
}

#[test]
fn blog_layout_has_no_overlaps() {
    let (diagram, _) = laid_out("blog.json");
    for table in &diagram.tables {
        assert!(
            !is_colliding(table, &diagram.tables),
            "{} overlaps another table",
            table.id
        );
    }
}

#[test]
fn blog_layout_is_deterministic() {
    let (first, _) = laid_out("blog.json");
    let (second, _) = laid_out("blog.json");
    for (a, b) in first.tables.iter().zip(&second.tables) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.position, b.position);
    }
}

#[test]
fn hub_table_anchors_the_first_column() {
    let (diagram, config) = laid_out("blog.json");
    // posts touches users, comments and post_tags: highest degree
    let posts = find(&diagram.tables, "posts");
    assert_eq!(posts.position.x, config.left_margin);
}

#[test]
fn unconnected_table_gets_its_own_lane() {
    let (diagram, config) = laid_out("blog.json");
    let settings = find(&diagram.tables, "settings");
    let connected_max_right = diagram
        .tables
        .iter()
        .filter(|t| t.id != "settings")
        .map(|t| t.position.x + t.width)
        .fold(f32::MIN, f32::max);
    assert!(
        settings.position.x >= connected_max_right + config.component_gap_x,
        "settings at x={} is not in a separate lane",
        settings.position.x
    );
}

#[test]
fn adjacent_levels_keep_the_configured_gap() {
    let (diagram, config) = laid_out("blog.json");
    let posts = find(&diagram.tables, "posts");
    let users = find(&diagram.tables, "users");
    // users is one BFS level away from the posts hub
    assert_eq!(
        users.position.x - (posts.position.x + posts.width),
        config.spacing_x
    );
}

#[test]
fn every_edge_is_orthogonal_and_routed() {
    let (diagram, config) = laid_out("blog.json");
    let routed = route_all(&diagram.tables, &diagram.relationships, &config);
    assert_eq!(routed.len(), diagram.relationships.len());
    for (_, edge) in &routed {
        assert!(edge.points.len() >= 2);
        for pair in edge.points.windows(2) {
            assert!(
                pair[0].x == pair[1].x || pair[0].y == pair[1].y,
                "non-orthogonal segment {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn edges_clear_unrelated_tables() {
    use erd_layout::geometry::{Rect, segment_intersects_rect};

    let (diagram, config) = laid_out("blog.json");
    for rel in &diagram.relationships {
        let edge = route_edge(&diagram.tables, rel, &config).unwrap();
        for table in &diagram.tables {
            if table.id == rel.source_table_id || table.id == rel.target_table_id {
                continue;
            }
            let rect = Rect::from_table(table).expand(config.routing.clearance);
            for pair in edge.points.windows(2) {
                assert!(
                    !segment_intersects_rect(pair[0], pair[1], &rect),
                    "edge {} cuts through table {}",
                    rel.id,
                    table.id
                );
            }
        }
    }
}

#[test]
fn connectors_sit_on_table_borders() {
    let (diagram, config) = laid_out("blog.json");
    for rel in &diagram.relationships {
        let edge = route_edge(&diagram.tables, rel, &config).unwrap();
        let source = find(&diagram.tables, &rel.source_table_id);
        let target = find(&diagram.tables, &rel.target_table_id);
        assert!(
            edge.source.x == source.position.x || edge.source.x == source.position.x + source.width,
            "edge {} source connector off the border",
            rel.id
        );
        assert!(
            edge.target.x == target.position.x || edge.target.x == target.position.x + target.width,
            "edge {} target connector off the border",
            rel.id
        );
    }
}

#[test]
fn dangling_relationship_is_dropped_table_still_placed() {
    let (diagram, config) = laid_out("dangling.json");
    assert_eq!(diagram.tables.len(), 1);
    assert_eq!(diagram.tables[0].position.x, config.left_margin);

    let routed = route_all(&diagram.tables, &diagram.relationships, &config);
    assert!(routed.is_empty());

    let dump = build_dump(&diagram, &config, &Theme::light());
    assert_eq!(dump.tables.len(), 1);
    assert!(dump.edges.is_empty());
}

#[test]
fn keep_positions_path_only_separates_overlaps() {
    let config = LayoutConfig::default();
    let mut diagram = load_fixture("blog.json");
    measure_tables(&mut diagram.tables, &config);

    // park two tables on top of each other, spread the rest far apart
    for (i, table) in diagram.tables.iter_mut().enumerate() {
        table.position = Point::new(i as f32 * 600.0, 0.0);
    }
    diagram.tables[1].position = diagram.tables[0].position;
    let far_position = diagram.tables[3].position;

    resolve_overlaps(&mut diagram.tables, &config.collision);

    for table in &diagram.tables {
        assert!(!is_colliding(table, &diagram.tables));
    }
    // a table that overlapped nothing has not been moved
    assert_eq!(diagram.tables[3].position, far_position);
}

#[test]
fn dump_snapshot_is_complete() {
    let (diagram, config) = laid_out("blog.json");
    let dump = build_dump(&diagram, &config, &Theme::dark());
    assert_eq!(dump.tables.len(), diagram.tables.len());
    assert_eq!(dump.edges.len(), diagram.relationships.len());
    for edge in &dump.edges {
        assert!(edge.points.len() >= 2);
        assert_eq!(edge.bends, edge.points.len().saturating_sub(2));
    }
    let json = serde_json::to_string(&dump).unwrap();
    assert!(json.contains("\"sourceTableId\""));
}
