//! ER diagram auto-layout and orthogonal relationship routing.
//!
//! The pipeline is: build [`ir::Diagram`] values (parsed from JSON or
//! constructed directly), measure the tables, place them with
//! [`layout::auto_layout`] (or keep caller positions and run
//! [`layout::resolve_overlaps`]), then route each relationship with
//! [`layout::route_edge`]. [`dump::build_dump`] bundles the result into a
//! serializable snapshot.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod geometry;
pub mod ir;
pub mod layout;
pub mod theme;
pub mod viewport;

pub use config::{CollisionConfig, Config, LayoutConfig, RoutingConfig, load_config};
pub use dump::{DiagramDump, build_dump, write_dump};
pub use ir::{Column, Diagram, DiagramError, Point, Relationship, Table, measure_tables};
pub use layout::{
    RoutedEdge, auto_layout, is_colliding, resolve_overlaps, route_all, route_edge,
};
pub use theme::Theme;
pub use viewport::{Viewport, center_tables};
