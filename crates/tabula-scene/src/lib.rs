//! Display lists for Tabula tables.
//!
//! A [`Scene`] is a flat list of drawing commands in paint order: canvas
//! clear, then per cell a filled and a stroked rounded rectangle followed by
//! the cell's text lines or its embedded table. Embedded tables are complete
//! scenes of their own, placed by [`NestedScene`]. Rasterizing a scene is
//! left to the host.

pub mod options;
pub mod primitives;
pub mod scene;

pub use options::SceneOptions;
pub use primitives::*;
pub use scene::{build_document_scene, build_scene, SceneBuilder};
