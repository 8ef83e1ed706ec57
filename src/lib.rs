// src/lib.rs
//! Vernissage
//!
//! The headless interaction core of a virtual-reality art gallery, built on
//! a small scene graph: clickable artworks with floating information cards,
//! decorative frames sized to each artwork, and a forward-raycast collision
//! guard that keeps the viewer out of the walls. Rendering, windowing, and
//! input stay with the host engine; this crate owns the behavior.

pub mod assets;
pub mod gallery;
pub mod movement;
pub mod prelude;
pub mod scene;

// Re-export main types for convenience
pub use assets::{ArtworkCatalog, ArtworkRecord};
pub use gallery::{ArtworkInteraction, CollisionGuard, GallerySession};
pub use scene::Scene;
