//! # Vernissage Prelude
//!
//! Convenient single import for typical gallery setups:
//!
//! ```rust
//! use vernissage::prelude::*;
//! ```

// Re-export session and component types
pub use crate::gallery::{
    ArtworkConfig, ArtworkInteraction, CardLayout, CollisionGuard, CollisionGuardConfig,
    FrameOrientation, GallerySession, GuardState, CLICKABLE_TAG, COLLIDABLE_TAG,
};

// Re-export the scene graph
pub use crate::scene::{
    raycast, Aabb, FontStyle, Geometry, Material, Node, NodeId, Ray, RayHit, Scene, Text,
    TextAlign,
};

// Re-export assets and the movement contract
pub use crate::assets::{ArtworkCatalog, ArtworkRecord, CatalogError};
pub use crate::movement::{ControlCapabilities, ControlStrategy, MovementControl};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Quaternion, Vector3, Zero};
