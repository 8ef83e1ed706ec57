//! # Gallery Components
//!
//! The two behavioral components of the gallery, plus the session context
//! they share:
//!
//! - **Artwork Interaction** ([`ArtworkInteraction`]) - reacts to selection
//!   events on an artwork, toggles its floating information card, and dresses
//!   the artwork with a decorative frame at attach time
//! - **Collision Guard** ([`CollisionGuard`]) - casts a ray ahead of the
//!   viewer every frame and suspends the movement controller when an obstacle
//!   is inside the configured distance
//!
//! The components never talk to each other; the scene graph is the only
//! medium they share. Both are driven by the host: selection events reach
//! [`ArtworkInteraction::on_select`], the per-frame tick reaches
//! [`CollisionGuard::tick`].

pub mod card;
pub mod collision;
pub mod interaction;

pub use card::CardLayout;
pub use collision::{CollisionGuard, CollisionGuardConfig, GuardState, COLLIDABLE_TAG};
pub use interaction::{ArtworkConfig, ArtworkInteraction, FrameOrientation, CLICKABLE_TAG};

use crate::scene::{NodeId, Scene};

/// The at-most-one open information card.
#[derive(Debug, Clone, Copy)]
struct ActiveCard {
    artwork: NodeId,
    card: NodeId,
}

/// Per-session interaction state.
///
/// Owns the active (artwork, card) pair so independent scenes and tests can
/// run side by side without ambient shared state. Invariant: the active
/// card, when present, belongs to the active artwork; opening a new card
/// retires the previous one first.
pub struct GallerySession {
    active: Option<ActiveCard>,
}

impl GallerySession {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// The artwork whose card is currently open, if any.
    pub fn active_artwork(&self) -> Option<NodeId> {
        self.active.map(|a| a.artwork)
    }

    /// The currently open card node, if any.
    pub fn active_card(&self) -> Option<NodeId> {
        self.active.map(|a| a.card)
    }

    /// Closes the open card, removing it from the scene.
    pub fn close_active(&mut self, scene: &mut Scene) {
        if let Some(active) = self.active.take() {
            scene.despawn(active.card);
        }
    }

    pub(crate) fn set_active(&mut self, artwork: NodeId, card: NodeId) {
        self.active = Some(ActiveCard { artwork, card });
    }
}

impl Default for GallerySession {
    fn default() -> Self {
        Self::new()
    }
}
