//! Artwork interaction component: decorative frames and the card toggle.

use cgmath::Vector3;
use log::warn;

use super::{card, GallerySession};
use crate::assets::ArtworkCatalog;
use crate::scene::{Geometry, Material, Node, NodeId, Scene};

/// Tag carried by every interactive artwork so the host's cursor/controller
/// raycaster can find it.
pub const CLICKABLE_TAG: &str = "clickable";

const FRAME_LANDSCAPE_TEX: &str = "frame_landscape";
const FRAME_PORTRAIT_TEX: &str = "frame_portrait";

// Card placement offsets relative to the artwork, in scene units
const CARD_DROP_SPACING: f32 = 0.9;
const CARD_FORWARD_OFFSET: f32 = -0.05;

// Fallback dimensions when the artwork node carries no plane geometry
const FRAME_FALLBACK_SIZE: f32 = 1.0;
const CARD_FALLBACK_SIZE: f32 = 2.0;

/// Decorative frame orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrientation {
    /// Infer from the artwork's aspect ratio
    Auto,
    Landscape,
    Portrait,
}

/// Per-artwork configuration.
#[derive(Debug, Clone)]
pub struct ArtworkConfig {
    /// Key into the artwork catalog
    pub artwork_id: String,
    /// Extra frame size beyond the artwork on each axis
    pub frame_padding: f32,
    /// How far behind the artwork the frame sits, along its normal
    pub frame_depth: f32,
    pub frame_orientation: FrameOrientation,
}

impl ArtworkConfig {
    pub fn new(artwork_id: impl Into<String>) -> Self {
        Self {
            artwork_id: artwork_id.into(),
            frame_padding: 0.35,
            frame_depth: 0.02,
            frame_orientation: FrameOrientation::Auto,
        }
    }
}

/// Interaction component attached to one artwork node.
///
/// Attaching tags the artwork clickable and dresses it with a decorative
/// frame; selection events toggle the floating information card through the
/// shared [`GallerySession`].
pub struct ArtworkInteraction {
    entity: NodeId,
    config: ArtworkConfig,
    frame: Option<NodeId>,
}

impl ArtworkInteraction {
    /// Attaches the component to an artwork node.
    pub fn attach(scene: &mut Scene, entity: NodeId, config: ArtworkConfig) -> Self {
        scene.add_tag(entity, CLICKABLE_TAG);
        let mut component = Self {
            entity,
            config,
            frame: None,
        };
        component.create_frame(scene);
        component
    }

    pub fn entity(&self) -> NodeId {
        self.entity
    }

    /// The decorative frame node, if one was created at attach time.
    pub fn frame(&self) -> Option<NodeId> {
        self.frame
    }

    fn create_frame(&mut self, scene: &mut Scene) {
        // The frame is a sibling; an artwork without a parent container
        // gets no frame
        let Some(parent) = scene.parent(self.entity) else {
            return;
        };
        let Some(artwork) = scene.get(self.entity) else {
            return;
        };

        let (width, height) = artwork
            .geometry
            .map(|g| g.dimensions())
            .unwrap_or((FRAME_FALLBACK_SIZE, FRAME_FALLBACK_SIZE));

        let orientation = match self.config.frame_orientation {
            FrameOrientation::Auto => {
                if width >= height {
                    FrameOrientation::Landscape
                } else {
                    FrameOrientation::Portrait
                }
            }
            explicit => explicit,
        };
        let texture = match orientation {
            FrameOrientation::Portrait => FRAME_PORTRAIT_TEX,
            _ => FRAME_LANDSCAPE_TEX,
        };

        // Same local placement as the artwork, nudged back along its normal
        let normal = artwork.rotation * Vector3::unit_z();
        let position = artwork.position - normal * self.config.frame_depth;
        let rotation = artwork.rotation;

        let frame = scene.spawn_child(
            parent,
            Node::new()
                .with_name("frame")
                .with_position(position)
                .with_rotation(rotation)
                .with_geometry(Geometry::Plane {
                    width: width + self.config.frame_padding,
                    height: height + self.config.frame_padding,
                })
                .with_material(Material {
                    texture: Some(texture.to_string()),
                    double_sided: true,
                    ..Default::default()
                }),
        );
        self.frame = Some(frame);
    }

    /// Handles a selection event on this artwork.
    ///
    /// Idempotent toggle: selecting the artwork whose card is open closes
    /// it; any other selection opens this artwork's card, retiring whatever
    /// card was open before.
    pub fn on_select(
        &mut self,
        scene: &mut Scene,
        session: &mut GallerySession,
        catalog: &ArtworkCatalog,
    ) {
        let own_card_open = session.active_artwork() == Some(self.entity)
            && session.active_card().is_some_and(|card| scene.contains(card));
        if own_card_open {
            session.close_active(scene);
        } else {
            self.show_card(scene, session, catalog);
        }
    }

    fn show_card(
        &mut self,
        scene: &mut Scene,
        session: &mut GallerySession,
        catalog: &ArtworkCatalog,
    ) {
        if !catalog.is_ready() {
            warn!("artwork catalog not loaded yet, ignoring selection");
            return;
        }
        let Some(record) = catalog.get(&self.config.artwork_id) else {
            warn!("no artwork record for id '{}'", self.config.artwork_id);
            return;
        };

        session.close_active(scene);

        let Some(world_pos) = scene.world_position(self.entity) else {
            return;
        };
        let Some(world_rot) = scene.world_rotation(self.entity) else {
            return;
        };
        let (_, artwork_height) = scene
            .get(self.entity)
            .and_then(|n| n.geometry)
            .map(|g| g.dimensions())
            .unwrap_or((CARD_FALLBACK_SIZE, CARD_FALLBACK_SIZE));

        // Below the artwork, slightly in front of the wall plane
        let down = world_rot * -Vector3::unit_y();
        let forward = world_rot * -Vector3::unit_z();
        let position = world_pos
            + down * (artwork_height / 2.0 + CARD_DROP_SPACING)
            + forward * CARD_FORWARD_OFFSET;

        let card = card::spawn_card(scene, record);
        if let Some(node) = scene.get_mut(card) {
            node.position = position;
            node.rotation = world_rot;
        }
        session.set_active(self.entity, card);
    }

    /// Detaches the component, closing its card if it owns the open one and
    /// removing its decorative frame.
    pub fn detach(&mut self, scene: &mut Scene, session: &mut GallerySession) {
        if session.active_artwork() == Some(self.entity) {
            session.close_active(scene);
        }
        if let Some(frame) = self.frame.take() {
            scene.despawn(frame);
        }
    }
}
