//! Information-card layout and construction.
//!
//! Cards have a fixed width and a content-driven height: four text bands
//! (title, artist, year, wrapped description) stacked top to bottom over an
//! opaque-ish white backing plane.

use cgmath::Vector3;

use crate::assets::ArtworkRecord;
use crate::scene::{FontStyle, Geometry, Material, Node, NodeId, Scene, Text};

pub const CARD_WIDTH: f32 = 2.5;

const PADDING: f32 = 0.15;
const LINE_SPACING: f32 = 0.12;
const TITLE_SIZE: f32 = 0.16;
const ARTIST_SIZE: f32 = 0.09;
const YEAR_SIZE: f32 = 0.08;
const DESC_SIZE: f32 = 0.085;
const DESC_WRAP: u32 = 35;
const DESC_LINE_HEIGHT: f32 = 1.2;

// Text sits just in front of the backing plane
const TEXT_Z: f32 = 0.01;

const TITLE_COLOR: [f32; 3] = [0.2, 0.2, 0.2];
const ARTIST_COLOR: [f32; 3] = [0.4, 0.4, 0.4];
const DETAIL_COLOR: [f32; 3] = [0.53, 0.53, 0.53];

/// Computed card dimensions and per-band text centers.
///
/// Y coordinates are in card-local space, measured from the card center;
/// each band's text is vertically centered within its allotted slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub width: f32,
    pub height: f32,
    pub title_y: f32,
    pub artist_y: f32,
    pub year_y: f32,
    pub description_y: f32,
}

impl CardLayout {
    /// Measures a card for the given description text.
    ///
    /// The description wraps at [`DESC_WRAP`] characters per line, so its
    /// band grows as `ceil(chars / 35)` lines; every other band is fixed.
    pub fn measure(description: &str) -> Self {
        let desc_lines = (description.chars().count() as f32 / DESC_WRAP as f32).ceil();
        let desc_height = desc_lines * DESC_SIZE * DESC_LINE_HEIGHT;

        let content_height = TITLE_SIZE
            + LINE_SPACING
            + ARTIST_SIZE
            + LINE_SPACING
            + YEAR_SIZE
            + LINE_SPACING
            + desc_height;
        let height = content_height + PADDING * 2.0;

        // Stack the bands downward from the top edge, centered around y = 0
        let start_y = height / 2.0 - PADDING;
        let title_y = start_y - TITLE_SIZE / 2.0;
        let artist_y = title_y - TITLE_SIZE / 2.0 - LINE_SPACING - ARTIST_SIZE / 2.0;
        let year_y = artist_y - ARTIST_SIZE / 2.0 - LINE_SPACING - YEAR_SIZE / 2.0;
        let description_y = year_y - YEAR_SIZE / 2.0 - LINE_SPACING - desc_height / 2.0;

        Self {
            width: CARD_WIDTH,
            height,
            title_y,
            artist_y,
            year_y,
            description_y,
        }
    }
}

/// Builds the card subtree for a record under the scene root and returns its
/// root node. The caller places and orients the returned node.
pub fn spawn_card(scene: &mut Scene, record: &ArtworkRecord) -> NodeId {
    let layout = CardLayout::measure(&record.description);
    let card = scene.spawn(Node::new().with_name("artwork-card"));

    scene.spawn_child(
        card,
        Node::new()
            .with_geometry(Geometry::Plane {
                width: layout.width,
                height: layout.height,
            })
            .with_material(Material {
                color: [1.0, 1.0, 1.0],
                opacity: 0.95,
                ..Default::default()
            }),
    );

    let mut title = Text::new(record.title.as_str(), TITLE_SIZE);
    title.color = TITLE_COLOR;
    title.style = FontStyle::Bold;
    scene.spawn_child(
        card,
        Node::new()
            .with_position(Vector3::new(0.0, layout.title_y, TEXT_Z))
            .with_text(title),
    );

    let mut artist = Text::new(record.artist.as_str(), ARTIST_SIZE);
    artist.color = ARTIST_COLOR;
    artist.style = FontStyle::Italic;
    scene.spawn_child(
        card,
        Node::new()
            .with_position(Vector3::new(0.0, layout.artist_y, TEXT_Z))
            .with_text(artist),
    );

    let mut year = Text::new(record.year.as_str(), YEAR_SIZE);
    year.color = DETAIL_COLOR;
    scene.spawn_child(
        card,
        Node::new()
            .with_position(Vector3::new(0.0, layout.year_y, TEXT_Z))
            .with_text(year),
    );

    let mut description = Text::new(record.description.as_str(), DESC_SIZE);
    description.color = DETAIL_COLOR;
    description.wrap_count = Some(DESC_WRAP);
    scene.spawn_child(
        card,
        Node::new()
            .with_position(Vector3::new(0.0, layout.description_y, TEXT_Z))
            .with_text(description),
    );

    card
}
