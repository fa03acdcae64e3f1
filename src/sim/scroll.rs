//! Layer coordinate spaces and background recycling
//!
//! The background is a small ring of tiles. The layer slides left every step;
//! a tile whose right edge has crossed the left border of the screen is moved
//! to sit after the rightmost one, so the ground never runs out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EntityId, GameEvent, IdAllocator};
use crate::scene::ScrollLayerDesc;

/// A translated container node. Children are positioned in layer space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer origin in scene space
    pub position: Vec2,
}

impl Layer {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    /// Layer-local point to scene space
    #[inline]
    pub fn to_scene(&self, local: Vec2) -> Vec2 {
        local + self.position
    }

    /// Scene point to layer-local space
    #[inline]
    pub fn to_local(&self, scene: Vec2) -> Vec2 {
        scene - self.position
    }

    /// Slide the layer left by `distance`
    #[inline]
    pub fn scroll(&mut self, distance: f32) {
        self.position.x -= distance;
    }
}

/// One background segment, centred on `position` (layer space)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollTile {
    pub id: EntityId,
    pub position: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldScroller {
    pub layer: Layer,
    pub tiles: Vec<ScrollTile>,
}

impl WorldScroller {
    pub fn new(desc: &ScrollLayerDesc, ids: &mut IdAllocator) -> Self {
        Self {
            layer: Layer::new(desc.position),
            tiles: desc
                .tiles
                .iter()
                .map(|t| ScrollTile {
                    id: ids.next(),
                    position: t.position,
                    size: t.size,
                })
                .collect(),
        }
    }

    pub fn fixed_step(&mut self, dt: f32, scroll_speed: f32, events: &mut Vec<GameEvent>) {
        self.layer.scroll(scroll_speed * dt);

        for i in 0..self.tiles.len() {
            let scene_pos = self.layer.to_scene(self.tiles[i].position);
            let width = self.tiles[i].size.x;
            if scene_pos.x <= -width / 2.0 {
                // flush against the rightmost tile, in layer space
                let right_edge = self.right_edge();
                let tile = &mut self.tiles[i];
                tile.position.x = right_edge + width / 2.0;
                log::trace!(
                    "Tile {:?} recycled to x={}",
                    tile.id,
                    self.layer.to_scene(tile.position).x
                );
                events.push(GameEvent::TileRecycled(tile.id));
            }
        }
    }

    /// Right edge of the rightmost tile, in layer space
    fn right_edge(&self) -> f32 {
        self.tiles
            .iter()
            .map(|t| t.position.x + t.size.x / 2.0)
            .fold(f32::MIN, f32::max)
    }

    /// Scene-space centre of every tile
    pub fn tile_scene_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.tiles.iter().map(|t| self.layer.to_scene(t.position))
    }
}
