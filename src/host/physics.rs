//! Minimal physics engine stand-in
//!
//! Just enough to run the game headless: gravity on the hero, rotation
//! integration, resting on the ground, and contact-begin detection between
//! the hero and every tagged collider.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::{Body, ColliderTag, Contact, EntityId, Simulation};

/// Axis-aligned box in scene space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    pub gravity: Vec2,
    /// Colliders overlapping the hero after the last step
    touching: HashSet<EntityId>,
}

impl PhysicsWorld {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity: Vec2::new(0.0, gravity),
            touching: HashSet::new(),
        }
    }

    /// Integrate the hero and report contacts that began this step
    pub fn step(&mut self, state: &mut Simulation, dt: f32) -> Vec<Contact> {
        let colliders = Self::colliders(state);
        let hero = &mut state.hero;

        hero.body.velocity += self.gravity * dt;
        hero.position += hero.body.velocity * dt;
        if hero.body.allows_rotation {
            hero.rotation += hero.body.angular_velocity * dt;
        }

        let hero_body = Body {
            id: hero.id,
            tag: None,
        };
        let hero_box = Aabb::from_center(hero.position, hero.size);

        let mut touching = HashSet::new();
        let mut begun = Vec::new();
        let mut floor: Option<f32> = None;

        for (id, tag, bounds) in colliders {
            if !hero_box.overlaps(&bounds) {
                continue;
            }
            touching.insert(id);
            if !self.touching.contains(&id) {
                begun.push(Contact {
                    a: hero_body,
                    b: Body { id, tag: Some(tag) },
                });
            }
            if tag == ColliderTag::Ground {
                floor = Some(floor.map_or(bounds.max.y, |f| f.max(bounds.max.y)));
            }
        }

        // ground is solid
        if let Some(top) = floor {
            if hero.body.velocity.y <= 0.0 {
                hero.position.y = top + hero.size.y / 2.0;
                hero.body.velocity.y = 0.0;
            }
        }

        self.touching = touching;
        begun
    }

    fn colliders(state: &Simulation) -> Vec<(EntityId, ColliderTag, Aabb)> {
        let scroller = &state.scroller;
        let ground = scroller.tiles.iter().map(|tile| {
            let center = scroller.layer.to_scene(tile.position);
            (tile.id, ColliderTag::Ground, Aabb::from_center(center, tile.size))
        });

        let spawner = &state.spawner;
        let parts = spawner.obstacles.iter().flat_map(|obstacle| {
            let origin = spawner.scene_position(obstacle);
            obstacle.parts.iter().map(move |part| {
                (
                    part.id,
                    part.tag,
                    Aabb::from_center(origin + part.offset, part.size),
                )
            })
        });

        ground.chain(parts).collect()
    }
}
