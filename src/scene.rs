//! Scene layout and the typed registry resolved from it
//!
//! A `SceneDescription` is the authored layout: a flat list of named nodes.
//! `resolve` looks every required node up once, checks it has the expected
//! kind, and produces a `SceneRegistry` that a `Simulation` is built from.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SceneError};
use crate::sim::ColliderTag;

pub const HERO: &str = "hero";
pub const SCROLL_LAYER: &str = "scrollLayer";
pub const OBSTACLE_LAYER: &str = "obstacleLayer";
pub const SCORE_LABEL: &str = "scoreLabel";
pub const RESTART_BUTTON: &str = "restartButton";

/// Player body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroDesc {
    /// Scene-space position
    pub position: Vec2,
    pub size: Vec2,
    pub mass: f32,
    pub moment_of_inertia: f32,
}

/// One background segment, positioned in scroll-layer space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDesc {
    pub position: Vec2,
    pub size: Vec2,
}

/// One collider of the obstacle prototype, relative to the obstacle origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDesc {
    pub offset: Vec2,
    pub size: Vec2,
    pub tag: ColliderTag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    pub parts: Vec<PartDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayerDesc {
    pub position: Vec2,
    pub tiles: Vec<TileDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleLayerDesc {
    pub position: Vec2,
    pub template: ObstacleTemplate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Hero(HeroDesc),
    ScrollLayer(ScrollLayerDesc),
    ObstacleLayer(ObstacleLayerDesc),
    ScoreLabel,
    RestartButton,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDesc {
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Authored scene: size plus named nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub size: Vec2,
    pub nodes: Vec<NodeDesc>,
}

/// Stock layout: 320x568 portrait scene, two screen-wide ground tiles,
/// and an obstacle made of two pipes around a 120 unit goal gap.
impl Default for SceneDescription {
    fn default() -> Self {
        let pipe = Vec2::new(52.0, 400.0);
        let gap = 120.0;
        let pipe_offset = gap / 2.0 + pipe.y / 2.0;
        let ground = Vec2::new(320.0, 90.0);

        let node = |name: &str, kind| NodeDesc {
            name: name.to_string(),
            kind,
        };

        Self {
            size: Vec2::new(320.0, 568.0),
            nodes: vec![
                node(
                    SCROLL_LAYER,
                    NodeKind::ScrollLayer(ScrollLayerDesc {
                        position: Vec2::ZERO,
                        tiles: vec![
                            TileDesc {
                                position: Vec2::new(ground.x / 2.0, ground.y / 2.0),
                                size: ground,
                            },
                            TileDesc {
                                position: Vec2::new(ground.x * 1.5, ground.y / 2.0),
                                size: ground,
                            },
                        ],
                    }),
                ),
                node(
                    OBSTACLE_LAYER,
                    NodeKind::ObstacleLayer(ObstacleLayerDesc {
                        position: Vec2::ZERO,
                        template: ObstacleTemplate {
                            parts: vec![
                                PartDesc {
                                    offset: Vec2::new(0.0, pipe_offset),
                                    size: pipe,
                                    tag: ColliderTag::Obstacle,
                                },
                                PartDesc {
                                    offset: Vec2::new(0.0, -pipe_offset),
                                    size: pipe,
                                    tag: ColliderTag::Obstacle,
                                },
                                PartDesc {
                                    offset: Vec2::ZERO,
                                    size: Vec2::new(10.0, gap),
                                    tag: ColliderTag::Goal,
                                },
                            ],
                        },
                    }),
                ),
                node(
                    HERO,
                    NodeKind::Hero(HeroDesc {
                        position: Vec2::new(80.0, 300.0),
                        size: Vec2::new(30.0, 30.0),
                        mass: 0.5,
                        moment_of_inertia: 0.05,
                    }),
                ),
                node(SCORE_LABEL, NodeKind::ScoreLabel),
                node(RESTART_BUTTON, NodeKind::RestartButton),
            ],
        }
    }
}

impl SceneDescription {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Look up the single node with `name`
    fn find(&self, name: &'static str) -> Result<&NodeKind, SceneError> {
        let mut matches = self.nodes.iter().filter(|n| n.name == name);
        let node = matches.next().ok_or(SceneError::MissingNode(name))?;
        if matches.next().is_some() {
            return Err(SceneError::DuplicateNode(name));
        }
        Ok(&node.kind)
    }

    /// Resolve every node the game needs into typed references
    pub fn resolve(&self) -> Result<SceneRegistry, SceneError> {
        let hero = match self.find(HERO)? {
            NodeKind::Hero(hero) => hero.clone(),
            _ => return Err(SceneError::WrongKind(HERO)),
        };
        let scroll_layer = match self.find(SCROLL_LAYER)? {
            NodeKind::ScrollLayer(layer) => layer.clone(),
            _ => return Err(SceneError::WrongKind(SCROLL_LAYER)),
        };
        let obstacle_layer = match self.find(OBSTACLE_LAYER)? {
            NodeKind::ObstacleLayer(layer) => layer.clone(),
            _ => return Err(SceneError::WrongKind(OBSTACLE_LAYER)),
        };
        if !matches!(self.find(SCORE_LABEL)?, NodeKind::ScoreLabel) {
            return Err(SceneError::WrongKind(SCORE_LABEL));
        }
        if !matches!(self.find(RESTART_BUTTON)?, NodeKind::RestartButton) {
            return Err(SceneError::WrongKind(RESTART_BUTTON));
        }

        if scroll_layer.tiles.is_empty() {
            return Err(SceneError::EmptyScrollLayer);
        }
        let tiles = &scroll_layer.tiles;
        let strip: f32 = tiles.iter().map(|t| t.size.x).sum();
        let widest = tiles.iter().map(|t| t.size.x).fold(0.0, f32::max);
        if strip < self.size.x + widest {
            return Err(SceneError::ScrollLayerTooNarrow);
        }
        let parts = &obstacle_layer.template.parts;
        if parts.is_empty() {
            return Err(SceneError::EmptyObstacleTemplate);
        }
        if !parts.iter().any(|p| p.tag == ColliderTag::Goal) {
            return Err(SceneError::MissingGoal);
        }

        Ok(SceneRegistry {
            size: self.size,
            hero,
            scroll_layer,
            obstacle_layer,
        })
    }
}

/// Typed handles to every entity a run needs, resolved once
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRegistry {
    pub size: Vec2,
    pub hero: HeroDesc,
    pub scroll_layer: ScrollLayerDesc,
    pub obstacle_layer: ObstacleLayerDesc,
}
