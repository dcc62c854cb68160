//! Active entity instances and their archetype-specific payloads.

use lily_core::animation::SpriteAnimation;
use lily_core::time::Timer;
use rand_pcg::Pcg32;

use crate::archetype::{ArchetypeId, ArchetypeRegistry, Rect};
use crate::collision::TILE_SIZE;
use crate::error::HandlerError;
use crate::handlers::Behavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemData {
    pub collected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyData {
    pub direction: Direction,
    pub alive: bool,
    /// Runs once the enemy is squished; the corpse is removed when it expires.
    pub remove_timer: Timer,
    pub shoot_timer: Option<Timer>,
}

/// Cooldown shared by helpers (between interactions) and springs (how long
/// the compressed look is held).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperData {
    pub interaction_timer: Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityData {
    #[default]
    None,
    Item(ItemData),
    Enemy(EnemyData),
    Helper(HelperData),
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub archetype: ArchetypeId,
    /// Hit-box copied from the archetype at spawn time.
    pub body: Rect,
    pub behavior: &'static dyn Behavior,
    pub animation: SpriteAnimation,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Pending destruction; swept at the end of the update pass.
    pub removed: bool,
    pub data: EntityData,
}

impl Entity {
    /// Create an entity of archetype `id` at the origin and run its init hook.
    pub fn spawn(
        registry: &ArchetypeRegistry,
        id: ArchetypeId,
        rng: &mut Pcg32,
    ) -> Result<Self, HandlerError> {
        let archetype = registry.get(id);
        let mut entity = Self {
            archetype: id,
            body: archetype.body,
            behavior: archetype.behavior,
            animation: SpriteAnimation::default(),
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            removed: false,
            data: EntityData::None,
        };
        entity.animation.set_frame(0, 0, 0);

        if let Err(err) = archetype.behavior.init(&mut entity, rng) {
            log::error!("failed to initialize entity {id:?}: {err}");
            return Err(err);
        }
        Ok(entity)
    }

    /// Move to the top-left corner of grid cell `(row, col)`.
    pub fn place(&mut self, row: usize, col: usize) {
        self.x = (TILE_SIZE as usize * col) as f64;
        self.y = (TILE_SIZE as usize * row) as f64;
    }

    pub fn item_mut(&mut self) -> Result<&mut ItemData, HandlerError> {
        let archetype = self.archetype;
        match &mut self.data {
            EntityData::Item(item) => Ok(item),
            _ => Err(HandlerError::PayloadMismatch {
                archetype,
                expected: "item",
            }),
        }
    }

    pub fn enemy_mut(&mut self) -> Result<&mut EnemyData, HandlerError> {
        let archetype = self.archetype;
        match &mut self.data {
            EntityData::Enemy(enemy) => Ok(enemy),
            _ => Err(HandlerError::PayloadMismatch {
                archetype,
                expected: "enemy",
            }),
        }
    }

    pub fn helper_mut(&mut self) -> Result<&mut HelperData, HandlerError> {
        let archetype = self.archetype;
        match &mut self.data {
            EntityData::Helper(helper) => Ok(helper),
            _ => Err(HandlerError::PayloadMismatch {
                archetype,
                expected: "helper",
            }),
        }
    }
}
