//! Level state: the passive tile grid plus the active entity collection.

use std::mem::size_of;

use lily_core::input::InputState;

use crate::archetype::{ArchetypeId, ArchetypeRegistry};
use crate::collection::EntityCollection;
use crate::collision::{overlap, Terrain, SCREEN_COLUMNS, SCREEN_ROWS};
use crate::entity::Entity;
use crate::error::{CollectionError, LevelError};
use crate::game::Session;
use crate::handlers::HandlerContext;

/// Dense row-major grid of passive archetypes.
#[derive(Debug, Clone)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<ArchetypeId>,
}

impl TileGrid {
    /// An all-empty grid `width` screens wide and `height` screens tall.
    pub fn new(width: usize, height: usize) -> Result<Self, LevelError> {
        let cols = SCREEN_COLUMNS
            .checked_mul(width)
            .ok_or(LevelError::Overflow { what: "grid columns" })?;
        let rows = SCREEN_ROWS
            .checked_mul(height)
            .ok_or(LevelError::Overflow { what: "grid rows" })?;
        let len = rows
            .checked_mul(cols)
            .ok_or(LevelError::Overflow { what: "grid tile count" })?;
        let bytes = len
            .checked_mul(size_of::<ArchetypeId>())
            .ok_or(LevelError::Overflow { what: "grid byte size" })?;
        if bytes > isize::MAX as usize {
            return Err(LevelError::Overflow { what: "grid byte size" });
        }

        let mut tiles = Vec::new();
        tiles
            .try_reserve_exact(len)
            .map_err(|_| CollectionError::Allocation { requested: len })?;
        tiles.resize(len, ArchetypeId::None);
        Ok(Self { rows, cols, tiles })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> ArchetypeId {
        self.tiles[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, id: ArchetypeId) {
        let index = self.index(row, col);
        self.tiles[index] = id;
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "tile ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

#[derive(Debug)]
pub struct Level {
    width: usize,
    height: usize,
    grid: TileGrid,
    entities: EntityCollection,
    player_found: bool,
    spawn_point: (f64, f64),
}

impl Level {
    /// An empty level `width` by `height` screens, with no player yet.
    pub fn new(width: usize, height: usize) -> Result<Self, LevelError> {
        Ok(Self {
            width,
            height,
            grid: TileGrid::new(width, height)?,
            entities: EntityCollection::new()?,
            player_found: false,
            spawn_point: (0.0, 0.0),
        })
    }

    /// Width in screens.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in screens.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn entities(&self) -> &EntityCollection {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityCollection {
        &mut self.entities
    }

    pub fn has_player(&self) -> bool {
        self.player_found
    }

    /// Where the player entity was placed at load time.
    pub fn spawn_point(&self) -> (f64, f64) {
        self.spawn_point
    }

    pub fn add_entity(&mut self, entity: Entity) -> Result<(), LevelError> {
        self.entities.append(entity)?;
        Ok(())
    }

    /// Bind `entity` as this level's one player.
    pub fn add_player(&mut self, entity: Entity, row: usize, col: usize) -> Result<(), LevelError> {
        if self.player_found {
            log::error!("second player token at ({row}, {col})");
            return Err(LevelError::DuplicatePlayer { row, col });
        }
        self.spawn_point = (entity.x, entity.y);
        self.entities.append(entity)?;
        self.player_found = true;
        Ok(())
    }

    pub fn player_index(&self) -> Option<usize> {
        self.entities
            .position(|entity| entity.archetype == ArchetypeId::Player)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player_index().and_then(|index| self.entities.get(index))
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let index = self.player_index()?;
        self.entities.get_mut(index)
    }

    /// The terrain alongside a mutable borrow of the player entity.
    pub fn player_and_terrain<'a>(
        &'a mut self,
        registry: &'a ArchetypeRegistry,
    ) -> Option<(&'a mut Entity, Terrain<'a>)> {
        let index = self.player_index()?;
        let terrain = Terrain::new(&self.grid, registry);
        let player = self.entities.get_mut(index)?;
        Some((player, terrain))
    }

    /// Advance the animation of every live active entity.
    pub fn advance_animations(&mut self, dt_ms: u64) {
        for entity in self.entities.iter_mut().filter(|e| !e.removed) {
            entity.animation.advance(dt_ms);
        }
    }

    /// One pass over the active entities: frame hook, then hit hook when the
    /// entity overlaps the player, then a sweep of removed entities. The
    /// player itself is driven by the controller, not by this pass.
    pub fn update(
        &mut self,
        registry: &ArchetypeRegistry,
        session: &mut Session,
        input: &InputState,
        dt_ms: u64,
    ) -> Result<(), LevelError> {
        let player_index = self.player_index().ok_or(LevelError::MissingPlayer)?;
        let terrain = Terrain::new(&self.grid, registry);
        let mut spawns = Vec::new();

        // Entities spawned mid-pass are appended and visited in the same pass.
        let mut index = 0;
        while index < self.entities.len() {
            if index == player_index {
                index += 1;
                continue;
            }

            let (entity, player_entity) = self.entities.pair_mut(index, player_index);
            if entity.removed {
                index += 1;
                continue;
            }

            let behavior = entity.behavior;
            let mut ctx = HandlerContext {
                terrain,
                player: &mut session.player,
                player_entity,
                audio: &mut session.audio,
                message: &mut session.message,
                input,
                rng: &mut session.rng,
                state: &mut session.state,
                spawns: &mut spawns,
                dt_ms,
            };

            if let Err(err) = behavior.frame(entity, &mut ctx) {
                log::error!("frame hook failed for {:?}: {err}", entity.archetype);
                return Err(err.into());
            }

            if overlap(entity, ctx.player_entity) {
                if let Err(err) = behavior.hit(entity, &mut ctx) {
                    log::error!("hit hook failed for {:?}: {err}", entity.archetype);
                    return Err(err.into());
                }
            }

            for spawned in spawns.drain(..) {
                self.entities.append(spawned)?;
            }
            index += 1;
        }

        self.entities.sweep();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityData;
    use crate::game::ProgramState;
    use crate::test_support::{level_from_rows, registry, session};

    #[test]
    fn grid_dimensions_follow_screens() {
        let grid = TileGrid::new(3, 2).expect("grid");
        assert_eq!(grid.cols(), 60);
        assert_eq!(grid.rows(), 30);
        assert_eq!(grid.get(29, 59), ArchetypeId::None);
    }

    #[test]
    fn grid_is_row_major() {
        let mut grid = TileGrid::new(2, 1).expect("grid");
        grid.set(1, 3, ArchetypeId::Wall);
        assert_eq!(grid.tiles[40 + 3], ArchetypeId::Wall);
        assert_eq!(grid.get(1, 3), ArchetypeId::Wall);
    }

    #[test]
    fn grid_size_overflow_is_reported() {
        let err = TileGrid::new(usize::MAX, 1).expect_err("overflow");
        assert!(err.is_resource_exhaustion());
        let err = TileGrid::new(usize::MAX / 40, usize::MAX / 30).expect_err("overflow");
        assert!(matches!(err, LevelError::Overflow { .. }));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn grid_out_of_range_panics() {
        let grid = TileGrid::new(1, 1).expect("grid");
        let _ = grid.get(15, 0);
    }

    #[test]
    fn second_player_is_rejected() {
        let registry = registry();
        let mut level = level_from_rows(&registry, &["P"]);
        let mut rng = crate::test_support::rng();
        let extra = Entity::spawn(&registry, ArchetypeId::Player, &mut rng).expect("spawn");
        let err = level.add_player(extra, 3, 4).expect_err("duplicate");
        assert!(matches!(err, LevelError::DuplicatePlayer { row: 3, col: 4 }));
    }

    #[test]
    fn update_collects_touching_coin_and_sweeps_it_later() {
        let registry = registry();
        let mut level = level_from_rows(&registry, &["", "PO", "=="]);
        let mut session = session();
        let input = InputState::default();

        // Move the player onto the coin.
        level.player_mut().expect("player").x = 12.0;
        level.update(&registry, &mut session, &input, 20).expect("update");
        assert_eq!(session.player.coins, 1);
        assert_eq!(level.entities().len(), 2);

        // Fades out over 150 ms, then is swept.
        for _ in 0..10 {
            level.update(&registry, &mut session, &input, 20).expect("update");
        }
        assert_eq!(level.entities().len(), 1);
        assert_eq!(session.player.coins, 1);
        assert_eq!(session.state, ProgramState::GameIn);
    }

    #[test]
    fn update_skips_removed_entities() {
        let registry = registry();
        let mut level = level_from_rows(&registry, &["", "PO", "=="]);
        let mut session = session();
        let input = InputState::default();
        level.player_mut().expect("player").x = 12.0;
        for entity in level.entities_mut().iter_mut() {
            if entity.archetype == ArchetypeId::Coin {
                entity.removed = true;
            }
        }
        level.update(&registry, &mut session, &input, 20).expect("update");
        assert_eq!(session.player.coins, 0);
        assert_eq!(level.entities().len(), 1);
    }

    #[test]
    fn update_propagates_handler_failure() {
        let registry = registry();
        let mut level = level_from_rows(&registry, &["", "P O", "==="]);
        let mut session = session();
        for entity in level.entities_mut().iter_mut() {
            if entity.archetype == ArchetypeId::Coin {
                entity.data = EntityData::None;
            }
        }
        level.player_mut().expect("player").x = 28.0;
        let err = level
            .update(&registry, &mut session, &InputState::default(), 20)
            .expect_err("payload mismatch");
        assert!(matches!(err, LevelError::Handler(_)));
    }

    #[test]
    fn advance_animations_skips_removed() {
        let registry = registry();
        let mut level = level_from_rows(&registry, &["", "P  ~~", "==="]);
        let waters: Vec<usize> = level
            .entities()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.archetype == ArchetypeId::WaterTop)
            .map(|(i, _)| i)
            .collect();
        level.entities_mut().get_mut(waters[1]).expect("water").removed = true;

        level.advance_animations(250);

        assert_eq!(level.entities().get(waters[0]).expect("water").animation.frame, 1);
        assert_eq!(level.entities().get(waters[1]).expect("water").animation.frame, 0);
    }

    #[test]
    fn dropping_a_level_destroys_every_entity() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::handlers::Behavior;

        #[derive(Debug)]
        struct CountDestroys(AtomicUsize);

        impl Behavior for CountDestroys {
            fn destroy(&self, _entity: &mut Entity) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        static DESTROYED: CountDestroys = CountDestroys(AtomicUsize::new(0));
        let registry = registry();
        let mut level = level_from_rows(&registry, &["", "P OO", "===="]);
        assert_eq!(level.entities().len(), 3);
        for entity in level.entities_mut().iter_mut() {
            entity.behavior = &DESTROYED;
        }

        drop(level);
        assert_eq!(DESTROYED.0.load(Ordering::SeqCst), 3);
    }
}
