//! Fixtures shared by the unit tests.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lily_core::input::InputState;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::archetype::{ArchetypeId, ArchetypeRegistry};
use crate::catalog::CUSTOM_TOKENS;
use crate::collision::{Terrain, SCREEN_COLUMNS, SCREEN_ROWS};
use crate::entity::Entity;
use crate::error::HandlerError;
use crate::game::{ProgramState, Session};
use crate::handlers::HandlerContext;
use crate::level::{Level, TileGrid};
use crate::token::{self, Placement};

pub const TEST_SEED: u64 = 0x5eed;

pub fn registry() -> ArchetypeRegistry {
    ArchetypeRegistry::standard()
}

pub fn rng() -> Pcg32 {
    Pcg32::seed_from_u64(TEST_SEED)
}

pub fn session() -> Session {
    let mut session = Session::new(TEST_SEED, true);
    session.state = ProgramState::GameIn;
    session
}

pub fn entity_at(registry: &ArchetypeRegistry, id: ArchetypeId, x: f64, y: f64) -> Entity {
    let mut entity = Entity::spawn(registry, id, &mut rng()).expect("spawn");
    entity.x = x;
    entity.y = y;
    entity
}

/// One screen of text, each row padded with blanks to full width.
fn screen_text(rows: &[&str]) -> Vec<u8> {
    assert!(rows.len() <= SCREEN_ROWS, "too many rows");
    let mut text = Vec::with_capacity(SCREEN_ROWS * SCREEN_COLUMNS);
    for row in 0..SCREEN_ROWS {
        let line = rows.get(row).copied().unwrap_or("");
        assert!(line.len() <= SCREEN_COLUMNS, "row {row} too long");
        text.extend_from_slice(line.as_bytes());
        text.resize((row + 1) * SCREEN_COLUMNS, b' ');
    }
    text
}

/// A one-screen grid holding the passive tokens of `rows`; active tokens
/// are ignored.
pub fn grid_from_rows(rows: &[&str]) -> TileGrid {
    let text = screen_text(rows);
    let mut grid = TileGrid::new(1, 1).expect("grid");
    for (index, byte) in text.iter().enumerate() {
        let token = CUSTOM_TOKENS
            .iter()
            .find(|t| t.symbol == *byte)
            .unwrap_or_else(|| panic!("unknown token {:?}", *byte as char));
        if token.placement == Placement::Passive {
            grid.set(index / SCREEN_COLUMNS, index % SCREEN_COLUMNS, token.archetype);
        }
    }
    grid
}

/// A one-screen level read with the custom token table. Must contain `P`.
pub fn level_from_rows(registry: &ArchetypeRegistry, rows: &[&str]) -> Level {
    token::populate(registry, &screen_text(rows), 1, 1, CUSTOM_TOKENS, &mut rng())
        .expect("level")
}

pub fn temp_file_path(name_hint: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "lily_test_{}_{}_{}",
        name_hint,
        std::process::id(),
        nanos
    ))
}

/// A session and a free-standing player entity for driving single hooks.
pub struct Harness<'r> {
    pub registry: &'r ArchetypeRegistry,
    pub session: Session,
    pub player_entity: Entity,
    pub input: InputState,
    pub spawns: Vec<Entity>,
    pub dt_ms: u64,
}

impl<'r> Harness<'r> {
    pub fn new(registry: &'r ArchetypeRegistry, x: f64, y: f64) -> Self {
        let mut session = session();
        session.player.set_respawn(x, y);
        Self {
            registry,
            session,
            player_entity: entity_at(registry, ArchetypeId::Player, x, y),
            input: InputState::default(),
            spawns: Vec::new(),
            dt_ms: 20,
        }
    }

    pub fn context<'a>(&'a mut self, grid: &'a TileGrid) -> HandlerContext<'a> {
        HandlerContext {
            terrain: Terrain::new(grid, self.registry),
            player: &mut self.session.player,
            player_entity: &mut self.player_entity,
            audio: &mut self.session.audio,
            message: &mut self.session.message,
            input: &self.input,
            rng: &mut self.session.rng,
            state: &mut self.session.state,
            spawns: &mut self.spawns,
            dt_ms: self.dt_ms,
        }
    }

    pub fn frame(&mut self, grid: &TileGrid, entity: &mut Entity) -> Result<(), HandlerError> {
        let behavior = entity.behavior;
        behavior.frame(entity, &mut self.context(grid))
    }

    pub fn hit(&mut self, grid: &TileGrid, entity: &mut Entity) -> Result<(), HandlerError> {
        let behavior = entity.behavior;
        behavior.hit(entity, &mut self.context(grid))
    }
}
