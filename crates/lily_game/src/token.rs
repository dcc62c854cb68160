//! Level tokenizer: turns a flat tile string into a populated [`Level`].

use rand_pcg::Pcg32;

use crate::archetype::{ArchetypeId, ArchetypeRegistry};
use crate::collision::{SCREEN_COLUMNS, SCREEN_ROWS, SCREEN_TILES};
use crate::entity::Entity;
use crate::error::LevelError;
use crate::level::Level;

/// What a token puts into the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Leaves the cell empty.
    Empty,
    /// Writes the archetype into the tile grid.
    Passive,
    /// Spawns an entity of the archetype.
    Active,
    /// Spawns the level's one player entity.
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub symbol: u8,
    pub archetype: ArchetypeId,
    pub placement: Placement,
}

impl Token {
    pub const fn empty(symbol: u8) -> Self {
        Self {
            symbol,
            archetype: ArchetypeId::None,
            placement: Placement::Empty,
        }
    }

    pub const fn passive(symbol: u8, archetype: ArchetypeId) -> Self {
        Self {
            symbol,
            archetype,
            placement: Placement::Passive,
        }
    }

    pub const fn active(symbol: u8, archetype: ArchetypeId) -> Self {
        Self {
            symbol,
            archetype,
            placement: Placement::Active,
        }
    }

    pub const fn player(symbol: u8) -> Self {
        Self {
            symbol,
            archetype: ArchetypeId::Player,
            placement: Placement::Player,
        }
    }
}

/// Direct-address table from byte to token. Later entries win.
fn lookup_table(tokens: &[Token]) -> [Option<Token>; 256] {
    let mut table = [None; 256];
    for token in tokens {
        table[token.symbol as usize] = Some(*token);
    }
    table
}

/// Tiles a level of `width` by `height` screens must contain.
pub fn expected_len(width: usize, height: usize) -> Result<usize, LevelError> {
    SCREEN_TILES
        .checked_mul(width)
        .and_then(|tiles| tiles.checked_mul(height))
        .ok_or(LevelError::Overflow {
            what: "level tile count",
        })
}

/// Build a level from `text`, one byte per tile in row-major order.
///
/// A NUL byte ends the text early, as if the string stopped there.
pub fn populate(
    registry: &ArchetypeRegistry,
    text: &[u8],
    width: usize,
    height: usize,
    tokens: &[Token],
    rng: &mut Pcg32,
) -> Result<Level, LevelError> {
    let expected = expected_len(width, height)?;
    let actual = text.iter().position(|&b| b == 0).unwrap_or(text.len());
    if actual < expected {
        log::error!("level string too small: {actual} of {expected} tiles");
        return Err(LevelError::Undersized { expected, actual });
    }
    if actual > expected {
        log::error!("level string too large: {actual} of {expected} tiles");
        return Err(LevelError::Oversized { expected, actual });
    }

    let cols = SCREEN_COLUMNS
        .checked_mul(width)
        .ok_or(LevelError::Overflow { what: "level columns" })?;
    let rows = SCREEN_ROWS
        .checked_mul(height)
        .ok_or(LevelError::Overflow { what: "level rows" })?;

    let table = lookup_table(tokens);
    let mut level = Level::new(width, height)?;

    for row in 0..rows {
        for col in 0..cols {
            let byte = text[row * cols + col];
            let Some(token) = table[byte as usize] else {
                log::error!("unrecognized token {:?} at ({row}, {col})", byte as char);
                return Err(LevelError::UnknownToken {
                    token: byte as char,
                    row,
                    col,
                });
            };

            match token.placement {
                Placement::Empty => {}
                Placement::Passive => level.grid_mut().set(row, col, token.archetype),
                Placement::Active => {
                    let mut entity = Entity::spawn(registry, token.archetype, rng)?;
                    entity.place(row, col);
                    level.add_entity(entity)?;
                }
                Placement::Player => {
                    let mut entity = Entity::spawn(registry, token.archetype, rng)?;
                    entity.place(row, col);
                    level.add_player(entity, row, col)?;
                }
            }
        }
    }

    if !level.has_player() {
        log::error!("level has no player token");
        return Err(LevelError::MissingPlayer);
    }

    level.entities_mut().sort_by_depth();
    log::info!(
        "level populated: {width}x{height} screens, {} entities",
        level.entities().len()
    );
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CUSTOM_TOKENS;
    use crate::test_support::{registry, rng};

    fn blank(width: usize, height: usize) -> Vec<u8> {
        vec![b' '; SCREEN_TILES * width * height]
    }

    fn with_player(width: usize, height: usize) -> Vec<u8> {
        let mut text = blank(width, height);
        text[0] = b'P';
        text
    }

    #[test]
    fn loads_multi_screen_level() {
        let registry = registry();
        let mut text = with_player(2, 3);
        let cols = SCREEN_COLUMNS * 2;
        text[5 * cols + 30] = b'=';
        text[7 * cols + 1] = b'O';

        let level = populate(&registry, &text, 2, 3, CUSTOM_TOKENS, &mut rng()).expect("level");

        assert_eq!(level.grid().cols(), 40);
        assert_eq!(level.grid().rows(), 45);
        assert_eq!(level.grid().get(5, 30), ArchetypeId::WallTop);
        assert_eq!(level.entities().len(), 2);
        assert_eq!(level.spawn_point(), (0.0, 0.0));
        let coin = level.entities().get(0).expect("coin");
        assert_eq!(coin.archetype, ArchetypeId::Coin);
        assert_eq!((coin.x, coin.y), (16.0, 112.0));
    }

    #[test]
    fn rejects_wrong_lengths() {
        let registry = registry();
        let mut short = with_player(1, 1);
        short.pop();
        let err = populate(&registry, &short, 1, 1, CUSTOM_TOKENS, &mut rng()).expect_err("short");
        assert!(matches!(err, LevelError::Undersized { expected: 300, actual: 299 }));

        let mut long = with_player(1, 1);
        long.push(b' ');
        let err = populate(&registry, &long, 1, 1, CUSTOM_TOKENS, &mut rng()).expect_err("long");
        assert!(matches!(err, LevelError::Oversized { expected: 300, actual: 301 }));
        assert!(err.is_size_mismatch());
    }

    #[test]
    fn embedded_nul_ends_the_string() {
        let registry = registry();
        let mut text = with_player(1, 1);
        text[150] = 0;
        let err = populate(&registry, &text, 1, 1, CUSTOM_TOKENS, &mut rng()).expect_err("nul");
        assert!(matches!(err, LevelError::Undersized { actual: 150, .. }));

        // A terminator right at the end is fine.
        let mut text = with_player(1, 1);
        text.push(0);
        assert!(populate(&registry, &text, 1, 1, CUSTOM_TOKENS, &mut rng()).is_ok());
    }

    #[test]
    fn names_unknown_token() {
        let registry = registry();
        let mut text = with_player(1, 1);
        text[2 * SCREEN_COLUMNS + 7] = b'?';
        let err = populate(&registry, &text, 1, 1, CUSTOM_TOKENS, &mut rng()).expect_err("token");
        assert!(matches!(err, LevelError::UnknownToken { token: '?', row: 2, col: 7 }));
        assert!(!err.is_resource_exhaustion());
    }

    #[test]
    fn requires_exactly_one_player() {
        let registry = registry();
        let err = populate(&registry, &blank(1, 1), 1, 1, CUSTOM_TOKENS, &mut rng())
            .expect_err("missing");
        assert!(matches!(err, LevelError::MissingPlayer));

        let mut text = with_player(1, 1);
        text[SCREEN_COLUMNS + 3] = b'P';
        let err = populate(&registry, &text, 1, 1, CUSTOM_TOKENS, &mut rng()).expect_err("twice");
        assert!(matches!(err, LevelError::DuplicatePlayer { row: 1, col: 3 }));
    }

    #[test]
    fn oversized_dimensions_overflow() {
        let registry = registry();
        let err = populate(&registry, b"P", usize::MAX, 2, CUSTOM_TOKENS, &mut rng())
            .expect_err("overflow");
        assert!(matches!(err, LevelError::Overflow { .. }));
        assert!(err.is_resource_exhaustion());
    }

    #[test]
    fn entities_come_out_depth_sorted() {
        let registry = registry();
        let mut text = with_player(1, 1);
        text[10] = b'~';
        text[11] = b'X';
        text[12] = b's';
        let level = populate(&registry, &text, 1, 1, CUSTOM_TOKENS, &mut rng()).expect("level");
        let ids: Vec<ArchetypeId> = level.entities().iter().map(|e| e.archetype).collect();
        assert_eq!(
            ids,
            vec![
                ArchetypeId::Spring,
                ArchetypeId::Spider,
                ArchetypeId::Player,
                ArchetypeId::WaterTop,
            ]
        );
    }

    #[test]
    fn later_table_entries_override_earlier() {
        let tokens = [
            Token::passive(b'x', ArchetypeId::Wall),
            Token::passive(b'x', ArchetypeId::Ground),
        ];
        let table = lookup_table(&tokens);
        assert_eq!(table[b'x' as usize].map(|t| t.archetype), Some(ArchetypeId::Ground));
        assert!(table[b'y' as usize].is_none());
    }
}
