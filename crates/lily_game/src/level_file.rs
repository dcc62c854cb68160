//! Level files: newline-separated rows of tile tokens.
//!
//! The first line's length fixes the width (a multiple of one screen), the
//! total line count fixes the height. The last line has no trailing newline.

use std::fs;
use std::path::Path;

use rand_pcg::Pcg32;

use crate::archetype::ArchetypeRegistry;
use crate::collision::{SCREEN_COLUMNS, SCREEN_ROWS};
use crate::error::LevelError;
use crate::level::Level;
use crate::token::{self, Token};

/// Tile bytes with the newlines stripped, plus the size in screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelText {
    pub tiles: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

pub fn parse_level_text(raw: &[u8]) -> Result<LevelText, LevelError> {
    let mut tiles = Vec::with_capacity(raw.len());
    let mut width = None;
    let mut lines = 0usize;

    for &byte in raw {
        if byte != b'\n' {
            tiles.push(byte);
            continue;
        }
        lines += 1;
        if width.is_none() {
            let chars = tiles.len();
            if chars == 0 || chars % SCREEN_COLUMNS != 0 {
                return Err(LevelError::BadWidth {
                    width: chars,
                    columns: SCREEN_COLUMNS,
                });
            }
            width = Some(chars / SCREEN_COLUMNS);
        }
    }

    let width = width.ok_or(LevelError::MissingFirstLine)?;
    // The last line has no newline of its own.
    lines += 1;
    if lines % SCREEN_ROWS != 0 {
        return Err(LevelError::BadHeight {
            lines,
            rows: SCREEN_ROWS,
        });
    }

    Ok(LevelText {
        tiles,
        width,
        height: lines / SCREEN_ROWS,
    })
}

pub fn read_level_file(path: &Path) -> Result<LevelText, LevelError> {
    let raw = fs::read(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = parse_level_text(&raw).inspect_err(|err| {
        log::error!("rejected level file {}: {err}", path.display());
    })?;
    log::debug!(
        "read level file {} [w = {}, h = {}]",
        path.display(),
        text.width,
        text.height
    );
    Ok(text)
}

/// Read and populate a level file with the given token table.
pub fn load_level_from_path(
    registry: &ArchetypeRegistry,
    path: &Path,
    tokens: &[Token],
    rng: &mut Pcg32,
) -> Result<Level, LevelError> {
    let text = read_level_file(path)?;
    token::populate(registry, &text.tiles, text.width, text.height, tokens, rng)
}
