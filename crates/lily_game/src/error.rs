use std::path::PathBuf;

use crate::archetype::ArchetypeId;

/// Growth of the entity collection failed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("entity collection capacity overflow doubling {capacity}")]
    CapacityOverflow { capacity: usize },
    #[error("entity collection could not reserve room for {requested} entities")]
    Allocation { requested: usize },
}

/// A behavior hook reported failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("{archetype:?} entity carries no {expected} payload")]
    PayloadMismatch {
        archetype: ArchetypeId,
        expected: &'static str,
    },
    #[error("{archetype:?} is not a collectable item")]
    NotAnItem { archetype: ArchetypeId },
}

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level string too small: expected {expected} tiles, got {actual}")]
    Undersized { expected: usize, actual: usize },
    #[error("level string too large: expected {expected} tiles, got {actual}")]
    Oversized { expected: usize, actual: usize },
    #[error("level width {width} is not a positive multiple of {columns}")]
    BadWidth { width: usize, columns: usize },
    #[error("level has {lines} lines, expected a multiple of {rows} (last line must not end with a newline)")]
    BadHeight { lines: usize, rows: usize },
    #[error("first line of level not found")]
    MissingFirstLine,
    #[error("unrecognized token {token:?} at row {row}, column {col}")]
    UnknownToken { token: char, row: usize, col: usize },
    #[error("second player token at row {row}, column {col}")]
    DuplicatePlayer { row: usize, col: usize },
    #[error("level has no player token")]
    MissingPlayer,
    #[error("arithmetic overflow computing {what}")]
    Overflow { what: &'static str },
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error("handler failed: {0}")]
    Handler(#[from] HandlerError),
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LevelError {
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, Self::Undersized { .. } | Self::Oversized { .. })
    }

    /// True for allocation and overflow failures, false for malformed data.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, Self::Overflow { .. } | Self::Collection(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("failed to load level {path}: {source}")]
    LevelLoad {
        path: PathBuf,
        #[source]
        source: LevelError,
    },
    #[error("level update failed: {0}")]
    Update(#[from] LevelError),
    #[error("no level is loaded")]
    NoLevel,
}
