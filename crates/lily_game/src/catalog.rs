//! The default level sequence and the token table each level is read with.

use std::path::{Path, PathBuf};

use crate::archetype::ArchetypeId as Id;
use crate::token::Token;

pub struct LevelEntry {
    pub name: &'static str,
    pub file_name: &'static str,
    pub tokens: &'static [Token],
}

impl LevelEntry {
    pub fn path(&self, levels_dir: &Path) -> PathBuf {
        levels_dir.join(self.file_name)
    }
}

/// Read with every active and passive archetype a level author may place.
pub const CUSTOM_TOKENS: &[Token] = &[
    Token::active(b'~', Id::WaterTop),
    Token::passive(b'`', Id::Water),
    Token::passive(b'L', Id::Ladder),
    Token::active(b'p', Id::Platform),
    Token::passive(b'=', Id::WallTop),
    Token::passive(b'*', Id::Wall),
    Token::passive(b'-', Id::GroundTop),
    Token::passive(b'g', Id::Grass),
    Token::passive(b'_', Id::Ground),
    Token::active(b's', Id::Spider),
    Token::active(b'O', Id::Coin),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::active(b'S', Id::SprintingSpider),
    Token::active(b'G', Id::Ghost),
    Token::active(b'E', Id::ExtraLife),
    Token::active(b'X', Id::Spring),
    Token::active(b'k', Id::Skeleton),
    Token::passive(b'^', Id::RustWallTop),
    Token::passive(b'#', Id::RustWall),
    Token::active(b'b', Id::Bat),
    Token::empty(b' '),
];

const SMALL: &[Token] = &[
    Token::active(b'~', Id::WaterTop),
    Token::active(b'h', Id::CatHelper),
    Token::active(b'H', Id::Helper),
    Token::passive(b'=', Id::WallTop),
    Token::passive(b'*', Id::Wall),
    Token::passive(b'-', Id::GroundTop),
    Token::passive(b'g', Id::Grass),
    Token::passive(b'_', Id::Ground),
    Token::active(b's', Id::Spider),
    Token::active(b'O', Id::Coin),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::empty(b' '),
];

const WALL: &[Token] = &[
    Token::active(b'H', Id::LadderHelper),
    Token::active(b'~', Id::WaterTop),
    Token::passive(b'`', Id::Water),
    Token::passive(b'=', Id::WallTop),
    Token::passive(b'*', Id::Wall),
    Token::passive(b'L', Id::Ladder),
    Token::active(b's', Id::Spider),
    Token::active(b'O', Id::Coin),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::empty(b' '),
];

const GROUND: &[Token] = &[
    Token::active(b'~', Id::WaterTop),
    Token::passive(b'`', Id::Water),
    Token::passive(b'=', Id::WallTop),
    Token::passive(b'*', Id::Wall),
    Token::passive(b'-', Id::GroundTop),
    Token::passive(b'g', Id::Grass),
    Token::passive(b'_', Id::Ground),
    Token::active(b's', Id::SprintingSpider),
    Token::active(b'O', Id::Coin),
    Token::active(b'E', Id::ExtraLife),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::passive(b'L', Id::Ladder),
    Token::empty(b' '),
];

const GHOST: &[Token] = &[
    Token::passive(b'a', Id::LeftArrow),
    Token::active(b'H', Id::GhostHelper),
    Token::active(b'~', Id::WaterTop),
    Token::passive(b'`', Id::Water),
    Token::passive(b'=', Id::RedWallTop),
    Token::passive(b'*', Id::RedWall),
    Token::passive(b'-', Id::GroundTop),
    Token::passive(b'g', Id::Grass),
    Token::passive(b'_', Id::Ground),
    Token::active(b's', Id::SprintingSpider),
    Token::active(b'G', Id::Ghost),
    Token::active(b'O', Id::Coin),
    Token::active(b'E', Id::ExtraLife),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::passive(b'L', Id::Ladder),
    Token::empty(b' '),
];

const PLATFORM: &[Token] = &[
    Token::active(b'p', Id::Platform),
    Token::active(b'~', Id::WaterTop),
    Token::passive(b'`', Id::Water),
    Token::passive(b'=', Id::RustWallTop),
    Token::passive(b'*', Id::RustWall),
    Token::passive(b'L', Id::Ladder),
    Token::active(b's', Id::Spider),
    Token::active(b'O', Id::Coin),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::active(b'S', Id::SprintingSpider),
    Token::active(b'E', Id::ExtraLife),
    Token::active(b'G', Id::Ghost),
    Token::empty(b' '),
];

const BAT: &[Token] = &[
    Token::active(b'p', Id::Platform),
    Token::active(b'~', Id::WaterTop),
    Token::passive(b'=', Id::CaveTop),
    Token::passive(b'*', Id::Cave),
    Token::passive(b'L', Id::Ladder),
    Token::active(b's', Id::Spider),
    Token::active(b'b', Id::Bat),
    Token::active(b'O', Id::Coin),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::active(b'S', Id::SprintingSpider),
    Token::active(b'E', Id::ExtraLife),
    Token::active(b'G', Id::Ghost),
    Token::empty(b' '),
];

const SPRING: &[Token] = &[
    Token::active(b'X', Id::Spring),
    Token::active(b'~', Id::WaterTop),
    Token::passive(b'`', Id::Water),
    Token::active(b'h', Id::CatHelper),
    Token::active(b'H', Id::Helper),
    Token::passive(b'=', Id::WallTop),
    Token::passive(b'*', Id::Wall),
    Token::passive(b'-', Id::GroundTop),
    Token::passive(b'g', Id::Grass),
    Token::passive(b'_', Id::Ground),
    Token::active(b's', Id::Skeleton),
    Token::active(b'O', Id::Coin),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::active(b'S', Id::SprintingSpider),
    Token::active(b'G', Id::Ghost),
    Token::active(b'b', Id::Bat),
    Token::active(b'p', Id::Platform),
    Token::passive(b'L', Id::Ladder),
    Token::active(b'E', Id::ExtraLife),
    Token::empty(b' '),
];

const LAST: &[Token] = &[
    Token::active(b'~', Id::WaterTop),
    Token::passive(b'`', Id::Water),
    Token::passive(b'L', Id::Ladder),
    Token::active(b'p', Id::Platform),
    Token::passive(b'=', Id::WallTop),
    Token::passive(b'*', Id::Wall),
    Token::passive(b'-', Id::GroundTop),
    Token::passive(b'g', Id::Grass),
    Token::passive(b'_', Id::Ground),
    Token::active(b's', Id::Spider),
    Token::active(b'O', Id::Coin),
    Token::passive(b'D', Id::Door),
    Token::player(b'P'),
    Token::active(b'S', Id::SprintingSpider),
    Token::active(b'G', Id::Ghost),
    Token::active(b'E', Id::ExtraLife),
    Token::active(b'X', Id::Spring),
    Token::active(b'k', Id::Skeleton),
    Token::passive(b'^', Id::RustWallTop),
    Token::passive(b'#', Id::RustWall),
    Token::active(b'b', Id::Bat),
    Token::active(b'H', Id::HelperLastLevel),
    Token::active(b'h', Id::LadderHelperLastLevel),
    Token::active(b'c', Id::CatHelperLastLevel),
    Token::active(b'm', Id::GhostHelperLastLevel),
    Token::empty(b' '),
];

pub const LEVEL_COUNT: usize = 10;

pub static LEVELS: [LevelEntry; LEVEL_COUNT] = [
    LevelEntry { name: "small", file_name: "small.level", tokens: SMALL },
    LevelEntry { name: "wall", file_name: "wall.level", tokens: WALL },
    LevelEntry { name: "ground", file_name: "ground.level", tokens: GROUND },
    LevelEntry { name: "ghost", file_name: "ghost.level", tokens: GHOST },
    LevelEntry { name: "platform", file_name: "platform.level", tokens: PLATFORM },
    LevelEntry { name: "bat", file_name: "bat.level", tokens: BAT },
    LevelEntry { name: "spring", file_name: "spring.level", tokens: SPRING },
    LevelEntry { name: "puzzle", file_name: "puzzle.level", tokens: CUSTOM_TOKENS },
    LevelEntry { name: "upwards", file_name: "upwards.level", tokens: CUSTOM_TOKENS },
    LevelEntry { name: "last", file_name: "last.level", tokens: LAST },
];
