//! Archetype registry: one immutable template per entity kind.
//!
//! Archetype ids double as depth order. The collection sorts by descending
//! id, so the highest ids are updated and drawn first (back-most) and the
//! lowest active ids end up on top.

use std::fmt;
use std::ops::BitOr;

use crate::collision::TILE_SIZE;
use crate::handlers::{self, Behavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchetypeId {
    None,
    TestLoDepth,
    TestHiDepth,

    // Passive tiles.
    WallTop,
    Wall,
    RedWallTop,
    RedWall,
    RustWallTop,
    RustWall,
    GroundTop,
    Ground,
    CaveTop,
    Cave,
    Grass,
    Ladder,
    Door,
    Water,
    LeftArrow,

    // Active entities.
    WaterTop,
    Player,
    Spider,
    SprintingSpider,
    Skeleton,
    Shot,
    Ghost,
    Coin,
    ExtraLife,
    Helper,
    CatHelper,
    LadderHelper,
    GhostHelper,
    Platform,
    Bat,
    Spring,
    HelperLastLevel,
    CatHelperLastLevel,
    LadderHelperLastLevel,
    GhostHelperLastLevel,
}

pub const ARCHETYPE_COUNT: usize = ArchetypeId::GhostHelperLastLevel as usize + 1;

impl ArchetypeId {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which sides of a tile block movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Solidity(u8);

impl Solidity {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const TOP: Self = Self(1 << 2);
    pub const BOTTOM: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);
    /// Interior of a wall: everything but the top.
    pub const SIDES_AND_BOTTOM: Self = Self(Self::LEFT.0 | Self::RIGHT.0 | Self::BOTTOM.0);

    /// True when every side in `sides` is set.
    pub fn contains(self, sides: Self) -> bool {
        self.0 & sides.0 == sides.0
    }
}

impl BitOr for Solidity {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// One full tile, used as the default hit-box.
    pub const TILE: Self = Self::new(0, 0, TILE_SIZE, TILE_SIZE);
}

pub struct Archetype {
    pub id: ArchetypeId,
    /// Family used for tile-class queries (ladder, door).
    pub parent_id: ArchetypeId,
    /// Region of the sprite sheet, unscaled.
    pub sheet: Rect,
    /// Collidable sub-rectangle relative to the entity position.
    pub body: Rect,
    pub solidity: Solidity,
    pub behavior: &'static dyn Behavior,
}

impl Archetype {
    pub fn new(
        id: ArchetypeId,
        sheet_row: i32,
        sheet_col: i32,
        body: Rect,
        solidity: Solidity,
        behavior: &'static dyn Behavior,
    ) -> Self {
        Self {
            id,
            parent_id: id,
            sheet: Rect::new(sheet_col * TILE_SIZE, sheet_row * TILE_SIZE, TILE_SIZE, TILE_SIZE),
            body,
            solidity,
            behavior,
        }
    }

    /// A full-tile archetype with no behavior of its own.
    pub fn tile(id: ArchetypeId, sheet_row: i32, sheet_col: i32, solidity: Solidity) -> Self {
        Self::new(id, sheet_row, sheet_col, Rect::TILE, solidity, &handlers::INERT)
    }
}

impl fmt::Debug for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archetype")
            .field("id", &self.id)
            .field("parent_id", &self.parent_id)
            .field("sheet", &self.sheet)
            .field("body", &self.body)
            .field("solidity", &self.solidity)
            .field("behavior", &self.behavior)
            .finish()
    }
}

#[derive(Debug)]
pub struct ArchetypeRegistry {
    slots: Vec<Option<Archetype>>,
}

impl ArchetypeRegistry {
    pub fn empty() -> Self {
        Self {
            slots: (0..ARCHETYPE_COUNT).map(|_| None).collect(),
        }
    }

    /// Insert one archetype. Registering the same id twice is a bug.
    pub fn register(&mut self, archetype: Archetype) {
        let slot = &mut self.slots[archetype.id.index()];
        assert!(
            slot.is_none(),
            "archetype {:?} registered twice",
            archetype.id
        );
        *slot = Some(archetype);
    }

    pub fn try_get(&self, id: ArchetypeId) -> Option<&Archetype> {
        self.slots[id.index()].as_ref()
    }

    /// Look up a registered archetype. Asking for an unregistered id is a bug.
    pub fn get(&self, id: ArchetypeId) -> &Archetype {
        match self.try_get(id) {
            Some(archetype) => archetype,
            None => panic!("archetype {id:?} is not registered"),
        }
    }

    /// Re-skin an archetype. Collision and behavior are untouched.
    pub fn change_visual(&mut self, id: ArchetypeId, sheet_row: i32, sheet_col: i32) {
        let Some(archetype) = self.slots[id.index()].as_mut() else {
            panic!("archetype {id:?} is not registered");
        };
        archetype.sheet.x = sheet_col * TILE_SIZE;
        archetype.sheet.y = sheet_row * TILE_SIZE;
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The game's full archetype table.
    pub fn standard() -> Self {
        use ArchetypeId as Id;

        let enemy_body = Rect::new(0, 6, 15, 10);
        let mut registry = Self::empty();

        // A transparent cell stands in for empty space.
        registry.register(Archetype::tile(Id::None, 0, 10, Solidity::NONE));
        registry.register(Archetype::tile(Id::TestLoDepth, 0, 10, Solidity::NONE));
        registry.register(Archetype::tile(Id::TestHiDepth, 0, 10, Solidity::NONE));

        registry.register(Archetype::tile(Id::WallTop, 4, 2, Solidity::ALL));
        registry.register(Archetype::tile(Id::Wall, 5, 2, Solidity::SIDES_AND_BOTTOM));
        registry.register(Archetype::tile(Id::RustWallTop, 4, 3, Solidity::ALL));
        registry.register(Archetype::tile(Id::RustWall, 5, 3, Solidity::SIDES_AND_BOTTOM));
        registry.register(Archetype::tile(Id::RedWallTop, 4, 5, Solidity::ALL));
        registry.register(Archetype::tile(Id::RedWall, 5, 5, Solidity::SIDES_AND_BOTTOM));
        registry.register(Archetype::tile(Id::GroundTop, 6, 1, Solidity::ALL));
        registry.register(Archetype::tile(Id::Ground, 7, 1, Solidity::SIDES_AND_BOTTOM));
        registry.register(Archetype::tile(Id::CaveTop, 6, 0, Solidity::ALL));
        registry.register(Archetype::tile(Id::Cave, 7, 0, Solidity::SIDES_AND_BOTTOM));
        registry.register(Archetype::tile(Id::Grass, 40, 1, Solidity::NONE));
        registry.register(Archetype::tile(Id::Ladder, 12, 2, Solidity::NONE));
        registry.register(Archetype::tile(Id::Door, 10, 0, Solidity::NONE));
        registry.register(Archetype::tile(Id::Water, 55, 0, Solidity::NONE));
        registry.register(Archetype::tile(Id::LeftArrow, 51, 2, Solidity::NONE));

        registry.register(Archetype::new(
            Id::WaterTop,
            54,
            0,
            Rect::TILE,
            Solidity::NONE,
            &handlers::water::WATER_SURFACE,
        ));
        registry.register(Archetype::new(
            Id::Player,
            1,
            38,
            Rect::new(6, 0, 4, 16),
            Solidity::ALL,
            &handlers::INERT,
        ));

        registry.register(Archetype::new(
            Id::Spider,
            11,
            38,
            enemy_body,
            Solidity::ALL,
            &handlers::spider::SPIDER,
        ));
        registry.register(Archetype::new(
            Id::SprintingSpider,
            11,
            32,
            enemy_body,
            Solidity::ALL,
            &handlers::spider::SPRINTING_SPIDER,
        ));
        registry.register(Archetype::new(
            Id::Skeleton,
            6,
            26,
            enemy_body,
            Solidity::ALL,
            &handlers::skeleton::SKELETON,
        ));
        registry.register(Archetype::new(
            Id::Shot,
            52,
            0,
            Rect::new(0, 4, 16, 7),
            Solidity::ALL,
            &handlers::ghost::SHOT,
        ));
        registry.register(Archetype::new(
            Id::Ghost,
            7,
            26,
            enemy_body,
            Solidity::ALL,
            &handlers::ghost::GHOST,
        ));
        registry.register(Archetype::new(
            Id::Bat,
            8,
            26,
            Rect::new(0, 3, 16, 10),
            Solidity::ALL,
            &handlers::spider::BAT,
        ));

        registry.register(Archetype::new(
            Id::Coin,
            47,
            29,
            Rect::TILE,
            Solidity::ALL,
            &handlers::item::ITEM,
        ));
        registry.register(Archetype::new(
            Id::ExtraLife,
            55,
            27,
            Rect::TILE,
            Solidity::ALL,
            &handlers::item::ITEM,
        ));

        let helpers = [
            (Id::Helper, 0, &handlers::helper::GUIDE),
            (Id::CatHelper, 1, &handlers::helper::CAT),
            (Id::LadderHelper, 2, &handlers::helper::LADDER),
            (Id::GhostHelper, 3, &handlers::helper::GHOST),
            (Id::HelperLastLevel, 0, &handlers::helper::GUIDE_FAREWELL),
            (Id::CatHelperLastLevel, 1, &handlers::helper::CAT_FAREWELL),
            (Id::LadderHelperLastLevel, 2, &handlers::helper::LADDER_FAREWELL),
            (Id::GhostHelperLastLevel, 3, &handlers::helper::GHOST_FAREWELL),
        ];
        for (id, col, behavior) in helpers {
            registry.register(Archetype::new(id, 56, col, Rect::TILE, Solidity::ALL, behavior));
        }

        registry.register(Archetype::new(
            Id::Platform,
            23,
            3,
            Rect::TILE,
            Solidity::NONE,
            &handlers::platform::PLATFORM,
        ));
        registry.register(Archetype::new(
            Id::Spring,
            20,
            2,
            Rect::new(0, 8, 16, 8),
            Solidity::NONE,
            &handlers::spring::SPRING,
        ));

        log::debug!("registered {} archetypes", registry.len());
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registers_every_archetype() {
        let registry = ArchetypeRegistry::standard();
        assert_eq!(registry.len(), ARCHETYPE_COUNT);
        for index in 0..ARCHETYPE_COUNT {
            assert!(registry.slots[index].is_some(), "slot {index} is empty");
        }
    }

    #[test]
    fn ids_are_in_depth_order() {
        assert!(ArchetypeId::None < ArchetypeId::WallTop);
        assert!(ArchetypeId::LeftArrow < ArchetypeId::WaterTop);
        assert!(ArchetypeId::WaterTop < ArchetypeId::Player);
        assert!(ArchetypeId::Player < ArchetypeId::Spider);
        assert_eq!(ArchetypeId::GhostHelperLastLevel.index(), ARCHETYPE_COUNT - 1);
    }

    #[test]
    fn sheet_and_body_come_from_the_table() {
        let registry = ArchetypeRegistry::standard();
        let player = registry.get(ArchetypeId::Player);
        assert_eq!(player.sheet, Rect::new(38 * 16, 16, 16, 16));
        assert_eq!(player.body, Rect::new(6, 0, 4, 16));
        assert_eq!(player.parent_id, ArchetypeId::Player);

        let wall = registry.get(ArchetypeId::Wall);
        assert!(wall.solidity.contains(Solidity::LEFT | Solidity::BOTTOM));
        assert!(!wall.solidity.contains(Solidity::TOP));
    }

    #[test]
    fn solidity_requires_all_requested_sides() {
        let sides = Solidity::LEFT | Solidity::RIGHT;
        assert!(sides.contains(Solidity::LEFT));
        assert!(!sides.contains(Solidity::LEFT | Solidity::TOP));
        assert!(Solidity::ALL.contains(Solidity::ALL));
        assert!(Solidity::NONE.contains(Solidity::NONE));
    }

    #[test]
    fn change_visual_only_moves_sheet_origin() {
        let mut registry = ArchetypeRegistry::standard();
        registry.change_visual(ArchetypeId::Player, 2, 26);
        let player = registry.get(ArchetypeId::Player);
        assert_eq!(player.sheet, Rect::new(26 * 16, 2 * 16, 16, 16));
        assert_eq!(player.body, Rect::new(6, 0, 4, 16));
        assert_eq!(player.solidity, Solidity::ALL);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn duplicate_registration_panics() {
        let mut registry = ArchetypeRegistry::empty();
        registry.register(Archetype::tile(ArchetypeId::Wall, 5, 2, Solidity::ALL));
        registry.register(Archetype::tile(ArchetypeId::Wall, 5, 2, Solidity::ALL));
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn unregistered_lookup_panics() {
        let registry = ArchetypeRegistry::empty();
        let _ = registry.get(ArchetypeId::Ladder);
    }
}
