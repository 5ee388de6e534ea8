//! Falling item entities
//!
//! Item kinds form a closed set; a kind never changes after spawn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What a falling item does when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Normal,
    Heal,
    Shield,
    Magnet,
    Freeze,
    Poison,
    Tnt,
    Bomb,
    BossBomb,
}

impl ItemKind {
    /// Bombs hurt the catcher instead of scoring
    #[inline]
    pub fn is_bomb(self) -> bool {
        matches!(self, ItemKind::Bomb | ItemKind::BossBomb)
    }

    /// Magnets leave these alone
    #[inline]
    pub fn ignores_magnet(self) -> bool {
        matches!(self, ItemKind::Bomb | ItemKind::BossBomb | ItemKind::Poison)
    }

    /// Letting one of these fall past is free, even in single-player
    #[inline]
    pub fn is_hazard(self) -> bool {
        matches!(
            self,
            ItemKind::Bomb | ItemKind::BossBomb | ItemKind::Poison | ItemKind::Tnt
        )
    }
}

/// Fruit art; each fruit carries a fixed kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fruit {
    Apple,
    Banana,
    Watermelon,
    Strawberry,
}

impl Fruit {
    pub const ALL: [Fruit; 4] = [
        Fruit::Apple,
        Fruit::Banana,
        Fruit::Watermelon,
        Fruit::Strawberry,
    ];

    pub fn kind(self) -> ItemKind {
        match self {
            Fruit::Apple => ItemKind::Shield,
            Fruit::Banana => ItemKind::Heal,
            Fruit::Watermelon | Fruit::Strawberry => ItemKind::Normal,
        }
    }
}

/// Opaque reference to art owned by the frontend.
///
/// The core only ever names art; loading, placeholder generation and
/// blitting are the frontend's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetHandle {
    Bucket { player: u8 },
    Fruit(Fruit),
    Bomb,
    Heart,
    Magnet,
    Freeze,
    Poison,
    Tnt,
    Boss,
    Background { season: u8 },
}

impl AssetHandle {
    /// Default art for an item kind (fruit kinds resolve to their canonical fruit)
    pub fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Normal => AssetHandle::Fruit(Fruit::Watermelon),
            ItemKind::Heal => AssetHandle::Fruit(Fruit::Banana),
            ItemKind::Shield => AssetHandle::Fruit(Fruit::Apple),
            ItemKind::Magnet => AssetHandle::Magnet,
            ItemKind::Freeze => AssetHandle::Freeze,
            ItemKind::Poison => AssetHandle::Poison,
            ItemKind::Tnt => AssetHandle::Tnt,
            ItemKind::Bomb | ItemKind::BossBomb => AssetHandle::Bomb,
        }
    }
}

/// A falling item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    kind: ItemKind,
    pub pos: Vec2,
    pub sprite: AssetHandle,
}

impl FallingItem {
    pub fn new(id: u32, kind: ItemKind, pos: Vec2, sprite: AssetHandle) -> Self {
        Self {
            id,
            kind,
            pos,
            sprite,
        }
    }

    /// Item with its default art
    pub fn with_default_sprite(id: u32, kind: ItemKind, pos: Vec2) -> Self {
        Self::new(id, kind, pos, AssetHandle::for_kind(kind))
    }

    #[inline]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}
