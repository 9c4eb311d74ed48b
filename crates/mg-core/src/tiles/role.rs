//! Tile role vocabulary
//!
//! Roles double as coarse categories: generators paint `WallTop`, `Floor`,
//! `Road` and `Ground`, the wall-base pass adds `WallBase`, and the
//! classifier refines floor cells into the edge roles.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TileRole {
    WallTop,
    WallBase,
    Floor,
    /// Floor with a wall base above
    FTop,
    /// Floor with a wall to the right
    FRight,
    /// Floor with a wall top below
    FBottom,
    /// Floor with a wall to the left
    FLeft,
    /// Floor with floor on all four sides
    FCenter,
    Road,
    Ground,
}

impl TileRole {
    pub const fn is_wall(self) -> bool {
        matches!(self, TileRole::WallTop | TileRole::WallBase)
    }

    /// Plain floor or one of the floor edge roles
    pub const fn is_floor_family(self) -> bool {
        matches!(
            self,
            TileRole::Floor
                | TileRole::FTop
                | TileRole::FRight
                | TileRole::FBottom
                | TileRole::FLeft
                | TileRole::FCenter
        )
    }

    /// Character used by text previews
    pub const fn glyph(self) -> char {
        match self {
            TileRole::WallTop => '#',
            TileRole::WallBase => '=',
            TileRole::Floor => '.',
            TileRole::FTop => '^',
            TileRole::FRight => '>',
            TileRole::FBottom => 'v',
            TileRole::FLeft => '<',
            TileRole::FCenter => ',',
            TileRole::Road => ':',
            TileRole::Ground => '"',
        }
    }
}
