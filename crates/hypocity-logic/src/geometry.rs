//! Planar/3D vectors and the static city block model.
//!
//! The city lives on the XZ ground plane; Y is height. Everything that moves
//! is resolved on the plane, the Y coordinate only matters for the scan cone
//! and the item-use distance (the player's eye sits above the NPCs' feet).

use serde::{Deserialize, Serialize};

/// Vector on the ground plane (x, z).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Unit vector pointing at `angle` radians, measured from +X toward +Z.
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            z: angle.sin(),
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Unit vector in the same direction, or zero for a zero-length input.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.z * other.z
    }

    /// Angle from +X toward +Z in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        let a = self.z.atan2(self.x);
        if a < 0.0 {
            a + std::f32::consts::TAU
        } else {
            a
        }
    }

    /// Yaw used by renderers to orient a model along this direction
    /// (`atan2(x, z)`, zero when facing +Z).
    pub fn yaw(&self) -> f32 {
        self.x.atan2(self.z)
    }

    /// Lift onto the 3D plane at height `y`.
    pub fn at_height(&self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            z: self.z + other.z,
        }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            z: self.z * scalar,
        }
    }
}

/// 3D vector, used for the player pose and the scan cone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Drop the height component.
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

// ── City blocks ─────────────────────────────────────────────────────────

/// What a block is. Only buildings take part in collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Building,
    Sidewalk,
}

/// One axis-aligned box of city geometry, centered at (x, z).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    /// Display color as a `#rrggbb` string; sidewalks carry none.
    pub color: Option<String>,
}

impl Block {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    pub fn min_x(&self) -> f32 {
        self.x - self.width / 2.0
    }
    pub fn max_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
    pub fn min_z(&self) -> f32 {
        self.z - self.depth / 2.0
    }
    pub fn max_z(&self) -> f32 {
        self.z + self.depth / 2.0
    }

    /// Strict containment in the footprint grown by `padding` on every side.
    pub fn padded_contains(&self, point: Vec2, padding: f32) -> bool {
        point.x > self.min_x() - padding
            && point.x < self.max_x() + padding
            && point.z > self.min_z() - padding
            && point.z < self.max_z() + padding
    }

    /// Half of the larger footprint side.
    pub fn half_extent(&self) -> f32 {
        self.width.max(self.depth) / 2.0
    }
}

/// The static city: a flat list of blocks, generated once per session and
/// read-only afterwards.
///
/// Buildings and sidewalks are emitted in co-located pairs, but nothing
/// enforces that here; consumers filter by [`BlockKind`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityLayout {
    pub blocks: Vec<Block>,
}

impl CityLayout {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Building)
    }

    pub fn sidewalks(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Sidewalk)
    }

    pub fn building_count(&self) -> usize {
        self.buildings().count()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(x: f32, z: f32, w: f32, d: f32) -> Block {
        Block {
            kind: BlockKind::Building,
            x,
            z,
            width: w,
            depth: d,
            height: 10.0,
            color: None,
        }
    }

    #[test]
    fn vec2_normalize_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
        let n = Vec2::new(3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn angle_is_wrapped_positive() {
        let a = Vec2::new(0.0, -1.0).angle();
        assert!((a - 1.5 * std::f32::consts::PI).abs() < 1e-5);
        let b = Vec2::from_angle(1.0).angle();
        assert!((b - 1.0).abs() < 1e-5);
    }

    #[test]
    fn padded_contains_is_strict() {
        let b = building(0.0, 0.0, 2.0, 2.0);
        assert!(b.padded_contains(Vec2::new(0.9, 0.0), 0.0));
        assert!(!b.padded_contains(Vec2::new(1.0, 0.0), 0.0));
        assert!(b.padded_contains(Vec2::new(1.4, 0.0), 0.5));
        assert!(!b.padded_contains(Vec2::new(1.5, 0.0), 0.5));
    }

    #[test]
    fn layout_filters_by_kind() {
        let mut sidewalk = building(0.0, 0.0, 3.0, 3.0);
        sidewalk.kind = BlockKind::Sidewalk;
        let layout = CityLayout::new(vec![building(0.0, 0.0, 2.0, 2.0), sidewalk]);
        assert_eq!(layout.building_count(), 1);
        assert_eq!(layout.sidewalks().count(), 1);
    }
}
