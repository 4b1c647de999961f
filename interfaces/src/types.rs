use std::{
    f32::consts::PI,
    fmt::{Debug, Display, Formatter},
    ops::{Add, Mul, Sub},
};

use serde::{Deserialize, Serialize};

pub mod block_data;

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Add<Displacement> for Location {
    type Output = Self;

    fn add(self, rhs: Displacement) -> Self::Output {
        Self {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
            z: self.z + rhs.dz,
        }
    }
}

impl Sub<Displacement> for Location {
    type Output = Self;

    fn sub(self, rhs: Displacement) -> Self::Output {
        let Displacement { dx, dy, dz } = rhs;
        Self {
            x: self.x - dx,
            y: self.y - dy,
            z: self.z - dz,
        }
    }
}

impl Sub<Location> for Location {
    type Output = Displacement;

    fn sub(self, rhs: Location) -> Self::Output {
        Displacement {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
            dz: self.z - rhs.z,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{:.2} {:.2} {:.2}]", self.x, self.y, self.z))
    }
}

impl Location {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dist2(&self, loc: Self) -> f64 {
        let dx = loc.x - self.x;
        let dy = loc.y - self.y;
        let dz = loc.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn add_y(&self, dy: f64) -> Self {
        Self::new(self.x, self.y + dy, self.z)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Display for Displacement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "[{:.2} {:.2} {:.2}]",
            self.dx, self.dy, self.dz
        ))
    }
}

impl Add for Displacement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
            dz: self.dz + rhs.dz,
        }
    }
}

impl Mul<f64> for Displacement {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            dx: self.dx * rhs,
            dy: self.dy * rhs,
            dz: self.dz * rhs,
        }
    }
}

impl Displacement {
    pub const EYE_HEIGHT: Self = Self::new(0., 1.6, 0.);

    pub const fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    pub fn mag2(&self) -> f64 {
        let Self { dx, dy, dz } = *self;
        dx * dx + dy * dy + dz * dz
    }

    pub fn mag(&self) -> f64 {
        self.mag2().sqrt()
    }

    /// the same displacement projected onto the xz plane
    pub const fn horizontal(&self) -> Self {
        Self::new(self.dx, 0.0, self.dz)
    }

    pub fn normalize(self) -> Self {
        let mag = self.mag();
        if mag == 0. {
            // we can't normalize 0-length
            self
        } else {
            self * (1.0 / mag)
        }
    }
}

#[derive(Copy, Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// wiki.vg:
    /// yaw is measured in degrees, and does not follow classical trigonometry
    /// rules. The unit circle of yaw on the XZ-plane starts at (0, 1) and
    /// turns counterclockwise, with 90 at (-1, 0), 180 at (0,-1) and 270 at (1,
    /// 0). Additionally, yaw is not clamped to between 0 and 360 degrees;
    /// any number is valid, including negative numbers and numbers greater than
    /// 360.
    pub yaw: f32,
    pub pitch: f32,
}

impl Direction {
    pub const DOWN: Self = Self {
        yaw: 90.,
        pitch: 90.,
    };

    pub fn unit_vector(&self) -> Displacement {
        let pitch = self.pitch.to_radians();
        let yaw = self.yaw.to_radians();

        let x = -pitch.cos() * yaw.sin();
        let y = -pitch.sin();
        let z = pitch.cos() * yaw.cos();

        Displacement::new(f64::from(x), f64::from(y), f64::from(z))
    }

    pub const fn horizontal(&self) -> Self {
        Self {
            yaw: self.yaw,
            pitch: 0.0,
        }
    }
}

impl From<Displacement> for Direction {
    fn from(displacement: Displacement) -> Self {
        const EPSILON: f32 = 0.1;

        let Displacement { dx, dy, dz } = displacement;
        let (dx, dy, dz) = (dx as f32, dy as f32, dz as f32);
        let r = dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt();
        let mut yaw = -dx.atan2(dz) / PI * 180.0;

        if yaw < 0.0 {
            yaw += 360.0;
        }

        if yaw.abs() < EPSILON {
            yaw = 0.0;
        }

        let pitch = if r == 0.0 {
            0.0
        } else {
            -(dy / r).asin() / PI * 180.0
        };
        Self { yaw, pitch }
    }
}

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct ChunkLocation(pub i32, pub i32);

impl From<BlockLocation> for ChunkLocation {
    fn from(loc: BlockLocation) -> Self {
        Self(loc.x >> 4, loc.z >> 4)
    }
}

/// A block location stored by (x,z) = i32, y = i16. y is signed to preserve
/// compatibility with 1.17, where the world height can be much higher and goes
/// to negative values.
#[derive(
    Copy, Clone, Debug, Hash, PartialOrd, PartialEq, Ord, Eq, Default, Serialize, Deserialize,
)]
pub struct BlockLocation {
    pub x: i32,
    pub y: i16,
    pub z: i32,
}

impl From<Location> for BlockLocation {
    fn from(location: Location) -> Self {
        let Location { x, y, z } = location;
        Self::from_flts(x, y, z)
    }
}

impl From<BlockLocation> for BlockLocation2D {
    fn from(loc: BlockLocation) -> Self {
        Self { x: loc.x, z: loc.z }
    }
}

impl From<BlockLocation2D> for BlockLocation {
    fn from(loc: BlockLocation2D) -> Self {
        Self {
            x: loc.x,
            y: 0,
            z: loc.z,
        }
    }
}

impl Add for BlockLocation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let Self { x, y, z } = self;
        Self::new(x + rhs.x, y + rhs.y, z + rhs.z)
    }
}

impl Sub for BlockLocation {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let Self { x, y, z } = self;
        Self::new(x - rhs.x, y - rhs.y, z - rhs.z)
    }
}

impl Display for BlockLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{}, {}, {}]", self.x, self.y, self.z))
    }
}

impl BlockLocation {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i16, z: i32) -> Self {
        Self { x, y, z }
    }

    /// the centers of the six faces in the order of [`Face`]
    pub fn faces(self) -> [Location; 6] {
        const DISPLACEMENTS: [Displacement; 6] = [
            Displacement::new(0.5, 0.0, 0.5),
            Displacement::new(0.5, 1.0, 0.5),
            Displacement::new(0.5, 0.5, 0.0),
            Displacement::new(0.5, 0.5, 1.0),
            Displacement::new(0.0, 0.5, 0.5),
            Displacement::new(1.0, 0.5, 0.5),
        ];

        let lowest = Location::new(f64::from(self.x), f64::from(self.y), f64::from(self.z));
        DISPLACEMENTS.map(|displacement| lowest + displacement)
    }

    pub const fn below(&self) -> Self {
        self.add_y(-1)
    }

    pub const fn above(&self) -> Self {
        self.add_y(1)
    }

    pub const fn add_y(&self, dy: i16) -> Self {
        let &Self { x, y, z } = self;
        Self { x, y: y + dy, z }
    }

    pub fn from_flts(x: impl num::Float, y: impl num::Float, z: impl num::Float) -> Self {
        let x = num::cast(x.floor()).unwrap_or(i32::MIN);
        let y = num::cast(y.floor()).unwrap_or(i16::MIN);
        let z = num::cast(z.floor()).unwrap_or(i32::MIN);
        Self::new(x, y, z)
    }

    /// The middle of the block at the height of its floor. This is where a
    /// bot standing in this block has its feet.
    pub fn center_bottom(&self) -> Location {
        Location {
            x: f64::from(self.x) + 0.5,
            y: f64::from(self.y),
            z: f64::from(self.z) + 0.5,
        }
    }

    pub fn true_center(&self) -> Location {
        Location {
            x: f64::from(self.x) + 0.5,
            y: f64::from(self.y) + 0.5,
            z: f64::from(self.z) + 0.5,
        }
    }

    pub const fn abs_dif(&self, other: Self) -> (u32, u16, u32) {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        (dx, dy, dz)
    }

    pub fn dist2(&self, other: Self) -> f64 {
        let (dx, dy, dz) = self.abs_dif(other);
        let (dx, dy, dz) = (f64::from(dx), f64::from(dy), f64::from(dz));
        dx * dx + dy * dy + dz * dz
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct BlockLocation2D {
    pub x: i32,
    pub z: i32,
}

impl BlockLocation2D {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn dist2(self, other: Self) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dz = u64::from(self.z.abs_diff(other.z));
        dx * dx + dz * dz
    }
}

/// The face of a block. The discriminants match the protocol's face ids.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Face {
    NegY = 0,
    PosY = 1,
    NegZ = 2,
    PosZ = 3,
    NegX = 4,
    PosX = 5,
}

impl Face {
    /// the unit change pointing out of this face
    pub const fn change(self) -> BlockLocation {
        match self {
            Self::NegY => BlockLocation::new(0, -1, 0),
            Self::PosY => BlockLocation::new(0, 1, 0),
            Self::NegZ => BlockLocation::new(0, 0, -1),
            Self::PosZ => BlockLocation::new(0, 0, 1),
            Self::NegX => BlockLocation::new(-1, 0, 0),
            Self::PosX => BlockLocation::new(1, 0, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum SimpleType {
    Solid,
    Water,
    Avoid,
    WalkThrough,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockKind(pub u32);

impl From<u32> for BlockKind {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl BlockKind {
    pub const AIR: Self = Self(0);
    pub const STONE: Self = Self(1);
    pub const DIRT: Self = Self(3);
    pub const COBBLESTONE: Self = Self(4);
    pub const SAND: Self = Self(12);
    pub const GRAVEL: Self = Self(13);
    pub const GLASS: Self = Self(20);

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// A block item which is safe to use for bridging and pillaring. Item ids
    /// at or above 256 are not blocks.
    pub fn placeable(self) -> bool {
        self.0 < 256 && BlockState::from(self.0, 0).full_block()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct BlockState(pub u32);

impl Debug for BlockState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}:{}", self.0 >> 4, self.0 % 16))
    }
}

impl BlockState {
    pub const AIR: Self = Self(0);
    pub const STONE: Self = Self(16);
    pub const DIRT: Self = Self(3 << 4);
    pub const COBBLESTONE: Self = Self(4 << 4);
    pub const BEDROCK: Self = Self(7 << 4);
    pub const WATER: Self = Self(9 << 4);
    pub const LAVA: Self = Self(11 << 4);
    pub const SAND: Self = Self(12 << 4);
    pub const GRAVEL: Self = Self(13 << 4);
    pub const OBSIDIAN: Self = Self(49 << 4);

    /// only the low four bits of `data` are kept
    pub const fn from(id: u32, data: u16) -> Self {
        Self((id << 4) | (data as u32 & 0xF))
    }

    pub const fn id(&self) -> u32 {
        self.0 >> 4
    }

    pub const fn kind(&self) -> BlockKind {
        BlockKind(self.id())
    }

    pub const fn simple_type(&self) -> SimpleType {
        if self.full_block() {
            return SimpleType::Solid;
        }

        if self.is_water() {
            return SimpleType::Water;
        }

        if self.walk_through() {
            return SimpleType::WalkThrough;
        }

        SimpleType::Avoid
    }

    pub const fn full_block(&self) -> bool {
        // consider 54 |
        matches!(self.id(),
            1..=5 | 7 | 12..=25 | 29 | 33 | 35 | 41..=43 | 45..=49 | 52 | 56..=58 | 60..=62 | 73 | 74 |
            78..=80 | // snow, ice
            82 | // clay
            84 | 86 | 87 | 89 | 91 | 95 |
            98..=100 |
            103 | 110 | 112 | 118 | 121 | 123..=125 |
            129 | 133 | 137..=138 | 155 | 159 | 161 | 162 |
            165 | 166 |
            168..=170 |
            172..=174 |
            179 | 181 | 199..=202 |
            204 | 206 | 208..=212 | 214..=255
        )
    }

    pub const fn is_water(&self) -> bool {
        matches!(self.id(), 8 | 9)
    }

    pub const fn is_lava(&self) -> bool {
        matches!(self.id(), 10 | 11)
    }

    pub const fn is_fluid(&self) -> bool {
        self.is_water() || self.is_lava()
    }

    /// Does not stop a bot from walking through it. Fluids are walk-through
    /// but are never considered free space by the pathfinder.
    pub const fn walk_through(&self) -> bool {
        self.is_water() || self.no_motion_effect()
    }

    /// walk-through and safe to occupy
    pub const fn passable(&self) -> bool {
        self.no_motion_effect()
    }

    pub const fn no_motion_effect(&self) -> bool {
        matches!(
            self.id(),
            0 | // air
            6 | // sapling
            27 | 28 | // rail
            31 | // grass/fern/dead shrub
            37 | 38 | // flower
            39 | 40 | // mushroom
            50 | // torch
            59 | // wheat
            66 | 68 | 69 | 70 | 72 | 75 | 76 | 77 | 83 |
            104 | 105 | 106 |
            115 | 119 |
            175..=177
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{BlockLocation, BlockState, Direction, Displacement, Face, Location, SimpleType};

    #[test]
    fn test_block_location_floor() {
        let loc = BlockLocation::from(Location::new(-0.5, 1.99, 3.0));
        assert_eq!(loc, BlockLocation::new(-1, 1, 3));

        let center = BlockLocation::new(-1, 1, 3).center_bottom();
        assert_eq!(BlockLocation::from(center), BlockLocation::new(-1, 1, 3));
    }

    #[test]
    fn test_face_changes_match_face_centers() {
        let origin = BlockLocation::ZERO;
        let faces = origin.faces();
        let center = origin.true_center();
        for face in [Face::NegY, Face::PosY, Face::NegZ, Face::PosZ, Face::NegX, Face::PosX] {
            let change = face.change();
            let d = faces[face as usize] - center;
            assert_eq!(d.dx * 2.0, f64::from(change.x));
            assert_eq!(d.dy * 2.0, f64::from(change.y));
            assert_eq!(d.dz * 2.0, f64::from(change.z));
        }
    }

    #[test]
    fn test_state_data_stays_out_of_id() {
        assert_eq!(BlockState::from(12, 0), BlockState::SAND);
        assert_eq!(BlockState::from(12, 3).id(), 12);
        assert_eq!(BlockState::from(12, 0x1F).id(), 12);
        assert_eq!(BlockState::from(12, 0x1F), BlockState::from(12, 0xF));
    }

    #[test]
    fn test_simple_types() {
        assert_eq!(BlockState::STONE.simple_type(), SimpleType::Solid);
        assert_eq!(BlockState::WATER.simple_type(), SimpleType::Water);
        assert_eq!(BlockState::AIR.simple_type(), SimpleType::WalkThrough);
        assert_eq!(BlockState::LAVA.simple_type(), SimpleType::Avoid);
        assert!(BlockState::LAVA.is_fluid());
        assert!(!BlockState::WATER.passable());
    }

    #[test]
    fn test_direction_yaw() {
        // +z is yaw 0, -x is yaw 90
        let south = Direction::from(Displacement::new(0.0, 0.0, 1.0));
        assert!(south.yaw.abs() < 0.01);

        let west = Direction::from(Displacement::new(-1.0, 0.0, 0.0));
        assert!((west.yaw - 90.0).abs() < 0.01);

        let unit = west.unit_vector();
        assert!((unit.dx + 1.0).abs() < 1e-4);
    }
}
