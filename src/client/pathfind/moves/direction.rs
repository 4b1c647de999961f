// Copyright (c) 2021 Andrew Gazelka - All Rights Reserved.
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use interfaces::types::{BlockLocation, Face};

/// Horizontal directions. North is -z and east is +x.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockDirection {
    North,
    South,
    East,
    West,
}

impl BlockDirection {
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    pub const fn offset(self) -> BlockLocation {
        match self {
            Self::North => BlockLocation::new(0, 0, -1),
            Self::South => BlockLocation::new(0, 0, 1),
            Self::East => BlockLocation::new(1, 0, 0),
            Self::West => BlockLocation::new(-1, 0, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// to the left when facing this direction
    pub const fn left_side(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    pub const fn right_side(self) -> Self {
        self.left_side().opposite()
    }

    /// this direction followed by the remaining three in rotation order
    pub const fn frame(self) -> [Self; 4] {
        [self, self.opposite(), self.left_side(), self.right_side()]
    }

    /// the face of a block which points in this direction
    pub const fn face(self) -> Face {
        match self {
            Self::North => Face::NegZ,
            Self::South => Face::PosZ,
            Self::East => Face::PosX,
            Self::West => Face::NegX,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiagonalDirection {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl DiagonalDirection {
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// the north/south component followed by the east/west component
    pub const fn components(self) -> (BlockDirection, BlockDirection) {
        match self {
            Self::NorthEast => (BlockDirection::North, BlockDirection::East),
            Self::NorthWest => (BlockDirection::North, BlockDirection::West),
            Self::SouthEast => (BlockDirection::South, BlockDirection::East),
            Self::SouthWest => (BlockDirection::South, BlockDirection::West),
        }
    }

    pub fn offset(self) -> BlockLocation {
        let (a, b) = self.components();
        a.offset() + b.offset()
    }
}
