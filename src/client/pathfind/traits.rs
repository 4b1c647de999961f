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

use std::fmt::{Debug, Formatter};

use crate::client::pathfind::snapshot::EntityState;

pub trait Heuristic<T = EntityState> {
    /// must never overestimate the cost of reaching a goal from `input`
    fn heuristic(&self, input: &T) -> f64;
}

pub trait GoalCheck<T = EntityState> {
    fn is_goal(&self, input: &T) -> bool;
}

pub struct Neighbor<T, E> {
    pub value: T,
    pub cost: f64,
    /// lower is expanded first when scores tie
    pub priority: u8,
    pub edge: E,
}

impl<T: Debug, E> Debug for Neighbor<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Neighbor {:?} @ dist {}", self.value, self.cost))
    }
}

pub trait Progressor<T, E> {
    fn progressions(&self, input: &T) -> Vec<Neighbor<T, E>>;
}
