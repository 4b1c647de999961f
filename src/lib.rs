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

//! Block-world pathfinding for autonomous bots: plan a route with A* over
//! snapshots of the bot and its edits to the world, then carry the route out
//! tick by tick.
#![deny(unused_must_use)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::await_holding_refcell_ref)]

pub mod client;
pub mod error;
pub mod protocol;
pub mod storage;
