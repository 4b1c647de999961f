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

//! The commands a bot may issue. Encoding them into packets is the job of the
//! session layer; nothing in this crate writes raw protocol data.

use interfaces::types::{BlockLocation, Direction, Face};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mine {
    Start,
    Cancel,
    Finished,
}

/// The movement controls held by a bot until they are changed again.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ControlState {
    pub forward: bool,
    pub jump: bool,
    pub look: Direction,
}

impl ControlState {
    pub const fn look(look: Direction) -> Self {
        Self {
            forward: false,
            jump: false,
            look,
        }
    }
}

/// Discrete intents. Implementations are expected to be fire-and-forget: the
/// effect of a command is observed on a later tick.
pub trait InterfaceOut {
    fn set_control(&mut self, control: ControlState);
    fn mine(&mut self, location: BlockLocation, mine: Mine, face: Face);
    fn place_block(&mut self, against: BlockLocation, face: Face);
    fn change_slot(&mut self, idx: u8);
}

/// A recorded [`InterfaceOut`] call
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Control(ControlState),
    Mine(BlockLocation, Mine, Face),
    Place(BlockLocation, Face),
    ChangeSlot(u8),
}

/// Buffers commands so they can be applied after the tick which issued them.
impl InterfaceOut for Vec<Command> {
    fn set_control(&mut self, control: ControlState) {
        self.push(Command::Control(control));
    }

    fn mine(&mut self, location: BlockLocation, mine: Mine, face: Face) {
        self.push(Command::Mine(location, mine, face));
    }

    fn place_block(&mut self, against: BlockLocation, face: Face) {
        self.push(Command::Place(against, face));
    }

    fn change_slot(&mut self, idx: u8) {
        self.push(Command::ChangeSlot(idx));
    }
}
