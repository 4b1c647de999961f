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

use thiserror::Error;

pub type Res<T = ()> = Result<T, PathError>;

/// Why a route could not be found or could not be carried out.
///
/// Search failures are expected outcomes (some goals are unreachable). Execution
/// failures always stop the current route; retrying or re-planning is up to
/// the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("no route found: the open set was exhausted")]
    NoRouteFound,

    #[error("search budget exceeded before reaching the goal")]
    SearchBudgetExceeded,

    #[error("action at step {0} did not complete in its allowed ticks")]
    ActionTimedOut(usize),

    #[error("the live world diverged from the planned world at step {0}")]
    PreconditionDiverged(usize),

    #[error("no placeable block available at step {0}")]
    InventoryExhausted(usize),

    #[error("route execution was aborted")]
    Aborted,
}

impl PathError {
    /// the route step the error happened at, if it happened during execution
    pub const fn step(self) -> Option<usize> {
        match self {
            Self::ActionTimedOut(step)
            | Self::PreconditionDiverged(step)
            | Self::InventoryExhausted(step) => Some(step),
            Self::NoRouteFound | Self::SearchBudgetExceeded | Self::Aborted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::PathError;

    #[test]
    fn test_display_and_step() {
        assert_eq!(PathError::ActionTimedOut(3).step(), Some(3));
        assert_eq!(PathError::Aborted.step(), None);
        assert_eq!(
            PathError::PreconditionDiverged(2).to_string(),
            "the live world diverged from the planned world at step 2"
        );
    }
}
