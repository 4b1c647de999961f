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

//! Carrying out a route one tick at a time.

use std::future::Future;

use futures::{Stream, StreamExt};
use interfaces::BlockAccess;
use tracing::{debug, trace, warn};

use crate::{
    client::{
        pathfind::{
            execution::{Divergence, WorldAction},
            route::Route,
        },
        state::local::LocalState,
    },
    error::{PathError, Res},
    protocol::{ControlState, InterfaceOut},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionState {
    Pending,
    Active,
    Completed,
    TimedOut,
    Aborted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    InProgress,
    Finished,
    Failed(PathError),
}

impl From<Res> for Progress {
    fn from(res: Res) -> Self {
        match res {
            Ok(()) => Self::Finished,
            Err(err) => Self::Failed(err),
        }
    }
}

/// Runs the world actions of a route in order. Exactly one action is active at
/// a time and each tick issues at most one command.
#[derive(Debug)]
pub struct RouteExecutor {
    actions: Vec<WorldAction>,
    states: Vec<ActionState>,
    step: usize,
    /// ticks since the current action was activated
    ticks_active: usize,
    outcome: Option<Res>,
}

impl RouteExecutor {
    pub fn new(route: Route) -> Self {
        let actions = route.into_actions();
        let states = vec![ActionState::Pending; actions.len()];
        Self {
            actions,
            states,
            step: 0,
            ticks_active: 0,
            outcome: None,
        }
    }

    pub const fn step(&self) -> usize {
        self.step
    }

    pub fn state(&self, step: usize) -> Option<ActionState> {
        self.states.get(step).copied()
    }

    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// reset the controls and cancel anything the current action left running
    fn stop(&mut self, out: &mut impl InterfaceOut) {
        if let Some(action) = self.actions.get_mut(self.step) {
            action.cancel(out);
        }
        out.set_control(ControlState::default());
    }

    fn fail(&mut self, error: PathError, out: &mut impl InterfaceOut) -> Progress {
        self.stop(out);
        self.outcome = Some(Err(error));
        Progress::Failed(error)
    }

    pub fn tick(
        &mut self,
        out: &mut impl InterfaceOut,
        local: &mut LocalState,
        world: &impl BlockAccess,
    ) -> Progress {
        if let Some(outcome) = self.outcome {
            return outcome.into();
        }

        let bot_id = local.bot_id;

        loop {
            let step = self.step;
            let Some(action) = self.actions.get_mut(step) else {
                debug!(bot_id, steps = step, "route finished");
                self.stop(out);
                self.outcome = Some(Ok(()));
                return Progress::Finished;
            };

            match self.states[step] {
                ActionState::Pending => {
                    if action.is_completed(local, world) {
                        trace!(bot_id, step, action = action.name(), "already completed");
                        self.states[step] = ActionState::Completed;
                        self.step += 1;
                        continue;
                    }

                    if let Err(divergence) = action.verify(local, world) {
                        warn!(bot_id, step, action = action.name(), ?divergence, "diverged");
                        let error = match divergence {
                            Divergence::World => PathError::PreconditionDiverged(step),
                            Divergence::Inventory => PathError::InventoryExhausted(step),
                        };
                        return self.fail(error, out);
                    }

                    debug!(bot_id, step, action = action.name(), "activated");
                    self.states[step] = ActionState::Active;
                    self.ticks_active = 0;
                }
                ActionState::Active => {
                    if action.is_completed(local, world) {
                        debug!(bot_id, step, ticks = self.ticks_active, "completed");
                        self.states[step] = ActionState::Completed;
                        self.step += 1;
                        continue;
                    }

                    self.ticks_active += 1;
                    if self.ticks_active > action.allowed_ticks() {
                        warn!(bot_id, step, action = action.name(), "timed out");
                        self.states[step] = ActionState::TimedOut;
                        return self.fail(PathError::ActionTimedOut(step), out);
                    }

                    action.tick(out, local);
                    return Progress::InProgress;
                }
                ActionState::Completed => self.step += 1,
                ActionState::TimedOut | ActionState::Aborted => {
                    return self.outcome.unwrap_or(Err(PathError::Aborted)).into();
                }
            }
        }
    }

    /// Stop the route. Calling this more than once or after the route has
    /// ended does nothing.
    pub fn abort(&mut self, out: &mut impl InterfaceOut, local: &LocalState) {
        if self.outcome.is_some() {
            return;
        }

        debug!(bot_id = local.bot_id, step = self.step, "aborted");
        if let Some(state) = self.states.get_mut(self.step) {
            *state = ActionState::Aborted;
        }

        self.stop(out);
        self.outcome = Some(Err(PathError::Aborted));
    }
}

/// A bot which a route can run on. As in a session loop, the commands issued
/// during a tick take effect at [`Session::end_tick`].
pub trait Session {
    type Out: InterfaceOut;
    type World: BlockAccess;

    fn parts(&mut self) -> (&mut Self::Out, &mut LocalState, &Self::World);

    fn end_tick(&mut self) {}
}

/// Run `route` one step per item of `ticks`. The stream ending before the
/// route does counts as an abort.
pub async fn execute<S: Session>(route: Route, session: &mut S, ticks: impl Stream) -> Res {
    execute_until(route, session, ticks, std::future::pending::<()>()).await
}

/// [`execute`], aborting as soon as `abort` resolves
pub async fn execute_until<S: Session>(
    route: Route,
    session: &mut S,
    ticks: impl Stream,
    abort: impl Future,
) -> Res {
    let mut executor = RouteExecutor::new(route);

    tokio::pin!(ticks);
    tokio::pin!(abort);

    loop {
        tokio::select! {
            biased;

            _ = &mut abort => break,

            tick = ticks.next() => {
                if tick.is_none() {
                    break;
                }

                let (out, local, world) = session.parts();
                let progress = executor.tick(out, local, world);
                session.end_tick();

                match progress {
                    Progress::InProgress => {}
                    Progress::Finished => return Ok(()),
                    Progress::Failed(err) => return Err(err),
                }
            }
        }
    }

    let (out, local, _) = session.parts();
    executor.abort(out, local);
    session.end_tick();
    Err(PathError::Aborted)
}
