//! Alien behavior states and the transition table
//!
//! Every edge the alien can take is listed in [`AlienState::on`]. Handlers
//! raise [`AlienEvent`]s and the table decides where they lead, so an event
//! that makes no sense in the current state is simply ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Alien behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlienState {
    ComputePatrol,
    Patrol,
    ComputeSearch,
    Search,
    ComputeChase,
    Chase,
    ComputeVentPatrol,
    VentPatrol,
    ComputeNearestVentEntry,
    GoToNearestVentEntry,
    EnterVent,
    ComputeNearestVentExit,
    GoToNearestVentExit,
    ExitVent,
    Rush,
    Hiss,
    LookAround,
    Kill,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienEvent {
    /// Perceptible player inside kill range
    PlayerInKillRange,
    /// Perceptible player inside rush range
    PlayerInRushRange,
    /// Perceptible player anywhere else
    PlayerSpotted,
    /// Player no longer perceptible
    PlayerLost,
    HissElapsed,
    /// A compute state produced a plan
    PathPlanned,
    /// Arrived at the end of the current path
    PathExhausted,
    /// Chase replan interval elapsed while the player is visible
    RefreshDue,
    /// Sight lost past both the grace period and the chase window
    ChaseExpired,
    SearchExpired,
    VentEntered,
    VentExited,
    /// Look-around finished; resume the interrupted state
    Resume(AlienState),
    /// Director nudged the patrol target
    HintReceived,
    EnterVentsOrdered,
    ExitVentsOrdered,
}

impl AlienState {
    /// Planning states run once and hand over to their action state
    pub fn is_compute(self) -> bool {
        self.action().is_some()
    }

    /// Action state a compute state hands over to
    pub fn action(self) -> Option<AlienState> {
        use AlienState::*;
        match self {
            ComputePatrol => Some(Patrol),
            ComputeSearch => Some(Search),
            ComputeChase => Some(Chase),
            ComputeVentPatrol => Some(VentPatrol),
            ComputeNearestVentEntry => Some(GoToNearestVentEntry),
            ComputeNearestVentExit => Some(GoToNearestVentExit),
            _ => None,
        }
    }

    /// Compute state that plans for this action state
    pub fn compute_precursor(self) -> Option<AlienState> {
        use AlienState::*;
        match self {
            Patrol | ComputePatrol => Some(ComputePatrol),
            Search | ComputeSearch => Some(ComputeSearch),
            Chase | ComputeChase => Some(ComputeChase),
            VentPatrol | ComputeVentPatrol => Some(ComputeVentPatrol),
            GoToNearestVentEntry | ComputeNearestVentEntry => Some(ComputeNearestVentEntry),
            GoToNearestVentExit | ComputeNearestVentExit => Some(ComputeNearestVentExit),
            _ => None,
        }
    }

    /// States in which the alien is actively after the player
    pub fn is_hunting(self) -> bool {
        use AlienState::*;
        matches!(self, Hiss | ComputeChase | Chase | Rush | Kill)
    }

    /// States spent inside the vent network
    pub fn is_backstage(self) -> bool {
        use AlienState::*;
        matches!(
            self,
            ComputeVentPatrol | VentPatrol | ComputeNearestVentExit | GoToNearestVentExit
        )
    }

    /// Next state for `event`, or `None` if the event has no effect here
    pub fn on(self, event: AlienEvent) -> Option<AlienState> {
        use AlienEvent as E;
        use AlienState::*;

        if self == Kill {
            return None;
        }

        let next = match (self, event) {
            (_, E::PlayerInKillRange) => Kill,
            (Rush, E::PlayerInRushRange) => return None,
            (_, E::PlayerInRushRange) => Rush,
            (Hiss | Chase | ComputeChase, E::PlayerSpotted) => return None,
            (_, E::PlayerSpotted) => Hiss,

            (Hiss, E::PlayerLost | E::HissElapsed) => ComputeChase,
            (Rush, E::PlayerLost) => ComputeSearch,

            (state, E::PathPlanned) => state.action()?,

            (Patrol | Search, E::PathExhausted) => LookAround,
            (Chase, E::PathExhausted) => ComputeChase,
            (VentPatrol, E::PathExhausted) => ComputeVentPatrol,
            (GoToNearestVentEntry, E::PathExhausted) => EnterVent,
            (GoToNearestVentExit, E::PathExhausted) => ExitVent,

            (Chase, E::RefreshDue) => ComputeChase,
            (Chase, E::ChaseExpired) => ComputeSearch,
            (Search, E::SearchExpired) => ComputePatrol,

            (EnterVent, E::VentEntered) => ComputeVentPatrol,
            (ExitVent, E::VentExited) => ComputePatrol,

            (LookAround, E::Resume(previous)) => previous.compute_precursor().unwrap_or(ComputePatrol),

            (Patrol, E::HintReceived) => ComputePatrol,

            (Patrol | ComputePatrol | Search | ComputeSearch | LookAround, E::EnterVentsOrdered) => {
                ComputeNearestVentEntry
            }
            (ComputeVentPatrol | VentPatrol, E::ExitVentsOrdered) => ComputeNearestVentExit,

            _ => return None,
        };
        Some(next)
    }
}

impl fmt::Display for AlienState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AlienState::*;
        let tag = match self {
            ComputePatrol => "COMPUTE_PATROL",
            Patrol => "PATROL",
            ComputeSearch => "COMPUTE_SEARCH",
            Search => "SEARCH",
            ComputeChase => "COMPUTE_CHASE",
            Chase => "CHASE",
            ComputeVentPatrol => "COMPUTE_VENT_PATROL",
            VentPatrol => "VENT_PATROL",
            ComputeNearestVentEntry => "COMPUTE_NEAREST_VENT_ENTRY",
            GoToNearestVentEntry => "GO_TO_NEAREST_VENT_ENTRY",
            EnterVent => "ENTER_VENT",
            ComputeNearestVentExit => "COMPUTE_NEAREST_VENT_EXIT",
            GoToNearestVentExit => "GO_TO_NEAREST_VENT_EXIT",
            ExitVent => "EXIT_VENT",
            Rush => "RUSH",
            Hiss => "HISS",
            LookAround => "LOOK_AROUND",
            Kill => "KILL",
        };
        f.write_str(tag)
    }
}
