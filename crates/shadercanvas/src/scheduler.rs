/// Lifecycle of the repaint loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No program has linked yet.
    #[default]
    Idle,
    /// A drawable program exists and ticks are being re-armed.
    Running,
    /// The loop was cancelled (unmount, relink) or died against a
    /// missing context/program. Only a fresh link leaves this state.
    Stopped,
}

/// Permission to run exactly one tick of the repaint loop.
///
/// Tickets are single-use (consumed by `frame`) and carry the generation
/// that issued them; a ticket that outlives its program is rejected
/// without re-arming, so a cancelled loop can never resurrect itself.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameTicket {
    pub(crate) generation: u64,
}

/// Drives the continuous repaint loop as an explicit state machine.
///
/// The host owns the actual display-refresh callback; this type decides
/// whether a given tick may run and hands out at most one follow-up
/// ticket per tick, so there is never more than one in flight. It also
/// owns the frame clock: host timestamps arrive in milliseconds and are
/// held in seconds, frozen while time updates are disabled.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    state: SchedulerState,
    generation: u64,
    time_seconds: f32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Clock value bound to the `time` uniform, in seconds.
    pub fn time_seconds(&self) -> f32 {
        self.time_seconds
    }

    /// Starts a fresh loop for a newly linked program. Any ticket from
    /// an earlier generation becomes stale at this point.
    pub(crate) fn start(&mut self) -> FrameTicket {
        self.generation += 1;
        self.state = SchedulerState::Running;
        FrameTicket {
            generation: self.generation,
        }
    }

    /// Stops the loop and invalidates outstanding tickets.
    pub(crate) fn cancel(&mut self) {
        self.generation += 1;
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Stopped;
        }
    }

    /// Whether a tick holding `ticket` may proceed.
    pub(crate) fn begin_tick(&self, ticket: &FrameTicket) -> bool {
        self.state == SchedulerState::Running && ticket.generation == self.generation
    }

    /// The tick found a dead context or program: the loop dies here
    /// rather than re-arming against a torn-down target.
    pub(crate) fn halt(&mut self) {
        self.generation += 1;
        self.state = SchedulerState::Stopped;
    }

    /// Hands out the single follow-up ticket from within a valid tick.
    pub(crate) fn reschedule(&self) -> FrameTicket {
        FrameTicket {
            generation: self.generation,
        }
    }

    /// Advances the clock to the host timestamp (milliseconds).
    pub(crate) fn advance(&mut self, timestamp_ms: f64) {
        self.time_seconds = (timestamp_ms * 0.001) as f32;
    }
}
