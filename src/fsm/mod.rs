//! Pet behaviour state machine.
//!
//! States are a closed tagged variant ([`PetState`]) carrying their own
//! timers and data, dispatched through one `match` per lifecycle hook:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  PetState        │ on_enter        │ on_exit      │ update    │
//! ├──────────────────┼─────────────────┼──────────────┼───────────┤
//! │  Idle(timers)    │ arm timers      │ cancel       │ ground?   │
//! │  Move(target)    │ start check     │ stop check   │ walk      │
//! │  Jump(saved)     │ resize sprite   │ restore size │ frame>=N? │
//! │  Fall            │ fall anim       │ –            │ landed?   │
//! │  Run             │ –               │ –            │ –         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions are *queued*: a request made during `update()` (or from
//! outside, e.g. a signal) is applied at the top of the next
//! [`Fsm::tick`], which runs `on_exit` of the old state, swaps, then
//! `on_enter` of the new one before calling its `update()`.  Every hook
//! receives `&mut PetContext`.

pub mod context;
pub mod states;

use context::PetContext;
use log::{debug, info};

use states::{IdleState, JumpState, MoveState, MoveTarget};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Move = 1,
    Jump = 2,
    Fall = 3,
    /// Placeholder hook; performs no logic.
    Run = 4,
}

impl StateId {
    /// Total number of states; sizes the lifecycle counters.
    pub const COUNT: usize = 5;

    pub const ALL: [StateId; StateId::COUNT] = [
        StateId::Idle,
        StateId::Move,
        StateId::Jump,
        StateId::Fall,
        StateId::Run,
    ];

    /// External state name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Jump => "jumpstage1",
            Self::Fall => "fall",
            Self::Run => "run",
        }
    }
}

// ---------------------------------------------------------------------------
// State value
// ---------------------------------------------------------------------------

/// The current state together with its state-local data.
#[derive(Debug, Clone, PartialEq)]
pub enum PetState {
    Idle(IdleState),
    Move(MoveState),
    Jump(JumpState),
    Fall,
    Run,
}

impl PetState {
    pub fn idle() -> Self {
        Self::Idle(IdleState::default())
    }

    pub fn moving(target: MoveTarget) -> Self {
        Self::Move(MoveState::new(target))
    }

    pub fn jump() -> Self {
        Self::Jump(JumpState::default())
    }

    pub fn id(&self) -> StateId {
        match self {
            Self::Idle(_) => StateId::Idle,
            Self::Move(_) => StateId::Move,
            Self::Jump(_) => StateId::Jump,
            Self::Fall => StateId::Fall,
            Self::Run => StateId::Run,
        }
    }
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    current: PetState,
    /// Transition waiting for the top of the next tick.
    pending: Option<PetState>,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
    enters: [u64; StateId::COUNT],
    exits: [u64; StateId::COUNT],
}

impl Fsm {
    /// Construct a new FSM starting in `initial`.  Call [`start`](Self::start)
    /// before the first tick.
    pub fn new(initial: PetState) -> Self {
        Self {
            current: initial,
            pending: None,
            tick_count: 0,
            state_entry_tick: 0,
            enters: [0; StateId::COUNT],
            exits: [0; StateId::COUNT],
        }
    }

    /// Run the initial `on_enter`.
    pub fn start(&mut self, ctx: &mut PetContext) {
        info!("FSM starting in state: {}", self.current.id().name());
        self.enters[self.current.id() as usize] += 1;
        states::on_enter(&mut self.current, ctx);
    }

    /// Queue a transition for the top of the next tick.
    ///
    /// Requesting the state that is already current does nothing, and in
    /// particular does not cancel a different transition already queued.
    /// Otherwise the latest request wins.
    pub fn request(&mut self, next: PetState) {
        if next.id() == self.current.id() {
            return;
        }
        debug!("FSM queued: {} -> {}", self.current.id().name(), next.id().name());
        self.pending = Some(next);
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Apply a queued transition: `on_exit(current)` → swap → `on_enter(next)`.
    /// 2. Call `update` for the current state.
    /// 3. If it returns `Some(next)`, queue it for the next tick.
    pub fn tick(&mut self, ctx: &mut PetContext) {
        self.tick_count += 1;

        if let Some(next) = self.pending.take() {
            self.transition(next, ctx);
        }

        if let Some(next) = states::update(&mut self.current, ctx) {
            self.request(next);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.current.id()
    }

    /// The current state with its data.
    pub fn state(&self) -> &PetState {
        &self.current
    }

    /// The queued transition, if any.
    pub fn pending_state(&self) -> Option<StateId> {
        self.pending.as_ref().map(PetState::id)
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    /// Number of times `id` has been entered (including the start).
    pub fn enter_count(&self, id: StateId) -> u64 {
        self.enters[id as usize]
    }

    /// Number of times `id` has been exited.
    pub fn exit_count(&self, id: StateId) -> u64 {
        self.exits[id as usize]
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: PetState, ctx: &mut PetContext) {
        info!(
            "FSM transition: {} -> {}",
            self.current.id().name(),
            next.id().name()
        );

        states::on_exit(&mut self.current, ctx);
        self.exits[self.current.id() as usize] += 1;

        self.current = next;
        self.state_entry_tick = self.tick_count;

        self.enters[self.current.id() as usize] += 1;
        states::on_enter(&mut self.current, ctx);
    }
}
