//! The progression state machine.
//!
//! Transitions are synchronous and exclusive: the outgoing state's `exit`
//! completes, its subscriptions are revoked, then the incoming state's
//! `enter` runs. Requests raised while a handler runs are queued on the
//! session and applied in order as soon as the handler returns.
//!
//! Conflict policy:
//! - at most one delayed transition is pending; a new delayed request replaces it;
//! - any immediate transition discards the pending delayed one;
//! - victory and defeat refuse every request. Only a session restart leaves them.

use nexus_core::commands::InputEvent;
use nexus_core::enums::{LootButton, StateId};
use nexus_core::events::GameEvent;

use crate::bus::Topic;
use crate::progression::GameState;
use crate::session::{Session, Transition};

#[derive(Debug)]
struct PendingTransition {
    next: GameState,
    remaining: f32,
}

#[derive(Debug)]
pub struct StateMachine {
    current: GameState,
    /// Bumped on every transition; subscriptions are scoped to it.
    generation: u64,
    pending: Option<PendingTransition>,
}

impl StateMachine {
    /// Enter the opening state of a fresh session.
    pub fn start(session: &mut Session) -> Self {
        let mut machine = Self {
            current: GameState::initial(),
            generation: 0,
            pending: None,
        };
        session.bus.set_scope(machine.generation);
        machine.current.stage().enter(session);
        session.emit(GameEvent::StateChanged {
            from: None,
            to: machine.current.id(),
        });
        machine.apply_requests(session);
        machine
    }

    pub fn current(&self) -> &GameState {
        &self.current
    }

    pub fn id(&self) -> StateId {
        self.current.id()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Target and remaining delay of the pending delayed transition.
    pub fn pending(&self) -> Option<(StateId, f32)> {
        self.pending.as_ref().map(|p| (p.next.id(), p.remaining))
    }

    /// Run one tick of the live state, firing the pending delayed transition first if due.
    pub fn update(&mut self, session: &mut Session, dt: f32) {
        if let Some(pending) = self.pending.as_mut() {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                if let Some(pending) = self.pending.take() {
                    self.transition(session, pending.next);
                }
            }
        }
        self.apply_requests(session);

        self.current.stage().update(session, dt);
        self.apply_requests(session);
    }

    pub fn handle_action(&mut self, session: &mut Session, event: InputEvent) {
        if session.bus.is_subscribed(Topic::Action) {
            self.current.stage().on_action(session, event);
            self.apply_requests(session);
        }
    }

    pub fn handle_loot(&mut self, session: &mut Session, button: LootButton) {
        if session.bus.is_subscribed(Topic::Loot) {
            self.current.stage().on_loot(session, button);
            self.apply_requests(session);
        } else {
            log::debug!("loot choice {button:?} ignored in {:?}", self.id());
        }
    }

    /// Route queued gameplay events to the live state, in emission order.
    pub fn dispatch_events(&mut self, session: &mut Session) {
        self.apply_requests(session);
        while let Some(event) = session.inbox.pop_front() {
            let Some(topic) = Topic::for_event(&event) else {
                continue;
            };
            if session.bus.is_subscribed(topic) {
                self.current.stage().on_event(session, &event);
                self.apply_requests(session);
            }
        }
    }

    /// Apply every queued transition request.
    pub fn apply_requests(&mut self, session: &mut Session) {
        while let Some(request) = session.transitions.pop_front() {
            self.request(session, request);
        }
    }

    /// Apply a single transition request under the conflict policy.
    pub fn request(&mut self, session: &mut Session, request: Transition) {
        let current = self.id();
        if current.is_terminal() {
            let next = match &request {
                Transition::Now(next) | Transition::After(next, _) => next.id(),
            };
            log::debug!("{current:?} is terminal, dropping request for {next:?}");
            return;
        }

        match request {
            Transition::Now(next) => {
                if let Some(dropped) = self.pending.take() {
                    log::debug!(
                        "immediate transition to {:?} cancels pending {:?}",
                        next.id(),
                        dropped.next.id()
                    );
                }
                self.transition(session, next);
            }
            Transition::After(next, delay_secs) => {
                if let Some(replaced) = &self.pending {
                    log::debug!(
                        "delayed transition to {:?} replaces pending {:?}",
                        next.id(),
                        replaced.next.id()
                    );
                }
                self.pending = Some(PendingTransition {
                    next,
                    remaining: delay_secs,
                });
            }
        }
    }

    fn transition(&mut self, session: &mut Session, next: GameState) {
        let from = self.current.id();
        self.current.stage().exit(session);

        let revoked = session.bus.revoke_scope(self.generation);
        self.generation += 1;
        session.bus.set_scope(self.generation);

        self.current = next;
        let to = self.current.id();
        log::debug!("state {from:?} -> {to:?} ({revoked} subscriptions revoked)");
        session.emit(GameEvent::StateChanged {
            from: Some(from),
            to,
        });
        self.current.stage().enter(session);
    }
}
