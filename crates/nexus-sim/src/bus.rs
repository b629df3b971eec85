//! State-scoped event subscriptions.
//!
//! Every subscription is tagged with the generation of the progression state
//! that made it. The state machine revokes a whole generation when that
//! state exits, so a handler can never outlive the state that owns it.

use nexus_core::events::GameEvent;

/// Notification channels a progression state can listen on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Pointer input (`ActionStarted` and friends).
    Action,
    /// Loot window buttons.
    Loot,
    /// Player engagement markers resolving.
    Marker,
    /// Enemy damage and defeat.
    Enemy,
}

impl Topic {
    /// Topic a gameplay event is routed on, if any state may care about it.
    pub fn for_event(event: &GameEvent) -> Option<Topic> {
        match event {
            GameEvent::EnemyDamaged { .. } | GameEvent::EnemyDefeated { .. } => Some(Topic::Enemy),
            GameEvent::MarkerResolved { .. } => Some(Topic::Marker),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Subscription {
    topic: Topic,
    scope: u64,
}

#[derive(Debug, Default)]
pub struct Subscriptions {
    active: Vec<Subscription>,
    scope: u64,
}

impl Subscriptions {
    /// Generation new subscriptions are tagged with.
    pub fn scope(&self) -> u64 {
        self.scope
    }

    pub(crate) fn set_scope(&mut self, scope: u64) {
        self.scope = scope;
    }

    /// Subscribe the live state to `topic`. Subscribing twice is a no-op.
    pub fn subscribe(&mut self, topic: Topic) -> bool {
        if self.is_subscribed(topic) {
            return false;
        }
        self.active.push(Subscription {
            topic,
            scope: self.scope,
        });
        true
    }

    pub fn unsubscribe(&mut self, topic: Topic) {
        let scope = self.scope;
        self.active.retain(|s| !(s.topic == topic && s.scope == scope));
    }

    pub fn is_subscribed(&self, topic: Topic) -> bool {
        self.active
            .iter()
            .any(|s| s.topic == topic && s.scope == self.scope)
    }

    /// Drop every subscription made under `scope`. Returns how many were removed.
    pub fn revoke_scope(&mut self, scope: u64) -> usize {
        let before = self.active.len();
        self.active.retain(|s| s.scope != scope);
        before - self.active.len()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Topics currently subscribed, in subscription order.
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        self.active.iter().map(|s| s.topic)
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::enums::MarkerKind;

    #[test]
    fn test_subscribe_is_idempotent() {
        let mut bus = Subscriptions::default();
        assert!(bus.subscribe(Topic::Action));
        assert!(!bus.subscribe(Topic::Action));
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn test_revoke_scope_only_drops_that_generation() {
        let mut bus = Subscriptions::default();
        bus.subscribe(Topic::Loot);
        bus.set_scope(1);
        bus.subscribe(Topic::Enemy);
        assert_eq!(bus.revoke_scope(0), 1);
        assert_eq!(bus.topics().collect::<Vec<_>>(), vec![Topic::Enemy]);
    }

    #[test]
    fn test_old_generation_is_not_visible() {
        let mut bus = Subscriptions::default();
        bus.subscribe(Topic::Action);
        bus.set_scope(1);
        assert!(!bus.is_subscribed(Topic::Action));
    }

    #[test]
    fn test_event_topics() {
        assert_eq!(
            Topic::for_event(&GameEvent::EnemyDefeated { entity: 3 }),
            Some(Topic::Enemy)
        );
        assert_eq!(
            Topic::for_event(&GameEvent::MarkerResolved {
                kind: MarkerKind::Nexus
            }),
            Some(Topic::Marker)
        );
        assert_eq!(Topic::for_event(&GameEvent::LevelStarted { level: 2 }), None);
    }
}
