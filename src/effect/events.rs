/// Pointer events the effect listens for on its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    Enter,
    Leave,
}

/// Handle to one subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug)]
struct Subscription {
    id: SubscriptionId,
    event: PointerEvent,
}

/// Live event subscriptions of one effect instance.
#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    subs: Vec<Subscription>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, event: PointerEvent) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subs.push(Subscription { id, event });
        id
    }

    /// Remove one subscription. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.subs.len();
        self.subs.retain(|s| s.id != id);
        self.subs.len() != before
    }

    pub fn remove_all(&mut self) {
        self.subs.clear();
    }

    pub fn is_subscribed(&self, event: PointerEvent) -> bool {
        self.subs.iter().any(|s| s.event == event)
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/events.rs"]
mod tests;
