//! Change notifications published by the store after each mutation.

use crate::menu::MealCategory;
use std::fmt;

/// Something the store just changed and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Dishes were picked, in pick order.
    Picked {
        category: MealCategory,
        dishes: Vec<String>,
    },
    DishAdded {
        category: MealCategory,
        name: String,
    },
    DishRemoved {
        category: MealCategory,
        name: String,
    },
    MenuReset,
    HistoryCleared,
    PlanUpdated {
        category: MealCategory,
    },
}

/// Callback registered with [`EventBus::subscribe`].
pub type Listener = Box<dyn FnMut(&StoreEvent) + Send>;

/// Synchronous fan-out to registered listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver an event to every listener, in subscription order.
    pub fn publish(&mut self, event: StoreEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_publish_reaches_all_listeners_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        for id in 0..2 {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |event| seen.lock().unwrap().push((id, event.clone())));
        }
        bus.publish(StoreEvent::MenuReset);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(0, StoreEvent::MenuReset), (1, StoreEvent::MenuReset)]
        );
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn test_publish_without_listeners() {
        let mut bus = EventBus::new();
        bus.publish(StoreEvent::HistoryCleared);
        assert_eq!(bus.listener_count(), 0);
    }
}
