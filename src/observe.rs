use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type Callback<T> = Rc<dyn Fn(&T)>;

/// Single-threaded list of change callbacks.
pub struct Observers<T> {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(u64, Callback<T>)>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            callbacks: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Observers<T> {
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks.borrow_mut().push((id, Rc::new(callback)));
        Subscription(id)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.callbacks
            .borrow_mut()
            .retain(|(id, _)| *id != subscription.0);
    }

    /// Call every subscriber with `value`. Callbacks may subscribe or
    /// unsubscribe re-entrantly.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for cb in snapshot {
            cb(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_unsubscribe() {
        let observers = Observers::<u32>::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let sub = observers.subscribe(move |v| sink.borrow_mut().push(*v));
        observers.emit(&1);
        observers.unsubscribe(sub);
        observers.emit(&2);

        assert_eq!(*seen.borrow(), vec![1]);
    }
}
