//! Observer registry
//!
//! Observers are registered up front and invoked synchronously, in registration order,
//! for every notification.

use crate::types::notification::Notification;
use std::cell::RefCell;
use std::rc::Rc;

/// Receives engine notifications
pub trait Observer {
    fn notify(&mut self, notification: &Notification);
}

/// Shared observers stay readable by the host after registration
impl<T: Observer + ?Sized> Observer for Rc<RefCell<T>> {
    fn notify(&mut self, notification: &Notification) {
        self.borrow_mut().notify(notification);
    }
}

/// Adapts a closure into an [`Observer`]
pub struct FnObserver<F>(pub F);

impl<F: FnMut(&Notification)> Observer for FnObserver<F> {
    fn notify(&mut self, notification: &Notification) {
        (self.0)(notification);
    }
}

/// Records every notification it receives
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub notifications: Vec<Notification>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of recorded notifications, in order
    pub fn names(&self) -> Vec<&str> {
        self.notifications.iter().map(Notification::name).collect()
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

impl Observer for Recorder {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

/// Ordered list of registered observers
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn Observer>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn broadcast(&mut self, notification: &Notification) {
        for observer in &mut self.observers {
            observer.notify(notification);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
