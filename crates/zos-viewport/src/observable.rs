//! Multi-subscriber notification channel
//!
//! Handlers are called synchronously, in the order they were added. The
//! handler list is snapshotted at the start of [`Observable::fire`], so a
//! handler that adds or removes subscriptions affects the next fire only.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

/// Insertion-ordered set of handlers sharing one payload type
///
/// Cloning an observable yields another handle to the same registry.
pub struct Observable<T = ()> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T: 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("handlers", &self.registry.borrow().handlers.len())
            .finish()
    }
}

impl<T: 'static> Observable<T> {
    /// Create an observable with no handlers
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Register a handler. The returned handle removes it again.
    pub fn add(&self, handler: impl Fn(&T) + 'static) -> Unlisten {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, Rc::new(handler)));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Unlisten::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().handlers.retain(|(hid, _)| *hid != id);
            }
        })
    }

    /// Call every registered handler with `payload`
    pub fn fire(&self, payload: &T) {
        let snapshot: Vec<Handler<T>> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            handler(payload);
        }
    }

    /// Drop every handler
    pub fn remove_all(&self) {
        self.registry.borrow_mut().handlers.clear();
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`Observable::add`]
///
/// Dropping the handle keeps the subscription alive; call
/// [`Unlisten::unlisten`] to remove it.
pub struct Unlisten {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Unlisten {
    pub(crate) fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Remove the handler this handle was created for
    pub fn unlisten(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for Unlisten {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unlisten")
            .field("active", &self.remove.is_some())
            .finish()
    }
}
