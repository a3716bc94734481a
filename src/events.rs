//! Single-threaded event emitters and disposable subscriptions.
//!
//! Everything here runs on one event loop, so shared state is `Rc`/`RefCell`
//! and emission is synchronous: `fire` returns after every live listener ran.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// A resource released by an explicit call. Calling `dispose` twice is a no-op.
pub trait Disposable {
    fn dispose(&mut self);
}

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Registration<T> {
    id: u64,
    alive: Rc<Cell<bool>>,
    listener: Listener<T>,
}

struct EmitterInner<T> {
    next_id: Cell<u64>,
    registrations: RefCell<Vec<Registration<T>>>,
}

/// Broadcasts events of type `T` to subscribed listeners.
///
/// Clones share the same listener list.
pub struct Emitter<T> {
    inner: Rc<EmitterInner<T>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(EmitterInner {
                next_id: Cell::new(0),
                registrations: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is disposed or dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let alive = Rc::new(Cell::new(true));
        let listener: Listener<T> = Rc::new(RefCell::new(listener));
        self.inner.registrations.borrow_mut().push(Registration {
            id,
            alive: Rc::clone(&alive),
            listener,
        });

        let weak: Weak<EmitterInner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            alive,
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.registrations.borrow_mut().retain(|r| r.id != id);
                }
            })),
        }
    }

    /// Deliver `event` to every listener, in subscription order.
    ///
    /// A listener disposed by an earlier listener during the same emission is
    /// skipped.
    pub fn fire(&self, event: &T) {
        let snapshot: Vec<(Rc<Cell<bool>>, Listener<T>)> = self
            .inner
            .registrations
            .borrow()
            .iter()
            .map(|r| (Rc::clone(&r.alive), Rc::clone(&r.listener)))
            .collect();

        for (alive, listener) in snapshot {
            if alive.get() {
                (&mut *listener.borrow_mut())(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.registrations.borrow().len()
    }
}

/// Handle for one listener registration.
pub struct Subscription {
    alive: Rc<Cell<bool>>,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn is_disposed(&self) -> bool {
        !self.alive.get()
    }
}

impl Disposable for Subscription {
    fn dispose(&mut self) {
        self.alive.set(false);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// A set of disposables released together.
///
/// Items added after the store was disposed are disposed immediately.
#[derive(Default)]
pub struct DisposableStore {
    items: Vec<Box<dyn Disposable>>,
    disposed: bool,
}

impl DisposableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<D>(&mut self, item: D)
    where
        D: Disposable + 'static,
    {
        let mut item = Box::new(item);
        if self.disposed {
            log::warn!("disposable added to an already disposed store, releasing it");
            item.dispose();
        } else {
            self.items.push(item);
        }
    }

    /// Dispose the current items but keep accepting new ones.
    pub fn clear(&mut self) {
        for mut item in self.items.drain(..) {
            item.dispose();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Disposable for DisposableStore {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.clear();
    }
}

impl Drop for DisposableStore {
    fn drop(&mut self) {
        self.dispose();
    }
}
