use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Entry<T> {
    id: u64,
    once: bool,
    listener: Listener<T>,
}

struct Inner<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Inner<T> {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }
}

/// A minimal single-threaded publish/subscribe channel.
///
/// Clones share the same listener list. Listeners may subscribe, unsubscribe or emit while being
/// notified: [`Subject::next`] works on a snapshot and skips listeners removed mid-dispatch.
pub struct Subject<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subject")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<T> Subject<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Registers `on_next` for every subsequent value.
    pub fn subscribe(&self, on_next: impl Fn(&T) + 'static) -> Subscription<T> {
        self.register(Rc::new(on_next), false)
    }

    /// Registers `on_next` for the next value only.
    pub fn once(&self, on_next: impl Fn(&T) + 'static) -> Subscription<T> {
        self.register(Rc::new(on_next), true)
    }

    /// Delivers `value` to the listeners registered when the call started.
    pub fn next(&self, value: T) {
        let snapshot: Vec<(u64, bool, Listener<T>)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|e| (e.id, e.once, Rc::clone(&e.listener)))
            .collect();

        for (id, once, listener) in snapshot {
            {
                let mut inner = self.inner.borrow_mut();
                if !inner.contains(id) {
                    continue;
                }
                if once {
                    inner.remove(id);
                }
            }
            listener(&value);
        }
    }

    fn register(&self, listener: Listener<T>, once: bool) -> Subscription<T> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.entries.push(Entry { id, once, listener });
        Subscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }
}

/// Handle returned by [`Subject::subscribe`] and [`Subject::once`].
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
pub struct Subscription<T> {
    inner: Weak<RefCell<Inner<T>>>,
    id: u64,
}

impl<T> Subscription<T> {
    /// Stops delivery. Returns `false` if the listener was already gone.
    pub fn unsubscribe(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) => inner.borrow_mut().remove(self.id),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) => inner.borrow().contains(self.id),
            None => false,
        }
    }
}

impl<T> core::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
