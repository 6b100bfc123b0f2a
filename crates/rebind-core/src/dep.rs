use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::reactive;
use crate::watcher::{Binding, BindingId, BindingInner};

pub type DepId = u64;

thread_local! {
    static NEXT_DEP: Cell<DepId> = const { Cell::new(1) };
}

/// Per-property subscriber list.
///
/// Subscribers are held weakly: the owner of a [`Binding`] decides how long
/// it lives, and dead entries are pruned on the next `notify`.
#[derive(Clone)]
pub struct Dep(Rc<DepInner>);

struct DepInner {
    id: DepId,
    subs: RefCell<SmallVec<[Weak<BindingInner>; 4]>>,
}

impl Dep {
    pub(crate) fn new() -> Self {
        let id = NEXT_DEP.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        Self(Rc::new(DepInner {
            id,
            subs: RefCell::new(SmallVec::new()),
        }))
    }

    pub fn id(&self) -> DepId {
        self.0.id
    }

    /// Subscribes the binding in the active slot, if there is one.
    pub fn depend(&self) {
        if let Some(binding) = reactive::active() {
            binding.add_dep(self);
        }
    }

    /// Appends unconditionally; deduplication happens in the binding.
    pub fn add(&self, binding: &Binding) {
        log::trace!("dep #{}: subscribe binding #{}", self.0.id, binding.id());
        self.0.subs.borrow_mut().push(binding.downgrade());
    }

    pub fn remove(&self, id: BindingId) {
        self.0.subs.borrow_mut().retain(|w| match w.upgrade() {
            Some(b) => b.id != id,
            None => false,
        });
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.0
            .subs
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `update()` on every subscriber in subscription order.
    ///
    /// Iterates over a snapshot so updates may write back into the graph.
    pub fn notify(&self) {
        let subs: SmallVec<[Binding; 4]> = {
            let mut subs = self.0.subs.borrow_mut();
            subs.retain(|w| w.strong_count() > 0);
            subs.iter()
                .filter_map(Weak::upgrade)
                .map(Binding::from_inner)
                .collect()
        };
        log::trace!("dep #{}: notify {} binding(s)", self.0.id, subs.len());
        for binding in subs {
            binding.update();
        }
    }
}
