use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::dep::Dep;
use crate::error::Result;
use crate::path::Path;
use crate::reactive;
use crate::value::Value;

pub type BindingId = u64;

thread_local! {
    static NEXT_BINDING: Cell<BindingId> = const { Cell::new(1) };
}

/// When a binding collects the properties it depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tracking {
    /// Once, while the binding is constructed. Later updates re-resolve the
    /// path without touching the active slot.
    #[default]
    Construction,
    /// On every update: the binding leaves its old registries and re-reads
    /// the path under tracking, so replaced sub-graphs are followed.
    EveryUpdate,
}

/// A live association between an expression path and a callback.
///
/// Cloning yields another handle to the same binding. Registries only hold
/// weak references; the binding stays subscribed for as long as a handle (or
/// a [`Scope`](crate::Scope) holding one) is alive, or until
/// [`Binding::teardown`].
#[derive(Clone)]
pub struct Binding(Rc<BindingInner>);

pub(crate) struct BindingInner {
    pub(crate) id: BindingId,
    root: Value,
    path: Path,
    tracking: Tracking,
    callback: Box<dyn Fn(&Value)>,
    last: RefCell<Value>,
    deps: RefCell<SmallVec<[Dep; 4]>>,
    live: Cell<bool>,
}

impl Binding {
    /// Resolves `path` once under tracking and records the result. The
    /// callback is not invoked for this initial value.
    pub fn new(
        root: &Value,
        path: Path,
        tracking: Tracking,
        on_change: impl Fn(&Value) + 'static,
    ) -> Result<Binding> {
        let id = NEXT_BINDING.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        let binding = Binding(Rc::new(BindingInner {
            id,
            root: root.clone(),
            path,
            tracking,
            callback: Box::new(on_change),
            last: RefCell::new(Value::Null),
            deps: RefCell::new(SmallVec::new()),
            live: Cell::new(true),
        }));

        match binding.collect() {
            Ok(value) => {
                log::debug!(
                    "binding #{id}: created on `{}` with {} dep(s)",
                    binding.path(),
                    binding.dependency_count()
                );
                *binding.0.last.borrow_mut() = value;
                Ok(binding)
            }
            Err(err) => {
                binding.teardown();
                Err(err)
            }
        }
    }

    pub(crate) fn from_inner(inner: Rc<BindingInner>) -> Self {
        Binding(inner)
    }

    pub(crate) fn downgrade(&self) -> Weak<BindingInner> {
        Rc::downgrade(&self.0)
    }

    pub fn id(&self) -> BindingId {
        self.0.id
    }

    pub fn path(&self) -> &Path {
        &self.0.path
    }

    pub fn tracking(&self) -> Tracking {
        self.0.tracking
    }

    /// The last resolved value.
    pub fn value(&self) -> Value {
        self.0.last.borrow().clone()
    }

    pub fn is_live(&self) -> bool {
        self.0.live.get()
    }

    /// Number of distinct registries this binding is subscribed to.
    pub fn dependency_count(&self) -> usize {
        self.0.deps.borrow().len()
    }

    /// Re-resolves the path and invokes the callback if the value changed.
    ///
    /// A failing resolution is logged and leaves the last value in place.
    pub fn update(&self) {
        if !self.is_live() {
            return;
        }
        let next = match self.0.tracking {
            Tracking::Construction => self.0.path.resolve(&self.0.root),
            Tracking::EveryUpdate => {
                self.clear_deps();
                self.collect()
            }
        };
        let next = match next {
            Ok(v) => v,
            Err(err) => {
                log::warn!("binding #{}: re-evaluation failed: {err}", self.id());
                return;
            }
        };

        let changed = {
            let mut last = self.0.last.borrow_mut();
            if last.same(&next) {
                false
            } else {
                *last = next.clone();
                true
            }
        };
        if changed {
            log::trace!("binding #{}: `{}` changed", self.id(), self.path());
            (self.0.callback)(&next);
        }
    }

    /// Leaves every registry and ignores further notifications.
    pub fn teardown(&self) {
        if self.0.live.replace(false) {
            log::debug!("binding #{}: teardown `{}`", self.id(), self.path());
        }
        self.clear_deps();
    }

    /// Subscribes to `dep` unless already subscribed.
    pub(crate) fn add_dep(&self, dep: &Dep) {
        {
            let mut deps = self.0.deps.borrow_mut();
            if deps.iter().any(|d| d.id() == dep.id()) {
                return;
            }
            deps.push(dep.clone());
        }
        dep.add(self);
    }

    fn collect(&self) -> Result<Value> {
        let _slot = reactive::enter(self)?;
        self.0.path.resolve(&self.0.root)
    }

    fn clear_deps(&self) {
        let deps = std::mem::take(&mut *self.0.deps.borrow_mut());
        for dep in deps {
            dep.remove(self.id());
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.0.id)
            .field("path", &self.0.path.to_string())
            .field("tracking", &self.0.tracking)
            .field("live", &self.0.live.get())
            .finish()
    }
}
