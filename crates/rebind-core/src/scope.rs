use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::path::Path;
use crate::value::Value;
use crate::watcher::{Binding, Tracking};

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Weak<ScopeInner>>> = const { RefCell::new(None) };
}

/// Owns the bindings created for one view (or one part of it) and tears them
/// down together.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    bindings: RefCell<Vec<Binding>>,
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
    children: RefCell<Vec<Scope>>,
}

impl ScopeInner {
    fn dispose(&self) {
        // Children first
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children {
            child.dispose();
        }

        let bindings = std::mem::take(&mut *self.bindings.borrow_mut());
        if !bindings.is_empty() {
            log::debug!("scope: tearing down {} binding(s)", bindings.len());
        }
        for binding in bindings {
            binding.teardown();
        }

        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner::default()),
        }
    }

    /// Runs `f` with this scope as the current one, so [`crate::watch`]
    /// registers its bindings here.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        struct Restore(Option<Weak<ScopeInner>>);
        impl Drop for Restore {
            fn drop(&mut self) {
                let prev = self.0.take();
                CURRENT_SCOPE.with(|current| *current.borrow_mut() = prev);
            }
        }

        let prev = CURRENT_SCOPE.with(|current| {
            current
                .borrow_mut()
                .replace(Rc::downgrade(&self.inner))
        });
        let _restore = Restore(prev);
        f()
    }

    /// Creates a binding owned by this scope.
    pub fn watch(
        &self,
        root: &Value,
        expr: &str,
        tracking: Tracking,
        on_change: impl Fn(&Value) + 'static,
    ) -> Result<Binding> {
        let binding = Binding::new(root, Path::parse(expr)?, tracking, on_change)?;
        self.adopt(binding.clone());
        Ok(binding)
    }

    /// Keeps `binding` alive until this scope is disposed.
    pub fn adopt(&self, binding: Binding) {
        self.inner.bindings.borrow_mut().push(binding);
    }

    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn child(&self) -> Scope {
        let child = Scope::new();
        self.inner.children.borrow_mut().push(child.clone());
        child
    }

    /// Number of bindings owned directly by this scope.
    pub fn len(&self) -> usize {
        self.inner.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tears down child scopes, then this scope's bindings, then runs the
    /// registered disposers. Safe to call more than once.
    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub fn current_scope() -> Option<Scope> {
    CURRENT_SCOPE.with(|current| {
        current
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade().map(|inner| Scope { inner }))
    })
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        self.dispose();
    }
}
