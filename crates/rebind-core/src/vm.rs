use crate::error::Result;
use crate::observer::observe;
use crate::ops;
use crate::scope::Scope;
use crate::value::Value;
use crate::watcher::{Binding, Tracking};

/// Construction options for a [`ViewModel`].
#[derive(Clone, Debug, Default)]
pub struct Options {
    data: Value,
    tracking: Tracking,
}

impl Options {
    pub fn new(data: impl Into<Value>) -> Self {
        Self {
            data: data.into(),
            tracking: Tracking::default(),
        }
    }

    /// Dependency tracking mode for bindings created through the model.
    pub fn tracking(mut self, tracking: Tracking) -> Self {
        self.tracking = tracking;
        self
    }
}

/// The root that owns an observed data graph and every binding created
/// against it.
pub struct ViewModel {
    data: Value,
    tracking: Tracking,
    scope: Scope,
}

impl ViewModel {
    /// Observes `options.data` once. A non-object root is kept as is.
    pub fn new(options: Options) -> Self {
        let Options { data, tracking } = options;
        observe(&data);
        log::debug!("view model: observed {} root", data.kind());
        Self {
            data,
            tracking,
            scope: Scope::new(),
        }
    }

    /// The `$data` root.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn tracking(&self) -> Tracking {
        self.tracking
    }

    /// Creates a binding owned by this model.
    pub fn watch(&self, expr: &str, on_change: impl Fn(&Value) + 'static) -> Result<Binding> {
        self.scope.watch(&self.data, expr, self.tracking, on_change)
    }

    pub fn get(&self, expr: &str) -> Result<Value> {
        ops::read_value(&self.data, expr)
    }

    pub fn set(&self, expr: &str, value: impl Into<Value>) -> Result<bool> {
        ops::write_value(&self.data, expr, value)
    }

    /// Tears down every binding created through this model.
    pub fn dispose(&self) {
        self.scope.dispose();
    }
}
