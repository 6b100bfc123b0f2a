//! The operations a template compiler uses to talk to the engine.

use crate::error::Result;
use crate::path::Path;
use crate::reactive;
use crate::scope::current_scope;
use crate::value::Value;
use crate::watcher::{Binding, Tracking};

/// Creates a binding on `expr` and returns it with its initial value already
/// resolved (see [`Binding::value`]). `on_change` only fires for later
/// changes.
///
/// When called inside [`Scope::run`](crate::Scope::run) the binding is owned
/// by that scope; otherwise the caller must keep the returned handle alive.
pub fn watch(root: &Value, expr: &str, on_change: impl Fn(&Value) + 'static) -> Result<Binding> {
    watch_with(root, expr, Tracking::default(), on_change)
}

pub fn watch_with(
    root: &Value,
    expr: &str,
    tracking: Tracking,
    on_change: impl Fn(&Value) + 'static,
) -> Result<Binding> {
    let binding = Binding::new(root, Path::parse(expr)?, tracking, on_change)?;
    if let Some(scope) = current_scope() {
        scope.adopt(binding.clone());
    }
    Ok(binding)
}

/// One-off resolution. Never subscribes anything.
pub fn read_value(root: &Value, expr: &str) -> Result<Value> {
    let path = Path::parse(expr)?;
    reactive::untracked(|| path.resolve(root))
}

/// Instrumented write to the last segment of `expr`. The key must already
/// exist. Returns whether the stored value changed.
pub fn write_value(root: &Value, expr: &str, value: impl Into<Value>) -> Result<bool> {
    let path = Path::parse(expr)?;
    let parent = path.resolve_parent(root)?;
    let key = path.last();
    if !parent.contains_key(key) {
        return Err(crate::ReactiveError::MissingPath {
            path: path.to_string(),
            segment: key.to_string(),
        });
    }
    Ok(parent.set(key, value))
}
