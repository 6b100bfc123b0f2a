//! The active-evaluation slot.
//!
//! One binding at a time may be evaluating on a thread. Every instrumented
//! property read while the slot is occupied subscribes the occupant to that
//! property's [`Dep`](crate::Dep).

use std::cell::RefCell;

use crate::error::{ReactiveError, Result};
use crate::watcher::Binding;

thread_local! {
    static ACTIVE: RefCell<Option<Binding>> = const { RefCell::new(None) };
}

/// Clears the slot when dropped, including on early returns and unwinding.
#[must_use = "the slot is released as soon as the guard is dropped"]
pub(crate) struct SlotGuard {
    _priv: (),
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let prev = ACTIVE.with(|a| a.borrow_mut().take());
        drop(prev);
    }
}

/// Occupies the slot with `binding`. Fails if another evaluation is running.
pub(crate) fn enter(binding: &Binding) -> Result<SlotGuard> {
    ACTIVE.with(|a| {
        let mut slot = a.borrow_mut();
        if let Some(active) = slot.as_ref() {
            log::error!(
                "binding #{} (`{}`) started while binding #{} (`{}`) is evaluating",
                binding.id(),
                binding.path(),
                active.id(),
                active.path()
            );
            return Err(ReactiveError::Reentrant {
                active: active.path().to_string(),
                requested: binding.path().to_string(),
            });
        }
        *slot = Some(binding.clone());
        Ok(SlotGuard { _priv: () })
    })
}

pub(crate) fn active() -> Option<Binding> {
    ACTIVE.with(|a| a.borrow().clone())
}

/// Whether a binding is currently collecting dependencies.
pub fn is_tracking() -> bool {
    ACTIVE.with(|a| a.borrow().is_some())
}

/// Runs `f` with the slot empty, so reads inside it never subscribe.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    struct Restore(Option<Binding>);
    impl Drop for Restore {
        fn drop(&mut self) {
            if let Some(prev) = self.0.take() {
                ACTIVE.with(|a| *a.borrow_mut() = Some(prev));
            }
        }
    }

    let _restore = Restore(ACTIVE.with(|a| a.borrow_mut().take()));
    f()
}
