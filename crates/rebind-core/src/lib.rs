//! # Data, Bindings, and Scopes
//!
//! Rebind keeps a view in sync with a plain data graph. There are four
//! pieces:
//!
//! - `Value` / `Object`: the data graph, a tree of key→value mappings.
//! - `observe`: instruments every property with its own `Dep`.
//! - `Binding`: ties an expression path to a callback.
//! - `Scope` / `ViewModel`: own bindings and tear them down together.
//!
//! ## Observing data
//!
//! ```rust
//! use rebind_core::*;
//!
//! let data = Value::from(serde_json::json!({
//!     "message": "hi",
//!     "user": { "name": "Alice" }
//! }));
//! observe(&data);
//! assert!(data.as_object().unwrap().is_observed());
//! ```
//!
//! ## Bindings
//!
//! A binding reads its path once when it is created. Every instrumented
//! property read during that pass subscribes the binding; no dependency list
//! is declared up front. Later writes to any of those properties re-resolve
//! the path and invoke the callback only if the resolved value changed:
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use rebind_core::*;
//!
//! let vm = ViewModel::new(Options::new(serde_json::json!({
//!     "user": { "name": "Alice" }
//! })));
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let binding = vm.watch("user.name", {
//!     let seen = seen.clone();
//!     move |v| seen.borrow_mut().push(v.to_string())
//! }).unwrap();
//! assert_eq!(binding.value(), Value::from("Alice"));
//!
//! vm.set("user.name", "Bob").unwrap();
//! vm.set("user.name", "Bob").unwrap();
//! assert_eq!(*seen.borrow(), vec!["Bob".to_string()]);
//! ```
//!
//! - Dependencies are collected at construction by default. Use
//!   `Tracking::EveryUpdate` to re-collect them on every update.
//! - `read_value` never subscribes; `write_value` is an instrumented write.
//!
//! ## Lifecycle
//!
//! Registries hold bindings weakly. A `Scope` (every `ViewModel` owns one)
//! keeps its bindings alive and `dispose` removes them from every registry.

pub mod dep;
pub mod error;
pub mod observer;
pub mod ops;
pub mod path;
pub mod prelude;
pub mod reactive;
pub mod scope;
pub mod value;
pub mod vm;
pub mod watcher;


pub use dep::*;
pub use error::*;
pub use observer::*;
pub use ops::*;
pub use path::*;
pub use reactive::{is_tracking, untracked};
pub use scope::*;
pub use value::*;
pub use vm::*;
pub use watcher::*;
