//! # Templates
//!
//! `rebind-dom` mounts a [`rebind_core::ViewModel`] on an in-memory node
//! tree. The compiler understands two things:
//!
//! - `{{ path }}` inside text nodes, re-rendered whenever any referenced
//!   path changes.
//! - `v-text="path"` and `v-model="path"` attributes on elements.
//!
//! ```rust
//! use rebind_core::Options;
//! use rebind_dom::*;
//!
//! let app = Node::element("div")
//!     .with_attr("id", "app")
//!     .with_child(Node::text("Hello, {{ user.name }}"))
//!     .with_child(Node::element("input").with_attr("v-model", "user.name"));
//! let doc = Document::new(Node::element("body").with_child(app));
//!
//! let data = serde_json::json!({ "user": { "name": "Alice" } });
//! let mvvm = Mvvm::new(&doc, "#app", Options::new(data)).unwrap();
//! assert_eq!(mvvm.el().text_content(), "Hello, Alice");
//!
//! mvvm.el().children()[1].dispatch_input("Bob");
//! assert_eq!(mvvm.el().text_content(), "Hello, Bob");
//! ```

pub mod compile;
pub mod directive;
pub mod document;
pub mod error;
pub mod mvvm;
pub mod node;

mod tests;

pub use compile::*;
pub use directive::*;
pub use document::*;
pub use error::*;
pub use mvvm::*;
pub use node::*;
