use rebind_core::{Options, Value, ViewModel};

use crate::compile::Compiler;
use crate::document::Document;
use crate::error::{DomError, Result};
use crate::node::Node;

/// Where to mount: an element handle or a selector resolved against the
/// document.
#[derive(Clone, Debug)]
pub enum MountTarget {
    Node(Node),
    Selector(String),
}

impl From<Node> for MountTarget {
    fn from(node: Node) -> Self {
        MountTarget::Node(node)
    }
}

impl From<&Node> for MountTarget {
    fn from(node: &Node) -> Self {
        MountTarget::Node(node.clone())
    }
}

impl From<&str> for MountTarget {
    fn from(selector: &str) -> Self {
        MountTarget::Selector(selector.to_string())
    }
}

impl From<String> for MountTarget {
    fn from(selector: String) -> Self {
        MountTarget::Selector(selector)
    }
}

/// A view model mounted on an element.
pub struct Mvvm {
    el: Node,
    vm: ViewModel,
}

impl Mvvm {
    /// Resolves the mount point, observes the data, then compiles the mount
    /// point's children against it.
    ///
    /// A target that is not an element fails before anything is observed.
    pub fn new(
        document: &Document,
        target: impl Into<MountTarget>,
        options: Options,
    ) -> Result<Mvvm> {
        let el = match target.into() {
            MountTarget::Node(node) if node.is_element() => node,
            MountTarget::Node(node) => {
                return Err(DomError::InvalidMount {
                    target: format!("{:?}", node.kind()),
                });
            }
            MountTarget::Selector(selector) => document
                .query(&selector)
                .filter(Node::is_element)
                .ok_or(DomError::InvalidMount { target: selector })?,
        };

        let vm = ViewModel::new(options);

        // compile detached, then reattach
        let fragment = Node::fragment();
        for child in el.take_children() {
            fragment.append_child(child);
        }
        let compiled = Compiler::new(&vm).compile(&fragment);
        for child in fragment.take_children() {
            el.append_child(child);
        }
        let created = compiled?;
        log::debug!("mounted on <{}> with {created} binding(s)", el.tag().unwrap_or_default());

        Ok(Mvvm { el, vm })
    }

    pub fn el(&self) -> &Node {
        &self.el
    }

    pub fn vm(&self) -> &ViewModel {
        &self.vm
    }

    /// The `$data` root.
    pub fn data(&self) -> &Value {
        self.vm.data()
    }

    /// Tears down every binding. The rendered nodes stay as they are.
    pub fn unmount(self) -> Node {
        self.vm.dispose();
        self.el
    }
}
