use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element(String),
    Text,
    Fragment,
}

pub type InputListener = Rc<dyn Fn(&str)>;

/// A shared handle to a node of the in-memory view tree.
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

struct NodeInner {
    kind: NodeKind,
    attributes: RefCell<Vec<(String, String)>>,
    children: RefCell<Vec<Node>>,
    /// Content of a text node.
    text: RefCell<String>,
    /// Current value of an input-like element.
    value: RefCell<String>,
    listeners: RefCell<Vec<InputListener>>,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Node(Rc::new(NodeInner {
            kind,
            attributes: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
            text: RefCell::new(String::new()),
            value: RefCell::new(String::new()),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Element(tag.into()))
    }

    pub fn text(content: impl Into<String>) -> Self {
        let node = Self::with_kind(NodeKind::Text);
        *node.0.text.borrow_mut() = content.into();
        node
    }

    pub fn fragment() -> Self {
        Self::with_kind(NodeKind::Fragment)
    }

    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(self, child: Node) -> Self {
        self.append_child(child);
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    pub fn is_element(&self) -> bool {
        matches!(self.0.kind, NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.0.kind, NodeKind::Text)
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.0.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0
            .attributes
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        self.0.attributes.borrow().clone()
    }

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let mut attrs = self.0.attributes.borrow_mut();
        match attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => attrs.push((name, value)),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.children.borrow().clone()
    }

    pub fn append_child(&self, child: Node) {
        self.0.children.borrow_mut().push(child);
    }

    /// Detaches and returns every child, in order.
    pub fn take_children(&self) -> Vec<Node> {
        std::mem::take(&mut *self.0.children.borrow_mut())
    }

    /// Text of a text node, or the concatenated text of an element's
    /// descendants.
    pub fn text_content(&self) -> String {
        match self.0.kind {
            NodeKind::Text => self.0.text.borrow().clone(),
            _ => self.children().iter().map(Node::text_content).collect(),
        }
    }

    /// On a text node replaces its content; on an element or fragment
    /// replaces all children with a single text node.
    pub fn set_text_content(&self, text: impl Into<String>) {
        match self.0.kind {
            NodeKind::Text => *self.0.text.borrow_mut() = text.into(),
            _ => *self.0.children.borrow_mut() = vec![Node::text(text)],
        }
    }

    pub fn value(&self) -> String {
        self.0.value.borrow().clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.0.value.borrow_mut() = value.into();
    }

    pub fn on_input(&self, listener: impl Fn(&str) + 'static) {
        self.0.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Simulates the user typing `text`: updates the value, then runs the
    /// input listeners.
    pub fn dispatch_input(&self, text: &str) {
        self.set_value(text);
        let listeners = self.0.listeners.borrow().clone();
        for listener in listeners {
            listener(text);
        }
    }

    /// Depth-first search, including `self`.
    pub fn find(&self, pred: &impl Fn(&Node) -> bool) -> Option<Node> {
        if pred(self) {
            return Some(self.clone());
        }
        self.children().iter().find_map(|c| c.find(pred))
    }

    /// Serializes the subtree as markup. Input-like elements carry their
    /// current value as a `value` attribute.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match &self.0.kind {
            NodeKind::Text => out.push_str(&escape(&self.0.text.borrow())),
            NodeKind::Fragment => {
                for child in self.children() {
                    child.render_into(out);
                }
            }
            NodeKind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in self.0.attributes.borrow().iter() {
                    if name == "value" {
                        continue;
                    }
                    out.push_str(&format!(" {name}=\"{}\"", escape(value)));
                }
                let value = self.0.value.borrow();
                if is_control(tag) && !value.is_empty() {
                    out.push_str(&format!(" value=\"{}\"", escape(&value)));
                }
                out.push('>');
                if is_void(tag) {
                    return;
                }
                for child in self.children() {
                    child.render_into(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn is_control(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img")
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.0.kind)
            .field("children", &self.0.children.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_concatenates_descendants() {
        let p = Node::element("p")
            .with_child(Node::text("Hello, "))
            .with_child(Node::element("b").with_child(Node::text("world")));
        assert_eq!(p.text_content(), "Hello, world");

        p.set_text_content("bye");
        assert_eq!(p.children().len(), 1);
        assert_eq!(p.text_content(), "bye");
    }

    #[test]
    fn test_dispatch_input_updates_value_then_listeners() {
        let input = Node::element("input");
        let seen = Rc::new(RefCell::new(Vec::new()));
        input.on_input({
            let seen = seen.clone();
            let input = input.clone();
            move |s| seen.borrow_mut().push((s.to_string(), input.value()))
        });
        input.dispatch_input("abc");
        assert_eq!(*seen.borrow(), vec![("abc".to_string(), "abc".to_string())]);
    }

    #[test]
    fn test_render_escapes_and_shows_values() {
        let root = Node::element("div")
            .with_attr("id", "app")
            .with_child(Node::text("a < b"))
            .with_child(Node::element("input").with_attr("v-model", "name"));
        root.children()[1].set_value("\"x\"");
        insta::assert_snapshot!(
            root.render(),
            @r#"<div id="app">a &lt; b<input v-model="name" value="&quot;x&quot;"></div>"#
        );
    }
}
