use crate::node::Node;

/// Owns the root of a view tree and answers selector queries against it.
#[derive(Clone, Debug)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// First element matching `selector`: `#id` or a tag name.
    pub fn query(&self, selector: &str) -> Option<Node> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }
        match selector.strip_prefix('#') {
            Some(id) => self
                .root
                .find(&|n: &Node| n.is_element() && n.attr("id").as_deref() == Some(id)),
            None => self.root.find(&|n: &Node| n.tag() == Some(selector)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_by_id_and_tag() {
        let app = Node::element("div").with_attr("id", "app");
        let doc = Document::new(
            Node::element("body")
                .with_child(Node::element("header"))
                .with_child(app.clone().with_child(Node::element("p"))),
        );
        assert!(doc.query("#app").unwrap().ptr_eq(&app));
        assert_eq!(doc.query("p").unwrap().tag(), Some("p"));
        assert!(doc.query("#missing").is_none());
        assert!(doc.query("").is_none());
    }
}
