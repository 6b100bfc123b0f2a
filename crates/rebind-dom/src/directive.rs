//! Directive kinds and the updaters that write values into nodes.

use std::str::FromStr;

use rebind_core::Value;

use crate::node::Node;

pub const PREFIX: &str = "v-";

/// What a `v-*` attribute asks the compiler to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    /// `v-text="path"`: the element's text follows the value.
    Text,
    /// `v-model="path"`: the control's value follows the value, and input
    /// writes back into the data graph.
    Model,
}

pub type Updater = fn(&Node, &Value);

impl Directive {
    /// Parses an attribute name. `None` if it is not a directive at all,
    /// `Some(Err(name))` for an unknown directive.
    pub fn from_attribute(attr: &str) -> Option<Result<Directive, String>> {
        let name = attr.strip_prefix(PREFIX)?;
        Some(name.parse().map_err(|_| name.to_string()))
    }

    pub fn updater(self) -> Updater {
        match self {
            Directive::Text => update_text,
            Directive::Model => update_model,
        }
    }
}

impl FromStr for Directive {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Directive::Text),
            "model" => Ok(Directive::Model),
            _ => Err(()),
        }
    }
}

pub fn update_text(node: &Node, value: &Value) {
    node.set_text_content(value.to_string());
}

pub fn update_model(node: &Node, value: &Value) {
    node.set_value(value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attribute() {
        assert_eq!(Directive::from_attribute("v-text"), Some(Ok(Directive::Text)));
        assert_eq!(Directive::from_attribute("v-model"), Some(Ok(Directive::Model)));
        assert_eq!(
            Directive::from_attribute("v-html"),
            Some(Err("html".to_string()))
        );
        assert_eq!(Directive::from_attribute("class"), None);
    }

    #[test]
    fn test_updaters() {
        let p = Node::element("p");
        Directive::Text.updater()(&p, &Value::from(7));
        assert_eq!(p.text_content(), "7");

        let input = Node::element("input");
        Directive::Model.updater()(&input, &Value::from("x"));
        assert_eq!(input.value(), "x");
    }
}
