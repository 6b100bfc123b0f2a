use std::sync::OnceLock;

use regex::Regex;
use rebind_core::{Value, ViewModel, read_value, write_value};

use crate::directive::{Directive, update_text};
use crate::error::Result;
use crate::node::Node;

fn interpolation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([\w$.]+)\s*\}\}").expect("interpolation pattern is valid")
    })
}

/// Expressions referenced by `{{ ... }}` in `template`, first occurrence
/// first, without repeats.
pub fn interpolations(template: &str) -> Vec<String> {
    let mut exprs: Vec<String> = Vec::new();
    for caps in interpolation().captures_iter(template) {
        let expr = &caps[1];
        if !exprs.iter().any(|e| e == expr) {
            exprs.push(expr.to_string());
        }
    }
    exprs
}

/// Replaces every `{{ path }}` in `template` with the current value of
/// `path`. Reads are untracked.
pub fn render_template(data: &Value, template: &str) -> rebind_core::Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in interpolation().captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        out.push_str(&read_value(data, &caps[1])?.to_string());
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Walks a node tree and creates bindings for directives and
/// interpolations.
pub struct Compiler<'a> {
    vm: &'a ViewModel,
}

impl<'a> Compiler<'a> {
    pub fn new(vm: &'a ViewModel) -> Self {
        Self { vm }
    }

    /// Compiles every descendant of `root`. Returns the number of bindings
    /// created.
    pub fn compile(&self, root: &Node) -> Result<usize> {
        let before = self.vm.scope().len();
        self.compile_children(root)?;
        Ok(self.vm.scope().len() - before)
    }

    fn compile_children(&self, parent: &Node) -> Result<()> {
        for node in parent.children() {
            if node.is_element() {
                let owns_text = self.compile_attributes(&node)?;
                if !owns_text {
                    self.compile_children(&node)?;
                }
            } else if node.is_text() {
                self.compile_text(&node)?;
            } else {
                self.compile_children(&node)?;
            }
        }
        Ok(())
    }

    /// Binds every directive on `node`. Returns whether a `v-text` directive
    /// now owns the element's children.
    fn compile_attributes(&self, node: &Node) -> Result<bool> {
        let mut owns_text = false;
        for (name, expr) in node.attributes() {
            match Directive::from_attribute(&name) {
                None => {}
                Some(Err(unknown)) => {
                    log::warn!("skipping unknown directive `{name}` (`{unknown}`)");
                }
                Some(Ok(directive)) => {
                    self.bind(node, directive, &expr)?;
                    owns_text |= directive == Directive::Text;
                }
            }
        }
        Ok(owns_text)
    }

    fn bind(&self, node: &Node, directive: Directive, expr: &str) -> Result<()> {
        let update = directive.updater();
        let binding = self.vm.watch(expr, {
            let node = node.clone();
            move |value| update(&node, value)
        })?;
        update(node, &binding.value());

        if directive == Directive::Model {
            let data = self.vm.data().clone();
            let expr = expr.to_string();
            node.on_input(move |text| {
                if let Err(err) = write_value(&data, &expr, text) {
                    log::warn!("v-model `{expr}`: {err}");
                }
            });
        }
        Ok(())
    }

    fn compile_text(&self, node: &Node) -> Result<()> {
        let template = node.text_content();
        let exprs = interpolations(&template);
        if exprs.is_empty() {
            return Ok(());
        }

        let data = self.vm.data().clone();
        for expr in &exprs {
            self.vm.watch(expr, {
                let node = node.clone();
                let data = data.clone();
                let template = template.clone();
                move |_| match render_template(&data, &template) {
                    Ok(text) => update_text(&node, &Value::String(text)),
                    Err(err) => log::warn!("interpolation `{template}`: {err}"),
                }
            })?;
        }
        let text = render_template(&data, &template)?;
        update_text(node, &Value::String(text));
        Ok(())
    }
}
