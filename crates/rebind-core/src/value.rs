//! The data graph: plain key→value trees that `observe` turns into
//! observable state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::dep::Dep;
use crate::observer;

/// A node of the data graph.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Object),
}

impl Value {
    /// Equality used for change detection: primitives by value, objects by
    /// identity. `NaN` never equals itself.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "a bool",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Object(_) => "an object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Snapshot of the graph as JSON. Reads are not tracked. A reference back
    /// to an object that is already being serialized renders as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        crate::reactive::untracked(|| self.to_json_inner(&mut Vec::new()))
    }

    fn to_json_inner(&self, stack: &mut Vec<*const ()>) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Object(o) => {
                let ptr = o.as_ptr();
                if stack.contains(&ptr) {
                    return serde_json::Value::Null;
                }
                stack.push(ptr);
                let map = o
                    .entries()
                    .into_iter()
                    .map(|(k, v)| (k, v.to_json_inner(stack)))
                    .collect();
                stack.pop();
                serde_json::Value::Object(map)
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Object(o) => fmt::Debug::fmt(o, f),
        }
    }
}

/// Text rendering used by output adapters.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

/// Arrays become objects keyed by index (`"0"`, `"1"`, ...), so paths such as
/// `items.0.title` resolve. Element mutation is not intercepted beyond that.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                let obj = Object::new();
                for (i, item) in items.into_iter().enumerate() {
                    obj.insert(i.to_string(), item);
                }
                Value::Object(obj)
            }
            serde_json::Value::Object(map) => {
                let obj = Object::new();
                for (k, v) in map {
                    obj.insert(k, v);
                }
                Value::Object(obj)
            }
        }
    }
}

pub(crate) struct Property {
    key: String,
    value: Value,
    /// `Some` once the property has been instrumented.
    dep: Option<Dep>,
}

#[derive(Default)]
pub(crate) struct ObjectData {
    props: Vec<Property>,
    observed: bool,
}

impl ObjectData {
    fn position(&self, key: &str) -> Option<usize> {
        self.props.iter().position(|p| p.key == key)
    }
}

/// Shared key→value mapping with reference identity. Keys keep insertion
/// order.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Object::insert`].
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().position(key).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().props.iter().map(|p| p.key.clone()).collect()
    }

    /// Whether `observe` has instrumented this object.
    pub fn is_observed(&self) -> bool {
        self.0.borrow().observed
    }

    /// Registry of an instrumented property.
    pub fn dep(&self, key: &str) -> Option<Dep> {
        let data = self.0.borrow();
        data.position(key).and_then(|i| data.props[i].dep.clone())
    }

    /// Adds or overwrites a property without instrumentation and without
    /// notifying anyone. Meant for building graphs before `observe`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut data = self.0.borrow_mut();
        match data.position(&key) {
            Some(i) => data.props[i].value = value,
            None => data.props.push(Property {
                key,
                value,
                dep: None,
            }),
        }
    }

    /// Adds an observable property to an object, observing `value` as well.
    /// On a property that is already observable this is a plain [`Object::set`].
    pub fn define(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if self.dep(&key).is_some() {
            self.set(&key, value);
            return;
        }
        observer::observe(&value);
        let mut data = self.0.borrow_mut();
        match data.position(&key) {
            Some(i) => {
                let prop = &mut data.props[i];
                prop.value = value;
                prop.dep = Some(Dep::new());
            }
            None => data.props.push(Property {
                key,
                value,
                dep: Some(Dep::new()),
            }),
        }
    }

    /// Instrumented read. Subscribes the binding currently being evaluated,
    /// if any, to this property.
    pub fn get(&self, key: &str) -> Option<Value> {
        let (value, dep) = {
            let data = self.0.borrow();
            let prop = &data.props[data.position(key)?];
            (prop.value.clone(), prop.dep.clone())
        };
        if let Some(dep) = dep {
            dep.depend();
        }
        Some(value)
    }

    /// Instrumented write. Returns whether the stored value changed.
    ///
    /// Writing a value that is [`Value::same`] as the current one is a no-op.
    /// A new object value is observed before subscribers are notified.
    /// Unknown keys are added as plain properties.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let dep = {
            let mut data = self.0.borrow_mut();
            let Some(i) = data.position(key) else {
                data.props.push(Property {
                    key: key.to_string(),
                    value,
                    dep: None,
                });
                return true;
            };
            let prop = &mut data.props[i];
            match &prop.dep {
                None => {
                    prop.value = value;
                    return true;
                }
                Some(dep) if prop.value.same(&value) => {
                    log::trace!("dep #{}: `{key}` unchanged, skipping notify", dep.id());
                    return false;
                }
                Some(dep) => dep.clone(),
            }
        };

        observer::observe(&value);
        {
            let mut data = self.0.borrow_mut();
            if let Some(i) = data.position(key) {
                data.props[i].value = value;
            }
        }
        dep.notify();
        true
    }

    /// Untracked copy of all entries in key order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .props
            .iter()
            .map(|p| (p.key.clone(), p.value.clone()))
            .collect()
    }

    /// Marks the object observed and gives every property a registry.
    /// Returns the child values to recurse into, or `None` when the object
    /// was already observed.
    pub(crate) fn instrument(&self) -> Option<Vec<Value>> {
        let mut data = self.0.borrow_mut();
        if data.observed {
            return None;
        }
        data.observed = true;
        let mut children = Vec::with_capacity(data.props.len());
        for prop in data.props.iter_mut() {
            if prop.dep.is_none() {
                prop.dep = Some(Dep::new());
            }
            children.push(prop.value.clone());
        }
        Some(children)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("ptr", &self.as_ptr())
            .field("keys", &self.keys())
            .finish()
    }
}
