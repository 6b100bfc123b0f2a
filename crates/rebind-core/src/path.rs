use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::{ReactiveError, Result};
use crate::reactive;
use crate::value::{Object, Value};

/// A dot-separated key sequence such as `user.name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    segments: SmallVec<[String; 4]>,
}

impl Path {
    pub fn parse(expr: &str) -> Result<Path> {
        let invalid = |reason| ReactiveError::InvalidPath {
            expr: expr.to_string(),
            reason,
        };
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(invalid("expression is empty"));
        }
        let mut segments = SmallVec::new();
        for segment in trimmed.split('.') {
            if segment.is_empty() {
                return Err(invalid("empty path segment"));
            }
            if !segment
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            {
                return Err(invalid("segments may only contain identifier characters"));
            }
            segments.push(segment.to_string());
        }
        Ok(Path { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final key, the one a write lands on.
    pub fn last(&self) -> &str {
        // parse() never yields an empty path
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Walks `root[k1][k2]...` through instrumented reads.
    pub fn resolve(&self, root: &Value) -> Result<Value> {
        self.walk(root, self.segments.len())
    }

    /// Resolves every segment but the last one to the object that owns the
    /// final key. Reads are not tracked.
    pub fn resolve_parent(&self, root: &Value) -> Result<Object> {
        let parent = reactive::untracked(|| self.walk(root, self.segments.len() - 1))?;
        match parent {
            Value::Object(obj) => Ok(obj),
            other => Err(self.not_an_object(self.segments.len() - 1, &other)),
        }
    }

    fn walk(&self, root: &Value, depth: usize) -> Result<Value> {
        let mut current = root.clone();
        for (i, key) in self.segments[..depth].iter().enumerate() {
            let obj = match &current {
                Value::Object(obj) => obj.clone(),
                other => return Err(self.not_an_object(i, other)),
            };
            current = obj.get(key).ok_or_else(|| ReactiveError::MissingPath {
                path: self.to_string(),
                segment: key.clone(),
            })?;
        }
        Ok(current)
    }

    fn not_an_object(&self, depth: usize, found: &Value) -> ReactiveError {
        let parent = if depth == 0 {
            "<root>".to_string()
        } else {
            self.segments[..depth].join(".")
        };
        ReactiveError::NotAnObject {
            path: self.to_string(),
            parent,
            found: found.kind(),
        }
    }
}

impl FromStr for Path {
    type Err = ReactiveError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
