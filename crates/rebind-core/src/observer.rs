use crate::value::Value;

/// Makes every property reachable from `value` observable.
///
/// Each property of each object gets its own [`Dep`](crate::Dep); reads and
/// writes through [`Object::get`](crate::Object::get) and
/// [`Object::set`](crate::Object::set) then participate in tracking.
/// Primitives are left alone. Objects that are already observed are skipped,
/// so shared and cyclic sub-graphs are instrumented exactly once.
pub fn observe(value: &Value) {
    let Value::Object(obj) = value else {
        return;
    };
    let Some(children) = obj.instrument() else {
        return;
    };
    log::trace!("observe: instrumented {} key(s)", children.len());
    for child in &children {
        observe(child);
    }
}
