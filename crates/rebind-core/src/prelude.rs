pub use crate::{
    Binding, Object, Options, ReactiveError, Scope, Tracking, Value, ViewModel, observe,
    read_value, watch, write_value,
};
