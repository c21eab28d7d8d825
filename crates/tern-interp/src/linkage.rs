// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Native procedures addressable by static thunk calls.

use std::collections::HashMap;
use std::rc::Rc;

use tern_codegen::thunk::StaticTarget;
use tern_rt::{ErrorValue, Value};

/// A static procedure. `args[0]` is the strand; the rest follow the
/// callee's descriptor. `Err` is a guest panic.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value, ErrorValue>>;

/// Procedures keyed by owner, name and descriptor. A call whose
/// descriptor differs from the linked one does not resolve.
#[derive(Default, Clone)]
pub struct Linkage {
    procedures: HashMap<StaticTarget, NativeFn>,
}

impl Linkage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define<F>(&mut self, owner: &str, name: &str, descriptor: &str, f: F)
    where
        F: Fn(&[Value]) -> Result<Value, ErrorValue> + 'static,
    {
        let target = StaticTarget {
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        };
        self.procedures.insert(target, Rc::new(f));
    }

    pub fn lookup(&self, target: &StaticTarget) -> Option<&NativeFn> {
        self.procedures.get(target)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}
