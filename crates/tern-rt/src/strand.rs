// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Strand: one cooperative unit of execution.
//!
//! Generated thunks only touch three fields: `blocked_on_extern`, `panic`
//! and `return_value`. Everything else belongs to the scheduler.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{ErrorValue, Value};

pub type StrandRef = Rc<RefCell<Strand>>;

/// Deferred result of a foreign call that did not complete synchronously.
pub type ForeignCompletion = Box<dyn FnOnce() -> Result<Value, ErrorValue>>;

pub struct Strand {
    pub id: u32,
    /// Set while a foreign call is outstanding; a thunk re-entered with
    /// this flag set observes `panic`/`return_value` instead of calling.
    pub blocked_on_extern: bool,
    pub panic: Option<ErrorValue>,
    pub return_value: Option<Value>,
    pending: Option<ForeignCompletion>,
}

impl fmt::Debug for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strand")
            .field("id", &self.id)
            .field("blocked_on_extern", &self.blocked_on_extern)
            .field("panic", &self.panic)
            .field("return_value", &self.return_value)
            .field("suspended", &self.pending.is_some())
            .finish()
    }
}

impl Strand {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            blocked_on_extern: false,
            panic: None,
            return_value: None,
            pending: None,
        }
    }

    pub fn into_ref(self) -> StrandRef {
        Rc::new(RefCell::new(self))
    }

    /// Called by a foreign function that cannot finish now. The caller
    /// returns to its thunk, which returns to the scheduler.
    pub fn suspend_on_extern(&mut self, completion: ForeignCompletion) {
        self.blocked_on_extern = true;
        self.pending = Some(completion);
    }

    pub fn is_suspended(&self) -> bool {
        self.pending.is_some()
    }

    pub fn take_pending(&mut self) -> Option<ForeignCompletion> {
        self.pending.take()
    }

    /// Publish the outcome of a suspended foreign call. `blocked_on_extern`
    /// stays set so the re-entered thunk picks the outcome up.
    pub fn complete_extern(&mut self, outcome: Result<Value, ErrorValue>) {
        self.blocked_on_extern = true;
        match outcome {
            Ok(value) => self.return_value = Some(value),
            Err(err) => self.panic = Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspend_then_complete() {
        let mut strand = Strand::new(1);
        strand.suspend_on_extern(Box::new(|| Ok(Value::Int(9))));
        assert!(strand.blocked_on_extern);
        assert!(strand.is_suspended());

        let completion = strand.take_pending().unwrap();
        strand.complete_extern(completion());
        assert!(!strand.is_suspended());
        assert!(strand.blocked_on_extern);
        assert_eq!(strand.return_value, Some(Value::Int(9)));
        assert!(strand.panic.is_none());
    }

    #[test]
    fn failed_completion_sets_panic() {
        let mut strand = Strand::new(2);
        strand.complete_extern(Err(ErrorValue::new("io failure")));
        assert_eq!(strand.panic, Some(ErrorValue::new("io failure")));
        assert!(strand.return_value.is_none());
    }
}
