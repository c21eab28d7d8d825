// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Cooperative re-entry loop for strands blocked on foreign calls.
//!
//! No stack survives a suspension. The thunk returns, the pending foreign
//! completion runs, its outcome lands on the strand, and the same thunk is
//! entered again to pick the outcome up.

use tracing::debug;

use crate::StrandRef;

/// Enter `enter` until it returns without leaving a foreign call pending.
///
/// `enter` must start the same thunk with the same arguments each time.
pub fn drive<R>(strand: &StrandRef, mut enter: impl FnMut() -> R) -> R {
    let mut entries = 0u32;
    loop {
        let outcome = enter();
        entries += 1;

        // Bind first: the completion may need to borrow the strand itself.
        let pending = strand.borrow_mut().take_pending();
        let Some(completion) = pending else {
            return outcome;
        };

        let id = strand.borrow().id;
        debug!(strand = id, entries, "foreign call suspended; completing before re-entry");
        let result = completion();
        strand.borrow_mut().complete_extern(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorValue, Strand, Value};

    #[test]
    fn synchronous_entry_runs_once() {
        let strand = Strand::new(1).into_ref();
        let mut calls = 0;
        let out = drive(&strand, || {
            calls += 1;
            Value::Int(5)
        });
        assert_eq!(out, Value::Int(5));
        assert_eq!(calls, 1);
    }

    #[test]
    fn suspended_entry_is_reentered_with_result() {
        let strand = Strand::new(1).into_ref();
        let s = strand.clone();
        let out = drive(&strand, || {
            let mut st = s.borrow_mut();
            if st.blocked_on_extern {
                st.blocked_on_extern = false;
                if let Some(err) = st.panic.take() {
                    return Err(err);
                }
                return Ok(st.return_value.clone().unwrap_or(Value::Nil));
            }
            st.suspend_on_extern(Box::new(|| Ok(Value::String("done".into()))));
            Ok(Value::Nil)
        });
        assert_eq!(out, Ok::<_, ErrorValue>(Value::String("done".into())));
        assert!(!strand.borrow().blocked_on_extern);
    }
}
