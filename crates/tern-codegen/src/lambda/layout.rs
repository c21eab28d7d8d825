// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Argument layout.
//!
//! Incoming, every thunk sees `[strand, v0, f0, v1, f1, ...]`. Outgoing,
//! each parameter is followed by its supplied flag unless the callee lives
//! in a built-in module. Closures always travel as a `(map, true)` pair.

use tern_types::Type;

/// One outgoing parameter position.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSlot {
    pub ty: Type,
    pub supplied_flag_required: bool,
}

/// One slot per declared parameter, in declaration order.
pub fn layout(param_types: &[Type], is_builtin: bool) -> Vec<ArgumentSlot> {
    param_types
        .iter()
        .map(|ty| ArgumentSlot {
            ty: ty.clone(),
            supplied_flag_required: !is_builtin,
        })
        .collect()
}

/// Closure environment slots. The built-in rule does not apply.
pub fn closure_slots(closure_count: usize) -> Vec<ArgumentSlot> {
    (0..closure_count)
        .map(|_| ArgumentSlot {
            ty: Type::map_of(Type::Any),
            supplied_flag_required: true,
        })
        .collect()
}

/// Flatten slots into the callee's parameter list, each flag immediately
/// after its value.
pub fn expand_types(slots: &[ArgumentSlot]) -> Vec<Type> {
    let mut types = Vec::with_capacity(slots.len() * 2);
    for slot in slots {
        types.push(slot.ty.clone());
        if slot.supplied_flag_required {
            types.push(Type::Boolean);
        }
    }
    types
}

/// Index of argument `i`'s value in the incoming array.
pub fn incoming_value_index(i: usize) -> u32 {
    (1 + 2 * i) as u32
}

/// Index of argument `i`'s supplied flag in the incoming array.
pub fn incoming_flag_index(i: usize) -> u32 {
    (2 + 2 * i) as u32
}

/// Length of the array handed to the dispatch entry point for `n`
/// non-receiver arguments.
pub fn virtual_array_len(n: usize, flags: bool) -> u32 {
    if flags {
        (2 * n) as u32
    } else {
        n as u32
    }
}

/// Index of non-receiver argument `i` in the dispatch array. Its flag, if
/// any, sits at the next index.
pub fn virtual_value_index(i: usize, flags: bool) -> u32 {
    if flags {
        (2 * i) as u32
    } else {
        i as u32
    }
}
