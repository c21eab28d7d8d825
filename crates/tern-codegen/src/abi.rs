// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Runtime ABI names referenced by generated thunks.
//!
//! Owner paths and field names must match what the runtime exposes.
//! Only the three strand fields below are part of the contract.

/// Root of every boxed value.
pub const OBJECT: &str = "tern/lang/Object";
/// Scheduling context passed in `args[0]`.
pub const STRAND: &str = "tern/runtime/scheduling/Strand";
pub const MAP_VALUE: &str = "tern/runtime/values/MapValue";
pub const ARRAY_VALUE: &str = "tern/runtime/values/ArrayValue";
pub const STRING_VALUE: &str = "tern/runtime/values/StringValue";
pub const DECIMAL_VALUE: &str = "tern/runtime/values/DecimalValue";
pub const ERROR_VALUE: &str = "tern/runtime/values/ErrorValue";
pub const FUTURE_VALUE: &str = "tern/runtime/values/FutureValue";
pub const FUNCTION_VALUE: &str = "tern/runtime/values/FunctionValue";
/// Objects implement the uniform dispatch entry point.
pub const OBJECT_VALUE: &str = "tern/runtime/values/ObjectValue";

/// Uniform dispatch entry point on `OBJECT_VALUE`.
pub const DYNAMIC_CALL_METHOD: &str = "call";

pub const BLOCKED_ON_EXTERN_FIELD: &str = "blockedOnExtern";
pub const PANIC_FIELD: &str = "panic";
pub const RETURN_VALUE_FIELD: &str = "returnValue";

/// Index of the strand in the generic argument array.
pub const STRAND_SLOT: u32 = 0;
