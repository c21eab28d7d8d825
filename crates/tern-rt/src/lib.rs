// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tern runtime ABI seen by generated thunks.
//!
//! Components:
//! - strand: the scheduling context handed to every thunk
//! - value: boxed guest values carried in generic argument arrays
//! - error: guest error values (panics)
//! - object: uniform dynamic-dispatch entry point of objects
//! - scheduler: cooperative re-entry after a foreign call suspends

pub mod error;
pub mod object;
pub mod scheduler;
pub mod strand;
pub mod value;

pub use error::ErrorValue;
pub use object::{ObjectRef, ObjectValue};
pub use scheduler::drive;
pub use strand::{ForeignCompletion, Strand, StrandRef};
pub use value::{ArrayRef, MapRef, Value};
