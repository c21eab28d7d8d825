// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Objects and their uniform dynamic-dispatch entry point.

use std::fmt;
use std::rc::Rc;

use crate::{ErrorValue, StrandRef, Value};

pub type ObjectRef = Rc<dyn ObjectValue>;

/// A guest object. Methods are reached by name through `call`, never by a
/// statically known address.
///
/// `args` follows the virtual-call array convention: one slot per
/// non-receiver argument, each followed by its supplied flag unless the
/// object's class lives in a built-in module.
pub trait ObjectValue: fmt::Debug {
    fn type_name(&self) -> &str;

    fn call(&self, strand: &StrandRef, method: &str, args: &[Value]) -> Result<Value, ErrorValue>;
}
