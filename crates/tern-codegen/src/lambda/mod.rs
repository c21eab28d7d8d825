// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Thunk generation for closure loads and call sites.
//!
//! build → resolve → layout → emit. Descriptors are never cached; each
//! instruction is lowered from scratch.

pub mod descriptor;
pub mod emit;
pub mod layout;
pub mod resolve;
pub mod signature;

use tern_ir::Instruction;
use tracing::debug;

use crate::thunk::ThunkFunction;
use crate::{CodegenResult, LoweringContext};

pub use descriptor::{LambdaDescriptor, Resolution};
pub use emit::DispatchShape;
pub use layout::ArgumentSlot;

/// Generate the thunk for one closure load or call site.
pub fn generate_lambda(
    ctx: LoweringContext<'_>,
    ins: &Instruction,
    thunk_name: &str,
) -> CodegenResult<ThunkFunction> {
    let desc = descriptor::build(ins)?;
    let desc = resolve::resolve(ctx, desc)?;

    let is_builtin = ctx.config.is_builtin_module(&desc.callee.org, &desc.callee.module);
    let slots = layout::layout(&desc.param_types, is_builtin);
    let shape = emit::dispatch_shape(ctx, &desc, &slots)?;
    let thunk = emit::emit(&desc, &shape, &slots, thunk_name)?;

    debug!(
        thunk = %thunk.name,
        callee = %desc.callee,
        kind = %desc.kind,
        shape = shape_name(&shape),
        closures = desc.closure_count,
        "generated thunk"
    );
    Ok(thunk)
}

fn shape_name(shape: &DispatchShape) -> &'static str {
    match shape {
        DispatchShape::Virtual { .. } => "virtual",
        DispatchShape::ForeignStatic(_) => "foreign",
        DispatchShape::Static(_) => "static",
    }
}

/// Lower every `(thunk name, instruction)` pair of a unit.
///
/// All or nothing: the first failure aborts the unit and no thunk is
/// returned.
pub fn generate_unit(
    ctx: LoweringContext<'_>,
    instructions: &[(String, Instruction)],
) -> CodegenResult<Vec<ThunkFunction>> {
    instructions
        .iter()
        .map(|(name, ins)| generate_lambda(ctx, ins, name))
        .collect()
}
