// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Callee resolution.
//!
//! The entry-point table wins; only a callee that has not been compiled
//! in this unit falls back to its package's symbol table. Functions known
//! only by symbol are never foreign: foreign bodies are always compiled
//! entry points.

use tern_ir::InstructionKind;
use tracing::trace;

use super::descriptor::{LambdaDescriptor, Resolution};
use crate::naming::package_name;
use crate::{CodegenResult, LoweringContext, LoweringErrorKind};

pub fn resolve<'a>(
    ctx: LoweringContext<'a>,
    mut desc: LambdaDescriptor<'a>,
) -> CodegenResult<LambdaDescriptor<'a>> {
    if !desc.needs_resolution() {
        trace!(callee = %desc.callee, "virtual call, resolution skipped");
        return Ok(desc);
    }

    let callee = &desc.callee;
    let key = format!(
        "{}{}",
        package_name(ctx.config, &callee.org, &callee.module, &callee.version),
        desc.encoded_name
    );

    if let Some(entry) = ctx.entry_points.lookup(&key) {
        trace!(key = %key, owner = %entry.owner, foreign = entry.function.is_foreign, "resolved to entry point");
        if desc.kind != InstructionKind::ClosureLoad {
            desc.param_types = entry.function.param_types().to_vec();
        }
        desc.is_foreign = entry.function.is_foreign;
        desc.resolution = Resolution::EntryPoint(entry);
        desc.lookup_key = Some(key);
        return Ok(desc);
    }

    let package_key = format!("{}/{}", callee.org, callee.module);
    let package = match ctx.packages.get_symbol(&package_key) {
        Some(package) => package,
        None => {
            return Err(desc.error(LoweringErrorKind::UnknownPackage {
                package: package_key,
            }))
        }
    };

    // scope entries use the source spelling, not the encoded one
    let symbol = match package.scope.lookup(&callee.name) {
        Some(symbol) => symbol,
        None => {
            return Err(desc.error(LoweringErrorKind::UndefinedCallee {
                package: package_key,
                name: callee.name.clone(),
            }))
        }
    };
    let function = match symbol.as_function() {
        Some(function) => function,
        None => {
            return Err(desc.error(LoweringErrorKind::NotInvokable {
                package: package_key,
                name: callee.name.clone(),
            }))
        }
    };

    trace!(key = %key, package = %package_key, "resolved to package symbol");
    if desc.kind != InstructionKind::ClosureLoad {
        desc.param_types = function.param_types().to_vec();
    }
    desc.is_foreign = false;
    desc.resolution = Resolution::Symbol(function);
    desc.lookup_key = Some(key);
    Ok(desc)
}
