// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Dispatch emission.
//!
//! Every thunk starts by taking the strand out of `args[0]`. From there
//! it takes one of three shapes: a dynamic dispatch through the receiver
//! object, a static call, or a static call to a foreign function guarded
//! by the resume check.

use tern_types::Type;

use super::descriptor::{LambdaDescriptor, Resolution};
use super::layout::{self, ArgumentSlot};
use super::signature;
use crate::naming::{cleanup_function_name, virtual_method_name};
use crate::thunk::{
    LocalId, LocalTy, StaticTarget, StrandField, ThunkBuilder, ThunkConst, ThunkFunction, ThunkOperand, ThunkStmt,
    ThunkTerminator,
};
use crate::{CodegenResult, LoweringContext, LoweringErrorKind};

/// How the callee is reached.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchShape {
    /// Through the receiver's uniform dispatch entry point.
    Virtual { method: String, flags: bool },
    /// Static call preceded by the resumable blocking-call prologue.
    ForeignStatic(StaticTarget),
    Static(StaticTarget),
}

/// Pick the dispatch shape and, for static shapes, the call target.
pub fn dispatch_shape(
    ctx: LoweringContext<'_>,
    desc: &LambdaDescriptor<'_>,
    slots: &[ArgumentSlot],
) -> CodegenResult<DispatchShape> {
    let callee = &desc.callee;
    if desc.is_virtual {
        return Ok(DispatchShape::Virtual {
            method: virtual_method_name(&callee.name).to_string(),
            flags: !ctx.config.is_builtin_module(&callee.org, &callee.module),
        });
    }

    let owner = match desc.resolution {
        Resolution::EntryPoint(entry) => entry.owner.clone(),
        Resolution::Symbol(symbol) => ctx
            .naming
            .module_owner(&callee.package_id(), symbol.source.as_deref()),
        Resolution::Unresolved => return Err(desc.error(LoweringErrorKind::MissingResolution)),
    };
    let target = StaticTarget {
        owner,
        name: desc.encoded_name.clone(),
        descriptor: signature::format_descriptor(
            &layout::expand_types(slots),
            &desc.return_type,
            desc.closure_count,
        ),
    };

    Ok(if desc.is_foreign {
        DispatchShape::ForeignStatic(target)
    } else {
        DispatchShape::Static(target)
    })
}

/// Emit the thunk body.
pub fn emit(
    desc: &LambdaDescriptor<'_>,
    shape: &DispatchShape,
    slots: &[ArgumentSlot],
    thunk_name: &str,
) -> CodegenResult<ThunkFunction> {
    let mut b = ThunkBuilder::new(
        cleanup_function_name(thunk_name),
        signature::thunk_descriptor(desc.closure_count),
    );
    let closures: Vec<LocalId> = (0..desc.closure_count)
        .map(|i| b.add_param(format!("closure{}", i), LocalTy::ClosureMap))
        .collect();
    let args = b.add_param("args".to_string(), LocalTy::ArgArray);

    if let Some(pos) = desc.pos {
        b.push_stmt(ThunkStmt::SourceLocation {
            line: pos.line,
            col: pos.col,
        });
    }
    let strand = b.alloc_temp(LocalTy::Strand);
    b.push_stmt(ThunkStmt::LoadStrand { dst: strand, args });

    match shape {
        DispatchShape::Virtual { method, flags } => {
            let receiver_ty = desc
                .receiver_type
                .clone()
                .ok_or_else(|| desc.error(LoweringErrorKind::MissingReceiver))?;
            emit_virtual(&mut b, strand, args, receiver_ty, &desc.param_types, method, *flags);
        }
        DispatchShape::ForeignStatic(target) => {
            emit_resume_check(&mut b, strand);
            emit_static(&mut b, strand, args, &closures, slots, target, &desc.return_type);
        }
        DispatchShape::Static(target) => {
            emit_static(&mut b, strand, args, &closures, slots, target, &desc.return_type);
        }
    }

    Ok(b.finish())
}

/// Resumable blocking-call prologue.
///
/// On re-entry after a foreign suspension the strand already carries the
/// outcome: re-raise a panic, or hand back the stored return value. Leaves
/// the builder positioned on the first-entry path.
fn emit_resume_check(b: &mut ThunkBuilder, strand: LocalId) {
    let resume = b.create_block();
    let panicked = b.create_block();
    let completed = b.create_block();
    let first_entry = b.create_block();

    let blocked = b.alloc_temp(LocalTy::Native(Type::Boolean));
    b.push_stmt(ThunkStmt::GetStrandField {
        dst: blocked,
        strand,
        field: StrandField::BlockedOnExtern,
    });
    b.terminate(ThunkTerminator::Branch {
        cond: ThunkOperand::Local(blocked),
        then_block: resume,
        else_block: first_entry,
    });

    b.switch_to_block(resume);
    b.push_stmt(ThunkStmt::SetStrandField {
        strand,
        field: StrandField::BlockedOnExtern,
        value: ThunkOperand::Const(ThunkConst::Bool(false)),
    });
    let panic = b.alloc_temp(LocalTy::Boxed);
    b.push_stmt(ThunkStmt::GetStrandField {
        dst: panic,
        strand,
        field: StrandField::Panic,
    });
    let has_panic = b.alloc_temp(LocalTy::Native(Type::Boolean));
    b.push_stmt(ThunkStmt::IsPresent {
        dst: has_panic,
        value: panic,
    });
    b.terminate(ThunkTerminator::Branch {
        cond: ThunkOperand::Local(has_panic),
        then_block: panicked,
        else_block: completed,
    });

    b.switch_to_block(panicked);
    b.push_stmt(ThunkStmt::SetStrandField {
        strand,
        field: StrandField::Panic,
        value: ThunkOperand::Const(ThunkConst::Nil),
    });
    b.terminate(ThunkTerminator::Raise { error: panic });

    // return value is left in place
    b.switch_to_block(completed);
    let value = b.alloc_temp(LocalTy::Boxed);
    b.push_stmt(ThunkStmt::GetStrandField {
        dst: value,
        strand,
        field: StrandField::ReturnValue,
    });
    b.terminate(ThunkTerminator::Return {
        value: ThunkOperand::Local(value),
    });

    b.switch_to_block(first_entry);
}

/// Load `args[index]` and unbox it as `ty`.
fn load_unboxed(b: &mut ThunkBuilder, args: LocalId, index: u32, ty: &Type) -> LocalId {
    let raw = b.alloc_temp(LocalTy::Boxed);
    b.push_stmt(ThunkStmt::LoadArg { dst: raw, args, index });
    let value = b.alloc_temp(LocalTy::Native(ty.clone()));
    b.push_stmt(ThunkStmt::Unbox {
        dst: value,
        src: raw,
        ty: ty.clone(),
    });
    value
}

fn emit_static(
    b: &mut ThunkBuilder,
    strand: LocalId,
    args: LocalId,
    closures: &[LocalId],
    slots: &[ArgumentSlot],
    target: &StaticTarget,
    return_type: &Type,
) {
    let mut call_args = vec![ThunkOperand::Local(strand)];
    for (closure, slot) in closures.iter().zip(layout::closure_slots(closures.len())) {
        call_args.push(ThunkOperand::Local(*closure));
        if slot.supplied_flag_required {
            call_args.push(ThunkOperand::Const(ThunkConst::Bool(true)));
        }
    }

    for (i, slot) in slots.iter().enumerate() {
        let value = load_unboxed(b, args, layout::incoming_value_index(i), &slot.ty);
        call_args.push(ThunkOperand::Local(value));
        if slot.supplied_flag_required {
            let flag = load_unboxed(b, args, layout::incoming_flag_index(i), &Type::Boolean);
            call_args.push(ThunkOperand::Local(flag));
        }
    }

    let result = b.alloc_temp(LocalTy::Native(return_type.clone()));
    b.push_stmt(ThunkStmt::CallStatic {
        dst: result,
        target: target.clone(),
        args: call_args,
    });
    let boxed = b.alloc_temp(LocalTy::Boxed);
    b.push_stmt(ThunkStmt::Box {
        dst: boxed,
        src: result,
        ty: return_type.clone(),
    });
    b.terminate(ThunkTerminator::Return {
        value: ThunkOperand::Local(boxed),
    });
}

fn emit_virtual(
    b: &mut ThunkBuilder,
    strand: LocalId,
    args: LocalId,
    receiver_ty: Type,
    param_types: &[Type],
    method: &str,
    flags: bool,
) {
    let receiver = load_unboxed(b, args, layout::incoming_value_index(0), &receiver_ty);

    let array = b.alloc_temp(LocalTy::ArgArray);
    b.push_stmt(ThunkStmt::NewArray {
        dst: array,
        len: layout::virtual_array_len(param_types.len(), flags),
    });
    // receiver is argument 0 of the incoming array
    for i in 0..param_types.len() {
        let raw = b.alloc_temp(LocalTy::Boxed);
        b.push_stmt(ThunkStmt::LoadArg {
            dst: raw,
            args,
            index: layout::incoming_value_index(i + 1),
        });
        let index = layout::virtual_value_index(i, flags);
        b.push_stmt(ThunkStmt::ArrayStore {
            array,
            index,
            value: ThunkOperand::Local(raw),
        });
        if flags {
            b.push_stmt(ThunkStmt::ArrayStore {
                array,
                index: index + 1,
                value: ThunkOperand::Const(ThunkConst::Bool(true)),
            });
        }
    }

    let result = b.alloc_temp(LocalTy::Boxed);
    b.push_stmt(ThunkStmt::CallDynamic {
        dst: result,
        receiver,
        strand,
        method: method.to_string(),
        args: array,
    });
    b.terminate(ThunkTerminator::Return {
        value: ThunkOperand::Local(result),
    });
}
