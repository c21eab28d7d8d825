// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Per-instruction working record.

use tern_ir::{CalleeRef, Instruction, InstructionKind, Position};
use tern_types::{FunctionSymbol, Type};

use crate::naming::encode_identifier;
use crate::{CodegenResult, EntryPoint, LoweringError, LoweringErrorKind};

/// Where a static callee was found.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Not resolved yet, or a virtual call (never resolved).
    Unresolved,
    /// Already compiled in this unit.
    EntryPoint(&'a EntryPoint),
    /// Known only from its package's symbol table.
    Symbol(&'a FunctionSymbol),
}

/// Everything the emitter needs to know about one closure load or call.
///
/// Created per instruction, threaded by value through resolve and emit,
/// then dropped.
#[derive(Debug, Clone)]
pub struct LambdaDescriptor<'a> {
    pub kind: InstructionKind,
    pub callee: CalleeRef,
    pub encoded_name: String,
    /// Qualified name used against the entry-point table. Set by the resolver.
    pub lookup_key: Option<String>,
    pub resolution: Resolution<'a>,
    pub is_foreign: bool,
    pub return_type: Type,
    pub closure_count: usize,
    pub is_virtual: bool,
    /// Declared parameter types, excluding closures and the receiver.
    pub param_types: Vec<Type>,
    /// Static type of `args[0]` for virtual calls.
    pub receiver_type: Option<Type>,
    pub pos: Option<Position>,
}

impl<'a> LambdaDescriptor<'a> {
    pub fn resolved_entry_point(&self) -> Option<&'a EntryPoint> {
        match self.resolution {
            Resolution::EntryPoint(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn resolved_symbol(&self) -> Option<&'a FunctionSymbol> {
        match self.resolution {
            Resolution::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Whether the callee must be looked up before emission.
    pub fn needs_resolution(&self) -> bool {
        !self.is_virtual
    }

    pub(crate) fn error(&self, kind: LoweringErrorKind) -> LoweringError {
        LoweringError::new(kind, self.kind, self.callee.to_string())
    }
}

fn unsupported(ins: &Instruction) -> LoweringError {
    LoweringError::new(
        LoweringErrorKind::UnsupportedInstruction(ins.kind()),
        ins.kind(),
        ins.callee().map(|c| c.to_string()).unwrap_or_else(|| "<none>".to_string()),
    )
}

/// Build the descriptor for a closure load or call site.
pub fn build<'a>(ins: &Instruction) -> CodegenResult<LambdaDescriptor<'a>> {
    let kind = ins.kind();
    let desc = match ins {
        Instruction::ClosureLoad(load) => {
            // future<T> ⇒ T; otherwise the loaded function's type, one
            // invokable level unwrapped
            let return_type = match load.lhs.ty.future_constraint() {
                Some(inner) => inner.clone(),
                None => load.fn_ty.invokable_return().unwrap_or(&load.fn_ty).clone(),
            };
            LambdaDescriptor {
                kind,
                callee: load.callee.clone(),
                encoded_name: encode_identifier(&load.callee.name),
                lookup_key: None,
                resolution: Resolution::Unresolved,
                is_foreign: false,
                return_type,
                closure_count: load.closure_maps.len(),
                is_virtual: false,
                param_types: load.params.iter().map(|p| p.ty.clone()).collect(),
                receiver_type: None,
                pos: load.pos,
            }
        }
        Instruction::AsyncInvoke(call) | Instruction::DirectInvoke(call) => {
            let lhs_ty = call.lhs.as_ref().map(|lhs| lhs.ty.clone()).unwrap_or(Type::Nil);
            let return_type = match (kind, lhs_ty.future_constraint().cloned()) {
                (_, Some(inner)) => inner,
                (InstructionKind::DirectInvoke, None) => lhs_ty,
                (_, None) => {
                    return Err(LoweringError::new(
                        LoweringErrorKind::NonFutureAsyncResult(lhs_ty),
                        kind,
                        call.callee.to_string(),
                    ))
                }
            };

            let (receiver_type, param_types) = if call.is_virtual {
                let receiver = call.args.first().ok_or_else(|| {
                    LoweringError::new(LoweringErrorKind::MissingReceiver, kind, call.callee.to_string())
                })?;
                let rest = call.args[1..].iter().map(|a| a.ty().clone()).collect();
                (Some(receiver.ty().clone()), rest)
            } else {
                // replaced by the declared types once resolved
                (None, call.args.iter().map(|a| a.ty().clone()).collect())
            };

            LambdaDescriptor {
                kind,
                callee: call.callee.clone(),
                encoded_name: encode_identifier(&call.callee.name),
                lookup_key: None,
                resolution: Resolution::Unresolved,
                is_foreign: false,
                return_type,
                closure_count: 0,
                is_virtual: call.is_virtual,
                param_types,
                receiver_type,
                pos: call.pos,
            }
        }
        Instruction::Move { .. } | Instruction::ConstantLoad { .. } => return Err(unsupported(ins)),
    };
    Ok(desc)
}
