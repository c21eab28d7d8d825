// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! The thunk interpreter.
//!
//! Locals hold boxed runtime values throughout; `Unbox` is a checked
//! conversion and `Box` is a plain copy.

use tern_codegen::thunk::{
    BlockId, LocalId, StrandField, ThunkConst, ThunkFunction, ThunkOperand, ThunkStmt, ThunkTerminator,
};
use tern_rt::{ErrorValue, StrandRef, Value};
use tern_types::Type;
use tracing::trace;

use crate::{ExecError, Linkage};

/// How a thunk finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Returned(Value),
    /// Guest panic, either raised by the callee or re-raised by the
    /// resume check.
    Raised(ErrorValue),
}

/// Whether `value` may be unboxed as `ty`.
pub fn conforms(value: &Value, ty: &Type) -> bool {
    match ty {
        Type::Nil => value.is_nil(),
        Type::Boolean => matches!(value, Value::Boolean(_)),
        Type::Int => matches!(value, Value::Int(_)),
        Type::Byte => matches!(value, Value::Byte(_)),
        Type::Float | Type::Decimal => matches!(value, Value::Float(_)),
        Type::String => matches!(value, Value::String(_)),
        Type::Error => matches!(value, Value::Error(_)),
        Type::Map(_) => matches!(value, Value::Map(_)),
        Type::Array(_) => matches!(value, Value::Array(_)),
        Type::Object { .. } => matches!(value, Value::Object(_)),
        Type::Union(members) => members.iter().any(|m| conforms(value, m)),
        Type::Future(_) | Type::Invokable { .. } | Type::Any => true,
        Type::Never => false,
    }
}

pub struct Interpreter {
    linkage: Linkage,
}

/// Per-invocation state.
struct Frame {
    locals: Vec<Option<Value>>,
}

impl Frame {
    fn new(thunk: &ThunkFunction) -> Self {
        let slots = thunk.locals.iter().map(|l| l.id.0 as usize + 1).max().unwrap_or(0);
        Self {
            locals: vec![None; slots],
        }
    }

    fn get(&self, id: LocalId) -> Result<&Value, ExecError> {
        self.locals
            .get(id.0 as usize)
            .and_then(|v| v.as_ref())
            .ok_or(ExecError::UninitializedLocal(id.0))
    }

    fn set(&mut self, id: LocalId, value: Value) {
        let index = id.0 as usize;
        if index >= self.locals.len() {
            self.locals.resize(index + 1, None);
        }
        self.locals[index] = Some(value);
    }

    fn operand(&self, op: &ThunkOperand) -> Result<Value, ExecError> {
        match op {
            ThunkOperand::Local(id) => self.get(*id).cloned(),
            ThunkOperand::Const(ThunkConst::Nil) => Ok(Value::Nil),
            ThunkOperand::Const(ThunkConst::Bool(b)) => Ok(Value::Boolean(*b)),
        }
    }

    fn strand(&self, id: LocalId) -> Result<StrandRef, ExecError> {
        match self.get(id)? {
            Value::Strand(strand) => Ok(strand.clone()),
            other => Err(mismatch("strand", other)),
        }
    }
}

fn mismatch(expected: impl Into<String>, found: &Value) -> ExecError {
    ExecError::TypeMismatch {
        expected: expected.into(),
        found: found.type_name().to_string(),
    }
}

fn array_get(array: &Value, index: u32) -> Result<Value, ExecError> {
    match array {
        Value::Array(items) => {
            let items = items.borrow();
            items
                .get(index as usize)
                .cloned()
                .ok_or(ExecError::IndexOutOfBounds { index, len: items.len() })
        }
        other => Err(mismatch("object[]", other)),
    }
}

fn array_set(array: &Value, index: u32, value: Value) -> Result<(), ExecError> {
    match array {
        Value::Array(items) => {
            let mut items = items.borrow_mut();
            let len = items.len();
            let slot = items
                .get_mut(index as usize)
                .ok_or(ExecError::IndexOutOfBounds { index, len })?;
            *slot = value;
            Ok(())
        }
        other => Err(mismatch("object[]", other)),
    }
}

impl Interpreter {
    pub fn new(linkage: Linkage) -> Self {
        Self { linkage }
    }

    pub fn linkage(&self) -> &Linkage {
        &self.linkage
    }

    /// Run `thunk` once with its closure maps and generic argument array.
    ///
    /// A foreign callee that suspends makes the thunk return early; drive
    /// re-entry with [`tern_rt::drive`].
    pub fn invoke(&self, thunk: &ThunkFunction, closures: Vec<Value>, args: Value) -> Result<Completion, ExecError> {
        let expected = thunk.closure_params().count();
        if closures.len() != expected {
            return Err(ExecError::ArityMismatch {
                expected,
                got: closures.len(),
            });
        }

        let mut frame = Frame::new(thunk);
        let mut closures = closures.into_iter();
        for param in &thunk.params {
            match thunk.args_param() {
                Some(id) if id == param.id => frame.set(param.id, args.clone()),
                _ => {
                    if let Some(map) = closures.next() {
                        frame.set(param.id, map);
                    }
                }
            }
        }

        let mut block = thunk.entry_block;
        loop {
            if let Some(done) = self.exec_block(thunk, block, &mut frame)? {
                return Ok(done);
            }
            block = match &thunk.block(block).terminator {
                ThunkTerminator::Goto { target } => *target,
                ThunkTerminator::Branch {
                    cond,
                    then_block,
                    else_block,
                } => match frame.operand(cond)? {
                    Value::Boolean(true) => *then_block,
                    Value::Boolean(false) => *else_block,
                    other => return Err(mismatch("boolean", &other)),
                },
                ThunkTerminator::Return { value } => return Ok(Completion::Returned(frame.operand(value)?)),
                ThunkTerminator::Raise { error } => match frame.get(*error)? {
                    Value::Error(err) => return Ok(Completion::Raised(err.clone())),
                    other => return Err(mismatch("error", other)),
                },
                ThunkTerminator::Unreachable => return Err(ExecError::Unreachable(block.0)),
            };
        }
    }

    /// Run the statements of one block. `Some` when a callee panicked.
    fn exec_block(
        &self,
        thunk: &ThunkFunction,
        block: BlockId,
        frame: &mut Frame,
    ) -> Result<Option<Completion>, ExecError> {
        for stmt in &thunk.block(block).statements {
            match stmt {
                ThunkStmt::SourceLocation { line, col } => {
                    trace!(thunk = %thunk.name, line, col, "enter");
                }
                ThunkStmt::LoadStrand { dst, args } => {
                    let strand = array_get(frame.get(*args)?, tern_codegen::abi::STRAND_SLOT)?;
                    if !matches!(strand, Value::Strand(_)) {
                        return Err(mismatch("strand", &strand));
                    }
                    frame.set(*dst, strand);
                }
                ThunkStmt::LoadArg { dst, args, index } => {
                    let value = array_get(frame.get(*args)?, *index)?;
                    frame.set(*dst, value);
                }
                ThunkStmt::Unbox { dst, src, ty } => {
                    let value = frame.get(*src)?.clone();
                    if !conforms(&value, ty) {
                        return Err(mismatch(ty.to_string(), &value));
                    }
                    frame.set(*dst, value);
                }
                ThunkStmt::Box { dst, src, .. } => {
                    let value = frame.get(*src)?.clone();
                    frame.set(*dst, value);
                }
                ThunkStmt::GetStrandField { dst, strand, field } => {
                    let strand = frame.strand(*strand)?;
                    let strand = strand.borrow();
                    let value = match field {
                        StrandField::BlockedOnExtern => Value::Boolean(strand.blocked_on_extern),
                        StrandField::Panic => strand.panic.clone().map(Value::Error).unwrap_or(Value::Nil),
                        StrandField::ReturnValue => strand.return_value.clone().unwrap_or(Value::Nil),
                    };
                    frame.set(*dst, value);
                }
                ThunkStmt::SetStrandField { strand, field, value } => {
                    let strand = frame.strand(*strand)?;
                    let value = frame.operand(value)?;
                    let mut strand = strand.borrow_mut();
                    match (field, value) {
                        (StrandField::BlockedOnExtern, Value::Boolean(b)) => strand.blocked_on_extern = b,
                        (StrandField::BlockedOnExtern, other) => return Err(mismatch("boolean", &other)),
                        (StrandField::Panic, Value::Nil) => strand.panic = None,
                        (StrandField::Panic, Value::Error(err)) => strand.panic = Some(err),
                        (StrandField::Panic, other) => return Err(mismatch("error", &other)),
                        (StrandField::ReturnValue, Value::Nil) => strand.return_value = None,
                        (StrandField::ReturnValue, other) => strand.return_value = Some(other),
                    }
                }
                ThunkStmt::IsPresent { dst, value } => {
                    let present = !frame.get(*value)?.is_nil();
                    frame.set(*dst, Value::Boolean(present));
                }
                ThunkStmt::NewArray { dst, len } => {
                    frame.set(*dst, Value::array(vec![Value::Nil; *len as usize]));
                }
                ThunkStmt::ArrayStore { array, index, value } => {
                    let value = frame.operand(value)?;
                    array_set(frame.get(*array)?, *index, value)?;
                }
                ThunkStmt::CallStatic { dst, target, args } => {
                    let f = self.linkage.lookup(target).ok_or_else(|| ExecError::UnlinkedTarget {
                        owner: target.owner.clone(),
                        name: target.name.clone(),
                        descriptor: target.descriptor.clone(),
                    })?;
                    let values = args.iter().map(|a| frame.operand(a)).collect::<Result<Vec<_>, _>>()?;
                    trace!(owner = %target.owner, name = %target.name, "static call");
                    match f(values.as_slice()) {
                        Ok(value) => frame.set(*dst, value),
                        Err(err) => return Ok(Some(Completion::Raised(err))),
                    }
                }
                ThunkStmt::CallDynamic {
                    dst,
                    receiver,
                    strand,
                    method,
                    args,
                } => {
                    let object = match frame.get(*receiver)? {
                        Value::Object(object) => object.clone(),
                        other => return Err(mismatch("object", other)),
                    };
                    let strand = frame.strand(*strand)?;
                    let items = match frame.get(*args)? {
                        Value::Array(items) => items.borrow().clone(),
                        other => return Err(mismatch("object[]", other)),
                    };
                    trace!(object = object.type_name(), method = %method, "dynamic call");
                    match object.call(&strand, method, &items) {
                        Ok(value) => frame.set(*dst, value),
                        Err(err) => return Ok(Some(Completion::Raised(err))),
                    }
                }
            }
        }
        Ok(None)
    }
}
