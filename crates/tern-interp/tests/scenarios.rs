// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! End-to-end: lower an instruction, then run the thunk.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tern_codegen::{
    generate_lambda, EntryPoint, EntryPointTable, LoweringConfig, LoweringContext, SourceFileNaming, ThunkFunction,
};
use tern_interp::{Completion, ExecError, Interpreter, Linkage};
use tern_ir::{Call, CalleeRef, ClosureLoad, Function, Instruction, Operand, VariableDecl};
use tern_rt::{drive, ErrorValue, ObjectValue, Strand, StrandRef, Value};
use tern_types::{PackageCache, PackageId, Type};

const ADD_DESC: &str = "(Ltern/runtime/scheduling/Strand;JZJZ)J";

fn math() -> PackageId {
    PackageId::new("acme", "math", "1.0.0")
}

fn add_ty() -> Type {
    Type::invokable(vec![Type::Int, Type::Int], Type::Int)
}

fn lower(function: Option<(&str, Function)>, ins: &Instruction) -> ThunkFunction {
    let config = LoweringConfig::default();
    let naming = SourceFileNaming::new(&config);
    let mut entries = EntryPointTable::new();
    if let Some((owner, function)) = function {
        let entry = EntryPoint {
            owner: owner.to_string(),
            function,
        };
        entries.register(&config, &math(), entry);
    }
    let packages = PackageCache::new();
    let ctx = LoweringContext::new(&entries, &packages, &config, &naming);
    generate_lambda(ctx, ins, "$lambda$test").unwrap()
}

fn start(name: &str, ret: Type, args: Vec<Operand>, is_virtual: bool) -> Instruction {
    Instruction::AsyncInvoke(Call {
        lhs: Some(VariableDecl::new("f", Type::future(ret))),
        callee: CalleeRef::new(&math(), name),
        args,
        is_virtual,
        pos: None,
    })
}

fn int_args(n: usize) -> Vec<Operand> {
    (0..n).map(|i| Operand::new(format!("a{}", i), Type::Int)).collect()
}

/// `[strand, v0, true, v1, true, ...]`
fn generic_args(strand: &StrandRef, values: Vec<Value>) -> Value {
    let mut items = vec![Value::Strand(strand.clone())];
    for v in values {
        items.push(v);
        items.push(Value::Boolean(true));
    }
    Value::array(items)
}

fn add_values(args: &[Value]) -> Result<(i64, i64), ErrorValue> {
    match (&args[1], &args[3]) {
        (Value::Int(a), Value::Int(b)) => Ok((*a, *b)),
        _ => Err(ErrorValue::new("bad operands")),
    }
}

// ── Static dispatch ─────────────────────────────────────────

#[test]
fn async_add_returns_seven() {
    let thunk = lower(
        Some(("acme/math/1/arith", Function::new("add", add_ty()))),
        &start("add", Type::Int, int_args(2), false),
    );

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut linkage = Linkage::new();
    let log = seen.clone();
    linkage.define("acme/math/1/arith", "add", ADD_DESC, move |args| {
        log.borrow_mut().extend(args[1..].iter().cloned());
        let (a, b) = add_values(args)?;
        Ok(Value::Int(a + b))
    });

    let strand = Strand::new(1).into_ref();
    let args = generic_args(&strand, vec![Value::Int(3), Value::Int(4)]);
    let out = Interpreter::new(linkage).invoke(&thunk, vec![], args).unwrap();

    assert_eq!(out, Completion::Returned(Value::Int(7)));
    assert_eq!(
        *seen.borrow(),
        vec![Value::Int(3), Value::Boolean(true), Value::Int(4), Value::Boolean(true)]
    );
}

#[test]
fn callee_panic_is_raised() {
    let thunk = lower(
        Some(("acme/math/1/arith", Function::new("add", add_ty()))),
        &start("add", Type::Int, int_args(2), false),
    );
    let mut linkage = Linkage::new();
    linkage.define("acme/math/1/arith", "add", ADD_DESC, |_| Err(ErrorValue::new("overflow")));

    let strand = Strand::new(1).into_ref();
    let args = generic_args(&strand, vec![Value::Int(3), Value::Int(4)]);
    let out = Interpreter::new(linkage).invoke(&thunk, vec![], args).unwrap();
    assert_eq!(out, Completion::Raised(ErrorValue::new("overflow")));
}

#[test]
fn descriptor_mismatch_is_unlinked() {
    let thunk = lower(
        Some(("acme/math/1/arith", Function::new("add", add_ty()))),
        &start("add", Type::Int, int_args(2), false),
    );
    let mut linkage = Linkage::new();
    linkage.define("acme/math/1/arith", "add", "(Ltern/runtime/scheduling/Strand;JJ)J", |_| Ok(Value::Nil));

    let strand = Strand::new(1).into_ref();
    let args = generic_args(&strand, vec![Value::Int(3), Value::Int(4)]);
    let err = Interpreter::new(linkage).invoke(&thunk, vec![], args).unwrap_err();
    assert!(matches!(err, ExecError::UnlinkedTarget { ref descriptor, .. } if descriptor == ADD_DESC));
}

// ── Foreign resumability ────────────────────────────────────

fn suspending_add(calls: Rc<Cell<u32>>, outcome: fn(i64, i64) -> Result<Value, ErrorValue>) -> Linkage {
    let mut linkage = Linkage::new();
    linkage.define("acme/math/1/native", "add", ADD_DESC, move |args| {
        calls.set(calls.get() + 1);
        let (a, b) = add_values(args)?;
        match &args[0] {
            Value::Strand(strand) => {
                strand.borrow_mut().suspend_on_extern(Box::new(move || outcome(a, b)));
                Ok(Value::Nil)
            }
            other => Err(ErrorValue::new(format!("expected strand, found {}", other.type_name()))),
        }
    });
    linkage
}

fn foreign_add_thunk() -> ThunkFunction {
    lower(
        Some(("acme/math/1/native", Function::new("add", add_ty()).foreign())),
        &start("add", Type::Int, int_args(2), false),
    )
}

#[test]
fn foreign_call_resumes_with_result() {
    let thunk = foreign_add_thunk();
    let calls = Rc::new(Cell::new(0));
    let interp = Interpreter::new(suspending_add(calls.clone(), |a, b| Ok(Value::Int(a + b))));

    let strand = Strand::new(7).into_ref();
    let args = generic_args(&strand, vec![Value::Int(3), Value::Int(4)]);
    let out = drive(&strand, || interp.invoke(&thunk, vec![], args.clone())).unwrap();

    assert_eq!(out, Completion::Returned(Value::Int(7)));
    assert_eq!(calls.get(), 1);
    let strand = strand.borrow();
    assert!(!strand.blocked_on_extern);
    // left for the scheduler
    assert_eq!(strand.return_value, Some(Value::Int(7)));
}

#[test]
fn foreign_panic_is_reraised_once() {
    let thunk = foreign_add_thunk();
    let calls = Rc::new(Cell::new(0));
    let interp = Interpreter::new(suspending_add(calls.clone(), |_, _| Err(ErrorValue::new("io failure"))));

    let strand = Strand::new(7).into_ref();
    let args = generic_args(&strand, vec![Value::Int(3), Value::Int(4)]);
    let out = drive(&strand, || interp.invoke(&thunk, vec![], args.clone())).unwrap();

    assert_eq!(out, Completion::Raised(ErrorValue::new("io failure")));
    assert_eq!(calls.get(), 1);
    assert!(strand.borrow().panic.is_none());
    assert!(!strand.borrow().blocked_on_extern);
}

#[test]
fn blocked_strand_never_reaches_callee() {
    let thunk = foreign_add_thunk();
    let calls = Rc::new(Cell::new(0));
    let interp = Interpreter::new(suspending_add(calls.clone(), |a, b| Ok(Value::Int(a + b))));

    let strand = Strand::new(7).into_ref();
    {
        let mut s = strand.borrow_mut();
        s.blocked_on_extern = true;
        s.return_value = Some(Value::Int(42));
    }
    // arguments are not even well-formed: marshaling must not run
    let args = Value::array(vec![Value::Strand(strand.clone())]);
    let out = interp.invoke(&thunk, vec![], args).unwrap();

    assert_eq!(out, Completion::Returned(Value::Int(42)));
    assert_eq!(calls.get(), 0);
    assert!(!strand.borrow().blocked_on_extern);
}

// ── Virtual dispatch ────────────────────────────────────────

#[derive(Debug, Default)]
struct Account {
    received: RefCell<Vec<(String, Vec<Value>)>>,
}

impl ObjectValue for Account {
    fn type_name(&self) -> &str {
        "Account"
    }

    fn call(&self, _strand: &StrandRef, method: &str, args: &[Value]) -> Result<Value, ErrorValue> {
        self.received.borrow_mut().push((method.to_string(), args.to_vec()));
        Ok(Value::Boolean(true))
    }
}

#[test]
fn virtual_call_passes_flagged_array() {
    let mut args = vec![Operand::new("self", Type::object("Account"))];
    args.extend(int_args(3));
    let thunk = lower(None, &start("Account.transfer", Type::Boolean, args, true));

    let account = Rc::new(Account::default());
    let strand = Strand::new(1).into_ref();
    let generic = generic_args(
        &strand,
        vec![Value::Object(account.clone()), Value::Int(1), Value::Int(2), Value::Int(3)],
    );
    let out = Interpreter::new(Linkage::new()).invoke(&thunk, vec![], generic).unwrap();
    assert_eq!(out, Completion::Returned(Value::Boolean(true)));

    let received = account.received.borrow();
    let (method, array) = &received[0];
    assert_eq!(method, "transfer");
    assert_eq!(array.len(), 6);
    for (i, pair) in array.chunks(2).enumerate() {
        assert_eq!(pair[0], Value::Int(i as i64 + 1));
        assert_eq!(pair[1], Value::Boolean(true));
    }
}

// ── Closure loads ───────────────────────────────────────────

#[test]
fn closure_with_two_captures() {
    let fn_ty = Type::invokable(vec![Type::Int], Type::Int);
    let ins = Instruction::ClosureLoad(ClosureLoad {
        lhs: VariableDecl::new("fp", fn_ty.clone()),
        callee: CalleeRef::new(&math(), "$lambda$scale"),
        params: vec![VariableDecl::new("x", Type::Int)],
        closure_maps: vec![
            Operand::new("outer", Type::map_of(Type::Any)),
            Operand::new("inner", Type::map_of(Type::Any)),
        ],
        fn_ty: fn_ty.clone(),
        pos: None,
    });
    let thunk = lower(
        Some(("acme/math/1/native", Function::new("$lambda$scale", fn_ty).foreign())),
        &ins,
    );

    let mut linkage = Linkage::new();
    linkage.define(
        "acme/math/1/native",
        "$lambda$scale",
        "(Ltern/runtime/scheduling/Strand;\
         Ltern/runtime/values/MapValue;Z\
         Ltern/runtime/values/MapValue;Z\
         JZ)J",
        |args| {
            let factor = |map: &Value| match map {
                Value::Map(m) => m.borrow().get("k").and_then(Value::as_int).unwrap_or(0),
                _ => 0,
            };
            assert_eq!(args.len(), 7);
            assert_eq!(args[2], Value::Boolean(true));
            assert_eq!(args[4], Value::Boolean(true));
            let x = args[5].as_int().unwrap_or(0);
            Ok(Value::Int(x * factor(&args[1]) + factor(&args[3])))
        },
    );

    let outer = Value::map_from([("k".to_string(), Value::Int(10))]);
    let inner = Value::map_from([("k".to_string(), Value::Int(1))]);
    let strand = Strand::new(1).into_ref();
    let args = generic_args(&strand, vec![Value::Int(4)]);
    let out = drive(&strand, || {
        Interpreter::new(linkage.clone()).invoke(&thunk, vec![outer.clone(), inner.clone()], args.clone())
    })
    .unwrap();
    assert_eq!(out, Completion::Returned(Value::Int(41)));
}
