// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Display implementations for IR types.

use std::fmt;

use crate::*;

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstructionKind::ClosureLoad => "closure_load",
            InstructionKind::AsyncInvoke => "async_invoke",
            InstructionKind::DirectInvoke => "direct_invoke",
            InstructionKind::Move => "move",
            InstructionKind::ConstantLoad => "const_load",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for CalleeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.module)?;
        if !self.version.is_empty() {
            write!(f, ":{}", self.version)?;
        }
        write!(f, ".{}", self.name)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.var.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Nil => write!(f, "()"),
            Constant::Int(v) => write!(f, "{}", v),
            Constant::Float(v) => write!(f, "{}", v),
            Constant::Boolean(v) => write!(f, "{}", v),
            Constant::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Operand]) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ")")
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::ClosureLoad(load) => {
                write!(f, "%{} = fp_load {}", load.lhs.name, load.callee)?;
                if !load.closure_maps.is_empty() {
                    write!(f, " captures ")?;
                    write_args(f, &load.closure_maps)?;
                }
                Ok(())
            }
            Instruction::AsyncInvoke(call) | Instruction::DirectInvoke(call) => {
                if let Some(lhs) = &call.lhs {
                    write!(f, "%{} = ", lhs.name)?;
                }
                let op = if matches!(self, Instruction::AsyncInvoke(_)) { "start" } else { "call" };
                write!(f, "{} ", op)?;
                if call.is_virtual {
                    write!(f, "virtual ")?;
                }
                write!(f, "{}", call.callee)?;
                write_args(f, &call.args)
            }
            Instruction::Move { lhs, rhs } => write!(f, "%{} = {}", lhs.name, rhs),
            Instruction::ConstantLoad { lhs, value } => write!(f, "%{} = const {}", lhs.name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_types::{PackageId, Type};

    #[test]
    fn display_async_call() {
        let pkg = PackageId::new("acme", "math", "1.0.0");
        let ins = Instruction::AsyncInvoke(Call {
            lhs: Some(VariableDecl::new("f", Type::future(Type::Int))),
            callee: CalleeRef::new(&pkg, "add"),
            args: vec![Operand::new("x", Type::Int), Operand::new("y", Type::Int)],
            is_virtual: false,
            pos: None,
        });
        assert_eq!(ins.to_string(), "%f = start acme/math:1.0.0.add(%x, %y)");
        assert_eq!(ins.kind().to_string(), "async_invoke");
    }

    #[test]
    fn non_call_instructions_have_no_callee() {
        let ins = Instruction::ConstantLoad {
            lhs: VariableDecl::new("c", Type::Int),
            value: Constant::Int(3),
        };
        assert!(ins.callee().is_none());
        assert_eq!(ins.to_string(), "%c = const 3");
    }
}
