// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Display implementations for thunk MIR.

use std::fmt;

use super::*;

impl fmt::Display for LocalTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalTy::Strand => write!(f, "strand"),
            LocalTy::ArgArray => write!(f, "object[]"),
            LocalTy::ClosureMap => write!(f, "map"),
            LocalTy::Boxed => write!(f, "object"),
            LocalTy::Native(ty) => write!(f, "{}", ty),
        }
    }
}

impl fmt::Display for ThunkConst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThunkConst::Nil => write!(f, "nil"),
            ThunkConst::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for ThunkOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThunkOperand::Local(id) => write!(f, "_{}", id.0),
            ThunkOperand::Const(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Display for StrandField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

impl fmt::Display for StaticTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.owner, self.name, self.descriptor)
    }
}

impl fmt::Display for ThunkStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThunkStmt::SourceLocation { line, col } => write!(f, "// {}:{}", line, col),
            ThunkStmt::LoadStrand { dst, args } => {
                write!(f, "_{} = strand(_{}[0])", dst.0, args.0)
            }
            ThunkStmt::LoadArg { dst, args, index } => {
                write!(f, "_{} = _{}[{}]", dst.0, args.0, index)
            }
            ThunkStmt::Unbox { dst, src, ty } => write!(f, "_{} = unbox<{}>(_{})", dst.0, ty, src.0),
            ThunkStmt::Box { dst, src, ty } => write!(f, "_{} = box<{}>(_{})", dst.0, ty, src.0),
            ThunkStmt::GetStrandField { dst, strand, field } => {
                write!(f, "_{} = _{}.{}", dst.0, strand.0, field)
            }
            ThunkStmt::SetStrandField { strand, field, value } => {
                write!(f, "_{}.{} = {}", strand.0, field, value)
            }
            ThunkStmt::IsPresent { dst, value } => write!(f, "_{} = present(_{})", dst.0, value.0),
            ThunkStmt::NewArray { dst, len } => write!(f, "_{} = new object[{}]", dst.0, len),
            ThunkStmt::ArrayStore { array, index, value } => {
                write!(f, "_{}[{}] = {}", array.0, index, value)
            }
            ThunkStmt::CallStatic { dst, target, args } => {
                write!(f, "_{} = call {}(", dst.0, target)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            ThunkStmt::CallDynamic {
                dst,
                receiver,
                strand,
                method,
                args,
            } => write!(
                f,
                "_{} = dispatch _{}.{}(_{}, \"{}\", _{})",
                dst.0,
                receiver.0,
                crate::abi::DYNAMIC_CALL_METHOD,
                strand.0,
                method,
                args.0
            ),
        }
    }
}

impl fmt::Display for ThunkTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThunkTerminator::Return { value } => write!(f, "return {}", value),
            ThunkTerminator::Goto { target } => write!(f, "goto bb{}", target.0),
            ThunkTerminator::Branch {
                cond,
                then_block,
                else_block,
            } => write!(f, "if {} then bb{} else bb{}", cond, then_block.0, else_block.0),
            ThunkTerminator::Raise { error } => write!(f, "raise _{}", error.0),
            ThunkTerminator::Unreachable => write!(f, "unreachable"),
        }
    }
}

impl fmt::Display for ThunkFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thunk {}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match &p.name {
                Some(name) => write!(f, "{}: {}", name, p.ty)?,
                None => write!(f, "_{}: {}", p.id.0, p.ty)?,
            }
        }
        writeln!(f, ") -> object {{  // {}", self.descriptor)?;

        for local in self.locals.iter().filter(|l| !l.is_param) {
            writeln!(f, "  let _{}: {}", local.id.0, local.ty)?;
        }
        if self.locals.iter().any(|l| !l.is_param) {
            writeln!(f)?;
        }

        for block in &self.blocks {
            writeln!(f, "  bb{}:", block.id.0)?;
            for stmt in &block.statements {
                writeln!(f, "    {}", stmt)?;
            }
            writeln!(f, "    {}", block.terminator)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_types::Type;

    #[test]
    fn display_small_thunk() {
        let mut b = ThunkBuilder::new("$lambda$0".to_string(), "([Ltern/lang/Object;)Ltern/lang/Object;".to_string());
        let args = b.add_param("args".to_string(), LocalTy::ArgArray);
        let strand = b.alloc_temp(LocalTy::Strand);
        let raw = b.alloc_temp(LocalTy::Boxed);
        let v = b.alloc_temp(LocalTy::Native(Type::Int));
        b.push_stmt(ThunkStmt::LoadStrand { dst: strand, args });
        b.push_stmt(ThunkStmt::LoadArg { dst: raw, args, index: 1 });
        b.push_stmt(ThunkStmt::Unbox { dst: v, src: raw, ty: Type::Int });
        b.terminate(ThunkTerminator::Return {
            value: ThunkOperand::Const(ThunkConst::Nil),
        });
        let text = b.finish().to_string();

        assert!(text.starts_with("thunk $lambda$0(args: object[]) -> object {"));
        assert!(text.contains("  let _1: strand\n"));
        assert!(text.contains("    _1 = strand(_0[0])\n"));
        assert!(text.contains("    _3 = unbox<int>(_2)\n"));
        assert!(text.contains("    return nil\n"));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn display_branch_and_fields() {
        let term = ThunkTerminator::Branch {
            cond: ThunkOperand::Local(LocalId(4)),
            then_block: BlockId(1),
            else_block: BlockId(3),
        };
        assert_eq!(term.to_string(), "if _4 then bb1 else bb3");

        let stmt = ThunkStmt::SetStrandField {
            strand: LocalId(1),
            field: StrandField::BlockedOnExtern,
            value: ThunkOperand::Const(ThunkConst::Bool(false)),
        };
        assert_eq!(stmt.to_string(), "_1.blockedOnExtern = false");
    }
}
