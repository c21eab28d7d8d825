// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type definitions for the semantic model.

use std::fmt;

/// A type in Tern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Type {
    /// The nil type `()`
    Nil,
    Boolean,
    /// 64-bit signed integer
    Int,
    Byte,
    /// 64-bit IEEE float
    Float,
    Decimal,
    String,
    /// Top type
    Any,
    Error,
    /// `map<T>`
    Map(Box<Type>),
    /// `T[]`
    Array(Box<Type>),
    /// Named object (class) type
    Object { name: std::string::String },
    /// `future<T>`
    Future(Box<Type>),
    /// Function type
    Invokable {
        params: Vec<Type>,
        ret: Box<Type>,
    },
    /// `A|B`
    Union(Vec<Type>),
    Never,
}

impl Type {
    pub fn future(constraint: Type) -> Type {
        Type::Future(Box::new(constraint))
    }

    pub fn invokable(params: Vec<Type>, ret: Type) -> Type {
        Type::Invokable {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn map_of(constraint: Type) -> Type {
        Type::Map(Box::new(constraint))
    }

    pub fn object(name: impl Into<std::string::String>) -> Type {
        Type::Object { name: name.into() }
    }

    pub fn is_future(&self) -> bool {
        matches!(self, Type::Future(_))
    }

    pub fn is_invokable(&self) -> bool {
        matches!(self, Type::Invokable { .. })
    }

    /// `T` of a `future<T>`.
    pub fn future_constraint(&self) -> Option<&Type> {
        match self {
            Type::Future(inner) => Some(inner),
            _ => None,
        }
    }

    /// Return type of a function type.
    pub fn invokable_return(&self) -> Option<&Type> {
        match self {
            Type::Invokable { ret, .. } => Some(ret),
            _ => None,
        }
    }

    /// Parameter types of a function type.
    pub fn invokable_params(&self) -> Option<&[Type]> {
        match self {
            Type::Invokable { params, .. } => Some(params),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Nil => write!(f, "()"),
            Type::Boolean => write!(f, "boolean"),
            Type::Int => write!(f, "int"),
            Type::Byte => write!(f, "byte"),
            Type::Float => write!(f, "float"),
            Type::Decimal => write!(f, "decimal"),
            Type::String => write!(f, "string"),
            Type::Any => write!(f, "any"),
            Type::Error => write!(f, "error"),
            Type::Map(inner) => write!(f, "map<{}>", inner),
            Type::Array(inner) => write!(f, "{}[]", inner),
            Type::Object { name } => write!(f, "{}", name),
            Type::Future(inner) => write!(f, "future<{}>", inner),
            Type::Invokable { params, ret } => {
                write!(f, "function(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ") returns {}", ret)
            }
            Type::Union(members) => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{}", m)?;
                }
                Ok(())
            }
            Type::Never => write!(f, "never"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_constraint_is_inner_type() {
        let ty = Type::future(Type::Int);
        assert_eq!(ty.future_constraint(), Some(&Type::Int));
        assert_eq!(Type::Int.future_constraint(), None);
    }

    #[test]
    fn invokable_return_unwraps_one_level() {
        let inner = Type::invokable(vec![], Type::Int);
        let outer = Type::invokable(vec![Type::String], inner.clone());
        assert_eq!(outer.invokable_return(), Some(&inner));
        assert_eq!(outer.invokable_params(), Some(&[Type::String][..]));
    }

    #[test]
    fn display_function_type() {
        let ty = Type::invokable(vec![Type::Int, Type::map_of(Type::Any)], Type::Nil);
        assert_eq!(ty.to_string(), "function(int, map<any>) returns ()");
    }
}
