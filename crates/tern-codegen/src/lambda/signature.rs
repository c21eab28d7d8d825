// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Signature formatting.
//!
//! Static targets are addressed by a descriptor string:
//! `(` strand, `(map, boolean)` per closure, one marker per parameter `)`
//! followed by the return marker.

use tern_types::Type;

use crate::abi;

fn reference(owner: &str) -> String {
    format!("L{};", owner)
}

/// Marker of a single semantic type.
pub fn type_marker(ty: &Type) -> String {
    match ty {
        Type::Int => "J".to_string(),
        Type::Byte => "I".to_string(),
        Type::Float => "D".to_string(),
        Type::Boolean => "Z".to_string(),
        Type::String => reference(abi::STRING_VALUE),
        Type::Decimal => reference(abi::DECIMAL_VALUE),
        Type::Error => reference(abi::ERROR_VALUE),
        Type::Map(_) => reference(abi::MAP_VALUE),
        Type::Array(_) => reference(abi::ARRAY_VALUE),
        Type::Object { .. } => reference(abi::OBJECT_VALUE),
        Type::Future(_) => reference(abi::FUTURE_VALUE),
        Type::Invokable { .. } => reference(abi::FUNCTION_VALUE),
        Type::Nil | Type::Any | Type::Union(_) | Type::Never => reference(abi::OBJECT),
    }
}

fn closure_markers(closure_count: usize) -> String {
    let pair = format!("{}Z", reference(abi::MAP_VALUE));
    pair.repeat(closure_count)
}

/// Descriptor of a static callee.
///
/// `param_types` is the flattened parameter list, supplied flags already
/// interleaved as booleans (see [`super::layout::expand_types`]).
pub fn format_descriptor(param_types: &[Type], return_type: &Type, closure_count: usize) -> String {
    let mut desc = String::from("(");
    desc.push_str(&reference(abi::STRAND));
    desc.push_str(&closure_markers(closure_count));
    for ty in param_types {
        desc.push_str(&type_marker(ty));
    }
    desc.push(')');
    desc.push_str(&type_marker(return_type));
    desc
}

/// Exposed signature of a thunk: one map per closure, then the argument
/// array, returning a boxed value.
pub fn thunk_descriptor(closure_count: usize) -> String {
    format!(
        "({}[{}){}",
        reference(abi::MAP_VALUE).repeat(closure_count),
        reference(abi::OBJECT),
        reference(abi::OBJECT)
    )
}

/// Signature of the uniform object dispatch entry point.
pub fn dynamic_call_descriptor() -> String {
    format!(
        "({}{}[{}){}",
        reference(abi::STRAND),
        reference(abi::STRING_VALUE),
        reference(abi::OBJECT),
        reference(abi::OBJECT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_with_flags() {
        let params = [Type::Int, Type::Boolean, Type::Int, Type::Boolean];
        assert_eq!(
            format_descriptor(&params, &Type::Int, 0),
            "(Ltern/runtime/scheduling/Strand;JZJZ)J"
        );
    }

    #[test]
    fn descriptor_with_closures() {
        let desc = format_descriptor(&[Type::String], &Type::Nil, 2);
        assert_eq!(
            desc,
            "(Ltern/runtime/scheduling/Strand;\
             Ltern/runtime/values/MapValue;Z\
             Ltern/runtime/values/MapValue;Z\
             Ltern/runtime/values/StringValue;)Ltern/lang/Object;"
        );
    }

    #[test]
    fn reference_markers() {
        assert_eq!(type_marker(&Type::map_of(Type::Any)), "Ltern/runtime/values/MapValue;");
        assert_eq!(type_marker(&Type::object("Account")), "Ltern/runtime/values/ObjectValue;");
        assert_eq!(type_marker(&Type::Union(vec![Type::Int, Type::Nil])), "Ltern/lang/Object;");
        assert_eq!(type_marker(&Type::Byte), "I");
        assert_eq!(type_marker(&Type::Float), "D");
    }

    #[test]
    fn thunk_signature() {
        assert_eq!(thunk_descriptor(0), "([Ltern/lang/Object;)Ltern/lang/Object;");
        assert_eq!(
            thunk_descriptor(1),
            "(Ltern/runtime/values/MapValue;[Ltern/lang/Object;)Ltern/lang/Object;"
        );
    }

    #[test]
    fn dynamic_call_signature() {
        assert_eq!(
            dynamic_call_descriptor(),
            "(Ltern/runtime/scheduling/Strand;Ltern/runtime/values/StringValue;[Ltern/lang/Object;)Ltern/lang/Object;"
        );
    }
}
