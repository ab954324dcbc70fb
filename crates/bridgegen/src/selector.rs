//! Objective-C selector synthesis.
//!
//! The selector becomes part of a stable, externally visible method-name
//! contract: the runtime looks methods up by exact string match, with no
//! compile-time check on the consuming side. The rules here must therefore
//! be reproduced byte for byte.

use crate::types::ObjcType;

/// One method parameter, already resolved.
#[derive(Debug, Clone, Copy)]
pub struct SelectorParam<'a> {
    /// External label; `None` is the wildcard ("no external name").
    pub label: Option<&'a str>,
    /// Internal name referenced by the method body. May be `_`.
    pub name: &'a str,
    pub ty: &'a ObjcType,
}

/// Build the selector for `base` with the given ordered parameters.
///
/// With no parameters the selector is the bare name. The first parameter
/// fuses its label into the name (`With` + capitalized label when the label
/// doubles as the internal name, the capitalized label alone otherwise);
/// later parameters are space-separated keyword segments, with wildcard
/// labels rendering as an empty keyword.
pub fn synthesize(base: &str, params: &[SelectorParam<'_>]) -> String {
    let mut selector = String::from(base);

    for (index, param) in params.iter().enumerate() {
        if index == 0 {
            match param.label {
                None => selector.push(':'),
                Some(label) if label == param.name => {
                    selector.push_str("With");
                    selector.push_str(&capitalized(label));
                    selector.push(':');
                }
                Some(label) => {
                    selector.push_str(&capitalized(label));
                    selector.push(':');
                }
            }
        } else {
            selector.push(' ');
            if let Some(label) = param.label {
                selector.push_str(label);
            }
            selector.push(':');
        }
        selector.push('(');
        selector.push_str(&param.ty.render_param());
        selector.push(')');
        selector.push_str(param.name);
    }

    selector
}

/// ASCII-safe uppercase-first-letter, deliberately not locale-sensitive.
fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
