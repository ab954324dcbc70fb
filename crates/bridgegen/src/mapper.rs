//! Resolution of source type expressions into bridge types.
//!
//! Resolution is pure: the same expression always resolves to the same
//! [`ObjcType`]. Failures carry the innermost offending name and its span,
//! so a bad type buried in a container produces a precise diagnostic.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::diagnostics::Span;
use crate::expr::TypeExpr;
use crate::types::ObjcType;

/// Object types: canonical bridge name and the source names that map to it.
const OBJECT_TYPES: &[(&str, &[&str])] = &[
    ("id", &["Any", "AnyObject"]),
    ("NSString", &["String"]),
    ("NSNumber", &[]),
    ("NSObject", &[]),
    ("NSDate", &["Date"]),
    ("NSData", &["Data"]),
    ("NSURL", &["URL"]),
    ("NSURLRequest", &["URLRequest"]),
    ("NSArray", &["NSMutableArray"]),
    ("NSDictionary", &["NSMutableDictionary"]),
    ("NSSet", &["NSMutableSet"]),
    ("UIColor", &[]),
];

/// Numeric scalars. All source integer widths collapse onto the two bridge
/// integer names.
const NUMERIC_TYPES: &[(&str, &[&str])] = &[
    ("BOOL", &["Bool"]),
    ("NSInteger", &["Int", "Int8", "Int16", "Int32", "Int64"]),
    ("NSUInteger", &["UInt", "UInt8", "UInt16", "UInt32", "UInt64"]),
    ("float", &["Float"]),
    ("CGFloat", &[]),
    ("double", &["Double", "TimeInterval"]),
];

/// Value types passed by value.
const STRUCT_TYPES: &[&str] = &["CGPoint", "CGSize", "CGRect"];

/// Callback types the bridge hands to native methods.
const BLOCK_TYPES: &[&str] = &[
    "RCTResponseSenderBlock",
    "RCTResponseErrorBlock",
    "RCTPromiseResolveBlock",
    "RCTPromiseRejectBlock",
    "RCTDirectEventBlock",
    "RCTBubblingEventBlock",
    "RCTCapturingEventBlock",
];

static CLASSIFICATION: Lazy<HashMap<&'static str, ObjcType>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(canonical, aliases) in OBJECT_TYPES {
        map.insert(canonical, ObjcType::Object(canonical));
        for &alias in aliases {
            map.insert(alias, ObjcType::Object(canonical));
        }
    }
    for &(canonical, aliases) in NUMERIC_TYPES {
        map.insert(canonical, ObjcType::Numeric(canonical));
        for &alias in aliases {
            map.insert(alias, ObjcType::Numeric(canonical));
        }
    }
    for &name in STRUCT_TYPES {
        map.insert(name, ObjcType::Struct(name));
    }
    for &name in BLOCK_TYPES {
        map.insert(name, ObjcType::Block(name));
    }
    map
});

/// A type expression (or a part of one) the bridge cannot carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' type is not supported")]
pub struct TypeError {
    /// Textual rendering of the innermost offending node.
    pub name: String,
    /// Location of that node.
    pub span: Span,
}

/// Look up a simple source type name.
pub fn classify(name: &str) -> Option<ObjcType> {
    CLASSIFICATION.get(name).cloned()
}

/// Resolve a source type expression into a bridge type.
pub fn resolve(expr: &TypeExpr) -> Result<ObjcType, TypeError> {
    match expr {
        TypeExpr::Name { name, span } => classify(name).ok_or_else(|| TypeError {
            name: name.clone(),
            span: *span,
        }),
        TypeExpr::Generic {
            name,
            name_span,
            args,
            ..
        } => match (name.as_str(), args.as_slice()) {
            ("Array", [element]) => Ok(ObjcType::Array(Box::new(resolve(element)?))),
            ("Set", [element]) => Ok(ObjcType::Set(Box::new(resolve(element)?))),
            ("Dictionary", [key, value]) => Ok(ObjcType::Dictionary(
                Box::new(resolve(key)?),
                Box::new(resolve(value)?),
            )),
            ("Optional", [inner]) => Ok(optional(resolve(inner)?)),
            _ => Err(TypeError {
                name: name.clone(),
                span: *name_span,
            }),
        },
        TypeExpr::Optional { inner, .. } => Ok(optional(resolve(inner)?)),
        TypeExpr::Array { element, .. } => Ok(ObjcType::Array(Box::new(resolve(element)?))),
        TypeExpr::Dictionary { key, value, .. } => Ok(ObjcType::Dictionary(
            Box::new(resolve(key)?),
            Box::new(resolve(value)?),
        )),
        TypeExpr::Tuple { .. } | TypeExpr::Function { .. } => Err(TypeError {
            name: expr.to_string(),
            span: expr.span(),
        }),
    }
}

/// Wrap in `Optional`, collapsing source-level double optionality.
fn optional(ty: ObjcType) -> ObjcType {
    if matches!(ty, ObjcType::Optional(_)) {
        ty
    } else {
        ObjcType::Optional(Box::new(ty))
    }
}
