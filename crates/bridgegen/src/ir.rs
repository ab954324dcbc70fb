//! The normalized declaration IR the front end hands to the generators.
//!
//! The front end owns attribute scanning and host-grammar parsing; by the
//! time a declaration arrives here it is plain data. Capability checks that
//! would be inheritance traversals in the host language are set-membership
//! tests over `base_types`, computed once by the front end.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::diagnostics::Span;
use crate::expr::TypeExpr;

/// An annotated declaration, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Module(ModuleDecl),
    Method(MethodDecl),
    Property(PropertyDecl),
}

impl Declaration {
    pub fn span(&self) -> Span {
        match self {
            Declaration::Module(decl) => decl.span,
            Declaration::Method(decl) => decl.span,
            Declaration::Property(decl) => decl.span,
        }
    }

    pub fn config(&self) -> &Config {
        match self {
            Declaration::Module(decl) => &decl.config,
            Declaration::Method(decl) => &decl.config,
            Declaration::Property(decl) => &decl.config,
        }
    }
}

/// An annotated class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDecl {
    pub name: String,
    /// Base classes and conformances as the front end resolved them.
    pub base_types: Vec<String>,
    pub config: Config,
    pub span: Span,
}

/// An annotated function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeExpr>,
    /// Whether the host marks the function as dynamically dispatchable.
    pub is_objc: bool,
    pub config: Config,
    pub span: Span,
}

/// One function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// External label; `None` when the source uses the wildcard.
    pub label: Option<String>,
    /// Internal name; `_` when the source discards it.
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

/// An annotated variable declaration. A single declaration may carry several
/// bindings in the host language; the property generator requires exactly
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub bindings: Vec<PropertyBinding>,
    pub config: Config,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBinding {
    pub name: String,
    /// Explicit type annotation, if the source has one.
    pub ty: Option<TypeExpr>,
    pub span: Span,
}

/// Annotation arguments. One shared mapping for every declaration kind;
/// a given generator reads only the keys that concern it. Unknown keys are
/// ignored during deserialization and absent keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Name exported to JavaScript; the declared name when absent.
    pub js_name: Option<String>,
    /// Whether the method is invoked synchronously.
    pub is_sync: bool,
    /// Forces the property descriptor onto the custom-key path.
    pub is_custom: bool,
    /// Explicit key the property is stored under.
    pub key_path: Option<String>,
    pub requires_main_queue_setup: bool,
    /// Dispatch queue expression for the module's methods.
    pub method_queue: Option<String>,
    /// View property batch: name to type-expression text, in source order.
    pub properties: IndexMap<String, String>,
}

impl Config {
    /// The exported name, falling back to the declared one.
    pub fn js_name_or<'a>(&'a self, declared: &'a str) -> &'a str {
        self.js_name.as_deref().unwrap_or(declared)
    }
}
