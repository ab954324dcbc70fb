//! # bridgegen
//!
//! Objective-C bridge declaration generator for annotated React Native
//! modules. Given a normalized declaration (module class, method, or
//! property) plus its annotation arguments, the generators synthesize the
//! accessor declarations the bridge runtime discovers at load time —
//! selector exports, property descriptors, and module registration — and
//! report diagnostics for anything the bridge cannot carry.
//!
//! The surrounding tool owns host-language parsing, attribute scanning, and
//! file I/O; this crate is a pure transformation from [`ir::Declaration`]
//! to [`generator::Expansion`].
//!
//! ## Usage
//!
//! ```
//! use bridgegen::expr;
//! use bridgegen::generator::expand_method;
//! use bridgegen::ir::{Config, Declaration, MethodDecl, Param};
//! use bridgegen::Span;
//!
//! let decl = Declaration::Method(MethodDecl {
//!     name: "test".into(),
//!     params: vec![Param {
//!         label: Some("count".into()),
//!         name: "count".into(),
//!         ty: expr::parse("Int").unwrap(),
//!         span: Span::default(),
//!     }],
//!     return_type: None,
//!     is_objc: true,
//!     config: Config::default(),
//!     span: Span::default(),
//! });
//!
//! let expansion = expand_method(&decl);
//! assert!(expansion.diagnostics.is_empty());
//! assert!(expansion.declarations[0]
//!     .source
//!     .contains("testWithCount:(NSInteger)count"));
//! ```
//!
//! Selector strings are an exact external contract: the runtime dispatches
//! by string equality, so [`selector::synthesize`] reproduces the naming
//! convention byte for byte.

pub mod diagnostics;
pub mod expr;
pub mod generator;
pub mod ir;
pub mod mapper;
pub mod selector;
pub mod types;

pub use diagnostics::{Diagnostic, DiagnosticKind, Severity, Span};
pub use expr::TypeExpr;
pub use generator::{
    expand_method, expand_module, expand_property, expand_view, Expansion, SynthesizedDecl,
};
pub use ir::{Config, Declaration};
pub use types::ObjcType;
