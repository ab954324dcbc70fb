//! Declaration generators.
//!
//! Each generator validates structural preconditions first, then resolves
//! types, then assembles accessor text. Generators are stateless free
//! functions: every call receives its IR by reference and returns results
//! by value, so independent declarations can be processed in any order.

use tracing::{debug, trace};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Span};
use crate::expr::{self, TypeExpr};
use crate::ir::{Declaration, ModuleDecl};
use crate::mapper;
use crate::selector::{self, SelectorParam};
use crate::types::ObjcType;

const MODULE_ATTR: &str = "ReactModule";
const METHOD_ATTR: &str = "ReactMethod";
const PROPERTY_ATTR: &str = "ReactProperty";
const VIEW_ATTR: &str = "ReactView";

const BASE_OBJECT: &str = "NSObject";
const BRIDGE_MODULE: &str = "RCTBridgeModule";
const VIEW_MANAGER: &str = "RCTViewManager";

/// Bridge base classes that already provide the module accessors; deriving
/// from one satisfies both the base-object and bridge-module requirements
/// and flips the generated accessors to `override`.
const BRIDGE_BASES: &[&str] = &["RCTEventEmitter"];

/// Sentinel key for properties handled by custom setter logic.
const CUSTOM_KEY: &str = "__custom__";

/// One generated member: its name and the accessor text the front end
/// inserts into the host declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedDecl {
    pub name: String,
    pub source: String,
}

/// What a generator hands back: zero or more declarations plus any
/// diagnostics. A blocking error leaves `declarations` empty for that
/// input; warnings ride alongside successful synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub declarations: Vec<SynthesizedDecl>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Expansion {
    fn error(kind: DiagnosticKind, span: Span) -> Self {
        Expansion {
            declarations: Vec::new(),
            diagnostics: vec![Diagnostic::new(kind, span)],
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Synthesize the bridge-module accessors for an annotated class.
pub fn expand_module(decl: &Declaration) -> Expansion {
    let module = match decl {
        Declaration::Module(module) => module,
        _ => return Expansion::error(DiagnosticKind::ClassOnly { attr: MODULE_ATTR }, decl.span()),
    };
    debug!(module = %module.name, "expanding module");

    let overriding = derives_bridge_base(module);
    if !overriding && !has_base(module, BASE_OBJECT) {
        return Expansion::error(
            DiagnosticKind::MustInherit {
                class_name: module.name.clone(),
                superclass: BASE_OBJECT,
            },
            module.span,
        );
    }
    if !overriding && !has_base(module, BRIDGE_MODULE) {
        return Expansion::error(
            DiagnosticKind::MustConform {
                class_name: module.name.clone(),
                protocol: BRIDGE_MODULE,
            },
            module.span,
        );
    }

    let config = &module.config;
    let mut declarations = vec![
        module_name_decl(config.js_name_or(&module.name), overriding),
        main_queue_setup_decl(config.requires_main_queue_setup, overriding),
        register_module_decl(),
    ];
    if let Some(queue) = &config.method_queue {
        declarations.push(method_queue_decl(queue, false));
    }

    Expansion {
        declarations,
        diagnostics: Vec::new(),
    }
}

/// Synthesize the exported selector accessor for an annotated function.
pub fn expand_method(decl: &Declaration) -> Expansion {
    let method = match decl {
        Declaration::Method(method) => method,
        _ => return Expansion::error(DiagnosticKind::FuncOnly { attr: METHOD_ATTR }, decl.span()),
    };
    debug!(method = %method.name, "expanding method");

    if !method.is_objc {
        return Expansion::error(
            DiagnosticKind::MissingObjc {
                name: method.name.clone(),
            },
            method.span,
        );
    }

    // Resolve every parameter before giving up, so one pass surfaces every
    // bad type in source order.
    let mut diagnostics = Vec::new();
    let mut resolved = Vec::with_capacity(method.params.len());
    for param in &method.params {
        match mapper::resolve(&param.ty) {
            Ok(ty) => {
                trace!(param = %param.name, ty = %ty.render(true), "resolved parameter");
                resolved.push(ty);
            }
            Err(err) => diagnostics.push(unsupported(err)),
        }
    }
    if !diagnostics.is_empty() {
        return Expansion {
            declarations: Vec::new(),
            diagnostics,
        };
    }

    let params: Vec<SelectorParam<'_>> = method
        .params
        .iter()
        .zip(&resolved)
        .map(|(param, ty)| SelectorParam {
            label: param.label.as_deref(),
            name: &param.name,
            ty,
        })
        .collect();
    let selector = selector::synthesize(&method.name, &params);

    if let Some(return_type) = &method.return_type {
        if !method.config.is_sync {
            diagnostics.push(Diagnostic::new(DiagnosticKind::NonSync, method.span));
        }
        match mapper::resolve(return_type) {
            Err(err) => {
                diagnostics.push(unsupported(err));
                return Expansion {
                    declarations: Vec::new(),
                    diagnostics,
                };
            }
            Ok(ty) if !ty.is_object() => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ReturnMustBeClass,
                    return_type.span(),
                ));
                return Expansion {
                    declarations: Vec::new(),
                    diagnostics,
                };
            }
            Ok(_) => {}
        }
    }

    let config = &method.config;
    Expansion {
        declarations: vec![method_export_decl(
            &method.name,
            config.js_name_or(&method.name),
            &selector,
            config.is_sync,
        )],
        diagnostics,
    }
}

/// Synthesize the property descriptor for an annotated variable.
pub fn expand_property(decl: &Declaration) -> Expansion {
    let property = match decl {
        Declaration::Property(property) => property,
        _ => return Expansion::error(DiagnosticKind::VarOnly { attr: PROPERTY_ATTR }, decl.span()),
    };

    let binding = match property.bindings.as_slice() {
        [binding] => binding,
        _ => {
            return Expansion::error(
                DiagnosticKind::SingleVarOnly {
                    attr: PROPERTY_ATTR,
                },
                property.span,
            )
        }
    };
    debug!(property = %binding.name, "expanding property");

    let ty = match &binding.ty {
        Some(ty) => ty,
        None => {
            return Expansion::error(
                DiagnosticKind::MissingTypeAnnotation {
                    name: binding.name.clone(),
                },
                binding.span,
            )
        }
    };
    let resolved = match mapper::resolve(ty) {
        Ok(resolved) => resolved,
        Err(err) => {
            return Expansion {
                declarations: Vec::new(),
                diagnostics: vec![unsupported(err)],
            }
        }
    };

    let config = &property.config;
    let key = if config.is_custom {
        CUSTOM_KEY
    } else {
        config.key_path.as_deref().unwrap_or(&binding.name)
    };

    Expansion {
        declarations: vec![prop_config_decl(&binding.name, &resolved, Some(key))],
        diagnostics: Vec::new(),
    }
}

/// Synthesize the view-manager accessors plus one property descriptor per
/// configured `properties` entry.
///
/// Unlike the other generators, the property batch aggregates every failure
/// instead of stopping at the first: each entry resolves independently and
/// good entries still produce descriptors.
pub fn expand_view(decl: &Declaration) -> Expansion {
    let module = match decl {
        Declaration::Module(module) => module,
        _ => return Expansion::error(DiagnosticKind::ClassOnly { attr: VIEW_ATTR }, decl.span()),
    };
    debug!(view = %module.name, "expanding view manager");

    if !has_base(module, VIEW_MANAGER) {
        return Expansion::error(
            DiagnosticKind::MustInherit {
                class_name: module.name.clone(),
                superclass: VIEW_MANAGER,
            },
            module.span,
        );
    }

    let config = &module.config;
    let mut declarations = vec![
        register_module_decl(),
        module_name_decl(config.js_name_or(&module.name), true),
        main_queue_setup_decl(true, true),
        method_queue_decl(".main", true),
    ];

    let mut diagnostics = Vec::new();
    for (name, type_text) in &config.properties {
        // Entries arrive as spanless text in the annotation arguments, so
        // their diagnostics anchor to the declaration itself.
        match resolve_text(type_text) {
            Ok(resolved) => {
                trace!(property = %name, tag = resolved.type_tag(), "resolved view property");
                declarations.push(prop_config_decl(name, &resolved, None));
            }
            Err(type_name) => diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnsupportedType { type_name },
                module.span,
            )),
        }
    }

    Expansion {
        declarations,
        diagnostics,
    }
}

fn has_base(module: &ModuleDecl, name: &str) -> bool {
    module.base_types.iter().any(|base| base == name)
}

fn derives_bridge_base(module: &ModuleDecl) -> bool {
    module
        .base_types
        .iter()
        .any(|base| BRIDGE_BASES.contains(&base.as_str()))
}

fn unsupported(err: mapper::TypeError) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::UnsupportedType {
            type_name: err.name,
        },
        err.span,
    )
}

fn resolve_text(type_text: &str) -> Result<ObjcType, String> {
    let parsed: TypeExpr = match expr::parse(type_text) {
        Ok(parsed) => parsed,
        Err(_) => return Err(type_text.to_string()),
    };
    mapper::resolve(&parsed).map_err(|err| err.name)
}

fn module_name_decl(js_name: &str, overriding: bool) -> SynthesizedDecl {
    let modifier = if overriding { "override " } else { "" };
    SynthesizedDecl {
        name: "moduleName".to_string(),
        source: format!(
            "@objc {modifier}class func moduleName() -> String! {{\n  \"{js_name}\"\n}}"
        ),
    }
}

fn main_queue_setup_decl(value: bool, overriding: bool) -> SynthesizedDecl {
    let modifier = if overriding { "override " } else { "" };
    SynthesizedDecl {
        name: "requiresMainQueueSetup".to_string(),
        source: format!(
            "@objc {modifier}class func requiresMainQueueSetup() -> Bool {{\n  {value}\n}}"
        ),
    }
}

fn register_module_decl() -> SynthesizedDecl {
    SynthesizedDecl {
        name: "_registerModule".to_string(),
        source: "@objc static func _registerModule() {\n  RCTRegisterModule(self);\n}".to_string(),
    }
}

fn method_queue_decl(queue: &str, overriding: bool) -> SynthesizedDecl {
    let modifier = if overriding { "override " } else { "" };
    SynthesizedDecl {
        name: "methodQueue".to_string(),
        source: format!("@objc {modifier}var methodQueue: DispatchQueue {{\n  {queue}\n}}"),
    }
}

fn method_export_decl(
    name: &str,
    js_name: &str,
    selector: &str,
    is_sync: bool,
) -> SynthesizedDecl {
    let export_name = format!("__rct_export__{name}");
    let source = format!(
        r#"@objc static func {export_name}() -> UnsafePointer<RCTMethodInfo>? {{
  struct Static {{
    static let jsName = strdup("{js_name}")
    static let objcName = strdup("{selector}")
    static var methodInfo = RCTMethodInfo(jsName: jsName, objcName: objcName, isSync: {is_sync})
  }}
  return withUnsafePointer(to: &Static.methodInfo) {{ $0 }}
}}"#
    );
    SynthesizedDecl {
        name: export_name,
        source,
    }
}

fn prop_config_decl(name: &str, ty: &ObjcType, key: Option<&str>) -> SynthesizedDecl {
    let tag = ty.type_tag();
    let entries = match key {
        Some(key) => format!("[\"{tag}\", \"{key}\"]"),
        None => format!("[\"{tag}\"]"),
    };
    SynthesizedDecl {
        name: format!("propConfig_{name}"),
        source: format!(
            "@objc static func propConfig_{name}() -> [String] {{\n  {entries}\n}}"
        ),
    }
}
