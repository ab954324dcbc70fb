//! Walks a handful of hand-built declarations through every generator and
//! prints the synthesized accessors plus diagnostics, the way a front end
//! would consume the crate. Run with `RUST_LOG=bridgegen=trace` to watch
//! resolution decisions.

use bridgegen::expr;
use bridgegen::generator::{expand_method, expand_module, expand_property, expand_view, Expansion};
use bridgegen::ir::{Config, Declaration, MethodDecl, ModuleDecl, Param, PropertyBinding, PropertyDecl};
use bridgegen::Span;

fn config(json: &str) -> Config {
    serde_json::from_str(json).expect("valid config")
}

fn param(label: Option<&str>, name: &str, ty: &str) -> Param {
    Param {
        label: label.map(str::to_string),
        name: name.to_string(),
        ty: expr::parse(ty).expect("valid type expression"),
        span: Span::default(),
    }
}

fn report(title: &str, expansion: &Expansion) {
    println!("== {title} ==");
    for diagnostic in &expansion.diagnostics {
        println!("{diagnostic}");
    }
    for decl in &expansion.declarations {
        println!("{}\n", decl.source);
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let module = Declaration::Module(ModuleDecl {
        name: "Calendar".into(),
        base_types: vec!["NSObject".into(), "RCTBridgeModule".into()],
        config: config(r#"{"jsName": "CalendarModule", "requiresMainQueueSetup": true}"#),
        span: Span::default(),
    });
    report("module", &expand_module(&module));

    let add_event = Declaration::Method(MethodDecl {
        name: "addEvent".into(),
        params: vec![
            param(Some("title"), "title", "String"),
            param(Some("location"), "location", "String?"),
            param(Some("date"), "date", "Date"),
        ],
        return_type: None,
        is_objc: true,
        config: Config::default(),
        span: Span::default(),
    });
    report("method", &expand_method(&add_event));

    let event_count = Declaration::Method(MethodDecl {
        name: "eventCount".into(),
        params: vec![],
        return_type: Some(expr::parse("String").expect("valid type expression")),
        is_objc: true,
        config: Config::default(),
        span: Span::default(),
    });
    report("method with non-sync return", &expand_method(&event_count));

    let bad_method = Declaration::Method(MethodDecl {
        name: "draw".into(),
        params: vec![param(Some("color"), "color", "CGColor")],
        return_type: None,
        is_objc: true,
        config: Config::default(),
        span: Span::default(),
    });
    report("method with unsupported parameter", &expand_method(&bad_method));

    let zoom = Declaration::Property(PropertyDecl {
        bindings: vec![PropertyBinding {
            name: "zoomEnabled".into(),
            ty: Some(expr::parse("Bool?").expect("valid type expression")),
            span: Span::default(),
        }],
        config: Config::default(),
        span: Span::default(),
    });
    report("property", &expand_property(&zoom));

    let map_view = Declaration::Module(ModuleDecl {
        name: "MapView".into(),
        base_types: vec!["RCTViewManager".into()],
        config: config(
            r#"{"properties": {
                "region": "[String : Double]",
                "showsUserLocation": "Bool",
                "onPress": "RCTBubblingEventBlock"
            }}"#,
        ),
        span: Span::default(),
    });
    report("view manager", &expand_view(&map_view));
}
