//! The Objective-C side of the type mapping.
//!
//! [`ObjcType`] is the closed set of shapes the bridge can carry. Rendering
//! is kept separate from resolution so the same resolved type can appear
//! differently at root position (a parameter or return type) and inside a
//! container element.

/// A resolved bridge type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjcType {
    /// Reference type; rendered with a pointer and, at root, a non-null
    /// marker. `id` is the exception and is always rendered bare.
    Object(&'static str),
    /// Numeric scalar; bare at root, boxed as `NSNumber *` inside containers.
    Numeric(&'static str),
    /// Value type passed by value; never boxed.
    Struct(&'static str),
    /// Callback type name passed through unchanged.
    Block(&'static str),
    /// Homogeneous array; the only container whose element type the bridge
    /// keeps in the rendering.
    Array(Box<ObjcType>),
    /// Key/value map. Both sides are validated during resolution, but the
    /// bridge accepts no type parameters on `NSDictionary`.
    Dictionary(Box<ObjcType>, Box<ObjcType>),
    /// Unordered set; same limitation as `Dictionary`, always untyped.
    Set(Box<ObjcType>),
    /// Nullable wrapper. Resolution guarantees it never wraps another
    /// `Optional`.
    Optional(Box<ObjcType>),
}

const NONNULL: &str = " _Nonnull";
const NULLABLE: &str = " _Nullable";

impl ObjcType {
    /// Render for a given position. Root position is a parameter or return
    /// type; everything nested inside a container is non-root.
    pub fn render(&self, is_root: bool) -> String {
        let nonnull = if is_root { NONNULL } else { "" };
        match self {
            ObjcType::Object("id") => "id".to_string(),
            ObjcType::Object(name) => format!("{name} *{nonnull}"),
            ObjcType::Numeric(name) => {
                if is_root {
                    (*name).to_string()
                } else {
                    "NSNumber *".to_string()
                }
            }
            ObjcType::Struct(name) | ObjcType::Block(name) => (*name).to_string(),
            ObjcType::Array(element) => {
                format!("NSArray<{}> *{nonnull}", element.render(false))
            }
            ObjcType::Dictionary(_, _) => format!("NSDictionary *{nonnull}"),
            ObjcType::Set(_) => format!("NSSet *{nonnull}"),
            ObjcType::Optional(inner) => {
                let rendered = inner.render(true);
                let bare = rendered.strip_suffix(NONNULL).unwrap_or(&rendered);
                format!("{bare}{NULLABLE}")
            }
        }
    }

    /// Rendering used inside a selector's `(type)` annotation: root
    /// rendering with the trailing non-null marker dropped. Nullability is
    /// meaningful to the bridge and stays.
    pub fn render_param(&self) -> String {
        let rendered = self.render(true);
        match rendered.strip_suffix(NONNULL) {
            Some(bare) => bare.to_string(),
            None => rendered,
        }
    }

    /// The bare target type name, as property descriptors report it: no
    /// pointer, no markers, containers untyped, optionality ignored.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ObjcType::Object(name)
            | ObjcType::Numeric(name)
            | ObjcType::Struct(name)
            | ObjcType::Block(name) => name,
            ObjcType::Array(_) => "NSArray",
            ObjcType::Dictionary(_, _) => "NSDictionary",
            ObjcType::Set(_) => "NSSet",
            ObjcType::Optional(inner) => inner.type_tag(),
        }
    }

    /// Whether a value of this type is an object reference once optionality
    /// is unwrapped. The method return gate accepts exactly these.
    pub fn is_object(&self) -> bool {
        match self {
            ObjcType::Object(_) => true,
            ObjcType::Optional(inner) => inner.is_object(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array(element: ObjcType) -> ObjcType {
        ObjcType::Array(Box::new(element))
    }

    fn optional(inner: ObjcType) -> ObjcType {
        ObjcType::Optional(Box::new(inner))
    }

    #[test]
    fn object_root_vs_element() {
        let ty = ObjcType::Object("NSString");
        assert_eq!(ty.render(true), "NSString * _Nonnull");
        assert_eq!(ty.render(false), "NSString *");
    }

    #[test]
    fn id_is_never_starred() {
        let ty = ObjcType::Object("id");
        assert_eq!(ty.render(true), "id");
        assert_eq!(ty.render(false), "id");
        assert_eq!(optional(ty).render(true), "id _Nullable");
    }

    #[test]
    fn numeric_boxing() {
        let ty = ObjcType::Numeric("NSInteger");
        assert_eq!(ty.render(true), "NSInteger");
        assert_eq!(ty.render(false), "NSNumber *");
        assert_eq!(array(ty).render(true), "NSArray<NSNumber *> * _Nonnull");
    }

    #[test]
    fn struct_and_block_unmarked() {
        assert_eq!(ObjcType::Struct("CGPoint").render(true), "CGPoint");
        assert_eq!(
            ObjcType::Block("RCTPromiseResolveBlock").render(true),
            "RCTPromiseResolveBlock"
        );
        assert_eq!(ObjcType::Struct("CGRect").render(false), "CGRect");
    }

    #[test]
    fn containers() {
        let strings = array(ObjcType::Object("NSString"));
        assert_eq!(strings.render(true), "NSArray<NSString *> * _Nonnull");
        assert_eq!(strings.render(false), "NSArray<NSString *> *");

        let dict = ObjcType::Dictionary(
            Box::new(ObjcType::Object("NSString")),
            Box::new(ObjcType::Numeric("NSInteger")),
        );
        assert_eq!(dict.render(true), "NSDictionary * _Nonnull");

        let set = ObjcType::Set(Box::new(ObjcType::Numeric("NSInteger")));
        assert_eq!(set.render(true), "NSSet * _Nonnull");
    }

    #[test]
    fn optional_replaces_nonnull() {
        assert_eq!(
            optional(ObjcType::Object("NSString")).render(true),
            "NSString * _Nullable"
        );
        assert_eq!(
            optional(ObjcType::Numeric("NSInteger")).render(true),
            "NSInteger _Nullable"
        );
        assert_eq!(
            optional(array(ObjcType::Numeric("NSInteger"))).render(true),
            "NSArray<NSNumber *> * _Nullable"
        );
        assert_eq!(
            optional(ObjcType::Struct("CGPoint")).render(true),
            "CGPoint _Nullable"
        );
    }

    #[test]
    fn param_rendering_strips_nonnull_only() {
        assert_eq!(ObjcType::Object("NSString").render_param(), "NSString *");
        assert_eq!(
            optional(ObjcType::Object("NSString")).render_param(),
            "NSString * _Nullable"
        );
        assert_eq!(ObjcType::Numeric("NSInteger").render_param(), "NSInteger");
        assert_eq!(
            array(ObjcType::Numeric("NSInteger")).render_param(),
            "NSArray<NSNumber *> *"
        );
    }

    #[test]
    fn type_tags() {
        assert_eq!(ObjcType::Numeric("BOOL").type_tag(), "BOOL");
        assert_eq!(array(ObjcType::Object("NSString")).type_tag(), "NSArray");
        assert_eq!(
            ObjcType::Dictionary(
                Box::new(ObjcType::Object("NSString")),
                Box::new(ObjcType::Numeric("NSInteger")),
            )
            .type_tag(),
            "NSDictionary"
        );
        assert_eq!(optional(ObjcType::Numeric("double")).type_tag(), "double");
    }

    #[test]
    fn return_gate() {
        assert!(ObjcType::Object("NSString").is_object());
        assert!(optional(ObjcType::Object("NSString")).is_object());
        assert!(!ObjcType::Numeric("NSInteger").is_object());
        assert!(!ObjcType::Struct("CGPoint").is_object());
        assert!(!array(ObjcType::Object("NSString")).is_object());
    }
}
