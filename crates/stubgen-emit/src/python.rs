//! Python `.pyi` declaration writer.
//!
//! Renders schema entities as declaration-only stub text: typed method
//! stubs from recovered signatures, `@property` accessors, enumeration
//! classes, and module aggregators with re-exports. No executable bodies.

use std::collections::BTreeSet;

use stubgen_schema::{Class, Function, Module, Property};

use crate::resolver::ClassIndex;

/// Emits schema entities as `.pyi` source text.
pub struct PyiWriter {
    output: String,
    indent: usize,
}

impl PyiWriter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Render one declaration unit for a class.
    pub fn class_unit(class: &Class, index: &ClassIndex) -> String {
        let mut writer = Self::new();
        writer.write_class_imports(class, index);
        writer.write_class(class);
        writer.finish()
    }

    /// Render the aggregating unit for a module: re-exports for directly
    /// contained classes plus stubs for directly contained functions.
    /// Nested modules get their own units and are not rendered inline.
    pub fn module_unit(module: &Module) -> String {
        let mut writer = Self::new();
        if let Some(doc) = module.doc.as_deref().filter(|d| !d.is_empty()) {
            writer.line(&format!("'''{}'''", doc));
            writer.blank();
        }

        let mut any_exports = false;
        for class in module.classes() {
            writer.line(&format!("from .{} import {}", class.name, class.name));
            any_exports = true;
        }
        if any_exports {
            writer.blank();
        }

        for function in module.functions() {
            writer.write_function(function);
        }
        writer.finish()
    }

    /// Import statements for every referenced type name the resolver knows.
    ///
    /// Names are collected from method argument types, return types and the
    /// superclass list; anything absent from the index (host built-ins, the
    /// `Any` marker, classes the walk never reached) stays unqualified and
    /// never fabricates an import.
    fn write_class_imports(&mut self, class: &Class, index: &ClassIndex) {
        let mut lines: Vec<String> = Vec::new();

        if class.is_enum() {
            lines.push("import enum".to_string());
        } else {
            let mut referenced: BTreeSet<&str> = BTreeSet::new();
            for method in &class.methods {
                if let Some(sig) = method.scraped_signature.recovered() {
                    for argument in &sig.arguments {
                        referenced.insert(&argument.ty);
                    }
                    referenced.insert(&sig.return_type);
                }
            }
            for superclass in &class.superclasses {
                referenced.insert(superclass);
            }

            if referenced.contains("Any") {
                lines.push("from typing import Any".to_string());
            }
            for name in referenced {
                // The unit defines its own class; importing it from itself
                // would be circular.
                if name == class.name {
                    continue;
                }
                if let Some(path) = index.get(name) {
                    lines.push(format!("from {}.{} import {}", path.join("."), name, name));
                }
            }
        }

        if !lines.is_empty() {
            for line in lines {
                self.line(&line);
            }
            self.blank();
        }
    }

    fn write_class(&mut self, class: &Class) {
        if class.is_enum() {
            self.write_enum_class(class);
            return;
        }

        if class.superclasses.is_empty() {
            self.line(&format!("class {}:", class.name));
        } else {
            self.line(&format!("class {}({}):", class.name, class.superclasses.join(", ")));
        }

        self.indent += 1;
        let mut body_written = false;

        if let Some(doc) = class.doc.as_deref().filter(|d| !d.is_empty()) {
            self.line(&format!("'''{}'''", doc));
            self.blank();
            body_written = true;
        }

        if !class.fields.is_empty() {
            for field in &class.fields {
                self.line(&format!("{}: {}", field.name, field.ty));
            }
            self.blank();
            body_written = true;
        }

        for property in &class.properties {
            self.write_property(property);
            body_written = true;
        }

        for method in &class.methods {
            // Methods without a recovered signature are omitted entirely
            // rather than rendered with guessed types.
            if method.scraped_signature.recovered().is_some() {
                self.write_function(method);
                body_written = true;
            }
        }

        if !body_written {
            self.line("...");
        }
        self.indent -= 1;
    }

    fn write_enum_class(&mut self, class: &Class) {
        self.line(&format!("class {}(enum.Enum):", class.name));
        self.indent += 1;
        if let Some(doc) = class.doc.as_deref().filter(|d| !d.is_empty()) {
            self.line(&format!("'''{}'''", doc));
            self.blank();
        }
        if let Some(members) = &class.enum_members {
            // Pre-sorted by the walker; rendered in that order.
            for member in members {
                self.line(&format!("{} = {}", member.name, member.value));
            }
        }
        self.indent -= 1;
    }

    fn write_property(&mut self, property: &Property) {
        let doc = property.doc.clone();

        self.line("@property");
        self.line(&format!("def {}(self):", property.name));
        self.accessor_body(doc.as_deref());

        if property.has_setter {
            self.line(&format!("@{}.setter", property.name));
            self.line(&format!("def {}(self, value):", property.name));
            self.accessor_body(doc.as_deref());
        }

        if property.has_deleter {
            self.line(&format!("@{}.deleter", property.name));
            self.line(&format!("def {}(self):", property.name));
            self.accessor_body(doc.as_deref());
        }
    }

    fn accessor_body(&mut self, doc: Option<&str>) {
        self.indent += 1;
        if let Some(doc) = doc.filter(|d| !d.is_empty()) {
            self.line(&format!("'''{}'''", doc));
        }
        self.line("...");
        self.indent -= 1;
        self.blank();
    }

    /// A documented stub declaration; the receiver argument comes verbatim
    /// from the recovered signature. Unrecovered functions render nothing.
    fn write_function(&mut self, function: &Function) {
        let Some(sig) = function.scraped_signature.recovered() else {
            return;
        };
        let arguments: Vec<String> = sig.arguments.iter().map(ToString::to_string).collect();
        self.line(&format!(
            "def {}({}) -> {}:",
            function.name,
            arguments.join(", "),
            sig.return_type
        ));
        self.indent += 1;
        if let Some(doc) = function.doc.as_deref().filter(|d| !d.is_empty()) {
            self.line(&format!("'''{}'''", doc));
        }
        self.line("...");
        self.indent -= 1;
        self.blank();
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Normalize trailing blank lines to a single newline.
    fn finish(mut self) -> String {
        while self.output.ends_with("\n\n") {
            self.output.pop();
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use stubgen_schema::{
        Argument, EnumMember, Field, FunctionSignature, ScrapedSignature, NO_SIGNATURE,
    };

    use super::*;

    fn method(name: &str, arguments: Vec<Argument>, return_type: &str) -> Function {
        Function {
            name: name.into(),
            doc: Some(format!("{} docs.", name)),
            signature: NO_SIGNATURE.into(),
            scraped_signature: ScrapedSignature::Recovered(FunctionSignature {
                name: name.into(),
                arguments,
                return_type: return_type.into(),
            }),
        }
    }

    fn unavailable(name: &str) -> Function {
        Function {
            name: name.into(),
            doc: None,
            signature: NO_SIGNATURE.into(),
            scraped_signature: ScrapedSignature::Unavailable,
        }
    }

    fn song() -> Class {
        Class {
            name: "Song".into(),
            doc: Some("A song.".into()),
            methods: vec![
                method(
                    "add_track",
                    vec![
                        Argument::new("self", "Song"),
                        Argument::new("index", "int").with_default("-1"),
                    ],
                    "Track",
                ),
                unavailable("mystery"),
            ],
            properties: vec![Property {
                name: "tempo".into(),
                doc: Some("Tempo in BPM.".into()),
                has_setter: true,
                has_deleter: false,
            }],
            fields: vec![Field {
                name: "View".into(),
                ty: "type".into(),
            }],
            superclasses: vec!["object".into()],
            enum_members: None,
        }
    }

    fn index_with(entries: &[(&str, &[&str])]) -> ClassIndex {
        entries
            .iter()
            .map(|(name, path)| {
                (
                    name.to_string(),
                    path.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn class_unit_renders_full_surface() {
        let index = index_with(&[("Song", &["Live"]), ("Track", &["Live"])]);
        let out = PyiWriter::class_unit(&song(), &index);

        assert!(out.contains("class Song(object):"));
        assert!(out.contains("'''A song.'''"));
        assert!(out.contains("View: type"));
        assert!(out.contains("def add_track(self: Song, index: int=-1) -> Track:"));
        assert!(out.contains("'''add_track docs.'''"));
    }

    #[test]
    fn imports_only_indexed_names() {
        let index = index_with(&[("Song", &["Live"]), ("Track", &["Live"])]);
        let out = PyiWriter::class_unit(&song(), &index);

        // Track is indexed; int and object are not; Song is this unit.
        assert!(out.contains("from Live.Track import Track"));
        assert!(!out.contains("import int"));
        assert!(!out.contains("import object"));
        assert!(!out.contains("from Live.Song import Song"));
    }

    #[test]
    fn any_marker_imports_from_typing() {
        let class = Class {
            methods: vec![method(
                "notify",
                vec![Argument::new("self", "Song"), Argument::new("payload", "Any")],
                "None",
            )],
            ..song()
        };
        let out = PyiWriter::class_unit(&class, &ClassIndex::new());
        assert!(out.contains("from typing import Any"));
        assert!(out.contains("payload: Any"));
    }

    #[test]
    fn unavailable_methods_are_omitted() {
        let out = PyiWriter::class_unit(&song(), &ClassIndex::new());
        assert!(!out.contains("mystery"));
    }

    #[test]
    fn property_accessors_follow_flags() {
        let out = PyiWriter::class_unit(&song(), &ClassIndex::new());
        assert!(out.contains("@property\n    def tempo(self):"));
        assert!(out.contains("@tempo.setter\n    def tempo(self, value):"));
        assert!(!out.contains("@tempo.deleter"));
        // Setter forwards the same documentation.
        assert_eq!(out.matches("'''Tempo in BPM.'''").count(), 2);
    }

    #[test]
    fn enum_class_renders_pairs_in_schema_order() {
        let class = Class {
            name: "VuType".into(),
            doc: None,
            methods: vec![],
            properties: vec![],
            fields: vec![],
            superclasses: vec!["enum".into()],
            enum_members: Some(vec![
                EnumMember {
                    name: "B".into(),
                    value: 0,
                },
                EnumMember {
                    name: "A".into(),
                    value: 1,
                },
            ]),
        };
        let out = PyiWriter::class_unit(&class, &ClassIndex::new());

        assert!(out.starts_with("import enum\n"));
        assert!(out.contains("class VuType(enum.Enum):"));
        // No superclass list, member order as supplied.
        assert!(!out.contains("(enum):"));
        let b = out.find("B = 0").unwrap();
        let a = out.find("A = 1").unwrap();
        assert!(b < a);
    }

    #[test]
    fn empty_class_body_is_ellipsis() {
        let class = Class {
            name: "Marker".into(),
            doc: None,
            methods: vec![],
            properties: vec![],
            fields: vec![],
            superclasses: vec![],
            enum_members: None,
        };
        let out = PyiWriter::class_unit(&class, &ClassIndex::new());
        assert_eq!(out, "class Marker:\n    ...\n");
    }

    #[test]
    fn module_unit_reexports_and_function_stubs() {
        let module = Module {
            name: "Live".into(),
            doc: Some("Root.".into()),
            members: vec![
                stubgen_schema::Member::Class(song()),
                stubgen_schema::Member::Function(method(
                    "get_application",
                    vec![Argument::new("version", "int")],
                    "Application",
                )),
                stubgen_schema::Member::Function(unavailable("opaque")),
                stubgen_schema::Member::Value {
                    name: "version".into(),
                    repr: "11.0".into(),
                },
            ],
        };
        let out = PyiWriter::module_unit(&module);

        assert!(out.starts_with("'''Root.'''\n"));
        assert!(out.contains("from .Song import Song"));
        assert!(out.contains("def get_application(version: int) -> Application:"));
        // Unrecovered functions and opaque values are not rendered.
        assert!(!out.contains("opaque"));
        assert!(!out.contains("11.0"));
    }
}
