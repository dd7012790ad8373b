//! Recursive walk of a live object graph into a schema tree.

use std::collections::HashSet;

use stubgen_schema::{Class, EnumMember, Field, Function, Member, Module, Property, NO_SIGNATURE};
use tracing::{debug, error};

use crate::capability::{ObjectKind, ReflectError, ReflectionCapability};

/// A failure while walking a specific node. Aborts the whole walk: callers
/// may retry a fresh walk but must not resume a partial one.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("reflection failure on {kind} `{name}`: {source}")]
    Member {
        kind: &'static str,
        name: String,
        #[source]
        source: ReflectError,
    },

    #[error("enum class `{name}` has {names} names but {values} values")]
    EnumShape {
        name: String,
        names: usize,
        values: usize,
    },
}

/// Walks a live object graph through a [`ReflectionCapability`] and builds
/// the schema tree bottom-up in one pass.
pub struct Walker<'a, R: ReflectionCapability> {
    reflect: &'a R,
}

impl<'a, R: ReflectionCapability> Walker<'a, R> {
    pub fn new(reflect: &'a R) -> Self {
        Self { reflect }
    }

    /// Walk a module-like object and everything beneath it.
    pub fn walk_module(&self, obj: &R::Object) -> Result<Module, WalkError> {
        let name = self.reflect.name(obj);
        debug!(module = %name, "walking module");

        let listed = self
            .reflect
            .members(obj)
            .map_err(|source| self.abort("module", &name, source))?;

        let mut members = Vec::new();
        for (member_name, member) in listed {
            // Host-internal double-underscore members are not part of the
            // public surface.
            if member_name.starts_with("__") {
                continue;
            }
            let walked = match self.reflect.kind(&member) {
                ObjectKind::Module => Member::Module(self.walk_module(&member)?),
                ObjectKind::Class => Member::Class(self.walk_class(&member)?),
                ObjectKind::Routine => Member::Function(self.walk_function(&member)?),
                ObjectKind::Property | ObjectKind::Value => Member::Value {
                    name: member_name,
                    repr: self.reflect.repr(&member),
                },
            };
            members.push(walked);
        }

        Ok(Module {
            name,
            doc: self.reflect.documentation(obj),
            members,
        })
    }

    /// Walk a class-like object: methods, properties, plain fields and
    /// enumeration members.
    pub fn walk_class(&self, obj: &R::Object) -> Result<Class, WalkError> {
        let name = self.reflect.name(obj);
        debug!(class = %name, "walking class");

        let bases = self.reflect.bases(obj);
        let superclasses: Vec<String> = bases
            .iter()
            .map(|base| self.reflect.name(base))
            .filter(|base_name| base_name != "instance")
            .collect();

        let enum_members = if superclasses.iter().any(|s| s == "enum") {
            Some(self.read_enum_members(&name, obj)?)
        } else {
            None
        };

        // Declare only what this class adds or overrides: anything already
        // present on a direct superclass is skipped wholesale.
        let mut super_attrs: HashSet<String> = HashSet::new();
        for base in &bases {
            super_attrs.extend(self.reflect.own_attribute_names(base));
        }

        let listed = self
            .reflect
            .members(obj)
            .map_err(|source| self.abort("class", &name, source))?;

        let mut methods = Vec::new();
        let mut properties = Vec::new();
        let mut fields = Vec::new();
        for (member_name, member) in listed {
            if super_attrs.contains(&member_name) {
                continue;
            }
            match self.reflect.kind(&member) {
                ObjectKind::Routine if !member_name.starts_with("__") => {
                    methods.push(self.walk_function(&member)?);
                }
                ObjectKind::Property if !member_name.starts_with("__") => {
                    let flags = self.reflect.descriptor_flags(&member);
                    properties.push(Property {
                        name: member_name,
                        doc: self.reflect.documentation(&member),
                        has_setter: flags.has_setter,
                        has_deleter: flags.has_deleter,
                    });
                }
                _ => {
                    // Language-internal dunder members that are not
                    // overridden stay out of the schema.
                    if !(member_name.starts_with("__") && member_name.ends_with("__")) {
                        let ty = self.reflect.type_name(&member);
                        let ty = if ty == "class" { "type".to_string() } else { ty };
                        fields.push(Field {
                            name: member_name,
                            ty,
                        });
                    }
                }
            }
        }

        Ok(Class {
            name,
            doc: self.reflect.documentation(obj),
            methods,
            properties,
            fields,
            superclasses,
            enum_members,
        })
    }

    /// Walk a function-like object. Both signature recoveries are stored
    /// regardless of whether either succeeds.
    pub fn walk_function(&self, obj: &R::Object) -> Result<Function, WalkError> {
        let name = self.reflect.name(obj);
        debug!(function = %name, "walking function");

        let doc = self.reflect.documentation(obj);
        let scraped_signature = stubgen_doc_parser::scrape(&name, doc.as_deref().unwrap_or(""));
        let signature = self
            .reflect
            .live_signature(obj)
            .unwrap_or_else(|| NO_SIGNATURE.to_string());

        Ok(Function {
            name,
            doc,
            signature,
            scraped_signature,
        })
    }

    /// Zip the parallel name/value collections, ascending by value.
    /// Duplicate values are legitimate aliases and are preserved.
    fn read_enum_members(&self, name: &str, obj: &R::Object) -> Result<Vec<EnumMember>, WalkError> {
        let names = self
            .reflect
            .enum_names(obj)
            .map_err(|source| self.abort("class", name, source))?;
        let values = self
            .reflect
            .enum_values(obj)
            .map_err(|source| self.abort("class", name, source))?;
        if names.len() != values.len() {
            let err = WalkError::EnumShape {
                name: name.to_string(),
                names: names.len(),
                values: values.len(),
            };
            error!(class = name, error = %err, "walk aborted");
            return Err(err);
        }

        let mut members: Vec<EnumMember> = names
            .into_iter()
            .zip(values)
            .map(|(name, value)| EnumMember { name, value })
            .collect();
        // Stable: aliases with equal values keep their declaration order.
        members.sort_by_key(|member| member.value);
        Ok(members)
    }

    fn abort(&self, kind: &'static str, name: &str, source: ReflectError) -> WalkError {
        error!(kind, name, error = %source, "walk aborted");
        WalkError::Member {
            kind,
            name: name.to_string(),
            source,
        }
    }
}
