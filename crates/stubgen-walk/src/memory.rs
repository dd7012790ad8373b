//! In-memory object graphs implementing the reflection capability.
//!
//! The reference binding: hosts (and tests) assemble a graph of
//! [`MemoryObject`] nodes with [`ObjectBuilder`], then walk it through
//! [`MemoryGraph`]. Host-process bindings implement
//! [`ReflectionCapability`] directly instead.

use std::rc::Rc;

use crate::capability::{DescriptorFlags, ObjectKind, ReflectError, ReflectionCapability};

/// One node of an in-memory object graph.
#[derive(Debug)]
pub struct MemoryObject {
    kind: ObjectKind,
    name: String,
    doc: Option<String>,
    repr: String,
    type_name: String,
    live_signature: Option<String>,
    members: Vec<(String, Rc<MemoryObject>)>,
    bases: Vec<Rc<MemoryObject>>,
    enum_names: Vec<String>,
    enum_values: Vec<i64>,
    descriptor: DescriptorFlags,
    /// When set, member enumeration fails with this message. Lets tests
    /// exercise the abort path of the walker.
    fail_members: Option<String>,
}

/// Builder for [`MemoryObject`] nodes. Nodes are immutable once built.
pub struct ObjectBuilder {
    object: MemoryObject,
}

impl ObjectBuilder {
    fn new(kind: ObjectKind, name: &str) -> Self {
        Self {
            object: MemoryObject {
                kind,
                name: name.to_string(),
                doc: None,
                repr: String::new(),
                type_name: String::new(),
                live_signature: None,
                members: Vec::new(),
                bases: Vec::new(),
                enum_names: Vec::new(),
                enum_values: Vec::new(),
                descriptor: DescriptorFlags::default(),
                fail_members: None,
            },
        }
    }

    pub fn module(name: &str) -> Self {
        Self::new(ObjectKind::Module, name)
    }

    pub fn class(name: &str) -> Self {
        Self::new(ObjectKind::Class, name)
    }

    pub fn routine(name: &str) -> Self {
        Self::new(ObjectKind::Routine, name)
    }

    pub fn property(name: &str) -> Self {
        Self::new(ObjectKind::Property, name)
    }

    pub fn value(name: &str, repr: &str, type_name: &str) -> Self {
        let mut builder = Self::new(ObjectKind::Value, name);
        builder.object.repr = repr.to_string();
        builder.object.type_name = type_name.to_string();
        builder
    }

    pub fn doc(mut self, doc: &str) -> Self {
        self.object.doc = Some(doc.to_string());
        self
    }

    pub fn live_signature(mut self, signature: &str) -> Self {
        self.object.live_signature = Some(signature.to_string());
        self
    }

    /// Add a named member; enumeration order is insertion order.
    pub fn member(mut self, name: &str, member: Rc<MemoryObject>) -> Self {
        self.object.members.push((name.to_string(), member));
        self
    }

    pub fn base(mut self, base: Rc<MemoryObject>) -> Self {
        self.object.bases.push(base);
        self
    }

    pub fn enum_pairs(mut self, names: &[&str], values: &[i64]) -> Self {
        self.object.enum_names = names.iter().map(|n| n.to_string()).collect();
        self.object.enum_values = values.to_vec();
        self
    }

    pub fn descriptor_flags(mut self, has_setter: bool, has_deleter: bool) -> Self {
        self.object.descriptor = DescriptorFlags {
            has_setter,
            has_deleter,
        };
        self
    }

    pub fn fail_members(mut self, message: &str) -> Self {
        self.object.fail_members = Some(message.to_string());
        self
    }

    pub fn build(self) -> Rc<MemoryObject> {
        Rc::new(self.object)
    }
}

/// Reflection capability over [`MemoryObject`] graphs.
pub struct MemoryGraph;

impl ReflectionCapability for MemoryGraph {
    type Object = Rc<MemoryObject>;

    fn kind(&self, obj: &Self::Object) -> ObjectKind {
        obj.kind
    }

    fn name(&self, obj: &Self::Object) -> String {
        obj.name.clone()
    }

    fn documentation(&self, obj: &Self::Object) -> Option<String> {
        obj.doc.clone()
    }

    fn members(&self, obj: &Self::Object) -> Result<Vec<(String, Self::Object)>, ReflectError> {
        if let Some(message) = &obj.fail_members {
            return Err(ReflectError::new(message.clone()));
        }
        Ok(obj.members.clone())
    }

    fn repr(&self, obj: &Self::Object) -> String {
        obj.repr.clone()
    }

    fn type_name(&self, obj: &Self::Object) -> String {
        obj.type_name.clone()
    }

    fn live_signature(&self, obj: &Self::Object) -> Option<String> {
        obj.live_signature.clone()
    }

    fn bases(&self, obj: &Self::Object) -> Vec<Self::Object> {
        obj.bases.clone()
    }

    fn own_attribute_names(&self, obj: &Self::Object) -> Vec<String> {
        obj.members.iter().map(|(name, _)| name.clone()).collect()
    }

    fn enum_names(&self, obj: &Self::Object) -> Result<Vec<String>, ReflectError> {
        Ok(obj.enum_names.clone())
    }

    fn enum_values(&self, obj: &Self::Object) -> Result<Vec<i64>, ReflectError> {
        Ok(obj.enum_values.clone())
    }

    fn descriptor_flags(&self, obj: &Self::Object) -> DescriptorFlags {
        obj.descriptor
    }
}
