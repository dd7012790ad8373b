//! The reflection capability boundary.
//!
//! The walker performs no reflection itself; everything it knows about the
//! host's object graph comes through [`ReflectionCapability`]. Any object
//! graph satisfying this capability set is walkable. The in-memory
//! binding lives in [`crate::memory`]; host bindings live with the host.

/// Classification of an opaque host object.
///
/// A closed variant set answered once at the boundary, so the walker
/// pattern-matches over known shapes instead of running ad hoc
/// is-this-a-module tests per member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Module,
    Class,
    /// A function, method or builtin routine.
    Routine,
    /// A data-descriptor-like member (property).
    Property,
    /// Anything else; only its textual representation is recorded.
    Value,
}

impl ObjectKind {
    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Module => "module",
            ObjectKind::Class => "class",
            ObjectKind::Routine => "routine",
            ObjectKind::Property => "property",
            ObjectKind::Value => "value",
        }
    }
}

/// Setter/deleter availability on a data descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescriptorFlags {
    pub has_setter: bool,
    pub has_deleter: bool,
}

/// A failure inside the host's reflection layer.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ReflectError(pub String);

impl ReflectError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Capability the host environment supplies for reflecting over its
/// object graph.
///
/// Reflecting a live graph may have side effects, so one walk owns the
/// graph exclusively for its duration; implementations are not required to
/// tolerate concurrent callers.
pub trait ReflectionCapability {
    /// Opaque handle to a host object.
    type Object;

    /// Classify an object into the closed kind set.
    fn kind(&self, obj: &Self::Object) -> ObjectKind;

    /// The object's own name.
    fn name(&self, obj: &Self::Object) -> String;

    /// The object's documentation string, if it has one.
    fn documentation(&self, obj: &Self::Object) -> Option<String>;

    /// Enumerable named members, in a deterministic order.
    fn members(&self, obj: &Self::Object) -> Result<Vec<(String, Self::Object)>, ReflectError>;

    /// Textual representation of a plain value.
    fn repr(&self, obj: &Self::Object) -> String;

    /// Name of the object's type, for plain-value class fields.
    fn type_name(&self, obj: &Self::Object) -> String;

    /// Best-effort live-introspected signature of a routine. Informational
    /// only; `None` when the host cannot produce one.
    fn live_signature(&self, obj: &Self::Object) -> Option<String>;

    /// Direct superclasses of a class.
    fn bases(&self, obj: &Self::Object) -> Vec<Self::Object>;

    /// Attribute names defined directly on this object, not inherited ones.
    fn own_attribute_names(&self, obj: &Self::Object) -> Vec<String>;

    /// The parallel `names` collection of an enumeration class.
    fn enum_names(&self, obj: &Self::Object) -> Result<Vec<String>, ReflectError>;

    /// The parallel `values` collection of an enumeration class.
    fn enum_values(&self, obj: &Self::Object) -> Result<Vec<i64>, ReflectError>;

    /// Setter/deleter availability for a data descriptor.
    fn descriptor_flags(&self, obj: &Self::Object) -> DescriptorFlags;
}
