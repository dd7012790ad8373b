//! Normalized schema model for reflected API surfaces.
//!
//! The walker reduces a live, reflection-only object graph to this entity
//! set; the emitter renders it back out as declaration files. The whole
//! tree round-trips through JSON so the walk and emission stages can run
//! as separate invocations sharing only the serialized artifact.
//!
//! ```text
//! Live object graph        Schema tree           Declaration units
//! ─────────────────    ──────────────────    ─────────────────────
//! host reflection  ──> Module              ┌─> <Path>/<Class>.pyi
//!                        ├─ Class      ────┤
//!                        ├─ Function       └─> <Path>/__init__.pyi
//!                        └─ Module ...
//! ```
//!
//! Entities are built bottom-up during one walk and never mutated
//! afterward; regeneration means re-walking from the root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored wherever a signature could not be recovered.
///
/// Appears both as the informational live-signature string and as the wire
/// form of [`ScrapedSignature::Unavailable`].
pub const NO_SIGNATURE: &str = "<no signature available>";

/// One argument of a recovered signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Identifier, never empty.
    pub name: String,
    /// Recovered type name; `Any` when nothing concrete was recoverable.
    #[serde(rename = "type")]
    pub ty: String,
    /// Default literal, present only if the source signature declared one.
    pub default: Option<String>,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}: {}={}", self.name, self.ty, default),
            None => write!(f, "{}: {}", self.name, self.ty),
        }
    }
}

/// A typed signature recovered from documentation text.
///
/// Argument order is call order; the first argument is normally the
/// receiver. Argument names are unique within one signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub return_type: String,
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// Outcome of signature recovery: a full signature or an explicit marker
/// that recovery failed. Never absent, never partially populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapedSignature {
    Recovered(FunctionSignature),
    Unavailable,
}

impl ScrapedSignature {
    pub fn recovered(&self) -> Option<&FunctionSignature> {
        match self {
            ScrapedSignature::Recovered(sig) => Some(sig),
            ScrapedSignature::Unavailable => None,
        }
    }
}

// On the wire, `Unavailable` is the literal sentinel string so the
// artifact stays readable and matches what host-side dumps produce.
impl Serialize for ScrapedSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScrapedSignature::Recovered(sig) => sig.serialize(serializer),
            ScrapedSignature::Unavailable => serializer.serialize_str(NO_SIGNATURE),
        }
    }
}

impl<'de> Deserialize<'de> for ScrapedSignature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Recovered(FunctionSignature),
            Sentinel(String),
        }
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Recovered(sig) => ScrapedSignature::Recovered(sig),
            Wire::Sentinel(_) => ScrapedSignature::Unavailable,
        })
    }
}

/// A routine discovered on a module or class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    /// Best-effort live-introspected signature text. Informational only;
    /// not required to be structurally parseable.
    pub signature: String,
    /// Signature recovered from the docstring grammar.
    pub scraped_signature: ScrapedSignature,
}

/// A data-descriptor member of a class. No type is recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    pub has_setter: bool,
    pub has_deleter: bool,
}

/// A plain-value class member with an inferred type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// One member of an enumeration class. Serialized as a `[name, value]`
/// pair; duplicate values are legitimate aliases and are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, i64)", into = "(String, i64)")]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

impl From<(String, i64)> for EnumMember {
    fn from((name, value): (String, i64)) -> Self {
        Self { name, value }
    }
}

impl From<EnumMember> for (String, i64) {
    fn from(member: EnumMember) -> Self {
        (member.name, member.value)
    }
}

/// A class discovered during the walk.
///
/// Superclasses are one-way name references, not owned entities: the
/// referenced class may live in a different subtree or not exist in the
/// schema at all (host built-ins). Collections keep discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    pub methods: Vec<Function>,
    pub properties: Vec<Property>,
    pub fields: Vec<Field>,
    pub superclasses: Vec<String>,
    /// Present when the class derives from the host's `enum` base; such a
    /// class is rendered purely as an enumeration. Sorted ascending by
    /// value at walk time.
    #[serde(rename = "enum", default)]
    pub enum_members: Option<Vec<EnumMember>>,
}

impl Class {
    pub fn is_enum(&self) -> bool {
        matches!(&self.enum_members, Some(members) if !members.is_empty())
    }
}

/// A module and its named members, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    pub members: Vec<Member>,
}

impl Module {
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.members.iter().filter_map(|m| match m {
            Member::Class(class) => Some(class),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.members.iter().filter_map(|m| match m {
            Member::Function(function) => Some(function),
            _ => None,
        })
    }

    pub fn submodules(&self) -> impl Iterator<Item = &Module> {
        self.members.iter().filter_map(|m| match m {
            Member::Module(module) => Some(module),
            _ => None,
        })
    }
}

/// A named module member. The hierarchy is a tree: an entity belongs to
/// exactly one module per walk; aliased host objects are walked and
/// recorded independently under each alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Member {
    Module(Module),
    Class(Class),
    Function(Function),
    /// Degenerate leaf for members that are neither module, class nor
    /// routine: only the textual representation is kept.
    Value { name: String, repr: String },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Module(module) => &module.name,
            Member::Class(class) => &class.name,
            Member::Function(function) => &function.name,
            Member::Value { name, .. } => name,
        }
    }
}
