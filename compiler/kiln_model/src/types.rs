//! Serialized program model.
//!
//! These are the shapes the front end hands to kiln: declared types with
//! their members, attributes, generic parameters and source locations. The
//! model is fully resolved; kiln never sees raw source text.
//!
//! Type references use metadata names (`System.Collections.Generic.List`1`)
//! so that a reference can be resolved against the [`Compilation`] without
//! any name lookup rules.
//!
//! [`Compilation`]: crate::Compilation

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a type, as it appears in a member signature or a base list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A named type, possibly a constructed generic (`List`1` with one argument).
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeRef>,
    },
    /// `T[]`, or `T[,]` for rank 2.
    Array {
        element: Box<TypeRef>,
        #[serde(default = "default_rank")]
        rank: u8,
    },
    /// A generic type parameter of the enclosing type.
    Parameter { name: String },
    /// A value tuple `(A, B)`.
    Tuple { elements: Vec<TypeRef> },
}

fn default_rank() -> u8 {
    1
}

impl TypeRef {
    /// A non-generic named type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A constructed generic type.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            args,
        }
    }

    /// A single-dimension array of `element`.
    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// A reference to a generic parameter.
    pub fn parameter(name: impl Into<String>) -> Self {
        TypeRef::Parameter { name: name.into() }
    }

    /// Metadata name of the definition, for named types only.
    pub fn definition_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type arguments of a constructed generic; empty for everything else.
    pub fn args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Named { args, .. } => args,
            _ => &[],
        }
    }

    /// Whether this is a named type with the given definition name.
    pub fn is_named(&self, definition: &str) -> bool {
        self.definition_name() == Some(definition)
    }

    /// Replace generic parameters by the matching arguments.
    ///
    /// `params` and `args` are zipped positionally; parameters without a
    /// matching argument are left untouched.
    #[must_use]
    pub fn substitute(&self, params: &[TypeParameter], args: &[TypeRef]) -> TypeRef {
        if params.is_empty() || args.is_empty() {
            return self.clone();
        }
        match self {
            TypeRef::Parameter { name } => params
                .iter()
                .position(|p| &p.name == name)
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeRef::Named { name, args: inner } => TypeRef::Named {
                name: name.clone(),
                args: inner.iter().map(|a| a.substitute(params, args)).collect(),
            },
            TypeRef::Array { element, rank } => TypeRef::Array {
                element: Box::new(element.substitute(params, args)),
                rank: *rank,
            },
            TypeRef::Tuple { elements } => TypeRef::Tuple {
                elements: elements
                    .iter()
                    .map(|e| e.substitute(params, args))
                    .collect(),
            },
        }
    }
}

/// Declared accessibility, ordered from most to least restrictive.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Private,
    PrivateProtected,
    Protected,
    #[default]
    Internal,
    ProtectedInternal,
    Public,
}

impl Accessibility {
    /// The C# modifier text.
    pub fn as_csharp(self) -> &'static str {
        match self {
            Accessibility::Private => "private",
            Accessibility::PrivateProtected => "private protected",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::Public => "public",
        }
    }
}

fn public() -> Accessibility {
    Accessibility::Public
}

fn private() -> Accessibility {
    Accessibility::Private
}

/// What kind of type a definition declares.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
}

/// Where a definition comes from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Declared in the sources being compiled; eligible for generation.
    #[default]
    Source,
    /// Compiled elsewhere and only referenced.
    Metadata,
}

/// Built-in types the generators special-case.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialType {
    Object,
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Decimal,
    Single,
    Double,
    String,
    IntPtr,
    UIntPtr,
    DateTime,
    Enum,
    ValueType,
    Array,
}

impl SpecialType {
    /// Scalar value types compared with `!=` in generated equality.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            SpecialType::Boolean
                | SpecialType::Char
                | SpecialType::SByte
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::UInt16
                | SpecialType::Int32
                | SpecialType::UInt32
                | SpecialType::Int64
                | SpecialType::UInt64
                | SpecialType::Decimal
                | SpecialType::Single
                | SpecialType::Double
                | SpecialType::IntPtr
                | SpecialType::UIntPtr
        )
    }
}

/// A generic type parameter with its constraints.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    /// Type constraints (`where T : IFoo`).
    #[serde(default)]
    pub constraints: Vec<TypeRef>,
    /// `where T : class`
    #[serde(default)]
    pub reference_type: bool,
    /// `where T : struct`
    #[serde(default)]
    pub value_type: bool,
    /// `where T : new()`
    #[serde(default)]
    pub constructor: bool,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        TypeParameter {
            name: name.into(),
            constraints: Vec::new(),
            reference_type: false,
            value_type: false,
            constructor: false,
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: TypeRef) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Whether any constraint is present at all.
    pub fn is_constrained(&self) -> bool {
        !self.constraints.is_empty() || self.reference_type || self.value_type || self.constructor
    }
}

/// Source position used when reporting problems.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub line: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.path, self.line)
    }
}

/// An enum constant used as an attribute argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    pub type_name: String,
    pub value: i64,
    /// Constant name when the value matches a single declared member.
    #[serde(default)]
    pub member: Option<String>,
}

/// A constant attribute argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    Type(TypeRef),
    Enum(EnumValue),
    Array(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value; enum constants yield their underlying value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            AttributeValue::Enum(e) => Some(e.value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            AttributeValue::Type(t) => Some(t),
            _ => None,
        }
    }
}

/// A named attribute argument (`Name = value`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: String,
    pub value: AttributeValue,
}

/// An applied attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeData {
    /// Metadata name of the attribute class.
    pub class: String,
    #[serde(default)]
    pub ctor_args: Vec<AttributeValue>,
    #[serde(default)]
    pub named_args: Vec<NamedArgument>,
}

impl AttributeData {
    pub fn new(class: impl Into<String>) -> Self {
        AttributeData {
            class: class.into(),
            ctor_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, value: AttributeValue) -> Self {
        self.ctor_args.push(value);
        self
    }

    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.named_args.push(NamedArgument {
            name: name.into(),
            value,
        });
        self
    }

    /// First named argument called `name`.
    pub fn named(&self, name: &str) -> Option<&AttributeValue> {
        self.named_args
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// Constructor argument at `index`.
    pub fn ctor_arg(&self, index: usize) -> Option<&AttributeValue> {
        self.ctor_args.get(index)
    }
}

/// A property declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default = "public")]
    pub accessibility: Accessibility,
    /// Getter accessibility when it differs from the property's.
    #[serde(default)]
    pub getter_accessibility: Option<Accessibility>,
    #[serde(default)]
    pub has_setter: bool,
    #[serde(default)]
    pub is_write_only: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Compiler-backed property with no accessor bodies.
    #[serde(default = "yes")]
    pub is_auto: bool,
    #[serde(default)]
    pub is_indexer: bool,
    #[serde(default)]
    pub is_implicit: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub location: Option<Location>,
}

fn yes() -> bool {
    true
}

impl PropertyDef {
    /// A public, get-only auto-property.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        PropertyDef {
            name: name.into(),
            ty,
            accessibility: Accessibility::Public,
            getter_accessibility: None,
            has_setter: false,
            is_write_only: false,
            is_static: false,
            is_auto: true,
            is_indexer: false,
            is_implicit: false,
            attributes: Vec::new(),
            location: None,
        }
    }

    pub fn getter_accessibility(&self) -> Accessibility {
        self.getter_accessibility.unwrap_or(self.accessibility)
    }

    pub fn is_read_only(&self) -> bool {
        !self.has_setter
    }
}

/// A field declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default = "private")]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_readonly: bool,
    #[serde(default)]
    pub is_implicit: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl FieldDef {
    /// A private, mutable instance field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        FieldDef {
            name: name.into(),
            ty,
            accessibility: Accessibility::Private,
            is_static: false,
            is_readonly: false,
            is_implicit: false,
            attributes: Vec::new(),
            location: None,
        }
    }
}

/// A method parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Default value as C# source text (`null`, `5`).
    #[serde(default)]
    pub default_value: Option<String>,
}

impl ParameterDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        ParameterDef {
            name: name.into(),
            ty,
            default_value: None,
        }
    }
}

fn void() -> TypeRef {
    TypeRef::named("System.Void")
}

/// A method declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    #[serde(default = "void")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
    #[serde(default = "private")]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    /// Interface for explicit implementations (`void IDisposable.Dispose()`).
    #[serde(default)]
    pub explicit_interface: Option<TypeRef>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl MethodDef {
    /// A private instance method returning `void`.
    pub fn new(name: impl Into<String>) -> Self {
        MethodDef {
            name: name.into(),
            return_type: void(),
            parameters: Vec::new(),
            accessibility: Accessibility::Private,
            is_static: false,
            is_override: false,
            is_virtual: false,
            is_abstract: false,
            is_sealed: false,
            explicit_interface: None,
            attributes: Vec::new(),
            location: None,
        }
    }
}

/// Any member of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Property(PropertyDef),
    Field(FieldDef),
    Method(MethodDef),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Property(p) => &p.name,
            Member::Field(f) => &f.name,
            Member::Method(m) => &m.name,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Member::Property(p) => p.is_static,
            Member::Field(f) => f.is_static,
            Member::Method(m) => m.is_static,
        }
    }

    pub fn attributes(&self) -> &[AttributeData] {
        match self {
            Member::Property(p) => &p.attributes,
            Member::Field(f) => &f.attributes,
            Member::Method(m) => &m.attributes,
        }
    }
}

/// A type definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDef {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub special: Option<SpecialType>,
    #[serde(default)]
    pub base_type: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl TypeDef {
    /// A public partial class declared in source.
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDef {
            namespace: namespace.into(),
            name: name.into(),
            type_parameters: Vec::new(),
            kind: TypeKind::Class,
            accessibility: Accessibility::Public,
            is_abstract: false,
            is_static: false,
            is_sealed: false,
            is_partial: true,
            origin: Origin::Source,
            special: None,
            base_type: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
            members: Vec::new(),
            location: None,
        }
    }

    /// Metadata name: namespace-qualified, with a `` `N `` arity suffix for generics.
    pub fn full_name(&self) -> String {
        let mut name = if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        };
        if !self.type_parameters.is_empty() {
            name.push('`');
            name.push_str(&self.type_parameters.len().to_string());
        }
        name
    }

    /// Reference to this definition, instantiated with its own parameters.
    pub fn self_ref(&self) -> TypeRef {
        TypeRef::generic(
            self.full_name(),
            self.type_parameters
                .iter()
                .map(|p| TypeRef::parameter(p.name.clone()))
                .collect(),
        )
    }

    pub fn is_reference_type(&self) -> bool {
        matches!(self.kind, TypeKind::Class | TypeKind::Interface)
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(p) => Some(p),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDef> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(m) => Some(m),
            _ => None,
        })
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties().find(|p| p.name == name)
    }

    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// Assembly-level information.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyDecl {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
}

/// The whole serialized input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationInput {
    #[serde(default)]
    pub assembly: AssemblyDecl,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    /// Merge the built-in core library catalog into the compilation.
    #[serde(default = "yes")]
    pub include_core_library: bool,
}

impl Default for CompilationInput {
    fn default() -> Self {
        CompilationInput {
            assembly: AssemblyDecl::default(),
            types: Vec::new(),
            include_core_library: true,
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
