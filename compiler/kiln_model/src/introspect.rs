//! Symbol introspection queries over a [`Compilation`].
//!
//! Every query that walks the inheritance graph keeps a visited set, so a
//! malformed model with a cyclic base list terminates instead of looping.
//! Unresolved references answer `None`/`false`; nothing here fails.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::compilation::Compilation;
use crate::types::{
    Accessibility, AttributeData, Location, Member, SpecialType, TypeDef, TypeKind, TypeParameter,
    TypeRef,
};
use crate::vocabulary::{find_attribute, KEY_EQUATABLE, KEY_EQUATABLE_GENERIC};

const OBJECT: &str = "System.Object";
const I_COLLECTION: &str = "System.Collections.ICollection";
const I_COLLECTION_T: &str = "System.Collections.Generic.ICollection`1";
const I_READ_ONLY_COLLECTION_T: &str = "System.Collections.Generic.IReadOnlyCollection`1";
const I_LIST_T: &str = "System.Collections.Generic.IList`1";
const I_READ_ONLY_LIST_T: &str = "System.Collections.Generic.IReadOnlyList`1";
const I_DICTIONARY: &str = "System.Collections.Generic.IDictionary`2";
const I_READ_ONLY_DICTIONARY: &str = "System.Collections.Generic.IReadOnlyDictionary`2";
const I_EQUALITY_COMPARER: &str = "System.Collections.Generic.IEqualityComparer`1";

/// Which members [`Compilation::enumerate_members`] returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemberQuery {
    pub properties: bool,
    pub fields: bool,
    pub methods: bool,
    /// Members less accessible than this are skipped.
    pub min_accessibility: Accessibility,
    pub include_static: bool,
    /// Also walk the base chain, most-derived type first.
    pub include_inherited: bool,
}

impl MemberQuery {
    /// Declared instance properties of any accessibility.
    pub fn properties() -> Self {
        MemberQuery {
            properties: true,
            fields: false,
            methods: false,
            min_accessibility: Accessibility::Private,
            include_static: false,
            include_inherited: false,
        }
    }

    /// Declared instance fields of any accessibility.
    pub fn fields() -> Self {
        MemberQuery {
            properties: false,
            fields: true,
            ..Self::properties()
        }
    }

    /// Declared methods, static ones included.
    pub fn methods() -> Self {
        MemberQuery {
            properties: false,
            methods: true,
            include_static: true,
            ..Self::properties()
        }
    }

    #[must_use]
    pub fn inherited(mut self) -> Self {
        self.include_inherited = true;
        self
    }

    #[must_use]
    pub fn at_least(mut self, accessibility: Accessibility) -> Self {
        self.min_accessibility = accessibility;
        self
    }

    fn accepts(&self, member: &Member) -> bool {
        let (kind_ok, implicit, accessibility) = match member {
            Member::Property(p) => (self.properties, p.is_implicit, p.getter_accessibility()),
            Member::Field(f) => (self.fields, f.is_implicit, f.accessibility),
            Member::Method(m) => (self.methods, false, m.accessibility),
        };
        kind_ok
            && !implicit
            && accessibility >= self.min_accessibility
            && (self.include_static || !member.is_static())
    }
}

/// A member together with the type that declares it.
#[derive(Copy, Clone, Debug)]
pub struct DeclaredMember<'a> {
    pub owner: &'a TypeDef,
    pub member: &'a Member,
}

/// Key/value shape of a dictionary-like type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryShape {
    pub key: TypeRef,
    pub value: TypeRef,
    /// Implements `IReadOnlyDictionary<TKey, TValue>`.
    pub read_only: bool,
}

/// Element shape of a collection-like type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionShape {
    pub element: TypeRef,
    /// Implements `IReadOnlyCollection<T>` rather than `ICollection<T>`.
    pub read_only: bool,
    /// Arrays and lists: positional collections that default to sorted comparison.
    pub positional: bool,
}

/// A static `GetHash_<Member>(value)` method declared on the type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomHashMethod {
    pub name: String,
    pub location: Option<Location>,
}

/// A static `<Member>_CustomComparer` property or field declared on the type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomComparer {
    pub name: String,
    pub location: Option<Location>,
}

impl Compilation {
    /// Base type definition; `None` for the root and unresolved bases.
    pub fn base_type_of(&self, def: &TypeDef) -> Option<&TypeDef> {
        def.base_type.as_ref().and_then(|b| self.resolve(b))
    }

    /// Base definitions from the direct base up to the root object type.
    pub fn base_chain<'a>(&'a self, def: &'a TypeDef) -> Vec<&'a TypeDef> {
        let mut chain = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(def.full_name());
        let mut current = self.base_type_of(def);
        while let Some(base) = current {
            if !visited.insert(base.full_name()) {
                break;
            }
            chain.push(base);
            current = self.base_type_of(base);
        }
        chain
    }

    /// Base type references from the direct base upward, with generic
    /// arguments substituted level by level.
    pub fn base_refs(&self, def: &TypeDef) -> Vec<TypeRef> {
        let mut refs = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(def.full_name());
        let mut current = def.base_type.clone();
        while let Some(base_ref) = current {
            let Some(base) = self.resolve(&base_ref) else {
                refs.push(base_ref);
                break;
            };
            if !visited.insert(base.full_name()) {
                break;
            }
            current = base
                .base_type
                .as_ref()
                .map(|next| next.substitute(&base.type_parameters, base_ref.args()));
            refs.push(base_ref);
        }
        refs
    }

    /// Whether `candidate` (a metadata name) is a strict ancestor of `def`.
    pub fn derives_from(&self, def: &TypeDef, candidate: &str) -> bool {
        self.base_chain(def)
            .iter()
            .any(|base| base.full_name() == candidate)
    }

    /// Attribute on the type or, failing that, on the nearest base declaring it.
    pub fn find_attribute_flattened<'a>(
        &'a self,
        def: &'a TypeDef,
        class: &str,
    ) -> Option<&'a AttributeData> {
        find_attribute(&def.attributes, class).or_else(|| {
            self.base_chain(def)
                .into_iter()
                .find_map(|base| find_attribute(&base.attributes, class))
        })
    }

    pub fn has_attribute_flattened(&self, def: &TypeDef, class: &str) -> bool {
        self.find_attribute_flattened(def, class).is_some()
    }

    /// The type itself, its base types and every implemented interface,
    /// with generic arguments substituted, breadth first.
    ///
    /// Arrays expose `System.Array`, `IList<T>` and `IReadOnlyList<T>`.
    pub fn supertypes(&self, ty: &TypeRef) -> Vec<TypeRef> {
        self.supertypes_in(ty, &[])
    }

    /// Like [`supertypes`](Self::supertypes), resolving generic parameters
    /// against `scope` so that a parameter exposes its constraint types.
    pub fn supertypes_in(&self, ty: &TypeRef, scope: &[TypeParameter]) -> Vec<TypeRef> {
        let mut out = Vec::new();
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::from([ty.clone()]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            match &current {
                TypeRef::Named { args, .. } => {
                    if let Some(def) = self.resolve(&current) {
                        let params = &def.type_parameters;
                        queue.extend(def.base_type.iter().map(|b| b.substitute(params, args)));
                        queue.extend(def.interfaces.iter().map(|i| i.substitute(params, args)));
                    }
                }
                TypeRef::Array { element, .. } => {
                    let element = element.as_ref().clone();
                    queue.push_back(TypeRef::named("System.Array"));
                    queue.push_back(TypeRef::generic(I_LIST_T, vec![element.clone()]));
                    queue.push_back(TypeRef::generic(I_READ_ONLY_LIST_T, vec![element]));
                }
                TypeRef::Parameter { name } => {
                    if let Some(param) = scope.iter().find(|p| &p.name == name) {
                        queue.extend(param.constraints.iter().cloned());
                    }
                }
                TypeRef::Tuple { .. } => {}
            }
            out.push(current);
        }
        out
    }

    /// Constructed interface or base with the given definition name, if any.
    pub fn implements(&self, ty: &TypeRef, definition: &str) -> Option<TypeRef> {
        self.supertypes(ty)
            .into_iter()
            .find(|t| t.is_named(definition))
    }

    /// Members of `def` matching `query`, in declaration order. Inherited
    /// members follow the type's own, nearest base first.
    pub fn enumerate_members<'a>(
        &'a self,
        def: &'a TypeDef,
        query: MemberQuery,
    ) -> Vec<DeclaredMember<'a>> {
        let mut owners = vec![def];
        if query.include_inherited {
            owners.extend(
                self.base_chain(def)
                    .into_iter()
                    .filter(|b| b.full_name() != OBJECT),
            );
        }
        owners
            .into_iter()
            .flat_map(|owner| {
                owner
                    .members
                    .iter()
                    .filter(|m| query.accepts(m))
                    .map(move |member| DeclaredMember { owner, member })
            })
            .collect()
    }

    pub fn dictionary_shape(&self, ty: &TypeRef) -> Option<DictionaryShape> {
        let supertypes = self.supertypes(ty);
        let (found, read_only) = supertypes
            .iter()
            .find(|t| t.is_named(I_READ_ONLY_DICTIONARY))
            .map(|t| (t, true))
            .or_else(|| {
                supertypes
                    .iter()
                    .find(|t| t.is_named(I_DICTIONARY))
                    .map(|t| (t, false))
            })?;
        match found.args() {
            [key, value] => Some(DictionaryShape {
                key: key.clone(),
                value: value.clone(),
                read_only,
            }),
            _ => None,
        }
    }

    pub fn collection_shape(&self, ty: &TypeRef) -> Option<CollectionShape> {
        let supertypes = self.supertypes(ty);
        let (found, read_only) = supertypes
            .iter()
            .find(|t| t.is_named(I_READ_ONLY_COLLECTION_T))
            .map(|t| (t, true))
            .or_else(|| {
                supertypes
                    .iter()
                    .find(|t| t.is_named(I_COLLECTION_T))
                    .map(|t| (t, false))
            })?;
        let element = found.args().first()?.clone();
        let positional = matches!(ty, TypeRef::Array { .. })
            || supertypes
                .iter()
                .any(|t| t.is_named(I_LIST_T) || t.is_named(I_READ_ONLY_LIST_T));
        Some(CollectionShape {
            element,
            read_only,
            positional,
        })
    }

    /// Implements the non-generic `System.Collections.ICollection`.
    pub fn is_non_generic_collection(&self, ty: &TypeRef) -> bool {
        self.implements(ty, I_COLLECTION).is_some()
    }

    pub fn special_type(&self, ty: &TypeRef) -> Option<SpecialType> {
        self.resolve(ty).and_then(|def| def.special)
    }

    pub fn is_enum(&self, ty: &TypeRef) -> bool {
        self.resolve(ty)
            .is_some_and(|def| def.kind == TypeKind::Enum)
    }

    /// Whether values of `ty` can be null references.
    ///
    /// Unresolved named types are assumed to be classes. Generic parameters
    /// are reference types unless constrained to `struct`; callers that
    /// need the declaring type's constraints check them directly.
    pub fn is_reference_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named { .. } => self.resolve(ty).map_or(true, TypeDef::is_reference_type),
            TypeRef::Array { .. } | TypeRef::Parameter { .. } => true,
            TypeRef::Tuple { .. } => false,
        }
    }

    /// Whether `def` or one of its bases (short of `System.Object`) declares
    /// an override of `name` with `arity` parameters.
    pub fn overrides_method(&self, def: &TypeDef, name: &str, arity: usize) -> bool {
        std::iter::once(def)
            .chain(self.base_chain(def))
            .filter(|owner| owner.full_name() != OBJECT)
            .any(|owner| {
                owner
                    .methods()
                    .any(|m| m.is_override && m.name == name && m.parameters.len() == arity)
            })
    }

    /// `static int GetHash_<member>(<member type> value)` declared on `def`.
    pub fn custom_hash_method(
        &self,
        def: &TypeDef,
        member: &str,
        member_type: &TypeRef,
    ) -> Option<CustomHashMethod> {
        let name = format!("GetHash_{member}");
        def.methods()
            .find(|m| {
                m.is_static
                    && m.name == name
                    && m.return_type.is_named("System.Int32")
                    && matches!(m.parameters.as_slice(), [p] if p.ty == *member_type)
            })
            .map(|m| CustomHashMethod {
                name: m.name.clone(),
                location: m.location.clone(),
            })
    }

    /// `<member>_CustomComparer` declared as a static property or field on `def`
    /// whose type is an equality comparer.
    pub fn custom_comparer(&self, def: &TypeDef, member: &str) -> Option<CustomComparer> {
        let name = format!("{member}_CustomComparer");
        def.members.iter().find_map(|m| {
            let (ty, location) = match m {
                Member::Property(p) if p.is_static && p.name == name => (&p.ty, &p.location),
                Member::Field(f) if f.is_static && f.name == name => (&f.ty, &f.location),
                _ => return None,
            };
            self.implements(ty, I_EQUALITY_COMPARER)
                .or_else(|| self.resolve(ty).is_none().then(|| ty.clone()))
                .map(|_| CustomComparer {
                    name: name.clone(),
                    location: location.clone(),
                })
        })
    }

    /// Implements `IKeyEquatable` or `IKeyEquatable<T>`, possibly through a
    /// constraint of a generic parameter declared in `scope`.
    pub fn is_key_equatable(&self, ty: &TypeRef, scope: &[TypeParameter]) -> bool {
        self.supertypes_in(ty, scope)
            .iter()
            .any(|t| t.is_named(KEY_EQUATABLE) || t.is_named(KEY_EQUATABLE_GENERIC))
    }
}
