//! Name projections shared by all generators.
//!
//! Both the file name of a generated unit and every in-code reference to a
//! type come from here, so two instantiations of the same generic definition
//! can never produce colliding names.

use crate::types::{TypeDef, TypeParameter, TypeRef};

/// Generics-aware names of a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolNames {
    /// `MyType`
    pub name: String,
    /// `<T1, T2>`, or empty for non-generic types.
    pub generic_arguments: String,
    /// `MyType<T1, T2>`
    pub name_with_generics: String,
    /// `MyType&lt;T1, T2&gt;`
    pub name_for_xml: String,
    /// `MyType<,>`
    pub definition: String,
    /// `MyType_T1_T2`
    pub file_safe_name: String,
    /// `My/Namespace/MyType_T1_T2`
    pub file_path: String,
    /// ` where T1 : class, global::IFoo` for every constrained parameter.
    pub constraints: String,
    /// `global::My.Namespace.MyType<T1, T2>`
    pub full_name_with_generics: String,
}

impl SymbolNames {
    pub fn of(def: &TypeDef) -> Self {
        let name = def.name.clone();
        let params: Vec<&str> = def.type_parameters.iter().map(|p| p.name.as_str()).collect();
        let qualified = if def.namespace.is_empty() {
            format!("global::{name}")
        } else {
            format!("global::{}.{name}", def.namespace)
        };
        let directory: Vec<&str> = def
            .namespace
            .split('.')
            .filter(|part| !part.is_empty())
            .collect();

        if params.is_empty() {
            return SymbolNames {
                generic_arguments: String::new(),
                name_with_generics: name.clone(),
                name_for_xml: name.clone(),
                definition: name.clone(),
                file_safe_name: name.clone(),
                file_path: join_path(&directory, &name),
                constraints: String::new(),
                full_name_with_generics: qualified,
                name,
            };
        }

        let joined = params.join(", ");
        let file_safe_name = format!("{name}_{}", params.join("_"));
        SymbolNames {
            generic_arguments: format!("<{joined}>"),
            name_with_generics: format!("{name}<{joined}>"),
            name_for_xml: format!("{name}&lt;{joined}&gt;"),
            definition: format!("{name}<{}>", ",".repeat(params.len() - 1)),
            file_path: join_path(&directory, &file_safe_name),
            file_safe_name,
            constraints: constraints_clause(&def.type_parameters),
            full_name_with_generics: format!("{qualified}<{joined}>"),
            name,
        }
    }
}

impl SymbolNames {
    /// `My.Namespace.MyType<T1, T2>`, used to name the type in messages.
    pub fn qualified(&self) -> &str {
        self.full_name_with_generics
            .strip_prefix("global::")
            .unwrap_or(&self.full_name_with_generics)
    }
}

fn join_path(directory: &[&str], file: &str) -> String {
    if directory.is_empty() {
        file.to_string()
    } else {
        format!("{}/{file}", directory.join("/"))
    }
}

/// ` where T : class, global::Ns.IFoo, new()` for each constrained parameter.
pub fn constraints_clause(params: &[TypeParameter]) -> String {
    let mut clause = String::new();
    for param in params.iter().filter(|p| p.is_constrained()) {
        let mut parts = Vec::new();
        if param.reference_type {
            parts.push("class".to_string());
        }
        if param.value_type {
            parts.push("struct".to_string());
        }
        parts.extend(param.constraints.iter().map(display));
        if param.constructor && !param.value_type {
            parts.push("new()".to_string());
        }
        clause.push_str(&format!(" where {} : {}", param.name, parts.join(", ")));
    }
    clause
}

/// C# keyword for a built-in type, if it has one.
pub fn keyword(metadata_name: &str) -> Option<&'static str> {
    Some(match metadata_name {
        "System.Object" => "object",
        "System.Void" => "void",
        "System.Boolean" => "bool",
        "System.Char" => "char",
        "System.SByte" => "sbyte",
        "System.Byte" => "byte",
        "System.Int16" => "short",
        "System.UInt16" => "ushort",
        "System.Int32" => "int",
        "System.UInt32" => "uint",
        "System.Int64" => "long",
        "System.UInt64" => "ulong",
        "System.Decimal" => "decimal",
        "System.Single" => "float",
        "System.Double" => "double",
        "System.String" => "string",
        _ => return None,
    })
}

/// Source form of a metadata name: arity suffixes dropped, nesting with `.`.
fn source_name(metadata_name: &str) -> String {
    metadata_name
        .split('.')
        .map(|segment| segment.split('`').next().unwrap_or(segment))
        .collect::<Vec<_>>()
        .join(".")
        .replace('+', ".")
}

/// Fully qualified C# spelling of a type reference.
///
/// Keywords are used for built-in types, `T?` for nullable value types and
/// `global::` for everything else, so the text is valid in any namespace.
pub fn display(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named { name, args } => {
            if args.is_empty() {
                if let Some(kw) = keyword(name) {
                    return kw.to_string();
                }
            }
            if name == "System.Nullable`1" && args.len() == 1 {
                return format!("{}?", display(&args[0]));
            }
            let base = format!("global::{}", source_name(name));
            if args.is_empty() {
                base
            } else {
                let args: Vec<String> = args.iter().map(display).collect();
                format!("{base}<{}>", args.join(", "))
            }
        }
        TypeRef::Array { element, rank } => {
            let commas = ",".repeat(usize::from(rank.saturating_sub(1)));
            format!("{}[{commas}]", display(element))
        }
        TypeRef::Parameter { name } => name.clone(),
        TypeRef::Tuple { elements } => {
            let parts: Vec<String> = elements.iter().map(display).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// Short, unqualified spelling used in messages.
pub fn display_friendly(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named { name, args } => {
            if args.is_empty() {
                if let Some(kw) = keyword(name) {
                    return kw.to_string();
                }
            }
            let simple = source_name(name);
            let simple = simple.rsplit('.').next().unwrap_or(&simple).to_string();
            if args.is_empty() {
                simple
            } else {
                let args: Vec<String> = args.iter().map(display_friendly).collect();
                format!("{simple}<{}>", args.join(", "))
            }
        }
        TypeRef::Array { element, rank } => {
            let commas = ",".repeat(usize::from(rank.saturating_sub(1)));
            format!("{}[{commas}]", display_friendly(element))
        }
        TypeRef::Parameter { name } => name.clone(),
        TypeRef::Tuple { elements } => {
            let parts: Vec<String> = elements.iter().map(display_friendly).collect();
            format!("({})", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests;
