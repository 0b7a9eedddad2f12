//! Member-by-member comparison inside `InnerEquals` and `InnerKeyEquals`.
//!
//! Each member becomes one `if (<differs>) { return false; }` block. The
//! comparison is chosen from the member's type: a custom comparer wins,
//! then dictionaries, collections, strings, scalars and enums, key
//! equality, and finally the default equality comparer.

use kiln_diagnostic::ErrorCode;
use kiln_emit::CodeWriter;
use kiln_model::names::display;
use kiln_model::vocabulary::{CollectionMode, StringMode};
use kiln_model::{SpecialType, TypeRef};

use crate::generator::TypeContext;
use crate::members::EqualityMember;

impl<'c> TypeContext<'c> {
    pub(crate) fn write_equal_logic(
        &mut self,
        w: &mut CodeWriter,
        members: &[EqualityMember<'c>],
        base_call: Option<&str>,
    ) {
        if members.is_empty() && base_call.is_none() {
            self.warn(
                w,
                ErrorCode::K1004,
                "No fields or properties used for equality check.",
                None,
            );
        }

        for member in members {
            w.blank();
            let m = member.name;
            let condition = self.member_differs(w, member);
            w.block(format!("if ({condition})"), |w| {
                w.line(format!("return false; // {m} not equal"));
            });
        }

        match base_call {
            Some(call) => w.line(format!(
                "return {call}; // no differences found, check with base"
            )),
            None => w.line("return true; // no differences found"),
        }
    }

    /// Whether a value of `ty` can be null inside the generated type.
    /// Generic parameters can, unless constrained to `struct`.
    pub(crate) fn may_be_null(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Parameter { name } => !self
                .def
                .type_parameters
                .iter()
                .any(|p| &p.name == name && p.value_type),
            _ => self.compilation().is_reference_type(ty),
        }
    }

    /// The "values differ" condition for one member, after writing any
    /// hint comments that belong in front of it.
    fn member_differs(&self, w: &mut CodeWriter, member: &EqualityMember<'c>) -> String {
        let compilation = self.compilation();
        let m = member.name;
        let ty = display(member.ty);

        if let Some(comparer) = compilation.custom_comparer(self.def, m) {
            let at = comparer
                .location
                .map(|l| format!(" declared at {l}"))
                .unwrap_or_default();
            w.line(format!(
                "// **{m}** using custom comparer provided by `{}`{at}",
                comparer.name
            ));
            return format!("!{}.Equals({m}, other.{m})", comparer.name);
        }

        if let Some(dictionary) = compilation.dictionary_shape(member.ty) {
            let comparer = if dictionary.read_only {
                "ReadonlyDictionaryEqualityComparer"
            } else {
                "DictionaryEqualityComparer"
            };
            return format!(
                "!global::Uno.Equality.{comparer}<{ty}, {}, {}>.Default.Equals({m}, other.{m})",
                display(&dictionary.key),
                display(&dictionary.value)
            );
        }

        if let Some(collection) = compilation.collection_shape(member.ty) {
            let default_mode = if collection.positional {
                CollectionMode::SORTED
            } else {
                CollectionMode::empty()
            };
            let mode = member.options.collection.unwrap_or(default_mode);
            let sorted = mode.contains(CollectionMode::SORTED);
            if sorted && member.options.collection.is_none() {
                w.line(format!(
                    "// **{m}** To use an _unsorted_ comparer, add the following attribute to your member:"
                ));
                w.line("// [EqualityComparerOptions(CollectionMode = CollectionComparerMode.Unsorted)]");
            }
            let order = if sorted { "Sorted" } else { "Unsorted" };
            let read_only = if collection.read_only { "Readonly" } else { "" };
            return format!(
                "!global::Uno.Equality.{order}{read_only}CollectionEqualityComparer<{ty}, {}>.Default.Equals({m}, other.{m})",
                display(&collection.element)
            );
        }

        w.line(format!(
            "// **{m}** A custom comparer declared for {m} would be used instead:"
        ));
        w.line(format!(
            "// CUSTOM COMPARER>> private static IEqualityComparer<{ty}> {m}_CustomComparer => <custom comparer>;"
        ));
        w.line(format!(
            "// To leave {m} out of the equality check, put [Uno.EqualityIgnore] on it."
        ));

        match compilation.special_type(member.ty) {
            Some(SpecialType::String) => string_differs(w, m, member.options.string),
            Some(special) if special.is_scalar() => format!("{m} != other.{m}"),
            _ if compilation.is_enum(member.ty) => format!("{m} != other.{m}"),
            _ if member.uses_key_equality() => {
                if self.may_be_null(member.ty) {
                    format!(
                        "!((global::Uno.Equality.IKeyEquatable){m})?.KeyEquals(other.{m}) ?? other.{m} != null"
                    )
                } else {
                    format!("!((global::Uno.Equality.IKeyEquatable){m}).KeyEquals(other.{m})")
                }
            }
            _ => format!(
                "!global::System.Collections.Generic.EqualityComparer<{ty}>.Default.Equals({m}, other.{m})"
            ),
        }
    }
}

fn string_differs(w: &mut CodeWriter, m: &str, mode: StringMode) -> String {
    if mode.is_empty() {
        w.line("// STRING>> String comparison can be tuned with this attribute on the member:");
        w.line("//   [EqualityComparerOptions(StringMode = <flags>)]");
        w.line("//   Flags: StringComparerMode.IgnoreCase and StringComparerMode.EmptyEqualsNull");
    }
    let comparer = if mode.contains(StringMode::IGNORE_CASE) {
        "global::System.StringComparer.OrdinalIgnoreCase"
    } else {
        "global::System.StringComparer.Ordinal"
    };
    if mode.contains(StringMode::EMPTY_EQUALS_NULL) {
        format!(
            "(string.IsNullOrWhiteSpace({m}) != string.IsNullOrWhiteSpace(other.{m})) \
             || !string.IsNullOrWhiteSpace({m}) && !{comparer}.Equals({m} ?? \"\", other.{m} ?? \"\")"
        )
    } else {
        format!("!{comparer}.Equals({m}, other.{m})")
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
