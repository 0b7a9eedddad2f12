//! Hash computation inside `ComputeHashCode` and `ComputeKeyHashCode`.
//!
//! The hash starts from the base hash or [`SEED`], then folds every hash
//! member in with `hash = (memberHash * prime) ^ hash`, the prime cycling
//! through [`PRIMES`] by position. Members that may be null are only
//! folded in when they hold a value.

use kiln_diagnostic::ErrorCode;
use kiln_emit::CodeWriter;
use kiln_model::names::{display, display_friendly};
use kiln_model::vocabulary::{StringMode, GENERATED_EQUALITY};
use kiln_model::{CustomComparer, CustomHashMethod, SpecialType, TypeKind, TypeRef};

use crate::generator::TypeContext;
use crate::members::EqualityMember;

/// Starting value when there is no base hash: the 10 000th prime.
pub const SEED: u32 = 104_729;

/// Position multipliers, one prime per slot. Their ranks among the primes
/// are 19 901, 20 001, 20 101 and so on, one hundred apart.
pub const PRIMES: [u32; 22] = [
    223_469, 224_743, 225_961, 227_251, 228_479, 229_613, 230_767, 232_007, 233_347, 234_653,
    235_919, 237_217, 238_477, 239_737, 240_997, 242_129, 243_437, 244_603, 245_851, 247_067,
    248_267, 249_449,
];

/// The prime multiplying the member at `position`, with its rank.
pub fn prime_for(position: usize) -> (u32, usize) {
    let slot = position % PRIMES.len();
    (PRIMES[slot], 19_901 + 100 * slot)
}

impl<'c> TypeContext<'c> {
    pub(crate) fn write_hash_logic(
        &mut self,
        w: &mut CodeWriter,
        members: &[EqualityMember<'c>],
        base_call: Option<&str>,
    ) {
        if base_call.is_none() && members.is_empty() {
            self.warn(
                w,
                ErrorCode::K1005,
                "No members are marked with [Uno.EqualityHash] or [Uno.EqualityKey]. \
                 You should add at least one.",
                None,
            );
            w.line("return 0; // no members to compute hash");
            return;
        }

        match base_call {
            Some(call) => w.line(format!("int hash = {call}; // start with hash from base")),
            None => w.line(format!("int hash = {SEED}; // 10 000th prime number")),
        }
        if !members.is_empty() {
            w.block("unchecked", |w| {
                for (position, member) in members.iter().enumerate() {
                    if position > 0 {
                        w.blank();
                    }
                    self.write_member_hash(w, member, position);
                }
            });
        }
        w.line("return hash;");
    }

    fn write_member_hash(&mut self, w: &mut CodeWriter, member: &EqualityMember<'c>, position: usize) {
        let compilation = self.compilation();
        let m = member.name;
        let ty = display(member.ty);
        w.line(format!(
            "// ***** Computation for {m} ({}) *****",
            display_friendly(member.ty)
        ));

        let custom_hash = compilation.custom_hash_method(self.def, m, member.ty);
        let comparer = compilation.custom_comparer(self.def, m);
        if custom_hash.is_none() {
            w.line(format!(
                "// **{m}** A custom hash computation can be supplied with a method of this signature:"
            ));
            w.line(format!(
                "// CUSTOM HASH METHOD>> private static int GetHash_{m}({ty} value) => <custom code>;"
            ));
        }
        if comparer.is_none() {
            w.line(format!(
                "// ** A custom comparer for {m} would also be used to compute the hash:"
            ));
            w.line(format!(
                "// CUSTOM COMPARER>> private static IEqualityComparer<{ty}> {m}_CustomComparer => <custom comparer>;"
            ));
        }

        let Some(hash) = self.member_hash(w, member, custom_hash, comparer) else {
            return;
        };
        let (prime, rank) = prime_for(position);
        let fold = format!("hash = ({hash} * {prime}) ^ hash; // {prime} is the {rank}st prime number");

        if self.may_be_null(member.ty) {
            let empty_is_null = compilation.special_type(member.ty) == Some(SpecialType::String)
                && member.options.string.contains(StringMode::EMPTY_EQUALS_NULL);
            let check = if empty_is_null {
                format!("!string.IsNullOrWhiteSpace({m})")
            } else {
                format!("!ReferenceEquals({m}, null)")
            };
            w.block(format!("if ({check})"), |w| w.line(fold));
        } else {
            w.line(fold);
        }
    }

    /// The member's own hash expression, or `None` when the member cannot
    /// take part in hashing.
    fn member_hash(
        &mut self,
        w: &mut CodeWriter,
        member: &EqualityMember<'c>,
        custom_hash: Option<CustomHashMethod>,
        comparer: Option<CustomComparer>,
    ) -> Option<String> {
        let compilation = self.compilation();
        let m = member.name;
        if let Some(method) = custom_hash {
            return Some(format!("{}({m})", method.name));
        }
        if let Some(comparer) = comparer {
            return Some(format!("{}.GetHashCode({m})", comparer.name));
        }

        let special = compilation.special_type(member.ty);
        if special == Some(SpecialType::Boolean) {
            return Some(format!("({m} ? 1 : 0)"));
        }
        if special == Some(SpecialType::Int32) {
            return Some(m.to_string());
        }
        if matches!(member.ty, TypeRef::Array { .. }) {
            return Some(format!("{m}.Length"));
        }
        if let Some(dictionary) = compilation.dictionary_shape(member.ty) {
            let interface = if dictionary.read_only {
                "IReadOnlyDictionary"
            } else {
                "IDictionary"
            };
            return Some(format!(
                "((global::System.Collections.Generic.{interface}<{}, {}>){m}).Count",
                display(&dictionary.key),
                display(&dictionary.value)
            ));
        }
        if let Some(collection) = compilation.collection_shape(member.ty) {
            let interface = if collection.read_only {
                "IReadOnlyCollection"
            } else {
                "ICollection"
            };
            return Some(format!(
                "((global::System.Collections.Generic.{interface}<{}>){m}).Count",
                display(&collection.element)
            ));
        }
        if compilation.is_non_generic_collection(member.ty) {
            return Some(format!("((global::System.Collections.ICollection){m}).Count"));
        }
        if member.uses_key_equality() {
            return Some(format!(
                "((global::Uno.Equality.IKeyEquatable){m}).GetKeyHashCode()"
            ));
        }
        if compilation.is_enum(member.ty) {
            return Some(format!("{m}.GetHashCode()"));
        }
        if special == Some(SpecialType::String) {
            let comparer = if member.options.string.contains(StringMode::IGNORE_CASE) {
                "OrdinalIgnoreCase"
            } else {
                "Ordinal"
            };
            return Some(format!(
                "global::System.StringComparer.{comparer}.GetHashCode({m})"
            ));
        }

        if let Some(def) = compilation.resolve(member.ty) {
            let hashable = !matches!(def.kind, TypeKind::Class | TypeKind::Struct)
                || self.generator.will_generate(def)
                || compilation.has_attribute_flattened(def, GENERATED_EQUALITY)
                || compilation.overrides_method(def, "GetHashCode", 0);
            if !hashable {
                if self.unhashable.insert(m) {
                    let message = format!(
                        "Type `{}` of member `{m}` doesn't implement .GetHashCode(): it won't be used \
                         for hash computation. Use a custom hash method or a custom comparer instead.",
                        display_friendly(member.ty)
                    );
                    self.warn(w, ErrorCode::K1007, message, member.location);
                }
                return None;
            }
        }
        Some(format!("{m}.GetHashCode()"))
    }
}
