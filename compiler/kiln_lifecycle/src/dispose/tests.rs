use super::*;
use kiln_model::vocabulary::{DISPOSE_METHOD, FINALIZER_METHOD};
use kiln_model::{
    AttributeData, Compilation, CompilationInput, Member, ParameterDef, TypeRef,
};
use pretty_assertions::assert_eq;

fn compile(types: Vec<TypeDef>) -> Compilation {
    Compilation::from_input(CompilationInput {
        types,
        ..CompilationInput::default()
    })
    .unwrap()
}

fn metadata(name: &str, methods: Vec<MethodDef>) -> TypeDef {
    let mut def = TypeDef::class("Lib", name);
    def.origin = Origin::Metadata;
    def.members = methods.into_iter().map(Member::Method).collect();
    def
}

fn dispose_pattern(virtual_: bool) -> MethodDef {
    let mut method = MethodDef::new("Dispose");
    method.parameters = vec![ParameterDef::new("disposing", TypeRef::named("System.Boolean"))];
    method.is_virtual = virtual_;
    method
}

fn plain_dispose() -> MethodDef {
    let mut method = MethodDef::new("Dispose");
    method.accessibility = kiln_model::Accessibility::Public;
    method
}

fn marked(name: &str, marker: &str) -> Member {
    let mut method = MethodDef::new(name);
    method.attributes = vec![AttributeData::new(marker)];
    Member::Method(method)
}

fn subject(base: Option<&str>) -> TypeDef {
    let mut def = TypeDef::class("App", "Subject").with_member(marked("Release", DISPOSE_METHOD));
    def.base_type = base.map(TypeRef::named);
    def
}

fn strategy(types: Vec<TypeDef>) -> DisposeStrategy {
    let compilation = compile(types);
    let generator = LifecycleGenerator::new(&compilation);
    generator.dispose_strategy(compilation.type_def("App.Subject").unwrap())
}

#[test]
fn no_disposable_base_is_root() {
    assert_eq!(strategy(vec![subject(None)]), DisposeStrategy::Root);
}

#[test]
fn virtual_pattern_on_base() {
    let mut plain = plain_dispose();
    plain.is_virtual = false;
    let base = metadata("Resource", vec![dispose_pattern(true), plain]);
    assert_eq!(
        strategy(vec![base, subject(Some("Lib.Resource"))]),
        DisposeStrategy::PatternOnBase {
            base: "global::Lib.Resource".to_string()
        }
    );
}

#[test]
fn pattern_found_past_nearer_plain_dispose() {
    let far = metadata("Far", vec![dispose_pattern(true)]);
    let mut near = metadata("Near", vec![plain_dispose()]);
    near.base_type = Some(TypeRef::named("Lib.Far"));
    assert_eq!(
        strategy(vec![far, near, subject(Some("Lib.Near"))]),
        DisposeStrategy::PatternOnBase {
            base: "global::Lib.Far".to_string()
        }
    );
}

#[test]
fn virtual_plain_dispose_on_base() {
    let mut dispose = plain_dispose();
    dispose.is_virtual = true;
    let base = metadata("Simple", vec![dispose]);
    assert_eq!(
        strategy(vec![base, subject(Some("Lib.Simple"))]),
        DisposeStrategy::VirtualOnBase {
            base: "global::Lib.Simple".to_string()
        }
    );
}

#[test]
fn sealed_or_explicit_dispose_is_not_overridable() {
    let mut sealed = dispose_pattern(false);
    sealed.is_override = true;
    sealed.is_sealed = true;
    let base = metadata("Sealed", vec![sealed]);
    assert!(matches!(
        strategy(vec![base, subject(Some("Lib.Sealed"))]),
        DisposeStrategy::NotOverridable { .. }
    ));

    let mut explicit = MethodDef::new("System.IDisposable.Dispose");
    explicit.explicit_interface = Some(TypeRef::named("System.IDisposable"));
    let base = metadata("Explicit", vec![explicit]);
    assert_eq!(
        strategy(vec![base, subject(Some("Lib.Explicit"))]),
        DisposeStrategy::NotOverridable {
            base: "global::Lib.Explicit".to_string()
        }
    );
}

#[test]
fn generated_base_counts_as_pattern() {
    let base = TypeDef::class("App", "Parent").with_member(marked("ReleaseParent", DISPOSE_METHOD));
    assert_eq!(
        strategy(vec![base, subject(Some("App.Parent"))]),
        DisposeStrategy::PatternOnBase {
            base: "global::App.Parent".to_string()
        }
    );
}

#[test]
fn finalizer_base_is_nearest_generated_level() {
    let root = TypeDef::class("App", "Root").with_member(marked("Collect", FINALIZER_METHOD));
    let mut middle = TypeDef::class("App", "Middle");
    middle.base_type = Some(TypeRef::named("App.Root"));
    let mut leaf = TypeDef::class("App", "Leaf").with_member(marked("CollectLeaf", FINALIZER_METHOD));
    leaf.base_type = Some(TypeRef::named("App.Middle"));
    let compilation = compile(vec![root, middle, leaf]);
    let generator = LifecycleGenerator::new(&compilation);

    let leaf = compilation.type_def("App.Leaf").unwrap();
    assert_eq!(
        generator.finalizer_base(leaf).map(TypeDef::full_name),
        Some("App.Root".to_string())
    );
    let root = compilation.type_def("App.Root").unwrap();
    assert_eq!(generator.finalizer_base(root), None);
}
