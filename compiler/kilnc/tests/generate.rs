// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end runs of the driver over JSON program models.

use std::fs;
use std::path::PathBuf;

use kiln_diagnostic::ErrorCode;
use kilnc::commands::{run_generate, GenerateOptions};
use kilnc::{generate, load_model, Drift, DriverError};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn options_for(model: &str, output: &std::path::Path) -> GenerateOptions {
    let mut options = GenerateOptions::new(fixture(model));
    options.output = output.to_path_buf();
    options
}

#[test]
fn shop_model_generates_every_unit_in_plan_order() {
    let compilation = load_model(&fixture("shop.json")).unwrap();
    let output = generate(&compilation).unwrap();

    let paths: Vec<&str> = output.artifacts.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "EqualityGenerator/Shop/Basket.g.cs",
            "EqualityGenerator/Shop/Product.g.cs",
            "ImmutableGenerator/Shop/Basket.g.cs",
            "ImmutableGenerator/Shop/Product.g.cs",
            "LifecycleGenerator/Shop/Session.g.cs",
        ]
    );
}

#[test]
fn mutable_member_is_embedded_where_it_is_declared() {
    let compilation = load_model(&fixture("shop.json")).unwrap();
    let output = generate(&compilation).unwrap();

    let basket = output.artifact("ImmutableGenerator/Shop/Basket.g.cs").unwrap();
    let codes: Vec<ErrorCode> = basket.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::K2006]);
    let location = basket.diagnostics[0].location.as_ref().unwrap();
    assert_eq!(location.to_string(), "Shop/Basket.cs(9)");
    assert!(basket
        .text
        .contains("#error ImmutableGenerator/Shop.Basket: Property Shop.Basket.Items type List<Product> is not immutable."));

    let product = output.artifact("ImmutableGenerator/Shop/Product.g.cs").unwrap();
    assert!(product.diagnostics.is_empty());
    assert!(!product.text.contains("Uno.Option"));
}

#[test]
fn lifecycle_unit_merges_constructor_parameters() {
    let compilation = load_model(&fixture("shop.json")).unwrap();
    let output = generate(&compilation).unwrap();
    let session = output.artifact("LifecycleGenerator/Shop/Session.g.cs").unwrap();

    assert!(session.text.contains("public partial class Session : global::System.IDisposable"));
    assert!(session.text.contains("private void Initialize(string user)"));
    assert!(session.text.contains("this.Open(user: user);"));
    assert!(session.text.contains("this.Close();"));
}

#[test]
fn write_then_check_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = options_for("shop.json", dir.path());

    let first = run_generate(&options).unwrap();
    assert_eq!(first.written, 5);
    assert_eq!(first.tally.errors, 1);
    let second = run_generate(&options).unwrap();
    assert_eq!(second.written, 0);

    options.check = true;
    let clean = run_generate(&options).unwrap();
    assert!(!clean.failed());

    let product = dir.path().join("ImmutableGenerator").join("Shop").join("Product.g.cs");
    fs::write(&product, "// edited by hand\n").unwrap();
    let session = dir.path().join("LifecycleGenerator").join("Shop").join("Session.g.cs");
    fs::remove_file(&session).unwrap();

    let drifted = run_generate(&options).unwrap();
    assert!(drifted.failed());
    assert_eq!(
        drifted.drift,
        vec![
            Drift::Changed("ImmutableGenerator/Shop/Product.g.cs".to_string()),
            Drift::Missing("LifecycleGenerator/Shop/Session.g.cs".to_string()),
        ]
    );
    assert_eq!(fs::read_to_string(&product).unwrap(), "// edited by hand\n");
}

#[test]
fn missing_core_library_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for("no_core_library.json", dir.path());
    let err = run_generate(&options).unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::K0001));
    assert_eq!(
        err.to_string(),
        "required well-known type `System.Object` is missing from the compilation"
    );
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn malformed_model_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.json");
    fs::write(&model, "{ \"types\": [ { \"name\": 3 } ] }").unwrap();
    let err = run_generate(&GenerateOptions::new(&model)).unwrap_err();
    assert!(matches!(err, DriverError::Model(_)));
    assert_eq!(err.code(), Some(ErrorCode::K0003));
}
