use super::*;
use kiln_diagnostic::{ErrorCode, Generator};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn nested_blocks_indent_four_spaces() {
    let mut w = CodeWriter::new();
    w.namespace("Ns", |w| {
        w.block("partial class A", |w| {
            w.line("private int _x;");
            w.blank();
            w.block_closed_by("private static readonly int[] Values = new[]", "};", |w| {
                w.line("1,");
            });
        });
    });
    assert_eq!(
        w.finish(),
        "namespace Ns\n\
         {\n\
         \x20   partial class A\n\
         \x20   {\n\
         \x20       private int _x;\n\
         \n\
         \x20       private static readonly int[] Values = new[]\n\
         \x20       {\n\
         \x20           1,\n\
         \x20       };\n\
         \x20   }\n\
         }\n"
    );
}

#[test]
fn global_namespace_has_no_block() {
    let mut w = CodeWriter::new();
    w.namespace("", |w| w.line("class A {}"));
    assert_eq!(w.finish(), "class A {}\n");
}

#[test]
fn region_and_diagnostics() {
    let mut w = CodeWriter::new();
    w.indent();
    w.region("\"Hash\"", |w| {
        let diag = Diagnostic::warning(ErrorCode::K1005)
            .with_message("no members")
            .in_scope(Generator::Equality, "A");
        w.diagnostic(&diag);
    });
    assert_eq!(
        w.finish(),
        "    #region \"Hash\"\n    #warning EqualityGenerator/A: no members\n    #endregion\n"
    );
}

#[test]
fn dedent_saturates() {
    let mut w = CodeWriter::new();
    w.dedent();
    w.line("x");
    w.indent();
    w.line("y");
    assert_eq!(w.finish(), "x\n    y\n");
}

#[test]
fn finish_trims_trailing_blank_lines() {
    let mut w = CodeWriter::new();
    w.line("x");
    w.blank();
    w.blank();
    assert_eq!(w.finish(), "x\n");
    assert_eq!(CodeWriter::new().finish(), "\n");
}

proptest! {
    #[test]
    fn no_trailing_whitespace(lines in prop::collection::vec("[a-z ]{0,12}", 0..20), depth in 0usize..4) {
        let mut w = CodeWriter::new();
        for _ in 0..depth {
            w.indent();
        }
        for line in &lines {
            w.line(line.trim_end());
        }
        let text = w.finish();
        prop_assert!(text.ends_with('\n'));
        prop_assert!(!text.ends_with("\n\n") || text == "\n");
        for line in text.lines() {
            prop_assert_eq!(line.trim_end(), line);
        }
    }
}
