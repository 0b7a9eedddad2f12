use super::*;

#[test]
fn explains_known_codes_case_insensitively() {
    let doc = explain("k2006").unwrap();
    assert!(doc.starts_with("# K2006"));
}

#[test]
fn every_code_is_explained() {
    for code in ErrorCode::ALL {
        assert!(explain(code.as_str()).is_ok(), "{code} has no documentation");
    }
}

#[test]
fn unknown_code_is_a_usage_error() {
    let err = explain("E0001").unwrap_err();
    assert!(matches!(err, DriverError::Usage(_)));
    assert!(err.to_string().starts_with("unknown error code: E0001"));
}
