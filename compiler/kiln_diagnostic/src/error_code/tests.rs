use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::K1001.to_string(), "K1001");
    assert_eq!(ErrorCode::K2004.as_str(), "K2004");
}

#[test]
fn test_phase_predicates() {
    assert!(ErrorCode::K0002.is_model_error());
    assert!(ErrorCode::K1007.is_equality_error());
    assert!(ErrorCode::K2007.is_immutable_error());
    assert!(ErrorCode::K3002.is_lifecycle_error());

    assert!(!ErrorCode::K2001.is_equality_error());
    assert!(!ErrorCode::K1001.is_immutable_error());
    assert!(!ErrorCode::K3001.is_model_error());
}

#[test]
fn test_predicate_exclusivity() {
    for code in ErrorCode::ALL {
        let matches = [
            code.is_model_error(),
            code.is_equality_error(),
            code.is_immutable_error(),
            code.is_lifecycle_error(),
        ]
        .into_iter()
        .filter(|&m| m)
        .count();
        assert_eq!(matches, 1, "{code} matched {matches} phase predicates");
    }
}

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        let digit = code.as_str().chars().nth(1);
        let expected = match digit {
            Some('0') => code.is_model_error(),
            Some('1') => code.is_equality_error(),
            Some('2') => code.is_immutable_error(),
            Some('3') => code.is_lifecycle_error(),
            _ => false,
        };
        assert!(expected, "{code} is not classified by its phase digit");
        assert!(!code.summary().is_empty());
    }
}

#[test]
fn test_from_str_round_trips_all() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("k2006".parse::<ErrorCode>(), Ok(ErrorCode::K2006));
    assert!("E2001".parse::<ErrorCode>().is_err());
}
