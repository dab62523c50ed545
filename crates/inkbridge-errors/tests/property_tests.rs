//! Property-based tests for error classification and context preservation.

use inkbridge_errors::{
    ConfigError, DecodeError, ErrorCategory, ErrorContext, ErrorSeverity, InkBridgeError,
    ResultExt, SampleError,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_error_severity_ordering(a in 0u8..=3, b in 0u8..=3) {
        let to_sev = |v: u8| match v {
            0 => ErrorSeverity::Info,
            1 => ErrorSeverity::Warning,
            2 => ErrorSeverity::Error,
            _ => ErrorSeverity::Critical,
        };
        prop_assert_eq!(a.cmp(&b), to_sev(a).cmp(&to_sev(b)));
    }

    #[test]
    fn test_short_report_errors_stay_recoverable(expected in 1usize..256, actual in 0usize..256) {
        let err: InkBridgeError = SampleError::from(DecodeError::too_short(expected, actual)).into();
        prop_assert_eq!(err.category(), ErrorCategory::Decode);
        prop_assert!(err.is_recoverable());
    }

    #[test]
    fn test_unrecognized_event_names_survive(kind in "[a-z]{1,24}") {
        let err = SampleError::unrecognized(kind.clone());
        prop_assert!(err.to_string().contains(&kind));
    }

    #[test]
    fn test_error_context_preserves_operation(operation in "[a-z_]{1,32}") {
        let ctx = ErrorContext::new(operation.clone());
        prop_assert!(ctx.to_string().contains(&operation));
    }

    #[test]
    fn test_with_context_keeps_inner_message(field in "[a-z.]{1,24}") {
        let result: Result<(), ConfigError> = Err(ConfigError::invalid(field.clone(), "bad"));
        match result.with_context("validate") {
            Ok(()) => prop_assert!(false, "context must not swallow the error"),
            Err(e) => {
                let msg = e.to_string();
                prop_assert!(msg.contains("validate"));
                prop_assert!(msg.contains(&field));
            }
        }
    }
}
