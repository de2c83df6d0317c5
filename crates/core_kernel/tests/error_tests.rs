//! Tests for core_kernel error types

use chrono::NaiveDate;
use core_kernel::error::CoreError;
use core_kernel::temporal::{StayPeriod, TemporalError};

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_invalid_state() {
    let error = CoreError::invalid_state("Cannot transition from checked_out to pending");

    match error {
        CoreError::InvalidStateTransition(msg) => assert!(msg.contains("Cannot transition")),
        _ => panic!("Expected InvalidStateTransition error"),
    }
}

#[test]
fn test_core_error_not_found() {
    let error = CoreError::not_found("Reservation not found");

    match error {
        CoreError::NotFound(msg) => assert!(msg.contains("Reservation")),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_temporal_error_converts_to_core_error() {
    let check_in = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let check_out = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    let temporal: TemporalError = StayPeriod::new(check_in, check_out).unwrap_err();
    let core: CoreError = temporal.into();

    assert!(matches!(core, CoreError::Temporal(_)));
    assert!(core.to_string().contains("precedes check-in"));
}
