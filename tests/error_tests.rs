//! Error handling module unit tests

use smarttravel_client::utils::error::*;
use std::error::Error as _;

fn http(status_code: u16, status_text: &str) -> ClientError {
    ClientError::Http {
        status_code,
        status_text: status_text.to_string(),
    }
}

#[test]
fn test_error_display() {
    let test_cases = vec![
        (ClientError::ConcurrentRequest, "Another request is already in progress"),
        (http(404, "Not Found"), "HTTP 404: Not Found"),
        (
            ClientError::Remote { message: "Model overloaded".to_string() },
            "Model overloaded",
        ),
        (ClientError::MalformedResponse, "Invalid response format from server"),
        (
            ClientError::Geocode("no match for 'Atlantis'".to_string()),
            "Geocode failed: no match for 'Atlantis'",
        ),
    ];

    for (error, expected) in test_cases {
        assert_eq!(error.to_string(), expected);
    }
}

#[test]
fn test_error_types() {
    let test_cases = vec![
        (ClientError::ConcurrentRequest, "concurrent_request_error"),
        (http(500, "Internal Server Error"), "http_error"),
        (ClientError::Remote { message: "x".to_string() }, "remote_error"),
        (ClientError::MalformedResponse, "malformed_response_error"),
        (ClientError::Geocode("x".to_string()), "geocode_error"),
        (
            ClientError::Remote { message: "x".to_string() }.with_context("Failed to book ride"),
            "remote_error",
        ),
    ];

    for (error, expected_type) in test_cases {
        assert_eq!(error.error_type(), expected_type);
    }
}

#[test]
fn test_serialization_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();
    let err: ClientError = json_error.into();
    assert_eq!(err.error_type(), "serialization_error");
    assert!(err.to_string().starts_with("Serialization error: "));
}

#[test]
fn test_retryable_classification() {
    assert!(ClientError::ConcurrentRequest.is_retryable());
    assert!(http(429, "Too Many Requests").is_retryable());
    assert!(http(503, "Service Unavailable").is_retryable());
    assert!(http(503, "Service Unavailable").with_context("Failed to chat with AI").is_retryable());

    assert!(!http(400, "Bad Request").is_retryable());
    assert!(!ClientError::MalformedResponse.is_retryable());
    assert!(!ClientError::Remote { message: "x".to_string() }.is_retryable());
}

#[test]
fn test_operation_context_chain() {
    let result: Result<(), ClientError> = Err(ClientError::Remote {
        message: "Insufficient wallet balance".to_string(),
    });

    let err = result.operation_context("Failed to book ride").unwrap_err();

    assert_eq!(err.to_string(), "Failed to book ride: Insufficient wallet balance");
    let source = err.source().expect("wrapped cause");
    assert_eq!(source.to_string(), "Insufficient wallet balance");
    assert!(matches!(err.root_cause(), ClientError::Remote { .. }));
}

#[test]
fn test_unwrapped_errors_are_their_own_root() {
    let err = ClientError::ConcurrentRequest;
    assert!(matches!(err.root_cause(), ClientError::ConcurrentRequest));
    assert!(!err.should_log_details());
    assert!(http(500, "Internal Server Error").should_log_details());
}
