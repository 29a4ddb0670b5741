//! Tests for the error system.

use websage::error::unified::*;
use websage::error::*;

#[test]
fn error_api_creation() {
    let err = ChatError::api(404, "Not found");
    assert!(matches!(&err, ChatError::Api { status: 404, .. }));
    assert_eq!(err.to_string(), "API error (status 404): Not found");
}

#[test]
fn error_helper_mappings_are_stable_for_major_variants() {
    struct Case {
        error: ChatError,
        expected_category: ErrorCategory,
        expected_retryable: bool,
    }

    let network_error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk");
    let serde_error = serde_json::from_str::<serde_json::Value>("{not-json}").unwrap_err();

    let cases = vec![
        Case {
            error: ChatError::Authentication("bad-key".to_string()),
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
        },
        Case {
            error: ChatError::RateLimited {
                retry_after_ms: Some(1000),
            },
            expected_category: ErrorCategory::RateLimit,
            expected_retryable: true,
        },
        Case {
            error: ChatError::Configuration("Missing GROQ_API_KEY".to_string()),
            expected_category: ErrorCategory::Configuration,
            expected_retryable: false,
        },
        Case {
            error: ChatError::ModelNotFound("acme:model".to_string()),
            expected_category: ErrorCategory::Configuration,
            expected_retryable: false,
        },
        Case {
            error: ChatError::Network(network_error),
            expected_category: ErrorCategory::Network,
            expected_retryable: true,
        },
        Case {
            error: ChatError::Serialization(serde_error),
            expected_category: ErrorCategory::Serialization,
            expected_retryable: false,
        },
        Case {
            error: ChatError::InvalidArgument("query must not be empty".to_string()),
            expected_category: ErrorCategory::InvalidInput,
            expected_retryable: false,
        },
        Case {
            error: ChatError::api(401, "Unauthorized"),
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
        },
        Case {
            error: ChatError::api(429, "Rate limited"),
            expected_category: ErrorCategory::RateLimit,
            expected_retryable: true,
        },
        Case {
            error: ChatError::api(503, "Server unavailable"),
            expected_category: ErrorCategory::Server,
            expected_retryable: true,
        },
        Case {
            error: ChatError::api(418, "Teapot"),
            expected_category: ErrorCategory::Api,
            expected_retryable: false,
        },
        Case {
            error: ChatError::Io(io_error),
            expected_category: ErrorCategory::Unknown,
            expected_retryable: false,
        },
    ];

    for case in cases {
        assert_eq!(case.error.category(), case.expected_category);
        assert_eq!(case.error.is_retryable(), case.expected_retryable);
    }
}

#[test]
fn io_errors_convert_with_question_mark() {
    fn read() -> Result<String> {
        Ok(std::fs::read_to_string("/definitely/not/here/websage.toml")?)
    }
    assert!(matches!(read(), Err(ChatError::Io(_))));
}
