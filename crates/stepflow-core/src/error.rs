use thiserror::Error;

/// Core error type for the Stepflow engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Step index outside the flow's step range
    #[error("Step {step} out of range (flow has {total} steps)")]
    StepOutOfRange {
        /// The requested step index
        step: u32,
        /// Total number of steps in the flow
        total: u32,
    },

    /// A navigation request that violates the transition rules
    #[error("Illegal transition: {0}")]
    IllegalTransition(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Requested point redemption exceeds its cap
    #[error("Over-redemption: requested {requested} points, cap is {cap}")]
    OverRedemption {
        /// Points the customer asked to redeem
        requested: i64,
        /// Maximum redeemable points (the pre-tax subtotal)
        cap: i64,
    },

    /// Payment registration exceeding the remaining balance
    #[error("Over-payment: amount {amount} exceeds remaining balance {remaining}")]
    OverPayment {
        /// Amount of the rejected registration
        amount: i64,
        /// Remaining balance at the time of registration
        remaining: i64,
    },

    /// Referenced entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        FlowError::SerializationError(err.to_string())
    }
}

impl From<String> for FlowError {
    fn from(err: String) -> Self {
        FlowError::Other(err)
    }
}

impl From<&str> for FlowError {
    fn from(err: &str) -> Self {
        FlowError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            (
                FlowError::StepOutOfRange { step: 7, total: 4 },
                "Step 7 out of range (flow has 4 steps)",
            ),
            (
                FlowError::IllegalTransition("jump past gate".to_string()),
                "Illegal transition: jump past gate",
            ),
            (
                FlowError::ValidationError("missing phone".to_string()),
                "Validation error: missing phone",
            ),
            (
                FlowError::OverRedemption { requested: 150_000, cap: 100_000 },
                "Over-redemption: requested 150000 points, cap is 100000",
            ),
            (
                FlowError::OverPayment { amount: 50_000, remaining: 43_900 },
                "Over-payment: amount 50000 exceeds remaining balance 43900",
            ),
            (FlowError::NotFound("order-1".to_string()), "Not found: order-1"),
            (
                FlowError::SerializationError("bad json".to_string()),
                "Serialization error: bad json",
            ),
            (
                FlowError::RepositoryError("poisoned".to_string()),
                "Repository error: poisoned",
            ),
            (FlowError::Other("other_err".to_string()), "other_err"),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: FlowError = json_error.into();

        match error {
            FlowError::SerializationError(msg) => {
                assert!(msg.contains("expected value"));
            }
            _ => panic!("Expected SerializationError variant"),
        }
    }

    #[test]
    fn test_from_string() {
        let error: FlowError = "test error message".to_string().into();

        match error {
            FlowError::Other(msg) => assert_eq!(msg, "test error message"),
            _ => panic!("Expected Other variant"),
        }
    }

    #[test]
    fn test_from_str() {
        let error: FlowError = "test error message".into();

        match error {
            FlowError::Other(msg) => assert_eq!(msg, "test error message"),
            _ => panic!("Expected Other variant"),
        }
    }

    #[test]
    fn test_error_clone_and_eq() {
        let original = FlowError::ValidationError("test".to_string());
        let cloned = original.clone();

        assert_eq!(original, cloned);
        assert_eq!(format!("{:?}", original), format!("{:?}", cloned));
    }
}
