use crate::error::AppError;
use bcrypt::{hash, verify};

/// One-way password hashing used by `UserService`.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordEncoder: Send + Sync {
    /// Hashes a raw password for storage.
    fn encode(&self, raw: &str) -> Result<String, AppError>;

    /// Checks a raw password against a stored hash. A malformed hash never matches.
    fn matches(&self, raw: &str, hashed: &str) -> bool;
}

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, AppError> {
        Ok(hash(raw, self.cost)?)
    }

    fn matches(&self, raw: &str, hashed: &str) -> bool {
        match verify(raw, hashed) {
            Ok(matched) => matched,
            Err(e) => {
                log::warn!("Stored password hash could not be verified: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lowest cost bcrypt accepts, keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_hashing_and_verification() {
        let encoder = BcryptPasswordEncoder::new(TEST_COST);
        let password = "test_password123";
        let hashed = encoder.encode(password).unwrap();

        assert_ne!(hashed, password);
        assert!(encoder.matches(password, &hashed));
        assert!(!encoder.matches("wrong_password", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let encoder = BcryptPasswordEncoder::new(TEST_COST);
        let first = encoder.encode("password123").unwrap();
        let second = encoder.encode("password123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        let encoder = BcryptPasswordEncoder::new(TEST_COST);
        assert!(!encoder.matches("test_password123", "invalidhashformat"));
        assert!(!encoder.matches("password123", "$2a$10$encoded.password.hash"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        let encoder = BcryptPasswordEncoder::new(2);
        match encoder.encode("password123") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to hash password"))
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
