/// An opaque password-reset token.
///
/// The value is a high-entropy random string generated by the reset-token
/// store; nothing outside the store should ever construct one except when
/// wrapping a token presented by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResetToken(String);

impl ResetToken {
    pub fn new(token: String) -> Self {
        ResetToken(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
