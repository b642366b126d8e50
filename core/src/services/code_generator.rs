//! Verification code generation

use rand::{rngs::OsRng, Rng};

use crate::domain::entities::CODE_LENGTH;

/// Exclusive upper bound of generated codes (10^CODE_LENGTH)
const CODE_SPACE: u32 = 100_000;

/// Produces fixed-width numeric verification codes
pub trait CodeGenerator: Send + Sync {
    /// Generate a new code
    fn generate(&self) -> String;
}

/// Generator backed by the operating system CSPRNG
///
/// Codes are drawn uniformly from `[0, 100000)` and zero-padded to
/// `CODE_LENGTH` digits. Range sampling avoids the modulo bias of reducing a
/// raw random word.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl SecureCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        let value: u32 = OsRng.gen_range(0..CODE_SPACE);
        format!("{:0width$}", value, width = CODE_LENGTH)
    }
}
