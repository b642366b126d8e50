//! Domain entities representing core business objects.

pub mod pending_code;


pub use pending_code::{PendingCode, CODE_LENGTH};
