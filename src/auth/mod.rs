//! Token verification only. Token issuance, registration and password reset
//! live in the identity service; this backend trusts its signatures.

mod claims;
pub(crate) mod extractors;

pub use claims::{Claims, Role};
pub use extractors::{AuthStaff, AuthUser};
