//! Bearer token validation.

pub mod claims;
pub mod decoder;

pub use claims::IdentityClaims;
pub use decoder::JwtDecoder;
