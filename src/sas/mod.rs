//! Shared Access Signature minting and caching.

pub mod signer;
pub mod token;
pub mod token_cache;

pub use signer::{HmacSha256Signer, Signer, SigningError, SigningKey};
pub use token::SasToken;
pub use token_cache::{SasTokenGenerator, SigningRequest};
