//! Token issuance and validation core.

pub mod claims;
pub mod context;
pub mod failure;
pub mod identity;
pub mod jwt;
pub mod login;

pub use claims::{ClaimSet, Token};
pub use context::AuthContext;
pub use failure::AuthError;
pub use identity::{FnResolver, Identity, IdentityResolver};
pub use jwt::ClaimsCodec;
pub use login::{Credentials, IssuedToken, LoginFlow};
