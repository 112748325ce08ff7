mod jwks;
mod validator;

pub mod model;
pub mod session;

pub use jwks::JwksClient;
pub use validator::{JwtValidator, TokenVerifier};
