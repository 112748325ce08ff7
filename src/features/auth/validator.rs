use super::jwks::JwksClient;
use super::model::{AccessClaims, AuthenticatedUser};
use crate::core::error::AppError;
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Validation};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Turns a bearer token into the caller's identity.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError>;
}

/// Verifies provider-issued access tokens against the provider's JWKS
pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        let verification_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        // The key decides the algorithm; never trust the header alone
        if header.alg != verification_key.algorithm {
            return Err(AppError::Auth(format!(
                "Unexpected algorithm {:?} for key {}",
                header.alg, kid
            )));
        }

        let mut validation = Validation::new(verification_key.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<AccessClaims>(token, &verification_key.key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        claims_to_user(token_data.claims)
    }
}

fn claims_to_user(claims: AccessClaims) -> Result<AuthenticatedUser, AppError> {
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Auth("Token subject is not a valid user id".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        email: claims.email,
        role: claims.role,
    })
}

#[async_trait]
impl TokenVerifier for JwtValidator {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        self.validate_token(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> AccessClaims {
        serde_json::from_value(serde_json::json!({
            "sub": sub,
            "email": "dp@example.com",
            "role": "authenticated",
            "exp": 4_102_444_800u64
        }))
        .unwrap()
    }

    #[test]
    fn test_claims_to_user_parses_subject() {
        let id = Uuid::new_v4();
        let user = claims_to_user(claims(&id.to_string())).unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.email.as_deref(), Some("dp@example.com"));
        assert_eq!(user.role.as_deref(), Some("authenticated"));
    }

    #[test]
    fn test_claims_to_user_rejects_non_uuid_subject() {
        let err = claims_to_user(claims("service-account")).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }
}
