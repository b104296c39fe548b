use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Dietitian,
    Admin,
    Superadmin,
}

impl Role {
    /// Dietitians and above may read records of the customers they manage.
    pub fn is_staff(self) -> bool {
        !matches!(self, Role::Customer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    #[serde(default)]
    pub role: Role,
}

pub(crate) fn decode_claims(
    token: &str,
    cfg: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_audience(std::slice::from_ref(&cfg.audience));
    validation.set_issuer(std::slice::from_ref(&cfg.issuer));
    let decoding = DecodingKey::from_secret(cfg.secret.as_bytes());
    decode::<Claims>(token, &decoding, &validation).map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use time::OffsetDateTime;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
        }
    }

    fn sign(claims: &Claims, cfg: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .expect("sign")
    }

    fn valid_claims(cfg: &JwtConfig, role: Role) -> Claims {
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        Claims {
            sub: Uuid::new_v4(),
            iat: now,
            exp: now + 600,
            iss: cfg.issuer.clone(),
            aud: cfg.audience.clone(),
            role,
        }
    }

    #[test]
    fn decode_roundtrip() {
        let cfg = test_config();
        let claims = valid_claims(&cfg, Role::Dietitian);
        let token = sign(&claims, &cfg);
        let decoded = decode_claims(&token, &cfg).expect("decode");
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.role, Role::Dietitian);
    }

    #[test]
    fn decode_rejects_wrong_audience() {
        let cfg = test_config();
        let mut other = test_config();
        other.audience = "someone-else".into();
        let token = sign(&valid_claims(&other, Role::Customer), &other);
        assert!(decode_claims(&token, &cfg).is_err());
    }

    #[test]
    fn role_defaults_to_customer_when_claim_absent() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": Uuid::new_v4(),
            "iat": 0,
            "exp": 4_102_444_800u64,
            "iss": "vitatrack",
            "aud": "vitatrack-users",
        }))
        .expect("claims without role should deserialize");
        assert_eq!(claims.role, Role::Customer);
    }

    #[test]
    fn staff_roles() {
        assert!(!Role::Customer.is_staff());
        assert!(Role::Dietitian.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(Role::Superadmin.is_staff());
    }
}
