use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

pub mod guard;
pub mod jwks;

pub use guard::{Authorized, Permission};

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: Option<String>,
    pub sub: Option<String>,
    pub aud: Option<Audience>,
    #[serde(default)]
    pub exp: i64,
    pub iat: Option<i64>,
    /// RBAC permissions, e.g. `["get:actors", "post:movies"]`
    pub permissions: Option<Vec<String>>,
    /// Space separated OAuth scopes, consulted when `permissions` is absent
    pub scope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Claims {
    /// Permission strings granted by this token, or `None` when the token
    /// carries no permissions section at all
    pub fn granted(&self) -> Option<Vec<&str>> {
        if let Some(permissions) = &self.permissions {
            return Some(permissions.iter().map(String::as_str).collect());
        }
        self.scope
            .as_ref()
            .map(|scope| scope.split_whitespace().collect())
    }
}

/// Authentication or authorization failure, carrying the status it maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub code: &'static str,
    pub description: String,
    pub status: u16,
}

impl AuthError {
    pub fn new(code: &'static str, description: impl Into<String>, status: u16) -> Self {
        Self {
            code,
            description: description.into(),
            status,
        }
    }

    fn invalid_header(description: &str) -> Self {
        Self::new("invalid_header", description, 401)
    }

    fn from_jwt(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::new("token_expired", "Token expired.", 401),
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::ImmatureSignature
            | ErrorKind::MissingRequiredClaim(_) => Self::new(
                "invalid_claims",
                "Incorrect claims. Please, check the audience and issuer.",
                401,
            ),
            ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                Self::new("invalid_claims", "Unable to parse authentication token claims.", 400)
            }
            ErrorKind::InvalidSignature => Self::invalid_header("Invalid token signature."),
            _ => Self::invalid_header("Unable to parse authentication token."),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.status, self.description)
    }
}

impl std::error::Error for AuthError {}

/// Keys that token signatures are verified against
#[derive(Clone)]
pub enum KeySet {
    /// Shared HS256 secret
    Shared(DecodingKey),
    /// Published RS256 keys, selected by the token's `kid`
    Published(JwkSet),
}

impl KeySet {
    pub fn shared_secret(secret: &str) -> Self {
        KeySet::Shared(DecodingKey::from_secret(secret.as_bytes()))
    }
}

/// Verifies bearer tokens and enforces per-route permissions
#[derive(Clone)]
pub struct TokenVerifier {
    keys: KeySet,
    issuer: Option<String>,
    audience: Option<String>,
}

impl TokenVerifier {
    pub fn new(keys: KeySet, issuer: Option<String>, audience: Option<String>) -> Self {
        Self {
            keys,
            issuer,
            audience,
        }
    }

    /// Full check for one request: header → token → verified claims → permission
    pub fn authorize(&self, header: Option<&str>, permission: &str) -> Result<Claims, AuthError> {
        let token = bearer_token(header)?;
        let claims = self.verify(token)?;
        check_permission(&claims, permission)?;
        Ok(claims)
    }

    /// Verify signature, expiry, issuer and audience, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)
            .map_err(|_| AuthError::invalid_header("Unable to parse authentication token."))?;

        let (key, algorithm) = match &self.keys {
            KeySet::Shared(key) => (key.clone(), Algorithm::HS256),
            KeySet::Published(set) => {
                let kid = header
                    .kid
                    .as_deref()
                    .ok_or_else(|| AuthError::invalid_header("Authorization malformed."))?;
                let jwk = set
                    .find(kid)
                    .ok_or_else(|| AuthError::invalid_header("Unable to find the appropriate key."))?;
                let key = DecodingKey::from_jwk(jwk)
                    .map_err(|_| AuthError::invalid_header("Unable to find the appropriate key."))?;
                (key, Algorithm::RS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::from_jwt)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or_else(|| {
        AuthError::new("authorization_header_missing", "Authorization header is expected.", 401)
    })?;

    let parts: Vec<&str> = header.split_whitespace().collect();
    match parts.as_slice() {
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
        )),
        [] | [_] => Err(AuthError::invalid_header("Token not found.")),
        [_, token] => Ok(token),
        _ => Err(AuthError::invalid_header("Authorization header must be bearer token.")),
    }
}

/// Require `permission` among the claims' granted permissions
pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let granted = claims.granted().ok_or_else(|| {
        AuthError::new("invalid_claims", "Permissions not included in JWT.", 403)
    })?;

    if !granted.contains(&permission) {
        return Err(AuthError::new("unauthorized", "Permission not found.", 403));
    }
    Ok(())
}
