//! HS512 codec for session tokens

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, DecodedToken};
use crate::errors::TokenError;

/// Signs and verifies tokens with a single shared secret
///
/// Pure: no I/O and no clock other than the `exp` check performed by
/// `jsonwebtoken`.
#[derive(Clone)]
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Same checks minus `exp`, used to read hard-expired tokens
    expired_validation: Validation,
}

impl TokenCodec {
    pub const ALGORITHM: Algorithm = Algorithm::HS512;

    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;

        let mut expired_validation = validation.clone();
        expired_validation.validate_exp = false;

        Self {
            header: Header::new(Self::ALGORITHM),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expired_validation,
        }
    }

    /// Encodes claims into a signed token
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to encode token");
            TokenError::EncodingFailure {
                message: e.to_string(),
            }
        })
    }

    /// Verifies signature and hard expiration
    ///
    /// A correctly signed token past `exp` comes back as
    /// [`DecodedToken::Expired`] so its claims stay readable. Anything else
    /// that fails verification is [`TokenError::InvalidToken`].
    pub fn decode(&self, token: &str) -> Result<DecodedToken, TokenError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(DecodedToken::Valid(data.claims)),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                decode::<Claims>(token, &self.decoding_key, &self.expired_validation)
                    .map(|data| DecodedToken::Expired(data.claims))
                    .map_err(|e| {
                        tracing::warn!(error = %e, "Rejected expired token on re-read");
                        TokenError::InvalidToken
                    })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected malformed or forged token");
                Err(TokenError::InvalidToken)
            }
        }
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Self::ALGORITHM)
            .finish_non_exhaustive()
    }
}
