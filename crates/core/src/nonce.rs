//! Time-windowed anti-forgery tokens for state-changing form posts.
//!
//! A nonce is an HMAC-SHA256 over the current tick, the action name and the
//! user id, truncated to ten hex characters. A tick is half the configured
//! lifetime, and a nonce verifies during its own tick and the one after, so
//! a freshly rendered form stays valid for between half and a full lifetime.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::types::{DbId, Timestamp};

type HmacSha256 = Hmac<Sha256>;

/// Default nonce lifetime (one day).
pub const DEFAULT_NONCE_LIFETIME_SECS: i64 = 86_400;

/// Number of hex characters in a rendered nonce.
pub const NONCE_LENGTH: usize = 10;

/// How a submitted nonce compares to the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceVerdict {
    /// Generated during the current tick.
    Fresh,
    /// Generated during the previous tick.
    Aging,
    Invalid,
}

impl NonceVerdict {
    pub fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Creates and verifies nonces with a server-side secret.
#[derive(Clone)]
pub struct NonceSigner {
    secret: Vec<u8>,
    lifetime_secs: i64,
}

impl std::fmt::Debug for NonceSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceSigner")
            .field("secret", &"<redacted>")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish()
    }
}

impl NonceSigner {
    /// Build a signer. Lifetimes shorter than two seconds are raised to two
    /// so a tick is never zero.
    pub fn new(secret: impl Into<Vec<u8>>, lifetime_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_secs: lifetime_secs.max(2),
        }
    }

    /// Index of the half-lifetime window containing `now`.
    pub fn tick(&self, now: Timestamp) -> i64 {
        let half = self.lifetime_secs / 2;
        let secs = now.timestamp();
        secs.div_euclid(half) + i64::from(secs.rem_euclid(half) != 0)
    }

    /// Create the nonce for `action` on behalf of `user_id` (0 for anonymous).
    pub fn create(&self, action: &str, user_id: DbId, now: Timestamp) -> String {
        self.sign(self.tick(now), action, user_id)
    }

    /// Verify a submitted nonce.
    pub fn verify(&self, nonce: &str, action: &str, user_id: DbId, now: Timestamp) -> NonceVerdict {
        if nonce.len() != NONCE_LENGTH {
            return NonceVerdict::Invalid;
        }
        let tick = self.tick(now);
        if matches_nonce(nonce, &self.sign(tick, action, user_id)) {
            return NonceVerdict::Fresh;
        }
        if matches_nonce(nonce, &self.sign(tick - 1, action, user_id)) {
            return NonceVerdict::Aging;
        }
        NonceVerdict::Invalid
    }

    fn sign(&self, tick: i64, action: &str, user_id: DbId) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(format!("{tick}|{action}|{user_id}").as_bytes());
        let digest = hex::encode(mac.finalize().into_bytes());
        // Ten characters ending two before the end of the digest.
        let end = digest.len() - 2;
        digest[end - NONCE_LENGTH..end].to_string()
    }
}

fn matches_nonce(submitted: &str, expected: &str) -> bool {
    bool::from(submitted.as_bytes().ct_eq(expected.as_bytes()))
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}
