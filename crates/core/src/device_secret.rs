//! Device shared-secret validation.
//!
//! Every device sends a shared secret with each reading. The secret is opaque
//! to the intake path: it is handed verbatim to a [`SecretValidator`].

use std::collections::HashSet;

use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Request header carrying the device secret.
pub const DEVICE_SECRET_HEADER: &str = "x-device-shared-secret";

/// Detail reported when the secret is missing or rejected.
pub const INVALID_SECRET_MESSAGE: &str = "Device secret is not within the valid range.";

// ---------------------------------------------------------------------------
// Validator seam
// ---------------------------------------------------------------------------

/// Decides whether a device secret is acceptable.
///
/// Implementations must be cheap and synchronous; they are called once per
/// request on the handler's task.
pub trait SecretValidator: Send + Sync {
    fn validate_device_secret(&self, secret: &str) -> bool;
}

/// Validator backed by a fixed set of known secrets.
///
/// Only SHA-256 digests are retained; incoming secrets are hashed and looked
/// up by digest.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredSecretValidator {
    digests: HashSet<[u8; 32]>,
}

impl ConfiguredSecretValidator {
    pub fn new<I, S>(secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let digests = secrets
            .into_iter()
            .map(|s| digest(s.as_ref()))
            .collect();
        Self { digests }
    }

    /// Number of distinct secrets accepted.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

impl SecretValidator for ConfiguredSecretValidator {
    fn validate_device_secret(&self, secret: &str) -> bool {
        self.digests.contains(&digest(secret))
    }
}

fn digest(secret: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(secret.as_bytes()));
    out
}
