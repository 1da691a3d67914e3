//! The shared-secret gate in front of the interactive surface.

/// Compares attempts against the configured passphrase.
///
/// This is a convenience latch, not authentication: the passphrase ships
/// with the client configuration and is visible to anyone who inspects it.
/// Unlocking only decides when the startup data load begins.
#[derive(Clone, Debug)]
pub struct AccessGate {
    passphrase: String,
}

impl AccessGate {
    /// Creates a gate for the supplied passphrase.
    #[must_use]
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// Returns whether the attempt matches the passphrase exactly.
    #[must_use]
    pub fn unlock(&self, attempt: &str) -> bool {
        attempt == self.passphrase
    }
}
