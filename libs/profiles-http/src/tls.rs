//! TLS utilities for the HTTP client.

use std::sync::Arc;

/// Get the crypto provider for TLS connections.
///
/// Uses the process-wide default provider when one is installed, otherwise
/// creates an aws-lc-rs provider without installing it globally.
pub fn crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}
