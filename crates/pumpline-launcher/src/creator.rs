//! Token creator trait.
//!
//! Trait-based so orchestration can be tested without touching the network.
//! Methods return boxed futures to keep the trait dyn-compatible.

use crate::error::{LaunchError, LaunchResult};
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Creates a token and yields its mint address.
pub trait TokenCreator: Send + Sync {
    fn create_token(&self) -> BoxFuture<'_, LaunchResult<String>>;
}

/// Arc wrapper for TokenCreator trait objects.
pub type DynTokenCreator = Arc<dyn TokenCreator>;

/// Mock token creator for testing.
pub struct MockTokenCreator {
    result: parking_lot::Mutex<LaunchResult<String>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockTokenCreator {
    /// Create a mock that yields the given mint address.
    pub fn with_mint(mint: impl Into<String>) -> Self {
        Self {
            result: parking_lot::Mutex::new(Ok(mint.into())),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a mock that fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: parking_lot::Mutex::new(Err(LaunchError::Rejected(message.into()))),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Number of times `create_token` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl TokenCreator for MockTokenCreator {
    fn create_token(&self) -> BoxFuture<'_, LaunchResult<String>> {
        Box::pin(async move {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            match &*self.result.lock() {
                Ok(mint) => Ok(mint.clone()),
                Err(LaunchError::Rejected(msg)) => Err(LaunchError::Rejected(msg.clone())),
                Err(e) => Err(LaunchError::HttpClient(e.to_string())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_yields_configured_mint() {
        let creator = MockTokenCreator::with_mint("MINT_ADDRESS");
        let mint = creator.create_token().await.unwrap();
        assert_eq!(mint, "MINT_ADDRESS");
        assert_eq!(creator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let creator = MockTokenCreator::failing("insufficient balance");
        let result = creator.create_token().await;
        assert!(matches!(result, Err(LaunchError::Rejected(_))));
    }
}
