// ABOUTME: Structured error types for health data provider operations
// ABOUTME: ProviderError covers availability, authorization, query, and channel failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

//! # Provider Error Types
//!
//! Structured errors for provider operations. During an export these are
//! isolated per category: the orchestrator records them in the run outcome
//! and continues with the remaining categories.

use crate::models::Category;

/// Errors reported by a health data provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The provider's data store is not available on this system
    #[error("Provider '{provider}' is not available on this system")]
    Unavailable {
        /// Name of the provider
        provider: String,
    },

    /// The authorization request failed before the user could answer
    #[error("Authorization request to provider '{provider}' failed: {message}")]
    AuthorizationFailed {
        /// Name of the provider
        provider: String,
        /// Provider-reported failure detail
        message: String,
    },

    /// A page query failed inside the provider
    #[error("Provider '{provider}' query for {category} failed: {message}")]
    QueryFailed {
        /// Name of the provider
        provider: String,
        /// Category being read when the query failed
        category: Category,
        /// Provider-reported failure detail
        message: String,
    },

    /// The provider dropped its reply channel without answering
    #[error("Provider '{provider}' disconnected while reading {category}")]
    Disconnected {
        /// Name of the provider
        provider: String,
        /// Category being read when the channel closed
        category: Category,
    },
}

impl ProviderError {
    /// Create an "unavailable" error
    #[must_use]
    pub fn unavailable(provider: impl Into<String>) -> Self {
        Self::Unavailable {
            provider: provider.into(),
        }
    }

    /// Create an "authorization failed" error
    #[must_use]
    pub fn authorization_failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AuthorizationFailed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a "query failed" error
    #[must_use]
    pub fn query_failed(
        provider: impl Into<String>,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Self::QueryFailed {
            provider: provider.into(),
            category,
            message: message.into(),
        }
    }

    /// Create a "disconnected" error
    #[must_use]
    pub fn disconnected(provider: impl Into<String>, category: Category) -> Self {
        Self::Disconnected {
            provider: provider.into(),
            category,
        }
    }
}
