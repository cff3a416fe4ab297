// ABOUTME: Anchor-based pagination types for incremental sample queries
// ABOUTME: Provides opaque anchor encoding and the per-page sample envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use std::fmt::{self, Display, Formatter};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::models::RawSample;

/// Opaque pagination anchor marking a position in a provider's store.
///
/// Anchors are provider-defined: the pipeline only threads them from one
/// page reply into the next request. They live for a single reader
/// invocation and are never persisted across sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryAnchor(String);

impl QueryAnchor {
    /// Encode a provider-defined payload into an anchor
    #[must_use]
    pub fn encode(payload: &str) -> Self {
        let encoded = base64::Engine::encode(&URL_SAFE_NO_PAD, payload.as_bytes());
        Self(encoded)
    }

    /// Decode the provider-defined payload.
    ///
    /// Returns `None` if the anchor is malformed or not valid `UTF-8`.
    #[must_use]
    pub fn decode(&self) -> Option<String> {
        let decoded = base64::Engine::decode(&URL_SAFE_NO_PAD, &self.0).ok()?;
        String::from_utf8(decoded).ok()
    }

    /// Get the raw anchor string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create an anchor from a raw string (for deserialization)
    #[must_use]
    pub const fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Display for QueryAnchor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of samples delivered by a provider.
#[derive(Debug, Clone)]
pub struct SamplePage {
    /// The samples in this page, in provider delivery order
    pub samples: Vec<RawSample>,

    /// Anchor to pass into the next request for this category
    pub anchor: QueryAnchor,

    /// Whether more samples remain after this page
    pub has_more: bool,
}

impl SamplePage {
    /// Create a new sample page
    #[must_use]
    pub const fn new(samples: Vec<RawSample>, anchor: QueryAnchor, has_more: bool) -> Self {
        Self {
            samples,
            anchor,
            has_more,
        }
    }

    /// Create a final empty page positioned at `anchor`
    #[must_use]
    pub const fn empty(anchor: QueryAnchor) -> Self {
        Self {
            samples: Vec::new(),
            anchor,
            has_more: false,
        }
    }
}
