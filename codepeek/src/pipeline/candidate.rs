//! Candidate links discovered on a results page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::errors::{CodepeekError, Result};
use crate::fetch::strip_fragment;

/// An outbound link worth previewing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateLink {
    absolute_url: String,
    normalized_url: String,
}

impl CandidateLink {
    /// Validates an absolute http(s) URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let parsed = Url::parse(raw).map_err(|e| CodepeekError::invalid_url(raw, e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CodepeekError::invalid_url(
                raw,
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        if parsed.host_str().is_none() {
            return Err(CodepeekError::invalid_url(raw, "missing host"));
        }

        Ok(Self {
            absolute_url: raw.to_string(),
            normalized_url: strip_fragment(raw).to_string(),
        })
    }

    /// The link as found.
    #[must_use]
    pub fn absolute_url(&self) -> &str {
        &self.absolute_url
    }

    /// The link without text fragment or anchor; the dedup key.
    #[must_use]
    pub fn normalized_url(&self) -> &str {
        &self.normalized_url
    }
}

impl FromStr for CandidateLink {
    type Err = CodepeekError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CandidateLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized_url)
    }
}
