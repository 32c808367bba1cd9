use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one member profile, either by the handle from its public URL
/// (`/in/<handle>/`) or by the opaque id taken from its URN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileIdentifier {
    PublicId(String),
    Urn(String),
}

impl ProfileIdentifier {
    pub fn as_str(&self) -> &str {
        match self {
            ProfileIdentifier::PublicId(id) | ProfileIdentifier::Urn(id) => id,
        }
    }

    /// Extracts the handle from a profile URL such as
    /// `https://www.linkedin.com/in/jane-doe/`.
    ///
    /// The handle is taken positionally: it is the fifth `/`-separated segment.
    pub fn from_profile_url(url: &str) -> ProfileUrl {
        let url = url.trim();
        if url.is_empty() {
            return ProfileUrl::Missing;
        }

        match url.split('/').nth(4) {
            Some("") => ProfileUrl::Missing,
            Some(handle) => ProfileUrl::Found(ProfileIdentifier::PublicId(handle.to_string())),
            None => ProfileUrl::Malformed,
        }
    }
}

/// Outcome of reading a handle out of a profile URL cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUrl {
    Found(ProfileIdentifier),
    /// Blank cell, or a URL with an empty handle segment.
    Missing,
    /// Too few path segments to contain a handle.
    Malformed,
}

impl fmt::Display for ProfileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
