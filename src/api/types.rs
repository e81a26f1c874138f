//! Artwork catalog API response types.
//!
//! These types model the `GET /api/v1/artworks` listing of the public
//! artwork catalog.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One page of the artwork listing.
///
/// Returned by `GET /api/v1/artworks?page={n}&limit={size}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkPage {
    /// Pagination metadata reported by the server.
    ///
    /// Only logged; the pager uses the configured record total instead.
    #[serde(default)]
    pub pagination: Option<Pagination>,
    /// The artworks on this page.
    #[serde(default)]
    pub data: Vec<ArtworkRecord>,
}

/// Pagination block of a listing response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub current_page: u64,
}

/// A single artwork row.
///
/// Everything but `id` is an opaque display string. The catalog sends
/// `null` for missing text and integers for the dates; both are folded
/// into strings on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtworkRecord {
    /// Unique artwork identifier, used as the selection key.
    pub id: u64,
    #[serde(default, deserialize_with = "display_string")]
    pub title: String,
    #[serde(default, deserialize_with = "display_string")]
    pub place_of_origin: String,
    #[serde(default, deserialize_with = "display_string")]
    pub artist_display: String,
    #[serde(default, deserialize_with = "display_string")]
    pub inscriptions: String,
    #[serde(default, deserialize_with = "display_string")]
    pub date_start: String,
    #[serde(default, deserialize_with = "display_string")]
    pub date_end: String,
}

impl ArtworkRecord {
    /// Public web page for this artwork.
    pub fn web_url(&self) -> String {
        format!("https://www.artic.edu/artworks/{}", self.id)
    }
}

impl fmt::Display for ArtworkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.title)
    }
}

/// Accept a string, number, bool or null and render it for display.
fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn test_record(id: u64) -> ArtworkRecord {
    ArtworkRecord {
        id,
        title: format!("Artwork {}", id),
        place_of_origin: "Chicago".to_string(),
        artist_display: "Unknown".to_string(),
        inscriptions: String::new(),
        date_start: "1900".to_string(),
        date_end: "1901".to_string(),
    }
}
