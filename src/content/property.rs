//! Property listing model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::FrontMatter;

/// A property listing loaded from a markdown file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// URL-safe identifier, always the file name minus its extension
    pub slug: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "propertyType", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "yearAcquired", skip_serializing_if = "Option::is_none")]
    pub year_acquired: Option<String>,

    #[serde(rename = "featuredImage", skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub gallery: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<u64>,

    #[serde(rename = "squareFootage", skip_serializing_if = "Option::is_none")]
    pub square_footage: Option<f64>,

    /// Lexically comparable date string, used only for ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Rendered HTML form of the markdown body
    #[serde(rename = "contentHtml")]
    pub content_html: String,

    /// Fixed-width plain-text preview of the raw body
    pub excerpt: String,

    /// Unrecognized front-matter keys, passed through verbatim
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Property {
    /// Assemble a listing from parsed front matter and derived fields.
    /// The computed slug always wins over a `slug:` key in the metadata.
    pub fn from_parts(
        slug: String,
        fm: FrontMatter,
        content_html: String,
        excerpt: String,
    ) -> Self {
        let mut extra = fm.extra;
        // Metadata must not shadow the computed fields
        extra.remove("slug");
        extra.remove("contentHtml");
        extra.remove("excerpt");

        Self {
            slug,
            title: fm.title,
            location: fm.location,
            address: fm.address,
            description: fm.description,
            property_type: fm.property_type,
            status: fm.status,
            year_acquired: fm.year_acquired,
            featured_image: fm.featured_image,
            gallery: fm.gallery,
            units: fm.units,
            square_footage: fm.square_footage,
            date: fm.date,
            content_html,
            excerpt,
            extra,
        }
    }
}
