//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Front-matter parse failure
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unterminated front-matter header")]
    Unterminated,
    #[error("invalid front-matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter metadata from a property listing file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "propertyType")]
    pub property_type: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "yearAcquired")]
    pub year_acquired: Option<String>,
    #[serde(rename = "featuredImage")]
    pub featured_image: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub gallery: Vec<String>,
    pub units: Option<u64>,
    #[serde(rename = "squareFootage")]
    pub square_footage: Option<f64>,
    /// Lexically comparable date string, used only for ordering
    pub date: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from a listing file's content.
    /// Returns (front_matter, body).
    ///
    /// A file without a leading `---` header is all body with empty metadata.
    /// An opening `---` without a closing one, or a header that is not valid
    /// YAML, is a parse error; the loader collapses it to "no record".
    pub fn parse(content: &str) -> Result<(Self, &str), ParseError> {
        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return Err(ParseError::Unterminated);
        };
        let yaml_content = &rest[..end_pos];
        let body = &rest[end_pos + 4..];
        let body = body.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, body))
    }
}
