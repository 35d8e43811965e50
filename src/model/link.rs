use crate::model::Meta;
use std::collections::HashMap;
use std::str::FromStr;

pub type Links = HashMap<String, Link>;

/// A single `links` member: either a bare URI string, or an object carrying
/// `href` and optional `meta`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Link {
    #[serde(with = "http_serde::uri")]
    Raw(http::Uri),
    Object {
        #[serde(with = "http_serde::uri")]
        href: http::Uri,
        #[serde(skip_serializing_if = "HashMap::is_empty")]
        #[serde(default)]
        meta: Meta,
    },
}

impl FromStr for Link {
    type Err = http::uri::InvalidUri;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Link::Raw(s.parse()?)) }
}

impl From<http::Uri> for Link {
    fn from(uri: http::Uri) -> Self { Link::Raw(uri) }
}

impl Link {
    pub fn uri(&self) -> &http::Uri {
        match self {
            Link::Raw(uri) => uri,
            Link::Object { href, .. } => href,
        }
    }
}
