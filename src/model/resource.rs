use crate::model::link::Links;
use crate::model::relationship::Relationships;
use crate::model::{Id, Meta};
use serde_json::Value;
use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

pub type ResourceIdentifiers = Vec<ResourceIdentifier>;
pub type Resources = Vec<Resource>;

lazy_static! {
    static ref RESERVED_FIELDS: HashSet<&'static str> =
        HashSet::from_iter(vec!["relationships", "links", "type", "id"]);
}

/// The `attributes` member of a resource object. Reserved member names are
/// stripped on construction so they can never shadow the resource-level
/// fields.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Attributes(HashMap<String, Value>);

impl From<HashMap<String, Value>> for Attributes {
    fn from(mut map: HashMap<String, Value>) -> Self {
        for &f in &RESERVED_FIELDS as &HashSet<&str> {
            map.remove(f);
        }
        Self(map)
    }
}

impl Attributes {
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> { self.0.iter() }

    pub fn into_inner(self) -> HashMap<String, Value> { self.0 }
}

/// Linkage data of a relationship: a to-one identifier (possibly null) or an
/// ordered to-many list.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(untagged)]
pub enum IdentifierData {
    Single(Option<ResourceIdentifier>),
    Multiple(ResourceIdentifiers),
}

impl IdentifierData {
    pub fn data(&self) -> Vec<ResourceIdentifier> {
        match self {
            IdentifierData::Single(Some(data)) => vec![data.clone()],
            IdentifierData::Single(None) => Default::default(),
            IdentifierData::Multiple(data) => data.clone(),
        }
    }
}

impl Default for IdentifierData {
    fn default() -> Self { IdentifierData::Single(None) }
}

/// Resource Identifier: the (type, id) pair naming a resource.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub ty: String,
    pub id: Id,
}

/// JSON:API Resource Object.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Resource {
    #[serde(rename = "type")]
    pub ty: String,
    pub id: Id,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub relationships: Relationships,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub links: Links,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub meta: Meta,
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool { self.ty == other.ty && self.id == other.id }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
        self.id.hash(state);
    }
}

impl Resource {
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier { ty: self.ty.clone(), id: self.id.clone() }
    }
}
