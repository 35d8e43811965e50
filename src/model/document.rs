use crate::model::error::Errors;
use crate::model::link::Links;
use crate::model::resource::{Resource, Resources};
use crate::model::Meta;
use core::fmt;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The `included` member, in document order. Compound documents may repeat a
/// (type, id) pair; consumers resolving linkage treat the first occurrence as
/// authoritative.
pub type Included = Vec<Resource>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PrimaryDataItem {
    Single(Box<Resource>),
    Multiple(Resources),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentItem {
    PrimaryData(Option<(PrimaryDataItem, Included)>),
    Errors(Errors),
}

impl Default for DocumentItem {
    fn default() -> Self { DocumentItem::PrimaryData(None) }
}

/// The specification refers to this as a top-level `document`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub item: DocumentItem,
    pub links: Links,
    pub meta: Meta,
    pub jsonapi: Option<Value>,
}

impl Document {
    pub fn null(links: Links, meta: Meta) -> Self {
        Self { links, meta, ..Default::default() }
    }

    pub fn single_resource(resource: Resource, included: Included) -> Self {
        Self {
            item: DocumentItem::PrimaryData(Some((
                PrimaryDataItem::Single(Box::new(resource)),
                included,
            ))),
            ..Default::default()
        }
    }

    pub fn multiple_resources(resources: Resources, included: Included) -> Self {
        Self {
            item: DocumentItem::PrimaryData(Some((PrimaryDataItem::Multiple(resources), included))),
            ..Default::default()
        }
    }

    pub fn into_single(self) -> Result<(Box<Resource>, Included), Self> {
        if let DocumentItem::PrimaryData(Some((PrimaryDataItem::Single(resource), included))) =
            self.item
        {
            Ok((resource, included))
        } else {
            Err(self)
        }
    }

    pub fn into_multiple(self) -> Result<(Resources, Included), Self> {
        if let DocumentItem::PrimaryData(Some((PrimaryDataItem::Multiple(resources), included))) =
            self.item
        {
            Ok((resources, included))
        } else {
            Err(self)
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Document", 5)?;
        match self.item {
            DocumentItem::PrimaryData(Some((ref data, ref included))) => {
                state.serialize_field("data", data)?;
                if !included.is_empty() {
                    state.serialize_field("included", included)?;
                }
            },
            DocumentItem::Errors(ref errors) => {
                state.serialize_field("errors", errors)?;
            },
            _ => state.serialize_field("data", &Value::Null)?,
        }

        if !self.links.is_empty() {
            state.serialize_field("links", &self.links)?;
        }
        if !self.meta.is_empty() {
            state.serialize_field("meta", &self.meta)?;
        }
        if let Some(ref jsonapi) = self.jsonapi {
            state.serialize_field("jsonapi", jsonapi)?;
        }

        state.end()
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a JSON Object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut links = None;
        let mut meta = None;
        let mut jsonapi = None;
        let mut data = None;
        let mut data_seen = false;
        let mut included = None;
        let mut errors = None;

        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            match key.as_str() {
                "links" if links.is_none() => match serde_json::from_value::<Links>(value) {
                    Ok(new_data) => links = Some(new_data),
                    Err(err) => return Err(serde::de::Error::custom(err)),
                },
                "links" => return Err(serde::de::Error::duplicate_field("links")),
                "meta" if meta.is_none() => match serde_json::from_value::<Meta>(value) {
                    Ok(new_data) => meta = Some(new_data),
                    Err(err) => return Err(serde::de::Error::custom(err)),
                },
                "meta" => return Err(serde::de::Error::duplicate_field("meta")),
                "jsonapi" if jsonapi.is_none() => jsonapi = Some(value),
                "jsonapi" => return Err(serde::de::Error::duplicate_field("jsonapi")),
                "data" if !data_seen => {
                    data_seen = true;
                    match serde_json::from_value::<Option<PrimaryDataItem>>(value) {
                        Ok(new_data) => data = new_data,
                        Err(err) => return Err(serde::de::Error::custom(err)),
                    }
                },
                "data" => return Err(serde::de::Error::duplicate_field("data")),
                "included" if included.is_none() => {
                    match serde_json::from_value::<Included>(value) {
                        Ok(new_data) => included = Some(new_data),
                        Err(err) => return Err(serde::de::Error::custom(err)),
                    }
                },
                "included" => return Err(serde::de::Error::duplicate_field("included")),
                "errors" if errors.is_none() => match serde_json::from_value::<Errors>(value) {
                    Ok(new_data) => errors = Some(new_data),
                    Err(err) => return Err(serde::de::Error::custom(err)),
                },
                "errors" => return Err(serde::de::Error::duplicate_field("errors")),
                _ => {},
            }
        }

        // `data: null` still counts as a present `data` member: it may carry
        // `included`, and it still excludes `errors`.
        let item = match (data, included, errors) {
            (Some(data), Some(included), None) => DocumentItem::PrimaryData(Some((data, included))),
            (Some(data), None, None) => DocumentItem::PrimaryData(Some((data, Default::default()))),
            (None, None, Some(errors)) if !data_seen => DocumentItem::Errors(errors),
            (None, Some(_), None) if !data_seen => {
                return Err(serde::de::Error::custom(
                    "the `included` member cannot appear without `data`",
                ));
            },
            (None, _, None) => DocumentItem::PrimaryData(None),
            _ => {
                return Err(serde::de::Error::custom(
                    "the `data` and `errors` members cannot coexist in one document",
                ));
            },
        };

        Ok(Document {
            item,
            links: links.unwrap_or_default(),
            meta: meta.unwrap_or_default(),
            jsonapi,
        })
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}
