use crate::error::BurrowError;
use crate::inflect::Inflect;
use crate::model::resource::{
    Attributes, IdentifierData, ResourceIdentifier, ResourceIdentifiers,
};
use crate::model::Id;
use crate::BurrowResult;
use itertools::{Either, Itertools};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;

/// The write operation a payload is being built for. `Create` maps to `POST`,
/// `Update` to `PATCH`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Operation {
    Create,
    Update,
}

/// Outbound relationship member: linkage only, never attributes.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct RelationshipData {
    pub data: IdentifierData,
}

/// Resource object of an outbound payload. `id` stays optional so a `create`
/// can leave it to the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewResource {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub relationships: HashMap<String, RelationshipData>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Payload {
    pub data: NewResource,
}

/// Builds a request payload from a plain body object. Members are partitioned
/// by shape: an object whose `type` and `id` are both strings, or a non-empty
/// array of such objects, is a relationship; everything else is an attribute.
pub fn serialize(
    ty: &str, body: &Value, operation: Operation, inflector: &dyn Inflect,
) -> BurrowResult<Payload> {
    let fields = match body.as_object() {
        Some(map) => map,
        None => return Err(BurrowError::BodyNotAnObject),
    };

    let id = fields.get("id").and_then(scalar_id);
    if operation == Operation::Update && id.is_none() {
        return Err(BurrowError::MissingUpdateId(ty.to_string()));
    }

    let (attributes, relationships): (HashMap<String, Value>, HashMap<String, RelationshipData>) =
        fields
            .iter()
            .filter(|(name, _)| name.as_str() != "id" && name.as_str() != "type")
            .partition_map(|(name, value)| match linkage_of(value, inflector) {
                Some(data) => Either::Right((name.clone(), RelationshipData { data })),
                None => Either::Left((name.clone(), value.clone())),
            });

    debug!(
        "serializing `{}` ({:?}): {} attribute(s), {} relationship(s)",
        ty,
        operation,
        attributes.len(),
        relationships.len()
    );

    Ok(Payload {
        data: NewResource {
            ty: type_of(ty, inflector),
            id,
            attributes: attributes.into(),
            relationships,
        },
    })
}

fn type_of(ty: &str, inflector: &dyn Inflect) -> String {
    inflector.plural(&inflector.type_name(ty))
}

fn scalar_id(value: &Value) -> Option<Id> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reduces a linked object to its bare identifier, dropping any attributes
/// the caller attached. The type-name policy applies to linkage types too.
fn identifier_of(value: &Value, inflector: &dyn Inflect) -> Option<ResourceIdentifier> {
    let map = value.as_object()?;
    let ty = map.get("type")?.as_str()?;
    let id = map.get("id")?.as_str()?;
    Some(ResourceIdentifier { ty: type_of(ty, inflector), id: id.to_string() })
}

fn linkage_of(value: &Value, inflector: &dyn Inflect) -> Option<IdentifierData> {
    match value {
        // An empty array has no identifier shape to sniff; it stays an attribute.
        Value::Array(items) if !items.is_empty() => {
            let idents: Option<ResourceIdentifiers> =
                items.iter().map(|item| identifier_of(item, inflector)).collect();
            idents.map(IdentifierData::Multiple)
        },
        _ => identifier_of(value, inflector).map(|ident| IdentifierData::Single(Some(ident))),
    }
}
