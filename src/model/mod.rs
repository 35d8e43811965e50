pub mod document;
pub mod error;
pub mod link;
pub mod relationship;
pub mod resource;

use serde_json::Value;
use std::collections::HashMap;

pub type Id = String;
pub type Meta = HashMap<String, Value>;
