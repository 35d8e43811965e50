#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;

use crate::error::BurrowError;

pub type BurrowResult<T> = std::result::Result<T, BurrowError>;
pub const JSON_API_HEADER: &str = "application/vnd.api+json";

pub mod error;
pub mod inflect;
pub mod model;
pub mod normalize;
pub mod serialize;

pub use crate::inflect::{pluralize, to_case, CaseKind, Inflect, Policy};
pub use crate::normalize::{deserialize, Linkage, Node, NodeKey, NormalizedGraph, Primary};
pub use crate::serialize::{serialize, Operation, Payload};
