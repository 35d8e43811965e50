use crate::error::BurrowError;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::str::FromStr;

lazy_static! {
    static ref DELIMITER_BOUNDARY: Regex = Regex::new(r"[-_]([a-zA-Z0-9])").unwrap();
    static ref CASE_BOUNDARY: Regex = Regex::new(r"([a-z0-9])([A-Z])").unwrap();
}

/// Casing applied to resource type names. Attribute keys are never touched;
/// servers own the casing of their own field names.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CaseKind {
    Camel,
    Snake,
    Kebab,
    None,
}

impl Default for CaseKind {
    fn default() -> Self { CaseKind::None }
}

impl FromStr for CaseKind {
    type Err = BurrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camel" => Ok(CaseKind::Camel),
            "snake" => Ok(CaseKind::Snake),
            "kebab" => Ok(CaseKind::Kebab),
            "none" => Ok(CaseKind::None),
            _ => Err(BurrowError::InvalidCaseKind(s.into())),
        }
    }
}

/// `library-entry` / `library_entry` -> `libraryEntry`
pub fn camel(s: &str) -> String {
    DELIMITER_BOUNDARY.replace_all(s, |caps: &Captures| caps[1].to_uppercase()).into_owned()
}

/// `libraryEntry` -> `library_entry`
pub fn snake(s: &str) -> String {
    CASE_BOUNDARY.replace_all(s, "${1}_${2}").to_lowercase()
}

/// `libraryEntry` -> `library-entry`
pub fn kebab(s: &str) -> String {
    CASE_BOUNDARY.replace_all(s, "${1}-${2}").to_lowercase()
}

pub fn to_case(kind: CaseKind, s: &str) -> String {
    match kind {
        CaseKind::Camel => camel(s),
        CaseKind::Snake => snake(s),
        CaseKind::Kebab => kebab(s),
        CaseKind::None => s.to_string(),
    }
}

/// Exact-match override table first, default `s` suffix otherwise. No
/// pattern-based irregular plurals.
pub fn pluralize(name: &str, overrides: &HashMap<String, String>) -> String {
    match overrides.get(name) {
        Some(plural) => plural.clone(),
        None => format!("{}s", name),
    }
}

/// Type-name policy injected into the serializer. Implementations must be
/// pure; the engine may call them from any thread.
pub trait Inflect {
    fn type_name(&self, s: &str) -> String;
    fn plural(&self, s: &str) -> String;
}

/// The standard policy: an optional case transform plus the override-table
/// pluralization rule.
#[derive(Debug, Clone)]
pub struct Policy {
    pub type_case: CaseKind,
    pub pluralize: bool,
    pub rules: HashMap<String, String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self { type_case: CaseKind::None, pluralize: true, rules: Default::default() }
    }
}

impl Inflect for Policy {
    fn type_name(&self, s: &str) -> String { to_case(self.type_case, s) }

    fn plural(&self, s: &str) -> String {
        if self.pluralize {
            pluralize(s, &self.rules)
        } else {
            s.to_string()
        }
    }
}
