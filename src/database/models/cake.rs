use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields a client may send for a cake
const CAKE_FIELDS: &[&str] = &["name", "comment", "imageUrl", "yumFactor"];

/// Fields assigned by the store, never accepted from API input
const SYSTEM_FIELDS: &[&str] = &["id"];

/// A stored cake as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cake {
    pub id: i32,
    pub name: String,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub yum_factor: Option<i32>,
}

/// Cake fields without an id. Used both as the validated create payload
/// and as the document body persisted by the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCake {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub yum_factor: Option<i32>,
}

/// Partial update. The outer `Option` records whether the field was present
/// in the request body, the inner one whether it was `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CakePatch {
    pub name: Option<String>,
    pub comment: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub yum_factor: Option<Option<i32>>,
}

/// Errors raised while turning request JSON into cake values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CakeError {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Missing required fields in the data")]
    MissingRequiredField(&'static str),
    #[error("Unexpected fields: {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),
    #[error("System field '{0}' cannot be set via API input")]
    SystemFieldNotAllowed(&'static str),
    #[error("Invalid value for field '{field}': expected {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
    },
}

impl Cake {
    pub fn from_document(id: i32, doc: NewCake) -> Self {
        Self {
            id,
            name: doc.name,
            comment: doc.comment,
            image_url: doc.image_url,
            yum_factor: doc.yum_factor,
        }
    }
}

impl NewCake {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            image_url: None,
            yum_factor: None,
        }
    }

    /// Validate a create payload. `name` is required, everything else optional.
    pub fn from_json(json: Value) -> Result<Self, CakeError> {
        let map = expect_object(json)?;

        let name = match string_field(&map, "name")? {
            Some(Some(name)) => name,
            _ => return Err(CakeError::MissingRequiredField("name")),
        };
        reject_unknown_fields(&map)?;

        Ok(Self {
            name,
            comment: string_field(&map, "comment")?.flatten(),
            image_url: string_field(&map, "imageUrl")?.flatten(),
            yum_factor: int_field(&map, "yumFactor")?.flatten(),
        })
    }
}

impl CakePatch {
    /// Validate an update payload. Every field is optional; `null` clears
    /// optional fields but `name` must stay a string.
    pub fn from_json(json: Value) -> Result<Self, CakeError> {
        let map = expect_object(json)?;
        reject_unknown_fields(&map)?;

        let name = match string_field(&map, "name")? {
            Some(None) => {
                return Err(CakeError::InvalidFieldType {
                    field: "name",
                    expected: "a non-null string",
                })
            }
            Some(Some(name)) => Some(name),
            None => None,
        };

        Ok(Self {
            name,
            comment: string_field(&map, "comment")?,
            image_url: string_field(&map, "imageUrl")?,
            yum_factor: int_field(&map, "yumFactor")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.comment.is_none()
            && self.image_url.is_none()
            && self.yum_factor.is_none()
    }

    /// Overwrite the fields present in the patch, leaving the rest untouched
    pub fn apply(&self, doc: &mut NewCake) {
        if let Some(name) = &self.name {
            doc.name = name.clone();
        }
        if let Some(comment) = &self.comment {
            doc.comment = comment.clone();
        }
        if let Some(image_url) = &self.image_url {
            doc.image_url = image_url.clone();
        }
        if let Some(yum_factor) = self.yum_factor {
            doc.yum_factor = yum_factor;
        }
    }

    /// JSON object holding only the present fields, `null` included, suitable
    /// for merging into a stored document
    pub fn to_document(&self) -> Map<String, Value> {
        let mut doc = Map::new();
        if let Some(name) = &self.name {
            doc.insert("name".to_string(), Value::from(name.as_str()));
        }
        if let Some(comment) = &self.comment {
            doc.insert("comment".to_string(), Value::from(comment.clone()));
        }
        if let Some(image_url) = &self.image_url {
            doc.insert("imageUrl".to_string(), Value::from(image_url.clone()));
        }
        if let Some(yum_factor) = self.yum_factor {
            doc.insert("yumFactor".to_string(), Value::from(yum_factor));
        }
        doc
    }
}

fn expect_object(json: Value) -> Result<Map<String, Value>, CakeError> {
    match json {
        Value::Object(map) => Ok(map),
        _ => Err(CakeError::InvalidJson("Expected JSON object".to_string())),
    }
}

fn reject_unknown_fields(map: &Map<String, Value>) -> Result<(), CakeError> {
    if let Some(field) = SYSTEM_FIELDS.iter().find(|f| map.contains_key(**f)) {
        return Err(CakeError::SystemFieldNotAllowed(*field));
    }

    let unexpected: Vec<String> = map
        .keys()
        .filter(|key| !CAKE_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect();

    if unexpected.is_empty() {
        Ok(())
    } else {
        Err(CakeError::UnexpectedFields(unexpected))
    }
}

fn string_field(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<Option<String>>, CakeError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(_) => Err(CakeError::InvalidFieldType {
            field,
            expected: "a string",
        }),
    }
}

fn int_field(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<Option<i32>>, CakeError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(value) => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(|n| Some(Some(n)))
            .ok_or(CakeError::InvalidFieldType {
                field,
                expected: "a 32-bit integer",
            }),
    }
}
