use serde::Deserialize;

/// POST body. Both fields must be present and non-null; anything else in the
/// object is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
}

/// PUT body. Absent (or null) fields default to the stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBook {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}
