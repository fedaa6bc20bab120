use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The fixed field set a skill document carries in flat storage. Request
/// bodies are validated against this shape at the boundary; unknown fields
/// are rejected rather than silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillFields {
    pub name: String,
    pub proficiency: String,
    #[serde(deserialize_with = "experience_years")]
    pub experience_years: u32,
    pub image: String,
    pub category: String,
    pub description: String,
}

impl SkillFields {
    pub fn into_document(self) -> Map<String, Value> {
        let mut document = Map::new();
        document.insert("name".to_string(), Value::String(self.name));
        document.insert("proficiency".to_string(), Value::String(self.proficiency));
        document.insert("experience_years".to_string(), Value::from(self.experience_years));
        document.insert("image".to_string(), Value::String(self.image));
        document.insert("category".to_string(), Value::String(self.category));
        document.insert("description".to_string(), Value::String(self.description));
        document
    }
}

/// Accepts a JSON number or a numeric string; portfolio frontends have
/// historically sent both.
pub(crate) fn experience_years<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
