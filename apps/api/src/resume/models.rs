//! Resume data model shared by the parser, rewriter, auditor, composer and renderer.
//!
//! Deserialization is lenient: LLM extractions routinely emit `null` for
//! unknown locations or empty sections and a bare number for a graduation
//! year, and a single such value must not discard the whole record.
//! Scalars accept strings, numbers, booleans and `null`; collections accept
//! `null` as empty.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Structured resume. Owned by the client session and sent with each request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "text")]
    pub full_name: String,
    #[serde(deserialize_with = "text")]
    pub contact_info: String,
    #[serde(deserialize_with = "or_empty")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "or_empty")]
    pub skills: Skills,
    #[serde(deserialize_with = "or_empty")]
    pub experience: Vec<ExperienceEntry>,
}

impl ResumeRecord {
    /// True when nothing was extracted. The parser returns this shape on
    /// failure, so callers should treat it as "possibly failed", not only "empty".
    pub fn is_blank(&self) -> bool {
        self.full_name.is_empty()
            && self.contact_info.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "text")]
    pub school: String,
    #[serde(deserialize_with = "text")]
    pub degree: String,
    #[serde(deserialize_with = "text")]
    pub year: String,
}

/// One job. `enhanced_bullets` is written only by the bullet rewriter and
/// is replaced wholesale on every pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "text")]
    pub role: String,
    #[serde(deserialize_with = "text")]
    pub company: String,
    #[serde(deserialize_with = "text")]
    pub duration: String,
    #[serde(deserialize_with = "text")]
    pub location: String,
    #[serde(deserialize_with = "text")]
    pub summary_input: String,
    #[serde(deserialize_with = "text")]
    pub tech_stack: String,
    #[serde(deserialize_with = "or_empty")]
    pub enhanced_bullets: Vec<String>,
}

/// Skill categories in document order, e.g. `Languages -> "Rust, Go"`.
///
/// On the wire this is a JSON object. List values are joined with ", " so
/// every category carries free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Skills(Vec<(String, String)>);

impl Skills {
    pub fn new(categories: Vec<(String, String)>) -> Self {
        Self(categories)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for Skills {
    fn from(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(category, value)| (category, value_to_text(value)))
                .collect(),
        )
    }
}

impl From<Skills> for Map<String, Value> {
    fn from(skills: Skills) -> Self {
        skills
            .0
            .into_iter()
            .map(|(category, value)| (category, Value::String(value)))
            .collect()
    }
}

/// Result of one ATS audit. Produced fresh per call, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// 0 – 100
    pub score: u8,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Style directive for the bullet rewriter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// Aggressive ATS optimisation: power verbs, keyword density, metrics.
    #[default]
    Standard,
    /// Varied openings and plain vocabulary; metrics woven into narrative.
    Humanized,
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Array(items) => items
            .into_iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Accepts strings, numbers, booleans and `null` for a text field.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}

/// `null` becomes the empty collection.
fn or_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_record_missing_fields_default_to_empty() {
        let record: ResumeRecord = serde_json::from_str(r#"{"full_name": "Ada"}"#).unwrap();
        assert_eq!(record.full_name, "Ada");
        assert!(record.experience.is_empty());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_null_and_numeric_scalars_are_tolerated() {
        let json = r#"{
            "education": [{"school": "MIT", "degree": "BSc", "year": 2019}],
            "experience": [{"role": "Engineer", "location": null}]
        }"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.education[0].year, "2019");
        assert_eq!(record.experience[0].location, "");
        assert!(record.experience[0].enhanced_bullets.is_empty());
    }

    #[test]
    fn test_null_collections_are_empty() {
        let json = r#"{
            "full_name": "Ada",
            "education": null,
            "skills": null,
            "experience": [{"role": "Engineer", "enhanced_bullets": null}]
        }"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.full_name, "Ada");
        assert!(record.education.is_empty());
        assert!(record.skills.is_empty());
        assert_eq!(record.experience[0].role, "Engineer");
        assert!(record.experience[0].enhanced_bullets.is_empty());

        let record: ResumeRecord = serde_json::from_str(r#"{"experience": null}"#).unwrap();
        assert!(record.experience.is_empty());
    }

    #[test]
    fn test_nested_object_in_text_field_is_rejected() {
        let json = r#"{"full_name": {"first": "Ada"}}"#;
        assert!(serde_json::from_str::<ResumeRecord>(json).is_err());
    }

    #[test]
    fn test_skills_keep_document_order_and_join_lists() {
        let json = r#"{"skills": {"Languages": ["Rust", "Go"], "Cloud": "AWS", "Years": 7}}"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        let skills: Vec<_> = record.skills.iter().collect();
        assert_eq!(
            skills,
            vec![("Languages", "Rust, Go"), ("Cloud", "AWS"), ("Years", "7")]
        );
    }

    #[test]
    fn test_skills_serialize_as_object() {
        let skills = Skills::new(vec![("Languages".into(), "Rust".into())]);
        let value = serde_json::to_value(&skills).unwrap();
        assert_eq!(value, serde_json::json!({"Languages": "Rust"}));
    }

    #[test]
    fn test_skills_as_list_is_rejected() {
        assert!(serde_json::from_str::<ResumeRecord>(r#"{"skills": ["Rust"]}"#).is_err());
    }

    #[test]
    fn test_is_blank() {
        assert!(ResumeRecord::default().is_blank());
        let record = ResumeRecord {
            full_name: "Ada".into(),
            ..Default::default()
        };
        assert!(!record.is_blank());
    }

    #[test]
    fn test_tone_serde_and_default() {
        assert_eq!(Tone::default(), Tone::Standard);
        let tone: Tone = serde_json::from_str(r#""Humanized""#).unwrap();
        assert_eq!(tone, Tone::Humanized);
        assert!(serde_json::from_str::<Tone>(r#""Casual""#).is_err());
    }
}
