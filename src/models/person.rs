use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonKind {
    #[serde(rename = "PERSON")]
    Person,
    #[serde(rename = "PLACE")]
    Place,
}

impl PersonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonKind::Person => "PERSON",
            PersonKind::Place => "PLACE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "person" | "persona" | "p" => Some(PersonKind::Person),
            "place" | "lugar" | "l" => Some(PersonKind::Place),
            _ => None,
        }
    }
}

/// A person or place shown in the gallery. Not linked to activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonOrPlace {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PersonKind,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Generated avatar for entries created without an image.
pub fn avatar_url(template: &str, name: &str) -> String {
    let encoded: String = name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' => "+".to_string(),
            c if c.is_ascii_alphanumeric() || "-_.~".contains(c) => c.to_string(),
            c => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect();
    template.replace("{name}", &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_uses_upper_case_tags() {
        let p = PersonOrPlace {
            id: "1".into(),
            name: "Abuela".into(),
            kind: PersonKind::Person,
            image_url: "x".into(),
            description: None,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "PERSON");
        assert_eq!(json["imageUrl"], "x");
    }

    #[test]
    fn avatar_name_is_url_encoded() {
        assert_eq!(
            avatar_url("https://a/?name={name}", "José Luis"),
            "https://a/?name=Jos%C3%A9+Luis"
        );
    }
}
