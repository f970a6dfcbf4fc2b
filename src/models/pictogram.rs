use super::icon::IconName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PLACEHOLDER_ID: &str = "placeholder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Routine,
    Food,
    Hygiene,
    School,
    Leisure,
    Health,
    Social,
    Places,
    Emotions,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Routine => "routine",
            Category::Food => "food",
            Category::Hygiene => "hygiene",
            Category::School => "school",
            Category::Leisure => "leisure",
            Category::Health => "health",
            Category::Social => "social",
            Category::Places => "places",
            Category::Emotions => "emotions",
            Category::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "routine" | "rutina" => Some(Category::Routine),
            "food" | "comida" => Some(Category::Food),
            "hygiene" | "higiene" => Some(Category::Hygiene),
            "school" | "escuela" | "colegio" => Some(Category::School),
            "leisure" | "ocio" | "play" => Some(Category::Leisure),
            "health" | "salud" => Some(Category::Health),
            "social" => Some(Category::Social),
            "places" | "lugares" => Some(Category::Places),
            "emotions" | "emociones" => Some(Category::Emotions),
            "other" | "otros" => Some(Category::Other),
            _ => None,
        }
    }

    /// Default background tag for pictograms of this category.
    pub fn default_bg(&self) -> &'static str {
        match self {
            Category::Routine => "bg-blue-100",
            Category::Food => "bg-orange-100",
            Category::Hygiene => "bg-cyan-100",
            Category::School => "bg-yellow-100",
            Category::Leisure => "bg-green-100",
            Category::Health => "bg-red-100",
            Category::Social => "bg-purple-100",
            Category::Places => "bg-emerald-100",
            Category::Emotions => "bg-pink-100",
            Category::Other => "bg-gray-100",
        }
    }
}

/// Where the image of a pictogram comes from. Exactly one source per pictogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PictogramSource {
    #[serde(rename = "iconName")]
    Icon(IconName),
    #[serde(rename = "catalogId")]
    Catalog(u32),
    /// Data-URI or remote URL supplied by the caregiver.
    #[serde(rename = "customImage")]
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pictogram {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub source: PictogramSource,
    pub category: Category,
    pub bg_color: String,
}

impl Pictogram {
    pub fn new(label: &str, source: PictogramSource, category: Category) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            label: label.trim().to_string(),
            source,
            category,
            bg_color: category.default_bg().to_string(),
        }
    }

    /// Shown wherever an activity references a pictogram that no longer exists.
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_ID.to_string(),
            label: "?".to_string(),
            source: PictogramSource::Icon(IconName::Fallback),
            category: Category::Other,
            bg_color: Category::Other.default_bg().to_string(),
        }
    }

    /// Image location: catalog ids are expanded with `catalog_url_template`
    /// (`{id}` placeholders), custom images are returned as-is, icons have none.
    pub fn image_url(&self, catalog_url_template: &str) -> Option<String> {
        match &self.source {
            PictogramSource::Icon(_) => None,
            PictogramSource::Catalog(id) => {
                Some(catalog_url_template.replace("{id}", &id.to_string()))
            }
            PictogramSource::Custom(src) => Some(src.clone()),
        }
    }

    /// Short text rendering used by terminal views.
    pub fn glyph(&self) -> &'static str {
        match &self.source {
            PictogramSource::Icon(icon) => icon.glyph(),
            PictogramSource::Catalog(_) => "🖼️",
            PictogramSource::Custom(_) => "📷",
        }
    }
}

/// Flat library of pictograms by id.
pub type PictogramLibrary = BTreeMap<String, Pictogram>;

/// The built-in pictograms a fresh installation starts with.
pub fn default_library() -> PictogramLibrary {
    let seeds: [(&str, &str, IconName, Category); 14] = [
        ("wake-up", "Despertar", IconName::Sun, Category::Routine),
        ("breakfast", "Desayuno", IconName::Coffee, Category::Food),
        ("lunch", "Comida", IconName::Utensils, Category::Food),
        ("snack", "Merienda", IconName::Apple, Category::Food),
        ("dinner", "Cena", IconName::Utensils, Category::Food),
        ("brush-teeth", "Lavar dientes", IconName::Toothbrush, Category::Hygiene),
        ("bath", "Baño", IconName::Bath, Category::Hygiene),
        ("get-dressed", "Vestirse", IconName::Shirt, Category::Routine),
        ("school", "Colegio", IconName::School, Category::School),
        ("homework", "Deberes", IconName::Pencil, Category::School),
        ("read", "Leer", IconName::Book, Category::Leisure),
        ("play", "Jugar", IconName::Gamepad, Category::Leisure),
        ("park", "Parque", IconName::Park, Category::Places),
        ("sleep", "Dormir", IconName::Bed, Category::Routine),
    ];

    seeds
        .into_iter()
        .map(|(id, label, icon, category)| {
            (
                id.to_string(),
                Pictogram {
                    id: id.to_string(),
                    label: label.to_string(),
                    source: PictogramSource::Icon(icon),
                    category,
                    bg_color: category.default_bg().to_string(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_is_flattened_on_the_wire() {
        let p = Pictogram {
            id: "p1".into(),
            label: "Parque".into(),
            source: PictogramSource::Catalog(2859),
            category: Category::Places,
            bg_color: "bg-emerald-100".into(),
        };

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["catalogId"], 2859);
        assert_eq!(json["bgColor"], "bg-emerald-100");
        assert!(json.get("iconName").is_none());

        let back: Pictogram = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn catalog_url_template() {
        let mut p = Pictogram::new("Parque", PictogramSource::Catalog(42), Category::Places);
        assert_eq!(
            p.image_url("https://img/{id}/{id}.png").as_deref(),
            Some("https://img/42/42.png")
        );
        p.source = PictogramSource::Icon(IconName::Park);
        assert_eq!(p.image_url("https://img/{id}.png"), None);
    }

    #[test]
    fn default_library_ids_are_keys() {
        let lib = default_library();
        assert!(lib.iter().all(|(k, p)| *k == p.id));
        assert!(lib.contains_key("breakfast"));
    }
}
