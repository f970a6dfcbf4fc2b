use serde::{Deserialize, Serialize};

/// Supported icon identifiers. Unknown names resolve to `Fallback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconName {
    Sun,
    Moon,
    Bed,
    Utensils,
    Apple,
    Coffee,
    Bath,
    Toothbrush,
    Shirt,
    School,
    Book,
    Pencil,
    Music,
    Gamepad,
    Ball,
    Palette,
    Car,
    Bus,
    Home,
    Park,
    Heart,
    Smile,
    Doctor,
    Pill,
    Users,
    Phone,
    Tv,
    Star,
    Gift,
    Fallback,
}

/// Rendering table: icon → (name, glyph).
const ICON_TABLE: &[(IconName, &str, &str)] = &[
    (IconName::Sun, "sun", "☀️"),
    (IconName::Moon, "moon", "🌙"),
    (IconName::Bed, "bed", "🛏️"),
    (IconName::Utensils, "utensils", "🍽️"),
    (IconName::Apple, "apple", "🍎"),
    (IconName::Coffee, "coffee", "☕"),
    (IconName::Bath, "bath", "🛁"),
    (IconName::Toothbrush, "toothbrush", "🪥"),
    (IconName::Shirt, "shirt", "👕"),
    (IconName::School, "school", "🏫"),
    (IconName::Book, "book", "📖"),
    (IconName::Pencil, "pencil", "✏️"),
    (IconName::Music, "music", "🎵"),
    (IconName::Gamepad, "gamepad", "🎮"),
    (IconName::Ball, "ball", "⚽"),
    (IconName::Palette, "palette", "🎨"),
    (IconName::Car, "car", "🚗"),
    (IconName::Bus, "bus", "🚌"),
    (IconName::Home, "home", "🏠"),
    (IconName::Park, "park", "🌳"),
    (IconName::Heart, "heart", "❤️"),
    (IconName::Smile, "smile", "🙂"),
    (IconName::Doctor, "doctor", "🩺"),
    (IconName::Pill, "pill", "💊"),
    (IconName::Users, "users", "👥"),
    (IconName::Phone, "phone", "📞"),
    (IconName::Tv, "tv", "📺"),
    (IconName::Star, "star", "⭐"),
    (IconName::Gift, "gift", "🎁"),
    (IconName::Fallback, "fallback", "❓"),
];

impl IconName {
    pub fn as_str(&self) -> &'static str {
        ICON_TABLE
            .iter()
            .find(|(i, _, _)| i == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("fallback")
    }

    pub fn glyph(&self) -> &'static str {
        ICON_TABLE
            .iter()
            .find(|(i, _, _)| i == self)
            .map(|(_, _, glyph)| *glyph)
            .unwrap_or("❓")
    }

    /// Accepts `toothbrush`, `Toothbrush`, `tooth-brush`, `tooth_brush`.
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        ICON_TABLE
            .iter()
            .find(|(_, n, _)| *n == normalized)
            .map(|(i, _, _)| *i)
            .unwrap_or(IconName::Fallback)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, IconName::Fallback)
    }
}

impl From<String> for IconName {
    fn from(s: String) -> Self {
        IconName::from_name(&s)
    }
}

impl From<IconName> for String {
    fn from(i: IconName) -> Self {
        i.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_table() {
        for (icon, name, _) in ICON_TABLE {
            assert_eq!(IconName::from_name(name), *icon);
        }
    }

    #[test]
    fn unknown_names_fall_back() {
        assert_eq!(IconName::from_name("Tooth-Brush"), IconName::Toothbrush);
        assert!(IconName::from_name("spaceship").is_fallback());

        let icon: IconName = serde_json::from_str("\"UnknownThing\"").unwrap();
        assert_eq!(icon, IconName::Fallback);
        assert_eq!(serde_json::to_string(&IconName::Bath).unwrap(), "\"bath\"");
    }
}
