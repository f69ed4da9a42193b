use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fixed display palette. Not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrizeColor {
    #[default]
    Yellow,
    Blue,
    Green,
    Pink,
    Purple,
    Orange,
}

impl PrizeColor {
    pub const ALL: [PrizeColor; 6] = [
        PrizeColor::Yellow,
        PrizeColor::Blue,
        PrizeColor::Green,
        PrizeColor::Pink,
        PrizeColor::Purple,
        PrizeColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrizeColor::Yellow => "yellow",
            PrizeColor::Blue => "blue",
            PrizeColor::Green => "green",
            PrizeColor::Pink => "pink",
            PrizeColor::Purple => "purple",
            PrizeColor::Orange => "orange",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrizeColor::Yellow => "Yellow",
            PrizeColor::Blue => "Blue",
            PrizeColor::Green => "Green",
            PrizeColor::Pink => "Pink",
            PrizeColor::Purple => "Purple",
            PrizeColor::Orange => "Orange",
        }
    }

    /// Gradient stops used when rendering the revealed card
    pub fn gradient(&self) -> [&'static str; 3] {
        match self {
            PrizeColor::Yellow => ["#facc15", "#fb923c", "#ef4444"],
            PrizeColor::Blue => ["#60a5fa", "#22d3ee", "#14b8a6"],
            PrizeColor::Green => ["#4ade80", "#34d399", "#84cc16"],
            PrizeColor::Pink => ["#f472b6", "#fb7185", "#ef4444"],
            PrizeColor::Purple => ["#c084fc", "#a78bfa", "#6366f1"],
            PrizeColor::Orange => ["#fb923c", "#fbbf24", "#eab308"],
        }
    }
}

impl fmt::Display for PrizeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrizeColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrizeColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown color: {}. Supported colors: yellow, blue, green, pink, purple, orange",
                    s
                )
            })
    }
}

impl Serialize for PrizeColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// unknown names fall back to the default color instead of failing the whole catalog
impl<'de> Deserialize<'de> for PrizeColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_default())
    }
}

// ids are opaque; hand-edited catalogs may store them as JSON numbers
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Int(id) => id.to_string(),
        RawId::Float(id) => id.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub probability: i32,
    #[serde(default)]
    pub color: PrizeColor,
}

impl Prize {
    pub const SENTINEL_TITLE: &'static str = "No prizes configured";

    /// Placeholder shown when the catalog is empty
    pub fn sentinel() -> Self {
        Self {
            id: String::new(),
            title: Self::SENTINEL_TITLE.to_string(),
            emoji: "❌".to_string(),
            probability: 0,
            color: PrizeColor::Yellow,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id.is_empty() && self.title == Self::SENTINEL_TITLE
    }

    pub fn display_text(&self) -> String {
        if self.emoji.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.emoji, self.title)
        }
    }
}

/// Admin input for a prize that has not been assigned an id yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrize {
    pub title: String,
    pub emoji: String,
    pub probability: i32,
    pub color: PrizeColor,
}

impl Default for NewPrize {
    fn default() -> Self {
        Self {
            title: String::new(),
            emoji: String::new(),
            probability: 20,
            color: PrizeColor::Yellow,
        }
    }
}

/// Partial edit; `None` fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrizeUpdate {
    pub title: Option<String>,
    pub emoji: Option<String>,
    pub probability: Option<i32>,
    pub color: Option<PrizeColor>,
}

impl PrizeUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.emoji.is_none()
            && self.probability.is_none()
            && self.color.is_none()
    }
}

/// Seed list used until an operator saves a catalog of their own
pub fn default_catalog() -> Vec<Prize> {
    let seed = [
        ("1", "You won a trip to Paris!", "✈️", 10, PrizeColor::Blue),
        ("2", "Prize: $1,000 USD!", "💵", 15, PrizeColor::Green),
        ("3", "50% discount!", "🎁", 25, PrizeColor::Purple),
        ("4", "You won dinner for two!", "🍽️", 20, PrizeColor::Orange),
        ("5", "Surprise prize!", "🎊", 30, PrizeColor::Pink),
    ];

    seed.into_iter()
        .map(|(id, title, emoji, probability, color)| Prize {
            id: id.to_string(),
            title: title.to_string(),
            emoji: emoji.to_string(),
            probability,
            color,
        })
        .collect()
}
