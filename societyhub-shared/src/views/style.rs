/// Deterministic styling derived from strings
///
/// Cards without an image get a placeholder whose gradient and icon are
/// computed from the society's category or the event's title, so the same
/// record always renders the same way.
///
/// Hashes work on UTF-16 code units, which keeps the chosen colours identical
/// to what the web client computes with `charCodeAt`.

use serde::{Deserialize, Serialize};

/// Logo path the web client ships as a stand-in; treated as "no logo"
pub const DEFAULT_LOGO: &str = "/assets/default-logo.png";

const AVATAR_GRADIENTS: [&str; 5] = [
    "linear-gradient(135deg, #667eea, #764ba2)",
    "linear-gradient(135deg, #ff758c, #ff7eb3)",
    "linear-gradient(135deg, #43cea2, #185a9d)",
    "linear-gradient(135deg, #f7971e, #ffd200)",
    "linear-gradient(135deg, #00c6ff, #0072ff)",
];

const EVENT_GRADIENTS: [&str; 8] = [
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
    "linear-gradient(135deg, #30cfd0 0%, #330867 100%)",
    "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
    "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)",
];

/// Icon names, serialized as the kebab-case Font Awesome identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Book,
    LaptopCode,
    Users,
    Palette,
    Music,
    Microphone,
    Calendar,
    FootballBall,
    Microscope,
    TheaterMasks,
    HandsHelping,
}

/// Gradient and icon for a society category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub gradient: &'static str,
    pub icon: Icon,
}

/// Avatar background for a member without a profile picture
///
/// Indexed by the first code unit of the id; an empty id maps to the first
/// gradient.
pub fn avatar_color(id: &str) -> &'static str {
    let first = id.encode_utf16().next().unwrap_or(0) as usize;
    AVATAR_GRADIENTS[first % AVATAR_GRADIENTS.len()]
}

/// Placeholder gradient for an event without a poster
pub fn event_gradient(title: &str) -> &'static str {
    let hash: usize = title.encode_utf16().map(usize::from).sum();
    EVENT_GRADIENTS[hash % EVENT_GRADIENTS.len()]
}

/// Placeholder icon for an event, picked by keyword in the title
///
/// Keyword groups are checked in a fixed order and the first hit wins, so
/// "Music Quiz" is a book, not a music note.
pub fn event_icon(title: &str) -> Icon {
    const KEYWORDS: [(&[&str], Icon); 6] = [
        (&["quiz", "literary"], Icon::Book),
        (&["seminar", "workshop"], Icon::LaptopCode),
        (&["meetup", "meet"], Icon::Users),
        (&["contest", "writing"], Icon::Palette),
        (&["music", "concert"], Icon::Music),
        (&["speech", "talk"], Icon::Microphone),
    ];

    let title = title.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| title.contains(w)))
        .map(|(_, icon)| *icon)
        .unwrap_or(Icon::Calendar)
}

/// Gradient and icon for a society category; unknown categories use "Other"
pub fn category_style(category: &str) -> CategoryStyle {
    let (gradient, icon) = match category {
        "Technology" => ("linear-gradient(135deg, #667eea 0%, #764ba2 100%)", Icon::LaptopCode),
        "Arts" => ("linear-gradient(135deg, #f093fb 0%, #f5576c 100%)", Icon::Palette),
        "Music" => ("linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)", Icon::Music),
        "Sports" => ("linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)", Icon::FootballBall),
        "Literary" => ("linear-gradient(135deg, #fa709a 0%, #fee140 100%)", Icon::Book),
        "Science" => ("linear-gradient(135deg, #30cfd0 0%, #330867 100%)", Icon::Microscope),
        "Drama" => ("linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)", Icon::TheaterMasks),
        "Community" => ("linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)", Icon::HandsHelping),
        _ => ("linear-gradient(135deg, #3e1a47 0%, #5d2a6a 100%)", Icon::Users),
    };

    CategoryStyle { gradient, icon }
}

/// True when a logo should be shown as an image rather than a placeholder
pub fn has_custom_logo(logo: Option<&str>) -> bool {
    matches!(logo, Some(l) if !l.is_empty() && l != DEFAULT_LOGO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_color_uses_first_char() {
        // 'a' = 97, 97 % 5 = 2
        assert_eq!(avatar_color("a1b2"), AVATAR_GRADIENTS[2]);
        assert_eq!(avatar_color("a"), avatar_color("azzz"));
        // '0' = 48, 48 % 5 = 3
        assert_eq!(avatar_color("0f"), AVATAR_GRADIENTS[3]);
        assert_eq!(avatar_color(""), AVATAR_GRADIENTS[0]);
    }

    #[test]
    fn test_event_gradient_sums_char_codes() {
        // 'A' + 'B' = 65 + 66 = 131, 131 % 8 = 3
        assert_eq!(event_gradient("AB"), EVENT_GRADIENTS[3]);
        assert_eq!(event_gradient("AB"), event_gradient("BA"));
        assert_eq!(event_gradient(""), EVENT_GRADIENTS[0]);
    }

    #[test]
    fn test_event_icon_keywords() {
        assert_eq!(event_icon("Annual Quiz Night"), Icon::Book);
        assert_eq!(event_icon("Literary Fest"), Icon::Book);
        assert_eq!(event_icon("Rust Workshop"), Icon::LaptopCode);
        assert_eq!(event_icon("Freshers Meetup"), Icon::Users);
        assert_eq!(event_icon("Poetry Writing Contest"), Icon::Palette);
        assert_eq!(event_icon("Winter Concert"), Icon::Music);
        assert_eq!(event_icon("TED-style Talk"), Icon::Microphone);
        assert_eq!(event_icon("Annual Dinner"), Icon::Calendar);
    }

    #[test]
    fn test_event_icon_first_match_wins() {
        assert_eq!(event_icon("Music Quiz"), Icon::Book);
        assert_eq!(event_icon("Workshop on Speech"), Icon::LaptopCode);
    }

    #[test]
    fn test_category_style() {
        assert_eq!(category_style("Music").icon, Icon::Music);
        assert_eq!(category_style("Drama").icon, Icon::TheaterMasks);
        assert_eq!(category_style("Unknown"), category_style("Other"));
        assert_eq!(category_style("Other").icon, Icon::Users);
    }

    #[test]
    fn test_has_custom_logo() {
        assert!(has_custom_logo(Some("https://cdn.example.com/logo.png")));
        assert!(!has_custom_logo(Some(DEFAULT_LOGO)));
        assert!(!has_custom_logo(Some("")));
        assert!(!has_custom_logo(None));
    }

    #[test]
    fn test_icon_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Icon::LaptopCode).unwrap(), "\"laptop-code\"");
        assert_eq!(serde_json::to_string(&Icon::HandsHelping).unwrap(), "\"hands-helping\"");
    }
}
