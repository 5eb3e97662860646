/// View models for cards and detail pages
///
/// Everything a page needs to render (placeholder gradients, badges, button
/// labels) is computed here from the persisted models so the API can return
/// ready-to-render JSON and the client can reason about the same state.

pub mod event;
pub mod society;
pub mod style;

pub use event::{DateBadge, EventCard, EventImage, ParticipantView, RsvpState};
pub use society::{
    JoinButton, Logo, MemberView, PendingRequestView, Role, SocialLinks, SocietyCard,
    SocietyDetail, UserSocietyCard, Viewer, ViewerState,
};

/// Description length shown on society cards
pub const CARD_EXCERPT_LEN: usize = 90;

/// Description length shown as the detail page tagline
pub const TAGLINE_EXCERPT_LEN: usize = 120;

/// First `max_chars` characters of `text` followed by `...`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Upper-cased first letter of a name, `U` when there is none
pub fn initial(name: &str) -> String {
    match name.chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => "U".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates() {
        let text = "a".repeat(200);
        let short = excerpt(&text, CARD_EXCERPT_LEN);
        assert_eq!(short.len(), 93);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_excerpt_short_text_keeps_ellipsis() {
        assert_eq!(excerpt("Robotics club", 90), "Robotics club...");
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        assert_eq!(excerpt("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial("emma"), "E");
        assert_eq!(initial(""), "U");
    }
}
