/// Event card view model
///
/// Used for the public events listing, the event detail endpoint and the
/// events section of a society page.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::style::{event_gradient, event_icon, Icon};
use crate::models::{event::Event, participant::Participant};

/// Shown when an event's society cannot be resolved
pub const UNKNOWN_SOCIETY: &str = "Unknown Society";

/// Badge shown on public events
pub const PUBLIC_BADGE: &str = "Open to All";

/// Month/day badge drawn over the event image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBadge {
    /// Abbreviated English month, e.g. "Nov"
    pub month: String,
    pub day: u32,
}

impl DateBadge {
    pub fn from_date(date: DateTime<Utc>) -> Self {
        Self {
            month: date.format("%b").to_string(),
            day: date.day(),
        }
    }
}

/// Poster image, or a generated placeholder when the event has none
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventImage {
    Poster { src: String },
    Placeholder { gradient: String, icon: Icon },
}

impl EventImage {
    pub fn for_event(title: &str, poster: Option<&str>) -> Self {
        match poster {
            Some(src) if !src.is_empty() => EventImage::Poster { src: src.to_string() },
            _ => EventImage::Placeholder {
                gradient: event_gradient(title).to_string(),
                icon: event_icon(title),
            },
        }
    }
}

/// RSVP button state, serialized as its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsvpState {
    #[serde(rename = "RSVP Now")]
    Open,
    #[serde(rename = "✓ RSVP Confirmed")]
    Confirmed,
}

impl RsvpState {
    pub fn label(&self) -> &'static str {
        match self {
            RsvpState::Open => "RSVP Now",
            RsvpState::Confirmed => "✓ RSVP Confirmed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub name: String,
    pub email: String,
}

impl From<&Participant> for ParticipantView {
    fn from(p: &Participant) -> Self {
        Self {
            name: p.name.clone(),
            email: p.email.clone(),
        }
    }
}

/// Whether `email` already RSVPed, compared case-insensitively
///
/// Folds full Unicode case to agree with the `CITEXT` uniqueness on the server.
pub fn is_rsvped(participants: &[ParticipantView], email: &str) -> bool {
    let email = email.to_lowercase();
    participants.iter().any(|p| p.email.to_lowercase() == email)
}

/// Event as rendered on cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCard {
    pub id: Uuid,
    pub society_id: Uuid,
    pub society_name: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub date_badge: DateBadge,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub image: EventImage,
    pub is_public: bool,
    pub public_badge: Option<String>,

    /// The viewer's own RSVP record, if any; other attendees stay private
    pub participants: Vec<ParticipantView>,

    #[serde(default)]
    pub rsvp_count: usize,

    /// RSVP state for the requesting viewer; `Open` for anonymous viewers
    pub rsvp: RsvpState,
}

impl EventCard {
    /// Builds a card
    ///
    /// `participants` may contain RSVPs of other events; only those matching
    /// `event.id` are kept, so callers can pass one batch for a whole society.
    pub fn new(
        event: &Event,
        society_name: Option<&str>,
        participants: &[Participant],
        viewer_email: Option<&str>,
    ) -> Self {
        let all: Vec<ParticipantView> = participants
            .iter()
            .filter(|p| p.event_id == event.id)
            .map(ParticipantView::from)
            .collect();
        let rsvp_count = all.len();

        let participants: Vec<ParticipantView> = match viewer_email {
            Some(email) => all
                .into_iter()
                .filter(|p| is_rsvped(std::slice::from_ref(p), email))
                .collect(),
            None => Vec::new(),
        };

        let rsvp = if participants.is_empty() {
            RsvpState::Open
        } else {
            RsvpState::Confirmed
        };

        Self {
            id: event.id,
            society_id: event.society_id,
            society_name: society_name
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN_SOCIETY)
                .to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date,
            date_badge: DateBadge::from_date(event.date),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            location: event.location.clone(),
            image: EventImage::for_event(&event.title, event.poster.as_deref()),
            is_public: event.is_public,
            public_badge: event.is_public.then(|| PUBLIC_BADGE.to_string()),
            participants,
            rsvp_count,
            rsvp,
        }
    }

    /// Whether `email` already RSVPed to this event
    pub fn is_rsvped(&self, email: &str) -> bool {
        is_rsvped(&self.participants, email)
    }

    /// Time range as displayed, e.g. "10:00 AM - 12:00 PM"
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(title: &str, poster: Option<&str>, is_public: bool) -> Event {
        let date = Utc.with_ymd_and_hms(2025, 11, 15, 0, 0, 0).unwrap();
        Event {
            id: Uuid::new_v4(),
            society_id: Uuid::new_v4(),
            title: title.to_string(),
            description: "An evening of fun".to_string(),
            date,
            start_time: "10:00 AM".to_string(),
            end_time: "12:00 PM".to_string(),
            location: "Main Hall".to_string(),
            poster: poster.map(str::to_string),
            is_public,
            created_at: date,
            updated_at: date,
        }
    }

    fn participant(event_id: Uuid, email: &str) -> Participant {
        Participant {
            event_id,
            email: email.to_string(),
            user_id: None,
            name: "Emma".to_string(),
            reason: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_date_badge() {
        let badge = DateBadge::from_date(Utc.with_ymd_and_hms(2025, 11, 15, 18, 30, 0).unwrap());
        assert_eq!(badge, DateBadge { month: "Nov".to_string(), day: 15 });
    }

    #[test]
    fn test_card_without_poster_uses_placeholder() {
        let e = event("Rust Workshop", None, true);
        let card = EventCard::new(&e, Some("Tech Club"), &[], None);

        match &card.image {
            EventImage::Placeholder { gradient, icon } => {
                assert_eq!(gradient.as_str(), event_gradient("Rust Workshop"));
                assert_eq!(*icon, Icon::LaptopCode);
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
        assert_eq!(card.public_badge.as_deref(), Some("Open to All"));
        assert_eq!(card.society_name, "Tech Club");
        assert_eq!(card.time_range(), "10:00 AM - 12:00 PM");
    }

    #[test]
    fn test_card_with_poster_and_unknown_society() {
        let e = event("Gala", Some("https://cdn.example.com/gala.png"), false);
        let card = EventCard::new(&e, None, &[], None);

        assert_eq!(
            card.image,
            EventImage::Poster { src: "https://cdn.example.com/gala.png".to_string() }
        );
        assert!(card.public_badge.is_none());
        assert_eq!(card.society_name, "Unknown Society");
    }

    #[test]
    fn test_rsvp_confirmed_for_participant_email() {
        let e = event("Quiz Night", None, true);
        let other = Uuid::new_v4();
        let rsvps = vec![
            participant(e.id, "Emma@Example.com"),
            participant(other, "john@example.com"),
        ];

        let card = EventCard::new(&e, Some("Lit Soc"), &rsvps, Some("emma@example.com"));
        assert_eq!(card.rsvp, RsvpState::Confirmed);
        assert_eq!(card.rsvp.label(), "✓ RSVP Confirmed");
        assert_eq!(card.participants.len(), 1);

        let card = EventCard::new(&e, Some("Lit Soc"), &rsvps, Some("john@example.com"));
        assert_eq!(card.rsvp, RsvpState::Open);
        assert!(!card.is_rsvped("john@example.com"));
        assert!(!card.is_rsvped("EMMA@example.com"));
        assert_eq!(card.rsvp_count, 1);
    }

    #[test]
    fn test_card_only_exposes_viewer_rsvp() {
        let e = event("Quiz Night", None, false);
        let rsvps = vec![
            participant(e.id, "emma@example.com"),
            participant(e.id, "secret@member.edu"),
        ];

        let anonymous = EventCard::new(&e, Some("Lit Soc"), &rsvps, None);
        assert!(anonymous.participants.is_empty());
        assert_eq!(anonymous.rsvp_count, 2);
        assert_eq!(anonymous.rsvp, RsvpState::Open);

        let emma = EventCard::new(&e, Some("Lit Soc"), &rsvps, Some("Emma@Example.com"));
        assert_eq!(emma.participants.len(), 1);
        assert_eq!(emma.participants[0].email, "emma@example.com");
        assert!(emma.is_rsvped("EMMA@example.com"));
    }

    #[test]
    fn test_is_rsvped_folds_non_ascii_case() {
        let rsvps = vec![ParticipantView {
            name: "Émma".to_string(),
            email: "émma@example.com".to_string(),
        }];

        assert!(is_rsvped(&rsvps, "ÉMMA@example.com"));
        assert!(!is_rsvped(&rsvps, "emma@example.com"));
    }

    #[test]
    fn test_rsvp_state_serializes_as_label() {
        assert_eq!(serde_json::to_string(&RsvpState::Open).unwrap(), "\"RSVP Now\"");
        let parsed: RsvpState = serde_json::from_str("\"✓ RSVP Confirmed\"").unwrap();
        assert_eq!(parsed, RsvpState::Confirmed);
    }
}
