/// Society view models: listing cards, the "my societies" cards and the
/// detail page with its join/leave state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::EventCard;
use super::style::{avatar_color, category_style, has_custom_logo, Icon};
use super::{excerpt, initial, CARD_EXCERPT_LEN, TAGLINE_EXCERPT_LEN};
use crate::models::{
    event::Event,
    membership::JoinRequest,
    participant::Participant,
    society::{Society, SocietyWithCounts},
    user::UserSummary,
};

/// Society logo, or a category placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Logo {
    Image { src: String },
    Placeholder { gradient: String, icon: Icon },
}

impl Logo {
    pub fn for_society(logo: Option<&str>, category: &str) -> Self {
        match logo {
            Some(src) if has_custom_logo(Some(src)) => Logo::Image { src: src.to_string() },
            _ => {
                let style = category_style(category);
                Logo::Placeholder {
                    gradient: style.gradient.to_string(),
                    icon: style.icon,
                }
            }
        }
    }
}

fn category_or_default(category: &str) -> String {
    if category.is_empty() {
        "Other".to_string()
    } else {
        category.to_string()
    }
}

/// Card on the society listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocietyCard {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub logo: Logo,
    pub members_count: i64,

    /// Description excerpt; absent when the description is empty
    pub excerpt: Option<String>,
}

impl From<&SocietyWithCounts> for SocietyCard {
    fn from(row: &SocietyWithCounts) -> Self {
        let s = &row.society;
        Self {
            id: s.id,
            name: s.name.clone(),
            category: category_or_default(&s.category),
            logo: Logo::for_society(s.logo.as_deref(), &s.category),
            members_count: row.member_count,
            excerpt: (!s.description.is_empty()).then(|| excerpt(&s.description, CARD_EXCERPT_LEN)),
        }
    }
}

/// Viewer's role in one of their societies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Member,
}

/// Card on the "my societies" page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSocietyCard {
    pub id: Uuid,
    pub name: String,
    pub members_count: i64,
    pub events_count: i64,
    pub role: Role,
    pub deactivated: bool,

    /// Only the creator of a deactivated society may ask for reactivation
    pub can_request_activation: bool,
    pub activation_requested_at: Option<DateTime<Utc>>,
}

impl UserSocietyCard {
    pub fn new(row: &SocietyWithCounts, viewer_id: Uuid) -> Self {
        let s = &row.society;
        let role = if s.is_admin(viewer_id) {
            Role::Admin
        } else {
            Role::Member
        };

        Self {
            id: s.id,
            name: s.name.clone(),
            members_count: row.member_count,
            events_count: row.event_count,
            role,
            deactivated: s.deactivated,
            can_request_activation: s.deactivated && role == Role::Admin,
            activation_requested_at: s.activation_requested_at,
        }
    }
}

/// Member tile on the detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub id: Uuid,
    pub username: String,
    pub profile_pic: Option<String>,

    /// Background used when there is no profile picture
    pub avatar_color: String,
    pub initial: String,
}

impl From<&UserSummary> for MemberView {
    fn from(user: &UserSummary) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            profile_pic: user.profile_pic.clone(),
            avatar_color: avatar_color(&user.id.to_string()).to_string(),
            initial: initial(&user.username),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequestView {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub reason: String,
    pub requested_at: DateTime<Utc>,
}

impl From<&JoinRequest> for PendingRequestView {
    fn from(r: &JoinRequest) -> Self {
        Self {
            user_id: r.user_id,
            name: r.name.clone(),
            email: r.email.clone(),
            reason: r.reason.clone(),
            requested_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.contact_email.is_none()
            && self.phone.is_none()
            && self.instagram.is_none()
            && self.linkedin.is_none()
    }
}

/// Join button label, serialized as shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinButton {
    #[serde(rename = "Request Pending")]
    RequestPending,
    #[serde(rename = "Leave Society")]
    LeaveSociety,
    #[serde(rename = "Join Society")]
    JoinSociety,
}

impl JoinButton {
    /// A pending request takes precedence over membership
    pub fn for_state(has_joined: bool, request_pending: bool) -> Self {
        if request_pending {
            JoinButton::RequestPending
        } else if has_joined {
            JoinButton::LeaveSociety
        } else {
            JoinButton::JoinSociety
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JoinButton::RequestPending => "Request Pending",
            JoinButton::LeaveSociety => "Leave Society",
            JoinButton::JoinSociety => "Join Society",
        }
    }
}

/// Viewer-specific state, present when the request was authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerState {
    pub user_id: Uuid,
    pub has_joined: bool,
    pub request_pending: bool,
    pub is_admin: bool,
    pub join_button: JoinButton,
}

/// Full society page
///
/// This is also the body the server returns after join, leave, approve and
/// reject, so clients replace their copy wholesale instead of patching it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocietyDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tagline: String,
    pub category: String,
    pub logo: Logo,
    pub cover_image: Option<String>,
    pub created_by: Uuid,
    pub deactivated: bool,
    pub links: SocialLinks,
    pub members: Vec<MemberView>,

    /// All requests for the creator; only the viewer's own otherwise
    pub pending_requests: Vec<PendingRequestView>,
    pub events: Vec<EventCard>,
    pub viewer: Option<ViewerState>,
}

/// Signed-in viewer of a detail page
#[derive(Debug, Clone, Copy)]
pub struct Viewer<'a> {
    pub user_id: Uuid,
    pub email: &'a str,
}

impl SocietyDetail {
    /// Assembles the detail page
    ///
    /// `events` must be in the society's sequence order; `participants` may
    /// cover all of them in one batch.
    pub fn build(
        society: &Society,
        members: &[UserSummary],
        requests: &[JoinRequest],
        events: &[Event],
        participants: &[Participant],
        viewer: Option<Viewer<'_>>,
    ) -> Self {
        let is_admin = viewer.map_or(false, |v| society.is_admin(v.user_id));

        let pending_requests = requests
            .iter()
            .filter(|r| is_admin || viewer.map_or(false, |v| v.user_id == r.user_id))
            .map(PendingRequestView::from)
            .collect();

        let events = events
            .iter()
            .map(|e| EventCard::new(e, Some(&society.name), participants, viewer.map(|v| v.email)))
            .collect();

        let mut detail = Self {
            id: society.id,
            name: society.name.clone(),
            description: society.description.clone(),
            tagline: excerpt(&society.description, TAGLINE_EXCERPT_LEN),
            category: category_or_default(&society.category),
            logo: Logo::for_society(society.logo.as_deref(), &society.category),
            cover_image: society.cover_image.clone(),
            created_by: society.created_by,
            deactivated: society.deactivated,
            links: SocialLinks {
                contact_email: society.contact_email.clone(),
                phone: society.phone.clone(),
                instagram: society.instagram_url.clone(),
                linkedin: society.linkedin_url.clone(),
            },
            members: members.iter().map(MemberView::from).collect(),
            pending_requests,
            events,
            viewer: None,
        };

        detail.viewer = viewer.map(|v| {
            let has_joined = detail.has_joined(v.user_id);
            let request_pending = detail.is_pending(v.user_id);
            ViewerState {
                user_id: v.user_id,
                has_joined,
                request_pending,
                is_admin,
                join_button: JoinButton::for_state(has_joined, request_pending),
            }
        });

        detail
    }

    pub fn members_count(&self) -> usize {
        self.members.len()
    }

    /// Whether `user_id` is in the member list
    pub fn has_joined(&self, user_id: Uuid) -> bool {
        self.members.iter().any(|m| m.id == user_id)
    }

    /// Whether `user_id` has a pending join request
    pub fn is_pending(&self, user_id: Uuid) -> bool {
        self.pending_requests.iter().any(|r| r.user_id == user_id)
    }

    /// Join button for a viewer; anonymous viewers always see "Join Society"
    pub fn join_button(&self, user_id: Option<Uuid>) -> JoinButton {
        match user_id {
            Some(id) => JoinButton::for_state(self.has_joined(id), self.is_pending(id)),
            None => JoinButton::JoinSociety,
        }
    }

    /// Removes exactly the member with `user_id`
    ///
    /// Returns false if they were not a member.
    pub fn remove_member(&mut self, user_id: Uuid) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id != user_id);
        before != self.members.len()
    }

    /// Title of the join/leave dialog
    pub fn dialog_title(&self, user_id: Uuid) -> String {
        if self.has_joined(user_id) {
            format!("Leave {}", self.name)
        } else {
            format!("Apply to {}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn society(created_by: Uuid) -> Society {
        let now = Utc::now();
        Society {
            id: Uuid::new_v4(),
            name: "Drama Club".to_string(),
            description: "x".repeat(150),
            logo: Some("/assets/default-logo.png".to_string()),
            cover_image: None,
            category: "Drama".to_string(),
            created_by,
            contact_email: Some("drama@example.com".to_string()),
            phone: None,
            instagram_url: None,
            linkedin_url: None,
            deactivated: false,
            activation_requested_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn summary(name: &str) -> UserSummary {
        UserSummary {
            id: Uuid::new_v4(),
            username: name.to_string(),
            profile_pic: None,
        }
    }

    fn request(society_id: Uuid, user_id: Uuid) -> JoinRequest {
        JoinRequest {
            society_id,
            user_id,
            name: "Emma".to_string(),
            email: "emma@example.com".to_string(),
            reason: "I act".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_member_viewer_has_joined() {
        let creator = Uuid::new_v4();
        let s = society(creator);
        let john = summary("john");
        let emma = summary("emma");
        let members = vec![john.clone(), emma.clone()];

        let viewer = Viewer { user_id: john.id, email: "john@example.com" };
        let detail = SocietyDetail::build(&s, &members, &[], &[], &[], Some(viewer));

        let state = detail.viewer.clone().unwrap();
        assert!(state.has_joined);
        assert!(!state.request_pending);
        assert!(!state.is_admin);
        assert_eq!(state.join_button, JoinButton::LeaveSociety);
        assert_eq!(detail.dialog_title(john.id), "Leave Drama Club");
    }

    #[test]
    fn test_remove_member_removes_exactly_one() {
        let s = society(Uuid::new_v4());
        let john = summary("john");
        let emma = summary("emma");
        let members = vec![john.clone(), emma.clone()];

        let mut detail = SocietyDetail::build(&s, &members, &[], &[], &[], None);
        assert!(detail.remove_member(john.id));
        assert_eq!(detail.members_count(), 1);
        assert!(detail.has_joined(emma.id));
        assert!(!detail.has_joined(john.id));
        assert!(!detail.remove_member(john.id));
    }

    #[test]
    fn test_pending_request_shows_request_pending() {
        let s = society(Uuid::new_v4());
        let emma = Uuid::new_v4();
        let requests = vec![request(s.id, emma)];

        let viewer = Viewer { user_id: emma, email: "emma@example.com" };
        let detail = SocietyDetail::build(&s, &[], &requests, &[], &[], Some(viewer));

        assert_eq!(detail.viewer.as_ref().unwrap().join_button, JoinButton::RequestPending);
        assert_eq!(detail.join_button(Some(emma)).label(), "Request Pending");
    }

    #[test]
    fn test_pending_requests_visible_to_creator_only() {
        let creator = Uuid::new_v4();
        let s = society(creator);
        let emma = Uuid::new_v4();
        let other = Uuid::new_v4();
        let requests = vec![request(s.id, emma), request(s.id, other)];

        let admin_view = SocietyDetail::build(
            &s,
            &[],
            &requests,
            &[],
            &[],
            Some(Viewer { user_id: creator, email: "admin@example.com" }),
        );
        assert_eq!(admin_view.pending_requests.len(), 2);
        assert!(admin_view.viewer.unwrap().is_admin);

        let emma_view = SocietyDetail::build(
            &s,
            &[],
            &requests,
            &[],
            &[],
            Some(Viewer { user_id: emma, email: "emma@example.com" }),
        );
        assert_eq!(emma_view.pending_requests.len(), 1);

        let anonymous = SocietyDetail::build(&s, &[], &requests, &[], &[], None);
        assert!(anonymous.pending_requests.is_empty());
        assert!(anonymous.viewer.is_none());
        assert_eq!(anonymous.join_button(None), JoinButton::JoinSociety);
    }

    #[test]
    fn test_default_logo_uses_category_placeholder() {
        let s = society(Uuid::new_v4());
        let detail = SocietyDetail::build(&s, &[], &[], &[], &[], None);

        match detail.logo {
            Logo::Placeholder { icon, .. } => assert_eq!(icon, Icon::TheaterMasks),
            other => panic!("expected placeholder, got {:?}", other),
        }
        assert_eq!(detail.tagline.chars().count(), 123);
        assert!(!detail.links.is_empty());
    }

    #[test]
    fn test_society_card() {
        let mut s = society(Uuid::new_v4());
        s.category = String::new();
        s.logo = Some("https://cdn.example.com/logo.png".to_string());
        let row = SocietyWithCounts { society: s, member_count: 4, event_count: 2 };

        let card = SocietyCard::from(&row);
        assert_eq!(card.category, "Other");
        assert_eq!(card.members_count, 4);
        assert_eq!(card.excerpt.unwrap().chars().count(), 93);
        assert!(matches!(card.logo, Logo::Image { .. }));
    }

    #[test]
    fn test_user_society_card_roles() {
        let creator = Uuid::new_v4();
        let mut s = society(creator);
        s.deactivated = true;
        let row = SocietyWithCounts { society: s, member_count: 3, event_count: 1 };

        let admin = UserSocietyCard::new(&row, creator);
        assert_eq!(admin.role, Role::Admin);
        assert!(admin.can_request_activation);

        let member = UserSocietyCard::new(&row, Uuid::new_v4());
        assert_eq!(member.role, Role::Member);
        assert!(!member.can_request_activation);
        assert!(member.deactivated);
    }

    #[test]
    fn test_member_view_avatar() {
        let user = summary("emma");
        let view = MemberView::from(&user);
        assert_eq!(view.initial, "E");
        assert_eq!(view.avatar_color, avatar_color(&user.id.to_string()));
    }

    #[test]
    fn test_detail_round_trips_through_json() {
        let s = society(Uuid::new_v4());
        let members = vec![summary("john")];
        let detail = SocietyDetail::build(&s, &members, &[], &[], &[], None);

        let json = serde_json::to_string(&detail).unwrap();
        let parsed: SocietyDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.members, detail.members);
        assert_eq!(parsed.logo, detail.logo);
    }
}
