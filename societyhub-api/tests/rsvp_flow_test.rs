/// RSVP rules against a seeded database
///
/// Run with `DATABASE_URL=... cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use common::{get, post, send, TestContext};
use serde_json::json;

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_rsvp_rules() {
    let ctx = TestContext::seeded().await.unwrap();

    let quiz = ctx.event_id("Inter-Campus Literary Quiz").await;
    let rsvp_uri = format!("/api/events/{quiz}/rsvp");
    let form = json!({"name": "Guest", "email": "guest@example.com", "reason": "Quiz fan"});

    let (status, body) = send(&ctx.app, post(&rsvp_uri, None, form.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "RSVP confirmed!");
    assert_eq!(body["event"]["rsvp"], "✓ RSVP Confirmed");

    // Other attendees' emails are not handed out
    let (status, card) = send(&ctx.app, get(&format!("/api/events/{quiz}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(card["participants"].as_array().unwrap().is_empty());
    assert_eq!(card["rsvp_count"], 1);

    let literary = ctx.society_id("Literary Society").await;
    let (_, detail) = send(&ctx.app, get(&format!("/api/society/{literary}"), None)).await;
    assert!(!detail.to_string().contains("guest@example.com"));

    // Same email in a different case is still a duplicate
    let shouting = json!({"name": "Guest", "email": "GUEST@example.com", "reason": ""});
    let (status, body) = send(&ctx.app, post(&rsvp_uri, None, shouting)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "You have already RSVPed to this event");

    // Music Society's night is members-only
    let music_night = ctx.event_id("Acoustic Music Night").await;
    let members_uri = format!("/api/events/{music_night}/rsvp");
    let emma_form = json!({"name": "Emma", "email": "emma@example.com", "reason": ""});

    let (status, _) = send(&ctx.app, post(&members_uri, None, emma_form.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, emma_auth) = ctx.login("emma@example.com").await;
    let (status, _) = send(&ctx.app, post(&members_uri, Some(&emma_auth), emma_form)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Its detail page follows the same rule
    let night_uri = format!("/api/events/{music_night}");
    let (status, _) = send(&ctx.app, get(&night_uri, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&ctx.app, get(&night_uri, Some(&emma_auth))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, sara_auth) = ctx.login("sara@example.com").await;
    let (status, card) = send(&ctx.app, get(&night_uri, Some(&sara_auth))).await;
    assert_eq!(status, StatusCode::OK, "{card}");
    assert_eq!(card["title"], "Acoustic Music Night");

    // Community Service Society is deactivated
    let bake_sale = ctx.event_id("Charity Bake Sale").await;
    let (status, _) = send(
        &ctx.app,
        post(&format!("/api/events/{bake_sale}/rsvp"), None, form),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, events) = send(&ctx.app, get("/api/events", None)).await;
    let titles: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["title"].as_str())
        .collect();
    assert!(titles.contains(&"Inter-Campus Literary Quiz"));
    assert!(!titles.contains(&"Acoustic Music Night"));
}
