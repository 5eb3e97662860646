/// Seed runner
///
/// ```text
/// clear ──> users (hashed) ──> societies ──> events ──> link check
///                 │                 ▲  │          ▲
///                 └─ created_by ────┘  └─ society_id
/// ```
///
/// Owners are assigned round-robin: society `i` is created by user
/// `i % users`, event `i` belongs to society `i % societies`.

use serde::Serialize;
use societyhub_shared::{
    auth::password,
    models::{event::CreateEvent, society::CreateSociety, user::CreateUser},
};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{SeedError, SeedResult},
    fixtures::SeedData,
    store::SeedStore,
};

/// Number of fixture emails echoed as demo logins
const SAMPLE_LOGINS: usize = 2;

/// What a seed run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub societies: usize,
    pub events: usize,

    /// Emails of the first few seeded accounts
    pub sample_logins: Vec<String>,
}

/// Wipes the store and rebuilds it from `data`
///
/// # Errors
///
/// Stops at the first failure. The caller decides whether to commit.
pub async fn run<S>(store: &mut S, data: &SeedData) -> SeedResult<SeedSummary>
where
    S: SeedStore + ?Sized,
{
    data.check_assignable()?;

    // Parse dates up front so a bad fixture fails before anything is cleared
    let dates = data
        .events
        .iter()
        .map(|e| e.parsed_date())
        .collect::<SeedResult<Vec<_>>>()?;

    store.clear().await?;
    info!("Existing data cleared");

    let mut user_ids = Vec::with_capacity(data.users.len());
    for fixture in &data.users {
        let password_hash = password::hash_password_blocking(fixture.password.clone()).await?;
        let user = store
            .insert_user(CreateUser {
                username: fixture.username.clone(),
                email: fixture.email.clone(),
                password_hash,
                profile_pic: fixture.profile_pic.clone(),
            })
            .await?;
        user_ids.push(user.id);
    }
    info!(count = user_ids.len(), "Users created");

    let mut society_ids = Vec::with_capacity(data.societies.len());
    for (i, fixture) in data.societies.iter().enumerate() {
        let society = store
            .insert_society(CreateSociety {
                name: fixture.name.clone(),
                description: fixture.description.clone(),
                logo: fixture.logo.clone(),
                cover_image: fixture.cover_image.clone(),
                category: fixture.category.clone(),
                created_by: user_ids[i % user_ids.len()],
                contact_email: fixture.contact_email.clone(),
                phone: fixture.phone.clone(),
                instagram_url: fixture.instagram_url.clone(),
                linkedin_url: fixture.linkedin_url.clone(),
                deactivated: fixture.deactivated,
            })
            .await?;
        society_ids.push(society.id);
    }
    info!(count = society_ids.len(), "Societies created");

    let mut created_events = Vec::with_capacity(data.events.len());
    for (i, (fixture, date)) in data.events.iter().zip(dates).enumerate() {
        let event = store
            .insert_event(CreateEvent {
                society_id: society_ids[i % society_ids.len()],
                title: fixture.title.clone(),
                description: fixture.description.clone(),
                date,
                start_time: fixture.start_time.clone(),
                end_time: fixture.end_time.clone(),
                location: fixture.location.clone(),
                poster: fixture.poster.clone(),
                is_public: fixture.is_public,
            })
            .await?;
        created_events.push((event.id, event.society_id));
    }
    info!(count = created_events.len(), "Events created");

    verify_links(store, &society_ids, &created_events).await?;
    info!("Events linked to societies");

    Ok(SeedSummary {
        users: user_ids.len(),
        societies: society_ids.len(),
        events: created_events.len(),
        sample_logins: data
            .users
            .iter()
            .take(SAMPLE_LOGINS)
            .map(|u| u.email.clone())
            .collect(),
    })
}

/// Confirms every society's event sequence holds exactly the events that
/// point back at it, each once
async fn verify_links<S>(
    store: &mut S,
    society_ids: &[Uuid],
    events: &[(Uuid, Uuid)],
) -> SeedResult<()>
where
    S: SeedStore + ?Sized,
{
    let mut expected: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (event_id, society_id) in events {
        expected.entry(*society_id).or_default().push(*event_id);
    }

    for society_id in society_ids {
        let stored = store.society_event_ids(*society_id).await?;
        let owned = expected.get(society_id).map(Vec::as_slice).unwrap_or(&[]);

        for event_id in owned {
            let hits = stored.iter().filter(|id| *id == event_id).count();
            if hits != 1 {
                return Err(SeedError::Integrity(format!(
                    "event {} appears {} times in society {}",
                    event_id, hits, society_id
                )));
            }
        }

        if stored.len() != owned.len() {
            return Err(SeedError::Integrity(format!(
                "society {} lists {} events, expected {}",
                society_id,
                stored.len(),
                owned.len()
            )));
        }
    }

    Ok(())
}
