/// Seeding a real database with the bundled fixtures
///
/// Run with `DATABASE_URL=... cargo test -p societyhub-seed -- --ignored`.

use societyhub_seed::{fixtures::SeedData, seeder, store::PgSeedStore};
use societyhub_shared::{
    auth::password::verify_password,
    db::migrations::run_migrations,
    models::{event::Event, society::Society, user::User},
};
use sqlx::PgPool;
use std::path::Path;

async fn seed_once(pool: &PgPool, data: &SeedData) {
    let mut store = PgSeedStore::begin(pool).await.unwrap();
    seeder::run(&mut store, data).await.unwrap();
    store.commit().await.unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_reseeding_is_idempotent_and_atomic() {
    let pool = PgPool::connect(&std::env::var("DATABASE_URL").unwrap())
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();

    let data = SeedData::load_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
        .await
        .unwrap();

    seed_once(&pool, &data).await;
    seed_once(&pool, &data).await;

    assert_eq!(User::count(&pool).await.unwrap(), data.users.len() as i64);
    assert_eq!(Society::count(&pool).await.unwrap(), data.societies.len() as i64);
    assert_eq!(Event::count(&pool).await.unwrap(), data.events.len() as i64);

    let users = User::list_all(&pool).await.unwrap();
    assert!(users.iter().all(|u| u.password_hash != "1122"));

    let john = User::find_by_email(&pool, "john@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("1122", &john.password_hash).unwrap());

    // Two users with the same email violate the unique constraint mid-run
    let mut broken = data.clone();
    broken.users.push(broken.users[0].clone());

    {
        let mut store = PgSeedStore::begin(&pool).await.unwrap();
        assert!(seeder::run(&mut store, &broken).await.is_err());
        // dropped without commit
    }

    assert_eq!(User::count(&pool).await.unwrap(), data.users.len() as i64);
}
