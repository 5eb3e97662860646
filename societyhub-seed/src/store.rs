/// Storage backends for the seeder
///
/// The seeder only needs to wipe the dataset, insert rows in dependency
/// order and read back each society's event sequence. [`PgSeedStore`] does
/// this inside a single transaction; tests supply an in-memory store.
///
/// # Example
///
/// ```no_run
/// use societyhub_seed::{fixtures::SeedData, seeder, store::PgSeedStore};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> anyhow::Result<()> {
/// let data = SeedData::load_dir("data").await?;
/// let mut store = PgSeedStore::begin(&pool).await?;
/// let summary = seeder::run(&mut store, &data).await?;
/// store.commit().await?;
/// println!("{} users", summary.users);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use societyhub_shared::models::{
    event::{CreateEvent, Event},
    society::{CreateSociety, Society},
    user::{CreateUser, User},
};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::SeedResult;

#[async_trait]
pub trait SeedStore: Send {
    /// Removes every event, society and user
    async fn clear(&mut self) -> SeedResult<()>;

    async fn insert_user(&mut self, data: CreateUser) -> SeedResult<User>;

    async fn insert_society(&mut self, data: CreateSociety) -> SeedResult<Society>;

    async fn insert_event(&mut self, data: CreateEvent) -> SeedResult<Event>;

    /// The society's event sequence as stored
    async fn society_event_ids(&mut self, society_id: Uuid) -> SeedResult<Vec<Uuid>>;
}

/// Postgres store that holds one transaction for the whole run
///
/// Dropping it without [`commit`](Self::commit) rolls everything back, so a
/// failed run leaves the previous dataset in place.
pub struct PgSeedStore {
    tx: Transaction<'static, Postgres>,
}

impl PgSeedStore {
    pub async fn begin(pool: &PgPool) -> SeedResult<Self> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    pub async fn commit(self) -> SeedResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl SeedStore for PgSeedStore {
    async fn clear(&mut self) -> SeedResult<()> {
        // Children first: events restrict society deletion
        let events = Event::delete_all(&mut *self.tx).await?;
        let societies = Society::delete_all(&mut *self.tx).await?;
        let users = User::delete_all(&mut *self.tx).await?;

        tracing::debug!(events, societies, users, "Cleared existing data");
        Ok(())
    }

    async fn insert_user(&mut self, data: CreateUser) -> SeedResult<User> {
        Ok(User::create(&mut *self.tx, data).await?)
    }

    async fn insert_society(&mut self, data: CreateSociety) -> SeedResult<Society> {
        Ok(Society::create(&mut *self.tx, data).await?)
    }

    async fn insert_event(&mut self, data: CreateEvent) -> SeedResult<Event> {
        Ok(Event::create(&mut *self.tx, data).await?)
    }

    async fn society_event_ids(&mut self, society_id: Uuid) -> SeedResult<Vec<Uuid>> {
        Ok(Event::ids_for_society(&mut *self.tx, society_id).await?)
    }
}
