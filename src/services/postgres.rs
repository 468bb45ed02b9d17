use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgConnection, PgPool, Row};
use std::time::Duration;
use crate::config::StorageSettings;
use crate::core::relationships::{apply_accept, check_request, RelationshipError};
use crate::models::{
    Availability, AvailabilityStatus, Message, Profile, ProfileMap, Relationships, UserAccount,
};
use super::store::{
    AvailabilityStore, MessageStore, ProfileStore, RelationshipStore, Store, StoreError, UserStore,
};

/// PostgreSQL storage backend
///
/// Schema lives in `migrations/` and is applied on startup. Relationship
/// transitions run inside a single transaction guarded by an advisory lock
/// on the user pair, so crossed requests and double accepts serialize.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL store from settings
    pub async fn from_settings(settings: &StorageSettings) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL (max {} connections)", settings.max_connections);

        Self::new(
            &settings.database_url,
            settings.max_connections,
            settings.min_connections,
            Duration::from_secs(settings.acquire_timeout_secs),
            Duration::from_secs(settings.idle_timeout_secs),
        )
        .await
    }
}

/// Decode a TEXT column holding one of our serde enums
fn parse_text<T: DeserializeOwned>(value: String) -> Result<T, StoreError> {
    Ok(serde_json::from_value(serde_json::Value::String(value))?)
}

fn row_to_account(row: &PgRow) -> Result<UserAccount, StoreError> {
    Ok(UserAccount {
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        salt: row.try_get("salt")?,
        role: parse_text(row.try_get("role")?)?,
        created_at: row.try_get("created_at")?,
    })
}

/// Goals are JSONB so rows written before the multi-goal schema (a bare
/// string) are normalized here, on the way out of the store.
fn row_to_profile(row: &PgRow) -> Result<Profile, StoreError> {
    let goals: serde_json::Value = row.try_get("study_goals")?;
    let profile = Profile {
        classes: row.try_get("classes")?,
        study_preference: parse_text(row.try_get("study_preference")?)?,
        academic_year: parse_text(row.try_get("academic_year")?)?,
        study_goals: serde_json::from_value(goals)?,
        study_frequency: parse_text(row.try_get("study_frequency")?)?,
    };
    Ok(profile.normalized())
}

fn row_to_message(row: &PgRow) -> Result<Message, StoreError> {
    Ok(Message {
        id: row.try_get("id")?,
        sender: row.try_get("sender")?,
        receiver: row.try_get("receiver")?,
        content: row.try_get("content")?,
        timestamp: row.try_get("sent_at")?,
        read: row.try_get("read")?,
    })
}

/// Order-independent key for a user pair
fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}|{}", a, b)
    } else {
        format!("{}|{}", b, a)
    }
}

async fn lock_pair(conn: &mut PgConnection, a: &str, b: &str) -> Result<(), StoreError> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(pair_key(a, b))
        .execute(conn)
        .await?;
    Ok(())
}

async fn load_relationships(
    conn: &mut PgConnection,
    username: &str,
) -> Result<Relationships, StoreError> {
    let pending = sqlx::query(
        r#"
            SELECT from_user
            FROM friend_requests
            WHERE to_user = $1
            ORDER BY created_at
        "#,
    )
    .bind(username)
    .fetch_all(&mut *conn)
    .await?
    .iter()
    .map(|row| row.try_get("from_user"))
    .collect::<Result<Vec<String>, _>>()?;

    let friends = sqlx::query(
        r#"
            SELECT friend
            FROM friendships
            WHERE username = $1
            ORDER BY created_at
        "#,
    )
    .bind(username)
    .fetch_all(&mut *conn)
    .await?
    .iter()
    .map(|row| row.try_get("friend"))
    .collect::<Result<Vec<String>, _>>()?;

    Ok(Relationships { pending, friends })
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn create_user(&self, account: UserAccount) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO users (username, password_hash, salt, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        let result = sqlx::query(query)
            .bind(&account.username)
            .bind(&account.password_hash)
            .bind(&account.salt)
            .bind(account.role.as_str())
            .bind(account.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Conflict(
                format!("username {} already exists", account.username),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        let query = r#"
            SELECT username, password_hash, salt, role, created_at
            FROM users
            WHERE username = $1
        "#;

        sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(row_to_account)
            .transpose()
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, StoreError> {
        let query = r#"
            SELECT username, password_hash, salt, role, created_at
            FROM users
            ORDER BY username
        "#;

        sqlx::query(query)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_account)
            .collect()
    }
}

#[async_trait]
impl ProfileStore for PostgresStore {
    async fn get_profile(&self, username: &str) -> Result<Option<Profile>, StoreError> {
        let query = r#"
            SELECT username, classes, study_preference, academic_year, study_goals, study_frequency
            FROM profiles
            WHERE username = $1
        "#;

        sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(row_to_profile)
            .transpose()
    }

    async fn get_all_profiles(&self) -> Result<ProfileMap, StoreError> {
        let query = r#"
            SELECT username, classes, study_preference, academic_year, study_goals, study_frequency
            FROM profiles
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let mut profiles = ProfileMap::new();
        for row in &rows {
            let username: String = row.try_get("username")?;
            profiles.insert(username, row_to_profile(row)?);
        }

        tracing::debug!("Loaded {} profiles", profiles.len());
        Ok(profiles)
    }

    async fn upsert_profile(&self, username: &str, profile: Profile) -> Result<(), StoreError> {
        let profile = profile.normalized();
        let query = r#"
            INSERT INTO profiles
                (username, classes, study_preference, academic_year, study_goals, study_frequency, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (username)
            DO UPDATE SET
                classes = EXCLUDED.classes,
                study_preference = EXCLUDED.study_preference,
                academic_year = EXCLUDED.academic_year,
                study_goals = EXCLUDED.study_goals,
                study_frequency = EXCLUDED.study_frequency,
                updated_at = EXCLUDED.updated_at
        "#;

        sqlx::query(query)
            .bind(username)
            .bind(&profile.classes)
            .bind(profile.study_preference.as_str())
            .bind(profile.academic_year.as_str())
            .bind(serde_json::to_value(&profile.study_goals)?)
            .bind(profile.study_frequency.as_str())
            .execute(&self.pool)
            .await?;

        tracing::debug!("Saved profile for {} ({} classes)", username, profile.classes.len());
        Ok(())
    }
}

#[async_trait]
impl RelationshipStore for PostgresStore {
    async fn get_relationships(&self, username: &str) -> Result<Relationships, StoreError> {
        let mut conn = self.pool.acquire().await?;
        load_relationships(&mut conn, username).await
    }

    async fn send_request(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        lock_pair(&mut tx, from, to).await?;

        let target = load_relationships(&mut tx, to).await?;
        check_request(from, to, &target)?;

        let result = sqlx::query(
            r#"
                INSERT INTO friend_requests (from_user, to_user, created_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (from_user, to_user) DO NOTHING
            "#,
        )
        .bind(from)
        .bind(to)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RelationshipError::AlreadyPending.into());
        }

        tx.commit().await?;
        tracing::debug!("Queued friend request {} -> {}", from, to);
        Ok(())
    }

    async fn accept_request(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        lock_pair(&mut tx, from, to).await?;

        let mut requester = load_relationships(&mut tx, from).await?;
        let mut accepter = load_relationships(&mut tx, to).await?;
        apply_accept(from, to, &mut requester, &mut accepter)?;

        // Both pending directions go, both friendship rows appear, or nothing does
        sqlx::query(
            r#"
                DELETE FROM friend_requests
                WHERE (from_user = $1 AND to_user = $2)
                   OR (from_user = $2 AND to_user = $1)
            "#,
        )
        .bind(from)
        .bind(to)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
                INSERT INTO friendships (username, friend, created_at)
                VALUES ($1, $2, NOW()), ($2, $1, NOW())
                ON CONFLICT (username, friend) DO NOTHING
            "#,
        )
        .bind(from)
        .bind(to)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!("Friendship confirmed: {} <-> {}", from, to);
        Ok(())
    }

    async fn deny_request(&self, from: &str, to: &str) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM friend_requests
            WHERE from_user = $1 AND to_user = $2
        "#;

        let result = sqlx::query(query)
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AvailabilityStore for PostgresStore {
    async fn get_availability(&self, username: &str) -> Result<Availability, StoreError> {
        let query = r#"
            SELECT day, status
            FROM availability
            WHERE username = $1
        "#;

        let rows = sqlx::query(query).bind(username).fetch_all(&self.pool).await?;

        let mut calendar = Availability::new();
        for row in &rows {
            let day: NaiveDate = row.try_get("day")?;
            calendar.insert(day, parse_text(row.try_get("status")?)?);
        }
        Ok(calendar)
    }

    async fn set_availability(
        &self,
        username: &str,
        date: NaiveDate,
        status: AvailabilityStatus,
    ) -> Result<Availability, StoreError> {
        let query = r#"
            INSERT INTO availability (username, day, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (username, day)
            DO UPDATE SET status = EXCLUDED.status
        "#;

        sqlx::query(query)
            .bind(username)
            .bind(date)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        self.get_availability(username).await
    }
}

#[async_trait]
impl MessageStore for PostgresStore {
    async fn insert_message(&self, message: Message) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO messages (id, sender, receiver, content, sent_at, read)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(message.id)
            .bind(&message.sender)
            .bind(&message.receiver)
            .bind(&message.content)
            .bind(message.timestamp)
            .bind(message.read)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn conversation(&self, username: &str, other: &str) -> Result<Vec<Message>, StoreError> {
        let query = r#"
            SELECT id, sender, receiver, content, sent_at, read
            FROM messages
            WHERE (sender = $1 AND receiver = $2)
               OR (sender = $2 AND receiver = $1)
            ORDER BY sent_at ASC
        "#;

        sqlx::query(query)
            .bind(username)
            .bind(other)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_message)
            .collect()
    }

    async fn mark_read(&self, receiver: &str, sender: &str) -> Result<u64, StoreError> {
        let query = r#"
            UPDATE messages
            SET read = TRUE
            WHERE receiver = $1 AND sender = $2 AND read = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(receiver)
            .bind(sender)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn messages_for(&self, username: &str) -> Result<Vec<Message>, StoreError> {
        let query = r#"
            SELECT id, sender, receiver, content, sent_at, read
            FROM messages
            WHERE sender = $1 OR receiver = $1
            ORDER BY sent_at ASC
        "#;

        sqlx::query(query)
            .bind(username)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_message)
            .collect()
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
