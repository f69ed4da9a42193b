//! Admin session gate. There is no credential check behind it: the flag only
//! keeps the operator commands out of the way of the public flow.

use crate::error::{Result, ScratchError};
use crate::storage::{keys, KvStore};
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_SESSION_TTL: Duration = Duration::hours(24);

pub struct SessionGuard<'a, S: KvStore + ?Sized> {
    storage: &'a S,
    ttl: Duration,
}

impl<'a, S: KvStore + ?Sized> SessionGuard<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self::with_ttl(storage, DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(storage: &'a S, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    /// Expired sessions are cleared as a side effect
    pub fn is_authenticated(&self, now: DateTime<Utc>) -> Result<bool> {
        if let Some(started) = self.session_started()? {
            if now - started > self.ttl {
                tracing::info!("Admin session expired");
                self.logout()?;
                return Ok(false);
            }
        }

        Ok(self.storage.get(keys::ADMIN_AUTH)?.as_deref() == Some("true"))
    }

    pub fn require(&self, now: DateTime<Utc>) -> Result<()> {
        if self.is_authenticated(now)? {
            Ok(())
        } else {
            Err(ScratchError::unauthorized("admin session required"))
        }
    }

    pub fn login(&self, now: DateTime<Utc>) -> Result<()> {
        self.storage.set(keys::ADMIN_AUTH, "true")?;
        self.storage
            .set(keys::ADMIN_SESSION, &now.timestamp_millis().to_string())?;

        tracing::info!("Admin session started");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.storage.remove(keys::ADMIN_AUTH)?;
        self.storage.remove(keys::ADMIN_SESSION)?;
        Ok(())
    }

    pub fn session_started(&self) -> Result<Option<DateTime<Utc>>> {
        let started = self
            .storage
            .get(keys::ADMIN_SESSION)?
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis);
        Ok(started)
    }

    pub fn expires_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.session_started()?.map(|started| started + self.ttl))
    }
}
