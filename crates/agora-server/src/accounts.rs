//! Account registration, login and status.

use agora_store::{Database, Entity, NewUser, ReadCollection, User, UserRepository, WriteCollection};
use tracing::{info, warn};

use crate::error::{Result, ServiceError};
use crate::locks::CollectionLocks;

#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
    locks: CollectionLocks,
}

impl AccountService {
    pub fn new(db: &Database, locks: CollectionLocks) -> Self {
        Self {
            users: db.users(),
            locks,
        }
    }

    /// Register a new active account.  Emails are unique at this layer; the
    /// store itself does not enforce it.
    pub fn signup(&self, profile: NewUser, raw_password: &str) -> Result<User> {
        if profile.email.trim().is_empty() {
            return Err(ServiceError::BadRequest("email is required".into()));
        }
        if raw_password.is_empty() {
            return Err(ServiceError::BadRequest("password is required".into()));
        }

        let user = User::register(profile, raw_password)?;
        self.locks.with(User::COLLECTION, || -> Result<()> {
            if self.users.find_by_email(&user.email)?.is_some() {
                warn!(email = %user.email, "signup rejected, email already registered");
                return Err(ServiceError::UserAlreadyExists(user.email.clone()));
            }
            self.users.add(user.clone())?;
            Ok(())
        })?;

        info!(id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    /// Authenticate by email and password.  Every failure is reported as
    /// [`ServiceError::InvalidCredentials`].
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.users.find_by_email(email)? else {
            warn!(email, "login failed, unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        match user.verify_password(password) {
            Ok(true) => {
                info!(id = %user.id, "user logged in");
                Ok(user)
            }
            Ok(false) => {
                warn!(email, "login failed, wrong password");
                Err(ServiceError::InvalidCredentials)
            }
            Err(e) => {
                warn!(email, error = %e, "login failed, stored hash unusable");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    pub fn user(&self, user_id: &str) -> Result<User> {
        self.users
            .find_by_id(user_id)?
            .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.find_all()?)
    }

    /// Mark a user active (online) or inactive.
    pub fn set_status(&self, user_id: &str, active: bool) -> Result<User> {
        let user = self.locks.with(User::COLLECTION, || -> Result<User> {
            let mut user = self.user(user_id)?;
            user.is_active = active;
            self.users
                .update(user)?
                .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))
        })?;

        info!(id = %user.id, active, "user status changed");
        Ok(user)
    }
}
