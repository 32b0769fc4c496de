use std::sync::Arc;

use crate::auth::PasswordEncoder;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, NewUser, Page, UpdateUser, User};
use crate::repository::UserRepository;

/// Business rules for users: unique emails, hashed passwords, credential checks.
///
/// Emails are trimmed and lower-cased before they reach the repository, so uniqueness
/// and lookups are case-insensitive.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    encoder: Arc<dyn PasswordEncoder>,
}

/// Trims and lower-cases an email, rejecting blank or malformed input.
fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::invalid("email", "must not be blank"));
    }
    if !validator::validate_email(email.as_str()) {
        return Err(AppError::invalid("email", "must be a valid email address"));
    }
    Ok(email)
}

fn check_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::invalid("password", "must not be empty"));
    }
    Ok(())
}

/// Empty or whitespace-only names are stored as absent.
fn clean_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self {
            repository,
            encoder,
        }
    }

    /// Registers a user. The raw password is hashed and never stored.
    pub async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let email = normalize_email(&input.email)?;
        check_password(&input.password)?;

        if self.repository.exists_by_email(&email).await? {
            log::debug!("Rejected registration for an existing email");
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.encoder.encode(&input.password)?;
        // The insert can still fail with DuplicateEmail if a concurrent request won the race.
        let user = self
            .repository
            .insert(NewUser {
                email,
                password_hash,
                first_name: clean_name(input.first_name),
                last_name: clean_name(input.last_name),
            })
            .await?;

        log::info!("Created user {}", user.id);
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<User> {
        let email = email.trim().to_lowercase();
        self.repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with email '{}' not found", email)))
    }

    pub async fn get_all_users(&self) -> AppResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Zero-based page of users ordered by id.
    pub async fn get_users_page(&self, page: u32, size: u32) -> AppResult<Page<User>> {
        let size = size.max(1);
        let total = self.repository.count().await?;
        let offset = u64::from(page) * u64::from(size);
        let content = self.repository.find_page(offset, u64::from(size)).await?;
        Ok(Page::new(content, page, size, total))
    }

    /// Case-insensitive substring search over emails.
    pub async fn search_by_email(&self, fragment: &str) -> AppResult<Vec<User>> {
        self.repository.search_by_email(fragment.trim()).await
    }

    /// Changes a user's email. Setting the current email again is a no-op.
    pub async fn update_email(&self, id: i64, new_email: &str) -> AppResult<User> {
        let mut user = self.find_by_id(id).await?;
        if !self.apply_email(&mut user, new_email).await? {
            return Ok(user);
        }
        let user = self.repository.save(user).await?;
        log::info!("Updated email of user {}", id);
        Ok(user)
    }

    /// Replaces a user's password with a hash of `new_password`.
    pub async fn update_password(&self, id: i64, new_password: &str) -> AppResult<User> {
        let mut user = self.find_by_id(id).await?;
        self.apply_password(&mut user, new_password)?;
        let user = self.repository.save(user).await?;
        log::info!("Updated password of user {}", id);
        Ok(user)
    }

    /// Applies every present field of `update` with the same rules as `update_email` and
    /// `update_password`, then persists once.
    pub async fn update_user(&self, id: i64, update: UpdateUser) -> AppResult<User> {
        let mut user = self.find_by_id(id).await?;
        let mut changed = false;

        if let Some(email) = update.email.as_deref() {
            changed |= self.apply_email(&mut user, email).await?;
        }
        if let Some(password) = update.password.as_deref() {
            self.apply_password(&mut user, password)?;
            changed = true;
        }
        if update.first_name.is_some() {
            user.first_name = clean_name(update.first_name);
            changed = true;
        }
        if update.last_name.is_some() {
            user.last_name = clean_name(update.last_name);
            changed = true;
        }

        if !changed {
            return Ok(user);
        }
        let user = self.repository.save(user).await?;
        log::info!("Updated user {}", id);
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        let user = self.find_by_id(id).await?;
        if !self.repository.delete(user.id).await? {
            return Err(AppError::user_not_found(id));
        }
        log::info!("Deleted user {}", id);
        Ok(())
    }

    /// `true` only when a user with `email` exists and `password` matches its hash.
    /// Unknown emails and wrong passwords are `Ok(false)`, not errors.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<bool> {
        Ok(self.authenticate_user(email, password).await?.is_some())
    }

    /// Like `authenticate`, but hands back the matching user.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let user = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                log::debug!("Authentication failed: unknown email");
                return Ok(None);
            }
        };

        if self.encoder.matches(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            log::debug!("Authentication failed for user {}", user.id);
            Ok(None)
        }
    }

    /// Sets `user.email` after the uniqueness check. Returns `false` if nothing changed.
    async fn apply_email(&self, user: &mut User, new_email: &str) -> AppResult<bool> {
        let email = normalize_email(new_email)?;
        if email == user.email {
            return Ok(false);
        }
        if self.repository.exists_by_email(&email).await? {
            return Err(AppError::DuplicateEmail);
        }
        user.email = email;
        Ok(true)
    }

    fn apply_password(&self, user: &mut User, new_password: &str) -> AppResult<()> {
        check_password(new_password)?;
        user.password_hash = self.encoder.encode(new_password)?;
        Ok(())
    }
}
