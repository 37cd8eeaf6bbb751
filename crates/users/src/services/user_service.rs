//! Account operations for the signed-in user.

use neighborhood_common::{Field, FieldError, InputKind};
use neighborhood_database::{ProductRepository, ProfileChanges, User, UserRepository};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::types::{EditProfileRequest, SaleView, UserError, UserResult, UserView};

const MISSING_CONTACT: &str = "이메일 혹은 전화번호 중 하나를 입력하세요.";
const MISSING_NAME: &str = "이름을 입력하세요.";

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    products: ProductRepository,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            products: ProductRepository::new(pool),
        }
    }

    pub async fn me(&self, user_id: i64) -> UserResult<UserView> {
        Ok(self.get_user(user_id).await?.into())
    }

    /// Applies the profile edit form.
    ///
    /// Blank fields are treated as "not changed". Values equal to the stored
    /// ones skip the format and uniqueness checks.
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: EditProfileRequest,
    ) -> UserResult<UserView> {
        let user = self.get_user(user_id).await?;
        let changes = self.collect_changes(&user, &request).await?;

        if changes.is_empty() {
            return Ok(user.into());
        }

        let updated = self.users.update_profile(user_id, &changes).await?;
        info!(user_id, "profile updated");
        Ok(updated.into())
    }

    pub async fn delete_account(&self, user_id: i64) -> UserResult<()> {
        if !self.users.delete(user_id).await? {
            return Err(UserError::UserNotFound);
        }
        warn!(user_id, "account deleted");
        Ok(())
    }

    pub async fn sales(&self, user_id: i64) -> UserResult<Vec<SaleView>> {
        let sales = self.products.sales_for_user(user_id).await?;
        Ok(sales.into_iter().map(SaleView::from).collect())
    }

    async fn get_user(&self, user_id: i64) -> UserResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    async fn collect_changes(
        &self,
        user: &User,
        request: &EditProfileRequest,
    ) -> UserResult<ProfileChanges> {
        let contact_cleared = matches!(
            (request.email.as_deref(), request.phone.as_deref()),
            (Some(email), Some(phone)) if email.trim().is_empty() && phone.trim().is_empty()
        );
        if contact_cleared {
            return Err(FieldError::new("contact", MISSING_CONTACT).into());
        }

        if request.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(FieldError::new("name", MISSING_NAME).into());
        }

        let mut changes = ProfileChanges::default();

        if let Some(name) = filled(request.name.as_deref()) {
            if name != user.name {
                changes.name = Some(name.to_string());
            }
        }

        if let Some(email) = filled(request.email.as_deref()) {
            let email = InputKind::Email.normalize(email);
            if user.email.as_deref() != Some(email.as_str()) {
                Field::new("email", InputKind::Email).check(Some(&email))?;
                if self.users.find_by_email(&email).await?.is_some() {
                    return Err(UserError::EmailTaken);
                }
                changes.email = Some(email);
            }
        }

        if let Some(raw) = filled(request.phone.as_deref()) {
            Field::new("phone", InputKind::Phone).check(Some(raw))?;
            let phone = InputKind::Phone.normalize(raw);
            if user.phone.as_deref() != Some(phone.as_str()) {
                if self.users.find_by_phone(&phone).await?.is_some() {
                    return Err(UserError::PhoneTaken);
                }
                changes.phone = Some(phone);
            }
        }

        if let Some(avatar) = filled(request.avatar_url.as_deref()) {
            changes.avatar = Some(avatar.to_string());
        }

        Ok(changes)
    }
}

fn filled(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
