use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use entity::user::UserRole;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use sea_orm::DatabaseConnection;

use crate::{
    data::{
        building::BuildingRepository, subscription::SubscriptionRepository,
        super_admin::SuperAdminRepository, user::UserRepository,
    },
    error::{auth::AuthError, Error},
    model::admin::{
        AdminClaims, AdminDto, AdminLoginRequest, AdminLoginResponse, AdminSetupRequest,
        AdminSetupResponse, ChangePasswordRequest, CreateManagerRequest, StatsDto,
        SubscriptionDto, UpdateManagerRequest,
    },
};

/// Issued tokens stay valid for one week.
const TOKEN_TTL_DAYS: i64 = 7;

/// Super-admin console: credential auth, manager administration and platform
/// stats. Separate from the resident realm, which authenticates against the
/// external identity provider.
pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    token_secret: &'a str,
}

impl<'a> AdminService<'a> {
    /// Creates a new instance of [`AdminService`]
    pub fn new(db: &'a DatabaseConnection, token_secret: &'a str) -> Self {
        Self { db, token_secret }
    }

    /// One-time bootstrap of the first console account, gated by a shared
    /// setup key.
    pub async fn setup(
        &self,
        request: AdminSetupRequest,
        expected_key: &str,
    ) -> Result<AdminSetupResponse, Error> {
        request.validate()?;
        if request.setup_key != expected_key {
            return Err(AuthError::InvalidSetupKey.into());
        }

        let super_admin_repository = SuperAdminRepository::new(self.db);

        if super_admin_repository.count().await? > 0 {
            return Err(Error::Conflict("Setup already completed".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let admin = super_admin_repository
            .create(request.email, password_hash, request.full_name)
            .await?;

        Ok(AdminSetupResponse {
            success: true,
            admin_id: admin.id,
        })
    }

    pub async fn login(&self, request: AdminLoginRequest) -> Result<AdminLoginResponse, Error> {
        let super_admin_repository = SuperAdminRepository::new(self.db);

        let admin = super_admin_repository
            .get_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidLogin)?;

        if !verify_password(&request.password, &admin.password_hash)? {
            return Err(AuthError::InvalidLogin.into());
        }

        let token = self.sign_token(&admin)?;

        Ok(AdminLoginResponse {
            token,
            admin: AdminDto::from(admin),
        })
    }

    pub async fn change_password(
        &self,
        admin_id: i32,
        request: ChangePasswordRequest,
    ) -> Result<(), Error> {
        request.validate()?;

        let super_admin_repository = SuperAdminRepository::new(self.db);

        let admin = super_admin_repository
            .get_by_id(admin_id)
            .await?
            .ok_or(Error::NotFound("Admin"))?;

        if !verify_password(&request.current_password, &admin.password_hash)? {
            return Err(AuthError::IncorrectPassword.into());
        }

        let password_hash = hash_password(&request.new_password)?;
        super_admin_repository
            .update_password(admin.id, password_hash)
            .await?;

        Ok(())
    }

    /// Decodes a console token and re-resolves the admin row, so deleting the
    /// row revokes outstanding tokens.
    pub async fn verify_token(&self, token: &str) -> Result<entity::super_admin::Model, Error> {
        let claims = jsonwebtoken::decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.token_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidAdminToken)?
        .claims;

        let super_admin_repository = SuperAdminRepository::new(self.db);

        super_admin_repository
            .get_by_id(claims.sub)
            .await?
            .ok_or_else(|| AuthError::InvalidAdminToken.into())
    }

    pub async fn create_manager(
        &self,
        request: CreateManagerRequest,
    ) -> Result<entity::user::Model, Error> {
        request.validate()?;

        let user_repository = UserRepository::new(self.db);

        let manager = user_repository
            .create_manager(request.full_name, request.email, request.phone)
            .await?;

        Ok(manager)
    }

    pub async fn update_manager(
        &self,
        id: i32,
        request: UpdateManagerRequest,
    ) -> Result<entity::user::Model, Error> {
        request.validate()?;

        let user_repository = UserRepository::new(self.db);

        let manager = user_repository
            .get_by_id(id)
            .await?
            .filter(|user| user.role == UserRole::Manager)
            .ok_or(Error::NotFound("Manager"))?;

        let manager = user_repository
            .update(manager.id, request.full_name, request.email, request.phone)
            .await?
            .ok_or(Error::NotFound("Manager"))?;

        Ok(manager)
    }

    /// Deletes a manager unless buildings still reference them.
    pub async fn delete_manager(&self, id: i32) -> Result<(), Error> {
        let user_repository = UserRepository::new(self.db);
        let building_repository = BuildingRepository::new(self.db);

        let manager = user_repository
            .get_by_id(id)
            .await?
            .filter(|user| user.role == UserRole::Manager)
            .ok_or(Error::NotFound("Manager"))?;

        if building_repository.count_by_manager_id(manager.id).await? > 0 {
            return Err(Error::Conflict(
                "Cannot delete a manager with assigned buildings".to_string(),
            ));
        }

        user_repository.delete(manager.id).await?;

        Ok(())
    }

    pub async fn list_managers(&self) -> Result<Vec<entity::user::Model>, Error> {
        let user_repository = UserRepository::new(self.db);

        let managers = user_repository
            .get_many_by_roles(vec![UserRole::Manager])
            .await?;

        Ok(managers)
    }

    pub async fn list_residents(&self) -> Result<Vec<entity::user::Model>, Error> {
        let user_repository = UserRepository::new(self.db);

        let residents = user_repository
            .get_many_by_roles(vec![UserRole::Owner, UserRole::Tenant])
            .await?;

        Ok(residents)
    }

    pub async fn list_subscriptions(&self) -> Result<Vec<SubscriptionDto>, Error> {
        let subscription_repository = SubscriptionRepository::new(self.db);

        let subscriptions = subscription_repository
            .get_all_with_user()
            .await?
            .into_iter()
            .map(|(subscription, user)| SubscriptionDto::from_joined(subscription, user))
            .collect();

        Ok(subscriptions)
    }

    pub async fn stats(&self) -> Result<StatsDto, Error> {
        let user_repository = UserRepository::new(self.db);
        let building_repository = BuildingRepository::new(self.db);
        let subscription_repository = SubscriptionRepository::new(self.db);

        Ok(StatsDto {
            total_managers: user_repository
                .count_by_roles(vec![UserRole::Manager])
                .await?,
            total_residents: user_repository
                .count_by_roles(vec![UserRole::Owner, UserRole::Tenant])
                .await?,
            total_buildings: building_repository.count().await?,
            total_subscriptions: subscription_repository.count().await?,
            active_subscriptions: subscription_repository.count_by_status("active").await?,
        })
    }

    fn sign_token(&self, admin: &entity::super_admin::Model) -> Result<String, Error> {
        let exp = Utc::now() + Duration::days(TOKEN_TTL_DAYS);
        let claims = AdminClaims {
            sub: admin.id,
            email: admin.email.clone(),
            exp: exp.timestamp() as usize,
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.token_secret.as_bytes()),
        )
        .map_err(|err| Error::Internal(format!("failed to sign admin token: {err}")))
    }
}

fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| Error::Internal(format!("failed to hash password: {err}")))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| Error::Internal(format!("stored password hash is invalid: {err}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
