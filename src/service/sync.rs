use entity::user::UserRole;
use sea_orm::DatabaseConnection;

use crate::{
    data::{apartment::ApartmentRepository, user::UserRepository},
    error::{auth::AuthError, Error},
    model::user::{CheckPhoneResponse, SyncUserRequest},
    provider::identity::VerifiedIdentity,
};

/// Keeps resident accounts consistent with apartment records and links
/// identity provider subjects to provisioned accounts on first sign-in.
pub struct ResidentSyncService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResidentSyncService<'a> {
    /// Creates a new instance of [`ResidentSyncService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Provisions resident accounts for an apartment's owner and tenant
    /// phones and points the unit's billing target at the right one.
    ///
    /// The tenant, when present, wins over the owner as the billing target.
    /// Upserts are keyed by phone, so re-saving the same apartment changes
    /// nothing. Returns the apartment with its refreshed `resident_id`.
    pub async fn reconcile_apartment(
        &self,
        apartment: entity::apartment::Model,
    ) -> Result<entity::apartment::Model, Error> {
        let user_repository = UserRepository::new(self.db);
        let apartment_repository = ApartmentRepository::new(self.db);

        let mut owner_id = None;
        if let Some((phone, name)) = resident_pair(
            apartment.owner_phone.as_deref(),
            Some(apartment.owner_name.as_str()),
        ) {
            let owner = user_repository
                .upsert_resident(phone.to_string(), name.to_string(), UserRole::Owner)
                .await?;
            owner_id = Some(owner.id);
        }

        let mut tenant_id = None;
        if let Some((phone, name)) = resident_pair(
            apartment.tenant_phone.as_deref(),
            apartment.tenant_name.as_deref(),
        ) {
            let tenant = user_repository
                .upsert_resident(phone.to_string(), name.to_string(), UserRole::Tenant)
                .await?;
            tenant_id = Some(tenant.id);
        }

        let resident_id = tenant_id.or(owner_id);
        if apartment.resident_id == resident_id {
            return Ok(apartment);
        }

        let apartment = apartment_repository
            .set_resident_id(apartment.id, resident_id)
            .await?
            .ok_or(Error::NotFound("Apartment"))?;

        Ok(apartment)
    }

    /// Resolves a verified identity to its local account, claiming a
    /// provisioned row by phone number on first sign-in.
    pub async fn resolve_identity(
        &self,
        identity: &VerifiedIdentity,
    ) -> Result<entity::user::Model, Error> {
        let user_repository = UserRepository::new(self.db);

        if let Some(user) = user_repository.get_by_external_id(&identity.id).await? {
            return Ok(user);
        }

        let phone = match &identity.phone {
            Some(phone) if !phone.is_empty() => phone,
            _ => return Err(AuthError::UserNotProvisioned(identity.id.clone()).into()),
        };

        let claimed = user_repository
            .claim_external_id(phone, &identity.id, identity.email.clone(), None)
            .await?;
        if claimed == 0 {
            return Err(AuthError::PhoneNotRegistered(phone.clone()).into());
        }

        user_repository
            .get_by_external_id(&identity.id)
            .await?
            .ok_or(Error::NotFound("User"))
    }

    /// Explicit post-login sync; same claim path as [`Self::resolve_identity`]
    /// but driven by the client payload, which may carry a fuller name.
    pub async fn sync_user(
        &self,
        request: SyncUserRequest,
    ) -> Result<entity::user::Model, Error> {
        let user_repository = UserRepository::new(self.db);

        if let Some(user) = user_repository.get_by_external_id(&request.id).await? {
            return Ok(user);
        }

        let phone = match &request.phone {
            Some(phone) if !phone.is_empty() => phone,
            _ => return Err(AuthError::UserNotProvisioned(request.id.clone()).into()),
        };

        let claimed = user_repository
            .claim_external_id(
                phone,
                &request.id,
                request.email.clone(),
                Some(request.full_name.clone()),
            )
            .await?;
        if claimed == 0 {
            return Err(AuthError::PhoneNotRegistered(phone.clone()).into());
        }

        user_repository
            .get_by_external_id(&request.id)
            .await?
            .ok_or(Error::NotFound("User"))
    }

    /// Pre-login probe: tells the client whether a phone number has been
    /// provisioned by a manager, and in which role.
    pub async fn check_phone(&self, phone: &str) -> Result<CheckPhoneResponse, Error> {
        let user_repository = UserRepository::new(self.db);

        let user = user_repository.get_by_phone(phone).await?;

        Ok(match user {
            Some(user) => CheckPhoneResponse::found(&user),
            None => CheckPhoneResponse::not_found(),
        })
    }
}

/// A phone/name pair is only synced when both carry text; blank fields mean
/// the manager has not registered that resident yet.
fn resident_pair<'a>(
    phone: Option<&'a str>,
    name: Option<&'a str>,
) -> Option<(&'a str, &'a str)> {
    let phone = phone.map(str::trim).filter(|phone| !phone.is_empty())?;
    let name = name.map(str::trim).filter(|name| !name.is_empty())?;

    Some((phone, name))
}
