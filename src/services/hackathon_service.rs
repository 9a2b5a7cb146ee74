//! Hackathon service
//!
//! Everything the API does with hackathons and the relations hanging off
//! them: lookup, listing, statistics, create/update, registrations, admin
//! relations, and image upload.

use axum::http::HeaderMap;
use chrono::Utc;
use serde_json::{Value, json};
use sqlx::PgPool;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    azure::BlobStore,
    config::StorageConfig,
    constants::{CREATOR_REMARKS, HACKATHON_NAME_HEADER},
    db::repositories::{
        AdminRepository, HackathonChanges, HackathonRepository, NewHackathon, RegistrationDetails,
        RegistrationRepository, UserRepository,
    },
    error::{AppError, AppResult, bad_request, internal_server_error},
    handlers::{
        admin::{
            request::{AddAdminRequest, CreateHackathonRequest, UpdateHackathonRequest},
            response::UploadedFileResponse,
        },
        hackathons::{
            request::RegistrationRequest,
            response::{HackathonListItem, HackathonStat},
        },
    },
    models::{
        AdminHackathonRel, AdminRoleType, Hackathon, HackathonStatus, PermittedHackathons,
        RegistrationStatus, UserHackathonRel,
    },
    utils::{ImageKind, detect_image, image_blob_name},
};

/// Status of an admin relation that is in effect
const ADMIN_REL_ACTIVE: i32 = 1;

/// A file received in a multipart upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

/// Which column a hackathon lookup uses
#[derive(Debug, PartialEq, Eq)]
enum HackathonKey<'a> {
    Id(&'a Uuid),
    Name(&'a str),
}

impl<'a> HackathonKey<'a> {
    /// The id wins when both are given
    fn pick(id: Option<&'a Uuid>, name: Option<&'a str>) -> Option<Self> {
        match (id, name) {
            (Some(id), _) => Some(Self::Id(id)),
            (None, Some(name)) => Some(Self::Name(name)),
            (None, None) => None,
        }
    }
}

/// Hackathon service for business logic
pub struct HackathonService;

impl HackathonService {
    /// Look up by id when given, otherwise by name
    pub async fn get_hackathon_by_name_or_id(
        pool: &PgPool,
        id: Option<&Uuid>,
        name: Option<&str>,
    ) -> AppResult<Option<Hackathon>> {
        match HackathonKey::pick(id, name) {
            Some(HackathonKey::Id(id)) => Self::get_hackathon_by_id(pool, id).await,
            Some(HackathonKey::Name(name)) => Self::get_hackathon_by_name(pool, name).await,
            None => Ok(None),
        }
    }

    pub async fn get_hackathon_by_name(pool: &PgPool, name: &str) -> AppResult<Option<Hackathon>> {
        HackathonRepository::find_by_name(pool, name).await
    }

    pub async fn get_hackathon_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Hackathon>> {
        HackathonRepository::find_by_id(pool, id).await
    }

    /// Accepted participants of a hackathon split by online flag
    pub async fn get_hackathon_stat(pool: &PgPool, hackathon: &Hackathon) -> AppResult<HackathonStat> {
        let accepted = RegistrationStatus::ACCEPTED.map(RegistrationStatus::as_i32);
        let (total, online) =
            HackathonRepository::registration_stat(pool, &hackathon.id, &accepted).await?;

        Ok(HackathonStat::new(hackathon.id, total, online))
    }

    /// All hackathons, each with the given user's live registration
    pub async fn get_hackathon_list(
        pool: &PgPool,
        user_id: Option<&Uuid>,
        status: Option<i32>,
    ) -> AppResult<Vec<HackathonListItem>> {
        if let Some(status) = status {
            if HackathonStatus::from_i32(status).is_none() {
                return Err(bad_request(format!("unknown hackathon status {}", status)));
            }
        }

        let hackathons = HackathonRepository::list(pool, status).await?;
        let registrations = match user_id {
            Some(user_id) => RegistrationRepository::list_by_user(pool, user_id).await?,
            None => Vec::new(),
        };

        Ok(attach_registrations(hackathons, registrations))
    }

    /// Hackathons the user holds a live registration for
    pub async fn get_user_hackathon_list(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Hackathon>> {
        HackathonRepository::list_registered_by_user(pool, user_id).await
    }

    pub async fn get_permitted_hackathon_ids_by_admin_user_id(
        pool: &PgPool,
        user_id: &Uuid,
    ) -> AppResult<PermittedHackathons> {
        let rels = AdminRepository::list_by_user(pool, user_id).await?;
        Ok(PermittedHackathons::from_rels(&rels))
    }

    pub async fn get_permitted_hackathon_list_by_admin_user_id(
        pool: &PgPool,
        user_id: &Uuid,
    ) -> AppResult<Vec<Hackathon>> {
        match Self::get_permitted_hackathon_ids_by_admin_user_id(pool, user_id).await? {
            PermittedHackathons::All => HackathonRepository::list(pool, None).await,
            PermittedHackathons::Only(ids) => HackathonRepository::list_by_ids(pool, &ids).await,
        }
    }

    /// Whether the user may administer the hackathon
    pub async fn validate_admin_privilege(
        pool: &PgPool,
        user_id: &Uuid,
        hackathon_id: &Uuid,
    ) -> AppResult<bool> {
        let permitted = Self::get_permitted_hackathon_ids_by_admin_user_id(pool, user_id).await?;
        Ok(permitted.contains(hackathon_id))
    }

    /// Resolve the hackathon named by the `hackathon_name` header
    pub async fn validate_hackathon_name(
        pool: &PgPool,
        headers: &HeaderMap,
    ) -> AppResult<Option<Hackathon>> {
        let Some(value) = headers.get(HACKATHON_NAME_HEADER) else {
            debug!("no {} header in request", HACKATHON_NAME_HEADER);
            return Ok(None);
        };
        let Ok(name) = value.to_str() else {
            debug!("unreadable {} header", HACKATHON_NAME_HEADER);
            return Ok(None);
        };

        let hackathon = Self::get_hackathon_by_name(pool, name).await?;
        if hackathon.is_none() {
            debug!(hackathon = %name, "no hackathon with this name");
        }
        Ok(hackathon)
    }

    /// Create a hackathon and make its creator an administrator
    pub async fn create_new_hackathon(
        pool: &PgPool,
        creator_id: &Uuid,
        payload: CreateHackathonRequest,
    ) -> AppResult<Uuid> {
        let name = payload
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| bad_request("hackathon name required"))?;
        crate::utils::validate_hackathon_name(name).map_err(bad_request)?;

        if HackathonRepository::find_by_name(pool, name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "hackathon with name '{}' already exists",
                name
            )));
        }

        let basic_info = payload.basic_info.unwrap_or_else(|| json!({}));
        let extra_info = payload.extra_info.unwrap_or_else(|| json!({}));
        let new = NewHackathon {
            name,
            display_name: payload.display_name.as_deref().unwrap_or(name),
            description: payload.description.as_deref(),
            status: payload.status.unwrap_or(HackathonStatus::Draft.as_i32()),
            basic_info: &basic_info,
            extra_info: &extra_info,
            event_start_time: payload.event_start_time,
            event_end_time: payload.event_end_time,
            creator_id,
        };

        let mut tx = pool.begin().await?;

        let hackathon = HackathonRepository::create(&mut *tx, new)
            .await
            .map_err(|e| match e {
                AppError::AlreadyExists(_) => e,
                other => {
                    error!(hackathon = %name, error = %other, "insert hackathon failed");
                    internal_server_error("fail to create hackathon")
                }
            })?;

        AdminRepository::create(
            &mut *tx,
            creator_id,
            Some(&hackathon.id),
            AdminRoleType::Admin.as_i32(),
            ADMIN_REL_ACTIVE,
            Some(CREATOR_REMARKS),
        )
        .await
        .map_err(|e| {
            error!(hackathon = %name, error = %e, "insert creator admin relation failed");
            internal_server_error("fail to insert a record into admin_hackathon_rel")
        })?;

        tx.commit().await?;

        info!(hackathon_id = %hackathon.id, hackathon = %name, creator = %creator_id, "hackathon created");
        Ok(hackathon.id)
    }

    /// Write the fields of `payload` that differ from the stored hackathon
    pub async fn update_hackathon(pool: &PgPool, payload: &UpdateHackathonRequest) -> AppResult<Hackathon> {
        let (Some(name), Some(id)) = (payload.name.as_deref(), payload.id) else {
            return Err(bad_request("name and id are required"));
        };

        let hackathon = HackathonRepository::find_by_name(pool, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("hackathon '{}' not found", name)))?;
        if hackathon.id != id {
            return Err(bad_request("name and id are not matched in hackathon"));
        }

        let changes = hackathon_changes(&hackathon, payload);
        if changes.is_empty() {
            debug!(hackathon_id = %hackathon.id, "update without changes");
            return Ok(hackathon);
        }

        let updated = HackathonRepository::update(pool, &hackathon.id, &changes).await?;
        info!(hackathon_id = %updated.id, "hackathon updated");
        Ok(updated)
    }

    // =========================================================================
    // Registrations
    // =========================================================================

    /// Register a user; auto-approving hackathons accept immediately
    pub async fn register_for_hackathon(
        pool: &PgPool,
        user_id: &Uuid,
        hackathon: &Hackathon,
        payload: &RegistrationRequest,
    ) -> AppResult<UserHackathonRel> {
        let status = RegistrationStatus::initial(hackathon.is_auto_approve());
        let details = RegistrationDetails {
            real_name: payload.real_name.as_deref(),
            email: payload.email.as_deref(),
            phone: payload.phone.as_deref(),
        };

        let rel =
            RegistrationRepository::upsert(pool, user_id, &hackathon.id, details, status.as_i32()).await?;
        info!(hackathon_id = %hackathon.id, user_id = %user_id, status = ?status, "user registered");
        Ok(rel)
    }

    pub async fn list_registrations(pool: &PgPool, hackathon: &Hackathon) -> AppResult<Vec<UserHackathonRel>> {
        RegistrationRepository::list_by_hackathon(pool, &hackathon.id).await
    }

    /// Set the audit status of a registration in this hackathon
    pub async fn audit_registration(
        pool: &PgPool,
        hackathon: &Hackathon,
        rel_id: &Uuid,
        status: i32,
    ) -> AppResult<UserHackathonRel> {
        let status = RegistrationStatus::from_i32(status)
            .ok_or_else(|| bad_request(format!("unknown registration status {}", status)))?;
        Self::find_live_registration(pool, hackathon, rel_id).await?;

        let rel = RegistrationRepository::update_status(pool, rel_id, status.as_i32()).await?;
        info!(hackathon_id = %hackathon.id, registration_id = %rel_id, status = ?status, "registration audited");
        Ok(rel)
    }

    /// Soft-delete a registration in this hackathon
    pub async fn delete_registration(pool: &PgPool, hackathon: &Hackathon, rel_id: &Uuid) -> AppResult<()> {
        Self::find_live_registration(pool, hackathon, rel_id).await?;
        RegistrationRepository::mark_deleted(pool, rel_id).await?;
        info!(hackathon_id = %hackathon.id, registration_id = %rel_id, "registration deleted");
        Ok(())
    }

    async fn find_live_registration(
        pool: &PgPool,
        hackathon: &Hackathon,
        rel_id: &Uuid,
    ) -> AppResult<UserHackathonRel> {
        RegistrationRepository::find_in_hackathon(pool, &hackathon.id, rel_id)
            .await?
            .filter(|rel| !rel.deleted)
            .ok_or_else(|| AppError::NotFound("Registration not found".to_string()))
    }

    // =========================================================================
    // Admin relations
    // =========================================================================

    pub async fn list_admins(pool: &PgPool, hackathon: &Hackathon) -> AppResult<Vec<AdminHackathonRel>> {
        AdminRepository::list_by_hackathon(pool, &hackathon.id).await
    }

    /// Grant a user admin or judge rights on the hackathon
    pub async fn add_admin(
        pool: &PgPool,
        hackathon: &Hackathon,
        payload: &AddAdminRequest,
    ) -> AppResult<AdminHackathonRel> {
        let role_type = payload.role_type.unwrap_or(AdminRoleType::Admin.as_i32());
        AdminRoleType::from_i32(role_type)
            .ok_or_else(|| bad_request(format!("unknown role type {}", role_type)))?;

        if UserRepository::find_by_id(pool, &payload.user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let rel = AdminRepository::create(
            pool,
            &payload.user_id,
            Some(&hackathon.id),
            role_type,
            ADMIN_REL_ACTIVE,
            payload.remarks.as_deref(),
        )
        .await
        .map_err(|e| match e {
            AppError::AlreadyExists(_) => AppError::AlreadyExists(
                "user is already an administrator of this hackathon".to_string(),
            ),
            other => other,
        })?;

        info!(hackathon_id = %hackathon.id, user_id = %payload.user_id, role_type, "administrator added");
        Ok(rel)
    }

    /// Revoke an admin relation; the last one of a hackathon stays
    pub async fn remove_admin(pool: &PgPool, hackathon: &Hackathon, rel_id: &Uuid) -> AppResult<()> {
        AdminRepository::find_in_hackathon(pool, &hackathon.id, rel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Administrator not found".to_string()))?;

        if AdminRepository::count_by_hackathon(pool, &hackathon.id).await? <= 1 {
            return Err(AppError::Conflict(
                "cannot remove the last administrator of a hackathon".to_string(),
            ));
        }

        AdminRepository::delete(pool, rel_id).await?;
        info!(hackathon_id = %hackathon.id, admin_rel_id = %rel_id, "administrator removed");
        Ok(())
    }

    // =========================================================================
    // Uploads
    // =========================================================================

    /// Check an upload before anything is sent to storage
    pub fn upload_images_validate(
        storage: &StorageConfig,
        files: &[UploadFile],
        content_length: Option<u64>,
    ) -> AppResult<Vec<ImageKind>> {
        if !storage.is_account_configured() {
            return Err(internal_server_error(
                "storage account name or key is not configured",
            ));
        }
        if files.is_empty() {
            return Err(bad_request("no file uploaded"));
        }

        let content_length =
            content_length.unwrap_or_else(|| files.iter().map(|f| f.data.len() as u64).sum());
        let limit = (files.len() as u64).saturating_mul(storage.size_limit_byte);
        if content_length > limit {
            return Err(bad_request("more than the file size limited"));
        }

        files
            .iter()
            .map(|file| {
                detect_image(&file.data).ok_or_else(|| {
                    debug!(file = ?file.file_name, "rejected non-image upload");
                    bad_request("only images can be uploaded")
                })
            })
            .collect()
    }

    /// Validate and upload images under the hackathon's prefix
    pub async fn upload_files(
        store: Option<&dyn BlobStore>,
        storage: &StorageConfig,
        hackathon: &Hackathon,
        files: Vec<UploadFile>,
        content_length: Option<u64>,
    ) -> AppResult<Vec<UploadedFileResponse>> {
        let kinds = Self::upload_images_validate(storage, &files, content_length)?;
        let store = store.ok_or_else(|| internal_server_error("storage account name or key is not configured"))?;

        store
            .create_container(&storage.image_container, true)
            .await
            .map_err(|e| {
                error!(container = %storage.image_container, error = %e, "create image container failed");
                internal_server_error("upload file raised an exception")
            })?;

        let mut uploaded = Vec::with_capacity(files.len());
        for (file, kind) in files.into_iter().zip(kinds) {
            let blob_name = image_blob_name(&hackathon.name, kind.extension, Utc::now());
            let size = file.data.len() as u64;

            let url = store
                .upload(&storage.image_container, &blob_name, file.data, kind.mime_type)
                .await
                .map_err(|e| {
                    error!(blob = %blob_name, error = %e, "upload file failed");
                    internal_server_error("upload file raised an exception")
                })?;

            debug!(blob = %blob_name, size, "file uploaded");
            uploaded.push(UploadedFileResponse {
                delete_url: format!("/api/file?key={}", blob_name),
                name: blob_name,
                thumbnail_url: url.clone(),
                url,
                file_type: "image".to_string(),
                size,
            });
        }

        info!(hackathon_id = %hackathon.id, count = uploaded.len(), "images uploaded");
        Ok(uploaded)
    }
}

/// Pair each hackathon with the matching registration
fn attach_registrations(
    hackathons: Vec<Hackathon>,
    mut registrations: Vec<UserHackathonRel>,
) -> Vec<HackathonListItem> {
    hackathons
        .into_iter()
        .map(|hackathon| {
            let registration = registrations
                .iter()
                .position(|r| r.hackathon_id == hackathon.id && !r.deleted)
                .map(|i| registrations.swap_remove(i));
            HackathonListItem {
                hackathon,
                registration,
            }
        })
        .collect()
}

/// Fields of `payload` that differ from `current`
fn hackathon_changes(current: &Hackathon, payload: &UpdateHackathonRequest) -> HackathonChanges {
    fn changed<T: PartialEq + Clone>(new: Option<&T>, old: Option<&T>) -> Option<T> {
        new.filter(|n| Some(*n) != old).cloned()
    }

    HackathonChanges {
        display_name: changed(payload.display_name.as_ref(), Some(&current.display_name)),
        description: changed(payload.description.as_ref(), current.description.as_ref()),
        status: changed(payload.status.as_ref(), Some(&current.status)),
        basic_info: changed::<Value>(payload.basic_info.as_ref(), Some(&current.basic_info)),
        extra_info: changed::<Value>(payload.extra_info.as_ref(), Some(&current.extra_info)),
        event_start_time: changed(payload.event_start_time.as_ref(), current.event_start_time.as_ref()),
        event_end_time: changed(payload.event_end_time.as_ref(), current.event_end_time.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::{AzureError, MockBlobStore};
    use chrono::TimeZone;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, b'I', b'H'];
    const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00";

    fn hackathon(name: &str) -> Hackathon {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Hackathon {
            id: Uuid::new_v4(),
            name: name.to_string(),
            display_name: "Spring Hack".to_string(),
            description: Some("old".to_string()),
            status: HackathonStatus::Online.as_i32(),
            basic_info: json!({"auto_approve": 1}),
            extra_info: json!({}),
            event_start_time: Some(now),
            event_end_time: None,
            creator_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn registration(hackathon_id: Uuid, deleted: bool) -> UserHackathonRel {
        let now = Utc::now();
        UserHackathonRel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            hackathon_id,
            real_name: None,
            email: None,
            phone: None,
            status: RegistrationStatus::AutoPassed.as_i32(),
            deleted,
            created_at: now,
            updated_at: now,
        }
    }

    fn storage() -> StorageConfig {
        StorageConfig {
            account_name: Some("acct".to_string()),
            account_key: Some("c2VjcmV0".to_string()),
            image_container: "images".to_string(),
            size_limit_byte: 1024,
            blob_endpoint: None,
        }
    }

    fn file(data: &[u8]) -> UploadFile {
        UploadFile {
            file_name: Some("f".to_string()),
            data: data.to_vec(),
        }
    }

    #[test]
    fn test_changes_only_include_differing_fields() {
        let current = hackathon("spring");
        let payload = UpdateHackathonRequest {
            id: Some(current.id),
            name: Some(current.name.clone()),
            display_name: Some(current.display_name.clone()),
            description: Some("new".to_string()),
            status: Some(HackathonStatus::Offline.as_i32()),
            basic_info: Some(current.basic_info.clone()),
            event_start_time: current.event_start_time,
            ..Default::default()
        };

        let changes = hackathon_changes(&current, &payload);
        assert_eq!(
            changes,
            HackathonChanges {
                description: Some("new".to_string()),
                status: Some(HackathonStatus::Offline.as_i32()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_identical_payload_has_no_changes() {
        let current = hackathon("spring");
        let payload = UpdateHackathonRequest {
            id: Some(current.id),
            name: Some(current.name.clone()),
            description: current.description.clone(),
            extra_info: Some(json!({})),
            ..Default::default()
        };

        assert!(hackathon_changes(&current, &payload).is_empty());
    }

    #[test]
    fn test_attach_registrations_matches_by_hackathon() {
        let a = hackathon("a");
        let b = hackathon("b");
        let rel = registration(b.id, false);
        let rel_id = rel.id;

        let items = attach_registrations(vec![a, b], vec![rel, registration(Uuid::new_v4(), false)]);
        assert!(items[0].registration.is_none());
        assert_eq!(items[1].registration.as_ref().map(|r| r.id), Some(rel_id));
    }

    #[test]
    fn test_attach_registrations_skips_deleted() {
        let a = hackathon("a");
        let items = attach_registrations(vec![a.clone()], vec![registration(a.id, true)]);
        assert!(items[0].registration.is_none());
    }

    #[test]
    fn test_validate_requires_storage_account() {
        let mut config = storage();
        config.account_key = None;

        let err = HackathonService::upload_images_validate(&config, &[file(PNG)], None).unwrap_err();
        assert!(matches!(err, AppError::ServerError(_)));
    }

    #[test]
    fn test_validate_rejects_oversized_request() {
        let err = HackathonService::upload_images_validate(&storage(), &[file(PNG), file(GIF)], Some(4096))
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "more than the file size limited"));
    }

    #[test]
    fn test_validate_rejects_non_images() {
        let err = HackathonService::upload_images_validate(&storage(), &[file(PNG), file(b"hello")], None)
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "only images can be uploaded"));
    }

    #[test]
    fn test_validate_returns_kinds_in_order() {
        let kinds =
            HackathonService::upload_images_validate(&storage(), &[file(GIF), file(PNG)], Some(100)).unwrap();
        let extensions: Vec<_> = kinds.iter().map(|k| k.extension).collect();
        assert_eq!(extensions, ["gif", "png"]);
    }

    #[tokio::test]
    async fn test_upload_files_names_blobs_under_hackathon() {
        let mut store = MockBlobStore::new();
        store
            .expect_create_container()
            .withf(|name, public| name == "images" && *public)
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_upload()
            .withf(|container, blob, data, content_type| {
                container == "images"
                    && blob.starts_with("spring/")
                    && blob.ends_with(".png")
                    && data.len() == PNG.len()
                    && content_type == "image/png"
            })
            .times(1)
            .returning(|container, blob, _, _| Ok(format!("https://acct.blob/{}/{}", container, blob)));

        let files = HackathonService::upload_files(
            Some(&store),
            &storage(),
            &hackathon("spring"),
            vec![file(PNG)],
            None,
        )
        .await
        .unwrap();

        assert_eq!(files.len(), 1);
        let uploaded = &files[0];
        assert_eq!(uploaded.file_type, "image");
        assert_eq!(uploaded.size, PNG.len() as u64);
        assert_eq!(uploaded.url, format!("https://acct.blob/images/{}", uploaded.name));
        assert_eq!(uploaded.thumbnail_url, uploaded.url);
        assert_eq!(uploaded.delete_url, format!("/api/file?key={}", uploaded.name));
        // Reported under the stored blob name, not the client's file name
        assert!(uploaded.name.starts_with("spring/") && uploaded.name.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_upload_failure_is_server_error() {
        let mut store = MockBlobStore::new();
        store.expect_create_container().returning(|_, _| Ok(()));
        store.expect_upload().returning(|_, _, _, _| {
            Err(AzureError::Http {
                status: 403,
                message: "AuthenticationFailed".to_string(),
            })
        });

        let err = HackathonService::upload_files(
            Some(&store),
            &storage(),
            &hackathon("spring"),
            vec![file(PNG)],
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ServerError(ref m) if m == "upload file raised an exception"));
    }

    #[tokio::test]
    async fn test_invalid_upload_never_reaches_storage() {
        let mut store = MockBlobStore::new();
        store.expect_create_container().never();
        store.expect_upload().never();

        let result = HackathonService::upload_files(
            Some(&store),
            &storage(),
            &hackathon("spring"),
            vec![file(b"not an image")],
            None,
        )
        .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    fn lazy_pool() -> PgPool {
        PgPool::connect_lazy("postgres://hackathon@localhost/hackathon").unwrap()
    }

    #[test]
    fn test_lookup_prefers_id_over_name() {
        let id = Uuid::new_v4();
        assert_eq!(HackathonKey::pick(Some(&id), Some("spring-hack")), Some(HackathonKey::Id(&id)));
        assert_eq!(HackathonKey::pick(None, Some("spring-hack")), Some(HackathonKey::Name("spring-hack")));
        assert_eq!(HackathonKey::pick(None, None), None);
    }

    #[tokio::test]
    async fn test_lookup_without_id_or_name_is_none() {
        let found = HackathonService::get_hackathon_by_name_or_id(&lazy_pool(), None, None).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_missing_or_unreadable_header_resolves_to_none() {
        let pool = lazy_pool();
        assert!(HackathonService::validate_hackathon_name(&pool, &HeaderMap::new()).await.unwrap().is_none());

        let mut headers = HeaderMap::new();
        headers.insert(
            HACKATHON_NAME_HEADER,
            axum::http::HeaderValue::from_bytes(&[0xFF, b'h']).unwrap(),
        );
        assert!(HackathonService::validate_hackathon_name(&pool, &headers).await.unwrap().is_none());
    }
}
