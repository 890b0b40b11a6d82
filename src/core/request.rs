//! Request business logic - raising, updating and reviewing validation requests.
//!
//! `add_request` and `update_request` are the raw store operations: no
//! validation, no uniqueness checks. `submit_request` and `review_request`
//! are the form-level actions layered on top of them.

use super::{
    identity::User,
    ids::next_id,
    navigation::{require_admin, require_non_admin},
    notify::{self, Notification},
};
use crate::{
    entities::{Request, RequestStatus, request},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// A request without its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    /// Display name of the requester
    pub requester: String,
    /// Plant the GRN data belongs to
    pub plant: String,
    /// Day the request was raised
    pub submission_date: NaiveDate,
    /// Initial status
    pub status: RequestStatus,
    /// Free-text remarks
    pub remarks: String,
    /// Attached file name
    pub file_name: Option<String>,
    /// Reviewer comments
    pub sp_comments: Option<String>,
}

/// Fields to merge into an existing request. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPatch {
    /// New requester name
    pub requester: Option<String>,
    /// New plant
    pub plant: Option<String>,
    /// New submission date
    pub submission_date: Option<NaiveDate>,
    /// New status
    pub status: Option<RequestStatus>,
    /// New remarks
    pub remarks: Option<String>,
    /// New file name (`Some(None)` clears it)
    pub file_name: Option<Option<String>>,
    /// New reviewer comments (`Some(None)` clears them)
    pub sp_comments: Option<Option<String>>,
}

impl RequestPatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn into_active_model(self) -> request::ActiveModel {
        request::ActiveModel {
            requester: self.requester.map_or(ActiveValue::NotSet, Set),
            plant: self.plant.map_or(ActiveValue::NotSet, Set),
            submission_date: self.submission_date.map_or(ActiveValue::NotSet, Set),
            status: self.status.map_or(ActiveValue::NotSet, Set),
            remarks: self.remarks.map_or(ActiveValue::NotSet, Set),
            file_name: self.file_name.map_or(ActiveValue::NotSet, Set),
            sp_comments: self.sp_comments.map_or(ActiveValue::NotSet, Set),
            ..Default::default()
        }
    }
}

/// What a requester fills in on the new-request form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    /// Selected plant (required)
    pub plant: String,
    /// Free-text remarks
    pub remarks: String,
    /// Uploaded file name (required)
    pub file_name: Option<String>,
}

/// Every request, in the order they were added.
pub async fn get_all_requests(db: &DatabaseConnection) -> Result<Vec<request::Model>> {
    Request::find()
        .order_by_asc(request::Column::Seq)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The first request carrying `id`, if any.
pub async fn get_request_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<request::Model>> {
    Request::find()
        .filter(request::Column::Id.eq(id))
        .order_by_asc(request::Column::Seq)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Looks up a request by an id typed by a user, ignoring surrounding
/// whitespace.
pub async fn find_request(db: &DatabaseConnection, id: &str) -> Result<request::Model> {
    let id = id.trim();
    get_request_by_id(db, id)
        .await?
        .ok_or_else(|| Error::RequestNotFound { id: id.to_string() })
}

/// Assigns a timestamp id and appends the request.
pub async fn add_request(db: &DatabaseConnection, new: NewRequest) -> Result<request::Model> {
    let model = request::ActiveModel {
        id: Set(next_id()),
        requester: Set(new.requester),
        plant: Set(new.plant),
        submission_date: Set(new.submission_date),
        status: Set(new.status),
        remarks: Set(new.remarks),
        file_name: Set(new.file_name),
        sp_comments: Set(new.sp_comments),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    debug!("Added request {}", inserted.id);
    Ok(inserted)
}

/// Merges `patch` into every request with this id.
///
/// Returns the number of records touched; zero means the id is unknown and
/// the collection is unchanged.
pub async fn update_request(db: &DatabaseConnection, id: &str, patch: RequestPatch) -> Result<u64> {
    if patch.is_empty() {
        return Ok(Request::find()
            .filter(request::Column::Id.eq(id))
            .count(db)
            .await?);
    }

    let result = Request::update_many()
        .set(patch.into_active_model())
        .filter(request::Column::Id.eq(id))
        .exec(db)
        .await?;
    debug!("Updated {} request(s) with id {id}", result.rows_affected);
    Ok(result.rows_affected)
}

/// Raises a new request from the form, as `requester`, with status `open`.
///
/// # Errors
/// Returns a validation error when the plant or the file is missing, and
/// refuses Seven Procure reviewers, who review requests rather than raise them.
#[instrument(skip(db, requester), fields(requester = %requester.name))]
pub async fn submit_request(
    db: &DatabaseConnection,
    requester: &User,
    form: RequestForm,
    submission_date: NaiveDate,
) -> Result<request::Model> {
    require_non_admin(requester, "raise validation requests")?;

    let file_name = form.file_name.filter(|name| !name.trim().is_empty());
    if form.plant.trim().is_empty() || file_name.is_none() {
        return Err(Error::validation("Please select a plant and upload a file"));
    }

    let created = add_request(
        db,
        NewRequest {
            requester: requester.name.clone(),
            plant: form.plant,
            submission_date,
            status: RequestStatus::Open,
            remarks: form.remarks,
            file_name,
            sp_comments: None,
        },
    )
    .await?;

    notify::dispatch(&Notification::RequestSubmitted {
        request_id: created.id.clone(),
        plant: created.plant.clone(),
    });
    Ok(created)
}

/// Sets a new status and reviewer comment on a request.
///
/// Nothing happens when `status` equals the current status; the return value
/// says whether the review was applied. Any status may follow any other.
#[instrument(skip(db, reviewer, comments), fields(reviewer = %reviewer.name))]
pub async fn review_request(
    db: &DatabaseConnection,
    reviewer: &User,
    id: &str,
    status: RequestStatus,
    comments: Option<String>,
) -> Result<bool> {
    require_admin(reviewer, "review requests")?;

    let current = find_request(db, id).await?;
    let id = current.id.as_str();

    if current.status == status {
        return Ok(false);
    }

    update_request(
        db,
        id,
        RequestPatch {
            status: Some(status),
            sp_comments: Some(Some(comments.unwrap_or_default())),
            ..Default::default()
        },
    )
    .await?;

    info!("Request {id} moved from {} to {}", current.status, status);
    notify::dispatch(&Notification::StatusChanged {
        request_id: id.to_string(),
        status,
    });
    Ok(true)
}

/// Number of requests in each status, in workflow order.
#[must_use]
pub fn status_counts(requests: &[request::Model]) -> Vec<(RequestStatus, usize)> {
    RequestStatus::ALL
        .into_iter()
        .map(|status| {
            (
                status,
                requests.iter().filter(|r| r.status == status).count(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::identity::find_user_by_email, test_utils::*};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user(email: &str) -> User {
        find_user_by_email(email).unwrap()
    }

    #[tokio::test]
    async fn test_add_request_appears_once_with_supplied_fields() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_request(&db, "Plant 2").await?;
        let all = get_all_requests(&db).await?;

        let matching: Vec<_> = all.iter().filter(|r| r.id == created.id).collect();
        assert_eq!(matching.len(), 1);
        let stored = matching[0];
        assert_eq!(stored.status, RequestStatus::Open);
        assert_eq!(stored.plant, "Plant 2");
        assert_eq!(stored.requester, "Test Requester");
        assert_eq!(stored.remarks, "Test remarks");
        assert_eq!(stored.file_name.as_deref(), Some("grn.xlsx"));
        assert!(stored.sp_comments.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_requests_keep_insertion_order() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_request(&db, "Plant 1").await?;
        let second = create_test_request(&db, "SPD").await?;
        let third = create_test_request(&db, "KMC").await?;

        let ids: Vec<String> = get_all_requests(&db)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_request_merges_only_given_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_request(&db, "Plant 1").await?;

        let touched = update_request(
            &db,
            &created.id,
            RequestPatch {
                remarks: Some("Resubmitted".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(touched, 1);

        let stored = get_request_by_id(&db, &created.id).await?.unwrap();
        assert_eq!(stored.remarks, "Resubmitted");
        assert_eq!(stored.plant, created.plant);
        assert_eq!(stored.status, created.status);
        assert_eq!(stored.file_name, created.file_name);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_request_unknown_id_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_request(&db, "Plant 1").await?;
        let before = get_all_requests(&db).await?;

        let touched = update_request(
            &db,
            "does-not-exist",
            RequestPatch {
                status: Some(RequestStatus::Completed),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(touched, 0);
        assert_eq!(get_all_requests(&db).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_request_can_clear_optional_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_request(&db, "Plant 1").await?;

        update_request(
            &db,
            &created.id,
            RequestPatch {
                file_name: Some(None),
                ..Default::default()
            },
        )
        .await?;

        let stored = get_request_by_id(&db, &created.id).await?.unwrap();
        assert!(stored.file_name.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_request_touches_every_duplicate_id() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_request(&db, "Plant 1").await?;

        // Ids are not unique: insert a second row carrying the same id
        let duplicate = request::ActiveModel {
            id: Set(created.id.clone()),
            requester: Set("Someone Else".to_string()),
            plant: Set("KMC".to_string()),
            submission_date: Set(created.submission_date),
            status: Set(RequestStatus::Open),
            remarks: Set(String::new()),
            file_name: Set(None),
            sp_comments: Set(None),
            ..Default::default()
        };
        duplicate.insert(&db).await?;

        let touched = update_request(
            &db,
            &created.id,
            RequestPatch {
                status: Some(RequestStatus::InProgress),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(touched, 2);
        assert!(
            get_all_requests(&db)
                .await?
                .iter()
                .all(|r| r.status == RequestStatus::InProgress)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_request_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let finance = user("finance@company.com");
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        // Missing plant
        let result = submit_request(
            &db,
            &finance,
            RequestForm {
                plant: "  ".to_string(),
                remarks: String::new(),
                file_name: Some("grn.xlsx".to_string()),
            },
            day,
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        // Missing file
        let result = submit_request(
            &db,
            &finance,
            RequestForm {
                plant: "Plant 1".to_string(),
                remarks: String::new(),
                file_name: None,
            },
            day,
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        // Reviewers do not raise requests
        let admin = user("admin@sevenprocure.com");
        let result = submit_request(
            &db,
            &admin,
            RequestForm {
                plant: "Plant 1".to_string(),
                remarks: String::new(),
                file_name: Some("grn.xlsx".to_string()),
            },
            day,
        )
        .await;
        assert!(matches!(result, Err(Error::NotForAdmin { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_request_stamps_requester_and_status() -> Result<()> {
        let db = setup_test_db().await?;
        let procurement = user("procurement@company.com");
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let created = submit_request(
            &db,
            &procurement,
            RequestForm {
                plant: "SPD".to_string(),
                remarks: "March GRNs".to_string(),
                file_name: Some("spd_mar.xlsx".to_string()),
            },
            day,
        )
        .await?;

        assert_eq!(created.requester, "Sarah Procurement");
        assert_eq!(created.status, RequestStatus::Open);
        assert_eq!(created.submission_date, day);
        assert_eq!(created.file_name.as_deref(), Some("spd_mar.xlsx"));
        Ok(())
    }

    #[tokio::test]
    async fn test_review_request_transitions() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = user("admin@sevenprocure.com");
        let created = create_test_request(&db, "Plant 1").await?;

        // Same status: nothing applied
        let applied =
            review_request(&db, &admin, &created.id, RequestStatus::Open, Some("x".into())).await?;
        assert!(!applied);
        let stored = get_request_by_id(&db, &created.id).await?.unwrap();
        assert!(stored.sp_comments.is_none());

        // Skip straight to completed, then back to open: transitions are unguarded
        assert!(
            review_request(
                &db,
                &admin,
                &created.id,
                RequestStatus::Completed,
                Some("All good".into())
            )
            .await?
        );
        let stored = get_request_by_id(&db, &created.id).await?.unwrap();
        assert_eq!(stored.status, RequestStatus::Completed);
        assert_eq!(stored.sp_comments.as_deref(), Some("All good"));

        assert!(review_request(&db, &admin, &created.id, RequestStatus::Open, None).await?);
        let stored = get_request_by_id(&db, &created.id).await?.unwrap();
        assert_eq!(stored.status, RequestStatus::Open);
        assert_eq!(stored.sp_comments.as_deref(), Some(""));

        Ok(())
    }

    #[tokio::test]
    async fn test_review_request_requires_admin_and_known_id() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = user("admin@sevenprocure.com");
        let finance = user("finance@company.com");
        let created = create_test_request(&db, "Plant 1").await?;

        let result =
            review_request(&db, &finance, &created.id, RequestStatus::Completed, None).await;
        assert!(matches!(result, Err(Error::AdminOnly { .. })));

        let result = review_request(&db, &admin, "missing", RequestStatus::Completed, None).await;
        assert!(matches!(result, Err(Error::RequestNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_find_request_trims_the_id() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_request(&db, "Plant 1").await?;

        let found = find_request(&db, &format!("  {} ", created.id)).await?;
        assert_eq!(found.id, created.id);

        let err = find_request(&db, " 42 ").await.unwrap_err();
        assert!(matches!(&err, Error::RequestNotFound { id } if id == "42"));
        assert_eq!(err.to_string(), "Request #42 not found");

        Ok(())
    }

    #[test]
    fn test_status_parsing_and_display() {
        assert_eq!(
            "in-progress".parse::<RequestStatus>().unwrap(),
            RequestStatus::InProgress
        );
        assert!("in progress".parse::<RequestStatus>().is_err());
        assert_eq!(RequestStatus::InProgress.to_string(), "in progress");
        assert_eq!(RequestStatus::Open.to_string(), "open");
    }

    #[tokio::test]
    async fn test_status_counts() -> Result<()> {
        let db = setup_seeded_db().await?;
        let requests = get_all_requests(&db).await?;

        assert_eq!(
            status_counts(&requests),
            vec![
                (RequestStatus::Open, 1),
                (RequestStatus::InProgress, 0),
                (RequestStatus::Completed, 1)
            ]
        );
        Ok(())
    }
}
