//! Sick/leave request workflow: `Pending -> Approved | Rejected`, both
//! terminal. Approval materializes a timestamp-less attendance record for the
//! requested date, unconditionally overwriting whatever was there.

use chrono::NaiveDate;

use crate::{
    error::AttendanceError,
    model::attendance_request::{AttendanceRequest, RequestKind, RequestStatus},
    store::{AttendanceStore, RequestStore, StoreError},
};

/// Result of an approve/reject call.
#[derive(Debug)]
pub enum WorkflowOutcome {
    Applied(AttendanceRequest),
    /// The request was already approved or rejected. Benign idempotent retry
    /// (double click), not an error.
    AlreadyFinalized,
    NotFound,
}

/// Creates a pending request. Any existing request for the pair blocks the
/// submission, including a previously rejected one. Requests may target
/// non-working days; no calendar validation happens here.
pub async fn submit_request(
    requests: &dyn RequestStore,
    employee_id: u64,
    date: NaiveDate,
    kind: RequestKind,
) -> Result<AttendanceRequest, AttendanceError> {
    if requests.exists_for_day(employee_id, date).await? {
        return Err(AttendanceError::DuplicateRequest);
    }

    match requests.insert_pending(employee_id, date, kind).await {
        Ok(request) => Ok(request),
        Err(StoreError::Duplicate) => Err(AttendanceError::DuplicateRequest),
        Err(e) => Err(e.into()),
    }
}

/// Approves a pending request: upserts the attendance record for the date
/// with the request's type and null timestamps, then marks the request
/// approved.
pub async fn approve_request(
    requests: &dyn RequestStore,
    attendance: &dyn AttendanceStore,
    request_id: u64,
) -> Result<WorkflowOutcome, AttendanceError> {
    let Some(mut request) = requests.find(request_id).await? else {
        return Ok(WorkflowOutcome::NotFound);
    };

    if request.status != RequestStatus::Pending {
        return Ok(WorkflowOutcome::AlreadyFinalized);
    }

    attendance
        .upsert_status(request.employee_id, request.date, request.kind.into())
        .await?;

    requests.finalize(request.id, RequestStatus::Approved).await?;
    request.status = RequestStatus::Approved;
    Ok(WorkflowOutcome::Applied(request))
}

/// Rejects a pending request. No attendance record is touched.
pub async fn reject_request(
    requests: &dyn RequestStore,
    request_id: u64,
) -> Result<WorkflowOutcome, AttendanceError> {
    let Some(mut request) = requests.find(request_id).await? else {
        return Ok(WorkflowOutcome::NotFound);
    };

    if request.status != RequestStatus::Pending {
        return Ok(WorkflowOutcome::AlreadyFinalized);
    }

    requests.finalize(request.id, RequestStatus::Rejected).await?;
    request.status = RequestStatus::Rejected;
    Ok(WorkflowOutcome::Applied(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Asia::Jakarta;

    use crate::model::attendance::AttendanceStatus;
    use crate::store::memory::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn duplicate_request_is_rejected() {
        let store = MemoryStore::new();
        let day = date(2026, 1, 12);

        submit_request(&store, 1, day, RequestKind::Leave)
            .await
            .unwrap();
        let err = submit_request(&store, 1, day, RequestKind::Sick)
            .await
            .unwrap_err();

        assert!(matches!(err, AttendanceError::DuplicateRequest));
    }

    #[tokio::test]
    async fn rejected_request_still_blocks_resubmission() {
        let store = MemoryStore::new();
        let day = date(2026, 1, 12);

        let request = submit_request(&store, 1, day, RequestKind::Leave)
            .await
            .unwrap();
        reject_request(&store, request.id).await.unwrap();

        let err = submit_request(&store, 1, day, RequestKind::Leave)
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::DuplicateRequest));
    }

    #[tokio::test]
    async fn approval_materializes_attendance_with_null_timestamps() {
        let store = MemoryStore::new();
        let day = date(2026, 1, 12);

        let request = submit_request(&store, 1, day, RequestKind::Leave)
            .await
            .unwrap();
        let outcome = approve_request(&store, &store, request.id).await.unwrap();

        assert!(matches!(outcome, WorkflowOutcome::Applied(_)));
        let record = store.attendance_for(1, day).unwrap();
        assert_eq!(record.status, AttendanceStatus::Leave);
        assert_eq!(record.check_in_at, None);
        assert_eq!(record.check_out_at, None);
        assert_eq!(store.request(request.id).unwrap().status, RequestStatus::Approved);
    }

    #[tokio::test]
    async fn approval_overwrites_an_existing_present_record() {
        let store = MemoryStore::new();
        let day = date(2026, 1, 12);
        let checked_in = Utc.with_ymd_and_hms(2026, 1, 12, 1, 0, 0).unwrap();
        crate::core::attendance::check_in(&store, 1, checked_in, Jakarta)
            .await
            .unwrap();

        let request = submit_request(&store, 1, day, RequestKind::Sick)
            .await
            .unwrap();
        approve_request(&store, &store, request.id).await.unwrap();

        // Last write wins: the present record is overwritten, not merged.
        let record = store.attendance_for(1, day).unwrap();
        assert_eq!(record.status, AttendanceStatus::Sick);
        assert_eq!(record.check_in_at, None);
        assert_eq!(record.check_out_at, None);
    }

    #[tokio::test]
    async fn rejecting_leaves_attendance_untouched() {
        let store = MemoryStore::new();
        let day = date(2026, 1, 12);

        let request = submit_request(&store, 1, day, RequestKind::Sick)
            .await
            .unwrap();
        let outcome = reject_request(&store, request.id).await.unwrap();

        assert!(matches!(outcome, WorkflowOutcome::Applied(_)));
        assert!(store.attendance_for(1, day).is_none());
        assert_eq!(store.request(request.id).unwrap().status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn approving_a_finalized_request_is_a_silent_no_op() {
        let store = MemoryStore::new();
        let day = date(2026, 1, 12);

        let request = submit_request(&store, 1, day, RequestKind::Leave)
            .await
            .unwrap();
        reject_request(&store, request.id).await.unwrap();

        let outcome = approve_request(&store, &store, request.id).await.unwrap();

        assert!(matches!(outcome, WorkflowOutcome::AlreadyFinalized));
        assert!(store.attendance_for(1, day).is_none());
        assert_eq!(store.request(request.id).unwrap().status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn approving_an_unknown_request_reports_not_found() {
        let store = MemoryStore::new();
        let outcome = approve_request(&store, &store, 999).await.unwrap();
        assert!(matches!(outcome, WorkflowOutcome::NotFound));
    }
}
