mod support;

use std::sync::Arc;

use leavesync_core::{
    CalendarProvider, CalendarProviderGateway, ConflictDetectionService, LeaveWindowCache,
    LeaveWindowCacheConfig, LookupFailure, SyncError,
};
use leavesync_domain::{EventStatus, LeaveSyncError};
use support::approved;
use support::calendar::{calendar_event, RecordingCalendarProvider};
use support::repositories::MockLeaveRecordService;

fn service(
    records: MockLeaveRecordService,
    providers: &[RecordingCalendarProvider],
) -> (ConflictDetectionService, Arc<LeaveWindowCache>) {
    let cache = Arc::new(LeaveWindowCache::new(LeaveWindowCacheConfig::default()));
    let providers: Vec<Arc<dyn CalendarProvider>> = providers
        .iter()
        .map(|provider| Arc::new(provider.clone()) as Arc<dyn CalendarProvider>)
        .collect();
    let gateway = Arc::new(CalendarProviderGateway::new(providers));
    let service = ConflictDetectionService::new(Arc::new(records), Arc::clone(&cache), gateway);
    (service, cache)
}

#[tokio::test]
async fn out_of_office_events_are_filtered() {
    let provider = RecordingCalendarProvider::new("calendar").with_events(vec![
        calendar_event("ooo", EventStatus::Oof),
        calendar_event("lunch", EventStatus::Free),
    ]);
    let records = MockLeaveRecordService::new().with_latest("user-1", vec![approved("1", "user-1")]);
    let (service, _cache) = service(records, &[provider]);

    let conflicts = service.get_conflicts("user-1").await.unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].id, "lunch");
    assert_eq!(conflicts[0].status, EventStatus::Free);
}

#[tokio::test]
async fn latest_windows_are_written_to_cache() {
    let provider = RecordingCalendarProvider::new("calendar");
    let windows = vec![approved("1", "user-1"), approved("2", "user-1")];
    let records = MockLeaveRecordService::new().with_latest("user-1", windows);
    let (service, cache) = service(records, &[provider.clone()]);

    service.get_conflicts("user-1").await.unwrap();

    assert_eq!(cache.get("user-1").unwrap().len(), 2);
    assert_eq!(provider.conflict_queries(), 1);
}

#[tokio::test]
async fn no_leave_means_no_provider_calls_and_no_cache_write() {
    let provider = RecordingCalendarProvider::new("calendar")
        .with_events(vec![calendar_event("standup", EventStatus::Busy)]);
    let records = MockLeaveRecordService::new().with_latest("user-2", Vec::new());
    let (service, cache) = service(records, &[provider.clone()]);

    assert!(service.get_conflicts("user-1").await.unwrap().is_empty());
    assert!(service.get_conflicts("user-2").await.unwrap().is_empty());

    assert_eq!(provider.conflict_queries(), 0);
    assert!(cache.get("user-1").is_none());
    assert!(cache.get("user-2").is_none());
}

#[tokio::test]
async fn empty_lookup_keeps_existing_cache_entry() {
    let records = MockLeaveRecordService::new().with_latest("user-1", Vec::new());
    let (service, cache) = service(records, &[RecordingCalendarProvider::new("calendar")]);
    cache.put("user-1", vec![approved("1", "user-1"), approved("2", "user-1")]);

    assert!(service.get_conflicts("user-1").await.unwrap().is_empty());
    assert!(service.get_conflicts("user-1").await.unwrap().is_empty());

    let codes: Vec<_> =
        cache.get("user-1").unwrap().into_iter().map(|record| record.external_code).collect();
    assert_eq!(codes, ["1", "2"]);
}

#[tokio::test]
async fn unknown_user_keeps_existing_cache_entry() {
    let records = MockLeaveRecordService::new();
    let (service, cache) = service(records, &[RecordingCalendarProvider::new("calendar")]);
    cache.put("user-3", vec![approved("7", "user-3")]);

    assert!(service.get_conflicts("user-3").await.unwrap().is_empty());

    assert_eq!(cache.get("user-3").unwrap().len(), 1);
}

#[tokio::test]
async fn events_from_every_provider_are_combined() {
    let first = RecordingCalendarProvider::new("first")
        .with_events(vec![calendar_event("a", EventStatus::Busy)]);
    let second = RecordingCalendarProvider::new("second")
        .with_events(vec![calendar_event("b", EventStatus::Tentative)]);
    let records = MockLeaveRecordService::new().with_latest("user-1", vec![approved("1", "user-1")]);
    let (service, _cache) = service(records, &[first, second]);

    let ids: Vec<_> = service
        .get_conflicts("user-1")
        .await
        .unwrap()
        .into_iter()
        .map(|event| event.id)
        .collect();

    assert_eq!(ids, ["a", "b"]);
}

#[tokio::test]
async fn provider_failure_fails_lookup_but_keeps_cache_write() {
    let provider = RecordingCalendarProvider::new("google")
        .failing(LeaveSyncError::Upstream { status: 502, message: "bad gateway".into() });
    let records = MockLeaveRecordService::new().with_latest("user-1", vec![approved("1", "user-1")]);
    let (service, cache) = service(records, &[provider]);

    let err = service.get_conflicts("user-1").await.unwrap_err();

    match &err {
        SyncError::ConflictLookup { user_id, source: LookupFailure::Provider(provider) } => {
            assert_eq!(user_id, "user-1");
            assert_eq!(provider.status, Some(502));
        }
        other => panic!("expected conflict lookup error, got {other:?}"),
    }
    assert!(err.is_retryable());
    assert!(cache.get("user-1").is_some());
}

#[tokio::test]
async fn record_service_failure_fails_lookup() {
    let records =
        MockLeaveRecordService::new().failing_with(LeaveSyncError::Auth("bad credentials".into()));
    let provider = RecordingCalendarProvider::new("calendar");
    let (service, _cache) = service(records, &[provider.clone()]);

    let err = service.get_conflicts("user-1").await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::ConflictLookup { source: LookupFailure::Record(LeaveSyncError::Auth(_)), .. }
    ));
    assert!(err.to_string().contains("bad credentials"));
    assert_eq!(provider.conflict_queries(), 0);
}
