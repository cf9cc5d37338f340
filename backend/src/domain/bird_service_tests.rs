//! Tests for the bird service.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::TimeDelta;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockBirdRepository;
use crate::test_support::{MutableClock, fixture_timestamp, sample_bird};

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixture_timestamp()))
}

fn service(
    repo: MockBirdRepository,
    clock: Arc<MutableClock>,
    mode: UpdateMode,
) -> BirdResourceService<MockBirdRepository> {
    BirdResourceService::new(Arc::new(repo), clock, mode)
}

fn draft(name: Option<&str>, description: Option<&str>) -> BirdDraft {
    BirdDraft {
        name: name.map(str::to_owned),
        description: description.map(str::to_owned),
    }
}

#[rstest]
#[tokio::test]
async fn list_birds_returns_repository_order(clock: Arc<MutableClock>) {
    let mut repo = MockBirdRepository::new();
    repo.expect_find_all().times(1).return_once(|| {
        Ok(vec![
            sample_bird(1, "Eastern bluebird", "Thrush"),
            sample_bird(2, "House sparrow", "Passerine"),
        ])
    });

    let birds = service(repo, clock, UpdateMode::Merge)
        .list_birds()
        .await
        .expect("list succeeds");

    let ids: Vec<_> = birds.iter().map(|bird| bird.id().as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
}

#[rstest]
#[tokio::test]
async fn get_bird_reports_not_found(clock: Arc<MutableClock>) {
    let mut repo = MockBirdRepository::new();
    repo.expect_find_by_id()
        .with(eq(BirdId::new("999")))
        .times(1)
        .return_once(|_| Ok(None));

    let error = service(repo, clock, UpdateMode::Merge)
        .get_bird(&BirdId::new("999"))
        .await
        .expect_err("unknown bird");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), BIRD_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn create_bird_stamps_clock_time(clock: Arc<MutableClock>) {
    let now = fixture_timestamp();
    let mut repo = MockBirdRepository::new();
    repo.expect_insert()
        .withf(move |bird, at| bird.name().as_str() == "Robin" && *at == now)
        .times(1)
        .return_once(|_, _| Ok(sample_bird(5, "Robin", "A bird")));

    let created = service(repo, clock, UpdateMode::Merge)
        .create_bird(draft(Some("Robin"), Some("A bird")))
        .await
        .expect("create succeeds");

    assert_eq!(created.id().as_str(), "5");
}

#[rstest]
#[case(draft(None, Some("A bird")), "name")]
#[case(draft(Some("Robin"), None), "description")]
#[case(draft(Some(""), Some("A bird")), "name")]
#[case(draft(Some("Robin"), Some("A\0bird")), "description")]
#[tokio::test]
async fn create_bird_rejects_invalid_payloads(
    clock: Arc<MutableClock>,
    #[case] input: BirdDraft,
    #[case] field: &str,
) {
    let mut repo = MockBirdRepository::new();
    repo.expect_insert().times(0);

    let error = service(repo, clock, UpdateMode::Merge)
        .create_bird(input)
        .await
        .expect_err("invalid payload");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), INVALID_CREATE_MESSAGE);
    let details = error.details().expect("validation details");
    assert_eq!(details["field"], field);
}

/// Repository stub answering successive `find_by_id` calls in order.
fn expect_reads(repo: &mut MockBirdRepository, reads: Vec<Option<Bird>>) {
    let count = reads.len();
    let mut reads = VecDeque::from(reads);
    repo.expect_find_by_id()
        .times(count)
        .returning(move |_| Ok(reads.pop_front().flatten()));
}

fn updated_robin(at: chrono::DateTime<chrono::Utc>) -> Bird {
    let mut bird = sample_bird(1, "Robin", "A bird");
    let changes = BirdChanges::from_draft(draft(None, Some("Updated")), UpdateMode::Merge)
        .expect("valid changes");
    bird.apply(&changes, at);
    bird
}

#[rstest]
#[tokio::test]
async fn update_bird_merges_and_rereads(clock: Arc<MutableClock>) {
    clock.advance_seconds(60);
    let later = fixture_timestamp() + TimeDelta::seconds(60);

    let mut repo = MockBirdRepository::new();
    repo.expect_update_by_id()
        .withf(move |id, changes, at| {
            id.as_str() == "1"
                && changes.name().is_none()
                && changes.description() == Some("Updated")
                && *at == later
        })
        .times(1)
        .return_once(|_, _, _| Ok(1));
    expect_reads(
        &mut repo,
        vec![
            Some(sample_bird(1, "Robin", "A bird")),
            Some(updated_robin(later)),
        ],
    );

    let updated = service(repo, clock, UpdateMode::Merge)
        .update_bird(&BirdId::new("1"), draft(None, Some("Updated")))
        .await
        .expect("update succeeds");

    assert_eq!(updated.name().as_str(), "Robin");
    assert_eq!(updated.description(), "Updated");
    assert!(updated.updated_at() > updated.created_at());
}

#[rstest]
#[tokio::test]
async fn update_bird_moves_stamp_forward_when_clock_has_not(clock: Arc<MutableClock>) {
    let bumped = fixture_timestamp() + TimeDelta::milliseconds(1);

    let mut repo = MockBirdRepository::new();
    repo.expect_update_by_id()
        .withf(move |_, _, at| *at == bumped)
        .times(1)
        .return_once(|_, _, _| Ok(1));
    expect_reads(
        &mut repo,
        vec![
            Some(sample_bird(1, "Robin", "A bird")),
            Some(updated_robin(bumped)),
        ],
    );

    let updated = service(repo, clock, UpdateMode::Merge)
        .update_bird(&BirdId::new("1"), draft(None, Some("Updated")))
        .await
        .expect("update succeeds");

    assert!(updated.updated_at() > updated.created_at());
}

#[rstest]
#[tokio::test]
async fn update_bird_accepts_empty_merge_patch(clock: Arc<MutableClock>) {
    let mut repo = MockBirdRepository::new();
    repo.expect_update_by_id()
        .withf(|_, changes, _| changes.is_empty())
        .times(1)
        .return_once(|_, _, _| Ok(1));
    expect_reads(
        &mut repo,
        vec![
            Some(sample_bird(1, "Robin", "A bird")),
            Some(sample_bird(1, "Robin", "A bird")),
        ],
    );

    service(repo, clock, UpdateMode::Merge)
        .update_bird(&BirdId::new("1"), BirdDraft::default())
        .await
        .expect("empty patch succeeds");
}

#[rstest]
#[tokio::test]
async fn update_bird_validates_before_existence(clock: Arc<MutableClock>) {
    let mut repo = MockBirdRepository::new();
    repo.expect_update_by_id().times(0);
    repo.expect_find_by_id().times(0);

    let error = service(repo, clock, UpdateMode::Merge)
        .update_bird(&BirdId::new("999"), draft(Some(""), None))
        .await
        .expect_err("invalid payload");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), INVALID_UPDATE_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn update_bird_in_replace_mode_requires_both_fields(clock: Arc<MutableClock>) {
    let mut repo = MockBirdRepository::new();
    repo.expect_update_by_id().times(0);

    let error = service(repo, clock, UpdateMode::Replace)
        .update_bird(&BirdId::new("1"), draft(Some("Robin"), None))
        .await
        .expect_err("replace needs description");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_bird_reports_not_found_for_unknown_bird(clock: Arc<MutableClock>) {
    let mut repo = MockBirdRepository::new();
    repo.expect_update_by_id().times(0);
    expect_reads(&mut repo, vec![None]);

    let error = service(repo, clock, UpdateMode::Merge)
        .update_bird(&BirdId::new("999"), draft(Some("Robin"), None))
        .await
        .expect_err("unknown bird");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_bird_reports_not_found_when_nothing_changed(clock: Arc<MutableClock>) {
    let mut repo = MockBirdRepository::new();
    repo.expect_update_by_id()
        .times(1)
        .return_once(|_, _, _| Ok(0));
    expect_reads(&mut repo, vec![Some(sample_bird(1, "Robin", "A bird"))]);

    let error = service(repo, clock, UpdateMode::Merge)
        .update_bird(&BirdId::new("1"), draft(Some("Robin"), None))
        .await
        .expect_err("deleted before the update");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_bird_reports_not_found_when_reread_misses(clock: Arc<MutableClock>) {
    let mut repo = MockBirdRepository::new();
    repo.expect_update_by_id()
        .times(1)
        .return_once(|_, _, _| Ok(1));
    expect_reads(&mut repo, vec![Some(sample_bird(1, "Robin", "A bird")), None]);

    let error = service(repo, clock, UpdateMode::Merge)
        .update_bird(&BirdId::new("1"), draft(Some("Robin"), None))
        .await
        .expect_err("deleted concurrently");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(1, None)]
#[case(0, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_bird_maps_affected_rows(
    clock: Arc<MutableClock>,
    #[case] affected: u64,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockBirdRepository::new();
    repo.expect_delete_by_id()
        .times(1)
        .return_once(move |_| Ok(affected));

    let result = service(repo, clock, UpdateMode::Merge)
        .delete_bird(&BirdId::new("1"))
        .await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[case(BirdRepositoryError::connection("pool unavailable"), ErrorCode::ServiceUnavailable)]
#[case(BirdRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    clock: Arc<MutableClock>,
    #[case] failure: BirdRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockBirdRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(move || Err(failure));

    let error = service(repo, clock, UpdateMode::Merge)
        .list_birds()
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
fn update_mode_reports_configuration(clock: Arc<MutableClock>) {
    let svc = service(MockBirdRepository::new(), clock, UpdateMode::Replace);
    assert_eq!(svc.update_mode(), UpdateMode::Replace);
}
