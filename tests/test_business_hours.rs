mod helpers;

use helpers::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sla_engine::domain::entities::{Calendar, TimeRange, MILLIS_PER_DAY};
use sla_engine::{Boundary, DomainError, ValidationError};

fn assert_disjoint_and_sorted(calendar: &Calendar) {
    for pair in calendar.ranges().windows(2) {
        assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_random_ranges_never_overlap() {
    let mut rng = StdRng::seed_from_u64(0x51a);
    let mut calendar =
        Calendar::new("Random".to_string(), vec![TimeRange::from_hours(12, 13)]).unwrap();

    let mut accepted = 1;
    for _ in 0..500 {
        let start = rng.gen_range(0..MILLIS_PER_DAY);
        let end = rng.gen_range(0..=MILLIS_PER_DAY);
        let candidate = TimeRange::new(start, end);
        let clashes = calendar.ranges().iter().any(|r| r.overlaps(&candidate));

        match calendar.add_range(candidate) {
            Ok(_) => {
                assert!(start < end);
                assert!(!clashes);
                accepted += 1;
            }
            Err(ValidationError::InvalidRange { .. }) => assert!(start >= end),
            Err(ValidationError::Overlap { .. }) => assert!(clashes),
            Err(other) => panic!("unexpected rejection: {}", other),
        }
        assert_disjoint_and_sorted(&calendar);
    }
    assert_eq!(calendar.ranges().len(), accepted);
}

#[test]
fn test_overlap_reports_boundary() {
    let mut calendar = Calendar::new(
        "Split".to_string(),
        vec![TimeRange::from_hours(9, 12), TimeRange::from_hours(13, 18)],
    )
    .unwrap();

    assert_eq!(
        calendar.add_range(TimeRange::from_hours(10, 23)),
        Err(ValidationError::Overlap { boundary: Boundary::Start })
    );
    assert_eq!(
        calendar.add_range(TimeRange::from_hours(7, 10)),
        Err(ValidationError::Overlap { boundary: Boundary::End })
    );
    // Adjacent ranges share no instant
    assert!(calendar.add_range(TimeRange::from_hours(12, 13)).is_ok());
    assert!(calendar.add_range(TimeRange::from_hours(18, 24)).is_ok());
    assert_eq!(calendar.ranges().len(), 4);
}

#[tokio::test]
async fn test_service_rejects_overlapping_range() {
    let ts = setup_test_store();
    let calendar = ts
        .calendars
        .create_calendar("Office".to_string(), vec![(0, 9 * HOUR), (13 * HOUR, 18 * HOUR)])
        .await
        .unwrap();

    let err = ts
        .calendars
        .add_range(&calendar.id, 10 * HOUR, 23 * HOUR)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::Overlap { boundary: Boundary::Start })
    ));

    // Rejected writes leave the calendar untouched
    let stored = ts.calendars.get_calendar(&calendar.id).await.unwrap();
    assert_eq!(stored.ranges().len(), 2);
}

#[tokio::test]
async fn test_create_calendar_requires_business_hours() {
    let ts = setup_test_store();
    let err = ts
        .calendars
        .create_calendar("Empty".to_string(), vec![])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::NoBusinessHours)
    ));
}

#[tokio::test]
async fn test_last_range_cannot_be_removed() {
    let ts = setup_test_store();
    let calendar = ts
        .calendars
        .create_calendar("Office".to_string(), vec![(8 * HOUR, 12 * HOUR), (14 * HOUR, 18 * HOUR)])
        .await
        .unwrap();
    let morning = calendar.ranges()[0].id.clone();
    let afternoon = calendar.ranges()[1].id.clone();

    ts.calendars.remove_range(&calendar.id, &morning).await.unwrap();
    let err = ts
        .calendars
        .remove_range(&calendar.id, &afternoon)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::LastRangeRemoval));

    let stored = ts.calendars.get_calendar(&calendar.id).await.unwrap();
    assert_eq!(stored.ranges().len(), 1);
    assert_eq!(stored.ranges()[0].id, afternoon);
}

#[tokio::test]
async fn test_update_range_checks_other_ranges_only() {
    let ts = setup_test_store();
    let calendar = ts
        .calendars
        .create_calendar("Office".to_string(), vec![(8 * HOUR, 12 * HOUR), (14 * HOUR, 18 * HOUR)])
        .await
        .unwrap();
    let morning = calendar.ranges()[0].id.clone();

    // Growing a range over its own old extent is fine
    ts.calendars
        .update_range(&calendar.id, &morning, 7 * HOUR, 13 * HOUR)
        .await
        .unwrap();

    let err = ts
        .calendars
        .update_range(&calendar.id, &morning, 7 * HOUR, 15 * HOUR)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::Overlap { boundary: Boundary::End })
    ));

    let stored = ts.calendars.get_calendar(&calendar.id).await.unwrap();
    let range = stored.range(&morning).unwrap();
    assert_eq!((range.start, range.end), (7 * HOUR, 13 * HOUR));
}

#[tokio::test]
async fn test_holidays_turn_off_business_days() {
    let ts = setup_test_store();
    let calendar = ts
        .calendars
        .create_calendar("Office".to_string(), vec![(8 * HOUR, 18 * HOUR)])
        .await
        .unwrap();
    let day = date(2026, 3, 2);

    assert!(ts.calendars.is_business_day(&calendar.id, day).await.unwrap());
    ts.calendars
        .add_holiday(&calendar.id, day, "Closed for works")
        .await
        .unwrap();
    assert!(!ts.calendars.is_business_day(&calendar.id, day).await.unwrap());

    // Adding the same date again renames it instead of duplicating
    let renamed = ts
        .calendars
        .add_holiday(&calendar.id, day, "Inventory")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Inventory");
    let stored = ts.calendars.get_calendar(&calendar.id).await.unwrap();
    assert_eq!(stored.holidays().len(), 1);

    ts.calendars.remove_holiday(&calendar.id, day).await.unwrap();
    assert!(ts.calendars.is_business_day(&calendar.id, day).await.unwrap());
    assert!(matches!(
        ts.calendars.remove_holiday(&calendar.id, day).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_calendars_listed_by_name() {
    let ts = setup_test_store();
    for name in ["Night", "Day", "Weekend"] {
        ts.calendars
            .create_calendar(name.to_string(), vec![(0, 4 * HOUR)])
            .await
            .unwrap();
    }
    let calendar = ts.calendars.list_calendars().await.unwrap()[2].clone();
    ts.calendars.rename_calendar(&calendar.id, "Alpha").await.unwrap();

    let names: Vec<String> = ts
        .calendars
        .list_calendars()
        .await
        .unwrap()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["Alpha", "Day", "Night"]);

    assert!(matches!(
        ts.calendars.rename_calendar(&calendar.id, "  ").await,
        Err(DomainError::Validation(ValidationError::Required { .. }))
    ));
}

#[tokio::test]
async fn test_calendar_in_use_cannot_be_deleted() {
    let ts = setup_test_store();
    let configuration = ts.subscriptions.provision("sub-1").await.unwrap();

    let err = ts
        .calendars
        .delete_calendar(&configuration.calendar_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Referenced(_)));

    ts.subscriptions.delete("sub-1").await.unwrap();
    ts.calendars
        .delete_calendar(&configuration.calendar_id)
        .await
        .unwrap();
    assert!(matches!(
        ts.calendars.get_calendar(&configuration.calendar_id).await,
        Err(DomainError::NotFound(_))
    ));
}
