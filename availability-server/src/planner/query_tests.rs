//! Unit tests for the availability fan-out.

use super::*;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;

use crate::domain::DateSelection;

fn code(s: &str) -> StationCode {
    StationCode::parse(s).unwrap()
}

fn date(s: &str) -> JourneyDate {
    JourneyDate::parse(s).unwrap()
}

/// A response with one train and one available class for the leg.
fn one_train(source: &StationCode, destination: &StationCode, date: JourneyDate) -> RawTrainEntry {
    serde_json::from_value(json!({
        "trainName": format!("{source}-{destination} Express"),
        "trainNumber": format!("{source}{destination}{}", date.compact()),
        "frmStnCode": source.as_str(),
        "toStnCode": destination.as_str(),
        "arrivalTime": "08:00",
        "departureTime": "20:00",
        "runningMon": "Y", "runningTue": "N", "runningWed": "Y",
        "runningThu": "N", "runningFri": "Y", "runningSat": "N", "runningSun": "N",
        "tbsAvailability": [{
            "availablityDate": date.human(),
            "lastUpdatedOnRaw": 1_731_900_000_000i64,
            "prettyPrintingAvailablityStatus": "Available 12",
            "availablityStatus": "CNF",
            "predictionPercentage": null,
            "classType": "SL",
            "totalFare": 565,
            "quota": "GN"
        }]
    }))
    .unwrap()
}

/// Mock source that records calls and fails selected legs.
struct MockSource {
    calls: Mutex<Vec<Leg>>,
    failing: HashSet<Leg>,
    malformed: HashSet<Leg>,
    stalled: HashSet<Leg>,
}

impl MockSource {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: HashSet::new(),
            malformed: HashSet::new(),
            stalled: HashSet::new(),
        }
    }

    fn calls(&self) -> Vec<Leg> {
        self.calls.lock().unwrap().clone()
    }
}

impl TrainSource for MockSource {
    async fn fetch_trains(
        &self,
        source: &StationCode,
        destination: &StationCode,
        date: JourneyDate,
    ) -> Result<Vec<RawTrainEntry>, AvailabilityError> {
        let leg = Leg {
            source: source.clone(),
            destination: destination.clone(),
            date,
        };
        self.calls.lock().unwrap().push(leg.clone());

        if self.stalled.contains(&leg) {
            std::future::pending::<()>().await;
        }

        if self.failing.contains(&leg) {
            return Err(AvailabilityError::ApiError {
                status: 503,
                message: "unavailable".to_string(),
            });
        }

        let mut train = one_train(source, destination, date);
        if self.malformed.contains(&leg) {
            train.tbs_availability[0].last_updated_on_raw = json!("not a number");
        }
        Ok(vec![train])
    }
}

fn two_by_two_by_three() -> PlanRequest {
    PlanRequest::new(
        vec![code("BCT"), code("MMCT")],
        vec![code("NDLS"), code("NZM")],
        vec![date("20241120"), date("20241121"), date("20241122")],
    )
}

fn leg(source: &str, destination: &str, day: &str) -> Leg {
    Leg {
        source: code(source),
        destination: code(destination),
        date: date(day),
    }
}

#[tokio::test]
async fn fetches_every_leg_in_nested_order() {
    let source = MockSource::new();
    let limits = PlannerLimits::default();
    let request = two_by_two_by_three();

    let outcome = QueryPlanner::new(&source, &limits)
        .run(&request, |_| {})
        .await
        .unwrap();

    let calls = source.calls();
    assert_eq!(calls.len(), 12);
    assert_eq!(calls, request.legs());
    assert_eq!(calls[0], leg("BCT", "NDLS", "20241120"));
    assert_eq!(calls[1], leg("BCT", "NDLS", "20241121"));
    assert_eq!(calls[3], leg("BCT", "NZM", "20241120"));
    assert_eq!(calls[6], leg("MMCT", "NDLS", "20241120"));
    assert_eq!(calls[11], leg("MMCT", "NZM", "20241122"));

    assert_eq!(outcome.records.len(), 12);
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.legs, 12);
    assert_eq!(outcome.records[0].train_number, "BCTNDLS20241120");
    assert_eq!(outcome.records[11].train_number, "MMCTNZM20241122");
}

#[tokio::test]
async fn progress_counts_every_leg_even_failures() {
    let mut source = MockSource::new();
    source.failing.insert(leg("BCT", "NZM", "20241121"));
    source.malformed.insert(leg("MMCT", "NDLS", "20241122"));
    let limits = PlannerLimits::default();

    let mut seen = Vec::new();
    QueryPlanner::new(&source, &limits)
        .run(&two_by_two_by_three(), |p| seen.push(p))
        .await
        .unwrap();

    let completed: Vec<usize> = seen.iter().map(|p| p.completed).collect();
    assert_eq!(completed, (1..=12).collect::<Vec<_>>());
    assert!(seen.iter().all(|p| p.total == 12));
    assert_eq!(seen[0].to_string(), "1/12");
    assert_eq!(seen[11].fraction(), 1.0);
}

#[tokio::test]
async fn one_failing_leg_keeps_the_rest() {
    let mut source = MockSource::new();
    let failed = leg("MMCT", "NDLS", "20241121");
    source.failing.insert(failed.clone());
    let limits = PlannerLimits::default();

    let outcome = QueryPlanner::new(&source, &limits)
        .run(&two_by_two_by_three(), |_| {})
        .await
        .unwrap();

    assert_eq!(source.calls().len(), 12);
    assert_eq!(outcome.records.len(), 11);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].leg, failed);
    assert_eq!(
        outcome.warnings[0].to_string(),
        "Error fetching trains for MMCT to NDLS on 21-11-2024: API error 503: unavailable"
    );
    assert!(
        outcome
            .records
            .iter()
            .all(|r| r.train_number != "MMCTNDLS20241121")
    );
}

#[tokio::test]
async fn malformed_leg_discards_all_its_records() {
    let mut source = MockSource::new();
    source.malformed.insert(leg("BCT", "NDLS", "20241120"));
    let limits = PlannerLimits::default();

    let outcome = QueryPlanner::new(&source, &limits)
        .run(&two_by_two_by_three(), |_| {})
        .await
        .unwrap();

    assert_eq!(outcome.records.len(), 11);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(
        outcome.warnings[0]
            .reason
            .starts_with("malformed timestamp for train BCTNDLS20241120")
    );
}

#[tokio::test]
async fn every_leg_failing_is_no_results_not_an_error() {
    let mut source = MockSource::new();
    let request = PlanRequest::new(vec![code("BCT")], vec![code("NDLS")], vec![date("20241120")]);
    source.failing.extend(request.legs());
    let limits = PlannerLimits::default();

    let outcome = QueryPlanner::new(&source, &limits)
        .run(&request, |_| {})
        .await
        .unwrap();

    assert!(outcome.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
}

#[tokio::test]
async fn interrupted_run_keeps_finished_legs() {
    let mut source = MockSource::new();
    source.stalled.insert(leg("BCT", "NZM", "20241120"));
    let limits = PlannerLimits::default();
    let request = two_by_two_by_three();
    let planner = QueryPlanner::new(&source, &limits);

    let mut outcome = PlanOutcome::default();
    let result = tokio::time::timeout(
        Duration::from_millis(50),
        planner.run_into(&request, &mut outcome, |_| {}),
    )
    .await;

    assert!(result.is_err(), "stalled leg should never finish");
    assert_eq!(outcome.legs, 3);
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(source.calls().len(), 4);
}

#[tokio::test]
async fn invalid_requests_make_no_calls() {
    let source = MockSource::new();
    let limits = PlannerLimits::default();
    let planner = QueryPlanner::new(&source, &limits);

    let no_sources = PlanRequest::new(vec![], vec![code("NDLS")], vec![date("20241120")]);
    let no_destinations = PlanRequest::new(vec![code("BCT")], vec![], vec![date("20241120")]);
    let no_dates = PlanRequest::new(vec![code("BCT")], vec![code("NDLS")], vec![]);
    let too_many = PlanRequest::new(
        ["A", "B", "C", "D", "E", "F", "G"].iter().map(|s| code(s)).collect(),
        vec![code("NDLS")],
        vec![date("20241120")],
    );

    let too_many_dates = PlanRequest::new(
        vec![code("BCT")],
        vec![code("NDLS")],
        DateSelection::Range {
            start: date("20240101"),
            end: date("20740101"),
        }
        .dates()
        .unwrap(),
    );

    for request in [no_sources, no_destinations, no_dates, too_many, too_many_dates] {
        let result = planner.run(&request, |_| {}).await;
        assert!(matches!(result, Err(PlanError::InvalidRequest(_))));
    }

    assert!(source.calls().is_empty());
}

#[test]
fn date_limit_is_inclusive() {
    let limits = PlannerLimits::default();
    let dates = |days: u64| {
        DateSelection::Range {
            start: date("20241101"),
            end: JourneyDate::new(
                date("20241101")
                    .naive()
                    .checked_add_days(chrono::Days::new(days - 1))
                    .unwrap(),
            ),
        }
        .dates()
        .unwrap()
    };

    let at_limit = PlanRequest::new(vec![code("BCT")], vec![code("NDLS")], dates(60));
    assert!(at_limit.validate(&limits).is_ok());

    let over_limit = PlanRequest::new(vec![code("BCT")], vec![code("NDLS")], dates(61));
    let err = over_limit.validate(&limits).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid plan request: at most 60 travel dates are allowed, got 61"
    );
}

#[test]
fn legs_are_cartesian_product() {
    let request = two_by_two_by_three();
    assert_eq!(request.leg_count(), 12);

    let legs = request.legs();
    let unique: HashSet<&Leg> = legs.iter().collect();
    assert_eq!(unique.len(), 12);
}

#[test]
fn leg_display_uses_human_date() {
    assert_eq!(
        leg("BCT", "NDLS", "20241120").to_string(),
        "BCT to NDLS on 20-11-2024"
    );
}

#[test]
fn empty_progress_is_complete() {
    let progress = Progress {
        completed: 0,
        total: 0,
    };
    assert_eq!(progress.fraction(), 1.0);
}
