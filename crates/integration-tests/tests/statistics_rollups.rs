use fake::Fake;
use integration_tests::{day, month, point, report, session};
use services::StatisticsAggregator;

#[test]
fn two_potholes_in_one_month() {
    let mut session = session();
    let a = session
        .submit_at(report("Pothole", point(51.50, -0.12)), day(2024, 10, 4))
        .unwrap();
    session
        .submit_at(report("Pothole", point(51.51, -0.13)), day(2024, 10, 20))
        .unwrap();

    let summary = session.summarize(month("2024-10"));
    assert_eq!(summary.total, 2);
    assert_eq!(summary.by_type.len(), 1);
    assert_eq!(summary.by_type[0].kind.as_str(), "Pothole");
    assert_eq!(summary.by_type[0].count, 2);

    for _ in 0..3 {
        session.cast_verification(a.id(), true).unwrap();
    }
    assert_eq!(session.contributor().points(), 15);
    assert_eq!(session.contributor().badge(), None);
    // verification does not move incidents between buckets
    assert_eq!(session.summarize(month("2024-10")).total, 2);
}

#[test]
fn empty_month_is_a_zero_summary() {
    let session = session();
    let summary = session.summarize(month("2030-01"));
    assert_eq!(summary.total, 0);
    assert!(summary.by_type.is_empty());
    assert_eq!(session.time_series(month("2030-01")), [0; 12]);
}

#[test]
fn months_listed_newest_first() {
    let mut session = session();
    for (y, m) in [(2024, 3), (2023, 12), (2024, 10), (2024, 3)] {
        session.submit_at(report("Rubbish", point(51.5, -0.1)), day(y, m, 1)).unwrap();
    }
    assert_eq!(
        session.list_months(),
        vec![month("2024-10"), month("2024-03"), month("2023-12")]
    );
}

#[test]
fn time_series_plots_trailing_year() {
    let mut session = session();
    for (y, m, n) in [(2024, 10, 3), (2024, 1, 2), (2023, 11, 1), (2023, 10, 5)] {
        for _ in 0..n {
            session.submit_at(report("Pothole", point(51.5, -0.1)), day(y, m, 15)).unwrap();
        }
    }

    let series = session.time_series(month("2024-10"));
    assert_eq!(series[9], session.summarize(month("2024-10")).total);
    assert_eq!(series, [2, 0, 0, 0, 0, 0, 0, 0, 0, 3, 1, 0]);

    let trailing = session.trailing_series(month("2024-10"));
    let totals: Vec<u64> = trailing.iter().map(|p| p.total).collect();
    assert_eq!(totals, vec![1, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 3]);
    assert_eq!(trailing[0].month, month("2023-11"));
}

#[test]
fn incremental_rollup_equals_full_scan() {
    let kinds = ["Pothole", "Rubbish", "Graffiti", "Flooding", "Streetlight"];
    let mut session = session();

    for _ in 0..300 {
        let kind = kinds[(0..kinds.len()).fake::<usize>()];
        let at = day((2023..2025i32).fake::<i32>(), (1..13u32).fake::<u32>(), (1..29u32).fake::<u32>());
        let location = point((-60.0..60.0).fake::<f64>(), (-170.0..170.0).fake::<f64>());
        session.submit_at(report(kind, location), at).unwrap();
    }

    let scanned = StatisticsAggregator::from_incidents(&session.all_incidents());
    assert_eq!(session.list_months(), scanned.list_months());
    for m in scanned.list_months() {
        assert_eq!(session.summarize(m), scanned.summarize(m));
        assert_eq!(session.time_series(m), scanned.time_series(m));
    }
    let total: u64 = session.list_months().into_iter().map(|m| session.summarize(m).total).sum();
    assert_eq!(total, 300);
}

#[test]
fn queries_are_idempotent() {
    let mut session = session();
    session.submit_at(report("Pothole", point(51.5, -0.1)), day(2024, 10, 1)).unwrap();
    session.submit_at(report("Rubbish", point(51.5, -0.1)), day(2024, 10, 2)).unwrap();

    let first = serde_json::to_string(&session.summarize(month("2024-10"))).unwrap();
    let second = serde_json::to_string(&session.summarize(month("2024-10"))).unwrap();
    assert_eq!(first, second);
    assert_eq!(session.trailing_series(month("2024-10")), session.trailing_series(month("2024-10")));
}
