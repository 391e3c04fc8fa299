use domains::errors::DomainError;
use domains::models::{Badge, IncidentId, IncidentStatus, VerificationPolicy, VoteDirection};
use fake::Fake;
use integration_tests::{day, point, report, session, session_with, TestSession};
use services::SessionPolicies;

fn seeded() -> (TestSession, IncidentId) {
    let mut session = session();
    let id = session
        .submit_at(report("Pothole", point(51.50, -0.12)), day(2024, 10, 1))
        .unwrap()
        .id();
    (session, id)
}

#[test]
fn three_verifications_then_flags_stay_verified() {
    let (mut session, id) = seeded();
    for _ in 0..3 {
        session.cast_verification(id, true).unwrap();
    }
    assert_eq!(session.get_incident(id).unwrap().status(), IncidentStatus::Verified);

    for _ in 0..2 {
        session.cast_verification(id, false).unwrap();
    }
    let incident = session.get_incident(id).unwrap();
    assert_eq!(incident.status(), IncidentStatus::Verified);
    assert_eq!(incident.verified_count(), 3);
    assert_eq!(incident.flagged_count(), 2);
}

#[test]
fn two_flags_then_verifications_stay_unverified() {
    let (mut session, id) = seeded();
    session.cast_verification(id, false).unwrap();
    let outcome = session.cast_verification(id, false).unwrap();
    assert_eq!(outcome.transition, Some(IncidentStatus::Unverified));

    for _ in 0..5 {
        let outcome = session.cast_verification(id, true).unwrap();
        assert_eq!(outcome.transition, None);
    }
    assert_eq!(session.get_incident(id).unwrap().status(), IncidentStatus::Unverified);
    assert_eq!(session.contributor().points(), 25);
}

#[test]
fn counters_never_decrease_over_random_sequences() {
    let (mut session, id) = seeded();
    let mut last = (0, 0, 0, 0);

    for _ in 0..60 {
        match (0..3u8).fake::<u8>() {
            0 => {
                session.cast_verification(id, (0..2u8).fake::<u8>() == 0).unwrap();
            }
            1 => {
                let direction = if (0..2u8).fake::<u8>() == 0 {
                    VoteDirection::Up
                } else {
                    VoteDirection::Down
                };
                session.cast_vote(id, direction).unwrap();
            }
            _ => {
                session.like(id).unwrap();
            }
        }

        let incident = session.get_incident(id).unwrap();
        let now = (
            incident.verified_count(),
            incident.flagged_count(),
            incident.votes().up + incident.votes().down,
            incident.likes(),
        );
        assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2 && now.3 >= last.3);
        last = now;
    }
}

#[test]
fn votes_do_not_change_status() {
    let (mut session, id) = seeded();
    for _ in 0..10 {
        session.cast_vote(id, VoteDirection::Down).unwrap();
    }
    let incident = session.get_incident(id).unwrap();
    assert_eq!(incident.votes().down, 10);
    assert_eq!(incident.status(), IncidentStatus::Pending);
}

#[test]
fn each_true_verification_awards_five_points_and_badges_follow() {
    let mut session = session();
    let ids: Vec<IncidentId> = (0..100u32)
        .map(|i| {
            session
                .submit_at(
                    report("Rubbish", point(51.0 + f64::from(i) * 0.001, 0.0)),
                    day(2024, 9, 1),
                )
                .unwrap()
                .id()
        })
        .collect();

    for (n, id) in ids.iter().enumerate() {
        let before = session.contributor().points();
        let outcome = session.cast_verification(*id, true).unwrap();
        assert_eq!(outcome.points_awarded, 5);
        assert_eq!(session.contributor().points(), before + 5);
        if n < 99 {
            assert_eq!(outcome.badge, None);
        }
    }
    assert_eq!(session.contributor().points(), 500);
    assert_eq!(session.contributor().badge(), Some(Badge::Bronze));

    session.cast_verification(ids[0], false).unwrap();
    assert_eq!(session.contributor().points(), 500);
}

#[test]
fn failed_verification_changes_nothing() {
    let (mut session, id) = seeded();
    let stale = IncidentId::new();

    assert_eq!(
        session.cast_verification(stale, true).unwrap_err(),
        DomainError::IncidentNotFound(stale)
    );
    assert_eq!(session.contributor().points(), 0);
    let incident = session.get_incident(id).unwrap();
    assert_eq!(incident.verified_count(), 0);
}

#[test]
fn custom_thresholds_are_honoured() {
    let mut session = session_with(SessionPolicies {
        verification: VerificationPolicy {
            verify_threshold: 1,
            flag_threshold: 5,
            points_per_verification: 10,
        },
        ..SessionPolicies::default()
    });
    let id = session
        .submit_at(report("Pothole", point(51.5, -0.12)), day(2024, 10, 1))
        .unwrap()
        .id();

    let outcome = session.cast_verification(id, true).unwrap();
    assert_eq!(outcome.transition, Some(IncidentStatus::Verified));
    assert_eq!(session.contributor().points(), 10);
}
