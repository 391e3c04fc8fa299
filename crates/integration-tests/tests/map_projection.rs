use std::collections::HashSet;

use domains::models::{
    ClusterPolicy, HeatWeighting, HeatmapPolicy, IncidentId, ViewportBounds, VoteDirection,
};
use fake::Fake;
use integration_tests::{day, point, report, session, session_with, LONDON};
use services::SessionPolicies;

fn london_viewport() -> ViewportBounds {
    ViewportBounds::new(point(51.3, -0.5), point(51.7, 0.3)).unwrap()
}

#[test]
fn heatmap_keeps_duplicate_locations() {
    let mut session = session();
    let (lat, lng) = LONDON;
    for _ in 0..3 {
        session.submit_at(report("Pothole", point(lat, lng)), day(2024, 10, 1)).unwrap();
    }
    session.submit_at(report("Rubbish", point(48.85, 2.35)), day(2024, 10, 1)).unwrap();

    let heat = session.heatmap();
    assert_eq!(heat.len(), 4);
    assert_eq!(heat.iter().filter(|p| p.lat == lat && p.lng == lng).count(), 3);
    assert!(heat.iter().all(|p| p.weight == 0.5));
}

#[test]
fn heatmap_weight_follows_corroboration() {
    let mut session = session_with(SessionPolicies {
        heatmap: HeatmapPolicy {
            weighting: HeatWeighting::UpVotes,
            ..HeatmapPolicy::default()
        },
        ..SessionPolicies::default()
    });
    let (lat, lng) = LONDON;
    let hot = session.submit_at(report("Pothole", point(lat, lng)), day(2024, 10, 1)).unwrap();
    session.submit_at(report("Pothole", point(lat, lng)), day(2024, 10, 1)).unwrap();
    for _ in 0..10 {
        session.cast_vote(hot.id(), VoteDirection::Up).unwrap();
    }

    let heat = session.heatmap();
    assert_eq!(heat[0].weight, 1.0);
    assert_eq!(heat[1].weight, 0.5);
}

#[test]
fn clusters_partition_visible_incidents() {
    let mut session = session();
    for _ in 0..150 {
        let location = point((51.35..51.65).fake::<f64>(), (-0.45..0.25).fake::<f64>());
        session.submit_at(report("Rubbish", location), day(2024, 10, 5)).unwrap();
    }
    // outside the viewport
    session.submit_at(report("Rubbish", point(40.7, -74.0)), day(2024, 10, 5)).unwrap();

    for zoom in [3u8, 10, 14, 18] {
        let clusters = session.clusters(&london_viewport(), zoom);
        let mut seen = HashSet::<IncidentId>::new();
        for cluster in &clusters {
            assert_eq!(cluster.count, cluster.member_ids.len());
            assert!(cluster.count >= 1);
            for id in &cluster.member_ids {
                assert!(seen.insert(*id), "incident in two clusters at zoom {zoom}");
            }
        }
        assert_eq!(seen.len(), 150);
    }

    // far apart at high zoom, one blob from orbit
    assert_eq!(session.clusters(&london_viewport(), 3).len(), 1);
    assert!(session.clusters(&london_viewport(), 18).len() > 100);
}

#[test]
fn rebuild_is_idempotent_until_a_submit() {
    let mut session = session();
    let (lat, lng) = LONDON;
    session.submit_at(report("Pothole", point(lat, lng)), day(2024, 10, 1)).unwrap();
    session.submit_at(report("Pothole", point(lat, lng + 0.0001)), day(2024, 10, 1)).unwrap();

    let first = session.clusters(&london_viewport(), 13);
    let second = session.clusters(&london_viewport(), 13);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].count, 2);
    assert_eq!(first[0].representative, point(lat, lng));

    session.submit_at(report("Pothole", point(lat, lng - 0.0001)), day(2024, 10, 1)).unwrap();
    let third = session.clusters(&london_viewport(), 13);
    assert_eq!(third[0].count, 3);
}

#[test]
fn clustering_can_be_disabled_past_a_zoom() {
    let mut session = session_with(SessionPolicies {
        clustering: ClusterPolicy {
            disable_clustering_at_zoom: Some(16),
            ..ClusterPolicy::default()
        },
        ..SessionPolicies::default()
    });
    let (lat, lng) = LONDON;
    for _ in 0..4 {
        session.submit_at(report("Graffiti", point(lat, lng)), day(2024, 10, 1)).unwrap();
    }

    assert_eq!(session.clusters(&london_viewport(), 15).len(), 1);
    let separate = session.clusters(&london_viewport(), 16);
    assert_eq!(separate.len(), 4);
    assert!(separate.iter().all(|c| c.is_single()));
}

#[test]
fn empty_viewport_has_no_clusters() {
    let mut session = session();
    session.submit_at(report("Pothole", point(48.85, 2.35)), day(2024, 10, 1)).unwrap();
    assert!(session.clusters(&london_viewport(), 12).is_empty());
    assert_eq!(session.clusters(&ViewportBounds::world(), 12).len(), 1);
}
