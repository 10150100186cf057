use arbor::aspects::{angular_separation, AspectCalculator, AspectKind, AspectSettings};
use arbor::ephemeris::BodyPosition;
use arbor::western::Body;

fn at(body: Body, longitude: f64) -> BodyPosition {
    BodyPosition::from_longitude(body, longitude, 1, false)
}

#[test]
fn test_exact_square() {
    let calculator = AspectCalculator::default();
    let set = calculator.compute(&[at(Body::Sun, 10.0), at(Body::Mars, 100.0)]);

    assert_eq!(set.len(), 1);
    let aspect = &set.aspects[0];
    assert_eq!(aspect.kind, AspectKind::Square);
    assert_eq!(aspect.separation, 90.0);
    assert_eq!(aspect.orb, 0.0);
    assert!(aspect.exact);
}

#[test]
fn test_conjunction_across_aries_point() {
    let calculator = AspectCalculator::default();
    let set = calculator.compute(&[at(Body::Moon, 358.0), at(Body::Venus, 4.0)]);

    assert_eq!(set.len(), 1);
    assert_eq!(set.aspects[0].kind, AspectKind::Conjunction);
    assert!((set.aspects[0].orb - 6.0).abs() < 1e-9);
    assert!(!set.aspects[0].exact);
}

#[test]
fn test_opposition_within_orb() {
    let calculator = AspectCalculator::default();
    let set = calculator.compute(&[at(Body::Sun, 100.0), at(Body::Saturn, 278.0)]);

    assert_eq!(set.aspects[0].kind, AspectKind::Opposition);
    assert!(set.aspects[0].exact);
}

#[test]
fn test_aspects_are_symmetric() {
    let positions: Vec<BodyPosition> = Body::PLANETS
        .iter()
        .enumerate()
        .map(|(i, &body)| at(body, (i as f64 * 47.3) % 360.0))
        .collect();
    let set = AspectCalculator::default().compute(&positions);

    for a in &positions {
        for b in &positions {
            if a.body == b.body {
                continue;
            }
            let ab = set.between(a.body, b.body).map(|x| (x.kind, x.orb));
            let ba = set.between(b.body, a.body).map(|x| (x.kind, x.orb));
            assert_eq!(ab, ba, "{} / {}", a.body, b.body);
        }
    }

    // Each aspect is stored once and indexed from both bodies
    let references: usize = set.by_body.values().map(Vec::len).sum();
    assert_eq!(references, set.len() * 2);
}

#[test]
fn test_separation_is_bounded() {
    let mut lon = -720.0;
    while lon < 720.0 {
        let s = angular_separation(lon, 123.4);
        assert!((0.0..=180.0).contains(&s));
        assert!((s - angular_separation(123.4, lon)).abs() < 1e-9);
        lon += 3.7;
    }
}

#[test]
fn test_exact_threshold_comes_from_settings() {
    let mut settings = AspectSettings::default();
    settings.exact_threshold = 1.0;
    let calculator = AspectCalculator::new(settings);
    let set = calculator.compute(&[at(Body::Sun, 10.0), at(Body::Jupiter, 132.0)]);

    assert_eq!(set.aspects[0].kind, AspectKind::Trine);
    assert!(!set.aspects[0].exact);
    assert_eq!(set.exact_count(Body::Sun), 0);
}
