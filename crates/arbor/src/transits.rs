//! Transits: aspects from a transit snapshot onto a natal snapshot.

use crate::aspects::{angular_separation, AspectKind};
use crate::ephemeris::{house_for_longitude, BodyPosition};
use crate::western::Body;
use serde::Serialize;

/// Orbs are tighter than natal aspects: 2° for the Moon, 1° for everything else.
pub fn transit_orb(body: Body) -> f64 {
    match body {
        Body::Moon => 2.0,
        _ => 1.0,
    }
}

/// Orb below which a transit counts as exact.
pub const EXACT_TRANSIT_ORB: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transit {
    pub transiting: Body,
    pub natal: Body,
    pub aspect: AspectKind,
    #[serde(serialize_with = "crate::rounding::two_decimals")]
    pub orb: f64,
    pub exact: bool,
    pub retrograde: bool,
    /// Natal house the transiting body is passing through
    pub natal_house: Option<u8>,
}

/// Every transit-to-natal aspect within orb, tightest first. A body transiting
/// its own natal position is included.
pub fn detect_transits(
    natal: &[BodyPosition],
    transiting: &[BodyPosition],
    natal_cusps: Option<&[f64; 12]>,
) -> Vec<Transit> {
    let mut transits = Vec::new();

    for moving in transiting {
        let max_orb = transit_orb(moving.body);
        let natal_house = natal_cusps.and_then(|cusps| house_for_longitude(moving.longitude, cusps));

        for fixed in natal {
            let separation = angular_separation(moving.longitude, fixed.longitude);
            let hit = AspectKind::ALL.iter().find_map(|&kind| {
                let orb = (separation - kind.angle()).abs();
                (orb <= max_orb).then_some((kind, orb))
            });

            if let Some((aspect, orb)) = hit {
                transits.push(Transit {
                    transiting: moving.body,
                    natal: fixed.body,
                    aspect,
                    orb,
                    exact: orb < EXACT_TRANSIT_ORB,
                    retrograde: moving.retrograde,
                    natal_house,
                });
            }
        }
    }

    transits.sort_by(|a, b| a.orb.total_cmp(&b.orb));
    log::debug!("{} transits", transits.len());
    transits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(body: Body, longitude: f64, retrograde: bool) -> BodyPosition {
        BodyPosition::from_longitude(body, longitude, 1, retrograde)
    }

    #[test]
    fn test_moon_gets_wider_orb() {
        let natal = vec![at(Body::Sun, 100.0, false)];
        let transiting = vec![at(Body::Moon, 281.5, false), at(Body::Mars, 281.5, false)];

        let transits = detect_transits(&natal, &transiting, None);
        assert_eq!(transits.len(), 1);
        assert_eq!(transits[0].transiting, Body::Moon);
        assert_eq!(transits[0].aspect, AspectKind::Opposition);
        assert!(!transits[0].exact);
    }

    #[test]
    fn test_sorted_by_orb_with_house() {
        let natal = vec![at(Body::Sun, 10.0, false), at(Body::Venus, 70.5, false)];
        let transiting = vec![at(Body::Saturn, 10.2, true)];
        let cusps = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0];

        let transits = detect_transits(&natal, &transiting, Some(&cusps));
        assert_eq!(transits.len(), 2);
        assert_eq!(transits[0].natal, Body::Sun);
        assert_eq!(transits[0].aspect, AspectKind::Conjunction);
        assert!(transits[0].exact);
        assert!(transits[0].retrograde);
        assert_eq!(transits[0].natal_house, Some(1));
        assert_eq!(transits[1].natal, Body::Venus);
        assert_eq!(transits[1].aspect, AspectKind::Sextile);
    }
}
