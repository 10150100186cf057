#[cfg(test)]
mod tests {
    use arbor::weighting::{WeightCalculator, MAX_FINAL_WEIGHT};
    use arbor::western::dignities::*;
    use arbor::western::{Body, Sign, SIGN_ORDER};

    #[test]
    fn test_sun_domicile_and_fall() {
        let classifier = DignityClassifier;
        assert_eq!(classifier.classify(Body::Sun, Sign::Leo).category, DignityCategory::Domicile);
        assert_eq!(classifier.classify(Body::Sun, Sign::Aries).category, DignityCategory::Exaltation);
        assert_eq!(classifier.classify(Body::Sun, Sign::Aquarius).category, DignityCategory::Exile);
        assert_eq!(classifier.classify(Body::Sun, Sign::Libra).category, DignityCategory::Fall);
        assert_eq!(classifier.classify(Body::Sun, Sign::Gemini).category, DignityCategory::Peregrine);
    }

    #[test]
    fn test_mercury_virgo_prefers_domicile() {
        let record = DignityClassifier.classify(Body::Mercury, Sign::Virgo);
        assert_eq!(record.category, DignityCategory::Domicile);
        assert_eq!(record.base_weight, 3.0);

        // Pisces is both exile and fall for Mercury; exile wins
        let record = DignityClassifier.classify(Body::Mercury, Sign::Pisces);
        assert_eq!(record.category, DignityCategory::Exile);
    }

    #[test]
    fn test_points_are_always_peregrine() {
        for sign in SIGN_ORDER {
            assert_eq!(DignityClassifier.classify(Body::Chiron, sign).base_weight, 1.0);
            assert_eq!(DignityClassifier.classify(Body::NorthNode, sign).base_weight, 1.0);
        }
    }

    #[test]
    fn test_weight_bound_over_every_input() {
        for body in Body::ALL {
            for sign in SIGN_ORDER {
                let base = DignityClassifier.classify(body, sign).base_weight;
                for house in 1..=12u8 {
                    for retrograde in [false, true] {
                        for exact in 0..=11usize {
                            let w = WeightCalculator.compute(base, house, retrograde, exact).final_weight;
                            assert!(w > 0.0);
                            assert!(w <= MAX_FINAL_WEIGHT + 1e-12);
                        }
                    }
                }
            }
        }
        assert!((MAX_FINAL_WEIGHT - 4.86).abs() < 1e-12);
    }
}
