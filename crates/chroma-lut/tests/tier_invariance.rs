//! Gamma tables must not depend on the lane width they were built with.

use chroma_core::Tier;
use chroma_lut::{GammaTable, NarrowingGammaTable};

const GAMMAS: [f64; 6] = [0.45, 1.0, 1.8, 2.2, 2.4, 3.1];

#[test]
fn test_u8_tables_identical_across_tiers() {
    for gamma in GAMMAS {
        let reference = GammaTable::<u8>::build_with_tier(gamma, Tier::Scalar).unwrap();
        for tier in [Tier::X2, Tier::X4] {
            let t = GammaTable::<u8>::build_with_tier(gamma, tier).unwrap();
            assert_eq!(t, reference, "gamma {gamma}, tier {tier}");
        }
    }
}

#[test]
fn test_u16_tables_identical_across_tiers() {
    for gamma in [1.8, 2.2] {
        let reference = GammaTable::<u16>::build_with_tier(gamma, Tier::Scalar).unwrap();
        for tier in [Tier::X2, Tier::X4] {
            let t = GammaTable::<u16>::build_with_tier(gamma, tier).unwrap();
            assert!(t.as_slice() == reference.as_slice(), "gamma {gamma}, tier {tier}");
        }
    }
}

#[test]
fn test_narrowing_identical_across_tiers() {
    let reference = NarrowingGammaTable::build_with_tier(2.2, Tier::Scalar).unwrap();
    let t = NarrowingGammaTable::build_with_tier(2.2, Tier::X4).unwrap();
    assert!(t.as_slice() == reference.as_slice());
}

#[test]
fn test_host_tier_matches_scalar() {
    let host = GammaTable::<u8>::build(2.2).unwrap();
    let scalar = GammaTable::<u8>::build_with_tier(2.2, Tier::Scalar).unwrap();
    assert_eq!(host.as_slice(), scalar.as_slice());
}

#[test]
fn test_u16_table_close_to_host_powf() {
    let t = GammaTable::<u16>::build_with_tier(2.2, Tier::X4).unwrap();
    for (i, &v) in t.as_slice().iter().enumerate().step_by(97) {
        let want = (65535.0 * (i as f64 / 65535.0).powf(1.0 / 2.2) + 0.5).floor();
        assert!((f64::from(v) - want).abs() <= 1.0, "entry {i}: {v} vs {want}");
    }
}

#[test]
fn test_degenerate_table_any_tier() {
    for tier in Tier::ALL {
        let t = GammaTable::<u8>::build_with_tier(0.0, tier).unwrap();
        assert_eq!(t.as_slice().iter().filter(|&&v| v != 0).count(), 1);
    }
}
