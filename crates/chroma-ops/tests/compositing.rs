//! End-to-end compositing properties across encodings.

use approx::assert_relative_eq;
use chroma_core::{Channel, Color, Color16, Color8, ColorF, IntChannel, Premul, Premul16, Premul8};
use chroma_ops::adjust::{adjust_slice, darken, Adjustment};
use chroma_ops::composite::{
    over, over_gamma, over_opaque, over_opaque_with, premul_over, premul_over_slice, premultiply,
    unpremultiply,
};
use chroma_ops::{Composite, DivisionPolicy, Strictness};

/// premultiplied -> straight -> premultiplied stays within one unit.
fn premul_roundtrip<T: Composite + IntChannel>() {
    for alpha in [1u64, 128, 254] {
        let a = T::narrow(alpha);
        for c in 0..=alpha {
            let p = Premul::new(T::narrow(c), T::narrow(c / 2), T::ZERO, a);
            let back = premultiply(unpremultiply(p));
            assert!(back.r.widen().abs_diff(c) <= 1, "alpha {alpha}, c {c}: {back:?}");
            assert!(back.g.widen().abs_diff(c / 2) <= 1, "alpha {alpha}, c {c}: {back:?}");
            assert_eq!(back.b, T::ZERO);
            assert_eq!(back.a, a);
        }
    }
}

#[test]
fn test_premul_roundtrip_u8() {
    premul_roundtrip::<u8>();
}

#[test]
fn test_premul_roundtrip_u16() {
    premul_roundtrip::<u16>();
}

#[test]
fn test_over_opaque_source_alpha_endpoints() {
    fn check<T: Composite + PartialEq>(fg_rgb: [T; 3], bg_rgb: [T; 3]) {
        let bg = Color::opaque(bg_rgb[0], bg_rgb[1], bg_rgb[2]);
        for policy in [DivisionPolicy::Exact, DivisionPolicy::Shift] {
            let clear = Color::new(fg_rgb[0], fg_rgb[1], fg_rgb[2], T::ZERO);
            assert_eq!(over_opaque_with(clear, bg, policy), bg);

            let solid = Color::opaque(fg_rgb[0], fg_rgb[1], fg_rgb[2]);
            assert_eq!(over_opaque_with(solid, bg, policy), solid);
        }
    }
    check::<u8>([255, 7, 0], [3, 128, 254]);
    check::<u16>([65535, 700, 0], [3, 32768, 65534]);
    check::<f32>([1.0, 0.25, 0.0], [0.5, 0.75, 1.0]);
}

#[test]
fn test_over_opaque_policies_agree_within_one() {
    for a in 0..=255u8 {
        let fg = Color8::new(250, 3, 128, a);
        let bg = Color8::opaque(5, 252, 127);
        let exact = over_opaque(fg, bg);
        let shift = over_opaque_with(fg, bg, DivisionPolicy::Shift);
        for (e, s) in exact.rgb().into_iter().zip(shift.rgb()) {
            assert!(e.abs_diff(s) <= 1, "alpha {a}");
        }
    }
}

#[test]
fn test_over_straight_properties() {
    // Transparent backdrop: the source comes through.
    let fg = Color8::new(17, 200, 99, 33);
    assert_eq!(over(fg, Color8::new(1, 2, 3, 0)), fg);

    let fg16 = Color16::new(1, 40000, 65535, 2);
    assert_eq!(over(fg16, Color16::transparent()), fg16);

    // Both opaque: the source exactly.
    let solid = Color16::opaque(11, 22, 33);
    assert_eq!(over(solid, Color16::opaque(99, 99, 99)), solid);

    let f = ColorF::new(0.2, 0.4, 0.6, 0.3);
    let out = over(f, ColorF::transparent());
    assert_relative_eq!(out.r, 0.2, max_relative = 1e-6);
    assert_relative_eq!(out.a, 0.3, max_relative = 1e-6);
}

#[test]
fn test_straight_and_premul_over_agree() {
    let fg = Color8::new(200, 100, 50, 180);
    let bg = Color8::new(20, 40, 250, 90);

    let straight = over(fg, bg);
    let via_premul = unpremultiply(premul_over(premultiply(fg), premultiply(bg)));
    assert_eq!(straight.a, via_premul.a);
    for (s, p) in straight.rgb().into_iter().zip(via_premul.rgb()) {
        assert!(s.abs_diff(p) <= 2, "{straight:?} vs {via_premul:?}");
    }
}

#[test]
fn test_premul_over_results_valid() {
    let fg = [Premul8::new(10, 20, 30, 40), Premul8::new(255, 0, 0, 255)];
    let bg = [Premul8::new(100, 100, 100, 100), Premul8::new(0, 0, 0, 0)];
    let out = premul_over_slice(&fg, &bg, Strictness::Strict).unwrap();
    assert!(out.iter().all(|c| c.valid));
    assert_eq!(out[1].value, fg[1]);

    let p = premul_over(Premul16::new(0, 0, 0, 0), Premul16::new(5, 4, 3, 9));
    assert_eq!(p.to_array(), [5, 4, 3, 9]);
}

#[test]
fn test_darken_example() {
    let c = darken(Color8::new(128, 255, 64, 255), 0.5);
    let want = [128.0_f32 * 0.5, 255.0 * 0.5, 64.0 * 0.5].map(<u8 as Channel>::from_f32);
    assert_eq!(c.rgb(), want);
    assert_eq!(c.to_array(), [64, 128, 32, 255]);
}

#[test]
fn test_adjust_slice_keeps_alpha() {
    let mut px = vec![Color16::new(1000, 2000, 3000, 77); 5];
    adjust_slice(&mut px, Adjustment::Lighten(1.0)).unwrap();
    assert!(px.iter().all(|c| c.to_array() == [65535, 65535, 65535, 77]));
}

#[test]
fn test_over_gamma_matches_manual_linear_mix() {
    let fg = ColorF::new(0.8, 0.2, 0.5, 0.25);
    let bg = ColorF::opaque(0.1, 0.9, 0.5);
    let out = over_gamma(fg, bg);

    let mix = |f: f32, b: f32| {
        let lin = chroma_transfer::srgb_to_linear(f) * 0.25 + chroma_transfer::srgb_to_linear(b) * 0.75;
        chroma_transfer::linear_to_srgb(lin)
    };
    assert_relative_eq!(out.r, mix(0.8, 0.1), max_relative = 1e-5);
    assert_relative_eq!(out.g, mix(0.2, 0.9), max_relative = 1e-5);
    assert_relative_eq!(out.b, 0.5, max_relative = 1e-5);
    assert_relative_eq!(out.a, 1.0);
}
