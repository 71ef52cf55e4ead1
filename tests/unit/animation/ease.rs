use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::OutBack,
];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-2.0), ease.apply(0.0));
        assert_eq!(ease.apply(5.0), ease.apply(1.0));
    }
}

#[test]
fn monotonic_curves_never_decrease() {
    for ease in ALL.into_iter().filter(|e| e.is_monotonic()) {
        let mut prev = ease.apply(0.0);
        for i in 1..=100 {
            let v = ease.apply(f64::from(i) / 100.0);
            assert!(v >= prev, "{ease:?} decreased at step {i}");
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }
}

#[test]
fn out_back_overshoots() {
    let peak = (1..100)
        .map(|i| Ease::OutBack.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn default_is_out_quad() {
    assert_eq!(Ease::default(), Ease::OutQuad);
    assert_eq!(Ease::OutQuad.apply(0.5), 0.75);
}
