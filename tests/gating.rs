use rcprf::{Key, RangePrf, RcPrf16, RcPrf32, RcPrfError, RcPrfRange};

fn key() -> Key<32> {
    Key::new([0x77u8; 32])
}

#[test]
fn rejects_zero_and_oversized_heights() {
    assert!(matches!(
        RcPrf16::new(key(), 0),
        Err(RcPrfError::InvalidTreeHeight { height: 0, .. })
    ));
    assert!(matches!(
        RcPrf16::new(key(), 65),
        Err(RcPrfError::InvalidTreeHeight { height: 65, .. })
    ));
    for height in [1u8, 2, 33, 64] {
        assert!(RcPrf32::new(key(), height).is_ok(), "height {height}");
    }
}

#[test]
fn rejects_inverted_and_out_of_domain_ranges() {
    let prf = RcPrf16::new(key(), 4).expect("rcprf");
    assert_eq!(
        prf.constrain(5, 3).unwrap_err(),
        RcPrfError::InvalidRange { min: 5, max: 3 }
    );
    assert_eq!(
        prf.constrain(0, 8).unwrap_err(),
        RcPrfError::RangeOutOfDomain {
            max: 8,
            leaf_count: 8,
        }
    );
    assert!(prf.eval(8).is_err());
    assert!(prf.eval(u64::MAX).is_err());
}

#[test]
fn eval_range_respects_bounds_and_cap() {
    let prf = RcPrf16::new(key(), 40).expect("rcprf");
    let c = prf.constrain(100, 199).expect("constrain");
    let inner = RcPrfRange::new(150, 159).expect("range");
    let values = c.eval_range(&inner).expect("eval_range");
    assert_eq!(values.len(), 10);
    assert_eq!(values[3], prf.eval(153).expect("eval"));

    assert!(matches!(
        c.eval_range(&RcPrfRange::new(90, 120).expect("range")),
        Err(RcPrfError::RangeNotContained { .. })
    ));
    assert!(matches!(
        prf.eval_range(&RcPrfRange::new(0, 1 << 30).expect("range")),
        Err(RcPrfError::RangeTooWide { .. })
    ));
}

#[test]
fn narrowing_a_constrained_key_stays_inside() {
    let prf = RcPrf16::new(key(), 10).expect("rcprf");
    let wide = prf.constrain(17, 400).expect("constrain");
    let narrow = wide.constrain(33, 34).expect("narrow");
    assert_eq!(narrow.range(), RcPrfRange::new(33, 34).expect("range"));
    assert_eq!(narrow.eval(33).expect("eval"), prf.eval(33).expect("eval"));
    assert!(narrow.eval(32).is_err());
    assert!(matches!(
        wide.constrain(10, 20),
        Err(RcPrfError::RangeNotContained { .. })
    ));
    assert!(matches!(
        wide.constrain(30, 20),
        Err(RcPrfError::InvalidRange { min: 30, max: 20 })
    ));
}

#[test]
fn key_from_slice_checks_length() {
    let mut short = vec![1u8; 16];
    assert_eq!(
        Key::<32>::from_slice(&mut short).unwrap_err(),
        RcPrfError::InvalidKeyLength {
            expected: 32,
            got: 16,
        }
    );
    let mut exact = vec![1u8; 32];
    let k = Key::<32>::from_slice(&mut exact).expect("key");
    assert!(exact.iter().all(|&b| b == 0));
    assert!(RcPrf16::new(k, 3).is_ok());
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_range_matches_sequential() {
    let prf = RcPrf32::new(key(), 20).expect("rcprf");
    let range = RcPrfRange::new(1000, 3047).expect("range");
    let c = prf.constrain(999, 4000).expect("constrain");
    assert_eq!(
        c.par_eval_range(&range).expect("par"),
        prf.eval_range(&range).expect("seq")
    );
}
