use super::*;

#[test]
fn fnv_split_writes_match_single_write() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"narration");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"narr");
    b.write_bytes(b"ation");
    assert_eq!(a.finish(), b.finish());
    assert_eq!(content_hash(b"narration"), a.finish());
}

#[test]
fn content_hash_distinguishes_payloads() {
    assert_ne!(content_hash(b"a"), content_hash(b"b"));
    assert_eq!(content_hash(b""), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn rng_is_deterministic_and_in_range() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..32 {
        let v = a.range_f64(0.5, 2.0);
        assert_eq!(v, b.range_f64(0.5, 2.0));
        assert!((0.5..2.0).contains(&v));
    }
}
