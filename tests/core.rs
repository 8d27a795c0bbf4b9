use fdset::{DEFAULT_CAPACITY, Error, FdSet};

#[test]
fn test_new() {
    let set = FdSet::new().unwrap();
    assert_eq!(set.capacity(), DEFAULT_CAPACITY);
    assert_eq!(set.as_words().len(), 16);
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[test]
fn test_with_capacity() {
    let set = FdSet::with_capacity(1).unwrap();
    assert_eq!(set.capacity(), 1);
    assert_eq!(set.as_words().len(), 1);

    let set = FdSet::with_capacity(129).unwrap();
    assert_eq!(set.capacity(), 129);
    assert_eq!(set.as_words().len(), 3);
}

#[test]
fn test_zero_capacity_rejected() {
    let err = FdSet::with_capacity(0).unwrap_err();
    assert_eq!(err, Error::ZeroCapacity);
    assert!(err.is_misuse());
}

#[test]
fn test_with_capacity_allocation_failure() {
    let err = FdSet::with_capacity(usize::MAX).unwrap_err();
    assert!(err.is_alloc());
    assert_eq!(
        err,
        Error::Alloc {
            words: usize::MAX.div_ceil(64)
        }
    );
}

#[test]
fn test_basic_operations() {
    let mut set = FdSet::new().unwrap();

    set.add(10).unwrap();
    set.add(42).unwrap();

    assert!(set.contains(10));
    assert!(set.contains(42));
    assert!(!set.contains(11));
    assert!(!set.contains(41));

    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
}

#[test]
fn test_add_is_idempotent() {
    let mut set = FdSet::new().unwrap();
    assert_eq!(set.add(5), Ok(()));
    assert_eq!(set.add(5), Ok(()));
    assert!(set.contains(5));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_word_boundaries() {
    let mut set = FdSet::new().unwrap();
    for e in [0, 63, 64, 127, 128, 1023] {
        set.add(e).unwrap();
    }
    for e in [0, 63, 64, 127, 128, 1023] {
        assert!(set.contains(e), "missing {e}");
    }
    for e in [1, 62, 65, 126, 129, 1022] {
        assert!(!set.contains(e), "unexpected {e}");
    }
    assert_eq!(set.as_words()[0], 1 | (1 << 63));
    assert_eq!(set.as_words()[1], 1 | (1 << 63));
    assert_eq!(set.as_words()[15], 1 << 63);
}

#[test]
fn test_remove() {
    let mut set = FdSet::new().unwrap();
    set.add(3).unwrap();
    set.add(4).unwrap();

    assert_eq!(set.remove(3), Ok(()));
    assert!(!set.contains(3));
    assert!(set.contains(4));
}

#[test]
fn test_remove_not_present() {
    let mut set = FdSet::new().unwrap();
    assert_eq!(set.remove(8), Err(Error::NotPresent { element: 8 }));
    assert!(!set.contains(8));

    set.add(8).unwrap();
    set.remove(8).unwrap();
    assert_eq!(set.remove(8), Err(Error::NotPresent { element: 8 }));
}

#[test]
fn test_remove_out_of_range() {
    let mut set = FdSet::with_capacity(100).unwrap();
    assert_eq!(
        set.remove(100),
        Err(Error::OutOfRange {
            element: 100,
            capacity: 100
        })
    );
    // inside the last storage word but beyond the logical capacity
    assert!(matches!(set.remove(120), Err(Error::OutOfRange { .. })));
    assert_eq!(set.capacity(), 100);
}

#[test]
fn test_contains_out_of_range_is_absence() {
    let set = FdSet::with_capacity(64).unwrap();
    assert!(!set.contains(64));
    assert!(!set.contains(usize::MAX));
}

#[test]
fn test_remove_never_shrinks() {
    let mut set = FdSet::new().unwrap();
    set.add(5000).unwrap();
    let cap = set.capacity();
    set.remove(5000).unwrap();
    assert_eq!(set.capacity(), cap);
}

#[test]
fn test_clear() {
    let mut set = FdSet::new().unwrap();
    for e in [1, 100, 1000, 3000] {
        set.add(e).unwrap();
    }
    let cap = set.capacity();

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.capacity(), cap);
    assert!((0..cap).all(|e| !set.contains(e)));
}

#[test]
fn test_clone() {
    let mut set = FdSet::with_capacity(300).unwrap();
    for e in [0, 65, 299] {
        set.add(e).unwrap();
    }

    let mut copy = set.try_clone().unwrap();
    assert_eq!(copy.capacity(), set.capacity());
    for e in 0..set.capacity() {
        assert_eq!(copy.contains(e), set.contains(e));
    }

    copy.add(1).unwrap();
    copy.remove(65).unwrap();
    assert!(!set.contains(1));
    assert!(set.contains(65));
}

#[test]
fn test_first_last() {
    let mut set = FdSet::new().unwrap();
    assert_eq!(set.first(), None);
    assert_eq!(set.last(), None);

    set.add(10).unwrap();
    set.add(5).unwrap();
    set.add(900).unwrap();
    assert_eq!(set.first(), Some(5));
    assert_eq!(set.last(), Some(900));
}

#[test]
fn test_drop_optional() {
    let set: Option<FdSet> = None;
    drop(set);

    let set = Some(FdSet::new().unwrap());
    drop(set);
}

#[test]
fn test_error_codes() {
    use fdset::status;

    let mut set = FdSet::with_capacity(64).unwrap();
    assert_eq!(set.remove(1).unwrap_err().code(), status::NOT_PRESENT);
    assert_eq!(set.remove(64).unwrap_err().code(), status::ERROR);
    assert_eq!(set.grow(10).unwrap_err().code(), status::ERROR);
    assert_eq!(
        set.add(usize::MAX).unwrap_err().code(),
        status::MALLOC_ERROR
    );
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}

    let err = Error::NotPresent { element: 2 };
    assert_error(&err);
    assert_eq!(err.to_string(), "element 2 is not in the set");
}
