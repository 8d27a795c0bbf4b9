use fdset::{Error, FdSet};

#[test]
fn test_growth_preserves_members() {
    let mut set = FdSet::new().unwrap();
    let low = [0, 1, 3, 63, 64, 70, 500, 1023];
    for e in low {
        set.add(e).unwrap();
    }

    set.add(2000).unwrap();
    assert!(set.capacity() > 2000);
    assert!(set.contains(2000));
    for e in low {
        assert!(set.contains(e), "lost {e} after growth");
    }
    assert_eq!(set.len(), low.len() + 1);
}

#[test]
fn test_growth_doubles() {
    let mut set = FdSet::new().unwrap();
    set.add(1024).unwrap();
    assert_eq!(set.capacity(), 2048);

    set.add(2048).unwrap();
    assert_eq!(set.capacity(), 4096);
}

#[test]
fn test_growth_jumps_when_doubling_is_not_enough() {
    let mut set = FdSet::with_capacity(64).unwrap();
    set.add(100_000).unwrap();
    assert_eq!(set.capacity(), 100_001);
    assert!(set.contains(100_000));
}

#[test]
fn test_growth_clears_new_range() {
    let mut set = FdSet::with_capacity(100).unwrap();
    for e in 0..100 {
        set.add(e).unwrap();
    }

    set.add(150).unwrap();
    assert_eq!(set.capacity(), 200);
    for e in 100..200 {
        assert_eq!(set.contains(e), e == 150, "bit {e}");
    }
}

#[test]
fn test_grow_explicit() {
    let mut set = FdSet::with_capacity(10).unwrap();
    set.add(9).unwrap();

    set.grow(65).unwrap();
    assert_eq!(set.capacity(), 65);
    assert_eq!(set.as_words().len(), 2);
    assert!(set.contains(9));
    assert!(!set.contains(64));
}

#[test]
fn test_grow_rejects_non_growth() {
    let mut set = FdSet::with_capacity(128).unwrap();
    assert_eq!(
        set.grow(128),
        Err(Error::InvalidGrowth {
            capacity: 128,
            requested: 128
        })
    );
    assert_eq!(
        set.grow(64),
        Err(Error::InvalidGrowth {
            capacity: 128,
            requested: 64
        })
    );
    assert_eq!(set.capacity(), 128);
}

#[test]
fn test_allocation_failure_leaves_set_usable() {
    let mut set = FdSet::with_capacity(64).unwrap();
    set.add(7).unwrap();

    let err = set.add(usize::MAX / 2).unwrap_err();
    assert!(err.is_alloc());

    assert_eq!(set.capacity(), 64);
    assert!(set.contains(7));
    set.add(8).unwrap();
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![7, 8]);
}

#[test]
fn test_growth_during_iteration_is_memory_safe() {
    let mut set = FdSet::from_members(64, [1, 2, 3]).unwrap();
    assert_eq!(set.iter_begin(), Some(1));

    set.add(500).unwrap();
    let mut rest = Vec::new();
    while set.iter_more() {
        rest.extend(set.iter_next());
    }
    assert_eq!(rest, vec![2, 3, 500]);
}
