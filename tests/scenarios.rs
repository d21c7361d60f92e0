use sparse_multiset::{Error, SparseMultiset};

fn bag(counts: &[(&'static str, isize)]) -> SparseMultiset<&'static str> {
    SparseMultiset::from_counts(counts.iter().copied()).unwrap()
}

#[test]
fn built_from_counts() {
    let set = bag(&[("hi", 2), ("bye", 3), ("ha", 0)]);
    assert_eq!(set.get("hi"), 2);
    assert_eq!(set.get("bye"), 3);
    assert_eq!(set.get("ha"), 0);
    assert_eq!(set.get("hehe"), 0);
    assert!(!set.contains("ha"));
}

#[test]
fn built_from_elements() {
    let set: SparseMultiset<_> = ["hi", "hi", "bye", "bye", "bye"].into();
    assert_eq!(set.get("hi"), 2);
    assert_eq!(set.get("bye"), 3);
    assert_eq!(set.get("hehe"), 0);
}

#[test]
fn repeated_counts_are_summed() {
    let set = SparseMultiset::from_counts([("hi", 2), ("hi", 1)]).unwrap();
    assert_eq!(set.get("hi"), 3);
    assert_eq!(
        SparseMultiset::from_counts([("hi", 1), ("hi", -2)]),
        Err(Error::InvalidArgument { count: -2 })
    );
}

#[test]
fn flattened_view() {
    let set = bag(&[("hi", 2), ("bye", 8), ("ha", 0), ("hehe", 4)]);
    let items: Vec<_> = set.iter().copied().collect();
    assert_eq!(items.len(), 14);
    assert_eq!(items.iter().filter(|v| **v == "hi").count(), 2);
    assert_eq!(items.iter().filter(|v| **v == "bye").count(), 8);
    assert_eq!(items.iter().filter(|v| **v == "hehe").count(), 4);

    let by_position: Vec<_> = set.positions().map(|position| set[position]).collect();
    assert_eq!(by_position, items);
}

#[test]
fn set_algebra() {
    let a = bag(&[("hi", 2), ("bye", 8), ("ha", 0), ("hehe", 4)]);
    let b = bag(&[("hi", 7), ("bye", 2), ("bleh", 6)]);

    assert_eq!(
        &a + &b,
        bag(&[("hi", 9), ("bye", 10), ("hehe", 4), ("bleh", 6)])
    );
    assert_eq!(&a - &b, bag(&[("bye", 6), ("hehe", 4)]));
    assert_eq!(&b - &a, bag(&[("hi", 5), ("bleh", 6)]));
    assert_eq!(a.intersect(&b), bag(&[("hi", 2), ("bye", 2)]));
}

#[test]
fn subset_and_superset() {
    let a = bag(&[("hi", 2), ("bye", 8), ("ha", 0), ("hehe", 4)]);
    let hi: SparseMultiset<_> = ["hi"].into();
    let aa = &a + &hi;

    assert!(!a.is_strict_subset(&a));
    assert!(a.is_strict_subset(&aa));
    assert!(!aa.is_strict_subset(&a));

    assert!(a.is_subset(&a));
    assert!(a.is_subset(&aa));
    assert!(!aa.is_subset(&a));

    assert!(!a.is_strict_superset(&a));
    assert!(aa.is_strict_superset(&a));

    assert!(a.is_superset(&a));
    assert!(!a.is_superset(&aa));
    assert!(aa.is_superset(&a));
}

#[test]
fn disjoint() {
    let sample: SparseMultiset<_> = ["hi", "hi", "bye"].into();
    let cases: [(SparseMultiset<_>, bool); 4] = [
        (["hi", "bye", "bye"].into(), false),
        (["hi", "hi", "bye"].into(), false),
        (["hi", "hi", "hi", "bye"].into(), false),
        (["hey", "hello", "hello"].into(), true),
    ];

    for (other, expected) in cases {
        assert_eq!(sample.is_disjoint(&other), expected, "{other:?}");
    }
}

#[test]
fn rejected_counts_leave_state_unchanged() {
    let mut set = bag(&[("hi", 2)]);
    assert_eq!(
        set.insert_count("hi", -1),
        Err(Error::InvalidArgument { count: -1 })
    );
    assert_eq!(set.get("hi"), 2);
    assert_eq!(set.len(), 2);
}
