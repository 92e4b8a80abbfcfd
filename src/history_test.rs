use proptest::prelude::*;

use super::*;

// =============================================================
// Basic stack behavior
// =============================================================

#[test]
fn new_history_has_nothing_to_undo_or_redo() {
    let mut h = History::new(0);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(!h.undo());
    assert!(!h.redo());
    assert_eq!(*h.present(), 0);
}

#[test]
fn set_then_undo_then_redo() {
    let mut h = History::new(1);
    assert!(h.set(2));
    assert!(h.set(3));
    assert!(h.undo());
    assert_eq!(*h.present(), 2);
    assert!(h.can_redo());
    assert!(h.redo());
    assert_eq!(*h.present(), 3);
    assert!(!h.can_redo());
}

#[test]
fn set_equal_value_is_ignored() {
    let mut h = History::new("a".to_owned());
    assert!(!h.set("a".to_owned()));
    assert!(!h.can_undo());
}

#[test]
fn new_commit_clears_future() {
    let mut h = History::new(1);
    h.set(2);
    h.undo();
    assert!(h.can_redo());
    h.set(5);
    assert!(!h.can_redo());
    assert_eq!(*h.present(), 5);
}

#[test]
fn update_applies_closure() {
    let mut h = History::new(vec![1]);
    assert!(h.update(|v| {
        let mut next = v.clone();
        next.push(2);
        next
    }));
    assert_eq!(h.present(), &vec![1, 2]);
}

#[test]
fn past_is_bounded() {
    let mut h = History::with_limit(0, 3);
    for i in 1..=10 {
        h.set(i);
    }
    assert_eq!(h.undo_depth(), 3);
    while h.undo() {}
    assert_eq!(*h.present(), 7);
}

#[test]
fn reset_drops_stacks() {
    let mut h = History::new(1);
    h.set(2);
    h.reset(9);
    assert!(!h.can_undo());
    assert_eq!(*h.present(), 9);
}

// =============================================================
// Properties
// =============================================================

proptest! {
    #[test]
    fn undo_all_then_redo_all_restores(values in proptest::collection::vec(0i32..50, 0..40)) {
        let mut h = History::new(-1);
        for v in &values {
            h.set(*v);
        }
        let last = *h.present();
        let depth = h.undo_depth();

        let mut undone = 0;
        while h.undo() {
            undone += 1;
        }
        prop_assert_eq!(undone, depth);
        prop_assert_eq!(*h.present(), -1);

        while h.redo() {}
        prop_assert_eq!(*h.present(), last);
    }

    #[test]
    fn undo_then_redo_is_identity(values in proptest::collection::vec(0i32..5, 1..20), steps in 0usize..20) {
        let mut h = History::new(100);
        for v in &values {
            h.set(*v);
        }
        for _ in 0..steps {
            h.undo();
        }
        let here = *h.present();
        if h.undo() {
            h.redo();
        }
        prop_assert_eq!(*h.present(), here);
    }
}
