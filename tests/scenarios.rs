//! Scenario tests: split, collapse, boundary errors and the state machine

use blocktree::{BlockTree, TreeError};
use test_case::test_case;

#[test]
fn capacity_four_split_scenario() {
    let mut tree: BlockTree<i64> = BlockTree::new(4);
    for v in 1..=4 {
        tree.insert(v);
    }
    assert_eq!(tree.leaf_count(), 1, "four values fit one leaf");

    tree.insert(5);
    assert_eq!(tree.leaf_count(), 2, "fifth value splits the leaf");
    assert_eq!(tree.to_vec(), vec![1, 2, 3, 4, 5]);
    assert_eq!(tree.get_by_index(4).unwrap(), 5);

    assert!(tree.sort().unwrap());
    assert_eq!(tree.leaf_count(), 2, "sort redistributes, never reshapes");
    assert_eq!(tree.to_vec(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn two_leaf_collapse_scenario() {
    let mut tree: BlockTree<i64> = BlockTree::new(1);
    tree.insert(10);
    tree.insert(20);
    assert_eq!(tree.leaf_count(), 2);

    tree.remove_by_index(0).unwrap();
    assert_eq!(tree.leaf_count(), 1, "first removal collapses to one leaf");

    tree.remove_by_index(0).unwrap();
    assert!(tree.is_empty());
}

#[test_case(1)]
#[test_case(2)]
#[test_case(4)]
#[test_case(16)]
fn boundary_errors_on_empty_tree(capacity: usize) {
    let mut tree: BlockTree<i64> = BlockTree::new(capacity);
    assert!(matches!(
        tree.get_by_index(0),
        Err(TreeError::OutOfRange { index: 0, size: 0 })
    ));
    assert!(matches!(
        tree.remove_by_index(0),
        Err(TreeError::OutOfRange { index: 0, size: 0 })
    ));
    assert_eq!(tree.remove(1), 0);
}

#[test_case(1)]
#[test_case(3)]
#[test_case(8)]
fn index_equal_to_size_is_out_of_range(capacity: usize) {
    let mut tree: BlockTree<i64> = BlockTree::new(capacity);
    for v in 0..5 {
        tree.insert(v);
    }
    let size = tree.size();
    assert!(matches!(
        tree.get_by_index(size),
        Err(TreeError::OutOfRange { .. })
    ));
    assert!(matches!(
        tree.remove_by_index(size),
        Err(TreeError::OutOfRange { .. })
    ));
    assert!(matches!(
        tree.insert_by_index(size, 99),
        Err(TreeError::OutOfRange { .. })
    ));
    assert_eq!(tree.size(), size, "failed operations must not mutate");
}

#[test_case(2)]
#[test_case(5)]
fn state_machine_walk(capacity: usize) {
    let mut tree: BlockTree<i64> = BlockTree::new(capacity);

    // Empty: not sorted, sort declines
    assert!(!tree.is_sorted());
    assert!(!tree.sort().unwrap());

    // Unordered after inserts
    tree.insert(3);
    tree.insert(1);
    assert!(!tree.is_sorted());

    // Sorted after sort
    assert!(tree.sort().unwrap());
    assert!(tree.is_sorted());

    // Order-preserving insert keeps Sorted
    tree.insert_with_order_save(2).unwrap();
    assert!(tree.is_sorted());
    assert_eq!(tree.to_vec(), vec![1, 2, 3]);

    // Any plain insert drops back to Unordered
    tree.insert(0);
    assert!(!tree.is_sorted());
    assert!(matches!(
        tree.insert_with_order_save(4),
        Err(TreeError::NotSorted)
    ));

    // Clear returns to Empty
    tree.clear();
    assert!(tree.is_empty());
    assert!(!tree.is_sorted());
}

#[test]
fn deep_growth_and_drain() {
    let mut tree: BlockTree<i64> = BlockTree::new(2);
    for v in 0..200 {
        tree.insert(v);
    }
    assert_eq!(tree.size(), 200);

    // Drain from the back; every removal must keep bookkeeping exact
    for remaining in (0..200).rev() {
        tree.remove_by_index(remaining as usize).unwrap();
        assert_eq!(tree.size(), remaining as usize);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.leaf_count(), 0);
}

#[test]
fn duplicates_survive_sort_and_value_removal() {
    let mut tree: BlockTree<i64> = BlockTree::new(3);
    for v in [5, 2, 5, 2, 5] {
        tree.insert(v);
    }
    tree.sort().unwrap();
    assert_eq!(tree.to_vec(), vec![2, 2, 5, 5, 5]);

    assert_eq!(tree.remove(5), 3);
    assert_eq!(tree.to_vec(), vec![2, 2]);
    assert!(tree.is_sorted(), "removal keeps an ascending sequence ascending");
}
