use ordered_tree::ordered::{Removed, Tree};

use std::collections::{BTreeSet, HashSet};

fn build(xs: &[i8]) -> Tree<i8> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(*x);
    }

    tree
}

fn build_recursive(xs: &[i8]) -> Tree<i8> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert_recursive(*x);
    }

    tree
}

fn owned(values: Vec<&i8>) -> Vec<i8> {
    values.into_iter().copied().collect()
}

quickcheck::quickcheck! {
    fn in_order_is_sorted(xs: Vec<i8>) -> bool {
        let tree = build(&xs);
        let expected: Vec<_> = xs.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        owned(tree.in_order()) == expected
    }

    fn contains(xs: Vec<i8>) -> bool {
        let tree = build(&xs);

        xs.iter().all(|x| tree.find(x).map(|n| n.value()) == Some(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = build(&xs);
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none() && tree.find_recursive(x).is_none())
    }

    fn find_matches_find_recursive(xs: Vec<i8>, probes: Vec<i8>) -> bool {
        let tree = build(&xs);

        probes.iter().chain(&xs).all(|x| {
            tree.find(x).map(|n| n.value()) == tree.find_recursive(x).map(|n| n.value())
        })
    }

    fn insert_twice_is_idempotent(xs: Vec<i8>, x: i8) -> bool {
        let mut tree = build(&xs);
        tree.insert(x);
        let once = owned(tree.pre_order());
        tree.insert(x);

        owned(tree.pre_order()) == once
    }

    fn insert_recursive_matches_insert(xs: Vec<i8>) -> bool {
        let iterative = build(&xs);
        let recursive = build_recursive(&xs);

        iterative.in_order() == recursive.in_order()
            && iterative.pre_order() == recursive.pre_order()
    }

    fn in_order_iterative_matches_recursive(xs: Vec<i8>) -> bool {
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        let mut reversed = sorted.clone();
        reversed.reverse();

        [xs, sorted, reversed].iter().all(|xs| {
            let tree = build(xs);
            tree.in_order_iterative() == tree.in_order()
        })
    }

    fn remove_present(xs: Vec<i8>, pick: usize) -> bool {
        if xs.is_empty() {
            return true;
        }
        let target = xs[pick % xs.len()];
        let mut tree = build(&xs);
        let mut expected = owned(tree.in_order());
        expected.retain(|x| *x != target);

        let removed = tree.remove(&target).map(Removed::into_value);

        removed == Some(target)
            && tree.find(&target).is_none()
            && owned(tree.in_order()) == expected
    }

    fn remove_absent(xs: Vec<i8>, x: i8) -> bool {
        let mut tree = build(&xs);
        if tree.contains(&x) {
            return true;
        }
        let before = owned(tree.pre_order());

        tree.remove(&x).is_none() && owned(tree.pre_order()) == before
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = build(&xs);
        for delete in &deletes {
            tree.remove(delete);
        }

        let mut still_present = xs;
        still_present.retain(|x| !deletes.contains(x));

        deletes.iter().all(|x| tree.find(x).is_none())
            && still_present.iter().all(|x| tree.find(x).is_some())
    }
}
