use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the value iteratively
    Insert(T),
    /// Insert the value recursively
    InsertRecursive(T),
    /// Remove the value from the data structure
    Remove(T),
    /// Compare iterators
    Iter,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::InsertRecursive(T::arbitrary(g)),
            2 => Op::Remove(T::arbitrary(g)),
            3 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
