use std::fmt;
use std::hash::Hash;

pub type DefaultIx = u32;

/// Integer type used to address nodes in the tree arena.
///
/// # Safety
///
/// `new(x).index()` must return `x` for every `x < max().index()`.
pub unsafe trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

macro_rules! impl_index_type {
    ($($ty:ty),*) => {
        $(
            unsafe impl IndexType for $ty {
                #[inline(always)]
                fn new(x: usize) -> Self {
                    x as $ty
                }
                #[inline(always)]
                fn index(&self) -> usize {
                    *self as usize
                }
                #[inline(always)]
                fn max() -> Self {
                    <$ty>::MAX
                }
            }
        )*
    };
}

impl_index_type!(u8, u16, u32, u64, usize);

/// Node identifier.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// The slot shared by every absent child.
    #[inline]
    pub fn sentinel() -> Self {
        NodeIndex(IndexType::new(0))
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self.index() == 0
    }

    /// Number of keyed nodes an arena addressed by `Ix` can hold.
    #[inline]
    pub fn capacity() -> usize {
        <Ix as IndexType>::max().index() - 1
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}
