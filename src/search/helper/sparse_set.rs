use crate::color::VertexId;

/**
Set of integers in [0,n) supporting O(1) insertion, removal and membership test.
Elements are stored contiguously (dense) and the position of each element is kept
in a map (sparse). Removing an element swaps it with the last one, so the order
of the elements is not preserved.
*/
#[derive(Debug, Clone)]
pub struct SparseSet {
    /// dense[i]: i-th element of the set (only the first len elements are meaningful)
    dense: Vec<VertexId>,
    /// sparse[v]: position of v in dense (if v is in the set)
    sparse: Vec<usize>,
    /// number of elements in the set
    len: usize,
}

impl SparseSet {
    /// creates an empty set able to contain elements in [0,n)
    pub fn new(n:usize) -> Self {
        Self {
            dense: (0..n).collect(),
            sparse: (0..n).collect(),
            len: 0,
        }
    }

    /// number of elements in the set
    pub fn len(&self) -> usize { self.len }

    /// true iff the set is empty
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// true iff v is in the set
    pub fn contains(&self, v:VertexId) -> bool {
        self.sparse[v] < self.len
    }

    /// inserts v (does nothing if v is already in the set)
    pub fn insert(&mut self, v:VertexId) {
        if self.contains(v) { return; }
        let pos = self.sparse[v];
        let other = self.dense[self.len];
        self.swap_positions(pos, self.len, v, other);
        self.len += 1;
    }

    /// removes v (does nothing if v is not in the set)
    pub fn remove(&mut self, v:VertexId) {
        if !self.contains(v) { return; }
        let pos = self.sparse[v];
        let last = self.dense[self.len-1];
        self.swap_positions(pos, self.len-1, v, last);
        self.len -= 1;
    }

    /// elements of the set (in no particular order)
    pub fn as_slice(&self) -> &[VertexId] { &self.dense[..self.len] }

    /// removes every element
    pub fn clear(&mut self) { self.len = 0; }

    /// a (at position pos_a) and b (at position pos_b) exchange their positions
    fn swap_positions(&mut self, pos_a:usize, pos_b:usize, a:VertexId, b:VertexId) {
        self.dense.swap(pos_a, pos_b);
        self.sparse[a] = pos_b;
        self.sparse[b] = pos_a;
    }
}
