//! Data-structures shared by the search algorithms.

/// sparse set (O(1) insertion, removal and membership)
pub mod sparse_set;

/// uniform range sampling and reservoir tie-breaking
pub mod rand_select;

/// stopping criteria (time limit)
pub mod stopping_criterion;
