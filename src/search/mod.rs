//! Search algorithms for the k-coloring problem.

/// data-structures shared by the search algorithms
pub mod helper;

/// greedy DSATUR algorithm
pub mod greedy_dsatur;

/// TABUCOL local search (incremental candidate solution)
pub mod tabucol;

/// greedy partition crossover
pub mod crossover;

/// hybrid evolutionary algorithm (population + crossover + tabu search)
pub mod hea;
