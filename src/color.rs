use std::fmt::Debug;

use bit_set::BitSet;

/** Vertex Id */
pub type VertexId = usize;

/** Color Id (colors are numbered from 0 to k-1) */
pub type Color = usize;

/** Solution of a graph coloring problem
(represented as a partition).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** models a Graph Coloring instance */
pub trait ColoringInstance: Debug {
    /// number of vertices
    fn nb_vertices(&self) -> usize;

    /// number of edges
    fn nb_edges(&self) -> usize;

    /// list of vertices adjacent to u
    fn neighbors(&self, u:VertexId) -> &[VertexId];

    /// degree of the vertex u
    fn degree(&self, u:VertexId) -> usize { self.neighbors(u).len() }

    /// edge list (each edge (u,v) appears once, with u < v)
    fn edges(&self) -> &[(VertexId, VertexId)];

    /// iterates over the vertices of the graph
    fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.nb_vertices() }

    /// print statistics of the instance
    fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees = self.vertices().map(|i| self.degree(i));
        let (min_deg, max_deg) = degrees.fold((usize::MAX, 0), |(lo,hi), d| {
            (lo.min(d), hi.max(d))
        });
        if self.nb_vertices() > 0 {
            println!("\t{} \t min degree", min_deg);
            println!("\t{} \t max degree", max_deg);
        }
    }
}

/**
Counts the conflicting edges of a color assignment from scratch: O(V+E).
This is the verification hook used to audit the incremental bookkeeping of the search.
*/
pub fn count_conflicts(inst:&dyn ColoringInstance, colors:&[Color]) -> usize {
    assert_eq!(colors.len(), inst.nb_vertices());
    let mut res = 0;
    for u in inst.vertices() {
        res += inst.neighbors(u).iter().filter(|v| colors[**v] == colors[u]).count();
    }
    res / 2 // each conflicting edge is seen from both endpoints
}

/// result of the partition checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// valid coloring using the given number of colors
    Ok(usize),
    /// some vertex is not colored
    MissingVertex(VertexId),
    /// some vertex is colored more than once
    DuplicatedVertex(VertexId),
    /// two adjacent vertices share the same color
    ConflictingEdge(VertexId, VertexId),
}

/**
checks that a partition is a proper coloring.
returns the number of colors if the solution is feasible.
*/
pub fn checker(inst:&dyn ColoringInstance, sol:&[Vec<VertexId>]) -> CheckerResult {
    let mut colors:Vec<Option<Color>> = vec![None ; inst.nb_vertices()];
    for (c, class) in sol.iter().enumerate() {
        for v in class {
            if colors[*v].is_some() {
                return CheckerResult::DuplicatedVertex(*v);
            }
            colors[*v] = Some(c);
        }
    }
    if let Some(v) = colors.iter().position(|c| c.is_none()) {
        return CheckerResult::MissingVertex(v);
    }
    for (u,v) in inst.edges() {
        if colors[*u] == colors[*v] {
            return CheckerResult::ConflictingEdge(*u, *v);
        }
    }
    CheckerResult::Ok(sol.len())
}

/** converts a vertex->color assignment into a partition (empty classes are dropped) */
pub fn colors_to_partition(colors:&[Color]) -> Solution {
    let nb_colors = colors.iter().max().map_or(0, |c| c+1);
    let mut res:Solution = vec![vec![] ; nb_colors];
    for (v,c) in colors.iter().enumerate() {
        res[*c].push(v);
    }
    res.into_iter().filter(|e| !e.is_empty()).collect()
}

/** converts a partition into a vertex->color assignment */
pub fn partition_to_colors(sol:&[Vec<VertexId>], n:usize) -> Vec<Color> {
    let mut res = vec![0 ; n];
    let mut seen = BitSet::with_capacity(n);
    for (c,class) in sol.iter().enumerate() {
        for v in class {
            debug_assert!(!seen.contains(*v));
            seen.insert(*v);
            res[*v] = c;
        }
    }
    res
}
