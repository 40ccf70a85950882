use anyhow::Result;

use crate::dimacs::read_from_file;
use crate::color::{ColoringInstance, VertexId};

/** models a Graph Coloring instance.  */
#[derive(Debug)]
pub struct CompactInstance {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// edges of the graph
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i (sorted)
    adj_list: Vec<Vec<VertexId>>,
}

impl ColoringInstance for CompactInstance {
    fn nb_vertices(&self) -> usize { self.n }

    fn nb_edges(&self) -> usize { self.m }

    fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }
}


impl CompactInstance {

    /// builds the edge list
    fn build_edges(adj_list:&[Vec<VertexId>]) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        for (i,l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i,*j));
                }
            }
        }
        res
    }

    /** constructor using an adjacency list.
    The adjacency list must be symmetric (u in adj(v) <=> v in adj(u)).
    */
    pub fn new(mut adj_list:Vec<Vec<usize>>) -> Self {
        let n = adj_list.len();
        for l in adj_list.iter_mut() {
            l.sort_unstable();
        }
        debug_assert!(
            adj_list.iter().enumerate().all(|(u,l)| {
                l.iter().all(|v| adj_list[*v].binary_search(&u).is_ok())
            }),
            "CompactInstance::new: adjacency list is not symmetric"
        );
        // compute nb edges
        let mut m = 0;
        for e in &adj_list { // at the end: m = ∑ d(v)
            m += e.len();
        }
        m /= 2; // m = (∑ d(v)) / 2
        let edges = Self::build_edges(&adj_list);
        Self { n,m, edges, adj_list }
    }

    /** constructor using an edge list. Edges are symmetrized, self-loops
    and duplicated edges are ignored.
    */
    pub fn from_edges(n:usize, edges:&[(VertexId,VertexId)]) -> Self {
        let mut adj_list = vec![Vec::new() ; n];
        for (u,v) in edges {
            assert!(*u < n && *v < n, "edge ({},{}) out of range (n={})", u, v, n);
            if u != v {
                adj_list[*u].push(*v);
                adj_list[*v].push(*u);
            }
        }
        for l in adj_list.iter_mut() {
            l.sort_unstable();
            l.dedup();
        }
        Self::new(adj_list)
    }

    /// creates an instance from a DIMACS file
    pub fn from_file(filename:&str) -> Result<Self> {
        let (_,_,adj_list) = read_from_file(filename)?;
        Ok(Self::new(adj_list))
    }
}
