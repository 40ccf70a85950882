use std::cmp::{Ordering, max, Ord};

use priority_queue::PriorityQueue;
use bit_set::BitSet;

use crate::color::{ColoringInstance, Solution, VertexId};

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
    }
}

impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** implements a greedy DSATUR algorithm.
    1. choose an uncolored vertex that sees the most colors (break ties by the largest degree)
    2. assign it the first color available
    3. mark all its neighbors seeing this color
    4. repeat until a proper coloring is found

The number of colors used is an upper bound of the chromatic number, used to
choose the number of colors of the local search when no better bound is known.

parameters:
 - inst: reference to an instance
 - show_completion: if true, print progress towards the coloring
*/
pub fn greedy_dsatur(inst:&dyn ColoringInstance, show_completion:bool) -> Solution {
    let n:usize = inst.nb_vertices();
    let mut remaining_vertices:PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
    for i in inst.vertices() {
        remaining_vertices.push(i, DSatInfo { dsat:0, degree:inst.degree(i)});
    }
    let mut colors:Vec<Option<usize>> = vec![None ; n]; // colors[v] -> color assigned to vertex v
    let mut adj_colors:Vec<BitSet> = vec![BitSet::default() ; n]; // adj_colors[v] -> colors v sees
    let mut nb_colored:usize = 0;
    let mut nb_colors:usize = 0;
    while let Some((current_vertex,_)) = remaining_vertices.pop() {
        if show_completion && nb_colored % 1000 == 0 { println!("colored {} / {}...", nb_colored, n); }
        // assign it a color
        let mut color:usize = 0;
        while adj_colors[current_vertex].contains(color) { color += 1; }
        colors[current_vertex] = Some(color);
        nb_colored += 1;
        nb_colors = max(nb_colors, color+1);
        // update saturation degree information
        for neigh in inst.neighbors(current_vertex).iter()
        .filter(|neigh| colors[**neigh].is_none()) {
            if !adj_colors[*neigh].contains(color) {
                adj_colors[*neigh].insert(color);
                remaining_vertices.change_priority_by(neigh, |p| { p.dsat += 1; });
            }
        }
    }
    // every vertex is colored: build the partition
    let mut res = vec![vec![] ; nb_colors];
    for (i,c) in colors.iter().enumerate() {
        if let Some(c) = c {
            res[*c].push(i);
        }
    }
    res
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{checker, partition_to_colors, count_conflicts, CheckerResult};
    use crate::compact_instance::CompactInstance;

    #[test]
    fn test_dsatur_myciel3() {
        let inst = CompactInstance::from_file("insts/other-instances/myciel3.col").unwrap();
        let sol = greedy_dsatur(&inst, false);
        assert!(sol.len() >= 4); // chromatic number of myciel3
        assert_eq!(checker(&inst, &sol), CheckerResult::Ok(sol.len()));
        let colors = partition_to_colors(&sol, inst.nb_vertices());
        assert_eq!(count_conflicts(&inst, &colors), 0);
    }

    #[test]
    fn test_dsatur_bipartite() {
        let inst = CompactInstance::from_file("insts/grid-instances/grid2x2").unwrap();
        let sol = greedy_dsatur(&inst, false);
        assert_eq!(checker(&inst, &sol), CheckerResult::Ok(2));
    }

    #[test]
    fn test_dsatur_isolated_vertices() {
        let inst = CompactInstance::from_edges(3, &[]);
        assert_eq!(greedy_dsatur(&inst, false), vec![vec![0,1,2]]);
    }
}
