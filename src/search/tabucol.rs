use fastrand::Rng;
use serde::{Serialize, Deserialize};

use crate::color::{Color, ColoringInstance, VertexId, count_conflicts};
use crate::search::helper::rand_select::{RandSelect, RangeRand};
use crate::search::helper::sparse_set::SparseSet;


/**
Decision of changing the color of vertex v from c_prev to c_next
*/
#[derive(Debug,Clone,Copy,Hash,Eq,PartialEq)]
pub struct Decision {
    /// vertex to color
    pub v: VertexId,
    /// previously used color for v
    pub c_prev: Color,
    /// color to use
    pub c_next: Color,
    /// number of conflicting edges removed by the decision (negative if it adds conflicts)
    pub reduce: i64,
}

/**
Keeps the best decision seen so far (largest reduction), breaking ties uniformly at random.
*/
#[derive(Debug, Default)]
struct BestDecision {
    decision: Option<Decision>,
    select: RandSelect,
}

impl BestDecision {
    fn consider(&mut self, d:Decision, rng:&Rng) {
        match &self.decision {
            Some(best) if d.reduce < best.reduce => {},
            Some(best) if d.reduce == best.reduce => {
                if self.select.is_selected(rng) { self.decision = Some(d); }
            },
            _ => {
                self.decision = Some(d);
                self.select.reset();
            }
        }
    }
}


/** tabu tenure of the TabuCol algorithm.
When the vertex v leaves the color c at iteration i, moving v back to c is forbidden
until iteration i + F + base + U[0,amplitude], where F is the number of conflicting
edges after the move. The more conflicts, the longer the tenure.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabuColTenure {
    /// tabu fixed size
    pub base: usize,
    /// maximum random perturbation added to the tenure
    pub amplitude: usize,
}

impl TabuColTenure {
    /** creates a tabucol tenure given:
     - base: fixed tabu size
     - amplitude: random tabu size (drawn in [0,amplitude])
    */
    pub fn new(base:usize, amplitude:usize) -> Self {
        Self { base, amplitude }
    }

    /// iteration at which a decision taken at iteration iter stops being tabu
    /// (saturates: a huge base makes the move tabu for the rest of the search)
    fn release_iter(&self, iter:usize, nb_conflicts:usize, rng:&Rng) -> usize {
        iter.saturating_add(nb_conflicts)
            .saturating_add(self.base)
            .saturating_add(RangeRand::new(0, self.amplitude).sample(rng))
    }
}


/** Candidate solution for the k-coloring problem (minimizing conflicting edges).

Maintains incrementally, for each change of color:
 - nb_neigh_colors[v][c]: number of neighbors of v colored with c
 - the number of conflicting edges
 - the set of vertices involved in a conflict

so that a move costs O(d(v)) and a tabu search iteration costs
O(|conflicting vertices| . k).
The instance is borrowed: it must outlive every solution built on it.
*/
#[derive(Debug)]
pub struct ColoringSolution<'a> {
    /// reference instance
    inst: &'a dyn ColoringInstance,
    /// number of colors (k)
    nb_colors: usize,
    /// colors[v]: color of the vertex v
    colors: Vec<Color>,
    /// nb_neigh_colors[v][c]: number of neighbors of v that are assigned color c
    nb_neigh_colors: Vec<Vec<usize>>,
    /// number of conflicting edges
    nb_conflicts: usize,
    /// vertices with at least one neighbor of the same color
    conflicting_vertices: SparseSet,
    /// tabu[v][c]: iteration until which moving v to c is forbidden (0: never)
    tabu: Vec<Vec<usize>>,
}

/// a copy starts a new search trajectory: the tabu table is not copied
impl<'a> Clone for ColoringSolution<'a> {
    fn clone(&self) -> Self {
        Self {
            inst: self.inst,
            nb_colors: self.nb_colors,
            colors: self.colors.clone(),
            nb_neigh_colors: self.nb_neigh_colors.clone(),
            nb_conflicts: self.nb_conflicts,
            conflicting_vertices: self.conflicting_vertices.clone(),
            tabu: vec![vec![0 ; self.nb_colors] ; self.colors.len()],
        }
    }
}

impl<'a> ColoringSolution<'a> {

    /** creates a solution from a color assignment. O(V.k + E) */
    pub fn from_colors(inst:&'a dyn ColoringInstance, nb_colors:usize, colors:Vec<Color>) -> Self {
        let n = inst.nb_vertices();
        assert!(nb_colors > 0, "ColoringSolution: at least one color is required");
        assert_eq!(colors.len(), n);
        assert!(colors.iter().all(|c| *c < nb_colors), "ColoringSolution: color out of range");
        let mut res = Self {
            inst,
            nb_colors,
            colors,
            nb_neigh_colors: vec![vec![0 ; nb_colors] ; n],
            nb_conflicts: 0,
            conflicting_vertices: SparseSet::new(n),
            tabu: vec![vec![0 ; nb_colors] ; n],
        };
        res.rebuild();
        res
    }

    /** creates a solution where each vertex gets a color drawn uniformly at random */
    pub fn random(inst:&'a dyn ColoringInstance, nb_colors:usize, rng:&Rng) -> Self {
        assert!(nb_colors > 0, "ColoringSolution: at least one color is required");
        let color_rand = RangeRand::new(0, nb_colors-1);
        let colors = inst.vertices().map(|_| color_rand.sample(rng)).collect();
        Self::from_colors(inst, nb_colors, colors)
    }

    /// recomputes nb_neigh_colors, the number of conflicts and the conflicting vertices from colors
    fn rebuild(&mut self) {
        for row in self.nb_neigh_colors.iter_mut() {
            for e in row.iter_mut() { *e = 0; }
        }
        let mut nb_conflicts = 0;
        for u in self.inst.vertices() {
            for v in self.inst.neighbors(u) {
                self.nb_neigh_colors[u][self.colors[*v]] += 1;
            }
            nb_conflicts += self.nb_neigh_colors[u][self.colors[u]];
        }
        self.nb_conflicts = nb_conflicts / 2;
        self.conflicting_vertices.clear();
        for u in self.inst.vertices() {
            if self.nb_neigh_colors[u][self.colors[u]] > 0 {
                self.conflicting_vertices.insert(u);
            }
        }
    }

    /// number of colors (k)
    pub fn nb_colors(&self) -> usize { self.nb_colors }

    /// number of conflicting edges
    pub fn nb_conflicts(&self) -> usize { self.nb_conflicts }

    /// color assignment
    pub fn colors(&self) -> &[Color] { &self.colors }

    /// color of the vertex v
    pub fn color(&self, v:VertexId) -> Color { self.colors[v] }

    /// vertices involved in at least one conflict (in no particular order)
    pub fn conflicting_vertices(&self) -> &[VertexId] { self.conflicting_vertices.as_slice() }

    /// number of neighbors of v colored with c
    pub fn nb_neigh_colors(&self, v:VertexId, c:Color) -> usize { self.nb_neigh_colors[v][c] }

    /** checks the incremental data-structures against a from-scratch recomputation. O(V.k+E) */
    pub fn is_consistent(&self) -> bool {
        if count_conflicts(self.inst, &self.colors) != self.nb_conflicts {
            return false;
        }
        for u in self.inst.vertices() {
            let mut expected = vec![0 ; self.nb_colors];
            for v in self.inst.neighbors(u) {
                expected[self.colors[*v]] += 1;
            }
            if expected != self.nb_neigh_colors[u] {
                return false;
            }
            if self.conflicting_vertices.contains(u) != (expected[self.colors[u]] > 0) {
                return false;
            }
        }
        true
    }

    /// decision of moving v to c (computes the conflict reduction)
    fn decision(&self, v:VertexId, c:Color) -> Decision {
        let c_prev = self.colors[v];
        Decision {
            v, c_prev, c_next: c,
            reduce: self.nb_neigh_colors[v][c_prev] as i64 - self.nb_neigh_colors[v][c] as i64,
        }
    }

    /** changes the color of v to c. O(d(v)) */
    pub fn recolor(&mut self, v:VertexId, c:Color) {
        assert!(c < self.nb_colors, "recolor: color {} out of range", c);
        if self.colors[v] == c { return; }
        let decision = self.decision(v, c);
        self.apply_decision(&decision);
    }

    /// applies a decision computed on the current state
    fn apply_decision(&mut self, decision:&Decision) {
        debug_assert_eq!(self.colors[decision.v], decision.c_prev);
        debug_assert!((self.nb_conflicts as i64) >= decision.reduce);
        // update nb_neigh_colors
        for neigh in self.inst.neighbors(decision.v) {
            self.nb_neigh_colors[*neigh][decision.c_prev] -= 1;
            self.nb_neigh_colors[*neigh][decision.c_next] += 1;
        }
        // update colors & conflicts
        self.colors[decision.v] = decision.c_next;
        self.nb_conflicts = (self.nb_conflicts as i64 - decision.reduce) as usize;
        // update conflicting vertices (only neighbors in c_prev or c_next may change)
        for neigh in self.inst.neighbors(decision.v) {
            let c = self.colors[*neigh];
            if c == decision.c_prev || c == decision.c_next {
                self.update_conflict_status(*neigh);
            }
        }
        self.update_conflict_status(decision.v);
    }

    fn update_conflict_status(&mut self, u:VertexId) {
        if self.nb_neigh_colors[u][self.colors[u]] > 0 {
            self.conflicting_vertices.insert(u);
        } else {
            self.conflicting_vertices.remove(u);
        }
    }

    /** steepest descent: applies the best improving move until reaching a local optimum
    (or max_iter moves). Returns the number of moves performed.
    */
    pub fn local_search(&mut self, max_iter:usize, rng:&Rng) -> usize {
        let mut iter = 0;
        while iter < max_iter {
            let mut best = BestDecision::default();
            for &v in self.conflicting_vertices.as_slice() {
                for c in (0..self.nb_colors).filter(|c| *c != self.colors[v]) {
                    let d = self.decision(v, c);
                    if d.reduce > 0 {
                        best.consider(d, rng);
                    }
                }
            }
            match best.decision {
                None => break, // local optimum
                Some(d) => self.apply_decision(&d),
            }
            iter += 1;
        }
        iter
    }

    /** move applied by the tabu search: the best tabu move if it passes the aspiration
    criterion (strictly better than the best non-tabu move and strictly below the best
    number of conflicts of the episode), otherwise the best non-tabu move.
    */
    fn choose_decision(
        &self,
        best_non_tabu:Option<Decision>,
        best_tabu:Option<Decision>,
        best_conflicts:usize,
    ) -> Option<Decision> {
        match (best_non_tabu, best_tabu) {
            (non_tabu, Some(d)) if
                d.reduce > non_tabu.map_or(i64::MIN, |e| e.reduce) &&
                (self.nb_conflicts as i64 - d.reduce) < best_conflicts as i64 => Some(d),
            (non_tabu, _) => non_tabu,
        }
    }

    /** (see https://doi.org/10.1007/BF02239976)
    TabuCol local search. Performs at most max_iter iterations and stops as soon as
    no conflict remains. At each iteration, the best move (vertex, color) over
    conflicting vertices is applied, unless it is tabu. A tabu move is allowed
    (aspiration) if it is better than the best non-tabu move and leads to fewer
    conflicts than the best solution seen during this search.
    At the end, the solution is the best one visited. Returns the number of iterations.
    */
    pub fn tabu_search(&mut self, max_iter:usize, tenure:&TabuColTenure, rng:&Rng) -> usize {
        for row in self.tabu.iter_mut() {
            for e in row.iter_mut() { *e = 0; }
        }
        let mut best_conflicts = self.nb_conflicts;
        let mut best_colors = self.colors.clone();
        let mut iter = 0;
        while iter < max_iter && self.nb_conflicts > 0 {
            iter += 1;
            let mut best_non_tabu = BestDecision::default();
            let mut best_tabu = BestDecision::default();
            for &v in self.conflicting_vertices.as_slice() {
                for c in (0..self.nb_colors).filter(|c| *c != self.colors[v]) {
                    let d = self.decision(v, c);
                    if self.tabu[v][c] > iter {
                        best_tabu.consider(d, rng);
                    } else {
                        best_non_tabu.consider(d, rng);
                    }
                }
            }
            if best_non_tabu.decision.is_none() && best_tabu.decision.is_none() {
                break; // no move exists (single color)
            }
            let decision = match self.choose_decision(best_non_tabu.decision, best_tabu.decision, best_conflicts) {
                None => continue, // every move is tabu
                Some(d) => d,
            };
            self.apply_decision(&decision);
            self.tabu[decision.v][decision.c_prev] = tenure.release_iter(iter, self.nb_conflicts, rng);
            if self.nb_conflicts < best_conflicts {
                best_conflicts = self.nb_conflicts;
                best_colors.copy_from_slice(&self.colors);
            }
        }
        if self.nb_conflicts > best_conflicts { // go back to the best solution visited
            self.colors = best_colors;
            self.rebuild();
        }
        debug_assert!(self.is_consistent());
        iter
    }

    /** recolors m random vertices (m drawn in [1,n]) with random colors, then rebuilds
    the data-structures from scratch.
    */
    pub fn perturb(&mut self, rng:&Rng) {
        let n = self.colors.len();
        if n == 0 { return; }
        let nb_changes = RangeRand::new(1, n).sample(rng);
        let vertex_rand = RangeRand::new(0, n-1);
        let color_rand = RangeRand::new(0, self.nb_colors-1);
        for _ in 0..nb_changes {
            self.colors[vertex_rand.sample(rng)] = color_rand.sample(rng);
        }
        self.rebuild();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use fastrand::Rng;

    use crate::compact_instance::CompactInstance;

    fn square() -> CompactInstance {
        CompactInstance::from_edges(4, &[(0,1),(1,2),(2,3),(3,0)])
    }

    fn triangle() -> CompactInstance {
        CompactInstance::from_edges(3, &[(0,1),(1,2),(2,0)])
    }

    /// every assignment of n vertices with k colors
    fn all_assignments(n:usize, k:usize) -> Vec<Vec<Color>> {
        let mut res = vec![vec![]];
        for _ in 0..n {
            res = res.into_iter().flat_map(|a| {
                (0..k).map(move |c| { let mut b = a.clone(); b.push(c); b })
            }).collect();
        }
        res
    }

    #[test]
    fn test_from_colors() {
        let inst = square();
        let sol = ColoringSolution::from_colors(&inst, 2, vec![0,0,1,1]);
        assert_eq!(sol.nb_conflicts(), 2);
        assert_eq!(sol.nb_neigh_colors(0, 0), 1);
        assert_eq!(sol.nb_neigh_colors(0, 1), 1);
        let mut conflicting = sol.conflicting_vertices().to_vec();
        conflicting.sort_unstable();
        assert_eq!(conflicting, vec![0,1,2,3]);
        assert!(sol.is_consistent());
    }

    #[test]
    fn test_recolor() {
        let inst = square();
        let mut sol = ColoringSolution::from_colors(&inst, 3, vec![0,0,0,0]);
        assert_eq!(sol.nb_conflicts(), 4);
        sol.recolor(1, 1);
        assert_eq!(sol.nb_conflicts(), 2);
        assert!(sol.is_consistent());
        sol.recolor(3, 2);
        assert_eq!(sol.nb_conflicts(), 0);
        assert!(sol.conflicting_vertices().is_empty());
        sol.recolor(3, 2); // same color: nothing happens
        assert_eq!(sol.nb_conflicts(), 0);
        sol.recolor(0, 1);
        assert_eq!(sol.nb_conflicts(), 1);
        assert!(sol.is_consistent());
    }

    #[test]
    fn test_clone_resets_tabu() {
        let inst = square();
        let rng = Rng::with_seed(0);
        let mut sol = ColoringSolution::from_colors(&inst, 2, vec![0,0,1,1]);
        sol.tabu[0][1] = 42;
        let copy = sol.clone();
        assert!(copy.tabu.iter().all(|row| row.iter().all(|t| *t == 0)));
        assert_eq!(copy.colors(), sol.colors());
        assert_eq!(copy.nb_conflicts(), sol.nb_conflicts());
        sol.tabu_search(10, &TabuColTenure::new(0, 10), &rng);
        assert!(copy.is_consistent());
    }

    #[test]
    fn test_tabu_search_square_reaches_zero() {
        let inst = square();
        let tenure = TabuColTenure::new(0, 10);
        for (seed,colors) in all_assignments(4, 2).into_iter().enumerate() {
            let rng = Rng::with_seed(seed as u64);
            let mut sol = ColoringSolution::from_colors(&inst, 2, colors);
            let nb_iter = sol.tabu_search(1000, &tenure, &rng);
            assert_eq!(sol.nb_conflicts(), 0);
            assert!(nb_iter < 1000);
            assert_eq!(count_conflicts(&inst, sol.colors()), 0);
        }
    }

    #[test]
    fn test_tabu_search_triangle_stays_at_one() {
        let inst = triangle();
        let tenure = TabuColTenure::new(0, 10);
        for budget in [1, 10, 100, 5000].iter() {
            for (seed,colors) in all_assignments(3, 2).into_iter().enumerate() {
                let rng = Rng::with_seed(seed as u64);
                let mut sol = ColoringSolution::from_colors(&inst, 2, colors);
                let nb_iter = sol.tabu_search(*budget, &tenure, &rng);
                assert_eq!(nb_iter, *budget);
                assert_eq!(sol.nb_conflicts(), 1);
                assert!(sol.is_consistent());
            }
        }
    }

    #[test]
    fn test_tabu_search_never_degrades() {
        let inst = CompactInstance::from_file("insts/other-instances/myciel3.col").unwrap();
        let rng = Rng::with_seed(11);
        for _ in 0..20 {
            let mut sol = ColoringSolution::random(&inst, 3, &rng);
            let initial = sol.nb_conflicts();
            sol.tabu_search(50, &TabuColTenure::new(0, 10), &rng);
            assert!(sol.nb_conflicts() <= initial);
            assert!(sol.nb_conflicts() >= 1); // myciel3 is not 3-colorable
            assert!(sol.is_consistent());
        }
    }

    #[test]
    fn test_tabu_search_myciel3() {
        let inst = CompactInstance::from_file("insts/other-instances/myciel3.col").unwrap();
        let rng = Rng::with_seed(5);
        let mut sol = ColoringSolution::random(&inst, 4, &rng);
        sol.tabu_search(10_000, &TabuColTenure::new(0, 10), &rng);
        assert_eq!(sol.nb_conflicts(), 0);
        assert_eq!(count_conflicts(&inst, sol.colors()), 0);
    }

    /// decision moving v from color 0 to c_next
    fn decision(v:VertexId, c_next:Color, reduce:i64) -> Decision {
        Decision { v, c_prev: 0, c_next, reduce }
    }

    #[test]
    fn test_aspiration() {
        let inst = square();
        let sol = ColoringSolution::from_colors(&inst, 3, vec![0 ; 4]);
        assert_eq!(sol.nb_conflicts(), 4);
        let non_tabu = decision(1, 1, 1);
        let tabu = decision(0, 1, 2);
        // better than the non-tabu move and than the best of the episode: taken
        assert_eq!(sol.choose_decision(Some(non_tabu), Some(tabu), 4), Some(tabu));
        // would only reach the best of the episode: refused
        assert_eq!(sol.choose_decision(Some(non_tabu), Some(tabu), 2), Some(non_tabu));
        // not strictly better than the non-tabu move: refused
        let tabu_tie = decision(0, 1, 1);
        assert_eq!(sol.choose_decision(Some(non_tabu), Some(tabu_tie), 4), Some(non_tabu));
        // every move is tabu
        assert_eq!(sol.choose_decision(None, Some(tabu), 4), Some(tabu));
        assert_eq!(sol.choose_decision(None, Some(tabu), 2), None);
        assert_eq!(sol.choose_decision(Some(non_tabu), None, 0), Some(non_tabu));
    }

    #[test]
    fn test_tenure_bounds() {
        let rng = Rng::with_seed(6);
        let tenure = TabuColTenure::new(3, 5);
        let mut seen = [false ; 6];
        for _ in 0..1000 {
            let r = tenure.release_iter(10, 7, &rng);
            assert!((20..=25).contains(&r), "{}", r);
            seen[r-20] = true;
        }
        assert!(seen.iter().all(|e| *e));
        // a huge base does not overflow
        let tenure = TabuColTenure::new(usize::MAX, 10);
        assert_eq!(tenure.release_iter(5, 2, &rng), usize::MAX);
    }

    #[test]
    fn test_tabu_search_sets_tenure() {
        let inst = square();
        let tenure = TabuColTenure::new(0, 10);
        for seed in 0..20 {
            let rng = Rng::with_seed(seed);
            let mut sol = ColoringSolution::from_colors(&inst, 3, vec![0 ; 4]);
            assert_eq!(sol.tabu_search(1, &tenure, &rng), 1);
            assert_eq!(sol.nb_conflicts(), 2);
            // the moved vertex cannot go back to color 0 before 1 + 2 + U[0,10]
            let entries:Vec<(usize,usize,usize)> = inst.vertices()
                .flat_map(|v| (0..3).map(move |c| (v,c)))
                .map(|(v,c)| (v,c,sol.tabu[v][c]))
                .filter(|(_,_,t)| *t > 0)
                .collect();
            assert_eq!(entries.len(), 1);
            let (v,c,t) = entries[0];
            assert_eq!(c, 0);
            assert_ne!(sol.color(v), 0);
            assert!((3..=13).contains(&t), "{}", t);
        }
    }

    #[test]
    fn test_tabu_search_returns_best_visited() {
        // not 3-colorable: the search goes up and down
        let rng_inst = Rng::with_seed(123);
        let edges:Vec<(usize,usize)> = (0..120)
            .map(|_| (rng_inst.usize(0..30), rng_inst.usize(0..30)))
            .collect();
        let inst = CompactInstance::from_edges(30, &edges);
        let start = ColoringSolution::random(&inst, 3, &Rng::with_seed(1));
        let tenure = TabuColTenure::new(0, 10);
        // same seed: the search with budget b visits the first b states of the
        // search with budget b+1, so the best visited never increases with b
        let mut previous = start.nb_conflicts();
        for budget in 1..300 {
            let mut sol = start.clone();
            sol.tabu_search(budget, &tenure, &Rng::with_seed(17));
            assert!(sol.nb_conflicts() <= previous, "budget {}: {} > {}", budget, sol.nb_conflicts(), previous);
            assert!(sol.is_consistent());
            previous = sol.nb_conflicts();
        }
    }

    #[test]
    fn test_tabu_search_single_color() {
        let inst = square();
        let rng = Rng::with_seed(0);
        let mut sol = ColoringSolution::from_colors(&inst, 1, vec![0 ; 4]);
        let nb_iter = sol.tabu_search(1000, &TabuColTenure::new(0, 10), &rng);
        assert!(nb_iter <= 1);
        assert_eq!(sol.nb_conflicts(), 4);
    }

    #[test]
    fn test_local_search_reaches_local_optimum() {
        let inst = CompactInstance::from_file("insts/other-instances/myciel3.col").unwrap();
        let rng = Rng::with_seed(9);
        for _ in 0..20 {
            let mut sol = ColoringSolution::random(&inst, 3, &rng);
            let initial = sol.nb_conflicts();
            let nb_moves = sol.local_search(1000, &rng);
            assert!(sol.nb_conflicts() + nb_moves <= initial);
            assert!(sol.is_consistent());
            for &v in sol.conflicting_vertices() {
                for c in 0..3 {
                    assert!(sol.nb_neigh_colors(v, c) >= sol.nb_neigh_colors(v, sol.color(v)));
                }
            }
        }
    }

    #[test]
    fn test_local_search_budget() {
        let inst = square();
        let rng = Rng::with_seed(1);
        let mut sol = ColoringSolution::from_colors(&inst, 2, vec![0,0,0,0]);
        assert_eq!(sol.local_search(1, &rng), 1);
        assert_eq!(sol.nb_conflicts(), 2);
    }

    #[test]
    fn test_perturb_keeps_consistency() {
        let inst = CompactInstance::from_file("insts/other-instances/myciel3.col").unwrap();
        let rng = Rng::with_seed(2);
        let mut sol = ColoringSolution::random(&inst, 4, &rng);
        for _ in 0..50 {
            sol.perturb(&rng);
            assert!(sol.is_consistent());
            assert!(sol.colors().iter().all(|c| *c < 4));
        }
    }

    proptest! {
        #[test]
        fn recolor_keeps_bookkeeping_consistent(
            raw_edges in proptest::collection::vec((0usize..15, 0usize..15), 0..60),
            initial in proptest::collection::vec(0usize..4, 15),
            moves in proptest::collection::vec((0usize..15, 0usize..4), 0..80),
        ) {
            let inst = CompactInstance::from_edges(15, &raw_edges);
            let mut sol = ColoringSolution::from_colors(&inst, 4, initial);
            prop_assert!(sol.is_consistent());
            for (v,c) in moves {
                sol.recolor(v, c);
                prop_assert_eq!(sol.nb_conflicts(), count_conflicts(&inst, sol.colors()));
                let mut conflicting = sol.conflicting_vertices().to_vec();
                conflicting.sort_unstable();
                let expected:Vec<usize> = inst.vertices().filter(|u| {
                    inst.neighbors(*u).iter().any(|w| sol.color(*w) == sol.color(*u))
                }).collect();
                prop_assert_eq!(conflicting, expected);
                prop_assert!(sol.is_consistent());
            }
        }
    }
}
