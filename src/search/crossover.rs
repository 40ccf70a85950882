use bit_set::BitSet;
use fastrand::Rng;

use crate::color::{Color, VertexId};
use crate::search::helper::rand_select::{RandSelect, RangeRand};

/** Greedy partition crossover (see https://doi.org/10.1023/A:1009823419804).

Builds the offspring color after color: the i-th color is taken from the parent
i % nb_parents, as its color class (not used yet) with the most uncolored vertices.
These vertices receive color i in the offspring and are no longer counted in the
classes of any parent. Vertices left uncolored once the nb_colors colors are built
receive a random color.

Every vertex of the offspring is colored exactly once, with a color in [0,nb_colors).
*/
pub fn greedy_partition_crossover(parents:&[&[Color]], nb_colors:usize, rng:&Rng) -> Vec<Color> {
    assert!(!parents.is_empty(), "crossover: at least one parent is required");
    assert!(nb_colors > 0, "crossover: at least one color is required");
    let n = parents[0].len();
    assert!(parents.iter().all(|p| p.len() == n), "crossover: parents of different sizes");
    // classes[p][c]: vertices colored with c in parent p
    let mut classes:Vec<Vec<Vec<VertexId>>> = vec![vec![Vec::new() ; nb_colors] ; parents.len()];
    for (p,colors) in parents.iter().enumerate() {
        for (v,c) in colors.iter().enumerate() {
            classes[p][*c].push(v);
        }
    }
    // nb_uncolored[p][c]: number of vertices of classes[p][c] not colored in the offspring
    let mut nb_uncolored:Vec<Vec<usize>> = classes.iter()
        .map(|cl| cl.iter().map(|e| e.len()).collect())
        .collect();
    let mut used:Vec<BitSet> = vec![BitSet::with_capacity(nb_colors) ; parents.len()];
    let mut offspring:Vec<Option<Color>> = vec![None ; n];
    for target in 0..nb_colors {
        let p = target % parents.len();
        // find the largest remaining class of parent p
        let mut best:Option<(Color,usize)> = None;
        let mut select = RandSelect::default();
        for c in (0..nb_colors).filter(|c| !used[p].contains(*c)) {
            let size = nb_uncolored[p][c];
            match best {
                Some((_,best_size)) if size < best_size => {},
                Some((_,best_size)) if size == best_size => {
                    if select.is_selected(rng) { best = Some((c,size)); }
                },
                _ => {
                    best = Some((c,size));
                    select.reset();
                }
            }
        }
        let chosen = match best {
            None => continue,
            Some((c,_)) => c,
        };
        used[p].insert(chosen);
        // color its vertices and remove them from the parents classes
        for v in classes[p][chosen].iter() {
            if offspring[*v].is_none() {
                offspring[*v] = Some(target);
                for (q,colors) in parents.iter().enumerate() {
                    nb_uncolored[q][colors[*v]] -= 1;
                }
            }
        }
    }
    let color_rand = RangeRand::new(0, nb_colors-1);
    offspring.into_iter()
        .map(|c| c.unwrap_or_else(|| color_rand.sample(rng)))
        .collect()
}
