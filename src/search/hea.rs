use std::fmt;

use anyhow::{bail, Result};
use fastrand::Rng;
use serde::{Serialize, Deserialize};

use crate::color::{Color, ColoringInstance, count_conflicts};
use crate::search::crossover::greedy_partition_crossover;
use crate::search::helper::rand_select::{RandSelect, RangeRand};
use crate::search::helper::stopping_criterion::{NoStoppingCriterion, StoppingCriterion};
use crate::search::tabucol::{ColoringSolution, TabuColTenure};


/** parameters of the hybrid evolutionary algorithm.

```
use hea_color::search::hea::HeaConfig;

let config = HeaConfig::default()
    .with_population_size(20)
    .with_max_generations(1000);
assert!(config.validate().is_ok());
assert_eq!(config.to_string(), "HEA(PS=20|GC=1000|IC=100000|TB=0|TA=10|MI=2)");
```
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaConfig {
    /// nominal number of individuals (the population may grow up to twice this size)
    pub population_size: usize,
    /// maximum number of generations (0: only the initial population is built)
    pub max_generations: usize,
    /// maximum number of iterations of each tabu search
    pub max_iterations: usize,
    /// fixed part of the tabu tenure
    pub tabu_tenure_base: usize,
    /// random part of the tabu tenure (drawn in [0, amplitude])
    pub tabu_tenure_amplitude: usize,
    /// number of individuals perturbed after the population is shrunk
    pub mutation_size: usize,
    /// if true, print each improvement of the best solution
    pub verbose: bool,
}

impl Default for HeaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 10_000,
            max_iterations: 100_000,
            tabu_tenure_base: 0,
            tabu_tenure_amplitude: 10,
            mutation_size: 2,
            verbose: false,
        }
    }
}

impl HeaConfig {
    /// sets the population size
    pub fn with_population_size(mut self, population_size:usize) -> Self {
        self.population_size = population_size; self
    }

    /// sets the maximum number of generations
    pub fn with_max_generations(mut self, max_generations:usize) -> Self {
        self.max_generations = max_generations; self
    }

    /// sets the maximum number of iterations of each tabu search
    pub fn with_max_iterations(mut self, max_iterations:usize) -> Self {
        self.max_iterations = max_iterations; self
    }

    /// sets the tabu tenure (base + random amplitude)
    pub fn with_tabu_tenure(mut self, base:usize, amplitude:usize) -> Self {
        self.tabu_tenure_base = base;
        self.tabu_tenure_amplitude = amplitude;
        self
    }

    /// sets the number of individuals perturbed after each shrink of the population
    pub fn with_mutation_size(mut self, mutation_size:usize) -> Self {
        self.mutation_size = mutation_size; self
    }

    /// enables or disables progress printing
    pub fn with_verbose(mut self, verbose:bool) -> Self {
        self.verbose = verbose; self
    }

    /// tabu tenure used by the local search
    pub fn tenure(&self) -> TabuColTenure {
        TabuColTenure::new(self.tabu_tenure_base, self.tabu_tenure_amplitude)
    }

    /// checks the parameters
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            bail!("population_size must be at least 1");
        }
        if self.max_iterations == 0 {
            bail!("max_iterations must be at least 1");
        }
        Ok(())
    }
}

impl fmt::Display for HeaConfig {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HEA(PS={}|GC={}|IC={}|TB={}|TA={}|MI={})",
            self.population_size, self.max_generations, self.max_iterations,
            self.tabu_tenure_base, self.tabu_tenure_amplitude, self.mutation_size
        )
    }
}


/// best coloring found during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestColoring {
    /// number of conflicting edges
    pub nb_conflicts: usize,
    /// colors[v]: color of the vertex v
    pub colors: Vec<Color>,
}

/// output of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaResult {
    /// number of conflicting edges of the best coloring
    pub nb_conflicts: usize,
    /// best coloring found
    pub colors: Vec<Color>,
    /// total number of tabu search iterations
    pub nb_iterations: usize,
    /// number of generations performed
    pub nb_generations: usize,
}


/** Hybrid evolutionary algorithm for the k-coloring problem
(see https://doi.org/10.1023/A:1009823419804).

 1. builds a population of random colorings, each improved by a tabu search.
 2. at each generation:
    - picks a random parent and the best individual among the others,
    - combines them with the greedy partition crossover,
    - improves the offspring with a tabu search,
    - the offspring replaces the worst individual if it is strictly better,
      otherwise it joins the population, unless the population reached twice
      its nominal size: then the population is shrunk to its best individuals
      and some of them are perturbed.
 3. stops when a coloring without conflicts is found, or the generation
    budget (or the stopping criterion) is exhausted.

The instance is borrowed by every individual, so it must outlive the algorithm.
*/
#[derive(Debug)]
pub struct Hea<'a> {
    /// reference instance
    inst: &'a dyn ColoringInstance,
    /// number of colors (k)
    nb_colors: usize,
    /// parameters
    config: HeaConfig,
    /// seed of the random number generator
    seed: u64,
    /// random number generator
    rng: Rng,
    /// current population
    population: Vec<ColoringSolution<'a>>,
    /// best coloring found so far
    best: Option<BestColoring>,
    /// (generation, number of conflicts) each time the best coloring improves
    history: Vec<(usize,usize)>,
    /// total number of tabu search iterations
    nb_iterations: usize,
    /// number of generations performed
    nb_generations: usize,
}

impl<'a> Hea<'a> {

    /** creates the algorithm. Fails if the instance has no vertex, if no color is
    available or if the configuration is invalid.
    */
    pub fn new(inst:&'a dyn ColoringInstance, nb_colors:usize, config:HeaConfig, seed:u64) -> Result<Self> {
        if inst.nb_vertices() == 0 {
            bail!("the instance must contain at least one vertex");
        }
        if nb_colors == 0 {
            bail!("the number of colors must be at least 1");
        }
        config.validate()?;
        Ok(Self {
            inst,
            nb_colors,
            config,
            seed,
            rng: Rng::with_seed(seed),
            population: Vec::new(),
            best: None,
            history: Vec::new(),
            nb_iterations: 0,
            nb_generations: 0,
        })
    }

    /// seed of the random number generator
    pub fn seed(&self) -> u64 { self.seed }

    /// parameters of the algorithm
    pub fn config(&self) -> &HeaConfig { &self.config }

    /// number of colors (k)
    pub fn nb_colors(&self) -> usize { self.nb_colors }

    /// current population
    pub fn population(&self) -> &[ColoringSolution<'a>] { &self.population }

    /// best coloring found so far (None before the initial population is built)
    pub fn best(&self) -> Option<&BestColoring> { self.best.as_ref() }

    /// (generation, number of conflicts) for each improvement of the best coloring
    pub fn history(&self) -> &[(usize,usize)] { &self.history }

    /// total number of tabu search iterations
    pub fn nb_iterations(&self) -> usize { self.nb_iterations }

    /// number of generations performed
    pub fn nb_generations(&self) -> usize { self.nb_generations }

    /// true if a coloring without conflicts has been found
    pub fn is_solved(&self) -> bool {
        self.best.as_ref().map_or(false, |b| b.nb_conflicts == 0)
    }

    /// output of the run (None before the initial population is built)
    pub fn result(&self) -> Option<HeaResult> {
        self.best.as_ref().map(|b| HeaResult {
            nb_conflicts: b.nb_conflicts,
            colors: b.colors.clone(),
            nb_iterations: self.nb_iterations,
            nb_generations: self.nb_generations,
        })
    }

    /** recounts the conflicts of the best coloring from scratch
    (should be equal to the number of conflicts reported)
    */
    pub fn check(&self) -> Option<usize> {
        self.best.as_ref().map(|b| count_conflicts(self.inst, &b.colors))
    }

    /** builds the initial population (each individual is improved by a tabu search).
    Stops as soon as an individual has no conflicts. Returns true in this case.
    */
    pub fn init(&mut self) -> bool {
        let tenure = self.config.tenure();
        self.population.clear();
        for _ in 0..self.config.population_size {
            let mut sol = ColoringSolution::random(self.inst, self.nb_colors, &self.rng);
            self.nb_iterations += sol.tabu_search(self.config.max_iterations, &tenure, &self.rng);
            let solved = self.update_best(&sol);
            self.population.push(sol);
            if solved { return true; }
        }
        if self.config.verbose {
            let conflicts:Vec<usize> = self.population.iter().map(|s| s.nb_conflicts()).collect();
            println!("initial population: {:?}", conflicts);
        }
        false
    }

    /// runs the algorithm until its budgets are exhausted. Returns true if a coloring without conflicts is found
    pub fn solve(&mut self) -> bool {
        self.solve_until(&NoStoppingCriterion)
    }

    /** runs the algorithm until its budgets are exhausted or the stopping criterion is met
    (checked between generations). Builds the initial population if needed.
    Returns true if a coloring without conflicts is found.
    */
    pub fn solve_until<Stopping:StoppingCriterion>(&mut self, stopping_criterion:&Stopping) -> bool {
        if self.population.is_empty() && self.init() {
            return true;
        }
        if self.is_solved() {
            return true;
        }
        let tenure = self.config.tenure();
        while self.nb_generations < self.config.max_generations && !stopping_criterion.is_finished() {
            self.nb_generations += 1;
            let (a,b) = self.select_parents();
            let mut offspring = self.combine_parents(a, b);
            self.nb_iterations += offspring.tabu_search(self.config.max_iterations, &tenure, &self.rng);
            if self.update_best(&offspring) {
                return true;
            }
            if self.update_population(offspring) {
                self.mutate_individuals(self.config.mutation_size);
            }
        }
        false
    }

    /** selects a random individual and the best individual among the others
    (ties broken at random). With a single individual, returns it twice.
    */
    fn select_parents(&self) -> (usize,usize) {
        let first = RangeRand::new(0, self.population.len()-1).sample(&self.rng);
        let mut second:Option<(usize,usize)> = None; // (index, nb conflicts)
        let mut select = RandSelect::default();
        for (i,sol) in self.population.iter().enumerate().filter(|(i,_)| *i != first) {
            let score = sol.nb_conflicts();
            match second {
                Some((_,best)) if score > best => {},
                Some((_,best)) if score == best => {
                    if select.is_selected(&self.rng) { second = Some((i,score)); }
                },
                _ => {
                    second = Some((i,score));
                    select.reset();
                }
            }
        }
        (first, second.map_or(first, |(i,_)| i))
    }

    /// creates an offspring using the greedy partition crossover
    fn combine_parents(&self, a:usize, b:usize) -> ColoringSolution<'a> {
        let colors = greedy_partition_crossover(
            &[self.population[a].colors(), self.population[b].colors()],
            self.nb_colors,
            &self.rng
        );
        ColoringSolution::from_colors(self.inst, self.nb_colors, colors)
    }

    /** updates the best coloring if the solution is strictly better.
    Returns true if the best coloring has no conflicts.
    */
    fn update_best(&mut self, sol:&ColoringSolution<'a>) -> bool {
        let improved = self.best.as_ref().map_or(true, |b| sol.nb_conflicts() < b.nb_conflicts);
        if improved {
            self.best = Some(BestColoring {
                nb_conflicts: sol.nb_conflicts(),
                colors: sol.colors().to_vec(),
            });
            self.history.push((self.nb_generations, sol.nb_conflicts()));
            if self.config.verbose {
                println!(
                    "it: {:<15} gen: {:<15} conflicts: {:<15}",
                    self.nb_iterations, self.nb_generations, sol.nb_conflicts()
                );
            }
        }
        self.is_solved()
    }

    /** inserts the offspring in the population:
     - replaces the worst individual (ties broken at random) if the offspring is strictly better
     - otherwise, adds it if the population is smaller than twice its nominal size
     - otherwise, keeps only the best individuals (the offspring is dropped)
    Returns true if the population has been shrunk.
    */
    fn update_population(&mut self, offspring:ColoringSolution<'a>) -> bool {
        let mut worst:Option<(usize,usize)> = None; // (index, nb conflicts)
        let mut select = RandSelect::default();
        for (i,sol) in self.population.iter().enumerate() {
            let score = sol.nb_conflicts();
            match worst {
                Some((_,w)) if score < w => {},
                Some((_,w)) if score == w => {
                    if select.is_selected(&self.rng) { worst = Some((i,score)); }
                },
                _ => {
                    worst = Some((i,score));
                    select.reset();
                }
            }
        }
        match worst {
            Some((i,w)) if offspring.nb_conflicts() < w => {
                self.population[i] = offspring;
                false
            },
            _ if self.population.len() < 2 * self.config.population_size => {
                self.population.push(offspring);
                false
            },
            _ => {
                self.population.sort_by_key(|s| s.nb_conflicts());
                self.population.truncate(self.config.population_size);
                true
            }
        }
    }

    /// perturbs nb_mutated distinct individuals chosen at random
    fn mutate_individuals(&mut self, nb_mutated:usize) {
        let n = self.population.len();
        let nb_mutated = nb_mutated.min(n);
        let mut indices:Vec<usize> = (0..n).collect();
        for i in 0..nb_mutated { // partial Fisher-Yates shuffle
            let j = RangeRand::new(i, n-1).sample(&self.rng);
            indices.swap(i, j);
            self.population[indices[i]].perturb(&self.rng);
        }
    }
}
