use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use serde_json::{json, Value};

use crate::{
    color::{ColoringInstance, Color, colors_to_partition},
    compact_instance::CompactInstance,
    optima::read_optima,
    search::greedy_dsatur::greedy_dsatur,
    search::hea::{Hea, HeaConfig, HeaResult},
    search::helper::stopping_criterion::{NoStoppingCriterion, TimeStoppingCriterion},
};

/// header of the CSV result sheet
pub const RESULT_SHEET_HEADER:&str =
    "Date, Instance, Algorithm, RandSeed, Duration, IterCount, GenerationCount, Optima, Solution";

/// parameters given on the command line
#[derive(Debug, Clone)]
pub struct Params {
    /// instance file (DIMACS format)
    pub inst_filename: String,
    /// number of colors (if given)
    pub nb_colors: Option<usize>,
    /// table of known chromatic numbers
    pub optima_file: Option<String>,
    /// parameters of the algorithm
    pub config: HeaConfig,
    /// number of independent runs
    pub nb_trials: usize,
    /// seed of the first run (the i-th run uses seed+i)
    pub seed: u64,
    /// time limit of each run (in seconds)
    pub time: Option<f32>,
    /// CSV file in which a row is appended for each run
    pub csv_file: Option<String>,
    /// JSON statistics file
    pub perf_file: Option<String>,
    /// file in which the best coloring is written
    pub sol_file: Option<String>,
    /// if given, the runs are repeated for each tabu amplitude up to this value
    pub amplitude_max: Option<usize>,
}

/// parses an optional argument
fn parse_arg<T>(main_args:&ArgMatches, name:&str) -> Result<Option<T>>
where T:FromStr, T::Err: std::error::Error + Send + Sync + 'static {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(e) => {
            let res = e.parse::<T>()
                .with_context(|| format!("unable to parse the argument {} ({})", name, e))?;
            Ok(Some(res))
        }
    }
}

/** reads command line input and returns the parameters of the run */
pub fn read_params(main_args:&ArgMatches) -> Result<Params> {
    let inst_filename = main_args.value_of("instance")
        .context("missing instance file")?
        .to_string();
    let default = HeaConfig::default();
    let config = HeaConfig {
        population_size: parse_arg(main_args, "population")?.unwrap_or(default.population_size),
        max_generations: parse_arg(main_args, "generations")?.unwrap_or(default.max_generations),
        max_iterations: parse_arg(main_args, "iterations")?.unwrap_or(default.max_iterations),
        tabu_tenure_base: parse_arg(main_args, "tabu_base")?.unwrap_or(default.tabu_tenure_base),
        tabu_tenure_amplitude: parse_arg(main_args, "tabu_amplitude")?.unwrap_or(default.tabu_tenure_amplitude),
        mutation_size: parse_arg(main_args, "mutation")?.unwrap_or(default.mutation_size),
        verbose: main_args.is_present("verbose"),
    };
    config.validate()?;
    let seed = parse_arg(main_args, "seed")?.unwrap_or_else(|| fastrand::u64(..));
    let params = Params {
        inst_filename,
        nb_colors: parse_arg(main_args, "colors")?,
        optima_file: main_args.value_of("optima").map(|e| e.to_string()),
        config,
        nb_trials: parse_arg(main_args, "trials")?.unwrap_or(1),
        seed,
        time: parse_arg(main_args, "time")?,
        csv_file: main_args.value_of("csv").map(|e| e.to_string()),
        perf_file: main_args.value_of("perf").map(|e| e.to_string()),
        sol_file: main_args.value_of("solution").map(|e| e.to_string()),
        amplitude_max: parse_arg(main_args, "amplitude_max")?,
    };
    if let Some(e) = &params.perf_file { println!("printing perfs in: {}", e); }
    if let Some(e) = &params.sol_file { println!("printing solutions in: {}", e); }
    if let Some(e) = &params.csv_file { println!("appending results to: {}", e); }
    Ok(params)
}

/** reads the instance and prints its statistics */
pub fn read_instance(params:&Params) -> Result<CompactInstance> {
    println!("reading instance: {}...", params.inst_filename);
    let instance = CompactInstance::from_file(&params.inst_filename)?;
    instance.display_statistics();
    println!("=======================");
    Ok(instance)
}

/** number of colors of the run: given on the command line, otherwise found in the
optima table, otherwise one less than a DSATUR coloring.
*/
pub fn choose_nb_colors(params:&Params, inst:&dyn ColoringInstance) -> Result<usize> {
    if let Some(k) = params.nb_colors {
        println!("using {} colors (command line)", k);
        return Ok(k);
    }
    if let Some(filename) = &params.optima_file {
        if let Some(k) = read_optima(filename, &params.inst_filename)? {
            println!("using {} colors (optima table {})", k, filename);
            return Ok(k);
        }
    }
    let sol_greedy = greedy_dsatur(inst, false);
    let k = std::cmp::max(1, sol_greedy.len().saturating_sub(1));
    println!("greedy found {} colors, using {} colors", sol_greedy.len(), k);
    Ok(k)
}

/** writes the header of the result sheet if the file does not exist (or is empty) */
pub fn init_result_sheet(filename:&str) -> Result<()> {
    let is_empty = fs::metadata(filename).map(|m| m.len() == 0).unwrap_or(true);
    if is_empty {
        fs::write(filename, format!("{}\n", RESULT_SHEET_HEADER))
            .with_context(|| format!("couldn't create {}", filename))?;
    }
    Ok(())
}

/** formats a row of the result sheet. The row is prefixed by "[LogicError] " if the
conflicts recounted from scratch (check) differ from the reported ones.
*/
pub fn format_result_row(
    date:u64,
    instance:&str,
    config:&HeaConfig,
    seed:u64,
    duration:f32,
    result:&HeaResult,
    check:usize,
) -> String {
    let prefix = if check != result.nb_conflicts { "[LogicError] " } else { "" };
    let colors:Vec<String> = result.colors.iter().map(|c| c.to_string()).collect();
    format!(
        "{}{}, {}, {}, {}, {}, {}, {}, {}, {}",
        prefix, date, instance, config, seed, duration,
        result.nb_iterations, result.nb_generations, result.nb_conflicts,
        colors.join(" ")
    )
}

/** appends a row to the result sheet */
pub fn append_result_row(filename:&str, row:&str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(filename)
        .with_context(|| format!("couldn't open {}", filename))?;
    writeln!(file, "{}", row).with_context(|| format!("couldn't write in {}", filename))?;
    Ok(())
}

/** writes a string encoding the solution (one line per color class) */
pub fn solution_to_string(colors:&[Color]) -> String {
    let mut res = String::default();
    for class in colors_to_partition(colors) {
        let vertices:Vec<String> = class.iter().map(|v| v.to_string()).collect();
        res += vertices.join(" ").as_str();
        res += "\n";
    }
    res
}

/// exports search results to files
pub fn export_results(
    colors:&[Color],
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<()> {
    if let Some(filename) = perf_file {
        let content = serde_json::to_string(stats)?;
        fs::write(filename, content).with_context(|| format!("couldn't write {}", filename))?;
    }
    if let Some(filename) = sol_file {
        fs::write(filename, solution_to_string(colors))
            .with_context(|| format!("couldn't write {}", filename))?;
    }
    Ok(())
}

/// seconds since the epoch
fn timestamp() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

/** runs the algorithm nb_trials times, prints and exports the results.
Returns the best result among the trials.
*/
pub fn run_trials(params:&Params, inst:&CompactInstance, nb_colors:usize) -> Result<HeaResult> {
    if let Some(filename) = &params.csv_file {
        init_result_sheet(filename)?;
    }
    let inst_name = Path::new(&params.inst_filename).file_name()
        .and_then(|e| e.to_str())
        .unwrap_or(&params.inst_filename)
        .to_string();
    println!("{} with {} colors, {} trial(s), first seed {}",
        params.config, nb_colors, params.nb_trials, params.seed
    );
    let mut best:Option<HeaResult> = None;
    let mut trials_stats:Vec<Value> = Vec::new();
    for trial in 0..params.nb_trials {
        let seed = params.seed.wrapping_add(trial as u64);
        let time_init = Instant::now();
        let mut hea = Hea::new(inst, nb_colors, params.config.clone(), seed)?;
        let solved = match params.time {
            None => hea.solve_until(&NoStoppingCriterion),
            Some(t) => hea.solve_until(&TimeStoppingCriterion::new(t)),
        };
        let duration = time_init.elapsed().as_secs_f32();
        let result = hea.result().context("the search did not build any solution")?;
        let check = hea.check().unwrap_or(usize::MAX);
        if check != result.nb_conflicts {
            println!("[LogicError] reported {} conflicts, recounted {}", result.nb_conflicts, check);
        }
        println!(
            "trial {:<5} conflicts: {:<10} solved: {:<6} iterations: {:<12} generations: {:<10} time: {:.3}",
            trial, result.nb_conflicts, solved, result.nb_iterations, result.nb_generations, duration
        );
        if let Some(filename) = &params.csv_file {
            let row = format_result_row(
                timestamp(), &inst_name, hea.config(), hea.seed(), duration, &result, check
            );
            append_result_row(filename, &row)?;
        }
        trials_stats.push(json!({
            "seed": hea.seed(),
            "nb_colors": hea.nb_colors(),
            "conflicts": result.nb_conflicts,
            "iterations": result.nb_iterations,
            "generations": result.nb_generations,
            "time_searched": duration,
            "primal_list": hea.history(),
        }));
        if best.as_ref().map_or(true, |b| result.nb_conflicts < b.nb_conflicts) {
            best = Some(result);
        }
    }
    let best = best.context("at least one trial is required")?;
    let stats = json!({
        "inst_name": inst_name,
        "nb_colors": nb_colors,
        "algorithm": params.config.to_string(),
        "config": params.config,
        "best_conflicts": best.nb_conflicts,
        "trials": trials_stats,
    });
    export_results(&best.colors, &stats, params.perf_file.as_deref(), params.sol_file.as_deref())?;
    Ok(best)
}


/** runs the trials for each tabu tenure amplitude from the configured one to
amplitude_max (both included). The statistics and solution files of each amplitude
are suffixed by `.ta<amplitude>`. Returns (amplitude, best result) for each amplitude.
*/
pub fn run_amplitude_sweep(
    params:&Params,
    inst:&CompactInstance,
    nb_colors:usize,
    amplitude_max:usize,
) -> Result<Vec<(usize,HeaResult)>> {
    let amplitude_min = params.config.tabu_tenure_amplitude;
    if amplitude_max < amplitude_min {
        bail!("amplitude_max ({}) is smaller than the tabu amplitude ({})", amplitude_max, amplitude_min);
    }
    let mut res = Vec::new();
    for amplitude in amplitude_min..=amplitude_max {
        let suffixed = |f:&Option<String>| f.as_ref().map(|e| format!("{}.ta{}", e, amplitude));
        let sweep_params = Params {
            config: params.config.clone()
                .with_tabu_tenure(params.config.tabu_tenure_base, amplitude),
            perf_file: suffixed(&params.perf_file),
            sol_file: suffixed(&params.sol_file),
            ..params.clone()
        };
        res.push((amplitude, run_trials(&sweep_params, inst, nb_colors)?));
    }
    Ok(res)
}
