use std::time::Instant;

use anyhow::{Context, Result};
use clap::{App, load_yaml};
use serde_json::json;

use hea_color::color::{checker, partition_to_colors, CheckerResult, ColoringInstance};
use hea_color::compact_instance::CompactInstance;
use hea_color::search::greedy_dsatur::greedy_dsatur;
use hea_color::util::export_results;


/** solves a coloring instance using a DSATUR greedy */
pub fn main() -> Result<()> {
    // parse arguments
    let yaml = load_yaml!("greedy_dsatur.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let inst_filename = main_args.value_of("instance")
        .context("missing instance file")?;
    println!("reading instance: {}...", inst_filename);
    let instance = CompactInstance::from_file(inst_filename)?;
    instance.display_statistics();
    println!("=======================");
    // solve it
    let time_init = Instant::now();
    let solution = greedy_dsatur(&instance, main_args.is_present("verbose"));
    let duration = time_init.elapsed().as_secs_f32();
    match checker(&instance, &solution) {
        CheckerResult::Ok(k) => println!("greedy found {} colors ({:.3} seconds)", k, duration),
        e => println!("invalid solution (reason: {:?})", e),
    }
    let stats = json!({
        "primal_list": vec![solution.len()],
        "time_searched": duration,
        "inst_name": inst_filename,
    });
    // export results
    let colors = partition_to_colors(&solution, instance.nb_vertices());
    export_results(&colors, &stats, main_args.value_of("perf"), main_args.value_of("solution"))?;
    Ok(())
}
