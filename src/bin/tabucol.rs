use anyhow::Result;
use clap::{App, load_yaml};

use hea_color::util::{read_params, read_instance, choose_nb_colors, run_trials, run_amplitude_sweep};


/** solves a k-coloring instance using a single tabu search (TabuCol) per trial */
pub fn main() -> Result<()> {
    // parse arguments
    let yaml = load_yaml!("tabucol.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let mut params = read_params(&main_args)?;
    // a single individual and no generation: the run is one tabu search
    params.config = params.config
        .with_population_size(1)
        .with_max_generations(0)
        .with_mutation_size(0);
    let instance = read_instance(&params)?;
    let nb_colors = choose_nb_colors(&params, &instance)?;
    // solve it (for each tabu amplitude if a sweep is requested)
    match params.amplitude_max {
        None => {
            let best = run_trials(&params, &instance, nb_colors)?;
            println!("best: {} conflicts with {} colors", best.nb_conflicts, nb_colors);
        },
        Some(amplitude_max) => {
            for (amplitude, best) in run_amplitude_sweep(&params, &instance, nb_colors, amplitude_max)? {
                println!("amplitude {:<5} best: {} conflicts with {} colors", amplitude, best.nb_conflicts, nb_colors);
            }
        }
    }
    Ok(())
}
