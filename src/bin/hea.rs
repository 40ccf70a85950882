use anyhow::Result;
use clap::{App, load_yaml};

use hea_color::util::{read_params, read_instance, choose_nb_colors, run_trials};


/** solves a k-coloring instance using the hybrid evolutionary algorithm */
pub fn main() -> Result<()> {
    // parse arguments
    let yaml = load_yaml!("hea.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = read_params(&main_args)?;
    let instance = read_instance(&params)?;
    let nb_colors = choose_nb_colors(&params, &instance)?;
    // solve it
    let best = run_trials(&params, &instance, nb_colors)?;
    println!("best: {} conflicts with {} colors", best.nb_conflicts, nb_colors);
    Ok(())
}
