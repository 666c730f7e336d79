// show.rs — `mseq show`: print the expanded step list.

use std::path::Path;

pub fn execute(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let sequence = config.build_sequence()?;

    if sequence.is_empty() {
        println!("No steps configured.");
        return Ok(());
    }

    println!("{} step(s):", sequence.len());
    for (index, step) in sequence.iter().enumerate() {
        println!(
            "  {:>2}. {:<16} {:<24} {} delay={}ms {}",
            index + 1,
            step.group().to_string(),
            step.goal().to_string(),
            step.parameters(),
            step.delay().as_millis(),
            step.label().unwrap_or(""),
        );
    }
    Ok(())
}
