// default_config.rs — `mseq default-config`: print the built-in demo as TOML.

use mseq_config::SequenceConfig;

pub fn execute() -> anyhow::Result<()> {
    print!("{}", SequenceConfig::gripper_demo().to_toml_string()?);
    Ok(())
}
