use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Create the config file if it does not exist or is broken.
    #[arg(long)]
    pub create_config: bool,

    /// Connect the cache and every backend, ping them and exit.
    #[arg(long)]
    pub check: bool,
}
