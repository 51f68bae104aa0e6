// src/main.rs
use anyhow::Result;
use clap::Parser;
use packup::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    packup::run(args)
}
