use anyhow::Context;
use clap::Parser;
use log::error;
use pairsamlib::cli::Cli;
use pairsamlib::config::Config;
use pairsamlib::logging::init_logger;
use pairsamlib::pipeline;
use pairsamlib::utils::{command_line, get_input_reader, output_writer_checked};
use std::io::ErrorKind;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(err) = run(&cli) {
        let broken_pipe = err
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<std::io::Error>(), Some(e) if e.kind() == ErrorKind::BrokenPipe));
        if broken_pipe {
            // Terminate silently on a broken output pipe, e.g. `| head`.
            std::process::exit(1);
        }
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config {
        min_mapq: cli.min_mapq,
        max_molecule_size: cli.max_molecule_size,
        drop_readid: cli.drop_readid,
        drop_sam: cli.drop_sam,
        ..Config::default()
    };

    let reader = get_input_reader(&cli.input)
        .with_context(|| format!("failed to open input {:?}", cli.input))?;
    let mut writer = output_writer_checked(&cli.outfile, cli.rewrite)
        .with_context(|| format!("failed to open output {}", cli.outfile))?;

    pipeline::run(
        reader,
        &mut writer,
        &config,
        "pairsam",
        "pairsam",
        env!("CARGO_PKG_VERSION"),
        &command_line(),
    )
    .context("classification failed")?;

    Ok(())
}
