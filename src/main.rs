use clap::Parser;
use pairwise_aligner::{
    cli::{init_verbose, Cli},
    Aligner, Result,
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let params = cli.alignment_params();

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        params.mode
    );

    let (seq1, seq2) = cli.sequences();
    let aligner = Aligner::new(params);
    let stdout = std::io::stdout();
    let written = aligner.report(seq1, seq2, &mut stdout.lock())?;

    log::info!("{} alignment(s) reported", written);
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
