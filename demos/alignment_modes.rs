use pairwise_aligner::{Aligner, AlignmentMode, ScoreParams, Sequence, TracebackMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seq1: Sequence = "ACACACC".parse()?;
    let seq2: Sequence = "ACA".parse()?;

    for mode in [AlignmentMode::Global, AlignmentMode::Local] {
        let aligner = Aligner::default()
            .with_alignment_mode(mode)
            .with_traceback_mode(TracebackMode::All)
            .with_scores(ScoreParams::new(3, -1, -1));

        let (scores, steps) = aligner.matrices(&seq1, &seq2);
        println!("{mode} score matrix:\n{scores}");
        println!("{mode} traceback matrix:\n{steps}");

        for alignment in aligner.align(&seq1, &seq2) {
            println!("{alignment}");
            println!("CIGAR: {}", alignment.cigar());
            println!("Identity: {:.2}", alignment.stats().identity());
            println!();
        }
    }

    Ok(())
}
