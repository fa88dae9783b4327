//! Wordlist Forge - resumable fixed-alphabet wordlist generator
//!
//! Writes every combination of the built-in alphabet, lengths 1 to 4, into
//! numbered files in the current directory. Progress survives restarts and is
//! committed and pushed to git every few files.

use std::process;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wordlist_forge::{
    wordlist::{format_count, ConsoleReporter, GitCheckpointer},
    BatchWriter, GeneratorConfig, RunSummary,
};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        match e.downcast_ref::<wordlist_forge::WordlistError>() {
            Some(err) => eprintln!("\n{}", err.user_message()),
            None => eprintln!("\n❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> anyhow::Result<()> {
    let config = GeneratorConfig::default();
    let mut writer = BatchWriter::new(config)
        .context("invalid generator configuration")?
        .with_checkpointer(GitCheckpointer::default())
        .with_reporter(ConsoleReporter::new());

    print_banner(&writer);
    let summary = writer.run()?;
    print_summary(&summary, writer.config());

    Ok(())
}

/// Alphabet, universe size and output estimate
fn print_banner(writer: &BatchWriter) {
    let config = writer.config();
    let mapper = writer.mapper();
    let total = mapper.total();

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║                  Wordlist Forge v{:<26}║", wordlist_forge::VERSION);
    println!("╚════════════════════════════════════════════════════════════╝");
    println!(
        "Charset   : {}  ({} characters)",
        mapper.alphabet().summary(),
        mapper.alphabet().len()
    );
    println!("Lengths   : 1 to {} characters", mapper.max_length());
    println!(
        "Total     : {} combinations (~{:.3} billion)",
        format_count(total),
        total as f64 / 1e9
    );
    println!("Per file  : {} entries", format_count(config.entries_per_file));
    println!("Files     : ~{} total", config.file_count(total));
    println!(
        "Size      : ~{:.1} MiB on disk",
        mapper.estimated_bytes() as f64 / (1024.0 * 1024.0)
    );
    println!("────────────────────────────────────────────────────────────");
    println!();
}

fn print_summary(summary: &RunSummary, config: &GeneratorConfig) {
    println!();
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║                  🎉 GENERATION COMPLETE!                   ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!("Total combinations : {}", format_count(summary.total));
    if summary.resumed_from > 0 {
        println!(
            "Generated this run : {} (resumed at {})",
            format_count(summary.generated),
            format_count(summary.resumed_from)
        );
    }
    println!("Time taken         : {}s", summary.elapsed.as_secs());
    println!("Average speed      : {:.0} combinations/sec", summary.average_speed());
    println!("Total files        : {}", summary.files_completed);
    println!(
        "Finished at        : {}",
        summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "All files saved as {}",
        config.file_name(0).replace("000000", "XXXXXX")
    );
    println!(
        "Progress backed up via git every {} files.",
        config.checkpoint_interval
    );
}
