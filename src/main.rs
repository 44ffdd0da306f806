//! # chatarchive CLI
//!
//! Command-line interface for the chatarchive library.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use chatarchive::ChatarchiveError;
use chatarchive::assembler::ConversationAssembler;
use chatarchive::cli::Args;
use chatarchive::core::filter_conversation;
use chatarchive::format::{OutputFormat, write_to_format};

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Returns `Ok(false)` when no archive could be loaded.
fn run() -> Result<bool, ChatarchiveError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    let format: OutputFormat = args.format.into();
    let filter_config = args.filter_config()?;
    let output_config = args.output_config();
    let work_dir = args.work_dir();

    println!("📦 chatarchive v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Archives: {}", args.archives.len());
    println!("🗂️  Work dir: {}", work_dir.display());
    if !args.list {
        println!("💾 Output:   {}", args.output.display());
        println!("📄 Format:   {}", format);
    }
    if let Some(ref after) = args.after {
        println!("📅 After:    {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:   {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:     {}", from);
    }
    println!();

    println!("⏳ Loading archives...");
    let load_start = Instant::now();
    let mut assembler = ConversationAssembler::with_config(&work_dir, args.archive_config());
    let outcome = assembler.load_all(&args.archives);
    println!(
        "   Loaded {} of {} archives ({:.2}s)",
        outcome.loaded,
        args.archives.len(),
        load_start.elapsed().as_secs_f64()
    );
    for failure in &outcome.failures {
        println!("⚠️  Skipped {}: {}", failure.source.display(), failure.error);
    }

    if !outcome.any_loaded() {
        eprintln!("❌ Error: no archive could be loaded");
        return Ok(false);
    }

    let library = outcome.library;
    if args.list {
        println!();
        println!("💬 Conversations:");
        let summaries = library.summaries();
        if summaries.is_empty() {
            println!("   (no messages found)");
        }
        for line in summaries {
            println!("   {}", line);
        }
        return Ok(true);
    }

    fs::create_dir_all(&args.output)?;
    println!("💾 Writing {}...", format);
    let mut written = 0usize;
    let mut total_messages = 0usize;
    for conversation in library.by_recent_activity() {
        let filtered = filter_conversation(conversation, &filter_config);
        if filtered.is_empty() {
            continue;
        }
        let path = args
            .output
            .join(format!("{}.{}", filtered.id(), format.extension()));
        write_to_format(&filtered, &path.to_string_lossy(), format, &output_config)?;
        println!(
            "   {} → {} ({} msgs, {} attachments)",
            filtered.title(),
            path.display(),
            filtered.len(),
            filtered.attachment_count()
        );
        written += 1;
        total_messages += filtered.len();
    }

    println!();
    println!("✅ Done! {} conversation(s) saved to {}", written, args.output.display());

    println!();
    println!("📊 Summary:");
    println!("   Archives:      {} loaded, {} skipped", outcome.loaded, outcome.failures.len());
    println!("   Conversations: {}", written);
    println!("   Messages:      {}", total_messages);
    println!("   Total time:    {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(true)
}
