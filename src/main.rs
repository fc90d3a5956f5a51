mod batch;
mod config;
mod contact;
mod export;
mod provider;
mod selection;
mod share;
mod ui;
mod vcard;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use config::Config;
use contact::Contact;

#[derive(Parser, Debug)]
#[command(name = "vcfex")]
struct Cli {
    /// Path to an alternate configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Contact snapshot to load into the interactive picker
    #[arg(value_name = "SNAPSHOT")]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the deduplicated contact list
    List(ListArgs),
    /// Export every contact without the interactive picker
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Split the export into numbered files of --batch-size contacts
    #[arg(long)]
    batches: bool,

    /// Contacts per file in batch mode
    #[arg(long)]
    batch_size: Option<usize>,

    /// Write files here instead of the configured export directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Hand the written files to the configured share command
    #[arg(long)]
    share: bool,

    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    if let Some(command) = cli.command {
        match command {
            Command::List(args) => return handle_list(args),
            Command::Export(args) => return handle_export(args, &config),
        }
    }

    // No subcommand launches the picker. Without a snapshot the list is
    // simply empty, the same state a denied contacts permission leaves
    // behind.
    let contacts = match cli.snapshot {
        Some(path) => load_contacts(&path),
        None => Vec::new(),
    };

    let mut app = ui::app::App::new(contacts, &config);
    app.run()?;

    Ok(())
}

fn load_contacts(snapshot: &std::path::Path) -> Vec<Contact> {
    contact::dedup_contacts(provider::read_snapshot(snapshot))
}

fn handle_list(args: ListArgs) -> Result<()> {
    let contacts = load_contacts(&args.snapshot);

    if contacts.is_empty() {
        println!("No contacts loaded");
    } else {
        println!("Loaded {} contact(s)", contacts.len());
    }

    for contact in &contacts {
        println!("{}\t{}", contact.name, contact.number);
    }

    Ok(())
}

fn handle_export(args: ExportArgs, config: &Config) -> Result<()> {
    let contacts = load_contacts(&args.snapshot);
    let out_dir = args.out_dir.unwrap_or_else(|| config.export_dir.clone());
    let batch_size = args.batch_size.unwrap_or(config.batch_size);

    let files = if args.batches {
        export::write_batches(&out_dir, &contacts, batch_size)?
    } else {
        vec![export::write_single(&out_dir, &contacts)?]
    };

    for file in &files {
        println!("{}", file.display());
    }
    println!(
        "Exported {} contact(s) to {} file(s).",
        contacts.len(),
        files.len()
    );

    if args.share {
        match &config.commands.share {
            Some(command) => share::dispatch(command, &files)?,
            None => eprintln!("warning: no share command configured"),
        }
    }

    Ok(())
}
