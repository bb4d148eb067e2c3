//! AeTxt CLI - work with password-protected `.aetxt` files.
//!
//! The desktop editor owns the interactive surface; this binary covers the
//! same encrypted file format from the command line: encrypt a plaintext
//! file, decrypt an `.aetxt` file, or inspect a blob without a password.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod password;

use aetxt_core::VERSION;

/// AeTxt - password-protected text files (AES-256-GCM)
#[derive(Parser)]
#[command(name = "aetxt")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Open (decrypt and print) this file, as the editor would at launch
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt a plaintext file into an .aetxt payload
    Encrypt {
        /// Plaintext input file
        input: PathBuf,
        /// Output path (defaults to the input with an .aetxt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decrypt an .aetxt file
    Decrypt {
        /// Encrypted input file
        file: PathBuf,
        /// Write the plaintext here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Inspect a payload's structure without decrypting it
    Show {
        /// Encrypted input file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Encrypt { input, output }) => commands::encrypt(&input, output.as_deref()),
        Some(Command::Decrypt { file, output }) => commands::decrypt(&file, output.as_deref()),
        Some(Command::Show { file }) => commands::show(&file),
        None => match cli.file {
            Some(file) => commands::decrypt(&file, None),
            None => {
                use clap::CommandFactory;
                Cli::command().print_help().ok();
                std::process::exit(2);
            }
        },
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
