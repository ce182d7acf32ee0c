use clap::Parser;
use magic_datalog::io::cli;
use std::path::PathBuf;
use std::process::ExitCode;

/// Rewrites a Datalog program with the magic set transformation.
#[derive(Parser, Debug)]
#[command(about = "Optimize Datalog program execution with the Magic Set method.")]
struct Args {
    /// Filename of the Datalog program.
    #[arg(long)]
    program: PathBuf,

    /// Apply greedy binding order optimization.
    #[arg(long)]
    greedy_binding_order: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match cli::run(&args.program, args.greedy_binding_order) {
        Ok(rendered) => {
            print!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
