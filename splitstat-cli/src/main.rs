//! Splitstat binary entry point

fn main() {
    if let Err(e) = splitstat_cli::run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
