fn main() {
    if let Err(e) = servicescope_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
