fn main() {
    if let Err(err) = beamhash_cli::run_entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
