fn main() {
    if let Err(err) = erd_layout::cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
