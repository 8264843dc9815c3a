fn main() {
    if let Err(err) = sunscreen_catalog::cli::run(std::env::args_os()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
