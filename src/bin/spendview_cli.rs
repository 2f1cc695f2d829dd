use spendview::cli;

fn main() {
    spendview::init();
    if let Err(err) = cli::run_cli() {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}
