mod app;
mod cli;
mod config;
mod constants;
mod domain;
mod fetch;
mod grid;
mod parse;

fn main() {
    if std::env::args().len() > 1 {
        cli::run_cli();
    } else if let Err(e) = app::run_ui() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
