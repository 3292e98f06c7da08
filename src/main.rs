mod cli;
mod config;
mod error;
mod project;
mod tools;
mod utils;
mod workspace;

fn main() {
    cli::run();
}
