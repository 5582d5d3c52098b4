use std::process;

use clap::Parser;

fn main() {
    let cli = textbook_rsa::ui::Cli::parse();
    if let Err(e) = textbook_rsa::ui::run_app(cli) {
        eprintln!("Error running application: {:#}", e);
        process::exit(1);
    }
}
