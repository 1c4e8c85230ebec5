//! Creates the application database with the finance table.

use clap::Parser;
use rusqlite::Connection;

use shisan::initialize_db;

/// Create and initialize the SQLite database for shisan.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path where the SQLite database should be created.
    #[arg(long)]
    db_path: String,
}

fn main() {
    let args = Args::parse();

    let connection = Connection::open(&args.db_path)
        .unwrap_or_else(|error| panic!("Could not open database at {}: {error}", args.db_path));

    initialize_db(&connection).expect("Could not create the finance table");

    println!("Initialized database at {}", args.db_path);
}
