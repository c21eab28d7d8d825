// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! ternc - drives closure and async-call lowering for a compilation unit.

mod manifest;
mod output;

use std::env;
use std::path::Path;
use std::process;

use tern_codegen::{generate_unit, LoweringContext, SourceFileNaming};
use tracing_subscriber::EnvFilter;

use manifest::UnitManifest;

fn main() {
    if let Ok(filter) = EnvFilter::try_from_env("TERN_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
    output::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "lower" => {
            if args.len() < 3 {
                eprintln!("Usage: ternc lower <unit.json>");
                process::exit(1);
            }
            cmd_lower(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("ternc {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("ternc {} - Tern closure and async-call lowering", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: ternc <command> [args]");
    println!();
    println!("Commands:");
    println!("  lower <unit.json>  Lower every instruction of a unit and print its thunks");
    println!("  help               Show this help");
    println!("  version            Show version");
    println!();
    println!("Environment:");
    println!("  TERN_LOG              Log filter, e.g. `tern_codegen=debug`");
    println!("  TERN_LOWERING_CONFIG  Lowering config file, used when the unit has none");
}

fn cmd_lower(path: &str) {
    let unit = match UnitManifest::from_file(Path::new(path)).and_then(|m| m.into_unit()) {
        Ok(unit) => unit,
        Err(e) => {
            eprintln!("{}: {}", output::error_label(), e);
            process::exit(1);
        }
    };

    let naming = SourceFileNaming::new(&unit.config);
    let ctx = LoweringContext::new(&unit.entry_points, &unit.packages, &unit.config, &naming);

    match generate_unit(ctx, &unit.instructions) {
        Ok(thunks) => {
            for thunk in &thunks {
                println!("{}\n", thunk);
            }
            println!("{}", output::banner_ok("Lower", thunks.len()));
        }
        Err(e) => {
            eprintln!("{}: {}", output::error_label(), e);
            if e.is_internal() {
                eprintln!("{}: this is a compiler bug, not a problem in the unit", output::note_label());
            }
            eprintln!("\n{}", output::banner_fail("Lower"));
            process::exit(1);
        }
    }
}
