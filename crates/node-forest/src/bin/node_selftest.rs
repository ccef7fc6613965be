//! `node-selftest`: exercise every forest operation and report pass/fail.
//!
//! Usage:
//!   node-selftest [--rounds N] [--items N] [--seed N|0xHEX] [--quiet]
//!
//! `RUST_LOG=debug` (or `trace`) shows node lifecycle and ownership edges.
//! Exits with status 1 when any check failed.

use node_forest::selftest::{run, SelfTestConfig};

fn main() {
    env_logger::init();

    let config = match SelfTestConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let report = run(&config);
    for scenario in &report.scenarios {
        if !config.quiet {
            for failure in &scenario.failures {
                println!("{} fail: {failure}!", scenario.name);
            }
        }
        println!("==={} test summary===", scenario.name);
        println!("{}\n", scenario.tally);
    }
    println!("===all test summary===");
    println!("{}", report.total());
    println!("seed 0x{:016x}", report.seed);

    if !report.passed() {
        std::process::exit(1);
    }
}
