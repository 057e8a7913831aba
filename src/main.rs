use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use serde_json::json;

use idbsweep::{
    cli::Cli,
    logger::{self, ev},
    recon::{
        filter::PortFilter,
        lookup,
        scheduler::{schedule, SchedulerConfig},
    },
    targets,
};

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    let out_path: Option<PathBuf> = args.output.clone().map(Into::into);
    let logger = Arc::new(logger::Logger::new(out_path).expect("Failed to initialize logger"));

    let Some(spec) = args.range.as_deref() else {
        eprintln!("No target specified. Use --range <IP/CIDR/@file> to specify targets.");
        return;
    };

    let addrs = match targets::parse_targets(spec) {
        Ok(addrs) => addrs,
        Err(e) => {
            logger.log(ev("targets.invalid", None, json!({ "error": e.to_string() })));
            println!("Invalid input");
            return;
        }
    };

    let filter = Arc::new(PortFilter::parse(&args.ports));
    let client = reqwest::Client::new();
    let scheduler_cfg = SchedulerConfig::new(args.threads);
    let verbose = args.verbose;

    let logger_all = logger.clone();
    schedule(addrs, scheduler_cfg, move |addr| {
        let logger = logger_all.clone();
        let filter = filter.clone();
        let client = client.clone();
        async move {
            let target = addr.to_string();
            if verbose {
                logger.log(ev("lookup.start", Some(&target), json!({})));
            }
            match lookup::lookup(&client, &target).await {
                Ok(result) => {
                    if verbose {
                        logger.log(ev(
                            "lookup.done",
                            Some(&target),
                            json!({ "ports": result.ports, "hostnames": result.hostnames }),
                        ));
                    }
                    let lines = filter.match_lines(&result);
                    if !lines.is_empty() {
                        // one write per address keeps concurrent output whole
                        println!("{}", lines.join("\n"));
                    }
                }
                Err(e) => {
                    logger.log(ev("lookup.error", Some(&target), json!({ "error": e.to_string() })));
                }
            }
        }
    })
    .await
}
