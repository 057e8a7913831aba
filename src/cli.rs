use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "idbsweep", about = "Passive Port Reconnaissance via InternetDB")]
pub struct Cli {
    #[arg(short, long, help = "Target IP address, CIDR range or @file")]
    pub range: Option<String>,
    #[arg(short, long, default_value = "", help = "Comma-separated list of ports to report [default: all]")]
    pub ports: String,
    #[arg(short, long, default_value_t = 1, help = "Maximum number of concurrent lookups")]
    pub threads: usize,
    #[arg(short, long, help = "Event log file [default: stderr]")]
    pub output: Option<String>,
    #[arg(short, long, help = "Enable verbose event logging")]
    pub verbose: bool,
}
