//! Check a numeric ZooKeeper metric against thresholds
//!
//! Sends a four-letter word (`mntr` by default) to a ZooKeeper server, pulls
//! one `<metric> <value>` line out of the reply and compares the value with
//! the configured bounds.

use std::time::Duration;

use structopt::StructOpt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use zookeeper_plugins::threshold::{CheckResult, Thresholds};
use zookeeper_plugins::zookeeper::{self, ZkError};

const FOLLOWER_MESSAGE: &str = "Check run on a follower, but run as leader_only";

/// Check a numeric ZooKeeper metric against warning and critical thresholds.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "check-zookeeper-threshold (part of zookeeper-plugins)",
    setting = structopt::clap::AppSettings::ColoredHelp,
    after_help = "Examples:

    Go critical if the leader has fewer than two synced followers:

        check-zookeeper-threshold --metric zk_synced_followers --leader_only --mincrit 2

    Warn above 50ms average latency, critical above 100ms:

        check-zookeeper-threshold --metric zk_avg_latency --maxwarn 50 --maxcrit 100

About metrics:

    The metric name is used as a regular expression, so `zk_.*_latency`
    matches the first latency line. Only whole-number values are recognized."
)]
struct Args {
    #[structopt(long = "host", default_value = "localhost", help = "ZooKeeper host")]
    host: String,
    #[structopt(long = "port", default_value = "2181", help = "ZooKeeper port")]
    port: u16,
    #[structopt(
        long = "leader_only",
        help = "Cut the check short and return OK if the server is not the leader. \
                Some values are only present on leaders."
    )]
    leader_only: bool,
    #[structopt(
        long = "zk_command",
        default_value = "mntr",
        help = "ZooKeeper command/four-letter word"
    )]
    zk_command: String,
    #[structopt(long = "metric", help = "Metric to threshold check")]
    metric: Option<String>,

    #[structopt(long = "minwarn", allow_hyphen_values = true, help = "Warn below this value")]
    minwarn: Option<f64>,
    #[structopt(long = "maxwarn", allow_hyphen_values = true, help = "Warn above this value")]
    maxwarn: Option<f64>,
    #[structopt(
        long = "mincrit",
        allow_hyphen_values = true,
        help = "Go critical below this value"
    )]
    mincrit: Option<f64>,
    #[structopt(
        long = "maxcrit",
        allow_hyphen_values = true,
        help = "Go critical above this value"
    )]
    maxcrit: Option<f64>,

    #[structopt(
        long = "timeout",
        value_name = "SECONDS",
        default_value = "10",
        help = "Give up on connecting, reading or writing after this long. 0 waits forever."
    )]
    timeout: u64,
    #[structopt(short = "v", long = "verbose", help = "Log debug information to stderr")]
    verbose: bool,
}

/// Everything one run needs, fixed once the arguments are parsed
#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    leader_only: bool,
    zk_command: String,
    metric: Option<String>,
    thresholds: Thresholds,
    timeout: Option<Duration>,
}

impl<'a> From<&'a Args> for Config {
    fn from(args: &Args) -> Config {
        Config {
            host: args.host.clone(),
            port: args.port,
            leader_only: args.leader_only,
            zk_command: args.zk_command.clone(),
            metric: args.metric.clone(),
            thresholds: Thresholds {
                mincrit: args.mincrit,
                maxcrit: args.maxcrit,
                minwarn: args.minwarn,
                maxwarn: args.maxwarn,
            },
            timeout: match args.timeout {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}

/// Run the whole check, turning every failure into an UNKNOWN result
fn run(config: &Config) -> CheckResult {
    match check(config) {
        Ok(result) => result,
        Err(e) => CheckResult::unknown(e.to_string()),
    }
}

fn check(config: &Config) -> Result<CheckResult, ZkError> {
    if config.leader_only {
        let srvr = zookeeper::execute_command(&config.host, config.port, "srvr", config.timeout)?;
        if !zookeeper::is_leader(&srvr) {
            debug!("server is not the leader, skipping");
            return Ok(CheckResult::ok(FOLLOWER_MESSAGE));
        }
    }

    let metric = match config.metric {
        Some(ref metric) => metric,
        None => return Ok(CheckResult::unknown("no metric given, pass --metric NAME")),
    };

    let response = zookeeper::execute_command(
        &config.host,
        config.port,
        &config.zk_command,
        config.timeout,
    )?;
    let value = zookeeper::find_metric(&response, metric)?;
    Ok(config.thresholds.evaluate(metric, &value))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    let args = Args::from_args();
    init_logging(args.verbose);
    let config = Config::from(&args);
    debug!(?config, "starting check");
    let result = run(&config);
    println!("[check-zookeeper-threshold] {}", result);
    result.status.exit();
}
