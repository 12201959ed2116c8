//! Documentation about the various scripts contained herein
//!
//! - [check-zookeeper-threshold](#check-zookeeper-threshold)
//!
//! # check-zookeeper-threshold
//!
//! Cross platform, only requires TCP access to a ZooKeeper client port.
//!
//! ```plain
//! $ check-zookeeper-threshold --help
//! check-zookeeper-threshold (part of zookeeper-plugins) 0.1.0
//! Check a numeric ZooKeeper metric against warning and critical thresholds
//!
//! USAGE:
//!     check-zookeeper-threshold [FLAGS] [OPTIONS]
//!
//! FLAGS:
//!     -h, --help           Prints help information
//!         --leader_only    Cut the check short and return OK if the server is not the leader. Some values are only
//!                          present on leaders.
//!     -V, --version        Prints version information
//!     -v, --verbose        Log debug information to stderr
//!
//! OPTIONS:
//!         --host <host>                ZooKeeper host [default: localhost]
//!         --maxcrit <maxcrit>          Go critical above this value
//!         --maxwarn <maxwarn>          Warn above this value
//!         --metric <metric>            Metric to threshold check
//!         --mincrit <mincrit>          Go critical below this value
//!         --minwarn <minwarn>          Warn below this value
//!         --port <port>                ZooKeeper port [default: 2181]
//!         --timeout <SECONDS>          Give up on connecting, reading or writing after this long. 0 waits forever.
//!                                      [default: 10]
//!         --zk_command <zk-command>    ZooKeeper command/four-letter word [default: mntr]
//!
//! Examples:
//!
//!     Go critical if the leader has fewer than two synced followers:
//!
//!         check-zookeeper-threshold --metric zk_synced_followers --leader_only --mincrit 2
//!
//!     Warn above 50ms average latency, critical above 100ms:
//!
//!         check-zookeeper-threshold --metric zk_avg_latency --maxwarn 50 --maxcrit 100
//!
//! About metrics:
//!
//!     The metric name is used as a regular expression, so `zk_.*_latency`
//!     matches the first latency line. Only whole-number values are recognized.
//! ```
//!
//! Exit codes: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN. Connection failures
//! and timeouts are UNKNOWN.
