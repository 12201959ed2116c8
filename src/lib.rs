//! ZooKeeper plugins: Sensu/Nagios-style checks for ZooKeeper servers
//!
//! Each script lives in `src/bin` and talks to ZooKeeper through the
//! four-letter-word client in [`zookeeper`]. Scripts report a single line on
//! stdout and exit with the code of a [`Status`]. See [`scripts`] for the
//! `--help` output of every script.

use std::fmt;
use std::process;

pub mod scripts;
pub mod threshold;
pub mod zookeeper;

/// The status a check reports and exits with
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// The process exit code monitoring systems expect for this status
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    pub fn exit(self) -> ! {
        process::exit(self.exit_code())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod test {
    use super::Status;

    #[test]
    fn exit_codes_follow_plugin_convention() {
        assert_eq!(Status::Ok.exit_code(), 0);
        assert_eq!(Status::Warning.exit_code(), 1);
        assert_eq!(Status::Critical.exit_code(), 2);
        assert_eq!(Status::Unknown.exit_code(), 3);
    }

    #[test]
    fn displays_upper_case_names() {
        assert_eq!(Status::Ok.to_string(), "OK");
        assert_eq!(Status::Warning.to_string(), "WARNING");
        assert_eq!(Status::Critical.to_string(), "CRITICAL");
        assert_eq!(Status::Unknown.to_string(), "UNKNOWN");
    }
}
