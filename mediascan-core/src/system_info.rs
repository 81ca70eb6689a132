//! Machine identity used to name a fresh store file.

use std::process::Command;

use sha2::{Digest, Sha256};

/// Number of hex characters of the digest kept in the system id.
pub const SYSTEM_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemIdentity {
    pub os: String,
    pub hostname: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

impl SystemIdentity {
    pub fn collect() -> Self {
        Self {
            os: get_os_name(),
            hostname: get_hostname(),
            release: uname("-r"),
            version: uname("-v"),
            machine: std::env::consts::ARCH.to_string(),
        }
    }

    /// First [`SYSTEM_ID_LEN`] hex characters of the SHA-256 digest over
    /// OS name, hostname, OS release, OS version and architecture.
    pub fn system_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.os.as_bytes());
        hasher.update(self.hostname.as_bytes());
        hasher.update(self.release.as_bytes());
        hasher.update(self.version.as_bytes());
        hasher.update(self.machine.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest[..SYSTEM_ID_LEN].to_string()
    }
}

fn get_os_name() -> String {
    #[cfg(unix)]
    {
        let name = uname("-s");
        if !name.is_empty() {
            return name;
        }
    }
    std::env::consts::OS.to_string()
}

fn get_hostname() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .or_else(|_| {
            Command::new("hostname")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .map_err(|_| std::env::VarError::NotPresent)
        })
        .unwrap_or_else(|_| "Unknown".to_string())
}

#[cfg(unix)]
fn uname(flag: &str) -> String {
    Command::new("uname")
        .arg(flag)
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_default()
}

#[cfg(not(unix))]
fn uname(_flag: &str) -> String {
    String::new()
}
