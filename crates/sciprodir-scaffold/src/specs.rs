//! Host hardware description for the project README.
//!
//! Values are read from `/proc` where available; anything the host does not
//! expose is reported as `N/A`.

use std::collections::HashSet;
use std::fs;

use sciprodir_link::human_readable_size;

const NOT_AVAILABLE: &str = "N/A";

/// Hardware and OS facts about the machine a project was created on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSpecs {
    pub system: String,
    pub release: Option<String>,
    pub host: Option<String>,
    pub cpu: Option<String>,
    pub physical_cores: Option<usize>,
    pub logical_cores: Option<usize>,
    pub ram_bytes: Option<u64>,
    pub swap_bytes: Option<u64>,
}

impl HostSpecs {
    /// Collect specs of the running host.
    pub fn collect() -> Self {
        let cpuinfo = read_proc("/proc/cpuinfo");
        let meminfo = read_proc("/proc/meminfo");

        Self {
            system: std::env::consts::OS.to_string(),
            release: read_proc("/proc/sys/kernel/osrelease"),
            host: read_proc("/proc/sys/kernel/hostname")
                .or_else(|| std::env::var("HOSTNAME").ok())
                .or_else(|| std::env::var("COMPUTERNAME").ok()),
            cpu: cpuinfo.as_deref().and_then(cpu_model),
            physical_cores: cpuinfo.as_deref().and_then(physical_cores),
            logical_cores: std::thread::available_parallelism().ok().map(|n| n.get()),
            ram_bytes: meminfo.as_deref().and_then(|m| meminfo_bytes(m, "MemTotal")),
            swap_bytes: meminfo.as_deref().and_then(|m| meminfo_bytes(m, "SwapTotal")),
        }
    }

    /// Render the `## Project created on:` README section.
    pub fn to_markdown(&self) -> String {
        fn or_na<T: ToString>(value: Option<T>) -> String {
            value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
        }

        [
            "## Project created on:".to_string(),
            format!("-    System: {}", self.system),
            format!("-    Release: {}", or_na(self.release.as_deref())),
            format!("-    Host: {}", or_na(self.host.as_deref())),
            format!("-    CPU: {}", or_na(self.cpu.as_deref())),
            format!("-    Physical Cores: {}", or_na(self.physical_cores)),
            format!("-    Logical Cores: {}", or_na(self.logical_cores)),
            format!("-    RAM: {}", or_na(self.ram_bytes.map(human_readable_size))),
            format!("-    Swap Memory: {}", or_na(self.swap_bytes.map(human_readable_size))),
        ]
        .join("\n")
    }
}

/// Collect the host specs and render them.
pub fn collect_specs() -> String {
    HostSpecs::collect().to_markdown()
}

fn read_proc(path: &str) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Value of the first `key : value` line with the given key.
fn field<'a>(text: &'a str, key: &str) -> impl Iterator<Item = &'a str> {
    text.lines().filter_map(move |line| {
        let (k, v) = line.split_once(':')?;
        (k.trim() == key).then(|| v.trim())
    })
}

fn cpu_model(cpuinfo: &str) -> Option<String> {
    field(cpuinfo, "model name").next().map(str::to_string)
}

/// Distinct (physical id, core id) pairs.
fn physical_cores(cpuinfo: &str) -> Option<usize> {
    let mut cores = HashSet::new();
    for block in cpuinfo.split("\n\n") {
        let physical = field(block, "physical id").next();
        let core = field(block, "core id").next();
        if let (Some(physical), Some(core)) = (physical, core) {
            cores.insert((physical, core));
        }
    }
    (!cores.is_empty()).then_some(cores.len())
}

/// A `/proc/meminfo` entry converted from kB to bytes.
fn meminfo_bytes(meminfo: &str, key: &str) -> Option<u64> {
    let value = field(meminfo, key).next()?;
    let kb: u64 = value.trim_end_matches("kB").trim().parse().ok()?;
    Some(kb * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPUINFO: &str = "processor\t: 0\nmodel name\t: Example CPU @ 3.00GHz\nphysical id\t: 0\ncore id\t\t: 0\n\n\
processor\t: 1\nmodel name\t: Example CPU @ 3.00GHz\nphysical id\t: 0\ncore id\t\t: 1\n\n\
processor\t: 2\nmodel name\t: Example CPU @ 3.00GHz\nphysical id\t: 0\ncore id\t\t: 0\n";

    const MEMINFO: &str = "MemTotal:       16318480 kB\nMemFree:         1234567 kB\nSwapTotal:       2097148 kB\n";

    #[test]
    fn test_cpu_model() {
        assert_eq!(cpu_model(CPUINFO).as_deref(), Some("Example CPU @ 3.00GHz"));
        assert_eq!(cpu_model("processor : 0"), None);
    }

    #[test]
    fn test_physical_cores() {
        assert_eq!(physical_cores(CPUINFO), Some(2));
        assert_eq!(physical_cores(""), None);
    }

    #[test]
    fn test_meminfo_bytes() {
        assert_eq!(meminfo_bytes(MEMINFO, "MemTotal"), Some(16318480 * 1024));
        assert_eq!(meminfo_bytes(MEMINFO, "SwapTotal"), Some(2097148 * 1024));
        assert_eq!(meminfo_bytes(MEMINFO, "Missing"), None);
    }

    #[test]
    fn test_to_markdown() {
        let specs = HostSpecs {
            system: "linux".into(),
            release: Some("6.1.0".into()),
            host: None,
            cpu: Some("Example CPU".into()),
            physical_cores: Some(4),
            logical_cores: Some(8),
            ram_bytes: Some(16 * 1024 * 1024 * 1024),
            swap_bytes: None,
        };
        let text = specs.to_markdown();

        assert!(text.starts_with("## Project created on:\n-    System: linux"));
        assert!(text.contains("-    Host: N/A"));
        assert!(text.contains("-    Logical Cores: 8"));
        assert!(text.contains("-    RAM: 16.0000 GB"));
        assert!(text.ends_with("-    Swap Memory: N/A"));
    }

    #[test]
    fn test_collect_specs_has_heading() {
        let text = collect_specs();
        assert!(text.starts_with("## Project created on:"));
        assert_eq!(text.lines().count(), 9);
    }
}
