// Shared test helpers: a fake /proc tree in a temp dir

#![allow(dead_code)]

use std::path::PathBuf;
use sysmon::config::SourcesConfig;
use sysmon::proc_repo::ProcRepo;

pub const MEMINFO: &str = "\
MemTotal:        8000000 kB
MemFree:         2000000 kB
MemAvailable:    3900000 kB
Buffers:          100000 kB
Cached:          1500000 kB
SwapCached:            0 kB
SwapTotal:       2097148 kB
SwapFree:        1048574 kB
SReclaimable:     200000 kB
";

pub const DF: &str = "\
Filesystem     1K-blocks     Used Available Use% Mounted on
udev             8000000        0   8000000   0% /dev
tmpfs            1600000     2000   1598000   1% /run
/dev/sda1      104857600 52428800  52428800  50% /
/dev/sdb1       10485760  1048576   9437184  10% /data
overlay-docker   5000000  1000000   4000000  20% /var/lib/docker/overlay2
";

pub struct FakeProc {
    pub dir: tempfile::TempDir,
}

impl FakeProc {
    /// A tree with two interfaces, a CPU line, meminfo, uptime, loadavg, a thermal zone and
    /// a `df` table printed via `cat`.
    pub fn new() -> Self {
        let fake = Self {
            dir: tempfile::TempDir::new().unwrap(),
        };
        fake.set_net_dev(&[("eth0", 0, 0), ("wlan0", 0, 0)]);
        fake.set_cpu(&[0, 0, 0, 0, 0, 0, 0]);
        fake.write("meminfo", MEMINFO);
        fake.write("uptime", "93784.52 301234.10\n");
        fake.write("loadavg", "0.52 0.58 0.59 1/467 12345\n");
        fake.write("temp", "48312\n");
        fake.write("df", DF);
        fake
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path(name), content).unwrap();
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.path(name)).unwrap();
    }

    /// Rewrite the counter table; loopback is always listed first.
    pub fn set_net_dev(&self, rows: &[(&str, u64, u64)]) {
        let mut s = String::from(
            "Inter-|   Receive                                                |  Transmit\n \
             face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n",
        );
        s.push_str("    lo:  999999 10 0 0 0 0 0 0  999999 10 0 0 0 0 0 0\n");
        for (name, rx, tx) in rows {
            s.push_str(&format!(
                "{:>6}: {} 100 0 0 0 0 0 0 {} 100 0 0 0 0 0 0\n",
                name, rx, tx
            ));
        }
        self.write("net_dev", &s);
    }

    /// user nice system idle iowait irq softirq
    pub fn set_cpu(&self, ticks: &[u64; 7]) {
        let fields: Vec<String> = ticks.iter().map(u64::to_string).collect();
        self.write(
            "stat",
            &format!("cpu  {} 0 0 0\ncpu0 1 1 1 1 1 1 1 0 0 0\n", fields.join(" ")),
        );
    }

    pub fn sources(&self) -> SourcesConfig {
        let p = |n: &str| self.path(n).to_string_lossy().into_owned();
        SourcesConfig {
            net_dev: p("net_dev"),
            cpu_stat: p("stat"),
            uptime: p("uptime"),
            loadavg: p("loadavg"),
            meminfo: p("meminfo"),
            thermal: p("temp"),
            disk_command: vec!["cat".into(), p("df")],
            ..SourcesConfig::default()
        }
    }

    pub fn repo(&self) -> ProcRepo {
        ProcRepo::new(self.sources())
    }
}
