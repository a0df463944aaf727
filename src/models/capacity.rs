// Point-in-time capacity readings, all in the source's native kB units

/// Memory figures from /proc/meminfo (kB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total: u64,
    pub free: u64,
    pub buffers: u64,
    pub cached: u64,
    pub reclaimable: u64,
}

impl MemoryInfo {
    /// total − free − buffers − cached − reclaimable slab, floored at zero.
    pub fn used(&self) -> u64 {
        self.total
            .saturating_sub(self.free)
            .saturating_sub(self.buffers)
            .saturating_sub(self.cached)
            .saturating_sub(self.reclaimable)
    }

    /// Everything not counted as used.
    pub fn available(&self) -> u64 {
        self.total.saturating_sub(self.used())
    }
}

/// Swap figures from /proc/meminfo (kB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapInfo {
    pub total: u64,
    pub free: u64,
}

impl SwapInfo {
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }
}

/// Disk totals summed over real filesystems, in 1 KB blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskInfo {
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

impl std::ops::AddAssign for DiskInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.total = self.total.saturating_add(rhs.total);
        self.used = self.used.saturating_add(rhs.used);
        self.available = self.available.saturating_add(rhs.available);
    }
}
