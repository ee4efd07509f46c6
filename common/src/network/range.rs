use crate::error::ProbeError;

pub const MIN_PORT: u32 = 1;
pub const MAX_PORT: u32 = u16::MAX as u32;

/// An inclusive, validated range of TCP ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    /// Fails with [`ProbeError::InvalidRange`] unless `1 <= start <= end <= 65535`.
    pub fn new(start: u32, end: u32) -> Result<Self, ProbeError> {
        if start < MIN_PORT || end > MAX_PORT || start > end {
            return Err(ProbeError::InvalidRange { start, end });
        }

        Ok(Self {
            start: start as u16,
            end: end as u16,
        })
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn to_iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
