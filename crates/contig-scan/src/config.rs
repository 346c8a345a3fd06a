//! Scan engine configuration and hardware vector width detection.

use std::sync::OnceLock;

/// Width of the vector registers a scan may use.
///
/// Ordered from narrowest to widest, so `min` clamps a requested width to
/// what the hardware offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VectorWidth {
    /// No vector registers; unrolled scalar loops only.
    Scalar,
    /// 128-bit registers (SSE2 on x86_64, NEON on aarch64).
    V128,
    /// 256-bit registers (AVX2 on x86_64).
    V256,
}

impl VectorWidth {
    /// Register width in bytes (`0` for [`VectorWidth::Scalar`]).
    pub const fn bytes(self) -> usize {
        match self {
            Self::Scalar => 0,
            Self::V128 => 16,
            Self::V256 => 32,
        }
    }

    /// The widest vector width supported by the running CPU.
    ///
    /// Feature detection runs once per process; later calls return the
    /// cached answer.
    pub fn detect() -> Self {
        static DETECTED: OnceLock<VectorWidth> = OnceLock::new();
        *DETECTED.get_or_init(|| {
            let width = probe();
            tracing::debug!(target: "contig::scan", width = ?width, "detected vector width");
            width
        })
    }

    /// The widest width not above `self` whose registers fit in `len` bytes.
    ///
    /// Runs shorter than one 128-bit register are scanned with scalar loops.
    pub(crate) fn fit(self, len: usize) -> Self {
        match self {
            Self::V256 if len >= Self::V256.bytes() => Self::V256,
            Self::V256 | Self::V128 if len >= Self::V128.bytes() => Self::V128,
            _ => Self::Scalar,
        }
    }
}

#[cfg(target_arch = "x86_64")]
fn probe() -> VectorWidth {
    if std::is_x86_feature_detected!("avx2") {
        VectorWidth::V256
    } else {
        // SSE2 is part of the x86_64 baseline.
        VectorWidth::V128
    }
}

#[cfg(target_arch = "aarch64")]
fn probe() -> VectorWidth {
    VectorWidth::V128
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe() -> VectorWidth {
    VectorWidth::Scalar
}

/// Configuration for a [`Scanner`](crate::Scanner).
///
/// Validated when the scanner is built: a `max_width` above what the CPU
/// supports is clamped down to the detected width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Widest vector registers the scanner may use.
    ///
    /// Default: [`VectorWidth::V256`], i.e. whatever the hardware offers.
    pub max_width: VectorWidth,
}

impl ScanConfig {
    /// Default width cap: no cap below the hardware.
    pub const DEFAULT_MAX_WIDTH: VectorWidth = VectorWidth::V256;

    /// Create a config using the widest vectors the hardware supports.
    pub fn new() -> Self {
        Self {
            max_width: Self::DEFAULT_MAX_WIDTH,
        }
    }

    /// Create a config that never uses vector registers.
    pub fn scalar() -> Self {
        Self {
            max_width: VectorWidth::Scalar,
        }
    }

    /// Create a config capped at `max_width`.
    pub fn with_max_width(max_width: VectorWidth) -> Self {
        Self { max_width }
    }

    /// The width a scanner built from this config will actually use.
    pub fn effective_width(&self) -> VectorWidth {
        self.max_width.min(VectorWidth::detect())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_are_ordered() {
        assert!(VectorWidth::Scalar < VectorWidth::V128);
        assert!(VectorWidth::V128 < VectorWidth::V256);
        assert_eq!(VectorWidth::V256.bytes(), 32);
    }

    #[test]
    fn detection_is_stable() {
        assert_eq!(VectorWidth::detect(), VectorWidth::detect());
    }

    #[test]
    fn scalar_config_never_vectorizes() {
        assert_eq!(ScanConfig::scalar().effective_width(), VectorWidth::Scalar);
    }

    #[test]
    fn effective_width_never_exceeds_hardware() {
        let config = ScanConfig::new();
        assert!(config.effective_width() <= VectorWidth::detect());
        assert_eq!(ScanConfig::default(), config);
    }

    #[test]
    fn fit_downgrades_for_short_runs() {
        assert_eq!(VectorWidth::V256.fit(64), VectorWidth::V256);
        assert_eq!(VectorWidth::V256.fit(31), VectorWidth::V128);
        assert_eq!(VectorWidth::V256.fit(15), VectorWidth::Scalar);
        assert_eq!(VectorWidth::V128.fit(100), VectorWidth::V128);
        assert_eq!(VectorWidth::Scalar.fit(100), VectorWidth::Scalar);
    }
}
