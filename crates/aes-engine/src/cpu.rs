//! Runtime detection of AES instruction support.

use std::sync::OnceLock;

static HARDWARE_AES: OnceLock<bool> = OnceLock::new();

/// Returns true when the AES-NI engine can run on this processor.
///
/// The processor is probed once; later calls read the cached answer.
pub fn is_hardware_acceleration_supported() -> bool {
    *HARDWARE_AES.get_or_init(|| {
        let supported = probe();
        tracing::debug!(supported, "probed hardware AES support");
        supported
    })
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn probe() -> bool {
    std::is_x86_feature_detected!("aes") && std::is_x86_feature_detected!("sse2")
}

// The accelerated engine is only built for x86 targets.
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn probe() -> bool {
    false
}
