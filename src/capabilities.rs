/*
 * // Copyright (c) Radzivon Bartoshyk 6/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use std::fmt::{Display, Formatter};
use std::ops::{BitOr, BitOrAssign};
use std::sync::OnceLock;

/// Bitmask of vector and scalar extensions the host CPU reports.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CpuCapabilities(u32);

impl CpuCapabilities {
    /// Baseline 128-bit vector unit.
    pub const NEON: CpuCapabilities = CpuCapabilities(1 << 0);
    /// AArch64 Advanced SIMD, including fused multiply-add.
    pub const ASIMD: CpuCapabilities = CpuCapabilities(1 << 1);
    pub const SVE: CpuCapabilities = CpuCapabilities(1 << 2);
    pub const SVE2: CpuCapabilities = CpuCapabilities(1 << 3);
    /// Half precision arithmetic.
    pub const FP16: CpuCapabilities = CpuCapabilities(1 << 4);
    pub const SHA1: CpuCapabilities = CpuCapabilities(1 << 5);
    pub const SHA2: CpuCapabilities = CpuCapabilities(1 << 6);
    pub const CRC32: CpuCapabilities = CpuCapabilities(1 << 7);
    pub const SSE2: CpuCapabilities = CpuCapabilities(1 << 8);
    pub const AVX2: CpuCapabilities = CpuCapabilities(1 << 9);
    pub const FMA: CpuCapabilities = CpuCapabilities(1 << 10);

    pub const fn empty() -> CpuCapabilities {
        CpuCapabilities(0)
    }

    pub const fn from_bits(bits: u32) -> CpuCapabilities {
        CpuCapabilities(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: CpuCapabilities) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Runs detection once per process and returns the cached snapshot afterwards.
    pub fn detect() -> CpuCapabilities {
        static CAPABILITIES: OnceLock<CpuCapabilities> = OnceLock::new();
        *CAPABILITIES.get_or_init(|| {
            let detected = probe();
            tracing::trace!(bits = detected.bits(), features = %detected, "cpu capabilities detected");
            detected
        })
    }
}

impl BitOr for CpuCapabilities {
    type Output = CpuCapabilities;

    fn bitor(self, rhs: Self) -> Self::Output {
        CpuCapabilities(self.0 | rhs.0)
    }
}

impl BitOrAssign for CpuCapabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

const NAMED_FLAGS: [(CpuCapabilities, &str); 11] = [
    (CpuCapabilities::NEON, "NEON"),
    (CpuCapabilities::ASIMD, "ASIMD"),
    (CpuCapabilities::SVE, "SVE"),
    (CpuCapabilities::SVE2, "SVE2"),
    (CpuCapabilities::FP16, "FP16"),
    (CpuCapabilities::SHA1, "SHA1"),
    (CpuCapabilities::SHA2, "SHA2"),
    (CpuCapabilities::CRC32, "CRC32"),
    (CpuCapabilities::SSE2, "SSE2"),
    (CpuCapabilities::AVX2, "AVX2"),
    (CpuCapabilities::FMA, "FMA"),
];

impl Display for CpuCapabilities {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (flag, name) in NAMED_FLAGS.iter() {
            if self.contains(*flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "aarch64")]
fn probe() -> CpuCapabilities {
    use std::arch::is_aarch64_feature_detected;
    // Advanced SIMD is architectural on AArch64
    let mut caps = CpuCapabilities::NEON | CpuCapabilities::ASIMD;
    if is_aarch64_feature_detected!("sve") {
        caps |= CpuCapabilities::SVE;
    }
    if is_aarch64_feature_detected!("sve2") {
        caps |= CpuCapabilities::SVE2;
    }
    if is_aarch64_feature_detected!("fp16") {
        caps |= CpuCapabilities::FP16;
    }
    if is_aarch64_feature_detected!("sha2") {
        caps |= CpuCapabilities::SHA1 | CpuCapabilities::SHA2;
    }
    if is_aarch64_feature_detected!("crc") {
        caps |= CpuCapabilities::CRC32;
    }
    caps
}

#[cfg(target_arch = "x86_64")]
fn probe() -> CpuCapabilities {
    // SSE2 is part of the x86_64 baseline
    let mut caps = CpuCapabilities::SSE2;
    if std::arch::is_x86_feature_detected!("avx2") {
        caps |= CpuCapabilities::AVX2;
    }
    if std::arch::is_x86_feature_detected!("fma") {
        caps |= CpuCapabilities::FMA;
    }
    caps
}

#[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
fn probe() -> CpuCapabilities {
    CpuCapabilities::empty()
}

fn yes_no(caps: CpuCapabilities, flag: CpuCapabilities) -> &'static str {
    if caps.contains(flag) { "yes" } else { "no" }
}

fn describe(caps: CpuCapabilities) -> String {
    if cfg!(target_arch = "aarch64") {
        format!(
            "ARM64 Features: NEON={} ASIMD={} SVE={} SVE2={} FP16={}",
            yes_no(caps, CpuCapabilities::NEON),
            yes_no(caps, CpuCapabilities::ASIMD),
            yes_no(caps, CpuCapabilities::SVE),
            yes_no(caps, CpuCapabilities::SVE2),
            yes_no(caps, CpuCapabilities::FP16),
        )
    } else if cfg!(target_arch = "x86_64") {
        format!(
            "x86_64 Features: SSE2={} AVX2={} FMA={}",
            yes_no(caps, CpuCapabilities::SSE2),
            yes_no(caps, CpuCapabilities::AVX2),
            yes_no(caps, CpuCapabilities::FMA),
        )
    } else {
        "Features: none".to_string()
    }
}

/// Human readable summary of [`CpuCapabilities::detect`], for diagnostics only.
pub fn capability_description() -> &'static str {
    static DESCRIPTION: OnceLock<String> = OnceLock::new();
    DESCRIPTION.get_or_init(|| describe(CpuCapabilities::detect()))
}
