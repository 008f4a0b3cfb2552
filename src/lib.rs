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
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Single precision, power-of-two, complex-to-complex FFT planned once per size and
//! direction. A plan is realized either as a chain of precompiled leaf and combination
//! kernels or, on AArch64 with the `jit` feature, as machine code generated for it.
//!
//! ```
//! use fftjit::{FftDirection, FftPlan};
//! use num_complex::Complex;
//!
//! let plan = FftPlan::new(64, FftDirection::Forward).unwrap();
//! let input = vec![Complex::new(1f32, 0.); 64];
//! let mut output = vec![Complex::default(); 64];
//! plan.execute(&input, &mut output).unwrap();
//! assert!((output[0].re - 64.).abs() < 1e-4);
//! ```
#[cfg(all(target_arch = "x86_64", feature = "avx"))]
mod avx;
mod butterflies;
mod capabilities;
#[cfg(test)]
mod dft;
mod err;
#[cfg(feature = "jit")]
mod jit;
mod kernels;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
mod neon;
mod plan;
mod planner;
mod radix2;
mod radix4;
mod twiddles;
mod util;

pub use capabilities::{CpuCapabilities, capability_description};
pub use err::FftError;
pub use plan::{FftPlan, PlanBuilder, Realization};
pub use planner::{
    BaseSize, Decomposition, DecompositionNode, InstructionFamily, KernelFamily, SizeClass,
};
pub use twiddles::TwiddleTable;

use num_complex::Complex;
use std::fmt::{Display, Formatter};

pub trait FftExecutor<T> {
    /// Out of place transform; both buffers must hold exactly [`FftExecutor::length`] values.
    fn execute(&self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<(), FftError>;
    fn execute_in_place_with_scratch(
        &self,
        data: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
    ) -> Result<(), FftError>;
    fn direction(&self) -> FftDirection;
    fn length(&self) -> usize;
    fn scratch_length(&self) -> usize;
}

/// Sign of the exponent: `Forward` computes `Σ x[n]·e^(-2πi·nk/N)`, `Inverse` the
/// unnormalized `Σ x[n]·e^(+2πi·nk/N)`.
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum FftDirection {
    #[default]
    Forward,
    Inverse,
}

impl FftDirection {
    pub const fn sign(self) -> i32 {
        match self {
            FftDirection::Forward => -1,
            FftDirection::Inverse => 1,
        }
    }

    pub const fn inverse(self) -> FftDirection {
        match self {
            FftDirection::Forward => FftDirection::Inverse,
            FftDirection::Inverse => FftDirection::Forward,
        }
    }
}

impl Display for FftDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FftDirection::Forward => f.write_str("forward"),
            FftDirection::Inverse => f.write_str("inverse"),
        }
    }
}

/// Same as [`FftPlan::new`].
pub fn plan_create(size: usize, direction: FftDirection) -> Result<FftPlan, FftError> {
    FftPlan::new(size, direction)
}

/// Same as [`FftPlan::execute`].
pub fn plan_execute(
    plan: &FftPlan,
    input: &[Complex<f32>],
    output: &mut [Complex<f32>],
) -> Result<(), FftError> {
    plan.execute(input, output)
}

/// Releases the plan, generated code first.
pub fn plan_destroy(plan: FftPlan) {
    drop(plan);
}

/// Process wide capability snapshot, detected on first use.
pub fn capabilities() -> CpuCapabilities {
    CpuCapabilities::detect()
}
