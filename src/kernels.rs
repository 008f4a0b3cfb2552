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
use crate::butterflies::{Butterfly2, Butterfly4, Butterfly8, Butterfly16};
use crate::planner::{BaseSize, InstructionFamily, KernelFamily};
use crate::radix2::Radix2;
use crate::radix4::Radix4;
use crate::FftDirection;
use num_complex::Complex;

/// Fixed size unrolled transform applied to every leaf block.
pub(crate) trait LeafButterfly<T>: Send + Sync {
    /// For each block `b` gathers `input[permutation[b·L + t]]` for `t < L` and writes the
    /// block's spectrum to `output[b·L..(b + 1)·L]` in natural order.
    ///
    /// `permutation` and `output` have equal length, a multiple of [`Self::length`],
    /// and every index in `permutation` is in bounds of `input`.
    fn execute(&self, input: &[Complex<T>], permutation: &[u32], output: &mut [Complex<T>]);

    fn length(&self) -> usize;
}

/// One combination level, applied in place to every `length` sized block.
pub(crate) trait CombinePass<T>: Send + Sync {
    /// Block `data[s..s + length]` holds `radix` child spectra of `length / radix` values each.
    /// `twiddles` is the level's slice of the twiddle table in this pass's vector grouping.
    fn execute(&self, data: &mut [Complex<T>], twiddles: &[Complex<T>], length: usize);

    fn radix(&self) -> usize;
}

/// Resolves the leaf kernel for `(base, instruction family)`.
pub(crate) fn leaf_kernel(
    base: BaseSize,
    instruction_family: InstructionFamily,
    direction: FftDirection,
) -> Box<dyn LeafButterfly<f32>> {
    match (base, instruction_family) {
        (BaseSize::Two, _) => Box::new(Butterfly2::<f32>::new(direction)),
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        (BaseSize::Four, InstructionFamily::Neon) => {
            Box::new(crate::neon::NeonButterfly4::new(direction))
        }
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        (BaseSize::Eight, InstructionFamily::Neon) => {
            Box::new(crate::neon::NeonButterfly8::new(direction))
        }
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        (BaseSize::Sixteen, InstructionFamily::Neon) => {
            Box::new(crate::neon::NeonButterfly16::new(direction))
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        (BaseSize::Four, InstructionFamily::AvxFma) => {
            Box::new(crate::avx::AvxButterfly4::new(direction))
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        (BaseSize::Eight, InstructionFamily::AvxFma) => {
            Box::new(crate::avx::AvxButterfly8::new(direction))
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        (BaseSize::Sixteen, InstructionFamily::AvxFma) => {
            Box::new(crate::avx::AvxButterfly16::new(direction))
        }
        (BaseSize::Four, _) => Box::new(Butterfly4::<f32>::new(direction)),
        (BaseSize::Eight, _) => Box::new(Butterfly8::<f32>::new(direction)),
        (BaseSize::Sixteen, _) => Box::new(Butterfly16::<f32>::new(direction)),
    }
}

/// Resolves the combination kernel for `(family, instruction family)`.
///
/// EE and OO nodes span two halvings and share the radix 4 kernel, EO and OE the radix 2 one.
pub(crate) fn combine_kernel(
    family: KernelFamily,
    instruction_family: InstructionFamily,
    direction: FftDirection,
) -> Box<dyn CombinePass<f32>> {
    match (family, instruction_family) {
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        (KernelFamily::EE | KernelFamily::OO, InstructionFamily::Neon) => {
            Box::new(crate::neon::NeonRadix4::new(direction))
        }
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        (KernelFamily::EO | KernelFamily::OE, InstructionFamily::Neon) => {
            Box::new(crate::neon::NeonRadix2::new(direction))
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        (KernelFamily::EE | KernelFamily::OO, InstructionFamily::AvxFma) => {
            Box::new(crate::avx::AvxFmaRadix4::new(direction))
        }
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        (KernelFamily::EO | KernelFamily::OE, InstructionFamily::AvxFma) => {
            Box::new(crate::avx::AvxFmaRadix2::new(direction))
        }
        (KernelFamily::EE | KernelFamily::OO, _) => Box::new(Radix4::<f32>::new(direction)),
        (KernelFamily::EO | KernelFamily::OE, _) => Box::new(Radix2::<f32>::new(direction)),
    }
}
