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
use crate::kernels::CombinePass;
use crate::neon::util::mul_complex_f32;
use crate::FftDirection;
use num_complex::Complex;
use std::arch::aarch64::*;

pub(crate) struct NeonRadix2 {}

impl NeonRadix2 {
    pub(crate) fn new(_: FftDirection) -> Self {
        NeonRadix2 {}
    }
}

impl CombinePass<f32> for NeonRadix2 {
    fn execute(&self, data: &mut [Complex<f32>], twiddles: &[Complex<f32>], length: usize) {
        let half = length / 2;
        for block in data.chunks_exact_mut(length) {
            let (lo, hi) = block.split_at_mut(half);
            for ((a, b), tw) in lo
                .chunks_exact_mut(2)
                .zip(hi.chunks_exact_mut(2))
                .zip(twiddles.chunks_exact(2))
            {
                unsafe {
                    let u0 = vld1q_f32(a.as_ptr().cast());
                    let u1 = vld1q_f32(b.as_ptr().cast());
                    let tw0 = vld1q_f32(tw.as_ptr().cast());

                    let t = mul_complex_f32(u1, tw0);

                    vst1q_f32(a.as_mut_ptr().cast(), vaddq_f32(u0, t));
                    vst1q_f32(b.as_mut_ptr().cast(), vsubq_f32(u0, t));
                }
            }
        }
    }

    fn radix(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radix4::tests::check_pass;

    #[test]
    fn test_neon_radix2() {
        for direction in [FftDirection::Forward, FftDirection::Inverse] {
            for length in [32usize, 64, 512] {
                check_pass(&NeonRadix2::new(direction), direction, length, 2);
            }
        }
    }
}
