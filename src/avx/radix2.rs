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
use crate::avx::util::_mm256_fcmul_ps;
use crate::kernels::CombinePass;
use crate::FftDirection;
use num_complex::Complex;
use std::arch::x86_64::*;

pub(crate) struct AvxFmaRadix2 {}

impl AvxFmaRadix2 {
    pub(crate) fn new(_: FftDirection) -> Self {
        AvxFmaRadix2 {}
    }

    #[target_feature(enable = "avx2", enable = "fma")]
    unsafe fn execute_f32(&self, data: &mut [Complex<f32>], twiddles: &[Complex<f32>], length: usize) {
        let half = length / 2;
        for block in data.chunks_exact_mut(length) {
            let (lo, hi) = block.split_at_mut(half);
            for ((a, b), tw) in lo
                .chunks_exact_mut(4)
                .zip(hi.chunks_exact_mut(4))
                .zip(twiddles.chunks_exact(4))
            {
                unsafe {
                    let u0 = _mm256_loadu_ps(a.as_ptr().cast());
                    let u1 = _mm256_loadu_ps(b.as_ptr().cast());
                    let tw0 = _mm256_loadu_ps(tw.as_ptr().cast());

                    let t = _mm256_fcmul_ps(u1, tw0);

                    _mm256_storeu_ps(a.as_mut_ptr().cast(), _mm256_add_ps(u0, t));
                    _mm256_storeu_ps(b.as_mut_ptr().cast(), _mm256_sub_ps(u0, t));
                }
            }
        }
    }
}

impl CombinePass<f32> for AvxFmaRadix2 {
    fn execute(&self, data: &mut [Complex<f32>], twiddles: &[Complex<f32>], length: usize) {
        unsafe { self.execute_f32(data, twiddles, length) }
    }

    fn radix(&self) -> usize {
        2
    }
}
