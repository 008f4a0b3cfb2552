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
use crate::avx::util::{_mm256_fcmul_ps, _mm256_rotate90_ps, rotate_sign};
use crate::kernels::CombinePass;
use crate::FftDirection;
use num_complex::Complex;
use std::arch::x86_64::*;

pub(crate) struct AvxFmaRadix4 {
    rot_sign: [f32; 8],
}

impl AvxFmaRadix4 {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        AvxFmaRadix4 {
            rot_sign: rotate_sign(fft_direction),
        }
    }

    #[target_feature(enable = "avx2", enable = "fma")]
    unsafe fn execute_f32(&self, data: &mut [Complex<f32>], twiddles: &[Complex<f32>], length: usize) {
        let quarter = length / 4;
        let v_i_multiplier = unsafe { _mm256_loadu_ps(self.rot_sign.as_ptr()) };

        for block in data.chunks_exact_mut(length) {
            let (q0, rest) = block.split_at_mut(quarter);
            let (q1, rest) = rest.split_at_mut(quarter);
            let (q2, q3) = rest.split_at_mut(quarter);

            for ((((a, b), c), d), tw) in q0
                .chunks_exact_mut(4)
                .zip(q1.chunks_exact_mut(4))
                .zip(q2.chunks_exact_mut(4))
                .zip(q3.chunks_exact_mut(4))
                .zip(twiddles.chunks_exact(12))
            {
                unsafe {
                    let a0 = _mm256_loadu_ps(a.as_ptr().cast());
                    let tw0 = _mm256_loadu_ps(tw.as_ptr().cast());
                    let tw1 = _mm256_loadu_ps(tw[4..].as_ptr().cast());
                    let tw2 = _mm256_loadu_ps(tw[8..].as_ptr().cast());

                    let b0 = _mm256_fcmul_ps(_mm256_loadu_ps(b.as_ptr().cast()), tw0);
                    let c0 = _mm256_fcmul_ps(_mm256_loadu_ps(c.as_ptr().cast()), tw1);
                    let d0 = _mm256_fcmul_ps(_mm256_loadu_ps(d.as_ptr().cast()), tw2);

                    // radix-4 butterfly
                    let q0t0 = _mm256_add_ps(a0, c0);
                    let q0t1 = _mm256_sub_ps(a0, c0);
                    let q0t2 = _mm256_add_ps(b0, d0);
                    let q0t3 = _mm256_rotate90_ps(_mm256_sub_ps(b0, d0), v_i_multiplier);

                    _mm256_storeu_ps(a.as_mut_ptr().cast(), _mm256_add_ps(q0t0, q0t2));
                    _mm256_storeu_ps(b.as_mut_ptr().cast(), _mm256_add_ps(q0t1, q0t3));
                    _mm256_storeu_ps(c.as_mut_ptr().cast(), _mm256_sub_ps(q0t0, q0t2));
                    _mm256_storeu_ps(d.as_mut_ptr().cast(), _mm256_sub_ps(q0t1, q0t3));
                }
            }
        }
    }
}

impl CombinePass<f32> for AvxFmaRadix4 {
    fn execute(&self, data: &mut [Complex<f32>], twiddles: &[Complex<f32>], length: usize) {
        unsafe { self.execute_f32(data, twiddles, length) }
    }

    fn radix(&self) -> usize {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radix4::tests::check_pass;

    #[test]
    fn test_avx_radix4() {
        if !(std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")) {
            return;
        }
        for direction in [FftDirection::Forward, FftDirection::Inverse] {
            for length in [32usize, 64, 256, 1024] {
                check_pass(&AvxFmaRadix4::new(direction), direction, length, 4);
            }
        }
    }
}
