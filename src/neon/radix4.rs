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
use crate::neon::util::{mul_complex_f32, rotate_sign, v_rotate90_f32};
use crate::FftDirection;
use num_complex::Complex;
use std::arch::aarch64::*;

pub(crate) struct NeonRadix4 {
    rot_sign: [f32; 4],
}

impl NeonRadix4 {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        NeonRadix4 {
            rot_sign: rotate_sign(fft_direction),
        }
    }
}

impl CombinePass<f32> for NeonRadix4 {
    fn execute(&self, data: &mut [Complex<f32>], twiddles: &[Complex<f32>], length: usize) {
        let quarter = length / 4;
        let v_i_multiplier = unsafe { vld1q_f32(self.rot_sign.as_ptr()) };

        for block in data.chunks_exact_mut(length) {
            let (q0, rest) = block.split_at_mut(quarter);
            let (q1, rest) = rest.split_at_mut(quarter);
            let (q2, q3) = rest.split_at_mut(quarter);

            for ((((a, b), c), d), tw) in q0
                .chunks_exact_mut(2)
                .zip(q1.chunks_exact_mut(2))
                .zip(q2.chunks_exact_mut(2))
                .zip(q3.chunks_exact_mut(2))
                .zip(twiddles.chunks_exact(6))
            {
                unsafe {
                    let a0 = vld1q_f32(a.as_ptr().cast());
                    let tw0 = vld1q_f32(tw.as_ptr().cast());
                    let tw1 = vld1q_f32(tw[2..].as_ptr().cast());
                    let tw2 = vld1q_f32(tw[4..].as_ptr().cast());

                    let b0 = mul_complex_f32(vld1q_f32(b.as_ptr().cast()), tw0);
                    let c0 = mul_complex_f32(vld1q_f32(c.as_ptr().cast()), tw1);
                    let d0 = mul_complex_f32(vld1q_f32(d.as_ptr().cast()), tw2);

                    // radix-4 butterfly
                    let q0t0 = vaddq_f32(a0, c0);
                    let q0t1 = vsubq_f32(a0, c0);
                    let q0t2 = vaddq_f32(b0, d0);
                    let q0t3 = v_rotate90_f32(vsubq_f32(b0, d0), v_i_multiplier);

                    vst1q_f32(a.as_mut_ptr().cast(), vaddq_f32(q0t0, q0t2));
                    vst1q_f32(b.as_mut_ptr().cast(), vaddq_f32(q0t1, q0t3));
                    vst1q_f32(c.as_mut_ptr().cast(), vsubq_f32(q0t0, q0t2));
                    vst1q_f32(d.as_mut_ptr().cast(), vsubq_f32(q0t1, q0t3));
                }
            }
        }
    }

    fn radix(&self) -> usize {
        4
    }
}
