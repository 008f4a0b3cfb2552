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
use crate::kernels::LeafButterfly;
use crate::neon::butterflies::{
    bfh4_f32, load_complex, store_complex, vh_mul_w8_3_f32, vh_mul_w8_f32,
};
use crate::neon::util::{mulh_complex_f32, rotate_sign, vh_rotate90_f32};
use crate::util::compute_twiddle;
use crate::FftDirection;
use num_complex::Complex;
use std::arch::aarch64::*;

pub(crate) struct NeonButterfly16 {
    rot_sign: [f32; 4],
    root2: f32,
    twiddle1: Complex<f32>,
    twiddle3: Complex<f32>,
    twiddle9: Complex<f32>,
}

impl NeonButterfly16 {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Self {
            rot_sign: rotate_sign(fft_direction),
            root2: 0.5f32.sqrt(),
            twiddle1: compute_twiddle(1, 16, fft_direction),
            twiddle3: compute_twiddle(3, 16, fft_direction),
            twiddle9: compute_twiddle(9, 16, fft_direction),
        }
    }
}

impl LeafButterfly<f32> for NeonButterfly16 {
    fn execute(&self, input: &[Complex<f32>], permutation: &[u32], output: &mut [Complex<f32>]) {
        unsafe {
            let rot_sign = vld1_f32(self.rot_sign.as_ptr());
            let tw1 = vld1_f32((&self.twiddle1 as *const Complex<f32>).cast());
            let tw3 = vld1_f32((&self.twiddle3 as *const Complex<f32>).cast());
            let tw9 = vld1_f32((&self.twiddle9 as *const Complex<f32>).cast());

            for (dst, idx) in output.chunks_exact_mut(16).zip(permutation.chunks_exact(16)) {
                let mut u = [vdup_n_f32(0.); 16];
                for (v, &index) in u.iter_mut().zip(idx.iter()) {
                    *v = load_complex(input, index);
                }

                for n2 in 0..4 {
                    let (y0, y1, y2, y3) =
                        bfh4_f32(u[n2], u[n2 + 4], u[n2 + 8], u[n2 + 12], rot_sign);
                    u[n2] = y0;
                    u[n2 + 4] = y1;
                    u[n2 + 8] = y2;
                    u[n2 + 12] = y3;
                }

                u[5] = mulh_complex_f32(u[5], tw1);
                u[9] = vh_mul_w8_f32(u[9], rot_sign, self.root2);
                u[13] = mulh_complex_f32(u[13], tw3);
                u[6] = vh_mul_w8_f32(u[6], rot_sign, self.root2);
                u[10] = vh_rotate90_f32(u[10], rot_sign);
                u[14] = vh_mul_w8_3_f32(u[14], rot_sign, self.root2);
                u[7] = mulh_complex_f32(u[7], tw3);
                u[11] = vh_mul_w8_3_f32(u[11], rot_sign, self.root2);
                u[15] = mulh_complex_f32(u[15], tw9);

                for k1 in 0..4 {
                    let (y0, y1, y2, y3) = bfh4_f32(
                        u[4 * k1],
                        u[4 * k1 + 1],
                        u[4 * k1 + 2],
                        u[4 * k1 + 3],
                        rot_sign,
                    );
                    store_complex(dst, k1, y0);
                    store_complex(dst, k1 + 4, y1);
                    store_complex(dst, k1 + 8, y2);
                    store_complex(dst, k1 + 12, y3);
                }
            }
        }
    }

    fn length(&self) -> usize {
        16
    }
}
