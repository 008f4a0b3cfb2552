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
use crate::avx::butterflies::{bfh4_ps, load_complex, store_complex};
use crate::avx::util::rotate_sign;
use crate::kernels::LeafButterfly;
use crate::FftDirection;
use num_complex::Complex;
use std::arch::x86_64::*;

pub(crate) struct AvxButterfly4 {
    rot_sign: [f32; 8],
}

impl AvxButterfly4 {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Self {
            rot_sign: rotate_sign(fft_direction),
        }
    }

    #[target_feature(enable = "avx2", enable = "fma")]
    unsafe fn execute_f32(&self, input: &[Complex<f32>], permutation: &[u32], output: &mut [Complex<f32>]) {
        unsafe {
            let rot_sign = _mm_loadu_ps(self.rot_sign.as_ptr());

            for (dst, idx) in output.chunks_exact_mut(4).zip(permutation.chunks_exact(4)) {
                let a = load_complex(input, idx[0]);
                let b = load_complex(input, idx[1]);
                let c = load_complex(input, idx[2]);
                let d = load_complex(input, idx[3]);

                let (y0, y1, y2, y3) = bfh4_ps(a, b, c, d, rot_sign);

                _mm_storeu_ps(dst.as_mut_ptr().cast(), _mm_movelh_ps(y0, y1));
                store_complex(dst, 2, y2);
                store_complex(dst, 3, y3);
            }
        }
    }
}

impl LeafButterfly<f32> for AvxButterfly4 {
    fn execute(&self, input: &[Complex<f32>], permutation: &[u32], output: &mut [Complex<f32>]) {
        unsafe { self.execute_f32(input, permutation, output) }
    }

    fn length(&self) -> usize {
        4
    }
}
