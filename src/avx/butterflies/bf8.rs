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
use crate::avx::butterflies::{
    bfh4_ps, load_complex, mul_w8_3_ps, mul_w8_ps, store_complex,
};
use crate::avx::util::{_mm_rotate90_ps, rotate_sign};
use crate::kernels::LeafButterfly;
use crate::FftDirection;
use num_complex::Complex;
use std::arch::x86_64::*;

pub(crate) struct AvxButterfly8 {
    rot_sign: [f32; 8],
    root2: f32,
}

impl AvxButterfly8 {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Self {
            rot_sign: rotate_sign(fft_direction),
            root2: 0.5f32.sqrt(),
        }
    }

    #[target_feature(enable = "avx2", enable = "fma")]
    unsafe fn execute_f32(&self, input: &[Complex<f32>], permutation: &[u32], output: &mut [Complex<f32>]) {
        unsafe {
            let rot_sign = _mm_loadu_ps(self.rot_sign.as_ptr());
            let root2 = _mm_set1_ps(self.root2);

            for (dst, idx) in output.chunks_exact_mut(8).zip(permutation.chunks_exact(8)) {
                let (e0, e1, e2, e3) = bfh4_ps(
                    load_complex(input, idx[0]),
                    load_complex(input, idx[2]),
                    load_complex(input, idx[4]),
                    load_complex(input, idx[6]),
                    rot_sign,
                );
                let (o0, mut o1, mut o2, mut o3) = bfh4_ps(
                    load_complex(input, idx[1]),
                    load_complex(input, idx[3]),
                    load_complex(input, idx[5]),
                    load_complex(input, idx[7]),
                    rot_sign,
                );

                o1 = mul_w8_ps(o1, rot_sign, root2);
                o2 = _mm_rotate90_ps(o2, rot_sign);
                o3 = mul_w8_3_ps(o3, rot_sign, root2);

                _mm_storeu_ps(
                    dst.as_mut_ptr().cast(),
                    _mm_movelh_ps(_mm_add_ps(e0, o0), _mm_add_ps(e1, o1)),
                );
                _mm_storeu_ps(
                    dst[2..].as_mut_ptr().cast(),
                    _mm_movelh_ps(_mm_add_ps(e2, o2), _mm_add_ps(e3, o3)),
                );
                store_complex(dst, 4, _mm_sub_ps(e0, o0));
                store_complex(dst, 5, _mm_sub_ps(e1, o1));
                store_complex(dst, 6, _mm_sub_ps(e2, o2));
                store_complex(dst, 7, _mm_sub_ps(e3, o3));
            }
        }
    }
}

impl LeafButterfly<f32> for AvxButterfly8 {
    fn execute(&self, input: &[Complex<f32>], permutation: &[u32], output: &mut [Complex<f32>]) {
        unsafe { self.execute_f32(input, permutation, output) }
    }

    fn length(&self) -> usize {
        8
    }
}
