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
use crate::neon::util::{rotate_sign, vh_rotate90_f32};
use crate::FftDirection;
use num_complex::Complex;
use std::arch::aarch64::*;

pub(crate) struct NeonButterfly8 {
    rot_sign: [f32; 4],
    root2: f32,
}

impl NeonButterfly8 {
    pub(crate) fn new(fft_direction: FftDirection) -> Self {
        Self {
            rot_sign: rotate_sign(fft_direction),
            root2: 0.5f32.sqrt(),
        }
    }
}

impl LeafButterfly<f32> for NeonButterfly8 {
    fn execute(&self, input: &[Complex<f32>], permutation: &[u32], output: &mut [Complex<f32>]) {
        unsafe {
            let rot_sign = vld1_f32(self.rot_sign.as_ptr());

            for (dst, idx) in output.chunks_exact_mut(8).zip(permutation.chunks_exact(8)) {
                let (e0, e1, e2, e3) = bfh4_f32(
                    load_complex(input, idx[0]),
                    load_complex(input, idx[2]),
                    load_complex(input, idx[4]),
                    load_complex(input, idx[6]),
                    rot_sign,
                );
                let (o0, mut o1, mut o2, mut o3) = bfh4_f32(
                    load_complex(input, idx[1]),
                    load_complex(input, idx[3]),
                    load_complex(input, idx[5]),
                    load_complex(input, idx[7]),
                    rot_sign,
                );

                o1 = vh_mul_w8_f32(o1, rot_sign, self.root2);
                o2 = vh_rotate90_f32(o2, rot_sign);
                o3 = vh_mul_w8_3_f32(o3, rot_sign, self.root2);

                store_complex(dst, 0, vadd_f32(e0, o0));
                store_complex(dst, 4, vsub_f32(e0, o0));
                store_complex(dst, 1, vadd_f32(e1, o1));
                store_complex(dst, 5, vsub_f32(e1, o1));
                store_complex(dst, 2, vadd_f32(e2, o2));
                store_complex(dst, 6, vsub_f32(e2, o2));
                store_complex(dst, 3, vadd_f32(e3, o3));
                store_complex(dst, 7, vsub_f32(e3, o3));
            }
        }
    }

    fn length(&self) -> usize {
        8
    }
}
