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
//! Naive double precision DFT and error metrics used as the correctness oracle in tests.
use crate::FftDirection;
use crate::util::compute_twiddle;
use num_complex::Complex;

pub(crate) fn reference_dft(input: &[Complex<f32>], direction: FftDirection) -> Vec<Complex<f64>> {
    let len = input.len();
    let twiddles = (0..len)
        .map(|k| compute_twiddle::<f64>(k, len, direction))
        .collect::<Vec<_>>();
    let mut output = vec![Complex::<f64>::default(); len];
    for (k, dst) in output.iter_mut().enumerate() {
        let mut sum = Complex::<f64>::default();
        let mut twiddle_idx = 0usize;
        for src in input.iter() {
            let w = twiddles[twiddle_idx];
            sum += Complex::new(src.re as f64, src.im as f64) * w;
            twiddle_idx += k;
            if twiddle_idx >= len {
                twiddle_idx -= len;
            }
        }
        *dst = sum;
    }
    output
}

/// `‖actual − expected‖₂ / max(‖expected‖₂, 1)`.
pub(crate) fn l2_error(actual: &[Complex<f32>], expected: &[Complex<f64>]) -> f64 {
    assert_eq!(actual.len(), expected.len());
    let mut diff = 0f64;
    let mut norm = 0f64;
    for (a, e) in actual.iter().zip(expected.iter()) {
        let d = Complex::new(a.re as f64, a.im as f64) - *e;
        diff += d.norm_sqr();
        norm += e.norm_sqr();
    }
    diff.sqrt() / norm.sqrt().max(1.)
}

pub(crate) fn random_signal(len: usize) -> Vec<Complex<f32>> {
    (0..len)
        .map(|_| Complex::new(rand::random::<f32>() - 0.5, rand::random::<f32>() - 0.5))
        .collect()
}
