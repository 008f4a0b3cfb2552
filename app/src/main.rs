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
use fftjit::{FftDirection, PlanBuilder, Realization, capability_description};
use num_complex::Complex;
use rand::Rng;
use rustfft::FftPlanner;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn max_difference(a: &[Complex<f32>], b: &[Complex<f32>]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0f32, f32::max)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", capability_description());

    let mut planner = FftPlanner::<f32>::new();
    for exponent in 1..=16u32 {
        let n = 1usize << exponent;
        let mut input = vec![Complex::<f32>::default(); n];
        for z in input.iter_mut() {
            *z = Complex {
                re: rand::rng().random(),
                im: rand::rng().random(),
            };
        }

        for realization in [Realization::Auto, Realization::Kernels] {
            let plan = PlanBuilder::new()
                .direction(FftDirection::Forward)
                .realization(realization)
                .build(n)
                .unwrap();
            let mut output = vec![Complex::<f32>::default(); n];
            let start = Instant::now();
            plan.execute(&input, &mut output).unwrap();
            let elapsed = start.elapsed();

            let mut reference = input.clone();
            planner.plan_fft_forward(n).process(&mut reference);
            println!(
                "n={n:6} {:?}/{:?} {:?} families={:?} max diff {:e} in {:?}",
                plan.realization(),
                plan.instruction_family(),
                plan.size_class(),
                plan.decomposition().root.families(),
                max_difference(&output, &reference) / n as f32,
                elapsed,
            );
        }
    }
}
