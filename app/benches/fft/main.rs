/*
 * // Copyright 2024 (c) the Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */
use criterion::{Criterion, criterion_group, criterion_main};
use fftjit::{FftDirection, FftPlan, PlanBuilder, Realization};
use num_complex::Complex;
use rand::Rng;
use rustfft::FftPlanner;

fn random_input(n: usize) -> Vec<Complex<f32>> {
    let mut input = vec![Complex::<f32>::default(); n];
    for z in input.iter_mut() {
        *z = Complex {
            re: rand::rng().random(),
            im: rand::rng().random(),
        };
    }
    input
}

pub fn bench_power_of_two(c: &mut Criterion) {
    for exponent in [4u32, 6, 8, 10, 12, 14, 16] {
        let n = 1usize << exponent;
        let input = random_input(n);

        c.bench_function(format!("fftjit {n}").as_str(), |b| {
            let plan = FftPlan::new(n, FftDirection::Forward).unwrap();
            let mut output = vec![Complex::<f32>::default(); n];
            b.iter(|| {
                plan.execute(&input, &mut output).unwrap();
            })
        });

        c.bench_function(format!("fftjit kernels {n}").as_str(), |b| {
            let plan = PlanBuilder::new()
                .realization(Realization::Kernels)
                .build(n)
                .unwrap();
            let mut output = vec![Complex::<f32>::default(); n];
            b.iter(|| {
                plan.execute(&input, &mut output).unwrap();
            })
        });

        c.bench_function(format!("rustfft {n}").as_str(), |b| {
            let plan = FftPlanner::<f32>::new().plan_fft_forward(n);
            let mut working = input.to_vec();
            let mut output = vec![Complex::<f32>::default(); n];
            let mut scratch = vec![Complex::<f32>::default(); plan.get_outofplace_scratch_len()];
            b.iter(|| {
                plan.process_outofplace_with_scratch(&mut working, &mut output, &mut scratch);
            })
        });
    }
}

pub fn bench_plan_creation(c: &mut Criterion) {
    c.bench_function("fftjit plan 4096", |b| {
        b.iter(|| FftPlan::new(4096, FftDirection::Forward).unwrap())
    });
    c.bench_function("rustfft plan 4096", |b| {
        b.iter(|| FftPlanner::<f32>::new().plan_fft_forward(4096))
    });
}

criterion_group!(benches, bench_power_of_two, bench_plan_creation);
criterion_main!(benches);
