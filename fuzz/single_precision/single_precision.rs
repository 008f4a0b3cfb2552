#![no_main]

use fftjit::{FftDirection, FftPlan};
use libfuzzer_sys::fuzz_target;
use num_complex::Complex;

#[derive(arbitrary::Arbitrary, Debug)]
struct Target {
    exponent: u8,
    re: f32,
    im: f32,
}

fuzz_target!(|data: Target| {
    if data.exponent > 14 {
        return;
    }
    let size = 1usize << data.exponent;
    if size < 2 {
        assert!(FftPlan::new(size, FftDirection::Forward).is_err());
        return;
    }
    if !data.re.is_finite() || !data.im.is_finite() || data.re.abs() > 1e6 || data.im.abs() > 1e6 {
        return;
    }
    let forward = FftPlan::new(size, FftDirection::Forward).unwrap();
    let mut backward = FftPlan::new(size, FftDirection::Inverse).unwrap();

    let input = (0..size)
        .map(|i| Complex::new(data.re * (i % 7) as f32, data.im - i as f32))
        .collect::<Vec<_>>();
    let mut chunk = vec![Complex::<f32>::default(); size];
    forward.execute(&input, &mut chunk).unwrap();
    backward.execute_in_place(&mut chunk).unwrap();

    let scale = 1. / size as f32;
    let norm = input.iter().map(|c| c.norm_sqr()).sum::<f32>().sqrt().max(1.);
    let error = chunk
        .iter()
        .zip(input.iter())
        .map(|(a, b)| (a * scale - b).norm_sqr())
        .sum::<f32>()
        .sqrt();
    assert!(error / norm < 1e-4, "size {size} error {error} norm {norm}");

    let mut scratch = vec![Complex::default(); forward.scratch_length()];
    forward
        .execute_in_place_with_scratch(&mut chunk, &mut scratch)
        .unwrap();
});
