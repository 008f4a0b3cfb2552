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
use crate::capabilities::CpuCapabilities;
use crate::err::try_vec;
use crate::kernels::{combine_kernel, leaf_kernel, CombinePass, LeafButterfly};
use crate::planner::{plan, CombinationStep, Decomposition, InstructionFamily, SizeClass};
use crate::twiddles::TwiddleTable;
use crate::{FftDirection, FftError, FftExecutor};
use num_complex::Complex;

/// How a plan's routine is realized.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Realization {
    /// Generated code where the target supports it, precompiled kernels otherwise.
    #[default]
    Auto,
    /// Precompiled leaf and combination kernels only.
    Kernels,
    /// Generated code; building fails if it cannot be produced.
    Jit,
}

struct KernelChain {
    leaf: Box<dyn LeafButterfly<f32>>,
    passes: Vec<(Box<dyn CombinePass<f32>>, CombinationStep)>,
    permutation: Vec<u32>,
}

impl KernelChain {
    fn new(decomposition: &Decomposition, direction: FftDirection) -> Result<KernelChain, FftError> {
        let isa = decomposition.instruction_family;
        let root = &decomposition.root;
        Ok(KernelChain {
            leaf: leaf_kernel(root.leaf(), isa, direction),
            passes: root
                .steps()
                .into_iter()
                .map(|step| (combine_kernel(step.family, isa, direction), step))
                .collect(),
            permutation: root.input_permutation()?,
        })
    }

    fn execute(&self, input: &[Complex<f32>], output: &mut [Complex<f32>], twiddles: &TwiddleTable) {
        self.leaf.execute(input, &self.permutation, output);
        for (level, (pass, step)) in self.passes.iter().enumerate() {
            pass.execute(output, twiddles.level(level), step.length);
        }
    }
}

enum Routine {
    Kernels(KernelChain),
    #[cfg(all(target_arch = "aarch64", feature = "jit"))]
    Jit(crate::jit::JitRoutine),
}

impl Routine {
    fn realization(&self) -> Realization {
        match self {
            Routine::Kernels(_) => Realization::Kernels,
            #[cfg(all(target_arch = "aarch64", feature = "jit"))]
            Routine::Jit(_) => Realization::Jit,
        }
    }

    fn execute(&self, input: &[Complex<f32>], output: &mut [Complex<f32>], twiddles: &TwiddleTable) {
        match self {
            Routine::Kernels(chain) => chain.execute(input, output, twiddles),
            #[cfg(all(target_arch = "aarch64", feature = "jit"))]
            Routine::Jit(routine) => routine.execute(input, output, twiddles),
        }
    }
}

/// Immutable, reusable transform of one length and direction.
///
/// Building performs all planning, table generation and code emission; executing
/// afterwards never allocates and never fails on correctly sized buffers.
pub struct FftPlan {
    // dropped first: executable code, then the workspace
    routine: Routine,
    workspace: Vec<Complex<f32>>,
    twiddles: TwiddleTable,
    length: usize,
    direction: FftDirection,
    decomposition: Decomposition,
    capabilities: CpuCapabilities,
}

/// Builder for [`FftPlan`] with non-default realization or instruction family.
#[derive(Debug, Copy, Clone, Default)]
pub struct PlanBuilder {
    direction: FftDirection,
    realization: Realization,
    instruction_family: Option<InstructionFamily>,
}

impl PlanBuilder {
    pub fn new() -> PlanBuilder {
        PlanBuilder::default()
    }

    pub fn direction(mut self, direction: FftDirection) -> PlanBuilder {
        self.direction = direction;
        self
    }

    pub fn realization(mut self, realization: Realization) -> PlanBuilder {
        self.realization = realization;
        self
    }

    /// Forces kernels of `family`. Ignored, with a warning, when the host or the
    /// enabled features cannot run it.
    ///
    /// Under [`Realization::Auto`] an override selects kernels. Generated code always
    /// targets NEON, so a [`Realization::Jit`] plan reports [`InstructionFamily::Neon`].
    pub fn instruction_family(mut self, family: InstructionFamily) -> PlanBuilder {
        self.instruction_family = Some(family);
        self
    }

    pub fn build(&self, length: usize) -> Result<FftPlan, FftError> {
        let capabilities = CpuCapabilities::detect();
        let mut decomposition = plan(length, capabilities)?;
        if let Some(family) = self.instruction_family {
            if family.is_available(capabilities) {
                decomposition.instruction_family = family;
            } else {
                tracing::warn!(
                    requested = ?family,
                    selected = ?decomposition.instruction_family,
                    "instruction family is not available on this host"
                );
            }
        }

        let direction = self.direction;
        let (routine, twiddles) = match self.realization {
            Realization::Kernels => kernel_routine(&decomposition, direction)?,
            Realization::Jit => jit_routine(&decomposition, direction)?,
            Realization::Auto if self.instruction_family.is_some() => {
                kernel_routine(&decomposition, direction)?
            }
            Realization::Auto => match jit_routine(&decomposition, direction) {
                Ok(built) => built,
                Err(FftError::AllocationFailure(reason)) => {
                    if jit_supported(length) {
                        tracing::warn!(length, %reason, "code generation failed, using kernels");
                    }
                    kernel_routine(&decomposition, direction)?
                }
                Err(err) => return Err(err),
            },
        };
        if routine.realization() == Realization::Jit {
            decomposition.instruction_family = InstructionFamily::Neon;
        }
        let workspace = try_vec![Complex::<f32>::default(); length];

        tracing::debug!(
            length,
            %direction,
            size_class = ?SizeClass::of(length),
            families = ?decomposition.root.families(),
            leaf = ?decomposition.root.leaf(),
            instruction_family = ?decomposition.instruction_family,
            realization = ?routine.realization(),
            twiddles = twiddles.len(),
            "built fft plan"
        );

        Ok(FftPlan {
            routine,
            workspace,
            twiddles,
            length,
            direction,
            decomposition,
            capabilities,
        })
    }
}

fn kernel_routine(
    decomposition: &Decomposition,
    direction: FftDirection,
) -> Result<(Routine, TwiddleTable), FftError> {
    let twiddles = TwiddleTable::generate(
        &decomposition.root,
        direction,
        decomposition.instruction_family.vector_width(),
    )?;
    let chain = KernelChain::new(decomposition, direction)?;
    Ok((Routine::Kernels(chain), twiddles))
}

fn jit_supported(length: usize) -> bool {
    cfg!(all(target_arch = "aarch64", feature = "jit")) && jit_length_supported(length)
}

#[cfg(feature = "jit")]
fn jit_length_supported(length: usize) -> bool {
    length <= crate::jit::MAX_JIT_LENGTH
}

#[cfg(not(feature = "jit"))]
fn jit_length_supported(_: usize) -> bool {
    false
}

#[cfg(all(target_arch = "aarch64", feature = "jit"))]
fn jit_routine(
    decomposition: &Decomposition,
    direction: FftDirection,
) -> Result<(Routine, TwiddleTable), FftError> {
    let length = decomposition.root.length();
    if !jit_length_supported(length) {
        tracing::debug!(length, "length exceeds generated code limits, using kernels");
        return kernel_routine(decomposition, direction);
    }
    // generated loops consume twiddles two columns at a time
    let twiddles = TwiddleTable::generate(&decomposition.root, direction, 2)?;
    let routine = crate::jit::JitRoutine::compile(&decomposition.root, direction, &twiddles)?;
    tracing::trace!(length, bytes = routine.code_size(), "plan uses generated code");
    Ok((Routine::Jit(routine), twiddles))
}

#[cfg(not(all(target_arch = "aarch64", feature = "jit")))]
fn jit_routine(
    _: &Decomposition,
    _: FftDirection,
) -> Result<(Routine, TwiddleTable), FftError> {
    Err(FftError::AllocationFailure(
        "code generation is not available for this target".to_string(),
    ))
}

impl FftPlan {
    /// Plans a transform of `length` points with the default configuration.
    pub fn new(length: usize, direction: FftDirection) -> Result<FftPlan, FftError> {
        PlanBuilder::new().direction(direction).build(length)
    }

    /// Transforms `input` into `output`, both exactly [`FftPlan::length`] long.
    pub fn execute(&self, input: &[Complex<f32>], output: &mut [Complex<f32>]) -> Result<(), FftError> {
        if input.len() != self.length {
            return Err(FftError::InvalidOutOfPlaceLength(self.length, input.len()));
        }
        if output.len() != self.length {
            return Err(FftError::InvalidOutOfPlaceLength(self.length, output.len()));
        }
        self.routine.execute(input, output, &self.twiddles);
        Ok(())
    }

    /// In-place transform through the plan's own workspace.
    pub fn execute_in_place(&mut self, data: &mut [Complex<f32>]) -> Result<(), FftError> {
        if data.len() != self.length {
            return Err(FftError::InvalidInPlaceLength(self.length, data.len()));
        }
        self.workspace.copy_from_slice(data);
        self.routine.execute(&self.workspace, data, &self.twiddles);
        Ok(())
    }

    /// In-place transform through caller scratch of at least [`FftPlan::scratch_length`]
    /// values, so a shared plan can serve several threads.
    pub fn execute_in_place_with_scratch(
        &self,
        data: &mut [Complex<f32>],
        scratch: &mut [Complex<f32>],
    ) -> Result<(), FftError> {
        if data.len() != self.length {
            return Err(FftError::InvalidInPlaceLength(self.length, data.len()));
        }
        if scratch.len() < self.length {
            return Err(FftError::ScratchBufferIsTooSmall(scratch.len(), self.length));
        }
        let scratch = &mut scratch[..self.length];
        scratch.copy_from_slice(data);
        self.routine.execute(scratch, data, &self.twiddles);
        Ok(())
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> FftDirection {
        self.direction
    }

    pub fn scratch_length(&self) -> usize {
        self.length
    }

    pub fn size_class(&self) -> SizeClass {
        SizeClass::of(self.length)
    }

    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    pub fn instruction_family(&self) -> InstructionFamily {
        self.decomposition.instruction_family
    }

    /// Capability snapshot the plan was built against.
    pub fn capabilities(&self) -> CpuCapabilities {
        self.capabilities
    }

    /// Realization actually in use; never [`Realization::Auto`].
    pub fn realization(&self) -> Realization {
        self.routine.realization()
    }

    pub fn twiddles(&self) -> &TwiddleTable {
        &self.twiddles
    }
}

impl Drop for FftPlan {
    fn drop(&mut self) {
        tracing::trace!(length = self.length, direction = %self.direction, "releasing fft plan");
    }
}

impl FftExecutor<f32> for FftPlan {
    fn execute(&self, input: &[Complex<f32>], output: &mut [Complex<f32>]) -> Result<(), FftError> {
        FftPlan::execute(self, input, output)
    }

    fn execute_in_place_with_scratch(
        &self,
        data: &mut [Complex<f32>],
        scratch: &mut [Complex<f32>],
    ) -> Result<(), FftError> {
        FftPlan::execute_in_place_with_scratch(self, data, scratch)
    }

    fn direction(&self) -> FftDirection {
        self.direction
    }

    fn length(&self) -> usize {
        self.length
    }

    fn scratch_length(&self) -> usize {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dft::{l2_error, random_signal, reference_dft};
    use crate::planner::KernelFamily;
    use rustfft::FftPlanner;

    /// Builders for every realization this host can run.
    fn builders() -> Vec<PlanBuilder> {
        let mut builders = vec![
            PlanBuilder::new(),
            PlanBuilder::new().realization(Realization::Kernels),
            PlanBuilder::new()
                .realization(Realization::Kernels)
                .instruction_family(InstructionFamily::Scalar),
        ];
        if cfg!(all(target_arch = "aarch64", feature = "jit")) {
            builders.push(PlanBuilder::new().realization(Realization::Jit));
        }
        builders
    }

    fn transform(builder: PlanBuilder, direction: FftDirection, input: &[Complex<f32>]) -> Vec<Complex<f32>> {
        let plan = builder.direction(direction).build(input.len()).unwrap();
        let mut output = vec![Complex::<f32>::default(); input.len()];
        plan.execute(input, &mut output).unwrap();
        output
    }

    fn to_f64(values: &[Complex<f32>]) -> Vec<Complex<f64>> {
        values
            .iter()
            .map(|c| Complex::new(c.re as f64, c.im as f64))
            .collect()
    }

    #[test]
    fn test_round_trip() {
        for builder in builders() {
            for exponent in 1..=12u32 {
                let length = 1usize << exponent;
                let input = random_signal(length);
                let spectrum = transform(builder, FftDirection::Forward, &input);
                let restored = transform(builder, FftDirection::Inverse, &spectrum)
                    .iter()
                    .map(|c| c.unscale(length as f32))
                    .collect::<Vec<_>>();
                let error = l2_error(&restored, &to_f64(&input));
                assert!(error < 1e-5, "round trip {length} {builder:?} error {error}");
            }
        }
    }

    #[test]
    fn test_impulse_response() {
        for builder in builders() {
            for exponent in 1..=12u32 {
                let length = 1usize << exponent;
                for direction in [FftDirection::Forward, FftDirection::Inverse] {
                    let mut input = vec![Complex::<f32>::default(); length];
                    input[1] = Complex::new(1., 0.);
                    let output = transform(builder, direction, &input);
                    let expected = (0..length)
                        .map(|k| {
                            let angle = direction.sign() as f64
                                * 2.
                                * std::f64::consts::PI
                                * k as f64
                                / length as f64;
                            Complex::new(angle.cos(), angle.sin())
                        })
                        .collect::<Vec<_>>();
                    let error = l2_error(&output, &expected);
                    assert!(error < 1e-5, "impulse {length} {direction} error {error}");
                }
            }
        }
    }

    #[test]
    fn test_linearity() {
        let a = Complex::new(0.75f32, -1.25);
        let b = Complex::new(-2.0f32, 0.5);
        for length in [8usize, 64, 512, 2048] {
            let x = random_signal(length);
            let y = random_signal(length);
            let combined = x
                .iter()
                .zip(y.iter())
                .map(|(x, y)| a * x + b * y)
                .collect::<Vec<_>>();
            let fx = transform(PlanBuilder::new(), FftDirection::Forward, &x);
            let fy = transform(PlanBuilder::new(), FftDirection::Forward, &y);
            let fc = transform(PlanBuilder::new(), FftDirection::Forward, &combined);
            let expected = fx
                .iter()
                .zip(fy.iter())
                .map(|(x, y)| {
                    let v = a * x + b * y;
                    Complex::new(v.re as f64, v.im as f64)
                })
                .collect::<Vec<_>>();
            let error = l2_error(&fc, &expected);
            assert!(error < 1e-5, "linearity {length} error {error}");
        }
    }

    #[test]
    fn test_dc_input() {
        for builder in builders() {
            for length in [2usize, 4, 8, 16, 32, 256, 1024] {
                for direction in [FftDirection::Forward, FftDirection::Inverse] {
                    let mut input = vec![Complex::<f32>::default(); length];
                    input[0] = Complex::new(1., 0.);
                    let output = transform(builder, direction, &input);
                    for value in output.iter() {
                        assert!((value.re - 1.).abs() < 1e-6 && value.im.abs() < 1e-6);
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_input_is_exactly_zero() {
        for builder in builders() {
            for exponent in 1..=12u32 {
                for direction in [FftDirection::Forward, FftDirection::Inverse] {
                    let input = vec![Complex::<f32>::default(); 1 << exponent];
                    let output = transform(builder, direction, &input);
                    assert!(
                        output
                            .iter()
                            .all(|c| c.re.to_bits() == 0 && c.im.to_bits() == 0),
                        "{} {direction} produced a signed or nonzero value",
                        1 << exponent
                    );
                }
            }
        }
    }

    #[test]
    fn test_parity_coverage_against_reference() {
        let mut families = std::collections::HashSet::new();
        for builder in builders() {
            for length in [4usize, 8, 16, 32, 64, 128, 256] {
                for direction in [FftDirection::Forward, FftDirection::Inverse] {
                    let plan = builder.direction(direction).build(length).unwrap();
                    families.extend(plan.decomposition().root.families());
                    let input = random_signal(length);
                    let mut output = vec![Complex::<f32>::default(); length];
                    plan.execute(&input, &mut output).unwrap();
                    let error = l2_error(&output, &reference_dft(&input, direction));
                    assert!(error < 1e-5, "{length} {direction} {builder:?} error {error}");
                }
            }
        }
        for family in [KernelFamily::EE, KernelFamily::EO, KernelFamily::OE, KernelFamily::OO] {
            assert!(families.contains(&family));
        }
    }

    #[test]
    fn test_repeated_execution_is_bit_identical() {
        for builder in builders() {
            let plan = builder.build(1024).unwrap();
            let input = random_signal(1024);
            let mut first = vec![Complex::<f32>::default(); 1024];
            let mut second = vec![Complex::<f32>::default(); 1024];
            plan.execute(&input, &mut first).unwrap();
            plan.execute(&input, &mut second).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_rejects_unsupported_sizes() {
        for length in [0usize, 1, 3, 48] {
            assert!(matches!(
                FftPlan::new(length, FftDirection::Forward),
                Err(FftError::UnsupportedSize(n)) if n == length
            ));
        }
    }

    #[test]
    fn test_matches_rustfft() {
        let mut planner = FftPlanner::<f32>::new();
        for builder in builders() {
            for exponent in 1..=14u32 {
                let length = 1usize << exponent;
                for direction in [FftDirection::Forward, FftDirection::Inverse] {
                    let input = random_signal(length);
                    let output = transform(builder, direction, &input);
                    let oracle = match direction {
                        FftDirection::Forward => planner.plan_fft_forward(length),
                        FftDirection::Inverse => planner.plan_fft_inverse(length),
                    };
                    let mut expected = input.clone();
                    oracle.process(&mut expected);
                    let error = l2_error(&output, &to_f64(&expected));
                    assert!(error < 1e-5, "{length} {direction} {builder:?} error {error}");
                }
            }
        }
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        for builder in builders() {
            for length in [2usize, 16, 128, 4096] {
                let mut plan = builder.build(length).unwrap();
                let input = random_signal(length);
                let mut expected = vec![Complex::<f32>::default(); length];
                plan.execute(&input, &mut expected).unwrap();

                let mut data = input.clone();
                plan.execute_in_place(&mut data).unwrap();
                assert_eq!(data, expected);

                let mut data = input.clone();
                let mut scratch = vec![Complex::<f32>::default(); plan.scratch_length() + 3];
                plan.execute_in_place_with_scratch(&mut data, &mut scratch).unwrap();
                assert_eq!(data, expected);
            }
        }
    }

    #[test]
    fn test_buffer_length_errors() {
        let mut plan = FftPlan::new(64, FftDirection::Forward).unwrap();
        let input = vec![Complex::<f32>::default(); 64];
        let mut short = vec![Complex::<f32>::default(); 32];
        assert_eq!(
            plan.execute(&input, &mut short),
            Err(FftError::InvalidOutOfPlaceLength(64, 32))
        );
        assert_eq!(
            plan.execute(&short, &mut input.clone()),
            Err(FftError::InvalidOutOfPlaceLength(64, 32))
        );
        assert_eq!(
            plan.execute_in_place(&mut short),
            Err(FftError::InvalidInPlaceLength(64, 32))
        );
        let mut data = input.clone();
        assert_eq!(
            plan.execute_in_place_with_scratch(&mut data, &mut short),
            Err(FftError::ScratchBufferIsTooSmall(32, 64))
        );
    }

    #[test]
    fn test_shared_plan_across_threads() {
        let plan = std::sync::Arc::new(FftPlan::new(512, FftDirection::Forward).unwrap());
        let input = random_signal(512);
        let mut expected = vec![Complex::<f32>::default(); 512];
        plan.execute(&input, &mut expected).unwrap();
        let handles = (0..4)
            .map(|_| {
                let plan = plan.clone();
                let input = input.clone();
                std::thread::spawn(move || {
                    let mut data = input;
                    let mut scratch = vec![Complex::<f32>::default(); plan.scratch_length()];
                    plan.execute_in_place_with_scratch(&mut data, &mut scratch).unwrap();
                    data
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_plan_metadata() {
        let plan = PlanBuilder::new()
            .direction(FftDirection::Inverse)
            .realization(Realization::Kernels)
            .build(256)
            .unwrap();
        assert_eq!(plan.length(), 256);
        assert_eq!(plan.direction(), FftDirection::Inverse);
        assert_eq!(plan.size_class(), SizeClass::Large);
        assert_eq!(plan.realization(), Realization::Kernels);
        assert_eq!(plan.capabilities(), CpuCapabilities::detect());
        assert_eq!(plan.twiddles().levels(), 3);
        assert_eq!(
            plan.instruction_family(),
            InstructionFamily::select(CpuCapabilities::detect())
        );
        let executor: &dyn FftExecutor<f32> = &plan;
        assert_eq!(executor.length(), 256);
        assert_eq!(executor.scratch_length(), 256);
        assert_ne!(plan.realization(), Realization::Auto);
    }

    #[test]
    fn test_jit_realization_policy() {
        let result = PlanBuilder::new().realization(Realization::Jit).build(64);
        if cfg!(all(target_arch = "aarch64", feature = "jit")) {
            assert_eq!(result.unwrap().realization(), Realization::Jit);
        } else {
            assert!(matches!(result, Err(FftError::AllocationFailure(_))));
            let auto = PlanBuilder::new().build(64).unwrap();
            assert_eq!(auto.realization(), Realization::Kernels);
        }
    }

    #[test]
    fn test_family_reports_generated_code() {
        for family in [
            InstructionFamily::Scalar,
            InstructionFamily::Neon,
            InstructionFamily::AvxFma,
        ] {
            let plan = PlanBuilder::new().instruction_family(family).build(64).unwrap();
            assert_eq!(plan.realization(), Realization::Kernels);
            if family.is_available(CpuCapabilities::detect()) {
                assert_eq!(plan.instruction_family(), family);
            }
        }
        let plan = PlanBuilder::new().build(64).unwrap();
        if plan.realization() == Realization::Jit {
            assert_eq!(plan.instruction_family(), InstructionFamily::Neon);
        }
        if cfg!(all(target_arch = "aarch64", feature = "jit")) {
            let plan = PlanBuilder::new()
                .realization(Realization::Jit)
                .instruction_family(InstructionFamily::Scalar)
                .build(64)
                .unwrap();
            assert_eq!(plan.realization(), Realization::Jit);
            assert_eq!(plan.instruction_family(), InstructionFamily::Neon);
        }
    }

    #[test]
    fn test_unavailable_family_falls_back() {
        let detected = InstructionFamily::select(CpuCapabilities::detect());
        for family in [InstructionFamily::Neon, InstructionFamily::AvxFma] {
            let plan = PlanBuilder::new()
                .realization(Realization::Kernels)
                .instruction_family(family)
                .build(32)
                .unwrap();
            if family.is_available(CpuCapabilities::detect()) {
                assert_eq!(plan.instruction_family(), family);
            } else {
                assert_eq!(plan.instruction_family(), detected);
            }
        }
    }
}
