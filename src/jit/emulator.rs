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
//! Interpreter for the instruction subset the generator emits, so generated routines can
//! be checked on any host.
use super::codegen::{generate, JitTables};
use crate::capabilities::CpuCapabilities;
use crate::dft::{l2_error, random_signal, reference_dft};
use crate::planner::plan;
use crate::twiddles::TwiddleTable;
use crate::FftDirection;
use num_complex::Complex;

const RETURN_ADDRESS: u64 = 0xDEAD_0000;
const INPUT_BASE: u64 = 0x1000_0000;
const OUTPUT_BASE: u64 = 0x2000_0000;
const TWIDDLE_BASE: u64 = 0x3000_0000;
const GATHER_BASE: u64 = 0x4000_0000;
const CONSTANT_BASE: u64 = 0x5000_0000;
const STACK_BASE: u64 = 0x7000_0000;
const STACK_SIZE: u64 = 4096;

struct Region {
    base: u64,
    bytes: Vec<u8>,
}

pub(crate) struct Emulator {
    x: [u64; 31],
    sp: u64,
    v: [[u32; 4]; 32],
    zero: bool,
    regions: Vec<Region>,
    steps: usize,
}

fn field(word: u32, shift: u32, bits: u32) -> u32 {
    (word >> shift) & ((1 << bits) - 1)
}

fn sign_extend(value: u32, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value as i64) << shift) >> shift
}

impl Emulator {
    pub(crate) fn new() -> Emulator {
        Emulator {
            x: [0; 31],
            sp: 0,
            v: [[0; 4]; 32],
            zero: false,
            regions: Vec::new(),
            steps: 0,
        }
    }

    pub(crate) fn map(&mut self, base: u64, bytes: Vec<u8>) {
        self.regions.push(Region { base, bytes });
    }

    pub(crate) fn region(&self, base: u64) -> &[u8] {
        &self
            .regions
            .iter()
            .find(|r| r.base == base)
            .expect("unmapped region")
            .bytes
    }

    fn memory(&mut self, addr: u64, len: usize) -> &mut [u8] {
        for region in self.regions.iter_mut() {
            if addr >= region.base && addr + len as u64 <= region.base + region.bytes.len() as u64 {
                let start = (addr - region.base) as usize;
                return &mut region.bytes[start..start + len];
            }
        }
        panic!("access of {len} bytes at {addr:#x} is out of bounds");
    }

    fn load(&mut self, addr: u64, len: usize) -> u128 {
        let mut raw = [0u8; 16];
        raw[..len].copy_from_slice(self.memory(addr, len));
        u128::from_le_bytes(raw)
    }

    fn store(&mut self, addr: u64, len: usize, value: u128) {
        self.memory(addr, len)
            .copy_from_slice(&value.to_le_bytes()[..len]);
    }

    /// Register 31 as a base address or immediate arithmetic operand is `sp`.
    fn base(&self, reg: u32) -> u64 {
        if reg == 31 { self.sp } else { self.x[reg as usize] }
    }

    fn set_base(&mut self, reg: u32, value: u64) {
        if reg == 31 {
            self.sp = value;
        } else {
            self.x[reg as usize] = value;
        }
    }

    /// Register 31 as a data operand is `xzr`.
    fn reg(&self, reg: u32) -> u64 {
        if reg == 31 { 0 } else { self.x[reg as usize] }
    }

    fn set_reg(&mut self, reg: u32, value: u64) {
        if reg != 31 {
            self.x[reg as usize] = value;
        }
    }

    pub(crate) fn set_x(&mut self, reg: usize, value: u64) {
        self.x[reg] = value;
    }

    fn vector(&self, reg: u32) -> u128 {
        let lanes = self.v[reg as usize];
        lanes
            .iter()
            .rev()
            .fold(0u128, |acc, &lane| (acc << 32) | lane as u128)
    }

    fn set_vector(&mut self, reg: u32, value: u128) {
        for (i, lane) in self.v[reg as usize].iter_mut().enumerate() {
            *lane = (value >> (32 * i)) as u32;
        }
    }

    fn low_half(&self, reg: usize) -> u64 {
        self.vector(reg as u32) as u64
    }

    fn set_lanes(&mut self, reg: u32, lanes: [u32; 4], full: bool) {
        let mut lanes = lanes;
        if !full {
            lanes[2] = 0;
            lanes[3] = 0;
        }
        self.v[reg as usize] = lanes;
    }

    fn float_op(&mut self, word: u32, full: bool, op: impl Fn(f32, f32, f32) -> f32) {
        let (d, n, m) = (field(word, 0, 5), field(word, 5, 5), field(word, 16, 5));
        let mut lanes = [0u32; 4];
        for (i, lane) in lanes.iter_mut().enumerate() {
            let acc = f32::from_bits(self.v[d as usize][i]);
            let a = f32::from_bits(self.v[n as usize][i]);
            let b = f32::from_bits(self.v[m as usize][i]);
            *lane = op(acc, a, b).to_bits();
        }
        self.set_lanes(d, lanes, full);
    }

    fn permute(&mut self, word: u32, full: bool, pick: impl Fn(&[u32; 4], &[u32; 4]) -> [u32; 4]) {
        let (d, n, m) = (field(word, 0, 5), field(word, 5, 5), field(word, 16, 5));
        let lanes = pick(&self.v[n as usize], &self.v[m as usize]);
        self.set_lanes(d, lanes, full);
    }

    /// Runs `code` from its first word until it returns to the sentinel link address.
    pub(crate) fn run(&mut self, code: &[u32]) {
        self.x[30] = RETURN_ADDRESS;
        let mut pc = 0usize;
        loop {
            self.steps += 1;
            assert!(self.steps < 100_000_000, "runaway routine");
            let word = code[pc];
            pc += 1;
            let full = field(word, 30, 1) == 1;
            let rd = field(word, 0, 5);
            let rn = field(word, 5, 5);
            let rm = field(word, 16, 5);

            if word == 0xD65F_03C0 {
                assert_eq!(self.x[30], RETURN_ADDRESS, "return through a clobbered link register");
                return;
            }
            match word & 0xFFC0_0000 {
                0xA980_0000 | 0x6D80_0000 => {
                    let offset = sign_extend(field(word, 15, 7), 7) * 8;
                    let addr = self.base(rn).wrapping_add(offset as u64);
                    let rt2 = field(word, 10, 5);
                    let (a, b) = if word & 0x0400_0000 != 0 {
                        (self.low_half(rd as usize), self.low_half(rt2 as usize))
                    } else {
                        (self.reg(rd), self.reg(rt2))
                    };
                    self.store(addr, 8, a as u128);
                    self.store(addr + 8, 8, b as u128);
                    self.set_base(rn, addr);
                    continue;
                }
                0xA8C0_0000 | 0x6CC0_0000 => {
                    let addr = self.base(rn);
                    let rt2 = field(word, 10, 5);
                    let a = self.load(addr, 8);
                    let b = self.load(addr + 8, 8);
                    if word & 0x0400_0000 != 0 {
                        self.set_vector(rd, a);
                        self.set_vector(rt2, b);
                    } else {
                        self.set_reg(rd, a as u64);
                        self.set_reg(rt2, b as u64);
                    }
                    let offset = sign_extend(field(word, 15, 7), 7) * 8;
                    self.set_base(rn, addr.wrapping_add(offset as u64));
                    continue;
                }
                0x3DC0_0000 | 0xFD40_0000 | 0xFD00_0000 => {
                    let size = if word & 0xFFC0_0000 == 0x3DC0_0000 { 16 } else { 8 };
                    let addr = self.base(rn) + field(word, 10, 12) as u64 * size as u64;
                    if word & 0xFFC0_0000 == 0xFD00_0000 {
                        let value = self.vector(rd) as u64;
                        self.store(addr, 8, value as u128);
                    } else {
                        let value = self.load(addr, size);
                        self.set_vector(rd, value);
                    }
                    continue;
                }
                0x9100_0000 => {
                    let value = self.base(rn).wrapping_add(field(word, 10, 12) as u64);
                    self.set_base(rd, value);
                    continue;
                }
                0xF100_0000 => {
                    let value = self.base(rn).wrapping_sub(field(word, 10, 12) as u64);
                    self.zero = value == 0;
                    self.set_reg(rd, value);
                    continue;
                }
                _ => {}
            }
            match word & 0xFF80_0000 {
                0xD280_0000 => {
                    let shift = 16 * field(word, 21, 2);
                    self.set_reg(rd, (field(word, 5, 16) as u64) << shift);
                    continue;
                }
                0xF280_0000 => {
                    let shift = 16 * field(word, 21, 2);
                    let kept = self.reg(rd) & !(0xFFFFu64 << shift);
                    self.set_reg(rd, kept | (field(word, 5, 16) as u64) << shift);
                    continue;
                }
                _ => {}
            }
            if word & 0xFF00_0010 == 0x5400_0000 {
                assert_eq!(word & 0xF, 1, "only b.ne is emitted");
                if !self.zero {
                    let target = (pc - 1) as i64 + sign_extend(field(word, 5, 19), 19);
                    pc = target as usize;
                }
                continue;
            }
            if word & 0xFFE0_FC00 == 0x8B00_0000 {
                self.set_reg(rd, self.reg(rn).wrapping_add(self.reg(rm)));
                continue;
            }
            if word & 0xFFE0_FFE0 == 0xAA00_03E0 {
                self.set_reg(rd, self.reg(rm));
                continue;
            }
            match word & 0xFFE0_0C00 {
                0xB840_0400 | 0x3CC0_0400 | 0x3C80_0400 => {
                    let addr = self.base(rn);
                    match word & 0xFFE0_0C00 {
                        0xB840_0400 => {
                            let value = self.load(addr, 4);
                            self.set_reg(rd, value as u64);
                        }
                        0x3CC0_0400 => {
                            let value = self.load(addr, 16);
                            self.set_vector(rd, value);
                        }
                        _ => {
                            let value = self.vector(rd);
                            self.store(addr, 16, value);
                        }
                    }
                    let offset = sign_extend(field(word, 12, 9), 9);
                    self.set_base(rn, addr.wrapping_add(offset as u64));
                    continue;
                }
                _ => {}
            }
            if word & 0xFFE0_FC00 == 0xFC60_6800 {
                let addr = self.base(rn).wrapping_add(self.reg(rm));
                let value = self.load(addr, 8);
                self.set_vector(rd, value);
                continue;
            }
            match word & 0xBFFF_FC00 {
                0x2EA0_F800 => {
                    self.float_op(word, full, |_, a, _| -a);
                    continue;
                }
                0x0EA0_0800 => {
                    self.permute(word, full, |n, _| [n[1], n[0], n[3], n[2]]);
                    continue;
                }
                _ => {}
            }
            match word & 0xBFE0_FC00 {
                0x0E20_D400 => self.float_op(word, full, |_, a, b| a + b),
                0x0EA0_D400 => self.float_op(word, full, |_, a, b| a - b),
                0x2E20_DC00 => self.float_op(word, full, |_, a, b| a * b),
                0x0E20_CC00 => self.float_op(word, full, |acc, a, b| a.mul_add(b, acc)),
                0x0EA0_CC00 => self.float_op(word, full, |acc, a, b| (-a).mul_add(b, acc)),
                0x2E20_1C00 => self.permute(word, full, |n, m| {
                    [n[0] ^ m[0], n[1] ^ m[1], n[2] ^ m[2], n[3] ^ m[3]]
                }),
                0x0E80_1800 if full => self.permute(word, full, |n, m| [n[0], n[2], m[0], m[2]]),
                0x0E80_5800 if full => self.permute(word, full, |n, m| [n[1], n[3], m[1], m[3]]),
                0x0E80_2800 => self.permute(word, full, |n, m| [n[0], m[0], n[2], m[2]]),
                0x0E80_6800 => self.permute(word, full, |n, m| [n[1], m[1], n[3], m[3]]),
                _ => panic!("unsupported instruction {word:#010x} at word {}", pc - 1),
            }
        }
    }
}

fn complex_bytes(values: &[Complex<f32>]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|c| [c.re.to_le_bytes(), c.im.to_le_bytes()])
        .flatten()
        .collect()
}

fn bytes_complex(bytes: &[u8]) -> Vec<Complex<f32>> {
    bytes
        .chunks_exact(8)
        .map(|c| {
            Complex::new(
                f32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                f32::from_le_bytes([c[4], c[5], c[6], c[7]]),
            )
        })
        .collect()
}

fn emulate(input: &[Complex<f32>], direction: FftDirection) -> Vec<Complex<f32>> {
    emulate_buffers(input, direction).1
}

/// Emits the routine for `input.len()` and interprets it; returns the input and output
/// regions as the routine left them.
fn emulate_buffers(
    input: &[Complex<f32>],
    direction: FftDirection,
) -> (Vec<Complex<f32>>, Vec<Complex<f32>>) {
    let root = plan(input.len(), CpuCapabilities::empty()).unwrap().root;
    let twiddles = TwiddleTable::generate(&root, direction, 2).unwrap();
    let code = generate(&root, &twiddles).unwrap();
    let tables = JitTables::new(&root, direction).unwrap();

    let mut machine = Emulator::new();
    machine.map(INPUT_BASE, complex_bytes(input));
    machine.map(OUTPUT_BASE, vec![0xFF; input.len() * 8]);
    machine.map(TWIDDLE_BASE, complex_bytes(twiddles.as_slice()));
    machine.map(
        GATHER_BASE,
        tables.gather_offsets.iter().flat_map(|o| o.to_le_bytes()).collect(),
    );
    machine.map(
        CONSTANT_BASE,
        tables.constants.iter().flat_map(|c| c.to_le_bytes()).collect(),
    );
    machine.map(STACK_BASE, vec![0; STACK_SIZE as usize]);
    machine.set_x(0, INPUT_BASE);
    machine.set_x(1, OUTPUT_BASE);
    machine.set_x(2, TWIDDLE_BASE);
    machine.set_x(3, GATHER_BASE);
    machine.set_x(4, CONSTANT_BASE);
    machine.set_x(29, 0xF00D);
    machine.sp = STACK_BASE + STACK_SIZE;
    for reg in 8..16u32 {
        machine.set_vector(reg, 0x1111_1111_1111_1111u128 * reg as u128);
    }

    machine.run(&code);

    assert_eq!(machine.sp, STACK_BASE + STACK_SIZE);
    assert_eq!(machine.x[29], 0xF00D);
    for reg in 8..16usize {
        assert_eq!(
            machine.low_half(reg),
            0x1111_1111_1111_1111u64 * reg as u64,
            "d{reg} not restored"
        );
    }
    (
        bytes_complex(machine.region(INPUT_BASE)),
        bytes_complex(machine.region(OUTPUT_BASE)),
    )
}

#[test]
fn test_generated_routine_matches_reference() {
    for exponent in 1..=12u32 {
        let length = 1usize << exponent;
        for direction in [FftDirection::Forward, FftDirection::Inverse] {
            let input = random_signal(length);
            let output = emulate(&input, direction);
            let error = l2_error(&output, &reference_dft(&input, direction));
            assert!(error < 1e-5, "length {length} {direction} error {error}");
        }
    }
}

#[test]
fn test_generated_routine_leaves_input_untouched() {
    for length in [2usize, 16, 32, 256] {
        for direction in [FftDirection::Forward, FftDirection::Inverse] {
            let input = random_signal(length);
            let (after, _) = emulate_buffers(&input, direction);
            let expected = complex_bytes(&input);
            let actual = complex_bytes(&after);
            assert_eq!(actual, expected, "length {length} {direction} wrote its input");
        }
    }
}

#[test]
fn test_generated_zero_input_is_positive_zero() {
    for exponent in 1..=10u32 {
        for direction in [FftDirection::Forward, FftDirection::Inverse] {
            let input = vec![Complex::<f32>::default(); 1 << exponent];
            let output = emulate(&input, direction);
            assert!(complex_bytes(&output).iter().all(|b| *b == 0));
        }
    }
}

#[test]
fn test_generated_impulse() {
    let mut input = vec![Complex::<f32>::default(); 64];
    input[0] = Complex::new(1., 0.);
    let output = emulate(&input, FftDirection::Forward);
    assert!(output.iter().all(|c| *c == Complex::new(1., 0.)));
}
