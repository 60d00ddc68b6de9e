//! Performance benchmarks for code generation.
//!
//! Measures lowering of synthetic modules of increasing size. Each module
//! mixes literal loads, message sends, if/else jump chains, guarded blocks
//! and nested closures.
//!
//! ## Profiling with Puffin
//!
//! Run with the `profile-with-puffin` feature to collect scope timings:
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use regcode::ir::Instruction;
use regcode::prelude::*;
use std::hint::black_box;
use std::path::PathBuf;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

/// Initialize puffin profiler.
#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

/// Call at the end of each benchmark iteration to flush profiling data.
#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

fn at(line: u32, kind: InstructionKind) -> Instruction {
    Instruction::new(kind, Location::new(line, 1))
}

/// A small closure body: load a captured local, add a literal, return.
fn closure_body(n: u32) -> CodeObjectIr {
    let mut code = CodeObjectIr::new(format!("closure_{}", n), Location::new(n, 1));
    code.captures = true;
    code.registers = 3;
    code.add_block(BasicBlock::with(vec![
        at(
            n,
            InstructionKind::GetParentLocal {
                register: RegisterId::new(0),
                depth: 1,
                variable: VariableIndex::new(0),
            },
        ),
        at(
            n,
            InstructionKind::SetLiteral {
                register: RegisterId::new(1),
                value: Literal::Integer(n as i64),
            },
        ),
        at(
            n,
            InstructionKind::Binary {
                op: BinaryOp::IntegerAdd,
                register: RegisterId::new(2),
                base: RegisterId::new(0),
                other: RegisterId::new(1),
            },
        ),
        at(
            n,
            InstructionKind::Return {
                block_return: false,
                register: RegisterId::new(2),
            },
        ),
    ]));
    code
}

/// Build a module body with `sections` if/else sections of three blocks
/// each, followed by a join block.
fn synthetic_module(sections: u32) -> ModuleIr {
    let mut body = CodeObjectIr::new("<module>", Location::new(1, 1));
    body.registers = 8;
    body.local_variables = 2;

    for section in 0..sections {
        let line = section * 10;
        let r = RegisterId::new;

        let cond = body.add_block(BasicBlock::with(vec![
            at(
                line,
                InstructionKind::SetLiteral {
                    register: r(0),
                    value: Literal::string(format!("value_{}", section % 16)),
                },
            ),
            at(
                line + 1,
                InstructionKind::SendObjectMessage {
                    register: r(1),
                    receiver: r(0),
                    name: "empty?".to_string(),
                    arguments: vec![],
                },
            ),
            at(line + 2, InstructionKind::GotoNextBlockIfTrue { register: r(1) }),
        ]));

        let then = body.add_block(BasicBlock::with(vec![
            at(
                line + 3,
                InstructionKind::SetBlock {
                    register: r(2),
                    code_object: Box::new(closure_body(section)),
                },
            ),
            at(
                line + 4,
                InstructionKind::RunBlock {
                    register: r(3),
                    block: r(2),
                    arguments: vec![r(0)],
                },
            ),
            at(line + 5, InstructionKind::SkipNextBlock),
        ]));

        let otherwise = body.add_block(BasicBlock::with(vec![at(
            line + 6,
            InstructionKind::SetArray {
                register: r(3),
                values: vec![r(0), r(1)],
            },
        )]));

        body.catch_table.push(CatchEntryIr {
            try_block: then,
            else_block: otherwise,
            register: r(4),
        });
        debug_assert_eq!(cond.ahead(2), otherwise);
    }

    body.add_block(BasicBlock::with(vec![at(
        sections * 10,
        InstructionKind::Return {
            block_return: false,
            register: RegisterId::new(3),
        },
    )]));

    ModuleIr {
        name: "bench".to_string(),
        path: PathBuf::from("bench.rc"),
        body,
    }
}

fn bench_compile_module(c: &mut Criterion) {
    setup_profiler();

    let mut group = c.benchmark_group("compile_module");

    for sections in [10u32, 100, 1000] {
        let module = synthetic_module(sections);
        group.throughput(Throughput::Elements(module.body.instruction_count() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &module,
            |b, module| {
                b.iter(|| {
                    let compiled = regcode::compile_module(black_box(module));
                    end_profiling_frame();
                    black_box(compiled)
                });
            },
        );
    }

    group.finish();
}

fn bench_literal_pool(c: &mut Criterion) {
    let literals: Vec<_> = (0..1000)
        .map(|i| match i % 4 {
            0 => Literal::Integer(i % 100),
            1 => Literal::float((i % 50) as f64 / 2.0),
            2 => Literal::string(format!("name_{}", i % 200)),
            _ => Literal::symbol(format!("sym_{}", i % 10)),
        })
        .collect();

    c.bench_function("literal_pool_intern_1000", |b| {
        b.iter(|| {
            let mut pool = LiteralPool::new();
            for literal in &literals {
                black_box(pool.intern(literal.clone()));
            }
            pool
        });
    });
}

criterion_group!(benches, bench_compile_module, bench_literal_pool);
criterion_main!(benches);
