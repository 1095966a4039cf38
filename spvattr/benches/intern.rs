use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use spvattr::{
    Context,
    attributes::IntegerAttr,
    spirv::{
        Capability, Extension, InterfaceVarAbiAttr, StorageClass, TargetEnvAttr, VerCapExtAttr,
        Version,
    },
};

fn bench_hit(c: &mut Criterion) {
    // Every key below is interned before measuring, so only lookups are timed
    let ctx = Context::new();
    InterfaceVarAbiAttr::get(&ctx, 2, 1, Some(StorageClass::Uniform)).unwrap();
    TargetEnvAttr::default_target_env(&ctx);

    c.bench_function("intern_hit_integer", |b| {
        b.iter(|| {
            black_box(IntegerAttr::get_i32(&ctx, black_box(7)));
        })
    });

    c.bench_function("intern_hit_interface_var_abi", |b| {
        b.iter(|| {
            let (set, binding) = (black_box(2), black_box(1));
            let abi = InterfaceVarAbiAttr::get(&ctx, set, binding, Some(StorageClass::Uniform));
            black_box(abi.unwrap());
        })
    });

    c.bench_function("intern_hit_target_env", |b| {
        b.iter(|| {
            black_box(TargetEnvAttr::default_target_env(&ctx));
        })
    });
}

fn bench_miss(c: &mut Criterion) {
    let ctx = Context::new();

    // Fresh integers on each iteration, so every request publishes a record
    let mut next = 0i32;
    c.bench_function("intern_miss_integer", |b| {
        b.iter(|| {
            next = next.wrapping_add(1);
            black_box(IntegerAttr::get_i32(&ctx, next));
        })
    });

    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let capabilities = [
        Capability::Shader,
        Capability::Matrix,
        Capability::Int64,
        Capability::Float16,
    ];
    c.bench_function("intern_mixed_vce", |b| {
        b.iter(|| {
            let version = if rng.random_bool(0.5) { Version::V1_0 } else { Version::V1_5 };
            let count = rng.random_range(0..=capabilities.len());
            let extensions = [Extension::SPV_KHR_multiview];
            let vce = VerCapExtAttr::get(&ctx, version, &capabilities[..count], &extensions);
            black_box(vce.unwrap());
        })
    });
}

criterion_group!(benches, bench_hit, bench_miss);
criterion_main!(benches);
