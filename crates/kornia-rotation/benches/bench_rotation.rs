use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kornia_rotation::{
    Active, EigenSolver, Euler, Extrinsic, Hamilton, Intrinsic, Passive, Quaternion,
    RotationMatrix, XZX, ZYX,
};
use nalgebra::Matrix3;
use rand::Rng;
use std::hint::black_box;

fn bench_euler_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("euler_round_trip");
    let mut rng = rand::rng();

    let angles: [f64; 3] = [rng.random(), rng.random(), rng.random()];
    let intrinsic = Euler::<Intrinsic, ZYX, f64>::new(angles[0], angles[1], angles[2]);
    let extrinsic = Euler::<Extrinsic, XZX, f64>::new(angles[0], angles[1] + 0.1, angles[2]);

    group.bench_function(BenchmarkId::new("intrinsic_zyx_active", ""), |b| {
        b.iter(|| {
            let dcm = RotationMatrix::<Active, f64>::from(black_box(intrinsic));
            Euler::<Intrinsic, ZYX, f64>::from(dcm)
        })
    });

    group.bench_function(BenchmarkId::new("extrinsic_xzx_passive", ""), |b| {
        b.iter(|| {
            let dcm = RotationMatrix::<Passive, f64>::from(black_box(extrinsic));
            Euler::<Extrinsic, XZX, f64>::from(dcm)
        })
    });

    group.finish();
}

fn bench_matrix_to_quaternion(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_to_quaternion");

    let dcm = RotationMatrix::<Active, f32>::from_random();
    let mat = glam::Mat3::from(dcm);

    group.bench_function(BenchmarkId::new("kornia", ""), |b| {
        b.iter(|| Quaternion::<Hamilton, f32>::from(black_box(dcm)))
    });

    group.bench_function(BenchmarkId::new("glam", ""), |b| {
        b.iter(|| glam::Quat::from_mat3(black_box(&mat)))
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let mut rng = rand::rng();

    let noise = Matrix3::from_fn(|_, _| 1e-3 * (rng.random::<f64>() - 0.5));
    let dcm = RotationMatrix::<Active, f64>::from_random();
    let noisy = RotationMatrix::<Active, f64>::from_matrix_unchecked(dcm.matrix() + noise);
    let symmetric = noisy.matrix().transpose() * noisy.matrix();

    group.bench_function(BenchmarkId::new("eigen_solver", ""), |b| {
        b.iter(|| EigenSolver::new(black_box(&symmetric)))
    });

    group.bench_function(BenchmarkId::new("rotation_matrix", ""), |b| {
        b.iter(|| black_box(noisy).normalized())
    });

    group.bench_function(BenchmarkId::new("nalgebra_svd", ""), |b| {
        b.iter(|| black_box(noisy.matrix()).svd(true, true))
    });

    group.finish();
}

fn bench_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation");

    let q0 = Quaternion::<Hamilton, f64>::from_random();
    let q1 = Quaternion::<Hamilton, f64>::from_random();
    let r0 = RotationMatrix::<Active, f64>::from(q0);
    let r1 = RotationMatrix::<Active, f64>::from(q1);

    for t in [0.25, 0.5, 0.75] {
        group.bench_with_input(BenchmarkId::new("slerp", t), &t, |b, &t| {
            b.iter(|| black_box(q0).slerp(black_box(&q1), t))
        });

        group.bench_with_input(BenchmarkId::new("interpolate", t), &t, |b, &t| {
            b.iter(|| black_box(r0).interpolate(black_box(&r1), t))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_euler_round_trip,
    bench_matrix_to_quaternion,
    bench_normalize,
    bench_interpolation
);
criterion_main!(benches);
