use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use bitmorph_dwa::{Direction, KernelIndex, MorphOp, apply_linear_kernel, dilate_brick_dwa, reference};
use bitmorph_test::random_bitmap;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;

fn bench_linear_kernels(c: &mut Criterion) {
    let pix = random_bitmap(WIDTH, HEIGHT, 0.3, 1).unwrap();
    let src = pix.add_border(32, 0).unwrap();
    let mut dst = src.create_template().into_mut();

    let mut group = c.benchmark_group("linear kernels");
    group.throughput(Throughput::Elements(u64::from(WIDTH * HEIGHT)));

    for direction in [Direction::Horizontal, Direction::Vertical] {
        for length in [3u32, 15, 63] {
            let index = KernelIndex::new(direction, MorphOp::Dilate, length).unwrap();
            let id = BenchmarkId::new(format!("{direction:?}"), length);
            group.bench_with_input(id, &index, |b, index| {
                let src_view = src.as_padded(32).unwrap();
                b.iter(|| {
                    let mut dst_view = dst.as_padded_mut(32).unwrap();
                    apply_linear_kernel(&mut dst_view, &src_view, black_box(index.raw())).unwrap();
                })
            });
        }
    }
    group.finish();
}

fn bench_brick(c: &mut Criterion) {
    let pix = random_bitmap(WIDTH / 4, HEIGHT / 4, 0.3, 2).unwrap();

    let mut group = c.benchmark_group("brick 7x7");
    group.sample_size(20);
    group.bench_function("dwa", |b| {
        b.iter(|| black_box(dilate_brick_dwa(black_box(&pix), 7, 7).unwrap()))
    });
    group.bench_function("reference", |b| {
        b.iter(|| {
            black_box(
                reference::brick(&pix, MorphOp::Dilate, 7, 7, Default::default()).unwrap(),
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_linear_kernels, bench_brick);
criterion_main!(benches);
