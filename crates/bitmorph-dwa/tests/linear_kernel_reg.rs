//! Linear kernel regression test
//!
//! Every tabulated kernel is checked against the pixel-level reference,
//! then the algebraic properties of dilation and erosion are verified:
//! duality, monotonicity, identity on constant images, and equivalence of
//! the horizontal and vertical compositors under transposition.

use bitmorph_core::Bitmap;
use bitmorph_dwa::{
    BoundaryCondition, Direction, DwaConfig, KERNEL_COUNT, KernelIndex, LINEAR_KERNELS,
    LinearRun, MorphOp, apply_linear_kernel, morph_linear_dwa, reference,
};
use bitmorph_test::{RegParams, random_bitmap, random_blocks, single_pixel, solid_bitmap};

const MARGIN: u32 = 32;

/// Run one tabulated kernel on `pix`, with `outside` filling the margin.
fn run_index(pix: &Bitmap, index: u32, outside: u32) -> Bitmap {
    let src = pix.add_border(MARGIN, outside).expect("add_border");
    let mut dst = src.create_template().into_mut();
    apply_linear_kernel(
        &mut dst.as_padded_mut(MARGIN).expect("dst view"),
        &src.as_padded(MARGIN).expect("src view"),
        index,
    )
    .expect("apply_linear_kernel");
    Bitmap::from(dst).remove_border(MARGIN).expect("remove_border")
}

fn index(direction: Direction, op: MorphOp, length: u32) -> u32 {
    KernelIndex::new(direction, op, length).expect("kernel index").raw()
}

#[test]
fn linear_kernel_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("linear_kernel");

    // Width not a multiple of 32 so the last word of each row is partial
    let pix = random_bitmap(77, 70, 0.35, 11).expect("random_bitmap");

    // --- Window correctness for all 248 kernels, both margin values ---
    for raw in 0..KERNEL_COUNT {
        let kernel = LINEAR_KERNELS[raw as usize];
        for outside in [0, 1] {
            let expected = reference::linear(&pix, &kernel, outside);
            let actual = run_index(&pix, raw, outside);
            if !rp.compare_bitmaps(&expected, &actual) {
                eprintln!("  kernel {raw} ({kernel:?}), outside {outside}");
            }
        }
    }

    // --- Length 64 through the generic routine ---
    for direction in [Direction::Horizontal, Direction::Vertical] {
        for op in [MorphOp::Dilate, MorphOp::Erode] {
            let kernel = LinearRun::new(direction, 64).expect("run").kernel(op);
            let actual = morph_linear_dwa(&pix, &kernel, &DwaConfig::default()).expect("linear");
            let expected = reference::linear(&pix, &kernel, 0);
            rp.compare_bitmaps(&expected, &actual);
        }
    }

    assert!(rp.cleanup(), "linear_kernel regression test failed");
}

#[test]
fn linear_kernel_duality_reg() {
    let mut rp = RegParams::new("linear_kernel_duality");
    let pix = random_blocks(100, 80, 40, 12, 5).expect("random_blocks");
    let inverted = pix.invert();
    let symmetric = DwaConfig::default().with_boundary(BoundaryCondition::Symmetric);

    // erode(X, W) == !dilate(!X, W) once the outside values are complementary
    for n in 0..KERNEL_COUNT / 2 {
        let dilate = &LINEAR_KERNELS[(2 * n) as usize];
        let erode = &LINEAR_KERNELS[(2 * n + 1) as usize];
        assert_eq!(dilate.window, erode.window);
        let eroded = morph_linear_dwa(&pix, erode, &symmetric).expect("erode");
        let dual = morph_linear_dwa(&inverted, dilate, &symmetric)
            .expect("dilate")
            .invert();
        rp.compare_bitmaps(&eroded, &dual);
    }

    assert!(rp.cleanup(), "linear_kernel_duality regression test failed");
}

#[test]
fn linear_kernel_monotonicity_reg() {
    let mut rp = RegParams::new("linear_kernel_monotonicity");
    let x = random_bitmap(90, 60, 0.2, 3).expect("random_bitmap");
    let y = x.or(&random_bitmap(90, 60, 0.2, 4).expect("random_bitmap")).expect("or");
    assert!(x.is_subset_of(&y).expect("subset"));

    for raw in (0..KERNEL_COUNT).step_by(3) {
        for outside in [0, 1] {
            let fx = run_index(&x, raw, outside);
            let fy = run_index(&y, raw, outside);
            rp.check(fx.is_subset_of(&fy).expect("subset"), &format!("kernel {raw}"));
        }
    }

    assert!(rp.cleanup(), "linear_kernel_monotonicity regression test failed");
}

#[test]
fn linear_kernel_identity_reg() {
    let mut rp = RegParams::new("linear_kernel_identity");
    let zeros = Bitmap::new(70, 33).expect("new");
    let ones = solid_bitmap(70, 33).expect("solid");

    // L = 2 has window [0, 1]
    for direction in [Direction::Horizontal, Direction::Vertical] {
        for op in [MorphOp::Dilate, MorphOp::Erode] {
            let raw = index(direction, op, 2);
            rp.compare_bitmaps(&zeros, &run_index(&zeros, raw, 0));
            rp.compare_bitmaps(&ones, &run_index(&ones, raw, 1));
        }
    }

    assert!(rp.cleanup(), "linear_kernel_identity regression test failed");
}

#[test]
fn linear_kernel_direction_reg() {
    let mut rp = RegParams::new("linear_kernel_direction");
    let pix = random_bitmap(83, 61, 0.3, 21).expect("random_bitmap");
    let transposed = pix.transpose();

    for length in [2, 3, 4, 17, 32, 33, 62, 63] {
        for op in [MorphOp::Dilate, MorphOp::Erode] {
            let horizontal = run_index(&pix, index(Direction::Horizontal, op, length), 0);
            let vertical = run_index(&transposed, index(Direction::Vertical, op, length), 0);
            rp.compare_bitmaps(&horizontal, &vertical.transpose());
        }
    }

    assert!(rp.cleanup(), "linear_kernel_direction regression test failed");
}

#[test]
fn linear_kernel_scenarios_reg() {
    let mut rp = RegParams::new("linear_kernel_scenarios");
    let dilate3 = index(Direction::Horizontal, MorphOp::Dilate, 3);
    let erode3 = index(Direction::Horizontal, MorphOp::Erode, 3);

    // A: one pixel at 32 spreads to 31..=33 across the word boundary
    let pix = single_pixel(64, 1, 32, 0).expect("single_pixel");
    let out = run_index(&pix, dilate3, 0);
    let expected = Bitmap::from_ascii(&format!("{}xxx{}", ".".repeat(31), ".".repeat(30)))
        .expect("ascii");
    rp.compare_bitmaps(&expected, &out);

    // B: erosion keeps a solid row solid, and a hole at 32 grows to 31..=33
    let ones = solid_bitmap(64, 1).expect("solid");
    rp.compare_bitmaps(&ones, &run_index(&ones, erode3, 1));
    let holed = ones.xor(&pix).expect("xor");
    let out = run_index(&holed, erode3, 1);
    rp.compare_bitmaps(&expected.invert(), &out);

    // C: vertical L = 2 dilation of a solid 32x32 block stays solid
    let block = solid_bitmap(32, 32).expect("solid");
    let out = run_index(&block, index(Direction::Vertical, MorphOp::Dilate, 2), 0);
    rp.compare_bitmaps(&block, &out);

    assert!(rp.cleanup(), "linear_kernel_scenarios regression test failed");
}
