//! DWA brick morphology regression test
//!
//! Brick DWA results are compared with the pixel-level reference for a
//! range of sizes, including sizes above 63 that are split into chained
//! runs, under both boundary conditions. Opening and closing are checked
//! against reference compositions and their algebraic properties.

use bitmorph_core::Bitmap;
use bitmorph_dwa::{
    BoundaryCondition, DwaConfig, MorphOp, close_brick_dwa, dilate_brick_dwa, erode_brick_dwa,
    morph_brick_dwa, open_brick_dwa, reference,
};
use bitmorph_test::{RegParams, random_blocks};

fn test_image() -> Bitmap {
    random_blocks(150, 140, 60, 24, 17).expect("random_blocks")
}

#[test]
fn dwamorph1_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("dwamorph1");
    let pixs = test_image();

    let sizes = [
        (3, 3),
        (5, 5),
        (7, 7),
        (3, 1),
        (1, 3),
        (11, 1),
        (1, 11),
        (2, 2),
        (4, 6),
        (63, 2),
        (64, 1),
        (1, 70),
        (130, 3),
    ];

    for &(hsize, vsize) in &sizes {
        eprintln!("Testing DWA vs reference: {}x{}", hsize, vsize);

        for boundary in [BoundaryCondition::Asymmetric, BoundaryCondition::Symmetric] {
            let config = DwaConfig::default().with_boundary(boundary);
            for op in [MorphOp::Dilate, MorphOp::Erode] {
                let dwa = morph_brick_dwa(&pixs, op, hsize, vsize, &config).expect("dwa");
                let expected =
                    reference::brick(&pixs, op, hsize, vsize, boundary).expect("reference");
                let same = rp.compare_bitmaps(&expected, &dwa);
                eprintln!(
                    "  {:?} {:?}: {}",
                    op,
                    boundary,
                    if same { "MATCH" } else { "DIFFER" }
                );
            }
        }

        // Convenience wrappers use the asymmetric condition
        let dil = dilate_brick_dwa(&pixs, hsize, vsize).expect("dilate_brick_dwa");
        let ero = erode_brick_dwa(&pixs, hsize, vsize).expect("erode_brick_dwa");
        rp.check(pixs.is_subset_of(&dil).expect("subset"), "dilation is extensive");
        rp.check(ero.is_subset_of(&pixs).expect("subset"), "erosion is anti-extensive");
    }

    assert!(rp.cleanup(), "dwamorph1 regression test failed");
}

#[test]
fn dwamorph1_open_close_reg() {
    let mut rp = RegParams::new("dwamorph1_open_close");
    let pixs = test_image();
    let asym = BoundaryCondition::Asymmetric;

    for &(hsize, vsize) in &[(3, 3), (5, 1), (1, 6), (8, 5), (21, 2)] {
        // --- Opening: reference erosion followed by reference dilation ---
        let opened = open_brick_dwa(&pixs, hsize, vsize).expect("open_brick_dwa");
        let eroded = reference::brick(&pixs, MorphOp::Erode, hsize, vsize, asym).expect("ref");
        let expected = reference::brick(&eroded, MorphOp::Dilate, hsize, vsize, asym).expect("ref");
        rp.compare_bitmaps(&expected, &opened);

        // --- Closing: reference on an image padded far enough that the
        // dilation never reaches the edge ---
        let closed = close_brick_dwa(&pixs, hsize, vsize).expect("close_brick_dwa");
        let pad = hsize.max(vsize);
        let padded = pixs.add_border(pad, 0).expect("add_border");
        let dilated = reference::brick(&padded, MorphOp::Dilate, hsize, vsize, asym).expect("ref");
        let expected = reference::brick(&dilated, MorphOp::Erode, hsize, vsize, asym)
            .expect("ref")
            .remove_border(pad)
            .expect("remove_border");
        rp.compare_bitmaps(&expected, &closed);

        // --- Properties ---
        rp.check(opened.is_subset_of(&pixs).expect("subset"), "opening is anti-extensive");
        rp.check(pixs.is_subset_of(&closed).expect("subset"), "closing is extensive");
        let reopened = open_brick_dwa(&opened, hsize, vsize).expect("open_brick_dwa");
        rp.compare_bitmaps(&opened, &reopened);
        let reclosed = close_brick_dwa(&closed, hsize, vsize).expect("close_brick_dwa");
        rp.compare_bitmaps(&closed, &reclosed);
    }

    // Large bricks still order open <= image <= close
    let opened = open_brick_dwa(&pixs, 70, 65).expect("open_brick_dwa");
    let closed = close_brick_dwa(&pixs, 70, 65).expect("close_brick_dwa");
    rp.check(opened.is_subset_of(&pixs).expect("subset"), "large opening");
    rp.check(pixs.is_subset_of(&closed).expect("subset"), "large closing");

    assert!(rp.cleanup(), "dwamorph1_open_close regression test failed");
}

#[cfg(feature = "rayon")]
#[test]
fn dwamorph1_parallel_reg() {
    let mut rp = RegParams::new("dwamorph1_parallel");
    let pixs = test_image();
    let sequential = DwaConfig::default();
    let parallel = DwaConfig::default().with_parallel(true);

    for &(hsize, vsize) in &[(5, 9), (64, 3), (2, 100)] {
        for op in [MorphOp::Dilate, MorphOp::Erode] {
            let a = morph_brick_dwa(&pixs, op, hsize, vsize, &sequential).expect("sequential");
            let b = morph_brick_dwa(&pixs, op, hsize, vsize, &parallel).expect("parallel");
            rp.compare_bitmaps(&a, &b);
        }
    }

    assert!(rp.cleanup(), "dwamorph1_parallel regression test failed");
}
