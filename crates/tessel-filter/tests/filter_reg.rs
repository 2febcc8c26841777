//! Filter engine regression test
//!
//! Windowed mean and threshold over every partitioning strategy: identity
//! at radius 0, edge darkening, the white-square corner value, binary
//! threshold output, and bit-identical results across partitions.

use tessel_core::PixelGrid;
use tessel_filter::{AggregateFunction, FilterEngine, FilterOptions, PartitionStrategy};
use tessel_test::{RegParams, pattern_gray, uniform_gray};

fn strategies() -> Vec<PartitionStrategy> {
    let mut all = vec![PartitionStrategy::Sequential, PartitionStrategy::Quadrants];
    all.extend([1, 2, 3, 7, 64].map(|n| PartitionStrategy::row_bands(n).expect("bands")));
    all
}

#[test]
fn filter_reg() {
    let mut rp = RegParams::new("filter");

    // --- Test 1: radius 0 is the identity ---
    let pattern = pattern_gray(17, 11);
    for strategy in strategies() {
        let engine = FilterEngine::new(AggregateFunction::mean(0).expect("r=0"), strategy);
        let out = engine.run(&pattern).expect("mean r=0");
        rp.compare_grids(&pattern, &out);
    }

    // --- Test 2: 4x4 white square, r=1 ---
    let white = uniform_gray(4, 4, u16::MAX);
    let engine = FilterEngine::new(
        AggregateFunction::mean(1).expect("r=1"),
        PartitionStrategy::Sequential,
    );
    let out = engine.run(&white).expect("mean r=1");
    rp.compare_values(29126.0, f64::from(out.get(0, 0)), 0.0);
    for (x, y) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        rp.compare_values(65535.0, f64::from(out.get(x, y)), 0.0);
    }
    rp.write_grid(&out).expect("write white r=1");

    // --- Test 3: edge darkening ---
    let white = uniform_gray(20, 20, u16::MAX);
    let engine = FilterEngine::new(
        AggregateFunction::mean(3).expect("r=3"),
        PartitionStrategy::Quadrants,
    );
    let out = engine.run(&white).expect("mean r=3");
    let border_dark = (0..20).all(|i| {
        out.get(i, 0) < u16::MAX
            && out.get(0, i) < u16::MAX
            && out.get(i, 19) < u16::MAX
            && out.get(19, i) < u16::MAX
    });
    let interior_white = (3..17).all(|y| (3..17).all(|x| out.get(x, y) == u16::MAX));
    rp.check(border_dark, "border samples are darkened");
    rp.check(interior_white, "fully in-bounds windows keep max");
    eprintln!("  edge corner={} center={}", out.get(0, 0), out.get(10, 10));

    // --- Test 4: mean is identical across partitions ---
    for (w, h, r) in [(31, 23, 2), (8, 8, 5), (1, 9, 1), (40, 3, 0)] {
        let input = pattern_gray(w, h);
        let mean = AggregateFunction::mean(r).expect("radius");
        let reference = FilterEngine::new(mean, PartitionStrategy::Sequential)
            .run(&input)
            .expect("sequential");
        for strategy in strategies() {
            let out = FilterEngine::new(mean, strategy).run(&input).expect("partitioned");
            rp.compare_grids(&reference, &out);
        }
        let pooled = FilterEngine::with_options(
            mean,
            FilterOptions::with_strategy(PartitionStrategy::Quadrants)
                .threads(3)
                .expect("threads"),
        )
        .run(&input)
        .expect("pooled");
        rp.compare_grids(&reference, &pooled);
        eprintln!("  {}x{} r={} agrees across partitions", w, h, r);
    }

    // --- Test 5: threshold scenario ---
    let input = PixelGrid::from_vec(3, 1, vec![10000u16, 40000, 10000]).expect("3x1");
    let out = FilterEngine::new(AggregateFunction::threshold(32767), PartitionStrategy::Quadrants)
        .run(&input)
        .expect("threshold");
    rp.compare_grids(&PixelGrid::from_vec(3, 1, vec![0u16, 65535, 0]).expect("3x1"), &out);

    // --- Test 6: threshold output is binary ---
    let input = pattern_gray(29, 13);
    for level in [0, 1, 32767, 40000, u16::MAX] {
        for strategy in strategies() {
            let out = FilterEngine::new(AggregateFunction::threshold(level), strategy)
                .run(&input)
                .expect("threshold");
            let binary = out.data().iter().all(|&v| v == 0 || v == u16::MAX);
            rp.check(binary, "threshold output is 0 or 65535");
        }
    }
    let all_black = FilterEngine::new(AggregateFunction::threshold(u16::MAX), PartitionStrategy::Quadrants)
        .run(&input)
        .expect("threshold max");
    rp.check(all_black.data().iter().all(|&v| v == 0), "level 65535 maps all to 0");

    // --- Test 7: threshold on a color source uses premultiplied red ---
    let rgba = PixelGrid::from_fn(3, 1, |x, _| match x {
        0 => tessel_core::Rgba::new(1000, 65535, 65535, 65535),
        1 => tessel_core::Rgba::new(50000, 0, 0, 65535),
        // bright red at half alpha falls below the level
        _ => tessel_core::Rgba::new(50000, 0, 0, 32768),
    })
    .expect("rgba");
    let out = FilterEngine::new(AggregateFunction::default(), PartitionStrategy::Sequential)
        .run(&rgba)
        .expect("threshold rgba");
    rp.compare_values(0.0, f64::from(out.get(0, 0)), 0.0);
    rp.compare_values(65535.0, f64::from(out.get(1, 0)), 0.0);
    rp.compare_values(0.0, f64::from(out.get(2, 0)), 0.0);

    assert!(rp.cleanup(), "filter regression test failed");
}
