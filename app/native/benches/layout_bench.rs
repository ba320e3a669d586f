//! Benchmarks for the hot paths of the tiling core.
//!
//! Run with: `cargo bench -p switchbar`
//!
//! Results are saved to `target/criterion/` with HTML reports.
//!
//! ## Benchmark Groups
//!
//! - `geometry`: Fullscreen and split frames on 1080p and 4K screens
//! - `overlap`: Taskbar-overlap adjustment of a single frame
//! - `groups`: Split-group bookkeeping (create, remove, dissolve)
//! - `rebalance`: One rebalance pass over many groups
//! - `switcher`: Shortcut-key assignment

use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use switchbar_lib::config::{RebalanceConfig, SwitcherConfig, TaskbarConfig, TaskbarPosition};
use switchbar_lib::modules::switcher::{DefaultKeyAssigner, KeyAssigner};
use switchbar_lib::modules::tiling::engine::overlap_adjustment;
use switchbar_lib::modules::tiling::layout::LayoutGeometry;
use switchbar_lib::modules::tiling::rebalance::Rebalancer;
use switchbar_lib::modules::tiling::testing::FakeSurface;
use switchbar_lib::modules::tiling::{Rect, SplitGroups, WindowDescriptor, WindowHandle};

// ============================================================================
// Test Data
// ============================================================================

fn screen_1080p() -> Rect { Rect::new(0.0, 0.0, 1920.0, 1080.0) }

fn screen_4k() -> Rect { Rect::new(0.0, 0.0, 3840.0, 2160.0) }

fn geometry(screen: Rect) -> LayoutGeometry {
    LayoutGeometry::new(screen, TaskbarConfig::default(), 8.0).expect("usable screen")
}

fn handles(count: u64) -> Vec<WindowHandle> { (1..=count).map(WindowHandle::from_raw).collect() }

fn descriptors(count: u64) -> Vec<WindowDescriptor> {
    handles(count)
        .into_iter()
        .map(|h| WindowDescriptor::new(h, "App", format!("Window {h}"), Rect::new(0.0, 0.0, 800.0, 600.0)))
        .collect()
}

// ============================================================================
// Geometry
// ============================================================================

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");

    for (name, screen) in [("1080p", screen_1080p()), ("4k", screen_4k())] {
        let geometry = geometry(screen);

        group.bench_function(BenchmarkId::new("fullscreen", name), |b| {
            b.iter(|| black_box(&geometry).fullscreen_bounds());
        });

        for count in [2_usize, 3, 4, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("split_{name}"), count),
                &count,
                |b, &count| {
                    b.iter(|| black_box(&geometry).split_bounds(black_box(count)));
                },
            );
        }
    }

    group.finish();
}

fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap");
    let geometry = geometry(screen_1080p());
    let band = geometry.taskbar_band();

    group.bench_function("overlapping", |b| {
        let frame = Rect::new(100.0, 600.0, 800.0, 600.0);
        b.iter(|| overlap_adjustment(black_box(frame), band, TaskbarPosition::Bottom, 8.0));
    });

    group.bench_function("clear", |b| {
        let frame = Rect::new(100.0, 100.0, 800.0, 600.0);
        b.iter(|| overlap_adjustment(black_box(frame), band, TaskbarPosition::Bottom, 8.0));
    });

    group.finish();
}

// ============================================================================
// Groups and rebalancing
// ============================================================================

fn bench_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("groups");

    for size in [2_u64, 4, 8] {
        let members = handles(size);
        group.bench_with_input(BenchmarkId::new("create_and_dissolve", size), &members, |b, members| {
            b.iter(|| {
                let mut groups = SplitGroups::new();
                groups.create(black_box(members));
                for handle in members {
                    groups.remove(*handle, true);
                }
                groups
            });
        });
    }

    group.finish();
}

fn bench_rebalance(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebalance");
    let frames = geometry(screen_1080p()).split_bounds(2).expect("two columns fit");

    for pairs in [1_u64, 8, 32] {
        let surface = Arc::new(FakeSurface::full_hd());
        let mut groups = SplitGroups::new();
        for _ in 0..pairs {
            let left = surface.add_window("Left", "left", frames[0]);
            let right = surface.add_window("Right", "right", frames[1]);
            groups.create(&[left, right]);
        }
        let mut rebalancer = Rebalancer::new(&RebalanceConfig::default());
        rebalancer.run(&groups, surface.as_ref(), 8.0, Instant::now());

        group.bench_with_input(BenchmarkId::new("steady_state", pairs), &pairs, |b, _| {
            b.iter(|| rebalancer.run(black_box(&groups), surface.as_ref(), 8.0, Instant::now()));
        });
    }

    group.finish();
}

// ============================================================================
// Switcher
// ============================================================================

fn bench_switcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("switcher");
    let assigner = DefaultKeyAssigner::from_config(&SwitcherConfig::default());

    for count in [4_u64, 16, 64] {
        let windows = descriptors(count);
        group.bench_with_input(BenchmarkId::new("assign", count), &windows, |b, windows| {
            b.iter(|| assigner.assign(black_box(windows)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_geometry,
    bench_overlap,
    bench_groups,
    bench_rebalance,
    bench_switcher,
);
criterion_main!(benches);
