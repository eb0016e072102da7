use roadscape::{Graph, Point, Segment, World, WorldConfig};
use std::time::Instant;

fn build_street_grid(streets: usize, block: f64) -> Graph {
    let mut g = Graph::new();
    let n = streets + 1;
    let at = |i: usize, j: usize| Point::new(i as f64 * block, j as f64 * block);
    for j in 0..n { for i in 0..n { g.try_add_point(at(i, j)); } }
    for j in 0..n {
        for i in 0..streets {
            g.try_add_segment(Segment::new(at(i, j), at(i + 1, j)));
            g.try_add_segment(Segment::new(at(j, i), at(j, i + 1)));
        }
    }
    g
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut streets = 3usize;
    let mut block = 600.0f64;
    let mut runs = 5usize;
    let mut seed = 0u64;
    let mut no_trees = false;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--streets=") { if let Ok(v)=val.parse() { streets=v; } }
        else if let Some(val)=a.strip_prefix("--block=") { if let Ok(v)=val.parse() { block=v; } }
        else if let Some(val)=a.strip_prefix("--runs=") { if let Ok(v)=val.parse() { runs=v; } }
        else if let Some(val)=a.strip_prefix("--seed=") { if let Ok(v)=val.parse() { seed=v; } }
        else if a == "--no-trees" { no_trees = true; }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let config = WorldConfig { seed, trees_enabled: !no_trees, ..WorldConfig::default() };
    let graph = build_street_grid(streets, block);
    let segments = graph.segments().len();
    let mut world = match World::new(graph, config) {
        Ok(w) => w,
        Err(e) => { eprintln!("invalid config: {}", e); std::process::exit(2); }
    };

    // Full regenerations; the unchanged-hash shortcut is timed separately.
    let mut times_ms: Vec<f64> = Vec::with_capacity(runs);
    for _ in 0..runs {
        let t0 = Instant::now();
        world.regenerate();
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let t0 = Instant::now();
    let skipped = !world.generate();
    let skip_ms = t0.elapsed().as_secs_f64() * 1000.0;

    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    println!(
        "segments={} runs={} roads={} borders={} guides={} buildings={} trees={} median_ms={:.3} p90_ms={:.3} skip_ms={:.4} skipped={}",
        segments, runs, world.roads().len(), world.road_borders().len(), world.lane_guides().len(),
        world.buildings().len(), world.trees().len(), med, p90, skip_ms, skipped
    );
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.3} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
