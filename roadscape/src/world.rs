//! Procedural layout: turns the road graph into a scene.
//!
//! A generation cycle rebuilds, in order:
//! 1. one [`Road`] envelope per graph segment,
//! 2. road borders, the union of the road polygons,
//! 3. lane guides, the union of half-width envelopes,
//! 4. buildings, laid along the union of wide guide envelopes,
//! 5. trees, by rejection sampling around roads and buildings.
//!
//! Cycles are driven by [`World::generate`], which compares the graph hash
//! with the one seen at the end of the previous cycle and does nothing when
//! they match.
//!
//! Trees are the only randomized output. They come from a `ChaCha8Rng`
//! seeded by [`WorldConfig::seed`], so the same sequence of edits produces
//! the same forest.

use crate::config::WorldConfig;
use crate::error::ConfigError;
use crate::geometry::math::{add, distance, scale};
use crate::geometry::tolerance::{kind_of_random, lerp};
use crate::graph::Graph;
use crate::hash::{combine_sorted, ContentHash};
use crate::items::{Building, Road, Tree};
use crate::markings::{Marking, MarkingKind, SnapTarget};
use crate::primitives::{bbox_of, Envelope, Point, Polygon, Segment};
use crate::render::{Canvas, Color, Drawable, LineStyle};
use flat_spatial::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Trees must be within this many radii of a road or building.
const TREE_PADDING: f64 = 2.0;

pub struct World {
    graph: Graph,
    config: WorldConfig,
    rng: ChaCha8Rng,
    roads: Vec<Road>,
    road_borders: Vec<Segment>,
    lane_guides: Vec<Segment>,
    buildings: Vec<Building>,
    trees: Vec<Tree>,
    markings: Vec<Marking>,
    /// Graph hash at the end of the last cycle.
    last_hash: Option<u64>,
    /// Combined hash of roads and footprints the current trees were placed around.
    illegal_hash: Option<u64>,
    trees_stale: bool,
}

impl World {
    pub fn new(graph: Graph, config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(World::build(graph, config))
    }

    pub fn with_defaults(graph: Graph) -> Self {
        World::build(graph, WorldConfig::default())
    }

    fn build(graph: Graph, config: WorldConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World {
            graph,
            config,
            rng,
            roads: Vec::new(),
            road_borders: Vec::new(),
            lane_guides: Vec::new(),
            buildings: Vec::new(),
            trees: Vec::new(),
            markings: Vec::new(),
            last_hash: None,
            illegal_hash: None,
            trees_stale: false,
        };
        world.generate();
        world
    }

    // Accessors
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable graph access for editors. Changes are picked up by the next
    /// [`World::generate`].
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn road_borders(&self) -> &[Segment] {
        &self.road_borders
    }

    pub fn lane_guides(&self) -> &[Segment] {
        &self.lane_guides
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn markings(&self) -> &[Marking] {
        &self.markings
    }

    /// Current graph hash.
    pub fn hash(&self) -> u64 {
        self.graph.hash()
    }

    pub fn trees_enabled(&self) -> bool {
        self.config.trees_enabled
    }

    pub fn enable_trees(&mut self) {
        self.config.trees_enabled = true;
        self.trees_stale = true;
    }

    pub fn disable_trees(&mut self) {
        self.config.trees_enabled = false;
        self.trees_stale = true;
    }

    /// Empty the graph and drop every marking.
    pub fn dispose(&mut self) {
        self.graph.dispose();
        self.markings.clear();
    }

    // Generation
    /// Regenerate if the graph changed since the last cycle. Returns whether
    /// any work was done.
    pub fn generate(&mut self) -> bool {
        let hash = self.graph.hash();
        if self.last_hash == Some(hash) && !self.trees_stale {
            log::trace!("graph {:016x} unchanged, skipping generation", hash);
            return false;
        }
        self.rebuild(hash);
        true
    }

    /// Regenerate unconditionally.
    pub fn regenerate(&mut self) {
        let hash = self.graph.hash();
        self.rebuild(hash);
    }

    fn rebuild(&mut self, hash: u64) {
        self.roads = self.generate_roads();
        let mut road_polys: Vec<Polygon> = self.roads.iter().map(|r| r.envelope.poly.clone()).collect();
        self.road_borders = Polygon::union(&mut road_polys);
        self.lane_guides = self.generate_lane_guides();
        self.buildings = self.generate_buildings();
        if self.config.trees_enabled {
            self.generate_trees();
        } else {
            self.trees.clear();
            self.illegal_hash = None;
        }
        self.trees_stale = false;
        self.last_hash = Some(hash);
        log::debug!(
            "generated world {:016x}: {} roads, {} borders, {} guides, {} buildings, {} trees",
            hash,
            self.roads.len(),
            self.road_borders.len(),
            self.lane_guides.len(),
            self.buildings.len(),
            self.trees.len()
        );
    }

    fn generate_roads(&self) -> Vec<Road> {
        let cfg = &self.config;
        self.graph
            .segments()
            .iter()
            .enumerate()
            .filter_map(|(i, seg)| match Road::new(*seg, cfg.road_width, cfg.road_roundness, i) {
                Ok(road) => Some(road),
                Err(e) => {
                    log::warn!("segment {} has no road: {}", i, e);
                    None
                }
            })
            .collect()
    }

    /// Envelope polygons around every graph segment, skipping those that
    /// cannot be built.
    fn envelopes(&self, width: f64, roundness: u32) -> Vec<Polygon> {
        self.graph
            .segments()
            .iter()
            .filter_map(|seg| match Envelope::new(*seg, width, roundness) {
                Ok(env) => Some(env.poly),
                Err(e) => {
                    log::warn!("skipping envelope around {:?}: {}", seg, e);
                    None
                }
            })
            .collect()
    }

    fn generate_lane_guides(&self) -> Vec<Segment> {
        let mut polys = self.envelopes(self.config.road_width / 2.0, self.config.guide_roundness);
        Polygon::union(&mut polys)
    }

    fn generate_buildings(&self) -> Vec<Building> {
        let cfg = &self.config;
        if self.graph.segments().is_empty() {
            return Vec::new();
        }
        let reach = cfg.road_width + cfg.building_width + 2.0 * cfg.building_spacing;
        let mut polys = self.envelopes(reach, cfg.guide_roundness);
        let guides: Vec<Segment> = Polygon::union(&mut polys)
            .into_iter()
            .filter(|s| s.length() >= cfg.building_min_length)
            .collect();

        let supports: Vec<Segment> = guides.iter().flat_map(|g| building_supports(g, cfg)).collect();

        let bases: Vec<Polygon> = supports
            .iter()
            .filter_map(|support| {
                let jitter = kind_of_random(support.p1.x * support.p2.y, 11.0);
                let width = cfg.building_width * (1.0 + jitter);
                Envelope::rect(*support, width).ok().map(|env| env.poly)
            })
            .collect();

        let overlapping: Vec<bool> = (0..bases.len())
            .map(|i| (0..bases.len()).any(|j| i != j && bases[i].intersects_poly(&bases[j])))
            .collect();
        bases
            .into_iter()
            .zip(overlapping)
            .filter(|(_, overlaps)| !overlaps)
            .map(|(base, _)| Building::new(base, cfg.building_height, cfg.building_roof_height))
            .collect()
    }

    fn generate_trees(&mut self) {
        if self.graph.segments().is_empty() {
            self.trees.clear();
            self.illegal_hash = None;
            return;
        }
        let illegal_hash = combine_sorted(
            b"illegal",
            illegal_polys(&self.roads, &self.buildings).iter().map(|p| p.content_hash()),
        );
        if self.illegal_hash == Some(illegal_hash) && !self.trees_stale {
            return;
        }

        let radius = self.config.tree_radius;
        let height = self.config.tree_height;
        let limit = self.config.tree_attempt_limit();
        let old = std::mem::take(&mut self.trees);
        let mut placed = Placement::new(radius);
        {
            let illegal = illegal_polys(&self.roads, &self.buildings);
            for tree in old {
                if valid_tree_location(tree.center, radius, &illegal, &placed) {
                    // Segment indices shift with graph edits.
                    let parent = nearest_segment(self.graph.segments(), tree.center);
                    placed.push(tree.with_parent(parent));
                }
            }
            let kept = placed.trees.len();

            let Some((x0, y0, x1, y1)) = bbox_of(illegal.iter().flat_map(|p| p.points.iter().copied())) else {
                self.trees = placed.trees;
                return;
            };
            let mut failures = 0u32;
            while failures < limit {
                let p = Point::new(lerp(x0, x1, self.rng.gen::<f64>()), lerp(y0, y1, self.rng.gen::<f64>()));
                if valid_tree_location(p, radius, &illegal, &placed) {
                    let parent = nearest_segment(self.graph.segments(), p);
                    placed.push(Tree::new(p, radius, height).with_parent(parent));
                    failures = 0;
                } else {
                    failures += 1;
                }
            }
            log::debug!("placed {} trees ({} kept)", placed.trees.len(), kept);
        }
        self.trees = placed.trees;
        self.illegal_hash = Some(illegal_hash);
    }

    // Markings
    /// The marking that would be placed at `at`: snapped onto the nearest
    /// target segment within `threshold`, or `None` when the projection
    /// falls outside that segment.
    pub fn marking_intent(&self, kind: MarkingKind, at: Point, threshold: f64) -> Option<Marking> {
        let targets = match kind.snap_target() {
            SnapTarget::LaneGuides => &self.lane_guides[..],
            SnapTarget::GraphSegments => self.graph.segments(),
        };
        let seg = targets
            .iter()
            .map(|s| (s.distance_to_point(at), s))
            .filter(|(d, _)| *d < threshold)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, s)| s)?;
        let proj = seg.project_point(at);
        if !(0.0..=1.0).contains(&proj.offset) {
            return None;
        }
        let (width, height) = kind.size(self.config.road_width);
        kind.build(proj.point, seg.direction_vector(), width, height).ok()
    }

    pub fn add_marking(&mut self, marking: Marking) {
        self.markings.push(marking);
    }

    /// Snap and add in one step. Returns whether a marking was placed.
    pub fn place_marking(&mut self, kind: MarkingKind, at: Point, threshold: f64) -> bool {
        match self.marking_intent(kind, at, threshold) {
            Some(m) => {
                self.markings.push(m);
                true
            }
            None => false,
        }
    }

    /// Remove the first marking whose base contains `p`.
    pub fn remove_marking_at(&mut self, p: Point) -> bool {
        let Some(idx) = self.markings.iter().position(|m| m.base().contains_point(p)) else {
            return false;
        };
        self.markings.remove(idx);
        true
    }

    pub fn clear_markings(&mut self) {
        self.markings.clear();
    }

    // Drawing
    pub fn draw(&self, canvas: &mut dyn Canvas, view_point: Point) {
        for road in &self.roads {
            road.draw(canvas, view_point);
        }
        let dashes = LineStyle::dashed(Color::WHITE, 3.0, &[10.0, 10.0]);
        for seg in self.graph.segments() {
            canvas.line(seg.p1, seg.p2, &dashes);
        }
        let border = LineStyle::solid(Color::BLACK, 2.0);
        for seg in &self.road_borders {
            canvas.line(seg.p1, seg.p2, &border);
        }
        for marking in &self.markings {
            marking.draw(canvas, view_point);
        }
        for item in self.depth_sorted_items(view_point) {
            item.draw(canvas, view_point);
        }
    }

    /// Buildings and trees, farthest from `view_point` first.
    fn depth_sorted_items(&self, view_point: Point) -> Vec<&dyn Drawable> {
        let mut items: Vec<(f64, &dyn Drawable)> = self
            .buildings
            .iter()
            .map(|b| (b.base.distance_to_point(view_point), b as &dyn Drawable))
            .chain(self.trees.iter().map(|t| (t.base.distance_to_point(view_point), t as &dyn Drawable)))
            .collect();
        items.sort_by(|a, b| b.0.total_cmp(&a.0));
        items.into_iter().map(|(_, item)| item).collect()
    }
}

/// Polygons trees must stay out of.
fn illegal_polys<'a>(roads: &'a [Road], buildings: &'a [Building]) -> Vec<&'a Polygon> {
    roads
        .iter()
        .map(|r| &r.envelope.poly)
        .chain(buildings.iter().map(|b| &b.base))
        .collect()
}

/// Spines of the buildings along one guide, each parallel to the road and
/// separated by the configured spacing.
fn building_supports(guide: &Segment, cfg: &WorldConfig) -> Vec<Segment> {
    let spacing = cfg.building_spacing;
    let len = guide.length() + spacing;
    let count = (len / (cfg.building_min_length + spacing)).floor() as usize;
    if count == 0 {
        return Vec::new();
    }
    let building_length = len / count as f64 - spacing;
    let dir = guide.direction_vector();
    let mut supports = Vec::with_capacity(count);
    let mut q1 = guide.p1;
    for _ in 0..count {
        let jitter = kind_of_random(q1.x * q1.y, 11.0);
        let q2 = add(q1, scale(dir, building_length * (1.0 - (jitter * 0.5 - 0.25))));
        supports.push(Segment::new(q1, q2));
        q1 = add(q2, scale(dir, spacing));
    }
    supports
}

fn nearest_segment(segments: &[Segment], p: Point) -> Option<usize> {
    segments
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.distance_to_point(p).total_cmp(&b.1.distance_to_point(p)))
        .map(|(i, _)| i)
}

/// Accepted trees plus a grid over their centers for neighbor queries.
struct Placement {
    trees: Vec<Tree>,
    grid: Grid<usize, [f32; 2]>,
}

impl Placement {
    fn new(radius: f64) -> Self {
        let cell = (radius.ceil() as i32).max(1);
        Placement { trees: Vec::new(), grid: Grid::new(cell) }
    }

    fn push(&mut self, tree: Tree) {
        let idx = self.trees.len();
        self.grid.insert([tree.center.x as f32, tree.center.y as f32], idx);
        self.trees.push(tree);
    }

    /// Whether an accepted tree lies strictly closer than `radius` to `p`.
    fn crowded(&self, p: Point, radius: f64) -> bool {
        // The grid works in f32; widen the query and decide in f64.
        self.grid
            .query_around([p.x as f32, p.y as f32], radius as f32 + 1.0)
            .filter_map(|(handle, _)| self.grid.get(handle).map(|(_, idx)| *idx))
            .any(|idx| distance(self.trees[idx].center, p) < radius)
    }
}

fn valid_tree_location(p: Point, radius: f64, illegal: &[&Polygon], placed: &Placement) -> bool {
    let mut close_to_something = false;
    for poly in illegal {
        if poly.contains_point(p) {
            return false;
        }
        let d = poly.distance_to_point(p);
        if d < radius / 2.0 {
            return false;
        }
        if d < radius * TREE_PADDING {
            close_to_something = true;
        }
    }
    close_to_something && !placed.crowded(p, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> Graph {
        let a = Point::new(200.0, 200.0);
        let b = Point::new(500.0, 200.0);
        let mut g = Graph::new();
        g.try_add_point(a);
        g.try_add_point(b);
        g.try_add_segment(Segment::new(a, b));
        g
    }

    #[test]
    fn empty_graph_yields_empty_scene() {
        let w = World::with_defaults(Graph::new());
        assert!(w.roads().is_empty());
        assert!(w.road_borders().is_empty());
        assert!(w.lane_guides().is_empty());
        assert!(w.buildings().is_empty());
        assert!(w.trees().is_empty());
    }

    #[test]
    fn generate_skips_when_unchanged() {
        let mut w = World::with_defaults(straight());
        assert!(!w.generate());
        w.graph_mut().try_add_point(Point::new(0.0, 0.0));
        assert!(w.generate());
        assert!(!w.generate());
        w.disable_trees();
        assert!(w.generate());
        assert!(w.trees().is_empty());
    }

    #[test]
    fn supports_fill_the_guide() {
        let cfg = WorldConfig::default();
        let guide = Segment::new(Point::new(0.0, 0.0), Point::new(650.0, 0.0));
        let supports = building_supports(&guide, &cfg);
        // (650 + 100) / (150 + 100) = 3 buildings of nominal length 150.
        assert_eq!(supports.len(), 3);
        assert_eq!(supports[0].p1, guide.p1);
        for s in &supports {
            assert!(s.length() >= 150.0 * 0.75 - 1e-2 && s.length() <= 150.0 * 1.25 + 1e-2);
            assert_eq!(s.p1.y, 0.0);
        }
        for w in supports.windows(2) {
            assert!((distance(w[0].p2, w[1].p1) - 100.0).abs() < 1e-2);
        }
        let short = Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(building_supports(&short, &WorldConfig { building_min_length: 500.0, ..cfg }).is_empty());
    }

    #[test]
    fn trees_keep_their_distance() {
        let w = World::with_defaults(straight());
        let r = w.config().tree_radius;
        let trees = w.trees();
        for (i, a) in trees.iter().enumerate() {
            assert_eq!(a.parent, Some(0));
            for b in &trees[i + 1..] {
                assert!(distance(a.center, b.center) >= r);
            }
            for road in w.roads() {
                assert!(!road.envelope.poly.contains_point(a.center));
            }
        }
    }

    #[test]
    fn markings_snap_to_guides() {
        let mut w = World::with_defaults(straight());
        assert!(w.marking_intent(MarkingKind::Stop, Point::new(350.0, 900.0), 10.0).is_none());
        let guide = w.lane_guides()[0];
        let at = guide.midpoint();
        assert!(w.place_marking(MarkingKind::Stop, at, 10.0));
        assert_eq!(w.markings().len(), 1);
        let center = w.markings()[0].shape().center;
        assert!(w.remove_marking_at(center));
        assert!(w.markings().is_empty());
        assert!(!w.remove_marking_at(center));
    }
}
