//! Fixed-budget force simulation.
//!
//! Each step cools `alpha`, applies many-body repulsion, edge springs, centering and collision,
//! then integrates velocities with decay. The step count is an explicit option; the simulation
//! never stops early. Initial positions lie on a phyllotaxis spiral and the only randomness (the
//! jitter for coincident nodes) comes from a seeded xorshift64*, so equal inputs give equal output.

use crate::algo::ForceLayoutOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point};
use nalgebra as na;
use rustc_hash::FxHashMap;

type Vec2 = na::Vector2<f64>;

const INITIAL_RADIUS: f64 = 10.0;

/// Squared distance below which many-body forces stop growing.
const MIN_CHARGE_DISTANCE_SQ: f64 = 1.0;

#[derive(Debug, Default, Clone)]
struct ForceLayoutTimings {
    total: std::time::Duration,
    from_graph: std::time::Duration,
    steps: std::time::Duration,
    output: std::time::Duration,
}

pub fn layout(graph: &Graph, opts: &ForceLayoutOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let timing_enabled = std::env::var("REPOVIZ_LAYOUT_TIMING").ok().as_deref() == Some("1");
    let mut timings = ForceLayoutTimings::default();
    let total_start = timing_enabled.then(std::time::Instant::now);

    let from_graph_start = timing_enabled.then(std::time::Instant::now);
    let mut sim = Simulation::from_graph(graph, opts);
    if let Some(s) = from_graph_start {
        timings.from_graph = s.elapsed();
    }

    let steps_start = timing_enabled.then(std::time::Instant::now);
    for _ in 0..opts.iterations {
        sim.step();
    }
    if let Some(s) = steps_start {
        timings.steps = s.elapsed();
    }

    let output_start = timing_enabled.then(std::time::Instant::now);
    let mut positions: std::collections::BTreeMap<String, Point> =
        std::collections::BTreeMap::new();
    for (id, body) in graph.nodes.iter().map(|n| &n.id).zip(&sim.bodies) {
        positions.insert(
            id.clone(),
            Point {
                x: body.pos.x,
                y: body.pos.y,
            },
        );
    }
    if let Some(s) = output_start {
        timings.output = s.elapsed();
    }

    if let Some(s) = total_start {
        timings.total = s.elapsed();
        eprintln!(
            "[repoviz-force-timing] total={:?} from_graph={:?} steps={:?} output={:?} nodes={} links={} iterations={} alpha={}",
            timings.total,
            timings.from_graph,
            timings.steps,
            timings.output,
            sim.bodies.len(),
            sim.links.len(),
            opts.iterations,
            sim.alpha,
        );
    }
    tracing::debug!(
        nodes = sim.bodies.len(),
        links = sim.links.len(),
        iterations = opts.iterations,
        "force layout finished"
    );

    Ok(LayoutResult { positions })
}

#[derive(Debug, Clone, Copy)]
struct Body {
    pos: Vec2,
    vel: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct Link {
    source: usize,
    target: usize,
    /// Share of the correction applied to the target; the source takes the rest.
    bias: f64,
    strength: f64,
}

#[derive(Debug, Clone)]
struct Simulation {
    bodies: Vec<Body>,
    links: Vec<Link>,
    alpha: f64,
    alpha_decay: f64,
    opts: ForceLayoutOptions,
    rng: XorShift64Star,
}

impl Simulation {
    fn from_graph(graph: &Graph, opts: &ForceLayoutOptions) -> Self {
        let initial_angle = std::f64::consts::PI * (3.0 - 5f64.sqrt());
        let bodies = (0..graph.nodes.len())
            .map(|i| {
                let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
                let angle = i as f64 * initial_angle;
                Body {
                    pos: Vec2::new(radius * angle.cos(), radius * angle.sin()),
                    vel: Vec2::zeros(),
                }
            })
            .collect::<Vec<_>>();

        let index: FxHashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();
        // Self-loops carry no length information and would only inject jitter.
        let pairs = graph
            .edges
            .iter()
            .filter_map(|e| Some((index.get(e.source.as_str())?, index.get(e.target.as_str())?)))
            .filter(|(s, t)| s != t)
            .map(|(&s, &t)| (s, t))
            .collect::<Vec<_>>();
        let mut degree = vec![0usize; bodies.len()];
        for &(s, t) in &pairs {
            degree[s] += 1;
            degree[t] += 1;
        }
        let links = pairs
            .into_iter()
            .map(|(source, target)| {
                let (ds, dt) = (degree[source] as f64, degree[target] as f64);
                Link {
                    source,
                    target,
                    bias: ds / (ds + dt),
                    strength: 1.0 / ds.min(dt),
                }
            })
            .collect();

        let alpha_decay = if opts.iterations == 0 {
            0.0
        } else {
            1.0 - opts.alpha_min.powf(1.0 / opts.iterations as f64)
        };

        Self {
            bodies,
            links,
            alpha: 1.0,
            alpha_decay,
            opts: opts.clone(),
            rng: XorShift64Star::new(opts.random_seed),
        }
    }

    fn step(&mut self) {
        self.alpha += (0.0 - self.alpha) * self.alpha_decay;

        self.apply_charge();
        self.apply_links();
        self.apply_center();
        self.apply_collision();

        let keep = 1.0 - self.opts.velocity_decay;
        for body in &mut self.bodies {
            body.vel *= keep;
            body.pos += body.vel;
        }
    }

    fn apply_charge(&mut self) {
        let strength = self.opts.charge_strength * self.alpha;
        for i in 0..self.bodies.len() {
            let mut dv = Vec2::zeros();
            for j in 0..self.bodies.len() {
                if i == j {
                    continue;
                }
                let mut d = self.bodies[j].pos - self.bodies[i].pos;
                self.unstick(&mut d);
                let mut l = d.norm_squared();
                if l < MIN_CHARGE_DISTANCE_SQ {
                    l = (MIN_CHARGE_DISTANCE_SQ * l).sqrt();
                }
                dv += d * (strength / l);
            }
            self.bodies[i].vel += dv;
        }
    }

    fn apply_links(&mut self) {
        for k in 0..self.links.len() {
            let link = self.links[k];
            let (s, t) = (self.bodies[link.source], self.bodies[link.target]);
            let mut d = (t.pos + t.vel) - (s.pos + s.vel);
            self.unstick(&mut d);
            let l = d.norm();
            let d = d * ((l - self.opts.link_distance) / l * self.alpha * link.strength);
            self.bodies[link.target].vel -= d * link.bias;
            self.bodies[link.source].vel += d * (1.0 - link.bias);
        }
    }

    fn apply_center(&mut self) {
        if self.bodies.is_empty() {
            return;
        }
        let n = self.bodies.len() as f64;
        let mean = self.bodies.iter().fold(Vec2::zeros(), |acc, b| acc + b.pos) / n;
        let shift = mean - Vec2::new(self.opts.center_x, self.opts.center_y);
        for body in &mut self.bodies {
            body.pos -= shift;
        }
    }

    fn apply_collision(&mut self) {
        // Equal radii: both bodies take half of the correction.
        let r = self.opts.collide_radius * 2.0;
        if r <= 0.0 {
            return;
        }
        for i in 0..self.bodies.len() {
            let predicted = self.bodies[i].pos + self.bodies[i].vel;
            for j in (i + 1)..self.bodies.len() {
                let other = self.bodies[j];
                let mut d = predicted - other.pos - other.vel;
                let l = d.norm_squared();
                if l >= r * r {
                    continue;
                }
                self.unstick(&mut d);
                let l = d.norm();
                let d = d * ((r - l) / l);
                self.bodies[i].vel += d * 0.5;
                self.bodies[j].vel -= d * 0.5;
            }
        }
    }

    /// Nudges zero components apart so coincident bodies get a direction to separate in.
    fn unstick(&mut self, d: &mut Vec2) {
        if d.x == 0.0 {
            d.x = self.rng.jiggle();
        }
        if d.y == 0.0 {
            d.y = self.rng.jiggle();
        }
    }
}

#[derive(Debug, Clone)]
struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    fn next_f64_unit(&mut self) -> f64 {
        // Map to [0, 1) with 53 bits of precision.
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// A tiny non-zero offset in `[-5e-7, 5e-7)`.
    fn jiggle(&mut self) -> f64 {
        let v = (self.next_f64_unit() - 0.5) * 1e-6;
        if v == 0.0 { 1e-9 } else { v }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    #[test]
    fn xorshift64star_next_f64_unit_matches_seeded_baseline() {
        let mut rng = XorShift64Star::new(1);
        let expected = [
            0.28083505005035947,
            0.6711372530266764,
            0.7258461452833668,
            0.303529299965799,
            0.056176763098259475,
        ];
        for (i, &e) in expected.iter().enumerate() {
            let v = rng.next_f64_unit();
            assert!(
                (v - e).abs() < 1e-15,
                "unexpected rng value at {i}: got {v}, expected {e}"
            );
        }
    }

    #[test]
    fn jiggle_is_never_zero() {
        let mut rng = XorShift64Star::new(7);
        for _ in 0..1000 {
            let v = rng.jiggle();
            assert!(v != 0.0 && v.abs() <= 5e-7);
        }
    }

    #[test]
    fn link_bias_follows_degree() {
        let graph = Graph {
            nodes: vec![Node::new("hub"), Node::new("a"), Node::new("b")],
            edges: vec![Edge::new("e0", "hub", "a"), Edge::new("e1", "hub", "b")],
        };
        let sim = Simulation::from_graph(&graph, &ForceLayoutOptions::default());
        assert_eq!(sim.links.len(), 2);
        let link = sim.links[0];
        assert!((link.bias - 2.0 / 3.0).abs() < 1e-12);
        assert!((link.strength - 1.0).abs() < 1e-12);
    }

    #[test]
    fn self_loops_are_not_springs() {
        let graph = Graph {
            nodes: vec![Node::new("a")],
            edges: vec![Edge::new("e0", "a", "a")],
        };
        let sim = Simulation::from_graph(&graph, &ForceLayoutOptions::default());
        assert!(sim.links.is_empty());
    }

    #[test]
    fn alpha_cools_to_alpha_min_over_the_budget() {
        let graph = Graph {
            nodes: vec![Node::new("a"), Node::new("b")],
            edges: Vec::new(),
        };
        let opts = ForceLayoutOptions::default();
        let mut sim = Simulation::from_graph(&graph, &opts);
        for _ in 0..opts.iterations {
            sim.step();
        }
        assert!((sim.alpha - opts.alpha_min).abs() < 1e-9, "alpha: {}", sim.alpha);
    }
}
