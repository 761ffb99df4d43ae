//! CPU force simulation for graph layout.
//!
//! One tick applies pairwise charge repulsion, spring forces pulling linked
//! nodes toward the configured rest distance, and a centering pull, then
//! integrates velocities scaled by a decaying alpha. The simulation owns all
//! node position state; the rendering layer only reads it.

use crate::config::RenderConfig;
use crate::graph::ResolvedLink;

/// A node with position and velocity for simulation
#[derive(Debug, Clone, Copy)]
pub struct SimNode {
    /// Position in canvas space
    pub x: f32,
    pub y: f32,
    /// Velocity
    pub vx: f32,
    pub vy: f32,
    /// Pinned nodes hold a caller-supplied position, exempt from
    /// integration and clamping until released
    pub pinned: bool,
}

impl SimNode {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            pinned: false,
        }
    }
}

/// Spring coefficient for link forces
const LINK_STRENGTH: f32 = 0.5;

/// Velocity decay (friction) applied each tick
const VELOCITY_DECAY: f32 = 0.6;

/// Alpha below which the simulation is considered converged
const ALPHA_MIN: f32 = 0.001;

/// Number of ticks over which alpha decays to `ALPHA_MIN`
const ALPHA_TICKS: f32 = 300.0;

/// Alpha restored when layout resumes after a drag
const ALPHA_RESTART: f32 = 0.3;

/// The force-layout capability the renderer is written against.
///
/// Any numerical integrator substitutes behind this seam without touching
/// the scene mapping or the writers.
pub trait ForceLayout {
    /// Run one simulation step; a no-op once converged
    fn tick(&mut self);

    /// Whether the simulation has not yet converged
    fn is_running(&self) -> bool;

    /// Current node positions
    fn nodes(&self) -> &[SimNode];

    /// Tick until convergence or until the budget is exhausted
    fn run_to_convergence(&mut self, max_ticks: usize) {
        for _ in 0..max_ticks {
            if !self.is_running() {
                break;
            }
            self.tick();
        }
    }
}

/// The provided CPU force engine
pub struct CpuSimulation {
    nodes: Vec<SimNode>,
    links: Vec<ResolvedLink>,
    width: f32,
    height: f32,
    margin: f32,
    gravity: f32,
    link_distance: f32,
    charge: f32,
    cx: f32,
    cy: f32,
    alpha: f32,
    alpha_decay: f32,
}

impl CpuSimulation {
    /// Create a simulation with nodes placed deterministically on a circle
    /// around the canvas center
    pub fn new(node_count: usize, links: Vec<ResolvedLink>, config: &RenderConfig) -> Self {
        let (cx, cy) = config.center();
        let spread = 100.0_f32
            .min(config.width.min(config.height) / 2.0 - config.margin)
            .max(1.0);

        let nodes = (0..node_count)
            .map(|i| {
                let angle = 2.0 * std::f32::consts::PI * (i as f32) / (node_count as f32);
                SimNode::at(
                    (cx + spread * angle.cos()).clamp(config.margin, config.width - config.margin),
                    (cy + spread * angle.sin()).clamp(config.margin, config.height - config.margin),
                )
            })
            .collect();

        Self {
            nodes,
            links,
            width: config.width,
            height: config.height,
            margin: config.margin,
            gravity: config.gravity,
            link_distance: config.link_distance,
            charge: config.charge,
            cx,
            cy,
            alpha: 1.0,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / ALPHA_TICKS),
        }
    }

    /// Fix a node at the given position for the duration of a drag.
    ///
    /// Pinned positions are not clamped; the clamp resumes on release.
    pub fn pin(&mut self, index: usize, x: f32, y: f32) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pinned = true;
            node.x = x;
            node.y = y;
            node.vx = 0.0;
            node.vy = 0.0;
        }
    }

    /// Release a pinned node back to simulation-driven movement
    pub fn unpin(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pinned = false;
        }
    }

    /// Restore simulation temperature so layout resumes after a drag
    pub fn reheat(&mut self) {
        self.alpha = self.alpha.max(ALPHA_RESTART);
    }

    /// Apply repulsion between all node pairs
    fn apply_charge(&mut self) {
        let n = self.nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.nodes[j].x - self.nodes[i].x;
                let dy = self.nodes[j].y - self.nodes[i].y;

                let dist_sq = (dx * dx + dy * dy).max(1.0);
                let dist = dist_sq.sqrt();

                // charge < 0 pushes the pair apart
                let f = self.charge / dist_sq;
                let fx = f * dx / dist;
                let fy = f * dy / dist;

                self.nodes[i].vx += fx;
                self.nodes[i].vy += fy;
                self.nodes[j].vx -= fx;
                self.nodes[j].vy -= fy;
            }
        }
    }

    /// Apply spring force between linked nodes
    fn apply_links(&mut self) {
        for link in &self.links {
            let (s, t) = (link.source, link.target);

            let dx = self.nodes[t].x - self.nodes[s].x;
            let dy = self.nodes[t].y - self.nodes[s].y;

            let dist = (dx * dx + dy * dy).sqrt().max(1.0);
            let stretch = dist - self.link_distance;
            let f = LINK_STRENGTH * stretch / dist;

            self.nodes[s].vx += f * dx;
            self.nodes[s].vy += f * dy;
            self.nodes[t].vx -= f * dx;
            self.nodes[t].vy -= f * dy;
        }
    }

    /// Apply the centering pull toward the canvas center
    fn apply_gravity(&mut self) {
        for node in &mut self.nodes {
            node.vx += (self.cx - node.x) * self.gravity;
            node.vy += (self.cy - node.y) * self.gravity;
        }
    }
}

impl ForceLayout for CpuSimulation {
    fn tick(&mut self) {
        if !self.is_running() {
            return;
        }

        if !self.nodes.is_empty() {
            self.apply_charge();
            self.apply_links();
            self.apply_gravity();

            for node in &mut self.nodes {
                if node.pinned {
                    // a drag holds the position; forces must not accumulate
                    node.vx = 0.0;
                    node.vy = 0.0;
                    continue;
                }
                node.vx *= VELOCITY_DECAY;
                node.vy *= VELOCITY_DECAY;
                node.x =
                    (node.x + node.vx * self.alpha).clamp(self.margin, self.width - self.margin);
                node.y =
                    (node.y + node.vy * self.alpha).clamp(self.margin, self.height - self.margin);
            }
        }

        self.alpha -= self.alpha * self.alpha_decay;
    }

    fn is_running(&self) -> bool {
        self.alpha >= ALPHA_MIN
    }

    fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(source: usize, target: usize) -> ResolvedLink {
        ResolvedLink {
            source,
            target,
            value: None,
        }
    }

    fn in_bounds(node: &SimNode, config: &RenderConfig) -> bool {
        node.x >= config.margin
            && node.x <= config.width - config.margin
            && node.y >= config.margin
            && node.y <= config.height - config.margin
    }

    #[test]
    fn simulation_converges_within_budget() {
        let config = RenderConfig::default();
        let mut sim = CpuSimulation::new(3, vec![link(0, 1), link(1, 2)], &config);

        sim.run_to_convergence(500);
        assert!(!sim.is_running());
    }

    #[test]
    fn alpha_decreases_each_tick() {
        let config = RenderConfig::default();
        let mut sim = CpuSimulation::new(2, vec![], &config);

        let before = sim.alpha;
        sim.tick();
        assert!(sim.alpha < before);
    }

    #[test]
    fn empty_graph_handles_gracefully() {
        let config = RenderConfig::default();
        let mut sim = CpuSimulation::new(0, vec![], &config);

        sim.tick();
        sim.run_to_convergence(500);
        assert!(!sim.is_running());
        assert!(sim.nodes().is_empty());
    }

    #[test]
    fn positions_stay_clamped_on_every_tick() {
        // crank the repulsion so nodes would fly off an unclamped canvas
        let config = RenderConfig {
            charge: -10000.0,
            ..RenderConfig::default()
        };
        let mut sim = CpuSimulation::new(5, vec![], &config);

        for _ in 0..400 {
            sim.tick();
            for node in sim.nodes() {
                assert!(in_bounds(node, &config));
            }
        }
    }

    #[test]
    fn single_node_is_pulled_toward_center() {
        let config = RenderConfig::default();
        let (cx, cy) = config.center();
        let mut sim = CpuSimulation::new(1, vec![], &config);

        let start = sim.nodes()[0];
        let initial = ((start.x - cx).powi(2) + (start.y - cy).powi(2)).sqrt();

        sim.run_to_convergence(500);

        let end = sim.nodes()[0];
        let final_dist = ((end.x - cx).powi(2) + (end.y - cy).powi(2)).sqrt();
        assert!(final_dist < initial);
        assert!(final_dist < 25.0);
    }

    #[test]
    fn disconnected_nodes_keep_separation() {
        let config = RenderConfig::default();
        let mut sim = CpuSimulation::new(2, vec![], &config);

        let initial = {
            let n = sim.nodes();
            ((n[1].x - n[0].x).powi(2) + (n[1].y - n[0].y).powi(2)).sqrt()
        };

        sim.run_to_convergence(500);

        let n = sim.nodes();
        let final_dist = ((n[1].x - n[0].x).powi(2) + (n[1].y - n[0].y).powi(2)).sqrt();
        assert!(final_dist > 2.0, "repulsion should prevent collapse");
        assert!(final_dist < initial, "gravity should limit spread");
    }

    #[test]
    fn linked_nodes_settle_near_the_rest_distance() {
        let config = RenderConfig::default();
        let mut sim = CpuSimulation::new(2, vec![link(0, 1)], &config);

        sim.run_to_convergence(500);

        let n = sim.nodes();
        let dist = ((n[1].x - n[0].x).powi(2) + (n[1].y - n[0].y).powi(2)).sqrt();
        assert!(dist > 20.0 && dist < 150.0, "settled at {dist}");
    }

    #[test]
    fn pinned_node_holds_its_position_unclamped() {
        let config = RenderConfig::default();
        let mut sim = CpuSimulation::new(3, vec![link(0, 1)], &config);

        // outside the clamp margins on purpose
        sim.pin(0, 495.0, 295.0);
        for _ in 0..50 {
            sim.tick();
        }

        let pinned = sim.nodes()[0];
        assert_eq!((pinned.x, pinned.y), (495.0, 295.0));
    }

    #[test]
    fn released_node_is_clamped_back_inside() {
        let config = RenderConfig::default();
        let mut sim = CpuSimulation::new(2, vec![], &config);

        sim.pin(0, 495.0, 295.0);
        sim.tick();
        sim.unpin(0);
        sim.reheat();
        sim.tick();

        assert!(in_bounds(&sim.nodes()[0], &config));
    }

    #[test]
    fn reheat_resumes_a_converged_simulation() {
        let config = RenderConfig::default();
        let mut sim = CpuSimulation::new(2, vec![], &config);

        sim.run_to_convergence(500);
        assert!(!sim.is_running());

        sim.reheat();
        assert!(sim.is_running());
    }
}
