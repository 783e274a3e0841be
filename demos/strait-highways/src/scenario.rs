//! Demo scenarios: ports with order books, islands, and a map box.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cf_planar::{Bounds, Obstacle};
use nalgebra::Point2;
use route_types::{
    Anchor, HighwayConfig, HighwayProblem, Order, OrderBook, demands_from_order_books,
};
use serde::{Deserialize, Serialize};

/// A port and the orders it ships out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub position: Point2<f64>,
    #[serde(default)]
    pub orders: OrderBook,
}

/// Everything needed for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub bounds: Bounds,
    pub ports: Vec<Port>,
    #[serde(default)]
    pub islands: Vec<Obstacle>,
    #[serde(default)]
    pub config: HighwayConfig,
}

impl Scenario {
    /// Reads a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Six ports around a rocky island in an 1100 x 700 strait.
    pub fn strait() -> Self {
        let port = |name: &str, x: f64, y: f64, orders: &[(usize, u32)]| Port {
            name: name.to_string(),
            position: Point2::new(x, y),
            orders: orders
                .iter()
                .map(|&(destination, containers)| Order::new(destination, containers))
                .collect(),
        };

        let island = Obstacle::new(vec![
            Point2::new(430.0, 230.0),
            Point2::new(560.0, 180.0),
            Point2::new(690.0, 250.0),
            Point2::new(720.0, 400.0),
            Point2::new(600.0, 500.0),
            Point2::new(460.0, 470.0),
            Point2::new(400.0, 350.0),
        ]);
        let reef = Obstacle::new(vec![
            Point2::new(200.0, 520.0),
            Point2::new(290.0, 540.0),
            Point2::new(260.0, 610.0),
        ]);

        Self {
            bounds: Bounds::new(Point2::new(0.0, 0.0), Point2::new(1100.0, 700.0)),
            ports: vec![
                port("Westhaven", 80.0, 350.0, &[(3, 40), (4, 12)]),
                port("Northgate", 350.0, 60.0, &[(2, 18), (5, 25)]),
                port("Eastmoor", 800.0, 80.0, &[(0, 30)]),
                port("Farpoint", 1020.0, 360.0, &[(1, 22), (5, 8)]),
                port("Southreach", 760.0, 640.0, &[(0, 16), (1, 0)]),
                port("Lowbay", 330.0, 660.0, &[(3, 35)]),
            ],
            islands: vec![island, reef],
            config: HighwayConfig::default(),
        }
    }

    /// Builds the optimizer's problem, turning order books into demands.
    pub fn problem(&self) -> HighwayProblem {
        let books: Vec<OrderBook> = self.ports.iter().map(|p| p.orders.clone()).collect();
        HighwayProblem::new(self.bounds)
            .with_anchors(self.ports.iter().map(|p| Anchor::new(p.position)))
            .with_demands(demands_from_order_books(&books))
            .with_obstacles(self.islands.iter().cloned())
    }

    /// Port name for an anchor index.
    pub fn port_name(&self, index: usize) -> &str {
        self.ports.get(index).map_or("?", |p| p.name.as_str())
    }
}
