//! Per-layer travel costs for the two-layer routing graph.
//!
//! The routing graph has a *water* layer used for ordinary transit and a
//! *highway* layer that only links waypoints. [`LayerCosts`] scales edge
//! lengths in each layer and prices the switch between them.
//!
//! # Example
//!
//! ```
//! use route_types::LayerCosts;
//!
//! let costs = LayerCosts::default()
//!     .with_highway(0.5)
//!     .with_switch(150.0);
//!
//! // 1000 units on the highway plus getting on and off
//! let highway_trip = costs.switch() * 2.0 + costs.highway() * 1000.0;
//! let water_trip = costs.water() * 1000.0;
//! assert!(highway_trip < water_trip);
//! ```

use crate::RoutingError;

/// Cost coefficients for the water layer, the highway layer, and mode switches.
///
/// Defaults: water 1.0, highway 0.6, switch 200.0.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerCosts {
    /// Multiplier on distance for water-layer edges (`alpha_water`).
    water: f64,
    /// Multiplier on distance for highway-layer edges (`alpha_highway`).
    highway: f64,
    /// Fixed cost of entering or leaving the highway layer (`beta_switch`).
    switch: f64,
}

impl LayerCosts {
    /// Creates layer costs from explicit coefficients.
    #[must_use]
    pub const fn new(water: f64, highway: f64, switch: f64) -> Self {
        Self {
            water,
            highway,
            switch,
        }
    }

    /// Layer costs that make the highway layer unusable.
    ///
    /// An infinite switch cost collapses the graph to its water layer.
    ///
    /// # Example
    ///
    /// ```
    /// use route_types::LayerCosts;
    ///
    /// let costs = LayerCosts::water_only();
    /// assert!(costs.switch().is_infinite());
    /// ```
    #[must_use]
    pub const fn water_only() -> Self {
        Self {
            water: 1.0,
            highway: 1.0,
            switch: f64::INFINITY,
        }
    }

    /// Sets the water-layer multiplier.
    #[must_use]
    pub const fn with_water(mut self, alpha: f64) -> Self {
        self.water = alpha;
        self
    }

    /// Sets the highway-layer multiplier.
    #[must_use]
    pub const fn with_highway(mut self, alpha: f64) -> Self {
        self.highway = alpha;
        self
    }

    /// Sets the mode-switch cost.
    #[must_use]
    pub const fn with_switch(mut self, beta: f64) -> Self {
        self.switch = beta;
        self
    }

    /// Returns the water-layer multiplier.
    #[must_use]
    pub const fn water(&self) -> f64 {
        self.water
    }

    /// Returns the highway-layer multiplier.
    #[must_use]
    pub const fn highway(&self) -> f64 {
        self.highway
    }

    /// Returns the mode-switch cost.
    #[must_use]
    pub const fn switch(&self) -> f64 {
        self.switch
    }

    /// Checks that every coefficient is non-negative.
    ///
    /// The multipliers must be finite; the switch cost may be infinite.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidConfig`] naming the first bad coefficient.
    pub fn validate(&self) -> Result<(), RoutingError> {
        for (name, value) in [("water", self.water), ("highway", self.highway)] {
            if !value.is_finite() || value < 0.0 {
                return Err(RoutingError::invalid_config(format!(
                    "{name} layer cost must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.switch.is_nan() || self.switch < 0.0 {
            return Err(RoutingError::invalid_config(format!(
                "switch cost must be non-negative, got {}",
                self.switch
            )));
        }
        Ok(())
    }
}

impl Default for LayerCosts {
    fn default() -> Self {
        Self::new(1.0, 0.6, 200.0)
    }
}
