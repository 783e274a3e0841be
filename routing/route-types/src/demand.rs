//! Anchors, demands and order books.
//!
//! An [`Anchor`] is a fixed port whose index is its position in the anchor
//! list. A [`Demand`] asks for traffic between two anchors, weighted by
//! volume. Demands are usually collected from per-port [`OrderBook`]s with
//! [`demands_from_order_books`].
//!
//! # Example
//!
//! ```
//! use route_types::{Order, OrderBook, demands_from_order_books};
//!
//! let books = vec![
//!     OrderBook::new().with_order(Order::new(1, 3)),
//!     OrderBook::new().with_order(Order::new(0, 2)).with_order(Order::new(2, 1)),
//!     OrderBook::new(),
//! ];
//!
//! let demands = demands_from_order_books(&books);
//! assert_eq!(demands.len(), 3);
//! assert_eq!(demands[0].origin(), 0);
//! assert_eq!(demands[2].destination(), 2);
//! ```

use nalgebra::Point2;

/// A fixed port location.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    position: Point2<f64>,
}

impl Anchor {
    /// Creates an anchor at the given position.
    #[must_use]
    pub const fn new(position: Point2<f64>) -> Self {
        Self { position }
    }

    /// Creates an anchor from coordinates.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point2::new(x, y))
    }

    /// Returns the anchor position.
    #[must_use]
    pub const fn position(&self) -> &Point2<f64> {
        &self.position
    }
}

impl From<Point2<f64>> for Anchor {
    fn from(position: Point2<f64>) -> Self {
        Self::new(position)
    }
}

/// Weighted traffic between two anchors.
///
/// The weight multiplies the routing cost of the demand, so a demand of
/// weight 3 counts as three single-container trips.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand {
    origin: usize,
    destination: usize,
    weight: f64,
}

impl Demand {
    /// Creates a demand between two anchor indices.
    #[must_use]
    pub const fn new(origin: usize, destination: usize, weight: f64) -> Self {
        Self {
            origin,
            destination,
            weight,
        }
    }

    /// Returns the origin anchor index.
    #[must_use]
    pub const fn origin(&self) -> usize {
        self.origin
    }

    /// Returns the destination anchor index.
    #[must_use]
    pub const fn destination(&self) -> usize {
        self.destination
    }

    /// Returns the demand weight.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns `true` if the demand starts and ends at the same anchor.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        self.origin == self.destination
    }
}

/// A shipping order placed at a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Index of the destination anchor.
    pub destination: usize,
    /// Number of containers to ship.
    pub containers: u32,
}

impl Order {
    /// Creates an order.
    #[must_use]
    pub const fn new(destination: usize, containers: u32) -> Self {
        Self {
            destination,
            containers,
        }
    }
}

/// The outstanding orders of one port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    /// Creates an empty order book.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Adds an order.
    #[must_use]
    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Adds an order in place.
    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Returns the orders.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Returns the total number of containers across all orders.
    #[must_use]
    pub fn total_containers(&self) -> u64 {
        self.orders.iter().map(|o| u64::from(o.containers)).sum()
    }

    /// Returns `true` if there are no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl FromIterator<Order> for OrderBook {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        Self {
            orders: iter.into_iter().collect(),
        }
    }
}

/// Turns per-port order books into a demand list.
///
/// The book at index `i` belongs to anchor `i`. Each order becomes one demand
/// weighted by its container count; orders with zero containers are skipped.
/// Books are visited in index order and orders in insertion order.
#[must_use]
pub fn demands_from_order_books(books: &[OrderBook]) -> Vec<Demand> {
    books
        .iter()
        .enumerate()
        .flat_map(|(origin, book)| {
            book.orders()
                .iter()
                .filter(|order| order.containers > 0)
                .map(move |order| {
                    Demand::new(origin, order.destination, f64::from(order.containers))
                })
        })
        .collect()
}
