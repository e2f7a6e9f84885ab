// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topological labels carried by edges.
//!
//! A [`Label`] records, for each of the two input geometries of an overlay-style
//! computation, where an edge lies relative to that geometry. Line edges only have an
//! `On` location; area edges also have `Left` and `Right`.

use core::fmt;

/// Position of a point relative to a geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// Strictly inside.
    Interior,
    /// On the boundary.
    Boundary,
    /// Outside.
    Exterior,
}

impl Location {
    /// One-letter code, as used in label dumps.
    pub const fn symbol(self) -> char {
        match self {
            Self::Interior => 'i',
            Self::Boundary => 'b',
            Self::Exterior => 'e',
        }
    }
}

/// Side of an edge a location refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// On the edge itself.
    On,
    /// To the left, walking the edge forwards.
    Left,
    /// To the right, walking the edge forwards.
    Right,
}

/// Locations of an edge relative to one geometry.
///
/// `None` means the location is not yet known.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyLocation {
    on: Option<Location>,
    /// `Some` only for area locations.
    sides: Option<[Option<Location>; 2]>,
}

impl TopologyLocation {
    /// A line location.
    pub const fn line(on: Option<Location>) -> Self {
        Self { on, sides: None }
    }

    /// An area location.
    pub const fn area(
        on: Option<Location>,
        left: Option<Location>,
        right: Option<Location>,
    ) -> Self {
        Self {
            on,
            sides: Some([left, right]),
        }
    }

    /// Location at `position`. Always `None` for sides of a line location.
    pub fn get(&self, position: Position) -> Option<Location> {
        match (position, self.sides) {
            (Position::On, _) => self.on,
            (Position::Left, Some([left, _])) => left,
            (Position::Right, Some([_, right])) => right,
            _ => None,
        }
    }

    /// Set the location at `position`, turning a line location into an area one when
    /// a side is set.
    pub fn set(&mut self, position: Position, location: Option<Location>) {
        match position {
            Position::On => self.on = location,
            Position::Left => self.sides.get_or_insert([None, None])[0] = location,
            Position::Right => self.sides.get_or_insert([None, None])[1] = location,
        }
    }

    /// Whether this location has left and right sides.
    pub fn is_area(&self) -> bool {
        self.sides.is_some()
    }

    /// Whether nothing is known.
    pub fn is_null(&self) -> bool {
        self.on.is_none() && self.sides.is_none_or(|s| s.iter().all(Option::is_none))
    }

    /// Swap left and right.
    pub fn flip(&mut self) {
        if let Some(sides) = &mut self.sides {
            sides.swap(0, 1);
        }
    }
}

impl fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = |l: Option<Location>| l.map_or('-', Location::symbol);
        match self.sides {
            Some([left, right]) => write!(f, "{}{}{}", sym(left), sym(self.on), sym(right)),
            None => write!(f, "{}", sym(self.on)),
        }
    }
}

/// Topological locations of an edge with respect to two geometries, indexed 0 and 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    locations: [TopologyLocation; 2],
}

impl Label {
    /// A line label for geometry `geom_index` (0 or 1); the other geometry is unknown.
    pub fn line(geom_index: usize, on: Location) -> Self {
        let mut label = Self::default();
        label.locations[geom_index] = TopologyLocation::line(Some(on));
        label
    }

    /// An area label for geometry `geom_index` (0 or 1); the other geometry is an
    /// unknown area location.
    pub fn area(geom_index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Self {
            locations: [TopologyLocation::area(None, None, None); 2],
        };
        label.locations[geom_index] = TopologyLocation::area(Some(on), Some(left), Some(right));
        label
    }

    /// Location relative to geometry `geom_index` at `position`.
    pub fn location(&self, geom_index: usize, position: Position) -> Option<Location> {
        self.locations[geom_index].get(position)
    }

    /// Set the location relative to geometry `geom_index` at `position`.
    pub fn set_location(&mut self, geom_index: usize, position: Position, location: Location) {
        self.locations[geom_index].set(position, Some(location));
    }

    /// Locations relative to geometry `geom_index`.
    pub fn topology_location(&self, geom_index: usize) -> &TopologyLocation {
        &self.locations[geom_index]
    }

    /// Whether either geometry has an area location.
    pub fn is_area(&self) -> bool {
        self.locations.iter().any(TopologyLocation::is_area)
    }

    /// Whether nothing is known about geometry `geom_index`.
    pub fn is_null(&self, geom_index: usize) -> bool {
        self.locations[geom_index].is_null()
    }

    /// Swap left and right for both geometries.
    pub fn flip(&mut self) {
        for loc in &mut self.locations {
            loc.flip();
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.locations[0], self.locations[1])
    }
}
