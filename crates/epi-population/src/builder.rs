//! Fluent builder for constructing a [`Population`] in one step.
//!
//! # Usage
//!
//! ```rust
//! use epi_core::{Coordinate, Demographic, LandUse, PlaceId};
//! use epi_population::{NewHost, PopulationBuilder};
//!
//! let pop = PopulationBuilder::new(/*seed=*/ 42)
//!     .place("home", Coordinate::ORIGIN, LandUse::Dwelling, 4.0)
//!     .place("office", Coordinate::planar(500.0, 0.0), LandUse::Office, 50.0)
//!     .host(NewHost::new("ada", Demographic::Adult, PlaceId(0)).secondary(PlaceId(1)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(pop.hosts.len(), 1);
//! assert_eq!(pop.occupants(PlaceId(0)).len(), 1);
//! ```

use epi_core::{Coordinate, LandUse};

use crate::{NewHost, Population, PopulationResult};

struct PlaceSpec {
    name:       String,
    coordinate: Coordinate,
    land_use:   LandUse,
    size:       f64,
}

/// Fluent builder for [`Population`].
///
/// Places receive `PlaceId`s in the order they are declared, so host specs
/// can refer to them before `build` runs.  All validation happens in
/// [`build`](Self::build).
pub struct PopulationBuilder {
    seed:   u64,
    places: Vec<PlaceSpec>,
    hosts:  Vec<NewHost>,
}

impl PopulationBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed, places: Vec::new(), hosts: Vec::new() }
    }

    pub fn place(
        mut self,
        name:       impl Into<String>,
        coordinate: Coordinate,
        land_use:   LandUse,
        size:       f64,
    ) -> Self {
        self.places.push(PlaceSpec { name: name.into(), coordinate, land_use, size });
        self
    }

    pub fn host(mut self, spec: NewHost) -> Self {
        self.hosts.push(spec);
        self
    }

    pub fn hosts(mut self, specs: impl IntoIterator<Item = NewHost>) -> Self {
        self.hosts.extend(specs);
        self
    }

    /// Add every place, then every host.
    pub fn build(self) -> PopulationResult<Population> {
        let mut pop = Population::new(self.seed);
        for p in self.places {
            pop.add_place(p.name, p.coordinate, p.land_use, p.size)?;
        }
        for h in self.hosts {
            pop.add_host(h)?;
        }
        log::debug!(
            "population built: {} places, {} hosts",
            pop.places().len(),
            pop.hosts.len()
        );
        Ok(pop)
    }
}
