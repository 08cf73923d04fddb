use std::collections::HashSet;

use super::error::RegistryError;

/// Self-rotation rate of the star in rad/s, used when the data doesn't author one.
pub const STAR_SPIN_RATE: f64 = 0.02;

/// Linear RGB color, each channel in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode an authored `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Fixed-radius circular orbit around the parent's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSpec {
    /// Distance from the parent's center, in scene units.
    pub distance: f64,
    /// Radians per second at speed multiplier 1.
    pub angular_speed: f64,
}

/// Identity, geometry and motion of one celestial body.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBodySpec {
    pub name: String,
    pub description: String,
    pub radius: f64,
    pub color: Rgb,
    /// Self-rotation rate in radians per second at speed multiplier 1.
    pub rotation_speed: f64,
    /// `None` for the star only.
    pub orbit: Option<OrbitSpec>,
}

impl CelestialBodySpec {
    pub fn star(name: impl Into<String>, description: impl Into<String>, radius: f64, color: Rgb) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            radius,
            color,
            rotation_speed: STAR_SPIN_RATE,
            orbit: None,
        }
    }

    pub fn orbiting(
        name: impl Into<String>,
        description: impl Into<String>,
        radius: f64,
        color: Rgb,
        distance: f64,
        orbit_speed: f64,
        rotation_speed: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            radius,
            color,
            rotation_speed,
            orbit: Some(OrbitSpec {
                distance,
                angular_speed: orbit_speed,
            }),
        }
    }

    fn validate_orbiting(&self) -> Result<(), RegistryError> {
        self.validate_common()?;
        let orbit = self.orbit.ok_or_else(|| RegistryError::MissingOrbit {
            body: self.name.clone(),
        })?;
        if !(orbit.distance.is_finite() && orbit.distance > 0.0) {
            return Err(RegistryError::InvalidDistance {
                body: self.name.clone(),
                value: orbit.distance,
            });
        }
        if !orbit.angular_speed.is_finite() {
            return Err(RegistryError::NonFiniteSpeed {
                body: self.name.clone(),
                field: "orbit speed",
                value: orbit.angular_speed,
            });
        }
        Ok(())
    }

    fn validate_common(&self) -> Result<(), RegistryError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(RegistryError::InvalidRadius {
                body: self.name.clone(),
                value: self.radius,
            });
        }
        if !self.rotation_speed.is_finite() {
            return Err(RegistryError::NonFiniteSpeed {
                body: self.name.clone(),
                field: "rotation speed",
                value: self.rotation_speed,
            });
        }
        Ok(())
    }
}

/// Flat ring around a planet's equator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub color: Rgb,
}

/// A planet with its moons (in orbital order) and optional ring.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSpec {
    pub body: CelestialBodySpec,
    pub moons: Vec<CelestialBodySpec>,
    pub ring: Option<RingSpec>,
}

impl PlanetSpec {
    pub fn new(body: CelestialBodySpec) -> Self {
        Self {
            body,
            moons: Vec::new(),
            ring: None,
        }
    }

    pub fn with_moon(mut self, moon: CelestialBodySpec) -> Self {
        self.moons.push(moon);
        self
    }

    pub fn with_ring(mut self, ring: RingSpec) -> Self {
        self.ring = Some(ring);
        self
    }
}

/// Read-only table of every body in the system, fully known at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    star: CelestialBodySpec,
    planets: Vec<PlanetSpec>,
}

impl Registry {
    /// Assemble and validate a registry.
    pub fn new(star: CelestialBodySpec, planets: Vec<PlanetSpec>) -> Result<Self, RegistryError> {
        let registry = Self { star, planets };
        registry.validate()?;
        Ok(registry)
    }

    pub fn star(&self) -> &CelestialBodySpec {
        &self.star
    }

    /// Planets in display/orbital order.
    pub fn planets(&self) -> &[PlanetSpec] {
        &self.planets
    }

    /// Star, planets and moons.
    pub fn body_count(&self) -> usize {
        1 + self
            .planets
            .iter()
            .map(|p| 1 + p.moons.len())
            .sum::<usize>()
    }

    /// Iterate every body spec, star first, depth-first.
    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBodySpec> {
        std::iter::once(&self.star).chain(
            self.planets
                .iter()
                .flat_map(|p| std::iter::once(&p.body).chain(p.moons.iter())),
        )
    }

    /// Check every constraint on the authored data. The first violation wins.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.star.orbit.is_some() {
            return Err(RegistryError::StarHasOrbit {
                body: self.star.name.clone(),
            });
        }
        self.star.validate_common()?;

        for planet in &self.planets {
            planet.body.validate_orbiting()?;
            if let Some(ring) = &planet.ring {
                let ok = ring.inner_radius.is_finite()
                    && ring.outer_radius.is_finite()
                    && ring.inner_radius > 0.0
                    && ring.inner_radius < ring.outer_radius;
                if !ok {
                    return Err(RegistryError::InvalidRing {
                        body: planet.body.name.clone(),
                        inner: ring.inner_radius,
                        outer: ring.outer_radius,
                    });
                }
            }
            for moon in &planet.moons {
                moon.validate_orbiting()?;
            }
        }

        let mut seen = HashSet::with_capacity(self.body_count());
        for (position, body) in self.bodies().enumerate() {
            if body.name.trim().is_empty() {
                return Err(RegistryError::EmptyName {
                    position: format!("position {position}"),
                });
            }
            if !seen.insert(body.name.as_str()) {
                return Err(RegistryError::DuplicateName {
                    name: body.name.clone(),
                });
            }
        }
        Ok(())
    }
}
