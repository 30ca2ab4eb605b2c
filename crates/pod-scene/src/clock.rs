//! Angle accumulators that drive the planet spin and moon orbit.

/// Planet rotation and moon orbit angles in degrees.
///
/// The angles are never wrapped; trigonometric use is periodic so growth is harmless
/// over any realistic session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClocks {
    pub planet_rotation: f32,
    pub moon_orbit: f32,
    planet_rate: f32,
    moon_rate: f32,
}

impl Default for AnimationClocks {
    fn default() -> Self {
        Self::new(10.0, 30.0)
    }
}

impl AnimationClocks {
    /// Both angles start at zero. Rates are degrees per second.
    pub fn new(planet_deg_per_sec: f32, moon_deg_per_sec: f32) -> Self {
        Self {
            planet_rotation: 0.0,
            moon_orbit: 0.0,
            planet_rate: planet_deg_per_sec,
            moon_rate: moon_deg_per_sec,
        }
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.planet_rotation += self.planet_rate * delta_time;
        self.moon_orbit += self.moon_rate * delta_time;
    }
}
