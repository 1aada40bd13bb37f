use super::{
    CostRounding, DestinationPolicy, EncodingError, Instance, Passenger, Position, Vehicle,
    Weights,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const PASSENGERS_SEED_OFFSET: u64 = 1;
const COMMON_DESTINATION_SEED_OFFSET: u64 = 500;
const PASSENGER_DESTINATIONS_SEED_OFFSET: u64 = 999;

/// Draws `n` positions uniformly in the rectangle `[0, width] x [0, height]`.
///
/// The same seed always gives the same positions.
/// Both dimensions must be finite and non-negative, or [`EncodingError::InvalidArea`] is returned.
pub fn generate_positions(
    n: usize,
    width: f64,
    height: f64,
    seed: u64,
) -> Result<Vec<Position>, EncodingError> {
    if [width, height].iter().any(|d| !d.is_finite() || *d < 0.) {
        return Err(EncodingError::InvalidArea);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..n)
        .map(|_| Position::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height)))
        .collect())
}

/// The kind of destinations a [`ScenarioGenerator`] draws.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DestinationKind {
    /// No destination.
    #[default]
    None,
    /// A single destination for all passengers.
    Common,
    /// A destination for each passenger.
    PerPassenger,
}

/// Builds random instances from a handful of parameters.
///
/// Vehicles are named `v1`, `v2`, ... and share the same capacity; passengers are named `p1`, `p2`, ...
/// Each kind of element is drawn from its own seed, derived from the generator seed, so that changing the number of passengers does not move the vehicles.
#[derive(Clone, Debug)]
pub struct ScenarioGenerator {
    /// The number of vehicles.
    pub n_vehicles: usize,
    /// The capacity of each vehicle.
    pub capacity: u32,
    /// The number of passengers.
    pub n_passengers: usize,
    /// The width of the area.
    pub width: f64,
    /// The height of the area.
    pub height: f64,
    /// The seed of the random generator.
    pub seed: u64,
    /// The kind of destinations.
    pub destination: DestinationKind,
    /// The cost weights.
    pub weights: Weights,
    /// Whether costs are rounded.
    pub rounding: CostRounding,
}

impl Default for ScenarioGenerator {
    fn default() -> Self {
        Self {
            n_vehicles: 4,
            capacity: 3,
            n_passengers: 6,
            width: 100.,
            height: 100.,
            seed: 123,
            destination: DestinationKind::None,
            weights: Weights::default(),
            rounding: CostRounding::NearestInteger,
        }
    }
}

impl ScenarioGenerator {
    /// Draws an instance.
    pub fn generate(&self, name: &str) -> Result<Instance, EncodingError> {
        let vehicles = generate_positions(self.n_vehicles, self.width, self.height, self.seed)?
            .into_iter()
            .enumerate()
            .map(|(i, pos)| Vehicle::new(&format!("v{}", i + 1), self.capacity, pos))
            .collect::<Vec<_>>();
        let passengers = generate_positions(
            self.n_passengers,
            self.width,
            self.height,
            self.seed.wrapping_add(PASSENGERS_SEED_OFFSET),
        )?
        .into_iter()
        .enumerate()
        .map(|(j, pos)| Passenger::new(&format!("p{}", j + 1), pos))
        .collect::<Vec<_>>();
        let destination = match self.destination {
            DestinationKind::None => DestinationPolicy::None,
            DestinationKind::Common => DestinationPolicy::Common(
                generate_positions(
                    1,
                    self.width,
                    self.height,
                    self.seed.wrapping_add(COMMON_DESTINATION_SEED_OFFSET),
                )?[0],
            ),
            DestinationKind::PerPassenger => DestinationPolicy::PerPassenger(
                passengers
                    .iter()
                    .zip(generate_positions(
                        passengers.len(),
                        self.width,
                        self.height,
                        self.seed.wrapping_add(PASSENGER_DESTINATIONS_SEED_OFFSET),
                    )?)
                    .map(|(p, d)| (p.id().to_string(), d))
                    .collect(),
            ),
        };
        Instance::from_positions(
            name,
            vehicles,
            passengers,
            destination,
            self.weights,
            self.rounding,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_reproducible() {
        assert_eq!(
            generate_positions(10, 50., 20., 7).unwrap(),
            generate_positions(10, 50., 20., 7).unwrap()
        );
        assert_ne!(
            generate_positions(10, 50., 20., 7).unwrap(),
            generate_positions(10, 50., 20., 8).unwrap()
        );
    }

    #[test]
    fn test_positions_in_area() {
        generate_positions(100, 50., 20., 1)
            .unwrap()
            .iter()
            .for_each(|p| {
                assert!((0. ..=50.).contains(&p.x));
                assert!((0. ..=20.).contains(&p.y));
            });
    }

    #[test]
    fn test_invalid_area() {
        assert_eq!(
            EncodingError::InvalidArea,
            generate_positions(1, -1., 10., 1).unwrap_err()
        );
        assert_eq!(
            EncodingError::InvalidArea,
            generate_positions(1, 10., f64::NAN, 1).unwrap_err()
        );
        assert_eq!(
            EncodingError::InvalidArea,
            generate_positions(0, f64::INFINITY, 10., 1).unwrap_err()
        );
        assert_eq!(vec![Position::new(0., 0.)], generate_positions(1, 0., 0., 1).unwrap());
        let generator = ScenarioGenerator {
            width: -1.,
            ..Default::default()
        };
        assert_eq!(
            EncodingError::InvalidArea,
            generator.generate("negative").unwrap_err()
        );
    }

    #[test]
    fn test_generate() {
        let generator = ScenarioGenerator {
            n_vehicles: 3,
            n_passengers: 5,
            destination: DestinationKind::PerPassenger,
            ..Default::default()
        };
        let instance = generator.generate("random").unwrap();
        assert_eq!(3, instance.vehicles().len());
        assert_eq!(5, instance.passengers().len());
        assert_eq!("v3", instance.vehicles()[2].id());
        assert_eq!("p5", instance.passengers()[4].id());
        assert!(instance
            .passengers()
            .iter()
            .all(|p| instance.destination().destination_of(p.id()).is_some()));
        assert_eq!(instance, generator.generate("random").unwrap());
    }

    #[test]
    fn test_vehicles_do_not_depend_on_passengers() {
        let small = ScenarioGenerator {
            n_passengers: 2,
            ..Default::default()
        };
        let large = ScenarioGenerator {
            n_passengers: 20,
            ..Default::default()
        };
        assert_eq!(
            small.generate("a").unwrap().vehicles(),
            large.generate("a").unwrap().vehicles()
        );
    }
}
