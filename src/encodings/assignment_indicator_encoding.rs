use super::{subsets::binomial, EncodingOptions, Subsets, ToEncodedProblem};
use crate::core::{
    Constraint, Domain, EncodedProblem, EncodingError, Instance, Presentation, Relation,
    RelationCost, VariableDecl,
};

const DOMAIN_NAME: &str = "bin";

/// The assignment-indicator modeling.
///
/// Variable `x{i}_{j}` is set to 1 if and only if vehicle `i` picks up passenger `j` (both 1-based).
/// The variables of a vehicle are owned by the agent of this vehicle.
///
/// The constraints are, in this order:
/// - a unary relation for each variable, costing the (vehicle, passenger) cost when the variable is set;
/// - for each passenger, a binary relation forbidding two vehicles to pick it up, for each pair of vehicles,
///   followed by a relation over all the vehicles forbidding that no vehicle picks it up;
/// - for each vehicle of capacity `K` lower than the number of passengers,
///   a relation for each subset of `K+1` passengers forbidding the vehicle to pick them all up.
pub struct AssignmentIndicatorEncoding<'a> {
    instance: &'a Instance,
    options: &'a EncodingOptions,
}

impl<'a> AssignmentIndicatorEncoding<'a> {
    /// Builds the encoding for an instance.
    ///
    /// Passengers cannot be covered without any vehicle;
    /// in this case, [`EncodingError::NoVehicles`] is returned.
    pub fn try_new(
        instance: &'a Instance,
        options: &'a EncodingOptions,
    ) -> Result<Self, EncodingError> {
        if instance.vehicles().is_empty() && !instance.passengers().is_empty() {
            return Err(EncodingError::NoVehicles);
        }
        Ok(Self { instance, options })
    }

    fn var_name(vehicle_index: usize, passenger_index: usize) -> String {
        format!("x{}_{}", vehicle_index + 1, passenger_index + 1)
    }

    fn max_constraint_arity(&self) -> usize {
        let max_capacity_arity = self
            .instance
            .vehicles()
            .iter()
            .map(|v| v.capacity() as usize + 1)
            .max()
            .unwrap_or(2);
        [self.instance.vehicles().len(), max_capacity_arity, 2]
            .into_iter()
            .max()
            .unwrap_or(1)
    }

    fn encode_unit_costs(&self, problem: &mut EncodedProblem) {
        (0..self.instance.vehicles().len()).for_each(|i| {
            (0..self.instance.passengers().len()).for_each(|j| {
                let var = Self::var_name(i, j);
                let mut relation = Relation::new(format!("r_cost_{}", var), 1);
                relation.add_tuple(RelationCost::Finite(self.instance.cost(i, j)), vec![1]);
                let constraint =
                    Constraint::new(format!("cost_{}", var), vec![var], relation.name());
                problem.add_constrained_relation(relation, constraint);
            })
        });
    }

    fn encode_passenger_uniqueness(&self, problem: &mut EncodedProblem) {
        let n_vehicles = self.instance.vehicles().len();
        (0..self.instance.passengers().len()).for_each(|j| {
            Subsets::new(n_vehicles, 2).iter().for_each(|pair| {
                let suffix = format!("p{}_v{}_v{}", j + 1, pair[0] + 1, pair[1] + 1);
                let relation = Relation::forbidding(format!("r_amo_{}", suffix), vec![1, 1]);
                let scope = pair.iter().map(|i| Self::var_name(*i, j)).collect();
                let constraint = Constraint::new(format!("amo_{}", suffix), scope, relation.name());
                problem.add_constrained_relation(relation, constraint);
            });
            let relation =
                Relation::forbidding(format!("r_cover_p{}", j + 1), vec![0; n_vehicles]);
            let scope = (0..n_vehicles).map(|i| Self::var_name(i, j)).collect();
            let constraint = Constraint::new(format!("cover_p{}", j + 1), scope, relation.name());
            problem.add_constrained_relation(relation, constraint);
        });
    }

    fn encode_capacities(&self, problem: &mut EncodedProblem) {
        let n_passengers = self.instance.passengers().len();
        self.instance
            .vehicles()
            .iter()
            .enumerate()
            .filter(|(_, v)| (v.capacity() as usize) < n_passengers)
            .for_each(|(i, v)| {
                let subset_size = v.capacity() as usize + 1;
                Subsets::new(n_passengers, subset_size)
                    .iter()
                    .enumerate()
                    .for_each(|(k, subset)| {
                        let suffix = format!("v{}_{}", i + 1, k + 1);
                        let relation =
                            Relation::forbidding(format!("r_cap_{}", suffix), vec![1; subset_size]);
                        let scope = subset.iter().map(|j| Self::var_name(i, *j)).collect();
                        let constraint =
                            Constraint::new(format!("cap_{}", suffix), scope, relation.name());
                        problem.add_constrained_relation(relation, constraint);
                    });
            });
    }
}

impl ToEncodedProblem for AssignmentIndicatorEncoding<'_> {
    fn to_encoded_problem(&self) -> EncodedProblem {
        let mut problem = EncodedProblem::new(Presentation::new(
            self.instance.name(),
            self.max_constraint_arity(),
            &self.options.format,
        ));
        self.instance
            .vehicles()
            .iter()
            .for_each(|v| problem.add_agent(v.id()));
        problem.add_domain(Domain::new(DOMAIN_NAME, vec![0, 1]));
        self.instance
            .vehicles()
            .iter()
            .enumerate()
            .for_each(|(i, v)| {
                (0..self.instance.passengers().len()).for_each(|j| {
                    problem.add_variable(VariableDecl::new(
                        &Self::var_name(i, j),
                        DOMAIN_NAME,
                        v.id(),
                    ))
                })
            });
        self.encode_unit_costs(&mut problem);
        self.encode_passenger_uniqueness(&mut problem);
        self.encode_capacities(&mut problem);
        problem
    }

    fn n_variables(&self) -> usize {
        self.instance.vehicles().len() * self.instance.passengers().len()
    }

    fn n_constraints(&self) -> u128 {
        let n_vehicles = self.instance.vehicles().len();
        let n_passengers = self.instance.passengers().len();
        let per_passenger = binomial(n_vehicles, 2).saturating_add(1);
        self.instance
            .vehicles()
            .iter()
            .filter(|v| (v.capacity() as usize) < n_passengers)
            .map(|v| binomial(n_passengers, v.capacity() as usize + 1))
            .fold(
                (n_vehicles as u128 * n_passengers as u128)
                    .saturating_add(per_passenger.saturating_mul(n_passengers as u128)),
                u128::saturating_add,
            )
    }
}
