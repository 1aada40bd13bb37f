use super::{subsets::binomial, EncodingOptions, Subsets, ToEncodedProblem};
use crate::core::{
    Constraint, Cost, Domain, EncodedProblem, EncodingError, Instance, Presentation, Relation,
    RelationCost, VariableDecl,
};

const DOMAIN_NAME: &str = "vehicles";

/// The passenger-domain modeling.
///
/// Variable `y{j}` holds the (1-based) index of the vehicle picking up passenger `j`.
/// Since a variable takes exactly one value, each passenger is picked up by exactly one vehicle without any dedicated constraint.
/// Variables are dispatched among the agents of the vehicles in a round-robin fashion, following the passenger order.
///
/// The constraints are a unary cost relation for each passenger,
/// then, for each vehicle of capacity `K` lower than the number of passengers,
/// a relation for each subset of `K+1` passengers forbidding them to take the value of this vehicle all together.
pub struct PassengerDomainEncoding<'a> {
    instance: &'a Instance,
    options: &'a EncodingOptions,
}

impl<'a> PassengerDomainEncoding<'a> {
    /// Builds the encoding for an instance.
    ///
    /// If the instance has passengers but no vehicles, no agent can own the variables and [`EncodingError::NoVehicles`] is returned.
    pub fn try_new(
        instance: &'a Instance,
        options: &'a EncodingOptions,
    ) -> Result<Self, EncodingError> {
        if instance.vehicles().is_empty() && !instance.passengers().is_empty() {
            return Err(EncodingError::NoVehicles);
        }
        Ok(Self { instance, options })
    }

    fn var_name(passenger_index: usize) -> String {
        format!("y{}", passenger_index + 1)
    }

    fn agent_of(&self, passenger_index: usize) -> &str {
        let vehicles = self.instance.vehicles();
        vehicles[passenger_index % vehicles.len()].id()
    }

    fn max_constraint_arity(&self) -> usize {
        let n_passengers = self.instance.passengers().len();
        self.instance
            .vehicles()
            .iter()
            .map(|v| v.capacity() as usize + 1)
            .max()
            .map(|a| usize::min(a, n_passengers))
            .unwrap_or(1)
            .max(1)
    }

    fn encode_unit_costs(&self, problem: &mut EncodedProblem) {
        (0..self.instance.passengers().len()).for_each(|j| {
            let var = Self::var_name(j);
            let relation = cost_relation(
                format!("r_cost_{}", var),
                (0..self.instance.vehicles().len()).map(|i| self.instance.cost(i, j)),
            );
            let constraint = Constraint::new(format!("cost_{}", var), vec![var], relation.name());
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
                let value = (i + 1) as i64;
                Subsets::new(n_passengers, subset_size)
                    .iter()
                    .enumerate()
                    .for_each(|(k, subset)| {
                        let suffix = format!("v{}_{}", i + 1, k + 1);
                        let relation = Relation::forbidding(
                            format!("r_cap_{}", suffix),
                            vec![value; subset_size],
                        );
                        let scope = subset.iter().map(|j| Self::var_name(*j)).collect();
                        let constraint =
                            Constraint::new(format!("cap_{}", suffix), scope, relation.name());
                        problem.add_constrained_relation(relation, constraint);
                    });
            });
    }
}

/// Builds a unary relation giving a cost to each vehicle value (1, 2, ...).
///
/// With no vehicles, the relation is empty; it never applies since the variable has no value.
fn cost_relation<I>(name: String, vehicle_costs: I) -> Relation
where
    I: Iterator<Item = Cost>,
{
    let mut relation = Relation::new(name, 1);
    vehicle_costs
        .enumerate()
        .for_each(|(i, c)| relation.add_tuple(RelationCost::Finite(c), vec![(i + 1) as i64]));
    relation
}

impl ToEncodedProblem for PassengerDomainEncoding<'_> {
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
        problem.add_domain(Domain::new(
            DOMAIN_NAME,
            (1..=self.instance.vehicles().len() as i64).collect(),
        ));
        (0..self.instance.passengers().len()).for_each(|j| {
            problem.add_variable(VariableDecl::new(
                &Self::var_name(j),
                DOMAIN_NAME,
                self.agent_of(j),
            ))
        });
        self.encode_unit_costs(&mut problem);
        self.encode_capacities(&mut problem);
        problem
    }

    fn n_variables(&self) -> usize {
        self.instance.passengers().len()
    }

    fn n_constraints(&self) -> u128 {
        let n_passengers = self.instance.passengers().len();
        self.instance
            .vehicles()
            .iter()
            .filter(|v| (v.capacity() as usize) < n_passengers)
            .map(|v| binomial(n_passengers, v.capacity() as usize + 1))
            .fold(n_passengers as u128, u128::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodings::tests::{
        assert_structurally_valid, brute_force_optimum, instance_from_costs, scenario,
    };
    use crate::io::XcspWriter;

    #[test]
    fn test_scenario() {
        let instance = scenario();
        let options = EncodingOptions::default();
        let problem = PassengerDomainEncoding::try_new(&instance, &options)
            .unwrap()
            .to_encoded_problem();
        let expected = r#"<instance>
  <presentation name="test" maxConstraintArity="2" format="XCSP 2.1_FRODO" maximize="false"/>
  <agents nbAgents="2">
    <agent name="v1"/>
    <agent name="v2"/>
  </agents>
  <domains nbDomains="1">
    <domain name="vehicles" nbValues="2">1 2</domain>
  </domains>
  <variables nbVariables="2">
    <variable name="y1" domain="vehicles" agent="v1"/>
    <variable name="y2" domain="vehicles" agent="v2"/>
  </variables>
  <relations nbRelations="4">
    <relation name="r_cost_y1" arity="1" semantics="soft" defaultCost="0" nbTuples="2">1: 1 | 5: 2</relation>
    <relation name="r_cost_y2" arity="1" semantics="soft" defaultCost="0" nbTuples="2">5: 1 | 1: 2</relation>
    <relation name="r_cap_v1_1" arity="2" semantics="soft" defaultCost="0" nbTuples="1">infinity: 1 1</relation>
    <relation name="r_cap_v2_1" arity="2" semantics="soft" defaultCost="0" nbTuples="1">infinity: 2 2</relation>
  </relations>
  <constraints nbConstraints="4">
    <constraint name="cost_y1" arity="1" scope="y1" reference="r_cost_y1"/>
    <constraint name="cost_y2" arity="1" scope="y2" reference="r_cost_y2"/>
    <constraint name="cap_v1_1" arity="2" scope="y1 y2" reference="r_cap_v1_1"/>
    <constraint name="cap_v2_1" arity="2" scope="y1 y2" reference="r_cap_v2_1"/>
  </constraints>
</instance>
"#;
        assert_eq!(expected, XcspWriter.write_to_string(&problem));
        assert_eq!(Some((2., vec![1, 2])), brute_force_optimum(&problem));
    }

    #[test]
    fn test_round_robin_agents() {
        let instance = instance_from_costs(&[5, 5], &[vec![1; 5], vec![1; 5]]);
        let options = EncodingOptions::default();
        let problem = PassengerDomainEncoding::try_new(&instance, &options)
            .unwrap()
            .to_encoded_problem();
        assert_eq!(
            vec!["v1", "v2", "v1", "v2", "v1"],
            problem
                .variables()
                .iter()
                .map(|v| v.agent())
                .collect::<Vec<_>>()
        );
        assert!(problem
            .constraints()
            .iter()
            .all(|c| !c.name().starts_with("cap_")));
        assert_eq!(5, problem.presentation().max_constraint_arity());
    }

    #[test]
    fn test_capacity_subsets() {
        let instance = instance_from_costs(&[1, 4], &[vec![1; 4], vec![1; 4]]);
        let options = EncodingOptions::default();
        let encoding = PassengerDomainEncoding::try_new(&instance, &options).unwrap();
        let problem = encoding.to_encoded_problem();
        let caps = problem
            .constraints()
            .iter()
            .filter(|c| c.name().starts_with("cap_"))
            .map(|c| c.scope().join(" "))
            .collect::<Vec<_>>();
        assert_eq!(
            vec!["y1 y2", "y1 y3", "y1 y4", "y2 y3", "y2 y4", "y3 y4"],
            caps
        );
        let expected = Subsets::new(4, 2)
            .iter()
            .map(|subset| {
                subset
                    .iter()
                    .map(|j| format!("y{}", j + 1))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>();
        assert_eq!(expected, caps);
        assert!(problem
            .relations()
            .iter()
            .filter(|r| r.name().starts_with("r_cap_"))
            .all(|r| r.iter_tuples().all(|(c, t)| *c == RelationCost::Infinity && t == [1, 1])));
        assert_eq!(10, encoding.n_constraints());
        assert_eq!(4, problem.presentation().max_constraint_arity());
        assert_structurally_valid(&problem);
    }

    #[test]
    fn test_no_passengers() {
        let instance = instance_from_costs(&[0, 3], &[vec![], vec![]]);
        let options = EncodingOptions::default();
        let problem = PassengerDomainEncoding::try_new(&instance, &options)
            .unwrap()
            .to_encoded_problem();
        assert!(problem.variables().is_empty());
        assert!(problem.constraints().is_empty());
        assert_eq!(1, problem.presentation().max_constraint_arity());
    }

    #[test]
    fn test_no_vehicles() {
        let options = EncodingOptions::default();
        let instance = instance_from_costs(&[], &[]);
        let problem = PassengerDomainEncoding::try_new(&instance, &options)
            .unwrap()
            .to_encoded_problem();
        assert!(problem.domains()[0].values().is_empty());
        let instance = crate::core::Instance::with_costs(
            "test",
            vec![],
            vec![crate::core::Passenger::new(
                "p1",
                crate::core::Position::new(0., 0.),
            )],
            crate::core::DestinationPolicy::None,
            crate::core::Weights::default(),
            |_, _| None,
        )
        .unwrap();
        assert_eq!(
            EncodingError::NoVehicles,
            PassengerDomainEncoding::try_new(&instance, &options)
                .err()
                .unwrap()
        );
    }

    #[test]
    fn test_empty_cost_relation() {
        let relation = cost_relation("r".to_string(), std::iter::empty());
        assert_eq!(1, relation.arity());
        assert_eq!(0, relation.n_tuples());
        assert_eq!(Cost::Integer(0), relation.default_cost());
    }
}
