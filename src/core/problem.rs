use super::Cost;
use std::fmt::Display;

/// The header of an encoded problem.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    name: String,
    max_constraint_arity: usize,
    format: String,
}

impl Presentation {
    /// Builds a new presentation.
    ///
    /// The problem is a minimization problem.
    pub fn new(name: &str, max_constraint_arity: usize, format: &str) -> Self {
        Self {
            name: name.to_string(),
            max_constraint_arity,
            format: format.to_string(),
        }
    }

    /// Returns the name of the problem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared maximal arity of the constraints.
    pub fn max_constraint_arity(&self) -> usize {
        self.max_constraint_arity
    }

    /// Returns the format tag.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns `true` if the costs must be maximized.
    pub fn maximize(&self) -> bool {
        false
    }
}

/// A named list of integer values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    name: String,
    values: Vec<i64>,
}

impl Domain {
    /// Builds a new domain.
    pub fn new(name: &str, values: Vec<i64>) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }

    /// Returns the name of the domain.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values of the domain.
    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// A variable, its domain and the agent that owns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDecl {
    name: String,
    domain: String,
    agent: String,
}

impl VariableDecl {
    /// Builds a new variable declaration.
    pub fn new(name: &str, domain: &str, agent: &str) -> Self {
        Self {
            name: name.to_string(),
            domain: domain.to_string(),
            agent: agent.to_string(),
        }
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the variable domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the name of the owning agent.
    pub fn agent(&self) -> &str {
        &self.agent
    }
}

/// The cost a relation gives to a tuple.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RelationCost {
    /// A finite cost.
    Finite(Cost),
    /// The tuple is forbidden.
    Infinity,
}

impl Display for RelationCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationCost::Finite(c) => write!(f, "{}", c),
            RelationCost::Infinity => write!(f, "infinity"),
        }
    }
}

/// A soft relation: a named cost table over tuples of values.
///
/// Tuples that are not listed get the default cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    name: String,
    arity: usize,
    default_cost: Cost,
    tuples: Vec<(RelationCost, Vec<i64>)>,
}

impl Relation {
    /// Builds a new relation with no tuples and a default cost of zero.
    pub fn new(name: String, arity: usize) -> Self {
        Self {
            name,
            arity,
            default_cost: Cost::Integer(0),
            tuples: Vec::new(),
        }
    }

    /// Adds a tuple to the relation.
    ///
    /// # Panics
    ///
    /// In case the number of values is not the arity of the relation, this function panics.
    pub fn add_tuple(&mut self, cost: RelationCost, values: Vec<i64>) {
        if values.len() != self.arity {
            panic!("tuple width differs from the relation arity");
        }
        self.tuples.push((cost, values));
    }

    /// Builds a relation of the given arity forbidding a single tuple.
    pub(crate) fn forbidding(name: String, values: Vec<i64>) -> Self {
        let mut relation = Relation::new(name, values.len());
        relation.add_tuple(RelationCost::Infinity, values);
        relation
    }

    /// Returns the name of the relation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of values in the tuples.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the cost of the tuples that are not listed.
    pub fn default_cost(&self) -> Cost {
        self.default_cost
    }

    /// Returns the number of listed tuples.
    pub fn n_tuples(&self) -> usize {
        self.tuples.len()
    }

    /// Iterates over the listed tuples and their costs.
    pub fn iter_tuples(&self) -> impl Iterator<Item = (&RelationCost, &[i64])> + '_ {
        self.tuples.iter().map(|(c, t)| (c, t.as_slice()))
    }
}

/// A constraint: a relation applied to an ordered list of variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    name: String,
    scope: Vec<String>,
    reference: String,
}

impl Constraint {
    /// Builds a new constraint.
    pub fn new(name: String, scope: Vec<String>, reference: &str) -> Self {
        Self {
            name,
            scope,
            reference: reference.to_string(),
        }
    }

    /// Returns the name of the constraint.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of variables in the scope.
    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    /// Returns the names of the variables the relation applies to.
    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// Returns the name of the relation.
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// A DCOP, ready to be written in a solver input format.
///
/// Each section is an append-only list; the writers declare the number of elements from the lists themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedProblem {
    presentation: Presentation,
    agents: Vec<String>,
    domains: Vec<Domain>,
    variables: Vec<VariableDecl>,
    relations: Vec<Relation>,
    constraints: Vec<Constraint>,
}

impl EncodedProblem {
    /// Builds an empty problem.
    pub fn new(presentation: Presentation) -> Self {
        Self {
            presentation,
            agents: Vec::new(),
            domains: Vec::new(),
            variables: Vec::new(),
            relations: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Adds an agent.
    pub fn add_agent(&mut self, name: &str) {
        self.agents.push(name.to_string());
    }

    /// Adds a domain.
    pub fn add_domain(&mut self, domain: Domain) {
        self.domains.push(domain);
    }

    /// Adds a variable.
    pub fn add_variable(&mut self, variable: VariableDecl) {
        self.variables.push(variable);
    }

    /// Adds a relation and a constraint applying it.
    ///
    /// # Panics
    ///
    /// In case the constraint does not refer to the relation, or their arities differ, this function panics.
    pub fn add_constrained_relation(&mut self, relation: Relation, constraint: Constraint) {
        if constraint.reference() != relation.name() || constraint.arity() != relation.arity() {
            panic!("constraint does not match its relation");
        }
        self.relations.push(relation);
        self.constraints.push(constraint);
    }

    /// Returns the presentation.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Returns the agents.
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// Returns the domains.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Returns the variables.
    pub fn variables(&self) -> &[VariableDecl] {
        &self.variables
    }

    /// Returns the relations.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Returns the constraints.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidding() {
        let relation = Relation::forbidding("r".to_string(), vec![1, 1]);
        assert_eq!(2, relation.arity());
        assert_eq!(1, relation.n_tuples());
        assert_eq!(Cost::Integer(0), relation.default_cost());
        assert_eq!(
            vec![(&RelationCost::Infinity, [1, 1].as_slice())],
            relation.iter_tuples().collect::<Vec<_>>()
        );
    }

    #[test]
    #[should_panic(expected = "tuple width differs from the relation arity")]
    fn test_add_tuple_wrong_width() {
        let mut relation = Relation::new("r".to_string(), 2);
        relation.add_tuple(RelationCost::Infinity, vec![1]);
    }

    #[test]
    #[should_panic(expected = "constraint does not match its relation")]
    fn test_constraint_wrong_arity() {
        let mut problem = EncodedProblem::new(Presentation::new("p", 1, "f"));
        problem.add_constrained_relation(
            Relation::forbidding("r".to_string(), vec![0]),
            Constraint::new("c".to_string(), vec!["x".to_string(), "y".to_string()], "r"),
        );
    }

    #[test]
    fn test_infinity_display() {
        assert_eq!("infinity", RelationCost::Infinity.to_string());
        assert_eq!("4", RelationCost::Finite(Cost::Integer(4)).to_string());
    }
}
