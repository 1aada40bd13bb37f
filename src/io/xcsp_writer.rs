use crate::core::EncodedProblem;
use anyhow::{Context, Result};
use std::{borrow::Cow, io::Write};

/// A structure used to write an encoded problem using the XCSP 2.1 format, as read by the FRODO solver.
///
/// The number of elements declared for each section is the length of the corresponding list of the problem,
/// and the arity declared for a constraint is the length of its scope.
#[derive(Default)]
pub struct XcspWriter;

impl XcspWriter {
    /// Writes the problem.
    pub fn write(&self, writer: &mut dyn Write, problem: &EncodedProblem) -> Result<()> {
        self.write_sections(writer, problem)
            .context("while writing an XCSP instance")
    }

    /// Writes the problem into a string.
    pub fn write_to_string(&self, problem: &EncodedProblem) -> String {
        let mut buffer = Vec::new();
        // writing into a vector does not fail and only valid UTF-8 is written
        self.write_sections(&mut buffer, problem)
            .expect("writing into a vector failed");
        String::from_utf8(buffer).expect("invalid UTF-8 in written problem")
    }

    fn write_sections(
        &self,
        writer: &mut dyn Write,
        problem: &EncodedProblem,
    ) -> std::io::Result<()> {
        writeln!(writer, "<instance>")?;
        let presentation = problem.presentation();
        writeln!(
            writer,
            r#"  <presentation name="{}" maxConstraintArity="{}" format="{}" maximize="{}"/>"#,
            escape(presentation.name()),
            presentation.max_constraint_arity(),
            escape(presentation.format()),
            presentation.maximize()
        )?;
        writeln!(writer, r#"  <agents nbAgents="{}">"#, problem.agents().len())?;
        problem
            .agents()
            .iter()
            .try_for_each(|a| writeln!(writer, r#"    <agent name="{}"/>"#, escape(a)))?;
        writeln!(writer, "  </agents>")?;
        writeln!(writer, r#"  <domains nbDomains="{}">"#, problem.domains().len())?;
        problem.domains().iter().try_for_each(|d| {
            writeln!(
                writer,
                r#"    <domain name="{}" nbValues="{}">{}</domain>"#,
                escape(d.name()),
                d.values().len(),
                join_values(d.values())
            )
        })?;
        writeln!(writer, "  </domains>")?;
        writeln!(
            writer,
            r#"  <variables nbVariables="{}">"#,
            problem.variables().len()
        )?;
        problem.variables().iter().try_for_each(|v| {
            writeln!(
                writer,
                r#"    <variable name="{}" domain="{}" agent="{}"/>"#,
                escape(v.name()),
                escape(v.domain()),
                escape(v.agent())
            )
        })?;
        writeln!(writer, "  </variables>")?;
        writeln!(
            writer,
            r#"  <relations nbRelations="{}">"#,
            problem.relations().len()
        )?;
        problem.relations().iter().try_for_each(|r| {
            let tuples = r
                .iter_tuples()
                .map(|(c, t)| format!("{}: {}", c, join_values(t)))
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(
                writer,
                r#"    <relation name="{}" arity="{}" semantics="soft" defaultCost="{}" nbTuples="{}">{}</relation>"#,
                escape(r.name()),
                r.arity(),
                r.default_cost(),
                r.n_tuples(),
                tuples
            )
        })?;
        writeln!(writer, "  </relations>")?;
        writeln!(
            writer,
            r#"  <constraints nbConstraints="{}">"#,
            problem.constraints().len()
        )?;
        problem.constraints().iter().try_for_each(|c| {
            writeln!(
                writer,
                r#"    <constraint name="{}" arity="{}" scope="{}" reference="{}"/>"#,
                escape(c.name()),
                c.arity(),
                escape(&c.scope().join(" ")),
                escape(c.reference())
            )
        })?;
        writeln!(writer, "  </constraints>")?;
        writeln!(writer, "</instance>")
    }
}

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces the characters XML reserves by their entities.
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 8);
    s.chars().for_each(|c| match c {
        '&' => escaped.push_str("&amp;"),
        '<' => escaped.push_str("&lt;"),
        '>' => escaped.push_str("&gt;"),
        '"' => escaped.push_str("&quot;"),
        '\'' => escaped.push_str("&apos;"),
        _ => escaped.push(c),
    });
    Cow::Owned(escaped)
}
