use std::fmt::Display;

use itertools::Itertools;

use crate::{math::Bijection, KTssAutomaton, State};

/// Escapes a label so that it can be placed between double quotes in a DOT document.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Attributes of a node in a DOT document.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
    /// The color of a node
    Color(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{}\"", escape_label(s)),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
            DotStateAttribute::Color(c) => write!(f, "color=\"{c}\""),
        }
    }
}

/// Attributes of an edge in a DOT document.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{}\"", escape_label(lbl)),
        }
    }
}

/// Implemented by objects that can be drawn as a graph. Nodes and edges are referred to by
/// identifiers, which must be valid DOT identifiers.
pub trait Dottable {
    /// The name of the graph.
    fn dot_name(&self) -> Option<String>;

    /// Returns the identifiers of all nodes together with their attributes.
    fn dot_states(&self) -> Vec<(String, Vec<DotStateAttribute>)>;

    /// Returns all edges as (origin identifier, target identifier, attributes).
    fn dot_transitions(&self) -> Vec<(String, String, Vec<DotTransitionAttribute>)>;

    /// Additional statements that are placed right after the opening of the graph.
    fn dot_header_statements(&self) -> Vec<String> {
        vec![]
    }

    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String {
        let header = std::iter::once(format!(
            "digraph {} {{",
            self.dot_name().unwrap_or("A".to_string())
        ))
        .chain(self.dot_header_statements());

        let states = self
            .dot_states()
            .into_iter()
            .map(|(ident, attributes)| format!("{ident} [{}]", attributes.iter().join(", ")));

        let transitions = self
            .dot_transitions()
            .into_iter()
            .map(|(origin, target, attributes)| {
                format!("{origin} -> {target} [{}]", attributes.iter().join(", "))
            });

        header
            .chain(states)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    /// Attempts to render the object to a PNG file with the given filename. This method
    /// is only available on the `graphviz` crate feature, makes use of temporary files and
    /// requires the `dot` executable to be installed.
    #[cfg(feature = "graphviz")]
    fn render_to_file_name(&self, filename: &str) -> Result<(), std::io::Error> {
        use std::io::Write;
        use tracing::trace;

        trace!("Outputting dot and rendering to png");
        let dot = self.dot_representation();
        let mut tempfile = tempfile::NamedTempFile::new()?;

        tempfile.write_all(dot.as_bytes())?;
        let tempfile_name = tempfile.path();

        let mut command = std::process::Command::new("dot");
        command
            .arg("-Tpng")
            .arg("-o")
            .arg(filename)
            .arg(tempfile_name);
        run_renderer(command)
    }
}

/// Runs `command` to completion and turns a non-zero exit status into an error that carries
/// everything the command wrote to stderr.
#[cfg(feature = "graphviz")]
fn run_renderer(mut command: std::process::Command) -> Result<(), std::io::Error> {
    // stderr is drained while waiting, a full pipe would otherwise block the child
    let output = command
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .spawn()?
        .wait_with_output()?;
    if output.status.success() {
        Ok(())
    } else {
        let message = String::from_utf8_lossy(&output.stderr);
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            if message.is_empty() {
                format!("dot failed with {}", output.status)
            } else {
                message.into_owned()
            },
        ))
    }
}

impl KTssAutomaton {
    /// Assigns each state a numeric identifier, following the order of the states.
    fn state_ids(&self) -> Bijection<State, usize> {
        self.states()
            .iter()
            .cloned()
            .enumerate()
            .map(|(id, state)| (state, id))
            .collect()
    }

    fn dot_state_ident(ids: &Bijection<State, usize>, state: &State) -> String {
        // validation guarantees that every endpoint is a state
        ids.get_by_left(state)
            .map(|id| format!("q{id}"))
            .unwrap_or_else(|| "undefined".to_string())
    }
}

impl Dottable for KTssAutomaton {
    fn dot_name(&self) -> Option<String> {
        Some("DFA".into())
    }

    fn dot_header_statements(&self) -> Vec<String> {
        vec![
            "rankdir=LR".to_string(),
            "init [label=\"\", shape=none]".to_string(),
            format!(
                "init -> {}",
                Self::dot_state_ident(&self.state_ids(), self.initial())
            ),
        ]
    }

    fn dot_states(&self) -> Vec<(String, Vec<DotStateAttribute>)> {
        let ids = self.state_ids();
        self.states()
            .iter()
            .map(|state| {
                let (shape, color) = match (state == self.initial(), self.is_accepting(state)) {
                    (true, true) => ("doublecircle", "orange"),
                    (true, false) => ("circle", "orange"),
                    (false, true) => ("doublecircle", "red"),
                    (false, false) => ("circle", "gray"),
                };
                (
                    Self::dot_state_ident(&ids, state),
                    vec![
                        DotStateAttribute::Shape(shape.into()),
                        DotStateAttribute::Color(color.into()),
                        DotStateAttribute::Label(state.label().to_string()),
                    ],
                )
            })
            .collect()
    }

    fn dot_transitions(&self) -> Vec<(String, String, Vec<DotTransitionAttribute>)> {
        let ids = self.state_ids();
        self.transitions()
            .map(|t| {
                (
                    Self::dot_state_ident(&ids, &t.source),
                    Self::dot_state_ident(&ids, &t.target),
                    vec![DotTransitionAttribute::Label(t.symbol.to_string())],
                )
            })
            .collect()
    }
}
