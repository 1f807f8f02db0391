//! Command dispatch

use std::collections::HashSet;
use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, Guide, GuideState};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::session::run_session;
use crate::cli::{output, CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{GraphStore, NodeId};
use crate::infrastructure::di::ServiceContainer;

/// Resolve settings from config layers plus command-line overrides.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        settings.data_dir = crate::config::expand_env_vars(data);
    }
    if let Some(start) = cli.start {
        settings.start_id = Some(start);
    }
    if cli.no_color {
        settings.color = false;
    }
    Ok(settings)
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    if !settings.color {
        output::disable_colors();
    }

    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => config_command(command, &settings),
        Some(Commands::Check { json }) => {
            let container = ServiceContainer::new(settings)?;
            check(&container.load_guide(), *json)
        }
        Some(Commands::Tree) => {
            let container = ServiceContainer::new(settings)?;
            tree(&container.load_guide())
        }
        Some(Commands::Run) | None => {
            let container = ServiceContainer::new(settings)?;
            let mut guide = container.load_guide();
            ready_or_fail(&guide)?;
            run_session(guide.navigator_mut()?, container.prompter.as_ref())
        }
    }
}

/// Turn a non-Ready guide into the error the user sees.
fn ready_or_fail(guide: &Guide) -> CliResult<()> {
    match guide.state() {
        GuideState::Ready(_) => Ok(()),
        GuideState::Error(e) => Err(e.clone().into()),
        other => Err(ApplicationError::NotReady { state: other.name() }.into()),
    }
}

#[instrument(level = "debug", skip(guide))]
fn check(guide: &Guide, json: bool) -> CliResult<()> {
    let snapshot = guide.debug_snapshot();
    if json {
        let rendered = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CliError::Internal(format!("cannot render snapshot: {e}")))?;
        output::info(&rendered);
        return ready_or_fail(guide);
    }

    match guide.state() {
        GuideState::Ready(navigator) => {
            output::success(&format!(
                "ready: {} nodes, root {}",
                snapshot.nodes,
                navigator.path()[0]
            ));
            if snapshot.dangling_edges.is_empty() {
                output::success(&"no dangling edges");
            } else {
                output::failure(&format!("{} dangling edges", snapshot.dangling_edges.len()));
                for edge in &snapshot.dangling_edges {
                    output::detail(&format!("{} -> {} (unknown target)", edge.parent, edge.child));
                }
            }
        }
        GuideState::Empty => output::failure(&"dataset contains no nodes"),
        GuideState::Error(e) => output::failure(e),
        GuideState::Loading => output::failure(&"dataset not loaded"),
    }
    ready_or_fail(guide)
}

fn tree(guide: &Guide) -> CliResult<()> {
    ready_or_fail(guide)?;
    let navigator = guide.navigator()?;
    output::info(&render_tree(navigator.graph(), navigator.path()[0]));
    Ok(())
}

/// Render the graph below `id`.
///
/// Each node is expanded once; later occurrences are printed with `(see above)`,
/// and a node already on the current branch with `(cycle)`.
pub fn render_tree(graph: &GraphStore, id: NodeId) -> Tree<String> {
    render_node(graph, id, &mut HashSet::new(), &mut HashSet::new())
}

fn render_node(
    graph: &GraphStore,
    id: NodeId,
    branch: &mut HashSet<NodeId>,
    expanded: &mut HashSet<NodeId>,
) -> Tree<String> {
    let label = graph
        .get(id)
        .map(|node| format!("{} [{}]", node.label, id))
        .unwrap_or_else(|| format!("? [{id}]"));
    if branch.contains(&id) {
        debug!("cycle at {id}");
        return Tree::new(format!("{label} (cycle)"));
    }
    if !expanded.insert(id) {
        return Tree::new(format!("{label} (see above)"));
    }
    branch.insert(id);
    let leaves: Vec<Tree<String>> = graph
        .children_of(id)
        .iter()
        .map(|child| render_node(graph, *child, branch, expanded))
        .collect();
    branch.remove(&id);
    Tree::new(label).with_leaves(leaves)
}

fn config_command(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::info(&"global: (no config directory)"),
            }
            output::info(&format!(
                "local:  {}",
                local_config_path(std::path::Path::new(".")).display()
            ));
        }
    }
    Ok(())
}
