//! Non-interactive subcommands.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{bail, Result};
use tracing::{debug, info};

use learnmap_core::graph::{GraphSurface, SurfaceSettings};
use learnmap_core::{
    resolve_stage, Config, CurriculumCatalog, FileMasteryStore, KnowledgeGraph, MasteryStore,
    PrerequisiteNavigator, Stage,
};

use crate::export;

/// A stage graph with stored mastery applied.
pub struct Session {
    pub stage: Stage,
    pub graph: KnowledgeGraph,
    pub store: FileMasteryStore,
}

impl Session {
    /// Load the stage matching `grade` (or the configured default).
    pub fn open(config: &Config, grade: Option<&str>) -> Result<Self> {
        let catalog = CurriculumCatalog::from_config(&config.curriculum)?;
        let stage = resolve_stage(grade, &config.curriculum)?;
        let mut graph = catalog.load_graph(stage)?;

        let store = FileMasteryStore::new(&config.storage);
        let applied = store.apply_to(stage, &mut graph)?;
        debug!(%stage, applied, "stored mastery applied");

        Ok(Self {
            stage,
            graph,
            store,
        })
    }

    pub fn navigator<'a>(&'a self, config: &Config) -> PrerequisiteNavigator<'a> {
        PrerequisiteNavigator::with_fallback(&self.graph, &config.curriculum.fallback_prerequisite)
    }
}

/// Write the default config to `path`. The existing file is never parsed.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    fs::write(path, Config::default_config_string())?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn stages(config: &Config) -> Result<()> {
    let catalog = CurriculumCatalog::from_config(&config.curriculum)?;
    let default_stage: Option<Stage> = config.curriculum.default_stage.parse().ok();

    for stage in catalog.stages() {
        let count = catalog.stage(stage).map_or(0, |data| data.nodes.len());
        let marker = if Some(stage) == default_stage { "*" } else { " " };
        println!(
            "{} {:<8} {}  ({} knowledge points)",
            marker,
            stage.as_str(),
            stage.display_name(),
            count
        );
    }
    Ok(())
}

pub fn show(config: &Config, grade: Option<&str>) -> Result<()> {
    let session = Session::open(config, grade)?;
    let graph = &session.graph;

    println!("{} ({})", session.stage.display_name(), session.stage);
    println!();
    for (idx, node) in graph.iter() {
        let prereqs: Vec<&str> = graph
            .prerequisites_of(idx)
            .iter()
            .filter_map(|&p| graph.node(p))
            .map(|n| n.label.as_str())
            .collect();

        println!(
            "  {:<14} {}  [{}] {:>3.0}%",
            node.id,
            node.label,
            node.status.display_name(),
            node.mastery * 100.0
        );
        if !prereqs.is_empty() {
            println!("  {:<14}   ← {}", "", prereqs.join("、"));
        }
    }
    Ok(())
}

pub fn prereqs(config: &Config, label: &str, grade: Option<&str>) -> Result<()> {
    let session = Session::open(config, grade)?;
    let plan = session.navigator(config).plan(label);

    if plan.prerequisites.is_empty() {
        println!("{} has no prerequisites.", label);
        return Ok(());
    }

    println!("Prerequisites of {}:", label);
    for prerequisite in &plan.prerequisites {
        println!("  - {}", prerequisite);
    }
    if let Some(start) = &plan.start {
        println!();
        println!("Suggested starting point: {}", start);
    }
    Ok(())
}

pub fn path(config: &Config, label: &str, grade: Option<&str>, deep: bool) -> Result<()> {
    let session = Session::open(config, grade)?;
    let navigator = session.navigator(config);

    let steps = if deep {
        navigator.ordered_prerequisites(label)?
    } else {
        let plan = navigator.plan(label);
        if !plan.offer_start {
            println!("No basic starting point found for {}.", label);
            return Ok(());
        }
        let mut steps = plan.path;
        steps.push(plan.target);
        steps
    };

    println!("Learning path to {}:", label);
    for (i, step) in steps.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, step);
    }
    Ok(())
}

pub fn export(config: &Config, grade: Option<&str>, output: Option<&Path>) -> Result<()> {
    let session = Session::open(config, grade)?;
    let mut surface = GraphSurface::new(session.graph, SurfaceSettings::from(&config.surface));
    surface.center_graph();

    let data = export::build(session.stage, &surface);
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            info!(path = %path.display(), nodes = data.nodes.len(), "graph exported");
            println!("Exported {} graph to {}", session.stage, path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn mastery_set(config: &Config, id: &str, level: f32, grade: Option<&str>) -> Result<()> {
    let session = Session::open(config, grade)?;
    let Some(idx) = session.graph.index_of(id) else {
        bail!("no knowledge point with id '{}' in {}", id, session.stage);
    };

    let record = session.store.record(session.stage, id, level)?;
    let label = session
        .graph
        .node(idx)
        .map_or(id, |node| node.label.as_str());
    println!(
        "{} ({}) mastery set to {:.0}%",
        label,
        session.stage,
        record.level * 100.0
    );
    Ok(())
}

pub fn mastery_list(config: &Config, grade: Option<&str>) -> Result<()> {
    let store = FileMasteryStore::new(&config.storage);
    let records = match grade {
        Some(_) => store.records_for(resolve_stage(grade, &config.curriculum)?)?,
        None => store.load_all()?,
    };

    if records.is_empty() {
        println!("No mastery recorded yet. Use 'learnmap mastery set <id> <level>'.");
        return Ok(());
    }

    for record in records {
        println!(
            "  {:<8} {:<14} {:>3.0}%  {}",
            record.stage.as_str(),
            record.node_id,
            record.level * 100.0,
            record.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_force_replaces_broken_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("learnmap.toml");
        fs::write(&path, "[surface\nwidth = ").unwrap();
        assert!(Config::from_file(&path).is_err());

        init(&path, true).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            Config::default_config_string()
        );
        assert!(Config::from_file(&path).is_ok());
    }

    #[test]
    fn test_init_keeps_existing_file_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("learnmap.toml");
        fs::write(&path, "# mine\n").unwrap();

        assert!(init(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");
    }

    #[test]
    fn test_init_writes_new_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("learnmap.toml");

        init(&path, false).unwrap();

        assert!(Config::from_file(&path).is_ok());
    }
}
