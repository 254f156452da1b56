//! Command dispatch: maps parsed arguments onto catalog service calls.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::CatalogService;
use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{LoadReport, TreeRender, MAX_RENDER_DEPTH};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let cwd =
        std::env::current_dir().map_err(|e| InfraError::io("resolve working directory", e))?;
    let settings = Settings::load(Some(cwd.as_path()))?;
    let container = ServiceContainer::new(settings);
    let file = cli.file.as_deref();

    match &cli.command {
        Some(Commands::List) => list(&container, file),
        Some(Commands::Show { course }) => show(&container, file, course),
        Some(Commands::Stats) => stats(&container, file),
        Some(Commands::Validate) => validate(&container, file),
        Some(Commands::Tree) => tree(&container, file),
        Some(Commands::Menu) => menu(&container, file),
        Some(Commands::Config { command }) => config(&container, &cwd, command),
        Some(Commands::Completion { shell }) => completion(*shell),
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::from(InfraError::io("print help", e))),
    }
}

/// Load the course file given on the command line, or the configured default.
fn load(
    container: &ServiceContainer,
    file: Option<&Path>,
) -> CliResult<(CatalogService, LoadReport)> {
    let mut service = container.catalog_service();
    let report = match file {
        Some(path) => service.reload(path)?,
        None => service.reload_default()?,
    };
    debug!(courses = report.summary.total_courses, "catalog loaded");
    Ok((service, report))
}

#[instrument(skip(container))]
fn list(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let (service, _) = load(container, file)?;
    let courses = service.list()?;
    for course in &courses {
        output::info(course);
    }
    output::detail(&format!("Total: {} courses listed.", courses.len()));
    Ok(())
}

#[instrument(skip(container))]
fn show(container: &ServiceContainer, file: Option<&Path>, course: &str) -> CliResult<()> {
    let (service, _) = load(container, file)?;
    let detail = service
        .describe(course)?
        .ok_or_else(|| CliError::CourseNotFound(service.normalize_key(course)))?;
    for line in output::course_detail_lines(&detail) {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn stats(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let (service, _) = load(container, file)?;
    let stats = service.stats()?;
    output::header("Data Summary");
    for line in output::summary_lines(&stats.summary) {
        output::detail(&line);
    }
    output::detail(&format!("Tree Depth: {}", stats.depth));
    Ok(())
}

#[instrument(skip(container))]
fn validate(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let (_, report) = load(container, file)?;
    for dangling in &report.dangling {
        output::warning(&output::dangling_message(dangling));
    }
    if report.has_warnings() {
        output::warning(&format!(
            "{} prerequisite reference(s) do not exist in the course list",
            report.dangling.len()
        ));
    } else {
        output::success(&format!(
            "{} courses, all prerequisites resolve",
            report.summary.total_courses
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn tree(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let (service, _) = load(container, file)?;
    if let Some(catalog) = service.catalog() {
        output::info(&catalog.to_tree_string());
        let depth = catalog.depth();
        if depth > MAX_RENDER_DEPTH {
            output::warning(&format!(
                "tree is {} levels deep, showing the first {}",
                depth, MAX_RENDER_DEPTH
            ));
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn menu(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let mut service = container.catalog_service();
    let stdin = io::stdin();
    let mut menu = Menu::new(&mut service, stdin.lock(), io::stdout());
    menu.preload(file)?;
    menu.run()?;
    Ok(())
}

#[instrument(skip(container))]
fn config(container: &ServiceContainer, cwd: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::info(&"global: (no config directory)"),
            }
            output::info(&format!("local:  {}", local_config_path(cwd).display()));
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("no global config directory available".into()))?
            } else {
                local_config_path(cwd)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .with_path_context("create config directory", &path)?;
            container
                .fs
                .write(&path, &Settings::template())
                .with_path_context("write config", &path)?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
