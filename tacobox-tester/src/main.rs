mod logic;
mod render;
mod scenario;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{LogicTester, ScenarioResult, load_script, replay};
use scenario::{expand_scenarios, get_scenario, list_scenarios};
use tacobox_core::{Menu, MenuId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "tacobox-tester", version = "0.1.0")]
#[command(about = "Scenario runner and interactive console for the Tacobox order builder")]
struct Args {
    /// Built-in menu (classic, tacos). Defaults to classic for scripts and
    /// sessions; restricts which scenarios run otherwise.
    #[arg(long)]
    menu: Option<MenuId>,

    /// Load the menu from a JSON document instead of a built-in one
    #[arg(long)]
    menu_file: Option<PathBuf>,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Replay a JSON action script and print the resulting order
    #[arg(long, conflicts_with = "interactive")]
    script: Option<PathBuf>,

    /// Start an interactive session on stdin
    #[arg(short, long)]
    interactive: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    let custom_menu = load_custom_menu(&args)?;

    if args.interactive {
        let menu = resolve_menu(&args, custom_menu)?;
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = stdout();
        session::run_session(&menu, &mut input, &mut out)?;
        return Ok(());
    }

    if let Some(path) = args.script.as_ref() {
        let menu = resolve_menu(&args, custom_menu)?;
        let actions = load_script(path)?;
        return write_script_report(&args, &menu, &actions);
    }

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let tester = LogicTester::new(args.verbose)
        .context("failed to load built-in menus")?
        .with_menu_override(custom_menu);
    let results = run_scenarios(&args, &tester);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🌮 Tacobox Order Tester".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

fn load_custom_menu(args: &Args) -> Result<Option<Menu>> {
    let Some(path) = args.menu_file.as_ref() else {
        return Ok(None);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read menu {}", path.display()))?;
    let menu = Menu::from_json(&raw)
        .with_context(|| format!("invalid menu {}", path.display()))?;
    log::info!("loaded menu `{}` from {}", menu.id(), path.display());
    Ok(Some(menu))
}

fn resolve_menu(args: &Args, custom: Option<Menu>) -> Result<Menu> {
    match custom {
        Some(menu) => Ok(menu),
        None => {
            let id = args.menu.unwrap_or(MenuId::Classic);
            Menu::builtin(id).with_context(|| format!("failed to load built-in menu {id}"))
        }
    }
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn run_scenarios(args: &Args, tester: &LogicTester) -> Vec<ScenarioResult> {
    let names = expand_scenarios(&split_csv(&args.scenarios));
    let mut results = Vec::with_capacity(names.len());
    for name in names {
        match get_scenario(&name) {
            Some(scenario) if args.menu.is_some_and(|id| id != scenario.plan.menu) => {
                log::info!("skipping `{name}`: written for menu {}", scenario.plan.menu);
            }
            Some(scenario) if !tester.covers(&scenario) => {
                log::warn!("skipping `{name}`: custom menu has a different selection mode");
            }
            Some(scenario) => results.push(tester.run_scenario(&scenario)),
            None => {
                log::warn!("unknown scenario `{name}`");
                if args.report == ReportFormat::Console {
                    println!("{} Unknown scenario: {}", "⚠️".yellow(), name.yellow());
                }
            }
        }
    }
    results
}

fn write_script_report(
    args: &Args,
    menu: &Menu,
    actions: &[tacobox_core::OrderAction],
) -> Result<()> {
    let summary = replay(menu, actions, args.verbose);
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => {
            writeln!(
                &mut output_target,
                "{}",
                serde_json::to_string_pretty(&summary)?
            )?;
        }
        ReportFormat::Markdown | ReportFormat::Console => {
            writeln!(
                &mut output_target,
                "Replayed {} actions on `{}`: {} applied, {} ignored",
                summary.steps.len(),
                summary.menu_id,
                summary.applied,
                summary.ignored
            )?;
            render::render_view(&mut output_target, &summary.view)?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Tacobox Order Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            menu: None,
            menu_file: None,
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            script: None,
            interactive: false,
            report: ReportFormat::Json,
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn split_csv_trims_and_lowercases() {
        assert_eq!(split_csv(" Smoke, ,clear-all"), vec!["smoke", "clear-all"]);
    }

    #[test]
    fn run_scenarios_skips_unknown_names() {
        let tester = LogicTester::new(false).unwrap();
        let args = Args {
            scenarios: "smoke,nope".to_string(),
            ..base_args()
        };
        let results = run_scenarios(&args, &tester);
        assert_eq!(results.len(), 1);
        assert!(results[0].passed);
    }

    #[test]
    fn all_scenarios_pass_against_builtin_menus() {
        let tester = LogicTester::new(false).unwrap();
        let args = Args {
            scenarios: "all".to_string(),
            ..base_args()
        };
        let results = run_scenarios(&args, &tester);
        assert_eq!(results.len(), list_scenarios().len());
        for result in results {
            assert!(result.passed, "{}: {:?}", result.scenario_name, result.failures);
        }
    }

    #[test]
    fn menu_flag_restricts_scenarios() {
        let tester = LogicTester::new(false).unwrap();
        let args = Args {
            menu: Some(MenuId::Tacos),
            scenarios: "all".to_string(),
            ..base_args()
        };
        let results = run_scenarios(&args, &tester);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.menu == "tacos"));
    }

    #[test]
    fn custom_menu_skips_scenarios_of_the_other_mode() {
        let classic = Menu::builtin(MenuId::Classic).unwrap();
        let tester = LogicTester::new(false)
            .unwrap()
            .with_menu_override(Some(classic));
        let args = Args {
            scenarios: "smoke,presence-toggle".to_string(),
            ..base_args()
        };
        let results = run_scenarios(&args, &tester);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scenario_name, "Smoke Test");
        assert!(results[0].passed, "{:?}", results[0].failures);
    }

    #[test]
    fn resolve_menu_defaults_to_classic() {
        assert_eq!(resolve_menu(&base_args(), None).unwrap().id(), "classic");
    }

    #[test]
    fn write_reports_emits_json_output() {
        let temp = std::env::temp_dir().join("tacobox-test-report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn resolve_menu_prefers_custom_document() {
        let args = Args {
            menu: Some(MenuId::Tacos),
            ..base_args()
        };
        let custom = Menu::builtin(MenuId::Classic).unwrap();
        let resolved = resolve_menu(&args, Some(custom)).unwrap();
        assert_eq!(resolved.id(), "classic");
        assert_eq!(resolve_menu(&args, None).unwrap().id(), "tacos");
    }

    #[test]
    fn load_custom_menu_reports_invalid_documents() {
        let path = std::env::temp_dir().join("tacobox-bad-menu.json");
        std::fs::write(&path, r#"{"id": "x", "name": "X", "steps": [], "items": []}"#).unwrap();
        let args = Args {
            menu_file: Some(path),
            ..base_args()
        };
        let err = load_custom_menu(&args).unwrap_err();
        assert!(format!("{err:#}").contains("at least one step"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
