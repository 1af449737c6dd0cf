//! skillgap: command-line front end for the skill desk.
//!
//! Usage:
//!   skillgap add --name "Ann" --skills "Python, SQL" --proficiency 2 [--designation D] [--experience 4]
//!   skillgap analyze --name "Ann" --role "AI Specialist"
//!   skillgap import --file team.csv
//!   skillgap --ipc-mode
//!
//! Common flags: --db <path> (default skillgap.db), --data-dir <dir>.

use anyhow::Result;
use skillgap_core::{
    config::CatalogConfig,
    desk::SkillDesk,
    error::GapError,
    gap_analysis::GapReport,
    roster::{EmployeeUpdate, SkillEntryForm},
    store::RosterStore,
    tabular,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    AddSkills(SkillEntryForm),
    Upsert(EmployeeUpdate),
    Employee {
        name: String,
    },
    Matrix,
    Team {
        #[serde(default)]
        designation: Option<String>,
    },
    Designations,
    Roles,
    Analyze {
        #[serde(default)]
        employee: Option<String>,
        #[serde(default)]
        role: Option<String>,
    },
    Dashboard,
    Import {
        csv: String,
    },
    Export,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = flag(&args, "--db").unwrap_or("skillgap.db");
    let catalog = match flag(&args, "--data-dir") {
        Some(dir) => CatalogConfig::load(dir)?,
        None => CatalogConfig::builtin(),
    };

    let store = RosterStore::open_migrated(db)?;
    let mut desk = SkillDesk::open(store, catalog)?;

    if args.iter().any(|a| a == "--ipc-mode") {
        return run_ipc_loop(&mut desk);
    }

    let command = subcommand(&args).unwrap_or("help");
    match run_command(&mut desk, command, &args) {
        Ok(()) => Ok(()),
        Err(e) if e.is_user_facing() => {
            eprintln!("{e}");
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

fn run_command(desk: &mut SkillDesk, command: &str, args: &[String]) -> Result<(), GapError> {
    match command {
        "add" => {
            let form = SkillEntryForm {
                name: flag(args, "--name").unwrap_or_default().to_string(),
                designation: flag(args, "--designation").unwrap_or_default().to_string(),
                experience: flag(args, "--experience").unwrap_or_default().to_string(),
                skill_names: flag(args, "--skills").unwrap_or_default().to_string(),
                proficiency: flag(args, "--proficiency").unwrap_or_default().to_string(),
            };
            let employee = desk.add_skills(form)?;
            let names: Vec<&str> = employee.skills.keys().map(String::as_str).collect();
            println!("Skills added for {}: {}", employee.name, names.join(", "));
        }
        "matrix" => print_matrix(desk),
        "show" => {
            let employee = desk.employee_skills(flag(args, "--name").unwrap_or_default())?;
            println!("Current Skills Placement: {}", employee.name);
            if employee.skills.is_empty() {
                println!("  No skills have been added for this employee yet.");
            }
            for (skill, level) in &employee.skills {
                println!("  {skill:<28} {level}");
            }
        }
        "team" => {
            for employee in desk.team(flag(args, "--designation")) {
                println!("{}", employee.name);
            }
        }
        "designations" => {
            for designation in desk.designations() {
                println!("{designation}");
            }
        }
        "roles" => {
            for role in desk.target_roles() {
                println!("{role}");
            }
        }
        "analyze" => {
            let report = desk.run_gap_analysis(flag(args, "--name"), flag(args, "--role"))?;
            print_report(&report);
        }
        "dashboard" => {
            let summary = desk.dashboard();
            println!("=== DASHBOARD ===");
            println!("  employees:       {}", summary.employee_count);
            println!("  skills mapped:   {}", summary.total_skills_mapped);
            println!("  AI readiness:    {} ({})", summary.bar_percent(), summary.readiness_label());
            if let Some(saved) = desk.store().roster_saved_at()? {
                println!("  last saved:      {}", saved.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
        "import" => {
            let path = flag(args, "--file").ok_or_else(|| {
                GapError::InputIncomplete("Please choose a CSV file to upload (--file).".into())
            })?;
            let text = std::fs::read_to_string(path)?;
            let summary = desk.import_csv(&text)?;
            println!(
                "Imported {} rows ({} new employees).",
                summary.rows_applied, summary.employees_created
            );
            for row in &summary.skipped {
                println!("  skipped line {}: {}", row.line, row.reason);
            }
        }
        "export" => {
            let default_name = format!(
                "skills_data_{}.csv",
                chrono::Local::now().format("%Y-%m-%d")
            );
            let out = flag(args, "--out").map(String::from).unwrap_or(default_name);
            std::fs::write(&out, desk.export_csv())?;
            println!("Exported {} employees to {out}", desk.roster().len());
        }
        "sample-csv" => print!("{}", tabular::sample_csv()),
        _ => {
            println!("commands: add, matrix, show, team, designations, roles, analyze,");
            println!("          dashboard, import, export, sample-csv, --ipc-mode");
        }
    }
    Ok(())
}

fn run_ipc_loop(desk: &mut SkillDesk) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string(), "kind": "bad_command" });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };
        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        let response = match handle_ipc(desk, cmd) {
            Ok(value) => value,
            Err(e) => {
                if !e.is_user_facing() {
                    log::error!("IPC command failed: {e}");
                }
                serde_json::json!({ "error": e.to_string(), "kind": e.kind() })
            }
        };
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle_ipc(desk: &mut SkillDesk, cmd: IpcCommand) -> Result<serde_json::Value, GapError> {
    let value = match cmd {
        IpcCommand::AddSkills(form) => serde_json::to_value(desk.add_skills(form)?)?,
        IpcCommand::Upsert(update) => serde_json::to_value(desk.upsert(update)?)?,
        IpcCommand::Employee { name } => serde_json::to_value(desk.employee_skills(&name)?)?,
        IpcCommand::Matrix => serde_json::to_value(desk.skills_matrix())?,
        IpcCommand::Team { designation } => {
            serde_json::to_value(desk.team(designation.as_deref()))?
        }
        IpcCommand::Designations => serde_json::to_value(desk.designations())?,
        IpcCommand::Roles => serde_json::to_value(desk.target_roles())?,
        IpcCommand::Analyze { employee, role } => {
            let report = desk.run_gap_analysis(employee.as_deref(), role.as_deref())?;
            serde_json::json!({
                "headline_score": report.headline_score(),
                "band": report.band(),
                "color": report.band().color(),
                "report": report,
            })
        }
        IpcCommand::Dashboard => {
            let summary = desk.dashboard();
            serde_json::json!({
                "bar": summary.bar_percent(),
                "label": summary.readiness_label(),
                "summary": summary,
            })
        }
        IpcCommand::Import { csv } => serde_json::to_value(desk.import_csv(&csv)?)?,
        IpcCommand::Export => serde_json::json!({ "csv": desk.export_csv() }),
        IpcCommand::Quit => serde_json::Value::Null,
    };
    Ok(value)
}

fn print_matrix(desk: &SkillDesk) {
    for row in desk.skills_matrix() {
        let experience = row
            .experience
            .map(|y| format!("{y} years"))
            .unwrap_or_else(|| "N/A".into());
        println!(
            "{} | {} | {}",
            row.name,
            row.designation.as_deref().unwrap_or("N/A"),
            experience
        );
        let skills: Vec<String> = row.skills.iter().map(|(s, l)| format!("{s} ({l})")).collect();
        println!("  {} ({} total skills)", skills.join(", "), row.total_skills);
    }
}

fn print_report(report: &GapReport) {
    println!("=== Skill Gap: Upskilling Path to {} ===", report.role);
    println!(
        "  {:<24} {:>8} {:>8} {:>8}  {}",
        "Skill", "Required", "Current", "Gap", "Recommendation"
    );
    for row in &report.rows {
        let required = row.required.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
        let gap = row.gap.map(|g| g.to_string()).unwrap_or_else(|| "SURPLUS".into());
        println!(
            "  {:<24} {:>8} {:>8} {:>8}  {}",
            row.skill,
            required,
            row.current,
            gap,
            row.recommendation.label()
        );
    }
    println!();
    println!(
        "  readiness score:     {}/100 ({:?}, {})",
        report.headline_score(),
        report.band(),
        report.display_score()
    );
    println!("  skills to upskill:   {}", report.skills_to_develop);
    println!("  total deficit:       {}", report.total_deficit);
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// First argument that is neither a flag nor a flag's value.
/// Every flag except `--ipc-mode` takes a value.
fn subcommand(args: &[String]) -> Option<&str> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--ipc-mode" {
            continue;
        }
        if arg.starts_with("--") {
            rest.next();
            continue;
        }
        return Some(arg.as_str());
    }
    None
}
