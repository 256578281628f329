#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use roulement::{
    calendar, io,
    model::{Employee, ShiftType},
    rules::{self, ExceptionRule, FixedAllocationRule, ShiftRestriction},
    scheduler::{AssignOptions, Plan, Scheduler},
    storage::{JsonStorage, Storage},
};
use std::collections::BTreeSet;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de roulement matin / après-midi
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du plan
    #[arg(long, global = true, default_value = "plan.json")]
    plan: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un plan vide (mois courant par défaut)
    Init {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        /// Écrase un plan existant
        #[arg(long)]
        force: bool,
    },

    /// Importer des membres (CSV `name` ou texte, un nom par ligne)
    ImportEmployees {
        #[arg(long)]
        csv: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },

    /// Déclarer une indisponibilité
    Exclude {
        #[arg(long)]
        employee: String,
        /// liste "3,10,17"
        #[arg(long)]
        days: Option<String>,
        /// intervalle "5-9"
        #[arg(long)]
        range: Option<String>,
        /// jours de semaine "0,4" (0 = lundi)
        #[arg(long)]
        weekdays: Option<String>,
        /// restreint `--days` à ces créneaux
        #[arg(long, value_delimiter = ',')]
        shifts: Vec<ShiftType>,
    },

    /// Imposer un membre sur des créneaux
    Fix {
        #[arg(long)]
        employee: String,
        #[arg(long)]
        weekdays: Option<String>,
        #[arg(long)]
        days: Option<String>,
        #[arg(long, value_delimiter = ',', required = true)]
        shifts: Vec<ShiftType>,
    },

    /// Interdire un type de créneau à un membre
    Restrict {
        #[arg(long)]
        employee: String,
        #[arg(long, value_delimiter = ',', required = true)]
        shifts: Vec<ShiftType>,
    },

    /// Générer le planning et optionnellement l'exporter
    Generate {
        /// Désactive l'équilibrage de charge
        #[arg(long)]
        no_balance: bool,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_stats: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Vérifier les créneaux non pourvus et doubles affectations
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Lister les jours ouvrés d'un mois
    Days {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.plan)?;
    let today = Local::now().date_naive();

    let code = match cli.cmd {
        Commands::Init { year, month, force } => {
            if storage.exists() && !force {
                bail!("{} already exists (use --force)", storage.path().display());
            }
            let plan = Plan::new(
                year.unwrap_or_else(|| today.year()),
                month.unwrap_or_else(|| today.month()),
            );
            calendar::business_days(plan.year, plan.month)?;
            storage.save(&plan)?;
            0
        }
        Commands::ImportEmployees { csv, text } => {
            let mut scheduler = load(&storage)?;
            let mut employees = Vec::new();
            if let Some(path) = csv {
                employees.extend(io::import_employees_csv(path)?);
            }
            if let Some(path) = text {
                employees.extend(io::import_employees_text(path)?);
            }
            if employees.is_empty() {
                bail!("nothing to import (use --csv or --text)");
            }
            scheduler.add_employees(employees);
            storage.save(scheduler.plan())?;
            0
        }
        Commands::Exclude {
            employee,
            days,
            range,
            weekdays,
            shifts,
        } => {
            let mut scheduler = load(&storage)?;
            let employee = known_employee(&scheduler, &employee)?;
            if !shifts.is_empty() && days.is_none() {
                bail!("--shifts only applies to --days");
            }
            let mut added = Vec::new();
            if let Some(raw) = days {
                for day in rules::parse_day_list(&raw)? {
                    if shifts.is_empty() {
                        added.push(ExceptionRule::SpecificDay {
                            employee: employee.clone(),
                            day,
                        });
                    }
                    for shift in &shifts {
                        added.push(ExceptionRule::ShiftSpecific {
                            day,
                            shift: *shift,
                            employee: employee.clone(),
                        });
                    }
                }
            }
            if let Some(raw) = range {
                let (start, end) = rules::parse_day_range(&raw)?;
                added.push(ExceptionRule::DateRange {
                    employee: employee.clone(),
                    start,
                    end,
                });
            }
            if let Some(raw) = weekdays {
                for weekday in rules::parse_weekday_list(&raw)? {
                    added.push(ExceptionRule::Weekday {
                        employee: employee.clone(),
                        weekday,
                    });
                }
            }
            if added.is_empty() {
                bail!("no exception given (use --days, --range or --weekdays)");
            }
            added.into_iter().for_each(|rule| scheduler.add_exception(rule));
            scheduler.plan().validate()?;
            storage.save(scheduler.plan())?;
            0
        }
        Commands::Fix {
            employee,
            weekdays,
            days,
            shifts,
        } => {
            let mut scheduler = load(&storage)?;
            let employee = known_employee(&scheduler, &employee)?;
            let shifts: BTreeSet<ShiftType> = shifts.into_iter().collect();
            let rule = match (weekdays, days) {
                (Some(raw), None) => FixedAllocationRule::WeekdayFixed {
                    employee,
                    weekdays: rules::parse_weekday_list(&raw)?.into_iter().collect(),
                    shifts,
                },
                (None, Some(raw)) => FixedAllocationRule::DayFixed {
                    employee,
                    days: rules::parse_day_list(&raw)?.into_iter().collect(),
                    shifts,
                },
                _ => bail!("give exactly one of --weekdays or --days"),
            };
            scheduler.add_fixed(rule);
            scheduler.plan().validate()?;
            storage.save(scheduler.plan())?;
            0
        }
        Commands::Restrict { employee, shifts } => {
            let mut scheduler = load(&storage)?;
            let employee = known_employee(&scheduler, &employee)?;
            scheduler.add_restriction(ShiftRestriction {
                employee,
                shifts: shifts.into_iter().collect(),
            });
            scheduler.plan().validate()?;
            storage.save(scheduler.plan())?;
            0
        }
        Commands::Generate {
            no_balance,
            out_csv,
            out_stats,
            out_json,
        } => {
            let mut scheduler = load(&storage)?;
            if no_balance {
                scheduler.set_options(AssignOptions {
                    balance_workload: false,
                });
            }
            let schedule = scheduler.generate()?;
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &schedule)?;
            }
            if let Some(path) = out_stats {
                io::export_statistics_csv(path, &schedule)?;
            }
            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule)?;
            }
            for e in &schedule.entries {
                println!(
                    "{} | {:<9} | {} | {}",
                    e.date,
                    e.weekday,
                    e.morning.as_ref().map(Employee::as_str).unwrap_or("-"),
                    e.afternoon.as_ref().map(Employee::as_str).unwrap_or("-"),
                );
            }
            println!();
            for row in &schedule.statistics {
                println!("{}: {}", row.employee, row.shifts);
            }
            0
        }
        Commands::Check { report } => {
            let scheduler = load(&storage)?;
            let schedule = scheduler.generate()?;
            let conflicts = scheduler.detect_conflicts(&schedule);
            if conflicts.is_empty() {
                println!("OK: every slot filled, no double booking");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["date", "employee", "kind"])?;
                    for c in &conflicts {
                        let date = c.date.to_string();
                        w.write_record([
                            date.as_str(),
                            c.employee.as_ref().map(Employee::as_str).unwrap_or(""),
                            c.kind.as_str(),
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Days { year, month } => {
            let saved = storage.load_optional()?;
            let year = year
                .or(saved.as_ref().map(|p| p.year))
                .unwrap_or_else(|| today.year());
            let month = month
                .or(saved.as_ref().map(|p| p.month))
                .unwrap_or_else(|| today.month());
            for day in calendar::business_days(year, month)? {
                println!("{} {}", day.date, day.weekday_name());
            }
            0
        }
    };

    std::process::exit(code);
}

fn load(storage: &JsonStorage) -> Result<Scheduler> {
    let plan = storage
        .load_optional()?
        .with_context(|| format!("{} not found (run `init` first)", storage.path().display()))?;
    Ok(Scheduler::new(plan))
}

fn known_employee(scheduler: &Scheduler, name: &str) -> Result<Employee> {
    let employee = Employee::new(name);
    if !scheduler.plan().employees.contains(&employee) {
        bail!("unknown employee: {name}");
    }
    Ok(employee)
}
