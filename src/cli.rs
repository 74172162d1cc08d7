use std::io;

use clap::{CommandFactory, Parser};

use crate::{
    config::Config,
    constants::DAYS,
    domain::{Schedule, SessionCode},
    fetch,
    grid::{INCOMPLETE_DATA, MOVED_STAMP, WeekGrid},
    parse,
};

#[derive(Parser, Debug)]
#[command(name = "jadwal")]
#[command(about = "Weekly lab schedule calendar from the published sheet", long_about = None)]
pub enum Cli {
    #[command(about = "Fetch the sheet and print one week of the schedule")]
    Show {
        #[arg(
            long,
            help = "Weeks to move from the selected week",
            default_value_t = 0,
            allow_negative_numbers = true
        )]
        week_offset: i64,

        #[arg(long, help = "Override the published sheet URL")]
        url: Option<String>,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

pub fn show(week_offset: i64, url: Option<String>) -> Result<(), String> {
    let mut config = Config::load();
    if let Some(url) = url {
        config.sheet_url = url;
    }

    let client = fetch::build_client(config.fetch_timeout_secs).map_err(|e| e.to_string())?;
    let text = fetch::fetch_csv(&client, &config).map_err(|e| e.to_string())?;

    let mut schedule = Schedule::default();
    schedule.replace(parse::records_from_csv(&text), false);
    if week_offset != 0 {
        schedule.advance_week(week_offset);
    }

    let window = schedule.window.ok_or("No week selected")?;
    let grid = WeekGrid::build(window, &schedule.records);
    print_week(&grid);
    Ok(())
}

fn print_week(grid: &WeekGrid) {
    println!("Jadwal Lab  {}", grid.window.label());
    println!(
        "{} jadwal | {} pengajar",
        grid.record_count, grid.instructor_count
    );

    for (day_index, day) in DAYS.iter().enumerate() {
        println!("{}", "-".repeat(40));
        println!("{} ({})", day, grid.window.day(day_index).format("%d/%m/%Y"));

        for session in SessionCode::ALL {
            let entries = grid.cell(session, day_index);
            if entries.is_empty() {
                continue;
            }

            println!("  Sesi {}  {}", session.code(), session.time_range());
            for entry in entries {
                let stamp = if entry.moved {
                    format!("  [{}]", MOVED_STAMP)
                } else {
                    String::new()
                };
                println!("    {}{}", entry.room, stamp);

                if entry.incomplete {
                    println!("      {}", INCOMPLETE_DATA);
                    continue;
                }
                if !entry.instructor.is_empty() {
                    println!("      {}", entry.instructor);
                }
                if !entry.activity.is_empty() {
                    println!("      {}", entry.activity);
                }
            }
        }
    }
    println!("{}", "-".repeat(40));
}

pub fn print_completions(shell: &str) -> Result<(), String> {
    use clap_complete::Shell;
    match shell {
        "bash" => {
            clap_complete::generate(
                Shell::Bash,
                &mut Cli::command(),
                "jadwal",
                &mut io::stdout(),
            );
        }
        "zsh" => {
            clap_complete::generate(Shell::Zsh, &mut Cli::command(), "jadwal", &mut io::stdout());
        }
        "fish" => {
            clap_complete::generate(
                Shell::Fish,
                &mut Cli::command(),
                "jadwal",
                &mut io::stdout(),
            );
        }
        _ => {
            return Err(format!(
                "Unsupported shell: {}. Use bash, zsh, or fish.",
                shell
            ));
        }
    }
    Ok(())
}

pub fn run_cli() {
    let cli = Cli::parse();
    match cli {
        Cli::Show { week_offset, url } => {
            if let Err(e) = show(week_offset, url) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Cli::Completions { shell } => {
            if let Err(e) = print_completions(&shell) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
