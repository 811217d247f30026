use analytics::{
    build_student_details, try_get_highest_mark_for_course, try_get_lowest_mark_for_course,
};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use core_types::{Course, Mark, Student};
use database::{PgPool, PgRepository, Repository};
use std::collections::HashMap;

/// The main entry point for the student records application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = configuration::load_config_from(&cli.config)?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => web_server::run_server(&settings).await?,
        Commands::Migrate => {
            let pool = database::connect(&settings.database).await?;
            database::run_migrations(&pool).await?;
            println!("Migrations applied.");
        }
        Commands::Report(report) => {
            let pool = database::connect(&settings.database).await?;
            handle_report(report, pool).await?;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Keeps students, courses and marks, and reports averages and grades.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to read (extension optional).
    #[arg(long, default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve,
    /// Apply database migrations and exit.
    Migrate,
    /// Print a report to the terminal.
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Average, total and grade for one student, with every mark listed.
    Student {
        #[arg(long)]
        id: i32,
    },
    /// Highest and lowest mark of one course.
    Course {
        #[arg(long)]
        id: i32,
    },
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

async fn handle_report(report: ReportCommand, pool: PgPool) -> anyhow::Result<()> {
    let students = PgRepository::<Student>::new(pool.clone());
    let courses = PgRepository::<Course>::new(pool.clone());
    let marks = PgRepository::<Mark>::new(pool);

    match report {
        ReportCommand::Student { id } => {
            let student = students
                .get_by_id(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Student {id} not found"))?;
            let mut own_marks = marks.get_all().await?;
            own_marks.retain(|mark| mark.student_id == id);

            if own_marks.is_empty() {
                println!("{} has no marks yet.", student.student_name);
                return Ok(());
            }

            let course_names: HashMap<i32, String> = courses
                .get_all()
                .await?
                .into_iter()
                .map(|course| (course.id, course.course_name))
                .collect();

            let mut table = new_table(&["Course", "Mark", "Recorded", "Last Modified"]);
            for mark in &own_marks {
                table.add_row(vec![
                    course_names
                        .get(&mark.course_id)
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", mark.course_id)),
                    mark.mark_value.to_string(),
                    mark.created_on.format("%Y-%m-%d %H:%M").to_string(),
                    mark.last_modified_on.format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }
            println!("{table}");

            let details = build_student_details(&student, &own_marks)?;
            let mut summary = new_table(&["Student", "Average", "Total", "Grade"]);
            summary.add_row(vec![
                details.student_name,
                details.average_mark.round_dp(2).to_string(),
                details.total_marks.to_string(),
                details.grade.to_string(),
            ]);
            println!("{summary}");
        }
        ReportCommand::Course { id } => {
            let course = courses
                .get_by_id(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Course {id} not found"))?;
            let (all_marks, all_students) = tokio::join!(marks.get_all(), students.get_all());
            let roster: HashMap<i32, Student> = all_students?
                .into_iter()
                .map(|student| (student.id, student))
                .collect();
            let all_marks = all_marks?;

            let highest = try_get_highest_mark_for_course(id, &all_marks, |sid| roster.get(&sid))?;
            let lowest = try_get_lowest_mark_for_course(id, &all_marks, |sid| roster.get(&sid))?;

            if highest.is_empty() {
                println!("{} has no marks yet.", course.course_name);
                return Ok(());
            }

            let mut table = new_table(&["Course", "", "Mark", "Student"]);
            table.add_row(vec![
                course.course_name.clone(),
                "Highest".to_string(),
                highest.mark_value.to_string(),
                highest.student_name,
            ]);
            table.add_row(vec![
                course.course_name,
                "Lowest".to_string(),
                lowest.mark_value.to_string(),
                lowest.student_name,
            ]);
            println!("{table}");
        }
    }

    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}
