//! Terminal output formatting.

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use docket_core::case::model::{Case, CaseStatus};
use docket_core::report::model::{CaseSummary, Dashboard, Report, StatusCount};
use docket_core::task::model::Task;
use docket_core::task::{self, CaseTask, DueBucket};
use unicode_width::UnicodeWidthStr;

/// Width of the short ids shown in listings.
const SHORT_ID: usize = 8;

/// Print a single case with its tasks.
pub fn print_case(case: &Case, today: NaiveDate) {
    println!(
        "{} {}",
        case.case_number.cyan().bold(),
        format!("({})", case.id).dimmed()
    );
    println!();
    println!("{}", case.description);
    println!();

    println!("{}: {}", "Status".bold(), status_colored(case.status));
    println!("{}: {}", "Client".bold(), case.client_name);
    println!("{}: {}", "Opponent".bold(), case.opponent);
    println!("{}: {}", "Court case".bold(), case.court_case_number);
    println!("{}: {}", "Opened".bold(), case.open_date);
    match case.next_hearing_date {
        Some(date) => println!("{}: {}", "Next hearing".bold(), date.to_string().yellow()),
        None => println!("{}: {}", "Next hearing".bold(), "none".dimmed()),
    }

    println!();
    println!(
        "{} ({}/{} completed)",
        "Tasks".bold(),
        case.completed_tasks(),
        case.tasks.len()
    );
    if case.tasks.is_empty() {
        println!("  {}", "No tasks yet.".dimmed());
        return;
    }
    for t in task::sorted_tasks(&case.tasks) {
        println!("  {}", task_line(t, today));
    }
}

/// Print cases as a table.
pub fn print_cases_table(cases: &[&Case]) {
    if cases.is_empty() {
        println!("{}", "No cases found.".dimmed());
        return;
    }

    let width = term_width();
    // id, number, status, opened, hearing and tasks take fixed space; the client gets the rest.
    let client_width = width.saturating_sub(SHORT_ID + 16 + 20 + 12 + 12 + 7 + 6).clamp(12, 40);

    println!(
        "{:<id$} {:<16} {} {:<20} {:<12} {:<12} {:<7}",
        "ID",
        "Case",
        pad_right("Client", client_width),
        "Status",
        "Opened",
        "Hearing",
        "Tasks",
        id = SHORT_ID
    );
    println!("{}", "─".repeat((SHORT_ID + 16 + 20 + 12 + 12 + 7 + 6 + client_width).min(width)));

    for case in cases {
        let client = truncate_visual(&case.client_name, client_width);
        let hearing = case
            .next_hearing_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<id$} {:<16} {} {} {:<12} {:<12} {:<7}",
            short_id(&case.id),
            truncate_visual(&case.case_number, 16),
            pad_right(&client, client_width),
            pad_colored(status_colored(case.status), case.status.label(), 20),
            case.open_date.to_string(),
            hearing,
            format!("{}/{}", case.completed_tasks(), case.tasks.len()),
            id = SHORT_ID
        );
    }

    println!();
    println!("{} case(s) total", cases.len());
}

/// Print tasks from across cases as a table.
pub fn print_tasks_table(tasks: &[CaseTask<'_>], today: NaiveDate) {
    if tasks.is_empty() {
        println!("{}", "No tasks found.".dimmed());
        return;
    }

    for item in tasks {
        print_task_row(item, today);
    }

    let done = tasks.iter().filter(|t| t.task.completed).count();
    println!();
    println!(
        "{} task(s) total {} {} completed",
        tasks.len(),
        "·".dimmed(),
        done.to_string().green()
    );
}

/// Print tasks grouped by due date, skipping empty groups.
pub fn print_task_groups(groups: &[(DueBucket, Vec<CaseTask<'_>>)], today: NaiveDate) {
    if groups.iter().all(|(_, items)| items.is_empty()) {
        println!("{}", "No tasks found.".dimmed());
        return;
    }

    for (bucket, items) in groups {
        if items.is_empty() {
            continue;
        }
        println!(
            " {} {} {}",
            "▸".dimmed(),
            bucket_colored(*bucket),
            format!("({})", items.len()).dimmed()
        );
        for item in items {
            print!("  ");
            print_task_row(item, today);
        }
        println!();
    }
}

fn print_task_row(item: &CaseTask<'_>, today: NaiveDate) {
    let width = term_width();
    let title_width = width.saturating_sub(SHORT_ID + 50).clamp(16, 50);
    let client = truncate_visual(&item.case.client_name, 20);
    println!(
        "{} {} {} {}",
        task_line_sized(item.task, today, title_width),
        pad_right(&client, 20).dimmed(),
        truncate_visual(&item.case.case_number, 16).dimmed(),
        short_id(&item.case.id).dimmed()
    );
}

fn task_line(t: &Task, today: NaiveDate) -> String {
    let width = term_width().saturating_sub(SHORT_ID + 20).clamp(16, 60);
    task_line_sized(t, today, width)
}

fn task_line_sized(t: &Task, today: NaiveDate, title_width: usize) -> String {
    let check = if t.completed { "✓".green() } else { "○".normal() };
    let title = pad_right(&truncate_visual(&t.title, title_width), title_width);
    let title = if t.completed {
        title.dimmed()
    } else {
        title.normal()
    };
    let due = match t.due_date {
        Some(date) => {
            let text = format!("{:<10}", date);
            match task::classify_due(t, today) {
                DueBucket::Overdue => text.red().bold(),
                DueBucket::Today => text.yellow().bold(),
                DueBucket::Tomorrow => text.yellow(),
                _ => text.normal(),
            }
        }
        None => format!("{:<10}", "-").dimmed(),
    };
    format!("{} {} {} {}", check, short_id(&t.id).dimmed(), title, due)
}

/// Print the dashboard.
pub fn print_dashboard(dash: &Dashboard) {
    println!("{}", " DASHBOARD ".on_blue().white().bold());
    println!();

    println!(
        " {} {} cases {} {} active {} {} tasks {} {} pending",
        "■".cyan(),
        dash.total_cases.to_string().bold(),
        "·".dimmed(),
        dash.active_cases.to_string().yellow(),
        "·".dimmed(),
        dash.tasks.total.to_string().bold(),
        "·".dimmed(),
        dash.tasks.pending().to_string().yellow()
    );
    println!(
        " {} Task completion {}",
        "■".cyan(),
        progress_bar(dash.tasks.completion_percent())
    );
    println!();

    println!("{}", "Cases by Status".bold());
    print_status_bars(&dash.status_counts);
    println!();

    println!("{}", "Upcoming Hearings".bold());
    if dash.upcoming_hearings.is_empty() {
        println!("  {}", "No upcoming hearings.".dimmed());
    }
    for c in &dash.upcoming_hearings {
        let date = c
            .next_hearing_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!("  {} {}", date.yellow(), summary_line(c));
    }
    println!();

    println!("{}", "Recent Cases".bold());
    if dash.recent_cases.is_empty() {
        println!("  {}", "No cases yet.".dimmed());
    }
    for c in &dash.recent_cases {
        println!("  {} {}", c.open_date.to_string().dimmed(), summary_line(c));
    }
}

fn summary_line(c: &CaseSummary) -> String {
    format!(
        "{} {} {} {}",
        c.case_number.cyan(),
        truncate_visual(&c.client_name, 30),
        status_colored(c.status),
        short_id(&c.id).dimmed()
    )
}

/// Print the reports screen.
pub fn print_report(report: &Report) {
    println!("{}", " REPORTS ".on_blue().white().bold());
    println!();

    println!("{}", "Status Distribution".bold());
    print_status_bars(&report.status_distribution);
    println!();

    println!("{}", "Case Outcomes".bold());
    print_status_bars(&report.outcomes);
    println!();

    println!("{}", "Monthly Intake".bold());
    let max = report.monthly_intake.iter().map(|m| m.count).max().unwrap_or(0);
    for m in &report.monthly_intake {
        println!(
            "  {} {} {}",
            pad_right(&m.label, 10),
            bar(m.count, max, 30).cyan(),
            m.count
        );
    }
    println!();

    println!("{}", "Task Completion".bold());
    if report.task_completion.is_empty() {
        println!("  {}", "No tasks yet.".dimmed());
    }
    let max = report.task_completion.iter().map(|s| s.count).max().unwrap_or(0);
    for slice in &report.task_completion {
        let b = bar(slice.count, max, 30);
        let b = if slice.label == "Completed" { b.green() } else { b.yellow() };
        println!("  {} {} {}", pad_right(slice.label, 10), b, slice.count);
    }
}

fn print_status_bars(counts: &[StatusCount]) {
    if counts.is_empty() {
        println!("  {}", "No cases yet.".dimmed());
        return;
    }
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    for sc in counts {
        println!(
            "  {} {} {}",
            pad_colored(status_colored(sc.status), sc.status.label(), 20),
            bar(sc.count, max, 30).cyan(),
            sc.count
        );
    }
}

/// Colored status label.
pub fn status_colored(status: CaseStatus) -> ColoredString {
    let label = status.label();
    match status {
        CaseStatus::New => label.blue(),
        CaseStatus::Pending => label.normal(),
        CaseStatus::InProgress => label.yellow(),
        CaseStatus::AwaitingResponse | CaseStatus::AwaitingHearing => label.magenta(),
        CaseStatus::Won => label.green().bold(),
        CaseStatus::Settled => label.green(),
        CaseStatus::Lost => label.red(),
        CaseStatus::Closed => label.dimmed(),
    }
}

fn bucket_colored(bucket: DueBucket) -> ColoredString {
    let label = bucket.label();
    match bucket {
        DueBucket::Overdue => label.red().bold(),
        DueBucket::Today => label.yellow().bold(),
        DueBucket::Tomorrow | DueBucket::ThisWeek => label.yellow(),
        DueBucket::Later => label.normal().bold(),
        DueBucket::NoDueDate => label.dimmed(),
    }
}

/// First characters of an id, as accepted back by id prefix lookups.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * 20) / 100;
    format!(
        "{}{} {}%",
        "█".repeat(filled).green(),
        "░".repeat(20 - filled).dimmed(),
        percent
    )
}

/// Horizontal bar scaled so `max` fills `width` cells.
fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let cells = ((count * width) / max).max(1);
    "█".repeat(cells)
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a colored string using the visual width of its plain text.
fn pad_colored(colored: ColoredString, plain: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(plain);
    if visual >= width {
        colored.to_string()
    } else {
        format!("{}{}", colored, " ".repeat(width - visual))
    }
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
