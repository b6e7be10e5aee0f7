//! Plain-text rendering of scored batches: grouped tables, sorting,
//! and the per-group APS summary.
//!
//! All decimal-hour fields become HH:MM:SS here; the engine keeps full
//! precision and display is the only place that rounds.

use clap::ValueEnum;
use shiftpulse_core::{
    format_hms, format_hms_signed, DurationValue, MismatchStatus, ScoredRecord,
};

/// How tables are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    /// One table per source export ("Server 1", "Server 2"...).
    Source,
    /// One table per office group.
    Office,
}

/// Row ordering inside each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortMode {
    /// Agent id, A to Z.
    Agent,
    /// Talk time, highest first.
    Talk,
    /// Combined break + wrap-up, lowest first.
    BreakWrap,
    /// Sales, highest first.
    Sales,
}

const PLACEHOLDER: &str = "--";

fn fmt_duration(v: DurationValue) -> String {
    match v.hours() {
        None => PLACEHOLDER.to_string(),
        Some(h) => format_hms(h),
    }
}

fn fmt_time_to_goal(rec: &ScoredRecord) -> String {
    let mut s = format_hms_signed(rec.score.time_to_goal);
    if rec.score.adjusted {
        // Marks scores moved by a mismatch penalty.
        s.push_str(" *");
    }
    s
}

fn fmt_mismatch(rec: &ScoredRecord) -> String {
    match rec.mismatch.status {
        MismatchStatus::Ok => "ok".to_string(),
        MismatchStatus::MissingData => "missing".to_string(),
        MismatchStatus::Flagged => match &rec.mismatch.excess_hms {
            Some(hms) => format!("+{hms}"),
            None => "flagged".to_string(),
        },
    }
}

/// Sort rows in place for display.
///
/// Sorts are stable, so equal keys keep batch order (and an agent's
/// total row stays behind its originals when keys tie).
pub fn sort_rows(rows: &mut [&ScoredRecord], mode: SortMode) {
    match mode {
        SortMode::Agent => rows.sort_by(|a, b| a.agent.cmp(&b.agent)),
        SortMode::Talk => rows.sort_by(|a, b| {
            b.talk_time
                .or_zero()
                .partial_cmp(&a.talk_time.or_zero())
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortMode::BreakWrap => rows.sort_by(|a, b| {
            let ka = a.break_time.or_zero() + a.wrap_up.or_zero();
            let kb = b.break_time.or_zero() + b.wrap_up.or_zero();
            ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortMode::Sales => rows.sort_by(|a, b| b.sales.cmp(&a.sales)),
    }
}

fn render_table(title: &str, rows: &[&ScoredRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("## {title}\n"));
    out.push_str(&format!(
        "{:>3}  {:<12} {:>5}  {:<18} {:>12} {:>10} {:>10} {:>10} {:>10}  {:<12} {:<10} {:<10}\n",
        "#",
        "1st Call",
        "Sales",
        "Agent",
        "Time To Goal",
        "Connected",
        "Break",
        "Talk",
        "Wrap Up",
        "Shift End",
        "Mismatch",
        "Office",
    ));

    for (i, rec) in rows.iter().enumerate() {
        let agent = if rec.is_total {
            format!("{} (total)", rec.agent)
        } else {
            rec.agent.clone()
        };
        out.push_str(&format!(
            "{:>3}  {:<12} {:>5}  {:<18} {:>12} {:>10} {:>10} {:>10} {:>10}  {:<12} {:<10} {:<10}\n",
            i + 1,
            rec.first_call.as_deref().unwrap_or(PLACEHOLDER),
            rec.sales,
            agent,
            fmt_time_to_goal(rec),
            fmt_duration(rec.connected),
            fmt_duration(rec.break_time),
            fmt_duration(rec.talk_time),
            fmt_duration(rec.wrap_up),
            rec.shift_end.as_deref().unwrap_or(PLACEHOLDER),
            fmt_mismatch(rec),
            rec.office.label(),
        ));
    }
    out
}

/// Group labels in display order with each group's rows.
fn group<'a>(
    records: impl Iterator<Item = &'a ScoredRecord>,
    group_by: GroupBy,
) -> Vec<(String, Vec<&'a ScoredRecord>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: Vec<Vec<&ScoredRecord>> = Vec::new();

    for rec in records {
        let key = match group_by {
            GroupBy::Source => rec.source.clone(),
            GroupBy::Office => format!("{} Office", rec.office.label()),
        };
        match order.iter().position(|k| *k == key) {
            Some(i) => groups[i].push(rec),
            None => {
                order.push(key);
                groups.push(vec![rec]);
            }
        }
    }

    let mut out: Vec<_> = order.into_iter().zip(groups).collect();
    if group_by == GroupBy::Office {
        out.sort_by(|(a, _), (b, _)| a.cmp(b));
    }
    out
}

/// Render every group as a table.
pub fn render_tables(records: &[ScoredRecord], group_by: GroupBy, sort: SortMode) -> String {
    let mut out = String::new();
    for (title, mut rows) in group(records.iter(), group_by) {
        sort_rows(&mut rows, sort);
        out.push_str(&render_table(&title, &rows));
        out.push('\n');
    }
    out
}

/// Agents-per-sale style summary: agent counts, % with sales, total
/// sales and APS per group, then the company-wide line.
///
/// Synthesized total rows are excluded before grouping, so they
/// neither inflate the counts nor surface as a group of their own.
pub fn render_summary(records: &[ScoredRecord], group_by: GroupBy) -> String {
    let mut out = String::from("## Summary\n");
    let mut company_agents = 0usize;
    let mut company_with_sales = 0usize;
    let mut company_sales = 0u32;

    for (title, rows) in group(records.iter().filter(|r| !r.is_total), group_by) {
        let agents = rows.len();
        let with_sales = rows.iter().filter(|r| r.sales > 0).count();
        let sales: u32 = rows.iter().map(|r| r.sales).sum();
        let aps = if agents > 0 {
            sales as f64 / agents as f64
        } else {
            0.0
        };
        let pct = if agents > 0 {
            (with_sales as f64 / agents as f64 * 100.0).round()
        } else {
            0.0
        };

        company_agents += agents;
        company_with_sales += with_sales;
        company_sales += sales;

        out.push_str(&format!(
            "{title}: {agents} agents logged in, {pct:.0}% have leads, {sales} sales - APS {aps:.2}\n"
        ));
    }

    let aps = if company_agents > 0 {
        company_sales as f64 / company_agents as f64
    } else {
        0.0
    };
    let pct = if company_agents > 0 {
        (company_with_sales as f64 / company_agents as f64 * 100.0).round()
    } else {
        0.0
    };
    out.push_str(&format!(
        "Company total: {company_agents} agents, {pct:.0}% with sales, {company_sales} sales - APS {aps:.2}\n"
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shiftpulse_core::{score_batch_with_totals, ShiftRecord};

    fn record(agent: &str, source: &str, talk: f64, sales: u32) -> ShiftRecord {
        ShiftRecord {
            agent: agent.to_string(),
            first_call: Some("6:00AM".to_string()),
            shift_end: Some("4:00PM".to_string()),
            connected: DurationValue::Hours(9.0),
            break_time: DurationValue::Hours(2.0),
            talk_time: DurationValue::Hours(talk),
            wrap_up: DurationValue::Hours(0.5),
            sales,
            report_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            source: source.to_string(),
        }
    }

    #[test]
    fn test_sort_modes() {
        let scored = score_batch_with_totals(&[
            record("b agent", "Server 1", 3.0, 5),
            record("a agent", "Server 1", 6.0, 1),
        ]);
        let mut rows: Vec<&ScoredRecord> = scored.iter().collect();

        sort_rows(&mut rows, SortMode::Agent);
        assert_eq!(rows[0].agent, "a agent");

        sort_rows(&mut rows, SortMode::Talk);
        assert_eq!(rows[0].talk_time, DurationValue::Hours(6.0));

        sort_rows(&mut rows, SortMode::Sales);
        assert_eq!(rows[0].sales, 5);
    }

    #[test]
    fn test_break_wrap_sort_is_ascending_on_the_sum() {
        let mut a = record("a", "s", 1.0, 0);
        a.break_time = DurationValue::Hours(2.5);
        a.wrap_up = DurationValue::Hours(0.1);
        let mut b = record("b", "s", 1.0, 0);
        b.break_time = DurationValue::Hours(1.0);
        b.wrap_up = DurationValue::Hours(1.0);

        let scored = score_batch_with_totals(&[a, b]);
        let mut rows: Vec<&ScoredRecord> = scored.iter().collect();
        sort_rows(&mut rows, SortMode::BreakWrap);
        // 2.0 combined sorts before 2.6 combined.
        assert_eq!(rows[0].agent, "b");
    }

    #[test]
    fn test_tables_group_by_source_and_office() {
        let scored = score_batch_with_totals(&[
            record("n lopez", "Server 1", 3.0, 1),
            record("w judith", "Server 2", 3.0, 0),
        ]);

        let by_source = render_tables(&scored, GroupBy::Source, SortMode::Agent);
        assert!(by_source.contains("## Server 1"));
        assert!(by_source.contains("## Server 2"));

        let by_office = render_tables(&scored, GroupBy::Office, SortMode::Agent);
        assert!(by_office.contains("## Tepic Office"));
        assert!(by_office.contains("## West Office"));
    }

    #[test]
    fn test_adjusted_score_carries_marker() {
        // 10h span but 10.5h connected: mismatch moves the score.
        let mut rec = record("n lopez", "Server 1", 3.0, 0);
        rec.connected = DurationValue::Hours(10.5);
        let scored = score_batch_with_totals(&[rec]);

        let text = render_tables(&scored, GroupBy::Source, SortMode::Agent);
        assert!(text.contains('*'));
        assert!(text.contains("+00:30:00"));
    }

    #[test]
    fn test_summary_excludes_total_rows() {
        // Same agent twice: the rollup row must not inflate the counts.
        let scored = score_batch_with_totals(&[
            record("n lopez", "Server 1", 3.0, 2),
            record("n lopez", "Server 2", 3.0, 1),
        ]);
        assert_eq!(scored.len(), 3);

        let text = render_summary(&scored, GroupBy::Office);
        assert!(text.contains("2 agents"));
        assert!(text.contains("3 sales"));
        assert!(text.contains("APS 1.50"));
    }

    #[test]
    fn test_summary_has_no_rollup_group_under_source_grouping() {
        // Rollup rows carry the "Total" source label; they must not
        // surface as a phantom source group in the summary.
        let scored = score_batch_with_totals(&[
            record("n lopez", "Server 1", 3.0, 2),
            record("n lopez", "Server 2", 3.0, 1),
        ]);
        assert!(scored.iter().any(|r| r.is_total));

        let text = render_summary(&scored, GroupBy::Source);
        assert!(!text.contains("Total:"), "{text}");
        assert!(text.contains("Server 1: 1 agents"));
        assert!(text.contains("Server 2: 1 agents"));
        assert!(text.contains("Company total: 2 agents"));
    }

    #[test]
    fn test_missing_values_render_as_placeholder() {
        let mut rec = record("n lopez", "Server 1", 3.0, 0);
        rec.wrap_up = DurationValue::Missing;
        rec.first_call = None;
        let scored = score_batch_with_totals(&[rec]);

        let text = render_tables(&scored, GroupBy::Source, SortMode::Agent);
        assert!(text.contains("--"));
        assert!(text.contains("missing"));
    }
}
