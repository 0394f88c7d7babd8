use anyhow::Context;
use onehand_core::{OutcomeRecord, RuleSelection, RuleSet, RunStats};
use std::fs;
use std::path::Path;

/// Markdown summary of every stored outcome, grouped by rule-set.
pub fn render_markdown(records: &[OutcomeRecord]) -> String {
    let stats = RunStats::from_records(RuleSelection::Both, records);
    let mut lines = vec![
        "| Game Type | Games Played | Wins | Win Percentage |".to_string(),
        "| --------- |:------------:|:----:|:--------------:|".to_string(),
    ];
    for rule_set in RuleSet::ALL {
        let rule = stats.for_rule_set(rule_set);
        lines.push(format!(
            "| {} | {} | {} | {} |",
            rule_set,
            group_thousands(rule.games),
            group_thousands(rule.wins),
            rule.win_pct_label()
        ));
    }

    for rule_set in RuleSet::ALL {
        let rule = stats.for_rule_set(rule_set);
        lines.push(String::new());
        lines.push(format!("### Wins by First Match Card - {rule_set}"));
        lines.push(String::new());
        if rule.wins_by_first_match.is_empty() {
            lines.push("(no wins)".to_string());
            continue;
        }
        lines.push("| First Match Card | Games Won |".to_string());
        lines.push("|:----------------:|:---------:|".to_string());
        for (position, wins) in &rule.wins_by_first_match {
            lines.push(format!("| {position} | {} |", group_thousands(*wins)));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn write_report(path: &Path, body: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
