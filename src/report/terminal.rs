use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::distribution::SentimentDistribution;
use crate::models::{
    AnnotatedComment, DisplayAnnotation, RiskLevel, SentimentLabel, SentimentOutcome,
    ThreatFinding,
};
use crate::report::ReportView;

pub fn render_sentiment(outcome: &SentimentOutcome, quiet: bool) {
    if quiet {
        println!("{} ({:.2})", outcome.label, outcome.confidence);
        return;
    }

    println!();
    println!(" Sentiment  : {}", paint_label(outcome.label));
    println!(" Confidence : {:.2}", outcome.confidence);
    println!(" Source     : {}", outcome.source.to_string().dimmed());
    println!();
}

pub fn render_finding(finding: &ThreatFinding, quiet: bool) {
    if quiet {
        println!(
            "Risk: {}  Score: {}  Threat: {}",
            paint_risk(finding.risk_level),
            finding.threat_score,
            finding.is_threat
        );
        return;
    }

    println!();
    println!(" Risk level   : {}", paint_risk(finding.risk_level));
    println!(" Threat score : {}", finding.threat_score);
    println!(
        " Threat       : {}",
        if finding.is_threat { "yes".red().bold() } else { "no".green() }
    );
    println!(" Indicators   : {}", join_or_dash(&finding.matched_indicators));
    println!(" Keywords     : {}", join_or_dash(&finding.critical_keywords));
    println!();
}

pub fn render_report(view: &ReportView, quiet: bool) {
    let assessment = &view.assessment;

    if quiet {
        println!(
            "Risk: {}  Severity: {}/100",
            paint_risk(assessment.risk_level),
            assessment.severity_score
        );
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

    table.add_row(vec![Cell::new("Sentiment"), Cell::new(&assessment.sentiment)]);
    if let Some(confidence) = view.sentiment_confidence {
        table.add_row(vec![
            Cell::new("Sentiment confidence"),
            Cell::new(format!("{confidence:.2}")),
        ]);
    }
    if let Some(source) = view.sentiment_source {
        table.add_row(vec![Cell::new("Sentiment source"), Cell::new(source.to_string())]);
    }
    table.add_row(vec![
        Cell::new("Risk level"),
        Cell::new(assessment.risk_level.to_string()).fg(risk_color(assessment.risk_level)),
    ]);
    table.add_row(vec![
        Cell::new("Severity"),
        Cell::new(format!("{}/100", assessment.severity_score)),
    ]);
    table.add_row(vec![
        Cell::new("Threat"),
        Cell::new(if assessment.is_threat { "yes" } else { "no" }),
    ]);
    table.add_row(vec![
        Cell::new("Indicators"),
        Cell::new(join_or_dash(&assessment.matched_indicators)),
    ]);

    println!("\n{}", table);
    println!(
        "\n {} {}\n",
        "→".cyan(),
        assessment
            .recommendation
            .color(terminal_color(risk_color(assessment.risk_level)))
    );
}

pub fn render_display(label: &str, display: &DisplayAnnotation) {
    println!(
        " {}  {:<14} background {}  score {:.2}",
        display.emoji, label, display.background_color, display.scalar
    );
}

pub fn render_batch(comments: &[AnnotatedComment], distribution: &SentimentDistribution, quiet: bool) {
    if quiet {
        let parts: Vec<String> = distribution
            .entries()
            .iter()
            .map(|(label, n)| format!("{label}: {n}"))
            .collect();
        println!("Total: {}  {}", distribution.total(), parts.join("  "));
        return;
    }

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SENTIMENT DISTRIBUTION".bold());
    println!(" │  {:<48} │", format!("Total comments : {}", distribution.total()));
    for (label, count) in distribution.entries() {
        println!(" │  {:<48} │", format!("{:<15}: {:>5}", label.to_string(), count));
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    if comments.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("").add_attribute(Attribute::Bold),
            Cell::new("Comment").add_attribute(Attribute::Bold),
            Cell::new("Sentiment").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);

    for comment in comments {
        table.add_row(vec![
            Cell::new(&comment.emoji),
            Cell::new(&comment.content),
            Cell::new(comment.sentiment.to_string()).fg(label_color(comment.sentiment)),
            Cell::new(format!("{:.2}", comment.confidence)).set_alignment(CellAlignment::Right),
            Cell::new(comment.source.to_string()),
        ]);
    }

    println!("{}", table);
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn paint_label(label: SentimentLabel) -> ColoredString {
    let text = label.to_string();
    match label {
        SentimentLabel::VeryPositive => text.green().bold(),
        SentimentLabel::Positive => text.green(),
        SentimentLabel::Neutral => text.normal(),
        SentimentLabel::Negative => text.yellow(),
        SentimentLabel::VeryNegative => text.red().bold(),
    }
}

fn paint_risk(level: RiskLevel) -> ColoredString {
    let text = level.to_string();
    match level {
        RiskLevel::Critical => text.red().bold(),
        other => text.color(terminal_color(risk_color(other))),
    }
}

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Magenta,
        RiskLevel::Critical => Color::Red,
    }
}

fn label_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::VeryPositive | SentimentLabel::Positive => Color::Green,
        SentimentLabel::Neutral => Color::DarkGrey,
        SentimentLabel::Negative => Color::Yellow,
        SentimentLabel::VeryNegative => Color::Red,
    }
}

/// The `colored` equivalent of a table color, so text and cells share one palette.
fn terminal_color(color: Color) -> colored::Color {
    match color {
        Color::Green => colored::Color::Green,
        Color::Yellow => colored::Color::Yellow,
        Color::Magenta => colored::Color::Magenta,
        Color::Red => colored::Color::Red,
        Color::DarkGrey => colored::Color::BrightBlack,
        _ => colored::Color::White,
    }
}
