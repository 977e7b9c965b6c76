//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use super::runtime::{App, PAGE_STEPS};
use super::style;
use crate::impact::ImpactReport;
use crate::report::{
    advisory_analysis, advisory_note, flex_summary, group_thousands, impact_column_title,
    row_impact,
};

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(6), // comparison table
            Constraint::Min(8),    // bar chart
            Constraint::Length(7), // advisory
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match &app.result {
        Ok(report) => {
            render_table(frame, report, chunks[1]);
            render_chart(frame, report, chunks[2]);
            render_advisory(frame, report, chunks[3]);
        }
        Err(e) => {
            let body = Rect {
                height: chunks[1].height + chunks[2].height + chunks[3].height,
                ..chunks[1]
            };
            render_error(frame, &e.to_string(), body);
        }
    }
    render_footer(frame, app, chunks[4]);
}

/// Header bar: title, current inputs, setpoints.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let setpoints = app.config().setpoints;
    let header = Line::from(vec![
        Span::styled(
            " GRID IMPACT ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " outdoor {:.1}°C │ {} units │ {:.2}°C → {:.2}°C ",
            app.outdoor,
            group_thousands(app.units),
            setpoints.baseline_c,
            setpoints.load_shed_c,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Two-row baseline vs load-shed comparison.
fn render_table(frame: &mut Frame, report: &ImpactReport, area: Rect) {
    let impact_title = impact_column_title(report.unit_count);
    let header = Row::new(vec![
        Cell::from("SCENARIO"),
        Cell::from("SETPOINT"),
        Cell::from("POWER (W)"),
        Cell::from(impact_title.clone()),
        Cell::from("STATUS"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = report.rows().map(|row| {
        Row::new(vec![
            Cell::from(row.name),
            Cell::from(format!("{:.2}°C", row.setpoint_c)),
            Cell::from(format!("{:.0} W", row.power_w)),
            Cell::from(row_impact(&row)),
            Cell::from(row.status.label())
                .style(Style::default().fg(style::status_color(row.status))),
        ])
    });

    let widths = [
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(u16::try_from(impact_title.len()).unwrap_or(u16::MAX)),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(" Grid Impact Results ").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Aggregate kW for both scenarios.
fn render_chart(frame: &mut Frame, report: &ImpactReport, area: Rect) {
    let baseline_kw = report.baseline.aggregate_kw();
    let shed_kw = report.load_shed.aggregate_kw();
    let bars = [
        Bar::default()
            .label("Baseline".into())
            .value(bar_value(baseline_kw))
            .text_value(format!("{baseline_kw:.1} kW"))
            .style(Style::default().fg(style::BASELINE_BAR)),
        Bar::default()
            .label("Load-Shed".into())
            .value(bar_value(shed_kw))
            .text_value(format!("{shed_kw:.1} kW"))
            .style(Style::default().fg(style::load_shed_color(report.flex_down_pct))),
    ];

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Aggregated Load Profile (kW) ")
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(14)
        .bar_gap(4);
    frame.render_widget(chart, area);
}

/// Bars cannot go negative; sub-kW draws round to zero height.
fn bar_value(kw: f64) -> u64 {
    if kw.is_finite() && kw > 0.0 {
        kw.round() as u64
    } else {
        0
    }
}

/// Flex summary, note, and VPP analysis.
fn render_advisory(frame: &mut Frame, report: &ImpactReport, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            flex_summary(report),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(advisory_note(report)),
        Line::from(advisory_analysis(report)),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Advisory ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Diagnostic panel shown instead of the results.
fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!("error: {message}"),
        Style::default()
            .fg(style::ERROR_FG)
            .add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true })
    .block(Block::default().title(" Diagnostic ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let limits = app.limits();
    let footer = Paragraph::new(Line::from(Span::styled(
        format!(
            " q:Quit  ←/→:Outdoor ±{}°C  ↑/↓:Units ±{}  PgUp/PgDn:±{}  r:Reset",
            limits.outdoor_step_c,
            group_thousands(limits.unit_count_step),
            group_thousands(limits.unit_count_step.saturating_mul(PAGE_STEPS)),
        ),
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
