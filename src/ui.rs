use anyhow::Result;
use carbon_calculator::{
    compute_for_country, format_tonnes, report::CHART_TITLE, Category, EmissionFactorTable,
    InputField, RawInputs, Report,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

/// Which form row has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Country,
    Field(InputField),
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Country => Focus::Field(InputField::Distance),
            Focus::Field(InputField::Meals) => Focus::Country,
            Focus::Field(field) => Focus::Field(field.next()),
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Focus::Country => Focus::Field(InputField::Meals),
            Focus::Field(InputField::Distance) => Focus::Country,
            Focus::Field(field) => Focus::Field(field.previous()),
        }
    }
}

pub struct App {
    pub table: EmissionFactorTable,
    pub countries: Vec<String>,
    pub country_index: usize,
    pub inputs: RawInputs,
    pub focus: Focus,
    pub report: Option<Report>,
}

impl App {
    /// Countries come straight from the table, so the selector can only
    /// ever point at a known key.
    pub fn new(table: EmissionFactorTable, default_country: &str) -> Self {
        let countries: Vec<String> = table.countries().iter().map(|c| c.to_string()).collect();
        let country_index = countries
            .iter()
            .position(|c| c == default_country)
            .unwrap_or(0);

        Self {
            table,
            countries,
            country_index,
            inputs: RawInputs::default(),
            focus: Focus::Country,
            report: None,
        }
    }

    pub fn country(&self) -> &str {
        self.countries
            .get(self.country_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_focus(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Move the focused control by `steps` (country selector wraps).
    pub fn adjust(&mut self, steps: i32) {
        match self.focus {
            Focus::Country => {
                let len = self.countries.len() as i32;
                if len == 0 {
                    return;
                }
                let i = (self.country_index as i32 + steps).rem_euclid(len);
                self.country_index = i as usize;
            }
            Focus::Field(field) => self.inputs.adjust(field, steps),
        }
    }

    /// Jump the focused field to its min or max.
    pub fn jump(&mut self, to_max: bool) {
        if let Focus::Field(field) = self.focus {
            let bounds = field.bounds();
            self.inputs
                .set(field, if to_max { bounds.max } else { bounds.min });
        }
    }

    /// "Calculate CO2 Emissions" button.
    pub fn calculate(&mut self) -> Result<()> {
        let result = compute_for_country(&self.table, self.country(), &self.inputs)?;
        self.report = Some(Report::new(self.country(), self.inputs, result));
        Ok(())
    }

    pub fn reset(&mut self) {
        self.inputs = RawInputs::default();
        self.report = None;
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let big = key.modifiers.contains(KeyModifiers::SHIFT);
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.calculate()?,
                KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => app.next_focus(),
                KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => app.previous_focus(),
                KeyCode::Right | KeyCode::Char('l') => app.adjust(if big { 10 } else { 1 }),
                KeyCode::Left | KeyCode::Char('h') => app.adjust(if big { -10 } else { -1 }),
                KeyCode::PageUp => app.adjust(10),
                KeyCode::PageDown => app.adjust(-10),
                KeyCode::Home => app.jump(false),
                KeyCode::End => app.jump(true),
                KeyCode::Char('r') => app.reset(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Inputs
            Constraint::Percentage(60), // Results + chart
        ])
        .split(chunks[1]);

    render_form(f, content[0], app);

    match &app.report {
        Some(report) => {
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(content[1]);

            render_results(f, right[0], report);
            render_chart(f, right[1], report);
        }
        None => render_placeholder(f, content[1]),
    }

    render_status_bar(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "Carbon Calculator",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Country: {}", app.country()),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(report) = &app.report {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("Total: {} t CO2/yr", format_tonnes(report.result.total)),
            Style::default().fg(Color::Green),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// `[██████──────────]` for a value within its range.
fn slider(value: f64, min: f64, max: f64, width: usize) -> String {
    let ratio = if max > min { (value - min) / (max - min) } else { 0.0 };
    let filled = ((ratio.clamp(0.0, 1.0)) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "─".repeat(width - filled))
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled("Your Country", focus_style(app.focus == Focus::Country))),
        Line::from(vec![
            Span::raw(if app.focus == Focus::Country { "→ " } else { "  " }),
            Span::styled(format!("◀ {} ▶", app.country()), focus_style(app.focus == Focus::Country)),
        ]),
        Line::from(""),
    ];

    for field in InputField::ALL {
        let focused = app.focus == Focus::Field(field);
        let bounds = field.bounds();
        let value = app.inputs.get(field);

        lines.push(Line::from(Span::styled(field.label(), focus_style(focused))));
        lines.push(Line::from(vec![
            Span::raw(if focused { "→ " } else { "  " }),
            Span::styled(slider(value, bounds.min, bounds.max, 20), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {} {}", value, field.unit())),
        ]));
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Inputs "),
    );

    f.render_widget(form, area);
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" to calculate CO2 emissions"),
        ]),
    ];

    let placeholder = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Results "),
    );

    f.render_widget(placeholder, area);
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Transportation => Color::Blue,
        Category::Electricity => Color::Yellow,
        Category::Diet => Color::Red,
        Category::Waste => Color::Green,
    }
}

fn render_results(f: &mut Frame, area: Rect, report: &Report) {
    let mut lines = vec![Line::from(Span::styled(
        "Carbon Emissions by Category",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for ((category, _), text) in report.result.categories().iter().zip(report.category_lines()) {
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(category_color(*category)),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        report.total_line(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));

    if let Some(context) = report.context {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(context, Style::default().fg(Color::Yellow))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tips to Reduce Your Carbon Footprint",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for tip in report.tips() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("- {}: ", tip.category.as_str()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(tip.text),
        ]));
    }

    let results = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Results ({}) ", report.country)),
    );

    f.render_widget(results, area);
}

fn render_chart(f: &mut Frame, area: Rect, report: &Report) {
    // BarChart takes integers: plot hundredths of a tonne, label with the real value
    let bars: Vec<Bar> = report
        .chart_rows()
        .iter()
        .map(|row| {
            Bar::default()
                .value((row.tonnes * 100.0).round() as u64)
                .text_value(format_tonnes(row.tonnes))
                .label(Line::from(row.label))
                .style(Style::default().fg(category_color(row.category)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", CHART_TITLE)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(14)
        .bar_gap(2)
        .value_style(Style::default().fg(Color::Black).bg(Color::White));

    f.render_widget(chart, area);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let status_spans = vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Calculate | "),
        Span::styled("Tab/↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Field | "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" Adjust (Shift ×10) | "),
        Span::styled("Home/End", Style::default().fg(Color::Yellow)),
        Span::raw(" Min/Max | "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Reset | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
