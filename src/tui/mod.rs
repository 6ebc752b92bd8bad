//! Ratatui-based terminal UI.
//!
//! Three pages mirror the original dashboard's sidebar navigation: a dataset
//! overview, a per-category analysis, and a chart gallery. Every page switch
//! and selection change re-runs the shared load/derive pipeline, so each
//! view works on a freshly loaded dataset and nothing is cached in between.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row,
        Table,
    },
    Terminal,
};

use crate::app::pipeline::{self, ViewData};
use crate::cli::ViewArgs;
use crate::domain::ViewConfig;
use crate::error::AppError;
use crate::ingredients;
use crate::report::series;

mod plotters_chart;

use plotters_chart::{HistogramChart, ScatterChart};

/// Start the TUI.
pub fn run(args: ViewArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(crate::app::view_config_from_args(&args));
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Overview,
    Category,
    Charts,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Category => "Category analysis",
            Page::Charts => "Charts",
        }
    }

    fn next(self) -> Page {
        match self {
            Page::Overview => Page::Category,
            Page::Category => Page::Charts,
            Page::Charts => Page::Overview,
        }
    }

    fn prev(self) -> Page {
        match self {
            Page::Overview => Page::Charts,
            Page::Category => Page::Overview,
            Page::Charts => Page::Category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    MeanPrice,
    SizeHistogram,
    ProductCounts,
    PriceVsSize,
    FlagTotals,
}

impl ChartKind {
    fn title(self) -> &'static str {
        match self {
            ChartKind::MeanPrice => "Mean price by product type",
            ChartKind::SizeHistogram => "Package size histogram",
            ChartKind::ProductCounts => "Products per type",
            ChartKind::PriceVsSize => "Price vs package size",
            ChartKind::FlagTotals => "Ingredient flag totals",
        }
    }

    fn next(self) -> ChartKind {
        match self {
            ChartKind::MeanPrice => ChartKind::SizeHistogram,
            ChartKind::SizeHistogram => ChartKind::ProductCounts,
            ChartKind::ProductCounts => ChartKind::PriceVsSize,
            ChartKind::PriceVsSize => ChartKind::FlagTotals,
            ChartKind::FlagTotals => ChartKind::MeanPrice,
        }
    }

    fn prev(self) -> ChartKind {
        match self {
            ChartKind::MeanPrice => ChartKind::FlagTotals,
            ChartKind::SizeHistogram => ChartKind::MeanPrice,
            ChartKind::ProductCounts => ChartKind::SizeHistogram,
            ChartKind::PriceVsSize => ChartKind::ProductCounts,
            ChartKind::FlagTotals => ChartKind::PriceVsSize,
        }
    }
}

struct App {
    config: ViewConfig,
    page: Page,
    chart: ChartKind,
    category_idx: usize,
    scroll: usize,
    status: String,
    view: Option<ViewData>,
    categories: Vec<String>,
}

impl App {
    fn new(config: ViewConfig) -> Self {
        let mut app = Self {
            config,
            page: Page::Overview,
            chart: ChartKind::MeanPrice,
            category_idx: 0,
            scroll: 0,
            status: "Loading...".to_string(),
            view: None,
            categories: Vec::new(),
        };
        app.reload();
        app
    }

    /// Reload the dataset through the shared pipeline.
    ///
    /// Called on every page switch and selection change: views never share a
    /// dataset, matching the per-view lifecycle of the original dashboard.
    fn reload(&mut self) {
        match pipeline::run_view(&self.config) {
            Ok(view) => {
                self.categories = ingredients::categories(&view.dataset);
                if self.category_idx >= self.categories.len() {
                    self.category_idx = 0;
                }
                self.status = format!(
                    "Loaded {} products from '{}'.",
                    view.dataset.len(),
                    self.config.csv_path.display()
                );
                self.view = Some(view);
            }
            Err(err) => {
                self.view = None;
                self.categories.clear();
                self.status = err.to_string();
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.switch_page(self.page.next()),
            KeyCode::BackTab => self.switch_page(self.page.prev()),
            KeyCode::Char('1') => self.switch_page(Page::Overview),
            KeyCode::Char('2') => self.switch_page(Page::Category),
            KeyCode::Char('3') => self.switch_page(Page::Charts),
            KeyCode::Left => self.adjust_selection(-1),
            KeyCode::Right => self.adjust_selection(1),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('r') => {
                self.reload();
            }
            _ => {}
        }
        false
    }

    fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.scroll = 0;
        self.reload();
    }

    fn adjust_selection(&mut self, delta: i32) {
        match self.page {
            Page::Overview => {}
            Page::Category => {
                self.cycle_category(delta);
                self.scroll = 0;
                self.reload();
                if let Some(category) = self.selected_category().map(str::to_string) {
                    self.status = format!("category: {category}");
                }
            }
            Page::Charts => {
                self.chart = if delta >= 0 {
                    self.chart.next()
                } else {
                    self.chart.prev()
                };
                self.reload();
                self.status = match self.chart {
                    // The scatter chart follows the category picked on page 2.
                    ChartKind::PriceVsSize => {
                        format!("chart: {} (category via page 2)", self.chart.title())
                    }
                    _ => format!("chart: {}", self.chart.title()),
                };
            }
        }
    }

    fn cycle_category(&mut self, delta: i32) {
        let n = self.categories.len();
        if n == 0 {
            return;
        }
        self.category_idx = if delta >= 0 {
            (self.category_idx + 1) % n
        } else {
            (self.category_idx + n - 1) % n
        };
    }

    fn selected_category(&self) -> Option<&str> {
        self.categories.get(self.category_idx).map(String::as_str)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        match self.page {
            Page::Overview => self.draw_overview(frame, chunks[1]),
            Page::Category => self.draw_category(frame, chunks[1]),
            Page::Charts => self.draw_charts(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("skincare", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" — {}", self.page.title())),
        ]));

        if let Some(view) = &self.view {
            lines.push(Line::from(Span::styled(
                format!(
                    "products: {} | categories: {} | price: [{:.2}, {:.2}] mean {:.2} | size: [{:.0}, {:.0}]",
                    view.stats.n_products,
                    view.stats.n_categories,
                    view.stats.price_min,
                    view.stats.price_max,
                    view.stats.price_mean,
                    view.stats.size_min,
                    view.stats.size_max,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_overview(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(view) = &self.view else {
            self.draw_waiting(frame, area);
            return;
        };

        let visible = area.height.saturating_sub(3) as usize;
        let header = Row::new(vec!["product_name", "product_type", "size_ml", "price_eur"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = view
            .dataset
            .records
            .iter()
            .zip(&view.derived)
            .skip(self.scroll.min(view.dataset.len().saturating_sub(1)))
            .take(visible)
            .map(|(record, d)| {
                Row::new(vec![
                    Cell::from(record.product_name.clone()),
                    Cell::from(record.product_type.clone()),
                    Cell::from(format!("{:.0}", d.package_size_ml)),
                    Cell::from(format!("{:.2}", d.price_euros)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(28),
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!("Products ({} rows)", view.dataset.len()))
                .borders(Borders::ALL),
        );
        frame.render_widget(table, area);
    }

    fn draw_category(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(view) = &self.view else {
            self.draw_waiting(frame, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Min(0)])
            .split(area);

        let items: Vec<ListItem> = self
            .categories
            .iter()
            .map(|c| ListItem::new(c.clone()))
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Types").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.category_idx.min(self.categories.len().saturating_sub(1))));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let Some(category) = self.selected_category() else {
            let msg = Paragraph::new("No product types in this dataset.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, chunks[1]);
            return;
        };

        let summary = ingredients::analyze_category(&view.dataset, category);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Percentage(40),
                Constraint::Min(0),
            ])
            .split(chunks[1]);

        let mut lines = vec![
            Line::from(format!("Products: {}", summary.product_count)),
            Line::from(format!(
                "Distinct ingredient lists: {}",
                summary.distinct_ingredient_lists
            )),
            Line::from("Common 3 ingredients:"),
        ];
        if summary.top.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (none)",
                Style::default().fg(Color::Gray),
            )));
        }
        for (token, count) in &summary.top {
            lines.push(Line::from(format!("  {token}: {count}")));
        }
        let p = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .title(category.to_string())
                .borders(Borders::ALL),
        );
        frame.render_widget(p, right[0]);

        let products = series::category_products(&view.dataset, &view.derived, category);
        let product_items: Vec<ListItem> = products
            .iter()
            .map(|(name, size, price)| {
                ListItem::new(format!("{:<36} {:>6.0} {:>8.2}", clip(name, 36), size, price))
            })
            .collect();
        let product_list = List::new(product_items).block(
            Block::default()
                .title(format!("Products ({})", products.len()))
                .borders(Borders::ALL),
        );
        frame.render_widget(product_list, right[1]);

        let freq_items: Vec<ListItem> = summary
            .frequency
            .entries()
            .iter()
            .skip(self.scroll.min(summary.frequency.len().saturating_sub(1)))
            .map(|(token, count)| ListItem::new(format!("{token:<40} {count}")))
            .collect();
        let freq_list = List::new(freq_items).block(
            Block::default()
                .title(format!("Ingredient counts ({})", summary.frequency.len()))
                .borders(Borders::ALL),
        );
        frame.render_widget(freq_list, right[2]);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.chart.title())
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(view) = &self.view else {
            self.draw_waiting(frame, inner);
            return;
        };

        match self.chart {
            ChartKind::MeanPrice => {
                let stats = series::price_by_type(&view.dataset, &view.derived);
                self.draw_bar_series(frame, inner, &series::mean_price_series(&stats));
            }
            ChartKind::ProductCounts => {
                self.draw_bar_series(frame, inner, &series::product_count_series(&view.dataset));
            }
            ChartKind::FlagTotals => {
                let flags = series::flag_series(&view.dataset, self.config.top_n);
                if flags.is_empty() {
                    let msg = Paragraph::new("No ingredient_* flag columns in this file.")
                        .style(Style::default().fg(Color::Yellow));
                    frame.render_widget(msg, inner);
                } else {
                    self.draw_bar_series(frame, inner, &flags);
                }
            }
            ChartKind::SizeHistogram => {
                let hist =
                    series::package_size_histogram(&view.derived, self.config.histogram_bins);
                let widget = HistogramChart {
                    labels: &hist.labels,
                    values: &hist.values,
                    x_label: "package size",
                    y_label: "products",
                };
                frame.render_widget(widget, inner);
            }
            ChartKind::PriceVsSize => {
                let category = self.selected_category();
                let points = series::price_vs_size(&view.dataset, &view.derived, category);
                let (x_bounds, y_bounds) = scatter_bounds(&points);
                let widget = ScatterChart {
                    points: &points,
                    x_bounds,
                    y_bounds,
                    x_label: "package size",
                    y_label: "price (EUR)",
                };
                frame.render_widget(widget, inner);
            }
        }
    }

    fn draw_bar_series(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        data: &series::ChartSeries,
    ) {
        if data.is_empty() {
            let msg = Paragraph::new("No data.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, area);
            return;
        }

        let bars: Vec<Bar> = data
            .labels
            .iter()
            .zip(&data.values)
            .map(|(label, value)| {
                Bar::default()
                    .value(value.round().max(0.0) as u64)
                    .label(Line::from(clip(label, 8)))
            })
            .collect();

        let chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(8)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
        frame.render_widget(chart, area);
    }

    fn draw_waiting(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let msg = Paragraph::new("Waiting for data... ('r' retries the load)")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(msg, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "1/2/3 pages  Tab next  ←/→ adjust  ↑/↓ scroll  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn scatter_bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
        x_min = 0.0;
        x_max = 1.0;
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }

    let x_pad = ((x_max - x_min).abs() * 0.05).max(1e-12);
    let y_pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    (
        [x_min - x_pad, x_max + x_pad],
        [y_min - y_pad, y_max + y_pad],
    )
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
