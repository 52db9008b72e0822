use std::{io, thread, time::Duration};

use anyhow::{anyhow, Context, Result};
use boardgames_core::{
    filter::{FilterDimension, PriceHandle, PriceSlider},
    AppConfig, Catalog, GameRecord, PriceRange,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{
    state::{Focus, UiState},
    theme::Theme,
};

const TICK_RATE: Duration = Duration::from_millis(250);
const LABEL_WIDTH: usize = 20;

enum AppEvent {
    Input(Event),
    Tick,
}

/// The single catalog screen.
pub struct CatalogApp {
    state: UiState,
    theme: Theme,
}

impl CatalogApp {
    pub fn new(catalog: Catalog, config: &AppConfig) -> Self {
        let (theme, problems) = Theme::from_config(&config.theme);
        for problem in &problems {
            warn!("{problem}");
        }
        let mut state = UiState::new(catalog, config.price);
        let mut status = format!("Загружено игр: {}", state.total_games());
        if !problems.is_empty() {
            status.push_str(" • ");
            status.push_str(&problems.join("; "));
        }
        state.set_status(status);
        Self { state, theme }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let result = self.event_loop(&mut terminal, &mut event_rx).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }
            if !self.process_app_event(events.recv().await) {
                break;
            }
        }
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    warn!(%err, "Input handling failed");
                    self.state.set_status(format!("Ошибка: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => true,
            None => false,
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.handle_global_key(&key) {
            return Ok(());
        }
        match self.state.focus {
            Focus::Filters => self.handle_filter_key(key),
            Focus::Catalog => self.handle_catalog_key(key),
        }
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.state.toggle_focus();
                let message = match self.state.focus {
                    Focus::Filters => "Фильтры",
                    Focus::Catalog => "Каталог",
                };
                self.state.set_status(message);
            }
            KeyCode::Char('r') if key.modifiers.is_empty() => {
                self.state.reset_filters();
                info!("Filters reset");
                self.state.set_status(format!(
                    "Фильтры сброшены • Найдено игр: {}",
                    self.state.filtered.len()
                ));
            }
            _ => return false,
        }
        true
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_filter_row(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_filter_row(-1),
            KeyCode::Char('h') | KeyCode::Left => self.adjust_filter(-1),
            KeyCode::Char('l') | KeyCode::Right => self.adjust_filter(1),
            KeyCode::Char(' ') if self.state.filter_row == FilterDimension::Price => {
                self.state.toggle_price_handle();
                let handle = match self.state.price_handle {
                    PriceHandle::Min => "минимальная",
                    PriceHandle::Max => "максимальная",
                };
                self.state.set_status(format!("Цена: {handle} граница"));
            }
            KeyCode::Enter => self.state.focus = Focus::Catalog,
            _ => {}
        }
        Ok(())
    }

    fn adjust_filter(&mut self, delta: isize) {
        if self.state.adjust_filter(delta) {
            info!(filter = %self.state.filter, matches = self.state.filtered.len(), "Filter changed");
            self.state
                .set_status(format!("Найдено игр: {}", self.state.filtered.len()));
        }
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_cursor(-1),
            KeyCode::Char('g') if key.modifiers.is_empty() => self.state.move_to(0),
            KeyCode::Char('G') => self.state.move_to_end(),
            KeyCode::Home => self.state.move_to(0),
            KeyCode::End => self.state.move_to_end(),
            KeyCode::PageDown => self.state.page_down(),
            KeyCode::PageUp => self.state.page_up(),
            KeyCode::Enter => self.activate_current()?,
            _ => {}
        }
        Ok(())
    }

    fn activate_current(&mut self) -> Result<()> {
        let game = self
            .state
            .current_game()
            .ok_or_else(|| anyhow!("нет выбранной игры"))?;
        let title = game.title.clone();
        let vendors: Option<Vec<&'static str>> = game
            .purchase_links
            .as_ref()
            .map(|links| links.iter().map(|(vendor, _)| vendor.label()).collect());

        let message = match vendors {
            Some(vendors) if vendors.is_empty() => format!("{title}: нет магазинов"),
            Some(vendors) => format!("{title} продаётся в: {}", vendors.join(", ")),
            None => {
                let id = self
                    .state
                    .add_current_to_cart()
                    .map(|game| game.id)
                    .ok_or_else(|| anyhow!("игру нельзя добавить в корзину"))?;
                info!(id, title = %title, "Added to cart");
                format!(
                    "«{title}» добавлена в корзину (в корзине: {})",
                    self.state.cart.len()
                )
            }
        };
        self.state.set_status(message);
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let filter_height = FilterDimension::ALL.len() as u16 + 3;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(filter_height),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(size);

        self.render_header(frame, chunks[0]);
        self.render_filters(frame, chunks[1]);
        if self.state.filtered.is_empty() {
            self.render_empty(frame, chunks[2]);
        } else {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(chunks[2]);
            self.render_game_list(frame, body[0]);
            self.render_game_card(frame, body[1]);
        }
        self.render_status(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "🎲 Мир настольных игр",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("Найди идеальную игру для всей семьи!"),
            Line::from(Span::styled(
                "Для всей семьи · Лучшие игры · Быстрая доставка",
                Style::default().fg(self.theme.muted),
            )),
        ];
        let header = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(header, area);
    }

    fn render_filters(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = FilterDimension::ALL
            .iter()
            .map(|row| self.filter_line(*row))
            .collect();

        let bar_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 6).max(2);
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(LABEL_WIDTH + 2)),
            Span::styled(
                price_bar(self.state.slider(), &self.state.filter.price_range, bar_width),
                Style::default().fg(self.theme.accent),
            ),
        ]));

        let mut title = String::from("Фильтры");
        if self.state.focus == Focus::Filters {
            title.push_str(" ▸");
        }
        if !self.state.filter.is_unconstrained(self.state.slider()) {
            title.push_str(" · r: сбросить");
        }
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
    }

    fn filter_line(&self, row: FilterDimension) -> Line<'static> {
        let focused = self.state.focus == Focus::Filters && self.state.filter_row == row;
        let mut spans = vec![
            if focused {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            },
            Span::styled(
                format!("{:<width$}", row.label(), width = LABEL_WIDTH),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];

        if row == FilterDimension::Price {
            let range = self.state.filter.price_range;
            spans.push(Span::styled(
                format!("{range}"),
                Style::default().fg(self.theme.primary_fg),
            ));
            if focused {
                let handle = match self.state.price_handle {
                    PriceHandle::Min => "  [мин]",
                    PriceHandle::Max => "  [макс]",
                };
                spans.push(Span::styled(handle, Style::default().fg(self.theme.muted)));
            }
            return Line::from(spans);
        }

        let selected = self.state.filter.choice(row);
        for choice in row.choices() {
            let label = format!(" {} ", row.option_label(&choice));
            let style = if selected == Some(&choice) {
                Style::default()
                    .bg(self.theme.accent)
                    .fg(self.theme.on_accent)
                    .add_modifier(Modifier::BOLD)
            } else if focused {
                Style::default().fg(self.theme.primary_fg)
            } else {
                Style::default().fg(self.theme.muted)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn catalog_title(&self) -> String {
        format!(
            "Каталог игр · Найдено игр: {} из {}",
            self.state.filtered.len(),
            self.state.total_games()
        )
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from("😢"),
            Line::from(Span::styled(
                "Игры не найдены",
                Style::default()
                    .fg(self.theme.danger)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Попробуйте изменить фильтры",
                Style::default().fg(self.theme.muted),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.catalog_title()),
            )
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_game_list(&mut self, frame: &mut Frame, area: Rect) {
        self.state.list_height = area.height.saturating_sub(2) as usize;
        self.state.clamp_cursor();
        self.state.ensure_cursor_visible();

        let mut list_state = ListState::default();
        let height = area.height.saturating_sub(2) as usize;
        let games = self.state.visible_games(height);
        if !games.is_empty() {
            let selected = self
                .state
                .cursor
                .saturating_sub(self.state.offset)
                .min(games.len().saturating_sub(1));
            list_state.select(Some(selected));
        }
        let items: Vec<ListItem> = games
            .iter()
            .enumerate()
            .map(|(idx, game)| {
                let is_selected = self.state.cursor == self.state.offset + idx;
                let marker = if is_selected {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let title = Span::styled(
                    game.title.clone(),
                    Style::default()
                        .fg(self.theme.primary_fg)
                        .add_modifier(Modifier::BOLD),
                );
                let price = Span::styled(
                    format!(" · {}", game.price_label()),
                    Style::default().fg(self.theme.muted),
                );
                ListItem::new(Line::from(vec![marker, title, price]))
            })
            .collect();

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(self.catalog_title());
        if self.state.focus == Focus::Catalog {
            block = block.border_style(Style::default().fg(self.theme.accent));
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.highlight));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_game_card(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Игра");
        let Some(game) = self.state.current_game() else {
            frame.render_widget(Paragraph::new("Нет выбранной игры").block(block), area);
            return;
        };
        let lines = self.card_lines(game);
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn card_lines(&self, game: &GameRecord) -> Vec<Line<'static>> {
        let accent = Style::default().fg(self.theme.accent);
        let muted = Style::default().fg(self.theme.muted);
        let badge = Style::default()
            .bg(self.theme.accent)
            .fg(self.theme.on_accent)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    game.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(format!(" {} ", game.price_label()), badge),
            ]),
            Line::from(Span::styled(game.description.clone(), muted)),
            Line::from(""),
            Line::from(format!("Жанр: {}", game.genre)),
            Line::from(format!("Игроки: {}", game.players_label())),
            Line::from(format!("Время: {}", game.duration)),
            Line::from(vec![
                Span::raw("Возраст: "),
                Span::styled(format!("[{}]", game.age_rating), accent),
            ]),
            Line::from(Span::styled(format!("Обложка: {}", game.image), muted)),
            Line::from(""),
        ];

        match &game.purchase_links {
            Some(links) => {
                lines.push(Line::from(Span::styled(
                    "Купить на:",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for (vendor, url) in links.iter() {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<12}", vendor.label()), accent),
                        Span::styled(url.to_string(), muted),
                    ]));
                }
            }
            None => {
                lines.push(Line::from(Span::styled(
                    " 🛒 Добавить в корзину (Enter) ",
                    badge,
                )));
                let carted = self.state.cart_count(game.id);
                if carted > 0 {
                    lines.push(Line::from(Span::styled(
                        format!("В корзине: {carted}"),
                        muted,
                    )));
                }
            }
        }
        lines
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.state.focus {
            Focus::Filters => {
                "Tab: каталог  ↑↓: фильтр  ←→: значение  Space: граница цены  r: сброс  q: выход"
            }
            Focus::Catalog => "Tab: фильтры  ↑↓: выбор  Enter: купить  r: сброс  q: выход",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Статус · Корзина: {}", self.state.cart.len()));
        let paragraph = Paragraph::new(vec![
            Line::from(self.state.status.clone()),
            Line::from(Span::styled(hints, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// Text slider: `●` marks each handle, `━` the selected span.
fn price_bar(slider: &PriceSlider, range: &PriceRange, width: usize) -> String {
    let width = width.max(2);
    let slider = slider.normalized();
    let span = u64::from(slider.max - slider.min).max(1);
    let position = |value: u32| -> usize {
        let clamped = value.clamp(slider.min, slider.max);
        (u64::from(clamped - slider.min) * (width as u64 - 1) / span) as usize
    };
    let lo = position(range.min);
    let hi = position(range.max);
    (0..width)
        .map(|idx| {
            if idx == lo || idx == hi {
                '●'
            } else if idx > lo && idx < hi {
                '━'
            } else {
                '─'
            }
        })
        .collect()
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
