//! ratatui-based UI.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context as _;
use booklog_application::{AppContext, BookCard, BookForm, FormField, LibraryView};
use booklog_core::Theme;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
};
use unicode_width::UnicodeWidthStr;

const REQUIRED_FIELDS_ERROR: &str = "Title and author are required";
const CARD_ACTION_COUNT: usize = 2;

pub struct Ui {
    ctx: AppContext,
    dialog: BookDialog,
    action_focus: usize,
}

impl Ui {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            dialog: BookDialog::default(),
            action_focus: 0,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;
        terminal.clear().ok();
        tracing::info!(books = self.ctx.library().len(), "ui started");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);
        tracing::info!("ui stopped");

        match (result, restore_result) {
            (Ok(Ok(())), Ok(())) => Ok(()),
            (Ok(Ok(())), Err(err)) => Err(err),
            (Ok(Err(err)), _) => Err(err),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn accent_color(&self) -> Color {
        match self.ctx.settings.theme {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Yellow,
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(250);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame.area(), frame))?;
                needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }

                    needs_redraw = true;
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.dialog.open {
            self.handle_dialog_key(key);
            false
        } else {
            self.handle_main_key(key)
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char('n') => self.open_dialog(),
            KeyCode::Down | KeyCode::Char('j') => self.ctx.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.ctx.select_prev(),
            KeyCode::Left => {
                self.action_focus = self.action_focus.saturating_sub(1);
            }
            KeyCode::Right => {
                self.action_focus = (self.action_focus + 1).min(CARD_ACTION_COUNT - 1);
            }
            KeyCode::Enter => self.activate_action(self.action_focus),
            KeyCode::Char('t') | KeyCode::Char(' ') => self.activate_action(0),
            KeyCode::Char('x') | KeyCode::Delete => self.activate_action(1),
            _ => {}
        }
        false
    }

    fn activate_action(&mut self, index: usize) {
        let Some(command) = self
            .ctx
            .selected_card()
            .and_then(|card| card.actions.get(index))
            .map(|action| action.command.clone())
        else {
            return;
        };
        self.ctx.dispatch(command);
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char('u') = key.code
        {
            self.dialog.form.clear_field();
            return;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }

        match key.code {
            KeyCode::Esc => self.cancel_dialog(),
            KeyCode::Enter => self.submit_dialog(),
            KeyCode::Tab | KeyCode::Down => self.dialog.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.dialog.form.focus_prev(),
            KeyCode::Backspace => self.dialog.form.backspace(),
            KeyCode::Char(ch) => self.dialog.form.input_char(ch),
            _ => {}
        }
    }

    fn open_dialog(&mut self) {
        self.dialog.form.reset();
        self.dialog.error = None;
        self.dialog.open = true;
    }

    fn cancel_dialog(&mut self) {
        self.dialog.form.reset();
        self.dialog.error = None;
        self.dialog.open = false;
    }

    fn submit_dialog(&mut self) {
        let Some(book) = self.dialog.form.submission() else {
            tracing::debug!("new book rejected, blank title or author");
            self.dialog.error = Some(REQUIRED_FIELDS_ERROR.to_string());
            return;
        };
        if self.ctx.add(book).is_some() {
            self.ctx.selected = self.ctx.view().cards().len().saturating_sub(1);
        }
        self.cancel_dialog();
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let library = self.ctx.library();
        vec![
            Line::from(vec![
                Span::styled("Booklog", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" — library"),
            ]),
            Line::raw(format!(
                "{} books, {} read",
                library.len(),
                library.read_count()
            )),
        ]
    }

    fn footer_lines(&self) -> Vec<Line<'static>> {
        let key = |label: &'static str| {
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
        };

        if self.dialog.open {
            return vec![Line::from(vec![
                key("Esc"),
                Span::raw(" cancel  "),
                key("Enter"),
                Span::raw(" add book"),
            ])];
        }

        vec![
            Line::from(vec![
                key("Esc"),
                Span::raw(" quit  "),
                key("↑/↓"),
                Span::raw(" move  "),
                key("←/→"),
                Span::raw(" action  "),
                key("Enter"),
                Span::raw(" activate"),
            ]),
            Line::from(vec![
                key("n"),
                Span::raw(" new book  "),
                key("t"),
                Span::raw(" toggle read  "),
                key("x"),
                Span::raw(" remove"),
            ]),
        ]
    }

    fn draw(&self, area: Rect, frame: &mut ratatui::Frame) {
        frame.render_widget(Clear, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(Text::from(self.header_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, layout[0]);

        self.draw_library(frame, layout[1]);

        let footer = Paragraph::new(Text::from(self.footer_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, layout[2]);

        if self.dialog.open {
            self.draw_dialog(area, frame);
        }
    }

    fn draw_library(&self, frame: &mut ratatui::Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Library");

        let cards = match self.ctx.view() {
            LibraryView::Empty { message } => {
                let paragraph = Paragraph::new(Line::raw(message.clone()))
                    .block(block)
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, area);
                return;
            }
            LibraryView::Cards(cards) => cards,
        };

        let max_width = area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = cards
            .iter()
            .enumerate()
            .map(|(idx, card)| self.card_item(card, idx == self.ctx.selected, max_width))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default();
        state.select(Some(self.ctx.selected.min(cards.len().saturating_sub(1))));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn card_item(&self, card: &BookCard, selected: bool, max_width: usize) -> ListItem<'static> {
        let title_style = if selected {
            Style::default()
                .fg(self.accent_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let mut lines: Vec<Line<'static>> = wrap_text(&card.title, max_width.max(8))
            .into_iter()
            .map(|line| Line::styled(line, title_style))
            .collect();
        lines.push(Line::raw(card.author_line.clone()));
        lines.push(Line::raw(card.pages_line.clone()));

        let read_style = if card.read {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::styled(card.read_line.clone(), read_style));

        let mut chips = Vec::new();
        for (idx, action) in card.actions.iter().enumerate() {
            if idx > 0 {
                chips.push(Span::raw("  "));
            }
            chips.push(action_chip(
                &action.label,
                selected && idx == self.action_focus,
                self.accent_color(),
            ));
        }
        lines.push(Line::from(chips));
        lines.push(Line::raw(""));

        ListItem::new(Text::from(lines))
    }

    fn draw_dialog(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            "New Book",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(inner);

        let form = &self.dialog.form;
        let items: Vec<ListItem> = FormField::ALL
            .iter()
            .map(|field| {
                let mut value = form.value(*field);
                if *field == form.focus && *field != FormField::Read {
                    value.push('_');
                }
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{}: ", field.label()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(value),
                ]))
            })
            .collect();

        let highlight_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);

        let list = List::new(items)
            .highlight_style(highlight_style)
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default();
        state.select(FormField::ALL.iter().position(|f| *f == form.focus));
        frame.render_stateful_widget(list, sections[0], &mut state);

        let mut help_lines = vec![Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" next field  "),
            Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" toggle read  "),
            Span::styled("Ctrl+U", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" clear"),
        ])];

        if let Some(err) = &self.dialog.error {
            help_lines.push(Line::raw(""));
            help_lines.push(Line::styled(
                err.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        let help = Paragraph::new(Text::from(help_lines))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(help, sections[1]);
    }
}

#[derive(Debug, Clone, Default)]
struct BookDialog {
    open: bool,
    form: BookForm,
    error: Option<String>,
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leave alt screen")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn action_chip(label: &str, focused: bool, accent: Color) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(format!("[ {label} ]"), style)
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        let sep_width = if current.is_empty() { 0 } else { 1 };

        if current_width + sep_width + word_width <= max_width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        // Hard-split words wider than a line.
        let mut chunk = String::new();
        let mut chunk_width = 0usize;
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let w = UnicodeWidthStr::width(&*ch.encode_utf8(&mut buf));
            if chunk_width + w > max_width && !chunk.is_empty() {
                lines.push(std::mem::take(&mut chunk));
                chunk_width = 0;
            }
            chunk.push(ch);
            chunk_width += w;
        }
        if !chunk.is_empty() {
            lines.push(chunk);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}
