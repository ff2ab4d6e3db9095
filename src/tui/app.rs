use crate::api::{self, Filter};
use crate::error::Result;
use crate::fetch::{ClientKind, Fetched, HttpFetcher, Target};
use crate::session::Session;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use std::io::{self, stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use super::ui;

/// TUI application state.
///
/// Fetch cycles run as tasks on the tokio runtime; their completions
/// come back over the reply channel and are folded into the session on
/// the UI thread. The busy flag guarantees at most one outstanding
/// reply at a time.
pub struct App {
    session: Session,
    fetcher: Arc<HttpFetcher>,
    handle: tokio::runtime::Handle,
    reply_tx: Sender<Result<Fetched>>,
    reply_rx: Receiver<Result<Fetched>>,
    running: bool,
    pending_refetch: bool,
    focus: ClientKind,
    reqwest_scroll: usize,
    ureq_scroll: usize,
    last_draw: Instant,
}

impl App {
    pub fn new(fetcher: HttpFetcher, handle: tokio::runtime::Handle, filter: Filter) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel();
        App {
            session: Session::new(filter),
            fetcher: Arc::new(fetcher),
            handle,
            reply_tx,
            reply_rx,
            running: true,
            // The first loop pass consumes this as the startup fetch.
            pending_refetch: true,
            focus: ClientKind::Reqwest,
            reqwest_scroll: 0,
            ureq_scroll: 0,
            last_draw: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while self.running {
            let mut needs_redraw = false;

            // Fold completed fetch cycles into the session
            while let Ok(reply) = self.reply_rx.try_recv() {
                self.session.apply(reply);
                needs_redraw = true;
            }

            // A filter edit from the last pass enqueued a joint refetch.
            if self.take_pending_refetch() {
                needs_redraw = true;
            }

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code, key.modifiers);
                needs_redraw = true;
            }

            if needs_redraw || self.last_draw.elapsed() >= Duration::from_millis(200) {
                terminal.draw(|frame| {
                    ui::render(frame, self);
                })?;
                self.last_draw = Instant::now();
            }
        }

        Ok(())
    }

    /// Consume the queued reactive trigger, if any. The trigger still
    /// goes through the busy gate in [`Self::trigger_fetch`], so one
    /// consumed while a cycle is in flight is dropped, not queued.
    fn take_pending_refetch(&mut self) -> bool {
        if !self.pending_refetch {
            return false;
        }
        self.pending_refetch = false;
        self.trigger_fetch(Target::Both);
        true
    }

    /// Entry point for every fetch trigger. Silently a no-op while a
    /// cycle is in flight.
    fn trigger_fetch(&mut self, target: Target) {
        if !self.session.begin() {
            return;
        }

        let fetcher = Arc::clone(&self.fetcher);
        let filter = self.session.filter().clone();
        let tx = self.reply_tx.clone();
        self.handle.spawn(async move {
            let reply = fetcher.run(target, &filter).await;
            let _ = tx.send(reply);
        });
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match key {
            // Global controls
            KeyCode::Char('c') if ctrl => self.running = false,
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,

            // === FETCH TRIGGERS ===
            KeyCode::Char('r') => self.trigger_fetch(Target::Reqwest),
            KeyCode::Char('u') => self.trigger_fetch(Target::Ureq),
            KeyCode::Char('b') | KeyCode::Enter => self.trigger_fetch(Target::Both),

            // === FILTER FORM ===
            // g - cycle gender; a real change schedules a joint refetch
            KeyCode::Char('g') => {
                let next = self.session.filter().gender.cycled();
                if self.session.set_gender(next) {
                    self.pending_refetch = true;
                }
            }
            // c/C - step through the supported countries
            KeyCode::Char('c') => self.step_country(1),
            KeyCode::Char('C') => self.step_country(-1),

            // === PANE CONTROLS ===
            KeyCode::Tab => {
                self.focus = match self.focus {
                    ClientKind::Reqwest => ClientKind::Ureq,
                    ClientKind::Ureq => ClientKind::Reqwest,
                };
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_focused(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_focused(-1),

            _ => {}
        }
    }

    fn step_country(&mut self, dir: i32) {
        let current = self.session.filter().country.clone();
        let code = if dir >= 0 {
            api::next_country(&current)
        } else {
            api::prev_country(&current)
        };
        if self.session.set_country(code) {
            self.pending_refetch = true;
        }
    }

    fn scroll_focused(&mut self, delta: i32) {
        let len = self
            .session
            .outcome(self.focus)
            .map(|o| o.profiles.len())
            .unwrap_or(0);
        let max = len.saturating_sub(1);

        let scroll = match self.focus {
            ClientKind::Reqwest => &mut self.reqwest_scroll,
            ClientKind::Ureq => &mut self.ureq_scroll,
        };
        *scroll = if delta >= 0 {
            scroll.saturating_add(delta as usize).min(max)
        } else {
            scroll.saturating_sub((-delta) as usize)
        };
    }

    // Getters for UI
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn focus(&self) -> ClientKind {
        self.focus
    }

    pub fn scroll(&self, kind: ClientKind) -> usize {
        match kind {
            ClientKind::Reqwest => self.reqwest_scroll,
            ClientKind::Ureq => self.ureq_scroll,
        }
    }
}
