use crate::tui::{
    inputs::{map_event, Action},
    views::{self, RightPane},
};
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use tokio::runtime::Runtime;
use wordbank_core::{
    Category, CategoryFilter, FlashcardSession, MarkOutcome, Repository,
};

pub struct TuiApp {
    pub repo: Arc<dyn Repository>,
    pub rt: Arc<Runtime>,
    categories: Vec<Category>,
    sel: usize,
    session: Option<FlashcardSession>,
}

impl TuiApp {
    pub fn new(repo: Arc<dyn Repository>, rt: Arc<Runtime>) -> Self {
        Self { repo, rt, categories: vec![], sel: 0, session: None }
    }

    fn load_categories(&mut self) {
        self.categories = self
            .rt
            .block_on(self.repo.list_categories(None))
            .unwrap_or_default();
        self.sel = self.sel.min(self.categories.len());
    }

    /// Left pane rows: the "All" sentinel plus every category.
    fn pane_items(&self) -> Vec<String> {
        let mut items = vec!["All".to_string()];
        items.extend(self.categories.iter().map(|c| c.name.clone()));
        items
    }

    fn start_session(&mut self) {
        let filter = if self.sel == 0 {
            CategoryFilter::All
        } else {
            CategoryFilter::Id(self.categories[self.sel - 1].id)
        };
        let vocabs = self.rt.block_on(self.repo.list_vocabs(None)).unwrap_or_default();
        self.session = Some(FlashcardSession::new(vocabs, filter));
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.load_categories();

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            let items = self.pane_items();
            terminal.draw(|f| {
                let area = f.size();
                let right = match &self.session {
                    Some(s) => match s.current() {
                        Some(entry) => RightPane::Card {
                            entry,
                            face_up: s.face_up(),
                            position: (s.cursor() + 1, s.view().len()),
                            progress: s.progress(),
                        },
                        None => RightPane::Empty("Everything here is learned."),
                    },
                    None => RightPane::Idle,
                };
                views::draw_ui(f, area, &items, self.sel, right);
            })?;

            if event::poll(std::time::Duration::from_millis(100))? {
                let ev = event::read()?;
                match map_event(ev) {
                    Action::Quit => break,
                    Action::Back => {
                        self.session = None;
                    }
                    Action::Up => {
                        if self.session.is_none() {
                            self.sel = self.sel.saturating_sub(1);
                        }
                    }
                    Action::Down => {
                        if self.session.is_none() && self.sel + 1 < self.pane_items().len() {
                            self.sel += 1;
                        }
                    }
                    Action::Enter => {
                        if self.session.is_none() {
                            self.start_session();
                        }
                    }
                    Action::Flip => {
                        if let Some(s) = self.session.as_mut() {
                            s.flip();
                        }
                    }
                    Action::Next => {
                        if let Some(s) = self.session.as_mut() {
                            s.next();
                        }
                    }
                    Action::Prev => {
                        if let Some(s) = self.session.as_mut() {
                            s.previous();
                        }
                    }
                    Action::MarkLearned => {
                        if let Some(s) = self.session.as_mut() {
                            if let Some(id) = s.current().map(|e| e.id) {
                                // persist first so a failed call leaves the card in place
                                if self.rt.block_on(self.repo.set_learned(id)).is_ok() {
                                    if let MarkOutcome::Marked { complete: true, .. } =
                                        s.mark_learned()
                                    {
                                        self.session = None;
                                    }
                                }
                            }
                        }
                    }
                    Action::None => {}
                }
            }
        }
        Ok(())
    }
}
