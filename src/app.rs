use crate::collectors::storage::StorageInfoProvider;
use crate::config::Config;
use crate::engine::job::{self, Job, JobOutcome, JobResult};
use crate::engine::walk::TreeUsage;
use crate::engine::{FillerEngine, GenerationRequest};
use crate::input::{handle_key, Action};
use crate::models::disk::DiskSnapshot;
use crate::ui::theme::{Theme, ThemeVariant};
use crate::ui::{help, main_view, popup};
use crate::util::human::fmt_bytes;
use crate::util::stepper;
use crate::util::user_state::UserState;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{error, info};

// ── Form rows ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    FileSize,
    FileCount,
}

impl Field {
    fn toggle(self) -> Self {
        match self {
            Field::FileSize  => Field::FileCount,
            Field::FileCount => Field::FileSize,
        }
    }
}

// ── Background job state ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum OpState {
    Idle,
    Running(String),  // label of the job in flight
    Failed(String),   // error text, shown until dismissed
}

const POLL_TIMEOUT: Duration = Duration::from_millis(150);
const FLASH_FOR:    Duration = Duration::from_secs(4);

// ── App ───────────────────────────────────────────────────────────────

pub struct App {
    pub config: Config,

    pub theme:         Theme,
    pub theme_variant: ThemeVariant,

    // Form
    pub prefs:    UserState,
    pub selected: Field,
    persist_prefs: bool,

    // Data
    engine:    FillerEngine,
    provider:  Box<dyn StorageInfoProvider>,
    pub disk:  DiskSnapshot,
    pub eaten: TreeUsage,

    // Refresh
    refresh_tick: Duration,
    last_refresh: Instant,

    // Jobs
    pub op_state: OpState,
    job_tx:       mpsc::Sender<JobResult>,
    job_rx:       mpsc::Receiver<JobResult>,

    // Overlays
    pub confirm_delete_all: bool,
    pub show_help:          bool,
    pub flash:              Option<(Instant, String)>,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        config:   Config,
        engine:   FillerEngine,
        provider: Box<dyn StorageInfoProvider>,
        prefs:    UserState,
        theme:    ThemeVariant,
    ) -> Self {
        let (job_tx, job_rx) = mpsc::channel();
        let refresh_tick = Duration::from_millis(config.general.refresh_interval_ms.max(250));
        let mut app = Self {
            config,
            theme:         Theme::for_variant(theme),
            theme_variant: theme,
            prefs,
            selected:      Field::FileSize,
            persist_prefs: true,
            engine,
            provider,
            disk:          DiskSnapshot::default(),
            eaten:         TreeUsage::default(),
            refresh_tick,
            last_refresh:  Instant::now(),
            op_state:      OpState::Idle,
            job_tx,
            job_rx,
            confirm_delete_all: false,
            show_help:          false,
            flash:              None,
            should_quit:        false,
        };
        app.refresh();
        app
    }

    /// Keep stepper changes in memory only.
    #[cfg(test)]
    fn without_persistence(mut self) -> Self {
        self.persist_prefs = false;
        self
    }

    pub fn working_dir(&self) -> &std::path::Path { self.engine.dir() }

    pub fn is_busy(&self) -> bool {
        matches!(self.op_state, OpState::Running(_))
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            self.consume_job_results();

            terminal.draw(|f| {
                main_view::render(f, self);
                match &self.op_state {
                    OpState::Idle        => {}
                    OpState::Running(l)  => popup::render_busy(f, l, &self.theme),
                    OpState::Failed(msg) => popup::render_error(f, msg, &self.theme),
                }
                if self.confirm_delete_all {
                    popup::render_confirm_delete_all(f, &self.theme);
                }
                if self.show_help {
                    help::render(f, &self.theme);
                }
            })?;

            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_action(handle_key(key));
                    }
                }
            }

            if self.should_quit { break; }

            if self.last_refresh.elapsed() >= self.refresh_tick {
                self.refresh();
            }
        }
        Ok(())
    }

    /// Re-read volume figures and the eaten total.
    pub fn refresh(&mut self) {
        self.disk  = self.provider.snapshot();
        self.eaten = self.engine.usage();
        self.last_refresh = Instant::now();
    }

    pub fn flash_text(&self) -> Option<&str> {
        match &self.flash {
            Some((at, text)) if at.elapsed() < FLASH_FOR => Some(text),
            _ => None,
        }
    }

    // ── Input dispatch ────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(action, Action::ShowHelp | Action::Back) { self.show_help = false; }
            return;
        }

        // Nothing but quit while a job is in flight.
        if self.is_busy() { return; }

        if let OpState::Failed(_) = self.op_state {
            if matches!(action, Action::Back | Action::Confirm) { self.op_state = OpState::Idle; }
            return;
        }

        if self.confirm_delete_all {
            match action {
                Action::Confirm => {
                    self.confirm_delete_all = false;
                    self.start_job(Job::RemoveAll);
                }
                Action::Back => self.confirm_delete_all = false,
                _ => {}
            }
            return;
        }

        match action {
            Action::ShowHelp => self.show_help = true,

            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
                self.prefs.theme_name = self.theme_variant.name().to_string();
                self.save_prefs();
            }

            Action::SelectUp | Action::SelectDown => self.selected = self.selected.toggle(),

            Action::StepUp   => self.step(true),
            Action::StepDown => self.step(false),

            Action::Generate => {
                match GenerationRequest::new(self.prefs.file_count, self.prefs.file_size_bytes) {
                    Ok(req) => self.start_job(Job::Generate(req)),
                    Err(e)  => self.op_state = OpState::Failed(e.to_string()),
                }
            }
            Action::DeleteOne => self.start_job(Job::RemoveCount(1)),
            Action::DeleteAll => self.confirm_delete_all = true,

            Action::Refresh => self.refresh(),

            Action::Confirm | Action::Back | Action::None | Action::Quit => {}
        }
    }

    fn step(&mut self, up: bool) {
        match (self.selected, up) {
            (Field::FileSize, true)   => self.prefs.file_size_bytes = stepper::increment_size(self.prefs.file_size_bytes),
            (Field::FileSize, false)  => self.prefs.file_size_bytes = stepper::decrement_size(self.prefs.file_size_bytes),
            (Field::FileCount, true)  => self.prefs.file_count = stepper::increment_count(self.prefs.file_count),
            (Field::FileCount, false) => self.prefs.file_count = stepper::decrement_count(self.prefs.file_count),
        }
        self.save_prefs();
    }

    fn save_prefs(&self) {
        if self.persist_prefs { self.prefs.save(); }
    }

    // ── Jobs ──────────────────────────────────────────────────────────

    fn start_job(&mut self, job: Job) {
        if self.is_busy() { return; }
        info!(job = ?job, "starting job");
        self.op_state = OpState::Running(job.label());
        job::spawn(self.engine.clone(), job, self.job_tx.clone());
    }

    /// Apply finished jobs. Returns true when at least one arrived.
    pub fn consume_job_results(&mut self) -> bool {
        let mut any = false;
        while let Ok((job, result)) = self.job_rx.try_recv() {
            any = true;
            self.op_state = match result {
                Ok(JobOutcome::Generated(r)) => {
                    self.flash = Some((Instant::now(), format!(
                        "Generated {} file{} of {}",
                        r.files.len(), if r.files.len() == 1 { "" } else { "s" },
                        fmt_bytes(r.bytes_per_file),
                    )));
                    OpState::Idle
                }
                Ok(JobOutcome::Removed(r)) => {
                    self.flash = Some((Instant::now(), match r.count() {
                        0 => "Nothing to delete".to_string(),
                        1 => "Deleted 1 entry".to_string(),
                        n => format!("Deleted {} entries", n),
                    }));
                    OpState::Idle
                }
                Err(e) => {
                    error!(job = ?job, op = ?e.operation(), path = ?e.path(), index = ?e.index(), error = %e, "job failed");
                    OpState::Failed(e.to_string())
                }
            };
        }
        if any { self.refresh(); }
        any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FakeVolume;

    impl StorageInfoProvider for FakeVolume {
        fn total_bytes(&self) -> u64 { 1_000_000 }
        fn available_bytes(&self) -> u64 { 250_000 }
        fn available_for_important_usage(&self) -> u64 { 250_000 }
        fn available_for_opportunistic_usage(&self) -> u64 { 200_000 }
    }

    fn app_in(temp: &tempfile::TempDir, count: usize, size: f64) -> App {
        let prefs = UserState { file_count: count, file_size_bytes: size, theme_name: String::new() };
        App::new(
            Config::default(),
            FillerEngine::new(temp.path().join("filler")),
            Box::new(FakeVolume),
            prefs,
            ThemeVariant::Default,
        ).without_persistence()
    }

    fn wait_for_job(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !app.consume_job_results() {
            assert!(Instant::now() < deadline, "job did not finish");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn new_app_reads_disk_figures() {
        let temp = tempfile::tempdir().expect("tempdir");
        let app = app_in(&temp, 1, 10.0);
        assert_eq!(app.disk.used_bytes, 750_000);
        assert_eq!(app.eaten.bytes, 0);
    }

    #[test]
    fn arrows_step_the_selected_row() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&temp, 1, stepper::DEFAULT_FILE_SIZE);

        app.handle_action(Action::StepUp);
        assert_eq!(app.prefs.file_size_bytes, 200_000_000.0);

        app.handle_action(Action::SelectDown);
        assert_eq!(app.selected, Field::FileCount);
        app.handle_action(Action::StepUp);
        app.handle_action(Action::StepUp);
        assert_eq!(app.prefs.file_count, 3);
        app.handle_action(Action::StepDown);
        assert_eq!(app.prefs.file_count, 2);
    }

    #[test]
    fn generate_then_delete_one() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&temp, 3, 105.0);

        app.handle_action(Action::Generate);
        assert!(app.is_busy());
        wait_for_job(&mut app);
        assert_eq!(app.op_state, OpState::Idle);
        assert_eq!(app.eaten.bytes, 300);
        assert_eq!(app.flash_text(), Some("Generated 3 files of 100 B"));

        app.handle_action(Action::DeleteOne);
        wait_for_job(&mut app);
        assert_eq!(app.eaten.bytes, 200);
    }

    #[test]
    fn delete_all_needs_confirmation() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&temp, 2, 50.0);
        app.handle_action(Action::Generate);
        wait_for_job(&mut app);

        app.handle_action(Action::DeleteAll);
        assert!(app.confirm_delete_all);
        app.handle_action(Action::Back);
        assert!(!app.confirm_delete_all);
        assert!(!app.is_busy());

        app.handle_action(Action::DeleteAll);
        app.handle_action(Action::Confirm);
        wait_for_job(&mut app);
        assert_eq!(app.eaten.bytes, 0);
        assert_eq!(app.flash_text(), Some("Deleted 2 entries"));
    }

    #[test]
    fn invalid_request_shows_error_until_dismissed() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&temp, 1, -1.0);
        app.handle_action(Action::Generate);
        assert!(matches!(app.op_state, OpState::Failed(_)));

        app.handle_action(Action::StepUp);
        assert_eq!(app.prefs.file_size_bytes, -1.0);

        app.handle_action(Action::Back);
        assert_eq!(app.op_state, OpState::Idle);
    }

    #[test]
    fn help_swallows_other_keys() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&temp, 1, 10.0);
        app.handle_action(Action::ShowHelp);
        app.handle_action(Action::Generate);
        assert!(!app.is_busy());
        app.handle_action(Action::ShowHelp);
        assert!(!app.show_help);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
