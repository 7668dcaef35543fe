//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation (form / result)
//! - Input event handling
//! - Background submission and startup health probe
//! - The one-in-flight-submission guard

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{ApiError, HttpPredictionApi};
use crate::application::SubmissionService;
use crate::ports::PredictionApi;

use super::ui::{
    form::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};
use super::worker::{
    HealthProbe, HealthProbeHandle, HealthReport, SubmitProgress, SubmitWorker, SubmitWorkerHandle,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
}

/// Main application state
pub struct App<A>
where
    A: PredictionApi,
{
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Submission service
    service: Arc<SubmissionService<A>>,

    /// Patient form state
    form_state: PatientFormState,

    /// Result screen state
    result_state: ResultState,

    /// Persistent warning from the startup health probe
    health_warning: Option<String>,

    /// Explicit one-in-flight-submission guard. Set before the worker
    /// spawns, cleared on every worker outcome.
    in_flight: bool,

    /// Pending submission worker (if running)
    pending_submit: Option<SubmitWorkerHandle>,

    /// Pending startup health probe (if still running)
    pending_health: Option<HealthProbeHandle>,

    /// When the current submission started (for UI animation)
    submit_started_at: Option<Instant>,
}

impl App<HttpPredictionApi> {
    /// Create the application against the configured prediction API.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let api = HttpPredictionApi::from_env()?;
        tracing::info!(base_url = api.base_url(), "Using prediction API");
        Ok(Self::with_service(Arc::new(SubmissionService::new(
            Arc::new(api),
        ))))
    }
}

impl<A> App<A>
where
    A: PredictionApi + 'static,
    A::Error: Into<ApiError>,
{
    /// Create the application with an injected service (for tests and
    /// alternative adapters).
    pub fn with_service(service: Arc<SubmissionService<A>>) -> Self {
        Self {
            screen: Screen::Form,
            should_quit: false,
            service,
            form_state: PatientFormState::default(),
            result_state: ResultState::default(),
            health_warning: None,
            in_flight: false,
            pending_submit: None,
            pending_health: None,
            submit_started_at: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // One-shot health probe; the UI never blocks on it.
        self.pending_health = Some(HealthProbe::spawn(self.service.clone()));

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_submit_worker();
            self.poll_health_probe();
            self.tick_submit_progress();

            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                match self.screen {
                    Screen::Form => render_patient_form(
                        f,
                        chunks[0],
                        &self.form_state,
                        self.health_warning.as_deref(),
                    ),
                    Screen::Result => render_result(f, chunks[0], &self.result_state),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            // Handle input (short poll to keep animations running)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background submission worker for its outcome.
    ///
    /// The worker sends exactly one terminal message; both arms clear the
    /// in-flight guard, so the loading state cannot outlive the attempt.
    fn poll_submit_worker(&mut self) {
        let Some(progress) = self
            .pending_submit
            .as_ref()
            .and_then(|worker| worker.try_recv())
        else {
            return;
        };

        match progress {
            SubmitProgress::Complete(prediction) => {
                self.result_state = ResultState::complete(prediction);
            }
            SubmitProgress::Failed(message) => {
                self.result_state = ResultState::Error { message };
            }
        }
        self.pending_submit = None;
        self.in_flight = false;
        self.submit_started_at = None;
    }

    fn poll_health_probe(&mut self) {
        let Some(report) = self
            .pending_health
            .as_ref()
            .and_then(|probe| probe.try_recv())
        else {
            return;
        };

        if let HealthReport::Warning(message) = report {
            self.health_warning = Some(message);
        }
        self.pending_health = None;
    }

    /// Advance the cosmetic submission progress bar.
    fn tick_submit_progress(&mut self) {
        if !self.in_flight {
            return;
        }
        let Some(started_at) = self.submit_started_at else {
            return;
        };
        let ResultState::Submitting { progress } = &self.result_state else {
            return;
        };
        let progress = *progress;

        // Smooth, monotonic fake progress: asymptotically approaches 0.95
        // while the request is in flight.
        let elapsed = started_at.elapsed().as_secs_f64();
        let desired = 0.05 + 0.90 * (1.0 - (-elapsed / 2.0).exp());
        self.result_state = ResultState::Submitting {
            progress: desired.max(progress).min(0.95),
        };
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.activate_back();
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                self.form_state.activate();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match &self.result_state {
            ResultState::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Form;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.form_state = PatientFormState::default();
                    self.result_state = ResultState::Idle;
                    self.screen = Screen::Form;
                }
                _ => {}
            },
            ResultState::Error { .. } => match key {
                KeyCode::Enter => {
                    self.screen = Screen::Form;
                }
                KeyCode::Esc => {
                    self.should_quit = true;
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// One submission cycle: clear stale messages, collect, validate,
    /// then hand off to the background worker.
    fn submit_form(&mut self) {
        if self.in_flight {
            return;
        }

        // Suppress any previously displayed error or result first.
        self.form_state.error_message = None;

        let input = self.form_state.to_patient_input();
        if let Err(e) = input.validate() {
            // Invalid input never reaches the network; stay on the form.
            self.form_state.error_message = Some(e.message().to_string());
            return;
        }

        self.in_flight = true;
        self.screen = Screen::Result;
        self.result_state = ResultState::Submitting { progress: 0.0 };
        self.submit_started_at = Some(Instant::now());
        self.pending_submit = Some(SubmitWorker::spawn(self.service.clone(), input));

        // Wipe patient data from the UI immediately.
        self.form_state.clear_sensitive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionRequired, PatientInput, Prediction};
    use crate::ports::HealthStatus;
    use std::thread;

    struct StubApi {
        outcome: Result<Prediction, String>,
    }

    impl PredictionApi for StubApi {
        type Error = ApiError;

        fn predict(&self, _input: &PatientInput) -> Result<Prediction, ApiError> {
            match &self.outcome {
                Ok(p) => Ok(p.clone()),
                Err(message) => Err(ApiError::Server {
                    status: 500,
                    message: message.clone(),
                }),
            }
        }

        fn health(&self) -> Result<HealthStatus, ApiError> {
            Ok(HealthStatus {
                status: "healthy".to_string(),
            })
        }
    }

    fn app_with(outcome: Result<Prediction, String>) -> App<StubApi> {
        App::with_service(Arc::new(SubmissionService::new(Arc::new(StubApi {
            outcome,
        }))))
    }

    fn prediction() -> Prediction {
        Prediction {
            risk_percentage: 72.3,
            risk_probability: 0.723,
            risk_message: "See specialist".to_string(),
            action_required: ActionRequired::Immediate,
            risk_level: None,
        }
    }

    fn settle(app: &mut App<StubApi>) {
        for _ in 0..100 {
            app.poll_submit_worker();
            if !app.in_flight {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("Submission never settled");
    }

    #[test]
    fn test_invalid_form_stays_on_form_screen() {
        let mut app = app_with(Ok(prediction()));

        // Empty form: first numeric field is NaN.
        app.submit_form();

        assert_eq!(app.screen, Screen::Form);
        assert!(!app.in_flight);
        assert_eq!(
            app.form_state.error_message.as_deref(),
            Some("Age must be a valid number")
        );
    }

    #[test]
    fn test_valid_submission_completes_and_clears_guard() {
        let mut app = app_with(Ok(prediction()));
        app.form_state.load_sample_data();

        app.submit_form();
        assert!(app.in_flight);
        assert_eq!(app.screen, Screen::Result);

        settle(&mut app);
        assert!(matches!(app.result_state, ResultState::Complete { .. }));
        assert!(app.pending_submit.is_none());
    }

    #[test]
    fn test_network_failure_shows_one_error_and_reenables() {
        let mut app = app_with(Err("Error interno del servidor".to_string()));
        app.form_state.load_sample_data();

        app.submit_form();
        settle(&mut app);

        match &app.result_state {
            ResultState::Error { message } => {
                assert_eq!(message, "Error interno del servidor");
            }
            other => panic!("Expected error state, got {other:?}"),
        }
        // Guard cleared: submitting is possible again.
        assert!(!app.in_flight);
        app.form_state.load_sample_data();
        app.submit_form();
        assert!(app.in_flight);
    }

    #[test]
    fn test_in_flight_guard_blocks_second_submission() {
        let mut app = app_with(Ok(prediction()));
        app.form_state.load_sample_data();
        app.submit_form();
        assert!(app.in_flight);

        // A second Enter while in flight is a no-op.
        app.form_state.load_sample_data();
        app.submit_form();
        assert_eq!(app.screen, Screen::Result);
        assert!(app.in_flight);

        settle(&mut app);
    }

    #[test]
    fn test_form_wiped_after_submission_starts() {
        let mut app = app_with(Ok(prediction()));
        app.form_state.load_sample_data();
        app.submit_form();

        let collected = app.form_state.to_patient_input();
        assert!(collected.age.is_nan());
        assert_eq!(collected.gender, "");

        settle(&mut app);
    }

    #[test]
    fn test_progress_is_monotonic_and_capped() {
        let mut app = app_with(Ok(prediction()));
        app.in_flight = true;
        app.submit_started_at = Some(Instant::now() - Duration::from_secs(30));
        app.result_state = ResultState::Submitting { progress: 0.1 };

        app.tick_submit_progress();
        let ResultState::Submitting { progress } = app.result_state.clone() else {
            panic!("Expected submitting state");
        };
        assert!(progress > 0.1);
        assert!(progress <= 0.95);
    }
}
