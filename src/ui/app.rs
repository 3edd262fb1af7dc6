//! Main application state and UI loop
//!
//! Contains the App struct, key handling and the loop that applies updates

use crate::consts::cli_consts::{INPUT_POLL_INTERVAL, SPLASH_DURATION};
use crate::controller::{Controller, Modal};
use crate::events::Update;
use crate::export::ExportTarget;
use crate::navigation::{NavControl, Section};
use crate::registry::SelectorId;
use crate::ui::dashboard::render_dashboard;
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::Instant;
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The administration console.
    Dashboard,
}

/// Whether the loop keeps running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Console state, mutated only by this loop.
    controller: Controller,

    /// Receives the results of background requests.
    update_receiver: mpsc::Receiver<Update>,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        controller: Controller,
        update_receiver: mpsc::Receiver<Update>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            controller,
            update_receiver,
            ui_config,
        }
    }

    fn enter_dashboard(&mut self) {
        self.current_screen = Screen::Dashboard;
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    app.controller.start();

    loop {
        // Apply every finished request before drawing
        while let Ok(update) = app.update_receiver.try_recv() {
            app.controller.apply(update);
        }
        app.controller.tick(Instant::now());

        terminal.draw(|f| render(f, &app))?;

        if app.current_screen == Screen::Splash && splash_start.elapsed() >= SPLASH_DURATION {
            app.enter_dashboard();
            continue;
        }

        // crossterm polling blocks, so let spawned requests make progress first
        tokio::task::yield_now().await;
        if event::poll(INPUT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                match app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            return Ok(());
                        }
                        app.enter_dashboard();
                    }
                    Screen::Dashboard => {
                        if handle_key(&mut app.controller, key) == KeyOutcome::Quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

/// Dispatch a key press on the dashboard.
pub fn handle_key(controller: &mut Controller, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    if controller.is_editing() {
        handle_text_key(controller, key.code);
        return KeyOutcome::Continue;
    }

    if let Some(Modal::ConfirmDelete { .. }) = controller.modal {
        match key.code {
            KeyCode::Char('o' | 'O' | 'y' | 'Y') | KeyCode::Enter => controller.confirm_delete(),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => controller.cancel_modal(),
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    let section = controller.navigation.visible();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Tab => {
            let next = section.next();
            controller.show_section(next, NavControl::for_section(next));
        }
        KeyCode::BackTab => {
            let previous = section.previous();
            controller.show_section(previous, NavControl::for_section(previous));
        }
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            controller.show_section(Section::ALL[index], NavControl(index));
        }
        KeyCode::Char('x') => {
            controller.dismiss_latest_notification();
        }
        KeyCode::Char('r') => controller.reload(),
        KeyCode::Char(']') => {
            if let Some(id) = controller.active_selector() {
                controller.cycle_selector(id, true);
            }
        }
        KeyCode::Char('[') => {
            if let Some(id) = controller.active_selector() {
                controller.cycle_selector(id, false);
            }
        }
        _ => handle_section_key(controller, section, key.code),
    }
    KeyOutcome::Continue
}

/// Keys typed into whichever text input has the focus.
fn handle_text_key(controller: &mut Controller, code: KeyCode) {
    if let Some(Modal::AddHotel(form)) = controller.modal.as_mut() {
        match code {
            KeyCode::Esc => controller.cancel_modal(),
            KeyCode::Enter => controller.submit_hotel_form(),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Backspace => form.focused_mut().pop(),
            KeyCode::Char(c) => form.focused_mut().push(c),
            _ => {}
        }
        return;
    }

    if controller.views.automation.editing {
        let field = &mut controller.views.automation.form.tally_url;
        match code {
            KeyCode::Esc => controller.views.automation.editing = false,
            KeyCode::Enter => controller.configure_automation(),
            KeyCode::Backspace => field.pop(),
            KeyCode::Char(c) => field.push(c),
            _ => {}
        }
        return;
    }

    let responses = &mut controller.views.responses;
    match code {
        KeyCode::Esc => responses.jump_input = None,
        KeyCode::Enter => {
            if let Some(number) = responses.take_jump() {
                controller.jump_to_page(number);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = responses.jump_input.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) => responses.push_jump_digit(c),
        _ => {}
    }
}

fn handle_section_key(controller: &mut Controller, section: Section, code: KeyCode) {
    match (section, code) {
        (Section::Hotels, KeyCode::Char('a')) => controller.open_hotel_form(),
        (Section::Hotels, KeyCode::Char('d') | KeyCode::Delete) => controller.request_delete(),
        (Section::Hotels, KeyCode::Down | KeyCode::Char('j')) => {
            controller.views.hotels.select_next()
        }
        (Section::Hotels, KeyCode::Up | KeyCode::Char('k')) => {
            controller.views.hotels.select_previous()
        }
        (Section::Responses, KeyCode::Right) => controller.step_responses(1),
        (Section::Responses, KeyCode::Left) => controller.step_responses(-1),
        (Section::Responses, KeyCode::Char('g')) => {
            if !controller.views.responses.links().is_empty() {
                controller.views.responses.start_jump();
            }
        }
        (Section::Reports, KeyCode::Char('e')) => controller.export_selected(),
        (Section::Reports, KeyCode::Char('g')) => controller.export(ExportTarget::Global),
        (Section::Automation, KeyCode::Char('e')) => controller.views.automation.editing = true,
        (Section::Automation, KeyCode::Enter) => controller.configure_automation(),
        (Section::Automation, KeyCode::Char('t')) => controller.test_webhook(),
        (Section::Automation, KeyCode::Char('}')) => {
            controller.cycle_selector(SelectorId::WebhookTest, true)
        }
        (Section::Automation, KeyCode::Char('{')) => {
            controller.cycle_selector(SelectorId::WebhookTest, false)
        }
        _ => {}
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => {
            render_dashboard(f, &app.controller, app.ui_config.with_background_color)
        }
    }
}
