// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod render;
mod screen;

pub use screen::{
    Screen, ScreenData, ScreenEffect, ScreenStatus, ScreenView, Screens, UiOptions,
};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use granja_app::{AppCommand, AppEvent, AppMode, AppState, ScreenKind};
use granja_table::{Gesture, PageToken};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    Loaded {
        screen: ScreenKind,
        token: u64,
        result: std::result::Result<ScreenData, String>,
    },
}

pub trait AppRuntime {
    fn load_screen(&mut self, screen: ScreenKind) -> Result<ScreenData>;

    /// Starts a load whose result arrives as [`InternalEvent::Loaded`]. The
    /// default loads inline and sends immediately.
    fn spawn_load(
        &mut self,
        screen: ScreenKind,
        token: u64,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self
            .load_screen(screen)
            .map_err(|error| format!("{error:#}"));
        tx.send(InternalEvent::Loaded {
            screen,
            token,
            result,
        })
        .map_err(|_| anyhow::anyhow!("load event channel closed"))?;
        Ok(())
    }
}

struct ViewData {
    screens: Screens,
    status_token: u64,
    load_token: u64,
}

impl ViewData {
    fn new(options: UiOptions) -> Self {
        Self {
            screens: Screens::new(options),
            status_token: 0,
            load_token: 0,
        }
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(options);
    let result = event_loop(&mut terminal, state, runtime, &mut view_data, || {
        next_key(Duration::from_millis(120))
    });

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Runs until quit or the first error. Terminal teardown belongs to the
/// caller, which must run it either way.
fn event_loop<B, R, K>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    mut next_key: K,
) -> Result<()>
where
    B: Backend,
    R: AppRuntime,
    K: FnMut() -> Result<Option<KeyEvent>>,
{
    let (internal_tx, internal_rx) = mpsc::channel();
    let start = state.active_screen;
    info!("starting on {} screen", start.label());
    ensure_loaded(state, runtime, view_data, &internal_tx, start);

    loop {
        process_internal_events(state, view_data, &internal_tx, &internal_rx);

        terminal
            .draw(|frame| render::render(frame, state, &view_data.screens))
            .context("draw frame")?;

        if let Some(key) = next_key()?
            && handle_key_event(state, runtime, view_data, &internal_tx, key)
        {
            return Ok(());
        }
    }
}

fn next_key(timeout: Duration) -> Result<Option<KeyEvent>> {
    if !event::poll(timeout).context("poll event")? {
        return Ok(None);
    }
    match event::read().context("read event")? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Loaded {
                screen,
                token,
                result,
            } => handle_loaded(state, view_data, tx, screen, token, result),
        }
    }
}

fn handle_loaded(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    screen: ScreenKind,
    token: u64,
    result: std::result::Result<ScreenData, String>,
) {
    match result {
        Ok(data) if data.kind() == screen => {
            if let Some(status) = view_data.screens.finish_loading(token, data) {
                if state.active_screen == screen {
                    emit_status(state, view_data, tx, status.message());
                }
            }
        }
        Ok(data) => {
            warn!(
                "{} load returned {} data",
                screen.label(),
                data.kind().label()
            );
            if view_data.screens.get_mut(screen).fail_loading(token) {
                let status = ScreenStatus::LoadFailed("unexpected data".to_owned());
                emit_status(state, view_data, tx, status.message());
            }
        }
        Err(error) => {
            warn!("{} load failed: {error}", screen.label());
            if view_data.screens.get_mut(screen).fail_loading(token) {
                emit_status(state, view_data, tx, ScreenStatus::LoadFailed(error).message());
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn start_load<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    screen: ScreenKind,
) {
    view_data.load_token = view_data.load_token.saturating_add(1);
    let token = view_data.load_token;
    view_data.screens.get_mut(screen).begin_loading(token);
    info!("loading {} (request {token})", screen.label());
    if let Err(error) = runtime.spawn_load(screen, token, internal_tx.clone()) {
        view_data.screens.get_mut(screen).fail_loading(token);
        let message = ScreenStatus::LoadFailed(format!("{error:#}")).message();
        emit_status(state, view_data, internal_tx, message);
    }
}

fn ensure_loaded<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    screen: ScreenKind,
) {
    if view_data.screens.get(screen).needs_load() {
        start_load(state, runtime, view_data, internal_tx, screen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenCommand {
    MoveRow(isize),
    MoveColumn(isize),
    ActivateHeader,
    ToggleRow,
    ToggleAll,
    PreviousPage,
    NextPage,
    PageSlot(usize),
    NextChip,
    ClearSearch,
    AddNew,
    OpenRow,
    HeaderAction(usize),
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.mode == AppMode::Search {
        handle_search_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => {
            switch_screen(state, runtime, view_data, internal_tx, AppCommand::NextScreen);
            return false;
        }
        KeyCode::BackTab => {
            switch_screen(state, runtime, view_data, internal_tx, AppCommand::PrevScreen);
            return false;
        }
        KeyCode::Char('/') => {
            state.dispatch(AppCommand::EnterSearch);
            return false;
        }
        _ => {}
    }

    let Some(command) = screen_command_for_key(key) else {
        return false;
    };
    apply_screen_command(state, runtime, view_data, internal_tx, command);
    false
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let gesture = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Enter, _) => {
            state.dispatch(AppCommand::ExitSearch);
            return;
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Gesture::SearchCleared
        }
        (KeyCode::Backspace, _) => Gesture::SearchBackspace,
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            Gesture::SearchTyped(ch)
        }
        _ => return,
    };
    apply_gesture(state, runtime, view_data, internal_tx, gesture);
}

fn switch_screen<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    for event in state.dispatch(command) {
        if let AppEvent::ScreenChanged(screen) = event {
            info!("screen changed to {}", screen.label());
            ensure_loaded(state, runtime, view_data, internal_tx, screen);
        }
    }
}

fn screen_command_for_key(key: KeyEvent) -> Option<ScreenCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(ScreenCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(ScreenCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(ScreenCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(ScreenCommand::MoveColumn(1)),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(ScreenCommand::ActivateHeader),
        (KeyCode::Char(' '), _) => Some(ScreenCommand::ToggleRow),
        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(ScreenCommand::ToggleAll),
        (KeyCode::Char('['), _) | (KeyCode::PageUp, _) => Some(ScreenCommand::PreviousPage),
        (KeyCode::Char(']'), _) | (KeyCode::PageDown, _) => Some(ScreenCommand::NextPage),
        (KeyCode::Char(digit @ '1'..='9'), _) => digit
            .to_digit(10)
            .map(|slot| ScreenCommand::PageSlot(slot as usize)),
        (KeyCode::Char('f'), KeyModifiers::NONE) => Some(ScreenCommand::NextChip),
        (KeyCode::Char('c'), KeyModifiers::NONE) => Some(ScreenCommand::ClearSearch),
        (KeyCode::Char('n'), KeyModifiers::NONE) => Some(ScreenCommand::AddNew),
        (KeyCode::Enter, _) => Some(ScreenCommand::OpenRow),
        (KeyCode::Char('x'), KeyModifiers::NONE) => Some(ScreenCommand::HeaderAction(0)),
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(ScreenCommand::HeaderAction(1)),
        _ => None,
    }
}

fn apply_screen_command<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: ScreenCommand,
) {
    let screen = view_data.screens.get_mut(state.active_screen);
    let (row, column) = screen.cursor();
    let gesture = match command {
        ScreenCommand::MoveRow(delta) => {
            screen.move_row(delta);
            return;
        }
        ScreenCommand::MoveColumn(delta) => {
            screen.move_column(delta);
            return;
        }
        ScreenCommand::ActivateHeader => Gesture::HeaderActivated(column),
        ScreenCommand::ToggleRow => Gesture::RowToggled(row),
        ScreenCommand::ToggleAll => Gesture::AllToggled,
        ScreenCommand::PreviousPage => Gesture::PreviousPage,
        ScreenCommand::NextPage => Gesture::NextPage,
        ScreenCommand::PageSlot(slot) => {
            let token = screen
                .view()
                .pagination
                .and_then(|pagination| pagination.tokens.get(slot - 1).copied())
                .unwrap_or(PageToken::Ellipsis);
            Gesture::PageToken(token)
        }
        ScreenCommand::NextChip => {
            let view = screen.view();
            let chips = view.filters.unwrap_or_default();
            let active = chips.iter().position(|chip| chip.active).unwrap_or(0);
            if chips.is_empty() {
                return;
            }
            Gesture::FilterClicked((active + 1) % chips.len())
        }
        ScreenCommand::ClearSearch => Gesture::ClearSearchClicked,
        ScreenCommand::AddNew => Gesture::AddNewClicked,
        ScreenCommand::OpenRow => Gesture::RowClicked(row),
        ScreenCommand::HeaderAction(index) => Gesture::HeaderActionClicked(index),
    };
    apply_gesture(state, runtime, view_data, internal_tx, gesture);
}

fn apply_gesture<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    gesture: Gesture,
) {
    let label = gesture_label(&gesture);
    let active = state.active_screen;
    let Some(effects) = view_data.screens.get_mut(active).gesture(gesture) else {
        emit_status(
            state,
            view_data,
            internal_tx,
            ScreenStatus::Unavailable(label).message(),
        );
        return;
    };

    for effect in effects {
        match effect {
            ScreenEffect::Status(status) => {
                emit_status(state, view_data, internal_tx, status.message());
            }
            ScreenEffect::Reload => start_load(state, runtime, view_data, internal_tx, active),
            ScreenEffect::RemoveSelected => {}
        }
    }
}

fn gesture_label(gesture: &Gesture) -> &'static str {
    match gesture {
        Gesture::HeaderActivated(_) => "sort",
        Gesture::PreviousPage => "previous page",
        Gesture::NextPage => "next page",
        Gesture::PageToken(_) => "page",
        Gesture::RowToggled(_) => "select",
        Gesture::AllToggled => "select all",
        Gesture::SearchTyped(_) | Gesture::SearchBackspace | Gesture::SearchCleared => "search",
        Gesture::FilterClicked(_) => "filter",
        Gesture::ClearSearchClicked => "clear search",
        Gesture::AddNewClicked => "add",
        Gesture::RowClicked(_) => "open",
        Gesture::HeaderActionClicked(_) => "action",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, InternalEvent, ScreenCommand, ScreenData, UiOptions, ViewData, event_loop,
        handle_key_event, process_internal_events, screen_command_for_key,
    };
    use anyhow::Result;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use granja_app::{AppMode, AppState, MemberRole, ScreenKind, TeamMember, TeamMemberId};
    use granja_table::{Body, CheckState};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;
    use time::macros::date;

    #[derive(Debug, Default)]
    struct TestRuntime {
        loads: Vec<ScreenKind>,
        fail: bool,
    }

    impl AppRuntime for TestRuntime {
        fn load_screen(&mut self, screen: ScreenKind) -> Result<ScreenData> {
            self.loads.push(screen);
            if self.fail {
                anyhow::bail!("mock store offline");
            }
            Ok(match screen {
                ScreenKind::Profiles => ScreenData::Profiles(Vec::new()),
                ScreenKind::Team => ScreenData::Team(
                    (1..=23)
                        .map(|id| TeamMember {
                            id: TeamMemberId::new(id),
                            name: format!("Member {id:02}"),
                            email: format!("m{id}@granja.example"),
                            role: MemberRole::Agronomist,
                            farm: "Sítio Santa Fé".to_owned(),
                            joined_on: date!(2025 - 01 - 15),
                            active: true,
                        })
                        .collect(),
                ),
                ScreenKind::Suppliers => ScreenData::Suppliers(Vec::new()),
            })
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    struct Harness {
        state: AppState,
        runtime: TestRuntime,
        view_data: ViewData,
        tx: mpsc::Sender<InternalEvent>,
        rx: mpsc::Receiver<InternalEvent>,
    }

    impl Harness {
        fn new(start: ScreenKind) -> Self {
            let (tx, rx) = mpsc::channel();
            Self {
                state: AppState::new(start),
                runtime: TestRuntime::default(),
                view_data: ViewData::new(UiOptions::default()),
                tx,
                rx,
            }
        }

        fn press(&mut self, code: KeyCode) -> bool {
            let quit = handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                key(code),
            );
            self.pump();
            quit
        }

        fn pump(&mut self) {
            process_internal_events(&mut self.state, &mut self.view_data, &self.tx, &self.rx);
        }
    }

    #[test]
    fn key_map_covers_table_gestures() {
        assert_eq!(
            screen_command_for_key(key(KeyCode::Char('s'))),
            Some(ScreenCommand::ActivateHeader)
        );
        assert_eq!(
            screen_command_for_key(key(KeyCode::Char(' '))),
            Some(ScreenCommand::ToggleRow)
        );
        assert_eq!(
            screen_command_for_key(key(KeyCode::Char(']'))),
            Some(ScreenCommand::NextPage)
        );
        assert_eq!(
            screen_command_for_key(key(KeyCode::Char('3'))),
            Some(ScreenCommand::PageSlot(3))
        );
        assert_eq!(screen_command_for_key(key(KeyCode::Char('0'))), None);
        assert_eq!(
            screen_command_for_key(key(KeyCode::Char('x'))),
            Some(ScreenCommand::HeaderAction(0))
        );
    }

    #[test]
    fn switching_screens_loads_them_once() {
        let mut harness = Harness::new(ScreenKind::Profiles);
        harness.press(KeyCode::Tab);
        assert_eq!(harness.state.active_screen, ScreenKind::Team);
        assert_eq!(harness.runtime.loads, vec![ScreenKind::Team]);
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("loaded 23 members")
        );

        harness.press(KeyCode::BackTab);
        harness.press(KeyCode::Tab);
        assert_eq!(
            harness.runtime.loads,
            vec![ScreenKind::Team, ScreenKind::Profiles]
        );
    }

    #[test]
    fn failed_load_reports_status_and_leaves_loading() {
        let mut harness = Harness::new(ScreenKind::Profiles);
        harness.runtime.fail = true;
        harness.press(KeyCode::Tab);
        let status = harness.state.status_line.clone().unwrap_or_default();
        assert!(status.contains("mock store offline"), "{status}");
        let view = harness.view_data.screens.get(ScreenKind::Team).view();
        assert!(!matches!(view.body, Body::Loading));
    }

    #[test]
    fn keys_drive_sort_selection_and_paging() {
        let mut harness = Harness::new(ScreenKind::Profiles);
        harness.press(KeyCode::Tab);

        harness.press(KeyCode::Char('s'));
        assert_eq!(harness.state.status_line.as_deref(), Some("sort name asc"));

        harness.press(KeyCode::Char('a'));
        assert_eq!(harness.state.status_line.as_deref(), Some("23 selected"));
        let view = harness.view_data.screens.get(ScreenKind::Team).view();
        assert_eq!(view.select_all, Some(CheckState::Checked));

        harness.press(KeyCode::Char('3'));
        assert_eq!(harness.view_data.screens.team.page(), 3);
        harness.press(KeyCode::Char(']'));
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("next page unavailable")
        );
    }

    #[test]
    fn search_mode_captures_typing_until_escape() {
        let mut harness = Harness::new(ScreenKind::Profiles);
        harness.press(KeyCode::Tab);
        harness.press(KeyCode::Char('/'));
        assert_eq!(harness.state.mode, AppMode::Search);

        for ch in "member 1".chars() {
            assert!(!harness.press(KeyCode::Char(ch)));
        }
        assert_eq!(harness.view_data.screens.team.search(), "member 1");
        assert_eq!(harness.view_data.screens.team.filtered().len(), 10);

        harness.press(KeyCode::Esc);
        assert_eq!(harness.state.mode, AppMode::Nav);
        assert!(harness.press(KeyCode::Char('q')));
    }

    #[test]
    fn empty_screen_add_new_reloads() {
        let mut harness = Harness::new(ScreenKind::Suppliers);
        super::ensure_loaded(
            &mut harness.state,
            &mut harness.runtime,
            &mut harness.view_data,
            &harness.tx,
            ScreenKind::Suppliers,
        );
        harness.pump();
        harness.press(KeyCode::Char('n'));
        assert_eq!(
            harness.runtime.loads,
            vec![ScreenKind::Suppliers, ScreenKind::Suppliers]
        );
    }

    #[test]
    fn event_loop_returns_input_errors_to_the_caller() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        let mut state = AppState::new(ScreenKind::Team);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::new(UiOptions::default());

        let mut reads = 0;
        let result = event_loop(
            &mut terminal,
            &mut state,
            &mut runtime,
            &mut view_data,
            || {
                reads += 1;
                if reads < 3 {
                    Ok(None)
                } else {
                    Err(anyhow::anyhow!("terminal went away"))
                }
            },
        );

        let error = result.expect_err("input error should end the loop");
        assert!(error.to_string().contains("terminal went away"));
        assert_eq!(reads, 3);
        assert_eq!(runtime.loads, vec![ScreenKind::Team]);
        Ok(())
    }

    #[test]
    fn event_loop_stops_cleanly_on_quit() -> Result<()> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        let mut state = AppState::new(ScreenKind::Profiles);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::new(UiOptions::default());

        let mut keys = vec![key(KeyCode::Char('q')), key(KeyCode::Tab)];
        event_loop(
            &mut terminal,
            &mut state,
            &mut runtime,
            &mut view_data,
            || Ok(keys.pop()),
        )?;
        assert_eq!(state.active_screen, ScreenKind::Team);
        Ok(())
    }
}
