mod app;

use crate::app::handlers::{handle_key, handle_mouse};
use crate::app::state::{LogKind, ThemeName};
use crate::app::view::ui::draw_ui;
use crate::app::AppState;
use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const LOG_PREFIX: &str = "[schooldesk-tui]";
const DEFAULT_DATA_FILE: &str = "schooldesk.json";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn env_truthy(key: &str) -> bool {
    env::var(key)
        .ok()
        .as_deref()
        .and_then(parse_bool_like)
        .unwrap_or(false)
}

fn parse_bool_like(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn cli_flag_enabled_in(args: impl IntoIterator<Item = impl AsRef<str>>, flag: &str) -> bool {
    let prefix = format!("{flag}=");
    args.into_iter().any(|arg| {
        let arg = arg.as_ref();
        if arg == flag {
            return true;
        }
        if let Some(value) = arg.strip_prefix(&prefix) {
            return parse_bool_like(value).unwrap_or(false);
        }
        false
    })
}

fn cli_flag_enabled(flag: &str) -> bool {
    cli_flag_enabled_in(env::args().skip(1), flag)
}

/// Last `--name value` or `--name=value` wins. A bare flag followed by another flag is ignored.
fn parse_option_from_args(
    args: impl IntoIterator<Item = impl AsRef<str>>,
    name: &str,
) -> Option<String> {
    let mut args = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .peekable();
    let prefix = format!("{name}=");
    let mut found: Option<String> = None;
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            found = Some(value.to_string());
            continue;
        }
        if arg == name {
            if let Some(next) = args.peek() {
                if !next.starts_with('-') {
                    found = Some(next.to_string());
                    let _ = args.next();
                }
            }
        }
    }
    found
}

fn parse_data_path_from_args(args: impl IntoIterator<Item = impl AsRef<str>>) -> Option<PathBuf> {
    parse_option_from_args(args, "--data")
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

fn parse_theme_from_args(args: impl IntoIterator<Item = impl AsRef<str>>) -> Option<String> {
    parse_option_from_args(args, "--theme")
}

fn resolve_data_path() -> PathBuf {
    parse_data_path_from_args(env::args().skip(1))
        .or_else(|| {
            env::var("SCHOOLDESK_DATA")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

fn resolve_theme() -> ThemeName {
    let requested = parse_theme_from_args(env::args().skip(1))
        .or_else(|| env::var("SCHOOLDESK_TUI_THEME").ok());
    let Some(requested) = requested else {
        return ThemeName::default();
    };
    match ThemeName::lookup(&requested) {
        Some(name) => name,
        None => {
            eprintln!(
                "{LOG_PREFIX} unknown theme {requested:?}; using {}",
                ThemeName::default()
            );
            ThemeName::default()
        }
    }
}

/// `--no-mouse` wins; otherwise the env value decides, and anything unparsable keeps capture on.
fn mouse_capture_from(no_mouse_flag: bool, env_value: Option<&str>) -> bool {
    if no_mouse_flag {
        return false;
    }
    env_value.and_then(parse_bool_like).unwrap_or(true)
}

fn mouse_capture_requested() -> bool {
    mouse_capture_from(
        cli_flag_enabled("--no-mouse"),
        env::var("SCHOOLDESK_TUI_MOUSE").ok().as_deref(),
    )
}

#[derive(Clone, Copy, Debug)]
struct KeyDebugLog {
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
}

impl KeyDebugLog {
    fn from_event(event: &crossterm::event::KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
            kind: event.kind,
        }
    }
}

impl fmt::Display for KeyDebugLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code={:?} mods={:?} kind={:?}",
            self.code, self.modifiers, self.kind
        )
    }
}

struct TerminalRestoreGuard {
    mouse_capture: bool,
}

impl TerminalRestoreGuard {
    fn new(mouse_capture: bool) -> Self {
        Self { mouse_capture }
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        if self.mouse_capture {
            let _ = stdout.execute(DisableMouseCapture);
        }
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }
}

fn load_initial_data(app: &mut AppState) {
    match app.load_data() {
        Ok(()) => {}
        Err(error) if error.is_not_found() => {
            let path = app
                .data_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            app.push_line(
                LogKind::Status,
                format!("No data file at {path}; starting with an empty roster"),
            );
        }
        Err(error) => app.push_error_report("load failed", error.to_string()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let theme = resolve_theme();
    let data_path = resolve_data_path();
    let mouse_capture = mouse_capture_requested();

    let mut app = AppState::new(theme, Some(data_path));
    app.key_debug = env_truthy("SCHOOLDESK_TUI_KEY_DEBUG");
    app.mouse_capture_enabled = mouse_capture;
    app.push_line(LogKind::System, "SchoolDesk attendance. Press ? for keys.");
    load_initial_data(&mut app);

    let mut stdout = std::io::stdout();
    let _restore_guard = TerminalRestoreGuard::new(mouse_capture);
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    if mouse_capture {
        stdout.execute(EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| draw_ui(f, &mut app))?;
            needs_redraw = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.key_debug {
                    app.push_line(
                        LogKind::Debug,
                        format!("key: {}", KeyDebugLog::from_event(&key)),
                    );
                    needs_redraw = true;
                }
                if handle_key(&mut app, key.code, key.modifiers) {
                    needs_redraw = true;
                }
            }
            Event::Mouse(mouse) => {
                if handle_mouse(&mut app, mouse.kind, mouse.column, mouse.row) {
                    needs_redraw = true;
                }
            }
            Event::Resize(_, _) => needs_redraw = true,
            _ => {}
        }

        if app.should_exit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        cli_flag_enabled_in, mouse_capture_from, parse_bool_like, parse_data_path_from_args,
        parse_theme_from_args,
    };
    use std::path::PathBuf;

    #[test]
    fn parse_bool_like_accepts_common_spellings() {
        assert_eq!(parse_bool_like(" Yes "), Some(true));
        assert_eq!(parse_bool_like("ON"), Some(true));
        assert_eq!(parse_bool_like("0"), Some(false));
        assert_eq!(parse_bool_like("off"), Some(false));
        assert_eq!(parse_bool_like("maybe"), None);
    }

    #[test]
    fn cli_flag_supports_bare_and_valued_forms() {
        assert!(cli_flag_enabled_in(["--no-mouse"], "--no-mouse"));
        assert!(cli_flag_enabled_in(["--no-mouse=true"], "--no-mouse"));
        assert!(!cli_flag_enabled_in(["--no-mouse=0"], "--no-mouse"));
        assert!(!cli_flag_enabled_in(["--theme", "ocean"], "--no-mouse"));
    }

    #[test]
    fn mouse_capture_follows_flag_then_env() {
        assert!(mouse_capture_from(false, None));
        assert!(!mouse_capture_from(false, Some("0")));
        assert!(!mouse_capture_from(false, Some("off")));
        assert!(mouse_capture_from(false, Some("yes")));
        assert!(mouse_capture_from(false, Some("sometimes")));
        assert!(!mouse_capture_from(true, Some("1")));
    }

    #[test]
    fn data_path_accepts_both_forms() {
        assert_eq!(
            parse_data_path_from_args(["--data", "class5.json"]),
            Some(PathBuf::from("class5.json"))
        );
        assert_eq!(
            parse_data_path_from_args(["--data=/tmp/a.json", "--data", "b.json"]),
            Some(PathBuf::from("b.json"))
        );
        assert_eq!(parse_data_path_from_args(["--data", "--theme"]), None);
        assert_eq!(parse_data_path_from_args(["--data="]), None);
        assert_eq!(parse_data_path_from_args(Vec::<String>::new()), None);
    }

    #[test]
    fn theme_flag_keeps_raw_value() {
        assert_eq!(
            parse_theme_from_args(["--theme=Rose-Gold"]),
            Some("Rose-Gold".to_string())
        );
        assert_eq!(
            parse_theme_from_args(["--theme", "ocean"]),
            Some("ocean".to_string())
        );
        assert_eq!(parse_theme_from_args(["--theme"]), None);
    }
}
