use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use serde::{Deserialize, Serialize};
use tracing::info;

use wordwhirl_engine::{
    normalize, HighScoreStore, RoundState, Verdict, WordPool, WordSetDictionary, WordValidator,
    DEFAULT_LOCALE,
};

/// Root-word pool shipped with the binary; one word per line.
const START_WORDS: &str = include_str!("../assets/start.txt");
/// Built-in dictionary used when no `--dictionary` file is given.
const DICTIONARY: &str = include_str!("../assets/dictionary.txt");

/// CLI flags (user-provided override persisted config)
#[derive(Parser, Debug)]
#[command(name = "wordwhirl-terminal", about = "Wordwhirl ratatui word game")]
struct Args {
    /// Path to a newline-separated root-word pool (defaults to the built-in list)
    #[arg(long)]
    word_list: Option<PathBuf>,

    /// Path to a newline-separated dictionary (defaults to the built-in list)
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Seed for root-word selection (reproducible rounds)
    #[arg(long)]
    seed: Option<u64>,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone)]
struct CommandDef {
    name: &'static str,
    usage: &'static str,
    desc: &'static str,
    group: &'static str,
}

const fn cmd(
    name: &'static str,
    usage: &'static str,
    desc: &'static str,
    group: &'static str,
) -> CommandDef {
    CommandDef {
        name,
        usage,
        desc,
        group,
    }
}

lazy_static! {
    static ref COMMANDS: Vec<CommandDef> = vec![
        // Session
        cmd("help", "/help", "Show grouped palette", "Session"),
        cmd("score", "/score", "Show score + high score", "Session"),
        cmd("quit", "/quit", "Exit", "Session"),
        // Round
        cmd("new", "/new", "Start a fresh round (new root word)", "Round"),
        cmd("hint", "/hint", "Toggle the hint line", "Round"),
    ];
    static ref COMPLETIONS: HashSet<String> =
        COMMANDS.iter().map(|c| format!("/{}", c.name)).collect();
    static ref HINTS: HashMap<String, String> = COMMANDS
        .iter()
        .map(|c| (format!("/{}", c.name), format!("{} — {}", c.usage, c.desc)))
        .collect();
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedConfig {
    word_list: Option<PathBuf>,
    dictionary: Option<PathBuf>,
    verbose: Option<bool>,
}

/// JSON-file integer store holding the persisted high score.
struct FileScoreStore {
    path: PathBuf,
    values: HashMap<String, u32>,
}

impl FileScoreStore {
    fn open(path: PathBuf) -> Self {
        let values = fs::read(&path)
            .ok()
            .and_then(|data| serde_json::from_slice(&data).ok())
            .unwrap_or_default();
        Self { path, values }
    }
}

impl HighScoreStore for FileScoreStore {
    fn get_integer(&self, key: &str) -> u32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_integer(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), value);
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_vec_pretty(&self.values)?;
        fs::write(&self.path, data).context("write score file")?;
        Ok(())
    }
}

struct AppState {
    input: String,
    logs: Vec<String>,
    status: String,
    hint: String,
    show_hint: bool,
    completion: CompletionState,
    round: RoundState,
    validator: WordValidator<WordSetDictionary>,
    pool: WordPool,
    rng: StdRng,
    store: FileScoreStore,
}

#[derive(Default)]
struct CompletionState {
    filtered: Vec<usize>,
    selected: usize,
}

#[derive(Debug)]
enum CommandAction {
    Local(String),
    Submit(String),
    NewRound,
    ToggleHint,
    ShowScore,
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = load_config().unwrap_or_default();

    let word_list = args.word_list.clone().or_else(|| cfg.word_list.clone());
    let dictionary = args.dictionary.clone().or_else(|| cfg.dictionary.clone());
    let verbose = args.verbose || cfg.verbose.unwrap_or(false);

    cfg.word_list = word_list.clone();
    cfg.dictionary = dictionary.clone();
    cfg.verbose = Some(verbose);
    save_config(&cfg)?;

    init_tracing(verbose)?;

    // An empty word list is a fatal configuration error: no round without a root word.
    let pool_text = match &word_list {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read word list {}", path.display()))?,
        None => START_WORDS.to_string(),
    };
    let pool = WordPool::parse(&pool_text).context("parse word list")?;

    let dict_text = match &dictionary {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read dictionary {}", path.display()))?,
        // The built-in dictionary also recognizes the root words themselves.
        None => format!("{DICTIONARY}\n{START_WORDS}"),
    };
    let dict = WordSetDictionary::from_text(&dict_text, DEFAULT_LOCALE);
    if dict.is_empty() {
        return Err(anyhow!("dictionary contains no entries"));
    }
    let validator = WordValidator::new(dict, DEFAULT_LOCALE);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let store = FileScoreStore::open(
        score_path().ok_or_else(|| anyhow!("no data directory for score storage"))?,
    );
    let mut round = RoundState::new(&store);
    round.start_round(&pool, &mut rng);
    info!(words = pool.len(), "wordwhirl started");

    // TUI setup
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = AppState {
        input: String::new(),
        logs: vec!["Type a word and press Enter; /help for commands".to_string()],
        status: String::new(),
        hint: String::from("Type /help or Tab for completions"),
        show_hint: false,
        completion: CompletionState::default(),
        round,
        validator,
        pool,
        rng,
        store,
    };
    update_status(&mut app);

    let tick_rate = Duration::from_millis(200);
    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|f| draw_ui(f, &app))?;
            if event::poll(tick_rate)? {
                if let CEvent::Key(ev) = event::read()? {
                    if ev.kind == KeyEventKind::Press && handle_key_event(ev, &mut app)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    terminal.show_cursor()?;
    result
}

fn draw_ui(f: &mut ratatui::Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(f.area());

    // Status line
    let status = Paragraph::new(app.status.clone()).style(Style::default().fg(Color::Gray));
    f.render_widget(status, chunks[0]);
    let hint_line = if app.show_hint {
        format!(
            "Hint: think of words related to '{}'!",
            app.round.root_word().unwrap_or("?")
        )
    } else {
        "Enter submits a word | /new restarts | /hint nudges".to_string()
    };
    let hint_para = Paragraph::new(hint_line).style(Style::default().fg(Color::Gray));
    f.render_widget(
        hint_para,
        Rect {
            x: chunks[0].x,
            y: chunks[0].y.saturating_add(1),
            width: chunks[0].width,
            height: 1,
        },
    );

    // Main area split into word list + log
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[1]);

    let word_lines = render_words(app);
    let word_list = List::new(word_lines).block(
        Block::default().borders(Borders::ALL).title(format!(
            "Words from '{}'",
            app.round.root_word().unwrap_or("?")
        )),
    );
    f.render_widget(word_list, main_chunks[0]);

    // Log pane
    let log_lines: Vec<Line> = app
        .logs
        .iter()
        .rev()
        .take((main_chunks[1].height.saturating_sub(2)) as usize)
        .rev()
        .map(|l| Line::raw(l.clone()))
        .collect();
    let log = Paragraph::new(log_lines)
        .block(Block::default().borders(Borders::ALL).title("Log"))
        .wrap(Wrap { trim: true });
    f.render_widget(log, main_chunks[1]);

    // Input + completions
    let bottom_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(if app.completion.filtered.is_empty() {
                    0
                } else {
                    (app.completion.filtered.len() as u16).min(6)
                }),
            ]
            .as_ref(),
        )
        .split(chunks[2]);

    let input_block = Block::default().borders(Borders::ALL).title("Input");
    f.render_widget(Clear, bottom_chunks[0]);
    f.render_widget(input_block, bottom_chunks[0]);

    let prompt = format!("wordwhirl $ {}", app.input);
    let input_para = Paragraph::new(prompt);
    f.render_widget(input_para, bottom_chunks[0]);

    if !app.hint.is_empty() {
        let hint = Paragraph::new(app.hint.as_str()).style(Style::default().fg(Color::Gray));
        f.render_widget(hint, bottom_chunks[0]);
    }

    if !app.completion.filtered.is_empty() && bottom_chunks.len() > 1 {
        let items: Vec<ListItem> = app
            .completion
            .filtered
            .iter()
            .map(|&idx| {
                let cmd = &COMMANDS[idx];
                ListItem::new(Line::from(vec![
                    Span::styled(format!("/{}", cmd.name), Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::styled(cmd.desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(
            app.completion.selected.min(items.len().saturating_sub(1)),
        ));
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Commands"))
            .highlight_style(Style::default().fg(Color::Yellow));
        f.render_stateful_widget(list, bottom_chunks[1], &mut state);
    }
}

/// Accepted words, most-recent-first, each with its point value.
fn render_words(app: &AppState) -> Vec<ListItem<'static>> {
    let mut lines: Vec<ListItem> = Vec::new();
    for word in app.round.used_words() {
        let points = word.chars().count();
        lines.push(ListItem::new(Line::from(vec![
            Span::styled(format!("({points}) "), Style::default().fg(Color::Yellow)),
            Span::raw(word.clone()),
        ])));
    }
    if lines.is_empty() {
        lines.push(ListItem::new(Line::raw("No words yet — start spelling!")));
    }
    lines
}

fn update_status(app: &mut AppState) {
    app.status = format!(
        "Root: {} | Score: {} | High Score: {} | Words: {}",
        app.round.root_word().unwrap_or("?"),
        app.round.score(),
        app.round.high_score(),
        app.round.used_words().len()
    );
}

fn handle_key_event(ev: KeyEvent, app: &mut AppState) -> Result<bool> {
    let KeyEvent {
        code, modifiers, ..
    } = ev;
    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Ok(true),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => return Ok(true),
        (KeyCode::Up, _) => {
            let len = app.completion.filtered.len();
            if len > 0 {
                app.completion.selected = app.completion.selected.saturating_add(len - 1) % len;
            }
        }
        (KeyCode::Down, _) => {
            let len = app.completion.filtered.len();
            if len > 0 {
                app.completion.selected = (app.completion.selected + 1) % len;
            }
        }
        (KeyCode::Tab, _) => {
            if !app.completion.filtered.is_empty() {
                let idx = app.completion.filtered
                    [app.completion.selected.min(app.completion.filtered.len() - 1)];
                let cmd = &COMMANDS[idx];
                app.input = format!("/{} ", cmd.name);
            } else {
                autocomplete(app);
            }
            update_hint(app);
        }
        (KeyCode::Enter, _) => {
            let line = app.input.trim().to_string();
            app.input.clear();
            if line.is_empty() {
                update_hint(app);
                return Ok(false);
            }
            match handle_line(&line) {
                Ok(CommandAction::Submit(word)) => submit_word(app, &word),
                Ok(CommandAction::Local(msg)) => push_log(app, msg),
                Ok(CommandAction::NewRound) => {
                    app.round.start_round(&app.pool, &mut app.rng);
                    update_status(app);
                    let msg = format!(
                        "New round — root word is '{}'",
                        app.round.root_word().unwrap_or("?")
                    );
                    push_log(app, msg);
                }
                Ok(CommandAction::ToggleHint) => {
                    app.show_hint = !app.show_hint;
                }
                Ok(CommandAction::ShowScore) => {
                    let msg = format!(
                        "Score {} | High Score {}",
                        app.round.score(),
                        app.round.high_score()
                    );
                    push_log(app, msg);
                }
                Ok(CommandAction::Quit) => return Ok(true),
                Err(e) => push_log(app, format!("⚠️ {}", e)),
            }
            update_hint(app);
        }
        (KeyCode::Char(c), _) => {
            app.input.push(c);
            update_hint(app);
        }
        (KeyCode::Backspace, _) => {
            app.input.pop();
            update_hint(app);
        }
        (KeyCode::Esc, _) => {
            app.input.clear();
            update_hint(app);
        }
        _ => {}
    }
    Ok(false)
}

/// One full submission: evaluate, then commit on acceptance. The whole round
/// trip completes before the next input event is processed.
fn submit_word(app: &mut AppState, raw: &str) {
    let root = app.round.root_word().unwrap_or_default().to_string();
    match app.validator.evaluate(raw, &app.round) {
        // Empty after trim: silently ignored.
        Ok(None) => {}
        Ok(Some(Verdict::Accepted)) => {
            let word = normalize(raw);
            let points = word.chars().count();
            match app.round.commit(&word, &mut app.store) {
                Ok(()) => {
                    update_status(app);
                    let msg = format!("✓ {} (+{} → {})", word, points, app.round.score());
                    push_log(app, msg);
                }
                Err(e) => push_log(app, format!("⚠️ {}", e)),
            }
        }
        Ok(Some(verdict)) => {
            let title = verdict.title().unwrap_or("Rejected");
            let message = verdict.message(&root).unwrap_or_default();
            push_log(app, format!("⚠️ {title}: {message}"));
        }
        Err(e) => push_log(app, format!("⚠️ {}", e)),
    }
}

fn autocomplete(app: &mut AppState) {
    let trimmed = app.input.trim_start();
    let mut matches: Vec<&String> = COMPLETIONS
        .iter()
        .filter(|c| c.starts_with(trimmed))
        .collect();
    matches.sort();
    if let Some(first) = matches.first() {
        app.input = first.to_string();
    }
}

fn update_hint(app: &mut AppState) {
    let trimmed_owned = app.input.trim().to_string();
    update_completions(app, &trimmed_owned);
    if trimmed_owned.is_empty() {
        app.hint = "Type /help or Tab for completions".into();
        return;
    }
    let first = trimmed_owned.split_whitespace().next().unwrap_or("");
    if let Some(h) = HINTS.get(&first.to_lowercase()) {
        app.hint = h.clone();
    } else if !trimmed_owned.starts_with('/') {
        app.hint = format!(
            "Enter submits '{}' against '{}'",
            trimmed_owned,
            app.round.root_word().unwrap_or("?")
        );
    } else {
        app.hint = String::new();
    }
}

fn update_completions(app: &mut AppState, trimmed: &str) {
    app.completion.filtered.clear();
    app.completion.selected = 0;
    if !trimmed.starts_with('/') {
        return;
    }
    let needle = trimmed.trim_start_matches('/').to_lowercase();
    for (idx, cmd) in COMMANDS.iter().enumerate() {
        if cmd.name.starts_with(&needle) {
            app.completion.filtered.push(idx);
        }
    }
}

fn push_log(app: &mut AppState, line: String) {
    let ts = Local::now().format("%H:%M:%S");
    app.logs.push(format!("{ts} {line}"));
    if app.logs.len() > 300 {
        let excess = app.logs.len() - 300;
        app.logs.drain(0..excess);
    }
}

fn handle_line(line: &str) -> Result<CommandAction> {
    if !line.starts_with('/') {
        return Ok(CommandAction::Submit(line.to_string()));
    }
    let mut parts = line[1..]
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>();
    if parts.is_empty() {
        return Ok(CommandAction::Local(String::new()));
    }
    let cmd = parts.remove(0).to_lowercase();
    match cmd.as_str() {
        "quit" | "exit" => Ok(CommandAction::Quit),
        "help" => Ok(CommandAction::Local(render_help())),
        "new" => Ok(CommandAction::NewRound),
        "hint" => Ok(CommandAction::ToggleHint),
        "score" => Ok(CommandAction::ShowScore),
        _ => Err(anyhow!("Unknown command /{cmd}")),
    }
}

fn render_help() -> String {
    let mut by_group: BTreeMap<&str, Vec<&CommandDef>> = BTreeMap::new();
    for c in COMMANDS.iter() {
        by_group.entry(c.group).or_default().push(c);
    }
    let mut out = String::new();
    for (group, cmds) in by_group {
        out.push_str(&format!("\n[{group}]\n"));
        for c in cmds {
            out.push_str(&format!("  {:<22} {}\n", c.usage, c.desc));
        }
    }
    out
}

fn init_tracing(verbose: bool) -> Result<()> {
    let Some(dirs) = project_dirs() else {
        return Ok(());
    };
    let dir = dirs.data_dir();
    fs::create_dir_all(dir)?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("wordwhirl.log"))
        .context("open log file")?;
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}

fn load_config() -> Option<PersistedConfig> {
    let path = config_path()?;
    let data = fs::read(path).ok()?;
    serde_json::from_slice(&data).ok()
}

fn save_config(cfg: &PersistedConfig) -> Result<()> {
    if let Some(path) = config_path() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(path, data)?;
    }
    Ok(())
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "wordwhirl", "terminal-cli")
}

fn config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.json"))
}

fn score_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().join("scores.json"))
}
