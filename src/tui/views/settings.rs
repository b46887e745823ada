// Settings view - system preferences form
//
// Four sections, one row per control:
// - AI Intelligence: tips and todo intervals (+/- in 15 minute steps)
// - Daily Digest Schedule: report hour and minute
// - Privacy Exclusion Zone: mode, input, excluded sites
// - System Language
//
// Nothing is persisted. Saving only shows a "Saved" flash for a moment,
// driven by a timer the form owns.

use super::{View, ViewAction};
use crate::events::AppEvent;
use crate::schedule::Timer;
use crate::theme::Theme;
use crate::tui::traits::{Component, ComponentId, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;
use tokio::sync::mpsc;

pub const INTERVAL_STEP: u32 = 15;
pub const INTERVAL_MIN: u32 = 15;
pub const INTERVAL_MAX: u32 = 240;

pub const LANGUAGES: [&str; 5] = ["English", "Spanish", "Mandarin", "Japanese", "German"];

const DEFAULT_EXCLUDED: [&str; 3] = ["facebook.com", "ads.google.com", "netflix.com"];

/// Round to the nearest step, then clamp into range
pub fn normalize_interval(minutes: i64) -> u32 {
    let step = INTERVAL_STEP as i64;
    let rounded = ((minutes + step / 2).div_euclid(step)) * step;
    rounded.clamp(INTERVAL_MIN as i64, INTERVAL_MAX as i64) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
}

impl TimeField {
    pub fn max(self) -> u32 {
        match self {
            TimeField::Hour => 23,
            TimeField::Minute => 59,
        }
    }
}

/// Whether `candidate` is an acceptable in-progress value for `field`
///
/// Digits only, at most two of them, never above the field's maximum.
pub fn accepts_time(field: TimeField, candidate: &str) -> bool {
    if candidate.len() > 2 || !candidate.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    candidate.is_empty() || candidate.parse::<u32>().is_ok_and(|v| v <= field.max())
}

/// Zero-pad a time field when it loses focus
pub fn pad_time(value: &str) -> String {
    match value.len() {
        0 => "00".to_string(),
        1 => format!("0{}", value),
        _ => value.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionMode {
    Domain,
    Url,
}

impl ExclusionMode {
    fn label(self) -> &'static str {
        match self {
            ExclusionMode::Domain => "Domain Block",
            ExclusionMode::Url => "Exact URL",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            ExclusionMode::Domain => "e.g., facebook.com",
            ExclusionMode::Url => "e.g., https://site.com/private",
        }
    }
}

/// Form state and its rules, independent of rendering
#[derive(Debug)]
pub struct SettingsForm {
    pub tips_interval: u32,
    pub todo_interval: u32,
    pub report_hour: String,
    pub report_minute: String,
    pub exclusion_mode: ExclusionMode,
    pub exclusion_input: String,
    excluded: Vec<String>,
    language: usize,
    saved: bool,
    save_timer: Timer,
    flash: Duration,
}

impl SettingsForm {
    pub fn new(flash: Duration) -> Self {
        Self {
            tips_interval: 15,
            todo_interval: 30,
            report_hour: "18".to_string(),
            report_minute: "00".to_string(),
            exclusion_mode: ExclusionMode::Domain,
            exclusion_input: String::new(),
            excluded: DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect(),
            language: 0,
            saved: false,
            save_timer: Timer::new(),
            flash,
        }
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn language(&self) -> &'static str {
        LANGUAGES[self.language]
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn adjust_tips(&mut self, steps: i64) {
        self.tips_interval =
            normalize_interval(self.tips_interval as i64 + steps * INTERVAL_STEP as i64);
    }

    pub fn adjust_todo(&mut self, steps: i64) {
        self.todo_interval =
            normalize_interval(self.todo_interval as i64 + steps * INTERVAL_STEP as i64);
    }

    fn time_mut(&mut self, field: TimeField) -> &mut String {
        match field {
            TimeField::Hour => &mut self.report_hour,
            TimeField::Minute => &mut self.report_minute,
        }
    }

    /// Type a character into a time field; rejected input leaves it unchanged
    pub fn type_time(&mut self, field: TimeField, c: char) -> bool {
        let value = self.time_mut(field);
        let mut candidate = value.clone();
        candidate.push(c);
        if !accepts_time(field, &candidate) {
            return false;
        }
        *value = candidate;
        true
    }

    pub fn backspace_time(&mut self, field: TimeField) {
        self.time_mut(field).pop();
    }

    pub fn clear_time(&mut self, field: TimeField) {
        self.time_mut(field).clear();
    }

    pub fn blur_time(&mut self, field: TimeField) {
        let value = self.time_mut(field);
        *value = pad_time(value);
    }

    pub fn toggle_mode(&mut self) {
        self.exclusion_mode = match self.exclusion_mode {
            ExclusionMode::Domain => ExclusionMode::Url,
            ExclusionMode::Url => ExclusionMode::Domain,
        };
    }

    /// Add the trimmed input to the list; blanks and duplicates are refused
    pub fn add_exclusion(&mut self) -> bool {
        let site = self.exclusion_input.trim();
        if site.is_empty() || self.excluded.iter().any(|s| s == site) {
            return false;
        }
        self.excluded.push(site.to_string());
        self.exclusion_input.clear();
        true
    }

    pub fn remove_exclusion(&mut self, index: usize) -> Option<String> {
        (index < self.excluded.len()).then(|| self.excluded.remove(index))
    }

    pub fn cycle_language(&mut self, forward: bool) {
        let n = LANGUAGES.len();
        self.language = if forward {
            (self.language + 1) % n
        } else {
            (self.language + n - 1) % n
        };
    }

    /// Show the "Saved" flash and arm its timer
    pub fn save(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.saved = true;
        let generation = self
            .save_timer
            .schedule(self.flash, tx, |generation| AppEvent::SaveFlashEnd { generation });
        tracing::info!(generation, "Settings saved");
    }

    pub fn on_save_flash_end(&mut self, generation: u64) -> bool {
        if !self.save_timer.fire(generation) {
            return false;
        }
        self.saved = false;
        true
    }
}

/// Form rows, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    TipsInterval,
    TodoInterval,
    ReportHour,
    ReportMinute,
    Mode,
    Input,
    Excluded,
    Language,
    Save,
}

impl Row {
    const ALL: [Row; 9] = [
        Row::TipsInterval,
        Row::TodoInterval,
        Row::ReportHour,
        Row::ReportMinute,
        Row::Mode,
        Row::Input,
        Row::Excluded,
        Row::Language,
        Row::Save,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    fn step(self, down: bool) -> Self {
        let i = self.index();
        let next = if down {
            (i + 1).min(Self::ALL.len() - 1)
        } else {
            i.saturating_sub(1)
        };
        Self::ALL[next]
    }

    fn time_field(self) -> Option<TimeField> {
        match self {
            Row::ReportHour => Some(TimeField::Hour),
            Row::ReportMinute => Some(TimeField::Minute),
            _ => None,
        }
    }

    fn is_text(self) -> bool {
        matches!(self, Row::ReportHour | Row::ReportMinute | Row::Input)
    }
}

pub struct SettingsView {
    form: SettingsForm,
    row: Row,
    editing: bool,
    excluded_selected: usize,
}

impl SettingsView {
    pub fn new(flash: Duration) -> Self {
        Self {
            form: SettingsForm::new(flash),
            row: Row::TipsInterval,
            editing: false,
            excluded_selected: 0,
        }
    }

    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    pub fn on_save_flash_end(&mut self, generation: u64) -> bool {
        self.form.on_save_flash_end(generation)
    }

    fn stop_editing(&mut self) {
        self.editing = false;
        if let Some(field) = self.row.time_field() {
            self.form.blur_time(field);
        }
    }

    fn edit_key(&mut self, key: KeyEvent) -> ViewAction {
        match (self.row, key.code) {
            (_, KeyCode::Esc) => self.stop_editing(),
            (Row::Input, KeyCode::Enter) => {
                self.form.add_exclusion();
                self.stop_editing();
            }
            (_, KeyCode::Enter | KeyCode::Tab) => self.stop_editing(),
            (Row::Input, KeyCode::Backspace) => {
                self.form.exclusion_input.pop();
            }
            (Row::Input, KeyCode::Char(c)) => self.form.exclusion_input.push(c),
            (row, KeyCode::Backspace) => {
                if let Some(field) = row.time_field() {
                    self.form.backspace_time(field);
                }
            }
            (row, KeyCode::Char(c)) => {
                if let Some(field) = row.time_field() {
                    self.form.type_time(field, c);
                }
            }
            _ => return ViewAction::Ignored,
        }
        ViewAction::Consumed
    }

    fn row_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> ViewAction {
        let left = matches!(key.code, KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h'));
        let right = matches!(key.code, KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('='));

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.row = self.row.step(false);
                return ViewAction::Consumed;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.row = self.row.step(true);
                return ViewAction::Consumed;
            }
            KeyCode::Enter if self.row.is_text() => {
                // Typing replaces a time value rather than appending to it
                if let Some(field) = self.row.time_field() {
                    self.form.clear_time(field);
                }
                self.editing = true;
                return ViewAction::Consumed;
            }
            _ => {}
        }

        match self.row {
            Row::TipsInterval if left || right => self.form.adjust_tips(if right { 1 } else { -1 }),
            Row::TodoInterval if left || right => self.form.adjust_todo(if right { 1 } else { -1 }),
            Row::Mode if left || right || key.code == KeyCode::Char(' ') => {
                self.form.toggle_mode()
            }
            Row::Excluded => match key.code {
                KeyCode::Left => self.excluded_selected = self.excluded_selected.saturating_sub(1),
                KeyCode::Right => {
                    if self.excluded_selected + 1 < self.form.excluded().len() {
                        self.excluded_selected += 1;
                    }
                }
                KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
                    return match self.form.remove_exclusion(self.excluded_selected) {
                        Some(site) => {
                            self.excluded_selected = self
                                .excluded_selected
                                .min(self.form.excluded().len().saturating_sub(1));
                            ViewAction::Toast(format!("Removed {}", site))
                        }
                        None => ViewAction::Consumed,
                    };
                }
                _ => return ViewAction::Ignored,
            },
            Row::Language if left || right => self.form.cycle_language(right),
            Row::Save if key.code == KeyCode::Enter => self.form.save(tx),
            _ => return ViewAction::Ignored,
        }
        ViewAction::Consumed
    }

    fn lines(&self, theme: &Theme, focused: bool) -> Vec<Line<'static>> {
        let form = &self.form;
        let mut lines = Vec::new();

        let label = |row: Row, text: &str| -> Span<'static> {
            let marker = if focused && self.row == row { "▸ " } else { "  " };
            let style = if focused && self.row == row {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };
            Span::styled(format!("{}{:<30}", marker, text), style)
        };
        let value = |row: Row, text: String| -> Span<'static> {
            let active = focused && self.row == row;
            let style = if active && self.editing {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
            } else if active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.accent)
            };
            Span::styled(text, style)
        };
        let section = |title: &str, description: &str| -> Vec<Line<'static>> {
            vec![
                Line::from(Span::styled(
                    title.to_string(),
                    Style::default()
                        .fg(theme.title)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    description.to_string(),
                    Style::default().fg(theme.muted),
                )),
            ]
        };

        lines.extend(section(
            "⚡ AI Intelligence",
            "Adjust the frequency of context analysis.",
        ));
        lines.push(Line::from(vec![
            label(Row::TipsInterval, "Insight Generation Interval"),
            value(Row::TipsInterval, format!("‹ {} min ›", form.tips_interval)),
        ]));
        lines.push(Line::from(vec![
            label(Row::TodoInterval, "Todo Extraction Interval"),
            value(Row::TodoInterval, format!("‹ {} min ›", form.todo_interval)),
        ]));
        lines.push(Line::default());

        lines.extend(section(
            "🕒 Daily Digest Schedule",
            "Set the time for your daily summary report generation.",
        ));
        lines.push(Line::from(vec![
            label(Row::ReportHour, "Report Hour"),
            value(Row::ReportHour, format!("[{:>2}]", form.report_hour)),
        ]));
        lines.push(Line::from(vec![
            label(Row::ReportMinute, "Report Minute"),
            value(Row::ReportMinute, format!("[{:>2}]", form.report_minute)),
            Span::styled(
                format!("   report at {}:{}", form.report_hour, form.report_minute),
                Style::default().fg(theme.muted),
            ),
        ]));
        lines.push(Line::default());

        lines.extend(section(
            "🛡 Privacy Exclusion Zone",
            "Prevent the AI from analyzing content from specific domains or URLs.",
        ));
        let modes = [ExclusionMode::Domain, ExclusionMode::Url]
            .into_iter()
            .map(|m| {
                if m == form.exclusion_mode {
                    format!("[{}]", m.label())
                } else {
                    format!(" {} ", m.label())
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(vec![label(Row::Mode, "Mode"), value(Row::Mode, modes)]));
        let input = if form.exclusion_input.is_empty() && !(self.editing && self.row == Row::Input) {
            form.exclusion_mode.placeholder().to_string()
        } else {
            format!("{}▏", form.exclusion_input)
        };
        lines.push(Line::from(vec![label(Row::Input, "Add Exclusion"), value(Row::Input, input)]));

        let mut chips = vec![label(Row::Excluded, "Excluded Sites")];
        if form.excluded().is_empty() {
            chips.push(Span::styled(
                "No active exclusions.",
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        for (i, site) in form.excluded().iter().enumerate() {
            let selected = focused && self.row == Row::Excluded && i == self.excluded_selected;
            let style = if selected {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
            } else {
                Style::default().fg(theme.foreground)
            };
            chips.push(Span::styled(format!(" {} ✕ ", site), style));
            chips.push(Span::raw(" "));
        }
        lines.push(Line::from(chips));
        lines.push(Line::default());

        lines.extend(section(
            "🌐 System Language",
            "Select the primary language for AI analysis and interface text.",
        ));
        lines.push(Line::from(vec![
            label(Row::Language, "Language"),
            value(Row::Language, format!("‹ {} ›", form.language())),
        ]));
        lines.push(Line::default());

        let save = if form.is_saved() {
            Span::styled(
                " ✓ Saved ",
                Style::default()
                    .fg(theme.background)
                    .bg(theme.action)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            value(Row::Save, "[ Save Changes ]".to_string())
        };
        lines.push(Line::from(vec![label(Row::Save, ""), save]));
        lines
    }
}

impl Component for SettingsView {
    fn id(&self) -> ComponentId {
        ComponentId::Settings
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(focused)))
            .title(Span::styled(
                " System Preferences ",
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(self.lines(theme, focused)).block(block), area);
    }
}

impl View for SettingsView {
    fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> ViewAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => {
                    if self.editing {
                        self.stop_editing();
                    }
                    self.form.save(tx);
                    ViewAction::Consumed
                }
                _ => ViewAction::Ignored,
            };
        }
        if self.editing {
            self.edit_key(key)
        } else {
            self.row_key(key, tx)
        }
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn hint(&self) -> &'static str {
        if self.editing {
            "type  Enter:done  Esc:cancel  Ctrl-s:save"
        } else {
            "↑↓:field  ←→/+-:adjust  Enter:edit  x:remove  Ctrl-s:save"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SettingsForm {
        SettingsForm::new(Duration::from_millis(1500))
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn intervals_step_and_clamp() {
        let mut form = form();
        form.adjust_tips(-1);
        assert_eq!(form.tips_interval, INTERVAL_MIN);
        form.adjust_todo(1);
        assert_eq!(form.todo_interval, 45);
        form.adjust_todo(100);
        assert_eq!(form.todo_interval, INTERVAL_MAX);
        assert_eq!(normalize_interval(22), 15);
        assert_eq!(normalize_interval(23), 30);
    }

    #[test]
    fn time_fields_take_digits_within_range() {
        let mut form = form();
        form.clear_time(TimeField::Hour);
        assert!(!form.type_time(TimeField::Hour, 'a'));
        assert!(form.type_time(TimeField::Hour, '2'));
        assert!(!form.type_time(TimeField::Hour, '5'), "25 is past 23");
        assert!(form.type_time(TimeField::Hour, '3'));
        assert!(!form.type_time(TimeField::Hour, '0'), "three digits");
        assert_eq!(form.report_hour, "23");

        form.clear_time(TimeField::Minute);
        assert!(form.type_time(TimeField::Minute, '7'));
        form.blur_time(TimeField::Minute);
        assert_eq!(form.report_minute, "07");

        form.clear_time(TimeField::Minute);
        form.blur_time(TimeField::Minute);
        assert_eq!(form.report_minute, "00");
    }

    #[test]
    fn exclusions_trim_dedup_and_remove() {
        let mut form = form();
        form.exclusion_input = "  example.com ".to_string();
        assert!(form.add_exclusion());
        assert_eq!(form.excluded().last().map(String::as_str), Some("example.com"));
        assert!(form.exclusion_input.is_empty());

        form.exclusion_input = "netflix.com".to_string();
        assert!(!form.add_exclusion());
        form.exclusion_input = "   ".to_string();
        assert!(!form.add_exclusion());
        assert_eq!(form.excluded().len(), 4);

        assert_eq!(form.remove_exclusion(0).as_deref(), Some("facebook.com"));
        assert_eq!(form.remove_exclusion(10), None);
        assert_eq!(form.excluded().len(), 3);
    }

    #[test]
    fn language_cycles_both_ways() {
        let mut form = form();
        form.cycle_language(false);
        assert_eq!(form.language(), "German");
        form.cycle_language(true);
        assert_eq!(form.language(), "English");
    }

    fn flash_ends(rx: &mut mpsc::Receiver<AppEvent>) -> Vec<u64> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::SaveFlashEnd { generation } = event {
                out.push(generation);
            }
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn saved_flash_clears_after_delay() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut form = form();
        form.save(&tx);
        settle().await;
        assert!(form.is_saved());

        tokio::time::advance(Duration::from_millis(1400)).await;
        settle().await;
        assert!(flash_ends(&mut rx).is_empty());

        tokio::time::advance(Duration::from_millis(200)).await;
        settle().await;
        let ends = flash_ends(&mut rx);
        assert_eq!(ends.len(), 1, "flash end event");
        assert!(form.on_save_flash_end(ends[0]));
        assert!(!form.is_saved());
    }

    #[tokio::test(start_paused = true)]
    async fn saving_again_restarts_flash() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut form = form();
        form.save(&tx);
        settle().await;
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        form.save(&tx);
        settle().await;

        // 2.0 s after the first save: its timer would have fired by now
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert!(flash_ends(&mut rx).is_empty(), "first timer was replaced");
        assert!(form.is_saved());

        // 1.6 s after the second save
        tokio::time::advance(Duration::from_millis(600)).await;
        settle().await;
        let ends = flash_ends(&mut rx);
        assert_eq!(ends.len(), 1);
        assert!(form.on_save_flash_end(ends[0]));
        assert!(!form.is_saved());

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert!(flash_ends(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn editing_time_row_pads_on_leave() {
        let (tx, _rx) = mpsc::channel(4);
        let mut view = SettingsView::new(Duration::from_millis(1500));
        let press = |view: &mut SettingsView, code: KeyCode| {
            view.handle_key(KeyEvent::from(code), &tx)
        };
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Enter);
        assert!(view.is_editing());
        press(&mut view, KeyCode::Char('9'));
        press(&mut view, KeyCode::Esc);
        assert!(!view.is_editing());
        assert_eq!(view.form().report_hour, "09");
    }
}
