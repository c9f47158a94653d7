use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::FieldError;
use crate::models::{ConfigRequest, ConfigurationPath, FieldId, FieldKind, FieldRecord, TreeItem};
use crate::render::render;
use crate::resolver::form_fields;
use crate::system::{generate_password, set_clipboard};
use crate::tree::build_tree_items;
use crate::validate::{field_error, is_valid};

const DOUBLE_CLICK_MS: u128 = 400;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum View {
    List,
    Editor,
}

#[derive(Clone, Debug)]
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) since: Instant,
}

/// One open form: the selected path and everything typed for it.
#[derive(Clone, Debug)]
pub(crate) struct EditorState {
    pub(crate) path: ConfigurationPath,
    pub(crate) record: FieldRecord,
    pub(crate) valid: bool,
    pub(crate) output: Option<String>,
    pub(crate) copied_at: Option<Instant>,
    pub(crate) active_field: usize,
    pub(crate) field_scroll: usize,
    pub(crate) status: Option<StatusMessage>,
}

#[derive(Clone, Debug)]
pub(crate) struct App {
    pub(crate) settings: Settings,
    pub(crate) tree_items: Vec<TreeItem>,
    pub(crate) list_state: ListState,
    pub(crate) list_scroll: usize,
    pub(crate) view: View,
    pub(crate) editor: Option<EditorState>,
    pub(crate) last_click: Option<(usize, Instant)>,
    pub(crate) tree_area: Rect,
    pub(crate) should_quit: bool,
    pub(crate) list_status: Option<StatusMessage>,
}

impl App {
    pub(crate) fn new(settings: Settings) -> Self {
        let tree_items = build_tree_items(&ConfigurationPath::ALL);
        let mut list_state = ListState::default();
        if !tree_items.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            settings,
            tree_items,
            list_state,
            list_scroll: 0,
            view: View::List,
            editor: None,
            last_click: None,
            tree_area: Rect::default(),
            should_quit: false,
            list_status: None,
        }
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.view {
            View::List => self.on_key_list(key),
            View::Editor => self.on_key_editor(key),
        }
    }

    pub(crate) fn on_mouse(&mut self, mouse: MouseEvent) {
        match self.view {
            View::List => self.on_mouse_list(mouse),
            View::Editor => {}
        }
    }

    /// Makes `path` the current form. Any other path starts from an empty record.
    pub(crate) fn open_path(&mut self, path: ConfigurationPath) {
        let same_path = self.editor.as_ref().is_some_and(|editor| editor.path == path);
        if !same_path {
            if let Some(previous) = self.editor.as_ref().filter(|e| !e.record.is_empty()) {
                debug!(from = %previous.path.title(), "discarding entered values");
            }
            info!(path = %path.title(), "configuration path selected");
            self.editor = Some(EditorState::new(path));
        }
        self.view = View::Editor;
    }

    pub(crate) fn set_list_status(&mut self, text: &str) {
        self.list_status = Some(StatusMessage {
            text: text.to_string(),
            since: Instant::now(),
        });
    }

    fn on_key_list(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_list(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_list(-1),
            KeyCode::Enter => self.open_selected(),
            _ => {}
        }
    }

    fn on_mouse_list(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(index) = self.index_from_mouse(mouse) {
            self.list_state.select(Some(index));
            let now = Instant::now();
            if let Some((last_index, last_time)) = self.last_click {
                if last_index == index && last_time.elapsed().as_millis() <= DOUBLE_CLICK_MS {
                    self.open_selected();
                }
            }
            self.last_click = Some((index, now));
        }
    }

    fn on_key_editor(&mut self, key: KeyEvent) {
        let password_length = self.settings.password_length;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let control = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.view = View::List,
            KeyCode::Tab | KeyCode::Down => editor.next_field(),
            KeyCode::BackTab | KeyCode::Up => editor.prev_field(),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Enter => editor.enter(),
            KeyCode::Left | KeyCode::Right => editor.toggle_active(),
            KeyCode::F(2) => editor.generate(),
            KeyCode::F(5) => editor.regenerate_password(password_length),
            KeyCode::Char('g') if control => editor.generate(),
            KeyCode::Char('c') if control => editor.copy_output(),
            KeyCode::Char('r') if control => editor.regenerate_password(password_length),
            KeyCode::Char(' ') if editor.active_kind() == Some(FieldKind::Toggle) => {
                editor.toggle_active();
            }
            KeyCode::Char(ch) if !control => editor.push_char(ch),
            _ => {}
        }
    }

    fn move_list(&mut self, delta: isize) {
        let len = self.tree_items.len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
        self.list_state.select(Some(next));
    }

    fn open_selected(&mut self) {
        let path = self
            .list_state
            .selected()
            .and_then(|index| self.tree_items.get(index))
            .and_then(|item| item.path);
        if let Some(path) = path {
            self.open_path(path);
        }
    }

    fn index_from_mouse(&self, mouse: MouseEvent) -> Option<usize> {
        let area = self.tree_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if mouse.column < area.x
            || mouse.column >= area.x + area.width
            || mouse.row < area.y
            || mouse.row >= area.y + area.height
        {
            return None;
        }
        let index = self.list_scroll + (mouse.row - area.y) as usize;
        (index < self.tree_items.len()).then_some(index)
    }
}

impl EditorState {
    pub(crate) fn new(path: ConfigurationPath) -> Self {
        Self {
            path,
            record: FieldRecord::default(),
            valid: false,
            output: None,
            copied_at: None,
            active_field: 0,
            field_scroll: 0,
            status: None,
        }
    }

    pub(crate) fn fields(&self) -> Vec<FieldId> {
        form_fields(&self.path, &self.record)
    }

    pub(crate) fn active_id(&self) -> Option<FieldId> {
        self.fields().get(self.active_field).copied()
    }

    fn active_kind(&self) -> Option<FieldKind> {
        self.active_id().map(|id| id.kind())
    }

    pub(crate) fn field_error(&self, id: FieldId) -> Option<FieldError> {
        field_error(&self.path, id, self.record.get(id))
    }

    pub(crate) fn is_copied(&self, ack: Duration) -> bool {
        self.copied_at.is_some_and(|since| since.elapsed() <= ack)
    }

    /// Single write path into the record; validity follows every edit.
    pub(crate) fn set_field(&mut self, id: FieldId, value: impl Into<String>) {
        self.record.set(id, value);
        self.valid = is_valid(&self.path, &self.record);
        let count = self.fields().len();
        if self.active_field >= count {
            self.active_field = count.saturating_sub(1);
        }
    }

    fn next_field(&mut self) {
        let count = self.fields().len();
        if count == 0 {
            return;
        }
        self.active_field = (self.active_field + 1) % count;
    }

    fn prev_field(&mut self) {
        let count = self.fields().len();
        if count == 0 {
            return;
        }
        self.active_field = if self.active_field == 0 {
            count - 1
        } else {
            self.active_field - 1
        };
    }

    fn push_char(&mut self, ch: char) {
        let Some(id) = self.active_id() else {
            return;
        };
        if id.kind() == FieldKind::Toggle {
            return;
        }
        let mut value = self.record.get(id).to_string();
        value.push(ch);
        self.set_field(id, value);
    }

    fn backspace(&mut self) {
        let Some(id) = self.active_id() else {
            return;
        };
        if id.kind() == FieldKind::Toggle {
            return;
        }
        let mut value = self.record.get(id).to_string();
        value.pop();
        self.set_field(id, value);
    }

    fn enter(&mut self) {
        match self.active_kind() {
            Some(FieldKind::MultiLine) => self.push_char('\n'),
            Some(_) => self.next_field(),
            None => {}
        }
    }

    fn toggle_active(&mut self) {
        let Some(id) = self.active_id().filter(|id| id.kind() == FieldKind::Toggle) else {
            return;
        };
        let next = if self.record.is_true(id) { "false" } else { "true" };
        self.set_field(id, next);
    }

    pub(crate) fn generate(&mut self) {
        match ConfigRequest::from_record(&self.path, &self.record) {
            Ok(request) => {
                let output = render(&request);
                info!(path = %self.path.title(), bytes = output.len(), "configuration generated");
                self.output = Some(output);
                self.copied_at = None;
                self.set_status("Configuration générée");
            }
            Err(err) => {
                debug!(field = err.field.key(), error = %err.error, "generation refused");
                self.set_status(&err.to_string());
            }
        }
    }

    fn copy_output(&mut self) {
        let Some(output) = self.output.as_deref() else {
            self.set_status("Aucune configuration générée");
            return;
        };
        match set_clipboard(output) {
            Ok(()) => {
                info!(bytes = output.len(), "configuration copied to clipboard");
                self.copied_at = Some(Instant::now());
            }
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                self.set_status(&err.to_string());
            }
        }
    }

    pub(crate) fn regenerate_password(&mut self, length: usize) {
        if !self.fields().contains(&FieldId::Password) {
            return;
        }
        self.set_field(FieldId::Password, generate_password(length));
        debug!(length, "password regenerated");
        self.set_status("Nouveau mot de passe généré");
    }

    fn set_status(&mut self, text: &str) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            since: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AxioneSubType, FtthProvider, WanlinkKind};

    const ORANGE: ConfigurationPath =
        ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Orange));
    const IFT: ConfigurationPath = ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Ift));

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.on_key(key(KeyCode::Char(ch)));
        }
    }

    fn fill_orange(editor: &mut EditorState) {
        editor.set_field(FieldId::IpAddress, "10.0.0.1");
        editor.set_field(FieldId::PppoeUsername, "WL-000001@ipvpn.tims.oc");
        editor.set_field(FieldId::Password, "secret");
        editor.set_field(FieldId::SiteName, "Site A");
    }

    #[test]
    fn switching_path_resets_record_and_output() {
        let mut app = App::new(Settings::default());
        app.open_path(ORANGE);
        let editor = app.editor.as_mut().unwrap();
        fill_orange(editor);
        editor.generate();
        assert!(editor.output.is_some());

        app.open_path(ConfigurationPath::Wanlink(WanlinkKind::Ftth(
            FtthProvider::Axione(AxioneSubType::Pro),
        )));
        let editor = app.editor.as_ref().unwrap();
        assert!(editor.record.is_empty());
        assert!(editor.output.is_none());
        assert!(!editor.valid);
    }

    #[test]
    fn axione_sub_type_switch_also_resets() {
        let mut app = App::new(Settings::default());
        let pro = ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Axione(
            AxioneSubType::Pro,
        )));
        let opera = ConfigurationPath::Wanlink(WanlinkKind::Ftth(FtthProvider::Axione(
            AxioneSubType::Opera,
        )));
        app.open_path(pro);
        app.editor.as_mut().unwrap().set_field(FieldId::WlId, "WL-123456");
        app.open_path(opera);
        assert!(app.editor.as_ref().unwrap().record.is_empty());
    }

    #[test]
    fn reopening_same_path_keeps_the_form() {
        let mut app = App::new(Settings::default());
        app.open_path(ORANGE);
        app.editor.as_mut().unwrap().set_field(FieldId::SiteName, "Site A");
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.view, View::List);

        app.open_path(ORANGE);
        assert_eq!(app.view, View::Editor);
        assert_eq!(
            app.editor.as_ref().unwrap().record.get(FieldId::SiteName),
            "Site A"
        );
    }

    #[test]
    fn validity_tracks_every_edit() {
        let mut editor = EditorState::new(ORANGE);
        fill_orange(&mut editor);
        assert!(editor.valid);

        editor.set_field(FieldId::IpAddress, "10.0.0.256");
        assert!(!editor.valid);
    }

    #[test]
    fn generate_is_refused_while_invalid() {
        let mut editor = EditorState::new(ORANGE);
        editor.set_field(FieldId::IpAddress, "10.0.0.1");
        editor.generate();
        assert!(editor.output.is_none());
        assert!(editor.status.is_some());

        fill_orange(&mut editor);
        editor.generate();
        assert_eq!(
            editor.output.as_deref(),
            Some(
                "/user-manager/user add attributes=Framed-IP-Address:10.0.0.1 comment=\"Site A\" group=tims.oc name=WL-000001@ipvpn.tims.oc password=secret"
            )
        );
    }

    #[test]
    fn typing_goes_to_the_active_field() {
        let mut app = App::new(Settings::default());
        app.open_path(ORANGE);
        type_text(&mut app, "10.0.0.1");
        app.on_key(key(KeyCode::Tab));
        type_text(&mut app, "user");
        app.on_key(key(KeyCode::Backspace));

        let editor = app.editor.as_ref().unwrap();
        assert_eq!(editor.record.get(FieldId::IpAddress), "10.0.0.1");
        assert_eq!(editor.record.get(FieldId::PppoeUsername), "use");
    }

    #[test]
    fn vrf_toggle_grows_and_shrinks_the_form() {
        let mut editor = EditorState::new(IFT);
        editor.active_field = 4;
        assert_eq!(editor.active_id(), Some(FieldId::IsVrf));

        editor.toggle_active();
        assert!(editor.record.is_true(FieldId::IsVrf));
        assert_eq!(editor.fields().len(), 6);

        editor.active_field = 5;
        editor.set_field(FieldId::Trigramme, "ABC");
        editor.set_field(FieldId::IsVrf, "false");
        assert_eq!(editor.fields().len(), 5);
        assert_eq!(editor.active_field, 4);
    }

    #[test]
    fn ift_output_follows_vrf_choice() {
        let mut editor = EditorState::new(IFT);
        editor.set_field(FieldId::WlId, "WL-123456");
        editor.set_field(FieldId::SiteName, "Site");
        editor.set_field(FieldId::IpAddress, "1.2.3.4");
        editor.set_field(FieldId::Svlan, "42");
        editor.set_field(FieldId::IsVrf, "true");
        assert!(!editor.valid);

        editor.set_field(FieldId::IsVrf, "false");
        assert!(editor.valid);
        editor.generate();
        assert!(!editor.output.as_deref().unwrap().contains("IFL-"));
    }

    #[test]
    fn sbc_numbers_take_newlines() {
        let mut app = App::new(Settings::default());
        app.open_path(ConfigurationPath::Sbc);
        type_text(&mut app, "0130173401");
        app.on_key(key(KeyCode::Enter));
        type_text(&mut app, "0130173402");

        let editor = app.editor.as_ref().unwrap();
        assert_eq!(editor.record.get(FieldId::Numbers), "0130173401\n0130173402");
    }

    #[test]
    fn password_regeneration_only_where_relevant() {
        let mut editor = EditorState::new(ORANGE);
        editor.regenerate_password(20);
        let password = editor.record.get(FieldId::Password);
        assert_eq!(password.len(), 20);
        assert!(password.chars().all(|ch| ch.is_ascii_alphanumeric()));

        let mut sbc = EditorState::new(ConfigurationPath::Sbc);
        sbc.regenerate_password(20);
        assert!(sbc.record.is_empty());
    }

    #[test]
    fn list_enter_opens_only_leaves() {
        let mut app = App::new(Settings::default());
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.view, View::List);

        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.view, View::Editor);
        assert_eq!(app.editor.as_ref().unwrap().path, ORANGE);
    }
}
