//! `RedactDesk` - review console for redacted email
//!
//! Built with Rust and the iced GUI framework over the review REST API.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod model;
mod style;
mod view;

use std::path::{Path, PathBuf};

use anyhow::Context;
use iced::keyboard::{self, Key};
use iced::widget::{column, row};
use iced::{Element, Length, Subscription, Task};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message::{
    DeleteMessage, FolderFormMessage, ForwardMessage, KeyboardAction, ListKind, ListMessage,
    Message, RuleFormMessage,
};
use model::{AppSettings, FolderChoice, ListScreen, MessagesScreen, Modal};
use redactdesk_core::columns::{folder_list, rule_list};
use redactdesk_core::{
    ApiConfig, CaseId, CreateFolderForm, CreateRuleForm, DeleteConfirmation, DeleteTarget, Drawer,
    FeatureSet, Folder, FolderId, ForwardMessageForm, MessageResource, Notification, Resources,
    Route, Rule, Shell, SubmitOutcome, nav_items,
};
use style::widgets::palette::ThemeMode;

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redactdesk=debug,redactdesk_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RedactDesk");

    iced::application(RedactDesk::new, RedactDesk::update, RedactDesk::view)
        .title("RedactDesk")
        .subscription(RedactDesk::subscription)
        .run()
}

/// Main application state.
struct RedactDesk {
    /// Route, banners, breadcrumbs and drawer.
    shell: Shell,
    /// Resource hooks, once connected.
    resources: Option<Resources>,
    /// Current theme mode (light/dark).
    theme_mode: ThemeMode,
    /// Folders listed in the sidebar.
    nav_folders: Vec<Folder>,
    /// Messages screen.
    messages: MessagesScreen,
    /// Folders table.
    folders: ListScreen<Folder>,
    /// Rules table.
    rules: ListScreen<Rule>,
    /// Create folder form.
    create_folder: CreateFolderForm,
    /// Create rule form.
    create_rule: CreateRuleForm,
    /// Open modal, if any.
    modal: Option<Modal>,
}

impl Default for RedactDesk {
    fn default() -> Self {
        Self {
            shell: Shell::default(),
            resources: None,
            theme_mode: ThemeMode::Light,
            nav_folders: Vec::new(),
            messages: MessagesScreen::default(),
            folders: ListScreen::new(folder_list()),
            rules: ListScreen::new(rule_list()),
            create_folder: CreateFolderForm::new(),
            create_rule: CreateRuleForm::new(),
            modal: None,
        }
    }
}

impl RedactDesk {
    /// Create new application instance.
    fn new() -> (Self, Task<Message>) {
        let app = Self::default();
        app.apply_theme();
        let settings_task = Task::perform(load_settings(), Message::SettingsLoaded);
        let connect_task = Task::perform(connect(), Message::Connected);
        (app, Task::batch([settings_task, connect_task]))
    }

    /// Applies the current theme mode to the global palette.
    fn apply_theme(&self) {
        style::widgets::palette::set_theme(self.theme_mode);
    }

    /// Update state based on message.
    #[allow(clippy::needless_pass_by_value)]
    #[allow(clippy::too_many_lines)] // Large match is idiomatic for Elm architecture
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Connected(Ok((resources, features))) => {
                info!("Connected (email features: {})", features.email);
                self.shell = Shell::new(features);
                self.resources = Some(resources);
                return Task::batch([self.load_nav_folders(false), self.load_route(false)]);
            }
            Message::Connected(Err(e)) => {
                error!("Failed to connect: {}", e);
                self.shell
                    .notify(Notification::error(format!("Not able to reach the API: {e}")));
            }
            Message::SettingsLoaded(Ok(settings)) => {
                self.theme_mode = settings.theme_mode;
                self.apply_theme();
            }
            Message::SettingsLoaded(Err(e)) => {
                warn!("Failed to load settings: {}", e);
            }
            Message::SettingsSaved(Ok(())) => {}
            Message::SettingsSaved(Err(e)) => {
                warn!("Failed to save settings: {}", e);
            }
            Message::ToggleTheme => {
                self.theme_mode = self.theme_mode.toggled();
                self.apply_theme();
                let settings = AppSettings {
                    theme_mode: self.theme_mode,
                };
                return Task::perform(save_settings(settings), Message::SettingsSaved);
            }

            Message::Navigate(route) => {
                debug!("Navigating to {}", route.path());
                self.shell.follow(route);
                return self.load_route(false);
            }
            Message::DismissNotifications => self.shell.notifications.dismiss(),
            Message::CloseDrawer => self.close_drawer(),
            Message::Refresh => return self.refresh(),
            Message::NavFoldersLoaded(Ok(folders)) => self.nav_folders = folders,
            Message::NavFoldersLoaded(Err(e)) => {
                warn!("Failed to load sidebar folders: {}", e);
            }

            Message::List(kind, list_message) => return self.update_list(kind, list_message),
            Message::MessagesLoaded(scope, result) => {
                if scope != self.messages.scope {
                    debug!("Discarding messages for stale scope {:?}", scope);
                    return Task::none();
                }
                if let Err(e) = self.messages.cards.finish_loading(result) {
                    warn!("Failed to load messages: {}", e);
                    self.shell
                        .notify(Notification::error("Not able to load messages"));
                }
            }
            Message::FolderHeaderLoaded(scope, folder) => {
                if scope == self.messages.scope {
                    let name = folder.as_ref().map(|f| f.name.clone());
                    self.messages.folder = folder;
                    if self.shell.route().folder().is_some() {
                        self.shell.set_breadcrumb_detail(name);
                    }
                }
            }
            Message::FoldersLoaded(result) => {
                if let Err(e) = self.folders.finish_loading(result) {
                    warn!("Failed to load folders: {}", e);
                    self.shell.notify(Notification::error("Not able to load folders"));
                }
            }
            Message::RulesLoaded(result) => {
                if let Err(e) = self.rules.finish_loading(result) {
                    warn!("Failed to load rules: {}", e);
                    self.shell.notify(Notification::error("Not able to load rules"));
                }
            }

            Message::MessageDetailLoaded(result) => {
                self.messages.detail_loading = false;
                match result {
                    Ok(detail) => {
                        let current = self.messages.selected_case();
                        if detail.as_ref().map(|m| &m.case_id) == current.as_ref() {
                            self.messages.detail = detail;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to load message: {}", e);
                        self.shell.notify(Notification::error("Not able to load message"));
                    }
                }
            }
            Message::Export => return self.export(),
            Message::Exported(result) => {
                self.messages.exporting = false;
                match result {
                    Ok(path) => {
                        info!("Exported messages to {:?}", path);
                        self.shell.notify(Notification::success(format!(
                            "Messages exported to {}",
                            path.display()
                        )));
                    }
                    Err(e) => {
                        error!("Export failed: {}", e);
                        self.shell
                            .notify(Notification::error("Not able to export messages"));
                    }
                }
            }
            Message::OpenLink(url) => {
                if let Err(e) = opener::open(&url) {
                    warn!("Failed to open {}: {}", url, e);
                }
            }

            Message::ToggleRule(id, enabled) => {
                let Some(resources) = &self.resources else {
                    return Task::none();
                };
                let rules = resources.rules.clone();
                return Task::perform(
                    async move { rules.toggle(&id, enabled).await.map_err(|e| e.to_string()) },
                    Message::RuleToggled,
                );
            }
            Message::RuleToggled(result) => {
                match result {
                    Ok(_) => self
                        .shell
                        .notify(Notification::success("Rule was updated successfully")),
                    Err(e) => {
                        error!("Error updating rule: {}", e);
                        self.shell.notify(Notification::error("Not able to update rule"));
                    }
                }
                return self.load_rules(false);
            }

            Message::CreateFolder(form_message) => return self.update_create_folder(form_message),
            Message::FolderCreated(result) => {
                let outcome = self.create_folder.settle(result);
                return self.apply_outcome(outcome);
            }
            Message::CreateRule(form_message) => return self.update_create_rule(form_message),
            Message::RuleCreated(result) => {
                let outcome = self.create_rule.settle(result);
                return self.apply_outcome(outcome);
            }

            Message::OpenForward => {
                if self.shell.features().email
                    && let Some(case_id) = self.messages.selected_case()
                {
                    self.modal = Some(Modal::Forward(ForwardMessageForm::new(case_id)));
                }
            }
            Message::Forward(forward_message) => return self.update_forward(forward_message),
            Message::Forwarded(result) => {
                if !matches!(self.modal, Some(Modal::Forward(_))) {
                    return Task::none();
                }
                if let Some(Modal::Forward(mut form)) = self.modal.take() {
                    let outcome = form.settle(result);
                    return Task::batch([
                        self.apply_outcome(outcome),
                        self.load_messages(false),
                    ]);
                }
            }
            Message::OpenDelete(kind) => {
                // Selection is reconciled against the next load, so wait for it.
                let target = match kind {
                    ListKind::Folders if !self.folders.loading => {
                        self.folders.selected().map(DeleteTarget::from)
                    }
                    ListKind::Rules if !self.rules.loading => {
                        self.rules.selected().map(DeleteTarget::from)
                    }
                    _ => None,
                };
                if let Some(target) = target {
                    self.modal = Some(Modal::Delete(DeleteConfirmation::new(target)));
                }
            }
            Message::Delete(delete_message) => return self.update_delete(delete_message),
            Message::Deleted(result) => {
                if !matches!(self.modal, Some(Modal::Delete(_))) {
                    return Task::none();
                }
                if let Some(Modal::Delete(mut confirmation)) = self.modal.take() {
                    let reload = match confirmation.target() {
                        DeleteTarget::Folder { .. } => {
                            self.folders.list.clear_selection();
                            self.load_folders(false)
                        }
                        DeleteTarget::Rule { .. } => {
                            self.rules.list.clear_selection();
                            self.load_rules(false)
                        }
                    };
                    let outcome = confirmation.settle(result);
                    return Task::batch([self.apply_outcome(outcome), reload]);
                }
            }

            Message::KeyPressed(action) => return self.handle_keyboard_action(action),
            Message::Ignored => {}
        }
        Task::none()
    }

    fn update_list(&mut self, kind: ListKind, message: ListMessage) -> Task<Message> {
        match kind {
            ListKind::Messages => {
                if self.messages.cards.update(message) {
                    return self.message_selected();
                }
            }
            ListKind::Folders => {
                self.folders.update(message);
            }
            ListKind::Rules => {
                self.rules.update(message);
            }
        }
        Task::none()
    }

    fn message_selected(&mut self) -> Task<Message> {
        let Some(case_id) = self.messages.selected_case() else {
            self.close_drawer();
            return Task::none();
        };
        self.shell.set_active_drawer(Drawer::MessageDetail);
        let Some(resources) = &self.resources else {
            return Task::none();
        };
        self.messages.detail = None;
        self.messages.detail_loading = true;
        let messages = resources.messages.clone();
        Task::perform(
            async move {
                messages
                    .get(Some(&case_id))
                    .await
                    .map_err(|e| e.to_string())
            },
            Message::MessageDetailLoaded,
        )
    }

    fn close_drawer(&mut self) {
        self.shell.close_drawer();
        self.messages.cards.list.clear_selection();
        self.messages.detail = None;
        self.messages.detail_loading = false;
    }

    fn export(&mut self) -> Task<Message> {
        if !self.messages.can_export() {
            return Task::none();
        }
        let Some(resources) = &self.resources else {
            return Task::none();
        };
        let ids = self.messages.export_ids();
        info!("Exporting {} messages", ids.len());
        self.messages.exporting = true;
        Task::perform(
            export_messages(resources.messages.clone(), ids),
            Message::Exported,
        )
    }

    fn update_create_folder(&mut self, message: FolderFormMessage) -> Task<Message> {
        let form = &mut self.create_folder;
        match message {
            FolderFormMessage::NameChanged(name) => {
                form.name = name;
                if !form.errors().is_empty() {
                    form.revalidate();
                }
            }
            FolderFormMessage::DescriptionChanged(description) => form.description = description,
            FolderFormMessage::Submit => {
                let (Some(payload), Some(resources)) = (form.submit(), &self.resources) else {
                    return Task::none();
                };
                let folders = resources.folders.clone();
                return Task::perform(
                    async move { folders.create(&payload).await.map_err(|e| e.to_string()) },
                    Message::FolderCreated,
                );
            }
            FolderFormMessage::Cancel => {
                self.create_folder = CreateFolderForm::new();
                self.shell.follow(Route::Folders);
                return self.load_route(false);
            }
        }
        Task::none()
    }

    fn update_create_rule(&mut self, message: RuleFormMessage) -> Task<Message> {
        let form = &mut self.create_rule;
        match message {
            RuleFormMessage::DescriptionChanged(description) => form.description = description,
            RuleFormMessage::FolderChosen(choice) => form.folder_id = choice.id.to_string(),
            RuleFormMessage::AddLineItem => form.add_line_item(),
            RuleFormMessage::RemoveLineItem(index) => form.remove_line_item(index),
            RuleFormMessage::FieldChosen(index, field) => form.set_field(index, field),
            RuleFormMessage::ConditionChosen(index, condition) => {
                form.set_condition(index, condition);
            }
            RuleFormMessage::ValueChanged(index, value) => form.set_value(index, value),
            RuleFormMessage::StartChanged(start) => form.date_range.start = start,
            RuleFormMessage::EndChanged(end) => form.date_range.end = end,
            RuleFormMessage::Submit => {
                let (Some(payload), Some(resources)) = (form.submit(), &self.resources) else {
                    return Task::none();
                };
                let rules = resources.rules.clone();
                return Task::perform(
                    async move { rules.create(&payload).await.map_err(|e| e.to_string()) },
                    Message::RuleCreated,
                );
            }
            RuleFormMessage::Cancel => {
                self.create_rule = CreateRuleForm::new();
                self.shell.follow(Route::Rules);
                return self.load_route(false);
            }
        }
        if !self.create_rule.errors().is_empty() {
            self.create_rule.revalidate();
        }
        Task::none()
    }

    fn update_forward(&mut self, message: ForwardMessage) -> Task<Message> {
        let Some(Modal::Forward(form)) = &mut self.modal else {
            return Task::none();
        };
        match message {
            ForwardMessage::InputChanged(input) => form.set_input(input),
            ForwardMessage::CommitInput => {
                form.commit_input();
            }
            ForwardMessage::RemoveRecipient(index) => form.remove_token(index),
            ForwardMessage::Submit => {
                let (Some(request), Some(resources)) = (form.submit(), &self.resources) else {
                    return Task::none();
                };
                let messages = resources.messages.clone();
                return Task::perform(
                    async move {
                        messages
                            .forward(&request.case_id, request.emails)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::Forwarded,
                );
            }
            ForwardMessage::Cancel => {
                if !form.phase().is_pending() {
                    self.modal = None;
                }
            }
        }
        Task::none()
    }

    fn update_delete(&mut self, message: DeleteMessage) -> Task<Message> {
        let Some(Modal::Delete(confirmation)) = &mut self.modal else {
            return Task::none();
        };
        match message {
            DeleteMessage::ConfirmChanged(text) => confirmation.confirm = text,
            DeleteMessage::Submit => {
                let (Some(target), Some(resources)) = (confirmation.submit(), &self.resources)
                else {
                    return Task::none();
                };
                return match target {
                    DeleteTarget::Folder { id, .. } => {
                        let folders = resources.folders.clone();
                        Task::perform(
                            async move { folders.delete(&id).await.map_err(|e| e.to_string()) },
                            Message::Deleted,
                        )
                    }
                    DeleteTarget::Rule { id, .. } => {
                        let rules = resources.rules.clone();
                        Task::perform(
                            async move { rules.delete(&id).await.map_err(|e| e.to_string()) },
                            Message::Deleted,
                        )
                    }
                };
            }
            DeleteMessage::Cancel => {
                if !confirmation.phase().is_pending() {
                    self.modal = None;
                }
            }
        }
        Task::none()
    }

    /// Applies a settled submission and loads whatever it made stale.
    fn apply_outcome(&mut self, outcome: SubmitOutcome) -> Task<Message> {
        let before = self.shell.route().clone();
        outcome.apply(&mut self.shell);

        let mut tasks = Vec::new();
        if *self.shell.route() != before {
            tasks.push(self.load_route(false));
        }
        if self.shell.take_folder_refetch() {
            tasks.push(self.load_nav_folders(false));
        }
        Task::batch(tasks)
    }

    fn handle_keyboard_action(&mut self, action: KeyboardAction) -> Task<Message> {
        match action {
            KeyboardAction::Refresh => return self.refresh(),
            KeyboardAction::Close => {
                match self.modal {
                    Some(Modal::Forward(_)) => return self.update_forward(ForwardMessage::Cancel),
                    Some(Modal::Delete(_)) => return self.update_delete(DeleteMessage::Cancel),
                    None => {}
                }
                if self.shell.active_drawer().is_some() {
                    self.close_drawer();
                }
            }
        }
        Task::none()
    }

    /// Reloads the active screen, bypassing the cache.
    fn refresh(&mut self) -> Task<Message> {
        match self.shell.route() {
            Route::Home | Route::Messages { .. } => self.load_messages(true),
            Route::Folders => self.load_folders(true),
            Route::Rules => self.load_rules(true),
            Route::CreateFolder | Route::CreateRule => Task::none(),
        }
    }

    /// Loads what the current route shows.
    fn load_route(&mut self, force: bool) -> Task<Message> {
        if !self.shell.route().is_messages() {
            self.close_drawer();
        }
        match self.shell.route().clone() {
            Route::Home | Route::Messages { .. } => {
                let scope = self.shell.route().folder().cloned();
                if self.messages.enter(scope.clone()) {
                    self.shell.close_drawer();
                }
                if let Some(name) = self.messages.folder.as_ref().map(|f| f.name.clone()) {
                    self.shell.set_breadcrumb_detail(Some(name));
                }
                let header = self.load_folder_header(scope);
                Task::batch([self.load_messages(force), header])
            }
            Route::Folders => self.load_folders(force),
            Route::Rules => self.load_rules(force),
            Route::CreateFolder => {
                self.create_folder = CreateFolderForm::new();
                Task::none()
            }
            Route::CreateRule => {
                self.create_rule = CreateRuleForm::new();
                self.load_nav_folders(false)
            }
        }
    }

    fn load_messages(&mut self, force: bool) -> Task<Message> {
        let Some(resources) = &self.resources else {
            return Task::none();
        };
        self.messages.cards.start_loading();
        let messages = resources.messages.clone();
        let scope = self.messages.scope.clone();
        let reply_scope = scope.clone();
        Task::perform(
            async move {
                let result = if force {
                    messages.refetch(scope.as_ref()).await
                } else {
                    messages.list(scope.as_ref()).await
                };
                result.map_err(|e| e.to_string())
            },
            move |result| Message::MessagesLoaded(reply_scope, result),
        )
    }

    fn load_folder_header(&self, scope: Option<FolderId>) -> Task<Message> {
        let (Some(resources), Some(id)) = (&self.resources, scope) else {
            return Task::none();
        };
        let folders = resources.folders.clone();
        let reply_scope = Some(id.clone());
        Task::perform(
            async move { folders.get(Some(&id)).await },
            move |folder| Message::FolderHeaderLoaded(reply_scope, folder),
        )
    }

    fn load_folders(&mut self, force: bool) -> Task<Message> {
        let Some(resources) = &self.resources else {
            return Task::none();
        };
        self.folders.start_loading();
        let folders = resources.folders.clone();
        Task::perform(
            async move {
                let result = if force {
                    folders.refetch().await
                } else {
                    folders.list().await
                };
                result.map_err(|e| e.to_string())
            },
            Message::FoldersLoaded,
        )
    }

    fn load_rules(&mut self, force: bool) -> Task<Message> {
        let Some(resources) = &self.resources else {
            return Task::none();
        };
        self.rules.start_loading();
        let rules = resources.rules.clone();
        Task::perform(
            async move {
                let result = if force {
                    rules.refetch().await
                } else {
                    rules.list().await
                };
                result.map_err(|e| e.to_string())
            },
            Message::RulesLoaded,
        )
    }

    fn load_nav_folders(&self, force: bool) -> Task<Message> {
        let Some(resources) = &self.resources else {
            return Task::none();
        };
        let folders = resources.folders.clone();
        Task::perform(
            async move {
                let result = if force {
                    folders.refetch().await
                } else {
                    folders.list().await
                };
                result.map_err(|e| e.to_string())
            },
            Message::NavFoldersLoaded,
        )
    }

    /// Render the view.
    fn view(&self) -> Element<'_, Message> {
        let route = self.shell.route();
        let features = self.shell.features();

        let screen: Element<'_, Message> = match route {
            Route::Home | Route::Messages { .. } => view::view_messages(&self.messages, features),
            Route::Folders => view::view_folders(&self.folders),
            Route::Rules => view::view_rules(&self.rules, features),
            Route::CreateFolder => view::view_create_folder(&self.create_folder),
            Route::CreateRule => view::view_create_rule(
                &self.create_rule,
                self.nav_folders.iter().map(FolderChoice::from).collect(),
            ),
        };

        let mut main = row![screen].height(Length::Fill);
        if route.is_messages() && self.shell.active_drawer() == Some(Drawer::MessageDetail) {
            main = main.push(view::view_message_drawer(&self.messages));
        }

        let body = column![view::view_notifications(&self.shell.notifications), main]
            .width(Length::Fill)
            .height(Length::Fill);

        let content: Element<'_, Message> = column![
            view::view_header(self.shell.breadcrumbs(), self.theme_mode),
            row![view::view_sidebar(nav_items(&self.nav_folders), route), body]
                .height(Length::Fill),
        ]
        .into();

        match &self.modal {
            Some(Modal::Forward(form)) => view::view_overlay(
                content,
                view::view_forward_modal(form),
                Message::Forward(ForwardMessage::Cancel),
            ),
            Some(Modal::Delete(confirmation)) => view::view_overlay(
                content,
                view::view_delete_modal(confirmation),
                Message::Delete(DeleteMessage::Cancel),
            ),
            None => content,
        }
    }

    /// Subscribe to keyboard events.
    fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().map(|event| {
            if let keyboard::Event::KeyPressed { key, .. } = event {
                handle_key_press(&key).unwrap_or(Message::Ignored)
            } else {
                Message::Ignored
            }
        })
    }
}

/// Maps a key press to a keyboard action.
fn handle_key_press(key: &Key) -> Option<Message> {
    match key {
        Key::Named(keyboard::key::Named::F5) => Some(Message::KeyPressed(KeyboardAction::Refresh)),
        Key::Named(keyboard::key::Named::Escape) => {
            Some(Message::KeyPressed(KeyboardAction::Close))
        }
        _ => None,
    }
}

fn settings_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("redactdesk")
}

/// Load application settings from disk.
async fn load_settings() -> Result<AppSettings, String> {
    read_settings(&settings_dir().join("settings.json")).await
}

async fn read_settings(settings_path: &Path) -> Result<AppSettings, String> {
    if !settings_path.exists() {
        return Ok(AppSettings::default());
    }

    let contents = tokio::fs::read_to_string(settings_path)
        .await
        .map_err(|e| e.to_string())?;

    serde_json::from_str(&contents).map_err(|e| e.to_string())
}

/// Save application settings to disk.
async fn save_settings(settings: AppSettings) -> Result<(), String> {
    write_settings(&settings_dir(), &settings).await
}

async fn write_settings(config_dir: &Path, settings: &AppSettings) -> Result<(), String> {
    tokio::fs::create_dir_all(config_dir)
        .await
        .map_err(|e| e.to_string())?;

    let settings_path = config_dir.join("settings.json");
    let contents = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;

    tokio::fs::write(&settings_path, contents)
        .await
        .map_err(|e| e.to_string())?;

    info!("Settings saved to {:?}", settings_path);
    Ok(())
}

/// Loads the API config, resolves the session token and builds the hooks.
async fn connect() -> Result<(Resources, FeatureSet), String> {
    try_connect().await.map_err(|e| format!("{e:#}"))
}

async fn try_connect() -> anyhow::Result<(Resources, FeatureSet)> {
    let config = ApiConfig::load().await.context("loading API config")?;

    let token_config = config.clone();
    let token = tokio::task::spawn_blocking(move || {
        redactdesk_core::credentials::session_token(&token_config)
    })
    .await
    .context("keyring task failed")?
    .context("reading session token")?;

    let resources = Resources::from_config(&config, token).context("building API client")?;
    Ok((resources, config.features))
}

/// Exports messages as CSV into the downloads directory.
async fn export_messages(messages: MessageResource, ids: Vec<CaseId>) -> Result<PathBuf, String> {
    let file = messages.export(&ids).await.map_err(|e| e.to_string())?;
    let dir = dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let path = file.save_to(&dir).await.map_err(|e| e.to_string())?;

    let shown = path.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || notify_export(&shown)).await {
        warn!("Export notification task failed: {}", e);
    }
    Ok(path)
}

/// Raises a desktop notification for a finished export.
fn notify_export(path: &Path) {
    let result = notify_rust::Notification::new()
        .appname("RedactDesk")
        .summary("Export complete")
        .body(&path.display().to_string())
        .show();
    if let Err(e) = result {
        warn!("Failed to show export notification: {}", e);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use redactdesk_core::{EmailMessage, NotificationKind};

    fn message(id: &str) -> EmailMessage {
        EmailMessage {
            case_id: CaseId::new(id),
            email_subject: format!("Subject {id}"),
            ..EmailMessage::default()
        }
    }

    fn folder(id: &str, name: &str) -> Folder {
        Folder {
            id: FolderId::new(id),
            name: name.to_string(),
            ..Folder::default()
        }
    }

    #[test]
    fn test_f5_and_escape_are_bound() {
        assert!(matches!(
            handle_key_press(&Key::Named(keyboard::key::Named::F5)),
            Some(Message::KeyPressed(KeyboardAction::Refresh))
        ));
        assert!(matches!(
            handle_key_press(&Key::Named(keyboard::key::Named::Escape)),
            Some(Message::KeyPressed(KeyboardAction::Close))
        ));
        assert!(handle_key_press(&Key::Named(keyboard::key::Named::Tab)).is_none());
    }

    #[test]
    fn test_stale_message_list_is_discarded() {
        let mut app = RedactDesk::default();
        app.messages.enter(Some(FolderId::new("claims")));

        let _ = app.update(Message::MessagesLoaded(None, Ok(vec![message("1")])));
        assert!(app.messages.cards.records.is_empty());

        let _ = app.update(Message::MessagesLoaded(
            Some(FolderId::new("claims")),
            Ok(vec![message("1"), message("2")]),
        ));
        assert_eq!(app.messages.cards.records.len(), 2);
    }

    #[test]
    fn test_failed_reload_keeps_rows_and_raises_banner() {
        let mut app = RedactDesk::default();
        let _ = app.update(Message::FoldersLoaded(Ok(vec![
            folder("general_inbox", "General Inbox"),
            folder("f1", "Claims"),
        ])));
        let _ = app.update(Message::FoldersLoaded(Err("timed out".to_string())));

        assert_eq!(app.folders.records.len(), 2);
        let banners = app.shell.notifications.items();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].kind, NotificationKind::Error);
    }

    #[test]
    fn test_escape_closes_modal_before_drawer() {
        let mut app = RedactDesk::default();
        app.shell.set_active_drawer(Drawer::MessageDetail);
        app.modal = Some(Modal::Delete(DeleteConfirmation::new(DeleteTarget::from(
            &folder("f1", "Claims"),
        ))));

        let _ = app.update(Message::KeyPressed(KeyboardAction::Close));
        assert!(app.modal.is_none());
        assert_eq!(app.shell.active_drawer(), Some(Drawer::MessageDetail));

        let _ = app.update(Message::KeyPressed(KeyboardAction::Close));
        assert!(app.shell.active_drawer().is_none());
    }

    #[test]
    fn test_navigation_dismisses_banners() {
        let mut app = RedactDesk::default();
        app.shell.notify(Notification::error("Not able to load rules"));

        let _ = app.update(Message::Navigate(Route::Folders));
        assert!(app.shell.notifications.is_empty());
        assert_eq!(app.shell.route(), &Route::Folders);
    }

    #[test]
    fn test_forward_needs_email_feature_and_selection() {
        let mut app = RedactDesk::default();
        let _ = app.update(Message::MessagesLoaded(None, Ok(vec![message("7")])));
        let _ = app.update(Message::List(
            ListKind::Messages,
            ListMessage::Select("7".to_string()),
        ));
        let _ = app.update(Message::OpenForward);
        assert!(app.modal.is_none());

        app.shell = Shell::new(FeatureSet { email: true });
        let _ = app.update(Message::OpenForward);
        assert!(matches!(app.modal, Some(Modal::Forward(_))));
    }

    #[test]
    fn test_forward_modal_stays_open_until_settled() {
        let mut app = RedactDesk::default();
        app.modal = Some(Modal::Forward(ForwardMessageForm::new(CaseId::new("7"))));
        let _ = app.update(Message::Forward(ForwardMessage::InputChanged(
            "a@example.com".to_string(),
        )));
        let _ = app.update(Message::Forward(ForwardMessage::Submit));

        let _ = app.update(Message::KeyPressed(KeyboardAction::Close));
        let _ = app.update(Message::Forward(ForwardMessage::Cancel));
        assert!(matches!(app.modal, Some(Modal::Forward(_))));

        let _ = app.update(Message::Forwarded(Err("502".to_string())));
        assert!(app.modal.is_none());
        let banners = app.shell.notifications.items();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].kind, NotificationKind::Error);
    }

    #[test]
    fn test_delete_waits_for_reload() {
        let mut app = RedactDesk::default();
        let _ = app.update(Message::FoldersLoaded(Ok(vec![
            folder("general_inbox", "General Inbox"),
            folder("f1", "Claims"),
        ])));
        let _ = app.update(Message::List(
            ListKind::Folders,
            ListMessage::Select("f1".to_string()),
        ));
        assert!(app.folders.selected().is_some());

        app.folders.start_loading();
        let _ = app.update(Message::OpenDelete(ListKind::Folders));
        assert!(app.modal.is_none());

        let _ = app.update(Message::FoldersLoaded(Ok(vec![folder("f1", "Claims")])));
        let _ = app.update(Message::OpenDelete(ListKind::Folders));
        assert!(matches!(app.modal, Some(Modal::Delete(_))));
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let dir =
            std::env::temp_dir().join(format!("redactdesk-settings-{}", std::process::id()));
        let settings = AppSettings {
            theme_mode: ThemeMode::Dark,
        };

        write_settings(&dir, &settings).await.unwrap();
        let loaded = read_settings(&dir.join("settings.json")).await.unwrap();
        assert_eq!(loaded.theme_mode, ThemeMode::Dark);

        let missing = read_settings(&dir.join("missing.json")).await.unwrap();
        assert_eq!(missing.theme_mode, ThemeMode::Light);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
