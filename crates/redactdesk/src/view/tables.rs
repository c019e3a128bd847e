//! Folders and rules tables.

use iced::widget::{column, container, scrollable};
use iced::{Element, Length};

use redactdesk_core::columns::TOGGLE_RULE_ACTION;
use redactdesk_core::{FeatureSet, Folder, Route, Rule};
use redactdesk_table::Record;

use super::list::{
    ActionHandler, toolbar_button, view_controls, view_placeholder, view_table, view_title,
};
use crate::message::{ListKind, Message};
use crate::model::ListScreen;
use crate::style::widgets::{page_style, scrollable_style};

/// Renders the folders table.
pub fn view_folders(screen: &ListScreen<Folder>) -> Element<'_, Message> {
    let actions = vec![
        toolbar_button("\u{21BB} Refresh", Some(Message::Refresh), false),
        toolbar_button(
            "Delete",
            screen
                .selected()
                .filter(|_| !screen.loading)
                .map(|_| Message::OpenDelete(ListKind::Folders)),
            false,
        ),
        toolbar_button(
            "Create Folder",
            Some(Message::Navigate(Route::CreateFolder)),
            true,
        ),
    ];
    view_screen(screen, ListKind::Folders, actions, |_, _| None)
}

/// Renders the rules table.
pub fn view_rules(screen: &ListScreen<Rule>, features: FeatureSet) -> Element<'_, Message> {
    let mut actions = vec![
        toolbar_button("\u{21BB} Refresh", Some(Message::Refresh), false),
        toolbar_button(
            "Delete",
            screen
                .selected()
                .filter(|_| !screen.loading)
                .map(|_| Message::OpenDelete(ListKind::Rules)),
            false,
        ),
    ];
    if features.email {
        actions.push(toolbar_button(
            "Create Rule",
            Some(Message::Navigate(Route::CreateRule)),
            true,
        ));
    }
    view_screen(screen, ListKind::Rules, actions, rule_action)
}

fn rule_action(action: &str, rule: &Rule) -> Option<Message> {
    (action == TOGGLE_RULE_ACTION).then(|| Message::ToggleRule(rule.id.clone(), !rule.enabled))
}

fn view_screen<'a, R: Record>(
    screen: &'a ListScreen<R>,
    kind: ListKind,
    actions: Vec<Element<'a, Message>>,
    on_action: ActionHandler<R>,
) -> Element<'a, Message> {
    let mut content =
        column![view_title(screen.list.title().to_string(), screen, actions)].spacing(14);
    if let Some(controls) = view_controls(screen, kind) {
        content = content.push(controls);
    }
    match view_placeholder(screen, kind) {
        Some(placeholder) => content = content.push(placeholder),
        None => {
            content = content.push(
                scrollable(view_table(screen, kind, on_action))
                    .height(Length::Fill)
                    .style(scrollable_style),
            );
        }
    }

    container(content)
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(page_style)
        .into()
}
