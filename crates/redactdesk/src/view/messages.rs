//! Messages screen: card list and the detail drawer.

use chrono::{Local, NaiveDateTime};
use iced::widget::{Column, Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

use redactdesk_core::format::{format_detail, format_received, preview};
use redactdesk_core::{EmailMessage, FeatureSet, Route};
use redactdesk_table::ColumnDescriptor;

use super::list::{toolbar_button, view_controls, view_placeholder, view_title};
use super::{BOLD, SEMIBOLD};
use crate::message::{ListKind, ListMessage, Message};
use crate::model::MessagesScreen;
use crate::style::widgets::{
    body_block_style, drawer_style, ghost_button_style, page_style, palette,
    row_button_selected_style, row_button_style, scrollable_style,
};

/// Renders the messages screen.
pub fn view_messages(screen: &MessagesScreen, features: FeatureSet) -> Element<'_, Message> {
    let cards = &screen.cards;

    let mut actions: Vec<Element<'_, Message>> = vec![
        toolbar_button("\u{21BB} Refresh", Some(Message::Refresh), false),
        toolbar_button(
            if screen.exporting { "Exporting..." } else { "Export" },
            screen.can_export().then_some(Message::Export),
            false,
        ),
        toolbar_button(
            "Add Folder",
            Some(Message::Navigate(Route::CreateFolder)),
            false,
        ),
    ];
    if features.email {
        actions.push(toolbar_button(
            "Add Filtering Rule",
            Some(Message::Navigate(Route::CreateRule)),
            false,
        ));
        actions.push(toolbar_button(
            "Forward",
            screen.selected_case().map(|_| Message::OpenForward),
            true,
        ));
    }

    let mut content = column![view_title(screen.title(), cards, actions)].spacing(14);
    if let Some(controls) = view_controls(cards, ListKind::Messages) {
        content = content.push(controls);
    }

    if let Some(placeholder) = view_placeholder(cards, ListKind::Messages) {
        content = content.push(placeholder);
    } else {
        let now = Local::now().naive_local();
        let columns = cards.list.visible_columns();
        let list: Vec<Element<'_, Message>> = cards
            .list
            .derive(&cards.records)
            .visible_page
            .into_iter()
            .map(|message| view_card(screen, &columns, message, now))
            .collect();
        content = content.push(
            scrollable(Column::with_children(list).spacing(6))
                .height(Length::Fill)
                .style(scrollable_style),
        );
    }

    container(content)
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(page_style)
        .into()
}

fn view_card<'a>(
    screen: &'a MessagesScreen,
    columns: &[&ColumnDescriptor<EmailMessage>],
    message: &EmailMessage,
    now: NaiveDateTime,
) -> Element<'a, Message> {
    let p = palette::current();
    let selected = screen.cards.list.is_selected(message);

    let mut lines = Column::new().spacing(4);
    lines = lines.push(
        row![
            text(message.from_address.clone()).size(14).font(SEMIBOLD),
            Space::new().width(Length::Fill),
            text(format_received(&message.email_receive_time, now))
                .size(12)
                .color(p.text_muted),
        ]
        .align_y(Alignment::Center),
    );

    for column in columns.iter().filter(|c| c.id != "FromAddress") {
        let value = match column.id.as_str() {
            "RedactedBody" => preview(message.preview_body()),
            "EmailReceiveTime" => format_received(&message.email_receive_time, now),
            _ => column.render(message),
        };
        if value.is_empty() {
            continue;
        }
        lines = lines.push(
            row![
                text(column.header.clone())
                    .size(12)
                    .color(p.text_muted)
                    .width(Length::Fixed(120.0)),
                text(value).size(13).color(p.text_primary),
            ]
            .spacing(8),
        );
    }

    let style = if selected {
        row_button_selected_style
    } else {
        row_button_style
    };

    button(lines)
        .width(Length::Fill)
        .padding([10, 14])
        .style(style)
        .on_press(Message::List(
            ListKind::Messages,
            ListMessage::Select(message.case_id.to_string()),
        ))
        .into()
}

/// Renders the message detail drawer.
pub fn view_message_drawer(screen: &MessagesScreen) -> Element<'_, Message> {
    let p = palette::current();

    let close = button(text("\u{2715}").size(14))
        .padding([4, 8])
        .style(ghost_button_style)
        .on_press(Message::CloseDrawer);

    let header = row![
        text("Message").size(16).font(SEMIBOLD),
        Space::new().width(Length::Fill),
        close,
    ]
    .align_y(Alignment::Center);

    let body: Element<'_, Message> = if screen.detail_loading {
        text("Loading message...")
            .size(14)
            .color(p.text_secondary)
            .into()
    } else if let Some(message) = &screen.detail {
        view_detail(message)
    } else {
        text("Please, select an email message from the inbox first.")
            .size(14)
            .color(p.text_secondary)
            .into()
    };

    container(
        column![
            header,
            scrollable(body)
                .height(Length::Fill)
                .style(scrollable_style)
        ]
        .spacing(16),
    )
    .padding(20)
    .width(Length::Fixed(440.0))
    .height(Length::Fill)
    .style(drawer_style)
    .into()
}

fn view_detail(message: &EmailMessage) -> Element<'_, Message> {
    let p = palette::current();

    let mut content = column![
        text(message.email_subject.clone()).size(18).font(SEMIBOLD),
        detail_line("From", message.from_address.clone()),
        detail_line("Received", format_detail(&message.email_receive_time)),
    ]
    .spacing(8);

    if let Some(folder) = message.folder.as_ref().filter(|f| !f.name.is_empty()) {
        content = content.push(detail_line("Folder", folder.name.clone()));
    }
    if !message.dominant_language.is_empty() {
        content = content.push(detail_line(
            "Primary Language",
            message.dominant_language.clone(),
        ));
    }

    content = content.push(
        container(
            text(message.preview_body().to_string())
                .size(14)
                .color(p.text_primary),
        )
        .padding(12)
        .width(Length::Fill)
        .style(body_block_style),
    );

    let attachments = message.attachments();
    if !attachments.is_empty() {
        content = content.push(text("ATTACHMENTS").size(11).font(BOLD).color(p.text_muted));
        for attachment in attachments {
            content = content.push(
                button(text(format!("\u{1F4CE} {}", attachment.name)).size(13))
                    .padding([4, 8])
                    .style(ghost_button_style)
                    .on_press_maybe(
                        (!attachment.url.is_empty())
                            .then(|| Message::OpenLink(attachment.url.clone())),
                    ),
            );
        }
    }

    content.into()
}

fn detail_line(label: &'static str, value: String) -> Element<'static, Message> {
    let p = palette::current();
    row![
        text(label)
            .size(12)
            .color(p.text_muted)
            .width(Length::Fixed(120.0)),
        text(value).size(13),
    ]
    .spacing(8)
    .into()
}
