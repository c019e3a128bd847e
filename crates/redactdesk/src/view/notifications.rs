//! Notification banners.

use iced::widget::{Column, Space, button, column, container, row, text};
use iced::{Alignment, Element, Length};

use redactdesk_core::{Notification, Notifications};

use super::SEMIBOLD;
use crate::message::Message;
use crate::style::widgets::{banner_style, ghost_button_style};

/// Renders the banner stack; nothing when there are no notifications.
pub fn view_notifications(notifications: &Notifications) -> Element<'static, Message> {
    if notifications.is_empty() {
        return Space::new().height(Length::Fixed(0.0)).into();
    }

    let banners: Vec<Element<'static, Message>> =
        notifications.items().iter().map(view_banner).collect();

    Column::with_children(banners)
        .spacing(6)
        .padding([8, 20])
        .into()
}

fn view_banner(notification: &Notification) -> Element<'static, Message> {
    let dismiss = button(text("\u{2715}").size(14))
        .padding([2, 8])
        .style(ghost_button_style)
        .on_press(Message::DismissNotifications);

    container(
        row![
            column![
                text(notification.header.clone()).size(14).font(SEMIBOLD),
                text(notification.content.clone()).size(13),
            ]
            .spacing(2),
            Space::new().width(Length::Fill),
            dismiss,
        ]
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([10, 16])
    .style(banner_style(notification.kind))
    .into()
}
