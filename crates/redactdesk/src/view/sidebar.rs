//! Navigation sidebar.

use iced::widget::{Column, Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

use redactdesk_core::{NavItem, Route};

use super::BOLD;
use crate::message::Message;
use crate::style::widgets::{
    badge_style, nav_button_active_style, nav_button_style, palette, scrollable_style,
    sidebar_style,
};

/// Number of fixed entries (Home, Folders, Rules) before the folder list.
const FIXED_ENTRIES: usize = 3;

/// Renders the sidebar from the navigation items.
pub fn view_sidebar(items: Vec<NavItem>, current: &Route) -> Element<'static, Message> {
    let p = palette::current();

    let mut entries = items.into_iter();
    let fixed: Vec<Element<'static, Message>> = entries
        .by_ref()
        .take(FIXED_ENTRIES)
        .map(|item| view_nav_item(item, current))
        .collect();
    let folders: Vec<Element<'static, Message>> =
        entries.map(|item| view_nav_item(item, current)).collect();

    let caption = container(text("FOLDERS").size(11).font(BOLD).color(p.text_muted))
        .padding([12, 12]);

    let content = column![
        Column::with_children(fixed).spacing(2),
        caption,
        scrollable(Column::with_children(folders).spacing(2))
            .height(Length::Fill)
            .style(scrollable_style),
    ]
    .padding([12, 8]);

    container(content)
        .width(Length::Fixed(230.0))
        .height(Length::Fill)
        .style(sidebar_style)
        .into()
}

fn view_nav_item(item: NavItem, current: &Route) -> Element<'static, Message> {
    let is_active = item.route == *current;

    let mut content = row![text(item.label).size(14)]
        .spacing(8)
        .align_y(Alignment::Center);

    if let Some(count) = item.badge {
        content = content.push(Space::new().width(Length::Fill));
        content = content.push(
            container(text(count.to_string()).size(11).font(BOLD))
                .padding([1, 7])
                .style(badge_style),
        );
    }

    let style = if is_active {
        nav_button_active_style
    } else {
        nav_button_style
    };

    button(content.width(Length::Fill))
        .width(Length::Fill)
        .padding([8, 12])
        .style(style)
        .on_press(Message::Navigate(item.route))
        .into()
}
