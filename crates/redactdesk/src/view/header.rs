//! Top bar: title, breadcrumbs and global actions.

use iced::widget::{Row, Space, button, container, row, text};
use iced::{Alignment, Element, Length};

use redactdesk_core::Breadcrumb;

use super::BOLD;
use crate::message::Message;
use crate::style::widgets::{ghost_button_style, header_style, palette};
use crate::style::widgets::palette::ThemeMode;

/// Renders the header with the breadcrumb trail.
pub fn view_header(
    breadcrumbs: Vec<Breadcrumb>,
    theme_mode: ThemeMode,
) -> Element<'static, Message> {
    let p = palette::current();

    let title = text("RedactDesk").size(20).font(BOLD).color(p.primary);

    let last = breadcrumbs.len().saturating_sub(1);
    let mut trail = Row::new().spacing(4).align_y(Alignment::Center);
    for (index, crumb) in breadcrumbs.into_iter().enumerate() {
        if index > 0 {
            trail = trail.push(text("/").size(13).color(p.text_muted));
        }
        trail = if index == last {
            trail.push(text(crumb.label).size(13).color(p.text_primary))
        } else {
            trail.push(
                button(text(crumb.label).size(13))
                    .padding([2, 6])
                    .style(ghost_button_style)
                    .on_press(Message::Navigate(crumb.route)),
            )
        };
    }

    let theme_icon = match theme_mode {
        ThemeMode::Light => "\u{263E}",
        ThemeMode::Dark => "\u{2600}",
    };
    let theme_btn = button(text(theme_icon).size(18))
        .padding([6, 10])
        .style(ghost_button_style)
        .on_press(Message::ToggleTheme);

    let refresh_btn = button(text("\u{21BB}").size(18))
        .padding([6, 10])
        .style(ghost_button_style)
        .on_press(Message::Refresh);

    let content = row![
        title,
        Space::new().width(Length::Fixed(24.0)),
        trail,
        Space::new().width(Length::Fill),
        refresh_btn,
        theme_btn,
    ]
    .spacing(8)
    .padding([10, 20])
    .align_y(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .style(header_style)
        .into()
}
